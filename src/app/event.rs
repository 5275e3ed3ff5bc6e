//! Input and frame events for the previewer loop.
//!
//! A background task turns crossterm input into [`AppEvent`]s.  When no
//! input arrives within one frame interval it emits `Tick`, which advances
//! smooth scrolling.  `Relayout` never comes from the reader; the debounced
//! resize handler in `main` sends it once the terminal size settles.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Raw terminal resize, fired for every intermediate size.
    Resize(u16, u16),
    /// Settled terminal size, delivered by the debounced resize handler.
    Relayout(u16, u16),
    /// Animation frame.
    Tick,
}

/// Start the reader.  It stops once the main loop drops its receiver.
pub fn spawn_event_reader(tick_rate: Duration, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        loop {
            let next = if event::poll(tick_rate).unwrap_or(false) {
                match event::read().ok().and_then(translate) {
                    Some(ev) => ev,
                    None => continue,
                }
            } else {
                AppEvent::Tick
            };
            if tx.send(next).is_err() {
                tracing::trace!("event loop gone, stopping reader");
                break;
            }
        }
    });
}

/// Callback for the debounced resize handler: forwards the settled size as
/// `Relayout`.  After shutdown the size is dropped.
pub fn relayout_sender(
    tx: mpsc::UnboundedSender<AppEvent>,
) -> impl Fn((u16, u16)) + Send + Sync + 'static {
    move |(w, h): (u16, u16)| {
        if tx.send(AppEvent::Relayout(w, h)).is_err() {
            tracing::trace!(w, h, "event loop gone, dropping relayout");
        }
    }
}

/// Terminal input the previewer reacts to.  Focus and paste events are
/// dropped.
fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn resize_and_keys_pass_through() {
        assert!(matches!(translate(CtEvent::Resize(80, 24)), Some(AppEvent::Resize(80, 24))));
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(translate(CtEvent::Key(key)), Some(AppEvent::Key(k)) if k == key));
        assert!(translate(CtEvent::FocusGained).is_none());
    }

    #[test]
    fn relayout_reaches_the_loop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let send = relayout_sender(tx);
        send((100, 30));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Relayout(100, 30))));

        drop(rx);
        send((90, 20));
    }
}
