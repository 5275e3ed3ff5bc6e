//! Input handling.  Maps key/mouse events to page notifications.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use pagefx::behavior::anchor::fragment_id;
use pagefx::core::page::LINE_HEIGHT;
use pagefx::{ElementId, ScrollBehavior};

use super::state::AppState;
use crate::config::Action;
use crate::ui::layout::cell_center_px;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let step = f64::from(state.scroll_step_rows) * LINE_HEIGHT;
    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => {
            state.page.scroll_by(-step);
        }
        Action::ScrollDown => {
            state.page.scroll_by(step);
        }
        Action::PageUp => {
            let page = page_step(state);
            state.page.scroll_by(-page);
        }
        Action::PageDown => {
            let page = page_step(state);
            state.page.scroll_by(page);
        }
        Action::Top => {
            state.page.scroll_to(0.0, ScrollBehavior::Smooth);
        }
        Action::Bottom => {
            let bottom = state.page.viewport().max_scroll();
            state.page.scroll_to(bottom, ScrollBehavior::Smooth);
        }
        Action::NextLink => cycle_focus(state, 1),
        Action::PrevLink => cycle_focus(state, -1),
        Action::FollowLink => {
            if let Some(anchor) = state.focused_anchor() {
                follow_link(state, anchor);
            }
        }
    }
    state.record_reveals();
}

/// Process a mouse event: wheel scrolls, left click follows links.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = f64::from(state.scroll_step_rows) * LINE_HEIGHT;
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            state.page.scroll_by(step);
        }
        MouseEventKind::ScrollUp => {
            state.page.scroll_by(-step);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let (x, y) = cell_center_px(mouse.column, mouse.row);
            if let Some(anchor) = state.page.anchor_at(x, y) {
                state.focused_link = state.page.refs().anchors.iter().position(|&a| a == anchor);
                follow_link(state, anchor);
            }
        }
        _ => {}
    }
    state.record_reveals();
}

/// Advance animations by one frame.
pub fn handle_tick(state: &mut AppState) {
    if state.page.tick() {
        state.record_reveals();
    }
}

/// Viewport height minus the navbar, so paging never hides a line under it.
fn page_step(state: &AppState) -> f64 {
    let navbar = state.page.refs().navbar;
    let navbar_height = state.page.document().get(navbar).rect.height;
    (state.page.viewport().height() - navbar_height).max(LINE_HEIGHT)
}

fn cycle_focus(state: &mut AppState, delta: isize) {
    let count = state.page.refs().anchors.len();
    if count == 0 {
        return;
    }
    let next = match state.focused_link {
        None if delta >= 0 => 0,
        None => count - 1,
        Some(i) => (i as isize + delta).rem_euclid(count as isize) as usize,
    };
    state.focused_link = Some(next);

    if let Some(anchor) = state.focused_anchor() {
        let el = state.page.document().get(anchor);
        state.status_message = Some(format!(
            "{} → {}",
            el.text,
            el.href.as_deref().unwrap_or_default()
        ));
    }
}

fn follow_link(state: &mut AppState, anchor: ElementId) {
    let href = state.page.document().get(anchor).href.clone();
    let Some(click) = state.page.click(anchor) else {
        return;
    };
    state.status_message = match (click.scroll.is_some(), fragment_id(href.as_deref())) {
        (true, Some(id)) => Some(format!("Scrolling to #{id}")),
        (false, Some(id)) => Some(format!("No element with id \"{id}\"")),
        (_, None) => None,
    };
}
