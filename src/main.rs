//! Terminal previewer for the page behaviors.
//!
//! Run the binary to scroll through a page in the terminal: the navbar
//! picks up its shadow, cards fade in as they enter the viewport and the
//! nav link for the section in view lights up.
//! Run with `--dump` to print the page state without a terminal.

mod app;
mod config;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};

use pagefx::{debounce, PageSpec, ScrollBehavior};

use crate::app::{
    event::{relayout_sender, spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::ui::{layout::AppLayout, page_widget::PageWidget, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Preview scroll-driven page behaviors in the terminal")]
struct Cli {
    /// Page description (TOML).  Defaults to the built-in portfolio.
    page: Option<PathBuf>,

    /// Animation frame interval in milliseconds.
    #[arg(long, default_value_t = 33)]
    tick_ms: u64,

    /// Rows moved per scroll step.
    #[arg(long, default_value_t = 3)]
    scroll_step: u16,

    /// Print the page state and exit instead of opening the previewer.
    #[arg(long)]
    dump: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,

    /// With `--dump`: scroll offset (px) to jump to before printing.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// With `--dump`: viewport size in cells.
    #[arg(long, default_value_t = 120)]
    cols: u16,
    #[arg(long, default_value_t = 40)]
    rows: u16,
}

// ───────────────────────────────────────── headless ──────────

/// Print what the behaviors did for a page scrolled to `at`.
fn dump(state: &mut AppState, at: f64) {
    state.page.scroll_to(at, ScrollBehavior::Instant);
    let page = &state.page;
    let doc = page.document();

    println!("scroll_y: {}", page.viewport().scroll_y());
    println!("navbar scrolled: {}", page.navbar_scrolled());
    println!("body loaded: {}", page.lifecycle().loaded);
    println!(
        "active link: {}",
        page.active_link()
            .and_then(|id| doc.get(id).href.clone())
            .unwrap_or_else(|| "-".into())
    );
    for &section in &page.refs().sections {
        let el = doc.get(section);
        println!(
            "section #{} top={} height={}",
            el.id.as_deref().unwrap_or_default(),
            el.rect.top(),
            el.rect.height
        );
    }
    for group in pagefx::behavior::reveal::REVEAL_GROUPS {
        let members = doc.by_class(group);
        let revealed = members.iter().filter(|&&id| page.reveal().is_revealed(id)).count();
        println!("{group}: {revealed}/{} revealed", members.len());
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    let page = PageWidget::new(&state.page, &state.revealed_at).focused(state.focused_anchor());
    frame.render_widget(page, layout.page_area);

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing, filtered by RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let spec = match &cli.page {
        Some(path) => PageSpec::load(path)?,
        None => PageSpec::portfolio(),
    };
    let user_config = AppConfig::load();

    if cli.write_config {
        user_config.save()?;
        println!("wrote {}", config::config_path().display());
        return Ok(());
    }

    // ── headless mode ─────────────────────────────────────────
    if cli.dump {
        let (cols, rows) = AppLayout::page_cells(cli.cols, cli.rows);
        let mut state = AppState::new(spec, user_config, cols, rows, cli.scroll_step)?;
        state.page.ready();
        state.page.load();
        dump(&mut state, cli.at);
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let (cols, rows) = AppLayout::page_cells(size.width, size.height);
    let resize_wait = Duration::from_millis(user_config.resize_debounce_ms);
    let mut state = AppState::new(spec, user_config, cols, rows, cli.scroll_step)?;
    state.page.ready();
    state.page.load();
    state.record_reveals();

    // ── async channels ────────────────────────────────────────
    let (tx, mut events) = tokio::sync::mpsc::unbounded_channel::<AppEvent>();
    spawn_event_reader(Duration::from_millis(cli.tick_ms.max(1)), tx.clone());

    // Terminals emit a burst of resizes while being dragged; only relayout
    // once the size settles.
    let relayout = debounce(relayout_sender(tx.clone()), resize_wait);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &state))?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            AppEvent::Resize(w, h) => relayout.call((w, h)),
            AppEvent::Relayout(w, h) => {
                let (cols, rows) = AppLayout::page_cells(w, h);
                state.relayout(cols, rows);
            }
            AppEvent::Tick => handler::handle_tick(&mut state),
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    relayout.cancel();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
