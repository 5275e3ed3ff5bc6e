//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::collections::HashMap;
use std::time::Instant;

use pagefx::behavior::VISIBLE_CLASS;
use pagefx::core::viewport::Viewport;
use pagefx::{ElementId, Page, PageError, PageSpec};

use crate::config::AppConfig;
use crate::ui::layout::cells_to_px;

/// Top-level application state.
pub struct AppState {
    /// The page runtime (document, viewport, behaviors).
    pub page: Page,
    /// Description the page was laid out from; kept for relayout.
    pub spec: PageSpec,
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Keyboard focus, as an index into the page's anchor list.
    pub focused_link: Option<usize>,
    /// When each element picked up the visible class.  The renderer fades
    /// elements in once their stagger delay has passed.
    pub revealed_at: HashMap<ElementId, Instant>,
    /// Rows moved per scroll step (keys, wheel).
    pub scroll_step_rows: u16,
}

impl AppState {
    /// Lay out `spec` for a page area of `cols` × `rows` cells.
    pub fn new(
        spec: PageSpec,
        config: AppConfig,
        cols: u16,
        rows: u16,
        scroll_step_rows: u16,
    ) -> Result<Self, PageError> {
        let (width, height) = cells_to_px(cols, rows);
        let doc = spec.layout(width);
        let viewport = Viewport::new(width, height, doc.scroll_height(), config.scroll_speed);
        let page = Page::new(doc, viewport, config.page)?;

        Ok(Self {
            page,
            spec,
            config,
            should_quit: false,
            status_message: None,
            focused_link: None,
            revealed_at: HashMap::new(),
            scroll_step_rows,
        })
    }

    /// Stamp newly revealed elements with the current time.
    pub fn record_reveals(&mut self) {
        let now = Instant::now();
        let doc = self.page.document();
        for id in doc.by_class(VISIBLE_CLASS) {
            self.revealed_at.entry(id).or_insert(now);
        }
    }

    /// Re-lay the page out for a new page area.
    pub fn relayout(&mut self, cols: u16, rows: u16) {
        let (width, height) = cells_to_px(cols, rows);
        let doc = self.spec.layout(width);
        self.page.resize(width, height, Some(&doc));
        self.record_reveals();
        tracing::debug!(cols, rows, "relayout");
    }

    /// Element id of the keyboard-focused link.
    pub fn focused_anchor(&self) -> Option<ElementId> {
        self.focused_link
            .and_then(|i| self.page.refs().anchors.get(i).copied())
    }
}
