//! Layout helpers: split the terminal area into regions and convert
//! between terminal cells and page pixels.

use pagefx::core::page::{CHAR_WIDTH, LINE_HEIGHT};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout with the page viewport and a bottom status bar.
pub struct AppLayout {
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page viewport
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            page_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Page area for a terminal of `cols` × `rows`, without building a `Rect`.
    pub fn page_cells(cols: u16, rows: u16) -> (u16, u16) {
        let layout = Self::from_area(Rect::new(0, 0, cols, rows));
        (layout.page_area.width, layout.page_area.height)
    }
}

/// Size in page pixels of `cols` × `rows` cells.
pub fn cells_to_px(cols: u16, rows: u16) -> (f64, f64) {
    (f64::from(cols) * CHAR_WIDTH, f64::from(rows) * LINE_HEIGHT)
}

/// Page-pixel coordinates of the center of cell `(col, row)`.
pub fn cell_center_px(col: u16, row: u16) -> (f64, f64) {
    (
        (f64::from(col) + 0.5) * CHAR_WIDTH,
        (f64::from(row) + 0.5) * LINE_HEIGHT,
    )
}

/// Map a viewport-relative pixel rect onto cells of `area`, clipped.
/// Also returns how many rows were cut off at the top.
pub fn clip_to_cells(area: Rect, rect: &pagefx::core::geometry::Rect) -> Option<(Rect, u16)> {
    let top = (rect.top() / LINE_HEIGHT).round() as i64;
    let bottom = (rect.bottom() / LINE_HEIGHT).round() as i64;
    let left = (rect.left() / CHAR_WIDTH).round() as i64;
    let right = (rect.right() / CHAR_WIDTH).round() as i64;

    let clip_top = top.max(0);
    let clip_bottom = bottom.min(i64::from(area.height));
    let clip_left = left.max(0);
    let clip_right = right.min(i64::from(area.width));
    if clip_top >= clip_bottom || clip_left >= clip_right {
        return None;
    }

    let cells = Rect::new(
        area.x + clip_left as u16,
        area.y + clip_top as u16,
        (clip_right - clip_left) as u16,
        (clip_bottom - clip_top) as u16,
    );
    Some((cells, (clip_top - top) as u16))
}
