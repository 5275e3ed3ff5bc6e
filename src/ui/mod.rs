//! UI / rendering layer.  Everything that touches Ratatui widgets.
//!
//! This layer reads the page state and turns it into cells on the
//! terminal.  It never mutates the page.

pub mod layout;
pub mod page_widget;
pub mod theme;
