//! Scroll-driven enhancements for a single-page portfolio.
//!
//! The crate models the page as an explicit [`Document`] plus a
//! [`Viewport`], and implements four behaviors on top of it:
//!
//! * a navbar flag set once the page is scrolled past a threshold,
//! * smooth scrolling for same-page anchor links,
//! * one-shot reveal animations for cards and list items,
//! * highlighting of the nav link for the section in view.
//!
//! A [`debounce`] helper is exported for callers that need to rate-limit
//! their own handlers.  The `pagefx` binary previews a page in the terminal.

pub mod behavior;
pub mod core;
pub mod error;
pub mod runtime;

pub use crate::behavior::reveal::RevealAnimator;
pub use crate::core::debounce::{debounce, Debounced};
pub use crate::core::dom::{Document, Element, ElementId};
pub use crate::core::page::PageSpec;
pub use crate::core::viewport::{ScrollBehavior, Viewport};
pub use crate::error::PageError;
pub use crate::runtime::{Page, PageSettings};
