//! Core model – document tree, viewport, intersection engine, mutations.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod debounce;
pub mod dom;
pub mod geometry;
pub mod intersection;
pub mod mutation;
pub mod page;
pub mod viewport;
