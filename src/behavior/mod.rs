//! The page behaviors.  Each one is a small struct holding the element
//! references it needs and pure handlers that turn an event into
//! [`Mutation`](crate::core::mutation::Mutation)s.

pub mod anchor;
pub mod navbar;
pub mod reveal;
pub mod section;

use crate::core::dom::{Document, ElementId};
use crate::error::PageError;

/// Class set on the navbar once the page is scrolled past the threshold.
pub const SCROLLED_CLASS: &str = "scrolled";
/// Class set on revealed elements.
pub const VISIBLE_CLASS: &str = "is-visible";
/// Class set on `body` once the page finished loading.
pub const LOADED_CLASS: &str = "loaded";
/// Inline color marking the active navigation link.
pub const ACTIVE_LINK_COLOR: &str = "var(--color-primary)";

/// Element references resolved once at startup and handed to each
/// behavior, so no handler has to query the document ad hoc.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRefs {
    pub body: ElementId,
    /// `.navbar`
    pub navbar: ElementId,
    /// `a[href^="#"]`
    pub anchors: Vec<ElementId>,
    /// `.nav-menu a`
    pub nav_links: Vec<ElementId>,
    /// `section[id], header[id]`
    pub sections: Vec<ElementId>,
}

impl PageRefs {
    pub fn resolve(doc: &Document) -> Result<Self, PageError> {
        let navbar = doc
            .by_class("navbar")
            .first()
            .copied()
            .ok_or(PageError::MissingNavbar)?;

        let anchors = doc.select(|el| {
            el.tag == "a" && el.href.as_deref().is_some_and(|href| href.starts_with('#'))
        });
        let nav_links = doc
            .select(|el| el.tag == "a")
            .into_iter()
            .filter(|&id| doc.has_ancestor_class(id, "nav-menu"))
            .collect();
        let sections = doc.select(|el| (el.tag == "section" || el.tag == "header") && el.id.is_some());

        Ok(Self {
            body: doc.body(),
            navbar,
            anchors,
            nav_links,
            sections,
        })
    }
}
