//! Smooth anchor scrolling for same-page links.
//!
//! The browser's jump-to-fragment is always suppressed.  Placeholder links
//! (`#`, empty) and fragments naming no element are swallowed silently.

use crate::core::dom::{Document, ElementId};
use crate::core::mutation::Mutation;
use crate::core::viewport::ScrollBehavior;

/// Result of activating an anchor link.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorClick {
    pub default_prevented: bool,
    /// Smooth scroll command, when the fragment resolved.
    pub scroll: Option<Mutation>,
}

impl AnchorClick {
    fn swallowed() -> Self {
        Self {
            default_prevented: true,
            scroll: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnchorScroller {
    navbar: ElementId,
}

impl AnchorScroller {
    pub fn new(navbar: ElementId) -> Self {
        Self { navbar }
    }

    /// Click notification for a link whose `href` is `href`.
    pub fn on_click(&self, doc: &Document, href: Option<&str>, scroll_y: f64) -> AnchorClick {
        let Some(id) = fragment_id(href) else {
            return AnchorClick::swallowed();
        };
        let Some(target) = doc.by_id(id) else {
            tracing::trace!(fragment = id, "anchor target not found");
            return AnchorClick::swallowed();
        };

        let top = scroll_target(
            doc.client_rect(target, scroll_y).top(),
            scroll_y,
            doc.get(self.navbar).rect.height,
        );
        tracing::debug!(fragment = id, top, "anchor scroll");

        AnchorClick {
            default_prevented: true,
            scroll: Some(Mutation::ScrollTo {
                top,
                behavior: ScrollBehavior::Smooth,
            }),
        }
    }
}

/// `#name` -> `name`.  `None` for empty, bare `#`, or non-fragment hrefs.
pub fn fragment_id(href: Option<&str>) -> Option<&str> {
    let id = href?.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

/// Offset that puts a target's top edge just below the navbar.
pub fn scroll_target(client_top: f64, scroll_y: f64, navbar_height: f64) -> f64 {
    client_top + scroll_y - navbar_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::Element;
    use crate::core::geometry::Rect;

    fn page() -> (Document, AnchorScroller) {
        let mut doc = Document::new();
        let body = doc.body();
        let navbar = doc.append(
            body,
            Element::new("nav")
                .with_class("navbar")
                .with_rect(Rect::new(0.0, 0.0, 800.0, 80.0))
                .fixed(),
        );
        doc.append(
            body,
            Element::new("section")
                .with_id("section2")
                .with_rect(Rect::new(0.0, 520.0, 800.0, 400.0)),
        );
        (doc, AnchorScroller::new(navbar))
    }

    #[test]
    fn target_compensates_for_navbar() {
        assert_eq!(scroll_target(500.0, 20.0, 80.0), 440.0);
    }

    #[test]
    fn click_scrolls_smoothly_to_target() {
        let (doc, scroller) = page();
        // Scrolled 20px: section2's top is 500px below the viewport top.
        let click = scroller.on_click(&doc, Some("#section2"), 20.0);
        assert!(click.default_prevented);
        assert_eq!(
            click.scroll,
            Some(Mutation::ScrollTo {
                top: 440.0,
                behavior: ScrollBehavior::Smooth
            })
        );
    }

    #[test]
    fn placeholder_links_do_nothing() {
        let (doc, scroller) = page();
        for href in [Some("#"), Some(""), None] {
            let click = scroller.on_click(&doc, href, 0.0);
            assert!(click.default_prevented);
            assert_eq!(click.scroll, None);
        }
    }

    #[test]
    fn broken_links_fail_silently() {
        let (doc, scroller) = page();
        let click = scroller.on_click(&doc, Some("#nowhere"), 0.0);
        assert!(click.default_prevented);
        assert_eq!(click.scroll, None);
    }

    #[test]
    fn fragment_parsing() {
        assert_eq!(fragment_id(Some("#about")), Some("about"));
        assert_eq!(fragment_id(Some("#")), None);
        assert_eq!(fragment_id(Some("about")), None);
    }
}
