//! Active-section highlighting in the navigation menu.
//!
//! When a section crosses its visibility threshold, every nav link is
//! cleared and the one pointing at that section (if any) is colored.  A
//! batch with several qualifying sections is processed in order, so the
//! last one wins.

use crate::core::dom::{Document, ElementId};
use crate::core::intersection::{IntersectionEntry, IntersectionObserver, ObserverOptions};
use crate::core::mutation::Mutation;
use crate::core::viewport::Viewport;

use super::ACTIVE_LINK_COLOR;

const COLOR_PROPERTY: &str = "color";

#[derive(Debug, Clone)]
pub struct SectionHighlighter {
    observer: IntersectionObserver,
    nav_links: Vec<ElementId>,
}

impl SectionHighlighter {
    /// Observe every section right away.
    pub fn new(options: ObserverOptions, sections: &[ElementId], nav_links: Vec<ElementId>) -> Self {
        let mut observer = IntersectionObserver::new(options);
        for &section in sections {
            observer.observe(section);
        }
        Self { observer, nav_links }
    }

    pub fn take_records(&mut self, doc: &Document, viewport: &Viewport) -> Vec<IntersectionEntry> {
        self.observer.take_records(doc, viewport)
    }

    pub fn on_intersect(&self, doc: &Document, entries: &[IntersectionEntry]) -> Vec<Mutation> {
        let mut mutations = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let section_id = doc.get(entry.target).id.as_deref().unwrap_or_default();

            mutations.extend(self.nav_links.iter().map(|&link| Mutation::RemoveStyle {
                target: link,
                property: COLOR_PROPERTY,
            }));

            match self.link_for(doc, section_id) {
                Some(link) => {
                    tracing::debug!(section = section_id, "active section");
                    mutations.push(Mutation::SetStyle {
                        target: link,
                        property: COLOR_PROPERTY,
                        value: ACTIVE_LINK_COLOR.to_string(),
                    });
                }
                None => tracing::debug!(section = section_id, "active section has no nav link"),
            }
        }
        mutations
    }

    /// The nav link whose `href` is `#` + `section_id`.
    pub fn link_for(&self, doc: &Document, section_id: &str) -> Option<ElementId> {
        let wanted = format!("#{section_id}");
        self.nav_links
            .iter()
            .copied()
            .find(|&link| doc.get(link).href.as_deref() == Some(wanted.as_str()))
    }

    /// The currently highlighted link, if any.
    pub fn active_link(&self, doc: &Document) -> Option<ElementId> {
        self.nav_links
            .iter()
            .copied()
            .find(|&link| doc.get(link).style(COLOR_PROPERTY) == Some(ACTIVE_LINK_COLOR))
    }

    pub fn nav_links(&self) -> &[ElementId] {
        &self.nav_links
    }
}
