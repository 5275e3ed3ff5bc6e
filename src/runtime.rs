//! The page runtime: owns the document, the viewport and the behaviors,
//! turns notifications into handler calls and applies the resulting
//! mutations.
//!
//! Every public entry point runs one notification to completion before
//! returning, the way a browser event loop runs one handler at a time.

use crate::behavior::anchor::{AnchorClick, AnchorScroller};
use crate::behavior::navbar::NavbarToggler;
use crate::behavior::reveal::RevealAnimator;
use crate::behavior::section::SectionHighlighter;
use crate::behavior::{PageRefs, LOADED_CLASS, SCROLLED_CLASS};
use crate::core::dom::{Document, ElementId};
use crate::core::geometry::Margins;
use crate::core::intersection::ObserverOptions;
use crate::core::mutation::{Mutation, ObserverKind};
use crate::core::viewport::{ScrollBehavior, Viewport};
use crate::error::PageError;

/// Behavior tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSettings {
    /// Scroll offset (px) past which the navbar is flagged.
    pub navbar_threshold: f64,
    pub reveal: ObserverOptions,
    /// Seconds of reveal delay per position within a group.
    pub stagger_step: f64,
    pub section: ObserverOptions,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            navbar_threshold: 100.0,
            reveal: ObserverOptions::new(0.1).with_root_margin(Margins::new(0.0, 0.0, -100.0, 0.0)),
            stagger_step: 0.1,
            section: ObserverOptions::new(0.3),
        }
    }
}

/// Lifecycle milestones already delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    pub ready: bool,
    pub loaded: bool,
}

pub struct Page {
    doc: Document,
    viewport: Viewport,
    refs: PageRefs,
    navbar: NavbarToggler,
    anchors: AnchorScroller,
    reveal: RevealAnimator,
    sections: SectionHighlighter,
    lifecycle: Lifecycle,
}

impl Page {
    /// Resolve element references and start observing sections.
    /// Fails when the document has no navbar.
    pub fn new(doc: Document, viewport: Viewport, settings: PageSettings) -> Result<Self, PageError> {
        let refs = PageRefs::resolve(&doc)?;
        let navbar = NavbarToggler::new(refs.navbar, settings.navbar_threshold);
        let anchors = AnchorScroller::new(refs.navbar);
        let reveal = RevealAnimator::new(settings.reveal, settings.stagger_step);
        let sections = SectionHighlighter::new(settings.section, &refs.sections, refs.nav_links.clone());

        tracing::debug!(
            anchors = refs.anchors.len(),
            sections = refs.sections.len(),
            nav_links = refs.nav_links.len(),
            "page initialised"
        );

        let mut page = Self {
            doc,
            viewport,
            refs,
            navbar,
            anchors,
            reveal,
            sections,
            lifecycle: Lifecycle::default(),
        };
        page.notify_intersections();
        Ok(page)
    }

    // ── lifecycle ──────────────────────────────────────────────

    /// Document parsed: arm the reveal animations.  Idempotent.
    pub fn ready(&mut self) {
        if self.lifecycle.ready {
            return;
        }
        self.lifecycle.ready = true;
        let mutations = self.reveal.prepare(&self.doc);
        self.apply(mutations);
        self.notify_intersections();
    }

    /// All resources loaded: flag `body`.
    pub fn load(&mut self) {
        if self.lifecycle.loaded {
            return;
        }
        self.lifecycle.loaded = true;
        self.apply(vec![Mutation::AddClass {
            target: self.refs.body,
            class: LOADED_CLASS,
        }]);
    }

    // ── notifications ──────────────────────────────────────────

    /// User scroll by `delta` px (wheel, keys).
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        let moved = self.viewport.scroll_by(delta);
        if moved {
            self.on_scroll();
        }
        moved
    }

    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) -> bool {
        let moved = self.viewport.scroll_to(top, behavior);
        if moved {
            self.on_scroll();
        }
        moved
    }

    /// One animation frame.  Returns `true` when the page scrolled.
    pub fn tick(&mut self) -> bool {
        let moved = self.viewport.tick();
        if moved {
            self.on_scroll();
        }
        moved
    }

    /// Click on `element`.  Clicks inside a same-page anchor are routed to
    /// the anchor scroller; anything else returns `None`.
    pub fn click(&mut self, element: ElementId) -> Option<AnchorClick> {
        let anchor = self.doc.closest(element, |el| el.tag == "a")?;
        if !self.refs.anchors.contains(&anchor) {
            return None;
        }
        let href = self.doc.get(anchor).href.clone();
        let click = self
            .anchors
            .on_click(&self.doc, href.as_deref(), self.viewport.scroll_y());
        if let Some(scroll) = click.scroll.clone() {
            self.apply(vec![scroll]);
        }
        Some(click)
    }

    /// Viewport resized.  `relaid` is the same page laid out for the new
    /// width; if its shape differs from the current document it is ignored.
    pub fn resize(&mut self, width: f64, height: f64, relaid: Option<&Document>) {
        if let Some(relaid) = relaid {
            if !self.doc.adopt_geometry(relaid) {
                tracing::warn!("relayout changed document shape, keeping old geometry");
            }
        }
        let content = self.doc.scroll_height();
        let moved = self.viewport.resize(width, height, content);
        if moved {
            self.on_scroll();
        } else {
            self.notify_intersections();
        }
    }

    fn on_scroll(&mut self) {
        let flag = self.navbar.on_scroll(self.viewport.scroll_y());
        self.apply(vec![flag]);
        self.notify_intersections();
    }

    fn notify_intersections(&mut self) {
        let entries = self.reveal.take_records(&self.doc, &self.viewport);
        if !entries.is_empty() {
            let mutations = self.reveal.on_intersect(&entries);
            self.apply(mutations);
        }

        let entries = self.sections.take_records(&self.doc, &self.viewport);
        if !entries.is_empty() {
            let mutations = self.sections.on_intersect(&self.doc, &entries);
            self.apply(mutations);
        }
    }

    fn apply(&mut self, mutations: Vec<Mutation>) {
        for mutation in mutations {
            if mutation.apply_to(&mut self.doc) {
                continue;
            }
            match mutation {
                Mutation::ScrollTo { top, behavior } => {
                    if self.viewport.scroll_to(top, behavior) {
                        self.on_scroll();
                    }
                }
                Mutation::Unobserve {
                    observer: ObserverKind::Reveal,
                    target,
                } => {
                    self.reveal.unobserve(target);
                }
                // Sections stay observed for the lifetime of the page.
                _ => {}
            }
        }
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn refs(&self) -> &PageRefs {
        &self.refs
    }

    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn navbar_scrolled(&self) -> bool {
        self.doc.get(self.refs.navbar).has_class(SCROLLED_CLASS)
    }

    pub fn active_link(&self) -> Option<ElementId> {
        self.sections.active_link(&self.doc)
    }

    /// Anchor link under the viewport point `(x, y)`, if any.
    pub fn anchor_at(&self, x: f64, y: f64) -> Option<ElementId> {
        let hit = self.doc.element_at(x, y, self.viewport.scroll_y())?;
        let anchor = self.doc.closest(hit, |el| el.tag == "a")?;
        self.refs.anchors.contains(&anchor).then_some(anchor)
    }
}
