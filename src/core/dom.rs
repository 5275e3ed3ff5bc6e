//! In-memory document tree the page behaviors read and mutate.
//!
//! Elements live in an arena (the [`Document`] struct) and reference each
//! other by [`ElementId`], the same way a browser hands out node handles.
//! Rects are stored in document coordinates; [`Document::client_rect`]
//! converts them to viewport coordinates for a given scroll offset.

use std::collections::BTreeMap;

use super::geometry::Rect;

/// Index into [`Document::nodes`].
pub type ElementId = usize;

// ───────────────────────────────────────── element ───────────

/// A single element: tag, identity, presentation surface and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Inline style properties (`property -> value`).
    pub style: BTreeMap<String, String>,
    pub href: Option<String>,
    pub text: String,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    /// Border box in document coordinates (viewport coordinates when
    /// `fixed` is set).
    pub rect: Rect,
    /// Positioned relative to the viewport rather than the document.
    pub fixed: bool,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            style: BTreeMap::new(),
            href: None,
            text: String::new(),
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
            fixed: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns `true` when the class was not already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Returns `true` when the class was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.style.insert(property.to_string(), value.into());
    }

    pub fn remove_style(&mut self, property: &str) {
        self.style.remove(property);
    }
}

// ───────────────────────────────────────── document ──────────

/// Arena-backed document tree rooted at `body`.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    body: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            body: 0,
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `element` as the last child of `parent` and return its id.
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = self.nodes.len();
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent].children.push(id);
        id
    }

    pub fn get(&self, id: ElementId) -> &Element {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id]
    }

    /// All element ids in document (pre-)order.
    pub fn document_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect_preorder(self.body, &mut out);
        out
    }

    fn collect_preorder(&self, id: ElementId, out: &mut Vec<ElementId>) {
        out.push(id);
        for &child in &self.nodes[id].children {
            self.collect_preorder(child, out);
        }
    }

    /// Elements matching `pred`, in document order.
    pub fn select(&self, pred: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|&id| pred(&self.nodes[id]))
            .collect()
    }

    /// Equivalent of `querySelectorAll('.class')`.
    pub fn by_class(&self, class: &str) -> Vec<ElementId> {
        self.select(|el| el.has_class(class))
    }

    /// Equivalent of `getElementById` (first match in document order).
    pub fn by_id(&self, id: &str) -> Option<ElementId> {
        self.document_order()
            .into_iter()
            .find(|&el| self.nodes[el].id.as_deref() == Some(id))
    }

    /// Is any ancestor of `id` carrying `class`?
    pub fn has_ancestor_class(&self, id: ElementId, class: &str) -> bool {
        let mut cursor = self.nodes[id].parent;
        while let Some(parent) = cursor {
            if self.nodes[parent].has_class(class) {
                return true;
            }
            cursor = self.nodes[parent].parent;
        }
        false
    }

    /// Closest element (self included) matching `pred`, like `Element.closest`.
    pub fn closest(&self, id: ElementId, pred: impl Fn(&Element) -> bool) -> Option<ElementId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if pred(&self.nodes[current]) {
                return Some(current);
            }
            cursor = self.nodes[current].parent;
        }
        None
    }

    /// Rect relative to the viewport at `scroll_y`
    /// (`getBoundingClientRect`).
    pub fn client_rect(&self, id: ElementId, scroll_y: f64) -> Rect {
        let el = &self.nodes[id];
        if el.fixed || self.has_fixed_ancestor(id) {
            el.rect
        } else {
            el.rect.translate_y(-scroll_y)
        }
    }

    fn has_fixed_ancestor(&self, id: ElementId) -> bool {
        let mut cursor = self.nodes[id].parent;
        while let Some(parent) = cursor {
            if self.nodes[parent].fixed {
                return true;
            }
            cursor = self.nodes[parent].parent;
        }
        false
    }

    /// Scrollable height: the lowest bottom edge of any in-flow element.
    pub fn scroll_height(&self) -> f64 {
        self.document_order()
            .into_iter()
            .filter(|&id| !self.nodes[id].fixed && !self.has_fixed_ancestor(id))
            .map(|id| self.nodes[id].rect.bottom())
            .fold(0.0, f64::max)
    }

    /// Deepest element under the viewport point `(x, y)`.  Fixed elements
    /// paint above the flow, so they are hit-tested first.
    pub fn element_at(&self, x: f64, y: f64, scroll_y: f64) -> Option<ElementId> {
        let order = self.document_order();
        let hit = |fixed_layer: bool| {
            order
                .iter()
                .rev()
                .copied()
                .filter(|&id| id != self.body)
                .filter(|&id| (self.nodes[id].fixed || self.has_fixed_ancestor(id)) == fixed_layer)
                .find(|&id| self.client_rect(id, scroll_y).contains(x, y))
        };
        hit(true).or_else(|| hit(false))
    }

    /// Copy geometry from a re-laid-out document with the same shape.
    /// Returns `false` (and changes nothing) when the shapes differ.
    pub fn adopt_geometry(&mut self, other: &Document) -> bool {
        let same_shape = self.nodes.len() == other.nodes.len()
            && self
                .nodes
                .iter()
                .zip(&other.nodes)
                .all(|(a, b)| a.tag == b.tag && a.id == b.id && a.children == b.children);
        if !same_shape {
            return false;
        }
        for (node, laid_out) in self.nodes.iter_mut().zip(&other.nodes) {
            node.rect = laid_out.rect;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new();
        let body = doc.body();
        let nav = doc.append(
            body,
            Element::new("nav")
                .with_class("navbar")
                .with_rect(Rect::new(0.0, 0.0, 800.0, 80.0))
                .fixed(),
        );
        let menu = doc.append(nav, Element::new("ul").with_class("nav-menu"));
        let link = doc.append(
            menu,
            Element::new("a")
                .with_href("#about")
                .with_rect(Rect::new(600.0, 20.0, 80.0, 40.0)),
        );
        let about = doc.append(
            body,
            Element::new("section")
                .with_id("about")
                .with_rect(Rect::new(0.0, 900.0, 800.0, 600.0)),
        );
        (doc, nav, link, about)
    }

    #[test]
    fn queries_follow_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.append(body, Element::new("div"));
        let second = doc.append(body, Element::new("div").with_class("card"));
        // Appended later, but nested under `first`, so it precedes `second`.
        let nested = doc.append(first, Element::new("div").with_class("card"));

        assert_eq!(doc.by_class("card"), vec![nested, second]);
    }

    #[test]
    fn class_list_is_a_set() {
        let mut el = Element::new("div");
        assert!(el.add_class("scrolled"));
        assert!(!el.add_class("scrolled"));
        assert_eq!(el.classes, vec!["scrolled".to_string()]);
        assert!(el.remove_class("scrolled"));
        assert!(!el.remove_class("scrolled"));
    }

    #[test]
    fn client_rect_respects_fixed_positioning() {
        let (doc, nav, link, about) = sample();
        assert_eq!(doc.client_rect(nav, 300.0).top(), 0.0);
        assert_eq!(doc.client_rect(link, 300.0).top(), 20.0);
        assert_eq!(doc.client_rect(about, 300.0).top(), 600.0);
    }

    #[test]
    fn ancestor_and_id_lookup() {
        let (doc, _, link, about) = sample();
        assert!(doc.has_ancestor_class(link, "nav-menu"));
        assert!(!doc.has_ancestor_class(about, "nav-menu"));
        assert_eq!(doc.by_id("about"), Some(about));
        assert_eq!(doc.by_id("missing"), None);
    }

    #[test]
    fn scroll_height_ignores_fixed_elements() {
        let (doc, ..) = sample();
        assert_eq!(doc.scroll_height(), 1500.0);
    }

    #[test]
    fn hit_testing_prefers_fixed_layer() {
        let (doc, nav, link, about) = sample();
        assert_eq!(doc.element_at(610.0, 30.0, 0.0), Some(link));
        assert_eq!(doc.element_at(10.0, 30.0, 0.0), Some(nav));
        // Section scrolled under the navbar: navbar still wins.
        assert_eq!(doc.element_at(10.0, 30.0, 880.0), Some(nav));
        assert_eq!(doc.element_at(10.0, 200.0, 880.0), Some(about));
    }

    #[test]
    fn adopt_geometry_requires_same_shape() {
        let (mut doc, _, _, about) = sample();
        let (mut wider, ..) = sample();
        wider.get_mut(about).rect = Rect::new(0.0, 1000.0, 1200.0, 500.0);
        assert!(doc.adopt_geometry(&wider));
        assert_eq!(doc.get(about).rect.top(), 1000.0);

        let empty = Document::new();
        assert!(!doc.adopt_geometry(&empty));
        assert_eq!(doc.get(about).rect.top(), 1000.0);
    }
}
