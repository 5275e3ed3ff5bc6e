//! Viewport intersection notifications.
//!
//! An [`IntersectionObserver`] tracks a set of target elements and, when
//! asked for records, reports every target whose "satisfies the threshold"
//! state changed since the last check.  A freshly observed target always
//! produces one initial record.

use super::dom::{Document, ElementId};
use super::geometry::{Margins, Rect};
use super::viewport::Viewport;

/// Observer configuration: visibility threshold and root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction (0.0–1.0) of the target's area that must be inside the root.
    pub threshold: f64,
    /// Applied to the viewport box before intersecting.
    pub root_margin: Margins,
}

impl ObserverOptions {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin: Margins::ZERO,
        }
    }

    pub fn with_root_margin(mut self, margin: Margins) -> Self {
        self.root_margin = margin;
        self
    }
}

/// One intersection record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub ratio: f64,
    /// Whether the target currently satisfies the threshold.
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
struct Observation {
    target: ElementId,
    /// Last reported state; `None` until the initial record is delivered.
    last: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    observed: Vec<Observation>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observed: Vec::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Start observing `target`.  Observing twice is a no-op.
    pub fn observe(&mut self, target: ElementId) {
        if !self.is_observing(target) {
            self.observed.push(Observation { target, last: None });
        }
    }

    /// Stop observing `target`.  Returns `true` if it was observed.
    pub fn unobserve(&mut self, target: ElementId) -> bool {
        let before = self.observed.len();
        self.observed.retain(|o| o.target != target);
        before != self.observed.len()
    }

    pub fn is_observing(&self, target: ElementId) -> bool {
        self.observed.iter().any(|o| o.target == target)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Compute pending records against the current layout and scroll
    /// offset, in observation order.
    pub fn take_records(&mut self, doc: &Document, viewport: &Viewport) -> Vec<IntersectionEntry> {
        let root = self.options.root_margin.expand(viewport.client_rect());
        let threshold = self.options.threshold;
        let mut entries = Vec::new();

        for obs in &mut self.observed {
            let rect = doc.client_rect(obs.target, viewport.scroll_y());
            let ratio = intersection_ratio(&rect, &root);
            let is_intersecting = ratio.is_some_and(|r| r >= threshold);

            if obs.last != Some(is_intersecting) {
                obs.last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: obs.target,
                    ratio: ratio.unwrap_or(0.0),
                    is_intersecting,
                });
            }
        }

        entries
    }
}

/// Fraction of `target` inside `root`, or `None` when they don't touch.
/// A zero-area target that touches the root counts as fully visible.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> Option<f64> {
    let overlap = target.intersection(root)?;
    let area = target.area();
    if area == 0.0 {
        return Some(1.0);
    }
    Some((overlap.area() / area).clamp(0.0, 1.0))
}
