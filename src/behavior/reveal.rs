//! Reveal-on-intersect animations.
//!
//! Every element in the reveal groups starts `Pending`.  The first time it
//! intersects the (margin-shrunk) viewport it becomes `Revealed`, gets the
//! visible class and is unobserved.  `Revealed` is terminal.

use std::collections::HashMap;

use crate::core::dom::{Document, ElementId};
use crate::core::intersection::{IntersectionEntry, IntersectionObserver, ObserverOptions};
use crate::core::mutation::{Mutation, ObserverKind};
use crate::core::viewport::Viewport;

use super::VISIBLE_CLASS;

/// Element groups animated on reveal, each staggered independently.
pub const REVEAL_GROUPS: [&str; 3] = ["skill-card", "project-card", "blog-item"];

/// Inline style property carrying the stagger delay.
pub const DELAY_PROPERTY: &str = "transition-delay";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// Owns the reveal intersection subscription and per-element state.
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    observer: IntersectionObserver,
    states: HashMap<ElementId, RevealState>,
    /// Seconds of delay added per position within a group.
    stagger_step: f64,
}

impl RevealAnimator {
    pub fn new(options: ObserverOptions, stagger_step: f64) -> Self {
        Self {
            observer: IntersectionObserver::new(options),
            states: HashMap::new(),
            stagger_step,
        }
    }

    /// Document-ready: assign stagger delays and start observing every
    /// element of every group.
    pub fn prepare(&mut self, doc: &Document) -> Vec<Mutation> {
        let mut mutations = Vec::new();
        for group in REVEAL_GROUPS {
            for (index, target) in doc.by_class(group).into_iter().enumerate() {
                mutations.push(Mutation::SetStyle {
                    target,
                    property: DELAY_PROPERTY,
                    value: format_delay(stagger_delay(index, self.stagger_step)),
                });
                if self.states.contains_key(&target) {
                    continue;
                }
                self.states.insert(target, RevealState::Pending);
                self.observer.observe(target);
            }
        }
        tracing::debug!(observed = self.observer.len(), "reveal observer armed");
        mutations
    }

    pub fn take_records(&mut self, doc: &Document, viewport: &Viewport) -> Vec<IntersectionEntry> {
        self.observer.take_records(doc, viewport)
    }

    /// Intersection notification.  Pending elements that intersect move to
    /// `Revealed`; anything else is ignored.
    pub fn on_intersect(&mut self, entries: &[IntersectionEntry]) -> Vec<Mutation> {
        let mut mutations = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(state) = self.states.get_mut(&entry.target) else {
                continue;
            };
            if *state == RevealState::Revealed {
                continue;
            }
            *state = RevealState::Revealed;
            tracing::debug!(element = entry.target, ratio = entry.ratio, "revealed");
            mutations.push(Mutation::AddClass {
                target: entry.target,
                class: VISIBLE_CLASS,
            });
            mutations.push(Mutation::Unobserve {
                observer: ObserverKind::Reveal,
                target: entry.target,
            });
        }
        mutations
    }

    pub fn unobserve(&mut self, target: ElementId) -> bool {
        self.observer.unobserve(target)
    }

    pub fn state(&self, target: ElementId) -> Option<RevealState> {
        self.states.get(&target).copied()
    }

    pub fn is_revealed(&self, target: ElementId) -> bool {
        self.state(target) == Some(RevealState::Revealed)
    }

    pub fn is_observing(&self, target: ElementId) -> bool {
        self.observer.is_observing(target)
    }

    pub fn pending_count(&self) -> usize {
        self.states
            .values()
            .filter(|&&s| s == RevealState::Pending)
            .count()
    }

    pub fn options(&self) -> ObserverOptions {
        self.observer.options()
    }
}

/// Delay (seconds) for the element at `index` within its group.
pub fn stagger_delay(index: usize, step: f64) -> f64 {
    index as f64 * step
}

/// CSS time value, rounded to milliseconds (`0.3s`, `0s`).
pub fn format_delay(seconds: f64) -> String {
    format!("{}s", (seconds * 1000.0).round() / 1000.0)
}

/// Parse a value written by [`format_delay`].
pub fn parse_delay(value: &str) -> Option<f64> {
    value
        .strip_suffix('s')?
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite())
}
