//! Descriptions of the side effects a behavior wants performed.
//!
//! Behavior handlers are pure: they look at an event and return a list of
//! [`Mutation`]s.  The page runtime is the only place that applies them.

use super::dom::{Document, ElementId};
use super::viewport::ScrollBehavior;

/// Which intersection subscription a mutation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverKind {
    Reveal,
    Section,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddClass {
        target: ElementId,
        class: &'static str,
    },
    RemoveClass {
        target: ElementId,
        class: &'static str,
    },
    SetStyle {
        target: ElementId,
        property: &'static str,
        value: String,
    },
    RemoveStyle {
        target: ElementId,
        property: &'static str,
    },
    ScrollTo {
        top: f64,
        behavior: ScrollBehavior,
    },
    Unobserve {
        observer: ObserverKind,
        target: ElementId,
    },
}

impl Mutation {
    /// Apply a document mutation.  Returns `false` for mutations that act
    /// on something other than the document (scrolling, observers); the
    /// caller owns those.
    pub fn apply_to(&self, doc: &mut Document) -> bool {
        match self {
            Mutation::AddClass { target, class } => {
                doc.get_mut(*target).add_class(class);
            }
            Mutation::RemoveClass { target, class } => {
                doc.get_mut(*target).remove_class(class);
            }
            Mutation::SetStyle {
                target,
                property,
                value,
            } => doc.get_mut(*target).set_style(property, value.clone()),
            Mutation::RemoveStyle { target, property } => {
                doc.get_mut(*target).remove_style(property);
            }
            Mutation::ScrollTo { .. } | Mutation::Unobserve { .. } => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::Element;

    #[test]
    fn document_mutations_apply() {
        let mut doc = Document::new();
        let body = doc.body();
        let el = doc.append(body, Element::new("div"));

        assert!(Mutation::AddClass { target: el, class: "is-visible" }.apply_to(&mut doc));
        assert!(Mutation::SetStyle {
            target: el,
            property: "transition-delay",
            value: "0.2s".into(),
        }
        .apply_to(&mut doc));
        assert!(doc.get(el).has_class("is-visible"));
        assert_eq!(doc.get(el).style("transition-delay"), Some("0.2s"));

        assert!(Mutation::RemoveStyle { target: el, property: "transition-delay" }.apply_to(&mut doc));
        assert_eq!(doc.get(el).style("transition-delay"), None);
    }

    #[test]
    fn non_document_mutations_are_left_to_the_caller() {
        let mut doc = Document::new();
        let scroll = Mutation::ScrollTo {
            top: 10.0,
            behavior: ScrollBehavior::Smooth,
        };
        assert!(!scroll.apply_to(&mut doc));
    }
}
