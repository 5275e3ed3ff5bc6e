//! Navbar shadow: flag the navbar once the page is scrolled past a
//! threshold.

use crate::core::dom::ElementId;
use crate::core::mutation::Mutation;

use super::SCROLLED_CLASS;

#[derive(Debug, Clone)]
pub struct NavbarToggler {
    navbar: ElementId,
    /// Offset (px) the page must be scrolled *past* to set the flag.
    threshold: f64,
}

impl NavbarToggler {
    pub fn new(navbar: ElementId, threshold: f64) -> Self {
        Self { navbar, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Scroll notification.  Always writes the flag, so repeated
    /// notifications at one offset are idempotent.
    pub fn on_scroll(&self, scroll_y: f64) -> Mutation {
        if scroll_y > self.threshold {
            Mutation::AddClass {
                target: self.navbar,
                class: SCROLLED_CLASS,
            }
        } else {
            Mutation::RemoveClass {
                target: self.navbar,
                class: SCROLLED_CLASS,
            }
        }
    }
}
