// SPDX-License-Identifier: AGPL-3.0-or-later

use tracing::debug;

use crate::field::SubmitControl;

/// Outcome of a submit event on a guarded form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Let the browser submit the form.
    Proceed,

    /// Form was submitted already, cancel the event.
    Suppress,
}

/// Lets a form be submitted once.
///
/// The first submit disables the submit control and marks it busy. The guard never re-arms, a
/// second click before the navigation completed does not submit again.
#[derive(Debug)]
pub struct SubmitGuard<B> {
    control: B,
    busy_class: String,
    submitted: bool,
}

impl<B: SubmitControl> SubmitGuard<B> {
    pub fn new(control: B, busy_class: &str) -> Self {
        Self {
            control,
            busy_class: busy_class.to_owned(),
            submitted: false,
        }
    }

    pub fn on_submit(&mut self) -> SubmitDecision {
        if self.submitted {
            debug!("suppressing repeated form submission");
            return SubmitDecision::Suppress;
        }

        self.submitted = true;
        self.control.set_disabled(true);
        self.control.add_class(&self.busy_class);

        SubmitDecision::Proceed
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::FakeButton;

    use super::{SubmitDecision, SubmitGuard};

    #[test]
    fn submits_once() {
        let button = FakeButton::default();
        let mut guard = SubmitGuard::new(button.clone(), "busy");

        assert!(!guard.is_submitted());
        assert_eq!(guard.on_submit(), SubmitDecision::Proceed);
        assert!(button.is_disabled());
        assert!(button.has_class("busy"));

        assert_eq!(guard.on_submit(), SubmitDecision::Suppress);
        assert_eq!(guard.on_submit(), SubmitDecision::Suppress);
        assert!(guard.is_submitted());
        assert_eq!(button.class_count(), 1);
    }

    #[test]
    fn uses_configured_busy_class() {
        let button = FakeButton::default();
        let mut guard = SubmitGuard::new(button.clone(), "is-loading");
        guard.on_submit();
        assert!(button.has_class("is-loading"));
        assert!(!button.has_class("busy"));
    }
}
