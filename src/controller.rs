// SPDX-License-Identifier: AGPL-3.0-or-later

//! Dependent-field controller of a single permission request form.
//!
//! A permission request carries a permission name, an argument and a reason. Which arguments are
//! acceptable depends on the permission: some accept any free text, others only one value out of
//! a closed list. The controller owns all fields of one form and keeps the argument affordance in
//! line with the selected permission:
//!
//! - No permission selected: argument and reason sections are hidden and no argument is
//!   submitted.
//! - Wildcard permission: the free-text field is the one submitted.
//! - Enumerated permission: the dropdown is rebuilt from the table and is the one submitted.
//!
//! Which of the two representations ends up in the submission is decided by the form's
//! [`EligibilityStrategy`].
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::field::{ChoiceField, Field, Section};
use crate::mirror::Mirrors;
use crate::mode::{derive_mode, ArgumentKind, ArgumentMode, ModeError};
use crate::strategy::EligibilityStrategy;
use crate::table::PermissionArgumentTable;

/// Elements of one permission request form.
#[derive(Debug)]
pub struct FormElements<F, C, S> {
    /// Permission selectors, more than one when the page renders duplicated sub-forms.
    pub permission: Vec<C>,

    /// Group selector, only present on forms where the group is chosen as well.
    pub group: Option<C>,

    /// Free-text argument representation.
    pub text: F,

    /// Dropdown argument representation.
    pub select: C,

    /// Reason fields, more than one when the page renders duplicated sub-forms.
    pub reason: Vec<F>,

    pub argument_sections: Vec<S>,

    pub reason_sections: Vec<S>,
}

/// Snapshot of the controller state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub permission: String,
    pub mode: &'static str,
    pub eligible: Option<ArgumentKind>,
    pub options: Vec<String>,
    pub locked: usize,
}

/// Keeps the argument fields of one form consistent with its permission selection.
#[derive(Debug)]
pub struct FormController<F, C, S> {
    table: PermissionArgumentTable,
    strategy: Box<dyn EligibilityStrategy>,
    permission: Mirrors<C>,
    reason: Mirrors<F>,
    text: F,
    select: C,
    argument_sections: Vec<S>,
    reason_sections: Vec<S>,
    locked: Vec<C>,
    mode: ArgumentMode,
    primed: bool,
}

impl<F, C, S> FormController<F, C, S>
where
    F: Field,
    C: ChoiceField + Clone,
    S: Section,
{
    /// Takes ownership of the form's elements and brings them in line with the current
    /// permission selection.
    ///
    /// Selectors offering exactly one option had their value fixed by the page and get locked
    /// until [`before_submit`](Self::before_submit) is called.
    pub fn new(
        table: PermissionArgumentTable,
        elements: FormElements<F, C, S>,
        strategy: Box<dyn EligibilityStrategy>,
    ) -> Self {
        let FormElements {
            permission,
            group,
            text,
            select,
            reason,
            argument_sections,
            reason_sections,
        } = elements;

        let mut controller = Self {
            table,
            strategy,
            permission: Mirrors::new(permission),
            reason: Mirrors::new(reason),
            text,
            select,
            argument_sections,
            reason_sections,
            locked: Vec::new(),
            mode: ArgumentMode::Unselected,
            primed: false,
        };

        controller.warn_missing_permissions();
        controller.lock_prefixed(group);

        // Error was already logged, the form stays usable for every other selection
        let _ = controller.refresh();

        controller
    }

    fn warn_missing_permissions(&self) {
        if let Some(selector) = self.permission.first() {
            let offered = selector.options();
            let missing = self.table.missing(offered.iter().map(String::as_str));
            if !missing.is_empty() {
                warn!(?missing, "permission selector offers permissions without arguments");
            }
        }
    }

    fn lock_prefixed(&mut self, group: Option<C>) {
        let selectors = self.permission.iter().cloned().chain(group);

        let locked: Vec<C> = selectors
            .filter(|selector| selector.option_count() == 1 && !selector.is_disabled())
            .collect();

        for selector in &locked {
            debug!(name = %selector.name(), "locking pre-filled selector");
            selector.set_disabled(true);
        }

        self.locked = locked;
    }

    /// Derives the mode from the current permission value and updates all fields accordingly.
    ///
    /// A permission missing from the table leaves every field untouched.
    pub fn refresh(&mut self) -> Result<&ArgumentMode, ModeError> {
        let permission = self.permission.value();
        let mode = derive_mode(&permission, &self.table).map_err(|err| {
            error!(%permission, "{err}");
            err
        })?;

        for section in self.argument_sections.iter().chain(&self.reason_sections) {
            section.set_visible(mode.shows_sections());
        }

        match &mode {
            ArgumentMode::Unselected => (),
            ArgumentMode::Wildcard => {
                // Text typed while another mode was active is stale, pre-filled text is not
                if self.primed && self.mode != ArgumentMode::Wildcard {
                    self.text.set_value("");
                }
            }
            ArgumentMode::Enumerated(options) => self.rebuild_options(options),
        }

        self.strategy
            .set_eligible(&self.text, &self.select, mode.eligible());

        debug!(%permission, mode = mode.name(), "derived argument mode");

        self.mode = mode;
        self.primed = true;

        Ok(&self.mode)
    }

    fn rebuild_options(&self, options: &[String]) {
        let keep = match self.text.value() {
            prefilled if !self.primed && !prefilled.is_empty() => prefilled,
            _ => self.select.value(),
        };

        self.select.clear_options();
        for option in options {
            self.select.append_option(option);
        }

        if options.contains(&keep) {
            self.select.set_value(&keep);
        }
    }

    /// Handles a change of one permission selector: publishes the value to all selectors, then
    /// derives the new mode.
    pub fn permission_changed(&mut self, permission: &str) -> Result<&ArgumentMode, ModeError> {
        self.permission.publish(permission);
        self.refresh()
    }

    /// Handles an edit of one reason field by publishing the value to all reason fields.
    pub fn reason_changed(&self, reason: &str) {
        self.reason.publish(reason);
    }

    /// Re-enables the locked selectors so their values are part of the submission.
    ///
    /// Must run right before the browser serializes the form.
    pub fn before_submit(&self) {
        for selector in &self.locked {
            selector.set_disabled(false);
        }

        if !self.locked.is_empty() {
            debug!(count = self.locked.len(), "re-enabled locked selectors");
        }
    }

    pub fn mode(&self) -> &ArgumentMode {
        &self.mode
    }

    /// Representation which will be submitted as the argument, if any.
    pub fn eligible(&self) -> Option<ArgumentKind> {
        self.mode.eligible()
    }

    pub fn table(&self) -> &PermissionArgumentTable {
        &self.table
    }

    pub fn permission(&self) -> String {
        self.permission.value()
    }

    /// Number of selectors locked because the page fixed their value.
    pub fn locked_count(&self) -> usize {
        self.locked.len()
    }

    pub fn state(&self) -> FormState {
        FormState {
            permission: self.permission(),
            mode: self.mode.name(),
            eligible: self.eligible(),
            options: self.mode.options().to_vec(),
            locked: self.locked_count(),
        }
    }
}
