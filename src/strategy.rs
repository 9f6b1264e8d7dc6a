// SPDX-License-Identifier: AGPL-3.0-or-later

//! Strategies deciding which argument representation takes part in the form submission.
use std::fmt::Debug;

use crate::config::{FormConfig, StrategyKind};
use crate::field::Field;
use crate::mode::ArgumentKind;

/// Marks exactly one of the two argument representations as the one to submit.
///
/// Passing `None` makes both representations ineligible. Every implementation makes `required`
/// track eligibility and shows only the eligible field.
pub trait EligibilityStrategy: Debug {
    fn set_eligible(&self, text: &dyn Field, select: &dyn Field, which: Option<ArgumentKind>);
}

/// Swaps submission names: the eligible field carries the argument name, the other one a name the
/// server ignores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameExchange {
    argument_name: String,
    ignored_name: String,
}

impl NameExchange {
    pub fn new(argument_name: &str, ignored_name: &str) -> Self {
        Self {
            argument_name: argument_name.to_owned(),
            ignored_name: ignored_name.to_owned(),
        }
    }

    fn apply(&self, field: &dyn Field, eligible: bool) {
        let name = if eligible {
            &self.argument_name
        } else {
            &self.ignored_name
        };

        field.set_name(name);
        field.set_required(eligible);
        field.set_visible(eligible);
    }
}

impl Default for NameExchange {
    fn default() -> Self {
        Self::new(crate::config::ARGUMENT_NAME, crate::config::IGNORED_NAME)
    }
}

impl EligibilityStrategy for NameExchange {
    fn set_eligible(&self, text: &dyn Field, select: &dyn Field, which: Option<ArgumentKind>) {
        self.apply(text, which == Some(ArgumentKind::Text));
        self.apply(select, which == Some(ArgumentKind::Select));
    }
}

/// Disables the ineligible field so the browser leaves it out of the submission. Both fields keep
/// their names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisableExchange;

impl DisableExchange {
    fn apply(field: &dyn Field, eligible: bool) {
        field.set_disabled(!eligible);
        field.set_required(eligible);
        field.set_visible(eligible);
    }
}

impl EligibilityStrategy for DisableExchange {
    fn set_eligible(&self, text: &dyn Field, select: &dyn Field, which: Option<ArgumentKind>) {
        Self::apply(text, which == Some(ArgumentKind::Text));
        Self::apply(select, which == Some(ArgumentKind::Select));
    }
}

/// Builds the strategy selected by a form configuration.
pub fn from_config(config: &FormConfig) -> Box<dyn EligibilityStrategy> {
    match config.strategy {
        StrategyKind::Rename => Box::new(NameExchange::new(
            &config.argument_name,
            &config.ignored_name,
        )),
        StrategyKind::Disable => Box::new(DisableExchange),
    }
}
