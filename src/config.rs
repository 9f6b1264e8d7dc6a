// SPDX-License-Identifier: AGPL-3.0-or-later

//! Per-form configuration read from the form's data attributes.
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Name the server reads the argument from.
pub const ARGUMENT_NAME: &str = "argument";

/// Name given to the ineligible argument field under the renaming strategy.
pub const IGNORED_NAME: &str = "ignore";

/// Class added to a submit control once its form was submitted.
pub const BUSY_CLASS: &str = "busy";

/// Error types for reading a form configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown argument strategy '{0}', expected 'disable' or 'rename'")]
    UnknownStrategy(String),

    #[error("invalid form configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the ineligible argument field is kept out of the submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Disable the ineligible field.
    #[default]
    Disable,

    /// Rename the ineligible field.
    Rename,
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "disable" => Ok(Self::Disable),
            "rename" => Ok(Self::Rename),
            _ => Err(ConfigError::UnknownStrategy(value.to_owned())),
        }
    }
}

/// Behaviour of one permission request form.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub strategy: StrategyKind,
    pub argument_name: String,
    pub ignored_name: String,
    pub busy_class: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            argument_name: ARGUMENT_NAME.to_owned(),
            ignored_name: IGNORED_NAME.to_owned(),
            busy_class: BUSY_CLASS.to_owned(),
        }
    }
}

impl FormConfig {
    /// Reads the configuration from the optional JSON attribute and the optional strategy
    /// shorthand attribute, the latter taking precedence.
    pub fn from_attributes(
        config: Option<&str>,
        strategy: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut form_config = match config {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(json)?,
            _ => Self::default(),
        };

        if let Some(strategy) = strategy {
            form_config.strategy = strategy.trim().parse()?;
        }

        Ok(form_config)
    }
}
