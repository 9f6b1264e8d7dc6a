// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::Serialize;
use thiserror::Error;

use crate::table::{ArgumentSpec, PermissionArgumentTable};

/// The two co-located representations of the "argument" value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentKind {
    /// Free-text input.
    Text,

    /// Dropdown with a closed list of options.
    Select,
}

/// Argument-entry affordance derived from the current permission selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgumentMode {
    /// No permission chosen yet.
    Unselected,

    /// Chosen permission accepts any free-text argument.
    Wildcard,

    /// Chosen permission accepts one of these arguments.
    Enumerated(Vec<String>),
}

impl ArgumentMode {
    /// Returns the representation which will be submitted in this mode.
    pub fn eligible(&self) -> Option<ArgumentKind> {
        match self {
            Self::Unselected => None,
            Self::Wildcard => Some(ArgumentKind::Text),
            Self::Enumerated(_) => Some(ArgumentKind::Select),
        }
    }

    /// Returns true if argument and reason sections are shown in this mode.
    pub fn shows_sections(&self) -> bool {
        !matches!(self, Self::Unselected)
    }

    /// Dropdown options of this mode, empty unless enumerated.
    pub fn options(&self) -> &[String] {
        match self {
            Self::Enumerated(options) => options,
            _ => &[],
        }
    }

    /// Short lowercase name, used in logs and state snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unselected => "unselected",
            Self::Wildcard => "wildcard",
            Self::Enumerated(_) => "enumerated",
        }
    }
}

/// Error types for deriving the argument mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// Selected permission is offered by the page but missing from its table.
    #[error("permission '{0}' has no entry in the permission argument table")]
    UnknownPermission(String),
}

/// Derives the argument mode for a permission selector value.
///
/// The empty string means no permission is selected.
pub fn derive_mode(
    permission: &str,
    table: &PermissionArgumentTable,
) -> Result<ArgumentMode, ModeError> {
    if permission.is_empty() {
        return Ok(ArgumentMode::Unselected);
    }

    match table.get(permission) {
        Some(ArgumentSpec::Wildcard) => Ok(ArgumentMode::Wildcard),
        Some(ArgumentSpec::Enumerated(options)) => Ok(ArgumentMode::Enumerated(options.clone())),
        None => Err(ModeError::UnknownPermission(permission.to_owned())),
    }
}
