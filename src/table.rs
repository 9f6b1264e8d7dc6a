// SPDX-License-Identifier: AGPL-3.0-or-later

//! Mapping from permission names to the arguments a request may carry for them.
use std::collections::BTreeMap;
use std::convert::TryFrom;

use thiserror::Error;

/// Sentinel argument value meaning "any free-text argument is allowed".
pub const WILDCARD: &str = "*";

/// Error types for decoding a `PermissionArgumentTable`.
#[derive(Error, Debug)]
pub enum TableError {
    /// Table contains an entry keyed by the empty string.
    #[error("permission name can not be empty")]
    EmptyPermissionName,

    /// Permission has no allowed arguments at all.
    #[error("permission '{0}' has no allowed arguments")]
    NoArguments(String),

    /// Table is not a JSON object of string arrays.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Arguments allowed for a single permission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgumentSpec {
    /// Any free-text argument is accepted.
    Wildcard,

    /// Argument must be one of these values, kept in the order the page supplied them.
    Enumerated(Vec<String>),
}

impl ArgumentSpec {
    /// Classifies a raw argument sequence.
    ///
    /// Only the exact sequence `["*"]` is a wildcard. A `"*"` listed next to other values is
    /// treated as a literal option.
    pub fn from_values(values: Vec<String>) -> Self {
        match values.as_slice() {
            [only] if only == WILDCARD => Self::Wildcard,
            _ => Self::Enumerated(values),
        }
    }

    /// Returns true if any free-text argument is accepted.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Returns the closed list of options, empty for wildcard permissions.
    pub fn options(&self) -> &[String] {
        match self {
            Self::Wildcard => &[],
            Self::Enumerated(values) => values,
        }
    }
}

/// Immutable permission → allowed-arguments table handed to a form by the host page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionArgumentTable(BTreeMap<String, ArgumentSpec>);

impl PermissionArgumentTable {
    /// Decodes a table from its JSON representation `{ "permission": ["arg", ...] }`.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Returns the allowed arguments of a permission.
    pub fn get(&self, permission: &str) -> Option<&ArgumentSpec> {
        self.0.get(permission)
    }

    /// Returns true if the table has an entry for this permission.
    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains_key(permission)
    }

    /// Returns all permission names, sorted.
    pub fn permissions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of permissions in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table has no permissions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the names out of `offered` which have no table entry.
    ///
    /// The empty name stands for "none selected" in permission selectors and is never reported.
    pub fn missing<'a, I>(&self, offered: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        offered
            .into_iter()
            .filter(|name| !name.is_empty() && !self.contains(name))
            .map(str::to_owned)
            .collect()
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for PermissionArgumentTable {
    type Error = TableError;

    fn try_from(raw: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut table = BTreeMap::new();

        for (permission, values) in raw {
            if permission.is_empty() {
                return Err(TableError::EmptyPermissionName);
            }

            if values.is_empty() {
                return Err(TableError::NoArguments(permission));
            }

            table.insert(permission, ArgumentSpec::from_values(values));
        }

        Ok(Self(table))
    }
}
