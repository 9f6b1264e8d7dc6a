// SPDX-License-Identifier: AGPL-3.0-or-later

//! # permission-request-form
//!
//! Browser-side behaviour of permission request forms, compiled to WebAssembly.
//!
//! A permission request names a permission, an argument and a reason. The host page hands every
//! form a table of the arguments each permission allows, and this crate keeps the argument field
//! consistent with the selected permission: free text for wildcard permissions, a dropdown for
//! permissions with a closed list of arguments, and nothing while no permission is chosen.
//! Exactly one argument representation is submitted.
//!
//! The controller is written against the small set of traits in [`field`], the `wasm32` build
//! binds them to real DOM elements and exports the JavaScript API.
pub mod config;
pub mod controller;
pub mod field;
pub mod guard;
pub mod mirror;
pub mod mode;
pub mod strategy;
pub mod table;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
#[cfg(test)]
mod tests;
#[cfg(target_arch = "wasm32")]
pub mod wasm;
pub mod widget;

pub use config::{ConfigError, FormConfig, StrategyKind};
pub use controller::{FormController, FormElements, FormState};
pub use guard::{SubmitDecision, SubmitGuard};
pub use mirror::Mirrors;
pub use mode::{derive_mode, ArgumentKind, ArgumentMode, ModeError};
pub use strategy::{DisableExchange, EligibilityStrategy, NameExchange};
pub use table::{ArgumentSpec, PermissionArgumentTable, TableError, WILDCARD};
