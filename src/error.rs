//! Error taxonomy for the UI engine.
//!
//! TRADE-OFFS
//! ==========
//! None of these errors ever reach the user. They exist so internal helpers
//! can use `Result` and `?`, and the page boundary turns them into log lines
//! while the affected feature quietly disables itself.

use crate::storage::Scope;

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure reported by a [`crate::storage::StorageBackend`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The browser refused access (private mode, disabled storage, sandbox).
    #[error("{0} storage is unavailable")]
    Unavailable(Scope),
    /// A write was rejected, typically because the quota is exhausted.
    #[error("{scope} storage rejected write of `{key}`")]
    WriteRejected { scope: Scope, key: String },
}

/// Lookup failure inside the toggle manager.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    #[error("unknown toggle group `{0}`")]
    UnknownGroup(String),
    #[error("widget `{widget}` is not a member of group `{group}`")]
    UnknownWidget { group: String, widget: String },
}

/// Failure loading [`crate::config::UiConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid ui config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid ui config: expected a JSON object")]
    NotAnObject,
    #[error("invalid ui config: {field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Umbrella error used at the page boundary.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Toggle(#[from] ToggleError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A DOM element a feature depends on is absent from the page.
    #[error("required element `{0}` not found")]
    MissingElement(String),
}
