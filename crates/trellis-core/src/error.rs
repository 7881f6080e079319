// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Trellis plugin facade.

use thiserror::Error;

/// The primary error type used across plugin loading and registration.
///
/// `Config` and `Contract` failures are fatal at startup: they mean a plugin
/// is misconfigured or ships a broken contribution.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// Plugin metadata or user configuration is malformed or version-incompatible.
    #[error("configuration error: {0}")]
    Config(String),

    /// A contributed object does not satisfy the shape its registration requires.
    #[error("contract error: {0}")]
    Contract(String),

    /// A contribution point of a specific plugin failed to register.
    #[error("plugin {plugin} failed to register {path}: {source}")]
    Contribution {
        plugin: String,
        path: String,
        source: Box<TrellisError>,
    },

    /// Template lookup or rendering failed.
    #[error("template error: {0}")]
    Template(String),

    /// An enabled plugin is not part of the compiled-in plugin set.
    #[error(
        "plugin `{name}` is not installed{}",
        .suggestion.as_ref().map(|s| format!(" (did you mean `{s}`?)")).unwrap_or_default()
    )]
    PluginNotFound {
        name: String,
        suggestion: Option<String>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TrellisError {
    /// Returns true for the contract family, including wrapped contribution failures.
    pub fn is_contract(&self) -> bool {
        match self {
            TrellisError::Contract(_) => true,
            TrellisError::Contribution { source, .. } => source.is_contract(),
            _ => false,
        }
    }

    /// Returns true for the configuration family.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            TrellisError::Config(_) | TrellisError::PluginNotFound { .. }
        )
    }
}

/// A save-time validation failure raised by a custom validator.
///
/// Unlike [`TrellisError`], this is user-facing: the host rejects the save,
/// shows the message, and keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
