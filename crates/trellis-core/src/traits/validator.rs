// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Custom model validator contract.

use serde_json::Value;

use crate::error::ValidationError;

/// Save-time validation a plugin attaches to one host model.
///
/// The host runs every validator registered for a model before saving an
/// instance and blocks the save if any of them fails.
pub trait CustomValidator: Send + Sync + 'static {
    /// Name used in error messages and logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// The model identifier this validator applies to. Must be set.
    fn model(&self) -> Option<&str> {
        None
    }

    /// Check `object`; return a [`ValidationError`] with a user-facing message to reject it.
    fn validate(&self, object: &Value) -> Result<(), ValidationError>;
}
