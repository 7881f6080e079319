// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Trellis plugin facade.
//!
//! This crate provides the capability contracts plugins implement, the error
//! types raised while loading them, and the small value types shared with
//! the registry.

pub mod error;
pub mod traits;
pub mod types;
pub mod version;

// Re-export key items at crate root for ergonomic imports.
pub use error::{TrellisError, ValidationError};
pub use types::{ButtonColor, Markup, ModelId, Slot, TemplateContext};
pub use version::parse_version;

pub use traits::{CustomValidator, GraphqlType, TemplateExtension};
