// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability contracts that plugin contributions implement.
//!
//! Any `Send + Sync` type implementing one of these traits can be handed to
//! the matching registration function; no base type is required.

pub mod graphql;
pub mod template;
pub mod validator;

pub use graphql::GraphqlType;
pub use template::TemplateExtension;
pub use validator::CustomValidator;
