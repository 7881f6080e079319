// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GraphQL schema type contract.

/// A schema object type a plugin adds to the host's GraphQL API.
///
/// The host's schema builder scans every registered type; there is no
/// per-model index.
pub trait GraphqlType: Send + Sync + 'static {
    /// Name used in error messages and logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// The GraphQL object type name exposed in the schema.
    fn graphql_name(&self) -> &str;

    /// The host model this type is backed by. Must be set.
    fn model(&self) -> Option<&str>;

    /// Model fields exposed on the type. Empty means all fields.
    fn fields(&self) -> Vec<String> {
        Vec::new()
    }
}
