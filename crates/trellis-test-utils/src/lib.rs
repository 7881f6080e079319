// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Trellis integration tests.
//!
//! Provides configurable plugins and contributors so registry and loader
//! behavior can be exercised without a real host.
//!
//! # Components
//!
//! - [`MockPlugin`] - Plugin whose contributions are set per test
//! - [`StaticExtension`], [`StaticGraphqlType`], [`RequiredField`] - Minimal contributors
//! - [`TestHarness`] - Loads a config file from disk against a catalog

pub mod contributors;
pub mod harness;
pub mod mock_plugin;

pub use contributors::{RequiredField, StaticExtension, StaticGraphqlType};
pub use harness::TestHarness;
pub use mock_plugin::MockPlugin;
