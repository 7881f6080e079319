// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptors, contribution registry, and host loading.
//!
//! Plugins are compiled in and listed in a [`PluginCatalog`]. At startup the
//! [`PluginLoader`] validates every enabled plugin's [`PluginDescriptor`]
//! against the user's settings, runs each plugin's [`ready`] hook to fill a
//! [`Registry`], and freezes the registry for the host's readers.
//!
//! Contributors are typed: a registration function only accepts values
//! implementing the matching contract, so handing it anything else is a
//! compile error.
//!
//! ```compile_fail
//! use trellis_core::TemplateContext;
//! use trellis_plugin::Registry;
//!
//! let mut registry = Registry::new();
//! registry.register_template_extensions(vec![TemplateContext::default()]);
//! ```

pub mod catalog;
pub mod descriptor;
pub mod lifecycle;
pub mod loader;
pub mod manifest;
pub mod menu;
pub mod registry;
pub mod template;

pub use catalog::PluginCatalog;
pub use descriptor::{ContributionPoint, IntegrationPaths, PluginDescriptor};
pub use lifecycle::{ready, Plugin};
pub use loader::{LoadedPlugin, LoadedPlugins, PluginLoader};
pub use manifest::parse_plugin_manifest;
pub use menu::{MenuButton, MenuItem};
pub use registry::{Registry, RegistrySummary, TemplateEntry};
pub use template::render_template;
