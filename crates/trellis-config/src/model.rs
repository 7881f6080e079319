// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Trellis host.
//!
//! Fixed sections use `#[serde(deny_unknown_fields)]`; per-plugin settings
//! under `[plugins.config.<name>]` are free-form and handed to the plugin's
//! descriptor for validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User-supplied settings for a single plugin.
pub type PluginSettings = Map<String, Value>;

/// Top-level Trellis configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrellisConfig {
    /// Host identity and logging.
    #[serde(default)]
    pub host: HostConfig,

    /// Enabled plugins and their settings.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

impl TrellisConfig {
    /// Settings supplied for `plugin`, or an empty mapping.
    pub fn plugin_settings(&self, plugin: &str) -> PluginSettings {
        self.plugins.config.get(plugin).cloned().unwrap_or_default()
    }
}

/// Host application settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Display name of the host application.
    #[serde(default = "default_host_name")]
    pub name: String,

    /// Host version checked against each plugin's `min_version`/`max_version`.
    #[serde(default = "default_host_version")]
    pub version: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            name: default_host_name(),
            version: default_host_version(),
            log_level: default_log_level(),
        }
    }
}

fn default_host_name() -> String {
    "trellis".to_string()
}

fn default_host_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// The `[plugins]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Names of enabled plugins, in load order.
    #[serde(default)]
    pub enabled: Vec<String>,

    /// Per-plugin user settings keyed by plugin name.
    #[serde(default)]
    pub config: BTreeMap<String, PluginSettings>,
}
