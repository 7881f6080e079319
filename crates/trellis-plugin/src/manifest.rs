// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptor parsing from `plugin.toml` files.
//!
//! The structural settings arrive untyped here, so their shapes are checked
//! field by field before the descriptor is built.

use serde::Deserialize;
use serde_json::{Map, Value};

use trellis_core::{parse_version, TrellisError};

use crate::descriptor::{IntegrationPaths, PluginDescriptor};

/// Intermediate TOML deserialization struct for `plugin.toml`.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    plugin: PluginSection,
}

/// The `[plugin]` section of a `plugin.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginSection {
    name: String,
    version: String,
    #[serde(default)]
    verbose_name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    author_email: String,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    min_version: Option<String>,
    #[serde(default)]
    max_version: Option<String>,
    #[serde(default)]
    default_settings: Option<toml::Value>,
    #[serde(default)]
    required_settings: Option<toml::Value>,
    #[serde(default)]
    middleware: Option<toml::Value>,
    #[serde(default)]
    installed_apps: Option<toml::Value>,
    #[serde(default)]
    caching_config: Option<toml::Value>,
    #[serde(default)]
    paths: IntegrationPaths,
}

/// Parse a plugin descriptor from TOML content.
///
/// `name` and `version` must be non-empty, version bounds must parse, and
/// the five structural settings must have the right shape: tables for
/// `caching_config`/`default_settings`, arrays of strings for
/// `installed_apps`/`middleware`/`required_settings`.
pub fn parse_plugin_manifest(toml_content: &str) -> Result<PluginDescriptor, TrellisError> {
    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| TrellisError::Config(format!("invalid plugin manifest: {e}")))?;
    let section = file.plugin;

    if section.name.trim().is_empty() {
        return Err(TrellisError::Config(
            "plugin manifest: name must not be empty".to_string(),
        ));
    }
    if section.version.trim().is_empty() {
        return Err(TrellisError::Config(format!(
            "plugin manifest: version of plugin {} must not be empty",
            section.name
        )));
    }
    for bound in [&section.min_version, &section.max_version].into_iter().flatten() {
        parse_version(bound).map_err(|e| {
            TrellisError::Config(format!("Plugin {} version bound: {e}", section.name))
        })?;
    }

    let name = section.name.as_str();
    let mut descriptor = PluginDescriptor::new(name, section.version.as_str());
    if let Some(value) = section.default_settings {
        descriptor.default_settings = table_setting(name, "default_settings", value)?;
    }
    if let Some(value) = section.caching_config {
        descriptor.caching_config = table_setting(name, "caching_config", value)?;
    }
    if let Some(value) = section.required_settings {
        descriptor.required_settings = list_setting(name, "required_settings", value)?;
    }
    if let Some(value) = section.middleware {
        descriptor.middleware = list_setting(name, "middleware", value)?;
    }
    if let Some(value) = section.installed_apps {
        descriptor.installed_apps = list_setting(name, "installed_apps", value)?;
    }

    descriptor.verbose_name = section.verbose_name;
    descriptor.description = section.description;
    descriptor.author = section.author;
    descriptor.author_email = section.author_email;
    descriptor.base_url = section.base_url;
    descriptor.min_version = section.min_version;
    descriptor.max_version = section.max_version;
    descriptor.paths = section.paths;
    Ok(descriptor)
}

fn table_setting(
    plugin: &str,
    field: &str,
    value: toml::Value,
) -> Result<Map<String, Value>, TrellisError> {
    match value {
        toml::Value::Table(table) => match serde_json::to_value(table) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(shape_error(plugin, field, "a table")),
            Err(e) => Err(TrellisError::Config(format!(
                "Plugin {plugin} {field} cannot be represented: {e}"
            ))),
        },
        _ => Err(shape_error(plugin, field, "a table")),
    }
}

fn list_setting(plugin: &str, field: &str, value: toml::Value) -> Result<Vec<String>, TrellisError> {
    let toml::Value::Array(items) = value else {
        return Err(shape_error(plugin, field, "an array"));
    };
    items
        .into_iter()
        .map(|item| match item {
            toml::Value::String(s) => Ok(s),
            _ => Err(shape_error(plugin, field, "an array of strings")),
        })
        .collect()
}

fn shape_error(plugin: &str, field: &str, expected: &str) -> TrellisError {
    TrellisError::Config(format!("Plugin {plugin} {field} must be {expected}"))
}
