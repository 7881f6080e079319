// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptors and their load-time validation.
//!
//! A descriptor carries a plugin's metadata, the host versions it supports,
//! and the settings it needs. The host validates it once against the user's
//! settings for the plugin before any contribution is registered.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use strum::{Display, EnumIter};
use tracing::debug;

use trellis_config::PluginSettings;
use trellis_core::{parse_version, TrellisError};

/// The four places a plugin can contribute to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ContributionPoint {
    TemplateExtensions,
    GraphqlTypes,
    MenuItems,
    CustomValidators,
}

/// Dotted paths naming a plugin's contribution points, relative to the plugin.
///
/// They label errors and log lines so a failing contribution can be traced
/// back to the part of the plugin that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationPaths {
    pub template_extensions: String,
    pub graphql_types: String,
    pub menu_items: String,
    pub custom_validators: String,
}

impl Default for IntegrationPaths {
    fn default() -> Self {
        Self {
            template_extensions: "template_content.template_extensions".to_string(),
            graphql_types: "graphql.types.graphql_types".to_string(),
            menu_items: "navigation.menu_items".to_string(),
            custom_validators: "custom_validators.custom_validators".to_string(),
        }
    }
}

impl IntegrationPaths {
    pub fn get(&self, point: ContributionPoint) -> &str {
        match point {
            ContributionPoint::TemplateExtensions => &self.template_extensions,
            ContributionPoint::GraphqlTypes => &self.graphql_types,
            ContributionPoint::MenuItems => &self.menu_items,
            ContributionPoint::CustomValidators => &self.custom_validators,
        }
    }
}

/// Metadata and configuration contract of a plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginDescriptor {
    /// Unique plugin name; also the key of its user settings.
    pub name: String,
    /// Label of the plugin's navigation menu section. Defaults to `name`.
    pub verbose_name: Option<String>,
    pub author: String,
    pub author_email: String,
    pub description: String,
    pub version: String,
    /// Root URL path under `/plugins`. Defaults to `name`.
    pub base_url: Option<String>,
    /// Minimum compatible host version.
    pub min_version: Option<String>,
    /// Maximum compatible host version.
    pub max_version: Option<String>,
    /// Settings injected when the user does not supply them.
    pub default_settings: PluginSettings,
    /// Settings the user must supply.
    pub required_settings: Vec<String>,
    pub middleware: Vec<String>,
    /// Extra apps registered alongside the plugin.
    pub installed_apps: Vec<String>,
    /// Cache configuration; caches every operation by default.
    pub caching_config: Map<String, Value>,
    pub paths: IntegrationPaths,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let mut caching_config = Map::new();
        caching_config.insert("*".to_string(), json!({ "ops": "all" }));
        Self {
            name: name.into(),
            verbose_name: None,
            author: String::new(),
            author_email: String::new(),
            description: String::new(),
            version: version.into(),
            base_url: None,
            min_version: None,
            max_version: None,
            default_settings: PluginSettings::new(),
            required_settings: Vec::new(),
            middleware: Vec::new(),
            installed_apps: Vec::new(),
            caching_config,
            paths: IntegrationPaths::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>, email: impl Into<String>) -> Self {
        self.author = author.into();
        self.author_email = email.into();
        self
    }

    pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = Some(verbose_name.into());
        self
    }

    pub fn with_version_bounds(mut self, min: Option<&str>, max: Option<&str>) -> Self {
        self.min_version = min.map(str::to_string);
        self.max_version = max.map(str::to_string);
        self
    }

    pub fn with_required_setting(mut self, name: impl Into<String>) -> Self {
        self.required_settings.push(name.into());
        self
    }

    pub fn with_default_setting(mut self, name: impl Into<String>, value: Value) -> Self {
        self.default_settings.insert(name.into(), value);
        self
    }

    pub fn with_middleware(mut self, middleware: impl Into<String>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    pub fn with_installed_app(mut self, app: impl Into<String>) -> Self {
        self.installed_apps.push(app.into());
        self
    }

    pub fn with_paths(mut self, paths: IntegrationPaths) -> Self {
        self.paths = paths;
        self
    }

    /// Menu section label.
    pub fn verbose_name(&self) -> &str {
        self.verbose_name.as_deref().unwrap_or(&self.name)
    }

    /// URL path segment under `/plugins`.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(&self.name)
    }

    /// Fully qualified path of a contribution point, e.g. `demo.navigation.menu_items`.
    pub fn integration_path(&self, point: ContributionPoint) -> String {
        format!("{}.{}", self.name, self.paths.get(point))
    }

    /// Validate the user's settings for this plugin against the host version.
    ///
    /// Fails if the host is outside `min_version..=max_version` or a required
    /// setting is missing. On success every default the user did not set is
    /// inserted into `user_config`; nothing else is touched.
    pub fn validate(
        &self,
        user_config: &mut PluginSettings,
        host_version: &str,
    ) -> Result<(), TrellisError> {
        let current = parse_version(host_version)?;

        if let Some(min) = &self.min_version
            && current < self.bound("min_version", min)?
        {
            return Err(TrellisError::Config(format!(
                "Plugin {} requires host minimum version {min}",
                self.name
            )));
        }
        if let Some(max) = &self.max_version
            && current > self.bound("max_version", max)?
        {
            return Err(TrellisError::Config(format!(
                "Plugin {} requires host maximum version {max}",
                self.name
            )));
        }

        // Field shapes are fixed by the struct; untyped manifests are
        // checked in `manifest::parse_plugin_manifest`.
        for setting in &self.required_settings {
            if !user_config.contains_key(setting) {
                return Err(TrellisError::Config(format!(
                    "Plugin {} requires '{setting}' to be present in the \
                     [plugins.config.{}] section of the configuration",
                    self.name, self.name
                )));
            }
        }

        let mut injected = 0;
        for (setting, value) in &self.default_settings {
            if !user_config.contains_key(setting) {
                user_config.insert(setting.clone(), value.clone());
                injected += 1;
            }
        }

        debug!(plugin = %self.name, injected, "plugin configuration validated");
        Ok(())
    }

    fn bound(&self, field: &str, value: &str) -> Result<semver::Version, TrellisError> {
        parse_version(value)
            .map_err(|e| TrellisError::Config(format!("Plugin {} {field}: {e}", self.name)))
    }
}
