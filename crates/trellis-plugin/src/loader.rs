// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host startup sequence.
//!
//! Resolves the enabled plugins against the catalog, validates every
//! descriptor before any contribution is registered, collects the settings
//! the host needs from each plugin, runs every `ready` hook, and freezes
//! the registry.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use trellis_config::{PluginSettings, TrellisConfig};
use trellis_core::{Markup, Slot, TemplateContext, TrellisError};

use crate::catalog::PluginCatalog;
use crate::descriptor::PluginDescriptor;
use crate::lifecycle::{self, Plugin};
use crate::registry::Registry;

/// A plugin that passed validation, with its user settings after defaults
/// were merged in.
#[derive(Debug, Clone)]
pub struct LoadedPlugin {
    pub descriptor: PluginDescriptor,
    pub settings: PluginSettings,
}

/// Everything the host needs after plugins are loaded.
#[derive(Debug)]
pub struct LoadedPlugins {
    pub registry: Arc<Registry>,
    /// Loaded plugins in load order.
    pub plugins: Vec<LoadedPlugin>,
    /// Plugin names followed by their extra apps, without duplicates.
    pub installed_apps: Vec<String>,
    pub middleware: Vec<String>,
    /// Cache configuration keyed by `<plugin>.<key>`.
    pub caching: Map<String, Value>,
}

impl LoadedPlugins {
    pub fn get(&self, name: &str) -> Option<&LoadedPlugin> {
        self.plugins.iter().find(|p| p.descriptor.name == name)
    }

    /// Merged user settings of `plugin`.
    pub fn settings(&self, plugin: &str) -> Option<&PluginSettings> {
        self.get(plugin).map(|p| &p.settings)
    }

    /// Render `slot` for `model`, giving each extension its own plugin's
    /// settings as `config`.
    pub fn render_slot(
        &self,
        model: &str,
        slot: Slot,
        ctx: &TemplateContext,
    ) -> Result<Markup, TrellisError> {
        let mut html = Markup::default();
        for entry in self.registry.template_extensions(model) {
            let config = entry
                .plugin()
                .and_then(|name| self.settings(name))
                .map(|settings| Value::Object(settings.clone()))
                .unwrap_or_else(|| ctx.config.clone());
            let scoped = ctx.clone().with_config(config);
            html.push(&entry.extension().render_slot(slot, &scoped)?);
        }
        Ok(html)
    }
}

/// Loads the enabled plugins from a catalog.
pub struct PluginLoader {
    catalog: PluginCatalog,
}

impl PluginLoader {
    pub fn new(catalog: PluginCatalog) -> Self {
        Self { catalog }
    }

    /// Load every plugin enabled in `config`, in the configured order.
    pub fn load(&self, config: &TrellisConfig) -> Result<LoadedPlugins, TrellisError> {
        let host_version = config.host.version.as_str();

        let mut resolved: Vec<(&Arc<dyn Plugin>, PluginSettings)> = Vec::new();
        for name in &config.plugins.enabled {
            let plugin = self
                .catalog
                .get(name)
                .ok_or_else(|| TrellisError::PluginNotFound {
                    name: name.clone(),
                    suggestion: self.catalog.suggest(name),
                })?;
            let mut settings = config.plugin_settings(name);
            plugin.descriptor().validate(&mut settings, host_version)?;
            resolved.push((plugin, settings));
        }

        let mut installed_apps: Vec<String> = Vec::new();
        let mut middleware = Vec::new();
        let mut caching = Map::new();
        for (plugin, _) in &resolved {
            let descriptor = plugin.descriptor();
            let apps = std::iter::once(&descriptor.name).chain(&descriptor.installed_apps);
            for app in apps {
                if !installed_apps.contains(app) {
                    installed_apps.push(app.clone());
                }
            }
            middleware.extend(descriptor.middleware.iter().cloned());
            for (key, value) in &descriptor.caching_config {
                caching.insert(format!("{}.{key}", descriptor.name), value.clone());
            }
        }

        let mut registry = Registry::new();
        let mut plugins = Vec::with_capacity(resolved.len());
        for (plugin, settings) in resolved {
            lifecycle::ready(plugin.as_ref(), &mut registry)?;
            let descriptor = plugin.descriptor();
            info!(
                plugin = %descriptor.name,
                version = %descriptor.version,
                base_url = %descriptor.base_url(),
                "plugin loaded"
            );
            plugins.push(LoadedPlugin {
                descriptor: descriptor.clone(),
                settings,
            });
        }

        Ok(LoadedPlugins {
            registry: registry.freeze(),
            plugins,
            installed_apps,
            middleware,
            caching,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trellis_config::load_config_from_str;
    use tracing_test::traced_test;

    struct Bare(PluginDescriptor);

    impl Plugin for Bare {
        fn descriptor(&self) -> &PluginDescriptor {
            &self.0
        }
    }

    fn loader() -> PluginLoader {
        let mut catalog = PluginCatalog::new();
        catalog
            .register(Arc::new(Bare(
                PluginDescriptor::new("alpha", "1.0.0")
                    .with_installed_app("shared_tags")
                    .with_middleware("alpha.middleware.Timing"),
            )))
            .unwrap();
        catalog
            .register(Arc::new(Bare(
                PluginDescriptor::new("beta", "1.0.0")
                    .with_installed_app("shared_tags")
                    .with_required_setting("token")
                    .with_default_setting("timeout", json!(30)),
            )))
            .unwrap();
        PluginLoader::new(catalog)
    }

    #[test]
    fn collects_apps_middleware_and_caching() {
        let config = load_config_from_str(
            r#"
[plugins]
enabled = ["beta", "alpha"]

[plugins.config.beta]
token = "t"
"#,
        )
        .unwrap();
        let loaded = loader().load(&config).unwrap();

        assert_eq!(
            loaded.installed_apps,
            vec!["beta", "shared_tags", "alpha"]
        );
        assert_eq!(loaded.middleware, vec!["alpha.middleware.Timing"]);
        assert_eq!(loaded.caching["alpha.*"], json!({"ops": "all"}));
        assert_eq!(loaded.caching["beta.*"], json!({"ops": "all"}));
        assert_eq!(loaded.settings("beta").unwrap()["timeout"], 30);
        let order: Vec<&str> = loaded
            .plugins
            .iter()
            .map(|p| p.descriptor.name.as_str())
            .collect();
        assert_eq!(order, vec!["beta", "alpha"]);
    }

    #[test]
    fn unknown_plugin_gets_suggestion() {
        let config = load_config_from_str("[plugins]\nenabled = [\"alpah\"]\n").unwrap();
        let err = loader().load(&config).unwrap_err();
        assert!(err.is_config());
        assert!(matches!(
            err,
            TrellisError::PluginNotFound { ref suggestion, .. } if suggestion.as_deref() == Some("alpha")
        ));
    }

    #[test]
    fn validation_failure_aborts_load() {
        let config = load_config_from_str("[plugins]\nenabled = [\"alpha\", \"beta\"]\n").unwrap();
        let err = loader().load(&config).unwrap_err();
        assert!(err.to_string().contains("'token'"));
    }

    #[test]
    fn nothing_enabled_yields_empty_registry() {
        let loaded = loader().load(&TrellisConfig::default()).unwrap();
        assert!(loaded.plugins.is_empty());
        assert!(loaded.registry.is_empty());
        assert!(loaded.installed_apps.is_empty());
    }

    #[test]
    #[traced_test]
    fn each_loaded_plugin_is_logged() {
        let config = load_config_from_str("[plugins]\nenabled = [\"alpha\"]\n").unwrap();
        loader().load(&config).unwrap();
        assert!(logs_contain("plugin loaded"));
        assert!(logs_contain("plugin=alpha"));
    }
}
