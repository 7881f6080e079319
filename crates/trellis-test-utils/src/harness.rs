// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end loading.
//!
//! `TestHarness` writes a `trellis.toml` into a temp directory, loads and
//! validates it the way the binary does, and runs the plugin loader over a
//! catalog assembled by the test.

use std::path::PathBuf;
use std::sync::Arc;

use trellis_config::{load_and_validate_path, TrellisConfig};
use trellis_core::TrellisError;
use trellis_plugin::{LoadedPlugins, Plugin, PluginCatalog, PluginLoader};

/// Builder for a harness around one config file and a set of plugins.
pub struct TestHarnessBuilder {
    config: String,
    plugins: Vec<Arc<dyn Plugin>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: String::new(),
            plugins: Vec::new(),
        }
    }

    /// Contents of the `trellis.toml` to load.
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = toml.to_string();
        self
    }

    pub fn with_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Write the config to disk and load it. Config diagnostics are joined
    /// into a single `Config` error.
    pub fn build(self) -> Result<TestHarness, TrellisError> {
        let temp_dir = tempfile::TempDir::new()
            .map_err(|e| TrellisError::Internal(format!("temp dir: {e}")))?;
        let config_path = temp_dir.path().join("trellis.toml");
        std::fs::write(&config_path, &self.config)
            .map_err(|e| TrellisError::Internal(format!("write config: {e}")))?;

        let config = load_and_validate_path(&config_path).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            TrellisError::Config(messages.join("; "))
        })?;

        let mut catalog = PluginCatalog::new();
        for plugin in self.plugins {
            catalog.register(plugin)?;
        }
        tracing::debug!(path = %config_path.display(), plugins = catalog.len(), "test harness ready");

        Ok(TestHarness {
            config,
            config_path,
            loader: PluginLoader::new(catalog),
            _temp_dir: temp_dir,
        })
    }
}

/// A loaded config plus a loader ready to run.
pub struct TestHarness {
    pub config: TrellisConfig,
    pub config_path: PathBuf,
    loader: PluginLoader,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Run the loader against the harness config.
    pub fn load(&self) -> Result<LoadedPlugins, TrellisError> {
        self.loader.load(&self.config)
    }
}
