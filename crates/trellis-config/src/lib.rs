// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host configuration for the Trellis plugin facade.
//!
//! Names the enabled plugins, carries each plugin's user settings, and the
//! host version plugins are checked against. Errors are rendered as miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use trellis_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("enabled plugins: {:?}", config.plugins.enabled);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{HostConfig, PluginSettings, PluginsConfig, TrellisConfig};

/// Load configuration from the file hierarchy and validate it.
pub fn load_and_validate() -> Result<TrellisConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from one file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<TrellisConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TrellisConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

#[allow(clippy::result_large_err)]
fn finish(
    loaded: Result<TrellisConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<TrellisConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                host = %config.host.name,
                plugins = config.plugins.enabled.len(),
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read the hierarchy's TOML files so diagnostics can point into them.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut paths = vec![std::path::PathBuf::from(loader::SYSTEM_CONFIG)];
    paths.extend(loader::user_config_path());
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(loader::LOCAL_CONFIG));
    }

    paths
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
