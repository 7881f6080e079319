// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use crate::diagnostic::{suggest_key, ConfigError};
use crate::model::TrellisConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &TrellisConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Err(e) = trellis_core::parse_version(&config.host.version) {
        errors.push(ConfigError::Validation {
            message: format!("host.version: {e}"),
        });
    }

    if !LOG_LEVELS.contains(&config.host.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "host.log_level `{}` must be one of {}",
                config.host.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let mut seen = HashSet::new();
    for (i, name) in config.plugins.enabled.iter().enumerate() {
        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("plugins.enabled[{i}] must not be empty"),
            });
        } else if !seen.insert(name.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("plugin `{name}` is enabled more than once"),
            });
        }
    }

    let enabled: Vec<&str> = config.plugins.enabled.iter().map(String::as_str).collect();
    for name in config.plugins.config.keys() {
        if !enabled.contains(&name.as_str()) {
            errors.push(ConfigError::UnknownPlugin {
                name: name.clone(),
                suggestion: suggest_key(name, &enabled),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PluginSettings;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&TrellisConfig::default()).is_ok());
    }

    #[test]
    fn bad_host_version_fails() {
        let mut config = TrellisConfig::default();
        config.host.version = "not-a-version".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("host.version"))
        ));
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = TrellisConfig::default();
        config.host.log_level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        ));
    }

    #[test]
    fn duplicate_plugin_fails() {
        let mut config = TrellisConfig::default();
        config.plugins.enabled = vec!["demo".into(), "demo".into()];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("more than once"));
    }

    #[test]
    fn settings_for_disabled_plugin_suggest_enabled_name() {
        let mut config = TrellisConfig::default();
        config.plugins.enabled = vec!["demo".into()];
        config
            .plugins
            .config
            .insert("dmeo".into(), PluginSettings::new());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownPlugin { name, suggestion }
                if name == "dmeo" && suggestion.as_deref() == Some("demo")
        )));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = TrellisConfig::default();
        config.host.version = "x".into();
        config.host.log_level = "y".into();
        config.plugins.enabled = vec![" ".into()];
        assert_eq!(validate_config(&config).unwrap_err().len(), 3);
    }
}
