// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Trellis configuration system.

use std::io::Write;

use trellis_config::diagnostic::ConfigError;
use trellis_config::model::TrellisConfig;
use trellis_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_config_deserializes() {
    let toml = r#"
[host]
name = "inventory"
version = "3.2.0"
log_level = "debug"

[plugins]
enabled = ["demo", "audit"]

[plugins.config.demo]
api_key = "x"
retries = 3

[plugins.config.audit]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.host.name, "inventory");
    assert_eq!(config.host.version, "3.2.0");
    assert_eq!(config.host.log_level, "debug");
    assert_eq!(config.plugins.enabled, vec!["demo", "audit"]);

    let demo = config.plugin_settings("demo");
    assert_eq!(demo["api_key"], "x");
    assert_eq!(demo["retries"], 3);
    assert!(config.plugin_settings("audit").is_empty());
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.host.name, "trellis");
    assert_eq!(config.host.log_level, "info");
    assert!(config.plugins.enabled.is_empty());
    assert!(config.plugins.config.is_empty());
}

#[test]
fn missing_plugin_table_yields_empty_settings() {
    let config = TrellisConfig::default();
    assert!(config.plugin_settings("anything").is_empty());
}

#[test]
fn unknown_host_key_suggests_correction() {
    let toml = r#"
[host]
verison = "3.0"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, valid_keys, .. }
            if key == "verison"
                && suggestion.as_deref() == Some("version")
                && valid_keys.contains("log_level")
    )));
}

#[test]
fn unknown_top_level_section_rejected() {
    let toml = r#"
[logging]
level = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("unknown section should be rejected");
    let msg = err.to_string();
    assert!(msg.contains("unknown field") || msg.contains("logging"), "got: {msg}");
}

#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[plugins]
enabled = "demo"
"#;

    let errors = load_and_validate_str(toml).expect_err("string is not a list");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("enabled"))));
}

#[test]
fn settings_for_disabled_plugin_fail_validation() {
    let toml = r#"
[plugins]
enabled = ["demo"]

[plugins.config.dmeo]
api_key = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("dmeo is not enabled");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownPlugin { suggestion, .. } if suggestion.as_deref() == Some("demo")
    )));
}

#[test]
fn env_overrides_host_version() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "trellis.toml",
            r#"
[host]
version = "3.0.0"
"#,
        )?;
        jail.set_env("TRELLIS_HOST_VERSION", "3.4.1");
        jail.set_env("TRELLIS_HOST_LOG_LEVEL", "warn");

        let config = trellis_config::load_config().expect("should load");
        assert_eq!(config.host.version, "3.4.1");
        assert_eq!(config.host.log_level, "warn");
        Ok(())
    });
}

#[test]
fn load_from_path_validates() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[host]
log_level = "shouting"
"#
    )
    .unwrap();

    let errors = load_and_validate_path(file.path()).expect_err("bad log level");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
    ));
}

#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::UnknownKey {
        key: "verison".to_string(),
        suggestion: Some("version".to_string()),
        valid_keys: "name, version, log_level".to_string(),
        span: None,
        src: None,
    };

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("verison"));
}
