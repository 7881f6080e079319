// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/trellis/trellis.toml`, then
//! `~/.config/trellis/trellis.toml`, then `./trellis.toml`, with `TRELLIS_*`
//! environment variables applied last.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TrellisConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/trellis/trellis.toml";
pub(crate) const LOCAL_CONFIG: &str = "trellis.toml";

/// Path of the per-user config file, if the platform has a config directory.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("trellis").join(LOCAL_CONFIG))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/trellis/trellis.toml`
/// 3. `~/.config/trellis/trellis.toml`
/// 4. `./trellis.toml`
/// 5. `TRELLIS_*` environment variables
pub fn load_config() -> Result<TrellisConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TrellisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TrellisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `TRELLIS_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses an explicit section map rather than `Env::split("_")` because keys
/// such as `log_level` contain underscores.
fn env_provider() -> Env {
    Env::prefixed("TRELLIS_").map(|key| {
        key.as_str()
            .replacen("host_", "host.", 1)
            .replacen("plugins_", "plugins.", 1)
            .into()
    })
}
