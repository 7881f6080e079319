// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trellis plugins` command implementation.

use std::io::IsTerminal;

use trellis_config::TrellisConfig;
use trellis_core::TrellisError;
use trellis_plugin::{PluginCatalog, PluginDescriptor};

/// Print built-in plugins matching `query` (all of them when `None`).
///
/// With `json`, prints the matching descriptors as a JSON array.
pub fn run_plugins(
    config: &TrellisConfig,
    catalog: &PluginCatalog,
    query: Option<&str>,
    json: bool,
    plain: bool,
) -> Result<(), TrellisError> {
    let matches = catalog.search(query.unwrap_or_default());

    if json {
        let out = serde_json::to_string_pretty(&matches)
            .map_err(|e| TrellisError::Internal(format!("failed to serialize plugins: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    if matches.is_empty() {
        match query {
            Some(q) => println!("  no plugins match \"{q}\""),
            None => println!("  no plugins compiled in"),
        }
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    for descriptor in matches {
        let enabled = config.plugins.enabled.contains(&descriptor.name);
        println!("{}", format_entry(descriptor, enabled, use_color));
    }
    Ok(())
}

fn format_entry(descriptor: &PluginDescriptor, enabled: bool, use_color: bool) -> String {
    let marker = if enabled { "enabled" } else { "available" };
    let name = format!("{:<16}", descriptor.name);
    let version = format!("{:<10}", descriptor.version);
    if use_color {
        use colored::Colorize;
        let marker = if enabled { marker.green() } else { marker.dimmed() };
        format!(
            "  {} {} {:<10} {}",
            name.bold(),
            version,
            marker,
            descriptor.description
        )
    } else {
        format!("  {name} {version} {marker:<10} {}", descriptor.description)
    }
}
