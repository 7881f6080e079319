// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trellis check` command implementation.
//!
//! Validates every enabled plugin against the loaded configuration and
//! reports one line per plugin, then runs the full load so contribution
//! failures surface too.

use std::io::IsTerminal;

use trellis_config::TrellisConfig;
use trellis_core::TrellisError;
use trellis_plugin::{PluginCatalog, PluginLoader};

/// Status of a single plugin check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// Result of checking one enabled plugin.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

/// Validate each enabled plugin's descriptor on its own.
///
/// Unlike the loader this does not stop at the first failure.
pub fn check_plugins(config: &TrellisConfig, catalog: &PluginCatalog) -> Vec<CheckResult> {
    config
        .plugins
        .enabled
        .iter()
        .map(|name| {
            let Some(plugin) = catalog.get(name) else {
                let err = TrellisError::PluginNotFound {
                    name: name.clone(),
                    suggestion: catalog.suggest(name),
                };
                return CheckResult {
                    name: name.clone(),
                    status: CheckStatus::Fail,
                    message: err.to_string(),
                };
            };

            let descriptor = plugin.descriptor();
            let mut settings = config.plugin_settings(name);
            let supplied = settings.len();
            match descriptor.validate(&mut settings, &config.host.version) {
                Ok(()) => CheckResult {
                    name: name.clone(),
                    status: CheckStatus::Pass,
                    message: format!(
                        "v{}, {} setting(s), {} default(s) applied",
                        descriptor.version,
                        settings.len(),
                        settings.len() - supplied
                    ),
                },
                Err(e) => CheckResult {
                    name: name.clone(),
                    status: CheckStatus::Fail,
                    message: e.to_string(),
                },
            }
        })
        .collect()
}

/// Run the `trellis check` command.
///
/// Returns an error if any plugin fails; the caller decides the exit code.
pub fn run_check(
    config: &TrellisConfig,
    catalog: PluginCatalog,
    plain: bool,
) -> Result<(), TrellisError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = check_plugins(config, &catalog);

    println!();
    println!("  trellis check ({} {})", config.host.name, config.host.version);
    println!("  {}", "-".repeat(50));

    if results.is_empty() {
        println!("    no plugins enabled");
    }
    for result in &results {
        println!("{}", format_result(result, use_color));
    }
    println!();

    let failed = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    if failed > 0 {
        let word = if failed == 1 { "plugin" } else { "plugins" };
        return Err(TrellisError::Config(format!("{failed} {word} failed validation")));
    }

    let loaded = PluginLoader::new(catalog).load(config)?;
    let summary = loaded.registry.summary();
    println!(
        "  All plugins valid. Registered {} template extension(s), {} GraphQL type(s), \
         {} menu item(s), {} validator(s).",
        summary.template_extensions,
        summary.graphql_types,
        summary.menu_items,
        summary.custom_validators
    );
    println!();
    Ok(())
}

fn format_result(result: &CheckResult, use_color: bool) -> String {
    match (&result.status, use_color) {
        (CheckStatus::Pass, true) => {
            use colored::Colorize;
            format!("    {} {:<20} {}", "✓".green(), result.name, result.message)
        }
        (CheckStatus::Fail, true) => {
            use colored::Colorize;
            format!(
                "    {} {:<20} {}",
                "✗".red(),
                result.name,
                result.message.red()
            )
        }
        (CheckStatus::Pass, false) => format!("    [OK]   {:<20} {}", result.name, result.message),
        (CheckStatus::Fail, false) => format!("    [FAIL] {:<20} {}", result.name, result.message),
    }
}
