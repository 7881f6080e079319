// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trellis - plugin registration host.
//!
//! This is the binary entry point. It loads `trellis.toml`, then validates
//! and inspects the compiled-in plugins against it.

mod builtin;
mod check;
mod inspect;
mod plugins;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use trellis_config::TrellisConfig;

/// Trellis - plugin registration host.
#[derive(Parser, Debug)]
#[command(name = "trellis", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the default hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every enabled plugin against the configuration.
    Check,
    /// Inspect the compiled-in plugins.
    Plugins {
        #[command(subcommand)]
        action: PluginsAction,
    },
    /// Load the enabled plugins and print what they registered.
    Registry {
        /// Show the menu as seen by a user holding these permissions.
        #[arg(long = "grant", value_name = "PERM")]
        grants: Option<Vec<String>>,
    },
}

#[derive(Subcommand, Debug)]
enum PluginsAction {
    /// List all compiled-in plugins.
    List {
        /// Print descriptors as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Search compiled-in plugins by name or description.
    Search {
        query: String,
        /// Print descriptors as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => trellis_config::load_and_validate_path(path),
        None => trellis_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            trellis_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.host.log_level);

    if let Err(e) = run(cli, &config) {
        eprintln!("trellis: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &TrellisConfig) -> Result<(), trellis_core::TrellisError> {
    let catalog = builtin::builtin_catalog()?;
    if let Some(command) = &cli.command {
        tracing::info!(
            host = %config.host.name,
            version = %config.host.version,
            plugins = catalog.len(),
            command = ?command,
            "dispatching command"
        );
    }
    match cli.command {
        Some(Commands::Check) => check::run_check(config, catalog, cli.plain),
        Some(Commands::Plugins { action }) => match action {
            PluginsAction::List { json } => {
                plugins::run_plugins(config, &catalog, None, json, cli.plain)
            }
            PluginsAction::Search { query, json } => {
                plugins::run_plugins(config, &catalog, Some(&query), json, cli.plain)
            }
        },
        Some(Commands::Registry { grants }) => {
            inspect::run_registry(config, catalog, grants.as_deref())
        }
        None => {
            println!("trellis: use --help for available commands");
            Ok(())
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "trellis={log_level},trellis_plugin={log_level},trellis_config={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["trellis", "check", "--config", "/tmp/t.toml", "--plain"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/t.toml")));
        assert!(cli.plain);
    }

    #[test]
    fn parses_plugin_search() {
        let cli = Cli::try_parse_from(["trellis", "plugins", "search", "demo", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Plugins {
                action: PluginsAction::Search { query, json },
            }) => {
                assert_eq!(query, "demo");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_repeated_grants() {
        let cli = Cli::try_parse_from([
            "trellis",
            "registry",
            "--grant",
            "demo.view_sitenote",
            "--grant",
            "demo.add_sitenote",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Registry { grants }) => assert_eq!(
                grants.as_deref(),
                Some(&["demo.view_sitenote".to_string(), "demo.add_sitenote".to_string()][..])
            ),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["trellis", "registry"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Registry { grants: None })));
    }

    #[test]
    fn builtin_catalog_is_consistent() {
        let catalog = builtin::builtin_catalog().unwrap();
        assert!(catalog.get("demo").is_some());
    }

    #[test]
    #[traced_test]
    fn default_config_loads_nothing() {
        let config = trellis_config::load_config_from_str("").unwrap();
        let catalog = builtin::builtin_catalog().unwrap();
        assert!(run(
            Cli::try_parse_from(["trellis", "registry"]).unwrap(),
            &config
        )
        .is_ok());
        assert!(check::check_plugins(&config, &catalog).is_empty());
        assert!(logs_contain("dispatching command"));
    }
}
