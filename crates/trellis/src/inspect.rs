// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trellis registry` command implementation.
//!
//! Loads the enabled plugins and prints what they registered.

use std::fmt::{self, Write as _};

use trellis_config::TrellisConfig;
use trellis_core::TrellisError;
use trellis_plugin::{LoadedPlugins, PluginCatalog, PluginLoader};

/// Run the `trellis registry` command.
///
/// With `granted`, the menu is shown as a user holding exactly those
/// permissions would see it.
pub fn run_registry(
    config: &TrellisConfig,
    catalog: PluginCatalog,
    granted: Option<&[String]>,
) -> Result<(), TrellisError> {
    let loaded = PluginLoader::new(catalog).load(config)?;
    let mut out = String::new();
    describe(&mut out, &loaded, granted)
        .map_err(|e| TrellisError::Internal(format!("failed to format registry: {e}")))?;
    print!("{out}");
    Ok(())
}

/// Write a human-readable listing of a loaded registry into `out`.
pub fn describe(
    out: &mut impl fmt::Write,
    loaded: &LoadedPlugins,
    granted: Option<&[String]>,
) -> fmt::Result {
    let registry = &loaded.registry;

    writeln!(out, "Template extensions:")?;
    for model in registry.extended_models() {
        for entry in registry.template_extensions(model.as_str()) {
            writeln!(
                out,
                "  {:<20} {} ({})",
                model.as_str(),
                entry.extension().name(),
                entry.plugin().unwrap_or("-")
            )?;
        }
    }

    writeln!(out, "GraphQL types:")?;
    for item in registry.graphql_types() {
        writeln!(
            out,
            "  {:<20} {}",
            item.graphql_name(),
            item.model().unwrap_or("-")
        )?;
    }

    writeln!(out, "Menu:")?;
    for (section, items) in registry.menu_items() {
        writeln!(out, "  [{section}]")?;
        let visible = items
            .iter()
            .filter(|item| granted.is_none_or(|g| item.visible_to(g)));
        for item in visible {
            writeln!(out, "    {} -> {}", item.link_text, item.link)?;
            let buttons = item
                .buttons
                .iter()
                .filter(|button| granted.is_none_or(|g| button.visible_to(g)));
            for button in buttons {
                writeln!(
                    out,
                    "      + {} -> {} ({})",
                    button.title,
                    button.link,
                    button.color.css_class()
                )?;
            }
        }
    }

    writeln!(out, "Middleware:")?;
    for middleware in &loaded.middleware {
        writeln!(out, "  {middleware}")?;
    }
    writeln!(out, "Installed apps: {}", loaded.installed_apps.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::builtin_catalog;
    use trellis_config::load_config_from_str;

    fn demo_loaded() -> LoadedPlugins {
        let config = load_config_from_str(
            "[plugins]\nenabled = [\"demo\"]\n\n[plugins.config.demo]\napi_key = \"k\"\n",
        )
        .unwrap();
        PluginLoader::new(builtin_catalog().unwrap())
            .load(&config)
            .unwrap()
    }

    #[test]
    fn describe_lists_demo_contributions() {
        let mut text = String::new();
        describe(&mut text, &demo_loaded(), None).unwrap();

        assert!(text.contains("dcim.site"));
        assert!(text.contains("demo.SitePanel (demo)"));
        assert!(text.contains("DemoSiteType"));
        assert!(text.contains("[Demo]"));
        assert!(text.contains("+ Add -> plugins:demo:sitenote_add (green)"));
        assert!(text.contains("Installed apps: demo"));
    }

    #[test]
    fn granted_permissions_filter_menu() {
        let loaded = demo_loaded();

        let mut none = String::new();
        describe(&mut none, &loaded, Some(&[])).unwrap();
        assert!(none.contains("[Demo]"));
        assert!(!none.contains("Site notes"));

        let view_only = vec!["demo.view_sitenote".to_string()];
        let mut text = String::new();
        describe(&mut text, &loaded, Some(&view_only)).unwrap();
        assert!(text.contains("Site notes -> plugins:demo:sitenote_list"));
        assert!(!text.contains("+ Add"));
    }

    #[test]
    fn write_errors_propagate() {
        struct Full;
        impl fmt::Write for Full {
            fn write_str(&mut self, _: &str) -> fmt::Result {
                Err(fmt::Error)
            }
        }
        assert!(describe(&mut Full, &demo_loaded(), None).is_err());
    }
}
