// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugins compiled into the `trellis` binary.
//!
//! `demo` exercises every contribution point and is the reference for
//! writing new plugins.

use std::sync::Arc;

use minijinja::Environment;
use serde_json::{json, Value};

use trellis_core::{
    ButtonColor, CustomValidator, GraphqlType, Markup, TemplateContext, TemplateExtension,
    TrellisError, ValidationError,
};
use trellis_plugin::{
    render_template, MenuButton, MenuItem, Plugin, PluginCatalog, PluginDescriptor,
};

/// Catalog of every built-in plugin.
pub fn builtin_catalog() -> Result<PluginCatalog, TrellisError> {
    let mut catalog = PluginCatalog::new();
    catalog.register(Arc::new(DemoPlugin::new()))?;
    Ok(catalog)
}

const SITE_PANEL: &str = r#"<div class="card">
  <h5 class="card-header">{{ config.greeting }}</h5>
  <div class="card-body">Site {{ object.name }}{% if note %} ({{ note }}){% endif %}</div>
</div>"#;

pub struct DemoPlugin {
    descriptor: PluginDescriptor,
}

impl DemoPlugin {
    pub fn new() -> Self {
        let descriptor = PluginDescriptor::new("demo", env!("CARGO_PKG_VERSION"))
            .with_verbose_name("Demo")
            .with_description("Example plugin contributing to every integration point")
            .with_author("Trellis Contributors", "dev@trellis.invalid")
            .with_version_bounds(Some("0.1"), None)
            .with_required_setting("api_key")
            .with_default_setting("greeting", json!("Hello from demo"));
        Self { descriptor }
    }
}

impl Default for DemoPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DemoPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn template_extensions(&self) -> Result<Option<Vec<Arc<dyn TemplateExtension>>>, TrellisError> {
        Ok(Some(vec![Arc::new(SitePanel::new()?)]))
    }

    fn graphql_types(&self) -> Result<Option<Vec<Arc<dyn GraphqlType>>>, TrellisError> {
        Ok(Some(vec![Arc::new(DemoSiteType)]))
    }

    fn menu_items(&self) -> Result<Option<Vec<MenuItem>>, TrellisError> {
        let add = MenuButton::new("plugins:demo:sitenote_add", "Add", "mdi mdi-plus-thick")
            .with_color(ButtonColor::Green)
            .with_permissions(["demo.add_sitenote"]);
        Ok(Some(vec![
            MenuItem::new("plugins:demo:sitenote_list", "Site notes")
                .with_permissions(["demo.view_sitenote"])
                .with_button(add),
        ]))
    }

    fn custom_validators(&self) -> Result<Option<Vec<Arc<dyn CustomValidator>>>, TrellisError> {
        Ok(Some(vec![Arc::new(SlugValidator)]))
    }
}

/// Right-column panel on the site detail page.
struct SitePanel {
    env: Environment<'static>,
}

impl SitePanel {
    fn new() -> Result<Self, TrellisError> {
        let mut env = Environment::new();
        env.add_template("demo/site_panel.html", SITE_PANEL)
            .map_err(|e| TrellisError::Template(format!("demo/site_panel.html: {e}")))?;
        Ok(Self { env })
    }
}

impl TemplateExtension for SitePanel {
    fn name(&self) -> &str {
        "demo.SitePanel"
    }

    fn model(&self) -> Option<&str> {
        Some("dcim.site")
    }

    fn right_page(&self, ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        let extra = match ctx.object.get("description") {
            Some(Value::String(note)) if !note.is_empty() => Some(json!({ "note": note })),
            _ => None,
        };
        render_template(&self.env, "demo/site_panel.html", ctx, extra.as_ref())
    }
}

struct DemoSiteType;

impl GraphqlType for DemoSiteType {
    fn name(&self) -> &str {
        "demo.DemoSiteType"
    }

    fn graphql_name(&self) -> &str {
        "DemoSiteType"
    }

    fn model(&self) -> Option<&str> {
        Some("dcim.site")
    }

    fn fields(&self) -> Vec<String> {
        ["id", "name", "slug"].map(String::from).to_vec()
    }
}

/// Sites must have a lowercase, hyphen-separated slug.
struct SlugValidator;

impl CustomValidator for SlugValidator {
    fn name(&self) -> &str {
        "demo.SlugValidator"
    }

    fn model(&self) -> Option<&str> {
        Some("dcim.site")
    }

    fn validate(&self, object: &Value) -> Result<(), ValidationError> {
        let slug = object.get("slug").and_then(Value::as_str).unwrap_or_default();
        let valid = !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if valid {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "slug `{slug}` must be lowercase letters, digits and hyphens"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_config::load_config_from_str;
    use trellis_core::Slot;
    use trellis_plugin::PluginLoader;

    const CONFIG: &str = r#"
[plugins]
enabled = ["demo"]

[plugins.config.demo]
api_key = "secret"
"#;

    #[test]
    fn demo_loads_with_api_key() {
        let config = load_config_from_str(CONFIG).unwrap();
        let loaded = PluginLoader::new(builtin_catalog().unwrap())
            .load(&config)
            .unwrap();

        let summary = loaded.registry.summary();
        assert_eq!(summary.template_extensions, 1);
        assert_eq!(summary.graphql_types, 1);
        assert_eq!(summary.menu_items, 1);
        assert_eq!(summary.custom_validators, 1);
        assert_eq!(loaded.registry.menu_section("Demo").unwrap()[0].link_text, "Site notes");
    }

    #[test]
    fn demo_panel_renders_with_plugin_settings() {
        let config = load_config_from_str(CONFIG).unwrap();
        let loaded = PluginLoader::new(builtin_catalog().unwrap())
            .load(&config)
            .unwrap();

        let ctx = TemplateContext::new(json!({"name": "hq", "description": "primary"}));
        let html = loaded.render_slot("dcim.site", Slot::RightPage, &ctx).unwrap();
        assert!(html.as_str().contains("Hello from demo"));
        assert!(html.as_str().contains("Site hq (primary)"));
    }

    #[test]
    fn slug_validator_rejects_uppercase() {
        assert!(SlugValidator.validate(&json!({"slug": "hq-1"})).is_ok());
        let err = SlugValidator.validate(&json!({"slug": "HQ"})).unwrap_err();
        assert!(err.message.contains("`HQ`"));
        assert!(SlugValidator.validate(&json!({})).is_err());
    }
}
