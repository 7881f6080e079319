// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of plugin contributions.
//!
//! The `Registry` is written during startup through the four registration
//! functions, then frozen into an `Arc<Registry>` and read by the host's
//! page renderer, schema builder, navigation builder and save pipeline.
//!
//! Every registration validates its whole input before touching a store,
//! so a rejected call leaves the registry exactly as it was.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use trellis_core::{
    CustomValidator, GraphqlType, Markup, ModelId, Slot, TemplateContext, TemplateExtension,
    TrellisError, ValidationError,
};

use crate::menu::MenuItem;

/// A registered template extension and the plugin it came from.
#[derive(Clone)]
pub struct TemplateEntry {
    plugin: Option<String>,
    extension: Arc<dyn TemplateExtension>,
}

impl TemplateEntry {
    /// Name of the contributing plugin, when registered through a lifecycle hook.
    pub fn plugin(&self) -> Option<&str> {
        self.plugin.as_deref()
    }

    pub fn extension(&self) -> &Arc<dyn TemplateExtension> {
        &self.extension
    }
}

/// Counts of registered contributions, per store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrySummary {
    pub template_extensions: usize,
    pub graphql_types: usize,
    pub menu_sections: usize,
    pub menu_items: usize,
    pub custom_validators: usize,
}

/// The four contribution stores.
#[derive(Default)]
pub struct Registry {
    template_extensions: HashMap<ModelId, Vec<TemplateEntry>>,
    graphql_types: Vec<Arc<dyn GraphqlType>>,
    menu_items: Vec<(String, Vec<MenuItem>)>,
    custom_validators: HashMap<ModelId, Vec<Arc<dyn CustomValidator>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// End the write phase. The returned registry is shared read-only.
    pub fn freeze(self) -> Arc<Registry> {
        let summary = self.summary();
        debug!(?summary, "registry frozen");
        Arc::new(self)
    }

    /// Register template extensions, appending per model in the given order.
    ///
    /// Fails if any extension does not declare a valid model identifier.
    pub fn register_template_extensions(
        &mut self,
        extensions: Vec<Arc<dyn TemplateExtension>>,
    ) -> Result<(), TrellisError> {
        self.register_template_extensions_from(None, extensions)
    }

    pub(crate) fn register_template_extensions_from(
        &mut self,
        plugin: Option<&str>,
        extensions: Vec<Arc<dyn TemplateExtension>>,
    ) -> Result<(), TrellisError> {
        let checked = extensions
            .into_iter()
            .map(|ext| {
                let model = require_model("template extension", ext.name(), ext.model())?;
                Ok((model, ext))
            })
            .collect::<Result<Vec<_>, TrellisError>>()?;

        for (model, extension) in checked {
            debug!(extension = extension.name(), %model, "registered template extension");
            self.template_extensions
                .entry(model)
                .or_default()
                .push(TemplateEntry {
                    plugin: plugin.map(str::to_string),
                    extension,
                });
        }
        Ok(())
    }

    /// Register GraphQL types, appending to the flat list.
    ///
    /// Fails if any type lacks a schema name or a valid model.
    pub fn register_graphql_types(
        &mut self,
        types: Vec<Arc<dyn GraphqlType>>,
    ) -> Result<(), TrellisError> {
        for item in &types {
            if item.graphql_name().trim().is_empty() {
                return Err(TrellisError::Contract(format!(
                    "GraphQL type {} does not define a schema name",
                    item.name()
                )));
            }
            require_model("GraphQL type", item.name(), item.model())?;
        }

        debug!(count = types.len(), "registered GraphQL types");
        self.graphql_types.extend(types);
        Ok(())
    }

    /// Store `items` as the menu of `section`, replacing any earlier list.
    ///
    /// Items need a non-blank `link` and `link_text`, buttons a non-blank
    /// `link` and `title`; whitespace-only values count as blank and fail
    /// with a contract error.
    pub fn register_menu_items(
        &mut self,
        section: &str,
        items: Vec<MenuItem>,
    ) -> Result<(), TrellisError> {
        items.iter().try_for_each(MenuItem::check)?;

        debug!(section, count = items.len(), "registered menu items");
        match self.menu_items.iter_mut().find(|(name, _)| name == section) {
            Some((_, existing)) => *existing = items,
            None => self.menu_items.push((section.to_string(), items)),
        }
        Ok(())
    }

    /// Register custom validators, appending per model in the given order.
    pub fn register_custom_validators(
        &mut self,
        validators: Vec<Arc<dyn CustomValidator>>,
    ) -> Result<(), TrellisError> {
        let checked = validators
            .into_iter()
            .map(|v| Ok((require_model("custom validator", v.name(), v.model())?, v)))
            .collect::<Result<Vec<_>, TrellisError>>()?;

        for (model, validator) in checked {
            debug!(validator = validator.name(), %model, "registered custom validator");
            self.custom_validators.entry(model).or_default().push(validator);
        }
        Ok(())
    }

    /// Template extensions for `model`, in registration order.
    pub fn template_extensions(&self, model: &str) -> &[TemplateEntry] {
        lookup(&self.template_extensions, model)
    }

    /// Models that have at least one template extension.
    pub fn extended_models(&self) -> Vec<&ModelId> {
        sorted_models(&self.template_extensions)
    }

    /// Concatenate one slot of every extension registered for `model`.
    pub fn render_slot(
        &self,
        model: &str,
        slot: Slot,
        ctx: &TemplateContext,
    ) -> Result<Markup, TrellisError> {
        let mut html = Markup::default();
        for entry in self.template_extensions(model) {
            html.push(&entry.extension.render_slot(slot, ctx)?);
        }
        Ok(html)
    }

    pub fn graphql_types(&self) -> &[Arc<dyn GraphqlType>] {
        &self.graphql_types
    }

    /// Menu sections in the order they were first registered.
    pub fn menu_items(&self) -> impl Iterator<Item = (&str, &[MenuItem])> {
        self.menu_items
            .iter()
            .map(|(section, items)| (section.as_str(), items.as_slice()))
    }

    pub fn menu_section(&self, section: &str) -> Option<&[MenuItem]> {
        self.menu_items
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, items)| items.as_slice())
    }

    /// Custom validators for `model`, in registration order.
    pub fn custom_validators(&self, model: &str) -> &[Arc<dyn CustomValidator>] {
        lookup(&self.custom_validators, model)
    }

    /// Run every validator registered for `model` against `object`.
    ///
    /// All validators run; failures are returned in registration order.
    pub fn run_custom_validators(
        &self,
        model: &str,
        object: &Value,
    ) -> Result<(), Vec<ValidationError>> {
        let failures: Vec<ValidationError> = self
            .custom_validators(model)
            .iter()
            .filter_map(|v| v.validate(object).err())
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }

    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            template_extensions: self.template_extensions.values().map(Vec::len).sum(),
            graphql_types: self.graphql_types.len(),
            menu_sections: self.menu_items.len(),
            menu_items: self.menu_items.iter().map(|(_, items)| items.len()).sum(),
            custom_validators: self.custom_validators.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary() == RegistrySummary::default()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("template_extensions", &sorted_models(&self.template_extensions))
            .field(
                "graphql_types",
                &self
                    .graphql_types
                    .iter()
                    .map(|t| t.graphql_name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "menu_sections",
                &self.menu_items.iter().map(|(s, _)| s).collect::<Vec<_>>(),
            )
            .field("custom_validators", &sorted_models(&self.custom_validators))
            .finish()
    }
}

fn sorted_models<T>(map: &HashMap<ModelId, Vec<T>>) -> Vec<&ModelId> {
    let mut models: Vec<&ModelId> = map.keys().collect();
    models.sort();
    models
}

fn lookup<'a, T>(map: &'a HashMap<ModelId, Vec<T>>, model: &str) -> &'a [T] {
    model
        .parse::<ModelId>()
        .ok()
        .and_then(|id| map.get(&id))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn require_model(kind: &str, name: &str, model: Option<&str>) -> Result<ModelId, TrellisError> {
    let model = model.ok_or_else(|| {
        TrellisError::Contract(format!("{kind} {name} does not define a valid model"))
    })?;
    model.parse().map_err(|_| {
        TrellisError::Contract(format!(
            "{kind} {name} declares model `{model}`, expected `<app_label>.<model_name>`"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuButton;
    use serde_json::json;

    struct Panel {
        model: Option<&'static str>,
        html: &'static str,
    }

    impl TemplateExtension for Panel {
        fn model(&self) -> Option<&str> {
            self.model
        }

        fn right_page(&self, ctx: &TemplateContext) -> Result<Markup, TrellisError> {
            Ok(Markup::from_trusted(format!(
                "{}#{}",
                self.html, ctx.object["id"]
            )))
        }
    }

    struct SiteType;

    impl GraphqlType for SiteType {
        fn graphql_name(&self) -> &str {
            "DemoSiteType"
        }

        fn model(&self) -> Option<&str> {
            Some("dcim.site")
        }
    }

    struct NeedsName(&'static str);

    impl CustomValidator for NeedsName {
        fn model(&self) -> Option<&str> {
            Some("dcim.site")
        }

        fn validate(&self, object: &Value) -> Result<(), ValidationError> {
            match object.get("name") {
                Some(Value::String(_)) => Ok(()),
                _ => Err(ValidationError::new(self.0)),
            }
        }
    }

    fn panel(model: Option<&'static str>, html: &'static str) -> Arc<dyn TemplateExtension> {
        Arc::new(Panel { model, html })
    }

    #[test]
    fn template_extension_without_model_is_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .register_template_extensions(vec![panel(None, "x")])
            .unwrap_err();
        assert!(err.is_contract());
        assert!(err.to_string().contains("does not define a valid model"));
    }

    #[test]
    fn malformed_model_is_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .register_template_extensions(vec![panel(Some("site"), "x")])
            .unwrap_err();
        assert!(err.to_string().contains("`site`"));
    }

    #[test]
    fn failed_registration_leaves_registry_untouched() {
        let mut registry = Registry::new();
        let result = registry.register_template_extensions(vec![
            panel(Some("dcim.site"), "ok"),
            panel(None, "bad"),
        ]);
        assert!(result.is_err());
        assert!(registry.template_extensions("dcim.site").is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn same_extension_twice_appends_twice_in_order() {
        let mut registry = Registry::new();
        let first = panel(Some("dcim.site"), "a");
        let second = panel(Some("dcim.site"), "b");
        registry
            .register_template_extensions(vec![first.clone(), second])
            .unwrap();
        registry.register_template_extensions(vec![first]).unwrap();

        let ctx = TemplateContext::new(json!({"id": 7}));
        let html = registry
            .render_slot("dcim.site", Slot::RightPage, &ctx)
            .unwrap();
        assert_eq!(html.as_str(), "a#7b#7a#7");
        assert_eq!(registry.template_extensions("DCIM.Site").len(), 3);
    }

    #[test]
    fn unimplemented_slot_renders_empty() {
        let mut registry = Registry::new();
        registry
            .register_template_extensions(vec![panel(Some("dcim.site"), "a")])
            .unwrap();
        let html = registry
            .render_slot("dcim.site", Slot::Buttons, &TemplateContext::default())
            .unwrap();
        assert!(html.is_empty());
        assert!(registry
            .render_slot("dcim.device", Slot::RightPage, &TemplateContext::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn graphql_types_are_flat() {
        let mut registry = Registry::new();
        registry
            .register_graphql_types(vec![Arc::new(SiteType), Arc::new(SiteType)])
            .unwrap();
        assert_eq!(registry.graphql_types().len(), 2);
        assert_eq!(registry.graphql_types()[0].graphql_name(), "DemoSiteType");
    }

    #[test]
    fn graphql_type_without_model_is_rejected() {
        struct Orphan;
        impl GraphqlType for Orphan {
            fn graphql_name(&self) -> &str {
                "Orphan"
            }
            fn model(&self) -> Option<&str> {
                None
            }
        }

        let mut registry = Registry::new();
        let err = registry
            .register_graphql_types(vec![Arc::new(SiteType), Arc::new(Orphan)])
            .unwrap_err();
        assert!(err.is_contract());
        assert!(registry.graphql_types().is_empty());
    }

    #[test]
    fn menu_section_last_write_wins() {
        let mut registry = Registry::new();
        let first = vec![MenuItem::new("plugins:alpha:one", "One")];
        let second = vec![
            MenuItem::new("plugins:alpha:two", "Two"),
            MenuItem::new("plugins:alpha:three", "Three")
                .with_button(MenuButton::new("plugins:alpha:add", "Add", "mdi mdi-plus")),
        ];
        registry.register_menu_items("alpha", first).unwrap();
        registry.register_menu_items("beta", vec![]).unwrap();
        registry.register_menu_items("alpha", second.clone()).unwrap();

        assert_eq!(registry.menu_section("alpha").unwrap(), second.as_slice());
        let sections: Vec<&str> = registry.menu_items().map(|(s, _)| s).collect();
        assert_eq!(sections, vec!["alpha", "beta"]);
    }

    #[test]
    fn invalid_menu_item_keeps_previous_section() {
        let mut registry = Registry::new();
        let good = vec![MenuItem::new("plugins:alpha:one", "One")];
        registry.register_menu_items("alpha", good.clone()).unwrap();
        let err = registry
            .register_menu_items("alpha", vec![MenuItem::new("", "Broken")])
            .unwrap_err();
        assert!(err.is_contract());
        assert_eq!(registry.menu_section("alpha").unwrap(), good.as_slice());
    }

    #[test]
    fn whitespace_only_menu_fields_are_blank() {
        let mut registry = Registry::new();
        let blank_text = vec![MenuItem::new("plugins:alpha:one", "   ")];
        assert!(registry
            .register_menu_items("alpha", blank_text)
            .unwrap_err()
            .is_contract());

        let blank_button_link = vec![MenuItem::new("plugins:alpha:one", "One")
            .with_button(MenuButton::new("\t", "Add", "mdi mdi-plus"))];
        assert!(registry
            .register_menu_items("alpha", blank_button_link)
            .unwrap_err()
            .is_contract());
        assert!(registry.menu_section("alpha").is_none());
    }

    #[test]
    fn validators_aggregate_failures_in_order() {
        let mut registry = Registry::new();
        registry
            .register_custom_validators(vec![
                Arc::new(NeedsName("first")),
                Arc::new(NeedsName("second")),
            ])
            .unwrap();

        assert!(registry
            .run_custom_validators("dcim.site", &json!({"name": "hq"}))
            .is_ok());
        let failures = registry
            .run_custom_validators("dcim.site", &json!({}))
            .unwrap_err();
        let messages: Vec<&str> = failures.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(registry
            .run_custom_validators("dcim.device", &json!({}))
            .is_ok());
    }

    #[test]
    fn summary_counts_every_store() {
        let mut registry = Registry::new();
        registry
            .register_template_extensions(vec![panel(Some("dcim.site"), "a")])
            .unwrap();
        registry
            .register_graphql_types(vec![Arc::new(SiteType)])
            .unwrap();
        registry
            .register_menu_items("alpha", vec![MenuItem::new("a", "b"), MenuItem::new("c", "d")])
            .unwrap();
        registry
            .register_custom_validators(vec![Arc::new(NeedsName("n"))])
            .unwrap();

        let frozen = registry.freeze();
        assert_eq!(
            frozen.summary(),
            RegistrySummary {
                template_extensions: 1,
                graphql_types: 1,
                menu_sections: 1,
                menu_items: 2,
                custom_validators: 1,
            }
        );
        assert!(format!("{frozen:?}").contains("DemoSiteType"));
    }

    #[test]
    fn frozen_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();

        let frozen = Registry::new().freeze();
        let reader = Arc::clone(&frozen);
        std::thread::spawn(move || reader.graphql_types().len())
            .join()
            .unwrap();
    }
}
