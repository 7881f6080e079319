// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal implementations of the three contributor contracts.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use trellis_core::{
    CustomValidator, GraphqlType, Markup, Slot, TemplateContext, TemplateExtension, TrellisError,
    ValidationError,
};

/// Template extension returning fixed markup per slot.
pub struct StaticExtension {
    name: String,
    model: Option<String>,
    slots: HashMap<Slot, String>,
    echo: Option<(Slot, String)>,
}

impl StaticExtension {
    pub fn new(model: &str) -> Self {
        Self {
            name: format!("StaticExtension({model})"),
            model: Some(model.to_string()),
            slots: HashMap::new(),
            echo: None,
        }
    }

    /// An extension that declares no model.
    pub fn unbound() -> Self {
        Self {
            name: "StaticExtension(unbound)".to_string(),
            model: None,
            slots: HashMap::new(),
            echo: None,
        }
    }

    pub fn with_slot(mut self, slot: Slot, html: &str) -> Self {
        self.slots.insert(slot, html.to_string());
        self
    }

    /// Render `config[key]` of the render context in `slot`.
    pub fn echo_config(mut self, slot: Slot, key: &str) -> Self {
        self.echo = Some((slot, key.to_string()));
        self
    }

    pub fn into_arc(self) -> Arc<dyn TemplateExtension> {
        Arc::new(self)
    }

    fn render(&self, slot: Slot, ctx: &TemplateContext) -> Markup {
        let mut html = self.slots.get(&slot).cloned().unwrap_or_default();
        if let Some((echo_slot, key)) = &self.echo
            && *echo_slot == slot
        {
            match &ctx.config[key.as_str()] {
                Value::String(s) => html.push_str(s),
                Value::Null => {}
                other => html.push_str(&other.to_string()),
            }
        }
        Markup::from_trusted(html)
    }
}

impl TemplateExtension for StaticExtension {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    fn left_page(&self, ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        Ok(self.render(Slot::LeftPage, ctx))
    }

    fn right_page(&self, ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        Ok(self.render(Slot::RightPage, ctx))
    }

    fn full_width_page(&self, ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        Ok(self.render(Slot::FullWidthPage, ctx))
    }

    fn buttons(&self, ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        Ok(self.render(Slot::Buttons, ctx))
    }
}

/// GraphQL type with a fixed schema name and model.
pub struct StaticGraphqlType {
    graphql_name: String,
    model: Option<String>,
}

impl StaticGraphqlType {
    pub fn new(graphql_name: &str, model: &str) -> Self {
        Self {
            graphql_name: graphql_name.to_string(),
            model: Some(model.to_string()),
        }
    }

    pub fn without_model(graphql_name: &str) -> Self {
        Self {
            graphql_name: graphql_name.to_string(),
            model: None,
        }
    }

    pub fn into_arc(self) -> Arc<dyn GraphqlType> {
        Arc::new(self)
    }
}

impl GraphqlType for StaticGraphqlType {
    fn name(&self) -> &str {
        &self.graphql_name
    }

    fn graphql_name(&self) -> &str {
        &self.graphql_name
    }

    fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

/// Rejects objects where `field` is missing, null, or an empty string.
pub struct RequiredField {
    model: String,
    field: String,
}

impl RequiredField {
    pub fn new(model: &str, field: &str) -> Self {
        Self {
            model: model.to_string(),
            field: field.to_string(),
        }
    }

    pub fn into_arc(self) -> Arc<dyn CustomValidator> {
        Arc::new(self)
    }
}

impl CustomValidator for RequiredField {
    fn name(&self) -> &str {
        &self.field
    }

    fn model(&self) -> Option<&str> {
        Some(&self.model)
    }

    fn validate(&self, object: &Value) -> Result<(), ValidationError> {
        match object.get(&self.field) {
            None | Some(Value::Null) => {
                Err(ValidationError::new(format!("{} is required", self.field)))
            }
            Some(Value::String(s)) if s.is_empty() => {
                Err(ValidationError::new(format!("{} is required", self.field)))
            }
            Some(_) => Ok(()),
        }
    }
}
