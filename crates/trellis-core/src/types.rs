// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by contribution contracts and the registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::error::TrellisError;

/// Identifies a host model in the form `<app_label>.<model_name>`.
///
/// Both parts must be non-empty. The identifier is stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    pub fn app_label(&self) -> &str {
        self.0.split_once('.').map(|(app, _)| app).unwrap_or_default()
    }

    pub fn model_name(&self) -> &str {
        self.0.split_once('.').map(|(_, model)| model).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ModelId {
    type Err = TrellisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            TrellisError::Contract(format!(
                "invalid model identifier `{s}`: expected `<app_label>.<model_name>`"
            ))
        };
        let (app, model) = s.trim().split_once('.').ok_or_else(invalid)?;
        let well_formed = |part: &str| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        };
        if !well_formed(app) || !well_formed(model) {
            return Err(invalid());
        }
        Ok(ModelId(format!(
            "{}.{}",
            app.to_ascii_lowercase(),
            model.to_ascii_lowercase()
        )))
    }
}

impl TryFrom<String> for ModelId {
    type Error = TrellisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// HTML that is safe to embed in a host page without further escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Wrap already-escaped HTML.
    pub fn from_trusted(html: impl Into<String>) -> Self {
        Markup(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, other: &Markup) {
        self.0.push_str(&other.0);
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four page regions a template extension can fill.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    LeftPage,
    RightPage,
    FullWidthPage,
    Buttons,
}

/// Allowed colors for navigation menu buttons.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ButtonColor {
    #[default]
    Default,
    Blue,
    Indigo,
    Purple,
    Pink,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Teal,
    Gray,
    Black,
    White,
}

impl ButtonColor {
    /// CSS class suffix used when the host renders the button.
    pub fn css_class(&self) -> &'static str {
        match self {
            ButtonColor::Default => "outline-dark",
            ButtonColor::Blue => "blue",
            ButtonColor::Indigo => "indigo",
            ButtonColor::Purple => "purple",
            ButtonColor::Pink => "pink",
            ButtonColor::Red => "red",
            ButtonColor::Orange => "orange",
            ButtonColor::Yellow => "yellow",
            ButtonColor::Green => "green",
            ButtonColor::Cyan => "cyan",
            ButtonColor::Teal => "teal",
            ButtonColor::Gray => "gray",
            ButtonColor::Black => "black",
            ButtonColor::White => "white",
        }
    }
}

/// Data the host hands to template extensions when rendering a detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    /// The object being viewed.
    pub object: Value,
    /// The current request, as exposed by the host.
    pub request: Value,
    /// Global host settings.
    pub settings: Value,
    /// Settings of the plugin that owns the extension.
    pub config: Value,
}

impl TemplateContext {
    pub fn new(object: Value) -> Self {
        Self {
            object,
            ..Default::default()
        }
    }

    pub fn with_request(mut self, request: Value) -> Self {
        self.request = request;
        self
    }

    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    /// The context as a mapping with `object`, `request`, `settings` and `config` keys.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("object".to_string(), self.object.clone());
        map.insert("request".to_string(), self.request.clone());
        map.insert("settings".to_string(), self.settings.clone());
        map.insert("config".to_string(), self.config.clone());
        map
    }
}
