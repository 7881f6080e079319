// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigation menu entries contributed by plugins.
//!
//! Links are host route names, resolved by the host when it builds the
//! navigation menu.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::VariantNames;

use trellis_core::{ButtonColor, TrellisError};

/// A navigation link with optional buttons shown to its right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub link: String,
    pub link_text: String,
    /// Permissions required to see the item. Empty means public.
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub buttons: Vec<MenuButton>,
}

impl MenuItem {
    pub fn new(link: impl Into<String>, link_text: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            link_text: link_text.into(),
            permissions: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_button(mut self, button: MenuButton) -> Self {
        self.buttons.push(button);
        self
    }

    /// Whether a user holding `granted` may see this item.
    pub fn visible_to(&self, granted: &[String]) -> bool {
        self.permissions.iter().all(|p| granted.contains(p))
    }

    pub(crate) fn check(&self) -> Result<(), TrellisError> {
        if self.link.trim().is_empty() || self.link_text.trim().is_empty() {
            return Err(TrellisError::Contract(format!(
                "menu item {self:?} must define both link and link_text"
            )));
        }
        self.buttons.iter().try_for_each(MenuButton::check)
    }
}

/// A button attached to a [`MenuItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    pub link: String,
    pub title: String,
    /// Icon identifier, e.g. `mdi mdi-plus-thick`.
    pub icon_class: String,
    #[serde(default)]
    pub color: ButtonColor,
    /// Permissions required to see the button. Empty means public.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl MenuButton {
    pub fn new(
        link: impl Into<String>,
        title: impl Into<String>,
        icon_class: impl Into<String>,
    ) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
            icon_class: icon_class.into(),
            color: ButtonColor::default(),
            permissions: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: ButtonColor) -> Self {
        self.color = color;
        self
    }

    /// Set the color from its name, rejecting anything outside [`ButtonColor`].
    pub fn with_color_name(self, color: &str) -> Result<Self, TrellisError> {
        let parsed = ButtonColor::from_str(color).map_err(|_| {
            TrellisError::Contract(format!(
                "button color `{color}` must be one of: {}",
                ButtonColor::VARIANTS.join(", ")
            ))
        })?;
        Ok(self.with_color(parsed))
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn visible_to(&self, granted: &[String]) -> bool {
        self.permissions.iter().all(|p| granted.contains(p))
    }

    fn check(&self) -> Result<(), TrellisError> {
        if self.link.trim().is_empty() || self.title.trim().is_empty() {
            return Err(TrellisError::Contract(format!(
                "menu button {self:?} must define both link and title"
            )));
        }
        Ok(())
    }
}
