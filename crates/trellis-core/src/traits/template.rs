// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template content injection contract.

use crate::error::TrellisError;
use crate::types::{Markup, Slot, TemplateContext};

/// Content a plugin injects into the detail page of one host model.
///
/// The host calls each slot with the page's [`TemplateContext`]. Slots that
/// a plugin does not override contribute nothing.
pub trait TemplateExtension: Send + Sync + 'static {
    /// Name used in error messages and logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// The model identifier (`<app_label>.<model_name>`) this extension renders for.
    ///
    /// Must be set; registration rejects extensions that return `None`.
    fn model(&self) -> Option<&str> {
        None
    }

    /// Content rendered in the left column of the detail page.
    fn left_page(&self, _ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        Ok(Markup::default())
    }

    /// Content rendered in the right column of the detail page.
    fn right_page(&self, _ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        Ok(Markup::default())
    }

    /// Content rendered across the full width of the detail page.
    fn full_width_page(&self, _ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        Ok(Markup::default())
    }

    /// Buttons appended to the detail page's button row.
    fn buttons(&self, _ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        Ok(Markup::default())
    }

    /// Dispatch to the method for `slot`.
    fn render_slot(&self, slot: Slot, ctx: &TemplateContext) -> Result<Markup, TrellisError> {
        match slot {
            Slot::LeftPage => self.left_page(ctx),
            Slot::RightPage => self.right_page(ctx),
            Slot::FullWidthPage => self.full_width_page(ctx),
            Slot::Buttons => self.buttons(ctx),
        }
    }
}
