// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin trait and its startup hook.
//!
//! A plugin exposes its descriptor and, optionally, one list per contribution
//! point. `ready` registers whatever lists are present, in a fixed order,
//! and tags every failure with the plugin and the integration path involved.

use std::sync::Arc;

use tracing::debug;

use trellis_core::{CustomValidator, GraphqlType, TemplateExtension, TrellisError};

use crate::descriptor::{ContributionPoint, PluginDescriptor};
use crate::menu::MenuItem;
use crate::registry::Registry;

/// A compiled-in plugin.
///
/// Each contribution method returns `Ok(None)` when the plugin does not
/// provide that integration, which is silently skipped. An `Err` means the
/// integration exists but could not be built, and aborts startup.
pub trait Plugin: Send + Sync + 'static {
    fn descriptor(&self) -> &PluginDescriptor;

    fn template_extensions(&self) -> Result<Option<Vec<Arc<dyn TemplateExtension>>>, TrellisError> {
        Ok(None)
    }

    fn graphql_types(&self) -> Result<Option<Vec<Arc<dyn GraphqlType>>>, TrellisError> {
        Ok(None)
    }

    fn menu_items(&self) -> Result<Option<Vec<MenuItem>>, TrellisError> {
        Ok(None)
    }

    fn custom_validators(&self) -> Result<Option<Vec<Arc<dyn CustomValidator>>>, TrellisError> {
        Ok(None)
    }
}

/// Register every contribution `plugin` provides.
///
/// Order is template extensions, GraphQL types, menu items, custom
/// validators. Menu items go into the section named by the plugin's verbose
/// name. The first failure stops the hook; contributions registered before
/// it stay in place.
pub fn ready(plugin: &dyn Plugin, registry: &mut Registry) -> Result<(), TrellisError> {
    let descriptor = plugin.descriptor();
    let owner = Some(descriptor.name.as_str());
    let wrap = |point: ContributionPoint| {
        move |source: TrellisError| TrellisError::Contribution {
            plugin: descriptor.name.clone(),
            path: descriptor.integration_path(point),
            source: Box::new(source),
        }
    };

    let point = ContributionPoint::TemplateExtensions;
    if let Some(extensions) = plugin.template_extensions().map_err(wrap(point))? {
        registry
            .register_template_extensions_from(owner, extensions)
            .map_err(wrap(point))?;
    } else {
        skipped(descriptor, point);
    }

    let point = ContributionPoint::GraphqlTypes;
    if let Some(types) = plugin.graphql_types().map_err(wrap(point))? {
        registry.register_graphql_types(types).map_err(wrap(point))?;
    } else {
        skipped(descriptor, point);
    }

    let point = ContributionPoint::MenuItems;
    if let Some(items) = plugin.menu_items().map_err(wrap(point))? {
        registry
            .register_menu_items(descriptor.verbose_name(), items)
            .map_err(wrap(point))?;
    } else {
        skipped(descriptor, point);
    }

    let point = ContributionPoint::CustomValidators;
    if let Some(validators) = plugin.custom_validators().map_err(wrap(point))? {
        registry
            .register_custom_validators(validators)
            .map_err(wrap(point))?;
    } else {
        skipped(descriptor, point);
    }

    Ok(())
}

fn skipped(descriptor: &PluginDescriptor, point: ContributionPoint) {
    debug!(
        plugin = %descriptor.name,
        path = %descriptor.integration_path(point),
        "integration not provided, skipping"
    );
}
