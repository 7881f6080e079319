// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugin with per-test contributions.
//!
//! `MockPlugin` implements `Plugin` by handing out whatever lists it was
//! built with, and can be told to fail one contribution point.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trellis_core::{CustomValidator, GraphqlType, TemplateExtension, TrellisError};
use trellis_plugin::{ContributionPoint, MenuItem, Plugin, PluginDescriptor};

/// A plugin whose contributions are configured by the test.
///
/// Points left unset report "not provided".
pub struct MockPlugin {
    descriptor: PluginDescriptor,
    template_extensions: Option<Vec<Arc<dyn TemplateExtension>>>,
    graphql_types: Option<Vec<Arc<dyn GraphqlType>>>,
    menu_items: Option<Vec<MenuItem>>,
    custom_validators: Option<Vec<Arc<dyn CustomValidator>>>,
    failing: Option<ContributionPoint>,
    calls: AtomicUsize,
}

impl MockPlugin {
    /// Create a mock plugin named `name` at version 0.1.0.
    pub fn new(name: &str) -> Self {
        Self::from_descriptor(PluginDescriptor::new(name, "0.1.0"))
    }

    pub fn from_descriptor(descriptor: PluginDescriptor) -> Self {
        Self {
            descriptor,
            template_extensions: None,
            graphql_types: None,
            menu_items: None,
            custom_validators: None,
            failing: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Adjust the descriptor in place.
    pub fn with_descriptor(mut self, f: impl FnOnce(PluginDescriptor) -> PluginDescriptor) -> Self {
        self.descriptor = f(self.descriptor);
        self
    }

    pub fn with_template_extensions(mut self, items: Vec<Arc<dyn TemplateExtension>>) -> Self {
        self.template_extensions = Some(items);
        self
    }

    pub fn with_graphql_types(mut self, items: Vec<Arc<dyn GraphqlType>>) -> Self {
        self.graphql_types = Some(items);
        self
    }

    pub fn with_menu_items(mut self, items: Vec<MenuItem>) -> Self {
        self.menu_items = Some(items);
        self
    }

    pub fn with_custom_validators(mut self, items: Vec<Arc<dyn CustomValidator>>) -> Self {
        self.custom_validators = Some(items);
        self
    }

    /// Make the given contribution point return an internal error.
    pub fn failing_at(mut self, point: ContributionPoint) -> Self {
        self.failing = Some(point);
        self
    }

    /// Number of contribution methods called so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn into_arc(self) -> Arc<dyn Plugin> {
        Arc::new(self)
    }

    fn provide<T: Clone>(
        &self,
        point: ContributionPoint,
        items: &Option<Vec<T>>,
    ) -> Result<Option<Vec<T>>, TrellisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(point) {
            return Err(TrellisError::Internal(format!(
                "mock failure in {point}"
            )));
        }
        Ok(items.clone())
    }
}

impl Plugin for MockPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn template_extensions(&self) -> Result<Option<Vec<Arc<dyn TemplateExtension>>>, TrellisError> {
        self.provide(ContributionPoint::TemplateExtensions, &self.template_extensions)
    }

    fn graphql_types(&self) -> Result<Option<Vec<Arc<dyn GraphqlType>>>, TrellisError> {
        self.provide(ContributionPoint::GraphqlTypes, &self.graphql_types)
    }

    fn menu_items(&self) -> Result<Option<Vec<MenuItem>>, TrellisError> {
        self.provide(ContributionPoint::MenuItems, &self.menu_items)
    }

    fn custom_validators(&self) -> Result<Option<Vec<Arc<dyn CustomValidator>>>, TrellisError> {
        self.provide(ContributionPoint::CustomValidators, &self.custom_validators)
    }
}
