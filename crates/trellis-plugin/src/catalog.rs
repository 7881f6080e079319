// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog of plugins compiled into the host.
//!
//! Configuration enables plugins by name; the catalog is where those names
//! are resolved. Nothing is discovered at runtime.

use std::sync::Arc;

use trellis_core::TrellisError;

use crate::descriptor::PluginDescriptor;
use crate::lifecycle::Plugin;

/// Name-indexed set of available plugins.
#[derive(Default)]
pub struct PluginCatalog {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin. Names must be unique.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> Result<(), TrellisError> {
        let name = &plugin.descriptor().name;
        if self.get(name).is_some() {
            return Err(TrellisError::Config(format!(
                "plugin {name} is already in the catalog"
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.iter().find(|p| p.descriptor().name == name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Descriptors of all plugins, sorted by name.
    pub fn list(&self) -> Vec<&PluginDescriptor> {
        let mut list: Vec<&PluginDescriptor> =
            self.plugins.iter().map(|p| p.descriptor()).collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// Search the catalog by query string.
    ///
    /// Filters entries whose name or description contains the query
    /// (case-insensitive). An empty query returns everything.
    pub fn search(&self, query: &str) -> Vec<&PluginDescriptor> {
        let query = query.to_lowercase();
        self.list()
            .into_iter()
            .filter(|d| {
                query.is_empty()
                    || d.name.to_lowercase().contains(&query)
                    || d.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// The closest known plugin name to `name`, if any is close enough.
    pub fn suggest(&self, name: &str) -> Option<String> {
        self.plugins
            .iter()
            .map(|p| {
                let candidate = &p.descriptor().name;
                (strsim::jaro_winkler(name, candidate), candidate)
            })
            .filter(|(score, _)| *score > 0.75)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, candidate)| candidate.clone())
    }
}
