//! Explicit registry of named network filter factories.
//!
//! Populated by explicit `register` calls at process startup and read-only
//! afterwards. Listener configuration refers to factories by name.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::filter::factory::{MongoProxyFilterConfigFactory, NamedNetworkFilterConfigFactory};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no network filter factory registered as '{0}'")]
    UnknownFilter(String),

    #[error("network filter factory '{0}' registered twice")]
    Duplicate(String),
}

/// Map from discovery name to factory.
#[derive(Default, Clone)]
pub struct FactoryRegistry {
    factories: HashMap<&'static str, Arc<dyn NamedNetworkFilterConfigFactory>>,
}

impl FactoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every factory this crate provides.
    pub fn with_builtin() -> Self {
        let mongo: Arc<dyn NamedNetworkFilterConfigFactory> =
            Arc::new(MongoProxyFilterConfigFactory);
        let mut registry = Self::new();
        registry.factories.insert(mongo.name(), mongo);
        registry
    }

    /// Register a factory under its own name.
    pub fn register(
        &mut self,
        factory: Arc<dyn NamedNetworkFilterConfigFactory>,
    ) -> Result<(), RegistryError> {
        let name = factory.name();
        if self.factories.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        tracing::debug!(filter = name, "Registered network filter factory");
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Look up a factory by discovery name.
    pub fn get(
        &self,
        name: &str,
    ) -> Result<Arc<dyn NamedNetworkFilterConfigFactory>, RegistryError> {
        self.factories
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownFilter(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
