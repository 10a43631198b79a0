//! Plugin-based provider registry
//!
//! Word providers live in their own crates and register a factory here, so
//! the binary picks one by name instead of through a hardcoded match.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wordbot_core::registry::ProviderRegistry;
//! use wordbot_core::config::ProviderConfig;
//!
//! let mut registry = ProviderRegistry::new();
//! wordbot_provider_groq::register(&mut registry);
//!
//! let provider = registry.create_provider(&ProviderConfig::groq(key))?;
//! ```
//!
//! ## Registration
//!
//! ```rust,ignore
//! // In wordbot-provider-groq
//! pub fn register(registry: &mut ProviderRegistry) {
//!     registry.register_provider("groq", Box::new(GroqFactory));
//! }
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{WordProvider, WordProviderFactory};
use std::collections::HashMap;

/// Registry mapping provider type names to factories
#[derive(Default)]
pub struct ProviderRegistry {
    /// Registered word provider factories
    providers: HashMap<String, Box<dyn WordProviderFactory>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a word provider factory
    ///
    /// # Parameters
    ///
    /// - `name`: Provider type name (e.g., "groq", "gemini")
    /// - `factory`: Factory object for creating provider instances
    ///
    /// Registering the same name twice replaces the earlier factory.
    pub fn register_provider(
        &mut self,
        name: impl Into<String>,
        factory: Box<dyn WordProviderFactory>,
    ) {
        self.providers.insert(name.into(), factory);
    }

    /// Create a word provider from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn WordProvider>)`: Created provider instance
    /// - `Err(Error)`: If the provider type is not registered or creation fails
    pub fn create_provider(&self, config: &ProviderConfig) -> Result<Box<dyn WordProvider>> {
        let provider_type = config.type_name();

        let factory = self
            .providers
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        factory.create(config)
    }

    /// List all registered provider types, sorted by name
    pub fn list_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }
}
