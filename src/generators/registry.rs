//! Registry of generator implementations
//!
//! Generators are registered explicitly, in order, when the registry is
//! built. Resolution looks a name up among the declared generator names
//! first, then among the fully qualified type identifiers of the registered
//! implementations.

use std::any::type_name;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::{GoCodegen, JavaCodegen, RegistryError, RustCodegen};
use crate::generation::CodegenConfig;

/// Builds a fresh generator instance
pub type GeneratorFactory = fn() -> Arc<dyn CodegenConfig>;

fn instantiate<T: CodegenConfig + Default + 'static>() -> Arc<dyn CodegenConfig> {
    Arc::new(T::default())
}

#[derive(Clone, Copy)]
struct GeneratorEntry {
    name: &'static str,
    type_name: &'static str,
    factory: GeneratorFactory,
}

/// Ordered table of known generator implementations
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    entries: Vec<GeneratorEntry>,
}

impl GeneratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in generators registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register::<GoCodegen>()
            .register::<JavaCodegen>()
            .register::<RustCodegen>();
        registry
    }

    /// Register `T` after every generator already registered.
    ///
    /// When two generators share a name the earlier one wins.
    pub fn register<T: CodegenConfig + Default + 'static>(&mut self) -> &mut Self {
        let name = T::default().name();
        debug!(generator = name, implementation = type_name::<T>(), "Registering generator");
        self.entries.push(GeneratorEntry {
            name,
            type_name: type_name::<T>(),
            factory: instantiate::<T>,
        });
        self
    }

    /// Resolve a generator by name, falling back to its type identifier
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn CodegenConfig>, RegistryError> {
        debug!(generator = name, "Searching generator registry");
        if let Some(entry) = self.entries.iter().find(|entry| entry.name == name) {
            info!(
                generator = name,
                implementation = entry.type_name,
                "Found generator in registry"
            );
            return Ok((entry.factory)());
        }

        debug!(generator = name, "No generator registered under this name, trying type identifier");
        if let Some(entry) = self.entries.iter().find(|entry| entry.type_name == name) {
            info!(
                generator = entry.name,
                implementation = entry.type_name,
                "Found generator by type identifier"
            );
            return Ok((entry.factory)());
        }

        error!(generator = name, "Generator not found");
        Err(RegistryError::NotFound {
            name: name.to_string(),
        })
    }

    /// Registered generator names, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    /// Check if a generator is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| (entry.name, entry.type_name)))
            .finish()
    }
}
