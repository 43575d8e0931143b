//! # Registry Configuration
//!
//! Sizing knobs for a [`Registry`](crate::Registry), loaded once at startup.
//!
//! ```toml
//! max_component_types = 32
//! initial_pool_capacity = 100
//! initial_entity_capacity = 0
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::ecs::SIGNATURE_BITS;
use crate::error::{RegistryError, RegistryResult};

/// Default number of distinct component types a registry accepts.
pub const DEFAULT_MAX_COMPONENT_TYPES: usize = 32;

/// Default number of slots a freshly created component pool starts with.
pub const DEFAULT_POOL_CAPACITY: usize = 100;

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Maximum number of distinct component types (1 to [`SIGNATURE_BITS`]).
    pub max_component_types: usize,
    /// Slots allocated when a component pool is first created.
    pub initial_pool_capacity: usize,
    /// Signature slots reserved up front.
    pub initial_entity_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_component_types: DEFAULT_MAX_COMPONENT_TYPES,
            initial_pool_capacity: DEFAULT_POOL_CAPACITY,
            initial_entity_capacity: 0,
        }
    }
}

impl RegistryConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] if the text is not valid TOML,
    /// contains unknown keys, or fails [`RegistryConfig::validate`].
    pub fn from_toml_str(text: &str) -> RegistryResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| RegistryError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file and parses it with [`RegistryConfig::from_toml_str`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks that every value is within the supported range.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] if `max_component_types` is zero
    /// or wider than a signature.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.max_component_types == 0 || self.max_component_types > SIGNATURE_BITS {
            return Err(RegistryError::InvalidConfig(format!(
                "max_component_types must be between 1 and {SIGNATURE_BITS}, got {}",
                self.max_component_types
            )));
        }
        Ok(())
    }
}
