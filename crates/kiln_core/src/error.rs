//! # Registry Error Types
//!
//! All errors that can occur while driving the entity registry.

use thiserror::Error;

/// Errors that can occur in the entity registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// More distinct component types were registered than the signature can hold.
    #[error("component type limit reached: cannot register {type_name}, capacity is {capacity}")]
    TooManyComponentTypes {
        /// The type that did not fit.
        type_name: &'static str,
        /// Maximum number of component types.
        capacity: usize,
    },

    /// The entity id was never issued by this registry.
    #[error("unknown entity: {0}")]
    UnknownEntity(u32),

    /// Every entity id has been issued; ids are never reused.
    #[error("entity ids exhausted: {issued} entities created")]
    EntityIdsExhausted {
        /// Number of ids issued so far.
        issued: u32,
    },

    /// The entity was killed and can no longer receive components.
    #[error("entity {0} has been killed")]
    DeadEntity(u32),

    /// The entity does not carry the requested component.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        /// The entity that was queried.
        entity: u32,
        /// Name of the requested component type.
        component: &'static str,
    },

    /// The pool registered under a component id does not store the requested type.
    #[error("pool for component id {id} does not store {expected}")]
    PoolTypeMismatch {
        /// The component id that was looked up.
        id: u8,
        /// Name of the type the caller asked for.
        expected: &'static str,
    },

    /// No system of the requested type is registered.
    #[error("system not found: {0}")]
    SystemNotFound(&'static str),

    /// A system of this type is already registered.
    #[error("system already registered: {0}")]
    DuplicateSystem(&'static str),

    /// Invalid configuration value or file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
