//! # KILN Core
//!
//! Entity registry for a single-threaded 2D simulation loop:
//! - Entities are plain ids handed out by a [`Registry`]
//! - Components live in per-type pools indexed by entity id
//! - Systems declare the components they need and receive matching entities
//!
//! ## Architecture Rules
//!
//! 1. **The registry owns everything** - pools, signatures and systems
//! 2. **Membership changes are deferred** - [`Registry::update`] is the only
//!    point where system member lists change
//! 3. **Signatures decide validity** - pool slots are only meaningful when the
//!    entity's signature bit is set
//!
//! ## Example
//!
//! ```rust,ignore
//! use kiln_core::{Registry, RegistryConfig};
//!
//! let mut registry = Registry::new(RegistryConfig::default())?;
//! let tank = registry.create_entity();
//! registry.add_component(tank, Transform::default())?;
//! registry.add_system(MovementSystem::new)?;
//! registry.update();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;

pub use config::RegistryConfig;
pub use ecs::{
    Component, ComponentId, ComponentPool, ComponentTypes, Entity, EntityMut, EntityRef,
    ErasedPool, Registry, Signature, System, SystemBase, SIGNATURE_BITS,
};
pub use error::{RegistryError, RegistryResult};
