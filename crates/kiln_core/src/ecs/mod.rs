//! # Entity Component System
//!
//! A registry-centric ECS for a single simulation loop.
//!
//! ## Design Philosophy
//!
//! - Entity IDs are simple monotonically increasing indices
//! - Components are stored in per-type arrays indexed by entity id
//! - A 64-bit signature per entity records which components are attached
//! - Systems see membership changes only after [`Registry::update`]

mod component;
mod entity;
mod registry;
mod signature;
mod storage;
mod system;

pub use component::{Component, ComponentTypes};
pub use entity::{Entity, EntityMut, EntityRef};
pub use registry::Registry;
pub use signature::{ComponentId, Signature, SIGNATURE_BITS};
pub use storage::{ComponentPool, ErasedPool};
pub use system::{AsAny, System, SystemBase};
