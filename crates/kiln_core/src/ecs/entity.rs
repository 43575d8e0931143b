//! # Entity Management
//!
//! Entities are lightweight identifiers. They carry no data; every component
//! access goes through the [`Registry`] that issued them.
//!
//! [`EntityRef`] and [`EntityMut`] pair an entity with a borrow of its
//! registry so call sites can write `registry.entity_mut(e).add_component(..)`.

use std::fmt;

use super::component::Component;
use super::registry::Registry;
use super::signature::Signature;
use crate::error::RegistryResult;

/// Unique identifier for an entity.
///
/// Ids are handed out in creation order starting at zero and are never
/// reused. Equality and ordering compare ids only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// Creates an entity handle from a raw id.
    #[inline]
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the id as a slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only accessor for one entity.
#[derive(Clone, Copy)]
pub struct EntityRef<'r> {
    registry: &'r Registry,
    entity: Entity,
}

impl<'r> EntityRef<'r> {
    pub(crate) fn new(registry: &'r Registry, entity: Entity) -> Self {
        Self { registry, entity }
    }

    /// The wrapped entity.
    #[inline]
    #[must_use]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// See [`Registry::has_component`].
    #[must_use]
    pub fn has_component<C: Component>(&self) -> bool {
        self.registry.has_component::<C>(self.entity)
    }

    /// See [`Registry::get_component`].
    ///
    /// # Errors
    ///
    /// Fails if the entity does not carry `C`.
    pub fn get_component<C: Component>(&self) -> RegistryResult<&'r C> {
        self.registry.get_component::<C>(self.entity)
    }

    /// The entity's signature, if the id is known.
    #[must_use]
    pub fn signature(&self) -> Option<Signature> {
        self.registry.signature(self.entity)
    }
}

/// Mutable accessor for one entity.
pub struct EntityMut<'r> {
    registry: &'r mut Registry,
    entity: Entity,
}

impl<'r> EntityMut<'r> {
    pub(crate) fn new(registry: &'r mut Registry, entity: Entity) -> Self {
        Self { registry, entity }
    }

    /// The wrapped entity.
    #[inline]
    #[must_use]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// See [`Registry::add_component`].
    ///
    /// # Errors
    ///
    /// Fails if the entity is unknown or dead, or the component type does not fit.
    pub fn add_component<C: Component>(&mut self, component: C) -> RegistryResult<&mut Self> {
        self.registry.add_component(self.entity, component)?;
        Ok(self)
    }

    /// See [`Registry::remove_component`].
    pub fn remove_component<C: Component>(&mut self) -> &mut Self {
        self.registry.remove_component::<C>(self.entity);
        self
    }

    /// See [`Registry::has_component`].
    #[must_use]
    pub fn has_component<C: Component>(&self) -> bool {
        self.registry.has_component::<C>(self.entity)
    }

    /// See [`Registry::get_component`].
    ///
    /// # Errors
    ///
    /// Fails if the entity does not carry `C`.
    pub fn get_component<C: Component>(&self) -> RegistryResult<&C> {
        self.registry.get_component::<C>(self.entity)
    }

    /// See [`Registry::get_component_mut`].
    ///
    /// # Errors
    ///
    /// Fails if the entity does not carry `C`.
    pub fn get_component_mut<C: Component>(&mut self) -> RegistryResult<&mut C> {
        self.registry.get_component_mut::<C>(self.entity)
    }

    /// See [`Registry::kill_entity`].
    pub fn kill(self) {
        self.registry.kill_entity(self.entity);
    }
}
