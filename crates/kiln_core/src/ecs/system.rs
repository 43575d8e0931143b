//! # Systems
//!
//! A system declares the components it needs and keeps the list of entities
//! that have them. The registry fills that list during
//! [`Registry::update`](super::Registry::update); the system's own per-frame
//! logic lives outside this crate and only reads it.

use std::any::{type_name, Any};

use super::component::{Component, ComponentTypes};
use super::entity::Entity;
use super::signature::Signature;
use crate::error::RegistryResult;

/// Required signature plus current members, shared by every system.
#[derive(Clone, Debug, Default)]
pub struct SystemBase {
    signature: Signature,
    members: Vec<Entity>,
}

impl SystemBase {
    /// Creates a base that requires nothing and has no members.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that members must carry `C`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TooManyComponentTypes`](crate::RegistryError)
    /// if `C` is new and the registry is full.
    pub fn require_component<C: Component>(
        &mut self,
        types: &mut ComponentTypes,
    ) -> RegistryResult<&mut Self> {
        let id = types.id_of::<C>()?;
        self.signature.set(id, true);
        Ok(self)
    }

    /// Appends `entity` to the member list. Does not check for duplicates.
    pub fn add_entity(&mut self, entity: Entity) {
        self.members.push(entity);
    }

    /// Removes every occurrence of `entity`.
    pub fn remove_entity(&mut self, entity: Entity) {
        self.members.retain(|member| *member != entity);
    }

    /// Returns `true` if `entity` is a member.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    /// Current members, in the order they were added.
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    /// Required component signature.
    #[inline]
    #[must_use]
    pub fn signature(&self) -> Signature {
        self.signature
    }
}

/// Upcast to [`Any`] for every `'static` type, so boxed systems can be downcast.
pub trait AsAny: Any {
    /// Upcast for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A processor matched to entities by signature.
///
/// # Example
///
/// ```rust,ignore
/// struct MovementSystem {
///     base: SystemBase,
/// }
///
/// impl MovementSystem {
///     fn new(types: &mut ComponentTypes) -> RegistryResult<Self> {
///         let mut base = SystemBase::new();
///         base.require_component::<Transform>(types)?
///             .require_component::<RigidBody>(types)?;
///         Ok(Self { base })
///     }
/// }
///
/// impl System for MovementSystem {
///     fn base(&self) -> &SystemBase { &self.base }
///     fn base_mut(&mut self) -> &mut SystemBase { &mut self.base }
/// }
/// ```
pub trait System: AsAny {
    /// Signature and members.
    fn base(&self) -> &SystemBase;

    /// Mutable signature and members.
    fn base_mut(&mut self) -> &mut SystemBase;

    /// Human readable name used in logs.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Required component signature.
    fn signature(&self) -> Signature {
        self.base().signature()
    }

    /// Current members.
    fn members(&self) -> &[Entity] {
        self.base().members()
    }
}

/// Recovers the concrete system behind a trait object.
pub(crate) fn downcast_ref<S: System>(system: &dyn System) -> Option<&S> {
    system.as_any().downcast_ref::<S>()
}

/// Recovers the concrete system behind a trait object, mutably.
pub(crate) fn downcast_mut<S: System>(system: &mut dyn System) -> Option<&mut S> {
    system.as_any_mut().downcast_mut::<S>()
}
