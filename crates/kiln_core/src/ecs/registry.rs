//! # Entity Registry
//!
//! The central container for entities, components and systems.
//!
//! Structural changes are two-phase: creating or killing an entity, or
//! changing the components of an active one, only queues it, and
//! [`Registry::update`] applies the queue to every system's member list in
//! one pass. Systems therefore see a stable member list for a whole frame.

use std::any::{type_name, TypeId};
use std::collections::BTreeSet;
use std::mem;

use super::component::{Component, ComponentTypes};
use super::entity::{Entity, EntityMut, EntityRef};
use super::signature::{ComponentId, Signature};
use super::storage::{self, ComponentPool, ErasedPool};
use super::system::{self, System};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};

/// The ECS registry - sole owner of pools, signatures and systems.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = Registry::new(RegistryConfig::default())?;
///
/// let tank = registry.create_entity();
/// registry.add_component(tank, Transform::default())?;
/// registry.add_component(tank, RigidBody::new(Vec2::new(30.0, 0.0)))?;
///
/// registry.add_system(MovementSystem::new)?;
/// registry.update();
/// assert_eq!(registry.get_system::<MovementSystem>()?.members(), &[tank]);
/// ```
pub struct Registry {
    config: RegistryConfig,
    /// Component id allocator owned by this registry.
    types: ComponentTypes,
    /// One pool per component id, created on first use.
    pools: Vec<Option<Box<dyn ErasedPool>>>,
    /// Component signature per entity id.
    signatures: Vec<Signature>,
    /// Liveness per entity id.
    alive: Vec<bool>,
    /// Next entity id to hand out.
    next_id: u32,
    /// Registered systems in registration order.
    systems: Vec<(TypeId, Box<dyn System>)>,
    /// Entities waiting to be matched against systems.
    to_add: BTreeSet<Entity>,
    /// Active entities whose signature changed since they were matched.
    to_resync: BTreeSet<Entity>,
    /// Entities waiting to be evicted from systems.
    to_kill: BTreeSet<Entity>,
}

impl Registry {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: RegistryConfig) -> Self {
        tracing::debug!(
            max_component_types = config.max_component_types,
            "registry created"
        );
        Self {
            types: ComponentTypes::new(config.max_component_types),
            pools: Vec::new(),
            signatures: Vec::with_capacity(config.initial_entity_capacity),
            alive: Vec::with_capacity(config.initial_entity_capacity),
            next_id: 0,
            systems: Vec::new(),
            to_add: BTreeSet::new(),
            to_resync: BTreeSet::new(),
            to_kill: BTreeSet::new(),
            config,
        }
    }

    /// Configuration this registry was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Applies queued entity additions and removals to every system.
    ///
    /// Three passes, each in id order:
    /// 1. pending additions that are still alive join every system whose
    ///    signature they satisfy;
    /// 2. active entities whose components changed leave the systems they no
    ///    longer satisfy and join the ones they now satisfy, at most once;
    /// 3. killed entities leave every system that lists them.
    pub fn update(&mut self) {
        let span = tracing::debug_span!(
            "registry.update",
            to_add = self.to_add.len(),
            to_resync = self.to_resync.len(),
            to_kill = self.to_kill.len()
        );
        let _guard = span.enter();

        for entity in mem::take(&mut self.to_add) {
            if self.is_alive(entity) {
                self.sync_entities_to_systems(entity);
            }
        }

        for entity in mem::take(&mut self.to_resync) {
            if self.is_alive(entity) {
                self.resync_entity(entity);
            }
        }

        for entity in mem::take(&mut self.to_kill) {
            for (_, system) in &mut self.systems {
                system.base_mut().remove_entity(entity);
            }
            tracing::debug!(%entity, "entity removed from systems");
        }
    }

    /// Adds `entity` to every system whose signature it satisfies.
    ///
    /// Called by [`Registry::update`] for each pending entity. Calling it
    /// again for an entity that is already a member duplicates the membership.
    pub fn sync_entities_to_systems(&mut self, entity: Entity) {
        let Some(&signature) = self.signatures.get(entity.index()) else {
            return;
        };

        for (_, system) in &mut self.systems {
            if signature.contains_all(system.signature()) {
                system.base_mut().add_entity(entity);
                tracing::debug!(%entity, system = system.name(), "entity joined system");
            }
        }
    }

    /// Re-matches an active entity against every system after its signature
    /// changed. Membership is never duplicated.
    fn resync_entity(&mut self, entity: Entity) {
        let Some(&signature) = self.signatures.get(entity.index()) else {
            return;
        };

        for (_, system) in &mut self.systems {
            let matches = signature.contains_all(system.signature());
            let member = system.base().contains(entity);
            if matches && !member {
                system.base_mut().add_entity(entity);
                tracing::debug!(%entity, system = system.name(), "entity joined system");
            } else if !matches && member {
                system.base_mut().remove_entity(entity);
                tracing::debug!(%entity, system = system.name(), "entity left system");
            }
        }
    }

    /// Queues an active entity for re-matching. Entities still waiting for
    /// their first match are picked up by the addition pass instead.
    fn mark_changed(&mut self, entity: Entity) {
        if self.is_alive(entity) && !self.to_add.contains(&entity) {
            self.to_resync.insert(entity);
        }
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Creates a new entity and queues it for system matching.
    ///
    /// The entity joins no system until the next [`Registry::update`].
    ///
    /// # Panics
    ///
    /// Panics once `u32::MAX` ids have been issued. Use
    /// [`Registry::try_create_entity`] to handle that case.
    pub fn create_entity(&mut self) -> Entity {
        match self.try_create_entity() {
            Ok(entity) => entity,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates a new entity and queues it for system matching.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EntityIdsExhausted`] once every id has been
    /// issued. Ids are never reused, so the registry cannot create more.
    pub fn try_create_entity(&mut self) -> RegistryResult<Entity> {
        let entity = Entity::from_raw(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(RegistryError::EntityIdsExhausted {
                issued: self.next_id,
            })?;

        let index = entity.index();
        if index >= self.signatures.len() {
            self.signatures.resize(index + 1, Signature::EMPTY);
            self.alive.resize(index + 1, false);
        }
        self.alive[index] = true;
        self.to_add.insert(entity);

        tracing::debug!(%entity, "entity created");
        Ok(entity)
    }

    /// Kills an entity.
    ///
    /// The signature is cleared immediately, so every `has_component` query
    /// returns `false`. The entity leaves its systems at the next
    /// [`Registry::update`]. Ids are not reused. Killing an unknown or dead
    /// entity does nothing.
    pub fn kill_entity(&mut self, entity: Entity) {
        if !self.is_alive(entity) {
            return;
        }

        let index = entity.index();
        self.alive[index] = false;
        self.signatures[index].clear();
        self.to_kill.insert(entity);

        tracing::debug!(%entity, "entity killed");
    }

    /// Returns `true` if `entity` was issued by this registry and not killed.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.get(entity.index()).copied().unwrap_or(false)
    }

    /// Number of entities ever created.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.next_id as usize
    }

    /// Number of entities that have not been killed.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|alive| **alive).count()
    }

    /// Component signature of `entity`, if the id is known.
    #[inline]
    #[must_use]
    pub fn signature(&self, entity: Entity) -> Option<Signature> {
        self.signatures.get(entity.index()).copied()
    }

    /// Iterates live entities whose signature contains `required`, in id order.
    pub fn entities_matching(&self, required: Signature) -> impl Iterator<Item = Entity> + '_ {
        (0..self.next_id)
            .map(Entity::from_raw)
            .filter(move |entity| {
                self.is_alive(*entity) && self.signatures[entity.index()].contains_all(required)
            })
    }

    /// Entities waiting to be matched at the next update, in id order.
    pub fn pending_additions(&self) -> impl Iterator<Item = Entity> + '_ {
        self.to_add.iter().copied()
    }

    /// Active entities waiting to be re-matched at the next update, in id order.
    pub fn pending_resyncs(&self) -> impl Iterator<Item = Entity> + '_ {
        self.to_resync.iter().copied()
    }

    /// Entities waiting to be evicted at the next update, in id order.
    pub fn pending_removals(&self) -> impl Iterator<Item = Entity> + '_ {
        self.to_kill.iter().copied()
    }

    /// Read-only accessor for `entity`.
    #[must_use]
    pub fn entity(&self, entity: Entity) -> EntityRef<'_> {
        EntityRef::new(self, entity)
    }

    /// Mutable accessor for `entity`.
    pub fn entity_mut(&mut self, entity: Entity) -> EntityMut<'_> {
        EntityMut::new(self, entity)
    }

    fn known_index(&self, entity: Entity) -> RegistryResult<usize> {
        if entity.id() < self.next_id {
            Ok(entity.index())
        } else {
            Err(RegistryError::UnknownEntity(entity.id()))
        }
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Attaches `component` to `entity`, replacing any previous value.
    ///
    /// Registers `C` on first use and creates its pool lazily. The pool grows
    /// to the current entity count when the entity's slot is out of range.
    /// System membership is not affected until the next [`Registry::update`],
    /// which re-matches the entity if it was already active.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownEntity`] if the id was never issued
    /// - [`RegistryError::DeadEntity`] if the entity was killed
    /// - [`RegistryError::TooManyComponentTypes`] if `C` is new and no id is left
    pub fn add_component<C: Component>(
        &mut self,
        entity: Entity,
        component: C,
    ) -> RegistryResult<()> {
        let index = self.known_index(entity)?;
        if !self.alive[index] {
            return Err(RegistryError::DeadEntity(entity.id()));
        }

        let id = self.types.id_of::<C>()?;
        if id.index() >= self.pools.len() {
            self.pools.resize_with(id.index() + 1, || None);
        }

        let capacity = self.config.initial_pool_capacity;
        let entity_count = self.entity_count();
        let slot = self.pools[id.index()]
            .get_or_insert_with(|| -> Box<dyn ErasedPool> {
                Box::new(ComponentPool::<C>::new(id, capacity))
            });
        let pool = storage::downcast_mut::<C>(&mut **slot).ok_or(
            RegistryError::PoolTypeMismatch {
                id: id.get(),
                expected: type_name::<C>(),
            },
        )?;

        if index >= pool.len() {
            pool.resize(entity_count);
        }
        pool.set(index, component);

        let newly_set = !self.signatures[index].test(id);
        self.signatures[index].set(id, true);
        if newly_set {
            self.mark_changed(entity);
        }

        tracing::debug!(%entity, component = type_name::<C>(), id = id.get(), "component added");
        Ok(())
    }

    /// Detaches `C` from `entity`.
    ///
    /// Only the signature bit is cleared; the pool slot keeps its value but is
    /// no longer reachable. An active entity leaves the systems that required
    /// `C` at the next [`Registry::update`]. Removing a component the entity
    /// does not have, or from an unknown entity, does nothing.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) {
        let Some(id) = self.types.lookup::<C>() else {
            return;
        };
        let Some(signature) = self.signatures.get_mut(entity.index()) else {
            return;
        };
        if !signature.test(id) {
            return;
        }

        signature.set(id, false);
        self.mark_changed(entity);
        tracing::debug!(%entity, component = type_name::<C>(), "component removed");
    }

    /// Returns `true` if `entity` currently carries `C`.
    #[must_use]
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        match (self.types.lookup::<C>(), self.signature(entity)) {
            (Some(id), Some(signature)) => signature.test(id),
            _ => false,
        }
    }

    /// Returns the `C` stored for `entity`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownEntity`] if the id was never issued
    /// - [`RegistryError::MissingComponent`] if the entity does not carry `C`
    pub fn get_component<C: Component>(&self, entity: Entity) -> RegistryResult<&C> {
        let index = self.checked_slot::<C>(entity)?;
        self.pool::<C>()
            .and_then(|pool| pool.get(index))
            .ok_or_else(|| missing::<C>(entity))
    }

    /// Returns the `C` stored for `entity`, mutably.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::get_component`].
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> RegistryResult<&mut C> {
        let index = self.checked_slot::<C>(entity)?;
        self.pool_mut::<C>()
            .and_then(|pool| pool.get_mut(index))
            .ok_or_else(|| missing::<C>(entity))
    }

    /// Typed view of the pool for `C`, if one was created.
    #[must_use]
    pub fn pool<C: Component>(&self) -> Option<&ComponentPool<C>> {
        let id = self.types.lookup::<C>()?;
        let pool = self.pools.get(id.index())?.as_deref()?;
        storage::downcast_ref::<C>(pool)
    }

    fn pool_mut<C: Component>(&mut self) -> Option<&mut ComponentPool<C>> {
        let id = self.types.lookup::<C>()?;
        let pool = self.pools.get_mut(id.index())?.as_deref_mut()?;
        storage::downcast_mut::<C>(pool)
    }

    /// Slot index of `entity` after checking that it carries `C`.
    fn checked_slot<C: Component>(&self, entity: Entity) -> RegistryResult<usize> {
        let index = self.known_index(entity)?;
        let id = self.types.lookup::<C>().ok_or_else(|| missing::<C>(entity))?;
        if self.signatures[index].test(id) {
            Ok(index)
        } else {
            Err(missing::<C>(entity))
        }
    }

    /// Id of `C` in this registry, if it has been registered.
    #[must_use]
    pub fn component_id<C: Component>(&self) -> Option<ComponentId> {
        self.types.lookup::<C>()
    }

    /// Registers `C` without attaching it, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TooManyComponentTypes`] if `C` is new and no id is left.
    pub fn register_component<C: Component>(&mut self) -> RegistryResult<ComponentId> {
        self.types.id_of::<C>()
    }

    /// Component id allocator of this registry.
    #[must_use]
    pub fn component_types(&self) -> &ComponentTypes {
        &self.types
    }

    // =========================================================================
    // Systems
    // =========================================================================

    /// Constructs and registers a system.
    ///
    /// `build` receives the registry's component id allocator so the system
    /// can declare its requirements with
    /// [`SystemBase::require_component`](super::SystemBase::require_component).
    /// Entities that are already active are not matched against the new
    /// system; only entities reconciled afterwards are.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateSystem`] if `S` is already registered
    /// - any error returned by `build`
    pub fn add_system<S, F>(&mut self, build: F) -> RegistryResult<()>
    where
        S: System,
        F: FnOnce(&mut ComponentTypes) -> RegistryResult<S>,
    {
        if self.has_system::<S>() {
            return Err(RegistryError::DuplicateSystem(type_name::<S>()));
        }

        let system = build(&mut self.types)?;
        tracing::info!(
            system = system.name(),
            signature = %system.signature(),
            "system added"
        );
        self.systems.push((TypeId::of::<S>(), Box::new(system)));
        Ok(())
    }

    /// Unregisters `S`.
    ///
    /// Returns `false` if no such system was registered.
    pub fn remove_system<S: System>(&mut self) -> bool {
        let Some(position) = self.system_position::<S>() else {
            tracing::warn!(system = type_name::<S>(), "remove_system: system not found");
            return false;
        };
        self.systems.remove(position);
        tracing::info!(system = type_name::<S>(), "system removed");
        true
    }

    /// Returns `true` if `S` is registered.
    #[must_use]
    pub fn has_system<S: System>(&self) -> bool {
        self.system_position::<S>().is_some()
    }

    /// Returns the registered `S`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SystemNotFound`] if `S` is not registered.
    pub fn get_system<S: System>(&self) -> RegistryResult<&S> {
        self.system_position::<S>()
            .and_then(|position| system::downcast_ref::<S>(&*self.systems[position].1))
            .ok_or(RegistryError::SystemNotFound(type_name::<S>()))
    }

    /// Returns the registered `S`, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SystemNotFound`] if `S` is not registered.
    pub fn get_system_mut<S: System>(&mut self) -> RegistryResult<&mut S> {
        let position = self
            .system_position::<S>()
            .ok_or(RegistryError::SystemNotFound(type_name::<S>()))?;
        system::downcast_mut::<S>(&mut *self.systems[position].1)
            .ok_or(RegistryError::SystemNotFound(type_name::<S>()))
    }

    /// Iterates registered systems in registration order.
    pub fn systems(&self) -> impl Iterator<Item = &dyn System> + '_ {
        self.systems.iter().map(|(_, system)| &**system)
    }

    fn system_position<S: System>(&self) -> Option<usize> {
        let key = TypeId::of::<S>();
        self.systems.iter().position(|(id, _)| *id == key)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_valid_config(RegistryConfig::default())
    }
}

fn missing<C: Component>(entity: Entity) -> RegistryError {
    RegistryError::MissingComponent {
        entity: entity.id(),
        component: type_name::<C>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::SystemBase;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Position(i32, i32);
    impl Component for Position {}

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Velocity(i32, i32);
    impl Component for Velocity {}

    struct Mover {
        base: SystemBase,
    }

    impl Mover {
        fn new(types: &mut ComponentTypes) -> RegistryResult<Self> {
            let mut base = SystemBase::new();
            base.require_component::<Position>(types)?
                .require_component::<Velocity>(types)?;
            Ok(Self { base })
        }
    }

    impl System for Mover {
        fn base(&self) -> &SystemBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SystemBase {
            &mut self.base
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = Registry::default();
        assert_eq!(registry.entity_count(), 0);
        assert_eq!(registry.alive_count(), 0);
        assert!(Registry::new(RegistryConfig {
            max_component_types: 0,
            ..RegistryConfig::default()
        })
        .is_err());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut registry = Registry::default();
        let a = registry.create_entity();
        let b = registry.create_entity();
        registry.kill_entity(a);
        let c = registry.create_entity();

        assert_eq!((a.id(), b.id(), c.id()), (0, 1, 2));
        assert_eq!(registry.entity_count(), 3);
        assert_eq!(registry.alive_count(), 2);
    }

    #[test]
    fn test_add_get_component() {
        let mut registry = Registry::default();
        let entity = registry.create_entity();
        registry.add_component(entity, Position(1, 2)).unwrap();

        assert!(registry.has_component::<Position>(entity));
        assert!(!registry.has_component::<Velocity>(entity));
        assert_eq!(registry.get_component::<Position>(entity).unwrap(), &Position(1, 2));

        registry.get_component_mut::<Position>(entity).unwrap().0 = 9;
        assert_eq!(registry.get_component::<Position>(entity).unwrap(), &Position(9, 2));
    }

    #[test]
    fn test_get_missing_component_fails_loudly() {
        let mut registry = Registry::default();
        let entity = registry.create_entity();

        let err = registry.get_component::<Position>(entity).unwrap_err();
        assert!(matches!(err, RegistryError::MissingComponent { entity: 0, .. }));

        registry.add_component(entity, Position(1, 1)).unwrap();
        registry.remove_component::<Position>(entity);
        assert!(registry.get_component::<Position>(entity).is_err());
    }

    #[test]
    fn test_unknown_and_dead_entities() {
        let mut registry = Registry::default();
        let ghost = Entity::from_raw(42);
        assert_eq!(
            registry.add_component(ghost, Position(0, 0)),
            Err(RegistryError::UnknownEntity(42))
        );
        assert!(!registry.has_component::<Position>(ghost));

        let entity = registry.create_entity();
        registry.kill_entity(entity);
        assert_eq!(
            registry.add_component(entity, Position(0, 0)),
            Err(RegistryError::DeadEntity(0))
        );
    }

    #[test]
    fn test_pool_grows_to_entity_count() {
        let mut registry = Registry::new(RegistryConfig {
            initial_pool_capacity: 2,
            ..RegistryConfig::default()
        })
        .unwrap();

        let entities: Vec<Entity> = (0..5).map(|_| registry.create_entity()).collect();
        registry.add_component(entities[4], Position(4, 4)).unwrap();
        assert_eq!(registry.pool::<Position>().unwrap().len(), 5);

        for _ in 0..3 {
            registry.create_entity();
        }
        // In-range slot: no growth.
        registry.add_component(entities[0], Position(0, 0)).unwrap();
        assert_eq!(registry.pool::<Position>().unwrap().len(), 5);
    }

    #[test]
    fn test_component_type_limit() {
        let mut registry = Registry::new(RegistryConfig {
            max_component_types: 1,
            ..RegistryConfig::default()
        })
        .unwrap();
        let entity = registry.create_entity();
        registry.add_component(entity, Position(0, 0)).unwrap();

        let err = registry.add_component(entity, Velocity(0, 0)).unwrap_err();
        assert!(matches!(err, RegistryError::TooManyComponentTypes { capacity: 1, .. }));
        assert!(!registry.has_component::<Velocity>(entity));
        assert!(registry.has_component::<Position>(entity));
    }

    #[test]
    fn test_system_management() {
        let mut registry = Registry::default();
        assert!(!registry.has_system::<Mover>());
        assert!(matches!(
            registry.get_system::<Mover>(),
            Err(RegistryError::SystemNotFound(_))
        ));

        registry.add_system(Mover::new).unwrap();
        assert!(registry.has_system::<Mover>());
        assert_eq!(registry.get_system::<Mover>().unwrap().signature().len(), 2);
        assert!(matches!(
            registry.add_system(Mover::new),
            Err(RegistryError::DuplicateSystem(_))
        ));

        assert!(registry.remove_system::<Mover>());
        assert!(!registry.remove_system::<Mover>());
        assert_eq!(registry.systems().count(), 0);
    }

    #[test]
    fn test_update_matches_and_kills() {
        let mut registry = Registry::default();
        registry.add_system(Mover::new).unwrap();

        let entity = registry.create_entity();
        registry.add_component(entity, Position(0, 0)).unwrap();
        registry.add_component(entity, Velocity(1, 0)).unwrap();
        assert_eq!(registry.pending_additions().collect::<Vec<_>>(), vec![entity]);
        assert!(registry.get_system::<Mover>().unwrap().members().is_empty());

        registry.update();
        assert_eq!(registry.get_system::<Mover>().unwrap().members(), &[entity]);
        assert_eq!(registry.pending_additions().count(), 0);

        registry.kill_entity(entity);
        assert!(!registry.has_component::<Position>(entity));
        assert_eq!(registry.pending_removals().collect::<Vec<_>>(), vec![entity]);
        // Still listed until the next update.
        assert_eq!(registry.get_system::<Mover>().unwrap().members(), &[entity]);

        registry.update();
        assert!(registry.get_system::<Mover>().unwrap().members().is_empty());
    }

    #[test]
    fn test_killed_before_update_never_joins() {
        let mut registry = Registry::default();
        registry.add_system(Mover::new).unwrap();

        let entity = registry.create_entity();
        registry.add_component(entity, Position(0, 0)).unwrap();
        registry.add_component(entity, Velocity(0, 0)).unwrap();
        registry.kill_entity(entity);
        registry.update();

        assert!(registry.get_system::<Mover>().unwrap().members().is_empty());
    }

    #[test]
    fn test_component_changes_rematch_active_entity() {
        let mut registry = Registry::default();
        registry.add_system(Mover::new).unwrap();

        let entity = registry.create_entity();
        registry.add_component(entity, Position(0, 0)).unwrap();
        registry.add_component(entity, Velocity(1, 1)).unwrap();
        registry.update();

        registry.remove_component::<Velocity>(entity);
        assert_eq!(registry.pending_resyncs().collect::<Vec<_>>(), vec![entity]);
        assert_eq!(registry.get_system::<Mover>().unwrap().members(), &[entity]);

        registry.update();
        assert!(registry.get_system::<Mover>().unwrap().members().is_empty());
        assert_eq!(registry.pending_resyncs().count(), 0);

        registry.add_component(entity, Velocity(2, 2)).unwrap();
        registry.update();
        assert_eq!(registry.get_system::<Mover>().unwrap().members(), &[entity]);
    }

    #[test]
    fn test_unchanged_signature_keeps_single_membership() {
        let mut registry = Registry::default();
        registry.add_system(Mover::new).unwrap();

        let entity = registry.create_entity();
        registry.add_component(entity, Position(0, 0)).unwrap();
        registry.add_component(entity, Velocity(0, 0)).unwrap();
        registry.update();

        // Replacing a value leaves the signature alone.
        registry.add_component(entity, Velocity(5, 5)).unwrap();
        assert_eq!(registry.pending_resyncs().count(), 0);

        registry.remove_component::<Velocity>(entity);
        registry.add_component(entity, Velocity(6, 6)).unwrap();
        registry.update();

        // Net signature unchanged: still exactly one membership.
        assert_eq!(registry.get_system::<Mover>().unwrap().members(), &[entity]);
    }

    #[test]
    fn test_pending_entity_is_not_resynced() {
        let mut registry = Registry::default();
        let entity = registry.create_entity();
        registry.add_component(entity, Position(0, 0)).unwrap();

        assert_eq!(registry.pending_additions().collect::<Vec<_>>(), vec![entity]);
        assert_eq!(registry.pending_resyncs().count(), 0);
    }

    #[test]
    fn test_entity_ids_exhausted() {
        let mut registry = Registry::default();
        registry.next_id = u32::MAX;

        assert_eq!(
            registry.try_create_entity(),
            Err(RegistryError::EntityIdsExhausted { issued: u32::MAX })
        );
        assert_eq!(registry.next_id, u32::MAX);
        assert_eq!(registry.pending_additions().count(), 0);
    }

    #[test]
    #[should_panic(expected = "entity ids exhausted")]
    fn test_create_entity_panics_when_exhausted() {
        let mut registry = Registry::default();
        registry.next_id = u32::MAX;
        registry.create_entity();
    }

    #[test]
    fn test_entities_matching() {
        let mut registry = Registry::default();
        let a = registry.create_entity();
        let b = registry.create_entity();
        registry.add_component(a, Position(0, 0)).unwrap();
        registry.add_component(b, Position(0, 0)).unwrap();
        registry.add_component(b, Velocity(0, 0)).unwrap();

        let both = Signature::from_ids([
            registry.component_id::<Position>().unwrap(),
            registry.component_id::<Velocity>().unwrap(),
        ]);
        assert_eq!(registry.entities_matching(both).collect::<Vec<_>>(), vec![b]);
        assert_eq!(registry.entities_matching(Signature::EMPTY).count(), 2);
    }
}
