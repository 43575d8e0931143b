//! # Component Storage
//!
//! Growable, entity-indexed component storage.
//!
//! The storage uses a direct-index strategy:
//! - Slot index == entity id, no packing or indirection
//! - Access is O(1) via entity index
//! - Slots of entities without the component hold filler values; the entity
//!   signature, not the pool, says which slots are meaningful
//!
//! The registry keeps pools of many component types in one collection through
//! the [`ErasedPool`] trait and recovers the concrete [`ComponentPool`] with a
//! checked downcast.

use std::any::{type_name, Any};

use super::component::Component;
use super::signature::ComponentId;

/// Type-erased view of a [`ComponentPool`].
pub trait ErasedPool: Any {
    /// Component id the pool was created for.
    fn component_id(&self) -> ComponentId;

    /// Name of the stored component type.
    fn component_name(&self) -> &'static str;

    /// Number of slots.
    fn len(&self) -> usize;

    /// Returns `true` if the pool has no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every slot.
    fn clear(&mut self);

    /// Upcast for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Storage for a single component type, indexed by entity id.
///
/// # Type Parameters
///
/// * `C` - The component type to store
///
/// # Example
///
/// ```rust,ignore
/// let mut pool: ComponentPool<Transform> = ComponentPool::new(id, 100);
/// pool.set(7, Transform::default());
/// ```
#[derive(Debug)]
pub struct ComponentPool<C: Component> {
    /// The directly indexed array of components.
    data: Vec<C>,
    /// Id of `C` in the owning registry.
    id: ComponentId,
}

impl<C: Component> ComponentPool<C> {
    /// Creates a pool with `capacity` default-initialized slots.
    #[must_use]
    pub fn new(id: ComponentId, capacity: usize) -> Self {
        let mut data = Vec::new();
        data.resize_with(capacity, C::default);
        Self { data, id }
    }

    /// Grows the pool to at least `len` slots. Never shrinks.
    pub fn resize(&mut self, len: usize) {
        if len > self.data.len() {
            self.data.resize_with(len, C::default);
        }
    }

    /// Writes `component` at `index`, growing the pool to `index + 1` slots
    /// if needed. New filler slots hold `C::default()`.
    #[inline]
    pub fn set(&mut self, index: usize, component: C) {
        if index >= self.data.len() {
            self.resize(index + 1);
        }
        self.data[index] = component;
    }

    /// Appends a component after the last slot.
    #[inline]
    pub fn push(&mut self, component: C) {
        self.data.push(component);
    }

    /// Gets a component by entity index.
    ///
    /// Returns `None` only when `index` is out of bounds; an in-bounds slot
    /// may hold filler data.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.data.get(index)
    }

    /// Gets a mutable component by entity index.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.data.get_mut(index)
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the pool has no slots.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Removes every slot.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns all slots.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }
}

impl<C: Component> ErasedPool for ComponentPool<C> {
    fn component_id(&self) -> ComponentId {
        self.id
    }

    fn component_name(&self) -> &'static str {
        type_name::<C>()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn clear(&mut self) {
        self.data.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Recovers the typed pool behind an erased one.
pub(crate) fn downcast_ref<C: Component>(pool: &dyn ErasedPool) -> Option<&ComponentPool<C>> {
    pool.as_any().downcast_ref::<ComponentPool<C>>()
}

/// Recovers the typed pool behind an erased one, mutably.
pub(crate) fn downcast_mut<C: Component>(
    pool: &mut dyn ErasedPool,
) -> Option<&mut ComponentPool<C>> {
    pool.as_any_mut().downcast_mut::<ComponentPool<C>>()
}
