//! # Component Types
//!
//! Components are plain data records with no behavior. Each distinct
//! component type is given a dense [`ComponentId`] the first time a registry
//! sees it; that id is both its signature bit and its pool index.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::signature::{ComponentId, SIGNATURE_BITS};
use crate::error::{RegistryError, RegistryResult};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Default`: pool slots that were never written hold the default value
/// - `'static`: the type is identified by its [`TypeId`]
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Debug, Default)]
/// struct Health(u32);
///
/// impl Component for Health {}
/// ```
pub trait Component: Default + 'static {}

/// Allocator of component ids, owned by a single registry.
///
/// Ids are handed out in first-seen order starting at zero and never change
/// for the lifetime of this value. Two registries have independent id spaces.
#[derive(Debug)]
pub struct ComponentTypes {
    ids: HashMap<TypeId, ComponentId>,
    /// Type name per allocated id, for diagnostics.
    names: Vec<&'static str>,
    capacity: usize,
}

impl ComponentTypes {
    /// Creates an allocator accepting at most `capacity` component types.
    ///
    /// `capacity` is clamped to [`SIGNATURE_BITS`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
            capacity: capacity.min(SIGNATURE_BITS),
        }
    }

    /// Returns the id for `T`, allocating the next free id on first use.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TooManyComponentTypes`] when `T` is new and
    /// every id is already taken.
    pub fn id_of<T: Component>(&mut self) -> RegistryResult<ComponentId> {
        if let Some(&id) = self.ids.get(&TypeId::of::<T>()) {
            return Ok(id);
        }

        let next = self.names.len();
        if next >= self.capacity {
            return Err(RegistryError::TooManyComponentTypes {
                type_name: type_name::<T>(),
                capacity: self.capacity,
            });
        }

        // capacity never exceeds SIGNATURE_BITS
        #[allow(clippy::cast_possible_truncation)]
        let id = ComponentId::new(next as u8);
        self.ids.insert(TypeId::of::<T>(), id);
        self.names.push(type_name::<T>());
        tracing::debug!(component = type_name::<T>(), id = id.get(), "component type registered");
        Ok(id)
    }

    /// Returns the id for `T` if it has been allocated.
    #[inline]
    #[must_use]
    pub fn lookup<T: Component>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Returns the type name registered under `id`.
    #[must_use]
    pub fn name(&self, id: ComponentId) -> Option<&'static str> {
        self.names.get(id.index()).copied()
    }

    /// Number of allocated ids.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no id has been allocated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Maximum number of ids this allocator hands out.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct A;
    #[derive(Default)]
    struct B;
    #[derive(Default)]
    struct C;

    impl Component for A {}
    impl Component for B {}
    impl Component for C {}

    #[test]
    fn test_ids_are_stable() {
        let mut types = ComponentTypes::new(8);
        let a = types.id_of::<A>().unwrap();
        let b = types.id_of::<B>().unwrap();

        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
        assert_eq!(types.id_of::<A>().unwrap(), a);
        assert_eq!(types.lookup::<B>(), Some(b));
        assert_eq!(types.len(), 2);
    }

    #[test]
    fn test_lookup_does_not_allocate() {
        let types = ComponentTypes::new(8);
        assert_eq!(types.lookup::<A>(), None);
        assert!(types.is_empty());
    }

    #[test]
    fn test_independent_id_spaces() {
        let mut first = ComponentTypes::new(8);
        let mut second = ComponentTypes::new(8);
        first.id_of::<A>().unwrap();

        assert_eq!(second.id_of::<B>().unwrap().get(), 0);
        assert_eq!(first.id_of::<B>().unwrap().get(), 1);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut types = ComponentTypes::new(2);
        types.id_of::<A>().unwrap();
        types.id_of::<B>().unwrap();

        let err = types.id_of::<C>().unwrap_err();
        assert!(matches!(err, RegistryError::TooManyComponentTypes { capacity: 2, .. }));
        // Existing ids survive the failure.
        assert_eq!(types.id_of::<A>().unwrap().get(), 0);
        assert_eq!(types.len(), 2);
    }

    #[test]
    fn test_names() {
        let mut types = ComponentTypes::new(4);
        let id = types.id_of::<C>().unwrap();
        assert!(types.name(id).unwrap().ends_with("::C"));
    }
}
