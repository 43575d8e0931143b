//! # Component Signatures
//!
//! A signature is a bitmask with one bit per registered component type.
//! Entities carry one describing what they have; systems carry one describing
//! what they need.

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Width of a [`Signature`] in bits, the hard upper bound on component types.
pub const SIGNATURE_BITS: usize = 64;

/// Dense identifier of a component type, doubling as its signature bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ComponentId(u8);

impl ComponentId {
    /// Creates a component id.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a signature.
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < SIGNATURE_BITS, "component id exceeds signature width");
        Self(index)
    }

    /// Returns the id as a bit / pool index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-width component bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Signature(u64);

impl Signature {
    /// The empty signature.
    pub const EMPTY: Self = Self(0);

    /// Creates an empty signature.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Builds a signature with the given ids set.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = ComponentId>) -> Self {
        let mut signature = Self::EMPTY;
        for id in ids {
            signature.set(id, true);
        }
        signature
    }

    /// Sets or clears the bit for `id`.
    #[inline]
    pub fn set(&mut self, id: ComponentId, value: bool) {
        let mask = 1u64 << id.index();
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Returns `true` if the bit for `id` is set.
    #[inline]
    #[must_use]
    pub const fn test(self, id: ComponentId) -> bool {
        (self.0 >> id.index()) & 1 == 1
    }

    /// Returns `true` if every bit of `required` is also set here.
    ///
    /// This is the interest test: `(self & required) == required`.
    #[inline]
    #[must_use]
    pub const fn contains_all(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Clears every bit.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Returns `true` if no bit is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of set bits.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the set component ids in ascending order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(self) -> impl Iterator<Item = ComponentId> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros();
            bits &= bits - 1;
            // trailing_zeros of a non-zero u64 is at most 63
            Some(ComponentId(index as u8))
        })
    }

    /// Returns the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }
}

impl BitAnd for Signature {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Signature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for Signature {
    /// Bit string, lowest id on the right.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_test() {
        let mut signature = Signature::new();
        assert!(!signature.test(ComponentId::new(5)));

        signature.set(ComponentId::new(5), true);
        assert!(signature.test(ComponentId::new(5)));

        signature.set(ComponentId::new(5), false);
        assert!(!signature.test(ComponentId::new(5)));
        assert!(signature.is_empty());
    }

    #[test]
    fn test_contains_all() {
        let required = Signature::from_ids([ComponentId::new(0), ComponentId::new(1)]);
        let full = Signature::from_ids([0, 1, 2].map(ComponentId::new));
        let partial = Signature::from_ids([ComponentId::new(0)]);

        assert!(full.contains_all(required));
        assert!(!partial.contains_all(required));
        assert_eq!(full & required, required);
        // The empty requirement matches everything.
        assert!(partial.contains_all(Signature::EMPTY));
    }

    #[test]
    fn test_highest_bit() {
        let top = ComponentId::new(63);
        let mut signature = Signature::new();
        signature.set(top, true);
        assert!(signature.test(top));
        assert_eq!(signature.iter().collect::<Vec<_>>(), vec![top]);
    }

    #[test]
    fn test_iter_and_display() {
        let signature = Signature::from_ids([3, 0, 1].map(ComponentId::new));
        let ids: Vec<u8> = signature.iter().map(ComponentId::get).collect();
        assert_eq!(ids, vec![0, 1, 3]);
        assert_eq!(signature.len(), 3);
        assert_eq!(signature.to_string(), "1011");
    }
}
