//! Set-algebra combinators layered on [`crate::map::Map`] and
//! [`crate::iter::Iter`]: union, intersection, symmetric difference, and
//! relative complement.
//!
//! Each clones the map it needs a head start on (the larger of the two
//! for union/symmetric-difference, the smaller for intersection, always
//! `self` for relative complement) and then walks the *other* side's
//! live entries, bounding the work at `O(|smaller|)` lookups plus
//! `O(|larger|)` for the initial clone.


use std::hash::{BuildHasher, Hash};

use crate::alloc::SlotAllocator;
use crate::map::{Map, OccupiedOrVacant};

impl<K, V, S, A> Map<K, V, S, A>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
    A: SlotAllocator<K, V> + Clone,
{
    /// Union of `self` and `other`. When `self` is the smaller side, its
    /// entries win over `other`'s on overlapping keys, because the
    /// smaller side is what gets `put` into a clone of the larger —
    /// document this bias rather than special-casing it away.
    pub fn union(&self, other: &Self) -> Self {
        let (larger, smaller) = larger_first(self, other);
        let mut result = larger.clone();
        for (k, v) in smaller.iter() {
            result
                .put(k.clone(), v.clone())
                .expect("union: rebuilding past the capacity ladder's top class");
        }
        result
    }

    /// Keys present in both maps, with values taken from `self`.
    pub fn intersection(&self, other: &Self) -> Self {
        let (larger, smaller) = larger_first(self, other);
        let mut result = smaller.clone();
        for (k, _) in smaller.iter() {
            if !larger.contains(k) {
                result.remove(k);
            }
        }
        result
    }

    /// Keys present in exactly one of the two maps.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let (larger, smaller) = larger_first(self, other);
        let mut result = larger.clone();
        for (k, v) in smaller.iter() {
            let was_occupied = match result
                .get_or_insert(k.clone())
                .expect("symmetric_difference: rebuilding past the capacity ladder's top class")
            {
                OccupiedOrVacant::Occupied(_) => true,
                OccupiedOrVacant::Vacant(slot) => {
                    slot.insert(v.clone());
                    false
                }
            };
            if was_occupied {
                result.remove(k);
            }
        }
        result
    }

    /// Entries of `self` whose key is absent from `other` (`self \ other`).
    pub fn relative_complement(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (k, _) in self.iter() {
            if other.contains(k) {
                result.remove(k);
            }
        }
        result
    }
}

/// Returns `(larger, smaller)` by live-entry count, breaking ties by
/// treating `a` as the larger side.
fn larger_first<'a, K, V, S, A>(
    a: &'a Map<K, V, S, A>,
    b: &'a Map<K, V, S, A>,
) -> (&'a Map<K, V, S, A>, &'a Map<K, V, S, A>) {
    if a.count() >= b.count() {
        (a, b)
    } else {
        (b, a)
    }
}
