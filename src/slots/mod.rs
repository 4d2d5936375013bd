//! Slot storage: the contiguous buffer the map's entries live in.
//!
//! A [`Slot`] is a tagged record with exactly one of three inhabitants
//! (empty, tombstone, live). Rust's enums are already tagged unions, so
//! there is no separate tag-byte / payload-area split to hand-roll here.

#[cfg(test)]
mod tests;

/// One slot of the table.
#[derive(Debug, Clone)]
pub enum Slot<K, V> {
    /// Never occupied, or reset to this state by a rebuild/clear.
    Empty,
    /// Previously live, since removed. Not a match for any key, but does
    /// not terminate a probe.
    Tombstone,
    /// Holds a live entry.
    Live(K, V),
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self, Slot::Live(..))
    }

    #[inline]
    pub fn as_live(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Live(k, v) => Some((k, v)),
            _ => None,
        }
    }

    #[inline]
    pub fn as_live_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Live(k, v) => Some((k, v)),
            _ => None,
        }
    }
}

/// Contiguous storage for slots.
///
/// Length is fixed at construction; growing, shrinking, or purging
/// tombstones always goes through [`crate::controller::Controller`]
/// allocating a fresh `SlotBuffer` and discarding the old one — this
/// type itself never resizes in place.
pub struct SlotBuffer<K, V> {
    slots: Box<[Slot<K, V>]>,
}

impl<K, V> SlotBuffer<K, V> {
    /// Allocates a new, all-empty buffer of the given length.
    ///
    /// `length` must be a power of two; this is an invariant upheld by
    /// callers (the capacity ladder only ever produces powers of two),
    /// not re-validated here.
    pub fn new_empty(length: usize) -> Self {
        let mut slots = Vec::with_capacity(length);
        slots.resize_with(length, || Slot::Empty);
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Slot<K, V> {
        &self.slots[index]
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut Slot<K, V> {
        &mut self.slots[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, slot: Slot<K, V>) -> Slot<K, V> {
        std::mem::replace(&mut self.slots[index], slot)
    }

    /// Resets every slot to `Empty` without changing the length.
    pub fn fill_empty(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot<K, V>> {
        self.slots.iter()
    }
}

impl<K: Clone, V: Clone> Clone for SlotBuffer<K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<K, V> IntoIterator for SlotBuffer<K, V> {
    type Item = Slot<K, V>;
    type IntoIter = std::vec::IntoIter<Slot<K, V>>;

    /// Consumes the buffer, yielding every slot by value. Used by a
    /// rebuild to move live entries into a fresh buffer without cloning
    /// keys or values.
    fn into_iter(self) -> Self::IntoIter {
        Vec::from(self.slots).into_iter()
    }
}
