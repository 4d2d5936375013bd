//! The public map protocol: `Map<K, V, S, A>`, the type every other
//! module exists to support.
//!
//! Mutations that can add a live entry (`put`, `put_no_clobber`,
//! `fetch_put`, `get_or_insert`) run through [`Controller::gate_before_insert`]
//! before the probe runs, so the table is never probed at a capacity it's
//! about to outgrow. Mutations that cannot grow the live count (`update`,
//! `remove`, `get`, `contains`, `fetch_remove`) skip the gate entirely.

#[cfg(test)]
mod tests;

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use tracing::trace;

use crate::alloc::{DefaultAllocator, SlotAllocator};
use crate::capacity::length_for_class;
use crate::controller::Controller;
use crate::error::MapError;
use crate::iter::Iter;
use crate::probe::{find_or_insert_slot, find_slot, ProbeResult};
use crate::slots::{Slot, SlotBuffer};

/// A self-rebuilding, open-addressed hash map.
///
/// `S` is the hasher builder (defaults to [`RandomState`], like
/// `std::collections::HashMap`) and `A` is the slot allocator (defaults
/// to [`DefaultAllocator`]). Both are swappable for callers who need a
/// deterministic hasher (tests) or a custom allocation strategy.
pub struct Map<K, V, S = RandomState, A = DefaultAllocator> {
    buf: SlotBuffer<K, V>,
    controller: Controller,
    hasher: S,
    allocator: A,
}

/// The result of [`Map::get_or_insert`]: either the entry already exists,
/// or a reserved, not-yet-written slot is handed back.
///
/// Rather than exposing a handle that can be read before it's written,
/// `Vacant` can only be turned into a `&mut V` by writing through it first.
pub enum OccupiedOrVacant<'a, K, V> {
    Occupied(&'a mut V),
    Vacant(VacantSlot<'a, K, V>),
}

/// A reserved-but-unwritten slot. The only way to get a `&mut V` out of
/// one is [`VacantSlot::insert`], which performs the write.
pub struct VacantSlot<'a, K, V> {
    slot: &'a mut Slot<K, V>,
    key: K,
    reclaimed_tombstone: bool,
    controller: &'a mut Controller,
}

impl<'a, K, V> VacantSlot<'a, K, V> {
    /// Writes `value` into the reserved slot and returns a mutable
    /// reference to it. There is no reachable path that reads the slot
    /// before this call.
    pub fn insert(self, value: V) -> &'a mut V {
        *self.slot = Slot::Live(self.key, value);
        self.controller.note_insert(self.reclaimed_tombstone);
        match self.slot {
            Slot::Live(_, v) => v,
            _ => unreachable!("just wrote Slot::Live above"),
        }
    }
}

impl<K, V> Map<K, V, RandomState, DefaultAllocator> {
    /// Builds an empty map at capacity class 0 (8 slots), using the
    /// default hasher and allocator.
    pub fn new() -> Self {
        Self::with_hasher_and_allocator(RandomState::new(), DefaultAllocator)
    }
}

impl<K, V> Default for Map<K, V, RandomState, DefaultAllocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Map<K, V, S, DefaultAllocator>
where
    S: BuildHasher,
{
    /// Builds an empty map using the given hasher and the default
    /// allocator. Useful for deterministic-hash tests or alternative
    /// mixers — the hash function is an interchangeable collaborator,
    /// not baked into the map's logic.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_hasher_and_allocator(hasher, DefaultAllocator)
    }
}

impl<K, V, S, A> Map<K, V, S, A>
where
    S: BuildHasher,
    A: SlotAllocator<K, V>,
{
    /// Builds an empty map using the given hasher and allocator.
    ///
    /// Panics if the allocator refuses the initial 8-slot buffer — a
    /// fresh, unconditional construction failing is treated the same way
    /// `Vec::new`'s implicit allocations are: not a recoverable map-level
    /// error, since there is no prior map state to roll back to.
    pub fn with_hasher_and_allocator(hasher: S, allocator: A) -> Self {
        let buf = allocator
            .allocate(length_for_class(0) as usize)
            .expect("class-0 allocation failed during map construction");
        Self {
            buf,
            controller: Controller::new(),
            hasher,
            allocator,
        }
    }

    /// Number of live entries. Aliased as [`Map::len`] for ecosystem
    /// conformance; `count` is this type's primary name for it.
    #[inline]
    pub fn count(&self) -> usize {
        self.controller.live() as usize
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Current slot-array length (`LADDER[capacity_class]`).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.controller.capacity() as usize
    }

    #[inline]
    pub(crate) fn capacity_class(&self) -> usize {
        self.controller.capacity_class()
    }

    #[inline]
    pub(crate) fn tombstones(&self) -> usize {
        self.controller.tombstones() as usize
    }

    /// Insert-or-replace. Returns nothing: callers who need the
    /// previous value should use [`Map::fetch_put`].
    pub fn put(&mut self, key: K, value: V) -> Result<(), MapError>
    where
        K: Hash + Eq,
    {
        self.fetch_put(key, value).map(|_| ())
    }

    /// Insert-or-replace, returning the previous value if the key was
    /// already present.
    pub fn fetch_put(&mut self, key: K, value: V) -> Result<Option<V>, MapError>
    where
        K: Hash + Eq,
    {
        self.controller
            .gate_before_insert(&mut self.buf, &self.hasher, &self.allocator)?;
        match find_or_insert_slot(&self.buf, &key, &self.hasher) {
            ProbeResult::Found(idx) => {
                let prev = self.buf.set(idx, Slot::Live(key, value));
                match prev {
                    Slot::Live(_, v) => Ok(Some(v)),
                    _ => unreachable!("probe reported Found at a non-live slot"),
                }
            }
            ProbeResult::Insert(idx) => {
                let reclaimed_tombstone = self.buf.get(idx).is_tombstone();
                self.buf.set(idx, Slot::Live(key, value));
                self.controller.note_insert(reclaimed_tombstone);
                Ok(None)
            }
            ProbeResult::Full => {
                unreachable!("gate_before_insert keeps load under the ceiling")
            }
        }
    }

    /// Insert only if the key is absent; a no-op otherwise.
    pub fn put_no_clobber(&mut self, key: K, value: V) -> Result<(), MapError>
    where
        K: Hash + Eq,
    {
        self.controller
            .gate_before_insert(&mut self.buf, &self.hasher, &self.allocator)?;
        match find_or_insert_slot(&self.buf, &key, &self.hasher) {
            ProbeResult::Found(_) => Ok(()),
            ProbeResult::Insert(idx) => {
                let reclaimed_tombstone = self.buf.get(idx).is_tombstone();
                self.buf.set(idx, Slot::Live(key, value));
                self.controller.note_insert(reclaimed_tombstone);
                Ok(())
            }
            ProbeResult::Full => {
                unreachable!("gate_before_insert keeps load under the ceiling")
            }
        }
    }

    /// Insert like [`Map::put`], but never resizes the table: returns
    /// `false` (and leaves the map untouched) if the table is
    /// structurally full instead of growing.
    pub fn put_assume_capacity(&mut self, key: K, value: V) -> bool
    where
        K: Hash + Eq,
    {
        match find_or_insert_slot(&self.buf, &key, &self.hasher) {
            ProbeResult::Found(idx) => {
                self.buf.set(idx, Slot::Live(key, value));
                true
            }
            ProbeResult::Insert(idx) => {
                let reclaimed_tombstone = self.buf.get(idx).is_tombstone();
                self.buf.set(idx, Slot::Live(key, value));
                self.controller.note_insert(reclaimed_tombstone);
                true
            }
            ProbeResult::Full => false,
        }
    }

    /// Replace the value for an existing key only. Returns `false`
    /// (and does not insert) when the key is absent.
    pub fn update(&mut self, key: K, value: V) -> bool
    where
        K: Hash + Eq,
    {
        match find_slot(&self.buf, &key, &self.hasher) {
            Some(idx) => {
                self.buf.set(idx, Slot::Live(key, value));
                true
            }
            None => false,
        }
    }

    /// Reserve a slot for `key`, returning either the existing entry or
    /// a handle that must be written through to complete the insert.
    pub fn get_or_insert(&mut self, key: K) -> Result<OccupiedOrVacant<'_, K, V>, MapError>
    where
        K: Hash + Eq,
    {
        self.controller
            .gate_before_insert(&mut self.buf, &self.hasher, &self.allocator)?;
        match find_or_insert_slot(&self.buf, &key, &self.hasher) {
            ProbeResult::Found(idx) => {
                let (_, v) = self
                    .buf
                    .get_mut(idx)
                    .as_live_mut()
                    .expect("probe reported Found at a non-live slot");
                Ok(OccupiedOrVacant::Occupied(v))
            }
            ProbeResult::Insert(idx) => {
                let reclaimed_tombstone = self.buf.get(idx).is_tombstone();
                let slot = self.buf.get_mut(idx);
                Ok(OccupiedOrVacant::Vacant(VacantSlot {
                    slot,
                    key,
                    reclaimed_tombstone,
                    controller: &mut self.controller,
                }))
            }
            ProbeResult::Full => {
                unreachable!("gate_before_insert keeps load under the ceiling")
            }
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: Hash + Eq,
    {
        let idx = find_slot(&self.buf, key, &self.hasher)?;
        self.buf.get(idx).as_live().map(|(_, v)| v)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Hash + Eq,
    {
        let idx = find_slot(&self.buf, key, &self.hasher)?;
        self.buf.get_mut(idx).as_live_mut().map(|(_, v)| v)
    }

    /// Lookup returning both the stored key and value.
    pub fn get_entry(&self, key: &K) -> Option<(&K, &V)>
    where
        K: Hash + Eq,
    {
        let idx = find_slot(&self.buf, key, &self.hasher)?;
        self.buf.get(idx).as_live()
    }

    pub fn contains(&self, key: &K) -> bool
    where
        K: Hash + Eq,
    {
        find_slot(&self.buf, key, &self.hasher).is_some()
    }

    /// Delete. Returns `false` if the key was absent. Does not shift
    /// any other entry; the vacated slot becomes a tombstone until a
    /// rebuild.
    pub fn remove(&mut self, key: &K) -> bool
    where
        K: Hash + Eq,
    {
        self.fetch_remove(key).is_some()
    }

    /// Delete, returning the removed value if the key was present.
    pub fn fetch_remove(&mut self, key: &K) -> Option<V>
    where
        K: Hash + Eq,
    {
        let idx = find_slot(&self.buf, key, &self.hasher)?;
        let removed = self.buf.set(idx, Slot::Tombstone);
        self.controller.note_remove();
        trace!(tombstones = self.controller.tombstones(), "slot vacated");
        match removed {
            Slot::Live(_, v) => Some(v),
            _ => unreachable!("find_slot only resolves live slots"),
        }
    }

    /// Resets every slot to empty, keeping the current capacity class.
    pub fn clear_retain_capacity(&mut self) {
        self.controller.clear_retain_capacity(&mut self.buf);
    }

    /// Releases the current buffer and replaces it with a fresh
    /// class-0 (8-slot) buffer.
    pub fn clear_and_release(&mut self) -> Result<(), MapError> {
        self.controller.clear_and_release(&mut self.buf, &self.allocator)
    }

    /// Raises the capacity class, if needed, so that `target` further
    /// distinct-key inserts succeed without triggering another grow. A
    /// no-op if the current class already covers it.
    pub fn ensure_capacity(&mut self, target: usize) -> Result<(), MapError> {
        self.controller
            .ensure_capacity(&mut self.buf, target as u64, &self.hasher, &self.allocator)
    }

    /// Shrinks the table if `live < 0.4 * length`; a no-op otherwise.
    pub fn reduce_memory(&mut self) -> Result<(), MapError> {
        self.controller
            .reduce_memory(&mut self.buf, &self.hasher, &self.allocator)
    }

    /// A cursor over every live `(key, value)` pair, in slot-array order
    /// (arbitrary and unstable across mutations).
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.buf)
    }
}

impl<'a, K, V, S, A> IntoIterator for &'a Map<K, V, S, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S, A> Clone for Map<K, V, S, A>
where
    K: Clone,
    V: Clone,
    S: Clone,
    A: Clone,
{
    /// Deep copy: an independently owned buffer, counters, hasher, and
    /// allocator. Mutating the clone never affects `self` or vice versa.
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
            controller: self.controller.clone(),
            hasher: self.hasher.clone(),
            allocator: self.allocator.clone(),
        }
    }
}

impl<K, V, S, A> fmt::Debug for Map<K, V, S, A>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    /// Prints only live entries — tombstones and empties are internal
    /// bookkeeping, not part of the map's logical contents.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buf.iter().filter_map(|slot| slot.as_live()))
            .finish()
    }
}

impl<K, V, S, A> FromIterator<(K, V)> for Map<K, V, S, A>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
    A: SlotAllocator<K, V> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::with_hasher_and_allocator(S::default(), A::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S, A> Extend<(K, V)> for Map<K, V, S, A>
where
    K: Hash + Eq,
    S: BuildHasher,
    A: SlotAllocator<K, V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v).expect("capacity exhausted while extending map");
        }
    }
}
