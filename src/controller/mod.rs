//! The resize controller: owns the live/tombstone counters and the
//! current capacity class, and decides when a rebuild is needed.
//!
//! Every mutation that can add a live entry calls [`Controller::gate_before_insert`]
//! first; it may rebuild the table before the mutation proceeds. Mutations
//! that cannot grow the live count (`update`, `remove`, `get`, `contains`,
//! `fetch_remove`) never call the gate.

#[cfg(test)]
mod tests;

use std::hash::{BuildHasher, Hash};

use tracing::{info, warn};

use crate::alloc::SlotAllocator;
use crate::capacity::{
    ensure_capacity_class, length_for_class, load_ceiling, shrink_target_class, MAX_CLASS,
    SHRINK_FLOOR_DEN, SHRINK_FLOOR_NUM,
};
use crate::error::MapError;
use crate::probe::insert_only_slot;
use crate::slots::{Slot, SlotBuffer};

/// Owns the counters and capacity class for one map instance.
#[derive(Debug, Clone)]
pub struct Controller {
    live: u64,
    tombstones: u64,
    capacity_class: usize,
}

impl Controller {
    pub const fn new() -> Self {
        Self {
            live: 0,
            tombstones: 0,
            capacity_class: 0,
        }
    }

    #[inline]
    pub fn live(&self) -> u64 {
        self.live
    }

    #[inline]
    pub fn tombstones(&self) -> u64 {
        self.tombstones
    }

    #[inline]
    pub fn capacity_class(&self) -> usize {
        self.capacity_class
    }

    #[inline]
    pub fn capacity(&self) -> u64 {
        length_for_class(self.capacity_class)
    }

    /// Records that a slot just became live. `reclaimed_tombstone` must be
    /// `true` when the slot being written was a `Slot::Tombstone` rather
    /// than empty, so the tombstone counter keeps tracking the number of
    /// tombstone slots actually present.
    #[inline]
    pub fn note_insert(&mut self, reclaimed_tombstone: bool) {
        self.live += 1;
        if reclaimed_tombstone {
            self.tombstones -= 1;
        }
    }

    /// Records that a live slot just became a tombstone.
    #[inline]
    pub fn note_remove(&mut self) {
        self.live -= 1;
        self.tombstones += 1;
    }

    /// The pre-insert gate: called before any mutation that can add a
    /// live entry.
    ///
    /// Checks the load ceiling first; only if it does not trigger does a
    /// tombstone-saturation rebuild get a chance to run. A rebuild
    /// triggered by tombstone pressure drops the capacity class by one
    /// (saturating at zero) *unless* the load ceiling alone would already
    /// have forced a higher class on this same call.
    pub fn gate_before_insert<K, V, S, A>(
        &mut self,
        buf: &mut SlotBuffer<K, V>,
        hasher: &S,
        allocator: &A,
    ) -> Result<(), MapError>
    where
        K: Hash,
        S: BuildHasher,
        A: SlotAllocator<K, V>,
    {
        let length = buf.len() as u64;

        if self.live > load_ceiling(length) {
            let target = self.capacity_class + 1;
            if target > MAX_CLASS {
                return Err(MapError::CapacityExhausted);
            }
            return self.rebuild_to(buf, target, hasher, allocator);
        }

        if self.tombstones > length {
            if self.tombstones > length.saturating_mul(2) {
                warn!(
                    tombstones = self.tombstones,
                    length, "tombstone saturation well past threshold; rebuilding"
                );
            }
            let target = self.capacity_class.saturating_sub(1);
            return self.rebuild_to(buf, target, hasher, allocator);
        }

        Ok(())
    }

    /// Explicit shrink (`reduce_memory`): a no-op unless `live < 0.4 * length`.
    pub fn reduce_memory<K, V, S, A>(
        &mut self,
        buf: &mut SlotBuffer<K, V>,
        hasher: &S,
        allocator: &A,
    ) -> Result<(), MapError>
    where
        K: Hash,
        S: BuildHasher,
        A: SlotAllocator<K, V>,
    {
        let length = buf.len() as u64;
        if self.live.saturating_mul(SHRINK_FLOOR_DEN) >= length.saturating_mul(SHRINK_FLOOR_NUM) {
            return Ok(());
        }
        let target = shrink_target_class(self.live);
        if target == self.capacity_class {
            return Ok(());
        }
        self.rebuild_to(buf, target, hasher, allocator)
    }

    /// `ensure_capacity(target)`: jumps directly to the smallest class
    /// whose length covers `target`, if higher than the current class.
    pub fn ensure_capacity<K, V, S, A>(
        &mut self,
        buf: &mut SlotBuffer<K, V>,
        target_len: u64,
        hasher: &S,
        allocator: &A,
    ) -> Result<(), MapError>
    where
        K: Hash,
        S: BuildHasher,
        A: SlotAllocator<K, V>,
    {
        let target_class = ensure_capacity_class(target_len);
        if target_class <= self.capacity_class {
            return Ok(());
        }
        self.rebuild_to(buf, target_class, hasher, allocator)
    }

    /// Resets every slot to empty, keeping the current capacity class.
    pub fn clear_retain_capacity<K, V>(&mut self, buf: &mut SlotBuffer<K, V>) {
        buf.fill_empty();
        self.live = 0;
        self.tombstones = 0;
    }

    /// Releases the current buffer and replaces it with a fresh
    /// class-0 (8-slot) buffer.
    pub fn clear_and_release<K, V, A>(
        &mut self,
        buf: &mut SlotBuffer<K, V>,
        allocator: &A,
    ) -> Result<(), MapError>
    where
        A: SlotAllocator<K, V>,
    {
        let new_buf = allocator.allocate(length_for_class(0) as usize)?;
        *buf = new_buf;
        self.live = 0;
        self.tombstones = 0;
        self.capacity_class = 0;
        Ok(())
    }

    /// Allocates a new buffer at `target_class`, moves every live entry
    /// across via an insert-only probe, and swaps it in.
    ///
    /// Strong exception safety: if the allocator refuses the new buffer,
    /// `buf` is restored untouched and the error is returned; the old
    /// buffer is only ever dropped once the new one has been fully
    /// populated.
    fn rebuild_to<K, V, S, A>(
        &mut self,
        buf: &mut SlotBuffer<K, V>,
        target_class: usize,
        hasher: &S,
        allocator: &A,
    ) -> Result<(), MapError>
    where
        K: Hash,
        S: BuildHasher,
        A: SlotAllocator<K, V>,
    {
        let target_class = target_class.min(MAX_CLASS);
        let new_length = length_for_class(target_class) as usize;

        let old = std::mem::replace(buf, SlotBuffer::new_empty(0));
        let mut new_buf = match allocator.allocate(new_length) {
            Ok(b) => b,
            Err(err) => {
                *buf = old;
                return Err(err);
            }
        };

        let mut moved = 0u64;
        for slot in old.into_iter() {
            if let Slot::Live(k, v) = slot {
                let idx = insert_only_slot(&new_buf, &k, hasher)
                    .expect("rebuild target undersized for its own live set");
                new_buf.set(idx, Slot::Live(k, v));
                moved += 1;
            }
        }
        debug_assert_eq!(moved, self.live);

        *buf = new_buf;
        self.tombstones = 0;
        let from_class = self.capacity_class;
        self.capacity_class = target_class;

        info!(
            from_class,
            to_class = target_class,
            live = self.live,
            new_length,
            "rebuilt slot table"
        );

        Ok(())
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Controller {
    /// Test-only backdoor: builds a `Controller` with an arbitrary
    /// capacity class and live count, decoupled from any real buffer.
    /// Used to exercise the top-of-ladder `CapacityExhausted` path
    /// without actually allocating a 2^44-slot buffer.
    pub(crate) fn at_capacity_class_for_test(capacity_class: usize, live: u64) -> Self {
        Self {
            live,
            tombstones: 0,
            capacity_class,
        }
    }
}
