//! The probe engine: given a key and a slot buffer, resolves where that
//! key lives or where it should be inserted.
//!
//! Probing is linear, step 1, wrapping modulo the buffer length. The
//! home index is `hash(key) & (length - 1)`, which only works because
//! every length on the capacity ladder is a power of two.
//!
//! Hashing and equality are both structural: `K: Hash + Eq`. Rust's
//! derived `Hash`/`Eq` already walk every field of a composite key and
//! every variant (including the discriminant) of a sum-type key, so
//! there is no hand-rolled byte-serializer here. Float-like keys are
//! rejected at the type layer: `f32`/`f64` do not implement `Eq`, so a
//! map over them fails to type-check rather than misbehaving at runtime.

#[cfg(test)]
mod tests;

use std::hash::{BuildHasher, Hash};

use crate::slots::{Slot, SlotBuffer};

/// Result of probing for a key.
pub enum ProbeResult {
    /// The key is present at this index.
    Found(usize),
    /// The key is absent; this is where it should be inserted (either a
    /// reclaimed tombstone or a fresh empty slot).
    Insert(usize),
    /// The probe walked the whole table without finding an empty slot
    /// or the key — the table is structurally full.
    Full,
}

/// Computes `hash(key) & (length - 1)`, the home index for `key` in a
/// buffer of the given power-of-two `length`.
#[inline]
pub fn home_index<K: Hash, S: BuildHasher>(key: &K, length: usize, hasher: &S) -> usize {
    let h = hasher.hash_one(key);
    (h as usize) & (length - 1)
}

/// Finds the slot holding `key`, or the slot at which it should be
/// inserted.
///
/// Walks at most `length + 1` steps. Prefers the first tombstone seen
/// over the terminating empty slot as the insertion site, bounding
/// probe-chain growth across repeated insert/remove churn.
pub fn find_or_insert_slot<K, V, S>(buf: &SlotBuffer<K, V>, key: &K, hasher: &S) -> ProbeResult
where
    K: Hash + Eq,
    S: BuildHasher,
{
    let length = buf.len();
    debug_assert!(length.is_power_of_two());

    let mut index = home_index(key, length, hasher);
    let mut first_tombstone: Option<usize> = None;

    for _ in 0..=length {
        match buf.get(index) {
            Slot::Empty => {
                return ProbeResult::Insert(first_tombstone.unwrap_or(index));
            }
            Slot::Tombstone => {
                if first_tombstone.is_none() {
                    first_tombstone = Some(index);
                }
            }
            Slot::Live(k, _) => {
                if k == key {
                    return ProbeResult::Found(index);
                }
            }
        }
        index = (index + 1) & (length - 1);
    }

    match first_tombstone {
        Some(idx) => ProbeResult::Insert(idx),
        None => ProbeResult::Full,
    }
}

/// Finds the slot holding `key`, for read-only lookups (`get`, `contains`,
/// `remove`). Does not report a reclaimable tombstone, since lookups
/// never insert.
pub fn find_slot<K, V, S>(buf: &SlotBuffer<K, V>, key: &K, hasher: &S) -> Option<usize>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    let length = buf.len();
    debug_assert!(length.is_power_of_two());

    let mut index = home_index(key, length, hasher);

    for _ in 0..=length {
        match buf.get(index) {
            Slot::Empty => return None,
            Slot::Live(k, _) if k == key => return Some(index),
            _ => {}
        }
        index = (index + 1) & (length - 1);
    }
    None
}

/// Insert-only probe used by rebuilds: the target buffer is freshly
/// allocated and empty, so there are no tombstones to reclaim and the
/// source keys are already known unique, meaning this never needs to
/// report `Found`.
pub fn insert_only_slot<K, V, S>(buf: &SlotBuffer<K, V>, key: &K, hasher: &S) -> Option<usize>
where
    K: Hash,
    S: BuildHasher,
{
    let length = buf.len();
    debug_assert!(length.is_power_of_two());

    let mut index = home_index(key, length, hasher);
    for _ in 0..=length {
        if buf.get(index).is_empty() {
            return Some(index);
        }
        index = (index + 1) & (length - 1);
    }
    None
}
