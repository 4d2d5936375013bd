//! The allocator abstraction the core depends on.
//!
//! The core goes through *some* abstraction for allocate/reallocate/free
//! of the slot buffer rather than calling the global allocator directly
//! — that is what lets a rebuild's failure be reported as
//! [`crate::error::MapError::AllocationFailed`] instead of aborting the
//! process.

use crate::error::MapError;
use crate::slots::SlotBuffer;

/// Produces a fresh, all-empty [`SlotBuffer`] of a requested length.
///
/// Implementations may fail (e.g. a test double simulating exhaustion);
/// a failure must not be confused with [`MapError::CapacityExhausted`],
/// which is raised by the Controller *before* ever calling the
/// allocator, when the target class would exceed the capacity ladder.
pub trait SlotAllocator<K, V> {
    fn allocate(&self, length: usize) -> Result<SlotBuffer<K, V>, MapError>;
}

/// The allocator every [`crate::map::Map`] uses unless a caller supplies
/// a different one: backed by the global allocator via `Box<[_]>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAllocator;

impl<K, V> SlotAllocator<K, V> for DefaultAllocator {
    fn allocate(&self, length: usize) -> Result<SlotBuffer<K, V>, MapError> {
        Ok(SlotBuffer::new_empty(length))
    }
}
