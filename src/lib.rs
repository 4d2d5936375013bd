//! # phoenixmap
//!
//! A self-rebuilding, open-addressing hash map. Built for workloads that
//! mix reads, inserts, removals, and updates on small-to-medium working
//! sets — the kind of churn that leaves classical open-addressing
//! tables full of tombstones and degrading. `Map` rebuilds on tombstone
//! saturation as well as on load, so probe chains stay short under
//! sustained churn instead of only under steady growth.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Map<K, V, S, A>                  │
//! │  ┌────────────┐   ┌───────────────┐   ┌────────────────┐ │
//! │  │ Controller │──▶│  ProbeEngine  │──▶│   SlotBuffer   │ │
//! │  │ (counters, │   │ (probe chain, │   │ (fixed-layout  │ │
//! │  │  capacity  │   │  home index)  │   │  slot storage) │ │
//! │  │  class)    │   └───────────────┘   └────────────────┘ │
//! │  └────────────┘                                          │
//! │        ▲                                                 │
//! │        │ gate_before_insert / reduce_memory / rebuild     │
//! │        │                                                 │
//! │  ┌─────┴──────┐        ┌──────────┐     ┌──────────────┐ │
//! │  │SlotAllocator│       │   Iter   │     │ Combinators  │ │
//! │  │ (grow/shrink│       │ (live-   │     │ (union, ∩,   │ │
//! │  │  buffers)   │       │  slot    │     │  △, \)       │ │
//! │  └─────────────┘       │  cursor) │     └──────────────┘ │
//! │                        └──────────┘                      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`slots`] | The tagged-slot storage (`Empty` / `Tombstone` / `Live`) |
//! | [`probe`] | Linear-probe resolution: find, insert-site, insert-only |
//! | [`capacity`] | The power-of-two capacity ladder and its thresholds |
//! | [`controller`] | Live/tombstone counters, grow/rebuild/shrink decisions |
//! | [`alloc`] | The `SlotAllocator` abstraction rebuilds go through |
//! | [`map`] | The public `Map<K, V, S, A>` type and its operations |
//! | [`iter`] | The live-entry iteration cursor |
//! | [`combinators`] | Set algebra over two maps: union, ∩, △, \ |
//! | [`error`] | The two-variant error taxonomy (`MapError`) |
//!
//! ## Key properties
//!
//! - **Tombstone-aware rebuilds** — a table whose tombstone count
//!   exceeds its length rebuilds in place (at the current class, or one
//!   lower) to purge them, instead of letting probe chains grow
//!   unbounded under churn.
//! - **Strong allocation-failure guarantee** — every rebuild allocates
//!   the new buffer fully before releasing the old one; a failed
//!   allocation leaves the map exactly as it was.
//! - **Safe `get_or_insert`** — the reserve/fill split makes it
//!   impossible to read an uninitialized slot: see [`map::OccupiedOrVacant`].
//! - **Borrow-checker-enforced iterator invalidation** — `Iter<'_, K, V>`
//!   holds an immutable borrow, so no resizing mutation can run
//!   alongside a live iterator; this is checked at compile time, not
//!   left as documented UB.
//!
//! ## Quick start
//!
//! ```
//! use phoenixmap::map::Map;
//!
//! let mut m: Map<&str, i32> = Map::new();
//! m.put("a", 1).unwrap();
//! m.put("b", 2).unwrap();
//! assert_eq!(m.get(&"a"), Some(&1));
//! assert!(m.update("a", 10));
//! assert_eq!(m.fetch_put("b", 20).unwrap(), Some(2));
//! assert!(m.remove(&"a"));
//! assert_eq!(m.count(), 1);
//!
//! let other: Map<&str, i32> = [("b", 2), ("c", 3)].into_iter().collect();
//! let union = m.union(&other);
//! assert_eq!(union.count(), 2);
//! ```

#![allow(dead_code)]

pub mod alloc;
pub mod capacity;
pub mod combinators;
pub mod controller;
pub mod error;
pub mod iter;
pub mod map;
pub mod probe;
pub mod slots;

#[cfg(test)]
pub(crate) mod test_support;
