//! Error types for the map core.
//!
//! The taxonomy is intentionally narrow: the core only ever fails in two
//! ways, both tied to a rebuild that the Controller decided it needed.
//! Every other "failure" (absent key, structural-full on an
//! assume-capacity insert, a no-op shrink) is a value, not an error — see
//! the return types on [`crate::map::Map`] rather than this enum.

use thiserror::Error;

/// Errors that can occur during map operations.
///
/// Both variants are terminal for the operation that raised them: the map
/// is left exactly as it was before the call (strong exception safety).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MapError {
    /// A grow would need to move past the top of the capacity ladder.
    #[error("capacity exhausted: table already at the top capacity class")]
    CapacityExhausted,

    /// The allocator refused to provide the buffer a rebuild needed.
    #[error("allocation failed: {0}")]
    AllocationFailed(String),
}
