//! Shared test-only helpers: a deterministic `BuildHasher` so probe,
//! controller, and map tests can construct key collisions on demand
//! instead of hoping `RandomState` cooperates.

use std::hash::{BuildHasher, Hasher};
use tracing::Level;
use tracing_subscriber::fmt::Subscriber;

/// Installs a `tracing` subscriber at `TRACE` level for the current
/// test binary, once. `try_init` swallows the "already set" error so
/// every test can call this unconditionally.
pub fn init_tracing() {
    let _ = Subscriber::builder().with_max_level(Level::TRACE).try_init();
}

#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | b as u64;
        }
    }

    fn write_u32(&mut self, i: u32) {
        self.0 = i as u64;
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// A `BuildHasher` whose hash of an integer key is the key itself, so
/// `home_index` collisions can be constructed by picking keys that are
/// congruent modulo the table length.
#[derive(Default, Clone, Copy)]
pub struct IdentityBuildHasher;

impl BuildHasher for IdentityBuildHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> IdentityHasher {
        IdentityHasher::default()
    }
}
