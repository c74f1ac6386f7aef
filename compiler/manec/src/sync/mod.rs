//! Shared-state primitives behind the package cache.

mod concurrent_map;
mod key_locks;

pub use concurrent_map::ConcurrentMap;
pub use key_locks::{KeyGuard, KeyLockTable};
