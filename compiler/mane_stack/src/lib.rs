//! On-demand stack growth for deep recursion.
//!
//! Type expressions nest (`map[string][]func() *chan T`) and interface
//! embedding chains can be arbitrarily long. Both are walked by plain
//! recursion, so every recursive step goes through [`with_stack`].
//!
//! On wasm targets the closure is called directly.

/// Grow when less than this much stack remains (64 KiB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment (2 MiB).
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
