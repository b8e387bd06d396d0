//! # kvlog-shared
//!
//! Shared primitives for the kvlog workspace.
//!
//! - Lock-free buffer pooling for per-call render buffers
//! - Clock abstraction for log timestamps
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Never fails** - Pool and clock operations are infallible on the hot path

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod clock;
pub mod pool;

pub use clock::{Clock, FixedClock, Rfc3339, SystemClock};
pub use pool::{
    BufferPool, DEFAULT_BUFFER_CAPACITY, MAX_POOLED_CAPACITY, PoolStats, PooledBuffer,
};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_types_are_available() {
        let pool = BufferPool::new();
        drop(pool.acquire());
        assert_eq!(pool.len(), 1);
        assert!(!shared_crate_version().is_empty());
    }
}
