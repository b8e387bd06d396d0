//! Lock-free pool of reusable byte buffers.
//!
//! Every log call renders into a scratch buffer. Pooling those buffers keeps
//! the common path allocation-free while letting any number of threads
//! acquire and release concurrently without a global lock.
//!
//! Notes:
//! - The pool is unbounded: under contention it grows by allocating fresh
//!   buffers, and every released buffer is queued for reuse.
//! - Buffers that grew past [`MAX_POOLED_CAPACITY`] are discarded on release
//!   so one oversized line does not pin memory for the process lifetime.
//! - No particular buffer is guaranteed to be reused.

use crossbeam_queue::SegQueue;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Initial capacity for freshly allocated buffers.
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Buffers with a larger capacity are dropped instead of pooled.
pub const MAX_POOLED_CAPACITY: usize = 64 * 1024;

/// Lock-free pool of reusable `Vec<u8>` buffers.
#[derive(Default)]
pub struct BufferPool {
    queue: SegQueue<Vec<u8>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    returns: AtomicUsize,
    discards: AtomicUsize,
}

impl BufferPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire an empty buffer, exclusively owned until the guard drops.
    ///
    /// Never fails: when the pool is empty a new buffer is allocated.
    #[inline]
    pub fn acquire(&self) -> PooledBuffer<'_> {
        PooledBuffer {
            pool: self,
            buf: self.take(),
        }
    }

    /// Return a buffer to the pool.
    ///
    /// The buffer is cleared before being queued. Oversized buffers are
    /// discarded.
    #[inline]
    pub fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_POOLED_CAPACITY {
            self.discards.fetch_add(1, Ordering::Relaxed);
            return;
        }
        buf.clear();
        self.queue.push(buf);
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of idle buffers currently queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true when no idle buffer is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            idle: self.queue.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            discards: self.discards.load(Ordering::Relaxed),
        }
    }

    fn take(&self) -> Vec<u8> {
        if let Some(mut buf) = self.queue.pop() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            buf.clear();
            buf
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            Vec::with_capacity(DEFAULT_BUFFER_CAPACITY)
        }
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BufferPool")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Pool counters for monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Idle buffers queued at snapshot time.
    pub idle: usize,
    /// Acquisitions served from the queue.
    pub hits: usize,
    /// Acquisitions that allocated a new buffer.
    pub misses: usize,
    /// Buffers returned to the queue.
    pub returns: usize,
    /// Buffers dropped for exceeding [`MAX_POOLED_CAPACITY`].
    pub discards: usize,
}

impl PoolStats {
    /// Fraction of acquisitions served from the queue (0.0 to 1.0).
    #[allow(clippy::cast_precision_loss, reason = "ratio of monitoring counters")]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// RAII guard over a pooled buffer.
///
/// The buffer goes back to its pool when the guard drops, including during
/// unwinding.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl PooledBuffer<'_> {
    /// Explicitly return the buffer to its pool.
    pub fn release(self) {}
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PooledBuffer")
            .field("len", &self.buf.len())
            .field("capacity", &self.buf.capacity())
            .finish()
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
