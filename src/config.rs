//! Build and pipe parameters
//!
//! Both structs are validated on construction so the protocols can rely on
//! their invariants without re-checking them per element.

use crate::SequenceError;

/// Default number of slots in a channel protocol's bounded pipe
///
/// Large enough to amortize synchronization between producer and consumer,
/// small enough that an abandoned pipe pins at most a few KiB.
pub const DEFAULT_PIPE_CAPACITY: usize = 1024;

/// Shape of a sequence: `chunk_count` chunks of `chunk_size` elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildConfig {
    chunk_count: usize,
    chunk_size: usize,
}

impl BuildConfig {
    /// Create a shape, rejecting totals that overflow `usize`
    pub fn new(chunk_count: usize, chunk_size: usize) -> Result<Self, SequenceError> {
        if chunk_count.checked_mul(chunk_size).is_none() {
            return Err(SequenceError::CapacityOverflow {
                chunk_count,
                chunk_size,
            });
        }

        Ok(Self {
            chunk_count,
            chunk_size,
        })
    }

    /// Number of chunks
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Elements per chunk
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.chunk_count * self.chunk_size
    }

    /// Whether the shape holds no elements at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened index of the first element of chunk `chunk`
    #[inline]
    pub fn base_index(&self, chunk: usize) -> usize {
        debug_assert!(chunk < self.chunk_count, "chunk index out of range");
        chunk * self.chunk_size
    }
}

/// Parameters for the channel protocols' bounded pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipeConfig {
    capacity: usize,
}

impl PipeConfig {
    /// Create a pipe configuration with `capacity` slots
    pub fn new(capacity: usize) -> Result<Self, SequenceError> {
        if capacity == 0 {
            return Err(SequenceError::ZeroPipeCapacity);
        }
        Ok(Self { capacity })
    }

    /// Number of elements the pipe buffers before the producer blocks
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_PIPE_CAPACITY,
        }
    }
}
