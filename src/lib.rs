//! # Chunked sequences and their iteration protocols
//!
//! An immutable, ordered collection of integers split into fixed-size
//! chunks, stored either as an array of chunks or as a singly-linked chain
//! of chunk nodes. Both layouts expose the same six iteration protocols:
//!
//! 1. **Push-Visit**: [`Sequence::walk`] calls a visitor per element and stops
//!    as soon as the visitor returns `false`
//! 2. **Closure-Pull**: [`Sequence::pull`] yields one element per call
//! 3. **Cursor-Pull**: [`Sequence::cursor`] with test-then-read and
//!    advance-then-read shapes
//! 4. **Channel-Pull**: [`ChannelIterate::channel_iter`] drains a bounded pipe
//!    filled by a background producer
//! 5. **Cancellable-Channel-Pull**: [`ChannelIterate::cancellable_channel_iter`]
//!    stops the producer on a [`CancelSignal`]
//! 6. **Buffer-Fill**: [`Sequence::filler`] copies elements into caller buffers
//!
//! Every protocol observes each element exactly once, in chunk order and then
//! intra-chunk order. Any pull-style source can be consumed through the single
//! [`NextValue`] capability.
//!
//! ## Usage Example
//!
//! ```
//! use chunkseq::{ArraySequence, NextValue, Sequence};
//!
//! let seq = ArraySequence::build(3, 2, |i| i as i64).unwrap();
//! assert_eq!(seq.checksum(), 15);
//!
//! let mut visited = Vec::new();
//! seq.walk(|item| {
//!     visited.push(item);
//!     item != 2
//! });
//! assert_eq!(visited, vec![0, 1, 2]);
//!
//! let mut cursor = seq.cursor();
//! assert_eq!(chunkseq::sum_values(&mut cursor), 15);
//! assert_eq!(cursor.next_value(), None);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod array; // Chunk-array layout
pub mod builder; // Generator-driven construction
pub mod channel; // Producer/consumer protocols over bounded pipes
pub mod chunk; // Fixed-length element runs and chunk-level primitives
pub mod config; // Validated build and pipe parameters
pub mod linked; // Linked chain-of-chunks layout
pub mod protocol; // Capability traits shared by both layouts

// Re-exports for convenience
pub use array::{ArrayCursor, ArrayFiller, ArrayPull, ArraySequence};
pub use builder::Builder;
pub use channel::cancel::{cancellation, CancelHandle, CancelSignal};
pub use channel::{ChannelIterate, ChannelStream};
pub use chunk::{Chunk, ChunkCursor, ChunkPull};
pub use config::{BuildConfig, PipeConfig, DEFAULT_PIPE_CAPACITY};
pub use linked::{LinkedCursor, LinkedFiller, LinkedPull, LinkedSequence, Node};
pub use protocol::{sum_values, Cursor, Fill, NextValue, Sequence, Values};

use thiserror::Error;

/// Element type stored in every chunk
pub type Element = i64;

/// Errors that can occur while configuring or draining a sequence
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Total element count does not fit in `usize`
    #[error("Sequence of {chunk_count} chunks by {chunk_size} elements overflows usize")]
    CapacityOverflow {
        /// Requested number of chunks
        chunk_count: usize,
        /// Requested elements per chunk
        chunk_size: usize,
    },

    /// Bounded pipe configured without any slots
    #[error("Pipe capacity must be greater than zero")]
    ZeroPipeCapacity,

    /// Background producer thread panicked before closing its pipe
    #[error("Channel producer panicked")]
    ProducerPanicked,
}
