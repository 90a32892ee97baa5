//! Chunk-array layout
//!
//! Chunks sit in one random-access boxed slice; iteration state is an index
//! into it plus the inner chunk-level state.

mod iter;

pub use iter::{ArrayCursor, ArrayFiller, ArrayPull};

use crate::chunk::Chunk;
use crate::protocol::Sequence;
use crate::Element;

/// Sequence stored as an ordered array of chunks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArraySequence {
    chunks: Box<[Chunk]>,
}

impl ArraySequence {
    /// Chunks in iteration order
    #[inline]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk at position `idx`, if any
    #[inline]
    pub fn chunk(&self, idx: usize) -> Option<&Chunk> {
        self.chunks.get(idx)
    }
}

impl Sequence for ArraySequence {
    type Pull<'a> = ArrayPull<'a>;
    type Cursor<'a> = ArrayCursor<'a>;
    type Filler<'a> = ArrayFiller<'a>;

    fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Chunk>,
    {
        Self {
            chunks: chunks.into_iter().collect(),
        }
    }

    fn walk_chunks<F>(&self, mut visit: F) -> bool
    where
        F: FnMut(&Chunk) -> bool,
    {
        self.chunks.iter().all(|chunk| visit(chunk))
    }

    fn walk<F>(&self, mut visit: F) -> bool
    where
        F: FnMut(Element) -> bool,
    {
        for chunk in self.chunks.iter() {
            if !chunk.walk(&mut visit) {
                // Stopped inside this chunk; later chunks are never touched
                return false;
            }
        }
        true
    }

    fn pull(&self) -> ArrayPull<'_> {
        ArrayPull::new(&self.chunks)
    }

    fn cursor(&self) -> ArrayCursor<'_> {
        ArrayCursor::new(&self.chunks)
    }

    fn filler(&self) -> ArrayFiller<'_> {
        ArrayFiller::new(&self.chunks)
    }

    fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}
