//! Pull, cursor and fill state over a chunk array
//!
//! Each type pairs an outer index into the chunk array with inner
//! chunk-level state, moving to the next chunk only when the inner state is
//! exhausted.

use crate::chunk::{Chunk, ChunkCursor, ChunkPull};
use crate::protocol::{Cursor, Fill, NextValue};
use crate::Element;

/// Closure-Pull over an array of chunks
#[derive(Debug, Clone)]
pub struct ArrayPull<'a> {
    chunks: &'a [Chunk],
    /// Index of the next chunk to open
    next_chunk: usize,
    inner: ChunkPull<'a>,
}

impl<'a> ArrayPull<'a> {
    pub(crate) fn new(chunks: &'a [Chunk]) -> Self {
        Self {
            chunks,
            next_chunk: 0,
            inner: ChunkPull::default(),
        }
    }

    /// Next element, or `None` on this and every later call once exhausted
    pub fn pull(&mut self) -> Option<Element> {
        loop {
            if let Some(item) = self.inner.pull() {
                return Some(item);
            }
            let chunk = self.chunks.get(self.next_chunk)?;
            self.inner = chunk.pull();
            self.next_chunk += 1;
        }
    }

    /// Turn the pull into a plain closure
    pub fn into_fn(mut self) -> impl FnMut() -> Option<Element> + 'a {
        move || self.pull()
    }
}

impl NextValue for ArrayPull<'_> {
    #[inline]
    fn next_value(&mut self) -> Option<Element> {
        self.pull()
    }
}

/// Cursor-Pull over an array of chunks
#[derive(Debug, Clone)]
pub struct ArrayCursor<'a> {
    chunks: &'a [Chunk],
    next_chunk: usize,
    inner: ChunkCursor<'a>,
}

impl<'a> ArrayCursor<'a> {
    pub(crate) fn new(chunks: &'a [Chunk]) -> Self {
        Self {
            chunks,
            next_chunk: 0,
            inner: ChunkCursor::default(),
        }
    }

    /// Re-seat the inner cursor on the first chunk with unread elements
    #[inline]
    fn settle(&mut self) -> bool {
        while !self.inner.has_next() {
            let Some(chunk) = self.chunks.get(self.next_chunk) else {
                return false;
            };
            self.inner = chunk.cursor();
            self.next_chunk += 1;
        }
        true
    }
}

impl Cursor for ArrayCursor<'_> {
    #[inline]
    fn has_next(&mut self) -> bool {
        self.settle()
    }

    #[inline]
    fn read_next(&mut self) -> Element {
        self.inner.read_next()
    }

    #[inline]
    fn advance(&mut self) -> bool {
        self.settle() && self.inner.advance()
    }

    #[inline]
    fn value(&self) -> Element {
        self.inner.value()
    }
}

impl NextValue for ArrayCursor<'_> {
    #[inline]
    fn next_value(&mut self) -> Option<Element> {
        if self.advance() {
            Some(self.value())
        } else {
            None
        }
    }
}

/// Buffer-Fill over an array of chunks
#[derive(Debug, Clone)]
pub struct ArrayFiller<'a> {
    chunks: &'a [Chunk],
    chunk: usize,
    /// Offset of the next unread element inside `chunk`
    offset: usize,
}

impl<'a> ArrayFiller<'a> {
    pub(crate) fn new(chunks: &'a [Chunk]) -> Self {
        Self {
            chunks,
            chunk: 0,
            offset: 0,
        }
    }
}

impl Fill for ArrayFiller<'_> {
    fn fill(&mut self, buf: &mut [Element]) -> usize {
        let mut written = 0;
        while written < buf.len() {
            let Some(chunk) = self.chunks.get(self.chunk) else {
                break;
            };
            let rest = chunk.as_slice().get(self.offset..).unwrap_or_default();
            let take = rest.len().min(buf.len() - written);
            buf[written..written + take].copy_from_slice(&rest[..take]);
            written += take;
            self.offset += take;

            if self.offset >= chunk.len() {
                self.chunk += 1;
                self.offset = 0;
            }
        }
        written
    }
}
