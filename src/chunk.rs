//! Fixed-length runs of elements
//!
//! A [`Chunk`] is the unit both layouts are made of. Every protocol in the
//! crate is composed from the primitives here: an outer step over chunks or
//! nodes, and one of these inner steps over a single chunk's elements.

use crate::Element;

/// Immutable, fixed-length, contiguous run of elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
    items: Box<[Element]>,
}

impl Chunk {
    /// Take ownership of `items` as a chunk
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            items: items.into_boxed_slice(),
        }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the chunk holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only view of the elements
    #[inline]
    pub fn as_slice(&self) -> &[Element] {
        &self.items
    }

    /// Visit every element in order until `visit` returns `false`
    ///
    /// Returns `false` exactly when the visitor stopped the walk.
    #[inline]
    pub fn walk<F>(&self, visit: &mut F) -> bool
    where
        F: FnMut(Element) -> bool,
    {
        self.items.iter().all(|&item| visit(item))
    }

    /// Pull-style source over this chunk's elements
    pub fn pull(&self) -> ChunkPull<'_> {
        ChunkPull {
            items: &self.items,
            idx: 0,
        }
    }

    /// Two-shape cursor over this chunk's elements
    pub fn cursor(&self) -> ChunkCursor<'_> {
        ChunkCursor {
            items: &self.items,
            pos: 0,
        }
    }
}

impl From<Vec<Element>> for Chunk {
    fn from(items: Vec<Element>) -> Self {
        Self::new(items)
    }
}

/// One-element-per-call pull over a chunk
///
/// The default value is an already exhausted pull, which is how the
/// sequence-level pulls start before touching their first chunk.
#[derive(Debug, Clone, Default)]
pub struct ChunkPull<'a> {
    items: &'a [Element],
    idx: usize,
}

impl ChunkPull<'_> {
    /// Next element, or `None` forever once the chunk is exhausted
    #[inline]
    pub fn pull(&mut self) -> Option<Element> {
        // Bounds-checked so repeated calls past the end stay harmless
        let item = *self.items.get(self.idx)?;
        self.idx += 1;
        Some(item)
    }
}

/// Cursor over a chunk supporting both cursor shapes
///
/// `pos` is the offset of the next unread element, so `has_next`/`read_next`
/// read at `pos` and `advance`/`value` read just behind it.
#[derive(Debug, Clone, Default)]
pub struct ChunkCursor<'a> {
    items: &'a [Element],
    pos: usize,
}

impl ChunkCursor<'_> {
    /// Whether an unread element remains
    #[inline]
    pub fn has_next(&self) -> bool {
        self.pos < self.items.len()
    }

    /// Read the next element and move past it
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted; call [`ChunkCursor::has_next`] first.
    #[inline]
    pub fn read_next(&mut self) -> Element {
        let item = self.items[self.pos];
        self.pos += 1;
        item
    }

    /// Move onto the next element, returning whether one exists
    #[inline]
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Element moved onto by the last successful [`ChunkCursor::advance`]
    ///
    /// # Panics
    ///
    /// Panics if called before any successful advance.
    #[inline]
    pub fn value(&self) -> Element {
        self.items[self.pos - 1]
    }
}
