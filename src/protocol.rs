//! Capability traits shared by both layouts
//!
//! [`NextValue`] is the seam between the core and outside callers: anything
//! that can hand out one element at a time implements it, so a consumer can
//! be written once and driven by any cursor, pull or channel stream.

use crate::chunk::Chunk;
use crate::config::BuildConfig;
use crate::{Builder, Element, SequenceError};

/// Minimal pull capability: the next element, or `None` once exhausted
///
/// Implementations keep returning `None` on every call after exhaustion.
pub trait NextValue {
    /// Advance by one element
    fn next_value(&mut self) -> Option<Element>;

    /// Adapt into a standard [`Iterator`]
    fn values(self) -> Values<Self>
    where
        Self: Sized,
    {
        Values { source: self }
    }
}

impl<N: NextValue + ?Sized> NextValue for &mut N {
    #[inline]
    fn next_value(&mut self) -> Option<Element> {
        (**self).next_value()
    }
}

impl<N: NextValue + ?Sized> NextValue for Box<N> {
    #[inline]
    fn next_value(&mut self) -> Option<Element> {
        (**self).next_value()
    }
}

/// [`Iterator`] over any [`NextValue`] source
#[derive(Debug, Clone)]
pub struct Values<N> {
    source: N,
}

impl<N> Values<N> {
    /// Recover the wrapped source
    pub fn into_inner(self) -> N {
        self.source
    }
}

impl<N: NextValue> Iterator for Values<N> {
    type Item = Element;

    #[inline]
    fn next(&mut self) -> Option<Element> {
        self.source.next_value()
    }
}

impl<N: NextValue> std::iter::FusedIterator for Values<N> {}

/// Drain `source` and return the wrapping sum of everything it yields
///
/// Knows nothing about the concrete protocol behind `source`.
pub fn sum_values<N: NextValue + ?Sized>(source: &mut N) -> Element {
    let mut sum: Element = 0;
    while let Some(item) = source.next_value() {
        sum = sum.wrapping_add(item);
    }
    sum
}

/// Stateful two-level cursor offering both cursor shapes
///
/// *Test-then-read*: [`Cursor::has_next`] then [`Cursor::read_next`].
/// *Advance-then-read*: [`Cursor::advance`] then [`Cursor::value`].
/// Pick one shape per cursor; [`NextValue`] is built from the second.
pub trait Cursor: NextValue {
    /// Whether an unread element remains
    fn has_next(&mut self) -> bool;

    /// Read the next element and move past it
    ///
    /// Only valid after [`Cursor::has_next`] returned `true`. Not validated
    /// beyond slice indexing: misuse panics but cannot affect other cursors.
    fn read_next(&mut self) -> Element;

    /// Move onto the next element, returning whether one exists
    fn advance(&mut self) -> bool;

    /// Element moved onto by the last successful [`Cursor::advance`]
    fn value(&self) -> Element;
}

/// Copy elements into caller-owned buffers, resuming where the last call ended
pub trait Fill {
    /// Write up to `buf.len()` next elements to `buf[..n]` and return `n`
    ///
    /// Returns 0 once the sequence is exhausted. A short, non-zero count means
    /// the following call returns 0. An empty `buf` always yields 0.
    fn fill(&mut self, buf: &mut [Element]) -> usize;
}

/// Ordered collection of chunks exposing every synchronous protocol
///
/// The channel protocols live on [`crate::ChannelIterate`], implemented for
/// `Arc<S>` of any sequence.
pub trait Sequence: Sized + Send + Sync + 'static {
    /// Closure-Pull state for this layout
    type Pull<'a>: NextValue
    where
        Self: 'a;

    /// Cursor-Pull state for this layout
    type Cursor<'a>: Cursor
    where
        Self: 'a;

    /// Buffer-Fill state for this layout
    type Filler<'a>: Fill
    where
        Self: 'a;

    /// Assemble a sequence from chunks in iteration order
    fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Chunk>;

    /// Visit chunks in order until `visit` returns `false`
    fn walk_chunks<F>(&self, visit: F) -> bool
    where
        F: FnMut(&Chunk) -> bool;

    /// Visit every element in global order until `visit` returns `false`
    ///
    /// Returns `true` if every element was visited.
    fn walk<F>(&self, visit: F) -> bool
    where
        F: FnMut(Element) -> bool;

    /// Start a Closure-Pull
    fn pull(&self) -> Self::Pull<'_>;

    /// Start a Cursor-Pull
    fn cursor(&self) -> Self::Cursor<'_>;

    /// Start a Buffer-Fill
    fn filler(&self) -> Self::Filler<'_>;

    /// Build `chunk_count` chunks of `chunk_size` elements, element `k` being
    /// `generator(k)`
    fn build<G>(chunk_count: usize, chunk_size: usize, generator: G) -> Result<Self, SequenceError>
    where
        G: FnMut(usize) -> Element,
    {
        let config = BuildConfig::new(chunk_count, chunk_size)?;
        Ok(Builder::new(config).build(generator))
    }

    /// Number of chunks
    fn chunk_count(&self) -> usize {
        let mut count = 0;
        self.walk_chunks(|_| {
            count += 1;
            true
        });
        count
    }

    /// Total number of elements
    fn len(&self) -> usize {
        let mut len = 0;
        self.walk_chunks(|chunk| {
            len += chunk.len();
            true
        });
        len
    }

    /// Whether the sequence yields no elements
    fn is_empty(&self) -> bool {
        self.walk_chunks(|chunk| chunk.is_empty())
    }

    /// Wrapping sum of all elements
    fn checksum(&self) -> Element {
        let mut sum: Element = 0;
        self.walk(|item| {
            sum = sum.wrapping_add(item);
            true
        });
        sum
    }

    /// Collect all elements in global order
    fn to_vec(&self) -> Vec<Element> {
        let mut items = Vec::with_capacity(self.len());
        self.walk(|item| {
            items.push(item);
            true
        });
        items
    }
}
