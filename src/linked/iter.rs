//! Pull, cursor and fill state over a node chain

use crate::chunk::{ChunkCursor, ChunkPull};
use crate::protocol::{Cursor, Fill, NextValue};
use crate::Element;

use super::Node;

/// Closure-Pull over a chain of nodes
#[derive(Debug, Clone)]
pub struct LinkedPull<'a> {
    /// Next node to open
    cur: Option<&'a Node>,
    inner: ChunkPull<'a>,
}

impl<'a> LinkedPull<'a> {
    pub(crate) fn new(head: Option<&'a Node>) -> Self {
        Self {
            cur: head,
            inner: ChunkPull::default(),
        }
    }

    /// Next element, or `None` on this and every later call once exhausted
    pub fn pull(&mut self) -> Option<Element> {
        loop {
            if let Some(item) = self.inner.pull() {
                return Some(item);
            }
            let node = self.cur?;
            self.inner = node.chunk().pull();
            self.cur = node.next();
        }
    }

    /// Turn the pull into a plain closure
    pub fn into_fn(mut self) -> impl FnMut() -> Option<Element> + 'a {
        move || self.pull()
    }
}

impl NextValue for LinkedPull<'_> {
    #[inline]
    fn next_value(&mut self) -> Option<Element> {
        self.pull()
    }
}

/// Cursor-Pull over a chain of nodes
#[derive(Debug, Clone)]
pub struct LinkedCursor<'a> {
    cur: Option<&'a Node>,
    inner: ChunkCursor<'a>,
}

impl<'a> LinkedCursor<'a> {
    pub(crate) fn new(head: Option<&'a Node>) -> Self {
        Self {
            cur: head,
            inner: ChunkCursor::default(),
        }
    }

    #[inline]
    fn settle(&mut self) -> bool {
        while !self.inner.has_next() {
            let Some(node) = self.cur else {
                return false;
            };
            self.inner = node.chunk().cursor();
            self.cur = node.next();
        }
        true
    }
}

impl Cursor for LinkedCursor<'_> {
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

impl NextValue for LinkedCursor<'_> {
    #[inline]
    fn next_value(&mut self) -> Option<Element> {
        if self.advance() {
            Some(self.value())
        } else {
            None
        }
    }
}

/// Buffer-Fill over a chain of nodes
#[derive(Debug, Clone)]
pub struct LinkedFiller<'a> {
    cur: Option<&'a Node>,
    offset: usize,
}

impl<'a> LinkedFiller<'a> {
    pub(crate) fn new(head: Option<&'a Node>) -> Self {
        Self { cur: head, offset: 0 }
    }
}

impl Fill for LinkedFiller<'_> {
    fn fill(&mut self, buf: &mut [Element]) -> usize {
        let mut written = 0;
        while written < buf.len() {
            let Some(node) = self.cur else {
                break;
            };
            let items = node.chunk().as_slice();
            let rest = items.get(self.offset..).unwrap_or_default();
            let take = rest.len().min(buf.len() - written);
            buf[written..written + take].copy_from_slice(&rest[..take]);
            written += take;
            self.offset += take;

            if self.offset >= items.len() {
                self.cur = node.next();
                self.offset = 0;
            }
        }
        written
    }
}
