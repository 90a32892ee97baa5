//! Linked chain-of-chunks layout
//!
//! The outer sequence is traversal-only: iteration state holds a borrowed
//! reference to the current node and steps along `next`, never indexing.

mod iter;
mod node;

pub use iter::{LinkedCursor, LinkedFiller, LinkedPull};
pub use node::{Node, Nodes};

use std::fmt;

use crate::chunk::Chunk;
use crate::protocol::Sequence;
use crate::Element;

/// Sequence stored as a singly-linked chain of chunk nodes
#[derive(Default)]
pub struct LinkedSequence {
    head: Option<Box<Node>>,
}

impl LinkedSequence {
    /// First node of the chain
    #[inline]
    pub fn head(&self) -> Option<&Node> {
        self.head.as_deref()
    }

    /// Nodes in iteration order
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes { cur: self.head() }
    }
}

impl Sequence for LinkedSequence {
    type Pull<'a> = LinkedPull<'a>;
    type Cursor<'a> = LinkedCursor<'a>;
    type Filler<'a> = LinkedFiller<'a>;

    fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Chunk>,
    {
        let mut head = None;
        let mut tail = &mut head;
        for chunk in chunks {
            let node = tail.insert(Box::new(Node::new(chunk)));
            tail = &mut node.next;
        }
        Self { head }
    }

    fn walk_chunks<F>(&self, mut visit: F) -> bool
    where
        F: FnMut(&Chunk) -> bool,
    {
        self.nodes().all(|node| visit(node.chunk()))
    }

    fn walk<F>(&self, mut visit: F) -> bool
    where
        F: FnMut(Element) -> bool,
    {
        let mut cur = self.head();
        while let Some(node) = cur {
            if !node.chunk().walk(&mut visit) {
                // Stopped inside this node; the rest of the chain is never touched
                return false;
            }
            cur = node.next();
        }
        true
    }

    fn pull(&self) -> LinkedPull<'_> {
        LinkedPull::new(self.head())
    }

    fn cursor(&self) -> LinkedCursor<'_> {
        LinkedCursor::new(self.head())
    }

    fn filler(&self) -> LinkedFiller<'_> {
        LinkedFiller::new(self.head())
    }
}

impl Drop for LinkedSequence {
    // Unlink iteratively so long chains do not recurse once per node
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

impl Clone for LinkedSequence {
    fn clone(&self) -> Self {
        Self::from_chunks(self.nodes().map(|node| node.chunk().clone()))
    }
}

impl PartialEq for LinkedSequence {
    fn eq(&self, other: &Self) -> bool {
        self.nodes()
            .map(Node::chunk)
            .eq(other.nodes().map(Node::chunk))
    }
}

impl Eq for LinkedSequence {}

impl fmt::Debug for LinkedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.nodes().map(Node::chunk))
            .finish()
    }
}
