//! Chain node
//!
//! Each node owns its chunk and, through a single-owner box, the rest of the
//! chain. No node can be reachable from two chains, so cycles cannot form.

use std::fmt;

use crate::chunk::Chunk;

/// One link of a [`super::LinkedSequence`]
pub struct Node {
    pub(super) chunk: Chunk,
    pub(super) next: Option<Box<Node>>,
}

impl Node {
    pub(super) fn new(chunk: Chunk) -> Self {
        Self { chunk, next: None }
    }

    /// Chunk held by this node
    #[inline]
    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    /// Following node, if any
    #[inline]
    pub fn next(&self) -> Option<&Node> {
        self.next.as_deref()
    }
}

impl fmt::Debug for Node {
    // Only this node's chunk; the derived form would recurse down the chain
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("chunk", &self.chunk)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

/// Iterator over the nodes of a chain, head first
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    pub(super) cur: Option<&'a Node>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    #[inline]
    fn next(&mut self) -> Option<&'a Node> {
        let node = self.cur?;
        self.cur = node.next();
        Some(node)
    }
}

impl std::iter::FusedIterator for Nodes<'_> {}
