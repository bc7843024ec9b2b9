//! Opaque handles to AST nodes owned by the grammar layer.
//!
//! The tokenizer state keeps track of a few nodes (pending decorators, the
//! node comments attach to, the first `yield` inside possible arrow
//! parameters) without knowing their shape. The parser hands out `NodeId`s
//! from its own arena and resolves them itself.

use std::fmt;

/// Index into the parser's node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
