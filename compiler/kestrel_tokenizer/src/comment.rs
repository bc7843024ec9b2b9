//! Comments and comment-attachment bookkeeping.

use kestrel_lexer_core::SourceLocation;

use crate::node::NodeId;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentKind {
    /// `// ...`, and the HTML-style `<!--` / `-->` forms in scripts.
    Line,
    /// `/* ... */`
    Block,
}

/// A comment with its text, excluding delimiters.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Comment {
    pub kind: CommentKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
    pub loc: SourceLocation,
}

/// A node awaiting comment attachment.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CommentStackEntry {
    pub start: usize,
    pub leading_comments: Option<Vec<Comment>>,
    pub trailing_comments: Option<Vec<Comment>>,
    pub node: NodeId,
}
