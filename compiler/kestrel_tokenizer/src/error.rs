//! Error types for the tokenizer.
//!
//! Two families:
//! - [`StateError`]: misuse of the state by the caller. Returned as `Err`
//!   at the point of misuse so a bad position never leaks into the AST.
//! - [`LexError`]: malformed source text. Recorded on the state and
//!   scanning continues; the grammar layer decides whether to abort.

use kestrel_lexer_core::Position;
use thiserror::Error;

/// Caller misuse of a [`TokenizerState`](crate::TokenizerState).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum StateError {
    /// The previous-token span was read before any token was consumed.
    #[error("no token has been consumed yet")]
    NoPreviousToken,
    /// A pop would have left the syntactic context stack empty.
    #[error("cannot pop the base syntactic context")]
    ContextUnderflow,
    /// A pop would have left the decorator stack without a frame.
    #[error("cannot pop the base decorator frame")]
    DecoratorUnderflow,
    /// `start_line` must be at least 1.
    #[error("start line must be at least 1, got {0}")]
    InvalidStartLine(u32),
}

/// A lexical error at a source position.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind} ({loc})")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset of the error.
    pub offset: usize,
    /// Line/column of `offset`.
    pub loc: Position,
}

/// What went wrong while reading a token.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    // === Unterminated constructs ===
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated string constant")]
    UnterminatedString,
    #[error("unterminated template")]
    UnterminatedTemplate,
    #[error("unterminated regular expression")]
    UnterminatedRegExp,

    // === Regular expressions ===
    #[error("invalid regular expression flag '{0}'")]
    InvalidRegExpFlag(char),
    #[error("duplicate regular expression flag '{0}'")]
    DuplicateRegExpFlag(char),

    // === Numbers ===
    #[error("invalid number")]
    InvalidNumber,
    #[error("expected number in radix {0}")]
    ExpectedNumberInRadix(u32),
    #[error("identifier directly after number")]
    IdentifierAfterNumber,
    #[error("invalid BigInt literal")]
    InvalidBigInt,
    #[error("invalid numeric separator")]
    InvalidNumericSeparator,
    #[error("legacy octal literal in strict mode")]
    OctalInStrictMode,

    // === Escapes ===
    #[error("bad character escape sequence")]
    BadEscape,
    #[error("expecting Unicode escape sequence \\uXXXX")]
    ExpectedUnicodeEscape,
    #[error("invalid Unicode escape")]
    InvalidUnicodeEscape,
    #[error("code point out of bounds")]
    CodePointOutOfBounds,
    #[error("escape sequence in keyword {0}")]
    EscapedKeyword(String),

    // === Characters ===
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("invalid UTF-8 sequence")]
    InvalidEncoding,
}
