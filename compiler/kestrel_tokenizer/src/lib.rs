//! Context-tracking ECMAScript tokenizer for Kestrel.
//!
//! The tokenizer is driven by the parser one token at a time. Whether a
//! `/` is division or starts a regular expression, and whether `}` ends a
//! block or resumes a template, depends on what came before; that history
//! lives in [`TokenizerState`] and is updated after every token.
//!
//! - [`Tokenizer`]: the reader, one token at a time
//! - [`tokenize`]: read a whole buffer into a token log
//! - [`TokenizerState`]: all mutable state, with `Clone` and
//!   [`snapshot`](TokenizerState::snapshot)/[`restore`](TokenizerState::restore)
//!   for backtracking
//! - [`Options`]: source type, strictness, starting line, plugins

mod comment;
mod context;
mod error;
mod node;
mod options;
mod state;
mod token;
mod tokenizer;

pub use comment::{Comment, CommentKind, CommentStackEntry};
pub use context::TokContext;
pub use error::{LexError, LexErrorKind, StateError};
pub use node::NodeId;
pub use options::{Options, Plugins, SourceType};
pub use state::{Label, LabelKind, MethodKind, StateFlags, StateSnapshot, TokenizerState};
pub use token::{Token, TokenEntry, TokenType, TokenValue};
pub use tokenizer::{tokenize, Tokenizer};

pub use kestrel_lexer_core::{Position, SourceLocation};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset or unparsable, or when the
/// program already installed a global subscriber. Later calls are no-ops.
/// `RUST_LOG=kestrel_tokenizer=trace` logs every token and context change.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        // Err means another subscriber is already global.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(true))
            .try_init();
    });
}
