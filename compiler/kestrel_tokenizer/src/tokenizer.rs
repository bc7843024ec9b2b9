//! The token reader.
//!
//! [`Tokenizer`] drives a [`TokenizerState`] over its buffer. Every call to
//! [`next`](Tokenizer::next) retires the current token into the
//! previous-token slot and reads the following one. Reading never fails:
//! malformed input is recorded in [`TokenizerState::errors`] and the
//! cursor moves on past it.
//!
//! The per-construct readers live in submodules:
//! - `space`: whitespace, comments, HTML-style comments
//! - `punct`: punctuators, operators, `#`
//! - `number`: numeric and BigInt literals
//! - `string`: string literals, template chunks, escapes
//! - `regexp`: regular expression literals
//! - `word`: identifiers and keywords

mod number;
mod punct;
mod regexp;
mod space;
mod string;
mod word;

use kestrel_lexer_core::{utf8, Position, SourceLocation};
use tracing::{debug, instrument, trace};

use crate::context::TokContext;
use crate::error::{LexErrorKind, StateError};
use crate::options::{Options, SourceType};
use crate::state::{StateSnapshot, TokenizerState};
use crate::token::{Token, TokenEntry, TokenType, TokenValue};

use word::is_identifier_start;

pub struct Tokenizer<'src> {
    state: TokenizerState<'src>,
    options: Options,
    /// Set while reading ahead; suppresses token and comment recording.
    is_lookahead: bool,
}

impl<'src> Tokenizer<'src> {
    /// Create a tokenizer positioned on the first token of `buffer`.
    #[instrument(level = "debug", skip_all, fields(len = buffer.len(), source_type = ?options.source_type))]
    pub fn new(options: Options, buffer: &'src [u8]) -> Result<Self, StateError> {
        let state = TokenizerState::new(&options, buffer)?;
        let mut tokenizer = Tokenizer {
            state,
            options,
            is_lookahead: false,
        };
        tokenizer.next_token();
        Ok(tokenizer)
    }

    #[inline]
    pub fn state(&self) -> &TokenizerState<'src> {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut TokenizerState<'src> {
        &mut self.state
    }

    #[inline]
    pub fn into_state(self) -> TokenizerState<'src> {
        self.state
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The current token.
    pub fn token(&self) -> Token {
        Token {
            ty: self.state.ty,
            value: self.state.value.clone(),
            start: self.state.start,
            end: self.state.end,
            loc: self.location(self.state.start_loc, self.state.end_loc),
        }
    }

    /// Move to the next token, recording the current one when the
    /// `tokens` option is set.
    #[allow(
        clippy::should_implement_trait,
        reason = "advances the stream; the new token is read back from the state"
    )]
    pub fn next(&mut self) {
        if self.options.tokens && !self.is_lookahead {
            let token = self.token();
            self.state.tokens.push(TokenEntry::Token(token));
        }
        self.state.retire_token();
        self.next_token();
    }

    /// Peek at the token after the current one without moving.
    pub fn lookahead(&mut self) -> Token {
        let snapshot = self.state.snapshot();
        self.is_lookahead = true;
        self.next();
        self.is_lookahead = false;
        let token = self.token();
        self.state.restore(snapshot);
        token
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    pub fn restore(&mut self, snapshot: StateSnapshot) {
        self.state.restore(snapshot);
    }

    /// Run `f` and rewind to the current token unless it succeeds.
    pub fn try_speculate<T, E>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        let snapshot = self.state.snapshot();
        let result = f(self);
        if result.is_err() {
            debug!(pos = self.state.pos, back_to = snapshot.pos(), "speculation failed");
            self.state.restore(snapshot);
        }
        result
    }

    // === Reading ===

    /// Read the token starting at (or after whitespace from) the cursor.
    fn next_token(&mut self) {
        loop {
            let ctx = self.state.cur_context();
            if !ctx.preserve_space() {
                self.skip_space();
            }
            self.state.contains_octal = false;
            self.state.octal_position = None;
            self.state.start = self.state.pos;
            self.state.start_loc = self.state.cur_position();

            if self.state.pos >= self.state.buffer.len() {
                if ctx == TokContext::Template && self.state.ty != TokenType::Eof {
                    self.state
                        .record_error(LexErrorKind::UnterminatedTemplate, self.state.pos);
                }
                self.finish_token(TokenType::Eof, TokenValue::None);
                return;
            }

            if ctx == TokContext::Template {
                self.read_tmpl_token();
                return;
            }
            if self.read_token() {
                return;
            }
        }
    }

    /// Dispatch on the first code point. Returns `false` when the input
    /// was consumed without producing a token.
    fn read_token(&mut self) -> bool {
        let pos = self.state.pos;
        let Some(byte) = self.byte_at(pos) else {
            self.finish_token(TokenType::Eof, TokenValue::None);
            return true;
        };
        if byte.is_ascii() {
            if is_identifier_start(char::from(byte)) || byte == b'\\' {
                self.read_word();
                return true;
            }
            return self.read_punct(byte);
        }
        match utf8::decode(self.state.buffer, pos) {
            Some((ch, _)) if is_identifier_start(ch) => {
                self.read_word();
                true
            }
            Some((ch, _)) => {
                self.state
                    .record_error(LexErrorKind::UnexpectedCharacter(ch), pos);
                self.state.advance();
                false
            }
            None => {
                self.state.record_error(LexErrorKind::InvalidEncoding, pos);
                self.state.advance();
                false
            }
        }
    }

    /// Close the current token at the cursor.
    fn finish_token(&mut self, ty: TokenType, value: TokenValue) {
        self.state.end = self.state.pos;
        self.state.end_loc = self.state.cur_position();
        let prev = self.state.ty;
        self.state.ty = ty;
        self.state.value = value;
        trace!(
            %ty,
            start = self.state.start,
            end = self.state.end,
            "token"
        );
        self.state.update_context(prev);
    }

    // === Helpers ===

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.state.buffer.get(pos).copied()
    }

    /// Byte `offset` bytes after the cursor.
    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.byte_at(self.state.pos + offset)
    }

    #[inline]
    fn in_module(&self) -> bool {
        self.options.source_type == SourceType::Module
    }

    fn location(&self, start: Position, end: Position) -> SourceLocation {
        let loc = SourceLocation::spanning(start, end);
        match &self.options.source_filename {
            Some(filename) => loc.with_filename(filename.clone()),
            None => loc,
        }
    }
}

/// Read all of `buffer`, recording every token and comment.
///
/// Returns the final state; its [`tokens`](TokenizerState::tokens) end
/// with the `Eof` token, and [`errors`](TokenizerState::errors) holds
/// whatever was malformed.
#[instrument(level = "debug", skip_all, fields(len = buffer.len()))]
pub fn tokenize<'src>(
    options: &Options,
    buffer: &'src [u8],
) -> Result<TokenizerState<'src>, StateError> {
    let mut tokenizer = Tokenizer::new(options.clone().with_tokens(true), buffer)?;
    loop {
        let at_eof = tokenizer.state.ty == TokenType::Eof;
        tokenizer.next();
        if at_eof {
            break;
        }
    }
    let state = tokenizer.into_state();
    debug!(
        tokens = state.tokens.len(),
        errors = state.errors.len(),
        "tokenized"
    );
    Ok(state)
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    reason = "test inputs are built from valid options"
)]
