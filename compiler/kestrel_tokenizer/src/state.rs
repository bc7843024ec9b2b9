//! The mutable tokenizer state.
//!
//! One [`TokenizerState`] exists per parse attempt. It borrows the input,
//! owns everything else, and is driven forward one token at a time by the
//! [`Tokenizer`](crate::Tokenizer). The grammar layer reads the current
//! token and toggles the context flags; the reader only consults them.
//!
//! # Backtracking
//!
//! Two ways to try something and take it back:
//!
//! - `Clone`: a fully independent copy of every field. Run the attempt on
//!   the copy, then keep it (`*state = copy`) or drop it.
//! - [`snapshot`](TokenizerState::snapshot) / [`restore`](TokenizerState::restore):
//!   copies scalars and the scoped stacks but records the append-only logs
//!   (`tokens`, `comments`, `exported_identifiers`, `errors`) by length
//!   only. Restoring truncates the logs back. Cheaper than a clone once the
//!   logs grow, and still never aliases the live state.
//!
//! The scoped helpers ([`with_context`](TokenizerState::with_context),
//! [`try_speculate`](TokenizerState::try_speculate),
//! [`look_ahead`](TokenizerState::look_ahead)) wrap both so the restore
//! cannot be forgotten on an early return.

use bitflags::bitflags;
use indexmap::IndexSet;
use kestrel_lexer_core::{
    contains_new_line, get_line_info, line_break_len, next_line_break, utf8, Position,
};
use tracing::{debug, trace};

use crate::comment::{Comment, CommentStackEntry};
use crate::context::TokContext;
use crate::error::{LexError, LexErrorKind, StateError};
use crate::node::NodeId;
use crate::options::Options;
use crate::token::{TokenEntry, TokenType, TokenValue};

bitflags! {
    /// Context flags toggled by the grammar layer.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct StateFlags: u16 {
        const IN_FUNCTION = 1 << 0;
        const IN_PARAMETERS = 1 << 1;
        const MAYBE_IN_ARROW_PARAMETERS = 1 << 2;
        /// `yield` after a name is an operator, so a `/` may follow.
        const IN_GENERATOR = 1 << 3;
        const IN_ASYNC = 1 << 4;
        const IN_PROPERTY_NAME = 1 << 5;
        /// Inside a type annotation: `/` never starts a regex, `>>` splits.
        const IN_TYPE = 1 << 6;
        const IN_CLASS_PROPERTY = 1 << 7;
        const NO_ANON_FUNCTION_TYPE = 1 << 8;
        const HAS_FLOW_COMMENT = 1 << 9;
        /// Parsing a `@@iterator` style name; `@` continues the word.
        const IS_ITERATOR = 1 << 10;
    }
}

/// Kind of method whose body is being parsed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LabelKind {
    Loop,
    Switch,
}

/// An enclosing `break`/`continue` target.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub kind: Option<LabelKind>,
    pub name: Option<String>,
    pub statement_start: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct TokenizerState<'src> {
    pub(crate) buffer: &'src [u8],
    pub(crate) start_line: u32,

    pub strict: bool,
    pub flags: StateFlags,
    pub in_method: Option<MethodKind>,
    /// Nesting depth of class bodies.
    pub class_level: u32,

    /// Start of an expression that may turn out to be arrow parameters.
    pub potential_arrow_at: Option<usize>,
    pub no_arrow_at: Vec<usize>,
    pub no_arrow_params_conversion_at: Vec<usize>,
    /// First `yield` seen inside possible arrow parameters.
    pub yield_in_possible_arrow_parameters: Option<NodeId>,

    pub labels: Vec<Label>,
    pub(crate) decorator_stack: Vec<Vec<NodeId>>,

    // Append-only logs.
    pub(crate) tokens: Vec<TokenEntry>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) exported_identifiers: IndexSet<String>,
    pub(crate) errors: Vec<LexError>,

    // Comment attachment scratch space.
    pub trailing_comments: Vec<Comment>,
    pub leading_comments: Vec<Comment>,
    pub comment_stack: Vec<CommentStackEntry>,
    pub comment_previous_node: Option<NodeId>,

    // Cursor.
    pub(crate) pos: usize,
    pub(crate) line_start: usize,
    pub(crate) cur_line: u32,

    // Current token.
    pub(crate) ty: TokenType,
    pub(crate) value: TokenValue,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) start_loc: Position,
    pub(crate) end_loc: Position,

    // Previous token.
    pub(crate) last_tok_start: usize,
    pub(crate) last_tok_end: usize,
    pub(crate) last_tok_start_loc: Option<Position>,
    pub(crate) last_tok_end_loc: Option<Position>,

    pub(crate) context: Vec<TokContext>,
    pub expr_allowed: bool,

    /// The last word read contained a `\u` escape.
    pub contains_esc: bool,
    pub contains_octal: bool,
    pub octal_position: Option<usize>,
    pub invalid_template_escape_position: Option<usize>,
}

/// Saved state from [`TokenizerState::snapshot`].
///
/// Holds copies of everything but the logs, which are recorded by length.
#[derive(Clone, Debug)]
pub struct StateSnapshot {
    strict: bool,
    flags: StateFlags,
    in_method: Option<MethodKind>,
    class_level: u32,
    potential_arrow_at: Option<usize>,
    no_arrow_at: Vec<usize>,
    no_arrow_params_conversion_at: Vec<usize>,
    yield_in_possible_arrow_parameters: Option<NodeId>,
    labels: Vec<Label>,
    decorator_stack: Vec<Vec<NodeId>>,
    tokens_len: usize,
    comments_len: usize,
    exported_identifiers_len: usize,
    errors_len: usize,
    trailing_comments: Vec<Comment>,
    leading_comments: Vec<Comment>,
    comment_stack: Vec<CommentStackEntry>,
    comment_previous_node: Option<NodeId>,
    pos: usize,
    line_start: usize,
    cur_line: u32,
    ty: TokenType,
    value: TokenValue,
    start: usize,
    end: usize,
    start_loc: Position,
    end_loc: Position,
    last_tok_start: usize,
    last_tok_end: usize,
    last_tok_start_loc: Option<Position>,
    last_tok_end_loc: Option<Position>,
    context: Vec<TokContext>,
    expr_allowed: bool,
    contains_esc: bool,
    contains_octal: bool,
    octal_position: Option<usize>,
    invalid_template_escape_position: Option<usize>,
}

impl StateSnapshot {
    /// Byte offset the snapshot was taken at.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl<'src> TokenizerState<'src> {
    /// A fresh state at the start of `buffer`.
    ///
    /// The current token is a zero-width `Eof` at offset 0 until the reader
    /// produces the first real token.
    pub fn new(options: &Options, buffer: &'src [u8]) -> Result<Self, StateError> {
        options.validate()?;
        let start_loc = Position::new(options.start_line, 0);
        Ok(TokenizerState {
            buffer,
            start_line: options.start_line,
            strict: options.is_strict(),
            flags: StateFlags::empty(),
            in_method: None,
            class_level: 0,
            potential_arrow_at: None,
            no_arrow_at: Vec::new(),
            no_arrow_params_conversion_at: Vec::new(),
            yield_in_possible_arrow_parameters: None,
            labels: Vec::new(),
            decorator_stack: vec![Vec::new()],
            tokens: Vec::new(),
            comments: Vec::new(),
            exported_identifiers: IndexSet::new(),
            errors: Vec::new(),
            trailing_comments: Vec::new(),
            leading_comments: Vec::new(),
            comment_stack: Vec::new(),
            comment_previous_node: None,
            pos: 0,
            line_start: 0,
            cur_line: options.start_line,
            ty: TokenType::Eof,
            value: TokenValue::None,
            start: 0,
            end: 0,
            start_loc,
            end_loc: start_loc,
            last_tok_start: 0,
            last_tok_end: 0,
            last_tok_start_loc: None,
            last_tok_end_loc: None,
            context: vec![TokContext::BraceStatement],
            expr_allowed: true,
            contains_esc: false,
            contains_octal: false,
            octal_position: None,
            invalid_template_escape_position: None,
        })
    }

    // === Cursor ===

    #[inline]
    pub fn buffer(&self) -> &'src [u8] {
        self.buffer
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    #[inline]
    pub fn cur_line(&self) -> u32 {
        self.cur_line
    }

    /// Line and column of the cursor.
    #[inline]
    pub fn cur_position(&self) -> Position {
        Position::new(self.cur_line, column(self.line_start, self.pos))
    }

    /// Move the cursor past one code point without line tracking.
    ///
    /// Use [`bump`](Self::bump) when the code point may be a line
    /// terminator.
    #[inline]
    pub fn advance(&mut self) -> usize {
        self.pos = utf8::advance(self.buffer, self.pos);
        self.pos
    }

    /// Move the cursor past one code point, or past a whole line
    /// terminator (`\r\n` counts once), keeping `cur_line` and
    /// `line_start` in step.
    pub fn bump(&mut self) -> usize {
        match line_break_len(self.buffer, self.pos) {
            Some(len) => {
                self.pos += len;
                self.cur_line = self.cur_line.saturating_add(1);
                self.line_start = self.pos;
            }
            None => {
                self.advance();
            }
        }
        self.pos
    }

    /// Account for every line terminator ending in `from..to`, after the
    /// cursor jumped over that range in one step.
    pub(crate) fn track_line_breaks(&mut self, from: usize, to: usize) {
        let mut cur = from;
        while let Some(index) = next_line_break(self.buffer, cur) {
            if index >= to {
                break;
            }
            self.cur_line = self.cur_line.saturating_add(1);
            self.line_start = index + 1;
            cur = index + 1;
        }
    }

    /// Position of an arbitrary offset, honoring `start_line`.
    ///
    /// Line numbers stop at `u32::MAX`.
    pub fn position_of(&self, offset: usize) -> Position {
        if offset >= self.line_start && offset <= self.pos {
            return Position::new(self.cur_line, column(self.line_start, offset));
        }
        let info = get_line_info(self.buffer, offset);
        Position::new(info.line.saturating_add(self.start_line - 1), info.column)
    }

    // === Current and previous token ===

    #[inline]
    pub fn ty(&self) -> TokenType {
        self.ty
    }

    #[inline]
    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn start_loc(&self) -> Position {
        self.start_loc
    }

    #[inline]
    pub fn end_loc(&self) -> Position {
        self.end_loc
    }

    #[inline]
    pub fn last_tok_start(&self) -> usize {
        self.last_tok_start
    }

    #[inline]
    pub fn last_tok_end(&self) -> usize {
        self.last_tok_end
    }

    pub fn last_tok_start_loc(&self) -> Result<Position, StateError> {
        self.last_tok_start_loc.ok_or(StateError::NoPreviousToken)
    }

    pub fn last_tok_end_loc(&self) -> Result<Position, StateError> {
        self.last_tok_end_loc.ok_or(StateError::NoPreviousToken)
    }

    /// A line terminator separates the previous token from the current one.
    pub fn has_preceding_line_break(&self) -> bool {
        self.buffer
            .get(self.last_tok_end..self.start)
            .is_some_and(contains_new_line)
    }

    /// Shift the current token into the previous-token slot.
    pub(crate) fn retire_token(&mut self) {
        self.last_tok_start = self.start;
        self.last_tok_end = self.end;
        self.last_tok_start_loc = Some(self.start_loc);
        self.last_tok_end_loc = Some(self.end_loc);
    }

    // === Syntactic context ===

    /// Innermost context frame.
    #[inline]
    pub fn cur_context(&self) -> TokContext {
        self.context
            .last()
            .copied()
            .unwrap_or(TokContext::BraceStatement)
    }

    #[inline]
    pub fn context(&self) -> &[TokContext] {
        &self.context
    }

    pub fn push_context(&mut self, ctx: TokContext) {
        self.context.push(ctx);
        trace!(?ctx, depth = self.context.len(), "context push");
    }

    /// Pop the innermost frame. The base frame stays.
    pub fn pop_context(&mut self) -> Result<TokContext, StateError> {
        if self.context.len() <= 1 {
            return Err(StateError::ContextUnderflow);
        }
        let ctx = self.context.pop().ok_or(StateError::ContextUnderflow)?;
        trace!(?ctx, depth = self.context.len(), "context pop");
        Ok(ctx)
    }

    /// Run `f` inside a pushed `ctx` frame.
    ///
    /// The stack is cut back to its previous depth when `f` returns, also
    /// when `f` bailed out with an error mid-way.
    pub fn with_context<R>(&mut self, ctx: TokContext, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.context.len();
        self.push_context(ctx);
        let result = f(self);
        self.context.truncate(depth.max(1));
        result
    }

    // === Speculation ===

    /// Save everything needed to rewind to this point.
    pub fn snapshot(&self) -> StateSnapshot {
        // No `..`: a new field must be placed here explicitly.
        let TokenizerState {
            buffer: _,
            start_line: _,
            strict,
            flags,
            in_method,
            class_level,
            potential_arrow_at,
            no_arrow_at,
            no_arrow_params_conversion_at,
            yield_in_possible_arrow_parameters,
            labels,
            decorator_stack,
            tokens,
            comments,
            exported_identifiers,
            errors,
            trailing_comments,
            leading_comments,
            comment_stack,
            comment_previous_node,
            pos,
            line_start,
            cur_line,
            ty,
            value,
            start,
            end,
            start_loc,
            end_loc,
            last_tok_start,
            last_tok_end,
            last_tok_start_loc,
            last_tok_end_loc,
            context,
            expr_allowed,
            contains_esc,
            contains_octal,
            octal_position,
            invalid_template_escape_position,
        } = self;
        debug!(pos, tokens = tokens.len(), "snapshot");
        StateSnapshot {
            strict: *strict,
            flags: *flags,
            in_method: *in_method,
            class_level: *class_level,
            potential_arrow_at: *potential_arrow_at,
            no_arrow_at: no_arrow_at.clone(),
            no_arrow_params_conversion_at: no_arrow_params_conversion_at.clone(),
            yield_in_possible_arrow_parameters: *yield_in_possible_arrow_parameters,
            labels: labels.clone(),
            decorator_stack: decorator_stack.clone(),
            tokens_len: tokens.len(),
            comments_len: comments.len(),
            exported_identifiers_len: exported_identifiers.len(),
            errors_len: errors.len(),
            trailing_comments: trailing_comments.clone(),
            leading_comments: leading_comments.clone(),
            comment_stack: comment_stack.clone(),
            comment_previous_node: *comment_previous_node,
            pos: *pos,
            line_start: *line_start,
            cur_line: *cur_line,
            ty: *ty,
            value: value.clone(),
            start: *start,
            end: *end,
            start_loc: *start_loc,
            end_loc: *end_loc,
            last_tok_start: *last_tok_start,
            last_tok_end: *last_tok_end,
            last_tok_start_loc: *last_tok_start_loc,
            last_tok_end_loc: *last_tok_end_loc,
            context: context.clone(),
            expr_allowed: *expr_allowed,
            contains_esc: *contains_esc,
            contains_octal: *contains_octal,
            octal_position: *octal_position,
            invalid_template_escape_position: *invalid_template_escape_position,
        }
    }

    /// Rewind to `snapshot`, truncating the logs to their recorded lengths.
    ///
    /// Only meaningful for a snapshot taken from this state.
    pub fn restore(&mut self, snapshot: StateSnapshot) {
        let StateSnapshot {
            strict,
            flags,
            in_method,
            class_level,
            potential_arrow_at,
            no_arrow_at,
            no_arrow_params_conversion_at,
            yield_in_possible_arrow_parameters,
            labels,
            decorator_stack,
            tokens_len,
            comments_len,
            exported_identifiers_len,
            errors_len,
            trailing_comments,
            leading_comments,
            comment_stack,
            comment_previous_node,
            pos,
            line_start,
            cur_line,
            ty,
            value,
            start,
            end,
            start_loc,
            end_loc,
            last_tok_start,
            last_tok_end,
            last_tok_start_loc,
            last_tok_end_loc,
            context,
            expr_allowed,
            contains_esc,
            contains_octal,
            octal_position,
            invalid_template_escape_position,
        } = snapshot;
        debug!(from = self.pos, to = pos, "restore");
        self.strict = strict;
        self.flags = flags;
        self.in_method = in_method;
        self.class_level = class_level;
        self.potential_arrow_at = potential_arrow_at;
        self.no_arrow_at = no_arrow_at;
        self.no_arrow_params_conversion_at = no_arrow_params_conversion_at;
        self.yield_in_possible_arrow_parameters = yield_in_possible_arrow_parameters;
        self.labels = labels;
        self.decorator_stack = decorator_stack;
        self.tokens.truncate(tokens_len);
        self.comments.truncate(comments_len);
        self.exported_identifiers.truncate(exported_identifiers_len);
        self.errors.truncate(errors_len);
        self.trailing_comments = trailing_comments;
        self.leading_comments = leading_comments;
        self.comment_stack = comment_stack;
        self.comment_previous_node = comment_previous_node;
        self.pos = pos;
        self.line_start = line_start;
        self.cur_line = cur_line;
        self.ty = ty;
        self.value = value;
        self.start = start;
        self.end = end;
        self.start_loc = start_loc;
        self.end_loc = end_loc;
        self.last_tok_start = last_tok_start;
        self.last_tok_end = last_tok_end;
        self.last_tok_start_loc = last_tok_start_loc;
        self.last_tok_end_loc = last_tok_end_loc;
        self.context = context;
        self.expr_allowed = expr_allowed;
        self.contains_esc = contains_esc;
        self.contains_octal = contains_octal;
        self.octal_position = octal_position;
        self.invalid_template_escape_position = invalid_template_escape_position;
    }

    /// Run `f` on a copy of the state and keep the copy only if `f`
    /// succeeds.
    pub fn try_speculate<T, E>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut attempt = self.clone();
        let result = f(&mut attempt);
        debug!(ok = result.is_ok(), pos = attempt.pos, "speculation");
        if result.is_ok() {
            *self = attempt;
        }
        result
    }

    /// Run `f` and rewind afterwards, whatever it did.
    pub fn look_ahead<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    // === Labels ===

    /// Run `f` with an empty label set, as for a function body.
    pub fn with_function_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let outer = std::mem::take(&mut self.labels);
        let result = f(self);
        self.labels = outer;
        result
    }

    // === Decorators ===

    /// Open a frame for decorators of a nested declaration.
    pub fn push_decorator_frame(&mut self) {
        self.decorator_stack.push(Vec::new());
    }

    /// Close the innermost decorator frame and return what it held.
    pub fn pop_decorator_frame(&mut self) -> Result<Vec<NodeId>, StateError> {
        if self.decorator_stack.len() <= 1 {
            return Err(StateError::DecoratorUnderflow);
        }
        self.decorator_stack
            .pop()
            .ok_or(StateError::DecoratorUnderflow)
    }

    pub fn add_decorator(&mut self, decorator: NodeId) {
        if let Some(frame) = self.decorator_stack.last_mut() {
            frame.push(decorator);
        }
    }

    /// Decorators waiting in the innermost frame.
    pub fn current_decorators(&self) -> &[NodeId] {
        self.decorator_stack
            .last()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Empty the innermost frame, handing its decorators to the caller.
    pub fn take_decorators(&mut self) -> Vec<NodeId> {
        self.decorator_stack
            .last_mut()
            .map(std::mem::take)
            .unwrap_or_default()
    }

    #[inline]
    pub fn decorator_depth(&self) -> usize {
        self.decorator_stack.len()
    }

    // === Logs ===

    #[inline]
    pub fn tokens(&self) -> &[TokenEntry] {
        &self.tokens
    }

    #[inline]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    #[inline]
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    #[inline]
    pub fn exported_identifiers(&self) -> &IndexSet<String> {
        &self.exported_identifiers
    }

    /// Record an exported name. Returns `false` if it was already exported.
    pub fn add_exported_identifier(&mut self, name: impl Into<String>) -> bool {
        self.exported_identifiers.insert(name.into())
    }

    /// Record a lexical error at `offset` and keep going.
    pub(crate) fn record_error(&mut self, kind: LexErrorKind, offset: usize) {
        let loc = self.position_of(offset);
        trace!(%kind, offset, "lex error");
        self.errors.push(LexError { kind, offset, loc });
    }
}

#[inline]
fn column(from: usize, to: usize) -> u32 {
    u32::try_from(to.saturating_sub(from)).unwrap_or(u32::MAX)
}
