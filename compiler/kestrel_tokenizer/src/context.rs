//! Syntactic context stack used for contextual lexing.
//!
//! A `/` after `)` can be division (`(a) / b`) or start a regular
//! expression (`if (a) /re/.test(b)`); a `{` can open a block or an object
//! literal. The tokenizer keeps a shallow model of the enclosing brackets
//! on [`TokenizerState::context`](crate::TokenizerState::context) and
//! updates it after every token, together with `expr_allowed`.

use tracing::trace;

use crate::state::{StateFlags, TokenizerState};
use crate::token::{TokenType, TokenValue};

/// One frame of the syntactic context stack.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokContext {
    /// `{` opening a block. The base frame of every stack.
    BraceStatement,
    /// `{` opening an object literal or other expression.
    BraceExpression,
    /// `${` inside a template.
    TemplateQuasi,
    /// `(` after `if`, `for`, `with`, or `while`.
    ParenStatement,
    ParenExpression,
    /// Inside a template literal's text.
    Template,
    FunctionExpression,
    FunctionStatement,
}

impl TokContext {
    /// Token text that opened the frame.
    pub const fn token(self) -> &'static str {
        match self {
            TokContext::BraceStatement | TokContext::BraceExpression => "{",
            TokContext::TemplateQuasi => "${",
            TokContext::ParenStatement | TokContext::ParenExpression => "(",
            TokContext::Template => "`",
            TokContext::FunctionExpression | TokContext::FunctionStatement => "function",
        }
    }

    pub const fn is_expr(self) -> bool {
        matches!(
            self,
            TokContext::BraceExpression
                | TokContext::ParenExpression
                | TokContext::Template
                | TokContext::FunctionExpression
        )
    }

    /// Whitespace is part of the token text inside this frame.
    pub const fn preserve_space(self) -> bool {
        matches!(self, TokContext::Template)
    }

    #[inline]
    pub const fn is_function(self) -> bool {
        matches!(
            self,
            TokContext::FunctionExpression | TokContext::FunctionStatement
        )
    }
}

impl TokenizerState<'_> {
    /// Whether a `{` after `prev` opens a block rather than an expression.
    pub(crate) fn brace_is_block(&self, prev: TokenType) -> bool {
        let parent = self.cur_context();
        if parent.is_function() {
            return true;
        }
        if prev == TokenType::Colon
            && matches!(
                parent,
                TokContext::BraceStatement | TokContext::BraceExpression
            )
        {
            return !parent.is_expr();
        }
        if prev == TokenType::Return || (prev == TokenType::Name && self.expr_allowed) {
            return self.has_preceding_line_break();
        }
        match prev {
            TokenType::Else
            | TokenType::Semi
            | TokenType::Eof
            | TokenType::ParenR
            | TokenType::Arrow => true,
            TokenType::BraceL => parent == TokContext::BraceStatement,
            _ => !self.expr_allowed,
        }
    }

    /// Update the context stack and `expr_allowed` after finishing a token
    /// of the current type. `prev` is the type of the token before it.
    pub(crate) fn update_context(&mut self, prev: TokenType) {
        let ty = self.ty;
        if ty.is_keyword() && matches!(prev, TokenType::Dot | TokenType::QuestionDot) {
            // `a.if` is a property name.
            self.expr_allowed = false;
            return;
        }
        match ty {
            TokenType::ParenR | TokenType::BraceR => self.close_bracket(),
            TokenType::Name => {
                let allowed = prev != TokenType::Dot
                    && match &self.value {
                        TokenValue::Name(name) if name == "of" => !self.expr_allowed,
                        TokenValue::Name(name) if name == "yield" => {
                            self.flags.contains(StateFlags::IN_GENERATOR)
                        }
                        _ => false,
                    };
                self.expr_allowed = allowed;
                self.flags.remove(StateFlags::IS_ITERATOR);
            }
            TokenType::BraceL => {
                let ctx = if self.brace_is_block(prev) {
                    TokContext::BraceStatement
                } else {
                    TokContext::BraceExpression
                };
                self.push_context(ctx);
                self.expr_allowed = true;
            }
            TokenType::DollarBraceL => {
                self.push_context(TokContext::TemplateQuasi);
                self.expr_allowed = true;
            }
            TokenType::ParenL => {
                let statement = matches!(
                    prev,
                    TokenType::If | TokenType::For | TokenType::With | TokenType::While
                );
                self.push_context(if statement {
                    TokContext::ParenStatement
                } else {
                    TokContext::ParenExpression
                });
                self.expr_allowed = true;
            }
            // `expr_allowed` is unchanged by `++`/`--`.
            TokenType::IncDec => {}
            TokenType::Function | TokenType::Class => {
                let expression = prev.before_expr()
                    && prev != TokenType::Semi
                    && prev != TokenType::Else
                    && !(prev == TokenType::Return && self.has_preceding_line_break())
                    && !(matches!(prev, TokenType::Colon | TokenType::BraceL)
                        && self.cur_context() == TokContext::BraceStatement);
                self.push_context(if expression {
                    TokContext::FunctionExpression
                } else {
                    TokContext::FunctionStatement
                });
                self.expr_allowed = false;
            }
            TokenType::BackQuote => {
                if self.cur_context() == TokContext::Template {
                    self.pop_frame();
                } else {
                    self.push_context(TokContext::Template);
                }
                self.expr_allowed = false;
            }
            _ => self.expr_allowed = ty.before_expr(),
        }
    }

    /// `)` or `}`: pop the frame it closes, and the function frame a
    /// function body brace was opened in.
    fn close_bracket(&mut self) {
        let Some(mut out) = self.pop_frame() else {
            self.expr_allowed = true;
            return;
        };
        if out == TokContext::BraceStatement && self.cur_context().is_function() {
            out = self.pop_frame().unwrap_or(out);
        }
        self.expr_allowed = !out.is_expr();
    }

    /// Pop a frame, keeping the base frame. Unbalanced closers in
    /// malformed input land here.
    fn pop_frame(&mut self) -> Option<TokContext> {
        if self.context.len() <= 1 {
            return None;
        }
        let out = self.context.pop();
        trace!(ctx = ?out, depth = self.context.len(), "context pop");
        out
    }
}
