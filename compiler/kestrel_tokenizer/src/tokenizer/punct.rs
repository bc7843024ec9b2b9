//! Punctuators and operators.
//!
//! Each reader picks the longest operator at the cursor. Operators carry
//! their exact text as [`TokenValue::Op`]; plain punctuation carries none.

use kestrel_lexer_core::{contains_new_line, line_end};

use super::Tokenizer;
use crate::error::LexErrorKind;
use crate::options::Plugins;
use crate::state::StateFlags;
use crate::token::{TokenType, TokenValue};

impl Tokenizer<'_> {
    /// Read a token starting with the ASCII byte `byte`. Returns `false`
    /// when the input was consumed without producing a token.
    pub(super) fn read_punct(&mut self, byte: u8) -> bool {
        match byte {
            b'#' => return self.read_hash(),
            b'.' => self.read_dot(),
            b'(' => self.finish_punct(TokenType::ParenL),
            b')' => self.finish_punct(TokenType::ParenR),
            b';' => self.finish_punct(TokenType::Semi),
            b',' => self.finish_punct(TokenType::Comma),
            b'[' => self.finish_punct(TokenType::BracketL),
            b']' => self.finish_punct(TokenType::BracketR),
            b'{' => self.finish_punct(TokenType::BraceL),
            b'}' => self.finish_punct(TokenType::BraceR),
            b':' => self.finish_punct(TokenType::Colon),
            b'?' => self.read_question(),
            b'`' => self.finish_punct(TokenType::BackQuote),
            b'@' => self.finish_punct(TokenType::At),
            b'0' => match self.peek(1) {
                Some(b'x' | b'X') => self.read_radix_number(16),
                Some(b'o' | b'O') => self.read_radix_number(8),
                Some(b'b' | b'B') => self.read_radix_number(2),
                _ => self.read_number(false),
            },
            b'1'..=b'9' => self.read_number(false),
            b'"' | b'\'' => self.read_string(byte),
            b'/' => self.read_slash(),
            b'%' | b'*' => self.read_mult_modulo(byte),
            b'|' | b'&' => self.read_pipe_amp(byte),
            b'^' => self.read_caret(),
            b'+' | b'-' => return self.read_plus_min(byte),
            b'<' | b'>' => return self.read_lt_gt(byte),
            b'=' | b'!' => self.read_eq_excl(byte),
            b'~' => self.finish_op(TokenType::Tilde, "~"),
            _ => {
                self.state.record_error(
                    LexErrorKind::UnexpectedCharacter(char::from(byte)),
                    self.state.pos,
                );
                self.state.advance();
                return false;
            }
        }
        true
    }

    /// One-byte punctuation without a value.
    fn finish_punct(&mut self, ty: TokenType) {
        self.state.pos += 1;
        self.finish_token(ty, TokenValue::None);
    }

    /// An operator spelled `text`, which must be the bytes at the cursor.
    fn finish_op(&mut self, ty: TokenType, text: &'static str) {
        self.state.pos += text.len();
        self.finish_token(ty, TokenValue::Op(text));
    }

    fn in_type(&self) -> bool {
        self.state.flags.contains(StateFlags::IN_TYPE)
    }

    /// `#!` at offset 0, or `#` before a private name inside a class.
    fn read_hash(&mut self) -> bool {
        if self.state.pos == 0 && self.peek(1) == Some(b'!') {
            self.read_interpreter_directive();
            return true;
        }
        if self.options.has_plugin(Plugins::CLASS_PRIVATE) && self.state.class_level > 0 {
            self.finish_punct(TokenType::Hash);
            return true;
        }
        self.state
            .record_error(LexErrorKind::UnexpectedCharacter('#'), self.state.pos);
        self.state.advance();
        false
    }

    fn read_interpreter_directive(&mut self) {
        let buffer = self.state.buffer;
        let body = self.state.pos + 2;
        let end = line_end(buffer, body);
        let text = String::from_utf8_lossy(&buffer[body..end]).into_owned();
        self.state.pos = end;
        self.finish_token(TokenType::InterpreterDirective, TokenValue::Directive(text));
    }

    fn read_dot(&mut self) {
        match (self.peek(1), self.peek(2)) {
            (Some(b'0'..=b'9'), _) => self.read_number(true),
            (Some(b'.'), Some(b'.')) => {
                self.state.pos += 3;
                self.finish_token(TokenType::Ellipsis, TokenValue::None);
            }
            _ => self.finish_punct(TokenType::Dot),
        }
    }

    fn read_question(&mut self) {
        match (self.peek(1), self.peek(2)) {
            // `a?.5:b` is a conditional, not optional chaining.
            (Some(b'.'), next) if !matches!(next, Some(b'0'..=b'9')) => {
                self.state.pos += 2;
                self.finish_token(TokenType::QuestionDot, TokenValue::None);
            }
            (Some(b'?'), Some(b'=')) => self.finish_op(TokenType::Assign, "??="),
            (Some(b'?'), _) => self.finish_op(TokenType::NullishCoalescing, "??"),
            _ => self.finish_punct(TokenType::Question),
        }
    }

    fn read_slash(&mut self) {
        if self.state.expr_allowed && !self.in_type() {
            self.state.pos += 1;
            self.read_regexp();
            return;
        }
        if self.peek(1) == Some(b'=') {
            self.finish_op(TokenType::Assign, "/=");
        } else {
            self.finish_op(TokenType::Slash, "/");
        }
    }

    fn read_mult_modulo(&mut self, byte: u8) {
        let in_type = self.in_type();
        let (ty, text) = match (byte, self.peek(1), self.peek(2)) {
            (b'*', Some(b'*'), Some(b'=')) if !in_type => (TokenType::Assign, "**="),
            (b'*', Some(b'*'), _) => (TokenType::Exponent, "**"),
            (b'*', Some(b'='), _) if !in_type => (TokenType::Assign, "*="),
            (b'*', ..) => (TokenType::Star, "*"),
            (_, Some(b'='), _) if !in_type => (TokenType::Assign, "%="),
            _ => (TokenType::Modulo, "%"),
        };
        self.finish_op(ty, text);
    }

    fn read_pipe_amp(&mut self, byte: u8) {
        let (ty, text) = match (byte, self.peek(1), self.peek(2)) {
            (b'|', Some(b'|'), Some(b'=')) => (TokenType::Assign, "||="),
            (b'|', Some(b'|'), _) => (TokenType::LogicalOr, "||"),
            (b'&', Some(b'&'), Some(b'=')) => (TokenType::Assign, "&&="),
            (b'&', Some(b'&'), _) => (TokenType::LogicalAnd, "&&"),
            (b'|', Some(b'='), _) => (TokenType::Assign, "|="),
            (b'&', Some(b'='), _) => (TokenType::Assign, "&="),
            (b'|', ..) => (TokenType::BitwiseOr, "|"),
            _ => (TokenType::BitwiseAnd, "&"),
        };
        self.finish_op(ty, text);
    }

    fn read_caret(&mut self) {
        if self.peek(1) == Some(b'=') {
            self.finish_op(TokenType::Assign, "^=");
        } else {
            self.finish_op(TokenType::BitwiseXor, "^");
        }
    }

    /// Start of a line for the purposes of `-->` comments: nothing but
    /// whitespace and comments since the previous line break.
    fn at_line_start(&self) -> bool {
        self.state.last_tok_end == 0
            || self
                .state
                .buffer
                .get(self.state.last_tok_end..self.state.pos)
                .is_some_and(contains_new_line)
    }

    fn read_plus_min(&mut self, byte: u8) -> bool {
        let next = self.peek(1);
        if next == Some(byte) {
            if byte == b'-'
                && !self.in_module()
                && self.peek(2) == Some(b'>')
                && self.at_line_start()
            {
                // `-->` closes an HTML comment and comments out the line.
                self.skip_line_comment(3);
                return false;
            }
            self.finish_op(TokenType::IncDec, if byte == b'+' { "++" } else { "--" });
            return true;
        }
        match (byte, next) {
            (b'+', Some(b'=')) => self.finish_op(TokenType::Assign, "+="),
            (_, Some(b'=')) => self.finish_op(TokenType::Assign, "-="),
            (b'+', _) => self.finish_op(TokenType::PlusMin, "+"),
            _ => self.finish_op(TokenType::PlusMin, "-"),
        }
        true
    }

    fn read_lt_gt(&mut self, byte: u8) -> bool {
        // Type arguments close one bracket at a time: `A<B<C>>`.
        if self.in_type() {
            self.finish_op(TokenType::Relational, if byte == b'<' { "<" } else { ">" });
            return true;
        }
        let next = self.peek(1);
        if next == Some(byte) {
            let (shift, assign) = match (byte, self.peek(2)) {
                (b'<', _) => ("<<", "<<="),
                (_, Some(b'>')) => (">>>", ">>>="),
                _ => (">>", ">>="),
            };
            if self.peek(shift.len()) == Some(b'=') {
                self.finish_op(TokenType::Assign, assign);
            } else {
                self.finish_op(TokenType::BitShift, shift);
            }
            return true;
        }
        if byte == b'<'
            && next == Some(b'!')
            && !self.in_module()
            && self.peek(2) == Some(b'-')
            && self.peek(3) == Some(b'-')
        {
            // `<!--` opens an HTML comment, read as a line comment.
            self.skip_line_comment(4);
            return false;
        }
        let text = match (byte, next) {
            (b'<', Some(b'=')) => "<=",
            (b'<', _) => "<",
            (_, Some(b'=')) => ">=",
            _ => ">",
        };
        self.finish_op(TokenType::Relational, text);
        true
    }

    fn read_eq_excl(&mut self, byte: u8) {
        let (ty, text) = match (byte, self.peek(1), self.peek(2)) {
            (b'=', Some(b'='), Some(b'=')) => (TokenType::Equality, "==="),
            (b'!', Some(b'='), Some(b'=')) => (TokenType::Equality, "!=="),
            (b'=', Some(b'='), _) => (TokenType::Equality, "=="),
            (b'!', Some(b'='), _) => (TokenType::Equality, "!="),
            (b'=', Some(b'>'), _) => {
                self.state.pos += 2;
                self.finish_token(TokenType::Arrow, TokenValue::None);
                return;
            }
            (b'=', ..) => (TokenType::Eq, "="),
            _ => (TokenType::Bang, "!"),
        };
        self.finish_op(ty, text);
    }
}
