//! Regular expression literals.
//!
//! Only the extent of the literal is found here: the body runs to the
//! first `/` outside a character class that is not escaped. The pattern
//! itself is validated elsewhere.

use kestrel_lexer_core::{line_break_len, utf8};

use super::word::is_identifier_char;
use super::Tokenizer;
use crate::error::LexErrorKind;
use crate::token::{TokenType, TokenValue};

const VALID_FLAGS: &[u8] = b"dgimsuvy";

impl Tokenizer<'_> {
    /// Read a regular expression, cursor just past the opening `/`.
    pub(super) fn read_regexp(&mut self) {
        let buffer = self.state.buffer;
        let start = self.state.pos;
        let mut escaped = false;
        let mut in_class = false;

        let terminated = loop {
            let pos = self.state.pos;
            let Some(byte) = self.byte_at(pos) else {
                break false;
            };
            if line_break_len(buffer, pos).is_some() {
                break false;
            }
            if escaped {
                escaped = false;
            } else {
                match byte {
                    b'[' => in_class = true,
                    b']' if in_class => in_class = false,
                    b'/' if !in_class => break true,
                    _ => {}
                }
                escaped = byte == b'\\';
            }
            self.state.advance();
        };

        let pattern = String::from_utf8_lossy(&buffer[start..self.state.pos]).into_owned();
        if terminated {
            self.state.pos += 1;
        } else {
            self.state
                .record_error(LexErrorKind::UnterminatedRegExp, start);
        }
        let flags = self.read_regexp_flags();
        self.finish_token(TokenType::RegExp, TokenValue::RegExp { pattern, flags });
    }

    fn read_regexp_flags(&mut self) -> String {
        let buffer = self.state.buffer;
        let mut flags = String::new();
        while let Some((ch, width)) = utf8::decode(buffer, self.state.pos) {
            let pos = self.state.pos;
            if u8::try_from(ch).is_ok_and(|byte| VALID_FLAGS.contains(&byte)) {
                if flags.contains(ch) {
                    self.state
                        .record_error(LexErrorKind::DuplicateRegExpFlag(ch), pos);
                } else {
                    flags.push(ch);
                }
            } else if is_identifier_char(ch) || ch == '\\' {
                self.state
                    .record_error(LexErrorKind::InvalidRegExpFlag(ch), pos);
            } else {
                break;
            }
            self.state.pos += width;
        }
        flags
    }
}
