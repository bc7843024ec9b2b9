//! String literals, template chunks, and escape sequences.
//!
//! Cooked values are built in a [`Cooked`] buffer that pairs surrogate
//! escapes such as `\uD83D\uDE00` into one scalar value. Unpaired
//! surrogates become U+FFFD since a Rust `String` cannot hold them.
//!
//! Escape errors are handled two ways. In strings and words they are
//! recorded as lexical errors. In templates they are not errors at all
//! (tagged templates may contain anything); the chunk's cooked value
//! becomes `None` and `invalid_template_escape_position` marks the escape.

use kestrel_lexer_core::{line_break_len, utf8};

use super::Tokenizer;
use crate::error::LexErrorKind;
use crate::token::{TokenType, TokenValue};

/// Result of reading one escape sequence.
enum Escape {
    /// A code point or UTF-16 code unit.
    Code(u32),
    /// A backslash before a line terminator; contributes nothing.
    LineContinuation,
    Invalid,
}

#[derive(Default)]
struct Cooked {
    out: String,
    /// High surrogate waiting for its low half.
    high: Option<u32>,
}

impl Cooked {
    fn push_raw(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.flush();
        self.out.push_str(&String::from_utf8_lossy(bytes));
    }

    fn push(&mut self, ch: char) {
        self.flush();
        self.out.push(ch);
    }

    fn push_code(&mut self, code: u32) {
        match code {
            0xD800..=0xDBFF => {
                self.flush();
                self.high = Some(code);
            }
            0xDC00..=0xDFFF => {
                let combined = self
                    .high
                    .take()
                    .map(|high| 0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00));
                self.out.push(
                    combined
                        .and_then(char::from_u32)
                        .unwrap_or(char::REPLACEMENT_CHARACTER),
                );
            }
            _ => self.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
    }

    fn flush(&mut self) {
        if self.high.take().is_some() {
            self.out.push(char::REPLACEMENT_CHARACTER);
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        self.out
    }
}

impl Tokenizer<'_> {
    /// Read a string literal delimited by `quote`.
    pub(super) fn read_string(&mut self, quote: u8) {
        let buffer = self.state.buffer;
        let start = self.state.pos;
        self.state.pos += 1;
        let mut out = Cooked::default();
        let mut chunk_start = self.state.pos;

        loop {
            let pos = self.state.pos;
            let Some(byte) = self.byte_at(pos) else {
                self.state
                    .record_error(LexErrorKind::UnterminatedString, start);
                out.push_raw(&buffer[chunk_start..pos]);
                break;
            };
            match byte {
                _ if byte == quote => {
                    out.push_raw(&buffer[chunk_start..pos]);
                    self.state.pos += 1;
                    break;
                }
                b'\\' => {
                    out.push_raw(&buffer[chunk_start..pos]);
                    if let Escape::Code(code) = self.read_escaped_char(false) {
                        out.push_code(code);
                    }
                    chunk_start = self.state.pos;
                }
                b'\n' | b'\r' => {
                    // The terminator is left for the next token.
                    self.state
                        .record_error(LexErrorKind::UnterminatedString, start);
                    out.push_raw(&buffer[chunk_start..pos]);
                    break;
                }
                // U+2028 and U+2029 are allowed in strings but still end a line.
                _ if line_break_len(buffer, pos).is_some() => {
                    self.state.bump();
                }
                _ => {
                    self.state.advance();
                }
            }
        }

        self.finish_token(TokenType::Str, TokenValue::Str(out.finish()));
    }

    /// Read one template chunk, or the `` ` `` / `${` that follows one.
    pub(super) fn read_tmpl_token(&mut self) {
        let buffer = self.state.buffer;
        let mut out = Cooked::default();
        let mut chunk_start = self.state.pos;
        let mut contains_invalid = false;

        // At end of input the chunk just ends; the missing backquote is
        // reported when the `Eof` token is read.
        while let Some(byte) = self.byte_at(self.state.pos) {
            let pos = self.state.pos;
            let interpolation = byte == b'$' && self.byte_at(pos + 1) == Some(b'{');
            if byte == b'`' || interpolation {
                if pos == self.state.start && self.state.ty == TokenType::Template {
                    if interpolation {
                        self.state.pos += 2;
                        self.finish_token(TokenType::DollarBraceL, TokenValue::None);
                    } else {
                        self.state.pos += 1;
                        self.finish_token(TokenType::BackQuote, TokenValue::None);
                    }
                    return;
                }
                break;
            }
            match byte {
                b'\\' => {
                    out.push_raw(&buffer[chunk_start..pos]);
                    match self.read_escaped_char(true) {
                        Escape::Code(code) => out.push_code(code),
                        Escape::LineContinuation => {}
                        Escape::Invalid => contains_invalid = true,
                    }
                    chunk_start = self.state.pos;
                }
                b'\r' | b'\n' => {
                    // CR and CRLF cook to LF.
                    out.push_raw(&buffer[chunk_start..pos]);
                    self.state.bump();
                    out.push('\n');
                    chunk_start = self.state.pos;
                }
                _ if line_break_len(buffer, pos).is_some() => {
                    self.state.bump();
                }
                _ => {
                    self.state.advance();
                }
            }
        }

        out.push_raw(&buffer[chunk_start..self.state.pos]);
        let cooked = (!contains_invalid).then(|| out.finish());
        self.finish_token(TokenType::Template, TokenValue::Template(cooked));
    }

    /// Read an escape sequence, cursor on the backslash.
    fn read_escaped_char(&mut self, in_template: bool) -> Escape {
        let buffer = self.state.buffer;
        self.state.pos += 1;
        let pos = self.state.pos;
        let Some(byte) = self.byte_at(pos) else {
            return Escape::Invalid;
        };
        let simple = match byte {
            b'n' => Some(0x0A),
            b'r' => Some(0x0D),
            b't' => Some(0x09),
            b'b' => Some(0x08),
            b'v' => Some(0x0B),
            b'f' => Some(0x0C),
            _ => None,
        };
        if let Some(code) = simple {
            self.state.pos += 1;
            return Escape::Code(code);
        }
        match byte {
            b'x' => {
                self.state.pos += 1;
                match self.read_hex_digits(2) {
                    Some(code) => Escape::Code(code),
                    None => {
                        self.escape_error(LexErrorKind::BadEscape, pos + 1, pos, in_template);
                        Escape::Invalid
                    }
                }
            }
            b'u' => {
                self.state.pos += 1;
                self.read_code_point(in_template)
                    .map_or(Escape::Invalid, Escape::Code)
            }
            b'0'..=b'7' => self.read_octal_escape(in_template),
            _ if line_break_len(buffer, pos).is_some() => {
                self.state.bump();
                Escape::LineContinuation
            }
            _ => match utf8::decode(buffer, pos) {
                Some((ch, width)) => {
                    self.state.pos += width;
                    Escape::Code(u32::from(ch))
                }
                None => {
                    self.state.record_error(LexErrorKind::InvalidEncoding, pos);
                    self.state.advance();
                    Escape::Code(u32::from(char::REPLACEMENT_CHARACTER))
                }
            },
        }
    }

    /// Legacy octal escape (`\0`..`\377`), cursor on the first digit.
    fn read_octal_escape(&mut self, in_template: bool) -> Escape {
        let code_pos = self.state.pos;
        let digits = self.state.buffer[code_pos..]
            .iter()
            .take(3)
            .take_while(|byte| matches!(byte, b'0'..=b'7'))
            .count();
        let mut len = digits;
        let mut value = octal_value(&self.state.buffer[code_pos..code_pos + len]);
        if value > 255 {
            len -= 1;
            value = octal_value(&self.state.buffer[code_pos..code_pos + len]);
        }
        if value > 0 {
            if in_template {
                self.state.invalid_template_escape_position = Some(code_pos);
                self.state.pos = code_pos + len;
                return Escape::Invalid;
            }
            if self.state.strict {
                self.state
                    .record_error(LexErrorKind::OctalInStrictMode, code_pos);
            } else if !self.state.contains_octal {
                self.state.contains_octal = true;
                self.state.octal_position = Some(code_pos);
            }
        }
        self.state.pos = code_pos + len;
        Escape::Code(value)
    }

    /// Body of a `\u` escape, cursor just past the `u`.
    ///
    /// Returns `None` for malformed escapes after reporting them.
    pub(super) fn read_code_point(&mut self, in_template: bool) -> Option<u32> {
        let letter = self.state.pos - 1;
        let body = if self.byte_at(self.state.pos) == Some(b'{') {
            self.state.pos + 1
        } else {
            self.state.pos
        };
        let code = if body > self.state.pos {
            self.state.pos = body;
            let code = memchr::memchr(b'}', &self.state.buffer[body..])
                .and_then(|len| self.read_hex_digits(len));
            if code.is_some() {
                self.state.pos += 1;
            }
            code
        } else {
            self.read_hex_digits(4)
        };
        match code {
            Some(code) if code <= 0x0010_FFFF => Some(code),
            Some(_) => {
                self.escape_error(LexErrorKind::CodePointOutOfBounds, body, letter, in_template);
                None
            }
            None => {
                self.escape_error(LexErrorKind::BadEscape, body, letter, in_template);
                None
            }
        }
    }

    /// Exactly `len` hex digits. The cursor stays after whatever digits
    /// were read, even on failure.
    fn read_hex_digits(&mut self, len: usize) -> Option<u32> {
        let start = self.state.pos;
        let mut total: u32 = 0;
        while self.state.pos - start < len {
            let Some(digit) = self
                .byte_at(self.state.pos)
                .and_then(|byte| char::from(byte).to_digit(16))
            else {
                break;
            };
            total = total.saturating_mul(16).saturating_add(digit);
            self.state.pos += 1;
        }
        let read = self.state.pos - start;
        (read > 0 && read == len).then_some(total)
    }

    /// Report a malformed escape whose letter (`x` or `u`) is at `letter`.
    fn escape_error(
        &mut self,
        kind: LexErrorKind,
        offset: usize,
        letter: usize,
        in_template: bool,
    ) {
        if in_template {
            // Resume after the letter; the chunk has no cooked value anyway.
            self.state.invalid_template_escape_position = Some(letter);
            self.state.pos = letter + 1;
        } else {
            self.state.record_error(kind, offset);
        }
    }
}

fn octal_value(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0, |acc, &digit| acc * 8 + u32::from(digit - b'0'))
}
