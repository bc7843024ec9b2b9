//! Identifiers and keywords.
//!
//! Non-ASCII code points are classified with the `unicode-ident` tables.
//! Those implement `XID_Start`/`XID_Continue`, which leave out U+309B and
//! U+309C; both are `ID_Start`, so they are added back here.

use kestrel_lexer_core::utf8;

use super::Tokenizer;
use crate::error::LexErrorKind;
use crate::state::StateFlags;
use crate::token::{TokenType, TokenValue};

const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';

/// Katakana-Hiragana voiced and semi-voiced sound marks.
#[inline]
fn is_other_id_start_outside_xid(ch: char) -> bool {
    matches!(ch, '\u{309B}' | '\u{309C}')
}

pub(crate) fn is_identifier_start(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphabetic() || ch == '$' || ch == '_'
    } else {
        unicode_ident::is_xid_start(ch) || is_other_id_start_outside_xid(ch)
    }
}

pub(crate) fn is_identifier_char(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphanumeric() || ch == '$' || ch == '_'
    } else {
        unicode_ident::is_xid_continue(ch)
            || is_other_id_start_outside_xid(ch)
            || ch == ZWNJ
            || ch == ZWJ
    }
}

impl Tokenizer<'_> {
    /// Read an identifier or keyword.
    pub(super) fn read_word(&mut self) {
        let start = self.state.pos;
        let word = self.read_word1();
        let ty = match TokenType::from_keyword(&word) {
            Some(keyword) => {
                if self.state.contains_esc {
                    self.state
                        .record_error(LexErrorKind::EscapedKeyword(word.clone()), start);
                }
                keyword
            }
            None => TokenType::Name,
        };
        self.finish_token(ty, TokenValue::Name(word));
    }

    /// Read the text of a word, resolving `\u` escapes. Sets
    /// `contains_esc` when any were present.
    pub(super) fn read_word1(&mut self) -> String {
        self.state.contains_esc = false;
        let buffer = self.state.buffer;
        let mut word = String::new();
        let mut first = true;
        let mut chunk_start = self.state.pos;

        while let Some(&byte) = buffer.get(self.state.pos) {
            if byte == b'\\' {
                self.state.contains_esc = true;
                word.push_str(&String::from_utf8_lossy(&buffer[chunk_start..self.state.pos]));
                self.read_word_escape(&mut word, first);
                chunk_start = self.state.pos;
            } else if byte == b'@' && self.state.flags.contains(StateFlags::IS_ITERATOR) {
                self.state.pos += 1;
            } else {
                match utf8::decode(buffer, self.state.pos) {
                    Some((ch, width)) if is_identifier_char(ch) => self.state.pos += width,
                    _ => break,
                }
            }
            first = false;
        }

        word.push_str(&String::from_utf8_lossy(&buffer[chunk_start..self.state.pos]));
        word
    }

    /// `\uXXXX` or `\u{X...}` inside a word, cursor on the backslash.
    fn read_word_escape(&mut self, word: &mut String, first: bool) {
        let esc_start = self.state.pos;
        self.state.pos += 1;
        if self.byte_at(self.state.pos) != Some(b'u') {
            self.state
                .record_error(LexErrorKind::ExpectedUnicodeEscape, self.state.pos);
            return;
        }
        self.state.pos += 1;
        let Some(code) = self.read_code_point(false) else {
            return;
        };
        let valid: fn(char) -> bool = if first {
            is_identifier_start
        } else {
            is_identifier_char
        };
        match char::from_u32(code) {
            Some(ch) if valid(ch) => word.push(ch),
            _ => self
                .state
                .record_error(LexErrorKind::InvalidUnicodeEscape, esc_start),
        }
    }
}
