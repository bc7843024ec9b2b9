//! Numeric literals.
//!
//! Values are computed the way an ECMAScript engine would: decimal
//! literals parse as `f64`, radix literals accumulate digit by digit in
//! `f64`, and legacy octal (`017`) is base 8 unless a digit `8` or `9`
//! makes it decimal.

use kestrel_lexer_core::utf8;

use super::word::is_identifier_start;
use super::Tokenizer;
use crate::error::LexErrorKind;
use crate::options::Plugins;
use crate::token::{TokenType, TokenValue};

/// Characters that may not sit next to a `_` numeric separator.
fn is_forbidden_separator_sibling(radix: u32, byte: u8) -> bool {
    if radix == 16 {
        matches!(byte, b'.' | b'X' | b'_' | b'x')
    } else {
        matches!(byte, b'.' | b'B' | b'E' | b'O' | b'_' | b'b' | b'e' | b'o')
    }
}

impl Tokenizer<'_> {
    /// Read digits of `radix`, with `_` separators when enabled.
    ///
    /// Returns `None` if no digit was read.
    fn read_int(&mut self, radix: u32) -> Option<f64> {
        let separators = self.options.has_plugin(Plugins::NUMERIC_SEPARATOR);
        let mut total = 0.0_f64;
        let mut digits = 0usize;

        while let Some(byte) = self.byte_at(self.state.pos) {
            if byte == b'_' && separators {
                let pos = self.state.pos;
                let prev = pos.checked_sub(1).and_then(|prev| self.byte_at(prev));
                let next = self.byte_at(pos + 1);
                let allowed = next.is_some_and(|next| char::from(next).to_digit(radix).is_some())
                    && !prev.is_some_and(|prev| is_forbidden_separator_sibling(radix, prev))
                    && !next.is_some_and(|next| is_forbidden_separator_sibling(radix, next));
                if !allowed {
                    self.state
                        .record_error(LexErrorKind::InvalidNumericSeparator, pos);
                }
                self.state.pos += 1;
                continue;
            }
            let Some(digit) = char::from(byte).to_digit(radix) else {
                break;
            };
            total = total * f64::from(radix) + f64::from(digit);
            digits += 1;
            self.state.pos += 1;
        }

        (digits > 0).then_some(total)
    }

    /// `0x`, `0o` or `0b` literal, cursor on the `0`.
    pub(super) fn read_radix_number(&mut self, radix: u32) {
        let start = self.state.pos;
        self.state.pos += 2;
        let value = self.read_int(radix);
        if value.is_none() {
            self.state
                .record_error(LexErrorKind::ExpectedNumberInRadix(radix), start + 2);
        }
        let is_bigint = self.eat_bigint_suffix();
        self.check_identifier_after_number();

        if is_bigint {
            let digits = self.literal_text(start);
            self.finish_token(TokenType::BigInt, TokenValue::BigInt(digits));
        } else {
            self.finish_token(TokenType::Num, TokenValue::Number(value.unwrap_or(f64::NAN)));
        }
    }

    /// Decimal literal, cursor on the first digit or on the `.` of `.5`.
    pub(super) fn read_number(&mut self, starts_with_dot: bool) {
        let start = self.state.pos;
        let mut is_float = false;

        if !starts_with_dot && self.read_int(10).is_none() {
            self.state.record_error(LexErrorKind::InvalidNumber, start);
        }
        // `07` and `08` both have a leading zero; only the former is octal.
        let leading_zero = !starts_with_dot
            && self.state.pos - start >= 2
            && self.byte_at(start) == Some(b'0');
        let legacy_octal = leading_zero
            && !self.state.buffer[start..self.state.pos]
                .iter()
                .any(|byte| matches!(byte, b'8' | b'9'));
        if leading_zero && self.state.strict {
            self.state
                .record_error(LexErrorKind::OctalInStrictMode, start);
        }

        if !legacy_octal && (starts_with_dot || self.byte_at(self.state.pos) == Some(b'.')) {
            self.state.pos += 1;
            self.read_int(10);
            is_float = true;
        }
        if !legacy_octal && matches!(self.byte_at(self.state.pos), Some(b'e' | b'E')) {
            self.state.pos += 1;
            if matches!(self.byte_at(self.state.pos), Some(b'+' | b'-')) {
                self.state.pos += 1;
            }
            if self.read_int(10).is_none() {
                self.state.record_error(LexErrorKind::InvalidNumber, start);
            }
            is_float = true;
        }

        let is_bigint = self.eat_bigint_suffix();
        if is_bigint && (is_float || leading_zero) {
            self.state.record_error(LexErrorKind::InvalidBigInt, start);
        }
        self.check_identifier_after_number();

        let text = self.literal_text(start);
        if is_bigint {
            self.finish_token(TokenType::BigInt, TokenValue::BigInt(text));
            return;
        }
        let value = if legacy_octal {
            text.bytes()
                .fold(0.0, |acc, byte| acc * 8.0 + f64::from(byte - b'0'))
        } else {
            text.parse::<f64>().unwrap_or(f64::NAN)
        };
        self.finish_token(TokenType::Num, TokenValue::Number(value));
    }

    fn eat_bigint_suffix(&mut self) -> bool {
        if self.byte_at(self.state.pos) == Some(b'n') {
            self.state.pos += 1;
            true
        } else {
            false
        }
    }

    /// `3in x` is two tokens run together, which the grammar never allows.
    fn check_identifier_after_number(&mut self) {
        let pos = self.state.pos;
        if utf8::decode(self.state.buffer, pos).is_some_and(|(ch, _)| is_identifier_start(ch)) {
            self.state
                .record_error(LexErrorKind::IdentifierAfterNumber, pos);
        }
    }

    /// Source text from `start` to the cursor, without separators and
    /// the BigInt suffix.
    fn literal_text(&self, start: usize) -> String {
        self.state.buffer[start..self.state.pos]
            .iter()
            .filter(|byte| !matches!(byte, b'_' | b'n'))
            .map(|&byte| char::from(byte))
            .collect()
    }
}
