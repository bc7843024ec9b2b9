//! One-code-point-at-a-time UTF-8 advancing.
//!
//! [`advance`] moves a byte cursor past exactly one code point. It follows
//! the well-formed byte sequence table of the Unicode standard (Table 3-7):
//!
//! | Lead        | 2nd byte    | 3rd byte    | 4th byte    |
//! |-------------|-------------|-------------|-------------|
//! | `00..=7F`   |             |             |             |
//! | `C2..=DF`   | `80..=BF`   |             |             |
//! | `E0`        | `A0..=BF`   | `80..=BF`   |             |
//! | `E1..=EC`   | `80..=BF`   | `80..=BF`   |             |
//! | `ED`        | `80..=9F`   | `80..=BF`   |             |
//! | `EE..=EF`   | `80..=BF`   | `80..=BF`   |             |
//! | `F0`        | `90..=BF`   | `80..=BF`   | `80..=BF`   |
//! | `F1..=F3`   | `80..=BF`   | `80..=BF`   | `80..=BF`   |
//! | `F4`        | `80..=8F`   | `80..=BF`   | `80..=BF`   |
//!
//! The narrowed second-byte ranges reject overlong encodings (`E0`, `F0`),
//! UTF-16 surrogates (`ED`), and code points above U+10FFFF (`F4`).
//!
//! Malformed input never fails. The cursor stops after the longest prefix
//! that still matched the table, so garbage is skipped one byte at a time
//! and a truncated sequence at the end of the buffer consumes exactly the
//! bytes that are present. The cursor never moves past `buffer.len()`.

/// Any continuation byte.
#[inline]
fn is_continuation(byte: u8) -> bool {
    (0x80..=0xBF).contains(&byte)
}

/// Second byte after `F4`.
#[inline]
fn is_low_continuation(byte: u8) -> bool {
    (0x80..=0x8F).contains(&byte)
}

/// Second byte after `ED`.
#[inline]
fn is_low_mid_continuation(byte: u8) -> bool {
    (0x80..=0x9F).contains(&byte)
}

/// Second byte after `F0`.
#[inline]
fn is_mid_high_continuation(byte: u8) -> bool {
    (0x90..=0xBF).contains(&byte)
}

/// Second byte after `E0`.
#[inline]
fn is_high_continuation(byte: u8) -> bool {
    (0xA0..=0xBF).contains(&byte)
}

/// Consume the byte at `pos` if it satisfies `accept`.
///
/// Returns the new position on success, or `None` when the buffer ends or
/// the byte is rejected.
#[inline]
fn take(buffer: &[u8], pos: usize, accept: fn(u8) -> bool) -> Option<usize> {
    match buffer.get(pos) {
        Some(&byte) if accept(byte) => Some(pos + 1),
        _ => None,
    }
}

/// Consume `count` ordinary continuation bytes starting at `pos`.
///
/// Stops at the first missing or rejected byte and returns how far it got.
#[inline]
fn continuations(buffer: &[u8], mut pos: usize, count: usize) -> usize {
    for _ in 0..count {
        match take(buffer, pos, is_continuation) {
            Some(next) => pos = next,
            None => break,
        }
    }
    pos
}

/// A lead byte with a narrowed second byte, followed by `rest` ordinary
/// continuation bytes.
#[inline]
fn narrowed(buffer: &[u8], after_lead: usize, second: fn(u8) -> bool, rest: usize) -> usize {
    match take(buffer, after_lead, second) {
        Some(pos) => continuations(buffer, pos, rest),
        None => after_lead,
    }
}

/// Advance `pos` past one code point.
///
/// Returns the new cursor position. When `pos < buffer.len()` the result is
/// strictly greater than `pos` and never greater than `buffer.len()`. When
/// `pos` is already at or past the end, `pos` is returned unchanged.
///
/// ```
/// use kestrel_lexer_core::utf8::advance;
///
/// let src = "aé€😀".as_bytes();
/// assert_eq!(advance(src, 0), 1);
/// assert_eq!(advance(src, 1), 3);
/// assert_eq!(advance(src, 3), 6);
/// assert_eq!(advance(src, 6), 10);
///
/// // Overlong encoding of U+0000: only the lead byte is consumed.
/// assert_eq!(advance(&[0xE0, 0x80, 0x80], 0), 1);
/// ```
pub fn advance(buffer: &[u8], pos: usize) -> usize {
    let Some(&lead) = buffer.get(pos) else {
        return pos;
    };
    let next = pos + 1;

    match lead {
        // ASCII, stray continuation bytes, and the never-valid C0/C1.
        0x00..=0xC1 => next,
        0xC2..=0xDF => continuations(buffer, next, 1),
        0xE0 => narrowed(buffer, next, is_high_continuation, 1),
        0xED => narrowed(buffer, next, is_low_mid_continuation, 1),
        0xE1..=0xEC | 0xEE..=0xEF => continuations(buffer, next, 2),
        0xF0 => narrowed(buffer, next, is_mid_high_continuation, 2),
        0xF4 => narrowed(buffer, next, is_low_continuation, 2),
        0xF1..=0xF3 => continuations(buffer, next, 3),
        // F5..FF can never start a sequence.
        0xF5..=0xFF => next,
    }
}

/// Decode the code point at `pos`.
///
/// Returns the character and its encoded width, or `None` when `pos` is at
/// the end of the buffer or the bytes at `pos` are not a complete,
/// well-formed sequence according to [`advance`].
pub fn decode(buffer: &[u8], pos: usize) -> Option<(char, usize)> {
    let end = advance(buffer, pos);
    if end == pos {
        return None;
    }
    // Partial and rejected sequences fail here.
    let ch = std::str::from_utf8(&buffer[pos..end]).ok()?.chars().next()?;
    Some((ch, end - pos))
}

#[cfg(test)]
mod tests;
