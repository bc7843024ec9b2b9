//! Line-terminator and whitespace classification.
//!
//! ECMAScript recognizes four line terminators: `\n`, `\r`, U+2028 (line
//! separator) and U+2029 (paragraph separator). The last two are three bytes
//! in UTF-8 (`E2 80 A8` / `E2 80 A9`), so the byte-level scanners here match
//! them on the full encoded sequence rather than on a single byte.
//!
//! A `\r\n` pair is one terminator. [`next_line_break`] reports it at the
//! offset of the `\n`, so that a caller stepping from `offset + 1` never
//! sees the pair twice.

/// U+2028 LINE SEPARATOR.
pub const LINE_SEPARATOR: u32 = 0x2028;
/// U+2029 PARAGRAPH SEPARATOR.
pub const PARAGRAPH_SEPARATOR: u32 = 0x2029;

/// Lead byte shared by the UTF-8 encodings of U+2028 and U+2029.
const SEPARATOR_LEAD: u8 = 0xE2;

/// Returns `true` for the four ECMAScript line-terminator code points.
#[inline]
pub fn is_new_line(code: u32) -> bool {
    code == u32::from(b'\n')
        || code == u32::from(b'\r')
        || code == LINE_SEPARATOR
        || code == PARAGRAPH_SEPARATOR
}

/// Returns `true` for ECMAScript whitespace that is not a line terminator.
///
/// Covers tab, vertical tab, form feed, space, NBSP, and the non-ASCII
/// space separators the tokenizer skips between tokens.
pub fn is_whitespace(code: u32) -> bool {
    matches!(
        code,
        0x09 | 0x0B | 0x0C | 0x20 | 0xA0
            | 0x1680
            | 0x180E
            | 0x2000..=0x200A
            | 0x202F
            | 0x205F
            | 0x3000
            | 0xFEFF
    )
}

/// Returns `true` if `buffer[pos..]` starts with an encoded U+2028 or U+2029.
#[inline]
fn is_separator_at(buffer: &[u8], pos: usize) -> bool {
    buffer.len() >= pos + 3
        && buffer[pos] == SEPARATOR_LEAD
        && buffer[pos + 1] == 0x80
        && (buffer[pos + 2] == 0xA8 || buffer[pos + 2] == 0xA9)
}

/// Length in bytes of the line terminator starting at `pos`, if any.
///
/// - `\r\n`: 2
/// - `\n` or a lone `\r`: 1
/// - U+2028 / U+2029: 3
pub fn line_break_len(buffer: &[u8], pos: usize) -> Option<usize> {
    match *buffer.get(pos)? {
        b'\r' if buffer.get(pos + 1) == Some(&b'\n') => Some(2),
        b'\r' | b'\n' => Some(1),
        SEPARATOR_LEAD if is_separator_at(buffer, pos) => Some(3),
        _ => None,
    }
}

/// Returns `true` if the buffer contains any line terminator.
///
/// Short-circuits on the first match.
pub fn contains_new_line(buffer: &[u8]) -> bool {
    next_line_break(buffer, 0).is_some()
}

/// Offset of the next line terminator at or after `start`.
///
/// The returned offset is the last byte of the terminator:
/// - lone `\r` or `\n`: the byte itself
/// - `\r\n`: the `\n`
/// - U+2028 / U+2029: the third byte of the sequence
///
/// `offset + 1` is therefore always the first byte of the next line.
/// Returns `None` when no terminator remains.
pub fn next_line_break(buffer: &[u8], start: usize) -> Option<usize> {
    let mut from = start;
    while from < buffer.len() {
        let found = from + memchr::memchr3(b'\n', b'\r', SEPARATOR_LEAD, &buffer[from..])?;
        match buffer[found] {
            b'\n' => return Some(found),
            b'\r' => {
                // CRLF is one terminator, reported at the LF.
                if buffer.get(found + 1) == Some(&b'\n') {
                    return Some(found + 1);
                }
                return Some(found);
            }
            _ if is_separator_at(buffer, found) => return Some(found + 2),
            // Some other three-byte character starting with 0xE2.
            _ => from = found + 1,
        }
    }
    None
}

/// Offset of the first byte of the next line terminator at or after
/// `start`, or `buffer.len()` when the rest of the buffer is one line.
///
/// Unlike [`next_line_break`], a `\r\n` pair reports the `\r`: this is
/// where the text of the line ends, not where the terminator does.
pub fn line_end(buffer: &[u8], start: usize) -> usize {
    let mut from = start;
    while from < buffer.len() {
        let Some(found) = memchr::memchr3(b'\n', b'\r', SEPARATOR_LEAD, &buffer[from..]) else {
            break;
        };
        let found = from + found;
        if buffer[found] != SEPARATOR_LEAD || is_separator_at(buffer, found) {
            return found;
        }
        from = found + 1;
    }
    buffer.len()
}

#[cfg(test)]
mod tests;
