use super::*;
use crate::utf8::advance;
use crate::whitespace::line_break_len;
use pretty_assertions::assert_eq;

/// Positions produced by stepping a cursor forward the way the tokenizer
/// does, recording `(line, pos - line_start)` at every offset visited.
fn incremental_positions(buffer: &[u8]) -> Vec<(usize, Position)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    let mut line = 1u32;
    let mut line_start = 0usize;
    out.push((pos, Position::new(line, 0)));
    while pos < buffer.len() {
        match line_break_len(buffer, pos) {
            // Step over CR of a CRLF alone first, so the offset of the LF is visited.
            Some(2) => pos += 1,
            Some(len) => {
                pos += len;
                line += 1;
                line_start = pos;
            }
            None => pos = advance(buffer, pos),
        }
        out.push((pos, Position::new(line, column(line_start, pos))));
    }
    out
}

// === Position / SourceLocation ===

#[test]
fn position_display() {
    assert_eq!(Position::new(3, 7).to_string(), "3:7");
}

#[test]
fn source_location_opens_and_closes() {
    let mut loc = SourceLocation::new(Position::new(1, 0));
    assert!(!loc.is_closed());
    loc.close(Position::new(1, 4));
    assert_eq!(loc.end, Some(Position::new(1, 4)));
    assert!(loc.is_closed());
}

#[test]
fn source_location_metadata() {
    let loc = SourceLocation::spanning(Position::new(1, 0), Position::new(1, 3))
        .with_filename("input.js")
        .with_identifier_name("foo");
    assert_eq!(loc.filename.as_deref(), Some("input.js"));
    assert_eq!(loc.identifier_name.as_deref(), Some("foo"));
}

// === get_line_info ===

#[test]
fn empty_buffer() {
    assert_eq!(get_line_info(b"", 0), Position::new(1, 0));
}

#[test]
fn single_line() {
    let src = b"hello";
    assert_eq!(get_line_info(src, 0), Position::new(1, 0));
    assert_eq!(get_line_info(src, 4), Position::new(1, 4));
    assert_eq!(get_line_info(src, 5), Position::new(1, 5));
}

#[test]
fn crlf_example() {
    let src = b"a\r\nb";
    assert_eq!(get_line_info(src, 0), Position::new(1, 0));
    assert_eq!(get_line_info(src, 1), Position::new(1, 1)); // CR
    assert_eq!(get_line_info(src, 2), Position::new(1, 2)); // LF
    assert_eq!(get_line_info(src, 3), Position::new(2, 0)); // 'b'
}

#[test]
fn newline_offset_belongs_to_its_line() {
    let src = b"ab\ncd";
    assert_eq!(get_line_info(src, 2), Position::new(1, 2));
    assert_eq!(get_line_info(src, 3), Position::new(2, 0));
}

#[test]
fn mixed_terminators() {
    let src = b"a\nb\r\nc\rd";
    assert_eq!(get_line_info(src, 2), Position::new(2, 0)); // 'b'
    assert_eq!(get_line_info(src, 5), Position::new(3, 0)); // 'c'
    assert_eq!(get_line_info(src, 7), Position::new(4, 0)); // 'd'
}

#[test]
fn separators_count_as_lines() {
    let src = "a\u{2028}b\u{2029}c".as_bytes();
    assert_eq!(get_line_info(src, 4), Position::new(2, 0)); // 'b'
    assert_eq!(get_line_info(src, 8), Position::new(3, 0)); // 'c'
}

#[test]
fn columns_are_bytes() {
    let src = "éa".as_bytes();
    assert_eq!(get_line_info(src, 2), Position::new(1, 2));
}

#[test]
fn blank_lines() {
    let src = b"\n\n\n";
    assert_eq!(get_line_info(src, 3), Position::new(4, 0));
}

#[test]
fn matches_incremental_tracking() {
    let cases: &[&[u8]] = &[
        b"",
        b"single line",
        b"a\nb\r\nc\rd\n",
        b"\r\r\n\n\r",
        "x\u{2028}y\r\n\u{2029}z".as_bytes(),
        b"trailing\r\n",
    ];
    for case in cases {
        for (offset, expected) in incremental_positions(case) {
            assert_eq!(
                get_line_info(case, offset),
                expected,
                "offset {offset} in {case:?}"
            );
        }
    }
}

// === LineOffsetTable ===

#[test]
fn table_line_starts() {
    let table = LineOffsetTable::build(b"ab\r\ncd\ne");
    assert_eq!(table.line_count(), 3);
    assert_eq!(table.line_start(0), None);
    assert_eq!(table.line_start(1), Some(0));
    assert_eq!(table.line_start(2), Some(4));
    assert_eq!(table.line_start(3), Some(7));
    assert_eq!(table.line_start(4), None);
}

#[test]
fn table_trailing_newline_opens_a_line() {
    let table = LineOffsetTable::build(b"a\n");
    assert_eq!(table.line_count(), 2);
    assert_eq!(table.position(2), Position::new(2, 0));
}

#[test]
fn table_matches_linear_scan() {
    let src = "first\r\nsecond\rthird\n\n\u{2028}fifth é\r\n".as_bytes();
    let table = LineOffsetTable::build(src);
    for offset in 0..=src.len() {
        assert_eq!(
            table.position(offset),
            get_line_info(src, offset),
            "mismatch at offset {offset}"
        );
    }
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_line_info {
    use super::incremental_positions;
    use crate::location::{get_line_info, LineOffsetTable};
    use proptest::prelude::*;

    fn line_heavy() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![
                Just(vec![b'a']),
                Just(vec![b'\n']),
                Just(vec![b'\r']),
                Just(vec![b'\r', b'\n']),
                Just("\u{2028}".as_bytes().to_vec()),
                Just("é".as_bytes().to_vec()),
            ],
            0..64,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn line_info_matches_incremental(src in line_heavy()) {
            for (offset, expected) in incremental_positions(&src) {
                prop_assert_eq!(get_line_info(&src, offset), expected);
            }
        }

        #[test]
        fn table_matches_line_info(src in line_heavy()) {
            let table = LineOffsetTable::build(&src);
            for offset in 0..=src.len() {
                prop_assert_eq!(table.position(offset), get_line_info(&src, offset));
            }
        }
    }
}
