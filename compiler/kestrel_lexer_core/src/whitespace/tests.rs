use super::*;

// === is_new_line ===

#[test]
fn recognizes_all_four_terminators() {
    assert!(is_new_line(u32::from(b'\n')));
    assert!(is_new_line(u32::from(b'\r')));
    assert!(is_new_line(LINE_SEPARATOR));
    assert!(is_new_line(PARAGRAPH_SEPARATOR));
}

#[test]
fn rejects_other_code_points() {
    assert!(!is_new_line(u32::from(b' ')));
    assert!(!is_new_line(u32::from(b'\t')));
    assert!(!is_new_line(0x0B));
    assert!(!is_new_line(0x85)); // NEL is not an ECMAScript terminator
    assert!(!is_new_line(0x2027));
}

#[test]
fn whitespace_excludes_terminators() {
    assert!(is_whitespace(0x20));
    assert!(is_whitespace(0xA0));
    assert!(is_whitespace(0xFEFF));
    assert!(is_whitespace(0x2005));
    assert!(!is_whitespace(u32::from(b'\n')));
    assert!(!is_whitespace(LINE_SEPARATOR));
    assert!(!is_whitespace(u32::from(b'a')));
}

// === line_break_len ===

#[test]
fn line_break_len_per_terminator() {
    assert_eq!(line_break_len(b"\r\nx", 0), Some(2));
    assert_eq!(line_break_len(b"\rx", 0), Some(1));
    assert_eq!(line_break_len(b"\n", 0), Some(1));
    assert_eq!(line_break_len("\u{2028}".as_bytes(), 0), Some(3));
    assert_eq!(line_break_len("\u{2029}".as_bytes(), 0), Some(3));
    assert_eq!(line_break_len(b"x\n", 0), None);
    assert_eq!(line_break_len(b"\n", 1), None);
}

#[test]
fn line_break_len_truncated_separator() {
    assert_eq!(line_break_len(&[0xE2, 0x80], 0), None);
}

// === contains_new_line ===

#[test]
fn contains_new_line_cases() {
    assert!(!contains_new_line(b""));
    assert!(!contains_new_line(b"abc"));
    assert!(contains_new_line(b"a\nb"));
    assert!(contains_new_line(b"a\rb"));
    assert!(contains_new_line("a\u{2028}b".as_bytes()));
    // U+2020 DAGGER shares the 0xE2 lead byte but is not a terminator.
    assert!(!contains_new_line("a\u{2020}b".as_bytes()));
}

// === next_line_break ===

#[test]
fn crlf_reports_line_feed_offset() {
    assert_eq!(next_line_break(b"a\r\nb", 0), Some(2));
}

#[test]
fn lone_cr_reports_its_own_offset() {
    assert_eq!(next_line_break(b"a\rb", 0), Some(1));
}

#[test]
fn cr_at_end_of_buffer() {
    assert_eq!(next_line_break(b"ab\r", 0), Some(2));
}

#[test]
fn start_is_inclusive() {
    assert_eq!(next_line_break(b"a\nb\nc", 1), Some(1));
    assert_eq!(next_line_break(b"a\nb\nc", 2), Some(3));
    assert_eq!(next_line_break(b"a\nb\nc", 4), None);
}

#[test]
fn start_past_end_is_none() {
    assert_eq!(next_line_break(b"a\n", 5), None);
}

#[test]
fn separators_report_final_byte() {
    let src = "ab\u{2028}c";
    assert_eq!(next_line_break(src.as_bytes(), 0), Some(4));
    let src = "\u{2029}";
    assert_eq!(next_line_break(src.as_bytes(), 0), Some(2));
}

#[test]
fn skips_non_separator_e2_sequences() {
    let src = "\u{2020}\u{2021}\n";
    assert_eq!(next_line_break(src.as_bytes(), 0), Some(6));
}

#[test]
fn empty_buffer_has_no_breaks() {
    assert_eq!(next_line_break(b"", 0), None);
}

// === line_end ===

#[test]
fn line_end_stops_before_terminator() {
    assert_eq!(line_end(b"ab\ncd", 0), 2);
    assert_eq!(line_end(b"ab\r\ncd", 0), 2);
    assert_eq!(line_end("ab\u{2029}cd".as_bytes(), 0), 2);
}

#[test]
fn line_end_without_terminator_is_buffer_end() {
    assert_eq!(line_end(b"abc", 0), 3);
    assert_eq!(line_end(b"abc", 3), 3);
    assert_eq!(line_end("a\u{2020}b".as_bytes(), 0), 5);
}

#[test]
fn line_end_from_middle() {
    assert_eq!(line_end(b"a\nb\nc", 2), 3);
}
