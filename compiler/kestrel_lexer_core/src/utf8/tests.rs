use super::*;
use pretty_assertions::assert_eq;

/// Every cursor position visited when stepping from 0 to the end.
fn steps(buffer: &[u8]) -> Vec<usize> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < buffer.len() {
        pos = advance(buffer, pos);
        out.push(pos);
    }
    out
}

// === Well-formed sequences ===

#[test]
fn ascii_advances_one_byte() {
    assert_eq!(steps(b"abc"), vec![1, 2, 3]);
}

#[test]
fn crlf_is_two_steps() {
    assert_eq!(steps(b"a\r\nb"), vec![1, 2, 3, 4]);
}

#[test]
fn two_byte_sequences() {
    // U+0080 is the smallest two-byte code point and starts with C2.
    assert_eq!(advance("\u{80}".as_bytes(), 0), 2);
    assert_eq!(advance("é".as_bytes(), 0), 2);
    assert_eq!(advance("\u{7FF}".as_bytes(), 0), 2);
}

#[test]
fn three_byte_sequences() {
    assert_eq!(advance("\u{800}".as_bytes(), 0), 3); // E0 A0 80
    assert_eq!(advance("€".as_bytes(), 0), 3);
    assert_eq!(advance("\u{D7FF}".as_bytes(), 0), 3); // ED 9F BF
    assert_eq!(advance("\u{E000}".as_bytes(), 0), 3); // EE 80 80
    assert_eq!(advance("\u{FFFF}".as_bytes(), 0), 3);
}

#[test]
fn four_byte_sequences() {
    assert_eq!(advance("\u{10000}".as_bytes(), 0), 4); // F0 90 80 80
    assert_eq!(advance("😀".as_bytes(), 0), 4);
    assert_eq!(advance("\u{10FFFF}".as_bytes(), 0), 4); // F4 8F BF BF
}

// === Rejections ===

#[test]
fn overlong_three_byte_rejected_at_first_continuation() {
    assert_eq!(advance(&[0xE0, 0x80, 0x80], 0), 1);
}

#[test]
fn surrogate_rejected_at_first_continuation() {
    assert_eq!(advance(&[0xED, 0xA0, 0x80], 0), 1);
}

#[test]
fn overlong_four_byte_rejected() {
    assert_eq!(advance(&[0xF0, 0x8F, 0xBF, 0xBF], 0), 1);
}

#[test]
fn above_max_code_point_rejected() {
    assert_eq!(advance(&[0xF4, 0x90, 0x80, 0x80], 0), 1);
}

#[test]
fn invalid_lead_bytes_advance_one() {
    for lead in [0xC0, 0xC1, 0xF5, 0xF8, 0xFF] {
        assert_eq!(advance(&[lead, 0x80, 0x80, 0x80], 0), 1, "lead {lead:#X}");
    }
}

#[test]
fn stray_continuation_advances_one() {
    assert_eq!(advance(&[0x80, 0x80], 0), 1);
    assert_eq!(advance(&[0xBF], 0), 1);
}

#[test]
fn bad_third_byte_keeps_valid_prefix() {
    // E1 80 is a valid prefix; 'a' ends it.
    assert_eq!(advance(&[0xE1, 0x80, b'a'], 0), 2);
    // F1 80 80 is a valid prefix; 'a' ends it.
    assert_eq!(advance(&[0xF1, 0x80, 0x80, b'a'], 0), 3);
}

// === Truncation ===

#[test]
fn truncated_sequences_stop_at_buffer_end() {
    assert_eq!(advance(&[0xC3], 0), 1);
    assert_eq!(advance(&[0xE2, 0x82], 0), 2);
    assert_eq!(advance(&[0xF0, 0x9F, 0x98], 0), 3);
    assert_eq!(advance(&[b'a', 0xF4], 1), 2);
}

#[test]
fn at_end_does_not_move() {
    assert_eq!(advance(b"ab", 2), 2);
    assert_eq!(advance(b"", 0), 0);
}

// === decode ===

#[test]
fn decode_returns_char_and_width() {
    let src = "aé😀".as_bytes();
    assert_eq!(decode(src, 0), Some(('a', 1)));
    assert_eq!(decode(src, 1), Some(('é', 2)));
    assert_eq!(decode(src, 3), Some(('😀', 4)));
    assert_eq!(decode(src, 7), None);
}

#[test]
fn decode_rejects_malformed() {
    assert_eq!(decode(&[0xE0, 0x80, 0x80], 0), None);
    assert_eq!(decode(&[0xC3], 0), None);
    assert_eq!(decode(&[0x80], 0), None);
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_advance {
    use super::super::advance;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_stalls_and_never_overruns(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut pos = 0;
            while pos < bytes.len() {
                let next = advance(&bytes, pos);
                prop_assert!(next > pos, "stalled at {}", pos);
                prop_assert!(next <= bytes.len(), "overran at {}", pos);
                pos = next;
            }
        }

        #[test]
        fn steps_match_char_boundaries(text in "\\PC{0,64}") {
            let bytes = text.as_bytes();
            let expected: Vec<usize> = text
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .collect();
            let mut actual = Vec::new();
            let mut pos = 0;
            while pos < bytes.len() {
                pos = advance(bytes, pos);
                actual.push(pos);
            }
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn consumed_bytes_re_encode_to_input(text in any::<String>()) {
            let bytes = text.as_bytes();
            let mut rebuilt = String::new();
            let mut pos = 0;
            while pos < bytes.len() {
                let next = advance(bytes, pos);
                let piece = std::str::from_utf8(&bytes[pos..next]);
                prop_assert!(piece.is_ok());
                if let Ok(piece) = piece {
                    prop_assert_eq!(piece.chars().count(), 1);
                    rebuilt.push_str(piece);
                }
                pos = next;
            }
            prop_assert_eq!(rebuilt, text);
        }
    }
}
