//! Property-based tests for the tokenizer.
//!
//! Sources are stitched together from fragments that exercise every
//! reader, unbalanced and unterminated ones included, then checked for:
//! 1. Termination with an `Eof` token last
//! 2. Log entries in source order
//! 3. Incremental line tracking agreeing with a fresh scan of the buffer
//! 4. Lookahead leaving the state as it found it

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::disallowed_types,
    reason = "Proptest macros generate code with these patterns"
)]

use kestrel_lexer_core::get_line_info;
use kestrel_tokenizer::{init_tracing, tokenize, Options, Token, TokenEntry, TokenType, Tokenizer};
use proptest::prelude::*;

/// Comparable identity of a token; `NaN` values rule out `==` on `Token`.
fn key(token: &Token) -> (TokenType, usize, usize) {
    (token.ty, token.start, token.end)
}

fn fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("a"),
        Just(" "),
        Just("\n"),
        Just("\r\n"),
        Just("\r"),
        Just("\u{2028}"),
        Just("/"),
        Just("`"),
        Just("${"),
        Just("{"),
        Just("}"),
        Just("("),
        Just(")"),
        Just("'x'"),
        Just("\""),
        Just("1"),
        Just("0x"),
        Just("//c"),
        Just("/*"),
        Just("*/"),
        Just("\\"),
        Just("é"),
        Just("="),
        Just("."),
        Just("#"),
        Just("-->"),
        Just("<!--"),
    ]
}

fn source() -> impl Strategy<Value = String> {
    proptest::collection::vec(fragment(), 0..40).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn ends_with_eof(src in source()) {
        init_tracing();
        let state = tokenize(&Options::default(), src.as_bytes()).unwrap();
        let last = state.tokens().last().and_then(TokenEntry::as_token).map(|token| token.ty);
        prop_assert_eq!(last, Some(TokenType::Eof));
    }

    #[test]
    fn entries_in_source_order(src in source()) {
        init_tracing();
        let state = tokenize(&Options::default(), src.as_bytes()).unwrap();
        let starts: Vec<usize> = state.tokens().iter().map(TokenEntry::start).collect();
        prop_assert!(starts.windows(2).all(|pair| pair[0] <= pair[1]));
        for token in state.tokens().iter().filter_map(TokenEntry::as_token) {
            prop_assert!(token.start <= token.end);
            prop_assert!(token.end <= src.len());
        }
    }

    #[test]
    fn token_positions_match_line_info(src in source()) {
        init_tracing();
        let state = tokenize(&Options::default(), src.as_bytes()).unwrap();
        for token in state.tokens().iter().filter_map(TokenEntry::as_token) {
            prop_assert_eq!(token.loc.start, get_line_info(src.as_bytes(), token.start));
            prop_assert_eq!(token.loc.end, Some(get_line_info(src.as_bytes(), token.end)));
        }
        for error in state.errors() {
            prop_assert_eq!(error.loc, get_line_info(src.as_bytes(), error.offset));
        }
    }

    #[test]
    fn lookahead_is_invisible(src in source()) {
        let mut tokenizer = Tokenizer::new(Options::default(), src.as_bytes()).unwrap();
        while tokenizer.state().ty() != TokenType::Eof {
            let before = key(&tokenizer.token());
            let errors = tokenizer.state().errors().len();
            let ahead = key(&tokenizer.lookahead());
            prop_assert_eq!(key(&tokenizer.token()), before);
            prop_assert_eq!(tokenizer.state().errors().len(), errors);

            tokenizer.next();
            prop_assert_eq!(key(&tokenizer.token()), ahead);
        }
    }
}
