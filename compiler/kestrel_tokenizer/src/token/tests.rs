use super::*;
use pretty_assertions::assert_eq;

// === Keywords ===

#[test]
fn keyword_lookup() {
    assert_eq!(TokenType::from_keyword("if"), Some(TokenType::If));
    assert_eq!(TokenType::from_keyword("function"), Some(TokenType::Function));
    assert_eq!(
        TokenType::from_keyword("instanceof"),
        Some(TokenType::Instanceof)
    );
    assert_eq!(TokenType::from_keyword("typeof"), Some(TokenType::Typeof));
}

#[test]
fn contextual_words_are_names() {
    for word in ["let", "yield", "async", "await", "of", "static", "get", "set"] {
        assert_eq!(TokenType::from_keyword(word), None, "{word}");
    }
}

#[test]
fn keyword_lookup_is_case_sensitive() {
    assert_eq!(TokenType::from_keyword("If"), None);
    assert_eq!(TokenType::from_keyword("NULL"), None);
    assert_eq!(TokenType::from_keyword(""), None);
    assert_eq!(TokenType::from_keyword("x"), None);
}

#[test]
fn every_keyword_round_trips_through_its_text() {
    let keywords = [
        TokenType::Break,
        TokenType::Case,
        TokenType::Catch,
        TokenType::Continue,
        TokenType::Debugger,
        TokenType::Default,
        TokenType::Do,
        TokenType::Else,
        TokenType::Finally,
        TokenType::For,
        TokenType::Function,
        TokenType::If,
        TokenType::Return,
        TokenType::Switch,
        TokenType::Throw,
        TokenType::Try,
        TokenType::Var,
        TokenType::Const,
        TokenType::While,
        TokenType::With,
        TokenType::New,
        TokenType::This,
        TokenType::Super,
        TokenType::Class,
        TokenType::Extends,
        TokenType::Export,
        TokenType::Import,
        TokenType::Null,
        TokenType::True,
        TokenType::False,
        TokenType::In,
        TokenType::Instanceof,
        TokenType::Typeof,
        TokenType::Void,
        TokenType::Delete,
    ];
    for ty in keywords {
        let text = ty.keyword().unwrap_or_default();
        assert_eq!(TokenType::from_keyword(text), Some(ty));
        assert_eq!(ty.label(), text);
    }
}

// === Classification ===

#[test]
fn before_expr_kinds() {
    assert!(TokenType::ParenL.before_expr());
    assert!(TokenType::Eq.before_expr());
    assert!(TokenType::Return.before_expr());
    assert!(TokenType::Typeof.before_expr());
    // Every binary operator expects an operand after it.
    assert!(TokenType::Slash.before_expr());
    assert!(TokenType::In.before_expr());

    assert!(!TokenType::ParenR.before_expr());
    assert!(!TokenType::Name.before_expr());
    assert!(!TokenType::Num.before_expr());
    assert!(!TokenType::This.before_expr());
    assert!(!TokenType::IncDec.before_expr());
}

#[test]
fn binop_precedence_order() {
    let ordered = [
        TokenType::LogicalOr,
        TokenType::LogicalAnd,
        TokenType::BitwiseOr,
        TokenType::BitwiseXor,
        TokenType::BitwiseAnd,
        TokenType::Equality,
        TokenType::Relational,
        TokenType::BitShift,
        TokenType::PlusMin,
        TokenType::Star,
        TokenType::Exponent,
    ];
    for pair in ordered.windows(2) {
        assert!(pair[0].binop() < pair[1].binop(), "{} < {}", pair[0], pair[1]);
    }
    assert_eq!(TokenType::NullishCoalescing.binop(), TokenType::LogicalOr.binop());
    assert_eq!(TokenType::Instanceof.binop(), TokenType::Relational.binop());
    assert_eq!(TokenType::Comma.binop(), None);
}

#[test]
fn operator_shapes() {
    assert!(TokenType::Assign.is_assign());
    assert!(TokenType::Eq.is_assign());
    assert!(TokenType::IncDec.is_prefix() && TokenType::IncDec.is_postfix());
    assert!(TokenType::Typeof.is_prefix());
    assert!(!TokenType::Bang.is_postfix());
    assert!(TokenType::Exponent.is_right_associative());
    assert!(!TokenType::Star.is_right_associative());
    assert!(TokenType::While.is_loop());
    assert!(!TokenType::Switch.is_loop());
}

#[test]
fn starts_expr_kinds() {
    assert!(TokenType::Name.starts_expr());
    assert!(TokenType::BackQuote.starts_expr());
    assert!(TokenType::New.starts_expr());
    assert!(!TokenType::ParenR.starts_expr());
    assert!(!TokenType::Semi.starts_expr());
}

// === Display ===

#[test]
fn display_uses_label() {
    assert_eq!(TokenType::Arrow.to_string(), "=>");
    assert_eq!(TokenType::Eof.to_string(), "eof");
    assert_eq!(TokenType::While.to_string(), "while");
}

// === Token log ===

#[test]
fn entry_accessors() {
    use kestrel_lexer_core::Position;

    let loc = SourceLocation::spanning(Position::new(1, 0), Position::new(1, 1));
    let token = TokenEntry::Token(Token {
        ty: TokenType::Semi,
        value: TokenValue::None,
        start: 4,
        end: 5,
        loc: loc.clone(),
    });
    let comment = TokenEntry::Comment(Comment {
        kind: crate::comment::CommentKind::Line,
        value: " hi".to_owned(),
        start: 0,
        end: 4,
        loc,
    });
    assert_eq!(token.start(), 4);
    assert_eq!(comment.start(), 0);
    assert_eq!(token.as_token().map(|token| token.ty), Some(TokenType::Semi));
    assert!(comment.as_token().is_none());
    assert_eq!(TokenValue::Name("x".to_owned()).as_name(), Some("x"));
    assert_eq!(TokenValue::Str("x".to_owned()).as_name(), None);
}
