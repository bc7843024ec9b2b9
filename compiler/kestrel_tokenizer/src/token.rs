//! Token kinds, token payloads, and the recorded token log.
//!
//! `TokenType` is a fieldless enum; its grammar-facing properties
//! (`before_expr`, `starts_expr`, binary precedence, ...) are answered by
//! `match` so every kind's classification is visible in one place.

use std::fmt;

use kestrel_lexer_core::SourceLocation;

use crate::comment::Comment;

/// Classification of a token.
///
/// Operators that share grammar behavior share a kind (`Equality` covers
/// `==`, `!=`, `===`, `!==`); the exact text is in [`TokenValue::Op`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenType {
    // === Literals and names ===
    Num,
    BigInt,
    RegExp,
    Str,
    Name,
    Eof,

    // === Punctuation ===
    BracketL,
    BracketR,
    BraceL,
    BraceR,
    ParenL,
    ParenR,
    Comma,
    Semi,
    Colon,
    Dot,
    Question,
    QuestionDot,
    Arrow,
    Template,
    Ellipsis,
    BackQuote,
    DollarBraceL,
    At,
    Hash,
    InterpreterDirective,

    // === Operators ===
    Eq,
    Assign,
    IncDec,
    Bang,
    Tilde,
    NullishCoalescing,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    BitShift,
    PlusMin,
    Modulo,
    Star,
    Slash,
    Exponent,

    // === Keywords ===
    Break,
    Case,
    Catch,
    Continue,
    Debugger,
    Default,
    Do,
    Else,
    Finally,
    For,
    Function,
    If,
    Return,
    Switch,
    Throw,
    Try,
    Var,
    Const,
    While,
    With,
    New,
    This,
    Super,
    Class,
    Extends,
    Export,
    Import,
    Null,
    True,
    False,
    In,
    Instanceof,
    Typeof,
    Void,
    Delete,
}

impl TokenType {
    /// Human-readable label used in diagnostics.
    pub const fn label(self) -> &'static str {
        if let Some(keyword) = self.keyword() {
            return keyword;
        }
        match self {
            TokenType::Num => "num",
            TokenType::BigInt => "bigint",
            TokenType::RegExp => "regexp",
            TokenType::Str => "string",
            TokenType::Name => "name",
            TokenType::Eof => "eof",
            TokenType::BracketL => "[",
            TokenType::BracketR => "]",
            TokenType::BraceL => "{",
            TokenType::BraceR => "}",
            TokenType::ParenL => "(",
            TokenType::ParenR => ")",
            TokenType::Comma => ",",
            TokenType::Semi => ";",
            TokenType::Colon => ":",
            TokenType::Dot => ".",
            TokenType::Question => "?",
            TokenType::QuestionDot => "?.",
            TokenType::Arrow => "=>",
            TokenType::Template => "template",
            TokenType::Ellipsis => "...",
            TokenType::BackQuote => "`",
            TokenType::DollarBraceL => "${",
            TokenType::At => "@",
            TokenType::Hash => "#",
            TokenType::InterpreterDirective => "#!...",
            TokenType::Eq => "=",
            TokenType::Assign => "_=",
            TokenType::IncDec => "++/--",
            TokenType::Bang => "!",
            TokenType::Tilde => "~",
            TokenType::NullishCoalescing => "??",
            TokenType::LogicalOr => "||",
            TokenType::LogicalAnd => "&&",
            TokenType::BitwiseOr => "|",
            TokenType::BitwiseXor => "^",
            TokenType::BitwiseAnd => "&",
            TokenType::Equality => "==/!=",
            TokenType::Relational => "</>",
            TokenType::BitShift => "<</>>",
            TokenType::PlusMin => "+/-",
            TokenType::Modulo => "%",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::Exponent => "**",
            // Keywords returned above.
            _ => "keyword",
        }
    }

    /// Source text of a keyword kind.
    pub const fn keyword(self) -> Option<&'static str> {
        Some(match self {
            TokenType::Break => "break",
            TokenType::Case => "case",
            TokenType::Catch => "catch",
            TokenType::Continue => "continue",
            TokenType::Debugger => "debugger",
            TokenType::Default => "default",
            TokenType::Do => "do",
            TokenType::Else => "else",
            TokenType::Finally => "finally",
            TokenType::For => "for",
            TokenType::Function => "function",
            TokenType::If => "if",
            TokenType::Return => "return",
            TokenType::Switch => "switch",
            TokenType::Throw => "throw",
            TokenType::Try => "try",
            TokenType::Var => "var",
            TokenType::Const => "const",
            TokenType::While => "while",
            TokenType::With => "with",
            TokenType::New => "new",
            TokenType::This => "this",
            TokenType::Super => "super",
            TokenType::Class => "class",
            TokenType::Extends => "extends",
            TokenType::Export => "export",
            TokenType::Import => "import",
            TokenType::Null => "null",
            TokenType::True => "true",
            TokenType::False => "false",
            TokenType::In => "in",
            TokenType::Instanceof => "instanceof",
            TokenType::Typeof => "typeof",
            TokenType::Void => "void",
            TokenType::Delete => "delete",
            _ => return None,
        })
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        self.keyword().is_some()
    }

    /// Look up a reserved word. Contextual words (`let`, `yield`, `async`,
    /// `of`, ...) are names, not keywords.
    ///
    /// Buckets by length first so most identifiers are rejected without a
    /// string comparison.
    pub fn from_keyword(word: &str) -> Option<TokenType> {
        if !(2..=10).contains(&word.len()) || !word.as_bytes()[0].is_ascii_lowercase() {
            return None;
        }
        match word.len() {
            2 => match word {
                "do" => Some(TokenType::Do),
                "if" => Some(TokenType::If),
                "in" => Some(TokenType::In),
                _ => None,
            },
            3 => match word {
                "for" => Some(TokenType::For),
                "new" => Some(TokenType::New),
                "try" => Some(TokenType::Try),
                "var" => Some(TokenType::Var),
                _ => None,
            },
            4 => match word {
                "case" => Some(TokenType::Case),
                "else" => Some(TokenType::Else),
                "null" => Some(TokenType::Null),
                "this" => Some(TokenType::This),
                "true" => Some(TokenType::True),
                "void" => Some(TokenType::Void),
                "with" => Some(TokenType::With),
                _ => None,
            },
            5 => match word {
                "break" => Some(TokenType::Break),
                "catch" => Some(TokenType::Catch),
                "class" => Some(TokenType::Class),
                "const" => Some(TokenType::Const),
                "false" => Some(TokenType::False),
                "super" => Some(TokenType::Super),
                "throw" => Some(TokenType::Throw),
                "while" => Some(TokenType::While),
                _ => None,
            },
            6 => match word {
                "delete" => Some(TokenType::Delete),
                "export" => Some(TokenType::Export),
                "import" => Some(TokenType::Import),
                "return" => Some(TokenType::Return),
                "switch" => Some(TokenType::Switch),
                "typeof" => Some(TokenType::Typeof),
                _ => None,
            },
            7 => match word {
                "default" => Some(TokenType::Default),
                "extends" => Some(TokenType::Extends),
                "finally" => Some(TokenType::Finally),
                _ => None,
            },
            8 => match word {
                "continue" => Some(TokenType::Continue),
                "debugger" => Some(TokenType::Debugger),
                "function" => Some(TokenType::Function),
                _ => None,
            },
            10 => match word {
                "instanceof" => Some(TokenType::Instanceof),
                _ => None,
            },
            _ => None,
        }
    }

    /// An expression may follow this token. Drives the regex-vs-division
    /// decision for a `/` that comes next.
    pub const fn before_expr(self) -> bool {
        self.binop().is_some()
            || matches!(
                self,
                TokenType::BracketL
                    | TokenType::BraceL
                    | TokenType::ParenL
                    | TokenType::Comma
                    | TokenType::Semi
                    | TokenType::Colon
                    | TokenType::Question
                    | TokenType::Arrow
                    | TokenType::Ellipsis
                    | TokenType::DollarBraceL
                    | TokenType::Eq
                    | TokenType::Assign
                    | TokenType::Bang
                    | TokenType::Tilde
                    | TokenType::Case
                    | TokenType::Default
                    | TokenType::Do
                    | TokenType::Else
                    | TokenType::Return
                    | TokenType::Throw
                    | TokenType::New
                    | TokenType::Extends
                    | TokenType::Typeof
                    | TokenType::Void
                    | TokenType::Delete
            )
    }

    /// This token can begin an expression.
    pub const fn starts_expr(self) -> bool {
        matches!(
            self,
            TokenType::Num
                | TokenType::BigInt
                | TokenType::RegExp
                | TokenType::Str
                | TokenType::Name
                | TokenType::BracketL
                | TokenType::BraceL
                | TokenType::ParenL
                | TokenType::BackQuote
                | TokenType::DollarBraceL
                | TokenType::IncDec
                | TokenType::Bang
                | TokenType::Tilde
                | TokenType::PlusMin
                | TokenType::Function
                | TokenType::Throw
                | TokenType::New
                | TokenType::This
                | TokenType::Super
                | TokenType::Class
                | TokenType::Import
                | TokenType::Null
                | TokenType::True
                | TokenType::False
                | TokenType::Typeof
                | TokenType::Void
                | TokenType::Delete
        )
    }

    /// Binary operator precedence, higher binds tighter.
    pub const fn binop(self) -> Option<u8> {
        Some(match self {
            TokenType::NullishCoalescing | TokenType::LogicalOr => 1,
            TokenType::LogicalAnd => 2,
            TokenType::BitwiseOr => 3,
            TokenType::BitwiseXor => 4,
            TokenType::BitwiseAnd => 5,
            TokenType::Equality => 6,
            TokenType::Relational | TokenType::In | TokenType::Instanceof => 7,
            TokenType::BitShift => 8,
            TokenType::PlusMin => 9,
            TokenType::Modulo | TokenType::Star | TokenType::Slash => 10,
            TokenType::Exponent => 11,
            _ => return None,
        })
    }

    #[inline]
    pub const fn is_assign(self) -> bool {
        matches!(self, TokenType::Eq | TokenType::Assign)
    }

    pub const fn is_prefix(self) -> bool {
        matches!(
            self,
            TokenType::IncDec
                | TokenType::Bang
                | TokenType::Tilde
                | TokenType::PlusMin
                | TokenType::Throw
                | TokenType::Typeof
                | TokenType::Void
                | TokenType::Delete
        )
    }

    #[inline]
    pub const fn is_postfix(self) -> bool {
        matches!(self, TokenType::IncDec)
    }

    #[inline]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, TokenType::Exponent)
    }

    #[inline]
    pub const fn is_loop(self) -> bool {
        matches!(self, TokenType::Do | TokenType::For | TokenType::While)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload of the current token, keyed by its kind.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    /// Identifier or keyword text, escapes resolved.
    Name(String),
    /// Cooked string literal contents.
    Str(String),
    Number(f64),
    /// Digits of a BigInt literal, radix prefix kept, separators and the
    /// `n` suffix removed.
    BigInt(String),
    RegExp { pattern: String, flags: String },
    /// Cooked template chunk; `None` when it holds an invalid escape.
    Template(Option<String>),
    /// Exact operator text.
    Op(&'static str),
    /// Text after `#!`.
    Directive(String),
}

impl TokenValue {
    /// The text of a name token, if this is one.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            TokenValue::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// A finished token as recorded in the token log.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub ty: TokenType,
    pub value: TokenValue,
    pub start: usize,
    pub end: usize,
    pub loc: SourceLocation,
}

/// One entry of the token log: tokens and comments interleaved in source
/// order.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenEntry {
    Token(Token),
    Comment(Comment),
}

impl TokenEntry {
    pub fn start(&self) -> usize {
        match self {
            TokenEntry::Token(token) => token.start,
            TokenEntry::Comment(comment) => comment.start,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            TokenEntry::Token(token) => Some(token),
            TokenEntry::Comment(_) => None,
        }
    }
}

#[cfg(test)]
mod tests;
