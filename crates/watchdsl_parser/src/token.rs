use std::fmt;

use chumsky::span::SimpleSpan;

pub type Span = SimpleSpan;

/// The kind of a token in the rule language.
/// Keywords are matched exactly (case-sensitive) and win over [`TokenKind::Word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Comparison operator, eg. `>`, `<=`, `==`, `!=`
    ArithmeticSymbol,

    /// `SOURCE` keyword, eg. `SOURCE Block`
    Source,
    /// `WATCH` keyword, eg. `WATCH Transfer`
    Watch,
    /// `WHERE` keyword, eg. `WHERE amount > 100`
    Where,
    /// `PUBLISH` keyword, eg. `PUBLISH WEBSOCKETS alerts`
    Publish,
    /// `AND` keyword, eg. `AND to == bob`
    And,
    /// `OR` keyword, eg. `OR value > 10`
    Or,
    /// `CONTAINS` keyword, eg. `data CONTAINS 0xabc`
    Contains,

    /// Live socket feed publish target
    Websockets,
    /// Log sink publish target
    LogPublisher,

    /// An identifier, like `Transfer` or `gas_used`
    Word,
    /// A decimal literal, like `100`
    Digit,
    /// A hex literal, like `0xabc123`
    Address,

    /// Synthesized once at the end of every token sequence
    EndOfInput,
}

impl TokenKind {
    /// Looks up a reserved word. Returns `None` for plain identifiers.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "SOURCE" => TokenKind::Source,
            "WATCH" => TokenKind::Watch,
            "WHERE" => TokenKind::Where,
            "PUBLISH" => TokenKind::Publish,
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "CONTAINS" => TokenKind::Contains,
            "WEBSOCKETS" => TokenKind::Websockets,
            "LOG_PUBLISHER" => TokenKind::LogPublisher,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether a statement can begin with this kind.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Source
                | TokenKind::Watch
                | TokenKind::Where
                | TokenKind::Publish
                | TokenKind::And
                | TokenKind::Or
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::ArithmeticSymbol => write!(f, "arithmetic symbol"),
            TokenKind::Source => write!(f, "'SOURCE'"),
            TokenKind::Watch => write!(f, "'WATCH'"),
            TokenKind::Where => write!(f, "'WHERE'"),
            TokenKind::Publish => write!(f, "'PUBLISH'"),
            TokenKind::And => write!(f, "'AND'"),
            TokenKind::Or => write!(f, "'OR'"),
            TokenKind::Contains => write!(f, "'CONTAINS'"),
            TokenKind::Websockets => write!(f, "'WEBSOCKETS'"),
            TokenKind::LogPublisher => write!(f, "'LOG_PUBLISHER'"),
            TokenKind::Word => write!(f, "word"),
            TokenKind::Digit => write!(f, "digit"),
            TokenKind::Address => write!(f, "address"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A classified slice of the rule text together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    /// 1-based
    pub line: usize,
    /// 1-based, counted in characters
    pub column: usize,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, line: usize, column: usize, span: Span) -> Self {
        Self {
            kind,
            lexeme,
            line,
            column,
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            _ => write!(f, "\"{}\"", self.lexeme),
        }
    }
}
