use std::collections::VecDeque;

use crate::diagnostics::{Diagnostic, GrammarRule};
use crate::token::{Span, Token, TokenKind};

/// A cursor over the lexer's output with one token of lookahead.
///
/// Tokens are consumed destructively. The stream always ends in an
/// `EndOfInput` token, which is never consumed: advancing at the end keeps
/// handing out the same `EndOfInput`.
#[derive(Debug, Clone)]
pub struct TokenStream<'src> {
    tokens: VecDeque<Token<'src>>,
}

impl<'src> TokenStream<'src> {
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        let mut tokens = VecDeque::from(tokens);
        if !tokens.back().is_some_and(|t| t.is(TokenKind::EndOfInput)) {
            let eoi = match tokens.back() {
                Some(last) => Token::new(
                    TokenKind::EndOfInput,
                    "",
                    last.line,
                    last.column + last.lexeme.chars().count(),
                    Span::from(last.span.end..last.span.end),
                ),
                None => Token::new(TokenKind::EndOfInput, "", 1, 1, Span::from(0..0)),
            };
            tokens.push_back(eoi);
        }
        Self { tokens }
    }

    pub fn peek(&self) -> &Token<'src> {
        // `new` guarantees a trailing EndOfInput that `advance` never removes
        &self.tokens[0]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub fn at_end(&self) -> bool {
        self.peek().is(TokenKind::EndOfInput)
    }

    pub fn advance(&mut self) -> Token<'src> {
        if self.at_end() {
            return self.peek().clone();
        }
        match self.tokens.pop_front() {
            Some(token) => token,
            None => unreachable!("token stream lost its EndOfInput"),
        }
    }

    /// Consumes the next token if its kind is one of `expected`, otherwise
    /// reports it as unexpected in `rule` and leaves it in place.
    pub fn expect(
        &mut self,
        expected: &[TokenKind],
        rule: GrammarRule,
    ) -> Result<Token<'src>, Diagnostic> {
        if expected.contains(&self.peek_kind()) {
            Ok(self.advance())
        } else {
            Err(Diagnostic::unexpected_token(rule, expected, self.peek()))
        }
    }

    /// Number of tokens left, including the trailing `EndOfInput`.
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}
