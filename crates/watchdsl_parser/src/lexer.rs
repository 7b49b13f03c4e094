use chumsky::prelude::*;
use tracing::{debug, trace};

use crate::diagnostics::Diagnostic;
use crate::token::{Span, Token, TokenKind};

pub type Spanned<T> = (T, Span);

/// Constructs the lexer that transforms raw rule text into a vector of spanned `TokenKind`s.
///
/// This lexer handles:
/// - Addresses: `0x` followed by hex digits, eg. `0xabc123`
/// - Digits: decimal literals, eg. `100`
/// - Arithmetic symbols: `==`, `!=`, `>=`, `<=`, `>`, `<`, `=`
/// - Keywords: `SOURCE`, `WATCH`, `WHERE`, `PUBLISH`, `AND`, `OR`, `CONTAINS`,
///   `WEBSOCKETS`, `LOG_PUBLISHER`
/// - Words: any other identifier
///
/// Whitespace is skipped. A character where no token class matches comes out
/// as a one-character `None`, spanning the start of the token that failed, so
/// callers can stop at it instead of at chumsky's furthest error.
pub fn lexer<'src>()
-> impl Parser<'src, &'src str, Vec<Spanned<Option<TokenKind>>>, extra::Err<Rich<'src, char, Span>>>
{
    // Literals must not run straight into an identifier, eg. `100abc`
    let ident_char = any().filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_');

    let address = just("0x")
        .then(any().filter(|c: &char| c.is_ascii_hexdigit()).repeated().at_least(1))
        .then_ignore(ident_char.clone().not())
        .to(TokenKind::Address);

    let digit = text::digits(10)
        .then_ignore(ident_char.not())
        .to(TokenKind::Digit);

    // Two-character operators must be tried before their one-character prefixes
    let symbol = choice((
        just(">="),
        just("<="),
        just("=="),
        just("!="),
        just(">"),
        just("<"),
        just("="),
    ))
    .to(TokenKind::ArithmeticSymbol);

    // Reserved words and identifiers
    let word = text::ascii::ident()
        .map(|identifier: &str| TokenKind::keyword(identifier).unwrap_or(TokenKind::Word));

    // Every alternative rewinds on failure, so this sits on the first character of the bad token
    let unrecognized = any().to(None);

    let token = choice((address, digit, symbol, word)).map(Some).or(unrecognized);

    token
        .map_with(|kind, e| (kind, e.span()))
        .padded()
        .repeated()
        .collect::<Vec<_>>()
        .padded()
}

/// Tokenizes `src`, attaching line/column positions and a trailing `EndOfInput` token.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, Diagnostic> {
    // Unmatched characters are tokens of their own, so an error here can only be at end of input
    let spanned = lexer().parse(src).into_result().map_err(|errors| {
        let offset = errors
            .first()
            .map(|error| error.span().start)
            .unwrap_or(src.len());
        let diagnostic = unexpected_character(src, offset);
        debug!(%diagnostic, "rejected rule text");
        diagnostic
    })?;

    let mut cursor = LineCursor::new(src);
    let mut tokens = Vec::with_capacity(spanned.len() + 1);
    for (kind, span) in spanned {
        let (line, column) = cursor.advance_to(span.start);
        let Some(kind) = kind else {
            let diagnostic = Diagnostic::Lexical {
                character: src[span.start..].chars().next(),
                line,
                column,
                span,
            };
            debug!(%diagnostic, "rejected rule text");
            return Err(diagnostic);
        };
        tokens.push(Token::new(kind, &src[span.start..span.end], line, column, span));
    }

    let (line, column) = cursor.advance_to(src.len());
    tokens.push(Token::new(
        TokenKind::EndOfInput,
        "",
        line,
        column,
        Span::from(src.len()..src.len()),
    ));

    trace!(count = tokens.len(), "tokenized rule text");
    Ok(tokens)
}

fn unexpected_character(src: &str, start: usize) -> Diagnostic {
    let character = src[start..].chars().next();
    let end = start + character.map(char::len_utf8).unwrap_or(0);
    let (line, column) = LineCursor::new(src).advance_to(start);

    Diagnostic::Lexical {
        character,
        line,
        column,
        span: Span::from(start..end),
    }
}

/// Walks forward through the source converting byte offsets to 1-based line/column.
/// Offsets must be requested in non-decreasing order, which keeps tokenizing linear.
struct LineCursor<'src> {
    src: &'src str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'src> LineCursor<'src> {
    fn new(src: &'src str) -> Self {
        Self {
            src,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn advance_to(&mut self, offset: usize) -> (usize, usize) {
        for c in self.src[self.offset..offset].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = offset;
        (self.line, self.column)
    }
}
