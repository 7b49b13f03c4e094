use std::fmt;
use std::io;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::token::{Span, Token, TokenKind};

/// The grammar rule that was being recognized when a syntax error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarRule {
    Program,
    Statement,
    SourceStatement,
    WatchStatement,
    WhereStatement,
    PublishStatement,
    AndStatement,
    OrStatement,
    Condition,
}

impl fmt::Display for GrammarRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GrammarRule::Program => "program",
            GrammarRule::Statement => "statement",
            GrammarRule::SourceStatement => "source statement",
            GrammarRule::WatchStatement => "watch statement",
            GrammarRule::WhereStatement => "where statement",
            GrammarRule::PublishStatement => "publish statement",
            GrammarRule::AndStatement => "and statement",
            GrammarRule::OrStatement => "or statement",
            GrammarRule::Condition => "condition",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
}

/// The single error produced by a failed `tokenize` or `parse` call.
///
/// Nothing is recovered: the first failure stops the pipeline and is handed
/// back to the caller, which decides whether a malformed rule is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// No token class matches the input at this position.
    #[error("{line}:{column}: {}", describe_character(.character))]
    Lexical {
        /// `None` when the error sits at the end of input
        character: Option<char>,
        line: usize,
        column: usize,
        span: Span,
    },

    /// The token sequence does not fit the grammar.
    #[error("{line}:{column}: expected {} in {rule}, found {found}", one_of(.expected))]
    Syntax {
        rule: GrammarRule,
        expected: Vec<TokenKind>,
        found: TokenKind,
        lexeme: String,
        line: usize,
        column: usize,
        span: Span,
    },
}

impl Diagnostic {
    pub fn unexpected_token(rule: GrammarRule, expected: &[TokenKind], token: &Token<'_>) -> Self {
        Diagnostic::Syntax {
            rule,
            expected: expected.to_vec(),
            found: token.kind,
            lexeme: token.lexeme.to_string(),
            line: token.line,
            column: token.column,
            span: token.span,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::Lexical { .. } => DiagnosticKind::Lexical,
            Diagnostic::Syntax { .. } => DiagnosticKind::Syntax,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Diagnostic::Lexical { line, .. } | Diagnostic::Syntax { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            Diagnostic::Lexical { column, .. } | Diagnostic::Syntax { column, .. } => *column,
        }
    }

    /// Byte range of the offending input.
    pub fn span(&self) -> Span {
        match self {
            Diagnostic::Lexical { span, .. } | Diagnostic::Syntax { span, .. } => *span,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Renders the diagnostic against `src` without colours, for logs and tests.
    pub fn report(&self, src: &str) -> String {
        let mut out = Vec::new();
        self.build_report(false)
            .write(Source::from(src), &mut out)
            .expect("writing a report into memory cannot fail");
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Prints a coloured report for `src` to stderr.
    pub fn eprint(&self, src: &str) -> io::Result<()> {
        self.build_report(true).eprint(Source::from(src))
    }

    fn build_report(&self, color: bool) -> Report<'static> {
        let range = self.span().into_range();
        let (code, title, label) = match self {
            Diagnostic::Lexical { character, .. } => (
                "lexical",
                "unrecognized input".to_string(),
                describe_character(character),
            ),
            Diagnostic::Syntax {
                rule,
                expected,
                found,
                ..
            } => (
                "syntax",
                format!("invalid {rule}"),
                format!("expected {}, found {found}", one_of(expected)),
            ),
        };

        Report::build(ReportKind::Error, range.clone())
            .with_config(
                Config::default()
                    .with_color(color)
                    .with_index_type(IndexType::Byte),
            )
            .with_code(code)
            .with_message(title)
            .with_label(Label::new(range).with_message(label).with_color(Color::Red))
            .finish()
    }
}

fn describe_character(character: &Option<char>) -> String {
    match character {
        Some(c) => format!("unexpected character {c:?}"),
        None => "unexpected end of input".to_string(),
    }
}

fn one_of(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [first, second] => format!("{first} or {second}"),
        _ => {
            let kinds: Vec<String> = expected.iter().map(TokenKind::to_string).collect();
            format!("one of {}", kinds.join(", "))
        }
    }
}
