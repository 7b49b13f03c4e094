use tracing::{debug, trace};

use crate::ast::{ComparisonOp, Condition, Operand, Program, PublishTarget, Statement};
use crate::diagnostics::{Diagnostic, GrammarRule};
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Kinds that may begin a statement, in grammar order.
pub const STATEMENT_KEYWORDS: [TokenKind; 6] = [
    TokenKind::Source,
    TokenKind::Watch,
    TokenKind::Where,
    TokenKind::Publish,
    TokenKind::And,
    TokenKind::Or,
];

const OPERATORS: [TokenKind; 2] = [TokenKind::ArithmeticSymbol, TokenKind::Contains];
const OPERANDS: [TokenKind; 3] = [TokenKind::Word, TokenKind::Digit, TokenKind::Address];
const PUBLISH_TARGETS: [TokenKind; 2] = [TokenKind::Websockets, TokenKind::LogPublisher];

/// Parses a whole rule. Every token up to `EndOfInput` must belong to a statement.
pub fn parse(tokens: Vec<Token<'_>>) -> Result<Program, Diagnostic> {
    let mut parser = Parser::new(tokens);
    let program = parser.program().and_then(|program| {
        parser.finish(GrammarRule::Program, &STATEMENT_KEYWORDS)?;
        Ok(program)
    });

    match &program {
        Ok(program) => debug!(statements = program.len(), "parsed rule"),
        Err(diagnostic) => debug!(%diagnostic, "rejected rule"),
    }
    program
}

/// Parses a single condition, eg. `amount > 100`, with nothing after it.
pub fn parse_condition(tokens: Vec<Token<'_>>) -> Result<Condition, Diagnostic> {
    let mut parser = Parser::new(tokens);
    let condition = parser.condition()?;
    parser.finish(GrammarRule::Condition, &[])?;
    Ok(condition)
}

/// A predictive recursive-descent parser for the rule language.
///
/// Each grammar rule is one method. The current token alone picks the
/// alternative, so nothing is ever backtracked. The first mismatch stops
/// parsing and comes back as a `Diagnostic::Syntax`.
///
/// ```text
/// Program     := Statement*
/// Statement   := SourceStmt | WatchStmt | WhereStmt | PublishStmt | AndStmt | OrStmt
/// SourceStmt  := 'SOURCE' Word
/// WatchStmt   := 'WATCH' Word
/// WhereStmt   := 'WHERE' Condition
/// PublishStmt := 'PUBLISH' ('WEBSOCKETS' | 'LOG_PUBLISHER') Word
/// AndStmt     := 'AND' Condition
/// OrStmt      := 'OR' Condition
/// Condition   := Word (ArithmeticSymbol | 'CONTAINS') (Word | Digit | Address)
/// ```
pub struct Parser<'src> {
    stream: TokenStream<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
        }
    }

    /// Repeats `statement` while the lookahead can start one. The token that
    /// ends the loop is left in the stream.
    pub fn program(&mut self) -> Result<Program, Diagnostic> {
        let mut statements = Vec::new();
        while self.stream.peek_kind().starts_statement() {
            statements.push(self.statement()?);
        }
        Ok(Program::new(statements))
    }

    pub fn statement(&mut self) -> Result<Statement, Diagnostic> {
        let statement = match self.stream.peek_kind() {
            TokenKind::Source => self.source_statement(),
            TokenKind::Watch => self.watch_statement(),
            TokenKind::Where => self.where_statement(),
            TokenKind::Publish => self.publish_statement(),
            TokenKind::And => self.and_statement(),
            TokenKind::Or => self.or_statement(),
            _ => Err(Diagnostic::unexpected_token(
                GrammarRule::Statement,
                &STATEMENT_KEYWORDS,
                self.stream.peek(),
            )),
        }?;
        trace!(keyword = statement.keyword(), "parsed statement");
        Ok(statement)
    }

    pub fn source_statement(&mut self) -> Result<Statement, Diagnostic> {
        let rule = GrammarRule::SourceStatement;
        self.stream.expect(&[TokenKind::Source], rule)?;
        let name = self.word(rule)?;
        Ok(Statement::Source { name })
    }

    pub fn watch_statement(&mut self) -> Result<Statement, Diagnostic> {
        let rule = GrammarRule::WatchStatement;
        self.stream.expect(&[TokenKind::Watch], rule)?;
        let name = self.word(rule)?;
        Ok(Statement::Watch { name })
    }

    pub fn where_statement(&mut self) -> Result<Statement, Diagnostic> {
        self.stream
            .expect(&[TokenKind::Where], GrammarRule::WhereStatement)?;
        let condition = self.condition()?;
        Ok(Statement::Where { condition })
    }

    pub fn publish_statement(&mut self) -> Result<Statement, Diagnostic> {
        let rule = GrammarRule::PublishStatement;
        self.stream.expect(&[TokenKind::Publish], rule)?;
        let target = match self.stream.expect(&PUBLISH_TARGETS, rule)?.kind {
            TokenKind::Websockets => PublishTarget::Websockets,
            _ => PublishTarget::LogPublisher,
        };
        let channel = self.word(rule)?;
        Ok(Statement::Publish { target, channel })
    }

    pub fn and_statement(&mut self) -> Result<Statement, Diagnostic> {
        self.stream
            .expect(&[TokenKind::And], GrammarRule::AndStatement)?;
        let condition = self.condition()?;
        Ok(Statement::And { condition })
    }

    pub fn or_statement(&mut self) -> Result<Statement, Diagnostic> {
        self.stream
            .expect(&[TokenKind::Or], GrammarRule::OrStatement)?;
        let condition = self.condition()?;
        Ok(Statement::Or { condition })
    }

    /// Always consumes exactly three tokens: left word, operator, right operand.
    pub fn condition(&mut self) -> Result<Condition, Diagnostic> {
        let rule = GrammarRule::Condition;
        let left = self.word(rule)?;

        let operator_token = self.stream.expect(&OPERATORS, rule)?;
        let operator = match operator_token.kind {
            TokenKind::Contains => ComparisonOp::Contains,
            // The lexer only emits symbols `from_symbol` knows
            _ => ComparisonOp::from_symbol(operator_token.lexeme).ok_or_else(|| {
                Diagnostic::unexpected_token(rule, &OPERATORS, &operator_token)
            })?,
        };

        let right_token = self.stream.expect(&OPERANDS, rule)?;
        let text = right_token.lexeme.to_string();
        let right = match right_token.kind {
            TokenKind::Digit => Operand::Number(text),
            TokenKind::Address => Operand::Address(text),
            _ => Operand::Identifier(text),
        };

        Ok(Condition {
            left,
            operator,
            right,
        })
    }

    /// Requires the stream to be exhausted; `expected` lists what could have continued.
    pub fn finish(&mut self, rule: GrammarRule, expected: &[TokenKind]) -> Result<(), Diagnostic> {
        if self.stream.at_end() {
            return Ok(());
        }
        let mut expected = expected.to_vec();
        expected.push(TokenKind::EndOfInput);
        Err(Diagnostic::unexpected_token(rule, &expected, self.stream.peek()))
    }

    fn word(&mut self, rule: GrammarRule) -> Result<String, Diagnostic> {
        let token = self.stream.expect(&[TokenKind::Word], rule)?;
        Ok(token.lexeme.to_string())
    }
}
