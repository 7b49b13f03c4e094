use crate::utils::lex_tokens;
use watchdsl_parser::{
    ast::{ComparisonOp, Condition, Operand, Statement},
    diagnostics::{DiagnosticKind, GrammarRule},
    parser::Parser,
    token::TokenKind,
};

/// Assert that a single statement parses from `src` to exactly `want`.
fn assert_parses_to(src: &str, want: Statement) {
    let mut parser = Parser::new(lex_tokens(src));
    match parser.statement() {
        Ok(got) => assert_eq!(got, want),
        Err(diagnostic) => panic!("expected success on {:?}, got error: {}", src, diagnostic),
    }
    assert!(parser.finish(GrammarRule::Statement, &[]).is_ok(), "tokens left over in {:?}", src);
}

fn assert_fails(src: &str) {
    let mut parser = Parser::new(lex_tokens(src));
    let result = parser.statement();
    assert!(result.is_err(), "expected statement to fail on {:?}, got {:?}", src, result);
}

#[test]
fn source_statement() {
    assert_parses_to("SOURCE Block", Statement::Source { name: "Block".to_string() });
}

#[test]
fn watch_statement() {
    assert_parses_to("WATCH Transfer", Statement::Watch { name: "Transfer".to_string() });
}

#[test]
fn where_statement() {
    assert_parses_to(
        "WHERE amount > 100",
        Statement::Where {
            condition: Condition::new("amount", ComparisonOp::Greater, Operand::Number("100".to_string())),
        },
    );
}

#[test]
fn and_statement() {
    assert_parses_to(
        "AND value CONTAINS 0xabc123",
        Statement::And {
            condition: Condition::new(
                "value",
                ComparisonOp::Contains,
                Operand::Address("0xabc123".to_string()),
            ),
        },
    );
}

#[test]
fn or_statement() {
    assert_parses_to(
        "OR sender == miner",
        Statement::Or {
            condition: Condition::new("sender", ComparisonOp::Equal, Operand::Identifier("miner".to_string())),
        },
    );
}

#[test]
fn source_name_must_be_a_word() {
    assert_fails("SOURCE 42");
    assert_fails("SOURCE WATCH");
}

#[test]
fn where_needs_a_condition() {
    assert_fails("WHERE");
    assert_fails("WHERE amount");
}

#[test]
fn statement_must_start_with_a_keyword() {
    let mut parser = Parser::new(lex_tokens("Block"));
    let err = parser.statement().unwrap_err();

    assert_eq!(err.kind(), DiagnosticKind::Syntax);
    assert!(err.message().contains("in statement"), "{}", err);
    assert!(err.message().contains("found word"), "{}", err);
}

#[test]
fn keyword_accessor_matches_text() {
    let statements = [
        ("SOURCE Block", TokenKind::Source),
        ("WATCH Transfer", TokenKind::Watch),
        ("WHERE a > 1", TokenKind::Where),
        ("PUBLISH LOG_PUBLISHER audit", TokenKind::Publish),
        ("AND a > 1", TokenKind::And),
        ("OR a > 1", TokenKind::Or),
    ];
    for (src, kind) in statements {
        let statement = Parser::new(lex_tokens(src)).statement().unwrap();
        assert_eq!(format!("'{}'", statement.keyword()), kind.to_string());
    }
}

#[test]
fn condition_accessor() {
    let statement = Parser::new(lex_tokens("WHERE a > 1")).statement().unwrap();
    assert_eq!(statement.condition().map(|c| c.left.as_str()), Some("a"));

    let statement = Parser::new(lex_tokens("WATCH Transfer")).statement().unwrap();
    assert_eq!(statement.condition(), None);
}
