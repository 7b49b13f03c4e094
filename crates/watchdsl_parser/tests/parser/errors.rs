use watchdsl_parser::{
    diagnostics::{Diagnostic, DiagnosticKind, GrammarRule},
    lex_and_parse,
    parser::STATEMENT_KEYWORDS,
    token::{Span, TokenKind},
};

fn syntax_error(src: &str) -> Diagnostic {
    match lex_and_parse(src) {
        Ok(program) => panic!("expected {:?} to fail, parsed {:?}", src, program),
        Err(diagnostic) => {
            assert_eq!(diagnostic.kind(), DiagnosticKind::Syntax, "{}", diagnostic);
            diagnostic
        }
    }
}

#[test]
fn source_without_identifier() {
    assert_eq!(
        syntax_error("SOURCE"),
        Diagnostic::Syntax {
            rule: GrammarRule::SourceStatement,
            expected: vec![TokenKind::Word],
            found: TokenKind::EndOfInput,
            lexeme: String::new(),
            line: 1,
            column: 7,
            span: Span::from(6..6),
        }
    );
}

#[test]
fn where_without_operator() {
    assert_eq!(
        syntax_error("WHERE amount 100"),
        Diagnostic::Syntax {
            rule: GrammarRule::Condition,
            expected: vec![TokenKind::ArithmeticSymbol, TokenKind::Contains],
            found: TokenKind::Digit,
            lexeme: "100".to_string(),
            line: 1,
            column: 14,
            span: Span::from(13..16),
        }
    );
}

#[test]
fn error_message_reads_well() {
    assert_eq!(
        syntax_error("WHERE amount 100").message(),
        "1:14: expected arithmetic symbol or 'CONTAINS' in condition, found digit"
    );
}

#[test]
fn first_failure_wins() {
    // Both statements are broken; only the first is reported.
    let err = syntax_error("WATCH 1 SOURCE 2");
    assert_eq!(err.column(), 7);
}

#[test]
fn trailing_token_is_rejected() {
    match syntax_error("SOURCE Block extra") {
        Diagnostic::Syntax {
            rule,
            expected,
            found,
            lexeme,
            ..
        } => {
            assert_eq!(rule, GrammarRule::Program);
            let mut want = STATEMENT_KEYWORDS.to_vec();
            want.push(TokenKind::EndOfInput);
            assert_eq!(expected, want);
            assert_eq!(found, TokenKind::Word);
            assert_eq!(lexeme, "extra");
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn lexical_errors_pass_through() {
    let err = lex_and_parse("WHERE amount > 1.5").unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::Lexical);
    assert_eq!(err.column(), 17);
}

#[test]
fn position_on_second_line() {
    let err = syntax_error("SOURCE Block\nWATCH\n");
    assert_eq!((err.line(), err.column()), (3, 1));
}

#[test]
fn report_renders_rule_text() {
    let src = "PUBLISH SLACK alerts";
    let report = syntax_error(src).report(src);

    assert!(report.contains("invalid publish statement"), "{report}");
    assert!(report.contains(src), "{report}");
}
