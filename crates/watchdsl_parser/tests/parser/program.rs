use watchdsl_parser::{
    ast::{ComparisonOp, Condition, Operand, Program, PublishTarget, Statement},
    lex_and_parse,
};

fn assert_parses_to(src: &str, want: Vec<Statement>) {
    match lex_and_parse(src) {
        Ok(got) => assert_eq!(got, Program::new(want)),
        Err(diagnostic) => panic!("expected success on {:?}, got error:\n{}", src, diagnostic.report(src)),
    }
}

#[test]
fn empty_input_is_an_empty_program() {
    assert_parses_to("", vec![]);
    assert_parses_to("   \n ", vec![]);
}

#[test]
fn single_source() {
    assert_parses_to("SOURCE Block", vec![Statement::Source { name: "Block".to_string() }]);
}

#[test]
fn watch_where_publish() {
    assert_parses_to(
        "WATCH Transfer WHERE amount > 100 PUBLISH WEBSOCKETS alerts",
        vec![
            Statement::Watch { name: "Transfer".to_string() },
            Statement::Where {
                condition: Condition::new("amount", ComparisonOp::Greater, Operand::Number("100".to_string())),
            },
            Statement::Publish {
                target: PublishTarget::Websockets,
                channel: "alerts".to_string(),
            },
        ],
    );
}

#[test]
fn standalone_and() {
    assert_parses_to(
        "AND value CONTAINS 0xabc123",
        vec![Statement::And {
            condition: Condition::new(
                "value",
                ComparisonOp::Contains,
                Operand::Address("0xabc123".to_string()),
            ),
        }],
    );
}

#[test]
fn and_or_clauses_stay_flat() {
    let program = lex_and_parse(
        "SOURCE Block WATCH Transaction WHERE value > 10 AND to == bob OR from == alice PUBLISH LOG_PUBLISHER audit",
    )
    .unwrap();

    let keywords: Vec<_> = program.iter().map(Statement::keyword).collect();
    assert_eq!(keywords, ["SOURCE", "WATCH", "WHERE", "AND", "OR", "PUBLISH"]);
}

#[test]
fn order_and_duplicates_are_preserved() {
    let program = lex_and_parse("WATCH b WATCH a WATCH b").unwrap();
    assert_eq!(
        program.statements,
        vec![
            Statement::Watch { name: "b".to_string() },
            Statement::Watch { name: "a".to_string() },
            Statement::Watch { name: "b".to_string() },
        ]
    );
}

#[test]
fn statements_may_span_lines() {
    let src = "SOURCE Block\n  WATCH Transfer\n  WHERE amount >= 5\n  PUBLISH WEBSOCKETS feed\n";
    assert_eq!(lex_and_parse(src).unwrap().len(), 4);
}

#[test]
fn parsing_is_idempotent() {
    let src = "WATCH Transfer WHERE amount > 100 OR to CONTAINS 0xdead PUBLISH WEBSOCKETS alerts";
    assert_eq!(lex_and_parse(src).unwrap(), lex_and_parse(src).unwrap());
}

#[test]
fn canonical_text_round_trips() {
    let src = "SOURCE  Block\nWHERE amount=100   AND data CONTAINS 0xAbC PUBLISH LOG_PUBLISHER audit";
    let program = lex_and_parse(src).unwrap();
    let printed = program.to_string();

    assert_eq!(
        printed,
        "SOURCE Block WHERE amount == 100 AND data CONTAINS 0xAbC PUBLISH LOG_PUBLISHER audit"
    );
    assert_eq!(lex_and_parse(&printed).unwrap(), program);
}
