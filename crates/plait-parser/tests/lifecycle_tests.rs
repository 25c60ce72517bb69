//! Tests for the node lifecycle and lexical-context contracts.

use crate::hooks::ParseExprAtom;
use crate::test_support::{parse_script, statement_expression};
use crate::{
    ContractViolation, HookRegistry, NodeData, ParseError, ParserOptions, ParserState, rule_fn,
};
use plait_common::{Position, SourceLocation};
use plait_scanner::{ContextError, LexicalContext};
use std::sync::Arc;

fn parser(source: &str) -> ParserState {
    ParserState::new(source, ParserOptions::default()).expect("parser setup failed")
}

#[test]
fn test_finishing_a_node_twice_is_a_contract_violation() {
    let mut p = parser("x");
    let builder = p.start_node();
    p.next_token().unwrap();
    p.finish_node(builder.clone(), NodeData::ThisExpression)
        .unwrap();

    let err = p
        .finish_node(builder, NodeData::ThisExpression)
        .unwrap_err();
    assert!(matches!(
        err,
        ParseError::Internal(ContractViolation::AlreadyFinished { index: 0 })
    ));
    assert!(!err.is_recoverable());
}

#[test]
fn test_finishing_before_the_start_is_a_contract_violation() {
    let mut p = parser("a b");
    p.next_token().unwrap();
    let builder = p.start_node();
    assert_eq!(builder.start(), 2);

    let err = p
        .finish_node_at(builder, NodeData::ThisExpression, 0, Position::new(1, 0))
        .unwrap_err();
    assert!(matches!(
        err,
        ParseError::Internal(ContractViolation::EndBeforeStart { start: 2, end: 0, .. })
    ));
}

#[test]
fn test_node_left_unfinished_fails_the_parse() {
    let mut registry = HookRegistry::new();
    registry.extend::<ParseExprAtom>(|inner| {
        rule_fn::<ParseExprAtom, _>(move |p, args| {
            let _leaked = p.start_node();
            inner(p, args)
        })
    });
    let mut p =
        ParserState::with_hooks("x;", ParserOptions::default(), Arc::new(registry)).unwrap();

    let err = p.parse_program().unwrap_err();
    assert!(
        matches!(
            err,
            ParseError::Internal(ContractViolation::UnfinishedNodes { count: 1, .. })
        ),
        "got {err:?}"
    );
}

#[test]
fn test_try_parse_propagates_contract_violations() {
    let mut p = parser("x");
    let result = p.try_parse(|p| {
        let builder = p.start_node();
        p.next_token()?;
        p.finish_node(builder.clone(), NodeData::ThisExpression)?;
        p.finish_node(builder, NodeData::ThisExpression)
    });
    assert!(matches!(
        result,
        Err(ParseError::Internal(ContractViolation::AlreadyFinished { .. }))
    ));
    assert_eq!(p.stats().rollbacks, 0);
}

#[test]
fn test_mismatched_context_pop_is_a_contract_violation() {
    let mut p = parser("x");
    p.push_context(LexicalContext::BraceExpression);

    let err = p.pop_context(LexicalContext::TypePosition).unwrap_err();
    assert_eq!(
        err,
        ParseError::Internal(ContractViolation::Context(ContextError::Mismatch {
            expected: LexicalContext::TypePosition,
            found: LexicalContext::BraceExpression,
        }))
    );
}

#[test]
fn test_context_underflow_is_a_contract_violation() {
    let mut p = parser("x");
    let err = p.pop_context(LexicalContext::BraceStatement).unwrap_err();
    assert_eq!(
        err,
        ParseError::Internal(ContractViolation::Context(ContextError::Underflow {
            expected: LexicalContext::BraceStatement,
        }))
    );
}

#[test]
fn test_finished_nodes_carry_offsets_and_positions() {
    let (p, root) = parse_script("let a;\nfoo + bar;");
    let expression = statement_expression(&p, root, 1);
    let node = p.arena().get(expression).unwrap();
    assert_eq!((node.pos, node.end), (7, 16));
    assert_eq!(
        node.loc,
        SourceLocation::new(Position::new(2, 0), Position::new(2, 9))
    );

    let program = p.arena().get(root).unwrap();
    assert_eq!((program.pos, program.end), (0, 17));
}

#[test]
fn test_nodes_finish_children_first() {
    let (p, root) = parse_script("a + b;");
    let expression = statement_expression(&p, root, 0);
    let Some(NodeData::BinaryExpression { left, right, .. }) = p.arena().data(expression) else {
        panic!("expected a binary expression");
    };
    let left = p.arena().get(*left).unwrap();
    let right = p.arena().get(*right).unwrap();
    assert!(left.end <= right.pos);
    assert_eq!(p.arena().pending_count(), 0);
}
