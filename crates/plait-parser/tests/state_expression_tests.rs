//! Tests for expression parsing: operators, subscripts, literals, arrows
//! and assignment targets.

use crate::test_support::{
    error_code, parse_error, parse_script, parse_with, statement_expression, type_name,
};
use crate::{
    AssignmentOperator, BinaryOperator, LogicalOperator, NodeData, NodeIndex, ParserOptions,
    ParserState,
};
use plait_common::ScriptTarget;
use plait_common::diagnostics::diagnostic_codes;

fn expression(source: &str) -> (ParserState, NodeIndex) {
    let (p, root) = parse_script(source);
    let expression = statement_expression(&p, root, 0);
    (p, expression)
}

fn script_error(source: &str) -> u32 {
    error_code(source, ParserOptions::default())
}

fn binary(p: &ParserState, node: NodeIndex) -> (BinaryOperator, NodeIndex, NodeIndex) {
    match p.arena().data(node) {
        Some(NodeData::BinaryExpression {
            operator,
            left,
            right,
        }) => (*operator, *left, *right),
        other => panic!("expected a binary expression, got {other:?}"),
    }
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let (p, node) = expression("a + b * c;");
    let (operator, left, right) = binary(&p, node);
    assert_eq!(operator, BinaryOperator::Addition);
    assert_eq!(p.arena().identifier_name(left), Some("a"));
    assert_eq!(binary(&p, right).0, BinaryOperator::Multiplication);
}

#[test]
fn test_same_precedence_is_left_associative() {
    let (p, node) = expression("a - b - c;");
    let (operator, left, right) = binary(&p, node);
    assert_eq!(operator, BinaryOperator::Subtraction);
    assert_eq!(binary(&p, left).0, BinaryOperator::Subtraction);
    assert_eq!(p.arena().identifier_name(right), Some("c"));
}

#[test]
fn test_exponentiation_is_right_associative() {
    let (p, node) = expression("a ** b ** c;");
    let (operator, left, right) = binary(&p, node);
    assert_eq!(operator, BinaryOperator::Exponentiation);
    assert_eq!(p.arena().identifier_name(left), Some("a"));
    assert_eq!(binary(&p, right).0, BinaryOperator::Exponentiation);
}

#[test]
fn test_unary_operand_of_exponentiation_is_rejected() {
    assert_eq!(script_error("-a ** 2;"), diagnostic_codes::UNEXPECTED_TOKEN);
    let (p, node) = expression("(-a) ** 2;");
    assert_eq!(binary(&p, node).0, BinaryOperator::Exponentiation);
}

#[test]
fn test_logical_operators() {
    let (p, node) = expression("a || b && c;");
    let Some(NodeData::LogicalExpression {
        operator: LogicalOperator::Or,
        right,
        ..
    }) = p.arena().data(node)
    else {
        panic!("expected `||` at the top");
    };
    assert!(matches!(
        p.arena().data(*right),
        Some(NodeData::LogicalExpression {
            operator: LogicalOperator::And,
            ..
        })
    ));
}

#[test]
fn test_operators_gated_by_target() {
    let es2019 = ParserOptions::default().with_target(ScriptTarget::ES2019);
    assert_eq!(
        error_code("a ?? b;", es2019.clone()),
        diagnostic_codes::SYNTAX_REQUIRES_TARGET
    );
    assert_eq!(
        error_code("a?.b;", es2019),
        diagnostic_codes::SYNTAX_REQUIRES_TARGET
    );
    assert_eq!(
        error_code(
            "a ||= b;",
            ParserOptions::default().with_target(ScriptTarget::ES2020)
        ),
        diagnostic_codes::SYNTAX_REQUIRES_TARGET
    );
}

#[test]
fn test_conditional_and_sequence() {
    let (p, node) = expression("a ? b : c, d;");
    let Some(NodeData::SequenceExpression { expressions }) = p.arena().data(node) else {
        panic!("expected a sequence");
    };
    assert_eq!(expressions.len(), 2);
    let first = expressions.first().unwrap();
    assert_eq!(type_name(&p, first), "ConditionalExpression");
}

#[test]
fn test_in_operator_and_instanceof() {
    let (p, node) = expression("k in obj instanceof Map;");
    let (operator, left, _) = binary(&p, node);
    assert_eq!(operator, BinaryOperator::InstanceOf);
    assert_eq!(binary(&p, left).0, BinaryOperator::In);
}

// =============================================================================
// Subscripts
// =============================================================================

#[test]
fn test_optional_chain_marks_only_the_optional_link() {
    let (p, node) = expression("a?.b.c;");
    let Some(NodeData::MemberExpression {
        object,
        optional: false,
        ..
    }) = p.arena().data(node)
    else {
        panic!("expected a plain member at the top");
    };
    assert!(matches!(
        p.arena().data(*object),
        Some(NodeData::MemberExpression { optional: true, .. })
    ));
}

#[test]
fn test_optional_call_and_computed_member() {
    let (p, node) = expression("f?.(x)?.[0];");
    let Some(NodeData::MemberExpression {
        object,
        computed: true,
        optional: true,
        ..
    }) = p.arena().data(node)
    else {
        panic!("expected an optional computed member");
    };
    assert!(matches!(
        p.arena().data(*object),
        Some(NodeData::CallExpression { optional: true, .. })
    ));
}

#[test]
fn test_new_callee_stops_before_arguments() {
    let (p, node) = expression("new a.b(c).d;");
    let Some(NodeData::MemberExpression { object, .. }) = p.arena().data(node) else {
        panic!("expected a member expression");
    };
    let Some(NodeData::NewExpression {
        callee, arguments, ..
    }) = p.arena().data(*object)
    else {
        panic!("expected a new expression");
    };
    assert_eq!(type_name(&p, *callee), "MemberExpression");
    assert_eq!(arguments.len(), 1);
}

#[test]
fn test_optional_chain_in_new_callee_is_rejected() {
    assert_eq!(script_error("new a?.b();"), diagnostic_codes::UNEXPECTED_TOKEN);
}

#[test]
fn test_super_needs_a_call_or_member() {
    assert_eq!(
        script_error("class A extends B { m() { super; } }"),
        diagnostic_codes::SUPER_MUST_BE_FOLLOWED_BY_ARGUMENTS_OR_MEMBER
    );
}

#[test]
fn test_new_target_only_inside_functions() {
    assert_eq!(script_error("new.target;"), diagnostic_codes::UNEXPECTED_TOKEN);
    parse_script("function f() { return new.target; }");
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_template_literal_parts() {
    let (p, node) = expression("`a${b}c${d}`;");
    let Some(NodeData::TemplateLiteral {
        quasis,
        expressions,
    }) = p.arena().data(node)
    else {
        panic!("expected a template literal");
    };
    assert_eq!(quasis.len(), 3);
    assert_eq!(expressions.len(), 2);
    let tail = quasis.iter().last().unwrap();
    assert!(matches!(
        p.arena().data(tail),
        Some(NodeData::TemplateElement { tail: true, .. })
    ));
}

#[test]
fn test_template_element_spans_exclude_delimiters() {
    let (p, node) = expression("`ab${x}`;");
    let Some(NodeData::TemplateLiteral { quasis, .. }) = p.arena().data(node) else {
        panic!("expected a template literal");
    };
    let head = p.arena().get(quasis.first().unwrap()).unwrap();
    assert_eq!((head.pos, head.end), (1, 3));
}

#[test]
fn test_invalid_template_escape() {
    assert_eq!(
        script_error("`\\xg`;"),
        diagnostic_codes::INVALID_ESCAPE_IN_TEMPLATE
    );

    let (p, node) = expression("tag`\\xg`;");
    let Some(NodeData::TaggedTemplateExpression { quasi, .. }) = p.arena().data(node) else {
        panic!("expected a tagged template");
    };
    let Some(NodeData::TemplateLiteral { quasis, .. }) = p.arena().data(*quasi) else {
        panic!("expected a template literal");
    };
    assert!(matches!(
        p.arena().data(quasis.first().unwrap()),
        Some(NodeData::TemplateElement { cooked: None, raw, .. }) if raw == "\\xg"
    ));
}

#[test]
fn test_slash_after_operand_divides() {
    let (p, node) = expression("a / b / c;");
    assert_eq!(binary(&p, node).0, BinaryOperator::Division);

    let (p, node) = expression("x = /ab+c/gi;");
    let Some(NodeData::AssignmentExpression { right, .. }) = p.arena().data(node) else {
        panic!("expected an assignment");
    };
    assert!(matches!(
        p.arena().data(*right),
        Some(NodeData::RegExpLiteral { pattern, flags }) if pattern == "ab+c" && flags == "gi"
    ));
}

#[test]
fn test_numeric_literal_values() {
    let (p, node) = expression("0x1F + 1e3;");
    let (_, left, right) = binary(&p, node);
    assert!(matches!(
        p.arena().data(left),
        Some(NodeData::NumericLiteral { value, .. }) if *value == 31.0
    ));
    assert!(matches!(
        p.arena().data(right),
        Some(NodeData::NumericLiteral { value, .. }) if *value == 1000.0
    ));
}

#[test]
fn test_legacy_octal_in_strict_mode() {
    parse_script("010;");
    assert_eq!(
        script_error("\"use strict\"; 010;"),
        diagnostic_codes::OCTAL_LITERALS_NOT_ALLOWED
    );
}

// =============================================================================
// Functions and arrows
// =============================================================================

#[test]
fn test_arrow_with_expression_body() {
    let (p, node) = expression("x => x * 2;");
    assert!(matches!(
        p.arena().data(node),
        Some(NodeData::ArrowFunctionExpression {
            expression: true,
            is_async: false,
            ..
        })
    ));
}

#[test]
fn test_async_arrows() {
    let (p, node) = expression("async (a, b) => { await a; };");
    assert!(matches!(
        p.arena().data(node),
        Some(NodeData::ArrowFunctionExpression {
            expression: false,
            is_async: true,
            ..
        })
    ));

    let (p, node) = expression("async x => x;");
    assert!(matches!(
        p.arena().data(node),
        Some(NodeData::ArrowFunctionExpression { is_async: true, .. })
    ));
}

#[test]
fn test_async_call_is_not_an_arrow() {
    let (p, node) = expression("async(a, b);");
    assert_eq!(type_name(&p, node), "CallExpression");
}

#[test]
fn test_line_break_before_arrow_is_rejected() {
    assert_eq!(
        script_error("x\n=> x;"),
        diagnostic_codes::LINE_TERMINATOR_BEFORE_ARROW
    );
}

#[test]
fn test_arrow_body_errors_are_reported_in_the_body() {
    let err = parse_error("var f = (a) => { return 1 + ; };", ParserOptions::default());
    assert_eq!(err.code(), Some(diagnostic_codes::EXPRESSION_EXPECTED));
    assert_eq!(err.pos(), Some(28));
    assert!(err.to_string().contains("(1:28)"), "{err}");

    let err = parse_error("var f = a => { return 1 + ; };", ParserOptions::default());
    assert_eq!(err.code(), Some(diagnostic_codes::EXPRESSION_EXPECTED));
    assert_eq!(err.pos(), Some(26));

    let err = parse_error("var f = async (a) => a + ;", ParserOptions::default());
    assert_eq!(err.code(), Some(diagnostic_codes::EXPRESSION_EXPECTED));
    assert_eq!(err.pos(), Some(25));
}

#[test]
fn test_async_arrow_depends_on_target() {
    let options = ParserOptions::default().with_target(ScriptTarget::ES2015);
    assert_eq!(
        error_code("var f = async (a) => a;", options),
        diagnostic_codes::SYNTAX_REQUIRES_TARGET
    );
}

#[test]
fn test_yield_and_await_depend_on_context() {
    let (p, root) = parse_script("function* g() { yield; yield* inner(); }\nawait(x);");
    assert_eq!(type_name(&p, statement_expression(&p, root, 1)), "CallExpression");

    let (p, root) = parse_with("await x;", ParserOptions::module());
    assert_eq!(type_name(&p, statement_expression(&p, root, 0)), "AwaitExpression");
}

// =============================================================================
// Assignment targets
// =============================================================================

#[test]
fn test_invalid_assignment_targets() {
    assert_eq!(script_error("1 = 2;"), diagnostic_codes::INVALID_ASSIGNMENT_TARGET);
    assert_eq!(script_error("a + b = c;"), diagnostic_codes::INVALID_ASSIGNMENT_TARGET);
    assert_eq!(script_error("++f();"), diagnostic_codes::INVALID_ASSIGNMENT_TARGET);
    assert_eq!(script_error("[a] += 1;"), diagnostic_codes::INVALID_ASSIGNMENT_TARGET);
}

#[test]
fn test_destructuring_assignment_converts_literals_to_patterns() {
    let (p, node) = expression("[a, { b }] = list;");
    let Some(NodeData::AssignmentExpression {
        operator: AssignmentOperator::Assign,
        left,
        ..
    }) = p.arena().data(node)
    else {
        panic!("expected an assignment");
    };
    assert_eq!(type_name(&p, *left), "ArrayPattern");
}

#[test]
fn test_shorthand_initializer_needs_a_pattern_position() {
    assert_eq!(script_error("({ a = 1 });"), diagnostic_codes::EXPECTED);
    parse_script("({ a = 1 } = obj);");
}

// =============================================================================
// Standalone expressions
// =============================================================================

#[test]
fn test_standalone_expression_consumes_all_input() {
    let mut p = ParserState::new("a + b", ParserOptions::default()).unwrap();
    let node = p.parse_standalone_expression().unwrap();
    assert_eq!(binary(&p, node).0, BinaryOperator::Addition);

    let mut p = ParserState::new("a b", ParserOptions::default()).unwrap();
    let err = p.parse_standalone_expression().unwrap_err();
    assert_eq!(err.code(), Some(diagnostic_codes::UNEXPECTED_TOKEN));
}
