//! Tests for statements, declarations, directives and module items.

use crate::test_support::{error_code, parse_script, parse_with, statements, type_name};
use crate::{NodeData, ParserOptions, VariableKind};
use plait_common::diagnostics::diagnostic_codes;
use plait_common::{ScriptTarget, SourceType};

fn script_error(source: &str) -> u32 {
    error_code(source, ParserOptions::default())
}

fn parse_module(source: &str) -> (crate::ParserState, crate::NodeIndex) {
    parse_with(source, ParserOptions::module())
}

// =============================================================================
// Variable declarations
// =============================================================================

#[test]
fn test_variable_declaration_kinds() {
    let (p, root) = parse_script("var a = 1; let b; const c = 2, d = 3;");
    let kinds: Vec<_> = statements(&p, root)
        .into_iter()
        .map(|statement| match p.arena().data(statement) {
            Some(NodeData::VariableDeclaration { kind, declarations }) => {
                (*kind, declarations.len())
            }
            other => panic!("expected a declaration, got {other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        [
            (VariableKind::Var, 1),
            (VariableKind::Let, 1),
            (VariableKind::Const, 2)
        ]
    );
}

#[test]
fn test_const_requires_an_initializer() {
    assert_eq!(
        script_error("const a;"),
        diagnostic_codes::CONST_DECLARATIONS_MUST_BE_INITIALIZED
    );
}

#[test]
fn test_const_in_for_of_head_needs_no_initializer() {
    let (p, root) = parse_script("for (const item of items) { }\nfor (const key in obj) { }");
    let body = statements(&p, root);
    assert_eq!(type_name(&p, body[0]), "ForOfStatement");
    assert_eq!(type_name(&p, body[1]), "ForInStatement");
}

#[test]
fn test_destructuring_declaration_requires_an_initializer() {
    assert_eq!(script_error("let [a];"), diagnostic_codes::EXPECTED);
}

#[test]
fn test_let_without_binding_is_an_identifier() {
    let (p, root) = parse_script("let = 1;");
    let statement = statements(&p, root)[0];
    assert_eq!(type_name(&p, statement), "ExpressionStatement");
}

#[test]
fn test_for_in_head_allows_a_single_declarator() {
    assert_eq!(
        script_error("for (var a, b in obj) { }"),
        diagnostic_codes::UNEXPECTED_TOKEN
    );
}

// =============================================================================
// Control flow
// =============================================================================

#[test]
fn test_control_flow_statement_kinds() {
    let (p, root) = parse_script(
        "if (a) b; else c;\n\
         for (;;) { }\n\
         while (x) ;\n\
         do x++; while (x < 3)\n\
         switch (v) { case 1: default: }\n\
         try { } catch (e) { }\n\
         debugger;",
    );
    let kinds: Vec<_> = statements(&p, root)
        .into_iter()
        .map(|statement| type_name(&p, statement))
        .collect();
    assert_eq!(
        kinds,
        [
            "IfStatement",
            "ForStatement",
            "WhileStatement",
            "DoWhileStatement",
            "SwitchStatement",
            "TryStatement",
            "DebuggerStatement"
        ]
    );
}

#[test]
fn test_break_and_continue_need_an_enclosing_construct() {
    assert_eq!(
        script_error("break;"),
        diagnostic_codes::BREAK_OUTSIDE_ITERATION_OR_SWITCH
    );
    assert_eq!(
        script_error("continue;"),
        diagnostic_codes::CONTINUE_OUTSIDE_ITERATION
    );
    assert_eq!(
        script_error("switch (x) { case 1: continue; }"),
        diagnostic_codes::CONTINUE_OUTSIDE_ITERATION
    );
    parse_script("while (x) { if (y) continue; break; }");
    parse_script("switch (x) { case 1: break; }");
}

#[test]
fn test_loops_inside_functions_do_not_leak_out() {
    assert_eq!(
        script_error("while (x) { function f() { break; } }"),
        diagnostic_codes::BREAK_OUTSIDE_ITERATION_OR_SWITCH
    );
}

#[test]
fn test_labels() {
    let (p, root) = parse_script("outer: for (;;) { inner: { break inner; } continue outer; }");
    assert_eq!(type_name(&p, statements(&p, root)[0]), "LabeledStatement");

    assert_eq!(script_error("a: a: x;"), diagnostic_codes::DUPLICATE_LABEL);
    assert_eq!(script_error("break nowhere;"), diagnostic_codes::JUMP_TARGET_NOT_FOUND);
    assert_eq!(
        script_error("block: { continue block; }"),
        diagnostic_codes::JUMP_TARGET_NOT_FOUND
    );
}

#[test]
fn test_label_is_released_after_its_statement() {
    parse_script("a: x;\na: y;");
}

#[test]
fn test_return_outside_a_function() {
    assert_eq!(
        script_error("return 1;"),
        diagnostic_codes::RETURN_OUTSIDE_FUNCTION
    );

    let options = ParserOptions {
        allow_return_outside_function: true,
        ..ParserOptions::default()
    };
    let (p, root) = parse_with("return 1;", options);
    assert_eq!(type_name(&p, statements(&p, root)[0]), "ReturnStatement");
}

#[test]
fn test_switch_allows_one_default_clause() {
    assert_eq!(
        script_error("switch (x) { default: default: }"),
        diagnostic_codes::DUPLICATE_DEFAULT_CLAUSE
    );
}

#[test]
fn test_try_needs_catch_or_finally() {
    assert_eq!(script_error("try { } x;"), diagnostic_codes::EXPECTED);
    parse_script("try { } finally { }");
}

#[test]
fn test_optional_catch_binding_depends_on_target() {
    let options = ParserOptions::default().with_target(ScriptTarget::ES2018);
    assert_eq!(
        error_code("try { } catch { }", options),
        diagnostic_codes::SYNTAX_REQUIRES_TARGET
    );
    parse_script("try { } catch { }");
}

#[test]
fn test_throw_argument_must_be_on_the_same_line() {
    assert_eq!(
        script_error("throw\nerr;"),
        diagnostic_codes::EXPRESSION_EXPECTED
    );
}

// =============================================================================
// Directives and strict mode
// =============================================================================

#[test]
fn test_use_strict_directive_enables_strict_mode() {
    let (p, root) = parse_script("\"use strict\";\nx;");
    let first = statements(&p, root)[0];
    assert!(matches!(
        p.arena().data(first),
        Some(NodeData::ExpressionStatement {
            directive: Some(directive),
            ..
        }) if directive == "use strict"
    ));
    assert!(p.is_strict());
    assert_eq!(
        script_error("\"use strict\";\nwith (a) { }"),
        diagnostic_codes::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE
    );
}

#[test]
fn test_string_expression_is_not_a_directive() {
    let (p, root) = parse_script("\"use strict\" + x;\nwith (a) { }");
    let first = statements(&p, root)[0];
    assert!(matches!(
        p.arena().data(first),
        Some(NodeData::ExpressionStatement {
            directive: None,
            ..
        })
    ));
    assert!(!p.is_strict());
}

#[test]
fn test_function_directive_is_scoped_to_the_body() {
    parse_script("function f() { \"use strict\"; }\nwith (a) { }");
    assert_eq!(
        script_error("function f() { \"use strict\"; with (a) { } }"),
        diagnostic_codes::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE
    );
}

#[test]
fn test_modules_are_strict() {
    let (p, _) = parse_module("x;");
    assert!(p.is_strict());
    assert_eq!(
        error_code("with (a) { }", ParserOptions::module()),
        diagnostic_codes::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE
    );
}

#[test]
fn test_strict_mode_rejects_eval_bindings() {
    assert_eq!(
        error_code("var eval;", ParserOptions::module()),
        diagnostic_codes::INVALID_USE_IN_STRICT_MODE
    );
    parse_script("var eval;");
}

// =============================================================================
// Functions and classes
// =============================================================================

#[test]
fn test_function_declarations_need_a_name() {
    assert_eq!(
        script_error("function () { }"),
        diagnostic_codes::IDENTIFIER_EXPECTED
    );
}

#[test]
fn test_async_functions_depend_on_target() {
    let options = ParserOptions::default().with_target(ScriptTarget::ES2015);
    assert_eq!(
        error_code("async function f() { }", options),
        diagnostic_codes::SYNTAX_REQUIRES_TARGET
    );
}

#[test]
fn test_class_members() {
    let (p, root) = parse_script(
        "class A extends B {\n\
           constructor() { super(); }\n\
           static create() { }\n\
           get value() { return 1; }\n\
           set value(v) { }\n\
           field = 1;\n\
         }",
    );
    let class = statements(&p, root)[0];
    let Some(NodeData::ClassDeclaration(class)) = p.arena().data(class) else {
        panic!("expected a class declaration");
    };
    assert!(class.super_class.is_some());
    let Some(NodeData::ClassBody { body }) = p.arena().data(class.body) else {
        panic!("expected a class body");
    };
    let kinds: Vec<_> = body.iter().map(|member| type_name(&p, member)).collect();
    assert_eq!(
        kinds,
        [
            "MethodDefinition",
            "MethodDefinition",
            "MethodDefinition",
            "MethodDefinition",
            "PropertyDefinition"
        ]
    );
}

#[test]
fn test_class_allows_one_constructor() {
    assert_eq!(
        script_error("class A { constructor() { } constructor() { } }"),
        diagnostic_codes::UNEXPECTED_TOKEN
    );
}

#[test]
fn test_accessor_parameter_counts() {
    assert_eq!(
        script_error("class A { get x(v) { } }"),
        diagnostic_codes::GET_ACCESSOR_CANNOT_HAVE_PARAMETERS
    );
    assert_eq!(
        script_error("class A { set x() { } }"),
        diagnostic_codes::SET_ACCESSOR_MUST_HAVE_ONE_PARAMETER
    );
}

#[test]
fn test_class_bodies_are_strict() {
    assert_eq!(
        script_error("class A { m() { with (a) { } } }"),
        diagnostic_codes::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE
    );
}

#[test]
fn test_class_fields_depend_on_target() {
    let options = ParserOptions::default().with_target(ScriptTarget::ES2020);
    assert_eq!(
        error_code("class A { x = 1; }", options),
        diagnostic_codes::SYNTAX_REQUIRES_TARGET
    );
}

// =============================================================================
// Modules
// =============================================================================

#[test]
fn test_module_syntax_is_rejected_in_scripts() {
    assert_eq!(
        script_error("import x from \"m\";"),
        diagnostic_codes::MODULE_SYNTAX_IN_SCRIPT
    );
    assert_eq!(
        script_error("export const a = 1;"),
        diagnostic_codes::MODULE_SYNTAX_IN_SCRIPT
    );
}

#[test]
fn test_import_forms() {
    let (p, root) = parse_module(
        "import \"side-effect\";\n\
         import a, { b as c, d } from \"m\";\n\
         import * as ns from \"n\";",
    );
    let counts: Vec<_> = statements(&p, root)
        .into_iter()
        .map(|statement| match p.arena().data(statement) {
            Some(NodeData::ImportDeclaration { specifiers, .. }) => specifiers.len(),
            other => panic!("expected an import, got {other:?}"),
        })
        .collect();
    assert_eq!(counts, [0, 3, 1]);
}

#[test]
fn test_export_forms() {
    let (p, root) = parse_module(
        "export const a = 1;\n\
         export { a as b };\n\
         export * as ns from \"m\";\n\
         export * from \"n\";\n\
         export default function () { }",
    );
    let kinds: Vec<_> = statements(&p, root)
        .into_iter()
        .map(|statement| type_name(&p, statement))
        .collect();
    assert_eq!(
        kinds,
        [
            "ExportNamedDeclaration",
            "ExportNamedDeclaration",
            "ExportAllDeclaration",
            "ExportAllDeclaration",
            "ExportDefaultDeclaration"
        ]
    );
}

#[test]
fn test_export_requires_a_declaration() {
    assert_eq!(
        error_code("export 1;", ParserOptions::module()),
        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED
    );
}

#[test]
fn test_import_source_must_be_a_string() {
    assert_eq!(
        error_code("import a from b;", ParserOptions::module()),
        diagnostic_codes::STRING_LITERAL_EXPECTED
    );
}

#[test]
fn test_dynamic_import_is_allowed_in_scripts() {
    let (p, root) = parse_with(
        "import(\"./m.js\");",
        ParserOptions::default().with_source_type(SourceType::Script),
    );
    assert_eq!(type_name(&p, statements(&p, root)[0]), "ExpressionStatement");
}
