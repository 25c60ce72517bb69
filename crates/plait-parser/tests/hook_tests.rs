//! Tests for hook chain composition and plugin registration.

use crate::hooks::{ParseExprAtom, ParseStatement};
use crate::test_support::{parse_error, parse_with, statements, type_name};
use crate::{
    HookRegistry, NodeData, NodeIndex, OptionsError, ParseError, ParserOptions, ParserPlugin,
    ParserState, Plugins, rule_fn,
};
use plait_scanner::SyntaxKind;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

/// Wraps `ParseStatement`, logging entry and exit around the inner call.
struct Tracer {
    name: &'static str,
    log: Log,
}

impl ParserPlugin for Tracer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn register(&self, registry: &mut HookRegistry) {
        let (name, log) = (self.name, Arc::clone(&self.log));
        registry.extend::<ParseStatement>(move |inner| {
            rule_fn::<ParseStatement, _>(move |p, args| {
                log.lock().unwrap().push(format!("{name} enter"));
                let result = inner(p, args);
                log.lock().unwrap().push(format!("{name} exit"));
                result
            })
        });
    }
}

fn parse_with_registry(source: &str, registry: HookRegistry) -> (ParserState, NodeIndex) {
    let mut p = ParserState::with_hooks(source, ParserOptions::default(), Arc::new(registry))
        .expect("parser setup failed");
    let root = p.parse_program().expect("parse failed");
    (p, root)
}

#[test]
fn test_last_registered_wrapper_runs_outermost() {
    let log: Log = Arc::default();
    let mut registry = HookRegistry::new();
    // Registered first, so it sits directly on the core rule.
    let core_log = Arc::clone(&log);
    registry.extend::<ParseStatement>(move |inner| {
        rule_fn::<ParseStatement, _>(move |p, args| {
            core_log.lock().unwrap().push("core".to_string());
            inner(p, args)
        })
    });
    registry
        .register(&Tracer {
            name: "A",
            log: Arc::clone(&log),
        })
        .register(&Tracer {
            name: "B",
            log: Arc::clone(&log),
        });

    let (p, root) = parse_with_registry("x;", registry);

    assert_eq!(statements(&p, root).len(), 1);
    let log = log.lock().unwrap();
    assert_eq!(
        *log,
        vec!["B enter", "A enter", "core", "A exit", "B exit"]
    );
    for entry in ["core", "A enter", "B enter"] {
        assert_eq!(log.iter().filter(|e| *e == entry).count(), 1, "{entry}");
    }
}

#[test]
fn test_registry_records_plugins_and_extensions() {
    let log: Log = Arc::default();
    let registry = HookRegistry::new()
        .with_plugin(&Tracer {
            name: "A",
            log: Arc::clone(&log),
        })
        .with_plugin(&Tracer { name: "B", log });
    assert_eq!(registry.plugins(), ["A", "B"]);
    assert_eq!(registry.extension_count(), 2);
}

#[test]
fn test_wrapper_can_replace_the_core_rule() {
    let mut registry = HookRegistry::new();
    registry.extend::<ParseExprAtom>(|inner| {
        rule_fn::<ParseExprAtom, _>(move |p, args| {
            if p.is_contextual("self") {
                let builder = p.start_node();
                p.next_token()?;
                return p.finish_node(builder, NodeData::ThisExpression);
            }
            inner(p, args)
        })
    });

    let (p, root) = parse_with_registry("self; other;", registry);
    let kinds: Vec<_> = statements(&p, root)
        .into_iter()
        .map(|statement| match p.arena().data(statement) {
            Some(NodeData::ExpressionStatement { expression, .. }) => type_name(&p, *expression),
            _ => "<not an expression statement>",
        })
        .collect();
    assert_eq!(kinds, ["ThisExpression", "Identifier"]);
}

#[test]
fn test_wrapper_can_call_inner_more_than_once() {
    // Each call consumes two statements and keeps only the second.
    let mut registry = HookRegistry::new();
    registry.extend::<ParseStatement>(|inner| {
        rule_fn::<ParseStatement, _>(move |p, args| {
            let first = inner(p, args)?;
            if p.is_token(SyntaxKind::EndOfFileToken) {
                return Ok(first);
            }
            inner(p, args)
        })
    });

    let (p, root) = parse_with_registry("a; b;", registry);
    assert_eq!(statements(&p, root).len(), 1);
}

#[test]
fn test_rule_names_cover_every_hookable_rule() {
    let names = HookRegistry::rule_names();
    for expected in [
        "ParseStatement",
        "ParseExpressionStatement",
        "ParseVarHead",
        "ParseFunctionParams",
        "ParseFunctionParam",
        "ParseAssignableListItemTypes",
        "ParseFunctionBody",
        "ParseArrow",
        "ParseExprOp",
        "ParseMaybeUnary",
        "ParseSubscript",
        "ParseNewArguments",
        "ParseExprAtom",
        "ParseClassSuper",
        "ParseClassModifiers",
        "ParseClassProperty",
    ] {
        assert!(names.contains(&expected), "missing rule {expected}");
    }
}

#[test]
fn test_plugins_register_type_plugin_before_jsx() {
    let registry = HookRegistry::for_plugins(Plugins::TYPESCRIPT | Plugins::JSX).unwrap();
    assert_eq!(registry.plugins(), ["typescript", "jsx"]);
}

#[test]
fn test_conflicting_type_plugins_are_rejected() {
    let options = ParserOptions::default().with_plugins(Plugins::TYPESCRIPT | Plugins::FLOW);
    let err = ParserState::new("x;", options).err().expect("setup should fail");
    assert_eq!(
        err,
        ParseError::Options(OptionsError::ConflictingTypePlugins)
    );
}

#[test]
fn test_plain_grammar_rejects_type_annotations() {
    let err = parse_error("let v: number = 1;", ParserOptions::default());
    assert!(err.is_recoverable());

    let (p, root) = parse_with(
        "let v: number = 1;",
        ParserOptions::default().with_plugins(Plugins::TYPESCRIPT),
    );
    assert_eq!(statements(&p, root).len(), 1);
}
