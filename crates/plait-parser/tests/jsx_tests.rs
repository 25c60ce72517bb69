//! Tests for the JSX plugin.

use crate::test_support::{error_code, kinds_under, parse_with, statement_expression, type_name};
use crate::{NodeData, NodeIndex, ParserOptions, ParserState, Plugins};
use plait_common::diagnostics::diagnostic_codes;

fn jsx() -> ParserOptions {
    ParserOptions::default().with_plugins(Plugins::JSX)
}

fn element(source: &str) -> (ParserState, NodeIndex) {
    let (p, root) = parse_with(source, jsx());
    let expression = statement_expression(&p, root, 0);
    (p, expression)
}

fn opening(p: &ParserState, element: NodeIndex) -> (NodeIndex, Vec<NodeIndex>, bool) {
    let Some(NodeData::JsxElement { opening, .. }) = p.arena().data(element) else {
        panic!("expected a JSX element");
    };
    let Some(NodeData::JsxOpeningElement {
        name,
        attributes,
        self_closing,
    }) = p.arena().data(*opening)
    else {
        panic!("expected an opening element");
    };
    (*name, attributes.iter().collect(), *self_closing)
}

#[test]
fn test_element_with_attributes_and_children() {
    let (p, node) = element("<div className=\"box\" data-id={id} {...rest} hidden>hi {name}</div>;");
    let (name, attributes, self_closing) = opening(&p, node);
    assert!(!self_closing);
    assert!(matches!(
        p.arena().data(name),
        Some(NodeData::JsxIdentifier { name }) if name == "div"
    ));

    let kinds: Vec<_> = attributes.iter().map(|a| type_name(&p, *a)).collect();
    assert_eq!(
        kinds,
        [
            "JSXAttribute",
            "JSXAttribute",
            "JSXSpreadAttribute",
            "JSXAttribute"
        ]
    );
    let Some(NodeData::JsxAttribute { name, value }) = p.arena().data(attributes[1]) else {
        panic!("expected an attribute");
    };
    assert!(matches!(
        p.arena().data(*name),
        Some(NodeData::JsxIdentifier { name }) if name == "data-id"
    ));
    assert_eq!(type_name(&p, value.unwrap()), "JSXExpressionContainer");
    assert!(matches!(
        p.arena().data(attributes[3]),
        Some(NodeData::JsxAttribute { value: None, .. })
    ));

    let Some(NodeData::JsxElement {
        children,
        closing: Some(_),
        ..
    }) = p.arena().data(node)
    else {
        panic!("expected a closed element");
    };
    let kinds: Vec<_> = children.iter().map(|child| type_name(&p, child)).collect();
    assert_eq!(kinds, ["JSXText", "JSXExpressionContainer"]);
}

#[test]
fn test_fragment() {
    let (p, node) = element("<>a{b}<c /></>;");
    let Some(NodeData::JsxFragment { children }) = p.arena().data(node) else {
        panic!("expected a fragment");
    };
    let kinds: Vec<_> = children.iter().map(|child| type_name(&p, child)).collect();
    assert_eq!(kinds, ["JSXText", "JSXExpressionContainer", "JSXElement"]);
}

#[test]
fn test_self_closing_member_and_namespaced_names() {
    let (p, node) = element("<Foo.Bar.Baz />;");
    let (name, _, self_closing) = opening(&p, node);
    assert!(self_closing);
    assert_eq!(type_name(&p, name), "JSXMemberExpression");

    let (p, node) = element("<svg:rect width=\"1\" />;");
    let (name, attributes, _) = opening(&p, node);
    assert_eq!(type_name(&p, name), "JSXNamespacedName");
    assert_eq!(attributes.len(), 1);
}

#[test]
fn test_text_decodes_entities() {
    let (p, node) = element("<p>a &amp; b</p>;");
    let Some(NodeData::JsxElement { children, .. }) = p.arena().data(node) else {
        panic!("expected an element");
    };
    assert!(matches!(
        p.arena().data(children.first().unwrap()),
        Some(NodeData::JsxText { value, raw }) if value == "a & b" && raw == "a &amp; b"
    ));
}

#[test]
fn test_empty_expression_container() {
    let (p, node) = element("<a>{}</a>;");
    let Some(NodeData::JsxElement { children, .. }) = p.arena().data(node) else {
        panic!("expected an element");
    };
    assert!(matches!(
        p.arena().data(children.first().unwrap()),
        Some(NodeData::JsxExpressionContainer { expression: None })
    ));
}

#[test]
fn test_element_as_attribute_value_and_operand() {
    let (p, node) = element("cond ? <a icon=<Icon /> /> : null;");
    assert_eq!(type_name(&p, node), "ConditionalExpression");
    let kinds = kinds_under(p.arena(), node);
    assert_eq!(kinds.iter().filter(|kind| **kind == "JSXElement").count(), 2);
}

#[test]
fn test_nested_elements_restore_the_outer_mode() {
    let (p, root) = parse_with("const el = <ul><li>one</li><li>two</li></ul>;\nx = 1 / 2;", jsx());
    let kinds = kinds_under(p.arena(), root);
    assert_eq!(kinds.iter().filter(|kind| **kind == "JSXElement").count(), 3);
    assert!(kinds.contains(&"BinaryExpression"), "{kinds:?}");
}

#[test]
fn test_mismatched_closing_tag() {
    assert_eq!(
        error_code("<a></b>;", jsx()),
        diagnostic_codes::JSX_CLOSING_TAG_EXPECTED
    );
    assert_eq!(
        error_code("<a.b></a.c>;", jsx()),
        diagnostic_codes::JSX_CLOSING_TAG_EXPECTED
    );
}

#[test]
fn test_unclosed_element() {
    assert_eq!(
        error_code("<a>text", jsx()),
        diagnostic_codes::JSX_ELEMENT_HAS_NO_CLOSING_TAG
    );
}

#[test]
fn test_elements_need_the_plugin() {
    assert_eq!(
        error_code("<a />;", ParserOptions::default()),
        diagnostic_codes::EXPRESSION_EXPECTED
    );
}
