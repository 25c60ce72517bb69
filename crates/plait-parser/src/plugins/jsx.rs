//! JSX elements and fragments.
//!
//! Tag contents are scanned under `LexicalContext::JsxTag` and element
//! bodies under `LexicalContext::JsxChildren`. Expression containers push
//! `BraceExpression` so their contents scan as ordinary code. Every switch
//! happens before the token it affects is scanned.

use crate::errors::PResult;
use crate::hooks::{HookRegistry, ParseExprAtom, ParserPlugin, rule_fn};
use crate::node::{NodeData, NodeIndex, NodeList};
use crate::state::ParserState;
use plait_common::diagnostics::diagnostic_codes;
use plait_scanner::{LexicalContext, SyntaxKind};
use tracing::trace;

/// Registers the JSX extensions.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsxPlugin;

impl ParserPlugin for JsxPlugin {
    fn name(&self) -> &'static str {
        "jsx"
    }

    fn register(&self, registry: &mut HookRegistry) {
        registry.extend::<ParseExprAtom>(|inner| {
            rule_fn::<ParseExprAtom, _>(move |p, args| {
                if p.is_token(SyntaxKind::LessThanToken) {
                    return p.with_recursion_guard(parse_element);
                }
                inner(p, args)
            })
        });
    }
}

/// Element or fragment at `<`. The token after it is scanned in the
/// enclosing mode.
fn parse_element(p: &mut ParserState) -> PResult<NodeIndex> {
    trace!(pos = p.token_pos(), "parse_jsx_element");
    let (pos, loc) = (p.token_pos(), p.token_loc_start());
    let builder = p.start_node();
    p.push_context(LexicalContext::JsxTag);
    p.next_token()?;

    if p.is_token(SyntaxKind::GreaterThanToken) {
        enter_children(p)?;
        let children = parse_children(p)?;
        // `</>`
        p.push_context(LexicalContext::JsxTag);
        p.next_token()?;
        p.parse_expected(SyntaxKind::SlashToken)?;
        if !p.is_token(SyntaxKind::GreaterThanToken) {
            return Err(p.error(diagnostic_codes::JSX_CLOSING_TAG_EXPECTED, &["<>"]));
        }
        leave_element(p)?;
        return p.finish_node(builder, NodeData::JsxFragment { children });
    }

    let opening_builder = p.start_node_at(pos, loc);
    let name = parse_element_name(p)?;
    let attributes = parse_attributes(p)?;

    if p.parse_optional(SyntaxKind::SlashToken)? {
        if !p.is_token(SyntaxKind::GreaterThanToken) {
            return Err(p.expected_error(">"));
        }
        p.pop_context(LexicalContext::JsxTag)?;
        p.next_token()?;
        let opening = p.finish_node(
            opening_builder,
            NodeData::JsxOpeningElement {
                name,
                attributes,
                self_closing: true,
            },
        )?;
        return p.finish_node(
            builder,
            NodeData::JsxElement {
                opening,
                children: NodeList::new(),
                closing: None,
            },
        );
    }

    if !p.is_token(SyntaxKind::GreaterThanToken) {
        return Err(p.expected_error(">"));
    }
    enter_children(p)?;
    let opening = p.finish_node(
        opening_builder,
        NodeData::JsxOpeningElement {
            name,
            attributes,
            self_closing: false,
        },
    )?;
    let open_name = name_text(p, name);
    let children = parse_children(p).map_err(|err| {
        if p.is_token(SyntaxKind::EndOfFileToken) {
            p.error_at(
                p.arena.get(opening).map_or(0, |node| node.pos),
                diagnostic_codes::JSX_ELEMENT_HAS_NO_CLOSING_TAG,
                &[&open_name],
            )
        } else {
            err
        }
    })?;

    let closing_builder = p.start_node();
    p.push_context(LexicalContext::JsxTag);
    p.next_token()?;
    p.parse_expected(SyntaxKind::SlashToken)?;
    let closing_pos = p.token_pos();
    let closing_name = parse_element_name(p)?;
    if name_text(p, closing_name) != open_name {
        return Err(p.error_at(
            closing_pos,
            diagnostic_codes::JSX_CLOSING_TAG_EXPECTED,
            &[&open_name],
        ));
    }
    if !p.is_token(SyntaxKind::GreaterThanToken) {
        return Err(p.expected_error(">"));
    }
    leave_element(p)?;
    let closing = p.finish_node(
        closing_builder,
        NodeData::JsxClosingElement { name: closing_name },
    )?;
    p.finish_node(
        builder,
        NodeData::JsxElement {
            opening,
            children,
            closing: Some(closing),
        },
    )
}

/// At the `>` ending an opening tag: switch from tag to children mode.
fn enter_children(p: &mut ParserState) -> PResult<()> {
    p.pop_context(LexicalContext::JsxTag)?;
    p.push_context(LexicalContext::JsxChildren);
    p.next_token()?;
    Ok(())
}

/// At the `>` ending a closing tag: leave tag and children mode.
fn leave_element(p: &mut ParserState) -> PResult<()> {
    p.pop_context(LexicalContext::JsxTag)?;
    p.pop_context(LexicalContext::JsxChildren)?;
    p.next_token()?;
    Ok(())
}

/// Children up to the `<` of a closing tag, which is left current.
fn parse_children(p: &mut ParserState) -> PResult<NodeList> {
    let mut children = NodeList::new();
    loop {
        match p.token() {
            SyntaxKind::JsxText => {
                let builder = p.start_node();
                let value = p.token_value().to_string();
                let raw = p.token_text().to_string();
                p.next_token()?;
                children.push(p.finish_node(builder, NodeData::JsxText { value, raw })?);
            }
            SyntaxKind::OpenBraceToken => {
                children.push(parse_expression_container(p)?);
            }
            SyntaxKind::LessThanToken => {
                if p.look_ahead(|p| {
                    p.push_context(LexicalContext::JsxTag);
                    p.next_token()?;
                    Ok(p.is_token(SyntaxKind::SlashToken))
                })? {
                    return Ok(children);
                }
                children.push(p.with_recursion_guard(parse_element)?);
            }
            _ => return Err(p.unexpected()),
        }
    }
}

/// `{expr}` or `{}` in children or attribute position. The `}` is
/// consumed in the mode that was active before the `{`.
fn parse_expression_container(p: &mut ParserState) -> PResult<NodeIndex> {
    let builder = p.start_node();
    p.push_context(LexicalContext::BraceExpression);
    p.next_token()?;
    let expression = if p.is_token(SyntaxKind::CloseBraceToken) {
        None
    } else {
        Some(p.parse_expression()?)
    };
    p.close_brace(LexicalContext::BraceExpression)?;
    p.finish_node(builder, NodeData::JsxExpressionContainer { expression })
}

fn parse_attributes(p: &mut ParserState) -> PResult<NodeList> {
    let mut attributes = NodeList::new();
    while !matches!(
        p.token(),
        SyntaxKind::GreaterThanToken | SyntaxKind::SlashToken | SyntaxKind::EndOfFileToken
    ) {
        if p.is_token(SyntaxKind::OpenBraceToken) {
            let builder = p.start_node();
            p.push_context(LexicalContext::BraceExpression);
            p.next_token()?;
            p.parse_expected(SyntaxKind::DotDotDotToken)?;
            let argument = p.parse_assignment()?;
            p.close_brace(LexicalContext::BraceExpression)?;
            attributes.push(p.finish_node(builder, NodeData::JsxSpreadAttribute { argument })?);
            continue;
        }
        let builder = p.start_node();
        let name = parse_attribute_name(p)?;
        let value = if p.parse_optional(SyntaxKind::EqualsToken)? {
            Some(parse_attribute_value(p)?)
        } else {
            None
        };
        attributes.push(p.finish_node(builder, NodeData::JsxAttribute { name, value })?);
    }
    Ok(attributes)
}

fn parse_attribute_value(p: &mut ParserState) -> PResult<NodeIndex> {
    match p.token() {
        SyntaxKind::StringLiteral => {
            let builder = p.start_node();
            let value = p.token_value().to_string();
            let raw = p.token_text().to_string();
            p.next_token()?;
            p.finish_node(builder, NodeData::StringLiteral { value, raw })
        }
        SyntaxKind::OpenBraceToken => parse_expression_container(p),
        SyntaxKind::LessThanToken => p.with_recursion_guard(parse_element),
        _ => Err(p.error(diagnostic_codes::EXPRESSION_EXPECTED, &[])),
    }
}

fn parse_identifier(p: &mut ParserState) -> PResult<NodeIndex> {
    if !p.token().is_identifier_or_keyword() {
        return Err(p.error(diagnostic_codes::IDENTIFIER_EXPECTED, &[]));
    }
    let builder = p.start_node();
    let name = p.token_value().to_string();
    p.next_token()?;
    p.finish_node(builder, NodeData::JsxIdentifier { name })
}

/// `name` or `ns:name`.
fn parse_attribute_name(p: &mut ParserState) -> PResult<NodeIndex> {
    let name = parse_identifier(p)?;
    if !p.is_token(SyntaxKind::ColonToken) {
        return Ok(name);
    }
    let builder = p.start_node_at_node(name);
    p.next_token()?;
    let local = parse_identifier(p)?;
    p.finish_node(
        builder,
        NodeData::JsxNamespacedName {
            namespace: name,
            name: local,
        },
    )
}

/// `div`, `ns:tag` or `A.B.C`.
fn parse_element_name(p: &mut ParserState) -> PResult<NodeIndex> {
    let mut name = parse_attribute_name(p)?;
    if matches!(p.arena.data(name), Some(NodeData::JsxNamespacedName { .. })) {
        return Ok(name);
    }
    while p.is_token(SyntaxKind::DotToken) {
        let builder = p.start_node_at_node(name);
        p.next_token()?;
        let property = parse_identifier(p)?;
        name = p.finish_node(
            builder,
            NodeData::JsxMemberExpression {
                object: name,
                property,
            },
        )?;
    }
    Ok(name)
}

/// Source spelling of an element name, for matching closing tags.
fn name_text(p: &ParserState, name: NodeIndex) -> String {
    match p.arena.data(name) {
        Some(NodeData::JsxIdentifier { name }) => name.clone(),
        Some(NodeData::JsxNamespacedName { namespace, name }) => {
            format!("{}:{}", name_text(p, *namespace), name_text(p, *name))
        }
        Some(NodeData::JsxMemberExpression { object, property }) => {
            format!("{}.{}", name_text(p, *object), name_text(p, *property))
        }
        _ => String::new(),
    }
}
