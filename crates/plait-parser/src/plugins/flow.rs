//! Structural type annotations (Flow).
//!
//! Shares the type grammar with the TypeScript plugin; `?T` maybe-types
//! are enabled there by the plugin flag.

use crate::errors::PResult;
use crate::hooks::{
    ArrowHead, ClassHeritage, ClassPropertyArgs, ExpressionStatementArgs, FunctionBody,
    FunctionParams, HookRegistry, ParseArrow, ParseAssignableListItemTypes, ParseClassProperty,
    ParseClassSuper, ParseExpressionStatement, ParseFunctionBody, ParseFunctionParams,
    ParseVarHead, ParserPlugin, rule_fn,
};
use crate::node::{NodeData, NodeIndex};
use crate::node_arena::NodeBuilder;
use crate::plugins::typescript::{parse_binding_suffix, parse_type_name};
use crate::state::ParserState;
use plait_scanner::SyntaxKind;
use tracing::trace;

/// Registers the Flow extensions.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlowPlugin;

impl ParserPlugin for FlowPlugin {
    fn name(&self) -> &'static str {
        "flow"
    }

    fn register(&self, registry: &mut HookRegistry) {
        registry
            .extend::<ParseExpressionStatement>(|inner| {
                rule_fn::<ParseExpressionStatement, _>(move |p, args: ExpressionStatementArgs| {
                    if p.is_token(SyntaxKind::Identifier)
                        && !p.has_preceding_line_break()
                        && p.arena.identifier_name(args.expression) == Some("type")
                    {
                        return parse_type_alias(p, args.builder);
                    }
                    inner(p, args)
                })
            })
            .extend::<ParseVarHead>(|inner| {
                rule_fn::<ParseVarHead, _>(move |p, kind| {
                    let binding = inner(p, kind)?;
                    if !p.is_token(SyntaxKind::ColonToken) {
                        return Ok(binding);
                    }
                    let annotation = p.parse_type_annotation()?;
                    p.with_type_annotation(binding, annotation, false)
                })
            })
            .extend::<ParseFunctionParams>(|inner| {
                rule_fn::<ParseFunctionParams, _>(move |p, context| {
                    let type_parameters = if p.is_token(SyntaxKind::LessThanToken) {
                        Some(p.parse_type_parameters()?)
                    } else {
                        None
                    };
                    let params = inner(p, context)?;
                    Ok(FunctionParams {
                        type_parameters: type_parameters.or(params.type_parameters),
                        params: params.params,
                    })
                })
            })
            .extend::<ParseAssignableListItemTypes>(|inner| {
                rule_fn::<ParseAssignableListItemTypes, _>(move |p, node| {
                    let node = inner(p, node)?;
                    parse_binding_suffix(p, node)
                })
            })
            .extend::<ParseFunctionBody>(|inner| {
                rule_fn::<ParseFunctionBody, _>(move |p, args| {
                    let return_type = if p.is_token(SyntaxKind::ColonToken) {
                        Some(p.parse_type_annotation()?)
                    } else {
                        None
                    };
                    let body = inner(p, args)?;
                    Ok(FunctionBody {
                        body: body.body,
                        return_type: return_type.or(body.return_type),
                    })
                })
            })
            .extend::<ParseArrow>(|inner| {
                rule_fn::<ParseArrow, _>(move |p, args| {
                    if !p.is_token(SyntaxKind::ColonToken) {
                        return inner(p, args);
                    }
                    let return_type = p.parse_type_annotation()?;
                    Ok(inner(p, args)?.map(|_| ArrowHead {
                        return_type: Some(return_type),
                    }))
                })
            })
            .extend::<ParseClassSuper>(|inner| {
                rule_fn::<ParseClassSuper, _>(move |p, args| {
                    let type_parameters = if p.is_token(SyntaxKind::LessThanToken) {
                        Some(p.parse_type_parameters()?)
                    } else {
                        None
                    };
                    let heritage = inner(p, args)?;
                    let super_type_arguments =
                        if heritage.super_class.is_some() && p.is_token(SyntaxKind::LessThanToken) {
                            Some(p.parse_type_arguments()?)
                        } else {
                            heritage.super_type_arguments
                        };
                    Ok(ClassHeritage {
                        type_parameters: type_parameters.or(heritage.type_parameters),
                        super_type_arguments,
                        ..heritage
                    })
                })
            })
            .extend::<ParseClassProperty>(|inner| {
                rule_fn::<ParseClassProperty, _>(move |p, mut args: ClassPropertyArgs| {
                    if p.is_token(SyntaxKind::ColonToken) {
                        args.type_annotation = Some(p.parse_type_annotation()?);
                    }
                    inner(p, args)
                })
            });
    }
}

/// `type Name<T> = Type;`; the current token is the name.
fn parse_type_alias(p: &mut ParserState, builder: NodeBuilder) -> PResult<NodeIndex> {
    trace!(pos = p.token_pos(), "parse_flow_type_alias");
    let id = parse_type_name(p)?;
    let type_parameters = if p.is_token(SyntaxKind::LessThanToken) {
        Some(p.parse_type_parameters()?)
    } else {
        None
    };
    if !p.is_token(SyntaxKind::EqualsToken) {
        return Err(p.expected_error("="));
    }
    let right = p.parse_type_after_token()?;
    p.semicolon()?;
    p.finish_node(
        builder,
        NodeData::TypeAlias {
            id,
            type_parameters,
            right,
        },
    )
}
