//! Nominal type annotations (TypeScript).
//!
//! Every extension here wraps a core rule and either consumes extra syntax
//! around the inner call or tries an alternative speculatively before
//! delegating. Declarations introduced by contextual words (`interface`,
//! `type`, `enum`) arrive at the expression-statement rule as a bare
//! identifier followed by a name on the same line.

use crate::errors::PResult;
use crate::hooks::{
    ArrowHead, ClassHeritage, ClassModifiers, ClassPropertyArgs, ExprOpArgs,
    ExpressionStatementArgs, FunctionBody, FunctionParams, HookRegistry, NewArguments,
    ParamContext, ParseArrow, ParseAssignableListItemTypes, ParseClassModifiers,
    ParseClassProperty, ParseClassSuper, ParseExprAtom, ParseExprOp, ParseExpressionStatement,
    ParseFunctionBody, ParseFunctionParam, ParseFunctionParams, ParseMaybeUnary,
    ParseNewArguments, ParseStatement, ParseSubscript, ParseVarHead, ParserPlugin, Subscript,
    SubscriptArgs, rule_fn,
};
use crate::node::{Accessibility, NodeData, NodeIndex, NodeList};
use crate::node_arena::NodeBuilder;
use crate::options::Plugins;
use crate::state::ParserState;
use crate::state_expressions::RELATIONAL_PRECEDENCE;
use plait_common::diagnostics::diagnostic_codes;
use plait_scanner::{LexicalContext, SyntaxKind};
use tracing::trace;

/// Registers the TypeScript extensions.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeScriptPlugin;

impl ParserPlugin for TypeScriptPlugin {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn register(&self, registry: &mut HookRegistry) {
        registry
            .extend::<ParseStatement>(|inner| {
                rule_fn::<ParseStatement, _>(move |p, args| {
                    if p.is_token(SyntaxKind::ConstKeyword)
                        && p.peek_token().is_some_and(|next| {
                            next.kind == SyntaxKind::Identifier && next.value == "enum"
                        })
                    {
                        let builder = p.start_node();
                        p.next_token()?;
                        p.next_token()?;
                        return parse_enum(p, builder, true);
                    }
                    inner(p, args)
                })
            })
            .extend::<ParseExpressionStatement>(|inner| {
                rule_fn::<ParseExpressionStatement, _>(move |p, args: ExpressionStatementArgs| {
                    if p.is_token(SyntaxKind::Identifier) && !p.has_preceding_line_break() {
                        let word = p.arena.identifier_name(args.expression).map(str::to_owned);
                        match word.as_deref() {
                            Some("interface") => return parse_interface(p, args.builder),
                            Some("type") => return parse_type_alias(p, args.builder),
                            Some("enum") => return parse_enum(p, args.builder, false),
                            _ => {}
                        }
                    }
                    inner(p, args)
                })
            })
            .extend::<ParseExprAtom>(|inner| {
                rule_fn::<ParseExprAtom, _>(move |p, args| {
                    // `interface` is reserved in strict code, but still
                    // introduces a declaration when a name follows.
                    if p.is_contextual("interface")
                        && p.peek_token().is_some_and(|next| {
                            next.kind == SyntaxKind::Identifier && !next.has_preceding_line_break()
                        })
                    {
                        let builder = p.start_node();
                        p.next_token()?;
                        return p.finish_node(
                            builder,
                            NodeData::Identifier {
                                name: "interface".to_string(),
                                optional: false,
                                type_annotation: None,
                            },
                        );
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
            .extend::<ParseFunctionParam>(|inner| {
                rule_fn::<ParseFunctionParam, _>(move |p, context: ParamContext| {
                    let (pos, loc) = (p.token_pos(), p.token_loc_start());
                    let (accessibility, readonly) = parse_parameter_modifiers(p)?;
                    if accessibility.is_none() && !readonly {
                        return inner(p, context);
                    }
                    let builder = p.start_node_at(pos, loc);
                    if !context.is_constructor {
                        return Err(p.error_at(
                            pos,
                            diagnostic_codes::PARAMETER_PROPERTY_ONLY_IN_CONSTRUCTOR,
                            &[],
                        ));
                    }
                    let parameter = inner(p, context)?;
                    p.finish_node(
                        builder,
                        NodeData::TsParameterProperty {
                            accessibility,
                            readonly,
                            parameter,
                        },
                    )
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
            .extend::<ParseExprOp>(|inner| {
                rule_fn::<ParseExprOp, _>(move |p, args: ExprOpArgs| {
                    if p.is_contextual("as")
                        && !p.has_preceding_line_break()
                        && RELATIONAL_PRECEDENCE > args.min_precedence
                    {
                        let builder = p.start_node_at_node(args.left);
                        let type_annotation = p.parse_type_after_token()?;
                        let node = p.finish_node(
                            builder,
                            NodeData::TsAsExpression {
                                expression: args.left,
                                type_annotation,
                            },
                        )?;
                        return p.call::<ParseExprOp>(ExprOpArgs {
                            left: node,
                            min_precedence: args.min_precedence,
                        });
                    }
                    inner(p, args)
                })
            })
            .extend::<ParseMaybeUnary>(|inner| {
                rule_fn::<ParseMaybeUnary, _>(move |p, args| {
                    if !p.is_token(SyntaxKind::LessThanToken) || p.options.has_plugin(Plugins::JSX) {
                        return inner(p, args);
                    }
                    trace!(pos = p.token_pos(), "generic arrow or type assertion");
                    if let Some(arrow) = p.try_parse_paren_arrow(false)? {
                        return Ok(arrow);
                    }
                    parse_type_assertion(p)
                })
            })
            .extend::<ParseSubscript>(|inner| {
                rule_fn::<ParseSubscript, _>(move |p, args: SubscriptArgs| {
                    if p.is_token(SyntaxKind::ExclamationToken) && !p.has_preceding_line_break() {
                        let builder = p.start_node_at_node(args.base);
                        p.next_token()?;
                        let node = p.finish_node(
                            builder,
                            NodeData::TsNonNullExpression {
                                expression: args.base,
                            },
                        )?;
                        return Ok(Subscript::Continue(node));
                    }
                    if p.is_token(SyntaxKind::LessThanToken)
                        && !args.no_calls
                        && let Some(type_arguments) = p.try_parse(parse_call_type_arguments)?
                    {
                        let node = parse_generic_call(p, args.base, type_arguments)?;
                        return Ok(Subscript::Continue(node));
                    }
                    inner(p, args)
                })
            })
            .extend::<ParseNewArguments>(|inner| {
                rule_fn::<ParseNewArguments, _>(move |p, args| {
                    let type_arguments = if p.is_token(SyntaxKind::LessThanToken) {
                        p.try_parse(ParserState::parse_type_arguments)?
                    } else {
                        None
                    };
                    let arguments = inner(p, args)?;
                    Ok(NewArguments {
                        type_arguments: type_arguments.or(arguments.type_arguments),
                        arguments: arguments.arguments,
                    })
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
                    let mut implements = heritage.implements;
                    if p.eat_contextual("implements")? {
                        implements = parse_heritage_list(p)?;
                    }
                    Ok(ClassHeritage {
                        type_parameters: type_parameters.or(heritage.type_parameters),
                        super_class: heritage.super_class,
                        super_type_arguments,
                        implements,
                    })
                })
            })
            .extend::<ParseClassModifiers>(|inner| {
                rule_fn::<ParseClassModifiers, _>(move |p, modifiers: ClassModifiers| {
                    if modifiers.accessibility.is_none()
                        && let Some(accessibility) = Accessibility::from_text(p.token_value())
                        && p.is_token(SyntaxKind::Identifier)
                        && p.is_member_modifier()
                    {
                        p.next_token()?;
                        return Ok(ClassModifiers {
                            accessibility: Some(accessibility),
                            ..modifiers
                        });
                    }
                    if !modifiers.readonly && p.is_contextual("readonly") && p.is_member_modifier() {
                        p.next_token()?;
                        return Ok(ClassModifiers {
                            readonly: true,
                            ..modifiers
                        });
                    }
                    inner(p, modifiers)
                })
            })
            .extend::<ParseClassProperty>(|inner| {
                rule_fn::<ParseClassProperty, _>(move |p, mut args: ClassPropertyArgs| {
                    if p.parse_optional(SyntaxKind::QuestionToken)? {
                        args.optional = true;
                    } else {
                        // Definite assignment marker; recorded only syntactically.
                        p.parse_optional(SyntaxKind::ExclamationToken)?;
                    }
                    if p.is_token(SyntaxKind::ColonToken) {
                        args.type_annotation = Some(p.parse_type_annotation()?);
                    }
                    inner(p, args)
                })
            });
    }
}

/// `?` and `: Type` after a binding.
pub(crate) fn parse_binding_suffix(p: &mut ParserState, node: NodeIndex) -> PResult<NodeIndex> {
    let optional = p.parse_optional(SyntaxKind::QuestionToken)?;
    if p.is_token(SyntaxKind::ColonToken) {
        let annotation = p.parse_type_annotation()?;
        return p.with_type_annotation(node, annotation, optional);
    }
    if optional {
        return p.with_optional_marker(node);
    }
    Ok(node)
}

/// Accessibility and `readonly` in front of a constructor parameter.
fn parse_parameter_modifiers(p: &mut ParserState) -> PResult<(Option<Accessibility>, bool)> {
    let mut accessibility = None;
    let mut readonly = false;
    loop {
        if !p.is_token(SyntaxKind::Identifier)
            || !matches!(
                p.look_ahead_token(),
                SyntaxKind::Identifier | SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
            )
        {
            break;
        }
        if accessibility.is_none()
            && let Some(found) = Accessibility::from_text(p.token_value())
        {
            accessibility = Some(found);
        } else if !readonly && p.is_contextual("readonly") {
            readonly = true;
        } else {
            break;
        }
        p.next_token()?;
    }
    Ok((accessibility, readonly))
}

/// Type arguments that can only belong to a call or tagged template.
/// Stops before the arguments so they are parsed after committing.
fn parse_call_type_arguments(p: &mut ParserState) -> PResult<NodeIndex> {
    let type_arguments = p.parse_type_arguments()?;
    match p.token() {
        SyntaxKind::OpenParenToken
        | SyntaxKind::NoSubstitutionTemplateLiteral
        | SyntaxKind::TemplateHead => Ok(type_arguments),
        _ => Err(p.expected_error("(")),
    }
}

/// `f<T>(args)` or ``f<T>`tpl` `` once the type arguments are parsed.
fn parse_generic_call(
    p: &mut ParserState,
    callee: NodeIndex,
    type_arguments: NodeIndex,
) -> PResult<NodeIndex> {
    match p.token() {
        SyntaxKind::OpenParenToken => {
            let builder = p.start_node_at_node(callee);
            let arguments = p.parse_arguments()?;
            p.finish_node(
                builder,
                NodeData::CallExpression {
                    callee,
                    type_arguments: Some(type_arguments),
                    arguments,
                    optional: false,
                },
            )
        }
        SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
            p.parse_tagged_template(callee, Some(type_arguments))
        }
        _ => Err(p.expected_error("(")),
    }
}

/// `<Type>expr`.
fn parse_type_assertion(p: &mut ParserState) -> PResult<NodeIndex> {
    let builder = p.start_node();
    p.push_context(LexicalContext::TypePosition);
    p.next_token()?;
    let type_annotation = p.parse_type()?;
    p.pop_context(LexicalContext::TypePosition)?;
    p.expect_greater_than()?;
    let expression = p.call::<ParseMaybeUnary>(())?;
    p.finish_node(
        builder,
        NodeData::TsTypeAssertion {
            type_annotation,
            expression,
        },
    )
}

/// `A<T>, B.C` of `implements` and interface `extends`.
fn parse_heritage_list(p: &mut ParserState) -> PResult<NodeList> {
    let mut list = NodeList::new();
    loop {
        let builder = p.start_node();
        let expression = p.parse_entity_name()?;
        let type_arguments = if p.is_token(SyntaxKind::LessThanToken) {
            Some(p.parse_type_arguments()?)
        } else {
            None
        };
        list.push(p.finish_node(
            builder,
            NodeData::TsExpressionWithTypeArguments {
                expression,
                type_arguments,
            },
        )?);
        if !p.parse_optional(SyntaxKind::CommaToken)? {
            return Ok(list);
        }
    }
}

/// Declared type name; the current token is the name.
pub(crate) fn parse_type_name(p: &mut ParserState) -> PResult<NodeIndex> {
    if !p.is_token(SyntaxKind::Identifier) {
        return Err(p.error(diagnostic_codes::IDENTIFIER_EXPECTED, &[]));
    }
    let name = p.token_value().to_string();
    p.check_type_identifier(&name, p.token_pos())?;
    p.parse_identifier_name()
}

fn parse_interface(p: &mut ParserState, builder: NodeBuilder) -> PResult<NodeIndex> {
    trace!(pos = p.token_pos(), "parse_interface");
    let id = parse_type_name(p)?;
    let type_parameters = if p.is_token(SyntaxKind::LessThanToken) {
        Some(p.parse_type_parameters()?)
    } else {
        None
    };
    let extends = if p.parse_optional(SyntaxKind::ExtendsKeyword)? {
        parse_heritage_list(p)?
    } else {
        NodeList::new()
    };
    let body_builder = p.start_node();
    let members = p.parse_type_members(LexicalContext::BraceStatement)?;
    let body = p.finish_node(body_builder, NodeData::TsInterfaceBody { body: members })?;
    p.finish_node(
        builder,
        NodeData::TsInterfaceDeclaration {
            id,
            type_parameters,
            extends,
            body,
        },
    )
}

fn parse_type_alias(p: &mut ParserState, builder: NodeBuilder) -> PResult<NodeIndex> {
    trace!(pos = p.token_pos(), "parse_type_alias");
    let id = parse_type_name(p)?;
    let type_parameters = if p.is_token(SyntaxKind::LessThanToken) {
        Some(p.parse_type_parameters()?)
    } else {
        None
    };
    if !p.is_token(SyntaxKind::EqualsToken) {
        return Err(p.expected_error("="));
    }
    let type_annotation = p.parse_type_after_token()?;
    p.semicolon()?;
    p.finish_node(
        builder,
        NodeData::TsTypeAliasDeclaration {
            id,
            type_parameters,
            type_annotation,
        },
    )
}

/// Enum body and members; the current token is the enum name.
fn parse_enum(p: &mut ParserState, builder: NodeBuilder, is_const: bool) -> PResult<NodeIndex> {
    trace!(pos = p.token_pos(), is_const, "parse_enum");
    let id = p.parse_binding_identifier()?;
    p.open_brace(LexicalContext::BraceStatement)?;
    let mut members = NodeList::new();
    while !p.is_token(SyntaxKind::CloseBraceToken) {
        let member = p.start_node();
        let member_id = if p.is_token(SyntaxKind::StringLiteral) {
            p.parse_literal()?
        } else {
            p.parse_identifier_name()?
        };
        let initializer = if p.parse_optional(SyntaxKind::EqualsToken)? {
            Some(p.parse_assignment()?)
        } else {
            None
        };
        members.push(p.finish_node(
            member,
            NodeData::TsEnumMember {
                id: member_id,
                initializer,
            },
        )?);
        if !p.is_token(SyntaxKind::CloseBraceToken) {
            p.parse_expected(SyntaxKind::CommaToken)?;
        }
    }
    p.close_brace(LexicalContext::BraceStatement)?;
    p.finish_node(
        builder,
        NodeData::TsEnumDeclaration {
            id,
            members,
            is_const,
        },
    )
}
