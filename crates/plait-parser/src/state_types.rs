//! Parser state - type annotation grammar.
//!
//! Shared by the TypeScript and Flow plugins. Every type is parsed with
//! `LexicalContext::TypePosition` on top of the context stack, which makes
//! the scanner read most reserved words (`void`, `null`, `true`) as plain
//! identifiers. Entering a type always pushes the context before the first
//! type token is scanned; leaving it pops the context, which re-scans the
//! current token in the enclosing mode.

use crate::errors::PResult;
use crate::hooks::{ParamContext, ParseFunctionParams};
use crate::node::{
    NodeData, NodeIndex, NodeList, SignatureData, TsKeyword, TypeOperator, UnaryOperator,
};
use crate::node_arena::NodeBuilder;
use crate::options::Plugins;
use crate::state::ParserState;
use plait_common::diagnostics::diagnostic_codes;
use plait_scanner::{LexicalContext, SyntaxKind};
use tracing::trace;

/// Names a declared type may not use.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "any", "bigint", "boolean", "never", "number", "object", "string", "symbol", "undefined",
    "unknown", "void", "null",
];

/// Whether `kind` can begin a type.
fn starts_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::MinusToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenParenToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::QuestionToken
    )
}

impl ParserState {
    // =========================================================================
    // Entering and leaving type position
    // =========================================================================

    /// `: Type`. The current token is the colon.
    pub(crate) fn parse_type_annotation(&mut self) -> PResult<NodeIndex> {
        if !self.is_token(SyntaxKind::ColonToken) {
            return Err(self.expected_error(":"));
        }
        self.parse_type_after_token()
    }

    /// Consume the current token (`:`, `=`, `as`, `=>`) and parse the type
    /// that follows it.
    pub(crate) fn parse_type_after_token(&mut self) -> PResult<NodeIndex> {
        self.push_context(LexicalContext::TypePosition);
        self.next_token()?;
        let ty = self.parse_type()?;
        self.pop_context(LexicalContext::TypePosition)?;
        Ok(ty)
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Any type, including function and constructor types.
    pub(crate) fn parse_type(&mut self) -> PResult<NodeIndex> {
        self.with_recursion_guard(|p| {
            match p.token() {
                SyntaxKind::LessThanToken => return p.parse_function_type(false),
                SyntaxKind::NewKeyword => return p.parse_function_type(true),
                SyntaxKind::OpenParenToken => {
                    if let Some(function) = p.try_parse(|p| p.parse_function_type(false))? {
                        return Ok(function);
                    }
                }
                _ => {}
            }
            p.parse_union_type()
        })
    }

    /// `<T>(params) => Ret` or `new (params) => Ret`.
    fn parse_function_type(&mut self, constructor: bool) -> PResult<NodeIndex> {
        trace!(pos = self.token_pos(), constructor, "parse_function_type");
        let builder = self.start_node();
        if constructor {
            self.parse_expected(SyntaxKind::NewKeyword)?;
        }
        let params = self.call::<ParseFunctionParams>(ParamContext::default())?;
        if !self.is_token(SyntaxKind::EqualsGreaterThanToken) {
            return Err(self.expected_error("=>"));
        }
        self.next_token()?;
        let return_type = self.parse_type()?;
        let signature = SignatureData {
            type_parameters: params.type_parameters,
            parameters: params.params,
            return_type: Some(return_type),
        };
        let data = if constructor {
            NodeData::TsConstructorType(signature)
        } else {
            NodeData::TsFunctionType(signature)
        };
        self.finish_node(builder, data)
    }

    fn parse_union_type(&mut self) -> PResult<NodeIndex> {
        let (pos, loc) = (self.token_pos(), self.token_loc_start());
        let leading = self.parse_optional(SyntaxKind::BarToken)?;
        let first = self.parse_intersection_type()?;
        if !self.is_token(SyntaxKind::BarToken) && !leading {
            return Ok(first);
        }
        let builder = self.start_node_at(pos, loc);
        let mut types = NodeList::new();
        types.push(first);
        while self.parse_optional(SyntaxKind::BarToken)? {
            types.push(self.parse_intersection_type()?);
        }
        self.finish_node(builder, NodeData::TsUnionType { types })
    }

    fn parse_intersection_type(&mut self) -> PResult<NodeIndex> {
        let (pos, loc) = (self.token_pos(), self.token_loc_start());
        let leading = self.parse_optional(SyntaxKind::AmpersandToken)?;
        let first = self.parse_type_operator()?;
        if !self.is_token(SyntaxKind::AmpersandToken) && !leading {
            return Ok(first);
        }
        let builder = self.start_node_at(pos, loc);
        let mut types = NodeList::new();
        types.push(first);
        while self.parse_optional(SyntaxKind::AmpersandToken)? {
            types.push(self.parse_type_operator()?);
        }
        self.finish_node(builder, NodeData::TsIntersectionType { types })
    }

    fn parse_type_operator(&mut self) -> PResult<NodeIndex> {
        let operator = if self.is_contextual("keyof") {
            Some(TypeOperator::KeyOf)
        } else if self.is_contextual("readonly") {
            Some(TypeOperator::Readonly)
        } else {
            None
        };
        if let Some(operator) = operator
            && starts_type(self.look_ahead_token())
        {
            let builder = self.start_node();
            self.next_token()?;
            let type_annotation = self.parse_type_operator()?;
            return self.finish_node(
                builder,
                NodeData::TsTypeOperator {
                    operator,
                    type_annotation,
                },
            );
        }
        if self.is_token(SyntaxKind::QuestionToken) && self.options.has_plugin(Plugins::FLOW) {
            let builder = self.start_node();
            self.next_token()?;
            let type_annotation = self.parse_type_operator()?;
            return self.finish_node(builder, NodeData::NullableTypeAnnotation { type_annotation });
        }
        self.parse_postfix_type()
    }

    /// `T[]` and `T[K]`, left to right.
    fn parse_postfix_type(&mut self) -> PResult<NodeIndex> {
        let mut ty = self.parse_primary_type()?;
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            let builder = self.start_node_at_node(ty);
            self.next_token()?;
            if self.parse_optional(SyntaxKind::CloseBracketToken)? {
                ty = self.finish_node(builder, NodeData::TsArrayType { element_type: ty })?;
                continue;
            }
            let index_type = self.parse_type()?;
            self.parse_expected(SyntaxKind::CloseBracketToken)?;
            ty = self.finish_node(
                builder,
                NodeData::TsIndexedAccessType {
                    object_type: ty,
                    index_type,
                },
            )?;
        }
        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> PResult<NodeIndex> {
        match self.token() {
            SyntaxKind::Identifier => {
                let word = self.token_value().to_string();
                if let Some(keyword) = TsKeyword::from_text(&word)
                    && self.look_ahead_token() != SyntaxKind::DotToken
                {
                    let builder = self.start_node();
                    self.next_token()?;
                    return self.finish_node(builder, NodeData::TsKeywordType { keyword });
                }
                if matches!(word.as_str(), "true" | "false") {
                    let value = word == "true";
                    let builder = self.start_node();
                    let literal_builder = self.start_node();
                    self.next_token()?;
                    let literal =
                        self.finish_node(literal_builder, NodeData::BooleanLiteral { value })?;
                    return self.finish_node(builder, NodeData::TsLiteralType { literal });
                }
                self.parse_type_reference()
            }
            SyntaxKind::ThisKeyword => {
                let builder = self.start_node();
                self.next_token()?;
                self.finish_node(builder, NodeData::TsThisType)
            }
            SyntaxKind::TypeOfKeyword => {
                let builder = self.start_node();
                self.next_token()?;
                let expr_name = self.parse_entity_name()?;
                self.finish_node(builder, NodeData::TsTypeQuery { expr_name })
            }
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                let builder = self.start_node();
                let literal = self.parse_literal()?;
                self.finish_node(builder, NodeData::TsLiteralType { literal })
            }
            SyntaxKind::MinusToken => {
                let builder = self.start_node();
                let negation = self.start_node();
                self.next_token()?;
                if !matches!(
                    self.token(),
                    SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral
                ) {
                    return Err(self.error(diagnostic_codes::TYPE_EXPECTED, &[]));
                }
                let argument = self.parse_literal()?;
                let literal = self.finish_node(
                    negation,
                    NodeData::UnaryExpression {
                        operator: UnaryOperator::Minus,
                        argument,
                    },
                )?;
                self.finish_node(builder, NodeData::TsLiteralType { literal })
            }
            SyntaxKind::OpenBraceToken => {
                let builder = self.start_node();
                let members = self.parse_type_members(LexicalContext::BraceExpression)?;
                self.finish_node(builder, NodeData::TsTypeLiteral { members })
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                let builder = self.start_node();
                self.next_token()?;
                let type_annotation = self.parse_type()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                self.finish_node(builder, NodeData::TsParenthesizedType { type_annotation })
            }
            _ => Err(self.error(diagnostic_codes::TYPE_EXPECTED, &[])),
        }
    }

    /// `A.B.C<Args>`.
    fn parse_type_reference(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        let type_name = self.parse_entity_name()?;
        let type_arguments =
            if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
                Some(self.parse_type_arguments()?)
            } else {
                None
            };
        self.finish_node(
            builder,
            NodeData::TsTypeReference {
                type_name,
                type_arguments,
            },
        )
    }

    /// Dotted name in type position.
    pub(crate) fn parse_entity_name(&mut self) -> PResult<NodeIndex> {
        let mut name = self.parse_identifier_name()?;
        while self.is_token(SyntaxKind::DotToken) {
            let builder = self.start_node_at_node(name);
            self.next_token()?;
            let right = self.parse_identifier_name()?;
            name = self.finish_node(builder, NodeData::TsQualifiedName { left: name, right })?;
        }
        Ok(name)
    }

    fn parse_tuple_type(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut element_types = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let rest = self.start_node();
                self.next_token()?;
                let type_annotation = self.parse_type()?;
                element_types.push(self.finish_node(rest, NodeData::TsRestType { type_annotation })?);
            } else {
                element_types.push(self.parse_type()?);
            }
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        self.finish_node(builder, NodeData::TsTupleType { element_types })
    }

    // =========================================================================
    // Type arguments and parameters
    // =========================================================================

    /// `<T, U>` after a type name or callee. The closing `>` is split off
    /// shift and comparison tokens.
    pub(crate) fn parse_type_arguments(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        if !self.is_token(SyntaxKind::LessThanToken) {
            return Err(self.expected_error("<"));
        }
        self.push_context(LexicalContext::TypePosition);
        self.next_token()?;
        let mut params = NodeList::new();
        if self.token().starts_with_greater_than() {
            return Err(self.error(diagnostic_codes::LIST_CANNOT_BE_EMPTY, &["Type argument"]));
        }
        loop {
            params.push(self.parse_type()?);
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.pop_context(LexicalContext::TypePosition)?;
        self.expect_greater_than()?;
        self.finish_node(builder, NodeData::TsTypeParameterInstantiation { params })
    }

    /// `<T extends C = D, ...>` of a declaration.
    pub(crate) fn parse_type_parameters(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        if !self.is_token(SyntaxKind::LessThanToken) {
            return Err(self.expected_error("<"));
        }
        self.push_context(LexicalContext::TypePosition);
        self.next_token()?;
        let mut params = NodeList::new();
        if self.token().starts_with_greater_than() {
            return Err(self.error(diagnostic_codes::LIST_CANNOT_BE_EMPTY, &["Type parameter"]));
        }
        loop {
            params.push(self.parse_type_parameter()?);
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.pop_context(LexicalContext::TypePosition)?;
        self.expect_greater_than()?;
        self.finish_node(builder, NodeData::TsTypeParameterDeclaration { params })
    }

    fn parse_type_parameter(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        if !self.is_token(SyntaxKind::Identifier) {
            return Err(self.error(diagnostic_codes::TYPE_EXPECTED, &[]));
        }
        let name = self.token_value().to_string();
        self.check_type_identifier(&name, self.token_pos())?;
        self.next_token()?;
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword)? {
            Some(self.parse_type()?)
        } else {
            None
        };
        let default = if self.parse_optional(SyntaxKind::EqualsToken)? {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.finish_node(
            builder,
            NodeData::TsTypeParameter {
                name,
                constraint,
                default,
            },
        )
    }

    pub(crate) fn check_type_identifier(&self, name: &str, pos: u32) -> PResult<()> {
        if RESERVED_TYPE_NAMES.contains(&name) {
            return Err(self.error_at(pos, diagnostic_codes::INVALID_TYPE_IDENTIFIER, &[name]));
        }
        Ok(())
    }

    // =========================================================================
    // Object type members
    // =========================================================================

    /// `{ member; member }` of a type literal or interface body.
    pub(crate) fn parse_type_members(&mut self, context: LexicalContext) -> PResult<NodeList> {
        self.open_brace(context)?;
        let mut members = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            members.push(self.parse_type_member()?);
            if !self.parse_optional(SyntaxKind::SemicolonToken)?
                && !self.parse_optional(SyntaxKind::CommaToken)?
                && !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.has_preceding_line_break()
            {
                return Err(self.expected_error(";"));
            }
        }
        self.close_brace(context)?;
        Ok(members)
    }

    fn parse_type_member(&mut self) -> PResult<NodeIndex> {
        trace!(pos = self.token_pos(), "parse_type_member");
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let builder = self.start_node();
            let signature = self.parse_signature_member()?;
            return self.finish_node(builder, NodeData::TsCallSignatureDeclaration(signature));
        }
        if self.is_token(SyntaxKind::NewKeyword)
            && matches!(
                self.look_ahead_token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            let builder = self.start_node();
            self.next_token()?;
            let signature = self.parse_signature_member()?;
            return self.finish_node(builder, NodeData::TsConstructSignatureDeclaration(signature));
        }

        let (pos, loc) = (self.token_pos(), self.token_loc_start());
        let readonly = self.is_contextual("readonly") && self.is_member_modifier();
        if readonly {
            self.next_token()?;
        }
        if self.is_token(SyntaxKind::OpenBracketToken) {
            let attempt = self.try_parse(|p| {
                let builder = p.start_node_at(pos, loc);
                p.parse_property_or_method_signature(builder, readonly)
            })?;
            if let Some(member) = attempt {
                return Ok(member);
            }
            let builder = self.start_node_at(pos, loc);
            return self.parse_index_signature(builder, readonly);
        }
        let builder = self.start_node_at(pos, loc);
        self.parse_property_or_method_signature(builder, readonly)
    }

    /// `(params): Ret` of a call, construct or method signature.
    fn parse_signature_member(&mut self) -> PResult<SignatureData> {
        let params = self.call::<ParseFunctionParams>(ParamContext::default())?;
        let return_type = if self.is_token(SyntaxKind::ColonToken) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };
        Ok(SignatureData {
            type_parameters: params.type_parameters,
            parameters: params.params,
            return_type,
        })
    }

    fn parse_property_or_method_signature(
        &mut self,
        builder: NodeBuilder,
        readonly: bool,
    ) -> PResult<NodeIndex> {
        let (key, computed) = self.parse_property_name()?;
        let optional = self.parse_optional(SyntaxKind::QuestionToken)?;
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let signature = self.parse_signature_member()?;
            return self.finish_node(
                builder,
                NodeData::TsMethodSignature {
                    key,
                    computed,
                    optional,
                    type_parameters: signature.type_parameters,
                    parameters: signature.parameters,
                    return_type: signature.return_type,
                },
            );
        }
        let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };
        self.finish_node(
            builder,
            NodeData::TsPropertySignature {
                key,
                computed,
                optional,
                readonly,
                type_annotation,
            },
        )
    }

    /// `[key: string]: T`.
    fn parse_index_signature(
        &mut self,
        builder: NodeBuilder,
        readonly: bool,
    ) -> PResult<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let parameter = self.parse_identifier_name()?;
        let annotation = self.parse_type_annotation()?;
        if !matches!(
            self.arena.data(annotation),
            Some(NodeData::TsKeywordType {
                keyword: TsKeyword::String | TsKeyword::Number
            })
        ) {
            let pos = self.arena.get(annotation).map_or(0, |node| node.pos);
            return Err(self.error_at(
                pos,
                diagnostic_codes::INDEX_SIGNATURE_PARAMETER_TYPE,
                &[],
            ));
        }
        let parameter = self.with_type_annotation(parameter, annotation, false)?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };
        self.finish_node(
            builder,
            NodeData::TsIndexSignature {
                parameters: NodeList::from(vec![parameter]),
                type_annotation,
                readonly,
            },
        )
    }
}
