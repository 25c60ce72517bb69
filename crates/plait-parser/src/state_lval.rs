//! Parser state - binding patterns, parameters and assignment targets.

use crate::errors::PResult;
use crate::hooks::{
    FunctionParams, ParamContext, ParseAssignableListItemTypes, ParseFunctionParam,
};
use crate::node::{NodeData, NodeIndex, NodeList, PropertyKind};
use crate::state::ParserState;
use plait_common::diagnostics::diagnostic_codes;
use plait_scanner::{LexicalContext, SyntaxKind};
use tracing::trace;

impl ParserState {
    // =========================================================================
    // Binding targets
    // =========================================================================

    /// Identifier introducing a binding.
    pub(crate) fn parse_binding_identifier(&mut self) -> PResult<NodeIndex> {
        if !self.is_token(SyntaxKind::Identifier) {
            if self.token().is_keyword() {
                let word = self.token_value().to_string();
                return Err(self.error(
                    diagnostic_codes::RESERVED_WORD_CANNOT_BE_USED_HERE,
                    &[&word],
                ));
            }
            return Err(self.error(diagnostic_codes::IDENTIFIER_EXPECTED, &[]));
        }
        let name = self.token_value().to_string();
        self.check_binding_name(&name, self.token_pos())?;
        let builder = self.start_node();
        self.next_token()?;
        self.finish_node(
            builder,
            NodeData::Identifier {
                name,
                optional: false,
                type_annotation: None,
            },
        )
    }

    /// Identifier, array pattern or object pattern.
    pub(crate) fn parse_binding_target(&mut self) -> PResult<NodeIndex> {
        trace!(pos = self.token_pos(), "parse_binding_target");
        match self.token() {
            SyntaxKind::OpenBracketToken => self.with_recursion_guard(|p| p.parse_array_pattern()),
            SyntaxKind::OpenBraceToken => self.with_recursion_guard(|p| p.parse_object_pattern()),
            _ => self.parse_binding_identifier(),
        }
    }

    /// Binding target with an optional `= default`.
    fn parse_binding_element(&mut self) -> PResult<NodeIndex> {
        let target = self.parse_binding_target()?;
        self.parse_binding_default(target)
    }

    fn parse_binding_default(&mut self, target: NodeIndex) -> PResult<NodeIndex> {
        if !self.is_token(SyntaxKind::EqualsToken) {
            return Ok(target);
        }
        let builder = self.start_node_at_node(target);
        self.next_token()?;
        let right = self.parse_assignment()?;
        self.finish_node(builder, NodeData::AssignmentPattern { left: target, right })
    }

    fn parse_rest_binding(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.parse_expected(SyntaxKind::DotDotDotToken)?;
        let argument = self.parse_binding_target()?;
        self.finish_node(
            builder,
            NodeData::RestElement {
                argument,
                type_annotation: None,
            },
        )
    }

    fn parse_array_pattern(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.parse_optional(SyntaxKind::CommaToken)? {
                elements.push(None);
                continue;
            }
            if self.is_token(SyntaxKind::DotDotDotToken) {
                elements.push(Some(self.parse_rest_binding()?));
                if !self.is_token(SyntaxKind::CloseBracketToken) {
                    return Err(self.error(diagnostic_codes::REST_PARAMETER_MUST_BE_LAST, &[]));
                }
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        self.finish_node(
            builder,
            NodeData::ArrayPattern {
                elements,
                type_annotation: None,
            },
        )
    }

    fn parse_object_pattern(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.open_brace(LexicalContext::BraceExpression)?;
        let mut properties = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let rest = self.start_node();
                self.next_token()?;
                let argument = self.parse_binding_identifier()?;
                properties.push(self.finish_node(
                    rest,
                    NodeData::RestElement {
                        argument,
                        type_annotation: None,
                    },
                )?);
                if !self.is_token(SyntaxKind::CloseBraceToken) {
                    return Err(self.error(diagnostic_codes::REST_PARAMETER_MUST_BE_LAST, &[]));
                }
                break;
            }
            properties.push(self.parse_binding_property()?);
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.close_brace(LexicalContext::BraceExpression)?;
        self.finish_node(
            builder,
            NodeData::ObjectPattern {
                properties,
                type_annotation: None,
            },
        )
    }

    /// `key: target`, `key: target = default`, `name` or `name = default`.
    fn parse_binding_property(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        let is_plain_name = self.is_token(SyntaxKind::Identifier);
        let (key, computed) = self.parse_property_name()?;
        let (value, shorthand) = if self.parse_optional(SyntaxKind::ColonToken)? {
            (self.parse_binding_element()?, false)
        } else if is_plain_name && !computed {
            let name = self.arena.identifier_name(key).unwrap_or_default().to_string();
            let pos = self.arena.get(key).map_or(0, |node| node.pos);
            self.check_binding_name(&name, pos)?;
            (self.parse_binding_default(key)?, true)
        } else {
            return Err(self.expected_error(":"));
        };
        self.finish_node(
            builder,
            NodeData::Property {
                key,
                value,
                kind: PropertyKind::Init,
                computed,
                shorthand,
                method: false,
            },
        )
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// `( param, ... )`.
    pub(crate) fn parse_function_params_base(
        &mut self,
        context: ParamContext,
    ) -> PResult<FunctionParams> {
        trace!(pos = self.token_pos(), "parse_function_params");
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut params = NodeList::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            let is_rest = self.is_token(SyntaxKind::DotDotDotToken);
            params.push(self.call::<ParseFunctionParam>(context)?);
            if is_rest {
                if !self.is_token(SyntaxKind::CloseParenToken) {
                    return Err(self.error(diagnostic_codes::REST_PARAMETER_MUST_BE_LAST, &[]));
                }
                break;
            }
            if !self.is_token(SyntaxKind::CloseParenToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(FunctionParams {
            type_parameters: None,
            params,
        })
    }

    pub(crate) fn parse_function_param_base(&mut self, _context: ParamContext) -> PResult<NodeIndex> {
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let rest = self.parse_rest_binding()?;
            return self.call::<ParseAssignableListItemTypes>(rest);
        }
        if !matches!(
            self.token(),
            SyntaxKind::Identifier | SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
        ) {
            return Err(self.error(diagnostic_codes::PARAMETER_DECLARATION_EXPECTED, &[]));
        }
        let target = self.parse_binding_target()?;
        let target = self.call::<ParseAssignableListItemTypes>(target)?;
        self.parse_binding_default(target)
    }

    pub(crate) fn parse_assignable_list_item_types_base(
        &mut self,
        node: NodeIndex,
    ) -> PResult<NodeIndex> {
        Ok(node)
    }

    // =========================================================================
    // Expression to pattern conversion
    // =========================================================================

    /// Reinterpret an expression parsed ahead of `=` (or a for-in/of head)
    /// as an assignment target.
    pub(crate) fn to_assignable(&mut self, node: NodeIndex) -> PResult<NodeIndex> {
        let Some(existing) = self.arena.get(node) else {
            return Ok(node);
        };
        let pos = existing.pos;
        match existing.data.clone() {
            NodeData::Identifier { name, .. } => {
                self.check_binding_name(&name, pos)?;
                Ok(node)
            }
            NodeData::MemberExpression { .. }
            | NodeData::ObjectPattern { .. }
            | NodeData::ArrayPattern { .. }
            | NodeData::AssignmentPattern { .. }
            | NodeData::RestElement { .. }
            | NodeData::TsAsExpression { .. }
            | NodeData::TsNonNullExpression { .. }
            | NodeData::TsTypeAssertion { .. } => Ok(node),
            NodeData::ParenthesizedExpression { expression } => {
                if self.is_simple_assign_target(expression) {
                    Ok(node)
                } else {
                    Err(self.error_at(pos, diagnostic_codes::INVALID_ASSIGNMENT_TARGET, &[]))
                }
            }
            NodeData::ObjectExpression { properties } => {
                let mut converted = NodeList::new();
                let count = properties.len();
                for (i, property) in properties.iter().enumerate() {
                    converted.push(self.to_assignable_property(property, i + 1 == count)?);
                }
                self.rebuild_node(
                    node,
                    NodeData::ObjectPattern {
                        properties: converted,
                        type_annotation: None,
                    },
                )
            }
            NodeData::ArrayExpression { elements } => {
                let count = elements.len();
                let mut converted = Vec::with_capacity(count);
                for (i, element) in elements.into_iter().enumerate() {
                    let element = match element {
                        Some(element) => Some(self.to_assignable_element(element, i + 1 == count)?),
                        None => None,
                    };
                    converted.push(element);
                }
                self.rebuild_node(
                    node,
                    NodeData::ArrayPattern {
                        elements: converted,
                        type_annotation: None,
                    },
                )
            }
            NodeData::AssignmentExpression {
                operator: crate::node::AssignmentOperator::Assign,
                left,
                right,
            } => self.rebuild_node(node, NodeData::AssignmentPattern { left, right }),
            _ => Err(self.error_at(pos, diagnostic_codes::INVALID_ASSIGNMENT_TARGET, &[])),
        }
    }

    fn to_assignable_element(&mut self, element: NodeIndex, is_last: bool) -> PResult<NodeIndex> {
        match self.arena.data(element).cloned() {
            Some(NodeData::SpreadElement { argument }) => {
                if !is_last {
                    let pos = self.arena.get(element).map_or(0, |node| node.pos);
                    return Err(self.error_at(pos, diagnostic_codes::REST_PARAMETER_MUST_BE_LAST, &[]));
                }
                let argument = self.to_assignable(argument)?;
                self.rebuild_node(
                    element,
                    NodeData::RestElement {
                        argument,
                        type_annotation: None,
                    },
                )
            }
            _ => self.to_assignable(element),
        }
    }

    fn to_assignable_property(&mut self, property: NodeIndex, is_last: bool) -> PResult<NodeIndex> {
        let pos = self.arena.get(property).map_or(0, |node| node.pos);
        match self.arena.data(property).cloned() {
            Some(NodeData::Property {
                key,
                value,
                kind: PropertyKind::Init,
                computed,
                shorthand,
                method: false,
            }) => {
                let value = self.to_assignable(value)?;
                self.rebuild_node(
                    property,
                    NodeData::Property {
                        key,
                        value,
                        kind: PropertyKind::Init,
                        computed,
                        shorthand,
                        method: false,
                    },
                )
            }
            Some(NodeData::SpreadElement { .. }) => self.to_assignable_element(property, is_last),
            _ => Err(self.error_at(pos, diagnostic_codes::INVALID_ASSIGNMENT_TARGET, &[])),
        }
    }

    /// Target of a compound assignment or update: a reference, possibly
    /// parenthesized or wrapped in a type assertion.
    pub(crate) fn is_simple_assign_target(&self, node: NodeIndex) -> bool {
        match self.arena.data(node) {
            Some(NodeData::Identifier { .. } | NodeData::MemberExpression { .. }) => true,
            Some(
                NodeData::ParenthesizedExpression { expression }
                | NodeData::TsAsExpression { expression, .. }
                | NodeData::TsNonNullExpression { expression }
                | NodeData::TsTypeAssertion { expression, .. },
            ) => self.is_simple_assign_target(*expression),
            _ => false,
        }
    }

    /// Whether an object or array literal still holds a shorthand
    /// `{ a = 1 }` initializer, which is only valid once converted to a
    /// pattern.
    pub(crate) fn contains_cover_initializer(&self, node: NodeIndex) -> Option<u32> {
        match self.arena.data(node)? {
            NodeData::ObjectExpression { properties } => properties.iter().find_map(|property| {
                match self.arena.data(property)? {
                    NodeData::Property {
                        value,
                        shorthand: true,
                        ..
                    } if matches!(
                        self.arena.data(*value),
                        Some(NodeData::AssignmentPattern { .. })
                    ) =>
                    {
                        self.arena.get(*value).map(|node| node.pos)
                    }
                    NodeData::Property { value, .. } => self.contains_cover_initializer(*value),
                    NodeData::SpreadElement { argument } => {
                        self.contains_cover_initializer(*argument)
                    }
                    _ => None,
                }
            }),
            NodeData::ArrayExpression { elements } => elements
                .iter()
                .flatten()
                .find_map(|element| self.contains_cover_initializer(*element)),
            NodeData::SpreadElement { argument } => self.contains_cover_initializer(*argument),
            _ => None,
        }
    }
}
