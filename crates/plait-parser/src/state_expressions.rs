//! Parser state - expression parsing.
//!
//! Binary expressions use precedence climbing through the `ParseExprOp`
//! rule so plugins can add operators (`as`) at a precedence of their choice.
//! Parenthesized arrows are resolved speculatively: a `(` that may start an
//! arrow is first parsed as a parameter list, and reparsed as a grouping
//! when that fails. The attempt ends at `=>`. The body is parsed after
//! committing, so its errors are reported where they occur.

use crate::errors::PResult;
use crate::hooks::{
    ArrowHead, ExprOpArgs, FunctionBodyArgs, NewArguments, ParamContext, ParseArrow, ParseExprAtom,
    ParseExprOp, ParseFunctionBody, ParseFunctionParams, ParseMaybeUnary, ParseNewArguments,
    ParseSubscript, Subscript, SubscriptArgs,
};
use crate::node::{
    AssignmentOperator, BinaryOperator, FunctionData, LogicalOperator, MethodKind, NodeData,
    NodeIndex, NodeList, PropertyKind, UnaryOperator, UpdateOperator,
};
use crate::node_arena::NodeBuilder;
use crate::options::Plugins;
use crate::state::{ContextFlags, ParserState};
use plait_common::{Position, ScriptTarget};
use plait_common::diagnostics::diagnostic_codes;
use plait_scanner::{LexicalContext, SyntaxKind, TokenFlags, parse_numeric_literal_value};
use smallvec::SmallVec;
use tracing::trace;

/// An arrow function up to its `=>`, with the node still open.
#[derive(Clone, Debug)]
pub(crate) struct ArrowSignature {
    builder: NodeBuilder,
    type_parameters: Option<NodeIndex>,
    params: NodeList,
    return_type: Option<NodeIndex>,
}

/// A binary operator and the node kind it builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

/// Precedence of `in`, `instanceof` and the relational operators.
pub(crate) const RELATIONAL_PRECEDENCE: u8 = 7;

/// Binding power and operator for a binary operator token.
fn binary_operator(kind: SyntaxKind) -> Option<(u8, BinaryOp)> {
    use BinaryOp::{Binary, Logical};
    let entry = match kind {
        SyntaxKind::QuestionQuestionToken => (1, Logical(LogicalOperator::Coalesce)),
        SyntaxKind::BarBarToken => (1, Logical(LogicalOperator::Or)),
        SyntaxKind::AmpersandAmpersandToken => (2, Logical(LogicalOperator::And)),
        SyntaxKind::BarToken => (3, Binary(BinaryOperator::BitwiseOr)),
        SyntaxKind::CaretToken => (4, Binary(BinaryOperator::BitwiseXor)),
        SyntaxKind::AmpersandToken => (5, Binary(BinaryOperator::BitwiseAnd)),
        SyntaxKind::EqualsEqualsToken => (6, Binary(BinaryOperator::Equality)),
        SyntaxKind::ExclamationEqualsToken => (6, Binary(BinaryOperator::Inequality)),
        SyntaxKind::EqualsEqualsEqualsToken => (6, Binary(BinaryOperator::StrictEquality)),
        SyntaxKind::ExclamationEqualsEqualsToken => (6, Binary(BinaryOperator::StrictInequality)),
        SyntaxKind::LessThanToken => (7, Binary(BinaryOperator::LessThan)),
        SyntaxKind::GreaterThanToken => (7, Binary(BinaryOperator::GreaterThan)),
        SyntaxKind::LessThanEqualsToken => (7, Binary(BinaryOperator::LessThanOrEqual)),
        SyntaxKind::GreaterThanEqualsToken => (7, Binary(BinaryOperator::GreaterThanOrEqual)),
        SyntaxKind::InstanceOfKeyword => (7, Binary(BinaryOperator::InstanceOf)),
        SyntaxKind::InKeyword => (7, Binary(BinaryOperator::In)),
        SyntaxKind::LessThanLessThanToken => (8, Binary(BinaryOperator::ShiftLeft)),
        SyntaxKind::GreaterThanGreaterThanToken => (8, Binary(BinaryOperator::ShiftRight)),
        SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
            (8, Binary(BinaryOperator::ShiftRightUnsigned))
        }
        SyntaxKind::PlusToken => (9, Binary(BinaryOperator::Addition)),
        SyntaxKind::MinusToken => (9, Binary(BinaryOperator::Subtraction)),
        SyntaxKind::AsteriskToken => (10, Binary(BinaryOperator::Multiplication)),
        SyntaxKind::SlashToken => (10, Binary(BinaryOperator::Division)),
        SyntaxKind::PercentToken => (10, Binary(BinaryOperator::Remainder)),
        SyntaxKind::AsteriskAsteriskToken => (11, Binary(BinaryOperator::Exponentiation)),
        _ => return None,
    };
    Some(entry)
}

fn assignment_operator(kind: SyntaxKind) -> Option<AssignmentOperator> {
    let operator = match kind {
        SyntaxKind::EqualsToken => AssignmentOperator::Assign,
        SyntaxKind::PlusEqualsToken => AssignmentOperator::Addition,
        SyntaxKind::MinusEqualsToken => AssignmentOperator::Subtraction,
        SyntaxKind::AsteriskEqualsToken => AssignmentOperator::Multiplication,
        SyntaxKind::SlashEqualsToken => AssignmentOperator::Division,
        SyntaxKind::PercentEqualsToken => AssignmentOperator::Remainder,
        SyntaxKind::AsteriskAsteriskEqualsToken => AssignmentOperator::Exponentiation,
        SyntaxKind::LessThanLessThanEqualsToken => AssignmentOperator::ShiftLeft,
        SyntaxKind::GreaterThanGreaterThanEqualsToken => AssignmentOperator::ShiftRight,
        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => {
            AssignmentOperator::ShiftRightUnsigned
        }
        SyntaxKind::BarEqualsToken => AssignmentOperator::BitwiseOr,
        SyntaxKind::CaretEqualsToken => AssignmentOperator::BitwiseXor,
        SyntaxKind::AmpersandEqualsToken => AssignmentOperator::BitwiseAnd,
        SyntaxKind::BarBarEqualsToken => AssignmentOperator::LogicalOr,
        SyntaxKind::AmpersandAmpersandEqualsToken => AssignmentOperator::LogicalAnd,
        SyntaxKind::QuestionQuestionEqualsToken => AssignmentOperator::LogicalNullish,
        _ => return None,
    };
    Some(operator)
}

fn unary_operator(kind: SyntaxKind) -> Option<UnaryOperator> {
    let operator = match kind {
        SyntaxKind::MinusToken => UnaryOperator::Minus,
        SyntaxKind::PlusToken => UnaryOperator::Plus,
        SyntaxKind::ExclamationToken => UnaryOperator::LogicalNot,
        SyntaxKind::TildeToken => UnaryOperator::BitwiseNot,
        SyntaxKind::TypeOfKeyword => UnaryOperator::TypeOf,
        SyntaxKind::VoidKeyword => UnaryOperator::Void,
        SyntaxKind::DeleteKeyword => UnaryOperator::Delete,
        _ => return None,
    };
    Some(operator)
}

/// Tokens after which a `yield` has no operand.
fn ends_yield_operand(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::CommaToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::ColonToken
            | SyntaxKind::EndOfFileToken
            | SyntaxKind::TemplateMiddle
            | SyntaxKind::TemplateTail
    )
}

impl ParserState {
    // =========================================================================
    // Entry points
    // =========================================================================

    /// Parse the whole input as a single expression.
    pub fn parse_standalone_expression(&mut self) -> PResult<NodeIndex> {
        let expression = self.parse_expression()?;
        if !self.is_token(SyntaxKind::EndOfFileToken) {
            return Err(self.unexpected());
        }
        self.check_all_finished()?;
        Ok(expression)
    }

    /// Comma-separated expression.
    pub fn parse_expression(&mut self) -> PResult<NodeIndex> {
        let first = self.parse_assignment()?;
        if !self.is_token(SyntaxKind::CommaToken) {
            return Ok(first);
        }
        let builder = self.start_node_at_node(first);
        let mut expressions = NodeList::new();
        expressions.push(first);
        while self.parse_optional(SyntaxKind::CommaToken)? {
            expressions.push(self.parse_assignment()?);
        }
        self.finish_node(builder, NodeData::SequenceExpression { expressions })
    }

    /// Assignment expression. Object and array literals containing a
    /// shorthand initializer must have been converted to patterns by now.
    pub fn parse_assignment(&mut self) -> PResult<NodeIndex> {
        self.parse_assignment_inner(false)
    }

    /// Element of an array or object literal that may still turn out to be
    /// a pattern.
    fn parse_assignment_allow_cover(&mut self) -> PResult<NodeIndex> {
        self.parse_assignment_inner(true)
    }

    fn parse_assignment_inner(&mut self, allow_cover: bool) -> PResult<NodeIndex> {
        self.with_recursion_guard(|p| {
            if p.is_contextual("yield") && p.has_context(ContextFlags::IN_GENERATOR) {
                return p.parse_yield();
            }
            let left = p.parse_conditional()?;
            let Some(operator) = assignment_operator(p.token()) else {
                if !allow_cover
                    && let Some(pos) = p.contains_cover_initializer(left)
                {
                    return Err(p.error_at(pos, diagnostic_codes::EXPECTED, &[":"]));
                }
                return Ok(left);
            };
            let left = if operator == AssignmentOperator::Assign {
                p.to_assignable(left)?
            } else {
                if !p.is_simple_assign_target(left) {
                    let pos = p.arena.get(left).map_or(0, |node| node.pos);
                    return Err(p.error_at(pos, diagnostic_codes::INVALID_ASSIGNMENT_TARGET, &[]));
                }
                left
            };
            match operator {
                AssignmentOperator::Exponentiation => {
                    p.check_target(ScriptTarget::ES2016, "The '**=' operator")?;
                }
                AssignmentOperator::LogicalOr
                | AssignmentOperator::LogicalAnd
                | AssignmentOperator::LogicalNullish => {
                    p.check_target(ScriptTarget::ES2021, "Logical assignment")?;
                }
                _ => {}
            }
            let builder = p.start_node_at_node(left);
            p.next_token()?;
            let right = p.parse_assignment()?;
            p.finish_node(
                builder,
                NodeData::AssignmentExpression {
                    operator,
                    left,
                    right,
                },
            )
        })
    }

    fn parse_yield(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.next_token()?;
        if self.has_preceding_line_break() || ends_yield_operand(self.token()) {
            return self.finish_node(
                builder,
                NodeData::YieldExpression {
                    argument: None,
                    delegate: false,
                },
            );
        }
        let delegate = self.parse_optional(SyntaxKind::AsteriskToken)?;
        let argument = self.parse_assignment()?;
        self.finish_node(
            builder,
            NodeData::YieldExpression {
                argument: Some(argument),
                delegate,
            },
        )
    }

    fn parse_conditional(&mut self) -> PResult<NodeIndex> {
        let test = self.parse_expr_ops()?;
        if !self.is_token(SyntaxKind::QuestionToken) {
            return Ok(test);
        }
        let builder = self.start_node_at_node(test);
        self.next_token()?;
        let consequent = self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            p.parse_assignment()
        })?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let alternate = self.parse_assignment()?;
        self.finish_node(
            builder,
            NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
        )
    }

    // =========================================================================
    // Binary operators
    // =========================================================================

    fn parse_expr_ops(&mut self) -> PResult<NodeIndex> {
        let left = self.call::<ParseMaybeUnary>(())?;
        if matches!(
            self.arena.data(left),
            Some(NodeData::ArrowFunctionExpression { .. })
        ) {
            return Ok(left);
        }
        self.call::<ParseExprOp>(ExprOpArgs {
            left,
            min_precedence: 0,
        })
    }

    /// Operator at the current token, if it is one binding tighter than
    /// `min_precedence`.
    pub(crate) fn binary_operator_at(&self, min_precedence: u8) -> Option<(u8, BinaryOp)> {
        if self.is_token(SyntaxKind::InKeyword) && self.has_context(ContextFlags::NO_IN) {
            return None;
        }
        binary_operator(self.token()).filter(|(precedence, _)| *precedence > min_precedence)
    }

    /// Extend `left` with every operator binding tighter than
    /// `min_precedence`.
    pub(crate) fn parse_expr_op_base(&mut self, args: ExprOpArgs) -> PResult<NodeIndex> {
        let ExprOpArgs {
            left,
            min_precedence,
        } = args;
        let Some((precedence, operator)) = self.binary_operator_at(min_precedence) else {
            return Ok(left);
        };
        trace!(pos = self.token_pos(), precedence, "parse_expr_op");
        match operator {
            BinaryOp::Logical(LogicalOperator::Coalesce) => {
                self.check_target(ScriptTarget::ES2020, "The '??' operator")?;
            }
            BinaryOp::Binary(BinaryOperator::Exponentiation) => {
                self.check_target(ScriptTarget::ES2016, "The '**' operator")?;
                if matches!(
                    self.arena.data(left),
                    Some(NodeData::UnaryExpression { .. } | NodeData::AwaitExpression { .. })
                ) {
                    return Err(self.error(diagnostic_codes::UNEXPECTED_TOKEN, &[]));
                }
            }
            _ => {}
        }
        let right_associative =
            operator == BinaryOp::Binary(BinaryOperator::Exponentiation);
        let builder = self.start_node_at_node(left);
        self.next_token()?;
        let right = self.call::<ParseMaybeUnary>(())?;
        let right = self.call::<ParseExprOp>(ExprOpArgs {
            left: right,
            min_precedence: if right_associative {
                precedence - 1
            } else {
                precedence
            },
        })?;
        let data = match operator {
            BinaryOp::Binary(operator) => NodeData::BinaryExpression {
                operator,
                left,
                right,
            },
            BinaryOp::Logical(operator) => NodeData::LogicalExpression {
                operator,
                left,
                right,
            },
        };
        let node = self.finish_node(builder, data)?;
        self.call::<ParseExprOp>(ExprOpArgs {
            left: node,
            min_precedence,
        })
    }

    // =========================================================================
    // Unary and update
    // =========================================================================

    pub(crate) fn parse_maybe_unary_base(&mut self, (): ()) -> PResult<NodeIndex> {
        self.with_recursion_guard(|p| p.parse_maybe_unary_inner())
    }

    fn parse_maybe_unary_inner(&mut self) -> PResult<NodeIndex> {
        if let Some(operator) = unary_operator(self.token()) {
            let builder = self.start_node();
            self.next_token()?;
            let argument = self.call::<ParseMaybeUnary>(())?;
            return self.finish_node(builder, NodeData::UnaryExpression { operator, argument });
        }
        if let Some(operator) = self.update_operator() {
            let builder = self.start_node();
            self.next_token()?;
            let argument = self.call::<ParseMaybeUnary>(())?;
            self.check_update_target(argument)?;
            return self.finish_node(
                builder,
                NodeData::UpdateExpression {
                    operator,
                    prefix: true,
                    argument,
                },
            );
        }
        if self.is_await_expression_start() {
            let builder = self.start_node();
            self.next_token()?;
            let argument = self.call::<ParseMaybeUnary>(())?;
            return self.finish_node(builder, NodeData::AwaitExpression { argument });
        }

        let expression = self.parse_expr_subscripts()?;
        if let Some(operator) = self.update_operator()
            && !self.has_preceding_line_break()
        {
            self.check_update_target(expression)?;
            let builder = self.start_node_at_node(expression);
            self.next_token()?;
            return self.finish_node(
                builder,
                NodeData::UpdateExpression {
                    operator,
                    prefix: false,
                    argument: expression,
                },
            );
        }
        Ok(expression)
    }

    fn update_operator(&self) -> Option<UpdateOperator> {
        match self.token() {
            SyntaxKind::PlusPlusToken => Some(UpdateOperator::Increment),
            SyntaxKind::MinusMinusToken => Some(UpdateOperator::Decrement),
            _ => None,
        }
    }

    fn check_update_target(&self, argument: NodeIndex) -> PResult<()> {
        if self.is_simple_assign_target(argument) {
            return Ok(());
        }
        let pos = self.arena.get(argument).map_or(0, |node| node.pos);
        Err(self.error_at(pos, diagnostic_codes::INVALID_ASSIGNMENT_TARGET, &[]))
    }

    /// `await` is an operator inside async functions and at the top level
    /// of modules; elsewhere it is an identifier.
    fn is_await_expression_start(&self) -> bool {
        self.is_contextual("await")
            && (self.has_context(ContextFlags::IN_ASYNC)
                || (self.options.source_type.is_module()
                    && !self.has_context(ContextFlags::IN_FUNCTION)))
    }

    // =========================================================================
    // Subscripts
    // =========================================================================

    pub(crate) fn parse_expr_subscripts(&mut self) -> PResult<NodeIndex> {
        let base = self.call::<ParseExprAtom>(())?;
        if matches!(
            self.arena.data(base),
            Some(NodeData::ArrowFunctionExpression { .. })
        ) {
            return Ok(base);
        }
        self.parse_subscripts(base, false)
    }

    pub(crate) fn parse_subscripts(&mut self, mut base: NodeIndex, no_calls: bool) -> PResult<NodeIndex> {
        loop {
            match self.call::<ParseSubscript>(SubscriptArgs { base, no_calls })? {
                Subscript::Continue(next) => base = next,
                Subscript::Stop(done) => return Ok(done),
            }
        }
    }

    pub(crate) fn parse_subscript_base(&mut self, args: SubscriptArgs) -> PResult<Subscript> {
        let SubscriptArgs { base, no_calls } = args;
        match self.token() {
            SyntaxKind::DotToken => {
                let builder = self.start_node_at_node(base);
                self.next_token()?;
                let property = self.parse_member_name()?;
                let member = self.finish_node(
                    builder,
                    NodeData::MemberExpression {
                        object: base,
                        property,
                        computed: false,
                        optional: false,
                    },
                )?;
                Ok(Subscript::Continue(member))
            }
            SyntaxKind::QuestionDotToken => {
                if no_calls {
                    return Err(self.unexpected());
                }
                self.check_target(ScriptTarget::ES2020, "Optional chaining")?;
                let builder = self.start_node_at_node(base);
                self.next_token()?;
                let data = match self.token() {
                    SyntaxKind::OpenParenToken => NodeData::CallExpression {
                        callee: base,
                        type_arguments: None,
                        arguments: self.parse_arguments()?,
                        optional: true,
                    },
                    SyntaxKind::OpenBracketToken => NodeData::MemberExpression {
                        object: base,
                        property: self.parse_computed_member()?,
                        computed: true,
                        optional: true,
                    },
                    _ => NodeData::MemberExpression {
                        object: base,
                        property: self.parse_member_name()?,
                        computed: false,
                        optional: true,
                    },
                };
                Ok(Subscript::Continue(self.finish_node(builder, data)?))
            }
            SyntaxKind::OpenBracketToken => {
                let builder = self.start_node_at_node(base);
                let property = self.parse_computed_member()?;
                let member = self.finish_node(
                    builder,
                    NodeData::MemberExpression {
                        object: base,
                        property,
                        computed: true,
                        optional: false,
                    },
                )?;
                Ok(Subscript::Continue(member))
            }
            SyntaxKind::OpenParenToken if !no_calls => {
                let builder = self.start_node_at_node(base);
                let arguments = self.parse_arguments()?;
                let call = self.finish_node(
                    builder,
                    NodeData::CallExpression {
                        callee: base,
                        type_arguments: None,
                        arguments,
                        optional: false,
                    },
                )?;
                Ok(Subscript::Continue(call))
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                let tagged = self.parse_tagged_template(base, None)?;
                Ok(Subscript::Continue(tagged))
            }
            _ => Ok(Subscript::Stop(base)),
        }
    }

    /// `tag<T>` followed by a template.
    pub(crate) fn parse_tagged_template(
        &mut self,
        tag: NodeIndex,
        type_arguments: Option<NodeIndex>,
    ) -> PResult<NodeIndex> {
        let builder = self.start_node_at_node(tag);
        let quasi = self.parse_template(true)?;
        self.finish_node(
            builder,
            NodeData::TaggedTemplateExpression {
                tag,
                type_arguments,
                quasi,
            },
        )
    }

    fn parse_computed_member(&mut self) -> PResult<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let property = self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            p.parse_expression()
        })?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(property)
    }

    fn parse_member_name(&mut self) -> PResult<NodeIndex> {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            return self.parse_private_name();
        }
        self.parse_identifier_name()
    }

    /// `( arg, ...spread )`.
    pub(crate) fn parse_arguments(&mut self) -> PResult<NodeList> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut arguments = NodeList::new();
        self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            while !p.is_token(SyntaxKind::CloseParenToken) {
                if p.is_token(SyntaxKind::DotDotDotToken) {
                    arguments.push(p.parse_spread(false)?);
                } else {
                    arguments.push(p.parse_assignment()?);
                }
                if !p.is_token(SyntaxKind::CloseParenToken) {
                    p.parse_expected(SyntaxKind::CommaToken)?;
                }
            }
            Ok(())
        })?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(arguments)
    }

    fn parse_spread(&mut self, allow_cover: bool) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.parse_expected(SyntaxKind::DotDotDotToken)?;
        let argument = if allow_cover {
            self.parse_assignment_allow_cover()?
        } else {
            self.parse_assignment()?
        };
        self.finish_node(builder, NodeData::SpreadElement { argument })
    }

    pub(crate) fn parse_new_arguments_base(&mut self, (): ()) -> PResult<NewArguments> {
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return Ok(NewArguments::default());
        }
        Ok(NewArguments {
            type_arguments: None,
            arguments: self.parse_arguments()?,
        })
    }

    // =========================================================================
    // Atoms
    // =========================================================================

    pub(crate) fn parse_expr_atom_base(&mut self, (): ()) -> PResult<NodeIndex> {
        trace!(pos = self.token_pos(), token = ?self.token(), "parse_expr_atom");
        match self.token() {
            SyntaxKind::ThisKeyword => {
                let builder = self.start_node();
                self.next_token()?;
                self.finish_node(builder, NodeData::ThisExpression)
            }
            SyntaxKind::SuperKeyword => {
                let builder = self.start_node();
                self.next_token()?;
                if !matches!(
                    self.token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::DotToken | SyntaxKind::OpenBracketToken
                ) {
                    return Err(self.error_at(
                        builder.start(),
                        diagnostic_codes::SUPER_MUST_BE_FOLLOWED_BY_ARGUMENTS_OR_MEMBER,
                        &[],
                    ));
                }
                self.finish_node(builder, NodeData::Super)
            }
            SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral => self.parse_literal(),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template(false)
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.re_scan_slash_token()?;
                self.parse_regex()
            }
            SyntaxKind::RegularExpressionLiteral => self.parse_regex(),
            SyntaxKind::OpenParenToken => self.parse_paren_or_arrow(),
            SyntaxKind::OpenBracketToken => self.with_recursion_guard(|p| p.parse_array_literal()),
            SyntaxKind::OpenBraceToken => self.with_recursion_guard(|p| p.parse_object_literal()),
            SyntaxKind::FunctionKeyword => {
                let builder = self.start_node();
                self.parse_function(builder, false, false)
            }
            SyntaxKind::ClassKeyword => {
                let builder = self.start_node();
                self.parse_class(builder, false)
            }
            SyntaxKind::NewKeyword => self.parse_new(),
            SyntaxKind::ImportKeyword => self.parse_import_meta_or_call(),
            SyntaxKind::Identifier => self.parse_identifier_atom(),
            SyntaxKind::EndOfFileToken => Err(self.unexpected()),
            _ => Err(self.error(diagnostic_codes::EXPRESSION_EXPECTED, &[])),
        }
    }

    /// Identifier reference.
    pub(crate) fn parse_identifier(&mut self) -> PResult<NodeIndex> {
        if !self.is_token(SyntaxKind::Identifier) {
            return Err(self.error(diagnostic_codes::IDENTIFIER_EXPECTED, &[]));
        }
        let name = self.token_value().to_string();
        self.check_identifier_reference(&name, self.token_pos())?;
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

    /// Identifier or reserved word used as a name (`a.if`, `{ class: 1 }`).
    pub(crate) fn parse_identifier_name(&mut self) -> PResult<NodeIndex> {
        if !self.token().is_identifier_or_keyword() {
            return Err(self.error(diagnostic_codes::IDENTIFIER_EXPECTED, &[]));
        }
        let name = self.token_value().to_string();
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

    pub(crate) fn parse_private_name(&mut self) -> PResult<NodeIndex> {
        let name = self.token_value().to_string();
        let builder = self.start_node();
        self.parse_expected(SyntaxKind::PrivateIdentifier)?;
        self.finish_node(builder, NodeData::PrivateName { name })
    }

    /// String, numeric, bigint, boolean or null literal.
    pub(crate) fn parse_literal(&mut self) -> PResult<NodeIndex> {
        let raw = self.token_text().to_string();
        let data = match self.token() {
            SyntaxKind::NullKeyword => NodeData::NullLiteral,
            SyntaxKind::TrueKeyword => NodeData::BooleanLiteral { value: true },
            SyntaxKind::FalseKeyword => NodeData::BooleanLiteral { value: false },
            SyntaxKind::NumericLiteral => {
                self.check_octal()?;
                NodeData::NumericLiteral {
                    value: parse_numeric_literal_value(&raw),
                    raw,
                }
            }
            SyntaxKind::BigIntLiteral => NodeData::BigIntLiteral { raw },
            SyntaxKind::StringLiteral => {
                self.check_octal()?;
                NodeData::StringLiteral {
                    value: self.token_value().to_string(),
                    raw,
                }
            }
            _ => return Err(self.error(diagnostic_codes::EXPRESSION_EXPECTED, &[])),
        };
        let builder = self.start_node();
        self.next_token()?;
        self.finish_node(builder, data)
    }

    fn check_octal(&self) -> PResult<()> {
        if self.is_strict() && self.token_flags().contains(TokenFlags::OCTAL) {
            return Err(self.error(diagnostic_codes::OCTAL_LITERALS_NOT_ALLOWED, &[]));
        }
        Ok(())
    }

    fn parse_regex(&mut self) -> PResult<NodeIndex> {
        let raw = self.token_text().to_string();
        let (pattern, flags) = match raw.rfind('/') {
            Some(slash) if slash > 0 => (raw[1..slash].to_string(), raw[slash + 1..].to_string()),
            _ => return Err(self.error(diagnostic_codes::EXPRESSION_EXPECTED, &[])),
        };
        let builder = self.start_node();
        self.parse_expected(SyntaxKind::RegularExpressionLiteral)?;
        self.finish_node(builder, NodeData::RegExpLiteral { pattern, flags })
    }

    fn parse_identifier_atom(&mut self) -> PResult<NodeIndex> {
        if self.is_contextual("async")
            && let Some(node) = self.parse_async_atom()?
        {
            return Ok(node);
        }
        if let Some(next) = self.peek_token()
            && next.kind == SyntaxKind::EqualsGreaterThanToken
        {
            let builder = self.start_node();
            return self.parse_arrow_from_identifier(builder, false);
        }
        self.parse_identifier()
    }

    /// `async function`, `async x => ...` and `async (...) => ...`. `None`
    /// means `async` is an ordinary identifier here.
    fn parse_async_atom(&mut self) -> PResult<Option<NodeIndex>> {
        let Some(next) = self.peek_token() else {
            return Ok(None);
        };
        if next.has_preceding_line_break() {
            return Ok(None);
        }
        match next.kind {
            SyntaxKind::FunctionKeyword => {
                let builder = self.start_node();
                self.next_token()?;
                self.parse_function(builder, false, true).map(Some)
            }
            SyntaxKind::Identifier => {
                let Some(signature) = self.try_parse(|p| {
                    let builder = p.start_node();
                    p.next_token()?;
                    p.parse_identifier_arrow_head(builder)
                })?
                else {
                    return Ok(None);
                };
                self.parse_arrow_tail(signature, true).map(Some)
            }
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                self.try_parse_paren_arrow(true)
            }
            _ => Ok(None),
        }
    }

    // =========================================================================
    // Parentheses and arrows
    // =========================================================================

    /// `(` at an atom: arrow parameters first, grouping otherwise.
    fn parse_paren_or_arrow(&mut self) -> PResult<NodeIndex> {
        if self.paren_may_start_arrow()?
            && let Some(arrow) = self.try_parse_paren_arrow(false)?
        {
            return Ok(arrow);
        }
        let builder = self.start_node();
        self.next_token()?;
        let expression = self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            p.parse_expression()
        })?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        self.finish_node(builder, NodeData::ParenthesizedExpression { expression })
    }

    /// Token-level scan to the matching `)`: only a following `=>` (or `:`
    /// when a type plugin may add a return type) makes an arrow possible.
    /// Keeps nested groupings from being re-parsed at every level.
    fn paren_may_start_arrow(&mut self) -> PResult<bool> {
        let typed = self
            .options
            .plugins
            .intersects(Plugins::TYPESCRIPT | Plugins::FLOW);
        self.look_ahead(|p| {
            let mut open: SmallVec<[SyntaxKind; 8]> = SmallVec::new();
            loop {
                match p.token() {
                    SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => {
                        open.push(p.token());
                    }
                    SyntaxKind::OpenBraceToken => {
                        open.push(SyntaxKind::OpenBraceToken);
                        p.push_context(LexicalContext::BraceExpression);
                    }
                    SyntaxKind::TemplateHead => {
                        open.push(SyntaxKind::TemplateHead);
                        p.push_context(LexicalContext::TemplateSubstitution);
                    }
                    SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken => {
                        let opener = if p.is_token(SyntaxKind::CloseParenToken) {
                            SyntaxKind::OpenParenToken
                        } else {
                            SyntaxKind::OpenBracketToken
                        };
                        if open.pop() != Some(opener) {
                            return Ok(false);
                        }
                        if open.is_empty() {
                            p.next_token()?;
                            return Ok(p.is_token(SyntaxKind::EqualsGreaterThanToken)
                                || (typed && p.is_token(SyntaxKind::ColonToken)));
                        }
                    }
                    SyntaxKind::CloseBraceToken => {
                        if open.pop() != Some(SyntaxKind::OpenBraceToken) {
                            return Ok(false);
                        }
                        p.pop_context(LexicalContext::BraceExpression)?;
                    }
                    SyntaxKind::TemplateTail => {
                        if open.pop() != Some(SyntaxKind::TemplateHead) {
                            return Ok(false);
                        }
                        p.pop_context(LexicalContext::TemplateSubstitution)?;
                    }
                    SyntaxKind::EndOfFileToken => return Ok(false),
                    _ => {}
                }
                p.next_token()?;
            }
        })
    }

    /// Arrow function whose parameter list starts at the current `(` (or
    /// `<` when a type plugin adds type parameters), after `async` when
    /// `is_async` is set. Only the part before `=>` is speculative. `None`
    /// means the input is not an arrow here.
    pub(crate) fn try_parse_paren_arrow(&mut self, is_async: bool) -> PResult<Option<NodeIndex>> {
        let Some(signature) = self.try_parse(|p| {
            let builder = p.start_node();
            if is_async {
                p.next_token()?;
            }
            p.parse_paren_arrow_head(builder)
        })?
        else {
            return Ok(None);
        };
        self.parse_arrow_tail(signature, is_async).map(Some)
    }

    fn parse_paren_arrow_head(&mut self, builder: NodeBuilder) -> PResult<ArrowSignature> {
        trace!(pos = self.token_pos(), "parse_paren_arrow_head");
        let params = self.call::<ParseFunctionParams>(ParamContext::default())?;
        let Some(head) = self.call::<ParseArrow>(())? else {
            return Err(self.expected_error("=>"));
        };
        Ok(ArrowSignature {
            builder,
            type_parameters: params.type_parameters,
            params: params.params,
            return_type: head.return_type,
        })
    }

    fn parse_identifier_arrow_head(&mut self, builder: NodeBuilder) -> PResult<ArrowSignature> {
        let param = self.parse_binding_identifier()?;
        if !self.is_token(SyntaxKind::EqualsGreaterThanToken) {
            return Err(self.expected_error("=>"));
        }
        Ok(ArrowSignature {
            builder,
            type_parameters: None,
            params: NodeList::from(vec![param]),
            return_type: None,
        })
    }

    fn parse_arrow_from_identifier(&mut self, builder: NodeBuilder, is_async: bool) -> PResult<NodeIndex> {
        let signature = self.parse_identifier_arrow_head(builder)?;
        self.parse_arrow_tail(signature, is_async)
    }

    /// `=>` and the body.
    fn parse_arrow_tail(&mut self, signature: ArrowSignature, is_async: bool) -> PResult<NodeIndex> {
        let ArrowSignature {
            builder,
            type_parameters,
            params,
            return_type,
        } = signature;
        if self.has_preceding_line_break() {
            return Err(self.error(diagnostic_codes::LINE_TERMINATOR_BEFORE_ARROW, &[]));
        }
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;
        if is_async {
            self.check_target(ScriptTarget::ES2017, "Async functions")?;
        }
        let (body, expression) = self.with_function_context(is_async, false, |p| {
            if p.is_token(SyntaxKind::OpenBraceToken) {
                Ok((p.parse_function_block()?, false))
            } else {
                Ok((p.parse_assignment()?, true))
            }
        })?;
        self.finish_node(
            builder,
            NodeData::ArrowFunctionExpression {
                type_parameters,
                params,
                return_type,
                body,
                expression,
                is_async,
            },
        )
    }

    /// `Some` when the parameter list is followed by `=>`.
    pub(crate) fn parse_arrow_base(&mut self, (): ()) -> PResult<Option<ArrowHead>> {
        if self.is_token(SyntaxKind::EqualsGreaterThanToken) {
            Ok(Some(ArrowHead::default()))
        } else {
            Ok(None)
        }
    }

    // =========================================================================
    // Templates
    // =========================================================================

    /// Template literal at a `NoSubstitutionTemplateLiteral` or
    /// `TemplateHead` token. Untagged templates reject invalid escapes.
    pub(crate) fn parse_template(&mut self, tagged: bool) -> PResult<NodeIndex> {
        let builder = self.start_node();
        let mut quasis = NodeList::new();
        let mut expressions = NodeList::new();
        if self.is_token(SyntaxKind::NoSubstitutionTemplateLiteral) {
            quasis.push(self.parse_template_element(tagged)?);
            self.next_token()?;
            return self.finish_node(builder, NodeData::TemplateLiteral { quasis, expressions });
        }
        if !self.is_token(SyntaxKind::TemplateHead) {
            return Err(self.expected_error("`"));
        }
        quasis.push(self.parse_template_element(tagged)?);
        self.push_context(LexicalContext::TemplateSubstitution);
        self.next_token()?;
        loop {
            expressions.push(self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
                p.parse_expression()
            })?);
            match self.token() {
                SyntaxKind::TemplateMiddle => {
                    quasis.push(self.parse_template_element(tagged)?);
                    self.next_token()?;
                }
                SyntaxKind::TemplateTail => {
                    quasis.push(self.parse_template_element(tagged)?);
                    self.pop_context(LexicalContext::TemplateSubstitution)?;
                    self.next_token()?;
                    break;
                }
                _ => return Err(self.expected_error("}")),
            }
        }
        self.finish_node(builder, NodeData::TemplateLiteral { quasis, expressions })
    }

    /// Chunk of the current template token, spanning the text between its
    /// delimiters. Does not advance.
    fn parse_template_element(&mut self, tagged: bool) -> PResult<NodeIndex> {
        let kind = self.token();
        let tail = matches!(
            kind,
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateTail
        );
        let start = self.token_pos() + 1;
        let end = if tail {
            self.token_end() - 1
        } else {
            self.token_end() - 2
        };
        let cooked = if self.token_flags().contains(TokenFlags::CONTAINS_INVALID_ESCAPE) {
            if !tagged {
                return Err(self.error(diagnostic_codes::INVALID_ESCAPE_IN_TEMPLATE, &[]));
            }
            None
        } else {
            Some(self.token_value().to_string())
        };
        let raw = self.scanner.text()[start as usize..end as usize]
            .replace("\r\n", "\n")
            .replace('\r', "\n");
        let start_loc = self.scanner.position_of(start);
        let end_loc = self.scanner.position_of(end);
        let builder = self.start_node_at(start, start_loc);
        self.finish_node_at(builder, NodeData::TemplateElement { raw, cooked, tail }, end, end_loc)
    }

    // =========================================================================
    // Array and object literals
    // =========================================================================

    fn parse_array_literal(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBracketToken) {
                if p.parse_optional(SyntaxKind::CommaToken)? {
                    elements.push(None);
                    continue;
                }
                let element = if p.is_token(SyntaxKind::DotDotDotToken) {
                    p.parse_spread(true)?
                } else {
                    p.parse_assignment_allow_cover()?
                };
                elements.push(Some(element));
                if !p.is_token(SyntaxKind::CloseBracketToken) {
                    p.parse_expected(SyntaxKind::CommaToken)?;
                }
            }
            Ok(())
        })?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        self.finish_node(builder, NodeData::ArrayExpression { elements })
    }

    fn parse_object_literal(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.open_brace(LexicalContext::BraceExpression)?;
        let mut properties = NodeList::new();
        self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBraceToken) {
                if p.is_token(SyntaxKind::DotDotDotToken) {
                    properties.push(p.parse_spread(true)?);
                } else {
                    properties.push(p.parse_object_member()?);
                }
                if !p.is_token(SyntaxKind::CloseBraceToken) {
                    p.parse_expected(SyntaxKind::CommaToken)?;
                }
            }
            Ok(())
        })?;
        self.close_brace(LexicalContext::BraceExpression)?;
        self.finish_node(builder, NodeData::ObjectExpression { properties })
    }

    /// Whether the current `async`, `get`, `set` or `static` is a modifier
    /// rather than the member's own name.
    pub(crate) fn is_member_modifier(&mut self) -> bool {
        match self.peek_token() {
            Some(next) => !matches!(
                next.kind,
                SyntaxKind::CommaToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::ExclamationToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::EndOfFileToken
            ),
            None => false,
        }
    }

    fn parse_object_member(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        let mut is_async = false;
        let mut kind = PropertyKind::Init;
        if self.is_contextual("async") && self.is_member_modifier() {
            let line_break = self.peek_token().is_some_and(|next| next.has_preceding_line_break());
            if !line_break {
                self.next_token()?;
                is_async = true;
            }
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken)?;
        if !is_async
            && !is_generator
            && (self.is_contextual("get") || self.is_contextual("set"))
            && self.is_member_modifier()
        {
            kind = if self.is_contextual("get") {
                PropertyKind::Get
            } else {
                PropertyKind::Set
            };
            self.next_token()?;
        }

        let is_plain_name = self.is_token(SyntaxKind::Identifier);
        let (key, computed) = self.parse_property_name()?;

        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let method_kind = match kind {
                PropertyKind::Init => MethodKind::Method,
                PropertyKind::Get => MethodKind::Get,
                PropertyKind::Set => MethodKind::Set,
            };
            let value = self.parse_method_function(is_async, is_generator, method_kind, false)?;
            return self.finish_node(
                builder,
                NodeData::Property {
                    key,
                    value,
                    kind,
                    computed,
                    shorthand: false,
                    method: kind == PropertyKind::Init,
                },
            );
        }
        if is_async || is_generator || kind != PropertyKind::Init {
            return Err(self.expected_error("("));
        }

        let (value, shorthand) = if self.parse_optional(SyntaxKind::ColonToken)? {
            (self.parse_assignment_allow_cover()?, false)
        } else if is_plain_name && !computed {
            let name = self.arena.identifier_name(key).unwrap_or_default().to_string();
            let pos = self.arena.get(key).map_or(0, |node| node.pos);
            self.check_identifier_reference(&name, pos)?;
            if self.is_token(SyntaxKind::EqualsToken) {
                let pattern = self.start_node_at_node(key);
                self.next_token()?;
                let right = self.parse_assignment()?;
                let value =
                    self.finish_node(pattern, NodeData::AssignmentPattern { left: key, right })?;
                (value, true)
            } else {
                (key, true)
            }
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

    /// Property key: name, string, number or `[computed]`. Returns the key
    /// and whether it is computed.
    pub(crate) fn parse_property_name(&mut self) -> PResult<(NodeIndex, bool)> {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                Ok((self.parse_literal()?, false))
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token()?;
                let key = self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
                    p.parse_assignment()
                })?;
                self.parse_expected(SyntaxKind::CloseBracketToken)?;
                Ok((key, true))
            }
            SyntaxKind::PrivateIdentifier => Ok((self.parse_private_name()?, false)),
            kind if kind.is_identifier_or_keyword() => Ok((self.parse_identifier_name()?, false)),
            _ => Err(self.error(diagnostic_codes::PROPERTY_ASSIGNMENT_EXPECTED, &[])),
        }
    }

    /// Function value of a method, getter or setter, starting at its
    /// parameter list.
    pub(crate) fn parse_method_function(
        &mut self,
        is_async: bool,
        is_generator: bool,
        kind: MethodKind,
        is_constructor: bool,
    ) -> PResult<NodeIndex> {
        if is_async {
            self.check_target(ScriptTarget::ES2017, "Async functions")?;
        }
        let builder = self.start_node();
        let params_pos = self.token_pos();
        let (params, body) = self.with_function_context(is_async, is_generator, |p| {
            let params = p.call::<ParseFunctionParams>(ParamContext { is_constructor })?;
            let body = p.call::<ParseFunctionBody>(FunctionBodyArgs {
                is_async,
                is_generator,
            })?;
            Ok((params, body))
        })?;
        match kind {
            MethodKind::Get if !params.params.is_empty() => {
                return Err(self.error_at(
                    params_pos,
                    diagnostic_codes::GET_ACCESSOR_CANNOT_HAVE_PARAMETERS,
                    &[],
                ));
            }
            MethodKind::Set if params.params.len() != 1 => {
                return Err(self.error_at(
                    params_pos,
                    diagnostic_codes::SET_ACCESSOR_MUST_HAVE_ONE_PARAMETER,
                    &[],
                ));
            }
            _ => {}
        }
        self.finish_node(
            builder,
            NodeData::FunctionExpression(FunctionData {
                id: None,
                type_parameters: params.type_parameters,
                params: params.params,
                return_type: body.return_type,
                body: body.body,
                is_async,
                is_generator,
            }),
        )
    }

    // =========================================================================
    // new, import, meta properties
    // =========================================================================

    fn parse_new(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        let (new_end, new_end_loc) = (self.token_end(), self.scanner.token().loc.end);
        self.next_token()?;
        if self.is_token(SyntaxKind::DotToken) {
            self.next_token()?;
            if !self.is_contextual("target") {
                return Err(self.expected_error("target"));
            }
            if !self.has_context(ContextFlags::IN_FUNCTION) {
                return Err(self.error_at(builder.start(), diagnostic_codes::UNEXPECTED_TOKEN, &[]));
            }
            let meta = self.meta_identifier(&builder, "new", new_end, new_end_loc)?;
            let property = self.parse_identifier_name()?;
            return self.finish_node(builder, NodeData::MetaProperty { meta, property });
        }
        let callee = self.call::<ParseExprAtom>(())?;
        let callee = self.parse_subscripts(callee, true)?;
        let NewArguments {
            type_arguments,
            arguments,
        } = self.call::<ParseNewArguments>(())?;
        self.finish_node(
            builder,
            NodeData::NewExpression {
                callee,
                type_arguments,
                arguments,
            },
        )
    }

    fn parse_import_meta_or_call(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        let (import_end, import_end_loc) = (self.token_end(), self.scanner.token().loc.end);
        self.next_token()?;
        match self.token() {
            SyntaxKind::DotToken => {
                self.next_token()?;
                if !self.is_contextual("meta") {
                    return Err(self.expected_error("meta"));
                }
                if !self.options.source_type.is_module() {
                    return Err(self.error_at(
                        builder.start(),
                        diagnostic_codes::MODULE_SYNTAX_IN_SCRIPT,
                        &[],
                    ));
                }
                let meta = self.meta_identifier(&builder, "import", import_end, import_end_loc)?;
                let property = self.parse_identifier_name()?;
                self.finish_node(builder, NodeData::MetaProperty { meta, property })
            }
            SyntaxKind::OpenParenToken => {
                self.next_token()?;
                let source = self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
                    p.parse_assignment()
                })?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                self.finish_node(builder, NodeData::ImportExpression { source })
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Identifier node for the keyword half of `new.target` / `import.meta`.
    fn meta_identifier(
        &mut self,
        outer: &NodeBuilder,
        name: &str,
        end: u32,
        end_loc: Position,
    ) -> PResult<NodeIndex> {
        let builder = self.start_node_at(outer.start(), outer.start_loc());
        self.finish_node_at(
            builder,
            NodeData::Identifier {
                name: name.to_string(),
                optional: false,
                type_annotation: None,
            },
            end,
            end_loc,
        )
    }
}
