//! Parser state - program, statements, declarations and modules.

use crate::errors::PResult;
use crate::hooks::{
    ExpressionStatementArgs, FunctionBody, FunctionBodyArgs, ParamContext, ParseClassSuper,
    ParseExpressionStatement, ParseFunctionBody, ParseFunctionParams, ParseStatement,
    ParseVarHead,
};
use crate::node::{ClassData, FunctionData, NodeData, NodeIndex, NodeList, VariableKind};
use crate::node_arena::NodeBuilder;
use crate::state::{ContextFlags, LabelKind, ParserState};
use plait_common::ScriptTarget;
use plait_common::diagnostics::diagnostic_codes;
use plait_scanner::{LexicalContext, SyntaxKind};
use tracing::trace;

/// Where a variable declaration appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum VarPosition {
    Statement,
    ForInit,
}

impl ParserState {
    // =========================================================================
    // Program
    // =========================================================================

    /// Parse the whole input as a `Program` and check that every started
    /// node was finished.
    pub fn parse_program(&mut self) -> PResult<NodeIndex> {
        trace!(source_type = ?self.options.source_type, "parse_program");
        let builder = self.start_node_at(0, plait_common::Position::new(1, 0));
        let body = self.parse_statement_list(SyntaxKind::EndOfFileToken, true)?;
        let end = self.scanner.text().len() as u32;
        let end_loc = self.scanner.position_of(end);
        let program = self.finish_node_at(
            builder,
            NodeData::Program {
                body,
                source_type: self.options.source_type,
            },
            end,
            end_loc,
        )?;
        self.check_all_finished()?;
        Ok(program)
    }

    /// Statements up to `terminator` (not consumed), with a directive
    /// prologue when `directives` is set.
    pub(crate) fn parse_statement_list(
        &mut self,
        terminator: SyntaxKind,
        directives: bool,
    ) -> PResult<NodeList> {
        let mut body = NodeList::new();
        let mut in_prologue = directives;
        while !self.is_token(terminator) {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.expected_error(token_to_text(terminator)));
            }
            if in_prologue && self.is_token(SyntaxKind::StringLiteral) {
                let raw = self.token_text().to_string();
                let pos = self.token_pos();
                let statement = self.call::<ParseStatement>(())?;
                let statement = self.mark_directive(statement, pos, &raw)?;
                body.push(statement);
                continue;
            }
            in_prologue = false;
            body.push(self.call::<ParseStatement>(())?);
        }
        Ok(body)
    }

    /// Turn a prologue statement consisting of a lone string literal into a
    /// directive. Anything else ends the prologue without changes.
    fn mark_directive(&mut self, statement: NodeIndex, pos: u32, raw: &str) -> PResult<NodeIndex> {
        let Some(NodeData::ExpressionStatement { expression, .. }) =
            self.arena.data(statement).cloned()
        else {
            return Ok(statement);
        };
        let is_lone_literal = self
            .arena
            .get(expression)
            .is_some_and(|node| node.pos == pos && node.end == pos + raw.len() as u32)
            && matches!(
                self.arena.data(expression),
                Some(NodeData::StringLiteral { .. })
            );
        if !is_lone_literal {
            return Ok(statement);
        }
        let directive = raw[1..raw.len() - 1].to_string();
        if directive == "use strict" {
            self.context_flags.insert(ContextFlags::STRICT);
        }
        self.rebuild_node(
            statement,
            NodeData::ExpressionStatement {
                expression,
                directive: Some(directive),
            },
        )
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Core statement dispatch.
    pub(crate) fn parse_statement_base(&mut self, (): ()) -> PResult<NodeIndex> {
        trace!(pos = self.token_pos(), token = ?self.token(), "parse_statement");
        self.with_recursion_guard(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> PResult<NodeIndex> {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let builder = self.start_node();
                self.next_token()?;
                self.finish_node(builder, NodeData::EmptyStatement)
            }
            SyntaxKind::VarKeyword => self.parse_var_statement(VariableKind::Var),
            SyntaxKind::ConstKeyword => self.parse_var_statement(VariableKind::Const),
            SyntaxKind::FunctionKeyword => {
                let builder = self.start_node();
                self.parse_function(builder, true, false)
            }
            SyntaxKind::ClassKeyword => {
                let builder = self.start_node();
                self.parse_class(builder, true)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => {
                self.parse_break_or_continue()
            }
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::DebuggerKeyword => {
                let builder = self.start_node();
                self.next_token()?;
                self.semicolon()?;
                self.finish_node(builder, NodeData::DebuggerStatement)
            }
            SyntaxKind::ImportKeyword => {
                let next = self.look_ahead_token();
                if matches!(next, SyntaxKind::OpenParenToken | SyntaxKind::DotToken) {
                    return self.parse_expression_statement();
                }
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            SyntaxKind::Identifier => {
                if self.is_let_declaration()? {
                    return self.parse_var_statement(VariableKind::Let);
                }
                if self.is_contextual("async") && self.is_async_function_start() {
                    let builder = self.start_node();
                    self.next_token()?;
                    return self.parse_function(builder, true, true);
                }
                if self.look_ahead_token() == SyntaxKind::ColonToken {
                    return self.parse_labeled_statement();
                }
                self.parse_expression_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        let expression = self.parse_expression()?;
        self.call::<ParseExpressionStatement>(ExpressionStatementArgs {
            builder,
            expression,
        })
    }

    pub(crate) fn parse_expression_statement_base(
        &mut self,
        args: ExpressionStatementArgs,
    ) -> PResult<NodeIndex> {
        self.semicolon()?;
        self.finish_node(
            args.builder,
            NodeData::ExpressionStatement {
                expression: args.expression,
                directive: None,
            },
        )
    }

    /// `let` starts a declaration when a binding follows it.
    fn is_let_declaration(&mut self) -> PResult<bool> {
        if !self.is_contextual("let") {
            return Ok(false);
        }
        let next = self.look_ahead_token();
        Ok(matches!(
            next,
            SyntaxKind::Identifier | SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
        ) || (next.is_keyword() && self.is_strict()))
    }

    /// `async function` on one line.
    pub(crate) fn is_async_function_start(&mut self) -> bool {
        match self.peek_token() {
            Some(next) => {
                next.kind == SyntaxKind::FunctionKeyword && !next.has_preceding_line_break()
            }
            None => false,
        }
    }

    pub(crate) fn parse_block(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.open_brace(LexicalContext::BraceStatement)?;
        let body = self.parse_statement_list(SyntaxKind::CloseBraceToken, false)?;
        self.close_brace(LexicalContext::BraceStatement)?;
        self.finish_node(builder, NodeData::BlockStatement { body })
    }

    // =========================================================================
    // Variable declarations
    // =========================================================================

    fn parse_var_statement(&mut self, kind: VariableKind) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.next_token()?;
        let declaration = self.parse_var_declarations(builder, kind, VarPosition::Statement)?;
        Ok(declaration)
    }

    /// Declarators after the `var`/`let`/`const` keyword. Statement
    /// declarations consume their terminator.
    pub(crate) fn parse_var_declarations(
        &mut self,
        builder: NodeBuilder,
        kind: VariableKind,
        position: VarPosition,
    ) -> PResult<NodeIndex> {
        let mut declarations = NodeList::new();
        loop {
            let declarator = self.start_node();
            let id = self.call::<ParseVarHead>(kind)?;
            let init = if self.parse_optional(SyntaxKind::EqualsToken)? {
                Some(self.parse_assignment()?)
            } else {
                let is_for_in_of = position == VarPosition::ForInit
                    && (self.is_token(SyntaxKind::InKeyword) || self.is_contextual("of"));
                let is_pattern = matches!(
                    self.arena.data(id),
                    Some(NodeData::ObjectPattern { .. } | NodeData::ArrayPattern { .. })
                );
                if !is_for_in_of {
                    if kind == VariableKind::Const {
                        return Err(self.error(
                            diagnostic_codes::CONST_DECLARATIONS_MUST_BE_INITIALIZED,
                            &[],
                        ));
                    }
                    if is_pattern {
                        return Err(self.expected_error("="));
                    }
                }
                None
            };
            declarations.push(self.finish_node(declarator, NodeData::VariableDeclarator { id, init })?);
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        if position == VarPosition::Statement {
            self.semicolon()?;
        }
        self.finish_node(builder, NodeData::VariableDeclaration { kind, declarations })
    }

    pub(crate) fn parse_var_head_base(&mut self, kind: VariableKind) -> PResult<NodeIndex> {
        if kind != VariableKind::Var && self.is_contextual("let") {
            return Err(self.error(diagnostic_codes::RESERVED_WORD_CANNOT_BE_USED_HERE, &["let"]));
        }
        self.parse_binding_target()
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Function declaration or expression; the current token is `function`.
    pub(crate) fn parse_function(
        &mut self,
        builder: NodeBuilder,
        is_statement: bool,
        is_async: bool,
    ) -> PResult<NodeIndex> {
        let anonymous_ok = self.take_anonymous_default();
        if is_async {
            self.check_target(ScriptTarget::ES2017, "Async functions")?;
        }
        self.parse_expected(SyntaxKind::FunctionKeyword)?;
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken)?;
        let id = if self.is_token(SyntaxKind::Identifier) {
            Some(self.parse_binding_identifier()?)
        } else if is_statement && !anonymous_ok {
            return Err(self.error(diagnostic_codes::IDENTIFIER_EXPECTED, &[]));
        } else {
            None
        };
        let (params, body) = self.with_function_context(is_async, is_generator, |p| {
            let params = p.call::<ParseFunctionParams>(ParamContext::default())?;
            let body = p.call::<ParseFunctionBody>(FunctionBodyArgs {
                is_async,
                is_generator,
            })?;
            Ok((params, body))
        })?;
        let function = FunctionData {
            id,
            type_parameters: params.type_parameters,
            params: params.params,
            return_type: body.return_type,
            body: body.body,
            is_async,
            is_generator,
        };
        let data = if is_statement {
            NodeData::FunctionDeclaration(function)
        } else {
            NodeData::FunctionExpression(function)
        };
        self.finish_node(builder, data)
    }

    /// `export default function () {}` and `export default class {}` may omit
    /// the name. The flag applies to one declaration only.
    fn take_anonymous_default(&mut self) -> bool {
        std::mem::take(&mut self.allow_anonymous_default)
    }

    pub(crate) fn parse_function_body_base(
        &mut self,
        args: FunctionBodyArgs,
    ) -> PResult<FunctionBody> {
        let body = self.with_function_context(args.is_async, args.is_generator, |p| {
            p.parse_function_block()
        })?;
        Ok(FunctionBody {
            body,
            return_type: None,
        })
    }

    /// `{ ... }` of a function, with its own directive prologue. A
    /// `"use strict"` directive applies to the rest of the body only.
    pub(crate) fn parse_function_block(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.open_brace(LexicalContext::BraceStatement)?;
        let saved = self.context_flags;
        let body = self.parse_statement_list(SyntaxKind::CloseBraceToken, true);
        let strict_before = saved.contains(ContextFlags::STRICT);
        self.context_flags.set(ContextFlags::STRICT, strict_before);
        let body = body?;
        self.close_brace(LexicalContext::BraceStatement)?;
        self.finish_node(builder, NodeData::BlockStatement { body })
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Class declaration or expression; the current token is `class`.
    pub(crate) fn parse_class(&mut self, builder: NodeBuilder, is_statement: bool) -> PResult<NodeIndex> {
        let anonymous_ok = self.take_anonymous_default();
        self.parse_expected(SyntaxKind::ClassKeyword)?;
        self.with_context(ContextFlags::STRICT, ContextFlags::empty(), |p| {
            p.parse_class_rest(builder, is_statement, anonymous_ok)
        })
    }

    fn parse_class_rest(
        &mut self,
        builder: NodeBuilder,
        is_statement: bool,
        anonymous_ok: bool,
    ) -> PResult<NodeIndex> {
        let id = if self.is_token(SyntaxKind::Identifier) && !self.is_contextual("implements") {
            Some(self.parse_binding_identifier()?)
        } else if is_statement && !anonymous_ok {
            return Err(self.error(diagnostic_codes::IDENTIFIER_EXPECTED, &[]));
        } else {
            None
        };
        let heritage = self.call::<ParseClassSuper>(())?;
        let body = self.parse_class_body()?;
        let class = ClassData {
            id,
            type_parameters: heritage.type_parameters,
            super_class: heritage.super_class,
            super_type_arguments: heritage.super_type_arguments,
            implements: heritage.implements,
            body,
        };
        let data = if is_statement {
            NodeData::ClassDeclaration(class)
        } else {
            NodeData::ClassExpression(class)
        };
        self.finish_node(builder, data)
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_paren_expression(&mut self) -> PResult<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let expression = self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            p.parse_expression()
        })?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(expression)
    }

    fn parse_if_statement(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.next_token()?;
        let test = self.parse_paren_expression()?;
        let consequent = self.call::<ParseStatement>(())?;
        let alternate = if self.parse_optional(SyntaxKind::ElseKeyword)? {
            Some(self.call::<ParseStatement>(())?)
        } else {
            None
        };
        self.finish_node(
            builder,
            NodeData::IfStatement {
                test,
                consequent,
                alternate,
            },
        )
    }

    /// Loop body with `break` and `continue` enabled.
    fn parse_loop_body(&mut self) -> PResult<NodeIndex> {
        self.with_context(ContextFlags::IN_ITERATION, ContextFlags::empty(), |p| {
            p.call::<ParseStatement>(())
        })
    }

    fn parse_while_statement(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.next_token()?;
        let test = self.parse_paren_expression()?;
        let body = self.parse_loop_body()?;
        self.finish_node(builder, NodeData::WhileStatement { test, body })
    }

    fn parse_do_statement(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.next_token()?;
        let body = self.parse_loop_body()?;
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        let test = self.parse_paren_expression()?;
        self.parse_optional(SyntaxKind::SemicolonToken)?;
        self.finish_node(builder, NodeData::DoWhileStatement { body, test })
    }

    fn parse_for_statement(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.next_token()?;
        let is_await = if self.is_contextual("await") && self.has_context(ContextFlags::IN_ASYNC) {
            self.check_target(ScriptTarget::ES2018, "'for await' loops")?;
            self.next_token()?;
            true
        } else {
            false
        };
        self.parse_expected(SyntaxKind::OpenParenToken)?;

        let init = if self.is_token(SyntaxKind::SemicolonToken) {
            None
        } else {
            let kind = match self.token() {
                SyntaxKind::VarKeyword => Some(VariableKind::Var),
                SyntaxKind::ConstKeyword => Some(VariableKind::Const),
                _ if self.is_let_declaration()? => Some(VariableKind::Let),
                _ => None,
            };
            let init = self.with_context(ContextFlags::NO_IN, ContextFlags::empty(), |p| {
                match kind {
                    Some(kind) => {
                        let declaration = p.start_node();
                        p.next_token()?;
                        p.parse_var_declarations(declaration, kind, VarPosition::ForInit)
                    }
                    None => p.parse_expression(),
                }
            })?;
            Some(init)
        };

        if let Some(left) = init {
            let is_of = self.is_contextual("of");
            if is_of || self.is_token(SyntaxKind::InKeyword) {
                return self.parse_for_in_of(builder, left, is_of, is_await);
            }
        }
        if is_await {
            return Err(self.expected_error("of"));
        }

        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let test = if self.is_token(SyntaxKind::SemicolonToken) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let update = if self.is_token(SyntaxKind::CloseParenToken) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let body = self.parse_loop_body()?;
        self.finish_node(
            builder,
            NodeData::ForStatement {
                init,
                test,
                update,
                body,
            },
        )
    }

    fn parse_for_in_of(
        &mut self,
        builder: NodeBuilder,
        left: NodeIndex,
        is_of: bool,
        is_await: bool,
    ) -> PResult<NodeIndex> {
        let left = match self.arena.data(left) {
            Some(NodeData::VariableDeclaration { declarations, .. }) => {
                if declarations.len() != 1 {
                    return Err(self.error(diagnostic_codes::UNEXPECTED_TOKEN, &[]));
                }
                left
            }
            _ => self.to_assignable(left)?,
        };
        self.next_token()?;
        let right = if is_of {
            self.parse_assignment()?
        } else {
            self.parse_expression()?
        };
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let body = self.parse_loop_body()?;
        let data = if is_of {
            NodeData::ForOfStatement {
                left,
                right,
                body,
                is_await,
            }
        } else {
            NodeData::ForInStatement { left, right, body }
        };
        self.finish_node(builder, data)
    }

    fn parse_return_statement(&mut self) -> PResult<NodeIndex> {
        if !self.has_context(ContextFlags::IN_FUNCTION) && !self.options.allow_return_outside_function
        {
            return Err(self.error(diagnostic_codes::RETURN_OUTSIDE_FUNCTION, &[]));
        }
        let builder = self.start_node();
        self.next_token()?;
        let argument = if self.can_insert_semicolon() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.semicolon()?;
        self.finish_node(builder, NodeData::ReturnStatement { argument })
    }

    fn parse_break_or_continue(&mut self) -> PResult<NodeIndex> {
        let is_break = self.is_token(SyntaxKind::BreakKeyword);
        let builder = self.start_node();
        self.next_token()?;
        let label = if self.is_token(SyntaxKind::Identifier) && !self.has_preceding_line_break() {
            let name = self.token_value().to_string();
            let pos = self.token_pos();
            let kind = self.labels.get(&name).copied();
            match kind {
                None => return Err(self.error_at(pos, diagnostic_codes::JUMP_TARGET_NOT_FOUND, &[])),
                Some(LabelKind::Other) if !is_break => {
                    return Err(self.error_at(pos, diagnostic_codes::JUMP_TARGET_NOT_FOUND, &[]));
                }
                Some(_) => {}
            }
            Some(self.parse_identifier()?)
        } else {
            None
        };
        if label.is_none() {
            let allowed = if is_break {
                ContextFlags::IN_ITERATION | ContextFlags::IN_SWITCH
            } else {
                ContextFlags::IN_ITERATION
            };
            if !self.context_flags.intersects(allowed) {
                let code = if is_break {
                    diagnostic_codes::BREAK_OUTSIDE_ITERATION_OR_SWITCH
                } else {
                    diagnostic_codes::CONTINUE_OUTSIDE_ITERATION
                };
                return Err(self.error_at(builder.start(), code, &[]));
            }
        }
        self.semicolon()?;
        let data = if is_break {
            NodeData::BreakStatement { label }
        } else {
            NodeData::ContinueStatement { label }
        };
        self.finish_node(builder, data)
    }

    fn parse_labeled_statement(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        let name = self.token_value().to_string();
        if self.labels.contains_key(&name) {
            return Err(self.error(diagnostic_codes::DUPLICATE_LABEL, &[&name]));
        }
        let label = self.parse_identifier()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let kind = if matches!(
            self.token(),
            SyntaxKind::ForKeyword | SyntaxKind::WhileKeyword | SyntaxKind::DoKeyword
        ) {
            LabelKind::Loop
        } else {
            LabelKind::Other
        };
        self.labels.insert(name.clone(), kind);
        let body = self.call::<ParseStatement>(());
        self.labels.remove(&name);
        let body = body?;
        self.finish_node(builder, NodeData::LabeledStatement { label, body })
    }

    fn parse_throw_statement(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.next_token()?;
        if self.has_preceding_line_break() {
            return Err(self.error(diagnostic_codes::EXPRESSION_EXPECTED, &[]));
        }
        let argument = self.parse_expression()?;
        self.semicolon()?;
        self.finish_node(builder, NodeData::ThrowStatement { argument })
    }

    fn parse_try_statement(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.next_token()?;
        let block = self.parse_block()?;
        let handler = if self.is_token(SyntaxKind::CatchKeyword) {
            let clause = self.start_node();
            self.next_token()?;
            let param = if self.parse_optional(SyntaxKind::OpenParenToken)? {
                let param = self.parse_binding_target()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                Some(param)
            } else {
                self.check_target(ScriptTarget::ES2019, "Optional catch binding")?;
                None
            };
            let body = self.parse_block()?;
            Some(self.finish_node(clause, NodeData::CatchClause { param, body })?)
        } else {
            None
        };
        let finalizer = if self.parse_optional(SyntaxKind::FinallyKeyword)? {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.expected_error("catch"));
        }
        self.finish_node(
            builder,
            NodeData::TryStatement {
                block,
                handler,
                finalizer,
            },
        )
    }

    fn parse_switch_statement(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.next_token()?;
        let discriminant = self.parse_paren_expression()?;
        self.open_brace(LexicalContext::BraceStatement)?;
        let cases = self.with_context(ContextFlags::IN_SWITCH, ContextFlags::empty(), |p| {
            p.parse_switch_cases()
        })?;
        self.close_brace(LexicalContext::BraceStatement)?;
        self.finish_node(builder, NodeData::SwitchStatement { discriminant, cases })
    }

    fn parse_switch_cases(&mut self) -> PResult<NodeList> {
        let mut cases = NodeList::new();
        let mut seen_default = false;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let case = self.start_node();
            let test = match self.token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token()?;
                    Some(self.parse_expression()?)
                }
                SyntaxKind::DefaultKeyword => {
                    if seen_default {
                        return Err(self.error(diagnostic_codes::DUPLICATE_DEFAULT_CLAUSE, &[]));
                    }
                    seen_default = true;
                    self.next_token()?;
                    None
                }
                _ => return Err(self.expected_error("case")),
            };
            self.parse_expected(SyntaxKind::ColonToken)?;
            let mut consequent = NodeList::new();
            while !matches!(
                self.token(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                consequent.push(self.call::<ParseStatement>(())?);
            }
            cases.push(self.finish_node(case, NodeData::SwitchCase { test, consequent })?);
        }
        Ok(cases)
    }

    fn parse_with_statement(&mut self) -> PResult<NodeIndex> {
        if self.is_strict() {
            return Err(self.error(diagnostic_codes::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE, &[]));
        }
        let builder = self.start_node();
        self.next_token()?;
        let object = self.parse_paren_expression()?;
        let body = self.call::<ParseStatement>(())?;
        self.finish_node(builder, NodeData::WithStatement { object, body })
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn check_module_syntax(&self) -> PResult<()> {
        if self.options.source_type.is_module() {
            Ok(())
        } else {
            Err(self.error(diagnostic_codes::MODULE_SYNTAX_IN_SCRIPT, &[]))
        }
    }

    fn parse_module_source(&mut self) -> PResult<NodeIndex> {
        if !self.is_token(SyntaxKind::StringLiteral) {
            return Err(self.error(diagnostic_codes::STRING_LITERAL_EXPECTED, &[]));
        }
        self.parse_literal()
    }

    fn parse_import_declaration(&mut self) -> PResult<NodeIndex> {
        self.check_module_syntax()?;
        let builder = self.start_node();
        self.next_token()?;
        let mut specifiers = NodeList::new();
        if self.is_token(SyntaxKind::StringLiteral) {
            let source = self.parse_module_source()?;
            self.semicolon()?;
            return self.finish_node(builder, NodeData::ImportDeclaration { specifiers, source });
        }
        if self.is_token(SyntaxKind::Identifier) {
            let specifier = self.start_node();
            let local = self.parse_binding_identifier()?;
            specifiers.push(self.finish_node(specifier, NodeData::ImportDefaultSpecifier { local })?);
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                return self.finish_import(builder, specifiers);
            }
        }
        if self.is_token(SyntaxKind::AsteriskToken) {
            let specifier = self.start_node();
            self.next_token()?;
            self.expect_contextual("as")?;
            let local = self.parse_binding_identifier()?;
            specifiers.push(self.finish_node(specifier, NodeData::ImportNamespaceSpecifier { local })?);
        } else {
            self.open_brace(LexicalContext::BraceExpression)?;
            while !self.is_token(SyntaxKind::CloseBraceToken) {
                let specifier = self.start_node();
                let imported = self.parse_module_export_name()?;
                let local = if self.eat_contextual("as")? {
                    self.parse_binding_identifier()?
                } else {
                    imported
                };
                specifiers.push(self.finish_node(specifier, NodeData::ImportSpecifier { imported, local })?);
                if !self.parse_optional(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            self.close_brace(LexicalContext::BraceExpression)?;
        }
        self.finish_import(builder, specifiers)
    }

    fn finish_import(&mut self, builder: NodeBuilder, specifiers: NodeList) -> PResult<NodeIndex> {
        self.expect_contextual("from")?;
        let source = self.parse_module_source()?;
        self.semicolon()?;
        self.finish_node(builder, NodeData::ImportDeclaration { specifiers, source })
    }

    /// Identifier name or string naming an export.
    fn parse_module_export_name(&mut self) -> PResult<NodeIndex> {
        if self.is_token(SyntaxKind::StringLiteral) {
            return self.parse_literal();
        }
        self.parse_identifier_name()
    }

    fn parse_export_declaration(&mut self) -> PResult<NodeIndex> {
        self.check_module_syntax()?;
        let builder = self.start_node();
        self.next_token()?;
        match self.token() {
            SyntaxKind::DefaultKeyword => {
                self.next_token()?;
                let declaration = self.parse_export_default()?;
                self.finish_node(builder, NodeData::ExportDefaultDeclaration { declaration })
            }
            SyntaxKind::AsteriskToken => {
                self.next_token()?;
                let exported = if self.eat_contextual("as")? {
                    Some(self.parse_module_export_name()?)
                } else {
                    None
                };
                self.expect_contextual("from")?;
                let source = self.parse_module_source()?;
                self.semicolon()?;
                self.finish_node(builder, NodeData::ExportAllDeclaration { exported, source })
            }
            SyntaxKind::OpenBraceToken => {
                let specifiers = self.parse_export_specifiers()?;
                let source = if self.eat_contextual("from")? {
                    Some(self.parse_module_source()?)
                } else {
                    None
                };
                self.semicolon()?;
                self.finish_node(
                    builder,
                    NodeData::ExportNamedDeclaration {
                        declaration: None,
                        specifiers,
                        source,
                    },
                )
            }
            _ => {
                let declaration = self.call::<ParseStatement>(())?;
                if !self.is_declaration(declaration) {
                    return Err(self.error_at(
                        builder.start(),
                        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                        &[],
                    ));
                }
                self.finish_node(
                    builder,
                    NodeData::ExportNamedDeclaration {
                        declaration: Some(declaration),
                        specifiers: NodeList::new(),
                        source: None,
                    },
                )
            }
        }
    }

    fn parse_export_specifiers(&mut self) -> PResult<NodeList> {
        let mut specifiers = NodeList::new();
        self.open_brace(LexicalContext::BraceExpression)?;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let specifier = self.start_node();
            let local = self.parse_module_export_name()?;
            let exported = if self.eat_contextual("as")? {
                self.parse_module_export_name()?
            } else {
                local
            };
            specifiers.push(self.finish_node(specifier, NodeData::ExportSpecifier { local, exported })?);
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.close_brace(LexicalContext::BraceExpression)?;
        Ok(specifiers)
    }

    fn parse_export_default(&mut self) -> PResult<NodeIndex> {
        let is_async_function = self.is_contextual("async") && self.is_async_function_start();
        match self.token() {
            SyntaxKind::FunctionKeyword => {
                let builder = self.start_node();
                self.allow_anonymous_default = true;
                self.parse_function(builder, true, false)
            }
            SyntaxKind::ClassKeyword => {
                let builder = self.start_node();
                self.allow_anonymous_default = true;
                self.parse_class(builder, true)
            }
            SyntaxKind::Identifier if is_async_function => {
                let builder = self.start_node();
                self.next_token()?;
                self.allow_anonymous_default = true;
                self.parse_function(builder, true, true)
            }
            _ => {
                let expression = self.parse_assignment()?;
                self.semicolon()?;
                Ok(expression)
            }
        }
    }

    fn is_declaration(&self, node: NodeIndex) -> bool {
        matches!(
            self.arena.data(node),
            Some(
                NodeData::VariableDeclaration { .. }
                    | NodeData::FunctionDeclaration(_)
                    | NodeData::ClassDeclaration(_)
                    | NodeData::TsInterfaceDeclaration { .. }
                    | NodeData::TsTypeAliasDeclaration { .. }
                    | NodeData::TsEnumDeclaration { .. }
                    | NodeData::TypeAlias { .. }
            )
        )
    }
}

fn token_to_text(kind: SyntaxKind) -> &'static str {
    plait_scanner::token_to_string(kind).unwrap_or("end of input")
}
