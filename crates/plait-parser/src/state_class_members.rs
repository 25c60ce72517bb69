//! Parser state - class bodies and members.

use crate::errors::PResult;
use crate::hooks::{
    ClassHeritage, ClassModifiers, ClassPropertyArgs, ParseClassModifiers, ParseClassProperty,
};
use crate::node::{MethodKind, NodeData, NodeIndex, NodeList};
use crate::node_arena::NodeBuilder;
use crate::state::{ContextFlags, ParserState};
use plait_common::ScriptTarget;
use plait_common::diagnostics::diagnostic_codes;
use plait_scanner::{LexicalContext, SyntaxKind};
use tracing::trace;

impl ParserState {
    /// `{ member* }` of a class.
    pub(crate) fn parse_class_body(&mut self) -> PResult<NodeIndex> {
        let builder = self.start_node();
        self.open_brace(LexicalContext::BraceStatement)?;
        let mut body = NodeList::new();
        let mut has_constructor = false;
        self.with_context(ContextFlags::IN_CLASS, ContextFlags::NO_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBraceToken) {
                if p.parse_optional(SyntaxKind::SemicolonToken)? {
                    continue;
                }
                let member = p.parse_class_member()?;
                if let Some(NodeData::MethodDefinition {
                    kind: MethodKind::Constructor,
                    ..
                }) = p.arena.data(member)
                {
                    if has_constructor {
                        let pos = p.arena.get(member).map_or(0, |node| node.pos);
                        return Err(p.error_at(pos, diagnostic_codes::UNEXPECTED_TOKEN, &[]));
                    }
                    has_constructor = true;
                }
                body.push(member);
            }
            Ok(())
        })?;
        self.close_brace(LexicalContext::BraceStatement)?;
        self.finish_node(builder, NodeData::ClassBody { body })
    }

    fn parse_class_member(&mut self) -> PResult<NodeIndex> {
        trace!(pos = self.token_pos(), "parse_class_member");
        let builder = self.start_node();
        if self.is_contextual("static") && self.look_ahead_token() == SyntaxKind::OpenBraceToken {
            return self.parse_static_block(builder);
        }

        let mut is_static = false;
        let mut modifiers = ClassModifiers::default();
        loop {
            if !is_static && self.is_contextual("static") && self.is_member_modifier() {
                self.next_token()?;
                is_static = true;
                continue;
            }
            let before = self.token_pos();
            modifiers = self.call::<ParseClassModifiers>(modifiers)?;
            if self.token_pos() == before {
                break;
            }
        }

        let mut is_async = false;
        if self.is_contextual("async") && self.is_member_modifier() {
            let line_break = self.peek_token().is_some_and(|next| next.has_preceding_line_break());
            if !line_break {
                self.next_token()?;
                is_async = true;
            }
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken)?;
        let mut kind = MethodKind::Method;
        if !is_async
            && !is_generator
            && (self.is_contextual("get") || self.is_contextual("set"))
            && self.is_member_modifier()
        {
            kind = if self.is_contextual("get") {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            self.next_token()?;
        }

        let (key, computed) = self.parse_property_name()?;
        let named_constructor = !computed && self.is_constructor_key(key);

        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let is_constructor = named_constructor && !is_static;
            if is_constructor {
                if kind != MethodKind::Method || is_async || is_generator {
                    return Err(self.error_at(builder.start(), diagnostic_codes::UNEXPECTED_TOKEN, &[]));
                }
                kind = MethodKind::Constructor;
            }
            if modifiers.readonly {
                return Err(self.error_at(builder.start(), diagnostic_codes::UNEXPECTED_TOKEN, &[]));
            }
            let value = self.parse_method_function(is_async, is_generator, kind, is_constructor)?;
            return self.finish_node(
                builder,
                NodeData::MethodDefinition {
                    key,
                    value,
                    kind,
                    computed,
                    is_static,
                    accessibility: modifiers.accessibility,
                },
            );
        }

        if is_async || is_generator || kind != MethodKind::Method {
            return Err(self.expected_error("("));
        }
        if named_constructor {
            let pos = self.arena.get(key).map_or(0, |node| node.pos);
            return Err(self.error_at(pos, diagnostic_codes::UNEXPECTED_TOKEN, &[]));
        }
        self.check_target(ScriptTarget::ES2022, "Class fields")?;
        self.call::<ParseClassProperty>(ClassPropertyArgs {
            builder,
            key,
            computed,
            is_static,
            modifiers,
            optional: false,
            type_annotation: None,
        })
    }

    fn is_constructor_key(&self, key: NodeIndex) -> bool {
        match self.arena.data(key) {
            Some(NodeData::Identifier { name, .. }) => name == "constructor",
            Some(NodeData::StringLiteral { value, .. }) => value == "constructor",
            _ => false,
        }
    }

    fn parse_static_block(&mut self, builder: NodeBuilder) -> PResult<NodeIndex> {
        self.check_target(ScriptTarget::ES2022, "Class static blocks")?;
        self.next_token()?;
        self.open_brace(LexicalContext::BraceStatement)?;
        let saved_labels = std::mem::take(&mut self.labels);
        let body = self.with_context(
            ContextFlags::empty(),
            ContextFlags::IN_ITERATION
                | ContextFlags::IN_SWITCH
                | ContextFlags::IN_ASYNC
                | ContextFlags::IN_GENERATOR
                | ContextFlags::IN_FUNCTION,
            |p| p.parse_statement_list(SyntaxKind::CloseBraceToken, false),
        );
        self.labels = saved_labels;
        let body = body?;
        self.close_brace(LexicalContext::BraceStatement)?;
        self.finish_node(builder, NodeData::StaticBlock { body })
    }

    /// `= value;` of a class field. Type plugins fill in the optional marker
    /// and annotation before delegating here.
    pub(crate) fn parse_class_property_base(&mut self, args: ClassPropertyArgs) -> PResult<NodeIndex> {
        let value = if self.parse_optional(SyntaxKind::EqualsToken)? {
            let value = self.with_context(
                ContextFlags::empty(),
                ContextFlags::IN_ASYNC | ContextFlags::IN_GENERATOR,
                |p| p.parse_assignment(),
            )?;
            Some(value)
        } else {
            None
        };
        self.semicolon()?;
        self.finish_node(
            args.builder,
            NodeData::PropertyDefinition {
                key: args.key,
                value,
                computed: args.computed,
                is_static: args.is_static,
                optional: args.optional,
                readonly: args.modifiers.readonly,
                accessibility: args.modifiers.accessibility,
                type_annotation: args.type_annotation,
            },
        )
    }

    /// `extends Base`.
    pub(crate) fn parse_class_super_base(&mut self, (): ()) -> PResult<ClassHeritage> {
        if !self.parse_optional(SyntaxKind::ExtendsKeyword)? {
            return Ok(ClassHeritage::default());
        }
        let super_class = self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            p.parse_expr_subscripts()
        })?;
        Ok(ClassHeritage {
            super_class: Some(super_class),
            ..ClassHeritage::default()
        })
    }

    pub(crate) fn parse_class_modifiers_base(
        &mut self,
        modifiers: ClassModifiers,
    ) -> PResult<ClassModifiers> {
        Ok(modifiers)
    }
}
