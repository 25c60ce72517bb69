//! Parser state - token cursor, node lifecycle, lexical contexts and errors.
//!
//! Grammar rules live in the `state_*` modules as further `impl ParserState`
//! blocks. This module holds the primitives they are built from.

use crate::errors::{ContractViolation, PResult, ParseError, SyntaxError};
use crate::hooks::{HookRegistry, Rule};
use crate::node::{NodeData, NodeIndex};
use crate::node_arena::{NodeArena, NodeBuilder};
use crate::options::ParserOptions;
use bitflags::bitflags;
use plait_common::diagnostics::{diagnostic_codes, message_for};
use plait_common::limits::{BYTES_PER_NODE_ESTIMATE, MAX_PARSER_RECURSION_DEPTH};
use plait_common::{Position, ScriptTarget};
use plait_scanner::{
    Comment, LexicalContext, ScannerState, SyntaxKind, Token, TokenFlags, token_to_string,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::trace;

bitflags! {
    /// Grammar context that changes how constructs parse.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ContextFlags: u16 {
        /// `in` is not a binary operator (for-statement heads).
        const NO_IN = 1 << 0;
        const IN_FUNCTION = 1 << 1;
        const IN_ASYNC = 1 << 2;
        const IN_GENERATOR = 1 << 3;
        const IN_ITERATION = 1 << 4;
        const IN_SWITCH = 1 << 5;
        const IN_CLASS = 1 << 6;
        const STRICT = 1 << 7;
    }
}

/// What a label names, for `continue` target checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    Loop,
    Other,
}

/// Counters over speculative attempts. Not part of a snapshot, so
/// rollbacks stay visible after the state itself is restored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpeculationStats {
    pub attempts: u32,
    pub rollbacks: u32,
}

/// Words reserved only in strict mode code.
const STRICT_RESERVED_WORDS: &[&str] = &[
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "yield",
];

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) options: ParserOptions,
    hooks: Arc<HookRegistry>,
    pub(crate) arena: NodeArena,
    pub(crate) context_flags: ContextFlags,
    pub(crate) labels: FxHashMap<String, LabelKind>,
    pub(crate) prev_token_end: u32,
    pub(crate) prev_token_end_loc: Position,
    pub(crate) recursion_depth: u32,
    pub(crate) speculation_depth: u32,
    pub(crate) tokens: Option<Vec<Token>>,
    pub(crate) stats: SpeculationStats,
    /// Set by `export default` for the declaration that follows it.
    pub(crate) allow_anonymous_default: bool,
}

/// Everything a finished parse hands back.
#[derive(Debug)]
pub struct ParserParts {
    pub arena: NodeArena,
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
}

impl ParserState {
    /// Parser with the hook chains of the plugins enabled in `options`,
    /// positioned on the first token.
    pub fn new(source: impl Into<Arc<str>>, options: ParserOptions) -> PResult<Self> {
        options.validate()?;
        let hooks = HookRegistry::for_plugins(options.plugins)?;
        Self::with_hooks(source, options, Arc::new(hooks))
    }

    /// Parser using a caller-built registry. The registry's plugins are used
    /// as given; `options.plugins` only gates plugin-specific syntax checks.
    pub fn with_hooks(
        source: impl Into<Arc<str>>,
        options: ParserOptions,
        hooks: Arc<HookRegistry>,
    ) -> PResult<Self> {
        let scanner = ScannerState::new(source);
        let capacity = scanner.text().len() / BYTES_PER_NODE_ESTIMATE;
        let mut context_flags = ContextFlags::empty();
        let strict = options
            .strict_mode
            .unwrap_or_else(|| options.source_type.is_module());
        context_flags.set(ContextFlags::STRICT, strict);
        let tokens = options.tokens.then(Vec::new);
        let mut state = Self {
            scanner,
            options,
            hooks,
            arena: NodeArena::with_capacity(capacity),
            context_flags,
            labels: FxHashMap::default(),
            prev_token_end: 0,
            prev_token_end_loc: Position::new(1, 0),
            recursion_depth: 0,
            speculation_depth: 0,
            tokens,
            stats: SpeculationStats::default(),
            allow_anonymous_default: false,
        };
        state.scanner.scan()?;
        Ok(state)
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    #[must_use]
    pub fn scanner(&self) -> &ScannerState {
        &self.scanner
    }

    #[must_use]
    pub fn stats(&self) -> SpeculationStats {
        self.stats
    }

    #[must_use]
    pub fn context_flags(&self) -> ContextFlags {
        self.context_flags
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.context_flags.contains(ContextFlags::STRICT)
    }

    pub fn into_parts(mut self) -> ParserParts {
        ParserParts {
            comments: self.scanner.take_comments(),
            tokens: self.tokens.unwrap_or_default(),
            arena: self.arena,
        }
    }

    /// Dispatch to the head of rule `R`'s hook chain.
    pub fn call<R: Rule>(&mut self, args: R::Args) -> PResult<R::Output> {
        let head = self.hooks.head::<R>();
        head(self, args)
    }

    // =========================================================================
    // Token access
    // =========================================================================

    #[inline]
    #[must_use]
    pub fn token(&self) -> SyntaxKind {
        self.scanner.get_token()
    }

    #[inline]
    #[must_use]
    pub fn token_value(&self) -> &str {
        self.scanner.get_token_value()
    }

    /// Raw source text of the current token.
    #[inline]
    #[must_use]
    pub fn token_text(&self) -> &str {
        self.scanner.get_token_text()
    }

    #[inline]
    #[must_use]
    pub fn token_pos(&self) -> u32 {
        self.scanner.get_token_start()
    }

    #[inline]
    #[must_use]
    pub fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    #[inline]
    #[must_use]
    pub fn token_loc_start(&self) -> Position {
        self.scanner.token().loc.start
    }

    #[inline]
    #[must_use]
    pub fn token_flags(&self) -> TokenFlags {
        self.scanner.get_token_flags()
    }

    #[inline]
    #[must_use]
    pub fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    #[inline]
    #[must_use]
    pub fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    /// Identifier spelled exactly `word`, with no escapes.
    #[must_use]
    pub fn is_contextual(&self, word: &str) -> bool {
        self.is_token(SyntaxKind::Identifier)
            && self.token_value() == word
            && !self.token_flags().contains(TokenFlags::UNICODE_ESCAPE)
    }

    /// Advance to the next token, recording the end of the one left behind.
    pub fn next_token(&mut self) -> PResult<SyntaxKind> {
        let current = self.scanner.token();
        self.prev_token_end = current.end;
        self.prev_token_end_loc = current.loc.end;
        if let Some(tokens) = &mut self.tokens
            && current.kind != SyntaxKind::Unknown
            && current.kind != SyntaxKind::EndOfFileToken
        {
            tokens.push(current.clone());
        }
        Ok(self.scanner.scan()?)
    }

    /// Consume the current token if it is `kind`.
    pub fn parse_optional(&mut self, kind: SyntaxKind) -> PResult<bool> {
        if self.is_token(kind) {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume `kind` or fail with "'x' expected".
    pub fn parse_expected(&mut self, kind: SyntaxKind) -> PResult<()> {
        if self.is_token(kind) {
            self.next_token()?;
            return Ok(());
        }
        Err(self.expected_error(token_to_string(kind).unwrap_or("token")))
    }

    pub fn eat_contextual(&mut self, word: &str) -> PResult<bool> {
        if self.is_contextual(word) {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn expect_contextual(&mut self, word: &str) -> PResult<()> {
        if self.eat_contextual(word)? {
            Ok(())
        } else {
            Err(self.expected_error(word))
        }
    }

    /// Kind of the token after the current one. A lexical error in the
    /// peeked token reads as `Unknown`.
    pub fn look_ahead_token(&mut self) -> SyntaxKind {
        self.peek_token().map_or(SyntaxKind::Unknown, |token| token.kind)
    }

    /// The token after the current one, scanned under the current contexts.
    pub fn peek_token(&mut self) -> Option<Token> {
        let saved = self.scanner.save_state();
        let peeked = self.scanner.scan().ok().map(|_| self.scanner.token().clone());
        self.scanner.restore_state(saved);
        peeked
    }

    /// Consume one `>` closing a type argument or parameter list, splitting
    /// `>>`, `>=` and friends so the remainder stays in the stream.
    pub fn expect_greater_than(&mut self) -> PResult<()> {
        self.scanner.split_greater_token();
        self.parse_expected(SyntaxKind::GreaterThanToken)
    }

    /// Whether a statement may end here without a `;`.
    #[must_use]
    pub fn can_insert_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Statement terminator with automatic semicolon insertion.
    pub fn semicolon(&mut self) -> PResult<()> {
        if self.parse_optional(SyntaxKind::SemicolonToken)? || self.can_insert_semicolon() {
            return Ok(());
        }
        Err(self.expected_error(";"))
    }

    // =========================================================================
    // Lexical contexts
    // =========================================================================

    pub fn push_context(&mut self, context: LexicalContext) {
        trace!(?context, pos = self.token_pos(), "push lexical context");
        self.scanner.push_context(context);
    }

    /// Pop `context`. Leaving a type position re-scans the current token,
    /// which was read in type mode.
    pub fn pop_context(&mut self, context: LexicalContext) -> PResult<()> {
        trace!(?context, pos = self.token_pos(), "pop lexical context");
        self.scanner.pop_context(context)?;
        if context == LexicalContext::TypePosition {
            self.scanner.re_scan_current_token()?;
        }
        Ok(())
    }

    /// Consume `{` and open `context` for the tokens it encloses.
    pub(crate) fn open_brace(&mut self, context: LexicalContext) -> PResult<()> {
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            return Err(self.expected_error("{"));
        }
        self.push_context(context);
        self.next_token()?;
        Ok(())
    }

    /// Close `context` and consume `}`; the token after it is scanned in
    /// the enclosing mode.
    pub(crate) fn close_brace(&mut self, context: LexicalContext) -> PResult<()> {
        self.pop_context(context)?;
        self.parse_expected(SyntaxKind::CloseBraceToken)
    }

    // =========================================================================
    // Node lifecycle
    // =========================================================================

    /// Start a node at the current token.
    pub fn start_node(&mut self) -> NodeBuilder {
        let pos = self.token_pos();
        let loc = self.token_loc_start();
        self.arena.reserve(pos, loc)
    }

    /// Start a node at an already consumed position.
    pub fn start_node_at(&mut self, pos: u32, loc: Position) -> NodeBuilder {
        self.arena.reserve(pos, loc)
    }

    /// Start a node where a finished node starts.
    pub fn start_node_at_node(&mut self, node: NodeIndex) -> NodeBuilder {
        match self.arena.get(node) {
            Some(existing) => {
                let (pos, loc) = (existing.pos, existing.loc.start);
                self.arena.reserve(pos, loc)
            }
            None => self.start_node(),
        }
    }

    /// Finish a node at the end of the previous token.
    pub fn finish_node(&mut self, builder: NodeBuilder, data: NodeData) -> PResult<NodeIndex> {
        let (end, end_loc) = (self.prev_token_end, self.prev_token_end_loc);
        self.finish_node_at(builder, data, end, end_loc)
    }

    pub fn finish_node_at(
        &mut self,
        builder: NodeBuilder,
        data: NodeData,
        end: u32,
        end_loc: Position,
    ) -> PResult<NodeIndex> {
        Ok(self.arena.finish(builder, data, end, end_loc)?)
    }

    /// New node with `node`'s span and `data`. Finished nodes are never
    /// mutated; conversions and decorations go through here.
    pub(crate) fn rebuild_node(&mut self, node: NodeIndex, data: NodeData) -> PResult<NodeIndex> {
        let Some(existing) = self.arena.get(node) else {
            return Err(ContractViolation::UnknownBuilder { index: node.0 }.into());
        };
        let (pos, end, loc) = (existing.pos, existing.end, existing.loc);
        let builder = self.arena.reserve(pos, loc.start);
        self.finish_node_at(builder, data, end, loc.end)
    }

    /// Rebuild a binding with a type annotation attached, extending its span
    /// to the end of the annotation. Non-binding nodes come back unchanged.
    pub fn with_type_annotation(
        &mut self,
        node: NodeIndex,
        annotation: NodeIndex,
        optional: bool,
    ) -> PResult<NodeIndex> {
        let Some(existing) = self.arena.get(node) else {
            return Ok(node);
        };
        let data = match existing.data.clone() {
            NodeData::Identifier { name, .. } => NodeData::Identifier {
                name,
                optional,
                type_annotation: Some(annotation),
            },
            NodeData::ObjectPattern { properties, .. } => NodeData::ObjectPattern {
                properties,
                type_annotation: Some(annotation),
            },
            NodeData::ArrayPattern { elements, .. } => NodeData::ArrayPattern {
                elements,
                type_annotation: Some(annotation),
            },
            NodeData::RestElement { argument, .. } => NodeData::RestElement {
                argument,
                type_annotation: Some(annotation),
            },
            _ => return Ok(node),
        };
        let builder = self.start_node_at_node(node);
        self.finish_node(builder, data)
    }

    /// Mark an identifier binding optional (`x?`) without an annotation.
    pub(crate) fn with_optional_marker(&mut self, node: NodeIndex) -> PResult<NodeIndex> {
        match self.arena.data(node).cloned() {
            Some(NodeData::Identifier {
                name,
                type_annotation,
                ..
            }) => {
                let builder = self.start_node_at_node(node);
                self.finish_node(
                    builder,
                    NodeData::Identifier {
                        name,
                        optional: true,
                        type_annotation,
                    },
                )
            }
            _ => Ok(node),
        }
    }

    /// Contract check at the end of a successful parse: every started
    /// node was finished.
    pub(crate) fn check_all_finished(&self) -> PResult<()> {
        match self.arena.first_pending() {
            Some(first) => Err(ContractViolation::UnfinishedNodes {
                count: self.arena.pending_count(),
                first: first.0,
            }
            .into()),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    pub(crate) fn error_at(&self, pos: u32, code: u32, args: &[&str]) -> ParseError {
        ParseError::Syntax(SyntaxError {
            code,
            message: message_for(code, args),
            pos,
            loc: self.scanner.position_of(pos),
        })
    }

    /// Non-recoverable error for input nested past `limit`.
    pub(crate) fn limit_error(&self, limit: &str) -> ParseError {
        ParseError::Limit(SyntaxError {
            code: diagnostic_codes::MAXIMUM_NESTING_DEPTH_EXCEEDED,
            message: format!(
                "{} ({limit})",
                message_for(diagnostic_codes::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[])
            ),
            pos: self.token_pos(),
            loc: self.token_loc_start(),
        })
    }

    /// Error at the current token.
    pub(crate) fn error(&self, code: u32, args: &[&str]) -> ParseError {
        self.error_at(self.token_pos(), code, args)
    }

    pub(crate) fn expected_error(&self, what: &str) -> ParseError {
        if self.is_token(SyntaxKind::EndOfFileToken) {
            return self.error(diagnostic_codes::UNEXPECTED_END_OF_TEXT, &[]);
        }
        self.error(diagnostic_codes::EXPECTED, &[what])
    }

    pub(crate) fn unexpected(&self) -> ParseError {
        if self.is_token(SyntaxKind::EndOfFileToken) {
            return self.error(diagnostic_codes::UNEXPECTED_END_OF_TEXT, &[]);
        }
        self.error(diagnostic_codes::UNEXPECTED_TOKEN, &[])
    }

    /// Fail unless the configured target includes `required`.
    pub(crate) fn check_target(&self, required: ScriptTarget, feature: &str) -> PResult<()> {
        if self.options.target.supports(required) {
            return Ok(());
        }
        Err(self.error(
            diagnostic_codes::SYNTAX_REQUIRES_TARGET,
            &[feature, self.options.target.as_str()],
        ))
    }

    /// Reject names a binding may not use in the current context.
    pub(crate) fn check_binding_name(&self, name: &str, pos: u32) -> PResult<()> {
        if self.is_strict() {
            if name == "eval" || name == "arguments" {
                return Err(self.error_at(pos, diagnostic_codes::INVALID_USE_IN_STRICT_MODE, &[name]));
            }
            if STRICT_RESERVED_WORDS.contains(&name) {
                return Err(self.error_at(
                    pos,
                    diagnostic_codes::RESERVED_WORD_IN_STRICT_MODE,
                    &[name],
                ));
            }
        }
        self.check_identifier_reference(name, pos)
    }

    pub(crate) fn check_identifier_reference(&self, name: &str, pos: u32) -> PResult<()> {
        let reserved = match name {
            "yield" => self.has_context(ContextFlags::IN_GENERATOR) || self.is_strict(),
            "await" => {
                self.context_flags.contains(ContextFlags::IN_ASYNC)
                    || (self.options.source_type.is_module()
                        && !self.context_flags.contains(ContextFlags::IN_FUNCTION))
            }
            _ => self.is_strict() && STRICT_RESERVED_WORDS.contains(&name),
        };
        if reserved {
            return Err(self.error_at(
                pos,
                diagnostic_codes::RESERVED_WORD_CANNOT_BE_USED_HERE,
                &[name],
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Context helpers
    // =========================================================================

    #[inline]
    pub(crate) fn has_context(&self, flags: ContextFlags) -> bool {
        self.context_flags.contains(flags)
    }

    /// Run `f` with `set` added and `clear` removed from the context flags,
    /// restoring them afterwards.
    pub(crate) fn with_context<T>(
        &mut self,
        set: ContextFlags,
        clear: ContextFlags,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let saved = self.context_flags;
        self.context_flags.remove(clear);
        self.context_flags.insert(set);
        let result = f(self);
        self.context_flags = saved;
        result
    }

    /// Run `f` as the inside of a function: fresh label set, no enclosing
    /// loop or switch, and the function's own async/generator status.
    pub(crate) fn with_function_context<T>(
        &mut self,
        is_async: bool,
        is_generator: bool,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let saved_labels = std::mem::take(&mut self.labels);
        let mut set = ContextFlags::IN_FUNCTION;
        set.set(ContextFlags::IN_ASYNC, is_async);
        set.set(ContextFlags::IN_GENERATOR, is_generator);
        let clear = ContextFlags::NO_IN
            | ContextFlags::IN_ITERATION
            | ContextFlags::IN_SWITCH
            | ContextFlags::IN_ASYNC
            | ContextFlags::IN_GENERATOR;
        let result = self.with_context(set, clear, f);
        self.labels = saved_labels;
        result
    }

    /// Bound the nesting of recursive rules.
    pub(crate) fn with_recursion_guard<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            return Err(self.limit_error("recursion"));
        }
        self.recursion_depth += 1;
        let result = f(self);
        self.recursion_depth -= 1;
        result
    }
}
