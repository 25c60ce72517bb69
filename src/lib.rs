//! plait: an extensible parser for JavaScript, JSX, TypeScript and Flow.
//!
//! ```
//! use plait::{ParserOptions, Plugins, parse};
//!
//! let options = ParserOptions::module().with_plugins(Plugins::TYPESCRIPT);
//! let output = parse("let v: number = 1;", &options).unwrap();
//! assert!(output.strict);
//! ```
//!
//! The grammar lives in [`plait_parser`]; this crate wires options, the
//! plugin registry and the parser together and hands back everything a
//! consumer needs in one [`ParseOutput`].

use serde::Serialize;
use tracing::debug;

pub use plait_common::{Diagnostic, Position, ScriptTarget, SourceType, diagnostic_codes};
pub use plait_parser::{
    HookRegistry, NodeArena, NodeData, NodeIndex, ParseError, ParserOptions, ParserPlugin,
    ParserState, Plugins,
};
pub use plait_scanner::{Comment, Token};

pub mod tracing_config;

/// Result of a successful parse.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutput {
    /// Root node: a `Program` for [`parse`], the expression for
    /// [`parse_expression`].
    pub program: NodeIndex,
    #[serde(skip)]
    pub arena: NodeArena,
    /// Every token consumed, in order. Empty unless `options.tokens` is set.
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
    pub source_type: SourceType,
    /// Strictness at the end of the parse: module code, `strictMode`, or a
    /// top-level `"use strict"` directive.
    pub strict: bool,
}

impl ParseOutput {
    fn from_parser(parser: ParserState, root: NodeIndex) -> Self {
        let source_type = parser.options().source_type;
        let strict = parser.is_strict();
        let parts = parser.into_parts();
        Self {
            program: root,
            arena: parts.arena,
            tokens: parts.tokens,
            comments: parts.comments,
            source_type,
            strict,
        }
    }

    /// Data of the root node.
    #[must_use]
    pub fn root(&self) -> Option<&NodeData> {
        self.arena.data(self.program)
    }
}

/// Parse `source` as a complete program.
pub fn parse(source: &str, options: &ParserOptions) -> Result<ParseOutput, ParseError> {
    let mut parser = ParserState::new(source, options.clone())?;
    let program = parser.parse_program().inspect_err(|err| {
        debug!(file = options.file_name(), %err, "parse failed");
    })?;
    Ok(ParseOutput::from_parser(parser, program))
}

/// Parse `source` as a single expression that must span the whole input.
pub fn parse_expression(
    source: &str,
    options: &ParserOptions,
) -> Result<ParseOutput, ParseError> {
    let mut parser = ParserState::new(source, options.clone())?;
    let expression = parser.parse_standalone_expression().inspect_err(|err| {
        debug!(file = options.file_name(), %err, "expression parse failed");
    })?;
    Ok(ParseOutput::from_parser(parser, expression))
}
