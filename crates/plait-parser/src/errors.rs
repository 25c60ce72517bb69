//! Parse errors.
//!
//! Lexical and syntax errors describe bad input and are recoverable: a
//! speculative attempt that hits one is rolled back. Contract violations
//! describe misuse of the parser's own protocols (node lifecycle, lexical
//! context nesting) and always propagate, as do exhausted nesting and
//! speculation limits.

use crate::options::OptionsError;
use plait_common::{Diagnostic, Position};
use plait_scanner::{ContextError, ScanError};
use std::fmt;
use thiserror::Error;

/// Malformed input at a source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub code: u32,
    pub message: String,
    pub pos: u32,
    pub loc: Position,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.loc)
    }
}

impl std::error::Error for SyntaxError {}

impl From<ScanError> for SyntaxError {
    fn from(err: ScanError) -> Self {
        Self {
            code: err.code,
            message: err.message,
            pos: err.pos,
            loc: err.loc,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("node {index} was finished twice")]
    AlreadyFinished { index: u32 },
    #[error("node {index} ends at {end}, before its start {start}")]
    EndBeforeStart { index: u32, start: u32, end: u32 },
    #[error("node builder {index} does not refer to a pending node")]
    UnknownBuilder { index: u32 },
    #[error("{count} started node(s) never finished, first is node {first}")]
    UnfinishedNodes { count: usize, first: u32 },
    #[error(transparent)]
    Context(#[from] ContextError),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{0}")]
    Lexical(SyntaxError),
    #[error("{0}")]
    Syntax(SyntaxError),
    /// Input nested past a parser limit. Never absorbed by speculation:
    /// falling back to another reading would only hide it.
    #[error("{0}")]
    Limit(SyntaxError),
    #[error("internal parser error: {0}")]
    Internal(#[from] ContractViolation),
    #[error("invalid parser options: {0}")]
    Options(#[from] OptionsError),
}

impl From<ScanError> for ParseError {
    fn from(err: ScanError) -> Self {
        ParseError::Lexical(err.into())
    }
}

impl From<ContextError> for ParseError {
    fn from(err: ContextError) -> Self {
        ParseError::Internal(err.into())
    }
}

impl ParseError {
    /// Whether speculation may absorb this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParseError::Lexical(_) | ParseError::Syntax(_))
    }

    #[must_use]
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match self {
            ParseError::Lexical(err) | ParseError::Syntax(err) | ParseError::Limit(err) => {
                Some(err)
            }
            ParseError::Internal(_) | ParseError::Options(_) => None,
        }
    }

    #[must_use]
    pub fn code(&self) -> Option<u32> {
        self.syntax_error().map(|err| err.code)
    }

    #[must_use]
    pub fn pos(&self) -> Option<u32> {
        self.syntax_error().map(|err| err.pos)
    }

    /// Convert to a diagnostic for `file`. Contract violations and option
    /// errors carry no source position and are reported at offset 0.
    #[must_use]
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        match self.syntax_error() {
            Some(err) => Diagnostic::error(file, err.pos, 0, &err.message, err.code),
            None => Diagnostic::error(file, 0, 0, &self.to_string(), 0),
        }
    }
}

pub type PResult<T> = Result<T, ParseError>;
