//! Context-sensitive tokenizer for the plait parser.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `Token`, `TokenFlags` - Scanned token records
//! - `LexicalContext` - Modes pushed by grammar rules
//! - `ScannerState` - Tokenizer state machine with save/restore

pub mod char_codes;

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, keyword_text, text_to_keyword, token_to_string};

pub mod token;
pub use token::{Comment, CommentKind, Token, TokenFlags};

pub mod context;
pub use context::{ContextError, LexicalContext};

pub mod scanner_impl;
pub use scanner_impl::{ScanError, ScannerSnapshot, ScannerState, parse_numeric_literal_value};

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod context_tests;
