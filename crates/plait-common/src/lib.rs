//! Common types and utilities for the plait parser.
//!
//! This crate provides foundational types used across all plait crates:
//! - Common enums (`ScriptTarget`, `SourceType`)
//! - Source spans (`Span`)
//! - Position types for line/column source locations (`LineMap`, `Position`)
//! - Diagnostics and diagnostic codes
//! - Parser limits

// Common types - dialect and target selection shared by scanner and parser
pub mod common;
pub use common::{ScriptTarget, SourceType};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, SourceLocation};

// Diagnostics
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes, format_message};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod position_tests;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
