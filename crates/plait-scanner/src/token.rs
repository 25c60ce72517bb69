//! Scanned token records.

use crate::SyntaxKind;
use bitflags::bitflags;
use plait_common::{SourceLocation, Span};
use serde::Serialize;

bitflags! {
    /// Facts about a token that the grammar consults after scanning.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct TokenFlags: u16 {
        /// A line terminator appeared between the previous token and this one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// Legacy octal literal (`017`) or octal escape in a string (`"\1"`).
        const OCTAL = 1 << 1;
        /// Identifier spelled with a `\u` escape; never a keyword.
        const UNICODE_ESCAPE = 1 << 2;
        /// Numeric literal containing `_` separators.
        const CONTAINS_SEPARATOR = 1 << 3;
        /// Template chunk with an escape that has no cooked value.
        const CONTAINS_INVALID_ESCAPE = 1 << 4;
        /// Numeric literal with `0x`, `0o` or `0b` prefix.
        const PREFIXED_NUMBER = 1 << 5;
    }
}

/// One token. `value` holds the cooked text: identifier names with
/// escapes resolved, string and template contents unescaped, numeric and
/// regex literals verbatim.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Token {
    pub kind: SyntaxKind,
    pub value: String,
    pub start: u32,
    pub end: u32,
    pub loc: SourceLocation,
    pub flags: TokenFlags,
}

impl Token {
    /// Placeholder before the first scan.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            kind: SyntaxKind::Unknown,
            value: String::new(),
            start: 0,
            end: 0,
            loc: SourceLocation::default(),
            flags: TokenFlags::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    #[inline]
    #[must_use]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CommentKind {
    Line,
    Block,
}

/// A comment skipped as trivia. `text` excludes the delimiters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub span: Span,
    pub text: String,
}
