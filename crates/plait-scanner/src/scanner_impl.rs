//! Scanner state machine.
//!
//! `ScannerState` produces one token per `scan()` call. The mode used for
//! each token comes from the top of the lexical context stack, which grammar
//! rules drive through `push_context` / `pop_context`. The whole mutable
//! state is captured by `save_state` so speculative parses can rewind.

use crate::char_codes::{
    LINE_SEPARATOR, PARAGRAPH_SEPARATOR, decode_jsx_entity, is_identifier_part,
    is_identifier_start, is_line_terminator, is_octal_digit, is_white_space_single_line,
};
use crate::context::{ContextError, LexicalContext};
use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use crate::token::{Comment, CommentKind, Token, TokenFlags};
use plait_common::diagnostics::{diagnostic_codes, message_for};
use plait_common::limits::CONTEXT_STACK_CAPACITY;
use plait_common::{LineMap, Position, SourceLocation, Span};
use std::sync::Arc;
use thiserror::Error;

/// A malformed token. The scanner never recovers from these.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScanError {
    pub code: u32,
    pub message: String,
    pub pos: u32,
    pub loc: Position,
}

/// Everything `restore_state` needs to rewind the scanner.
///
/// The source text and line map are immutable and not part of the snapshot.
/// Comments are captured by count and truncated on restore.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannerSnapshot {
    pos: usize,
    token: Token,
    prev_kind: SyntaxKind,
    contexts: Vec<LexicalContext>,
    last_popped: Option<LexicalContext>,
    comments_len: usize,
}

impl ScannerSnapshot {
    /// Offset the scanner will resume from.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn contexts(&self) -> &[LexicalContext] {
        &self.contexts
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EscapeKind {
    Plain,
    Octal,
    Invalid,
}

#[derive(Clone, Debug)]
pub struct ScannerState {
    text: Arc<str>,
    line_map: Arc<LineMap>,
    pos: usize,
    token: Token,
    /// Kind of the token before `token`, for re-scanning the current token.
    prev_kind: SyntaxKind,
    contexts: Vec<LexicalContext>,
    /// Context popped since the last scan; decides regex after `}`.
    last_popped: Option<LexicalContext>,
    comments: Vec<Comment>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let line_map = Arc::new(LineMap::build(&text));
        let mut scanner = Self {
            text,
            line_map,
            pos: 0,
            token: Token::initial(),
            prev_kind: SyntaxKind::Unknown,
            contexts: Vec::with_capacity(CONTEXT_STACK_CAPACITY),
            last_popped: None,
            comments: Vec::new(),
        };
        scanner.skip_hashbang();
        scanner
    }

    fn skip_hashbang(&mut self) {
        if !self.text.starts_with("#!") {
            return;
        }
        let end = self.text.find(is_line_terminator).unwrap_or(self.text.len());
        self.comments.push(Comment {
            kind: CommentKind::Line,
            span: Span::new(0, end as u32),
            text: self.text[2..end].to_string(),
        });
        self.pos = end;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    #[must_use]
    pub fn position_of(&self, offset: u32) -> Position {
        self.line_map.position_of(offset)
    }

    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[must_use]
    pub fn get_token(&self) -> SyntaxKind {
        self.token.kind
    }

    #[must_use]
    pub fn get_token_value(&self) -> &str {
        &self.token.value
    }

    #[must_use]
    pub fn get_token_start(&self) -> u32 {
        self.token.start
    }

    #[must_use]
    pub fn get_token_end(&self) -> u32 {
        self.token.end
    }

    #[must_use]
    pub fn get_token_flags(&self) -> TokenFlags {
        self.token.flags
    }

    /// Raw source text of the current token.
    #[must_use]
    pub fn get_token_text(&self) -> &str {
        self.token.span().slice(&self.text)
    }

    #[must_use]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token.has_preceding_line_break()
    }

    /// Offset where the next scan starts.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    // =========================================================================
    // Lexical context stack
    // =========================================================================

    #[must_use]
    pub fn contexts(&self) -> &[LexicalContext] {
        &self.contexts
    }

    #[must_use]
    pub fn current_context(&self) -> Option<LexicalContext> {
        self.contexts.last().copied()
    }

    #[must_use]
    pub fn in_type_position(&self) -> bool {
        self.current_context() == Some(LexicalContext::TypePosition)
    }

    pub fn push_context(&mut self, context: LexicalContext) {
        self.contexts.push(context);
    }

    /// Pop `expected`, which must be the innermost open context.
    pub fn pop_context(&mut self, expected: LexicalContext) -> Result<(), ContextError> {
        match self.contexts.last().copied() {
            Some(found) if found == expected => {
                self.contexts.pop();
                self.last_popped = Some(found);
                Ok(())
            }
            Some(found) => Err(ContextError::Mismatch { expected, found }),
            None => Err(ContextError::Underflow { expected }),
        }
    }

    // =========================================================================
    // Save / restore
    // =========================================================================

    #[must_use]
    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token.clone(),
            prev_kind: self.prev_kind,
            contexts: self.contexts.clone(),
            last_popped: self.last_popped,
            comments_len: self.comments.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.prev_kind = snapshot.prev_kind;
        self.contexts = snapshot.contexts;
        self.last_popped = snapshot.last_popped;
        self.comments.truncate(snapshot.comments_len);
    }

    // =========================================================================
    // Scanning entry points
    // =========================================================================

    /// Scan the next token and make it current.
    pub fn scan(&mut self) -> Result<SyntaxKind, ScanError> {
        let prev = self.token.kind;
        let closed = self.last_popped.take();
        self.prev_kind = prev;
        self.scan_token(prev, closed)
    }

    /// Scan the current token again under the current context stack.
    ///
    /// Used after leaving a type position: the token following a type was
    /// scanned in type mode and may be a reserved word in the outer mode.
    pub fn re_scan_current_token(&mut self) -> Result<SyntaxKind, ScanError> {
        if self.token.kind == SyntaxKind::EndOfFileToken {
            return Ok(SyntaxKind::EndOfFileToken);
        }
        let line_break = self.token.flags & TokenFlags::PRECEDING_LINE_BREAK;
        self.pos = self.token.start as usize;
        let kind = self.scan_token(self.prev_kind, None)?;
        self.token.flags |= line_break;
        Ok(kind)
    }

    /// Re-scan a `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> Result<SyntaxKind, ScanError> {
        if matches!(
            self.token.kind,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
        ) {
            let flags = self.token.flags;
            let start = self.token.start as usize;
            return self.scan_regex(start, flags);
        }
        Ok(self.token.kind)
    }

    /// Split one `>` off the front of the current token.
    ///
    /// `>>`, `>>>`, `>=`, `>>=` and `>>>=` become a single `>`; the cursor
    /// rewinds so the remainder is scanned as the following token. Returns
    /// false when the current token does not start with `>` or already is a
    /// lone `>`.
    pub fn split_greater_token(&mut self) -> bool {
        match self.token.kind {
            SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::GreaterThanGreaterThanEqualsToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => {
                let start = self.token.start as usize;
                let flags = self.token.flags;
                self.pos = start + 1;
                self.finish_token(SyntaxKind::GreaterThanToken, start, ">".to_string(), flags);
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Token dispatch
    // =========================================================================

    fn scan_token(
        &mut self,
        prev: SyntaxKind,
        closed: Option<LexicalContext>,
    ) -> Result<SyntaxKind, ScanError> {
        let mut flags = TokenFlags::empty();
        match self.current_context() {
            Some(LexicalContext::JsxChildren) => return self.scan_jsx_child(),
            Some(LexicalContext::JsxTag) => {
                self.skip_trivia(&mut flags)?;
                return self.scan_jsx_tag_token(flags);
            }
            _ => {}
        }

        self.skip_trivia(&mut flags)?;
        let start = self.pos;
        let Some(ch) = self.char_at(start) else {
            return Ok(self.finish_token(SyntaxKind::EndOfFileToken, start, String::new(), flags));
        };

        match ch {
            '`' => self.scan_template(start, flags),
            '}' if self.current_context() == Some(LexicalContext::TemplateSubstitution) => {
                self.scan_template(start, flags)
            }
            '"' | '\'' => self.scan_string(start, ch, flags),
            '0'..='9' => self.scan_number(start, flags),
            '.' if self.byte_at(start + 1).is_some_and(|b| b.is_ascii_digit()) => {
                self.scan_number(start, flags)
            }
            '/' if regex_allowed_after(prev, closed) => self.scan_regex(start, flags),
            '#' => self.scan_private_identifier(start, flags),
            '\\' => self.scan_identifier(start, flags),
            c if is_identifier_start(c) => self.scan_identifier(start, flags),
            _ => self.scan_punctuation(start, flags),
        }
    }

    fn finish_token(
        &mut self,
        kind: SyntaxKind,
        start: usize,
        value: String,
        flags: TokenFlags,
    ) -> SyntaxKind {
        let end = self.pos;
        self.token = Token {
            kind,
            value,
            start: start as u32,
            end: end as u32,
            loc: SourceLocation::new(
                self.line_map.position_of(start as u32),
                self.line_map.position_of(end as u32),
            ),
            flags,
        };
        kind
    }

    fn error(&self, code: u32, pos: usize, args: &[&str]) -> ScanError {
        ScanError {
            code,
            message: message_for(code, args),
            pos: pos as u32,
            loc: self.line_map.position_of(pos as u32),
        }
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..)?.chars().next()
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn skip_trivia(&mut self, flags: &mut TokenFlags) -> Result<(), ScanError> {
        while let Some(ch) = self.char_at(self.pos) {
            if is_line_terminator(ch) {
                flags.insert(TokenFlags::PRECEDING_LINE_BREAK);
                self.pos += ch.len_utf8();
            } else if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '/' && self.byte_at(self.pos + 1) == Some(b'/') {
                self.skip_line_comment();
            } else if ch == '/' && self.byte_at(self.pos + 1) == Some(b'*') {
                if self.skip_block_comment()? {
                    flags.insert(TokenFlags::PRECEDING_LINE_BREAK);
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn skip_line_comment(&mut self) {
        let start = self.pos;
        let body_start = start + 2;
        let end = self.text[body_start..]
            .find(is_line_terminator)
            .map_or(self.text.len(), |offset| body_start + offset);
        self.comments.push(Comment {
            kind: CommentKind::Line,
            span: Span::new(start as u32, end as u32),
            text: self.text[body_start..end].to_string(),
        });
        self.pos = end;
    }

    /// Returns whether the comment spans a line break.
    fn skip_block_comment(&mut self) -> Result<bool, ScanError> {
        let start = self.pos;
        let body_start = start + 2;
        let Some(offset) = self.text[body_start..].find("*/") else {
            return Err(self.error(
                diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                self.text.len(),
                &[],
            ));
        };
        let body_end = body_start + offset;
        let body = &self.text[body_start..body_end];
        let has_line_break = body.contains(is_line_terminator);
        self.comments.push(Comment {
            kind: CommentKind::Block,
            span: Span::new(start as u32, (body_end + 2) as u32),
            text: body.to_string(),
        });
        self.pos = body_end + 2;
        Ok(has_line_break)
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    fn scan_identifier(&mut self, start: usize, mut flags: TokenFlags) -> Result<SyntaxKind, ScanError> {
        self.pos = start;
        let (name, escaped) = self.scan_identifier_text(false)?;
        if name.is_empty() {
            return Err(self.error(diagnostic_codes::INVALID_CHARACTER, start, &[]));
        }
        if escaped {
            flags.insert(TokenFlags::UNICODE_ESCAPE);
        }
        let kind = match text_to_keyword(&name) {
            Some(keyword) if !escaped => {
                if self.in_type_position() && !keyword.is_type_position_keyword() {
                    SyntaxKind::Identifier
                } else {
                    keyword
                }
            }
            _ => SyntaxKind::Identifier,
        };
        Ok(self.finish_token(kind, start, name, flags))
    }

    fn scan_private_identifier(
        &mut self,
        start: usize,
        flags: TokenFlags,
    ) -> Result<SyntaxKind, ScanError> {
        self.pos = start + 1;
        let (name, _) = self.scan_identifier_text(false)?;
        if name.is_empty() {
            return Err(self.error(diagnostic_codes::INVALID_CHARACTER, start, &[]));
        }
        Ok(self.finish_token(SyntaxKind::PrivateIdentifier, start, name, flags))
    }

    /// Scan identifier characters from `pos`, resolving `\u` escapes.
    fn scan_identifier_text(&mut self, allow_dash: bool) -> Result<(String, bool), ScanError> {
        let mut name = String::new();
        let mut escaped = false;
        while let Some(ch) = self.char_at(self.pos) {
            let first = name.is_empty();
            if ch == '\\' {
                let escape_start = self.pos;
                if self.byte_at(self.pos + 1) != Some(b'u') {
                    return Err(self.error(diagnostic_codes::INVALID_CHARACTER, escape_start, &[]));
                }
                self.pos += 2;
                let code = self.scan_unicode_escape_body()?;
                let decoded = char::from_u32(code).filter(|&c| {
                    if first {
                        is_identifier_start(c)
                    } else {
                        is_identifier_part(c)
                    }
                });
                let Some(decoded) = decoded else {
                    return Err(self.error(diagnostic_codes::INVALID_CHARACTER, escape_start, &[]));
                };
                name.push(decoded);
                escaped = true;
            } else if (first && is_identifier_start(ch))
                || (!first && (is_identifier_part(ch) || (allow_dash && ch == '-')))
            {
                name.push(ch);
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        Ok((name, escaped))
    }

    /// Body of a `\u` escape with `pos` just past the `u`: `XXXX` or `{X...}`.
    fn scan_unicode_escape_body(&mut self) -> Result<u32, ScanError> {
        if self.byte_at(self.pos) == Some(b'{') {
            self.pos += 1;
            let digits_start = self.pos;
            let mut value: u32 = 0;
            while let Some(digit) = self.byte_at(self.pos).and_then(|b| (b as char).to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(digit);
                self.pos += 1;
            }
            if self.pos == digits_start {
                return Err(self.error(diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED, self.pos, &[]));
            }
            if value > 0x10FFFF {
                return Err(self.error(
                    diagnostic_codes::EXTENDED_UNICODE_ESCAPE_OUT_OF_RANGE,
                    digits_start,
                    &[],
                ));
            }
            if self.byte_at(self.pos) != Some(b'}') {
                return Err(self.error(
                    diagnostic_codes::UNTERMINATED_UNICODE_ESCAPE_SEQUENCE,
                    self.pos,
                    &[],
                ));
            }
            self.pos += 1;
            return Ok(value);
        }
        self.scan_hex_digits(4)
    }

    /// Exactly `count` hex digits.
    fn scan_hex_digits(&mut self, count: usize) -> Result<u32, ScanError> {
        let mut value = 0;
        for _ in 0..count {
            let Some(digit) = self.byte_at(self.pos).and_then(|b| (b as char).to_digit(16)) else {
                return Err(self.error(diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED, self.pos, &[]));
            };
            value = value * 16 + digit;
            self.pos += 1;
        }
        Ok(value)
    }

    // =========================================================================
    // Strings and templates
    // =========================================================================

    fn scan_string(
        &mut self,
        start: usize,
        quote: char,
        mut flags: TokenFlags,
    ) -> Result<SyntaxKind, ScanError> {
        self.pos = start + 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                return Err(self.error(diagnostic_codes::UNTERMINATED_STRING_LITERAL, self.pos, &[]));
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            match ch {
                '\\' => {
                    if self.scan_escape_sequence(&mut value, false)? == EscapeKind::Octal {
                        flags.insert(TokenFlags::OCTAL);
                    }
                }
                '\n' | '\r' => {
                    return Err(self.error(
                        diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                        self.pos,
                        &[],
                    ));
                }
                _ => {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
        Ok(self.finish_token(SyntaxKind::StringLiteral, start, value, flags))
    }

    /// Scan a template chunk starting at a backtick or at the `}` closing a
    /// substitution.
    fn scan_template(&mut self, start: usize, mut flags: TokenFlags) -> Result<SyntaxKind, ScanError> {
        let is_head = self.byte_at(start) == Some(b'`');
        self.pos = start + 1;
        let mut cooked = String::new();
        let kind = loop {
            let Some(ch) = self.char_at(self.pos) else {
                return Err(self.error(
                    diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                    self.pos,
                    &[],
                ));
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    break if is_head {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.byte_at(self.pos + 1) == Some(b'{') => {
                    self.pos += 2;
                    break if is_head {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => {
                    if self.scan_escape_sequence(&mut cooked, true)? == EscapeKind::Invalid {
                        flags.insert(TokenFlags::CONTAINS_INVALID_ESCAPE);
                    }
                }
                '\r' => {
                    self.pos += 1;
                    if self.byte_at(self.pos) == Some(b'\n') {
                        self.pos += 1;
                    }
                    cooked.push('\n');
                }
                _ => {
                    cooked.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        };
        Ok(self.finish_token(kind, start, cooked, flags))
    }

    /// Decode one escape with `pos` at the backslash, appending to `out`.
    ///
    /// Templates forbid octal escapes and report malformed escapes as
    /// `Invalid` instead of failing, since tagged templates accept them.
    fn scan_escape_sequence(
        &mut self,
        out: &mut String,
        in_template: bool,
    ) -> Result<EscapeKind, ScanError> {
        self.pos += 1;
        let Some(ch) = self.char_at(self.pos) else {
            return Ok(EscapeKind::Plain);
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.byte_at(self.pos).is_some_and(|b| b.is_ascii_digit()) => out.push('\0'),
            '0'..='7' => {
                if in_template {
                    return Ok(EscapeKind::Invalid);
                }
                let mut value = ch as u32 - '0' as u32;
                for _ in 0..2 {
                    match self.char_at(self.pos) {
                        Some(next) if is_octal_digit(next) => {
                            let candidate = value * 8 + (next as u32 - '0' as u32);
                            if candidate > 0xFF {
                                break;
                            }
                            value = candidate;
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
                return Ok(EscapeKind::Octal);
            }
            '8' | '9' => {
                if in_template {
                    return Ok(EscapeKind::Invalid);
                }
                out.push(ch);
                return Ok(EscapeKind::Octal);
            }
            'x' => match self.scan_hex_digits(2) {
                Ok(value) => out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)),
                Err(_) if in_template => return Ok(EscapeKind::Invalid),
                Err(err) => return Err(err),
            },
            'u' => match self.scan_unicode_escape_body() {
                Ok(code) => {
                    let code = self.combine_surrogate_pair(code);
                    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                Err(_) if in_template => return Ok(EscapeKind::Invalid),
                Err(err) => return Err(err),
            },
            '\r' => {
                if self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {}
            other => out.push(other),
        }
        Ok(EscapeKind::Plain)
    }

    /// Join `😀` style pairs into one code point.
    fn combine_surrogate_pair(&mut self, high: u32) -> u32 {
        if !(0xD800..=0xDBFF).contains(&high)
            || self.byte_at(self.pos) != Some(b'\\')
            || self.byte_at(self.pos + 1) != Some(b'u')
        {
            return high;
        }
        let saved = self.pos;
        self.pos += 2;
        match self.scan_unicode_escape_body() {
            Ok(low) if (0xDC00..=0xDFFF).contains(&low) => {
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            _ => {
                self.pos = saved;
                high
            }
        }
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    fn scan_number(&mut self, start: usize, mut flags: TokenFlags) -> Result<SyntaxKind, ScanError> {
        self.pos = start;
        let mut kind = SyntaxKind::NumericLiteral;
        let radix_marker = if self.byte_at(start) == Some(b'0') {
            self.byte_at(start + 1).map(|b| b.to_ascii_lowercase())
        } else {
            None
        };

        match radix_marker {
            Some(marker @ (b'x' | b'o' | b'b')) => {
                self.pos += 2;
                flags.insert(TokenFlags::PREFIXED_NUMBER);
                let (radix, code) = match marker {
                    b'x' => (16, diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED),
                    b'o' => (8, diagnostic_codes::OCTAL_DIGIT_EXPECTED),
                    _ => (2, diagnostic_codes::BINARY_DIGIT_EXPECTED),
                };
                if self.scan_digits(radix, &mut flags)? == 0 {
                    return Err(self.error(code, self.pos, &[]));
                }
                if self.byte_at(self.pos) == Some(b'n') {
                    self.pos += 1;
                    kind = SyntaxKind::BigIntLiteral;
                }
            }
            Some(b'0'..=b'9') => {
                // Legacy octal (`017`) or leading-zero decimal (`089`).
                self.pos += 1;
                while self.byte_at(self.pos).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
                flags.insert(TokenFlags::OCTAL);
            }
            _ => {
                self.scan_digits(10, &mut flags)?;
                let mut is_integer = true;
                if self.byte_at(self.pos) == Some(b'.') {
                    self.pos += 1;
                    is_integer = false;
                    self.scan_digits(10, &mut flags)?;
                }
                let mut has_exponent = false;
                if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
                    self.pos += 1;
                    if matches!(self.byte_at(self.pos), Some(b'+' | b'-')) {
                        self.pos += 1;
                    }
                    if self.scan_digits(10, &mut flags)? == 0 {
                        return Err(self.error(diagnostic_codes::DIGIT_EXPECTED, self.pos, &[]));
                    }
                    has_exponent = true;
                }
                if self.byte_at(self.pos) == Some(b'n') {
                    if has_exponent {
                        return Err(self.error(
                            diagnostic_codes::BIGINT_CANNOT_USE_EXPONENTIAL_NOTATION,
                            start,
                            &[],
                        ));
                    }
                    if !is_integer {
                        return Err(self.error(diagnostic_codes::BIGINT_MUST_BE_INTEGER, start, &[]));
                    }
                    self.pos += 1;
                    kind = SyntaxKind::BigIntLiteral;
                }
            }
        }

        if let Some(ch) = self.char_at(self.pos) {
            if is_identifier_start(ch) || ch.is_ascii_digit() {
                return Err(self.error(
                    diagnostic_codes::IDENTIFIER_CANNOT_FOLLOW_NUMERIC_LITERAL,
                    self.pos,
                    &[],
                ));
            }
        }
        let value = self.text[start..self.pos].to_string();
        Ok(self.finish_token(kind, start, value, flags))
    }

    /// Digits of `radix` with `_` separators. Returns the digit count.
    fn scan_digits(&mut self, radix: u32, flags: &mut TokenFlags) -> Result<u32, ScanError> {
        let mut count = 0;
        let mut prev_separator = false;
        while let Some(b) = self.byte_at(self.pos) {
            if b == b'_' {
                if prev_separator {
                    return Err(self.error(
                        diagnostic_codes::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS,
                        self.pos,
                        &[],
                    ));
                }
                if count == 0 {
                    return Err(self.error(
                        diagnostic_codes::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE,
                        self.pos,
                        &[],
                    ));
                }
                prev_separator = true;
                flags.insert(TokenFlags::CONTAINS_SEPARATOR);
            } else if (b as char).is_digit(radix) {
                count += 1;
                prev_separator = false;
            } else {
                break;
            }
            self.pos += 1;
        }
        if prev_separator {
            return Err(self.error(
                diagnostic_codes::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE,
                self.pos - 1,
                &[],
            ));
        }
        Ok(count)
    }

    // =========================================================================
    // Regular expressions
    // =========================================================================

    fn scan_regex(&mut self, start: usize, flags: TokenFlags) -> Result<SyntaxKind, ScanError> {
        self.pos = start + 1;
        let mut in_class = false;
        loop {
            let ch = match self.char_at(self.pos) {
                Some(ch) if !is_line_terminator(ch) => ch,
                _ => {
                    return Err(self.error(
                        diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                        start,
                        &[],
                    ));
                }
            };
            self.pos += ch.len_utf8();
            match ch {
                '\\' => match self.char_at(self.pos) {
                    Some(escaped) if !is_line_terminator(escaped) => self.pos += escaped.len_utf8(),
                    _ => {
                        return Err(self.error(
                            diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                            start,
                            &[],
                        ));
                    }
                },
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }

        let mut seen = String::new();
        while let Some(ch) = self.char_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            if !"dgimsuyv".contains(ch) {
                return Err(self.error(diagnostic_codes::UNKNOWN_REGULAR_EXPRESSION_FLAG, self.pos, &[]));
            }
            if seen.contains(ch) {
                return Err(self.error(
                    diagnostic_codes::DUPLICATE_REGULAR_EXPRESSION_FLAG,
                    self.pos,
                    &[],
                ));
            }
            seen.push(ch);
            self.pos += ch.len_utf8();
        }
        let value = self.text[start..self.pos].to_string();
        Ok(self.finish_token(SyntaxKind::RegularExpressionLiteral, start, value, flags))
    }

    // =========================================================================
    // Punctuation
    // =========================================================================

    fn scan_punctuation(&mut self, start: usize, flags: TokenFlags) -> Result<SyntaxKind, ScanError> {
        let at = |offset: usize| self.byte_at(start + offset).unwrap_or(0);
        let (kind, len) = match at(0) {
            b'{' => (SyntaxKind::OpenBraceToken, 1),
            b'}' => (SyntaxKind::CloseBraceToken, 1),
            b'(' => (SyntaxKind::OpenParenToken, 1),
            b')' => (SyntaxKind::CloseParenToken, 1),
            b'[' => (SyntaxKind::OpenBracketToken, 1),
            b']' => (SyntaxKind::CloseBracketToken, 1),
            b';' => (SyntaxKind::SemicolonToken, 1),
            b',' => (SyntaxKind::CommaToken, 1),
            b'~' => (SyntaxKind::TildeToken, 1),
            b'@' => (SyntaxKind::AtToken, 1),
            b':' => (SyntaxKind::ColonToken, 1),
            b'.' => {
                if at(1) == b'.' && at(2) == b'.' {
                    (SyntaxKind::DotDotDotToken, 3)
                } else {
                    (SyntaxKind::DotToken, 1)
                }
            }
            b'?' => match (at(1), at(2)) {
                (b'?', b'=') => (SyntaxKind::QuestionQuestionEqualsToken, 3),
                (b'?', _) => (SyntaxKind::QuestionQuestionToken, 2),
                // `a?.5:b` is a conditional, not optional chaining.
                (b'.', next) if !next.is_ascii_digit() => (SyntaxKind::QuestionDotToken, 2),
                _ => (SyntaxKind::QuestionToken, 1),
            },
            b'<' => match (at(1), at(2)) {
                (b'<', b'=') => (SyntaxKind::LessThanLessThanEqualsToken, 3),
                (b'<', _) => (SyntaxKind::LessThanLessThanToken, 2),
                (b'=', _) => (SyntaxKind::LessThanEqualsToken, 2),
                _ => (SyntaxKind::LessThanToken, 1),
            },
            b'>' => match (at(1), at(2), at(3)) {
                (b'>', b'>', b'=') => (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4),
                (b'>', b'>', _) => (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3),
                (b'>', b'=', _) => (SyntaxKind::GreaterThanGreaterThanEqualsToken, 3),
                (b'>', _, _) => (SyntaxKind::GreaterThanGreaterThanToken, 2),
                (b'=', _, _) => (SyntaxKind::GreaterThanEqualsToken, 2),
                _ => (SyntaxKind::GreaterThanToken, 1),
            },
            b'=' => match (at(1), at(2)) {
                (b'=', b'=') => (SyntaxKind::EqualsEqualsEqualsToken, 3),
                (b'=', _) => (SyntaxKind::EqualsEqualsToken, 2),
                (b'>', _) => (SyntaxKind::EqualsGreaterThanToken, 2),
                _ => (SyntaxKind::EqualsToken, 1),
            },
            b'!' => match (at(1), at(2)) {
                (b'=', b'=') => (SyntaxKind::ExclamationEqualsEqualsToken, 3),
                (b'=', _) => (SyntaxKind::ExclamationEqualsToken, 2),
                _ => (SyntaxKind::ExclamationToken, 1),
            },
            b'+' => match at(1) {
                b'+' => (SyntaxKind::PlusPlusToken, 2),
                b'=' => (SyntaxKind::PlusEqualsToken, 2),
                _ => (SyntaxKind::PlusToken, 1),
            },
            b'-' => match at(1) {
                b'-' => (SyntaxKind::MinusMinusToken, 2),
                b'=' => (SyntaxKind::MinusEqualsToken, 2),
                _ => (SyntaxKind::MinusToken, 1),
            },
            b'*' => match (at(1), at(2)) {
                (b'*', b'=') => (SyntaxKind::AsteriskAsteriskEqualsToken, 3),
                (b'*', _) => (SyntaxKind::AsteriskAsteriskToken, 2),
                (b'=', _) => (SyntaxKind::AsteriskEqualsToken, 2),
                _ => (SyntaxKind::AsteriskToken, 1),
            },
            b'/' => match at(1) {
                b'=' => (SyntaxKind::SlashEqualsToken, 2),
                _ => (SyntaxKind::SlashToken, 1),
            },
            b'%' => match at(1) {
                b'=' => (SyntaxKind::PercentEqualsToken, 2),
                _ => (SyntaxKind::PercentToken, 1),
            },
            b'&' => match (at(1), at(2)) {
                (b'&', b'=') => (SyntaxKind::AmpersandAmpersandEqualsToken, 3),
                (b'&', _) => (SyntaxKind::AmpersandAmpersandToken, 2),
                (b'=', _) => (SyntaxKind::AmpersandEqualsToken, 2),
                _ => (SyntaxKind::AmpersandToken, 1),
            },
            b'|' => match (at(1), at(2)) {
                (b'|', b'=') => (SyntaxKind::BarBarEqualsToken, 3),
                (b'|', _) => (SyntaxKind::BarBarToken, 2),
                (b'=', _) => (SyntaxKind::BarEqualsToken, 2),
                _ => (SyntaxKind::BarToken, 1),
            },
            b'^' => match at(1) {
                b'=' => (SyntaxKind::CaretEqualsToken, 2),
                _ => (SyntaxKind::CaretToken, 1),
            },
            _ => return Err(self.error(diagnostic_codes::INVALID_CHARACTER, start, &[])),
        };
        self.pos = start + len;
        let value = self.text[start..self.pos].to_string();
        Ok(self.finish_token(kind, start, value, flags))
    }

    // =========================================================================
    // JSX
    // =========================================================================

    /// Token inside a JSX tag: names may contain `-`, strings have no
    /// escapes, `>` and `/` never combine with what follows.
    fn scan_jsx_tag_token(&mut self, flags: TokenFlags) -> Result<SyntaxKind, ScanError> {
        let start = self.pos;
        let Some(ch) = self.char_at(start) else {
            return Ok(self.finish_token(SyntaxKind::EndOfFileToken, start, String::new(), flags));
        };
        match ch {
            '>' => {
                self.pos = start + 1;
                Ok(self.finish_token(SyntaxKind::GreaterThanToken, start, ">".to_string(), flags))
            }
            '/' => {
                self.pos = start + 1;
                Ok(self.finish_token(SyntaxKind::SlashToken, start, "/".to_string(), flags))
            }
            '"' | '\'' => {
                let body_start = start + 1;
                let Some(offset) = self.text[body_start..].find(ch) else {
                    return Err(self.error(
                        diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                        self.text.len(),
                        &[],
                    ));
                };
                let body_end = body_start + offset;
                let value = decode_jsx_entities(&self.text[body_start..body_end]);
                self.pos = body_end + 1;
                Ok(self.finish_token(SyntaxKind::StringLiteral, start, value, flags))
            }
            c if is_identifier_start(c) => {
                let (name, _) = self.scan_identifier_text(true)?;
                Ok(self.finish_token(SyntaxKind::Identifier, start, name, flags))
            }
            _ => self.scan_punctuation(start, flags),
        }
    }

    /// Token between JSX tags: `<`, `{`, or a run of text.
    fn scan_jsx_child(&mut self) -> Result<SyntaxKind, ScanError> {
        let start = self.pos;
        let flags = TokenFlags::empty();
        match self.byte_at(start) {
            None => Ok(self.finish_token(SyntaxKind::EndOfFileToken, start, String::new(), flags)),
            Some(b'<') => {
                self.pos = start + 1;
                Ok(self.finish_token(SyntaxKind::LessThanToken, start, "<".to_string(), flags))
            }
            Some(b'{') => {
                self.pos = start + 1;
                Ok(self.finish_token(SyntaxKind::OpenBraceToken, start, "{".to_string(), flags))
            }
            Some(_) => {
                let end = self.text[start..]
                    .find(['<', '{'])
                    .map_or(self.text.len(), |offset| start + offset);
                let value = decode_jsx_entities(&self.text[start..end]);
                self.pos = end;
                Ok(self.finish_token(SyntaxKind::JsxText, start, value, flags))
            }
        }
    }
}

/// Whether a `/` after `prev` starts a regular expression.
fn regex_allowed_after(prev: SyntaxKind, closed: Option<LexicalContext>) -> bool {
    match prev {
        SyntaxKind::Identifier
        | SyntaxKind::PrivateIdentifier
        | SyntaxKind::NumericLiteral
        | SyntaxKind::BigIntLiteral
        | SyntaxKind::StringLiteral
        | SyntaxKind::RegularExpressionLiteral
        | SyntaxKind::NoSubstitutionTemplateLiteral
        | SyntaxKind::TemplateTail
        | SyntaxKind::JsxText
        | SyntaxKind::CloseParenToken
        | SyntaxKind::CloseBracketToken
        | SyntaxKind::ThisKeyword
        | SyntaxKind::SuperKeyword
        | SyntaxKind::NullKeyword
        | SyntaxKind::TrueKeyword
        | SyntaxKind::FalseKeyword
        | SyntaxKind::PlusPlusToken
        | SyntaxKind::MinusMinusToken => false,
        SyntaxKind::CloseBraceToken => closed == Some(LexicalContext::BraceStatement),
        _ => true,
    }
}

fn decode_jsx_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_jsx_entity(&after[..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Numeric value of a numeric literal's source text.
///
/// Accepts everything the scanner produces: separators, radix prefixes,
/// legacy octal and a trailing bigint `n`. Bigints beyond 2^53 lose
/// precision.
#[must_use]
pub fn parse_numeric_literal_value(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let cleaned = cleaned.strip_suffix('n').unwrap_or(&cleaned);
    let bytes = cleaned.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return fold_digits(&cleaned[2..], radix);
        }
    }
    if bytes.len() > 1 && bytes[0] == b'0' && bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
        return fold_digits(&cleaned[1..], 8);
    }
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

fn fold_digits(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, digit| acc * f64::from(radix) + f64::from(digit))
}
