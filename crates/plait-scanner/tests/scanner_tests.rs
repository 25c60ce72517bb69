//! Tests for the tokenizer.

use crate::{
    CommentKind, LexicalContext, ScannerState, SyntaxKind, TokenFlags, parse_numeric_literal_value,
};
use plait_common::diagnostic_codes;

fn scan_kinds(text: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(text);
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan().expect("scan failed");
        if kind == SyntaxKind::EndOfFileToken {
            return kinds;
        }
        kinds.push(kind);
    }
}

fn scan_single(text: &str) -> ScannerState {
    let mut scanner = ScannerState::new(text);
    scanner.scan().expect("scan failed");
    scanner
}

fn scan_error_code(text: &str) -> u32 {
    let mut scanner = ScannerState::new(text);
    loop {
        match scanner.scan() {
            Ok(SyntaxKind::EndOfFileToken) => panic!("expected a scan error for {text:?}"),
            Ok(_) => {}
            Err(err) => return err.code,
        }
    }
}

// =============================================================================
// Punctuation and identifiers
// =============================================================================

#[test]
fn test_scan_longest_punctuation_match() {
    assert_eq!(
        scan_kinds("a >>>= b ?? c ?.d ... **="),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::AsteriskAsteriskEqualsToken,
        ]
    );
}

#[test]
fn test_scan_question_dot_before_digit_is_conditional() {
    assert_eq!(
        scan_kinds("a?.5:b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_scan_reserved_and_contextual_words() {
    assert_eq!(
        scan_kinds("if let yield of typeof"),
        vec![
            SyntaxKind::IfKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::TypeOfKeyword,
        ]
    );
}

#[test]
fn test_scan_unicode_escaped_identifier_is_never_keyword() {
    let scanner = scan_single("\\u0069f");
    assert_eq!(scanner.get_token(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "if");
    assert!(scanner.get_token_flags().contains(TokenFlags::UNICODE_ESCAPE));
}

#[test]
fn test_scan_non_ascii_identifier() {
    let scanner = scan_single("caf\u{e9} ");
    assert_eq!(scanner.get_token(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "caf\u{e9}");
    assert_eq!(scanner.get_token_end(), 5);
}

#[test]
fn test_scan_private_identifier() {
    let scanner = scan_single("#secret");
    assert_eq!(scanner.get_token(), SyntaxKind::PrivateIdentifier);
    assert_eq!(scanner.get_token_value(), "secret");
    assert_eq!(scanner.get_token_text(), "#secret");
}

#[test]
fn test_scan_invalid_character() {
    assert_eq!(scan_error_code("a \u{a7} b"), diagnostic_codes::INVALID_CHARACTER);
}

#[test]
fn test_scan_token_positions() {
    let mut scanner = ScannerState::new("let\n  value");
    scanner.scan().unwrap();
    scanner.scan().unwrap();
    assert_eq!(scanner.get_token_start(), 6);
    assert_eq!(scanner.get_token_end(), 11);
    assert_eq!(scanner.token().loc.start.line, 2);
    assert_eq!(scanner.token().loc.start.column, 2);
    assert!(scanner.has_preceding_line_break());
}

// =============================================================================
// Type position
// =============================================================================

#[test]
fn test_scan_type_position_reserved_words_become_identifiers() {
    let mut scanner = ScannerState::new("void null typeof this");
    scanner.push_context(LexicalContext::TypePosition);
    let mut kinds = Vec::new();
    while scanner.scan().unwrap() != SyntaxKind::EndOfFileToken {
        kinds.push(scanner.get_token());
    }
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::TypeOfKeyword,
            SyntaxKind::ThisKeyword,
        ]
    );
}

#[test]
fn test_re_scan_current_token_after_leaving_type_position() {
    let mut scanner = ScannerState::new("a\nin b");
    scanner.scan().unwrap();
    scanner.push_context(LexicalContext::TypePosition);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    scanner.pop_context(LexicalContext::TypePosition).unwrap();
    assert_eq!(scanner.re_scan_current_token().unwrap(), SyntaxKind::InKeyword);
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
}

// =============================================================================
// Splitting `>` tokens
// =============================================================================

#[test]
fn test_split_greater_than_greater_than() {
    let mut scanner = ScannerState::new("a>>b");
    scanner.scan().unwrap();
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::GreaterThanGreaterThanToken);
    assert!(scanner.split_greater_token());
    assert_eq!(scanner.get_token(), SyntaxKind::GreaterThanToken);
    assert_eq!(scanner.get_token_start(), 1);
    assert_eq!(scanner.get_token_end(), 2);

    assert_eq!(scanner.scan().unwrap(), SyntaxKind::GreaterThanToken);
    assert_eq!(scanner.get_token_start(), 2);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "b");
}

#[test]
fn test_split_unsigned_shift_assignment_repeatedly() {
    let mut scanner = ScannerState::new(">>>=");
    assert_eq!(
        scanner.scan().unwrap(),
        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
    );
    assert!(scanner.split_greater_token());
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::GreaterThanGreaterThanEqualsToken);
    assert!(scanner.split_greater_token());
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::GreaterThanEqualsToken);
    assert!(scanner.split_greater_token());
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::EqualsToken);
}

#[test]
fn test_split_lone_greater_than_is_noop() {
    let mut scanner = ScannerState::new("> x");
    scanner.scan().unwrap();
    assert!(!scanner.split_greater_token());
    assert_eq!(scanner.get_token_end(), 1);

    let mut scanner = ScannerState::new("x");
    scanner.scan().unwrap();
    assert!(!scanner.split_greater_token());
}

// =============================================================================
// Regular expressions
// =============================================================================

#[test]
fn test_scan_divide_after_operand() {
    assert_eq!(
        scan_kinds("a / b / (c) / 2"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::SlashToken,
            SyntaxKind::Identifier,
            SyntaxKind::SlashToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::SlashToken,
            SyntaxKind::NumericLiteral,
        ]
    );
}

#[test]
fn test_scan_regex_after_operator() {
    let mut scanner = ScannerState::new("x = /ab+c/gi;");
    scanner.scan().unwrap();
    scanner.scan().unwrap();
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(scanner.get_token_value(), "/ab+c/gi");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::SemicolonToken);
}

#[test]
fn test_scan_regex_slash_inside_class() {
    let scanner = scan_single("/[/]\\//");
    assert_eq!(scanner.get_token(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(scanner.get_token_value(), "/[/]\\//");
}

#[test]
fn test_re_scan_slash_token_as_regex() {
    let mut scanner = ScannerState::new("a /x/g");
    scanner.scan().unwrap();
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::SlashToken);
    assert_eq!(scanner.re_scan_slash_token().unwrap(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(scanner.get_token_value(), "/x/g");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_regex_after_block_close_brace() {
    let mut scanner = ScannerState::new("{}/foo/");
    scanner.scan().unwrap();
    scanner.push_context(LexicalContext::BraceStatement);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::CloseBraceToken);
    scanner.pop_context(LexicalContext::BraceStatement).unwrap();
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::RegularExpressionLiteral);
}

#[test]
fn test_scan_divide_after_object_close_brace() {
    let mut scanner = ScannerState::new("{}/foo/");
    scanner.scan().unwrap();
    scanner.push_context(LexicalContext::BraceExpression);
    scanner.scan().unwrap();
    scanner.pop_context(LexicalContext::BraceExpression).unwrap();
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::SlashToken);
}

#[test]
fn test_scan_regex_errors() {
    assert_eq!(
        scan_error_code("/abc"),
        diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL
    );
    assert_eq!(
        scan_error_code("/a/x"),
        diagnostic_codes::UNKNOWN_REGULAR_EXPRESSION_FLAG
    );
    assert_eq!(
        scan_error_code("/a/gg"),
        diagnostic_codes::DUPLICATE_REGULAR_EXPRESSION_FLAG
    );
}

// =============================================================================
// Strings and templates
// =============================================================================

#[test]
fn test_scan_string_escapes() {
    assert_eq!(scan_single(r"'a\tb\x41'").get_token_value(), "a\tbA");
    assert_eq!(scan_single(r#""\u{1F600}""#).get_token_value(), "\u{1F600}");
    assert_eq!(scan_single(r"'\uD83D\uDE00'").get_token_value(), "\u{1F600}");
    assert_eq!(scan_single("'a\\\nb'").get_token_value(), "ab");
}

#[test]
fn test_scan_string_legacy_octal_escape() {
    let scanner = scan_single(r"'\101'");
    assert_eq!(scanner.get_token_value(), "A");
    assert!(scanner.get_token_flags().contains(TokenFlags::OCTAL));
}

#[test]
fn test_scan_string_errors() {
    assert_eq!(scan_error_code("'abc"), diagnostic_codes::UNTERMINATED_STRING_LITERAL);
    assert_eq!(scan_error_code("'ab\ncd'"), diagnostic_codes::UNTERMINATED_STRING_LITERAL);
    assert_eq!(scan_error_code(r"'\xZZ'"), diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED);
    assert_eq!(
        scan_error_code(r"'\u{110000}'"),
        diagnostic_codes::EXTENDED_UNICODE_ESCAPE_OUT_OF_RANGE
    );
}

#[test]
fn test_scan_template_with_substitutions() {
    let mut scanner = ScannerState::new("`a${b}c${d}e`");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::TemplateHead);
    assert_eq!(scanner.get_token_value(), "a");
    scanner.push_context(LexicalContext::TemplateSubstitution);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::TemplateMiddle);
    assert_eq!(scanner.get_token_value(), "c");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::TemplateTail);
    assert_eq!(scanner.get_token_value(), "e");
    scanner.pop_context(LexicalContext::TemplateSubstitution).unwrap();
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_template_cooked_value() {
    let scanner = scan_single("`x\\n\r\ny`");
    assert_eq!(scanner.get_token(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.get_token_value(), "x\n\ny");
}

#[test]
fn test_scan_template_invalid_escape_is_flagged() {
    let scanner = scan_single(r"`\unicode`");
    assert_eq!(scanner.get_token(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert!(scanner.get_token_flags().contains(TokenFlags::CONTAINS_INVALID_ESCAPE));
}

#[test]
fn test_scan_unterminated_template() {
    assert_eq!(scan_error_code("`abc"), diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL);
}

// =============================================================================
// Numbers
// =============================================================================

#[test]
fn test_scan_numeric_literals() {
    let scanner = scan_single("1_000");
    assert_eq!(scanner.get_token(), SyntaxKind::NumericLiteral);
    assert!(scanner.get_token_flags().contains(TokenFlags::CONTAINS_SEPARATOR));
    assert_eq!(parse_numeric_literal_value(scanner.get_token_value()), 1000.0);

    let scanner = scan_single("0xFF");
    assert!(scanner.get_token_flags().contains(TokenFlags::PREFIXED_NUMBER));
    assert_eq!(parse_numeric_literal_value(scanner.get_token_value()), 255.0);

    let scanner = scan_single("017");
    assert!(scanner.get_token_flags().contains(TokenFlags::OCTAL));
    assert_eq!(parse_numeric_literal_value(scanner.get_token_value()), 15.0);

    assert_eq!(scan_single(".5").get_token_value(), ".5");
    assert_eq!(scan_single("1.5e-3").get_token_value(), "1.5e-3");
    assert_eq!(scan_single("10n").get_token(), SyntaxKind::BigIntLiteral);
    assert_eq!(scan_single("0b101n").get_token(), SyntaxKind::BigIntLiteral);
}

#[test]
fn test_parse_numeric_literal_value() {
    assert_eq!(parse_numeric_literal_value("0b1010"), 10.0);
    assert_eq!(parse_numeric_literal_value("0o17"), 15.0);
    assert_eq!(parse_numeric_literal_value("089"), 89.0);
    assert_eq!(parse_numeric_literal_value("1e3"), 1000.0);
    assert_eq!(parse_numeric_literal_value("12n"), 12.0);
    assert_eq!(parse_numeric_literal_value("1."), 1.0);
}

#[test]
fn test_scan_numeric_errors() {
    assert_eq!(scan_error_code("0x"), diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED);
    assert_eq!(scan_error_code("0o"), diagnostic_codes::OCTAL_DIGIT_EXPECTED);
    assert_eq!(scan_error_code("0b2"), diagnostic_codes::BINARY_DIGIT_EXPECTED);
    assert_eq!(scan_error_code("1e"), diagnostic_codes::DIGIT_EXPECTED);
    assert_eq!(scan_error_code("1.5n"), diagnostic_codes::BIGINT_MUST_BE_INTEGER);
    assert_eq!(
        scan_error_code("1e3n"),
        diagnostic_codes::BIGINT_CANNOT_USE_EXPONENTIAL_NOTATION
    );
    assert_eq!(
        scan_error_code("3in"),
        diagnostic_codes::IDENTIFIER_CANNOT_FOLLOW_NUMERIC_LITERAL
    );
}

#[test]
fn test_scan_numeric_separator_errors() {
    assert_eq!(scan_error_code("1_"), diagnostic_codes::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE);
    assert_eq!(scan_error_code("0x_1"), diagnostic_codes::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE);
    assert_eq!(
        scan_error_code("1__0"),
        diagnostic_codes::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS
    );
}

// =============================================================================
// Trivia
// =============================================================================

#[test]
fn test_scan_collects_comments() {
    let mut scanner = ScannerState::new("a // line\n/* block */ b");
    scanner.scan().unwrap();
    scanner.scan().unwrap();
    assert!(scanner.has_preceding_line_break());
    let comments = scanner.comments();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].kind, CommentKind::Line);
    assert_eq!(comments[0].text, " line");
    assert_eq!(comments[1].kind, CommentKind::Block);
    assert_eq!(comments[1].text, " block ");
}

#[test]
fn test_scan_multiline_block_comment_counts_as_line_break() {
    let mut scanner = ScannerState::new("a /*\n*/ b");
    scanner.scan().unwrap();
    scanner.scan().unwrap();
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn test_scan_unterminated_block_comment() {
    assert_eq!(scan_error_code("a /* b"), diagnostic_codes::ASTERISK_SLASH_EXPECTED);
}

#[test]
fn test_scan_skips_hashbang() {
    let mut scanner = ScannerState::new("#!/usr/bin/env node\nx");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "x");
    assert_eq!(scanner.comments()[0].text, "/usr/bin/env node");
}

// =============================================================================
// JSX
// =============================================================================

#[test]
fn test_scan_jsx_tag_and_children() {
    let mut scanner = ScannerState::new("<my-el title=\"a&amp;b\">hi &lt; there</my-el>");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::LessThanToken);

    scanner.push_context(LexicalContext::JsxTag);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "my-el");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::EqualsToken);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "a&b");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::GreaterThanToken);

    scanner.pop_context(LexicalContext::JsxTag).unwrap();
    scanner.push_context(LexicalContext::JsxChildren);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::JsxText);
    assert_eq!(scanner.get_token_value(), "hi < there");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::LessThanToken);

    scanner.push_context(LexicalContext::JsxTag);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::SlashToken);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::GreaterThanToken);
}

// =============================================================================
// Save / restore
// =============================================================================

#[test]
fn test_save_restore_rewinds_everything() {
    let mut scanner = ScannerState::new("a /* c */ b c d");
    scanner.scan().unwrap();
    let snapshot = scanner.save_state();

    scanner.push_context(LexicalContext::TypePosition);
    scanner.scan().unwrap();
    scanner.scan().unwrap();
    assert_eq!(scanner.comments().len(), 1);
    assert_ne!(scanner.save_state(), snapshot);

    scanner.restore_state(snapshot.clone());
    assert_eq!(scanner.save_state(), snapshot);
    assert!(scanner.comments().is_empty());
    assert!(scanner.contexts().is_empty());
    assert_eq!(scanner.get_token_value(), "a");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "b");
}
