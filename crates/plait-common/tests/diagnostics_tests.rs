//! Tests for diagnostic message lookup.

use crate::diagnostics::{Diagnostic, DiagnosticCategory, get_message_template, message_for};
use crate::{diagnostic_codes, format_message};

#[test]
fn test_message_template_lookup() {
    assert_eq!(
        get_message_template(diagnostic_codes::EXPRESSION_EXPECTED),
        Some("Expression expected.")
    );
    assert_eq!(get_message_template(42), None);
}

#[test]
fn test_format_message_substitutes_positional_args() {
    assert_eq!(format_message("'{0}' expected.", &[")"]), "')' expected.");
    assert_eq!(
        message_for(diagnostic_codes::SYNTAX_REQUIRES_TARGET, &["Optional chaining", "ES2019"]),
        "Optional chaining is not available when targeting ES2019."
    );
}

#[test]
fn test_unknown_code_is_visible() {
    assert_eq!(message_for(77, &[]), "TS77");
}

#[test]
fn test_every_code_has_unique_template() {
    let mut codes: Vec<u32> = crate::diagnostics::DIAGNOSTIC_MESSAGES
        .iter()
        .map(|m| m.code)
        .collect();
    let total = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), total);
}

#[test]
fn test_error_constructor() {
    let diag = Diagnostic::error("a.ts", 3, 1, "Unexpected token.", 1012);
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.file, "a.ts");
    assert_eq!(diag.start, 3);
}
