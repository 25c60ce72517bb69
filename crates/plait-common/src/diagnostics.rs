//! Diagnostic types, codes and message templates.
//!
//! Codes below 9000 follow TypeScript's numbering so hosts that already map
//! TypeScript diagnostics keep working. Codes from 9000 up are plait's own.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A message template keyed by code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// A diagnostic reported against a source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
        }
    }
}

pub mod diagnostic_codes {
    // Scanner
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const DIGIT_EXPECTED: u32 = 1124;
    pub const HEXADECIMAL_DIGIT_EXPECTED: u32 = 1125;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: u32 = 1161;
    pub const BINARY_DIGIT_EXPECTED: u32 = 1177;
    pub const OCTAL_DIGIT_EXPECTED: u32 = 1178;
    pub const EXTENDED_UNICODE_ESCAPE_OUT_OF_RANGE: u32 = 1198;
    pub const UNTERMINATED_UNICODE_ESCAPE_SEQUENCE: u32 = 1199;
    pub const IDENTIFIER_CANNOT_FOLLOW_NUMERIC_LITERAL: u32 = 1351;
    pub const BIGINT_CANNOT_USE_EXPONENTIAL_NOTATION: u32 = 1352;
    pub const BIGINT_MUST_BE_INTEGER: u32 = 1353;
    pub const UNKNOWN_REGULAR_EXPRESSION_FLAG: u32 = 1499;
    pub const DUPLICATE_REGULAR_EXPRESSION_FLAG: u32 = 1500;
    pub const NUMERIC_SEPARATORS_NOT_ALLOWED_HERE: u32 = 6188;
    pub const MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS: u32 = 6189;

    // Parser
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPECTED: u32 = 1005;
    pub const TRAILING_COMMA_NOT_ALLOWED: u32 = 1009;
    pub const UNEXPECTED_TOKEN: u32 = 1012;
    pub const REST_PARAMETER_MUST_BE_LAST: u32 = 1014;
    pub const INDEX_SIGNATURE_PARAMETER_TYPE: u32 = 1023;
    pub const SUPER_MUST_BE_FOLLOWED_BY_ARGUMENTS_OR_MEMBER: u32 = 1034;
    pub const LIST_CANNOT_BE_EMPTY: u32 = 1097;
    pub const INVALID_USE_IN_STRICT_MODE: u32 = 1100;
    pub const GET_ACCESSOR_CANNOT_HAVE_PARAMETERS: u32 = 1054;
    pub const SET_ACCESSOR_MUST_HAVE_ONE_PARAMETER: u32 = 1049;
    pub const WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE: u32 = 1101;
    pub const CONTINUE_OUTSIDE_ITERATION: u32 = 1104;
    pub const BREAK_OUTSIDE_ITERATION_OR_SWITCH: u32 = 1105;
    pub const RETURN_OUTSIDE_FUNCTION: u32 = 1108;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const DUPLICATE_DEFAULT_CLAUSE: u32 = 1113;
    pub const DUPLICATE_LABEL: u32 = 1114;
    pub const JUMP_TARGET_NOT_FOUND: u32 = 1116;
    pub const OCTAL_LITERALS_NOT_ALLOWED: u32 = 1121;
    pub const UNEXPECTED_END_OF_TEXT: u32 = 1126;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const PROPERTY_ASSIGNMENT_EXPECTED: u32 = 1136;
    pub const PARAMETER_DECLARATION_EXPECTED: u32 = 1138;
    pub const STRING_LITERAL_EXPECTED: u32 = 1141;
    pub const CONST_DECLARATIONS_MUST_BE_INITIALIZED: u32 = 1155;
    pub const YIELD_ONLY_IN_GENERATOR: u32 = 1163;
    pub const LINE_TERMINATOR_BEFORE_ARROW: u32 = 1200;
    pub const RESERVED_WORD_IN_STRICT_MODE: u32 = 1212;
    pub const AWAIT_ONLY_IN_ASYNC: u32 = 1308;
    pub const RESERVED_WORD_CANNOT_BE_USED_HERE: u32 = 1359;
    pub const INVALID_ASSIGNMENT_TARGET: u32 = 2364;
    pub const PARAMETER_PROPERTY_ONLY_IN_CONSTRUCTOR: u32 = 2369;
    pub const INVALID_TYPE_IDENTIFIER: u32 = 2457;
    pub const JSX_CLOSING_TAG_EXPECTED: u32 = 17002;
    pub const JSX_ELEMENT_HAS_NO_CLOSING_TAG: u32 = 17008;

    // plait
    pub const SYNTAX_REQUIRES_TARGET: u32 = 9001;
    pub const MODULE_SYNTAX_IN_SCRIPT: u32 = 9002;
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: u32 = 9003;
    pub const INVALID_ESCAPE_IN_TEMPLATE: u32 = 9004;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    msg(diagnostic_codes::UNTERMINATED_STRING_LITERAL, "Unterminated string literal."),
    msg(diagnostic_codes::IDENTIFIER_EXPECTED, "Identifier expected."),
    msg(diagnostic_codes::EXPECTED, "'{0}' expected."),
    msg(diagnostic_codes::ASTERISK_SLASH_EXPECTED, "'*/' expected."),
    msg(diagnostic_codes::TRAILING_COMMA_NOT_ALLOWED, "Trailing comma not allowed."),
    msg(diagnostic_codes::UNEXPECTED_TOKEN, "Unexpected token."),
    msg(
        diagnostic_codes::REST_PARAMETER_MUST_BE_LAST,
        "A rest parameter must be last in a parameter list.",
    ),
    msg(
        diagnostic_codes::INDEX_SIGNATURE_PARAMETER_TYPE,
        "An index signature parameter type must be either 'string' or 'number'.",
    ),
    msg(
        diagnostic_codes::SUPER_MUST_BE_FOLLOWED_BY_ARGUMENTS_OR_MEMBER,
        "'super' must be followed by an argument list or member access.",
    ),
    msg(diagnostic_codes::LIST_CANNOT_BE_EMPTY, "'{0}' list cannot be empty."),
    msg(diagnostic_codes::INVALID_USE_IN_STRICT_MODE, "Invalid use of '{0}' in strict mode."),
    msg(
        diagnostic_codes::SET_ACCESSOR_MUST_HAVE_ONE_PARAMETER,
        "A 'set' accessor must have exactly one parameter.",
    ),
    msg(
        diagnostic_codes::GET_ACCESSOR_CANNOT_HAVE_PARAMETERS,
        "A 'get' accessor cannot have parameters.",
    ),
    msg(
        diagnostic_codes::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE,
        "'with' statements are not allowed in strict mode.",
    ),
    msg(
        diagnostic_codes::CONTINUE_OUTSIDE_ITERATION,
        "A 'continue' statement can only be used within an enclosing iteration statement.",
    ),
    msg(
        diagnostic_codes::BREAK_OUTSIDE_ITERATION_OR_SWITCH,
        "A 'break' statement can only be used within an enclosing iteration or switch statement.",
    ),
    msg(
        diagnostic_codes::RETURN_OUTSIDE_FUNCTION,
        "A 'return' statement can only be used within a function body.",
    ),
    msg(diagnostic_codes::EXPRESSION_EXPECTED, "Expression expected."),
    msg(diagnostic_codes::TYPE_EXPECTED, "Type expected."),
    msg(
        diagnostic_codes::DUPLICATE_DEFAULT_CLAUSE,
        "A 'default' clause cannot appear more than once in a 'switch' statement.",
    ),
    msg(diagnostic_codes::DUPLICATE_LABEL, "Duplicate label '{0}'."),
    msg(
        diagnostic_codes::JUMP_TARGET_NOT_FOUND,
        "A 'break' or 'continue' statement can only jump to a label of an enclosing statement.",
    ),
    msg(
        diagnostic_codes::OCTAL_LITERALS_NOT_ALLOWED,
        "Octal literals are not allowed in strict mode.",
    ),
    msg(diagnostic_codes::DIGIT_EXPECTED, "Digit expected."),
    msg(diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED, "Hexadecimal digit expected."),
    msg(diagnostic_codes::UNEXPECTED_END_OF_TEXT, "Unexpected end of text."),
    msg(diagnostic_codes::INVALID_CHARACTER, "Invalid character."),
    msg(
        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
        "Declaration or statement expected.",
    ),
    msg(diagnostic_codes::PROPERTY_ASSIGNMENT_EXPECTED, "Property assignment expected."),
    msg(diagnostic_codes::PARAMETER_DECLARATION_EXPECTED, "Parameter declaration expected."),
    msg(diagnostic_codes::STRING_LITERAL_EXPECTED, "String literal expected."),
    msg(
        diagnostic_codes::CONST_DECLARATIONS_MUST_BE_INITIALIZED,
        "'const' declarations must be initialized.",
    ),
    msg(diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL, "Unterminated template literal."),
    msg(
        diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
        "Unterminated regular expression literal.",
    ),
    msg(
        diagnostic_codes::YIELD_ONLY_IN_GENERATOR,
        "A 'yield' expression is only allowed in a generator body.",
    ),
    msg(
        diagnostic_codes::LINE_TERMINATOR_BEFORE_ARROW,
        "Line terminator not permitted before arrow.",
    ),
    msg(
        diagnostic_codes::RESERVED_WORD_IN_STRICT_MODE,
        "Identifier expected. '{0}' is a reserved word in strict mode.",
    ),
    msg(diagnostic_codes::BINARY_DIGIT_EXPECTED, "Binary digit expected."),
    msg(diagnostic_codes::OCTAL_DIGIT_EXPECTED, "Octal digit expected."),
    msg(
        diagnostic_codes::EXTENDED_UNICODE_ESCAPE_OUT_OF_RANGE,
        "An extended Unicode escape value must be between 0x0 and 0x10FFFF inclusive.",
    ),
    msg(
        diagnostic_codes::UNTERMINATED_UNICODE_ESCAPE_SEQUENCE,
        "Unterminated Unicode escape sequence.",
    ),
    msg(
        diagnostic_codes::AWAIT_ONLY_IN_ASYNC,
        "'await' expressions are only allowed within async functions and at the top levels of modules.",
    ),
    msg(
        diagnostic_codes::IDENTIFIER_CANNOT_FOLLOW_NUMERIC_LITERAL,
        "An identifier or keyword cannot immediately follow a numeric literal.",
    ),
    msg(
        diagnostic_codes::BIGINT_CANNOT_USE_EXPONENTIAL_NOTATION,
        "A bigint literal cannot use exponential notation.",
    ),
    msg(diagnostic_codes::BIGINT_MUST_BE_INTEGER, "A bigint literal must be an integer."),
    msg(
        diagnostic_codes::RESERVED_WORD_CANNOT_BE_USED_HERE,
        "Identifier expected. '{0}' is a reserved word that cannot be used here.",
    ),
    msg(diagnostic_codes::UNKNOWN_REGULAR_EXPRESSION_FLAG, "Unknown regular expression flag."),
    msg(
        diagnostic_codes::DUPLICATE_REGULAR_EXPRESSION_FLAG,
        "Duplicate regular expression flag.",
    ),
    msg(
        diagnostic_codes::INVALID_ASSIGNMENT_TARGET,
        "The left-hand side of an assignment expression must be a variable or a property access.",
    ),
    msg(
        diagnostic_codes::PARAMETER_PROPERTY_ONLY_IN_CONSTRUCTOR,
        "A parameter property is only allowed in a constructor implementation.",
    ),
    msg(diagnostic_codes::INVALID_TYPE_IDENTIFIER, "Cannot use '{0}' as a type identifier."),
    msg(
        diagnostic_codes::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE,
        "Numeric separators are not allowed here.",
    ),
    msg(
        diagnostic_codes::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS,
        "Multiple consecutive numeric separators are not permitted.",
    ),
    msg(
        diagnostic_codes::JSX_CLOSING_TAG_EXPECTED,
        "Expected corresponding JSX closing tag for '{0}'.",
    ),
    msg(
        diagnostic_codes::JSX_ELEMENT_HAS_NO_CLOSING_TAG,
        "JSX element '{0}' has no corresponding closing tag.",
    ),
    msg(
        diagnostic_codes::SYNTAX_REQUIRES_TARGET,
        "{0} is not available when targeting {1}.",
    ),
    msg(
        diagnostic_codes::MODULE_SYNTAX_IN_SCRIPT,
        "'import' and 'export' may appear only with 'sourceType: module'.",
    ),
    msg(diagnostic_codes::MAXIMUM_NESTING_DEPTH_EXCEEDED, "Maximum nesting depth exceeded."),
    msg(
        diagnostic_codes::INVALID_ESCAPE_IN_TEMPLATE,
        "Invalid escape sequence in untagged template literal.",
    ),
];

const fn msg(code: u32, message: &'static str) -> DiagnosticMessage {
    DiagnosticMessage {
        code,
        category: DiagnosticCategory::Error,
        message,
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up the template for `code` and substitute `args`.
///
/// Unknown codes produce the bare code so a missing table entry is visible
/// rather than silently empty.
pub fn message_for(code: u32, args: &[&str]) -> String {
    match get_message_template(code) {
        Some(template) => format_message(template, args),
        None => format!("TS{code}"),
    }
}
