//! Character classification for the scanner.

use unicode_xid::UnicodeXID;

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';
pub const NO_BREAK_SPACE: char = '\u{a0}';
pub const BYTE_ORDER_MARK: char = '\u{feff}';

#[inline]
#[must_use]
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

#[inline]
#[must_use]
pub fn is_white_space_single_line(ch: char) -> bool {
    match ch {
        ' ' | '\t' | '\u{b}' | '\u{c}' | NO_BREAK_SPACE | BYTE_ORDER_MARK => true,
        _ if ch.is_ascii() => false,
        _ => ch.is_whitespace() && !is_line_terminator(ch),
    }
}

#[inline]
#[must_use]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$' || (!ch.is_ascii() && ch.is_xid_start())
}

#[inline]
#[must_use]
pub fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || ch == '$'
        || (!ch.is_ascii() && (ch.is_xid_continue() || ch == '\u{200c}' || ch == '\u{200d}'))
}

#[inline]
#[must_use]
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

#[inline]
#[must_use]
pub fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

/// Decode a JSX character reference body (`amp`, `#123`, `#x7B`).
#[must_use]
pub fn decode_jsx_entity(entity: &str) -> Option<char> {
    if let Some(numeric) = entity.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => NO_BREAK_SPACE,
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "hellip" => '\u{2026}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "middot" => '\u{b7}',
        "times" => '\u{d7}',
        _ => return None,
    };
    Some(ch)
}
