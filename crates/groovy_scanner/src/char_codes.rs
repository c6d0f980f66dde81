//! Character classes used by the lexer.

use unicode_xid::UnicodeXID;

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const SPACE: char = ' ';
pub const TAB: char = '\t';
pub const FORM_FEED: char = '\u{000C}';
pub const BACKSLASH: char = '\\';
pub const SINGLE_QUOTE: char = '\'';
pub const DOUBLE_QUOTE: char = '"';
pub const DOLLAR_SIGN: char = '$';
pub const ASTERISK: char = '*';
pub const OPEN_BRACE: char = '{';
pub const DOT: char = '.';

#[inline]
pub fn is_line_break(ch: char) -> bool {
    ch == LINE_FEED || ch == CARRIAGE_RETURN
}

/// Blanks that make up a `WS` token. Line breaks are separate.
#[inline]
pub fn is_white_space(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == FORM_FEED
}

/// Identifier letters are ASCII only; `$` is not one of them.
#[inline]
pub fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    ('0'..='7').contains(&ch)
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// Whether `ch` may start a name in a string constructor value, which uses
/// the platform's wider identifier rules rather than [`is_letter`].
pub fn is_java_identifier_start(ch: char) -> bool {
    ch == '_' || ch == DOLLAR_SIGN || UnicodeXID::is_xid_start(ch) || is_currency_symbol(ch)
}

fn is_currency_symbol(ch: char) -> bool {
    matches!(ch, '\u{00A2}'..='\u{00A5}' | '\u{20A0}'..='\u{20CF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_ascii() {
        assert!(is_letter('a'));
        assert!(is_letter('_'));
        assert!(!is_letter('$'));
        assert!(!is_letter('é'));
    }

    #[test]
    fn test_java_identifier_start() {
        assert!(is_java_identifier_start('é'));
        assert!(is_java_identifier_start('$'));
        assert!(is_java_identifier_start('€'));
        assert!(!is_java_identifier_start('5'));
        assert!(!is_java_identifier_start(' '));
    }

    #[test]
    fn test_digit_classes() {
        assert!(is_octal_digit('7'));
        assert!(!is_octal_digit('8'));
        assert!(is_hex_digit('F'));
        assert!(is_white_space(FORM_FEED));
        assert!(is_line_break(CARRIAGE_RETURN));
    }
}
