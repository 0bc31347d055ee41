//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance at a position
//! - `MK_OPERATOR!` - Resolves a one- or two-character operator with one
//!   character of lookahead
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$position` - The `Position` of the token's first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), start);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            line: $position.line,
            column: $position.column,
        }
    };
}

/// Resolves an operator whose first character has already been consumed.
///
/// If the next character is `$next` it is consumed too and a `$double` token
/// is produced, otherwise a `$single` token holding only `$first`.
///
/// # Example
///
/// ```ignore
/// '=' => MK_OPERATOR!(lexer, '=', start, '=' => TokenKind::Equals, _ => TokenKind::Assignment),
/// ```
#[macro_export]
macro_rules! MK_OPERATOR {
    ($lexer:expr, $first:literal, $start:expr, $next:literal => $double:expr, _ => $single:expr) => {
        if $lexer.at() == Some($next) {
            $lexer.advance();
            $crate::MK_TOKEN!($double, String::from(concat!($first, $next)), $start)
        } else {
            $crate::MK_TOKEN!($single, String::from($first), $start)
        }
    };
}
