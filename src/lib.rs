#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use crate::lexer::lexer::{tokenize, Lexer};
pub use crate::parser::parser::{parse, Parser};

/// A 1-indexed line/column location in the source text.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Returns the text of `line` (1-indexed) without its line terminator.
pub fn get_line_at_position(source: &str, position: Position) -> Option<&str> {
    if position.line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(position.line - 1)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Renders a diagnostic as a source excerpt with a caret under the offending column.
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: UnexpectedToken (expected ')', got end of input)
        -> script.ash:20:9
          |
        20 | x = (a +
           | --------^
    */

    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}:{}:{}\n", file, position.line, position.column));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let line_text = get_line_at_position(source, *position).unwrap_or("");
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = position.column.saturating_sub(removed_whitespace).max(1);
    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}

#[cfg(test)]
mod tests {
    use super::{get_line_at_position, render_error, Position};
    use crate::parser::parser::parse;

    #[test]
    fn test_get_line_at_position() {
        let source = "x = 1\r\n  agent A {\n}\n";

        assert_eq!(get_line_at_position(source, Position::new(1, 1)), Some("x = 1"));
        assert_eq!(get_line_at_position(source, Position::new(2, 3)), Some("  agent A {"));
        assert_eq!(get_line_at_position(source, Position::new(9, 1)), None);
        assert_eq!(get_line_at_position(source, Position::null()), None);
    }

    #[test]
    fn test_render_error_points_at_column() {
        let source = "x = 1\ny = (2";
        let (_, diagnostics) = parse(source);
        let error = diagnostics.iter().next().unwrap();

        let rendered = render_error(error, source, "script.ash");
        let lines = rendered.lines().collect::<Vec<_>>();

        assert!(lines[0].starts_with("Error: UnexpectedToken"));
        assert_eq!(lines[1], "-> script.ash:2:7");
        assert_eq!(lines[3], "2 | y = (2");
        assert_eq!(lines[4], "  | ------^");
    }
}
