use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{
    errors::errors::{Diagnostics, Error, ErrorImpl},
    Position, MK_OPERATOR, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, ESCAPED_DOLLAR_PLACEHOLDER, RESERVED_LOOKUP};

lazy_static! {
    static ref LEADING_WHITESPACE: Regex = Regex::new("^[ \\t]*").unwrap();
}

/// Pull-style scanner over a source string.
///
/// Tokens are produced one at a time by [`Lexer::next_token`]; once the
/// source is exhausted every further call returns an `EOF` token.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    diagnostics: Diagnostics,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Consumes the current character, keeping line and column in step.
    pub fn advance(&mut self) -> Option<char> {
        let ch = *self.source.get(self.pos)?;
        self.pos += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    pub fn at(&self) -> Option<char> {
        self.peek_n(0)
    }

    pub fn peek_n(&self, n: usize) -> Option<char> {
        self.source.get(self.pos + n).copied()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.errors()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The sink is shared with the parser driving this lexer.
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    fn report_unterminated(&mut self, form: &str, start: Position) {
        self.diagnostics.push(Error::new(
            ErrorImpl::UnterminatedLiteral {
                form: String::from(form),
                start,
            },
            start,
        ));
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let mut skipped = false;

            while matches!(self.at(), Some(' ' | '\t' | '\r' | '\n')) {
                self.advance();
                skipped = true;
            }

            if self.at() == Some('#') {
                while !matches!(self.at(), None | Some('\n')) {
                    self.advance();
                }
                skipped = true;
            }

            if !skipped {
                break;
            }
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let start = self.position();
        let Some(ch) = self.advance() else {
            return MK_TOKEN!(TokenKind::EOF, String::new(), start);
        };

        let token = match ch {
            '=' => MK_OPERATOR!(self, '=', start, '=' => TokenKind::Equals, _ => TokenKind::Assignment),
            '!' => MK_OPERATOR!(self, '!', start, '=' => TokenKind::NotEquals, _ => TokenKind::Not),
            '<' => MK_OPERATOR!(self, '<', start, '=' => TokenKind::LessEquals, _ => TokenKind::Less),
            '>' => MK_OPERATOR!(self, '>', start, '=' => TokenKind::GreaterEquals, _ => TokenKind::Greater),
            '&' => MK_OPERATOR!(self, '&', start, '&' => TokenKind::And, _ => TokenKind::Illegal),
            '|' => MK_OPERATOR!(self, '|', start, '|' => TokenKind::Or, _ => TokenKind::Pipe),
            '?' => MK_OPERATOR!(self, '?', start, '?' => TokenKind::Nullish, _ => TokenKind::Illegal),
            '+' => MK_TOKEN!(TokenKind::Plus, String::from("+"), start),
            '-' => MK_TOKEN!(TokenKind::Dash, String::from("-"), start),
            '*' => MK_TOKEN!(TokenKind::Star, String::from("*"), start),
            '/' => MK_TOKEN!(TokenKind::Slash, String::from("/"), start),
            '%' => MK_TOKEN!(TokenKind::Percent, String::from("%"), start),
            '{' => MK_TOKEN!(TokenKind::OpenCurly, String::from("{"), start),
            '}' => MK_TOKEN!(TokenKind::CloseCurly, String::from("}"), start),
            '[' => MK_TOKEN!(TokenKind::OpenBracket, String::from("["), start),
            ']' => MK_TOKEN!(TokenKind::CloseBracket, String::from("]"), start),
            '(' => MK_TOKEN!(TokenKind::OpenParen, String::from("("), start),
            ')' => MK_TOKEN!(TokenKind::CloseParen, String::from(")"), start),
            ',' => MK_TOKEN!(TokenKind::Comma, String::from(","), start),
            ':' => MK_TOKEN!(TokenKind::Colon, String::from(":"), start),
            ';' => MK_TOKEN!(TokenKind::Semicolon, String::from(";"), start),
            '.' => MK_TOKEN!(TokenKind::Dot, String::from("."), start),
            '"' | '\'' => {
                if self.at() == Some(ch) && self.peek_n(1) == Some(ch) {
                    self.advance();
                    self.advance();
                    triple_string_handler(self, ch, start)
                } else {
                    string_handler(self, ch, start)
                }
            }
            '`' => template_handler(self, start),
            c if c.is_ascii_digit() => number_handler(self, c, start),
            c if c.is_alphabetic() || c == '_' => symbol_handler(self, c, start),
            c => MK_TOKEN!(TokenKind::Illegal, c.to_string(), start),
        };

        trace!("{}", token.debug());
        token
    }
}

fn number_handler(lexer: &mut Lexer, first: char, start: Position) -> Token {
    let mut literal = String::from(first);

    while let Some(c) = lexer.at().filter(char::is_ascii_digit) {
        literal.push(c);
        lexer.advance();
    }

    if lexer.at() == Some('.') && lexer.peek_n(1).is_some_and(|c| c.is_ascii_digit()) {
        literal.push('.');
        lexer.advance();

        while let Some(c) = lexer.at().filter(char::is_ascii_digit) {
            literal.push(c);
            lexer.advance();
        }
    }

    MK_TOKEN!(TokenKind::Number, literal, start)
}

fn symbol_handler(lexer: &mut Lexer, first: char, start: Position) -> Token {
    let mut value = String::from(first);

    while let Some(c) = lexer.at().filter(|c| c.is_alphanumeric() || *c == '_') {
        value.push(c);
        lexer.advance();
    }

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        MK_TOKEN!(*kind, value, start)
    } else {
        MK_TOKEN!(TokenKind::Identifier, value, start)
    }
}

fn string_handler(lexer: &mut Lexer, quote: char, start: Position) -> Token {
    let mut result = String::new();

    loop {
        match lexer.advance() {
            None => {
                lexer.report_unterminated("string", start);
                break;
            }
            Some(c) if c == quote => break,
            Some('\\') => {
                if !decode_escape(lexer, &mut result, false) {
                    lexer.report_unterminated("string", start);
                    break;
                }
            }
            Some(c) => result.push(c),
        }
    }

    MK_TOKEN!(TokenKind::String, result, start)
}

fn triple_string_handler(lexer: &mut Lexer, quote: char, start: Position) -> Token {
    let mut raw = String::new();

    loop {
        if lexer.at() == Some(quote) && lexer.peek_n(1) == Some(quote) && lexer.peek_n(2) == Some(quote) {
            lexer.advance();
            lexer.advance();
            lexer.advance();
            break;
        }

        match lexer.advance() {
            Some(c) => raw.push(c),
            None => {
                lexer.report_unterminated("triple-quoted string", start);
                break;
            }
        }
    }

    MK_TOKEN!(TokenKind::String, dedent(&raw), start)
}

fn template_handler(lexer: &mut Lexer, start: Position) -> Token {
    let mut result = String::new();

    loop {
        match lexer.advance() {
            None => {
                lexer.report_unterminated("template literal", start);
                break;
            }
            Some('`') => break,
            Some('\\') => {
                if !decode_escape(lexer, &mut result, true) {
                    lexer.report_unterminated("template literal", start);
                    break;
                }
            }
            Some(c) => result.push(c),
        }
    }

    MK_TOKEN!(TokenKind::TemplateLiteral, result, start)
}

/// Decodes the escape following a consumed backslash into `result`.
///
/// Returns false when the input ends right after the backslash.
fn decode_escape(lexer: &mut Lexer, result: &mut String, template: bool) -> bool {
    let Some(next) = lexer.advance() else {
        result.push('\\');
        return false;
    };

    match next {
        'n' => result.push('\n'),
        't' => result.push('\t'),
        'r' => result.push('\r'),
        '\\' => result.push('\\'),
        '"' => result.push('"'),
        '\'' => result.push('\''),
        '`' if template => result.push('`'),
        '$' if template => result.push_str(ESCAPED_DOLLAR_PLACEHOLDER),
        'u' => decode_unicode_escape(lexer, result),
        other => {
            // Unknown escapes keep their backslash
            result.push('\\');
            result.push(other);
        }
    }

    true
}

fn decode_unicode_escape(lexer: &mut Lexer, result: &mut String) {
    let mut hex = String::new();

    while hex.len() < 4 {
        match lexer.at() {
            Some(c) if c.is_ascii_hexdigit() => {
                hex.push(c);
                lexer.advance();
            }
            _ => break,
        }
    }

    if hex.len() == 4 {
        if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
            result.push(c);
            return;
        }
    }

    result.push_str("\\u");
    result.push_str(&hex);
}

/// Strips the indentation shared by every non-blank line, then trims the result.
pub fn dedent(text: &str) -> String {
    let indent_of = |line: &str| LEADING_WHITESPACE.find(line).map_or(0, |m| m.end());

    let lines = text.split('\n').collect::<Vec<_>>();
    let common = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| &line[indent_of(line).min(common)..])
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Drains a fresh lexer over `source`, including the final `EOF` token.
pub fn tokenize(source: &str) -> (Vec<Token>, Diagnostics) {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            break;
        }
    }

    (tokens, lexer.into_diagnostics())
}
