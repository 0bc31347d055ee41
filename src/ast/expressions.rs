use std::fmt::Display;

use indexmap::IndexMap;

use crate::lexer::tokens::{Token, ESCAPED_DOLLAR_PLACEHOLDER, RESERVED_LOOKUP};

use super::ast::Expression;

// LITERALS

/// Identifier
/// A bare name. Also used for declaration names, parameters and member properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        Identifier {
            name: token.value.clone(),
            token,
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Number Literal
/// Renders with the digits as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub token: Token,
    pub value: f64,
}

impl Display for NumberLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

/// String Literal
/// Holds the decoded text; quoted, triple-quoted and dedented forms all end up here.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", escape(&self.value, '"'))
    }
}

/// Template Literal
/// Backtick text handed to the evaluator for interpolation. An escaped `\$`
/// is kept as [`ESCAPED_DOLLAR_PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub token: Token,
    pub value: String,
}

impl Display for TemplateLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let escaped = escape(&self.value, '`').replace(ESCAPED_DOLLAR_PLACEHOLDER, "\\$");
        write!(f, "`{}`", escaped)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullLiteral {
    pub token: Token,
}

impl Display for NullLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "null")
    }
}

// COMPLEX

/// Binary Expression
/// Arithmetic, comparison, logical and nullish-coalescing operators.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

impl Display for BinaryExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

/// Unary Expression
/// `!x` or `-x`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

impl Display for UnaryExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Pipe Expression
/// Threads the value of `left` into the stage on the `right`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl Display for PipeExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} | {})", self.left, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.function, join(&self.arguments))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub token: Token,
    pub object: Box<Expression>,
    pub property: Identifier,
}

impl Display for MemberExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.object, self.property)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl Display for IndexExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

impl Display for ArrayLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", join(&self.elements))
    }
}

/// Object Literal
///
/// Keys are unique; iteration follows the order in which each key first
/// appeared in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    pub token: Token,
    pub pairs: IndexMap<String, Expression>,
}

impl ObjectLiteral {
    /// Keys in source order.
    pub fn order(&self) -> Vec<&str> {
        self.pairs.keys().map(String::as_str).collect()
    }

    pub fn get(&self, key: &str) -> Option<&Expression> {
        self.pairs.get(key)
    }
}

impl Display for ObjectLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs = self
            .pairs
            .iter()
            .map(|(key, value)| {
                if is_plain_identifier(key) {
                    format!("{}: {}", key, value)
                } else {
                    format!("\"{}\": {}", escape(key, '"'), value)
                }
            })
            .collect::<Vec<_>>();

        write!(f, "{{{}}}", pairs.join(", "))
    }
}

fn join(expressions: &[Expression]) -> String {
    expressions
        .iter()
        .map(|expression| expression.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whether `text` would lex back as a single non-keyword identifier.
pub(crate) fn is_plain_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let starts_well = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');

    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !RESERVED_LOOKUP.contains_key(text)
}

/// Re-escapes decoded text so the lexer reads it back unchanged.
pub(crate) fn escape(text: &str, quote: char) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            c if c == quote => {
                result.push('\\');
                result.push(c);
            }
            c if c.is_control() && (c as u32) <= 0xFFFF => {
                result.push_str(&format!("\\u{:04x}", c as u32))
            }
            c => result.push(c),
        }
    }

    result
}
