use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("mcp", TokenKind::Mcp);
        map.insert("model", TokenKind::Model);
        map.insert("agent", TokenKind::Agent);
        map.insert("tool", TokenKind::Tool);
        map.insert("acp", TokenKind::Acp);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("of", TokenKind::Of);
        map.insert("while", TokenKind::While);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("try", TokenKind::Try);
        map.insert("catch", TokenKind::Catch);
        map.insert("finally", TokenKind::Finally);
        map.insert("throw", TokenKind::Throw);
        map.insert("return", TokenKind::Return);
        map.insert("import", TokenKind::Import);
        map.insert("export", TokenKind::Export);
        map.insert("from", TokenKind::From);
        map.insert("parallel", TokenKind::Parallel);
        map
    };
}

/// Stands in for an escaped `\$` inside a template literal so that
/// interpolation can tell it apart from a literal `$`.
pub const ESCAPED_DOLLAR_PLACEHOLDER: &str = "\u{E000}ESCAPED_DOLLAR\u{E000}";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Illegal,
    EOF,
    Comment,

    Identifier,
    Number,
    String,
    TemplateLiteral,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Nullish, // ??
    Pipe,    // |

    Dot,
    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Mcp,
    Model,
    Agent,
    Tool,
    Acp,
    If,
    Else,
    For,
    Of,
    While,
    Break,
    Continue,
    Try,
    Catch,
    Finally,
    Throw,
    Return,
    Import,
    Export,
    From,
    Parallel,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Mcp
                | TokenKind::Model
                | TokenKind::Agent
                | TokenKind::Tool
                | TokenKind::Acp
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::Of
                | TokenKind::While
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Finally
                | TokenKind::Throw
                | TokenKind::Return
                | TokenKind::Import
                | TokenKind::Export
                | TokenKind::From
                | TokenKind::Parallel
        )
    }

    /// Kinds whose value carries information beyond the kind itself.
    pub fn carries_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Illegal
                | TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::TemplateLiteral
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Illegal => "illegal",
            TokenKind::EOF => "end of input",
            TokenKind::Comment => "comment",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::TemplateLiteral => "template literal",
            TokenKind::OpenBracket => "'['",
            TokenKind::CloseBracket => "']'",
            TokenKind::OpenCurly => "'{'",
            TokenKind::CloseCurly => "'}'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Assignment => "'='",
            TokenKind::Equals => "'=='",
            TokenKind::Not => "'!'",
            TokenKind::NotEquals => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEquals => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEquals => "'>='",
            TokenKind::Or => "'||'",
            TokenKind::And => "'&&'",
            TokenKind::Nullish => "'??'",
            TokenKind::Pipe => "'|'",
            TokenKind::Dot => "'.'",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Plus => "'+'",
            TokenKind::Dash => "'-'",
            TokenKind::Slash => "'/'",
            TokenKind::Star => "'*'",
            TokenKind::Percent => "'%'",
            TokenKind::Mcp => "keyword 'mcp'",
            TokenKind::Model => "keyword 'model'",
            TokenKind::Agent => "keyword 'agent'",
            TokenKind::Tool => "keyword 'tool'",
            TokenKind::Acp => "keyword 'acp'",
            TokenKind::If => "keyword 'if'",
            TokenKind::Else => "keyword 'else'",
            TokenKind::For => "keyword 'for'",
            TokenKind::Of => "keyword 'of'",
            TokenKind::While => "keyword 'while'",
            TokenKind::Break => "keyword 'break'",
            TokenKind::Continue => "keyword 'continue'",
            TokenKind::Try => "keyword 'try'",
            TokenKind::Catch => "keyword 'catch'",
            TokenKind::Finally => "keyword 'finally'",
            TokenKind::Throw => "keyword 'throw'",
            TokenKind::Return => "keyword 'return'",
            TokenKind::Import => "keyword 'import'",
            TokenKind::Export => "keyword 'export'",
            TokenKind::From => "keyword 'from'",
            TokenKind::Parallel => "keyword 'parallel'",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Describes the token for diagnostics, e.g. `identifier 'foo'` or `'}'`.
    pub fn describe(&self) -> String {
        if self.kind.carries_literal() {
            format!("{} '{}'", self.kind, self.value.escape_debug())
        } else {
            self.kind.to_string()
        }
    }

    pub fn debug(&self) -> String {
        if self.kind.carries_literal() {
            format!("{} ({:?}) {}:{}", self.kind, self.value, self.line, self.column)
        } else {
            format!("{} {}:{}", self.kind, self.line, self.column)
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
