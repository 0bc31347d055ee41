use std::fmt::{Debug, Display};

use crate::{lexer::tokens::Token, Position};

use super::{expressions::*, statements::*};

/// Node Trait
///
/// Shared by every AST node: the text of the token the node originates from,
/// plus the canonical rendering through `Display`.
pub trait Node: Display + Debug {
    /// Returns the literal of the node's originating token.
    fn token_literal(&self) -> &str;
}

macro_rules! impl_node {
    ($($node:ty),+ $(,)?) => {
        $(
            impl Node for $node {
                fn token_literal(&self) -> &str {
                    &self.token.value
                }
            }
        )+
    };
}

impl_node!(
    Identifier,
    NumberLiteral,
    StringLiteral,
    TemplateLiteral,
    BooleanLiteral,
    NullLiteral,
    BinaryExpression,
    UnaryExpression,
    PipeExpression,
    CallExpression,
    MemberExpression,
    IndexExpression,
    ArrayLiteral,
    ObjectLiteral,
    AssignmentStatement,
    ExpressionStatement,
    BlockStatement,
    IfStatement,
    WhileStatement,
    ForOfStatement,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    ThrowStatement,
    TryStatement,
    Declaration,
    ToolDeclaration,
    ImportStatement,
    ExportStatement,
);

/// Program
///
/// The root of the tree; statements are kept in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", |statement| statement.token_literal())
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .statements
            .iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<_>>();

        write!(f, "{}", rendered.join("\n"))
    }
}

/// Statement Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    Assignment,
    Expression,
    Block,
    If,
    While,
    ForOf,
    Break,
    Continue,
    Return,
    Throw,
    Try,
    Mcp,
    Model,
    Agent,
    Tool,
    Import,
    Export,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment(AssignmentStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
    If(IfStatement),
    While(WhileStatement),
    ForOf(ForOfStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Return(ReturnStatement),
    Throw(ThrowStatement),
    Try(TryStatement),
    Mcp(Declaration),
    Model(Declaration),
    Agent(Declaration),
    Tool(ToolDeclaration),
    Import(ImportStatement),
    Export(ExportStatement),
}

impl Statement {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Statement::Assignment(_) => StmtType::Assignment,
            Statement::Expression(_) => StmtType::Expression,
            Statement::Block(_) => StmtType::Block,
            Statement::If(_) => StmtType::If,
            Statement::While(_) => StmtType::While,
            Statement::ForOf(_) => StmtType::ForOf,
            Statement::Break(_) => StmtType::Break,
            Statement::Continue(_) => StmtType::Continue,
            Statement::Return(_) => StmtType::Return,
            Statement::Throw(_) => StmtType::Throw,
            Statement::Try(_) => StmtType::Try,
            Statement::Mcp(_) => StmtType::Mcp,
            Statement::Model(_) => StmtType::Model,
            Statement::Agent(_) => StmtType::Agent,
            Statement::Tool(_) => StmtType::Tool,
            Statement::Import(_) => StmtType::Import,
            Statement::Export(_) => StmtType::Export,
        }
    }

    fn as_node(&self) -> &dyn Node {
        match self {
            Statement::Assignment(node) => node,
            Statement::Expression(node) => node,
            Statement::Block(node) => node,
            Statement::If(node) => node,
            Statement::While(node) => node,
            Statement::ForOf(node) => node,
            Statement::Break(node) => node,
            Statement::Continue(node) => node,
            Statement::Return(node) => node,
            Statement::Throw(node) => node,
            Statement::Try(node) => node,
            Statement::Mcp(node) | Statement::Model(node) | Statement::Agent(node) => node,
            Statement::Tool(node) => node,
            Statement::Import(node) => node,
            Statement::Export(node) => node,
        }
    }

    /// Position of the token the statement starts with.
    pub fn position(&self) -> Position {
        match self {
            Statement::Assignment(node) => node.token.position(),
            Statement::Expression(node) => node.token.position(),
            Statement::Block(node) => node.token.position(),
            Statement::If(node) => node.token.position(),
            Statement::While(node) => node.token.position(),
            Statement::ForOf(node) => node.token.position(),
            Statement::Break(node) => node.token.position(),
            Statement::Continue(node) => node.token.position(),
            Statement::Return(node) => node.token.position(),
            Statement::Throw(node) => node.token.position(),
            Statement::Try(node) => node.token.position(),
            Statement::Mcp(node) | Statement::Model(node) | Statement::Agent(node) => {
                node.token.position()
            }
            Statement::Tool(node) => node.token.position(),
            Statement::Import(node) => node.token.position(),
            Statement::Export(node) => node.token.position(),
        }
    }
}

impl Node for Statement {
    fn token_literal(&self) -> &str {
        self.as_node().token_literal()
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.as_node(), f)
    }
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Identifier,
    Number,
    String,
    Template,
    Boolean,
    Null,
    Binary,
    Unary,
    Pipe,
    Call,
    Member,
    Index,
    Array,
    Object,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Number(NumberLiteral),
    String(StringLiteral),
    Template(TemplateLiteral),
    Boolean(BooleanLiteral),
    Null(NullLiteral),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Pipe(PipeExpression),
    Call(CallExpression),
    Member(MemberExpression),
    Index(IndexExpression),
    Array(ArrayLiteral),
    Object(ObjectLiteral),
}

impl Expression {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expression::Identifier(_) => ExprType::Identifier,
            Expression::Number(_) => ExprType::Number,
            Expression::String(_) => ExprType::String,
            Expression::Template(_) => ExprType::Template,
            Expression::Boolean(_) => ExprType::Boolean,
            Expression::Null(_) => ExprType::Null,
            Expression::Binary(_) => ExprType::Binary,
            Expression::Unary(_) => ExprType::Unary,
            Expression::Pipe(_) => ExprType::Pipe,
            Expression::Call(_) => ExprType::Call,
            Expression::Member(_) => ExprType::Member,
            Expression::Index(_) => ExprType::Index,
            Expression::Array(_) => ExprType::Array,
            Expression::Object(_) => ExprType::Object,
        }
    }

    /// The token the expression was built from; for infix forms this is the operator.
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(node) => &node.token,
            Expression::Number(node) => &node.token,
            Expression::String(node) => &node.token,
            Expression::Template(node) => &node.token,
            Expression::Boolean(node) => &node.token,
            Expression::Null(node) => &node.token,
            Expression::Binary(node) => &node.token,
            Expression::Unary(node) => &node.token,
            Expression::Pipe(node) => &node.token,
            Expression::Call(node) => &node.token,
            Expression::Member(node) => &node.token,
            Expression::Index(node) => &node.token,
            Expression::Array(node) => &node.token,
            Expression::Object(node) => &node.token,
        }
    }
}

impl Node for Expression {
    fn token_literal(&self) -> &str {
        &self.token().value
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Identifier(node) => Display::fmt(node, f),
            Expression::Number(node) => Display::fmt(node, f),
            Expression::String(node) => Display::fmt(node, f),
            Expression::Template(node) => Display::fmt(node, f),
            Expression::Boolean(node) => Display::fmt(node, f),
            Expression::Null(node) => Display::fmt(node, f),
            Expression::Binary(node) => Display::fmt(node, f),
            Expression::Unary(node) => Display::fmt(node, f),
            Expression::Pipe(node) => Display::fmt(node, f),
            Expression::Call(node) => Display::fmt(node, f),
            Expression::Member(node) => Display::fmt(node, f),
            Expression::Index(node) => Display::fmt(node, f),
            Expression::Array(node) => Display::fmt(node, f),
            Expression::Object(node) => Display::fmt(node, f),
        }
    }
}

/// Indents every line of `text` by one nesting level (two spaces).
pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
