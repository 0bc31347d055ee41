use std::fmt::Display;

use indexmap::IndexMap;

use crate::lexer::tokens::Token;

use super::{
    ast::{indent, Expression, Statement},
    expressions::{escape, Identifier},
    types::TypeAnnotation,
};

/// `name = value` or `name: Type = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    pub token: Token,
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    pub value: Expression,
}

impl Display for AssignmentStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.type_annotation {
            Some(annotation) => write!(f, "{}: {} = {}", self.name, annotation, self.value),
            None => write!(f, "{} = {}", self.name, self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{}}");
        }

        writeln!(f, "{{")?;
        for statement in &self.statements {
            writeln!(f, "{}", indent(&statement.to_string()))?;
        }
        write!(f, "}}")
    }
}

/// `if (condition) { ... }` with an optional `else`.
///
/// `else if` chains nest: the alternative is either another
/// [`Statement::If`] or a [`Statement::Block`].
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub token: Token,
    pub condition: Expression,
    pub consequence: BlockStatement,
    pub alternative: Option<Box<Statement>>,
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {}", alternative)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub token: Token,
    pub condition: Expression,
    pub body: BlockStatement,
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.body)
    }
}

/// `for (variable of iterable) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    pub token: Token,
    pub variable: Identifier,
    pub iterable: Expression,
    pub body: BlockStatement,
}

impl Display for ForOfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "for ({} of {}) {}", self.variable, self.iterable, self.body)
    }
}

/// Loop nesting is checked by the evaluator, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakStatement {
    pub token: Token,
}

impl Display for BreakStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "break")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStatement {
    pub token: Token,
}

impl Display for ContinueStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "continue")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub return_value: Option<Expression>,
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.return_value {
            Some(value) => write!(f, "return {}", value),
            None => write!(f, "return"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub token: Token,
    pub expression: Expression,
}

impl Display for ThrowStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "throw {}", self.expression)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub parameter: Identifier,
    pub block: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinallyClause {
    pub block: BlockStatement,
}

/// `try { ... } catch (e) { ... } finally { ... }`
///
/// Only constructible with a catch clause, a finally clause, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub token: Token,
    block: BlockStatement,
    catch_clause: Option<CatchClause>,
    finally_clause: Option<FinallyClause>,
}

impl TryStatement {
    /// Returns `None` when neither clause is given.
    pub fn new(
        token: Token,
        block: BlockStatement,
        catch_clause: Option<CatchClause>,
        finally_clause: Option<FinallyClause>,
    ) -> Option<Self> {
        if catch_clause.is_none() && finally_clause.is_none() {
            return None;
        }

        Some(TryStatement {
            token,
            block,
            catch_clause,
            finally_clause,
        })
    }

    pub fn block(&self) -> &BlockStatement {
        &self.block
    }

    pub fn catch_clause(&self) -> Option<&CatchClause> {
        self.catch_clause.as_ref()
    }

    pub fn finally_clause(&self) -> Option<&FinallyClause> {
        self.finally_clause.as_ref()
    }
}

impl Display for TryStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "try {}", self.block)?;
        if let Some(catch) = &self.catch_clause {
            write!(f, " catch ({}) {}", catch.parameter, catch.block)?;
        }
        if let Some(finally) = &self.finally_clause {
            write!(f, " finally {}", finally.block)?;
        }
        Ok(())
    }
}

/// `mcp`, `model` and `agent` declarations.
///
/// The keyword is kept in `token`; which one it was is also told by the
/// [`Statement`] variant holding the declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub token: Token,
    pub name: Identifier,
    pub config: IndexMap<String, Expression>,
}

impl Declaration {
    pub fn get(&self, key: &str) -> Option<&Expression> {
        self.config.get(key)
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ", self.token.value, self.name)?;
        if self.config.is_empty() {
            return write!(f, "{{}}");
        }

        writeln!(f, "{{")?;
        for (key, value) in &self.config {
            writeln!(f, "{}", indent(&format!("{}: {}", key, value)))?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolParameter {
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
}

impl Display for ToolParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.type_annotation {
            Some(annotation) => write!(f, "{}: {}", self.name, annotation),
            None => write!(f, "{}", self.name),
        }
    }
}

/// `tool name(a: string, b): string { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDeclaration {
    pub token: Token,
    pub name: Identifier,
    pub parameters: Vec<ToolParameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: BlockStatement,
}

impl Display for ToolDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<_>>();

        write!(f, "tool {}({})", self.name, parameters.join(", "))?;
        if let Some(return_type) = &self.return_type {
            write!(f, ": {}", return_type)?;
        }
        write!(f, " {}", self.body)
    }
}

/// `import name from "source"` or `import { a, b } from "source"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    pub token: Token,
    pub names: Vec<Identifier>,
    pub source: String,
    pub braced: bool,
}

impl Display for ImportStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self
            .names
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        if self.braced {
            write!(f, "import {{ {} }} from \"{}\"", names, escape(&self.source, '"'))
        } else {
            write!(f, "import {} from \"{}\"", names, escape(&self.source, '"'))
        }
    }
}

/// `export` in front of a declaration or an assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportStatement {
    pub token: Token,
    pub statement: Box<Statement>,
}

impl Display for ExportStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "export {}", self.statement)
    }
}
