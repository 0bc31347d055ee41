/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program root, the Node trait and the Statement/Expression sum types
/// - expressions: Definitions for the expression node kinds
/// - statements: Definitions for statements and declarations
/// - types: Type annotations written after `:`
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
