//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts script source
//! into a stream of tokens for parsing. It handles:
//!
//! - Character-by-character scanning with line/column tracking
//! - Recognition of keywords, identifiers, literals, and operators
//! - Quoted, triple-quoted (dedented) and template string literals
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
