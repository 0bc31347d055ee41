//! Error types and the diagnostics sink for the front end.
//!
//! This module defines the errors reported while scanning and parsing.
//! It includes:
//!
//! - Error structures with line/column information
//! - Specific error variants for lexical and syntactic problems
//! - A deduplicating, ordered sink shared by the lexer and the parser
//! - Helpful tips for rendering errors to the user

pub mod errors;
