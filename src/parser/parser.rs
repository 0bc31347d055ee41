//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level loop.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type annotation handlers
//!
//! Tokens are pulled from the lexer on demand; only the current and the
//! next token are held at any time.

use std::{collections::HashMap, mem};

use log::debug;

use crate::{
    ast::ast::{Program, Statement},
    errors::errors::{Diagnostics, Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    types::{
        create_token_type_lookups, TypeBPLookup, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler,
        TypeNUDLookup,
    },
};

/// Deepest nesting of expressions, blocks, `else if` chains and exports.
pub const MAX_NESTING: usize = 100;

/// The main parser structure that maintains parsing state.
///
/// Owns the lexer it drives, so lexical and syntactic diagnostics end up in
/// the same sink.
pub struct Parser {
    /// The token source
    lexer: Lexer,
    /// The next unconsumed token
    current: Token,
    /// Line on which `current` ends (differs from its start for multi-line strings)
    current_end_line: usize,
    /// One token of lookahead after `current`
    peek: Token,
    peek_end_line: usize,
    /// Line on which the most recently consumed token ends
    last_line: usize,
    /// Open `{`, `(` and `[` among consumed tokens, innermost last
    open: Vec<TokenKind>,
    /// Active nested parse calls, see [`Parser::nested`]
    nesting: usize,
    /// Number of tokens consumed so far
    consumed: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Lookup table for type left denotation handlers
    type_led_lookup: TypeLEDLookup,
    /// Lookup table for type binding powers
    type_binding_power_lookup: TypeBPLookup,
}

impl Parser {
    /// Creates a new Parser primed with the first two tokens of `lexer`.
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let current_end_line = lexer.position().line;
        let peek = lexer.next_token();
        let peek_end_line = lexer.position().line;

        let mut parser = Parser {
            lexer,
            current,
            current_end_line,
            peek,
            peek_end_line,
            last_line: 0,
            open: vec![],
            nesting: 0,
            consumed: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
        };

        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Advances to the next token and returns the consumed one.
    ///
    /// At end of input the `EOF` token is returned without moving.
    pub fn advance(&mut self) -> Token {
        if self.current.kind == TokenKind::EOF {
            return self.current.clone();
        }

        let next = self.lexer.next_token();
        let next_end_line = self.lexer.position().line;

        let peek = mem::replace(&mut self.peek, next);
        let peek_end_line = mem::replace(&mut self.peek_end_line, next_end_line);
        let consumed = mem::replace(&mut self.current, peek);
        self.last_line = mem::replace(&mut self.current_end_line, peek_end_line);
        self.consumed += 1;

        let opener = match consumed.kind {
            TokenKind::OpenCurly | TokenKind::OpenParen | TokenKind::OpenBracket => {
                self.open.push(consumed.kind);
                None
            }
            TokenKind::CloseCurly => Some(TokenKind::OpenCurly),
            TokenKind::CloseParen => Some(TokenKind::OpenParen),
            TokenKind::CloseBracket => Some(TokenKind::OpenBracket),
            _ => None,
        };

        // A closer with no matching opener is stray and leaves the depth alone
        if let Some(opener) = opener {
            if let Some(index) = self.open.iter().rposition(|kind| *kind == opener) {
                self.open.truncate(index);
            }
        }

        consumed
    }

    /// Builds the error for a current token that does not fit `expected`.
    pub fn unexpected(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from(expected),
                found: self.current.describe(),
            },
            self.current.position(),
        )
    }

    /// Expects a token of the specified kind, describing it as `expected` on failure.
    pub fn expect_error(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            Err(self.unexpected(expected))
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with the default description.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, &expected_kind.to_string())
    }

    /// Number of brackets open among consumed tokens.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Runs `parse_fn` one nesting level deeper.
    ///
    /// Fails with `NestingTooDeep` instead of recursing past [`MAX_NESTING`].
    pub fn nested<T>(
        &mut self,
        parse_fn: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.nesting >= MAX_NESTING {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit: MAX_NESTING },
                self.current.position(),
            ));
        }

        self.nesting += 1;
        let result = parse_fn(self);
        self.nesting -= 1;

        result
    }

    /// Whether the current token starts on a later line than the last consumed one.
    pub fn on_new_line(&self) -> bool {
        self.current.line > self.last_line
    }

    /// Whether nothing more belongs to the statement being parsed.
    pub fn at_statement_end(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::EOF | TokenKind::CloseCurly | TokenKind::Semicolon
        ) || self.on_new_line()
    }

    /// Binding power of the current token as an infix operator.
    ///
    /// Calls and index accesses only bind on the line of the expression they
    /// follow; a line starting with `(` or `[` begins a new statement.
    pub fn current_binding_power(&self) -> BindingPower {
        let kind = self.current.kind;
        if matches!(kind, TokenKind::OpenParen | TokenKind::OpenBracket) && self.on_new_line() {
            return BindingPower::Default;
        }

        *self
            .binding_power_lookup
            .get(&kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Records a diagnostic in the sink shared with the lexer.
    pub fn report(&mut self, error: Error) {
        self.lexer.diagnostics_mut().push(error);
    }

    pub fn errors(&self) -> Vec<String> {
        self.lexer.errors()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        self.lexer.diagnostics()
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.lexer.into_diagnostics()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the type binding power lookup table.
    pub fn get_type_bp_lookup(&self) -> &TypeBPLookup {
        &self.type_binding_power_lookup
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Returns a reference to the type LED lookup table.
    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a leading token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type left denotation handler.
    pub fn type_led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: TypeLEDHandler) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Parses every remaining statement. Always returns a program; statements
    /// that fail to parse are left out and reported through [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        debug!("parsing program");
        let statements = self.parse_statement_list(false);
        debug!(
            "parsed {} statements with {} diagnostics",
            statements.len(),
            self.diagnostics().len()
        );

        Program { statements }
    }

    /// Parses statements until end of input, or until the closing `}` of the
    /// enclosing block when `in_block` is set (the `}` is not consumed).
    pub(crate) fn parse_statement_list(&mut self, in_block: bool) -> Vec<Statement> {
        let mut statements = vec![];

        loop {
            match self.current.kind {
                TokenKind::EOF => break,
                TokenKind::CloseCurly if in_block => break,
                TokenKind::Semicolon => {
                    let error = Error::new(ErrorImpl::SemicolonSeparator, self.current.position());
                    self.report(error);
                    self.advance();
                    continue;
                }
                _ => {}
            }

            let start_depth = self.depth();
            let start_consumed = self.consumed;

            match parse_stmt(self) {
                Ok(statement) => {
                    debug!("parsed {:?} statement at {}", statement.get_stmt_type(), statement.position());
                    statements.push(statement);
                }
                Err(error) => {
                    debug!("recovering from: {}", error);
                    self.report(error);
                    self.synchronize(start_depth, start_consumed);
                    continue;
                }
            }

            self.check_statement_end(in_block);
        }

        statements
    }

    /// Reports a statement that starts on the line the previous one ended on.
    fn check_statement_end(&mut self, in_block: bool) {
        match self.current.kind {
            TokenKind::EOF | TokenKind::Semicolon => return,
            TokenKind::CloseCurly if in_block => return,
            _ => {}
        }

        if self.current.line == self.last_line {
            let error = Error::new(
                ErrorImpl::SameLineStatement {
                    found: self.current.describe(),
                },
                self.current.position(),
            );
            self.report(error);
        }
    }

    /// Skips the rest of a failed statement.
    ///
    /// Stops at the first token that starts a new line at the nesting depth
    /// the statement began at, at the `}` closing the enclosing block, or at
    /// end of input. A statement keyword at the start of a line also ends the
    /// skip when brackets of the failed statement were left open, unless it
    /// is used as a config key. At least one token is consumed.
    fn synchronize(&mut self, start_depth: usize, start_consumed: usize) {
        if self.consumed == start_consumed {
            self.advance();
        }

        loop {
            let kind = self.current.kind;
            let depth = self.depth();
            if kind == TokenKind::EOF || depth < start_depth {
                break;
            }

            if depth > start_depth
                && self.on_new_line()
                && self.stmt_lookup.contains_key(&kind)
                && self.peek.kind != TokenKind::Colon
            {
                self.open.truncate(start_depth);
                break;
            }

            if depth == start_depth {
                if kind == TokenKind::CloseCurly && start_depth > 0 {
                    break;
                }
                if self.on_new_line() {
                    break;
                }
            }

            self.advance();
        }
    }
}

/// Parses `source` into a program.
///
/// This is the main entry point. The returned diagnostics hold lexical and
/// syntactic problems in the order they were found; a program with any
/// diagnostics should not be executed.
pub fn parse(source: &str) -> (Program, Diagnostics) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    (program, parser.into_diagnostics())
}
