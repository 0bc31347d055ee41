//! Statement parsing implementation.
//!
//! Statements are newline-terminated. Keyword statements are dispatched
//! through the statement lookup table; a name followed by `=` or `:` starts
//! an assignment, and anything else is an expression statement.

use crate::{
    ast::{
        ast::{Expression, Statement},
        expressions::Identifier,
        statements::{
            AssignmentStatement, BlockStatement, BreakStatement, CatchClause, ContinueStatement,
            ExpressionStatement, FinallyClause, ForOfStatement, IfStatement, ReturnStatement,
            ThrowStatement, TryStatement, WhileStatement,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let kind = parser.current_token_kind();
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&kind).copied() {
        return stmt_fn(parser);
    }

    if kind == TokenKind::Identifier
        && matches!(
            parser.peek_token_kind(),
            TokenKind::Assignment | TokenKind::Colon
        )
    {
        return parse_assignment_stmt(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Statement::Expression(ExpressionStatement { token, expression }))
}

/// `name = value` or `name: Type = value`
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.expect_error(TokenKind::Identifier, "assignment target")?;
    let name = Identifier::new(token.clone());

    let type_annotation = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Statement::Assignment(AssignmentStatement {
        token,
        name,
        type_annotation,
        value,
    }))
}

/// `{ statements }`. Errors inside the block are recovered from without
/// leaving it.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStatement, Error> {
    parser.nested(|parser| {
        let token = parser.expect(TokenKind::OpenCurly)?;
        let statements = parser.parse_statement_list(true);
        parser.expect(TokenKind::CloseCurly)?;

        Ok(BlockStatement { token, statements })
    })
}

fn parse_condition(parser: &mut Parser) -> Result<Expression, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

/// `if (c) { } else if (d) { } else { }`; an `else if` nests another if statement.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.nested(parse_if_chain)
}

fn parse_if_chain(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.expect(TokenKind::If)?;
    let condition = parse_condition(parser)?;
    let consequence = parse_block(parser)?;

    let alternative = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(Box::new(parse_if_stmt(parser)?))
        } else {
            Some(Box::new(Statement::Block(parse_block(parser)?)))
        }
    } else {
        None
    };

    Ok(Statement::If(IfStatement {
        token,
        condition,
        consequence,
        alternative,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();
    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(Statement::While(WhileStatement {
        token,
        condition,
        body,
    }))
}

/// `for (name of iterable) { }`
pub fn parse_for_of_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();
    parser.expect(TokenKind::OpenParen)?;
    let variable = Identifier::new(parser.expect_error(TokenKind::Identifier, "loop variable")?);
    parser.expect(TokenKind::Of)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    let body = parse_block(parser)?;

    Ok(Statement::ForOf(ForOfStatement {
        token,
        variable,
        iterable,
        body,
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();
    Ok(Statement::Break(BreakStatement { token }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();
    Ok(Statement::Continue(ContinueStatement { token }))
}

/// `return` with an optional value on the same line.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();

    let return_value = if parser.at_statement_end() {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    Ok(Statement::Return(ReturnStatement {
        token,
        return_value,
    }))
}

pub fn parse_throw_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();

    if parser.at_statement_end() {
        return Err(Error::new(
            ErrorImpl::MissingThrowExpression,
            token.position(),
        ));
    }

    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Statement::Throw(ThrowStatement { token, expression }))
}

/// `try { } catch (e) { } finally { }` with at least one of the two clauses.
pub fn parse_try_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();
    let block = parse_block(parser)?;

    let catch_clause = if parser.current_token_kind() == TokenKind::Catch {
        parser.advance();
        parser.expect(TokenKind::OpenParen)?;
        let parameter =
            Identifier::new(parser.expect_error(TokenKind::Identifier, "catch parameter")?);
        parser.expect(TokenKind::CloseParen)?;
        let block = parse_block(parser)?;

        Some(CatchClause { parameter, block })
    } else {
        None
    };

    let finally_clause = if parser.current_token_kind() == TokenKind::Finally {
        parser.advance();
        Some(FinallyClause {
            block: parse_block(parser)?,
        })
    } else {
        None
    };

    let position = token.position();
    TryStatement::new(token, block, catch_clause, finally_clause)
        .map(Statement::Try)
        .ok_or_else(|| Error::new(ErrorImpl::TryWithoutHandler, position))
}

/// `acp` and `parallel` are keywords with no statement form yet.
pub fn parse_reserved_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();

    Err(Error::new(
        ErrorImpl::ReservedKeyword {
            keyword: token.value.clone(),
        },
        token.position(),
    ))
}
