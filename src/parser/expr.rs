//! Expression parsing implementation.
//!
//! Pratt parsing: each token kind may have a NUD handler (it starts an
//! expression) and a LED handler with a binding power (it continues one).
//! `parse_expr` keeps folding LED handlers into the left-hand side while the
//! next operator binds tighter than the caller's binding power, which makes
//! every binary operator left-associative.

use indexmap::IndexMap;

use crate::{
    ast::{
        ast::Expression,
        expressions::{
            ArrayLiteral, BinaryExpression, BooleanLiteral, CallExpression, Identifier,
            IndexExpression, MemberExpression, NullLiteral, NumberLiteral, ObjectLiteral,
            PipeExpression, StringLiteral, TemplateLiteral, UnaryExpression,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression whose operators bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    parser.nested(|parser| parse_expr_at_level(parser, bp))
}

fn parse_expr_at_level(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let token = parser.current_token();
        return Err(Error::new(
            ErrorImpl::NoPrefixParse {
                found: token.describe(),
            },
            token.position(),
        ));
    };

    let mut left = nud(parser)?;

    loop {
        let current_bp = parser.current_binding_power();
        if current_bp <= bp {
            break;
        }

        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };
        left = led(parser, left, current_bp)?;
    }

    Ok(left)
}

/// Numbers, strings, templates and names. `true`, `false` and `null` are
/// lexed as identifiers and become literals here.
pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.advance();

    match token.kind {
        TokenKind::Number => {
            let value = token.value.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.position(),
                )
            })?;

            Ok(Expression::Number(NumberLiteral { token, value }))
        }
        TokenKind::String => Ok(Expression::String(StringLiteral {
            value: token.value.clone(),
            token,
        })),
        TokenKind::TemplateLiteral => Ok(Expression::Template(TemplateLiteral {
            value: token.value.clone(),
            token,
        })),
        _ => match token.value.as_str() {
            "true" => Ok(Expression::Boolean(BooleanLiteral { token, value: true })),
            "false" => Ok(Expression::Boolean(BooleanLiteral { token, value: false })),
            "null" => Ok(Expression::Null(NullLiteral { token })),
            _ => Ok(Expression::Identifier(Identifier::new(token))),
        },
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.advance();
    let right = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expression::Unary(UnaryExpression {
        operator: token.value.clone(),
        token,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expression::Binary(BinaryExpression {
        operator: token.value.clone(),
        token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

/// `left | right`. Binds looser than every other operator, so
/// `a + b | Agent` pipes the sum.
pub fn parse_pipe_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expression::Pipe(PipeExpression {
        token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    let token = parser.advance();
    let arguments = parse_expression_list(parser, TokenKind::CloseParen)?;

    Ok(Expression::Call(CallExpression {
        token,
        function: Box::new(left),
        arguments,
    }))
}

/// `object.property`; keywords are valid property names.
pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    let token = parser.advance();

    let kind = parser.current_token_kind();
    if kind != TokenKind::Identifier && !kind.is_keyword() {
        return Err(parser.unexpected("property name after '.'"));
    }
    let property = Identifier::new(parser.advance());

    Ok(Expression::Member(MemberExpression {
        token,
        object: Box::new(left),
        property,
    }))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    let token = parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expression::Index(IndexExpression {
        token,
        left: Box::new(left),
        index: Box::new(index),
    }))
}

pub fn parse_array_literal(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.advance();
    let elements = parse_expression_list(parser, TokenKind::CloseBracket)?;

    Ok(Expression::Array(ArrayLiteral { token, elements }))
}

/// `{ key: value, "quoted key": value }`
///
/// Commas are required between pairs and a trailing comma is allowed. A
/// repeated key keeps its first position and takes the last value.
pub fn parse_object_literal(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.advance();
    let mut pairs = IndexMap::new();

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let key = match parser.current_token_kind() {
            TokenKind::Identifier | TokenKind::String => parser.advance().value,
            TokenKind::EOF => return Err(parser.unexpected("'}'")),
            _ => {
                let found = parser.current_token();
                return Err(Error::new(
                    ErrorImpl::InvalidObjectKey {
                        found: found.describe(),
                    },
                    found.position(),
                ));
            }
        };

        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser, BindingPower::Default)?;
        pairs.insert(key, value);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseCurly => {}
            _ => return Err(parser.unexpected("',' or '}' in object literal")),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expression::Object(ObjectLiteral { token, pairs }))
}

/// Comma-separated expressions up to and including `closing`. The opening
/// delimiter must already be consumed. A trailing comma is allowed.
pub fn parse_expression_list(
    parser: &mut Parser,
    closing: TokenKind,
) -> Result<Vec<Expression>, Error> {
    let mut list = vec![];

    while parser.current_token_kind() != closing {
        list.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != closing {
            return Err(parser.unexpected(&closing.to_string()));
        }
    }

    parser.expect(closing)?;

    Ok(list)
}
