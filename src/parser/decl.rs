//! Declaration parsing: `mcp`, `model`, `agent`, `tool`, `import` and `export`.

use indexmap::IndexMap;

use crate::{
    ast::{
        ast::{Expression, Statement},
        expressions::Identifier,
        statements::{
            Declaration, ExportStatement, ImportStatement, ToolDeclaration, ToolParameter,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr, lookups::BindingPower, parser::Parser, stmt::parse_block,
    stmt::parse_stmt, types::parse_type,
};

/// `mcp Name { ... }`, `model Name { ... }` and `agent Name { ... }`
pub fn parse_config_decl_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();
    let what = format!("{} name", token.value);
    let name = Identifier::new(parser.expect_error(TokenKind::Identifier, &what)?);
    let config = parse_config_body(parser)?;

    let kind = token.kind;
    let declaration = Declaration {
        token,
        name,
        config,
    };

    Ok(match kind {
        TokenKind::Mcp => Statement::Mcp(declaration),
        TokenKind::Model => Statement::Model(declaration),
        _ => Statement::Agent(declaration),
    })
}

/// `{ key: value ... }`
///
/// Keys are names or keywords (`model: claude` is common). Entries are
/// separated by commas, newlines or both. A repeated key keeps its first
/// position and takes the last value.
fn parse_config_body(parser: &mut Parser) -> Result<IndexMap<String, Expression>, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut config = IndexMap::new();

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let kind = parser.current_token_kind();
        if kind == TokenKind::EOF {
            return Err(parser.unexpected("'}'"));
        }
        if kind != TokenKind::Identifier && !kind.is_keyword() {
            let found = parser.current_token();
            return Err(Error::new(
                ErrorImpl::InvalidConfigKey {
                    found: found.describe(),
                },
                found.position(),
            ));
        }

        let key = parser.advance().value;
        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser, BindingPower::Default)?;
        config.insert(key, value);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseCurly => {}
            _ if parser.on_new_line() => {}
            _ => return Err(parser.unexpected("',' or newline between config entries")),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(config)
}

/// `tool name(a: Type, b): ReturnType { body }`
pub fn parse_tool_decl_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();
    let name = Identifier::new(parser.expect_error(TokenKind::Identifier, "tool name")?);

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let parameter_name =
            Identifier::new(parser.expect_error(TokenKind::Identifier, "parameter name")?);

        let type_annotation = if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            Some(parse_type(parser, BindingPower::Default)?)
        } else {
            None
        };

        parameters.push(ToolParameter {
            name: parameter_name,
            type_annotation,
        });

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => {}
            _ => return Err(parser.unexpected("',' or ')' in parameter list")),
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(Statement::Tool(ToolDeclaration {
        token,
        name,
        parameters,
        return_type,
        body,
    }))
}

/// `import name from "path"` or `import { a, b } from "path"`
pub fn parse_import_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();
    let braced = parser.current_token_kind() == TokenKind::OpenCurly;
    let mut names = vec![];

    if braced {
        parser.advance();
        loop {
            names.push(Identifier::new(
                parser.expect_error(TokenKind::Identifier, "imported name")?,
            ));

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
            if parser.current_token_kind() == TokenKind::CloseCurly {
                break;
            }
        }
        parser.expect(TokenKind::CloseCurly)?;
    } else {
        names.push(Identifier::new(
            parser.expect_error(TokenKind::Identifier, "imported name")?,
        ));
    }

    parser.expect(TokenKind::From)?;
    let source = parser
        .expect_error(TokenKind::String, "module path string")?
        .value;

    Ok(Statement::Import(ImportStatement {
        token,
        names,
        source,
        braced,
    }))
}

/// `export` followed by a declaration or an assignment.
pub fn parse_export_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.advance();
    let start = parser.current_token().clone();
    let statement = parser.nested(parse_stmt)?;

    match statement {
        Statement::Assignment(_)
        | Statement::Mcp(_)
        | Statement::Model(_)
        | Statement::Agent(_)
        | Statement::Tool(_) => Ok(Statement::Export(ExportStatement {
            token,
            statement: Box::new(statement),
        })),
        _ => Err(Error::new(
            ErrorImpl::InvalidExport {
                found: start.describe(),
            },
            start.position(),
        )),
    }
}
