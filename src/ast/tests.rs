//! Unit tests for the AST module.
//!
//! Covers rendering of hand-built nodes, token literals and the
//! construction rules of try statements.

use indexmap::IndexMap;

use crate::{
    lexer::tokens::{Token, TokenKind, ESCAPED_DOLLAR_PLACEHOLDER},
    MK_TOKEN, Position,
};

use super::{
    ast::{Expression, Node, Program, Statement},
    expressions::{
        ArrayLiteral, BinaryExpression, Identifier, NumberLiteral, ObjectLiteral, PipeExpression,
        StringLiteral, TemplateLiteral,
    },
    statements::{
        AssignmentStatement, BlockStatement, CatchClause, Declaration, FinallyClause,
        TryStatement,
    },
    types::TypeAnnotation,
};

fn token(kind: TokenKind, value: &str) -> Token {
    MK_TOKEN!(kind, String::from(value), Position::new(1, 1))
}

fn ident(name: &str) -> Identifier {
    Identifier::new(token(TokenKind::Identifier, name))
}

fn number(value: &str) -> Expression {
    Expression::Number(NumberLiteral {
        token: token(TokenKind::Number, value),
        value: value.parse().unwrap(),
    })
}

fn empty_block() -> BlockStatement {
    BlockStatement {
        token: token(TokenKind::OpenCurly, "{"),
        statements: vec![],
    }
}

#[test]
fn test_render_assignment() {
    let statement = Statement::Assignment(AssignmentStatement {
        token: token(TokenKind::Identifier, "x"),
        name: ident("x"),
        type_annotation: None,
        value: Expression::Binary(BinaryExpression {
            token: token(TokenKind::Plus, "+"),
            left: Box::new(number("1")),
            operator: String::from("+"),
            right: Box::new(number("2.50")),
        }),
    });

    assert_eq!(statement.to_string(), "x = (1 + 2.50)");
    assert_eq!(statement.token_literal(), "x");
}

#[test]
fn test_render_pipe() {
    let pipe = Expression::Pipe(PipeExpression {
        token: token(TokenKind::Pipe, "|"),
        left: Box::new(Expression::Identifier(ident("input"))),
        right: Box::new(Expression::Identifier(ident("Agent"))),
    });

    assert_eq!(pipe.to_string(), "(input | Agent)");
    assert_eq!(pipe.token_literal(), "|");
}

#[test]
fn test_render_string_escapes() {
    let string = StringLiteral {
        token: token(TokenKind::String, "a\"b\n"),
        value: String::from("a\"b\n"),
    };
    assert_eq!(string.to_string(), "\"a\\\"b\\n\"");

    let template = TemplateLiteral {
        token: token(TokenKind::TemplateLiteral, ""),
        value: format!("cost: {}5 `x`", ESCAPED_DOLLAR_PLACEHOLDER),
    };
    assert_eq!(template.to_string(), "`cost: \\$5 \\`x\\``");
}

#[test]
fn test_render_object_quotes_non_identifier_keys() {
    let mut pairs = IndexMap::new();
    pairs.insert(String::from("name"), number("1"));
    pairs.insert(String::from("two words"), number("2"));
    pairs.insert(String::from("if"), number("3"));

    let object = ObjectLiteral {
        token: token(TokenKind::OpenCurly, "{"),
        pairs,
    };

    assert_eq!(object.order(), vec!["name", "two words", "if"]);
    assert_eq!(object.to_string(), "{name: 1, \"two words\": 2, \"if\": 3}");
}

#[test]
fn test_render_declaration() {
    let mut config = IndexMap::new();
    config.insert(String::from("model"), Expression::Identifier(ident("claude")));
    config.insert(
        String::from("tools"),
        Expression::Array(ArrayLiteral {
            token: token(TokenKind::OpenBracket, "["),
            elements: vec![Expression::Identifier(ident("search"))],
        }),
    );

    let declaration = Statement::Agent(Declaration {
        token: token(TokenKind::Agent, "agent"),
        name: ident("Researcher"),
        config,
    });

    assert_eq!(
        declaration.to_string(),
        "agent Researcher {\n  model: claude\n  tools: [search]\n}"
    );
    assert_eq!(declaration.token_literal(), "agent");
}

#[test]
fn test_render_nested_blocks_indent() {
    let inner = Statement::Block(BlockStatement {
        token: token(TokenKind::OpenCurly, "{"),
        statements: vec![Statement::Block(BlockStatement {
            token: token(TokenKind::OpenCurly, "{"),
            statements: vec![],
        })],
    });
    let outer = BlockStatement {
        token: token(TokenKind::OpenCurly, "{"),
        statements: vec![inner],
    };

    assert_eq!(outer.to_string(), "{\n  {\n    {}\n  }\n}");
}

#[test]
fn test_type_annotation() {
    let annotation = TypeAnnotation::Array(Box::new(TypeAnnotation::Array(Box::new(
        TypeAnnotation::Named(String::from("string")),
    ))));

    assert_eq!(annotation.to_string(), "string[][]");
    assert_eq!(annotation.base_name(), "string");
}

#[test]
fn test_try_statement_requires_handler() {
    let try_token = token(TokenKind::Try, "try");

    assert!(TryStatement::new(try_token.clone(), empty_block(), None, None).is_none());

    let with_finally = TryStatement::new(
        try_token.clone(),
        empty_block(),
        None,
        Some(FinallyClause {
            block: empty_block(),
        }),
    );
    assert!(with_finally.is_some());

    let with_catch = TryStatement::new(
        try_token,
        empty_block(),
        Some(CatchClause {
            parameter: ident("e"),
            block: empty_block(),
        }),
        None,
    );
    let Some(statement) = with_catch else {
        panic!("catch clause alone should be enough");
    };
    assert_eq!(statement.to_string(), "try {} catch (e) {}");
    assert!(statement.finally_clause().is_none());
}

#[test]
fn test_program_rendering() {
    let program = Program {
        statements: vec![
            Statement::Expression(super::statements::ExpressionStatement {
                token: token(TokenKind::Identifier, "a"),
                expression: Expression::Identifier(ident("a")),
            }),
            Statement::Expression(super::statements::ExpressionStatement {
                token: token(TokenKind::Identifier, "b"),
                expression: Expression::Identifier(ident("b")),
            }),
        ],
    };

    assert_eq!(program.to_string(), "a\nb");
    assert_eq!(program.token_literal(), "a");
    assert_eq!(Program::default().token_literal(), "");
}
