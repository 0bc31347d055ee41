//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals
//! - Quoted, triple-quoted and template literals with escapes
//! - Operators and punctuation
//! - Comments and positions
//! - Unterminated literals

use super::{
    lexer::{dedent, tokenize, Lexer},
    tokens::{TokenKind, ESCAPED_DOLLAR_PLACEHOLDER},
};

#[test]
fn test_tokenize_keywords() {
    let source = "mcp model agent tool acp if else for of while break continue try catch finally throw return import export from parallel";
    let (tokens, diagnostics) = tokenize(source);

    let expected = vec![
        TokenKind::Mcp,
        TokenKind::Model,
        TokenKind::Agent,
        TokenKind::Tool,
        TokenKind::Acp,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::For,
        TokenKind::Of,
        TokenKind::While,
        TokenKind::Break,
        TokenKind::Continue,
        TokenKind::Try,
        TokenKind::Catch,
        TokenKind::Finally,
        TokenKind::Throw,
        TokenKind::Return,
        TokenKind::Import,
        TokenKind::Export,
        TokenKind::From,
        TokenKind::Parallel,
        TokenKind::EOF,
    ];

    assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), expected);
    assert!(tokens[..tokens.len() - 1].iter().all(|t| t.kind.is_keyword()));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_tokenize_identifiers() {
    let (tokens, _) = tokenize("foo baz_123 _underscore CamelCase héllo true null");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].value, "CamelCase");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "héllo");
    // Literal keywords are resolved by the parser
    assert_eq!(tokens[5].kind, TokenKind::Identifier);
    assert_eq!(tokens[6].kind, TokenKind::Identifier);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let (tokens, _) = tokenize("42 3.14 0 7.x");

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    // A dot without trailing digits belongs to member access
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[3].value, "7");
    assert_eq!(tokens[4].kind, TokenKind::Dot);
    assert_eq!(tokens[5].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_strings() {
    let (tokens, _) = tokenize(r#""hello" 'world' "multiple words" """#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::String);
    assert_eq!(tokens[3].value, "");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let (tokens, diagnostics) = tokenize(r#""hello\nworld" "tab\there" "cr\r" "backslash\\" "say \"hi\"" 'it\'s'"#);

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "cr\r");
    assert_eq!(tokens[3].value, "backslash\\");
    assert_eq!(tokens[4].value, "say \"hi\"");
    assert_eq!(tokens[5].value, "it's");
    assert!(diagnostics.is_empty());
}

#[test]
fn test_tokenize_unknown_escape_is_preserved() {
    let (tokens, _) = tokenize(r#""a\qb" "\$x""#);

    assert_eq!(tokens[0].value, "a\\qb");
    // `\$` is only special inside template literals
    assert_eq!(tokens[1].value, "\\$x");
}

#[test]
fn test_tokenize_unicode_escapes() {
    let (tokens, _) = tokenize(r#""\u001b[0m" "\u00" "étÉ" "\uzz" "\ud800""#);

    assert_eq!(tokens[0].value, "\u{1b}[0m");
    assert_eq!(tokens[1].value, "\\u00");
    assert_eq!(tokens[2].value, "étÉ");
    assert_eq!(tokens[3].value, "\\uzz");
    // Surrogates are not scalar values and stay verbatim
    assert_eq!(tokens[4].value, "\\ud800");
}

#[test]
fn test_tokenize_triple_quoted_dedent() {
    let (tokens, diagnostics) = tokenize("\"\"\"\n    a\n    b\n\"\"\"");

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\nb");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_tokenize_triple_quoted_keeps_relative_indent() {
    let source = "'''\n        You are helpful.\n\n          - be terse\n        Done.\n    '''";
    let (tokens, _) = tokenize(source);

    assert_eq!(tokens[0].value, "You are helpful.\n\n  - be terse\nDone.");
}

#[test]
fn test_tokenize_triple_quoted_is_raw() {
    let (tokens, _) = tokenize(r#""""a\nb "quoted" c""""#);

    assert_eq!(tokens[0].value, "a\\nb \"quoted\" c");
}

#[test]
fn test_dedent() {
    assert_eq!(dedent("  x\n    y\n  z"), "x\n  y\nz");
    assert_eq!(dedent("\n\t\tx\n\t\ty\n"), "x\ny");
    assert_eq!(dedent("   "), "");
    assert_eq!(dedent("no indent"), "no indent");
}

#[test]
fn test_tokenize_template_literal() {
    let (tokens, diagnostics) = tokenize("`Hello ${name}\\n \\` \\$5`");

    assert_eq!(tokens[0].kind, TokenKind::TemplateLiteral);
    assert_eq!(
        tokens[0].value,
        format!("Hello ${{name}}\n ` {}5", ESCAPED_DOLLAR_PLACEHOLDER)
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_tokenize_operators() {
    let (tokens, _) = tokenize("+ - * / % == != < > <= >= = && || ?? | !");

    let expected = vec![
        TokenKind::Plus,
        TokenKind::Dash,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::Less,
        TokenKind::Greater,
        TokenKind::LessEquals,
        TokenKind::GreaterEquals,
        TokenKind::Assignment,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Nullish,
        TokenKind::Pipe,
        TokenKind::Not,
        TokenKind::EOF,
    ];

    assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), expected);
    assert_eq!(tokens[5].value, "==");
    assert_eq!(tokens[14].value, "??");
}

#[test]
fn test_tokenize_punctuation() {
    let (tokens, _) = tokenize("( ) { } [ ] . , ; :");

    let expected = vec![
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenCurly,
        TokenKind::CloseCurly,
        TokenKind::OpenBracket,
        TokenKind::CloseBracket,
        TokenKind::Dot,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::EOF,
    ];

    assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), expected);
}

#[test]
fn test_tokenize_illegal_characters() {
    let (tokens, diagnostics) = tokenize("a & b ? @");

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "&");
    assert_eq!(tokens[3].kind, TokenKind::Illegal);
    assert_eq!(tokens[3].value, "?");
    assert_eq!(tokens[4].kind, TokenKind::Illegal);
    assert_eq!(tokens[4].value, "@");
    // Illegal characters are reported by the parser
    assert!(diagnostics.is_empty());
}

#[test]
fn test_tokenize_comments() {
    let (tokens, _) = tokenize("x = 5 # this is a comment\n# another\n  # indented\ny = 10 #");

    let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[3].value, "y");
    assert_eq!(tokens[3].line, 4);
}

#[test]
fn test_tokenize_positions() {
    let (tokens, _) = tokenize("agent A {\n  model: claude\n}");

    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (1, 7));
    assert_eq!((tokens[2].line, tokens[2].column), (1, 9));
    assert_eq!((tokens[3].line, tokens[3].column), (2, 3));
    assert_eq!((tokens[4].line, tokens[4].column), (2, 8));
    assert_eq!((tokens[5].line, tokens[5].column), (2, 10));
    assert_eq!((tokens[6].line, tokens[6].column), (3, 1));
    assert_eq!(tokens[7].kind, TokenKind::EOF);
    assert_eq!((tokens[7].line, tokens[7].column), (3, 2));
}

#[test]
fn test_positions_after_multiline_string() {
    let (tokens, _) = tokenize("x = \"\"\"\n  a\n  b\n\"\"\" y");

    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!((tokens[3].line, tokens[3].column), (4, 5));
}

#[test]
fn test_unterminated_string() {
    let (tokens, diagnostics) = tokenize("x = 1\ny = \"abc");

    assert_eq!(tokens[5].kind, TokenKind::String);
    assert_eq!(tokens[5].value, "abc");
    assert_eq!(tokens[6].kind, TokenKind::EOF);
    assert_eq!(
        diagnostics.errors(),
        vec!["unterminated string starting at line 2, column 5"]
    );
}

#[test]
fn test_unterminated_forms() {
    for (source, form) in [
        ("'abc", "string"),
        ("\"abc\\", "string"),
        ("\"\"\"abc\"\"", "triple-quoted string"),
        ("'''abc", "triple-quoted string"),
        ("`abc", "template literal"),
    ] {
        let (tokens, diagnostics) = tokenize(source);

        assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF, "{}", source);
        assert_eq!(diagnostics.len(), 1, "{}", source);
        let message = &diagnostics.errors()[0];
        assert!(message.contains("unterminated"), "{}", message);
        assert!(message.contains(form), "{}", message);
        assert!(message.contains("line 1"), "{}", message);
    }
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("x");

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert!(lexer.at_eof());
    assert!(lexer.errors().is_empty());
}
