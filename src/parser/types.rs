//! Type annotation parsing.
//!
//! Annotations are a name, optionally followed by any number of `[]`
//! suffixes. Declaration keywords are accepted as names so `agent: Agent`
//! style annotations and `model[]` both parse. Like expression parsing, it
//! uses NUD/LED handlers with binding powers.

use std::collections::HashMap;

use crate::{
    ast::types::TypeAnnotation,
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler =
    fn(&mut Parser, TypeAnnotation, BindingPower) -> Result<TypeAnnotation, Error>;

pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Registers the NUD and LED handlers for type annotations.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::Mcp, parse_symbol_type);
    parser.type_nud(TokenKind::Model, parse_symbol_type);
    parser.type_nud(TokenKind::Agent, parse_symbol_type);
    parser.type_nud(TokenKind::Tool, parse_symbol_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.advance();
    Ok(TypeAnnotation::Named(token.value))
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    _bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeAnnotation::Array(Box::new(left)))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeAnnotation, Error> {
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("type name"));
    };

    let mut left = nud(parser)?;

    loop {
        let token_kind = parser.current_token_kind();
        let current_bp = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if current_bp <= bp {
            break;
        }

        let Some(led) = parser.get_type_led_lookup().get(&token_kind).copied() else {
            break;
        };
        left = led(parser, left, current_bp)?;
    }

    Ok(left)
}
