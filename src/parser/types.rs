//! Type annotation parsing.
//!
//! Annotations are a single identifier. The built-in names (`int`, `float`,
//! `string`, `bool`, `void`) map to built-in types; every other name is a
//! user-defined nominal type.

use crate::{ast::types::Type, errors::errors::Error, lexer::tokens::TokenKind};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Type::from_name(&token.value))
}
