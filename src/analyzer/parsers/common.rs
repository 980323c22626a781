use super::super::{core::*, prelude::*};
use crate::tokenizer::{keyword::Keyword, symbol::Delimiter, token::Token};

pub fn parse_identifier() -> impl Parser<Token, String> {
    with_context(
        satisfy(|token: &Token| match token {
            Token::Identifier(s) => Some(s.clone()),
            _ => None,
        }),
        "identifier",
    )
}

/// A quoted literal, quotes removed.
pub fn parse_text() -> impl Parser<Token, String> {
    with_context(
        satisfy(|token: &Token| match token {
            Token::Literal(s) => Some(s.clone()),
            _ => None,
        }),
        "quoted text",
    )
}

pub fn parse_keyword(keyword: Keyword) -> impl Parser<Token, ()> {
    as_unit(equal(Token::Keyword(keyword)))
}

pub fn parse_open_paren() -> impl Parser<Token, ()> {
    as_unit(equal(Token::Delimiter(Delimiter::OpenParen)))
}

pub fn parse_close_paren() -> impl Parser<Token, ()> {
    with_context(
        as_unit(equal(Token::Delimiter(Delimiter::CloseParen))),
        "close paren",
    )
}

pub fn parse_comma() -> impl Parser<Token, ()> {
    as_unit(equal(Token::Delimiter(Delimiter::Comma)))
}

pub fn parse_dash() -> impl Parser<Token, ()> {
    as_unit(equal(Token::Delimiter(Delimiter::Dash)))
}

/// `keyword 'text'`
pub fn parse_keyword_text(keyword: Keyword) -> impl Parser<Token, String> {
    preceded(parse_keyword(keyword), parse_text())
}
