//! # Symbol Token Handling
//!
//! Delimiters used by the rule grammar: parentheses for grouping, `,` between
//! exception-list entries and `-` between the two ends of an exception range.

use strum_macros::{AsRefStr, Display, EnumString};

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, value},
    error::context,
};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
pub enum Delimiter {
    /// Opening parenthesis (`(`)
    #[strum(serialize = "(")]
    OpenParen,
    /// Closing parenthesis (`)`)
    #[strum(serialize = ")")]
    CloseParen,
    /// Exception list separator (`,`)
    #[strum(serialize = ",")]
    Comma,
    /// Exception range separator (`-`)
    #[strum(serialize = "-")]
    Dash,
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_delimiter(input: &str) -> ParserResult<'_, Token> {
    context(
        "delimiter",
        map(
            alt((
                value(Delimiter::OpenParen, tag("(")),
                value(Delimiter::CloseParen, tag(")")),
                value(Delimiter::Comma, tag(",")),
                value(Delimiter::Dash, tag("-")),
            )),
            Token::Delimiter,
        ),
    )(input)
}
