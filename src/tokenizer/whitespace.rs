//! # Whitespace Token Handling
//!
//! Spaces, tabs and line breaks are kept as a single [`Token::Whitespace`] so that
//! token spans stay contiguous; the preprocessor drops them before parsing.

use nom::{bytes::complete::take_while1, combinator::map, error::context};

use super::token::{ParserResult, Token};

/// Parses a run of whitespace, including line breaks.
///
/// # Examples
///
/// ```
/// # use tariff_psr::tokenizer::whitespace::parse_whitespace;
/// # use tariff_psr::tokenizer::token::Token;
/// let (rest, token) = parse_whitespace(" \n\tA1").unwrap();
/// assert_eq!(token, Token::Whitespace(" \n\t".to_string()));
/// assert_eq!(rest, "A1");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<'_, Token> {
    context(
        "whitespace",
        map(take_while1(char::is_whitespace), |ws: &str| {
            Token::Whitespace(ws.to_string())
        }),
    )(input)
}
