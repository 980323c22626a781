//! Quoted text literals.
//!
//! Rule text quotes free text with single quotes (`condition 'it must be funky'`);
//! double quotes are accepted as well. There is no escape syntax, a literal ends
//! at the first matching quote.

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::char,
    combinator::map,
    error::context,
    sequence::delimited,
};

use super::token::{ParserResult, Token};

#[tracing::instrument(level = "debug", skip(input))]
fn parse_single_quoted(input: &str) -> ParserResult<'_, &str> {
    context(
        "single quoted literal",
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_double_quoted(input: &str) -> ParserResult<'_, &str> {
    context(
        "double quoted literal",
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<'_, Token> {
    context(
        "literal",
        map(alt((parse_single_quoted, parse_double_quoted)), |text: &str| {
            Token::Literal(text.to_string())
        }),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quoted() {
        let (rest, token) = parse_literal("'fish' extra").unwrap();
        assert_eq!(token, Token::Literal("fish".to_string()));
        assert_eq!(rest, " extra");
    }

    #[test]
    fn test_double_quoted_keeps_apostrophe() {
        let (_, token) = parse_literal("\"producer's goods\"").unwrap();
        assert_eq!(token, Token::Literal("producer's goods".to_string()));
    }

    #[test]
    fn test_empty_literal() {
        let (_, token) = parse_literal("''").unwrap();
        assert_eq!(token, Token::Literal(String::new()));
    }

    #[test]
    fn test_unterminated() {
        assert!(parse_literal("'never closed").is_err());
    }
}
