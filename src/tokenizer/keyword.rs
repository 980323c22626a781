//! # Keyword Token Handling
//!
//! This module defines the keywords recognized in rule text and the word parser
//! that separates them from identifiers (codes and category keys).
//!
//! ## Keyword Types
//!
//! * **Operators**: `and`, `or`
//! * **Provisions**: `from`, `except`, `condition`, `parameter`
//! * **Exception attributes**: `material`, `extra`
//! * **Presentation**: `silent`, `friendly`, `label`, `details`, `text`
//!
//! ## Parsing Strategy
//!
//! A whole word is consumed first and only then compared against the keyword table,
//! so identifiers that start with a keyword (`orange`, `fromage`) are never split.
//! Codes may start with a digit (`0303`) and may contain `_` and `.` (`2841.90`).

use std::str::FromStr;

use nom::{bytes::complete::take_while1, combinator::map, error::context};

use super::token::{ParserResult, Token};

/// Reserved words of the rule grammar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    /// Conjunction of two rules.
    And,
    /// Disjunction of two rules.
    Or,
    /// Except-from provision.
    Except,
    /// Change-from provision.
    From,
    /// Literal condition attached to a code.
    Condition,
    /// Hides a node from official and friendly text.
    Silent,
    /// Per-category friendly override.
    Friendly,
    /// Question label carried by a code.
    Label,
    /// Question details carried by a code.
    Details,
    /// Parameter substituted as `{{parameter}}`.
    Parameter,
    /// Material of an exception entry.
    Material,
    /// Trailing text of an exception entry.
    Extra,
    /// Explicit text leaf.
    Text,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

/// Parses a word and classifies it as a keyword or an identifier.
///
/// # Examples
///
/// ```
/// # use tariff_psr::tokenizer::keyword::{parse_word, Keyword};
/// # use tariff_psr::tokenizer::token::Token;
/// let (rest, token) = parse_word("except 01").unwrap();
/// assert_eq!(token, Token::Keyword(Keyword::Except));
/// assert_eq!(rest, " 01");
///
/// let (_, token) = parse_word("orange").unwrap();
/// assert_eq!(token, Token::Identifier("orange".to_string()));
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_word(input: &str) -> ParserResult<'_, Token> {
    context(
        "word",
        map(take_while1(is_word_char), |word: &str| {
            match Keyword::from_str(word) {
                Ok(keyword) => Token::Keyword(keyword),
                Err(_) => Token::Identifier(word.to_string()),
            }
        }),
    )(input)
}
