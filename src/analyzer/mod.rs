//! # Rule Analyzer
//!
//! Parser combinators over the token stream and the rule grammar built from them.
//! [`parse_rule`] runs the whole front end:
//!
//! ```text
//! Rule Text → Tokenizer → TokenPreprocessor → parse_expression → RuleNode
//! ```
//!
//! Errors are reported with a byte offset into the rule text. Groups and `silent`
//! prefixes may nest at most [`MAX_NESTING`] levels deep.
//!
//! ```rust
//! use tariff_psr::analyzer::{parse_rule, ParseError};
//! use tariff_psr::ast::RuleNode;
//!
//! let tree = parse_rule("A1 or B1").unwrap();
//! assert_eq!(tree, RuleNode::or(RuleNode::leaf("A1"), RuleNode::leaf("B1")));
//!
//! let err = parse_rule("A1 or").unwrap_err();
//! assert!(matches!(err, ParseError::TrailingInput { position: 3, .. }));
//! ```

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

pub use core::ParseError;
pub use core::ParseResult;
pub use core::Parser;

use tracing::debug;

use crate::ast::RuleNode;
use crate::preprocessor::{Preprocessor, TokenPreprocessor};
use crate::tokenizer::{
    keyword::Keyword,
    symbol::Delimiter,
    token::{Token, TokenSpan, Tokenizer},
};

/// Deepest accepted nesting of parenthesised groups and `silent` prefixes.
pub const MAX_NESTING: usize = 64;

/// Parses rule text into a tree. The whole input must form one rule.
#[tracing::instrument(level = "debug")]
pub fn parse_rule(text: &str) -> Result<RuleNode, ParseError> {
    let spans = Tokenizer::new()
        .tokenize(text)
        .map_err(|e| ParseError::Lexical {
            message: e.to_string(),
            position: e.span().start,
        })?;
    let spans: Vec<TokenSpan> = TokenPreprocessor::default().process(spans);
    check_nesting(&spans)?;
    let tokens: Vec<Token> = spans.iter().map(|span| span.token.clone()).collect();
    debug!("{:?}", tokens);

    let to_offset = |index: usize| spans.get(index).map_or(text.len(), |span| span.start);

    let (pos, tree) = parsers::parse_expression()
        .parse(&tokens, 0)
        .map_err(|e| e.map_position(&to_offset))?;

    match tokens.get(pos) {
        None => Ok(tree),
        Some(found) => Err(ParseError::TrailingInput {
            found: found.to_string(),
            position: to_offset(pos),
        }),
    }
}

/// Rejects input nested deeper than [`MAX_NESTING`] before the recursive descent runs.
///
/// A run of `silent` keywords counts towards the primary it prefixes, and stays
/// counted while that primary is an open group.
fn check_nesting(spans: &[TokenSpan]) -> Result<(), ParseError> {
    let mut groups: Vec<usize> = Vec::new();
    let mut depth = 0;
    let mut silent = 0;
    for span in spans {
        match &span.token {
            Token::Keyword(Keyword::Silent) => silent += 1,
            Token::Delimiter(Delimiter::OpenParen) => {
                groups.push(silent + 1);
                depth += silent + 1;
                silent = 0;
            }
            Token::Delimiter(Delimiter::CloseParen) => {
                depth -= groups.pop().unwrap_or(0);
                silent = 0;
            }
            _ => silent = 0,
        }
        if depth + silent > MAX_NESTING {
            return Err(ParseError::WithContext {
                context: "nesting too deep".to_string(),
                inner: Box::new(ParseError::Unexpected {
                    found: span.token.to_string(),
                    position: span.start,
                }),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExceptionSpec, Leaf};

    #[test]
    fn test_parse_rule_with_exceptions() {
        let tree = parse_rule("A2 from 03 except 01").unwrap();
        let expected = Leaf {
            from: Some(ExceptionSpec::single("03")),
            except: Some(ExceptionSpec::single("01")),
            ..Leaf::new("A2")
        };
        assert_eq!(tree, RuleNode::Leaf(expected));
    }

    #[test]
    fn test_empty_rule() {
        let err = parse_rule("   ").unwrap_err();
        assert_eq!(err.position(), 3);
    }

    #[test]
    fn test_lexical_error_position() {
        let err = parse_rule("A1 or B1 condition 'unterminated").unwrap_err();
        assert!(matches!(err, ParseError::Lexical { position: 19, .. }));
    }

    #[test]
    fn test_nesting_counts_silent_runs() {
        let rule = format!("{}A1", "silent ".repeat(MAX_NESTING));
        assert!(parse_rule(&rule).is_ok());

        let rule = format!("{}(A1)", "silent ".repeat(MAX_NESTING));
        let err = parse_rule(&rule).unwrap_err();
        assert_eq!(err.position(), MAX_NESTING * 7);

        let rule = format!("{}A1 or silent B1", "silent ".repeat(MAX_NESTING));
        assert!(parse_rule(&rule).is_ok());
    }

    #[test]
    fn test_unbalanced_paren() {
        let err = parse_rule("(A1 or B1").unwrap_err();
        assert_eq!(err.position(), 9);
        let err = parse_rule("A1 or B1)").unwrap_err();
        assert!(matches!(err, ParseError::TrailingInput { position: 8, .. }));
    }
}
