//! # Token Preprocessor
//!
//! Sits between the tokenizer and the parser:
//!
//! ```text
//! Rule Text → Tokenizer → Preprocessor → Parser → RuleNode
//! ```
//!
//! The tokenizer keeps whitespace so spans stay contiguous; the parser only wants
//! meaningful tokens. The preprocessor drops whitespace and keeps the spans of the
//! remaining tokens, which the parser front end uses to report byte positions.
//!
//! ```rust
//! use tariff_psr::preprocessor::{Preprocessor, TokenPreprocessor};
//! use tariff_psr::tokenizer::token::{Token, Tokenizer};
//!
//! let spans = Tokenizer::new().tokenize("A1 or  B1").unwrap();
//! let tokens: Vec<Token> = TokenPreprocessor::default()
//!     .process(spans)
//!     .into_iter()
//!     .map(|span| span.token)
//!     .collect();
//! assert_eq!(tokens.len(), 3);
//! ```

use crate::tokenizer::token::TokenSpan;

/// A trait for preprocessing different types of input
pub trait Preprocessor<T, U = T> {
    /// Process the input of type T and return the processed result
    fn process(&self, input: T) -> U;
}

#[derive(Debug, Clone, Default)]
pub struct TokenPreprocessor {}

impl TokenPreprocessor {
    pub fn new() -> Self {
        Self {}
    }
}

impl Preprocessor<Vec<TokenSpan>> for TokenPreprocessor {
    fn process(&self, input: Vec<TokenSpan>) -> Vec<TokenSpan> {
        input
            .into_iter()
            .filter(|span| !span.token.is_whitespace())
            .collect()
    }
}
