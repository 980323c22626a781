//! # Tokenizer Component
//!
//! The Tokenizer is responsible for lexical analysis of rule text, transforming raw
//! text such as `A2 from 03 except 01 material 'fish'` into a structured token stream
//! for the analyzer.
//!
//! ## Design Principles
//!
//! * **Position Information**: Each token carries its byte range, line and column so
//!   that parse errors can point back into the original rule text.
//! * **Whole-word Keywords**: `and`, `or`, `except`, ... are only recognized as keywords
//!   when they form a complete word; `orange` stays an identifier.
//! * **Whitespace Preservation**: Whitespace is emitted as tokens and removed later by
//!   the [`preprocessor`](crate::preprocessor).
//!
//! ## Component Structure
//!
//! * [`token`]: Core token types and the tokenizer driver
//! * [`keyword`]: Keyword and identifier recognition
//! * [`symbol`]: Delimiters (`(`, `)`, `,`, `-`)
//! * [`literal`]: Quoted text literals
//! * [`whitespace`]: Whitespace handling
//!
//! ## Usage Example
//!
//! ```rust
//! use tariff_psr::tokenizer::token::{Token, Tokenizer};
//! use tariff_psr::tokenizer::keyword::Keyword;
//!
//! let tokens = Tokenizer::new().tokenize("A1 or B1").unwrap();
//! assert_eq!(tokens[2].token, Token::Keyword(Keyword::Or));
//! ```

pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;
