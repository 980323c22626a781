use std::fmt;

use nom::{
    branch::alt,
    error::{VerboseError, convert_error},
    IResult,
};
use thiserror::Error;

use super::{
    keyword::{parse_word, Keyword},
    literal::parse_literal,
    symbol::{parse_delimiter, Delimiter},
    whitespace::parse_whitespace,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(Keyword),
    /// Codes, category keys and exception-spec codes.
    Identifier(String),
    /// Quoted text, quotes removed.
    Literal(String),
    Delimiter(Delimiter),
    Whitespace(String),
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(keyword) => write!(f, "{}", keyword),
            Token::Identifier(id) => write!(f, "{}", id),
            Token::Literal(text) => write!(f, "'{}'", text),
            Token::Delimiter(delimiter) => write!(f, "{}", delimiter),
            Token::Whitespace(_) => write!(f, "whitespace"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    current_position: usize,
    current_line: usize,
    current_column: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            current_position: 0,
            current_line: 1,   // 1-based
            current_column: 1, // 1-based
        }
    }

    #[tracing::instrument(level = "debug", skip(input))]
    pub fn tokenize(&mut self, input: &str) -> TokenizerResult<Vec<TokenSpan>> {
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let start_position = self.current_position;
            let start_line = self.current_line;
            let start_column = self.current_column;

            let result = alt((parse_whitespace, parse_literal, parse_delimiter, parse_word))(remaining);

            match result {
                Ok((new_remaining, token)) => {
                    let consumed = &remaining[..(remaining.len() - new_remaining.len())];
                    self.update_position(consumed);

                    tokens.push(TokenSpan {
                        token,
                        start: start_position,
                        end: self.current_position,
                        line: start_line,
                        column: start_column,
                    });

                    remaining = new_remaining;
                }
                Err(e) => {
                    let found = remaining.chars().take(20).collect::<String>();
                    let span = Span {
                        start: self.current_position,
                        end: self.current_position + 1,
                        line: self.current_line,
                        column: self.current_column,
                    };
                    let error = match e {
                        nom::Err::Incomplete(needed) => TokenizerError::ParseError {
                            message: format!("Incomplete input, {:?}", needed),
                            found,
                            span,
                        },
                        nom::Err::Error(e) | nom::Err::Failure(e) => TokenizerError::ParseError {
                            message: convert_error(remaining, e),
                            found,
                            span,
                        },
                    };
                    tracing::error!("{}", error);
                    return Err(error);
                }
            }
        }

        Ok(tokens)
    }

    fn update_position(&mut self, text: &str) {
        for c in text.chars() {
            self.current_position += c.len_utf8();
            if c == '\n' {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line: {}, column: {}, start: {}, end: {}",
            self.line, self.column, self.start, self.end
        )
    }
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

pub type TokenizerResult<T> = Result<T, TokenizerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("Tokenize error: {message} at position {span}")]
    ParseError {
        message: String,
        found: String,
        span: Span,
    },
}

impl TokenizerError {
    pub fn span(&self) -> &Span {
        match self {
            TokenizerError::ParseError { span, .. } => span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        Tokenizer::new()
            .tokenize(input)
            .unwrap()
            .into_iter()
            .map(|span| span.token)
            .filter(|token| !matches!(token, Token::Whitespace(_)))
            .collect()
    }

    #[test]
    fn test_tokenize_exception_rule() {
        let tokens = kinds("A2 except 02-0303,0404 condition 'it must be funky'");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("A2".to_string()),
                Token::Keyword(Keyword::Except),
                Token::Identifier("02".to_string()),
                Token::Delimiter(Delimiter::Dash),
                Token::Identifier("0303".to_string()),
                Token::Delimiter(Delimiter::Comma),
                Token::Identifier("0404".to_string()),
                Token::Keyword(Keyword::Condition),
                Token::Literal("it must be funky".to_string()),
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let spans = Tokenizer::new().tokenize("A1\n  or B1").unwrap();
        let or_span = spans
            .iter()
            .find(|span| span.token == Token::Keyword(Keyword::Or))
            .unwrap();
        assert_eq!(or_span.start, 5);
        assert_eq!(or_span.end, 7);
        assert_eq!(or_span.line, 2);
        assert_eq!(or_span.column, 3);
    }

    #[test]
    fn test_unterminated_literal_fails() {
        let err = Tokenizer::new().tokenize("A1 condition 'open").unwrap_err();
        assert_eq!(err.span().start, 13);
    }

    #[test]
    fn test_unknown_character_fails() {
        let err = Tokenizer::new().tokenize("A1 & B1").unwrap_err();
        match err {
            TokenizerError::ParseError { found, span, .. } => {
                assert!(found.starts_with('&'));
                assert_eq!(span.column, 4);
            }
        }
    }
}
