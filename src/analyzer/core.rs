use thiserror::Error;

/// A parser over a slice of `I` starting at `pos`.
///
/// On success returns the position after the consumed input with the parsed value.
pub trait Parser<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

pub type ParseResult<O> = Result<(usize, O), ParseError>;

/// Parse failure.
///
/// Inside the combinators `position` is a token index; [`crate::analyzer::parse_rule`]
/// rewrites it into a byte offset of the rule text before returning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected end of input at {position}")]
    UnexpectedEof { position: usize },
    #[error("unexpected `{found}` at {position}")]
    Unexpected { found: String, position: usize },
    #[error("no alternative matched at {position}")]
    NoAlternative { position: usize },
    #[error("{message}")]
    Lexical { message: String, position: usize },
    #[error("unexpected `{found}` after a complete rule at {position}")]
    TrailingInput { found: String, position: usize },
    #[error("{context}: {inner}")]
    WithContext {
        context: String,
        inner: Box<ParseError>,
    },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedEof { position }
            | ParseError::Unexpected { position, .. }
            | ParseError::NoAlternative { position }
            | ParseError::Lexical { position, .. }
            | ParseError::TrailingInput { position, .. } => *position,
            ParseError::WithContext { inner, .. } => inner.position(),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Rewrites every position in the error chain.
    pub fn map_position(self, f: &impl Fn(usize) -> usize) -> Self {
        match self {
            ParseError::UnexpectedEof { position } => ParseError::UnexpectedEof {
                position: f(position),
            },
            ParseError::Unexpected { found, position } => ParseError::Unexpected {
                found,
                position: f(position),
            },
            ParseError::NoAlternative { position } => ParseError::NoAlternative {
                position: f(position),
            },
            ParseError::Lexical { message, position } => ParseError::Lexical {
                message,
                position: f(position),
            },
            ParseError::TrailingInput { found, position } => ParseError::TrailingInput {
                found,
                position: f(position),
            },
            ParseError::WithContext { context, inner } => ParseError::WithContext {
                context,
                inner: Box::new(inner.map_position(f)),
            },
        }
    }
}
