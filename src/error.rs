use thiserror::Error;

use crate::analyzer::ParseError;

#[derive(Error, Debug)]
pub enum PsrError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Question related to {code} does not exist.")]
    MissingQuestion { code: String },
    #[error("Question {code} refers to unknown category {category}")]
    MissingCategory { code: String, category: String },
    #[error("Authoring error: {0}")]
    Authoring(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PsrResult<T> = Result<T, PsrError>;
