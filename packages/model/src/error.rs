use serde_json::error::Category;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Failure to read a document from its JSON text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("JSON does not describe a page document: {message}")]
    Shape { message: String },
}

impl ParseError {
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    /// Classify a serde_json failure: data errors are shape problems,
    /// everything else means the text itself is not valid JSON.
    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::shape(err.to_string()),
            Category::Io | Category::Syntax | Category::Eof => {
                Self::syntax(err.line(), err.column(), err.to_string())
            }
        }
    }
}

/// Failure to encode a document as JSON
#[derive(Error, Debug)]
#[error("Failed to serialize document: {0}")]
pub struct SerializeError(#[from] pub serde_json::Error);
