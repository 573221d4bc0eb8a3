//! One error type for the whole lex → parse → emit path.
use thiserror::Error;

use crate::schema::Primitive;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// Ran off the end of a character or unit buffer.
    #[error("unexpected end of input")]
    Exhausted,

    #[error("expected value of {expected:?} but received {actual:?} at position {position}, line {line}{context}")]
    UnexpectedToken {
        expected: String,
        actual: String,
        position: usize,
        line: usize,
        /// Free-form suffix, e.g. which field the mismatch followed.
        context: String,
    },

    /// Units ran out while a structure was still open.
    #[error("expected value of {expected:?} but input ended at position {position}, line {line}")]
    UnexpectedEnd {
        expected: String,
        position: usize,
        line: usize,
    },

    #[error("type {name:?} at position {position}, line {line} not in list of approved types {}", approved_list())]
    UnknownType {
        name: String,
        position: usize,
        line: usize,
    },

    /// `<` nesting beyond what the recursive-descent parser will follow.
    #[error("nesting depth exceeds the limit of {limit} at position {position}, line {line}")]
    NestingTooDeep {
        limit: i32,
        position: usize,
        line: usize,
    },

    #[error("field {name:?} declared more than once in the same struct (line {line})")]
    DuplicateField { name: String, line: usize },

    #[error("cannot {operation} at position {position}")]
    InvalidCursorOperation {
        operation: &'static str,
        position: usize,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("rendered JSON is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl SchemaError {
    /// `true` only for the bare end-of-buffer signal, never for a malformed structure.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, SchemaError::Exhausted)
    }
}

fn approved_list() -> String {
    let names: Vec<&str> = Primitive::ALL.iter().map(|p| p.as_str()).collect();
    format!("[{}]", names.join(", "))
}

pub type Result<T, E = SchemaError> = std::result::Result<T, E>;
