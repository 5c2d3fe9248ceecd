use thiserror::Error;

/// Errors produced while decoding or encoding JSON text.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input text. Carries the 1-based position of the offending
    /// character; decoding aborts on the first violation.
    #[error("{message} at line {line}, column {column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// A stream read or sink write failure, propagated verbatim.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn syntax(message: impl Into<String>, line: usize, column: usize) -> Self {
        Error::Syntax {
            message: message.into(),
            line,
            column,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
