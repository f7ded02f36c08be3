use thiserror::Error;

/// Errors raised by the evaluation primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("accuracy is undefined without groups")]
    NoGroups,
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type EvalResult<T> = Result<T, EvalError>;
