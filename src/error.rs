use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("index out of bounds: position {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("length mismatch: expected {expected}, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("apply results are not uniformly combinable: {0}")]
    InvalidResultShape(String),

    #[error("data consistency error: {0}")]
    Consistency(String),

    #[error("empty data: {0}")]
    Empty(String),

    #[error("cast error: {0}")]
    Cast(String),

    #[error("error: {0}")]
    Other(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
