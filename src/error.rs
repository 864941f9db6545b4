use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("value is not invertible modulo the prime")]
    NonInvertible,

    #[error("lane count mismatch: {left} != {right}")]
    LaneCountMismatch { left: usize, right: usize },

    #[error("matrix order mismatch: {left} != {right}")]
    MatrixOrderMismatch { left: usize, right: usize },

    #[error("malformed state: expected {expected} bytes, got {actual}")]
    MalformedState { expected: usize, actual: usize },

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}
