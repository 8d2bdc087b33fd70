use thiserror::Error;

use crate::ecc::decoder::DecodeStatus;

/// Errors raised at the crate boundary: malformed input, mismatched sizes and
/// unrecoverable blocks in byte streams.
///
/// Decoding a single codeword never fails with an `Error`; its outcome is
/// reported through [`DecodeStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid bit {found:?} at index {index}, expected 0 or 1")]
    InvalidBit { index: usize, found: char },

    #[error("expected {expected} bits, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("block {block} could not be recovered: {status}")]
    Uncorrectable { block: usize, status: DecodeStatus },
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::InvalidInput`]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
