//! Hamming error correction code implementation.
//!
//! This module provides:
//! - The bit-position model shared by encoder and decoder
//! - Codeword encoding with optional overall (extended) parity
//! - Decoding with single-bit correction and double-bit detection
//! - Generator and parity-check matrix views of the same code
//! - A fixed-size block codec for byte streams and batches of words
//!
//! # Error Correction Algorithms
//!
//! A Hamming code places parity bits at positions 1, 2, 4, 8, ... of the
//! codeword. Parity bit `p` covers every position whose binary index has the
//! bit `p` set, so a single flipped bit fails exactly the checks whose sum is
//! its own position.
//!
//! # Examples
//!
//! ```rust
//! use hamming_ecc::ecc::{ErrorCorrection, HammingCode};
//!
//! let code = HammingCode::extended_8_4();
//! let mut encoded = code.encode(b"Test").unwrap();
//! encoded[1] ^= 0x10;
//! assert_eq!(code.decode(&encoded).unwrap(), b"Test");
//! ```

use crate::error::Result;

/// Trait for error correction codes that protect whole byte streams
pub trait ErrorCorrection {
    /// Encode data with error correction symbols
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decode data and correct errors if possible
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod bits;
pub mod decoder;
pub mod encoder;
pub mod hamming;
pub mod matrix;
pub mod position;


pub use decoder::{check, decode, DecodeResult, DecodeStatus, ParityCheck};
pub use encoder::encode;
pub use hamming::{HammingCode, HammingConfig, StreamReport};
pub use position::{codeword_length, covers_position, parity_positions, Layout};
