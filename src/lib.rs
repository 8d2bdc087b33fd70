//! Hamming error correction codes.
//!
//! Data bits are laid out in a codeword with parity bits at every power-of-two
//! position. The decoder recomputes the parity checks, turns the failures into a
//! syndrome and uses it to correct single-bit errors. The extended variant adds
//! one overall parity bit so double-bit errors are detected instead of being
//! miscorrected.
//!
//! ```
//! use bitvec::prelude::*;
//! use hamming_ecc::{decode, encode, DecodeStatus, HammingConfig};
//!
//! let config = HammingConfig::default();
//! let data = bitvec![u8, Msb0; 1, 0, 1, 1];
//!
//! let mut codeword = encode(&data, &config);
//! assert_eq!(codeword, bitvec![u8, Msb0; 0, 1, 1, 0, 0, 1, 1]);
//!
//! // Flip position 5 (1-indexed)
//! let bit = codeword[4];
//! codeword.set(4, !bit);
//!
//! let result = decode(&codeword, &config);
//! assert_eq!(result.status, DecodeStatus::CorrectedSingleBit(5));
//! assert_eq!(result.data.unwrap(), data);
//! ```

pub mod ecc;
pub mod error;

pub use ecc::{
    bits, check, codeword_length, covers_position, decode, encode, parity_positions,
    DecodeResult, DecodeStatus, ErrorCorrection, HammingCode, HammingConfig, Layout,
    ParityCheck,
};
pub use error::{Error, Result};
