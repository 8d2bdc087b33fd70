//! Hamming encoder.

use super::bits::{expect_len, BitWord, Bits};
use super::hamming::HammingConfig;
use super::position::{covers_position, Layout};
use crate::error::Result;
use bitvec::prelude::*;

/// Encodes a data word into a fresh codeword.
///
/// The codeword has `codeword_length(data.len())` bits, plus one overall parity
/// bit when `config.extended` is set. Encoding is total: the empty word encodes
/// to an empty codeword (or a single zero bit in extended mode).
///
/// # Examples
///
/// ```
/// use bitvec::prelude::*;
/// use hamming_ecc::{encode, HammingConfig};
///
/// let codeword = encode(bits![u8, Msb0; 1, 0, 1, 1], &HammingConfig::extended());
/// assert_eq!(codeword, bitvec![u8, Msb0; 0, 1, 1, 0, 0, 1, 1, 0]);
/// ```
pub fn encode(data: &Bits, config: &HammingConfig) -> BitWord {
    encode_unchecked(data, &Layout::for_data(data.len()), config)
}

/// Encodes `data` using a precomputed layout.
///
/// Fails with [`Error::LengthMismatch`](crate::Error::LengthMismatch) unless the
/// layout was built for `data.len()` data bits.
pub fn encode_with_layout(
    data: &Bits,
    layout: &Layout,
    config: &HammingConfig,
) -> Result<BitWord> {
    expect_len(data, layout.data_bits())?;
    Ok(encode_unchecked(data, layout, config))
}

/// Callers guarantee `data.len() == layout.data_bits()`.
pub(crate) fn encode_unchecked(data: &Bits, layout: &Layout, config: &HammingConfig) -> BitWord {
    debug_assert_eq!(layout.data_bits(), data.len());

    let n = layout.total_bits();
    let mut codeword = bitvec![u8, Msb0; 0; n];

    // Data bits go to non-parity positions in order
    for (bit, &position) in data.iter().by_vals().zip(layout.data_positions()) {
        codeword.set(position - 1, bit);
    }

    for &parity in layout.parity_positions() {
        let value = (1..=n)
            .filter(|&q| q != parity && covers_position(parity, q))
            .fold(false, |acc, q| acc ^ codeword[q - 1]);
        codeword.set(parity - 1, value);
    }

    if config.extended {
        let overall = codeword.count_ones() % 2 == 1;
        codeword.push(overall);
    }

    codeword
}
