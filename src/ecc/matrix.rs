//! Matrix form of the Hamming code over GF(2).
//!
//! The positional encoder and decoder are equivalent to the linear maps below:
//! - `G` (`n × k`): `G · d = encode(d)`
//! - `H` (`r × n`): `H · c` is the syndrome, least significant check first
//! - `R` (`k × n`): `R · c` extracts the data bits of a corrected codeword
//!
//! Matrices are stored as a `Vec` of rows.

use super::bits::{BitWord, Bits};
use super::position::{covers_position, parity_bit_count, Layout};
use crate::error::{Error, Result};
use bitvec::prelude::*;

/// Row-major binary matrix
pub type BitMatrix = Vec<BitWord>;

/// Generator matrix for `k` data bits. Row `q - 1` gives codeword position `q`
/// as a combination of the data bits.
///
/// # Examples
///
/// ```
/// use hamming_ecc::ecc::matrix::generator_matrix;
///
/// let g = generator_matrix(4);
/// assert_eq!(g.len(), 7);
/// assert_eq!(g[0].iter().by_vals().collect::<Vec<_>>(), [true, true, false, true]);
/// ```
pub fn generator_matrix(k: usize) -> BitMatrix {
    let layout = Layout::for_data(k);
    let data_positions = layout.data_positions();

    (1..=layout.total_bits())
        .map(|q| {
            let mut row = bitvec![u8, Msb0; 0; k];
            if q.is_power_of_two() {
                for (j, &d) in data_positions.iter().enumerate() {
                    row.set(j, covers_position(q, d));
                }
            } else if let Ok(j) = data_positions.binary_search(&q) {
                row.set(j, true);
            }
            row
        })
        .collect()
}

/// Parity-check matrix for an `n`-bit codeword. `H[i][q - 1]` is set when
/// parity bit `2^i` covers position `q`.
pub fn parity_check_matrix(n: usize) -> BitMatrix {
    (0..parity_bit_count(n))
        .map(|i| (1..=n).map(|q| covers_position(1 << i, q)).collect())
        .collect()
}

/// Data extraction matrix for `k` data bits
pub fn decoder_matrix(k: usize) -> BitMatrix {
    let layout = Layout::for_data(k);
    layout
        .data_positions()
        .iter()
        .map(|&q| {
            let mut row = bitvec![u8, Msb0; 0; layout.total_bits()];
            row.set(q - 1, true);
            row
        })
        .collect()
}

/// Matrix-vector product over GF(2)
pub fn multiply(matrix: &[BitWord], vector: &Bits) -> Result<BitWord> {
    matrix
        .iter()
        .map(|row| {
            if row.len() != vector.len() {
                return Err(Error::LengthMismatch {
                    expected: row.len(),
                    found: vector.len(),
                });
            }
            let ones = row
                .iter()
                .by_vals()
                .zip(vector.iter().by_vals())
                .filter(|&(a, b)| a && b)
                .count();
            Ok(ones % 2 == 1)
        })
        .collect()
}

/// Syndrome of `codeword` computed as `H · c`, packed so that bit `i` is check `2^i`
pub fn syndrome(h: &[BitWord], codeword: &Bits) -> Result<usize> {
    let checks = multiply(h, codeword)?;
    Ok(checks
        .iter()
        .by_vals()
        .enumerate()
        .filter(|&(_, failed)| failed)
        .fold(0, |acc, (i, _)| acc | 1 << i))
}

/// Finds the 1-indexed column of `H` equal to the syndrome vector, i.e. the
/// position a single error would have to be at. `None` if no column matches.
/// An all-zero check vector yields `None` only because `H` has no zero column.
pub fn locate_error(h: &[BitWord], checks: &Bits) -> Option<usize> {
    if h.len() != checks.len() {
        return None;
    }
    let n = h.first().map_or(0, |row| row.len());
    (0..n)
        .find(|&col| h.iter().zip(checks.iter().by_vals()).all(|(row, s)| row[col] == s))
        .map(|col| col + 1)
}
