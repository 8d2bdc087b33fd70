//! Bit-position model.
//!
//! Codeword positions are 1-indexed. Positions that are powers of two hold
//! parity bits, every other position holds the next data bit. A parity bit at
//! position `p` covers every position `q` with `q & p != 0`, itself included.

/// Returns every parity position `p <= n` in ascending order (1, 2, 4, ...)
pub fn parity_positions(n: usize) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut p: usize = 1;
    while p <= n {
        positions.push(p);
        match p.checked_mul(2) {
            Some(next) => p = next,
            None => break,
        }
    }
    positions
}

/// Whether the 1-indexed `position` holds a parity bit
pub fn is_parity_position(position: usize) -> bool {
    position.is_power_of_two()
}

/// Number of parity bits in a codeword of `n` bits
pub fn parity_bit_count(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        n.ilog2() as usize + 1
    }
}

/// Smallest codeword length `n = k + r` with `2^r >= n + 1`.
///
/// `r` grows from zero until the inequality holds, so `k = 0` gives an empty
/// codeword and `k = 4` gives the classic 7-bit code.
pub fn codeword_length(k: usize) -> usize {
    let mut r: u32 = 0;
    loop {
        let n = k + r as usize;
        match 1usize.checked_shl(r) {
            Some(capacity) if capacity < n + 1 => r += 1,
            _ => return n,
        }
    }
}

/// Number of data bits carried by a codeword of `n` bits, or `None` when no
/// data length encodes to exactly `n` bits.
pub fn data_length(n: usize) -> Option<usize> {
    let k = n - parity_bit_count(n);
    (codeword_length(k) == n).then_some(k)
}

/// Whether the parity bit at position `parity` covers `position`.
///
/// `parity` is the parity bit's own power-of-two position, so a parity bit
/// always covers itself.
pub fn covers_position(parity: usize, position: usize) -> bool {
    position & parity != 0
}

/// Precomputed parity and data positions for one code size.
///
/// Built once and shared by reference; nothing in the crate mutates a layout
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    data_bits: usize,
    total_bits: usize,
    parity_positions: Vec<usize>,
    data_positions: Vec<usize>,
}

impl Layout {
    /// Layout of the codeword protecting `k` data bits
    pub fn for_data(k: usize) -> Self {
        Self::build(k, codeword_length(k))
    }

    /// Layout of an `n`-bit codeword, or `None` if `n` is not a valid length
    pub fn for_codeword(n: usize) -> Option<Self> {
        data_length(n).map(|k| Self::build(k, n))
    }

    fn build(data_bits: usize, total_bits: usize) -> Self {
        let data_positions: Vec<usize> = (1..=total_bits)
            .filter(|&q| !is_parity_position(q))
            .collect();
        debug_assert_eq!(data_positions.len(), data_bits);

        Layout {
            data_bits,
            total_bits,
            parity_positions: parity_positions(total_bits),
            data_positions,
        }
    }

    /// Number of data bits `k`
    pub fn data_bits(&self) -> usize {
        self.data_bits
    }

    /// Codeword length `n`, without the extended parity bit
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Number of parity bits `r`
    pub fn parity_bits(&self) -> usize {
        self.parity_positions.len()
    }

    /// Parity positions, ascending
    pub fn parity_positions(&self) -> &[usize] {
        &self.parity_positions
    }

    /// Data positions, ascending; the i-th data bit lives at `data_positions()[i]`
    pub fn data_positions(&self) -> &[usize] {
        &self.data_positions
    }
}
