//! Bit sequences and the conversions into and out of them.
//!
//! Every codec function works on [`Bits`] (a borrowed MSB-first bit slice) and
//! returns [`BitWord`]s. Text, digit lists and packed integers are converted at
//! the boundary with the functions below, never inside the codec.

use crate::error::{Error, Result};
use bitvec::prelude::*;

/// Owned, fixed-length bit sequence used for data words and codewords
pub type BitWord = BitVec<u8, Msb0>;

/// Borrowed bit sequence
pub type Bits = BitSlice<u8, Msb0>;

/// Parses a string of `0` and `1` characters. ASCII whitespace is ignored so
/// `"1 0 1 1"` and `"1011"` are the same word.
pub fn parse_bits(text: &str) -> Result<BitWord> {
    let mut bits = BitWord::with_capacity(text.len());
    for (index, found) in text.chars().enumerate() {
        match found {
            '0' => bits.push(false),
            '1' => bits.push(true),
            c if c.is_ascii_whitespace() => {}
            _ => return Err(Error::InvalidBit { index, found }),
        }
    }
    Ok(bits)
}

/// Builds a word from numeric digits, each of which must be 0 or 1
pub fn from_digits(digits: &[u8]) -> Result<BitWord> {
    digits
        .iter()
        .enumerate()
        .map(|(index, &digit)| match digit {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBit {
                index,
                found: char::from_digit(u32::from(digit), 36).unwrap_or('?'),
            }),
        })
        .collect()
}

/// Unpacks the low `width` bits of `value`, most significant bit first
pub fn from_packed(value: u64, width: usize) -> Result<BitWord> {
    if width > 64 {
        return Err(Error::invalid(format!(
            "cannot unpack {} bits from a 64-bit value",
            width
        )));
    }
    if width < 64 && value >> width != 0 {
        return Err(Error::invalid(format!(
            "value {:#b} does not fit in {} bits",
            value, width
        )));
    }

    Ok((0..width).rev().map(|i| (value >> i) & 1 == 1).collect())
}

/// Packs the word into an integer, first bit most significant
pub fn to_packed(bits: &Bits) -> Result<u64> {
    if bits.len() > 64 {
        return Err(Error::invalid(format!(
            "cannot pack {} bits into a 64-bit value",
            bits.len()
        )));
    }
    Ok(bits.iter().by_vals().fold(0, |acc, b| (acc << 1) | u64::from(b)))
}

/// Renders the word as `0`/`1` characters
pub fn to_bit_string(bits: &Bits) -> String {
    bits.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}

/// Renders the word as a list of 0/1 digits
pub fn to_digits(bits: &Bits) -> Vec<u8> {
    bits.iter().by_vals().map(u8::from).collect()
}

/// Fails with [`Error::LengthMismatch`] unless `bits` has exactly `expected` bits
pub fn expect_len(bits: &Bits, expected: usize) -> Result<()> {
    if bits.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            found: bits.len(),
        });
    }
    Ok(())
}
