//! Hamming decoder.
//!
//! Decoding recomputes every parity check over the received word. The failed
//! checks form the syndrome, which under the single-error assumption is the
//! 1-indexed position of the flipped bit.
//!
//! In extended mode the trailing overall parity bit decides between one and two
//! errors:
//!
//! | syndrome | overall parity | status                                  |
//! |----------|----------------|-----------------------------------------|
//! | 0        | ok             | `Clean`                                 |
//! | 0        | mismatch       | `CorrectedSingleBit(n + 1)`             |
//! | 1..=n    | mismatch       | `CorrectedSingleBit(syndrome)`          |
//! | nonzero  | ok             | `DetectedDoubleBit`                     |
//! | > n      | mismatch       | `Invalid`                               |
//!
//! A mismatch with a zero syndrome is read as an error in the overall parity
//! bit itself, at position `n + 1`. The data bits are untouched in that case.

use std::fmt;

use super::bits::{BitWord, Bits};
use super::hamming::HammingConfig;
use super::position::{covers_position, Layout};
use crate::error::{Error, Result};
use log::{debug, trace};

/// Outcome of decoding one codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStatus {
    /// No error detected
    Clean,
    /// One bit was flipped at this 1-indexed position and has been corrected
    CorrectedSingleBit(usize),
    /// Two bits were flipped; the data cannot be recovered
    DetectedDoubleBit,
    /// The input is not a codeword: wrong length or a syndrome out of range
    Invalid,
}

impl DecodeStatus {
    /// Whether decoding produced a trustworthy data word
    pub fn is_recovered(&self) -> bool {
        matches!(self, DecodeStatus::Clean | DecodeStatus::CorrectedSingleBit(_))
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStatus::Clean => write!(f, "clean"),
            DecodeStatus::CorrectedSingleBit(position) => {
                write!(f, "corrected single-bit error at position {}", position)
            }
            DecodeStatus::DetectedDoubleBit => write!(f, "detected double-bit error"),
            DecodeStatus::Invalid => write!(f, "invalid codeword"),
        }
    }
}

/// Data word and status produced by [`decode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    /// Recovered data, present only when the status is `Clean` or
    /// `CorrectedSingleBit`
    pub data: Option<BitWord>,
    pub status: DecodeStatus,
    /// Raw syndrome of the received word (0 when the length was invalid)
    pub syndrome: usize,
}

impl DecodeResult {
    fn rejected(status: DecodeStatus, syndrome: usize) -> Self {
        DecodeResult {
            data: None,
            status,
            syndrome,
        }
    }

    /// Whether `data` can be trusted
    pub fn is_ok(&self) -> bool {
        self.status.is_recovered()
    }

    /// Consumes the result, returning the data only if it was recovered
    pub fn into_data(self) -> Option<BitWord> {
        self.data
    }
}

/// Raw parity-check outcome for a received word, before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParityCheck {
    /// Bit `i` is set when parity check `2^i` failed
    pub syndrome: usize,
    /// Whether the overall parity bit disagrees with the rest of the word.
    /// Always false in standard mode.
    pub overall_mismatch: bool,
}

impl ParityCheck {
    /// True when every check passed
    pub fn is_clean(&self) -> bool {
        self.syndrome == 0 && !self.overall_mismatch
    }
}

/// Decodes a received codeword, correcting a single-bit error if present.
///
/// The code size is derived from the length of `received` (minus one in
/// extended mode). Lengths that no data word encodes to are reported as
/// [`DecodeStatus::Invalid`]. Decoding never panics and has no hidden state, so
/// decoding the same word twice gives the same result.
///
/// Standard (non-extended) codes cannot tell two errors from one: a double flip
/// is miscorrected or reported `Invalid`. Use extended mode to detect it.
pub fn decode(received: &Bits, config: &HammingConfig) -> DecodeResult {
    let Some(layout) = layout_for(received, config) else {
        trace!("rejecting {}-bit word: not a codeword length", received.len());
        return DecodeResult::rejected(DecodeStatus::Invalid, 0);
    };
    decode_with_layout(received, &layout, config)
}

/// Decodes `received` against a precomputed layout.
///
/// Words whose length does not match the layout are reported as `Invalid`.
pub fn decode_with_layout(
    received: &Bits,
    layout: &Layout,
    config: &HammingConfig,
) -> DecodeResult {
    if received.len() != config.codeword_bits(layout) {
        return DecodeResult::rejected(DecodeStatus::Invalid, 0);
    }

    let n = layout.total_bits();
    let ParityCheck {
        syndrome,
        overall_mismatch,
    } = parity_check(received, layout, config);
    trace!(
        "n = {}, syndrome = {:#b}, overall mismatch = {}",
        n,
        syndrome,
        overall_mismatch
    );

    let mut body = received[..n].to_bitvec();
    let status = if syndrome == 0 {
        if overall_mismatch {
            debug!("overall parity bit at position {} was flipped", n + 1);
            DecodeStatus::CorrectedSingleBit(n + 1)
        } else {
            DecodeStatus::Clean
        }
    } else if config.extended && !overall_mismatch {
        debug!("double-bit error detected, syndrome {}", syndrome);
        return DecodeResult::rejected(DecodeStatus::DetectedDoubleBit, syndrome);
    } else if syndrome <= n {
        debug!("correcting bit at position {}", syndrome);
        let bit = body[syndrome - 1];
        body.set(syndrome - 1, !bit);
        DecodeStatus::CorrectedSingleBit(syndrome)
    } else {
        debug!("syndrome {} is outside the {}-bit codeword", syndrome, n);
        return DecodeResult::rejected(DecodeStatus::Invalid, syndrome);
    };

    DecodeResult {
        data: Some(extract_data(&body, layout)),
        status,
        syndrome,
    }
}

/// Computes the syndrome and overall parity of a received word without
/// correcting anything.
///
/// Fails with [`Error::InvalidInput`] when the length is not a codeword length.
pub fn check(received: &Bits, config: &HammingConfig) -> Result<ParityCheck> {
    let layout = layout_for(received, config).ok_or_else(|| {
        Error::invalid(format!(
            "{} bits is not a valid {} codeword length",
            received.len(),
            if config.extended { "extended" } else { "standard" }
        ))
    })?;
    Ok(parity_check(received, &layout, config))
}

fn layout_for(received: &Bits, config: &HammingConfig) -> Option<Layout> {
    let n = if config.extended {
        received.len().checked_sub(1)?
    } else {
        received.len()
    };
    Layout::for_codeword(n)
}

fn parity_check(received: &Bits, layout: &Layout, config: &HammingConfig) -> ParityCheck {
    let n = layout.total_bits();

    let mut syndrome = 0;
    for (i, &parity) in layout.parity_positions().iter().enumerate() {
        let failed = (1..=n)
            .filter(|&q| covers_position(parity, q))
            .fold(false, |acc, q| acc ^ received[q - 1]);
        if failed {
            syndrome |= 1 << i;
        }
    }

    // Body plus stored overall bit has even weight when nothing flipped
    let overall_mismatch = config.extended && received.count_ones() % 2 == 1;

    ParityCheck {
        syndrome,
        overall_mismatch,
    }
}

fn extract_data(codeword: &Bits, layout: &Layout) -> BitWord {
    layout
        .data_positions()
        .iter()
        .map(|&q| codeword[q - 1])
        .collect()
}
