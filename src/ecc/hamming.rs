//! Fixed-size Hamming block codec.
//!
//! [`HammingCode`] fixes the number of data bits per block, precomputes the
//! codeword layout once and reuses it for every block. On top of the single
//! word codec it provides:
//! - Length-checked encoding and decoding of individual blocks
//! - Byte stream encoding, MSB first, behind a 64-bit length header and with
//!   the last block zero padded
//! - Parallel batch encoding and decoding of independent words
//!
//! # Applications
//!
//! - Computer memory (ECC RAM uses the extended (72,64) code)
//! - Satellite communications
//! - Data storage systems

use super::bits::{expect_len, BitWord, Bits};
use super::decoder::{decode_with_layout, DecodeResult, DecodeStatus};
use super::encoder::{encode_unchecked, encode_with_layout};
use super::position::Layout;
use super::ErrorCorrection;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use bitvec::view::BitView;
use log::{debug, warn};
use rayon::prelude::*;
use std::cmp::min;

/// Size of the big-endian byte count written ahead of every encoded stream
pub const LENGTH_HEADER_BYTES: usize = 8;

/// Codec options.
///
/// The default is a standard Hamming code, which corrects single-bit errors but
/// cannot detect double-bit errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HammingConfig {
    /// Append an overall parity bit for double-bit error detection
    pub extended: bool,
}

impl HammingConfig {
    /// Single-error-correcting code
    pub const fn standard() -> Self {
        HammingConfig { extended: false }
    }

    /// Single-error-correcting, double-error-detecting code
    pub const fn extended() -> Self {
        HammingConfig { extended: true }
    }

    /// Length of a transmitted codeword for `layout`, overall parity included
    pub fn codeword_bits(&self, layout: &Layout) -> usize {
        layout.total_bits() + usize::from(self.extended)
    }
}

/// A Hamming code with a fixed number of data bits per block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HammingCode {
    layout: Layout,
    config: HammingConfig,
}

/// Result of decoding a byte stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamReport {
    /// Decoded bytes
    pub data: Vec<u8>,
    /// Number of blocks decoded
    pub blocks: usize,
    /// Indices of blocks that needed a single-bit correction
    pub corrected: Vec<usize>,
}

impl HammingCode {
    /// Creates a new Hamming code configuration.
    ///
    /// # Arguments
    ///
    /// * `data_bits` - Number of data bits to encode in each block
    /// * `config` - Whether to append the overall parity bit
    ///
    /// # Returns
    ///
    /// A new `HammingCode` instance or an error if `data_bits` is zero
    pub fn new(data_bits: usize, config: HammingConfig) -> Result<Self> {
        if data_bits == 0 {
            return Err(Error::invalid("Data bits must be positive"));
        }
        Ok(Self::with_layout(Layout::for_data(data_bits), config))
    }

    fn with_layout(layout: Layout, config: HammingConfig) -> Self {
        HammingCode { layout, config }
    }

    /// Creates a standard (7,4) Hamming code
    pub fn standard_7_4() -> Self {
        Self::with_layout(Layout::for_data(4), HammingConfig::standard())
    }

    /// Creates an extended (8,4) Hamming code
    pub fn extended_8_4() -> Self {
        Self::with_layout(Layout::for_data(4), HammingConfig::extended())
    }

    /// Number of data bits per block
    pub fn data_bits(&self) -> usize {
        self.layout.data_bits()
    }

    /// Number of Hamming parity bits per block, not counting the overall bit
    pub fn parity_bits(&self) -> usize {
        self.layout.parity_bits()
    }

    /// Gets the total code word length, overall parity bit included
    pub fn total_bits(&self) -> usize {
        self.config.codeword_bits(&self.layout)
    }

    pub fn config(&self) -> HammingConfig {
        self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Gets the number of encoded bytes needed for a given number of input
    /// bytes, length header included
    pub fn encoded_bytes_needed(&self, input_bytes: usize) -> usize {
        if input_bytes == 0 {
            return 0;
        }
        let total_input_bits = (LENGTH_HEADER_BYTES + input_bytes) * 8;
        let total_blocks = total_input_bits.div_ceil(self.data_bits());
        let total_output_bits = total_blocks * self.total_bits();
        total_output_bits.div_ceil(8)
    }

    /// Encodes exactly one block of `data_bits()` bits
    pub fn encode_block(&self, data: &Bits) -> Result<BitWord> {
        encode_with_layout(data, &self.layout, &self.config)
    }

    /// Decodes exactly one block of `total_bits()` bits
    pub fn decode_block(&self, received: &Bits) -> Result<DecodeResult> {
        expect_len(received, self.total_bits())?;
        Ok(decode_with_layout(received, &self.layout, &self.config))
    }

    /// Encodes a byte slice using the configured Hamming code
    ///
    /// # Arguments
    ///
    /// * `data` - Data to encode
    ///
    /// # Returns
    ///
    /// The length header and data, encoded with parity bits and padded to a
    /// whole byte. The empty slice encodes to nothing.
    pub fn encode_bytes(&self, data: &[u8]) -> Vec<u8> {
        if data.is_empty() {
            return Vec::new();
        }

        let mut framed = Vec::with_capacity(LENGTH_HEADER_BYTES + data.len());
        framed.extend_from_slice(&(data.len() as u64).to_be_bytes());
        framed.extend_from_slice(data);

        let data_bits = framed.view_bits::<Msb0>();
        let k = self.data_bits();
        let total = self.total_bits();

        let data_blocks = data_bits.len().div_ceil(k);
        let mut encoded = bitvec![u8, Msb0; 0; data_blocks * total];

        for block_idx in 0..data_blocks {
            let input_start = block_idx * k;
            let output_start = block_idx * total;

            // Last block is zero padded up to k bits
            let input_end = min(input_start + k, data_bits.len());
            let mut block = data_bits[input_start..input_end].to_bitvec();
            block.resize(k, false);

            let codeword = encode_unchecked(&block, &self.layout, &self.config);
            encoded[output_start..output_start + total].copy_from_bitslice(&codeword);
        }

        encoded.as_raw_slice().to_vec()
    }

    /// Decodes Hamming-encoded bytes, correcting single-bit errors
    ///
    /// Fails with [`Error::Uncorrectable`] on the first block that cannot be
    /// recovered.
    pub fn decode_bytes(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        self.decode_bytes_report(encoded).map(|report| report.data)
    }

    /// Decodes Hamming-encoded bytes and reports which blocks were corrected.
    ///
    /// Trailing bits that do not fill a whole block are byte padding and are
    /// ignored. The decoded length header decides how many data bytes are
    /// returned; a header claiming more bytes than the stream carries fails
    /// with [`Error::InvalidInput`].
    pub fn decode_bytes_report(&self, encoded: &[u8]) -> Result<StreamReport> {
        if encoded.is_empty() {
            return Ok(StreamReport {
                data: Vec::new(),
                blocks: 0,
                corrected: Vec::new(),
            });
        }

        let min_bytes_needed = self.total_bits().div_ceil(8);
        if encoded.len() < min_bytes_needed {
            return Err(Error::invalid(format!(
                "Encoded data too short, need at least {} bytes",
                min_bytes_needed
            )));
        }

        let encoded_bits = encoded.view_bits::<Msb0>();
        let k = self.data_bits();
        let total = self.total_bits();

        let blocks = encoded_bits.len() / total;
        let mut decoded = bitvec![u8, Msb0; 0; blocks * k];
        let mut corrected = Vec::new();

        for block_idx in 0..blocks {
            let input_start = block_idx * total;
            let output_start = block_idx * k;

            let received = &encoded_bits[input_start..input_start + total];
            let result = decode_with_layout(received, &self.layout, &self.config);

            let data = match (result.status, result.data) {
                (DecodeStatus::CorrectedSingleBit(position), Some(data)) => {
                    debug!("block {}: corrected bit {}", block_idx, position);
                    corrected.push(block_idx);
                    data
                }
                (DecodeStatus::Clean, Some(data)) => data,
                (status, _) => {
                    warn!("block {}: {}", block_idx, status);
                    return Err(Error::Uncorrectable {
                        block: block_idx,
                        status,
                    });
                }
            };
            decoded[output_start..output_start + k].copy_from_bitslice(&data);
        }

        let raw = &decoded.as_raw_slice()[..decoded.len() / 8];
        if raw.len() < LENGTH_HEADER_BYTES {
            return Err(Error::invalid(format!(
                "Encoded stream carries {} bytes, shorter than the length header",
                raw.len()
            )));
        }

        let mut header = [0u8; LENGTH_HEADER_BYTES];
        header.copy_from_slice(&raw[..LENGTH_HEADER_BYTES]);
        let payload = &raw[LENGTH_HEADER_BYTES..];
        let byte_len = usize::try_from(u64::from_be_bytes(header))
            .ok()
            .filter(|&len| len <= payload.len())
            .ok_or_else(|| {
                Error::invalid(format!(
                    "Length header {} exceeds the {} bytes in the stream",
                    u64::from_be_bytes(header),
                    payload.len()
                ))
            })?;

        Ok(StreamReport {
            data: payload[..byte_len].to_vec(),
            blocks,
            corrected,
        })
    }

    /// Encodes many independent words in parallel, preserving order
    pub fn encode_words(&self, words: &[BitWord]) -> Result<Vec<BitWord>> {
        words.par_iter().map(|word| self.encode_block(word)).collect()
    }

    /// Decodes many independent codewords in parallel, preserving order
    pub fn decode_words(&self, codewords: &[BitWord]) -> Result<Vec<DecodeResult>> {
        codewords
            .par_iter()
            .map(|codeword| self.decode_block(codeword))
            .collect()
    }
}

impl ErrorCorrection for HammingCode {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.encode_bytes(data))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.decode_bytes(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;
    use crate::ecc::bits::from_packed;

    /// Encodes an already framed byte sequence block by block
    fn encode_frame(code: &HammingCode, frame: &[u8]) -> Vec<u8> {
        let mut stream = BitWord::new();
        for chunk in frame.view_bits::<Msb0>().chunks(code.data_bits()) {
            stream.extend_from_bitslice(&code.encode_block(chunk).unwrap());
        }
        stream.into_vec()
    }

    #[test]
    fn test_hamming_creation() {
        // Standard (7,4) Hamming code
        let hamming = HammingCode::standard_7_4();
        assert_eq!(hamming.data_bits(), 4);
        assert_eq!(hamming.parity_bits(), 3);
        assert!(!hamming.config().extended);
        assert_eq!(hamming.total_bits(), 7);

        // Extended (8,4) Hamming code
        let hamming = HammingCode::extended_8_4();
        assert_eq!(hamming.data_bits(), 4);
        assert_eq!(hamming.parity_bits(), 3);
        assert!(hamming.config().extended);
        assert_eq!(hamming.total_bits(), 8);

        // Custom Hamming code
        let hamming = HammingCode::new(8, HammingConfig::standard()).unwrap();
        assert_eq!(hamming.data_bits(), 8);
        assert_eq!(hamming.parity_bits(), 4);
        assert_eq!(hamming.total_bits(), 12);

        // SECDED (72,64) as used by ECC memory
        let hamming = HammingCode::new(64, HammingConfig::extended()).unwrap();
        assert_eq!(hamming.parity_bits(), 7);
        assert_eq!(hamming.total_bits(), 72);

        assert!(HammingCode::new(0, HammingConfig::default()).is_err());
    }

    #[test]
    fn test_encoded_bytes_needed() {
        // 4 bytes plus the 8-byte header = 24 blocks of 7 bits = 168 bits
        let hamming = HammingCode::standard_7_4();
        assert_eq!(hamming.encoded_bytes_needed(4), 21);
        assert_eq!(hamming.encode_bytes(b"Test").len(), 21);

        let hamming = HammingCode::extended_8_4();
        assert_eq!(hamming.encoded_bytes_needed(4), 24);
        assert_eq!(hamming.encode_bytes(b"Test").len(), 24);

        // 96 bits = 9 blocks of 15 bits = 135 bits
        let hamming = HammingCode::new(11, HammingConfig::standard()).unwrap();
        assert_eq!(hamming.encoded_bytes_needed(4), 17);
        assert_eq!(hamming.encode_bytes(b"Test").len(), 17);

        assert_eq!(hamming.encoded_bytes_needed(0), 0);
    }

    #[test]
    fn test_block_length_checks() {
        let hamming = HammingCode::standard_7_4();
        assert_eq!(
            hamming.encode_block(bits![u8, Msb0; 1, 0, 1]),
            Err(Error::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            hamming.decode_block(bits![u8, Msb0; 0; 8]),
            Err(Error::LengthMismatch {
                expected: 7,
                found: 8
            })
        );

        let codeword = hamming.encode_block(bits![u8, Msb0; 1, 0, 1, 1]).unwrap();
        assert_eq!(codeword, bitvec![u8, Msb0; 0, 1, 1, 0, 0, 1, 1]);
        let result = hamming.decode_block(&codeword).unwrap();
        assert_eq!(result.status, DecodeStatus::Clean);
    }

    #[test]
    fn test_hamming_encode_decode_no_errors() {
        let data = b"Test data for Hamming code";

        for hamming in [
            HammingCode::standard_7_4(),
            HammingCode::extended_8_4(),
            HammingCode::new(8, HammingConfig::standard()).unwrap(),
            HammingCode::new(3, HammingConfig::extended()).unwrap(),
        ] {
            let encoded = hamming.encode_bytes(data);
            let decoded = hamming.decode_bytes(&encoded).unwrap();
            assert_eq!(decoded, data, "k = {}", hamming.data_bits());
        }
    }

    #[test]
    fn test_round_trip_is_exact_for_every_block_size() {
        for config in [HammingConfig::standard(), HammingConfig::extended()] {
            for k in 1..=40 {
                let hamming = HammingCode::new(k, config).unwrap();
                for len in 0..=16 {
                    let data: Vec<u8> = (0..len).map(|i| (i * 37 + k) as u8).collect();
                    let encoded = hamming.encode_bytes(&data);
                    assert_eq!(encoded.len(), hamming.encoded_bytes_needed(len));
                    assert_eq!(
                        hamming.decode_bytes(&encoded).unwrap(),
                        data,
                        "k = {}, len = {}, extended = {}",
                        k,
                        len,
                        config.extended
                    );
                }
            }
        }
    }

    #[test]
    fn test_wide_blocks_drop_padding() {
        // 20 bytes in 26-bit blocks needs 7 blocks, i.e. 22 bits of padding
        let hamming = HammingCode::new(26, HammingConfig::extended()).unwrap();
        let data = b"trait object";
        let decoded = hamming.decode_bytes(&hamming.encode_bytes(data)).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_hamming_error_correction() {
        let data = b"Test";

        for hamming in [HammingCode::standard_7_4(), HammingCode::extended_8_4()] {
            let mut encoded = hamming.encode_bytes(data);

            // Introduce a single bit error in the first block
            encoded[0] ^= 0x40;

            let report = hamming.decode_bytes_report(&encoded).unwrap();
            assert_eq!(report.data, data);
            assert_eq!(report.corrected, vec![0]);
            assert_eq!(report.blocks, 24);
        }
    }

    #[test]
    fn test_hamming_one_error_per_block() {
        let data = b"Hamming";
        let hamming = HammingCode::extended_8_4();
        let mut encoded = hamming.encode_bytes(data);

        // Each byte is one extended block; hit a different bit in each
        for (i, byte) in encoded.iter_mut().enumerate() {
            *byte ^= 0x80 >> (i % 8);
        }

        let report = hamming.decode_bytes_report(&encoded).unwrap();
        assert_eq!(report.data, data);
        assert_eq!(report.corrected.len(), report.blocks);
    }

    #[test]
    fn test_hamming_multi_bit_error_detection() {
        // Extended Hamming can detect (but not correct) 2-bit errors
        let data = b"Test";
        let hamming = HammingCode::extended_8_4();

        let mut encoded = hamming.encode_bytes(data);

        // Introduce two bit errors in the second block
        encoded[1] ^= 0x40;
        encoded[1] ^= 0x20;

        assert_eq!(
            hamming.decode_bytes(&encoded),
            Err(Error::Uncorrectable {
                block: 1,
                status: DecodeStatus::DetectedDoubleBit
            })
        );
    }

    #[test]
    fn test_length_header() {
        let hamming = HammingCode::extended_8_4();

        let mut frame = 2u64.to_be_bytes().to_vec();
        frame.extend_from_slice(b"ab");
        assert_eq!(encode_frame(&hamming, &frame), hamming.encode_bytes(b"ab"));

        // Header claims more bytes than the stream holds
        let mut frame = 100u64.to_be_bytes().to_vec();
        frame.extend_from_slice(b"ab");
        assert!(matches!(
            hamming.decode_bytes(&encode_frame(&hamming, &frame)),
            Err(Error::InvalidInput(_))
        ));

        // Stream too short to hold a header at all
        assert!(matches!(
            hamming.decode_bytes(&encode_frame(&hamming, &[0, 0, 0, 0])),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let hamming = HammingCode::standard_7_4();

        let encoded = hamming.encode_bytes(&[]);
        assert!(encoded.is_empty());

        let decoded = hamming.decode_bytes(&[]).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_too_short_input() {
        // One byte cannot hold a 12-bit block
        let hamming = HammingCode::new(8, HammingConfig::standard()).unwrap();
        assert!(matches!(
            hamming.decode_bytes(&[0xFF]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_error_correction_trait() {
        let code = HammingCode::new(9, HammingConfig::standard()).unwrap();
        let hamming: Box<dyn ErrorCorrection> = Box::new(code);
        let data = b"12345678";
        let encoded = hamming.encode(data).unwrap();
        assert_eq!(hamming.decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let hamming = HammingCode::new(5, HammingConfig::extended()).unwrap();
        let words: Vec<BitWord> = (0u64..32)
            .map(|v| from_packed(v, 5).unwrap())
            .collect();

        let encoded = hamming.encode_words(&words).unwrap();
        for (word, codeword) in words.iter().zip(&encoded) {
            assert_eq!(codeword, &hamming.encode_block(word).unwrap());
        }

        let decoded = hamming.decode_words(&encoded).unwrap();
        for (word, result) in words.iter().zip(decoded) {
            assert_eq!(result.status, DecodeStatus::Clean);
            assert_eq!(result.data.as_ref(), Some(word));
        }

        let bad = vec![BitWord::repeat(false, 3)];
        assert!(hamming.encode_words(&bad).is_err());
    }
}
