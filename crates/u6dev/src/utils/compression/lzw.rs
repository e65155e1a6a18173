//! The LZW variant used by Ultima 6 for its compressed data files.
//!
//! A compressed buffer starts with the little-endian `u32` length of the
//! decompressed data, followed by a stream of variable-width codewords packed
//! least-significant-bit first. Codewords start at 9 bits and grow by one bit
//! each time the dictionary fills its current range, up to 12 bits.

use bitter::BitReader;

mod dictionary;

pub use dictionary::{DICTIONARY_CAPACITY, Dictionary, FIRST_FREE_CODEWORD};

/// Resets the dictionary. The next codeword is always a literal byte.
pub const RESET_CODE: u16 = 0x100;
/// Marks the end of the compressed stream.
pub const END_CODE: u16 = 0x101;

const HEADER_SIZE: usize = 4;
const INITIAL_CODEWORD_BITS: u32 = 9;
const MAX_CODEWORD_BITS: u32 = 12;

#[derive(Debug, thiserror::Error)]
pub enum DecompressionError {
    #[error("Buffer does not carry a valid LZW header")]
    InvalidBuffer,
    #[error("Stream ended after {written} of {expected} bytes")]
    PrematureEnd { expected: usize, written: usize },
    #[error("Codeword {codeword:#05x} does not resolve to a dictionary string")]
    CorruptDictionary { codeword: u16 },
}

/// Returns true if the buffer looks like an LZW-compressed stream.
///
/// The test is purely structural: the declared length must fit in 24 bits and
/// the first codeword must be the reset code. A plain buffer can pass it by
/// accident.
#[must_use]
pub fn is_compressed(buffer: &[u8]) -> bool {
    if buffer.len() < 6 {
        return false;
    }
    buffer[3] == 0 && buffer[4] == 0 && buffer[5] & 1 == 1
}

/// Returns the declared decompressed length, without validating the header.
///
/// Returns `None` if the buffer is too short to hold the length field.
#[must_use]
pub fn uncompressed_size(buffer: &[u8]) -> Option<u32> {
    let header: [u8; HEADER_SIZE] = buffer.get(..HEADER_SIZE)?.try_into().ok()?;
    Some(u32::from_le_bytes(header))
}

/// Tracks the current codeword width and the dictionary size at which it next
/// grows.
#[derive(Debug, Clone, Copy)]
struct CodewordWidth {
    bits: u32,
    grow_at: usize,
}

impl CodewordWidth {
    fn initial() -> Self {
        Self {
            bits: INITIAL_CODEWORD_BITS,
            grow_at: 1 << INITIAL_CODEWORD_BITS,
        }
    }

    fn update(&mut self, next_free: usize) {
        if next_free >= self.grow_at && self.bits < MAX_CODEWORD_BITS {
            self.bits += 1;
            self.grow_at *= 2;
        }
    }
}

/// An output buffer that stops accepting bytes at the declared length.
struct BoundedOutput {
    data: Vec<u8>,
    limit: usize,
}

impl BoundedOutput {
    fn new(limit: usize) -> Self {
        Self {
            data: Vec::with_capacity(limit),
            limit,
        }
    }

    fn is_full(&self) -> bool {
        self.data.len() >= self.limit
    }

    fn extend(&mut self, bytes: &[u8]) {
        let room = self.limit - self.data.len();
        self.data.extend_from_slice(&bytes[..bytes.len().min(room)]);
    }

    fn premature_end(&self) -> DecompressionError {
        DecompressionError::PrematureEnd {
            expected: self.limit,
            written: self.data.len(),
        }
    }
}

fn read_codeword<R: BitReader>(
    reader: &mut R,
    width: CodewordWidth,
    output: &BoundedOutput,
) -> Result<u16, DecompressionError> {
    let value = reader
        .read_bits(width.bits)
        .ok_or_else(|| output.premature_end())?;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "codewords are at most 12 bits wide"
    )]
    Ok(value as u16)
}

/// Decompresses an LZW buffer into exactly the number of bytes its header
/// declares.
///
/// Decoding stops as soon as the output is full, so trailing codewords are
/// never read. Running out of input, or meeting the end code, before that point
/// is an error.
pub fn decompress(buffer: &[u8]) -> Result<Vec<u8>, DecompressionError> {
    if !is_compressed(buffer) {
        return Err(DecompressionError::InvalidBuffer);
    }
    // The validity check guarantees the top byte is zero.
    let expected = (usize::from(buffer[2]) << 16)
        | (usize::from(buffer[1]) << 8)
        | usize::from(buffer[0]);

    let mut reader = bitter::LittleEndianReader::new(&buffer[HEADER_SIZE..]);
    let mut dict = Dictionary::new();
    let mut width = CodewordWidth::initial();
    let mut output = BoundedOutput::new(expected);
    let mut string = Vec::new();
    let mut prev_codeword: u16 = 0;

    while !output.is_full() {
        let codeword = read_codeword(&mut reader, width, &output)?;
        match codeword {
            RESET_CODE => {
                dict.reset();
                width = CodewordWidth::initial();
                let literal = read_codeword(&mut reader, width, &output)?;
                output.extend(&literal.to_le_bytes()[..1]);
                prev_codeword = literal;
                continue;
            }
            END_CODE => return Err(output.premature_end()),
            _ => {}
        }

        let root = if dict.contains(codeword) {
            dict.resolve(codeword, &mut string)?
        } else {
            // The codeword is the one about to be defined, which is always the
            // previous string followed by its own first byte.
            let root = dict.resolve(prev_codeword, &mut string)?;
            string.push(root);
            root
        };
        output.extend(&string);

        dict.add(root, prev_codeword);
        width.update(dict.next_free());
        prev_codeword = codeword;
    }

    log::trace!("Decompressed {} bytes from {} byte buffer", expected, buffer.len());
    Ok(output.data)
}
