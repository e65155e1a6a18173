//! A minimal LZW encoder producing streams the decoder accepts.
//!
//! Only used to build fixtures. It mirrors the decoder's dictionary and width
//! bookkeeping, and never assigns codewords past 12 bits.

use std::collections::HashMap;

use crate::utils::compression::lzw::{END_CODE, FIRST_FREE_CODEWORD, RESET_CODE};

const MAX_CODEWORD: u16 = 0x1000;

fn width_for(next_free: usize) -> u32 {
    let mut bits = 9;
    let mut grow_at = 0x200;
    while next_free >= grow_at && bits < 12 {
        bits += 1;
        grow_at *= 2;
    }
    bits
}

#[derive(Default)]
struct BitWriter {
    bytes: Vec<u8>,
    acc: u64,
    num_bits: u32,
}

impl BitWriter {
    fn write(&mut self, code: u16, bits: u32) {
        self.acc |= u64::from(code) << self.num_bits;
        self.num_bits += bits;
        while self.num_bits >= 8 {
            self.bytes.push(self.acc.to_le_bytes()[0]);
            self.acc >>= 8;
            self.num_bits -= 8;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.num_bits > 0 {
            self.bytes.push(self.acc.to_le_bytes()[0]);
        }
        self.bytes
    }
}

/// Tracks how many codewords follow the latest reset, which decides the width
/// the decoder will use for the next one.
struct ChunkState {
    emitted: usize,
}

impl ChunkState {
    fn next_width(&self) -> u32 {
        match self.emitted {
            0 => 9,
            n => width_for(usize::from(FIRST_FREE_CODEWORD) + n - 1),
        }
    }
}

/// Compresses `data` as a single dictionary run.
pub(crate) fn compress(data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return compress_chunks(&[]);
    }
    compress_chunks(&[data])
}

/// Compresses the concatenation of `chunks`, starting each one with a reset.
///
/// Every chunk must be non-empty. With no chunks, emits a stream declaring zero
/// bytes.
pub(crate) fn compress_chunks(chunks: &[&[u8]]) -> Vec<u8> {
    let total: usize = chunks.iter().map(|chunk| chunk.len()).sum();
    let mut writer = BitWriter::default();
    let mut state: Option<ChunkState> = None;

    let placeholder: &[&[u8]] = &[&[0]];
    let chunks = if chunks.is_empty() { placeholder } else { chunks };

    for chunk in chunks {
        let (&first, rest) = chunk.split_first().expect("chunks must be non-empty");
        writer.write(RESET_CODE, state.as_ref().map_or(9, ChunkState::next_width));
        let mut chunk_state = ChunkState { emitted: 0 };
        let mut table: HashMap<(u16, u8), u16> = HashMap::new();
        let mut next_code = FIRST_FREE_CODEWORD;
        let mut current = u16::from(first);

        for &byte in rest {
            if let Some(&code) = table.get(&(current, byte)) {
                current = code;
                continue;
            }
            writer.write(current, chunk_state.next_width());
            chunk_state.emitted += 1;
            if next_code < MAX_CODEWORD {
                table.insert((current, byte), next_code);
                next_code += 1;
            }
            current = u16::from(byte);
        }
        writer.write(current, chunk_state.next_width());
        chunk_state.emitted += 1;
        state = Some(chunk_state);
    }

    let end_width = state.as_ref().map_or(9, ChunkState::next_width);
    writer.write(END_CODE, end_width);

    let mut out = u32::try_from(total).unwrap().to_le_bytes().to_vec();
    out.extend(writer.finish());
    out
}
