//! The LOOK table, mapping tile numbers to the descriptions shown when the
//! player looks at an object.

use crate::{
    script::text::decode_latin1,
    utils::{
        compression::lzw::{self, DecompressionError},
        mem_reader::MemReader,
    },
};

/// Tile numbers at or above this value mark the end of the table.
const TILE_LIMIT: u16 = 2048;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LookEntry {
    pub tile: u16,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct LookTable {
    entries: Vec<LookEntry>,
}

impl LookTable {
    /// Parses a LOOK table, decompressing it first if it is an LZW buffer.
    ///
    /// The table is a sequence of little-endian tile numbers, each followed by
    /// a NUL-terminated description. Entries with an empty description are
    /// skipped.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecompressionError> {
        let decompressed;
        let data = if lzw::is_compressed(bytes) {
            decompressed = lzw::decompress(bytes)?;
            &decompressed[..]
        } else {
            bytes
        };

        let mut reader = MemReader::new(data);
        let mut entries = Vec::new();
        while reader.remaining() > 2 {
            let Ok(tile) = reader.read_u16_le() else {
                break;
            };
            if tile >= TILE_LIMIT {
                break;
            }
            let text = reader.read_cstr();
            if !text.is_empty() {
                entries.push(LookEntry {
                    tile,
                    text: decode_latin1(text),
                });
            }
        }
        log::debug!("Read {} look entries", entries.len());
        Ok(LookTable { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[LookEntry] {
        &self.entries
    }

    /// Returns the description of the first entry for `tile`.
    #[must_use]
    pub fn get(&self, tile: u16) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.tile == tile)
            .map(|entry| entry.text.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
