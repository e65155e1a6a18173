//! The offset-table "library" container used by `CONVERSE.A`, `BOOK.DAT` and
//! similar files.
//!
//! A library starts with a table of little-endian offsets, one per item. The
//! table length is not stored: it is the first non-zero offset, since the data
//! of the first present item starts right after the table. An offset of zero
//! marks a hole. Item sizes are not stored either, and are derived from the
//! next non-zero offset (or the end of the file).

use std::{fmt, ops::Range, path::Path};

use bytes::Bytes;

use crate::utils::{
    compression::lzw,
    mem_reader::{self, MemReader},
};

/// The width of one offset table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stride {
    /// 16-bit offsets, no flags. Used by `BOOK.DAT`.
    Two,
    /// 24-bit offsets with an 8-bit flag in the top byte.
    Four,
}

impl Stride {
    #[must_use]
    pub fn bytes(self) -> usize {
        match self {
            Stride::Two => 2,
            Stride::Four => 4,
        }
    }
}

impl TryFrom<usize> for Stride {
    type Error = InvalidStride;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Stride::Two),
            4 => Ok(Stride::Four),
            other => Err(InvalidStride(other)),
        }
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported offset table stride {0}, expected 2 or 4")]
pub struct InvalidStride(pub usize);

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Library is truncated: needed {required} bytes, but only {available} available")]
    Truncated { required: usize, available: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<mem_reader::NotEnoughData> for LibraryError {
    fn from(err: mem_reader::NotEnoughData) -> Self {
        LibraryError::Truncated {
            required: err.position + err.required,
            available: err.position + err.available,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RawEntry {
    offset: u32,
    flag: u8,
}

impl RawEntry {
    fn read(reader: &mut MemReader<'_>, stride: Stride) -> mem_reader::Result<Self> {
        match stride {
            Stride::Two => Ok(RawEntry {
                offset: u32::from(reader.read_u16_le()?),
                flag: 0,
            }),
            Stride::Four => {
                let raw = reader.read_u32_le()?;
                Ok(RawEntry {
                    offset: raw & 0x00FF_FFFF,
                    flag: raw.to_be_bytes()[0],
                })
            }
        }
    }
}

/// One entry of a library's offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryItem {
    index: usize,
    offset: u32,
    flag: u8,
    size: u32,
    compressed: bool,
}

impl LibraryItem {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    pub fn flag(&self) -> u8 {
        self.flag
    }

    /// The size derived from the next present item, or the end of the file.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn is_hole(&self) -> bool {
        self.offset == 0
    }

    /// Whether the flag byte marks the item as compressed.
    ///
    /// Flags `0x01` and `0x20` mean compressed. An item flagged `0xFF` takes
    /// the flag of the next item not flagged `0xFF`, and is uncompressed if
    /// there is none. Only informational: [`Library::item`] decides from the
    /// item data itself.
    #[must_use]
    pub fn is_compressed_flag(&self) -> bool {
        self.compressed
    }

    fn byte_range(&self) -> Option<Range<usize>> {
        if self.is_hole() || self.size == 0 {
            return None;
        }
        let start = usize::try_from(self.offset).ok()?;
        let end = start.checked_add(usize::try_from(self.size).ok()?)?;
        Some(start..end)
    }
}

/// A parsed library file.
///
/// Holds the file contents, so item slices are cheap views into it.
#[derive(Clone)]
pub struct Library {
    data: Bytes,
    stride: Stride,
    table_len: usize,
    items: Vec<LibraryItem>,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("size", &self.data.len())
            .field("stride", &self.stride)
            .field("items", &self.items.len())
            .finish()
    }
}

impl Library {
    pub fn open(path: impl AsRef<Path>, stride: Stride) -> Result<Self, LibraryError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data, stride)
    }

    pub fn from_bytes(data: impl Into<Bytes>, stride: Stride) -> Result<Self, LibraryError> {
        let data: Bytes = data.into();
        let file_size = data.len();
        if file_size < stride.bytes() {
            return Err(LibraryError::Truncated {
                required: stride.bytes(),
                available: file_size,
            });
        }

        let mut reader = MemReader::new(&data);
        let mut table_len = 0;
        while let Ok(entry) = RawEntry::read(&mut reader, stride) {
            if entry.offset != 0 {
                table_len = entry.offset as usize;
                break;
            }
        }
        if table_len > file_size {
            return Err(LibraryError::Truncated {
                required: table_len,
                available: file_size,
            });
        }

        let count = table_len / stride.bytes();
        let mut reader = MemReader::new(&data);
        let raw_entries = (0..count)
            .map(|_| RawEntry::read(&mut reader, stride))
            .collect::<mem_reader::Result<Vec<_>>>()?;

        // A sentinel at the end of the file closes the last present item.
        let sentinel = u32::try_from(file_size).unwrap_or(u32::MAX);
        let mut items = Vec::with_capacity(count);
        let mut next_offset = sentinel;
        let mut next_compressed = false;
        for (index, entry) in raw_entries.iter().enumerate().rev() {
            let size = if entry.offset != 0 && next_offset > entry.offset {
                next_offset - entry.offset
            } else {
                0
            };
            let compressed = match entry.flag {
                0xFF => next_compressed,
                flag => matches!(flag, 0x01 | 0x20),
            };
            next_compressed = compressed;
            items.push(LibraryItem {
                index,
                offset: entry.offset,
                flag: entry.flag,
                size,
                compressed,
            });
            if entry.offset != 0 {
                next_offset = entry.offset;
            }
        }
        items.reverse();

        log::debug!(
            "Read library of {} bytes with {} items (stride {})",
            file_size,
            items.len(),
            stride
        );

        Ok(Library {
            data,
            stride,
            table_len,
            items,
        })
    }

    #[must_use]
    pub fn stride(&self) -> Stride {
        self.stride
    }

    /// The number of entries in the offset table, holes included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The length of the offset table in bytes.
    #[must_use]
    pub fn table_len(&self) -> usize {
        self.table_len
    }

    #[must_use]
    pub fn file_size(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<LibraryItem> {
        self.items.get(index).copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = LibraryItem> + '_ {
        self.items.iter().copied()
    }

    /// Returns the stored bytes of an item, without any decompression.
    ///
    /// Returns `None` for holes, zero-sized items, and items whose range falls
    /// outside the file.
    #[must_use]
    pub fn raw_item(&self, index: usize) -> Option<Bytes> {
        let range = self.items.get(index)?.byte_range()?;
        if range.end > self.data.len() {
            log::debug!("Item {index} range {range:?} exceeds the library size");
            return None;
        }
        Some(self.data.slice(range))
    }

    /// Returns the contents of an item, decompressing it if needed.
    ///
    /// An item whose first four bytes are zero stores its contents directly
    /// after them. Anything else is treated as an LZW stream; if that fails to
    /// decode, the stored bytes are returned unchanged.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<Bytes> {
        let raw = self.raw_item(index)?;
        let Some(header) = raw.get(..4) else {
            return Some(raw);
        };
        if header == [0, 0, 0, 0] {
            return Some(raw.slice(4..));
        }
        match lzw::decompress(&raw) {
            Ok(data) => Some(Bytes::from(data)),
            Err(err) => {
                log::debug!("Item {index} is not a valid LZW stream ({err}), using stored bytes");
                Some(raw)
            }
        }
    }
}
