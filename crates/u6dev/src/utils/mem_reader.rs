use bytes::BufMut;

pub trait FromFixedBytes: Sized {
    const SIZE: usize;
    fn parse<B: bytes::Buf>(bytes: B) -> Self;
}

macro_rules! impl_fixed_bytes_for_num {
    ($($num:ty),*) => {
        $(
            impl FromFixedBytes for $num {
                const SIZE: usize = std::mem::size_of::<$num>();

                fn parse<B: bytes::Buf>(bytes: B) -> Self {
                    let mut byte_array = [0u8; <Self as FromFixedBytes>::SIZE];
                    (&mut byte_array[..]).put(bytes);
                    Self::from_le_bytes(byte_array)
                }
            }
        )*
    };
}

impl_fixed_bytes_for_num!(u8, u16, u32);

#[derive(Debug, thiserror::Error)]
#[error(
    "Not enough data at offset {position}. Needed {required}, but only {available} available."
)]
pub struct NotEnoughData {
    pub position: usize,
    pub required: usize,
    pub available: usize,
}

pub type Result<T> = std::result::Result<T, NotEnoughData>;

/// A forward cursor over a byte slice with little-endian reads.
///
/// Every read is bounds-checked; a failed read leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct MemReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> MemReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    #[must_use]
    pub fn tell(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn not_enough(&self, required: usize) -> NotEnoughData {
        NotEnoughData {
            position: self.position,
            required,
            available: self.remaining(),
        }
    }

    pub fn seek_to(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(NotEnoughData {
                position: offset,
                required: offset,
                available: self.data.len(),
            });
        }
        self.position = offset;
        Ok(())
    }

    /// Returns the next byte without consuming it.
    #[must_use]
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.position).copied()
    }

    /// Takes the next `len` bytes as a slice of the underlying data.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.not_enough(len));
        }
        let slice = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Advances by up to `len` bytes, stopping at the end of the data.
    ///
    /// Returns the number of bytes actually skipped.
    pub fn skip_saturating(&mut self, len: usize) -> usize {
        let skipped = len.min(self.remaining());
        self.position += skipped;
        skipped
    }

    /// Consumes bytes for as long as `pred` holds, returning them.
    pub fn read_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a [u8] {
        let rest = &self.data[self.position..];
        let len = rest.iter().position(|&b| !pred(b)).unwrap_or(rest.len());
        self.position += len;
        &rest[..len]
    }

    /// Reads a NUL-terminated string, consuming the terminator if present.
    ///
    /// The returned slice excludes the terminator. A string running to the end
    /// of the data is returned whole.
    pub fn read_cstr(&mut self) -> &'a [u8] {
        let text = self.read_while(|b| b != 0);
        self.skip_saturating(1);
        text
    }

    pub fn read_value<T: FromFixedBytes>(&mut self) -> Result<T> {
        let bytes = self.read_slice(T::SIZE)?;
        Ok(T::parse(bytes))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_value()
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.read_value()
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.read_value()
    }
}

#[cfg(test)]
mod tests {
    use datalit::datalit;

    use super::*;

    #[test]
    fn reads_little_endian_values() {
        let data = datalit!(0x01, 0x0203u16_le, 0x0405_0607u32_le).to_vec();
        let mut reader = MemReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16_le().unwrap(), 0x0203);
        assert_eq!(reader.read_u32_le().unwrap(), 0x0405_0607);
        assert!(reader.is_empty());
    }

    #[test]
    fn short_read_reports_position() {
        let data = [1u8, 2, 3];
        let mut reader = MemReader::new(&data);
        assert_eq!(reader.read_slice(2).unwrap(), &[1, 2]);
        let err = reader.read_u16_le().unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.required, 2);
        assert_eq!(err.available, 1);
        // The failed read does not move the cursor.
        assert_eq!(reader.tell(), 2);
    }

    #[test]
    fn cstr_and_saturating_skip() {
        let data = b"abc\0de";
        let mut reader = MemReader::new(data);
        assert_eq!(reader.read_cstr(), b"abc");
        assert_eq!(reader.read_cstr(), b"de");
        assert!(reader.is_empty());
        assert_eq!(reader.skip_saturating(4), 0);
    }

    #[test]
    fn seek_past_end_fails() {
        let data = [0u8; 4];
        let mut reader = MemReader::new(&data);
        assert!(reader.seek_to(4).is_ok());
        assert!(reader.seek_to(5).is_err());
    }
}
