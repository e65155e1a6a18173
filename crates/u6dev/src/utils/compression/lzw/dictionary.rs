use super::{DecompressionError, END_CODE, RESET_CODE};

/// The first codeword that can be assigned to a dictionary entry. Everything
/// below it is either a literal byte or one of the two control codewords.
pub const FIRST_FREE_CODEWORD: u16 = 0x102;

/// The number of entry slots in the dictionary.
pub const DICTIONARY_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    root: u8,
    backref: u16,
}

/// The adaptive dictionary used while decoding a single LZW stream.
///
/// Each entry encodes a string as "the string of `backref`, followed by
/// `root`". A dictionary belongs to one decode; it holds no state that could be
/// shared between streams.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<Entry>,
    next_free: usize,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![Entry::default(); DICTIONARY_CAPACITY],
            next_free: usize::from(FIRST_FREE_CODEWORD),
        }
    }

    /// Clears every entry and moves the cursor back to the first free codeword.
    pub fn reset(&mut self) {
        self.entries.fill(Entry::default());
        self.next_free = usize::from(FIRST_FREE_CODEWORD);
    }

    /// The codeword that the next call to [`Self::add`] will assign.
    #[must_use]
    pub fn next_free(&self) -> usize {
        self.next_free
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.next_free >= DICTIONARY_CAPACITY
    }

    /// Returns true if `codeword` can be resolved without the KwKwK rule.
    #[must_use]
    pub fn contains(&self, codeword: u16) -> bool {
        usize::from(codeword) < self.next_free
    }

    /// Registers the string `backref + root` at the next free codeword.
    ///
    /// Does nothing once the dictionary is full. Callers that care check
    /// [`Self::is_full`] first.
    pub fn add(&mut self, root: u8, backref: u16) {
        if self.is_full() {
            return;
        }
        self.entries[self.next_free] = Entry { root, backref };
        self.next_free += 1;
    }

    /// Writes the bytes encoded by `codeword` into `out` (replacing its
    /// contents) and returns the first of them.
    ///
    /// The walk over back references is bounded by the dictionary capacity, so
    /// a cyclic chain fails instead of looping.
    pub fn resolve(&self, codeword: u16, out: &mut Vec<u8>) -> Result<u8, DecompressionError> {
        out.clear();
        let mut current = codeword;
        for _ in 0..=DICTIONARY_CAPACITY {
            if let Ok(literal) = u8::try_from(current) {
                out.push(literal);
                out.reverse();
                return Ok(literal);
            }

            if current == RESET_CODE || current == END_CODE || !self.contains(current) {
                return Err(DecompressionError::CorruptDictionary { codeword });
            }

            let entry = self.entries[usize::from(current)];
            out.push(entry.root);
            current = entry.backref;
        }
        Err(DecompressionError::CorruptDictionary { codeword })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_resolve_to_themselves() {
        let dict = Dictionary::new();
        let mut out = Vec::new();
        assert_eq!(dict.resolve(0x41, &mut out).unwrap(), b'A');
        assert_eq!(out, b"A");
    }

    #[test]
    fn chains_resolve_in_order() {
        let mut dict = Dictionary::new();
        dict.add(b'B', u16::from(b'A')); // 0x102 = "AB"
        dict.add(b'C', 0x102); // 0x103 = "ABC"
        let mut out = Vec::new();
        assert_eq!(dict.resolve(0x103, &mut out).unwrap(), b'A');
        assert_eq!(out, b"ABC");
        assert_eq!(dict.next_free(), 0x104);
    }

    #[test]
    fn reset_forgets_entries() {
        let mut dict = Dictionary::new();
        dict.add(b'B', u16::from(b'A'));
        dict.reset();
        assert_eq!(dict.next_free(), usize::from(FIRST_FREE_CODEWORD));
        assert!(!dict.contains(0x102));
        assert!(matches!(
            dict.resolve(0x102, &mut Vec::new()),
            Err(DecompressionError::CorruptDictionary { codeword: 0x102 })
        ));
    }

    #[test]
    fn add_stops_at_capacity() {
        let mut dict = Dictionary::new();
        while !dict.is_full() {
            dict.add(0, 0);
        }
        assert_eq!(dict.next_free(), DICTIONARY_CAPACITY);
        dict.add(1, 1);
        assert_eq!(dict.next_free(), DICTIONARY_CAPACITY);
    }

    #[test]
    fn cyclic_chain_is_reported() {
        let mut dict = Dictionary::new();
        dict.add(b'x', 0x103);
        dict.add(b'y', 0x102);
        let result = dict.resolve(0x102, &mut Vec::new());
        assert!(matches!(
            result,
            Err(DecompressionError::CorruptDictionary { codeword: 0x102 })
        ));
    }

    #[test]
    fn control_codewords_are_not_entries() {
        let mut dict = Dictionary::new();
        dict.add(b'x', RESET_CODE);
        assert!(dict.resolve(0x102, &mut Vec::new()).is_err());
    }
}
