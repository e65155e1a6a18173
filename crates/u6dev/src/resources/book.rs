//! Book texts, stored as plain items of `BOOK.DAT`.

use crate::{resources::container::Library, script::text::decode_latin1};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Book {
    pub index: usize,
    pub text: String,
}

/// Reads every non-empty book from a library.
///
/// Book items are stored uncompressed and NUL-terminated.
#[must_use]
pub fn read_books(library: &Library) -> Vec<Book> {
    (0..library.len())
        .filter_map(|index| {
            let raw = library.raw_item(index)?;
            let end = raw.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
            let text = decode_latin1(&raw[..end]);
            if text.is_empty() {
                log::debug!("Book {index} is empty");
                return None;
            }
            Some(Book { index, text })
        })
        .collect()
}
