use std::{io::Write, path::Path};

use u6dev::resources::{book::read_books, container::Stride};

use super::open_library;
use crate::output::{OutputFormat, write_rows};

pub(crate) fn export_books(
    path: &Path,
    stride: Stride,
    format: OutputFormat,
    output: impl Write,
) -> anyhow::Result<usize> {
    let library = open_library(path, stride)?;
    let books = read_books(&library);
    log::info!("Read {} books from {}", books.len(), path.display());
    write_rows(output, format, &books)?;
    Ok(books.len())
}

#[cfg(test)]
mod tests {
    use crate::testing::{library_two, write_file};

    use super::*;

    #[test]
    fn exports_books() {
        let dir = tempfile::tempdir().unwrap();
        let data = library_two(&[
            Some(b"Of the Virtues\nHonesty...\0\0".as_slice()),
            None,
            Some(b"\0".as_slice()),
            Some(b"Runes|Moons".as_slice()),
        ]);
        let path = write_file(dir.path(), "BOOK.DAT", &data);

        let mut out = Vec::new();
        let count = export_books(&path, Stride::Two, OutputFormat::Pipe, &mut out).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0|Of the Virtues\\nHonesty...\n3|Runes\\|Moons\n"
        );
    }
}
