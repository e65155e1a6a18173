use std::{io::Write, path::Path};

use u6dev::{resources::container::Stride, utils::debug::hex_dump};

use super::open_library;

/// Prints the offset table of a library, one item per line.
pub(crate) fn list_items(
    path: &Path,
    stride: Stride,
    mut output: impl Write,
) -> anyhow::Result<()> {
    let library = open_library(path, stride)?;
    writeln!(
        output,
        "{} items, stride {}, table {} bytes, file {} bytes",
        library.len(),
        library.stride(),
        library.table_len(),
        library.file_size()
    )?;
    for entry in library.entries() {
        if entry.is_hole() {
            writeln!(output, "{:5}  hole", entry.index())?;
            continue;
        }
        writeln!(
            output,
            "{:5}  offset {:#08x}  flag {:#04x}  size {:6}{}",
            entry.index(),
            entry.offset(),
            entry.flag(),
            entry.size(),
            if entry.is_compressed_flag() {
                "  compressed"
            } else {
                ""
            }
        )?;
    }
    Ok(())
}

/// Hex dumps one item. Unless `raw` is set, the item is decompressed first.
pub(crate) fn dump_item(
    path: &Path,
    stride: Stride,
    index: usize,
    raw: bool,
    mut output: impl Write,
) -> anyhow::Result<()> {
    let library = open_library(path, stride)?;
    if index >= library.len() {
        anyhow::bail!(
            "Item {index} is out of range, the library has {} items",
            library.len()
        );
    }
    let data = if raw {
        library.raw_item(index)
    } else {
        library.item(index)
    };
    let data = data.ok_or_else(|| anyhow::anyhow!("Item {index} has no data"))?;
    hex_dump(&mut output, &data, 0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::testing::{library_four, stored_script, write_file};

    use super::*;

    fn sample(dir: &Path) -> std::path::PathBuf {
        let script = stored_script(b"Iolo", b"");
        let data = library_four(&[Some(script.as_slice()), None, Some(b"\x01\x02".as_slice())]);
        write_file(dir, "CONVERSE.A", &data)
    }

    #[test]
    fn lists_items_and_holes() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample(dir.path());
        let mut out = Vec::new();
        list_items(&path, Stride::Four, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "3 items, stride 4, table 12 bytes, file 24 bytes",
                "    0  offset 0x00000c  flag 0x00  size     10",
                "    1  hole",
                "    2  offset 0x000016  flag 0x00  size      2",
            ]
        );
    }

    #[test]
    fn dumps_stored_and_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample(dir.path());

        let mut out = Vec::new();
        dump_item(&path, Stride::Four, 0, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(2).unwrap().starts_with("0000  00 00 49 6F 6C 6F"));

        let mut out = Vec::new();
        dump_item(&path, Stride::Four, 0, true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(2).unwrap().starts_with("0000  00 00 00 00 00 00 49"));
    }

    #[test]
    fn dump_reports_holes_and_bad_indices() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample(dir.path());
        let err = dump_item(&path, Stride::Four, 1, false, Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "Item 1 has no data");
        let err = dump_item(&path, Stride::Four, 7, false, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("NOPE");
        let err = list_items(&path, Stride::Four, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("NOPE"));
    }
}
