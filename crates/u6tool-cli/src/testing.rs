//! Fixtures for command tests.

use std::path::{Path, PathBuf};

/// Builds a library file with a 4-byte offset table. `None` items are holes.
pub(crate) fn library_four(items: &[Option<&[u8]>]) -> Vec<u8> {
    let table_len = items.len() * 4;
    let mut table = Vec::new();
    let mut payload = Vec::new();
    for item in items {
        match item {
            Some(bytes) => {
                let offset = u32::try_from(table_len + payload.len()).unwrap();
                table.extend(offset.to_le_bytes());
                payload.extend_from_slice(bytes);
            }
            None => table.extend(0u32.to_le_bytes()),
        }
    }
    table.extend(payload);
    table
}

/// Builds a library file with a 2-byte offset table.
pub(crate) fn library_two(items: &[Option<&[u8]>]) -> Vec<u8> {
    let table_len = items.len() * 2;
    let mut table = Vec::new();
    let mut payload = Vec::new();
    for item in items {
        match item {
            Some(bytes) => {
                let offset = u16::try_from(table_len + payload.len()).unwrap();
                table.extend(offset.to_le_bytes());
                payload.extend_from_slice(bytes);
            }
            None => table.extend(0u16.to_le_bytes()),
        }
    }
    table.extend(payload);
    table
}

/// A stored (uncompressed) conversation item: the zero header, the script
/// size placeholder, the name, then the body.
pub(crate) fn stored_script(name: &[u8], body: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; 6];
    data.extend_from_slice(name);
    data.extend_from_slice(body);
    data
}

/// A LOOK table with the given entries and the closing tile number.
pub(crate) fn look_table(entries: &[(u16, &[u8])]) -> Vec<u8> {
    let mut data = Vec::new();
    for (tile, text) in entries {
        data.extend(tile.to_le_bytes());
        data.extend_from_slice(text);
        data.push(0);
    }
    data.extend(2048u16.to_le_bytes());
    data.push(0);
    data
}

pub(crate) fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}
