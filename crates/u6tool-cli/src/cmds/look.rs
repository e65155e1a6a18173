use std::{io::Write, path::Path};

use anyhow::Context as _;
use u6dev::resources::look::LookTable;

use crate::output::{OutputFormat, write_rows};

pub(crate) fn export_look(
    path: &Path,
    format: OutputFormat,
    output: impl Write,
) -> anyhow::Result<usize> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let table = LookTable::parse(&data)
        .with_context(|| format!("Failed to decompress {}", path.display()))?;
    write_rows(output, format, table.entries())?;
    Ok(table.len())
}

#[cfg(test)]
mod tests {
    use crate::testing::{look_table, write_file};

    use super::*;

    #[test]
    fn exports_entries() {
        let dir = tempfile::tempdir().unwrap();
        let data = look_table(&[
            (1, b"grass".as_slice()),
            (2, b"".as_slice()),
            (16, b"a chest".as_slice()),
        ]);
        let path = write_file(dir.path(), "LOOK.LZD", &data);

        let mut out = Vec::new();
        let count = export_look(&path, OutputFormat::Json, &mut out).unwrap();
        assert_eq!(count, 2);
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "tile": 1, "text": "grass" },
                { "tile": 16, "text": "a chest" },
            ])
        );
    }
}
