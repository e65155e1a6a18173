//! The TOML config read by `u6tool game`.
//!
//! ```toml
//! split_quotes = true
//!
//! [[source]]
//! path = "CONVERSE.B"
//! kind = "converse"
//! base = 99
//! ```
//!
//! When no `[[source]]` table is given, the standard game files are used.

use std::{
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use u6dev::resources::container::{InvalidStride, Stride};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SourceKind {
    /// A conversation library.
    Converse,
    /// A library of book texts.
    Books,
    /// A LOOK table.
    Look,
}

/// One file of the game directory to extract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Source {
    /// Relative to the game directory.
    pub(crate) path: PathBuf,
    pub(crate) kind: SourceKind,
    /// Offset table stride. Defaults to 4 for conversations and 2 for books.
    #[serde(default)]
    pub(crate) stride: Option<usize>,
    /// Added to every item index.
    #[serde(default)]
    pub(crate) base: usize,
}

impl Source {
    fn new(path: &str, kind: SourceKind, base: usize) -> Self {
        Source {
            path: PathBuf::from(path),
            kind,
            stride: None,
            base,
        }
    }

    pub(crate) fn stride(&self) -> Result<Stride, InvalidStride> {
        match self.stride {
            Some(bytes) => Stride::try_from(bytes),
            None if self.kind == SourceKind::Books => Ok(Stride::Two),
            None => Ok(Stride::Four),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Split conversation lines into dialogue and action records.
    pub(crate) split_quotes: bool,
    /// Drop repeated lines within an item.
    pub(crate) dedupe: bool,
    #[serde(rename = "source")]
    pub(crate) sources: Vec<Source>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            split_quotes: false,
            dedupe: false,
            sources: vec![
                Source::new("CONVERSE.A", SourceKind::Converse, 0),
                // The second library continues the NPC numbering of the first.
                Source::new("CONVERSE.B", SourceKind::Converse, 99),
                Source::new("BOOK.DAT", SourceKind::Books, 0),
                Source::new("LOOK.LZD", SourceKind::Look, 0),
            ],
        }
    }
}

impl GameConfig {
    pub(crate) fn from_toml(data: &str) -> io::Result<Self> {
        toml::from_str(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub(crate) fn read(path: &Path) -> io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    /// Reads the config at `path` if given, otherwise uses the defaults.
    pub(crate) fn read_or_default(path: Option<&Path>) -> io::Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn default_sources() {
        let config = GameConfig::default();
        let summary: Vec<_> = config
            .sources
            .iter()
            .map(|s| (s.path.to_str().unwrap(), s.kind, s.base, s.stride().unwrap()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("CONVERSE.A", SourceKind::Converse, 0, Stride::Four),
                ("CONVERSE.B", SourceKind::Converse, 99, Stride::Four),
                ("BOOK.DAT", SourceKind::Books, 0, Stride::Two),
                ("LOOK.LZD", SourceKind::Look, 0, Stride::Four),
            ]
        );
    }

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
    }

    #[test]
    fn parses_sources() {
        let config = GameConfig::from_toml(
            r#"
            dedupe = true

            [[source]]
            path = "SAVEGAME/CONVERSE.B"
            kind = "converse"
            base = 99

            [[source]]
            path = "BOOKS.DAT"
            kind = "books"
            stride = 4
            "#,
        )
        .unwrap();
        assert!(config.dedupe);
        assert!(!config.split_quotes);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].path, Path::new("SAVEGAME/CONVERSE.B"));
        assert_eq!(config.sources[0].base, 99);
        assert_eq!(config.sources[1].stride().unwrap(), Stride::Four);
    }

    #[test]
    fn rejects_unknown_fields_and_kinds() {
        let err = GameConfig::from_toml("colour = true").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let err = GameConfig::from_toml("[[source]]\npath = \"A\"\nkind = \"maps\"\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn bad_stride_is_reported() {
        let config =
            GameConfig::from_toml("[[source]]\npath = \"A\"\nkind = \"books\"\nstride = 3\n")
                .unwrap();
        assert!(config.sources[0].stride().is_err());
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "split_quotes = true").unwrap();
        let config = GameConfig::read_or_default(Some(file.path())).unwrap();
        assert!(config.split_quotes);
        assert_eq!(config.sources, GameConfig::default().sources);

        let missing = file.path().with_extension("missing");
        let err = GameConfig::read_or_default(Some(&missing)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
