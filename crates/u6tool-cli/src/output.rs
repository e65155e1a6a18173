//! Output formats shared by the extraction commands.

use std::{borrow::Cow, io::Write};

use itertools::Itertools as _;
use serde::Serialize;
use u6dev::{
    extract::{ExtractedRecord, SpeechTagLine},
    resources::{book::Book, look::LookEntry},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// One `|`-separated line per row.
    #[default]
    Pipe,
    /// A pretty-printed JSON array.
    Json,
}

impl OutputFormat {
    pub(crate) fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pipe => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// A value that can be written as one line of pipe-delimited output.
pub(crate) trait Row: Serialize {
    fn fields(&self) -> Vec<Cow<'_, str>>;
}

impl Row for ExtractedRecord {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            self.item.to_string().into(),
            self.kind.as_str().into(),
            self.text.as_str().into(),
        ]
    }
}

impl Row for Book {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![self.index.to_string().into(), self.text.as_str().into()]
    }
}

impl Row for LookEntry {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![self.tile.to_string().into(), self.text.as_str().into()]
    }
}

impl Row for SpeechTagLine {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            self.item.to_string().into(),
            self.tag.to_string().into(),
            self.untagged.as_str().into(),
        ]
    }
}

/// Escapes a field so it fits on one pipe-delimited line.
///
/// Backslashes and pipes are prefixed with a backslash, line feeds become
/// `\n`, and carriage returns are dropped.
pub(crate) fn escape_field(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '|', '\n', '\r']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

pub(crate) fn write_rows<T: Row>(
    mut output: impl Write,
    format: OutputFormat,
    rows: &[T],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Pipe => {
            for row in rows {
                let line = row.fields().iter().map(|f| escape_field(f)).join("|");
                writeln!(output, "{line}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, rows)?;
            writeln!(output)?;
        }
    }
    output.flush()?;
    Ok(())
}
