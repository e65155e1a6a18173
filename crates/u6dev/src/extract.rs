//! Pulls translatable text out of a conversation library.
//!
//! Each item is decompressed, scanned, and flattened into
//! [`ExtractedRecord`]s. Items are independent, so the parallel driver simply
//! fans out over item indices and restores the item order afterwards.

use std::{collections::HashSet, fmt};

use rayon::prelude::*;

use crate::{
    resources::container::Library,
    script::{
        ScanError, Scanner, ScriptRecord,
        opcodes::OpcodeTable,
        text::{self, SegmentKind},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Name,
    Description,
    Keyword,
    Dialogue,
    /// Narration around quoted speech. Only produced when quote splitting is
    /// enabled.
    Action,
}

impl RecordKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Name => "name",
            RecordKind::Description => "description",
            RecordKind::Keyword => "keyword",
            RecordKind::Dialogue => "dialogue",
            RecordKind::Action => "action",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExtractedRecord {
    /// The item index plus the library's base index.
    pub item: usize,
    pub kind: RecordKind,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Added to each item index. `CONVERSE.B` continues the NPC numbering of
    /// `CONVERSE.A`, so it uses a base of 99.
    pub base_index: usize,
    /// Split dialogue lines into quoted speech and surrounding narration.
    pub split_quotes: bool,
    pub table: OpcodeTable,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            base_index: 0,
            split_quotes: false,
            table: OpcodeTable::standard(),
        }
    }
}

/// An item that had data but could not be scanned.
#[derive(Debug)]
pub struct SkippedItem {
    pub item: usize,
    pub error: ScanError,
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ExtractedRecord>,
    /// Number of items that produced a script record.
    pub scanned: usize,
    pub skipped: Vec<SkippedItem>,
}

impl Extraction {
    fn push(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Hole => {}
            ItemOutcome::Scanned(records) => {
                self.scanned += 1;
                self.records.extend(records);
            }
            ItemOutcome::Failed(skipped) => self.skipped.push(skipped),
        }
    }
}

enum ItemOutcome {
    Hole,
    Scanned(Vec<ExtractedRecord>),
    Failed(SkippedItem),
}

fn extract_item(library: &Library, index: usize, options: &ExtractOptions) -> ItemOutcome {
    let item = options.base_index + index;
    let Some(data) = library.item(index) else {
        log::debug!("Item {item} has no data");
        return ItemOutcome::Hole;
    };
    match Scanner::new(&options.table).scan(&data) {
        Ok(record) => ItemOutcome::Scanned(flatten(item, &record, options.split_quotes)),
        Err(error) => {
            log::warn!("Skipping item {item}: {error}");
            ItemOutcome::Failed(SkippedItem { item, error })
        }
    }
}

/// Turns a scanned script into records: the name, the description, the
/// keyword blocks, then each dialogue line, all normalised.
#[must_use]
pub fn flatten(item: usize, record: &ScriptRecord, split_quotes: bool) -> Vec<ExtractedRecord> {
    let mut records = Vec::new();
    let mut push = |kind: RecordKind, raw: &str| {
        let text = text::normalize(raw);
        if !text.is_empty() {
            records.push(ExtractedRecord { item, kind, text });
        }
    };

    push(RecordKind::Name, &record.name);
    if let Some(description) = &record.description {
        push(RecordKind::Description, description);
    }
    for keywords in &record.keywords {
        push(RecordKind::Keyword, keywords);
    }
    for line in &record.dialogue {
        if !split_quotes {
            push(RecordKind::Dialogue, line);
            continue;
        }
        for segment in text::split_quoted(line) {
            let kind = match segment.kind {
                SegmentKind::Dialogue => RecordKind::Dialogue,
                SegmentKind::Action => RecordKind::Action,
            };
            push(kind, segment.text);
        }
    }
    records
}

/// Extracts every item of the library in order.
#[must_use]
pub fn extract_library(library: &Library, options: &ExtractOptions) -> Extraction {
    let mut extraction = Extraction::default();
    for index in 0..library.len() {
        extraction.push(extract_item(library, index, options));
    }
    extraction
}

/// Same as [`extract_library`], with items processed on the rayon thread
/// pool. The output is identical to the sequential one.
#[must_use]
pub fn extract_library_parallel(library: &Library, options: &ExtractOptions) -> Extraction {
    let outcomes: Vec<ItemOutcome> = (0..library.len())
        .into_par_iter()
        .map(|index| extract_item(library, index, options))
        .collect();

    let mut extraction = Extraction::default();
    for outcome in outcomes {
        extraction.push(outcome);
    }
    extraction
}

/// Drops records whose `(item, text)` pair was already seen, keeping the first.
#[must_use]
pub fn dedupe(records: Vec<ExtractedRecord>) -> Vec<ExtractedRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert((record.item, record.text.clone())))
        .collect()
}

/// A line that carries an FM Towns speech tag.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SpeechTagLine {
    pub item: usize,
    pub tag: u32,
    /// The line as stored, tags included.
    pub text: String,
    /// The line with every tag removed, for matching against other releases.
    pub untagged: String,
}

/// Lists every speech tag found in the records, one entry per tag.
#[must_use]
pub fn speech_tag_lines(records: &[ExtractedRecord]) -> Vec<SpeechTagLine> {
    records
        .iter()
        .flat_map(|record| {
            text::speech_tags(&record.text)
                .into_iter()
                .map(move |tag| SpeechTagLine {
                    item: record.item,
                    tag: tag.number,
                    text: record.text.clone(),
                    untagged: text::strip_speech_tags(&record.text).trim().to_string(),
                })
        })
        .collect()
}
