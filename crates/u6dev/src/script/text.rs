//! Helpers for the text pulled out of scripts and books.

use std::ops::Range;

/// Decodes bytes as Latin-1, which maps every byte to the code point of the
/// same value.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Collapses every whitespace run that contains a line break into a single
/// space, then trims the result.
///
/// Whitespace without a line break is kept as-is.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    for ch in text.chars() {
        if ch.is_whitespace() {
            run.push(ch);
            continue;
        }
        flush_whitespace(&mut out, &mut run);
        out.push(ch);
    }
    flush_whitespace(&mut out, &mut run);
    out.trim().to_string()
}

fn flush_whitespace(out: &mut String, run: &mut String) {
    if run.contains(['\n', '\r']) {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Words spoken by a character, found between double quotes.
    Dialogue,
    /// Narration around the quotes, such as "He nods."
    Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    fn new(kind: SegmentKind, text: &'a str) -> Option<Self> {
        let text = text.trim();
        (!text.is_empty()).then_some(Segment { kind, text })
    }
}

/// Splits text into quoted dialogue and the narration around it.
///
/// Each `"..."` pair becomes a dialogue segment; the text between pairs
/// becomes action segments. An unmatched quote is left in the trailing action
/// text. Segments are trimmed and empty ones are dropped.
#[must_use]
pub fn split_quoted(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('"') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('"') else {
            break;
        };
        segments.extend(Segment::new(SegmentKind::Action, &rest[..open]));
        segments.extend(Segment::new(SegmentKind::Dialogue, &after_open[..close]));
        rest = &after_open[close + 1..];
    }
    segments.extend(Segment::new(SegmentKind::Action, rest));
    segments
}

/// A `~P<number>` tag, which triggers a voice sample in the FM Towns release.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SpeechTag {
    pub number: u32,
    /// Byte range of the whole tag within the searched text.
    #[serde(skip)]
    pub range: Range<usize>,
}

/// Finds all speech tags in `text`, in order.
///
/// A `~P` not followed by at least one digit is not a tag.
#[must_use]
pub fn speech_tags(text: &str) -> Vec<SpeechTag> {
    find_tags(text, "~P")
}

fn find_tags(text: &str, marker: &str) -> Vec<SpeechTag> {
    let mut tags = Vec::new();
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find(marker) {
        let start = search_from + found;
        let digits_start = start + marker.len();
        let digits_len = text[digits_start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let end = digits_start + digits_len;
        if let Ok(number) = text[digits_start..end].parse::<u32>() {
            tags.push(SpeechTag {
                number,
                range: start..end,
            });
        }
        search_from = end;
    }
    tags
}

/// Removes every speech tag from `text`, along with `~L<number>` tags.
#[must_use]
pub fn strip_speech_tags(text: &str) -> String {
    let mut tags = find_tags(text, "~P");
    tags.extend(find_tags(text, "~L"));
    tags.sort_by_key(|tag| tag.range.start);

    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;
    for tag in tags {
        out.push_str(&text[last_end..tag.range.start]);
        last_end = tag.range.end;
    }
    out.push_str(&text[last_end..]);
    out
}
