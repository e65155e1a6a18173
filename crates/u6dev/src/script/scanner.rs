use std::sync::LazyLock;

use crate::{
    script::{
        opcodes::{Opcode, OpcodeTable, OperandRule, TextRole, data_size, is_control, is_printable},
        text::decode_latin1,
    },
    utils::mem_reader::MemReader,
};

/// Offset of the script name. The first two bytes hold the script size, which
/// the scanner does not rely on.
const NAME_OFFSET: usize = 2;

static STANDARD_TABLE: LazyLock<OpcodeTable> = LazyLock::new(OpcodeTable::standard);

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Script has no name (stopped at offset {position})")]
    EmptyRecord { position: usize },
}

/// The text found in one conversation script.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ScriptRecord {
    pub name: String,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    /// Text runs outside of any text-bearing opcode, in script order. Line
    /// breaks are kept.
    pub dialogue: Vec<String>,
}

/// Scans a script with the standard opcode table.
pub fn scan(bytes: &[u8]) -> Result<ScriptRecord, ScanError> {
    Scanner::new(&STANDARD_TABLE).scan(bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Walks script bytecode far enough to find its text, without executing it.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'t> {
    table: &'t OpcodeTable,
}

impl<'t> Scanner<'t> {
    #[must_use]
    pub fn new(table: &'t OpcodeTable) -> Self {
        Scanner { table }
    }

    pub fn scan(&self, bytes: &[u8]) -> Result<ScriptRecord, ScanError> {
        let mut reader = MemReader::new(bytes);
        if reader.seek_to(NAME_OFFSET).is_err() || reader.is_empty() {
            return Err(ScanError::EmptyRecord {
                position: bytes.len(),
            });
        }

        let name: String = reader
            .read_while(is_printable)
            .iter()
            .map(|&b| if b == b'_' { '.' } else { char::from(b) })
            .collect();
        let name = name.trim();
        if name.is_empty() {
            return Err(ScanError::EmptyRecord {
                position: reader.tell(),
            });
        }

        let mut state = ScanState {
            table: self.table,
            reader,
            record: ScriptRecord {
                name: name.to_string(),
                ..ScriptRecord::default()
            },
        };
        state.scan_body();
        Ok(state.record)
    }
}

struct ScanState<'a, 't> {
    table: &'t OpcodeTable,
    reader: MemReader<'a>,
    record: ScriptRecord,
}

impl ScanState<'_, '_> {
    fn scan_body(&mut self) {
        while let Some(byte) = self.reader.peek_u8() {
            if is_printable(byte) {
                let span = self.reader.read_while(is_printable);
                self.push_dialogue(span);
                continue;
            }

            self.reader.skip_saturating(1);
            if let Some(rule) = self.table.rule(byte) {
                log::trace!(
                    "{:?} ({byte:#04x}) at {}: {rule:?}",
                    Opcode::from_byte(byte),
                    self.reader.tell() - 1
                );
                if self.apply(rule) == Flow::Stop {
                    break;
                }
            }
        }
    }

    fn apply(&mut self, rule: OperandRule) -> Flow {
        match rule {
            OperandRule::None => {}
            OperandRule::Fixed(len) => {
                self.reader.skip_saturating(len);
            }
            OperandRule::Value => self.skip_value(),
            OperandRule::Expressions(count) => {
                for _ in 0..count {
                    self.skip_expression();
                }
            }
            OperandRule::Text { prefix, role } => {
                self.reader.skip_saturating(prefix);
                let span = self.reader.read_while(is_printable);
                self.push_text(span, role);
            }
            OperandRule::EndOfScript => return Flow::Stop,
        }
        Flow::Continue
    }

    fn skip_value(&mut self) {
        let Ok(byte) = self.reader.read_u8() else {
            return;
        };
        if let Some(size) = data_size(byte) {
            self.reader.skip_saturating(size);
        }
    }

    fn skip_expression(&mut self) {
        while let Some(byte) = self.reader.peek_u8() {
            if is_control(byte) || is_printable(byte) {
                break;
            }
            self.skip_value();
        }
    }

    fn push_dialogue(&mut self, span: &[u8]) {
        let text = decode_latin1(span);
        if !text.trim().is_empty() {
            self.record.dialogue.push(text);
        }
    }

    fn push_text(&mut self, span: &[u8], role: TextRole) {
        let text = decode_latin1(span);
        match role {
            TextRole::Description => {
                if self.record.description.is_some() {
                    return;
                }
                let before_pause = text.split('*').next().unwrap_or_default().trim();
                if !before_pause.is_empty() {
                    self.record.description = Some(before_pause.to_string());
                }
            }
            TextRole::Keywords => {
                let keywords = text.trim();
                if !keywords.is_empty() {
                    self.record.keywords.push(keywords.to_string());
                }
            }
            TextRole::Discard => {}
        }
    }
}
