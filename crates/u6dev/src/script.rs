//! Conversation scripts: the opcode set, the text scanner, and helpers for the
//! text it finds.

pub mod opcodes;
pub mod scanner;
pub mod text;

pub use scanner::{ScanError, Scanner, ScriptRecord, scan};
