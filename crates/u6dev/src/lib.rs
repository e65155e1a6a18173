//! Provides low-level tools for reading the data files of Ultima 6.
//!
//! This covers the LZW variant used by the game's compressed files, the
//! offset-table "library" containers that hold conversation scripts and books,
//! and a scanner for the conversation bytecode that pulls out the text a
//! translator needs without executing the script.

#![deny(clippy::disallowed_types)] // Deny anyhow usage in this crate

pub mod extract;
pub mod resources;
pub mod script;
pub mod utils;
