//! Helpers shared by tests across the crate.

pub(crate) mod lzw;
