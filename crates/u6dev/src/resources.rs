//! Readers for the game's data files.

pub mod book;
pub mod container;
pub mod look;
