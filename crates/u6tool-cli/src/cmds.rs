use std::path::Path;

use anyhow::Context as _;
use u6dev::resources::container::{Library, Stride};

pub(crate) mod books;
pub(crate) mod converse;
pub(crate) mod game;
pub(crate) mod library;
pub(crate) mod look;

fn open_library(path: &Path, stride: Stride) -> anyhow::Result<Library> {
    Library::open(path, stride)
        .with_context(|| format!("Failed to read library {}", path.display()))
}
