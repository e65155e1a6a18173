#![no_main]

use libfuzzer_sys::fuzz_target;
use u6dev::{
    extract::{ExtractOptions, extract_library},
    resources::container::{Library, Stride},
};

fn body(path: &std::path::Path, stride: Stride) -> anyhow::Result<()> {
    let library = Library::open(path, stride)?;
    for index in 0..library.len() {
        let _ = library.item(index);
    }
    let _ = extract_library(&library, &ExtractOptions::default());
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, file_data)) = data.split_first() else {
        return;
    };
    let stride = if selector & 1 == 0 {
        Stride::Two
    } else {
        Stride::Four
    };

    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("CONVERSE.A");
    std::fs::write(&path, file_data).unwrap();

    let _ = body(&path, stride);
});
