use std::{io::Write, path::Path};

use u6dev::{
    extract::{
        ExtractOptions, ExtractedRecord, dedupe, extract_library, extract_library_parallel,
        speech_tag_lines,
    },
    resources::container::{Library, Stride},
};

use super::open_library;
use crate::output::{OutputFormat, write_rows};

#[derive(Debug, Clone, Default)]
pub(crate) struct ExtractSettings {
    pub(crate) base: usize,
    pub(crate) split_quotes: bool,
    pub(crate) dedupe: bool,
    /// Run on a rayon pool of this many threads. `Some(0)` lets rayon pick.
    /// `None` extracts on the calling thread.
    pub(crate) jobs: Option<usize>,
}

pub(crate) fn collect_records(
    library: &Library,
    settings: &ExtractSettings,
) -> anyhow::Result<Vec<ExtractedRecord>> {
    let options = ExtractOptions {
        base_index: settings.base,
        split_quotes: settings.split_quotes,
        ..ExtractOptions::default()
    };
    let extraction = match settings.jobs {
        None => extract_library(library, &options),
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()?
            .install(|| extract_library_parallel(library, &options)),
    };
    log::info!(
        "Scanned {} of {} items ({} skipped)",
        extraction.scanned,
        library.len(),
        extraction.skipped.len()
    );
    Ok(if settings.dedupe {
        dedupe(extraction.records)
    } else {
        extraction.records
    })
}

/// Writes the records of a conversation library. Returns the number written.
pub(crate) fn extract_converse(
    path: &Path,
    settings: &ExtractSettings,
    format: OutputFormat,
    output: impl Write,
) -> anyhow::Result<usize> {
    let library = open_library(path, Stride::Four)?;
    let records = collect_records(&library, settings)?;
    write_rows(output, format, &records)?;
    Ok(records.len())
}

/// Writes every speech tag found in a conversation library.
pub(crate) fn list_tags(
    path: &Path,
    base: usize,
    format: OutputFormat,
    output: impl Write,
) -> anyhow::Result<usize> {
    let library = open_library(path, Stride::Four)?;
    let settings = ExtractSettings {
        base,
        ..ExtractSettings::default()
    };
    let records = collect_records(&library, &settings)?;
    let tags = speech_tag_lines(&records);
    write_rows(output, format, &tags)?;
    Ok(tags.len())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::testing::{library_four, stored_script, write_file};

    use super::*;

    fn sample(dir: &Path) -> PathBuf {
        let iolo = stored_script(
            b"Iolo",
            b"\xF1a bard*\xEFname,job\xF2He nods. \"Hi there.\"\xA2~P7\"Hi there.\"",
        );
        let dupre = stored_script(b"Dupre", b"\xF2\"Cheers!\"\n\xA2\"Cheers!\"\n");
        let data = library_four(&[Some(iolo.as_slice()), None, Some(dupre.as_slice())]);
        write_file(dir, "CONVERSE.B", &data)
    }

    fn run(settings: &ExtractSettings, format: OutputFormat) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = sample(dir.path());
        let mut out = Vec::new();
        extract_converse(&path, settings, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn pipe_output() {
        let settings = ExtractSettings {
            base: 99,
            ..ExtractSettings::default()
        };
        assert_eq!(
            run(&settings, OutputFormat::Pipe),
            concat!(
                "99|name|Iolo\n",
                "99|description|a bard\n",
                "99|keyword|name,job\n",
                "99|dialogue|He nods. \"Hi there.\"\n",
                "99|dialogue|~P7\"Hi there.\"\n",
                "101|name|Dupre\n",
                "101|dialogue|\"Cheers!\"\n",
                "101|dialogue|\"Cheers!\"\n",
            )
        );
    }

    #[test]
    fn split_and_dedupe() {
        let settings = ExtractSettings {
            split_quotes: true,
            dedupe: true,
            ..ExtractSettings::default()
        };
        assert_eq!(
            run(&settings, OutputFormat::Pipe),
            concat!(
                "0|name|Iolo\n",
                "0|description|a bard\n",
                "0|keyword|name,job\n",
                "0|action|He nods.\n",
                "0|dialogue|Hi there.\n",
                "0|action|~P7\n",
                "2|name|Dupre\n",
                "2|dialogue|Cheers!\n",
            )
        );
    }

    #[test]
    fn parallel_output_matches() {
        let sequential = run(&ExtractSettings::default(), OutputFormat::Json);
        let parallel = run(
            &ExtractSettings {
                jobs: Some(2),
                ..ExtractSettings::default()
            },
            OutputFormat::Json,
        );
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn lists_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample(dir.path());
        let mut out = Vec::new();
        let count = list_tags(&path, 99, OutputFormat::Pipe, &mut out).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "99|7|\"Hi there.\"\n"
        );
    }
}
