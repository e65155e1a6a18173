use std::path::{Path, PathBuf};

use anyhow::Context as _;

use super::{books, converse, look};
use crate::{
    config::{GameConfig, Source, SourceKind},
    output::OutputFormat,
};

/// What one configured source produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceReport {
    pub(crate) source: PathBuf,
    pub(crate) output: PathBuf,
    pub(crate) rows: usize,
}

/// `CONVERSE.A` becomes `converse_a.txt` (or `.json`).
fn output_name(source: &Path, format: OutputFormat) -> String {
    let stem = source.file_name().map_or_else(
        || "output".to_string(),
        |name| name.to_string_lossy().to_lowercase().replace('.', "_"),
    );
    format!("{stem}.{}", format.extension())
}

fn run_source(
    input: &Path,
    source: &Source,
    config: &GameConfig,
    jobs: Option<usize>,
    format: OutputFormat,
    output: std::fs::File,
) -> anyhow::Result<usize> {
    match source.kind {
        SourceKind::Converse => {
            let settings = converse::ExtractSettings {
                base: source.base,
                split_quotes: config.split_quotes,
                dedupe: config.dedupe,
                jobs,
            };
            converse::extract_converse(input, &settings, format, output)
        }
        SourceKind::Books => books::export_books(input, source.stride()?, format, output),
        SourceKind::Look => look::export_look(input, format, output),
    }
}

/// Extracts every source of `config` found in `game_dir`, writing one file
/// per source into `out_dir`. Sources missing from the game directory are
/// skipped with a warning.
pub(crate) fn extract_game(
    game_dir: &Path,
    config: &GameConfig,
    jobs: Option<usize>,
    format: OutputFormat,
    out_dir: &Path,
) -> anyhow::Result<Vec<SourceReport>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut reports = Vec::new();
    for source in &config.sources {
        let input = game_dir.join(&source.path);
        if !input.is_file() {
            log::warn!("Skipping {}: file not found", input.display());
            continue;
        }
        let output_path = out_dir.join(output_name(&source.path, format));
        let output = std::fs::File::create(&output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        let rows = run_source(&input, source, config, jobs, format, output)
            .with_context(|| format!("Failed to extract {}", input.display()))?;
        log::info!(
            "Wrote {rows} rows from {} to {}",
            input.display(),
            output_path.display()
        );
        reports.push(SourceReport {
            source: input,
            output: output_path,
            rows,
        });
    }
    Ok(reports)
}
