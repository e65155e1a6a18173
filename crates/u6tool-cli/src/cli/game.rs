use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use crate::{cmds::game::extract_game, config::GameConfig, output::OutputFormat};

#[derive(Parser)]
pub(super) struct GameCommand {
    /// Path to the game's root directory.
    game_dir: PathBuf,
    /// Path to a TOML file listing the sources. Defaults to the standard files.
    #[clap(long = "config")]
    config_path: Option<PathBuf>,
    #[clap(long, value_enum, default_value_t = OutputFormat::Pipe)]
    format: OutputFormat,
    /// Directory for the output files.
    #[clap(long, short, default_value = ".")]
    output_dir: PathBuf,
    /// Scan conversation items in parallel. Without a value, uses one thread
    /// per core.
    #[clap(long, short = 'j', num_args = 0..=1, default_missing_value = "0")]
    jobs: Option<usize>,
}

impl GameCommand {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        let config = GameConfig::read_or_default(self.config_path.as_deref())
            .context("Failed to load the game config")?;
        let reports = extract_game(
            &self.game_dir,
            &config,
            self.jobs,
            self.format,
            &self.output_dir,
        )?;
        for report in &reports {
            eprintln!(
                "Wrote {} rows from {} to {}",
                report.rows,
                report.source.display(),
                report.output.display()
            );
        }
        Ok(())
    }
}
