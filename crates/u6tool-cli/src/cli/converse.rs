use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::open_output;
use crate::{
    cmds::converse::{ExtractSettings, extract_converse, list_tags},
    output::OutputFormat,
};

#[derive(Parser)]
pub(super) struct ConverseCommand {
    #[clap(subcommand)]
    converse_cmd: SubCommand,
}

impl ConverseCommand {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        match &self.converse_cmd {
            SubCommand::Extract(extract) => extract.run(),
            SubCommand::Tags(tags) => tags.run(),
        }
    }
}

#[derive(Subcommand)]
enum SubCommand {
    /// Extracts names, descriptions, keywords and dialogue of every NPC.
    Extract(ExtractCommand),
    /// Lists the FM Towns speech tags found in the dialogue.
    Tags(TagsCommand),
}

#[derive(Parser)]
struct ExtractCommand {
    /// Path to the conversation library.
    file: PathBuf,
    /// Number added to each item index. Use 99 for CONVERSE.B.
    #[clap(long, default_value_t = 0)]
    base: usize,
    /// Split dialogue lines into quoted speech and narration.
    #[clap(long)]
    split_quotes: bool,
    /// Drop lines repeated within the same item.
    #[clap(long)]
    dedupe: bool,
    #[clap(long, value_enum, default_value_t = OutputFormat::Pipe)]
    format: OutputFormat,
    /// Path to the output file. If not specified, writes to stdout.
    #[clap(long, short)]
    output: Option<PathBuf>,
    /// Scan items in parallel. Without a value, uses one thread per core.
    #[clap(long, short = 'j', num_args = 0..=1, default_missing_value = "0")]
    jobs: Option<usize>,
}

impl ExtractCommand {
    fn run(&self) -> anyhow::Result<()> {
        let settings = ExtractSettings {
            base: self.base,
            split_quotes: self.split_quotes,
            dedupe: self.dedupe,
            jobs: self.jobs,
        };
        let output = open_output(self.output.as_deref())?;
        let count = extract_converse(&self.file, &settings, self.format, output)?;
        log::info!("Wrote {count} records");
        Ok(())
    }
}

#[derive(Parser)]
struct TagsCommand {
    /// Path to the conversation library.
    file: PathBuf,
    /// Number added to each item index.
    #[clap(long, default_value_t = 0)]
    base: usize,
    #[clap(long, value_enum, default_value_t = OutputFormat::Pipe)]
    format: OutputFormat,
}

impl TagsCommand {
    fn run(&self) -> anyhow::Result<()> {
        list_tags(&self.file, self.base, self.format, std::io::stdout().lock())?;
        Ok(())
    }
}
