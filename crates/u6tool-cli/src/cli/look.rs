use std::path::PathBuf;

use clap::Parser;

use super::open_output;
use crate::{cmds::look::export_look, output::OutputFormat};

#[derive(Parser)]
pub(super) struct LookCommand {
    /// Path to LOOK.LZD. Plain and LZW-compressed tables are both accepted.
    file: PathBuf,
    #[clap(long, value_enum, default_value_t = OutputFormat::Pipe)]
    format: OutputFormat,
    /// Path to the output file. If not specified, writes to stdout.
    #[clap(long, short)]
    output: Option<PathBuf>,
}

impl LookCommand {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        let output = open_output(self.output.as_deref())?;
        export_look(&self.file, self.format, output)?;
        Ok(())
    }
}
