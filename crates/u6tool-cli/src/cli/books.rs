use std::path::PathBuf;

use clap::Parser;
use u6dev::resources::container::Stride;

use super::{open_output, parse_stride};
use crate::{cmds::books::export_books, output::OutputFormat};

#[derive(Parser)]
pub(super) struct BooksCommand {
    /// Path to BOOK.DAT.
    file: PathBuf,
    /// Width of an offset table entry in bytes (2 or 4).
    #[clap(long, default_value = "2", value_parser = parse_stride)]
    stride: Stride,
    #[clap(long, value_enum, default_value_t = OutputFormat::Pipe)]
    format: OutputFormat,
    /// Path to the output file. If not specified, writes to stdout.
    #[clap(long, short)]
    output: Option<PathBuf>,
}

impl BooksCommand {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        let output = open_output(self.output.as_deref())?;
        export_books(&self.file, self.stride, self.format, output)?;
        Ok(())
    }
}
