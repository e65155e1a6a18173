use std::path::PathBuf;

use clap::{Parser, Subcommand};
use u6dev::resources::container::Stride;

use super::parse_stride;
use crate::cmds::library::{dump_item, list_items};

#[derive(Parser)]
pub(super) struct LibraryCommand {
    #[clap(subcommand)]
    lib_cmd: SubCommand,
}

impl LibraryCommand {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        match &self.lib_cmd {
            SubCommand::List(list) => list.run(),
            SubCommand::Dump(dump) => dump.run(),
        }
    }
}

#[derive(Subcommand)]
enum SubCommand {
    /// Lists the offset table: offsets, flags, sizes and holes.
    List(ListCommand),
    /// Hex dumps one item.
    Dump(DumpCommand),
}

#[derive(Parser)]
struct ListCommand {
    /// Path to the library file.
    file: PathBuf,
    /// Width of an offset table entry in bytes (2 or 4).
    #[clap(long, default_value = "4", value_parser = parse_stride)]
    stride: Stride,
}

impl ListCommand {
    fn run(&self) -> anyhow::Result<()> {
        list_items(&self.file, self.stride, std::io::stdout().lock())
    }
}

#[derive(Parser)]
struct DumpCommand {
    /// Path to the library file.
    file: PathBuf,
    /// Index of the item in the offset table.
    index: usize,
    /// Width of an offset table entry in bytes (2 or 4).
    #[clap(long, default_value = "4", value_parser = parse_stride)]
    stride: Stride,
    /// Dump the stored bytes without decompressing them.
    #[clap(long)]
    raw: bool,
}

impl DumpCommand {
    fn run(&self) -> anyhow::Result<()> {
        dump_item(
            &self.file,
            self.stride,
            self.index,
            self.raw,
            std::io::stdout().lock(),
        )
    }
}
