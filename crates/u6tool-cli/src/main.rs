//! A CLI for pulling text out of Ultima 6 data files.
//!
//! Covers the offset-table libraries (`CONVERSE.A`, `CONVERSE.B`, `BOOK.DAT`),
//! the LOOK table, and a whole-game run driven by a TOML config.

mod cli;
mod cmds;
mod config;
mod output;
#[cfg(test)]
mod testing;

use clap::Parser;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();
    cli.run()?;
    Ok(())
}
