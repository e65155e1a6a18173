use std::{io::Write, path::Path};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use u6dev::resources::container::Stride;

mod books;
mod converse;
mod game;
mod library;
mod look;

/// Opens the output file, or stdout when no path was given.
fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    })
}

fn parse_stride(value: &str) -> Result<Stride, String> {
    let bytes: usize = value.parse().map_err(|e| format!("{e}"))?;
    Stride::try_from(bytes).map_err(|e| e.to_string())
}

/// The category of command to run.
#[derive(Subcommand)]
enum Category {
    #[clap(name = "lib", about = "Inspect offset-table library files.")]
    Library(library::LibraryCommand),
    #[clap(
        name = "converse",
        about = "Extract text from conversation libraries (CONVERSE.A / CONVERSE.B)."
    )]
    Converse(converse::ConverseCommand),
    #[clap(name = "books", about = "Export the texts of BOOK.DAT.")]
    Books(books::BooksCommand),
    #[clap(name = "look", about = "Export the LOOK table descriptions.")]
    Look(look::LookCommand),
    #[clap(name = "game", about = "Extract every configured source of a game directory.")]
    Game(game::GameCommand),
}

impl Category {
    fn run(&self) -> anyhow::Result<()> {
        match self {
            Category::Library(library) => library.run(),
            Category::Converse(converse) => converse.run(),
            Category::Books(books) => books.run(),
            Category::Look(look) => look.run(),
            Category::Game(game) => game.run(),
        }
    }
}

/// A command line tool for working with Ultima 6 data files.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Increase logging output. Repeat for more detail.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// The category of command to run.
    #[clap(subcommand)]
    category: Category,
}

impl Cli {
    /// The default `env_logger` filter for the requested verbosity.
    pub(crate) fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub(crate) fn run(&self) -> anyhow::Result<()> {
        self.category.run()
    }
}
