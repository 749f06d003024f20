use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ethics-board")]
#[command(about = "Daily government and nonprofit ethics news board")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, classify and write the stories JSON document
    Generate {
        /// Output path for the JSON document
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dry run - collect and classify, but don't write the document
        #[arg(long)]
        dry_run: bool,
    },

    /// Render the HTML page from a stories JSON document
    Render {
        /// Path or http(s) URL of the JSON document (defaults to the generator output)
        #[arg(short, long, env = "ETHICS_BOARD_FEED")]
        feed: Option<String>,

        /// Output path for the HTML page
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate the JSON document, then render the page from it
    Run,
}
