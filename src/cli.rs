use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "habrmeta")]
#[command(about = "Article metadata statistics and correlation analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the correlation, summary, and monthly report pages
    Analyze {
        /// JSON file with the raw article records
        input: PathBuf,

        /// Directory the report pages are written into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Publication year the analysis sample is restricted to
        #[arg(long)]
        year: Option<i32>,

        /// Correlation significance threshold
        #[arg(long)]
        threshold: Option<f64>,

        /// Configuration file (defaults to habrmeta.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export the loaded record table as a spreadsheet-like grid
    Export {
        /// JSON file with the raw article records
        input: PathBuf,

        /// Output file (defaults to <data dir>/articles.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Publication year the exported sample is restricted to
        #[arg(long)]
        year: Option<i32>,

        /// Configuration file (defaults to habrmeta.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
