use anyhow::Result;
use clap::Parser;
use habrmeta::cli::{Cli, Commands};
use habrmeta::commands;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            year,
            threshold,
            config,
        } => commands::analyze::run(commands::analyze::AnalyzeConfig {
            input,
            output,
            year,
            threshold,
            config,
        }),
        Commands::Export {
            input,
            output,
            year,
            config,
        } => commands::export::run(commands::export::ExportConfig {
            input,
            output,
            year,
            config,
        }),
    }
}
