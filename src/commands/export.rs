use anyhow::{ensure, Context, Result};
use colored::*;
use std::path::PathBuf;

use crate::config::MetaConfig;
use crate::io::{ensure_dir, load_articles};
use crate::report::records;

/// Options for the export command
pub struct ExportConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub year: Option<i32>,
    pub config: Option<PathBuf>,
}

pub fn run(options: ExportConfig) -> Result<()> {
    let mut config = MetaConfig::load(options.config.as_deref())?;
    if let Some(year) = options.year {
        config.analysis.sample_year = year;
    }
    let output = match options.output {
        Some(path) => path,
        None => {
            ensure_dir(&config.output.data_dir)?;
            config.output.data_dir.join("articles.csv")
        }
    };

    let loaded = load_articles(&options.input, config.analysis.sample_year)
        .with_context(|| format!("loading records from {}", options.input.display()))?;
    ensure!(
        !loaded.sample.is_empty(),
        "no records from {} in the {} sample",
        options.input.display(),
        config.analysis.sample_year
    );

    records::export_records(&loaded.sample, &output)?;

    println!(
        "{} {} records exported to {}",
        "✓".green(),
        loaded.sample.len(),
        output.display()
    );
    Ok(())
}
