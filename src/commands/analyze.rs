use anyhow::{ensure, Context, Result};
use colored::*;
use std::path::PathBuf;

use crate::analysis;
use crate::config::MetaConfig;
use crate::io::load_articles;
use crate::report::{records, ReportBook};

/// Options for the analyze command, CLI overrides included
pub struct AnalyzeConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub year: Option<i32>,
    pub threshold: Option<f64>,
    pub config: Option<PathBuf>,
}

pub fn run(options: AnalyzeConfig) -> Result<()> {
    let mut config = MetaConfig::load(options.config.as_deref())?;
    if let Some(year) = options.year {
        config.analysis.sample_year = year;
    }
    if let Some(threshold) = options.threshold {
        config.analysis.correlation_threshold = threshold;
    }
    let data_dir = options.output.unwrap_or(config.output.data_dir.clone());

    let loaded = load_articles(&options.input, config.analysis.sample_year)
        .with_context(|| format!("loading records from {}", options.input.display()))?;
    ensure!(
        !loaded.sample.is_empty(),
        "no records from {} in the {} sample",
        options.input.display(),
        config.analysis.sample_year
    );

    let mut report = ReportBook::new(std::io::stdout());
    analysis::run(&loaded.sample, &config.analysis, &mut report)?;
    report.save_all(&data_dir)?;

    records::export_records(&loaded.sample, &data_dir.join("articles.csv"))?;

    println!(
        "{} {} records analyzed, reports in {}",
        "✓".green(),
        loaded.sample.len(),
        data_dir.display()
    );
    Ok(())
}
