pub mod correlation;
pub mod monthly;
pub mod summary;

pub use correlation::{analyze, pearson, spearman, CorrelationResult, ValueSeries};

use std::io::Write;

use crate::config::AnalysisConfig;
use crate::core::{eligible_attributes, ArticleSet, Result};
use crate::report::ReportBook;

/// Build the three report pages for one analysis run, in fixed order:
/// correlations, sample summary, monthly AI shares.
pub fn run<W: Write>(
    articles: &ArticleSet,
    config: &AnalysisConfig,
    report: &mut ReportBook<W>,
) -> Result<()> {
    report.new_page("correlations");
    correlation::write_correlations(
        articles,
        &eligible_attributes(),
        config.correlation_threshold,
        report,
    )?;

    report.new_page("general_statics");
    summary::write_summary(articles, config, report)?;

    report.new_page("ai_by_month");
    monthly::write_ai_by_month(articles, config.ai_flag_threshold, report)?;

    Ok(())
}
