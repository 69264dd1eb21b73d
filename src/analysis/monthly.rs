//! Monthly AI-adoption shares split by authorship category.
//!
//! The sample is grouped by calendar month of the publication date crossed
//! with the company flag. Per category the aggregator emits a raw-share row
//! (fraction of records whose AI score clears the flag threshold) and a
//! delta row against the first populated month. Columns are English month
//! names, presented to the accumulator in ascending month order so that the
//! first-discovery column rule yields calendar order.

use std::io::Write;

use crate::core::{month_name, ArticleSet, Result};
use crate::report::ReportBook;

/// Share of AI-flagged records for one calendar month bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyShare {
    pub month: u32,
    pub share: f64,
}

/// Per-month AI-flagged shares for one authorship category, ascending month
/// order. Months without records are absent.
pub fn monthly_shares(
    articles: &ArticleSet,
    company: bool,
    flag_threshold: f64,
) -> Vec<MonthlyShare> {
    (1..=12)
        .filter_map(|month| {
            let (total, flagged) = articles
                .iter()
                .filter(|a| a.is_company == company && a.month() == month)
                .fold((0u64, 0u64), |(total, flagged), a| {
                    (total + 1, flagged + u64::from(a.flagged_ai(flag_threshold)))
                });
            (total > 0).then(|| MonthlyShare {
                month,
                share: flagged as f64 / total as f64,
            })
        })
        .collect()
}

/// Write the four aggregate rows (individual raw, individual delta, company
/// raw, company delta) onto the current report page.
pub fn write_ai_by_month<W: Write>(
    articles: &ArticleSet,
    flag_threshold: f64,
    report: &mut ReportBook<W>,
) -> Result<()> {
    for (label, company) in [("individual", false), ("company", true)] {
        let shares = monthly_shares(articles, company, flag_threshold);
        let Some(baseline) = shares.first().map(|s| s.share) else {
            log::warn!("no {label} articles in the sample; skipping category");
            continue;
        };

        report.add_row(format!("AI share ({label})"))?;
        report.add_cells(
            shares
                .iter()
                .map(|s| (month_name(s.month), format!("{:.4}", s.share))),
        )?;

        report.add_row(format!("AI share dynamic ({label})"))?;
        report.add_cells(
            shares
                .iter()
                .map(|s| (month_name(s.month), format!("{:.4}", s.share - baseline))),
        )?;
    }
    Ok(())
}
