//! Sample summary page: headline counts, extremum articles, top hubs/tags,
//! and AI-flagged shares per authorship category.
//!
//! Every line goes through the report transcript so the page file and the
//! console echo stay identical. Counting uses encounter-order tables rather
//! than hash-map iteration so repeated runs produce byte-identical output.

use std::collections::HashMap;
use std::io::Write;

use crate::config::AnalysisConfig;
use crate::core::schema::split_list;
use crate::core::{month_name, Article, ArticleSet, Result};
use crate::report::ReportBook;

const MINUTES_IN_YEAR: u64 = 525_600; // 365 * 24 * 60
const MINUTES_IN_MONTH: u64 = 43_200; // 30 * 24 * 60
const MINUTES_IN_DAY: u64 = 1_440;
const MINUTES_IN_HOUR: u64 = 60;

/// Write the summary lines for the sample onto the current report page.
pub fn write_summary<W: Write>(
    articles: &ArticleSet,
    config: &AnalysisConfig,
    report: &mut ReportBook<W>,
) -> Result<()> {
    report.log(format!("Articles in sample: {}", articles.len()))?;
    report.log(format!(
        "Written by companies: {}",
        articles.iter().filter(|a| a.is_company).count()
    ))?;

    if articles.is_empty() {
        return Ok(());
    }

    let ids = || articles.iter().map(|a| a.id);
    report.log(format!(
        "Id range in sample: {}..{}",
        ids().min().unwrap_or(0),
        ids().max().unwrap_or(0)
    ))?;

    report.log(format!("Total views: {}", total_views(articles)))?;
    report.log(format!(
        "Time spent reading across all views: {}",
        format_minutes(reading_minutes(articles))
    ))?;

    if let Some(a) = articles.iter().max_by_key(|a| a.article_rank) {
        report.log(format!("Highest article rank: {} - {}", a.article_rank, a.id))?;
    }
    if let Some(a) = articles
        .iter()
        .min_by_key(|a| a.up_rank as i64 - a.down_rank as i64)
    {
        report.log(format!(
            "Lowest article rank: {} - {}",
            a.up_rank as i64 - a.down_rank as i64,
            a.id
        ))?;
    }
    if let Some(a) = articles.iter().max_by_key(|a| a.views) {
        report.log(format!("Most viewed: {} - {}", a.views, a.id))?;
    }
    if let Some(a) = articles.iter().max_by_key(|a| a.time_for_reading) {
        report.log(format!(
            "Longest article: {} minutes, id {}",
            a.time_for_reading, a.id
        ))?;
    }

    if let Some((month, count)) = busiest_month(articles) {
        report.log(format!(
            "Busiest month: {}, publications: {}",
            month_name(month),
            count
        ))?;
    }

    let authors = top_n(
        accumulate(articles.iter().map(|a| (a.author.as_str(), 1))),
        1,
    );
    if let Some((author, count)) = authors.first() {
        report.log(format!(
            "Most prolific author: {} - {} ({:.2}%)",
            author,
            count,
            *count as f64 / articles.len() as f64 * 100.0
        ))?;
    }

    let n = config.top_count;
    let types = top_n(
        accumulate(list_items(articles, |a| &a.article_types).map(|(k, _)| (k, 1))),
        n,
    );
    report.log(format!("Top article types: {}", join_keys(&types)))?;

    let hub_counts = top_n(
        accumulate(list_items(articles, |a| &a.article_hubs).map(|(k, _)| (k, 1))),
        n,
    );
    let hub_views = top_n(
        accumulate(list_items(articles, |a| &a.article_hubs)),
        n,
    );
    report.log(format!(
        "Top hubs by articles | views: {} | {}",
        join_counts(&hub_counts),
        join_counts(&hub_views)
    ))?;

    let tag_counts = top_n(
        accumulate(list_items(articles, |a| &a.article_tags).map(|(k, _)| (k, 1))),
        n,
    );
    let tag_views = top_n(
        accumulate(list_items(articles, |a| &a.article_tags)),
        n,
    );
    report.log(format!(
        "Top tags by articles | views: {} | {}",
        join_counts(&tag_counts),
        join_counts(&tag_views)
    ))?;

    for (label, company) in [("company", true), ("individual", false)] {
        if let Some(share) = flagged_share(articles, company, config.ai_flag_threshold) {
            report.log(format!(
                "AI-flagged share ({label}): {:.2}%",
                share * 100.0
            ))?;
        }
    }

    Ok(())
}

pub fn total_views(articles: &ArticleSet) -> u64 {
    articles.iter().map(|a| a.views as u64).sum()
}

/// Total minutes spent reading across all views; every article counts for at
/// least one minute per view.
pub fn reading_minutes(articles: &ArticleSet) -> u64 {
    articles
        .iter()
        .map(|a| a.views as u64 * a.time_for_reading.max(1) as u64)
        .sum()
}

/// Render a minute total as years/months/days/hours/minutes, 365-day years
/// and 30-day months.
pub fn format_minutes(total_minutes: u64) -> String {
    let years = total_minutes / MINUTES_IN_YEAR;
    let mut rest = total_minutes % MINUTES_IN_YEAR;

    let months = rest / MINUTES_IN_MONTH;
    rest %= MINUTES_IN_MONTH;

    let days = rest / MINUTES_IN_DAY;
    rest %= MINUTES_IN_DAY;

    let hours = rest / MINUTES_IN_HOUR;
    let minutes = rest % MINUTES_IN_HOUR;

    let parts: Vec<String> = [
        (years, "years"),
        (months, "months"),
        (days, "days"),
        (hours, "hours"),
        (minutes, "minutes"),
    ]
    .iter()
    .filter(|(value, _)| *value > 0)
    .map(|(value, unit)| format!("{value} {unit}"))
    .collect();

    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(" ")
    }
}

/// Calendar month with the most publications; on ties the later month wins.
pub fn busiest_month(articles: &ArticleSet) -> Option<(u32, usize)> {
    if articles.is_empty() {
        return None;
    }
    (1..=12)
        .map(|month| (month, articles.iter().filter(|a| a.month() == month).count()))
        .max_by_key(|(_, count)| *count)
}

/// Fraction of AI-flagged records within one authorship category; `None`
/// when the category is empty.
pub fn flagged_share(articles: &ArticleSet, company: bool, threshold: f64) -> Option<f64> {
    let (total, flagged) = articles
        .iter()
        .filter(|a| a.is_company == company)
        .fold((0u64, 0u64), |(total, flagged), a| {
            (total + 1, flagged + u64::from(a.flagged_ai(threshold)))
        });
    (total > 0).then(|| flagged as f64 / total as f64)
}

/// All (element, views) pairs of one list attribute across the sample, in
/// record order.
fn list_items<'a, F>(
    articles: &'a ArticleSet,
    field: F,
) -> impl Iterator<Item = (&'a str, u64)>
where
    F: Fn(&'a Article) -> &'a String + 'a,
{
    articles
        .iter()
        .flat_map(move |a| split_list(field(a)).map(move |item| (item, a.views as u64)))
}

/// Sum weights per key, keys kept in encounter order.
fn accumulate<'a>(pairs: impl Iterator<Item = (&'a str, u64)>) -> Vec<(String, u64)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<(String, u64)> = Vec::new();
    for (key, weight) in pairs {
        match index.get(key) {
            Some(&i) => totals[i].1 += weight,
            None => {
                index.insert(key.to_string(), totals.len());
                totals.push((key.to_string(), weight));
            }
        }
    }
    totals
}

/// Largest n entries, descending; ties resolve to the later encounter.
fn top_n(mut entries: Vec<(String, u64)>, n: usize) -> Vec<(String, u64)> {
    entries.sort_by_key(|entry| entry.1);
    entries.into_iter().rev().take(n).collect()
}

fn join_keys(entries: &[(String, u64)]) -> String {
    entries
        .iter()
        .map(|(key, _)| key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_counts(entries: &[(String, u64)]) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("{key} - {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
