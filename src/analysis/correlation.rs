//! Pairwise correlation analysis over the eligible record attributes.
//!
//! For every unordered attribute pair the engine filters the index-aligned
//! value series down to a joint sample and computes both the Pearson
//! product-moment coefficient and the Spearman rank coefficient. A pair is
//! reportable when either coefficient's magnitude clears the configured
//! threshold.
//!
//! The joint-sample filter drops an index when either value is non-finite or
//! zero. Zero-exclusion conflates "missing" with a legitimate zero
//! observation; the convention is kept so report diffs stay comparable
//! across releases, and the bias is documented in DESIGN.md.

use std::cmp::Ordering;
use std::io::Write;

use crate::core::{ArticleSet, Attribute, Result};
use crate::report::ReportBook;

/// One value per record, index-aligned with the record set's order.
pub type ValueSeries = Vec<f64>;

/// Correlation coefficients for one unordered attribute pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationResult {
    pub attr_a: &'static str,
    pub attr_b: &'static str,
    /// `None` when the joint sample is degenerate (fewer than two points or
    /// zero variance).
    pub pearson: Option<f64>,
    pub spearman: Option<f64>,
    pub reportable: bool,
}

/// Compute both coefficients for every unordered pair of eligible
/// attributes, in fixed attribute order (outer A, inner B after A).
pub fn analyze(
    articles: &ArticleSet,
    attributes: &[&'static Attribute],
    threshold: f64,
) -> Vec<CorrelationResult> {
    let series: Vec<ValueSeries> = attributes
        .iter()
        .map(|attr| articles.iter().map(|a| attr.coerce(a)).collect())
        .collect();

    let mut results = Vec::new();
    for i in 0..attributes.len() {
        for j in (i + 1)..attributes.len() {
            let (xs, ys) = joint_sample(&series[i], &series[j]);
            let pearson = pearson(&xs, &ys);
            let spearman = spearman(&xs, &ys);
            results.push(CorrelationResult {
                attr_a: attributes[i].name,
                attr_b: attributes[j].name,
                pearson,
                spearman,
                reportable: clears(pearson, threshold) || clears(spearman, threshold),
            });
        }
    }
    results
}

/// Write the reportable pairs as transcript lines and table rows on the
/// current report page. Non-reportable pairs are dropped silently.
pub fn write_correlations<W: Write>(
    articles: &ArticleSet,
    attributes: &[&'static Attribute],
    threshold: f64,
    report: &mut ReportBook<W>,
) -> Result<()> {
    for result in analyze(articles, attributes, threshold) {
        if !result.reportable {
            continue;
        }
        let pearson = fmt_coefficient(result.pearson);
        let spearman = fmt_coefficient(result.spearman);

        report.log(format!("{} vs {}:", result.attr_a, result.attr_b))?;
        report.log(format!("Pearson = {pearson}"))?;
        report.log(format!("Spearman = {spearman}\n"))?;

        report.add_row(format!("{} vs {}", result.attr_a, result.attr_b))?;
        report.add_cell("Pearson", pearson)?;
        report.add_cell("Spearman", spearman)?;
    }
    Ok(())
}

fn fmt_coefficient(c: Option<f64>) -> String {
    c.map(|v| format!("{v:.3}")).unwrap_or_else(|| "n/a".to_string())
}

fn clears(coefficient: Option<f64>, threshold: f64) -> bool {
    coefficient.is_some_and(|c| c.abs() >= threshold)
}

/// Keep index k only when both series hold a finite, non-zero value there.
fn joint_sample(a: &ValueSeries, b: &ValueSeries) -> (Vec<f64>, Vec<f64>) {
    a.iter()
        .zip(b.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite() && **x != 0.0 && **y != 0.0)
        .map(|(x, y)| (*x, *y))
        .unzip()
}

/// Pearson product-moment correlation; `None` on fewer than two points or
/// zero variance in either series.
pub fn pearson(x_values: &[f64], y_values: &[f64]) -> Option<f64> {
    if x_values.len() != y_values.len() || x_values.len() < 2 {
        return None;
    }
    let n = x_values.len() as f64;

    let mean_x = x_values.iter().sum::<f64>() / n;
    let mean_y = y_values.iter().sum::<f64>() / n;

    let (covariance, variance_x, variance_y) = x_values
        .iter()
        .zip(y_values.iter())
        .map(|(x, y)| {
            let diff_x = x - mean_x;
            let diff_y = y - mean_y;
            (diff_x * diff_y, diff_x * diff_x, diff_y * diff_y)
        })
        .fold((0.0, 0.0, 0.0), |acc, (cov, var_x, var_y)| {
            (acc.0 + cov, acc.1 + var_x, acc.2 + var_y)
        });

    let std_dev_x = (variance_x / n).sqrt();
    let std_dev_y = (variance_y / n).sqrt();

    if std_dev_x == 0.0 || std_dev_y == 0.0 {
        return None;
    }

    Some(covariance / (n * std_dev_x * std_dev_y))
}

/// Spearman rank correlation with average-rank tie handling.
pub fn spearman(x_values: &[f64], y_values: &[f64]) -> Option<f64> {
    if x_values.len() != y_values.len() || x_values.len() < 2 {
        return None;
    }
    pearson(&ranks(x_values), &ranks(y_values))
}

/// 1-based ranks; tied values share the average of their rank range.
fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut out = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &k in &order[i..=j] {
            out[k] = rank;
        }
        i = j + 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::eligible_attributes;
    use crate::core::Article;
    use chrono::{Duration, TimeZone, Utc};
    use im::Vector;

    fn article(id: u32, views: u32, saves: u32) -> Article {
        Article {
            id,
            author: format!("author{id}"),
            created_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::days(id as i64),
            is_company: id % 2 == 0,
            using_ai: 10.0 + id as f64,
            time_for_reading: 5,
            comments: id,
            views,
            saves,
            up_rank: id + 1,
            down_rank: 1,
            article_rank: id as i64,
            author_rank: 50,
            article_types: "Tutorial".to_string(),
            article_hubs: "Rust".to_string(),
            article_tags: "stats".to_string(),
            rank_to_view_ratio: id as f64 / views as f64,
            author_rank_to_view_ratio: 50.0 / views as f64,
            comments_to_view_ratio: id as f64 / views as f64,
            saves_to_view_ratio: saves as f64 / views as f64,
            time_in_draft: Duration::minutes(30),
        }
    }

    #[test]
    fn pearson_perfect_linear_relation() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.0, 6.0];
        let c = pearson(&xs, &ys).unwrap();
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn spearman_perfect_monotonic_relation() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [10.0, 100.0, 1000.0];
        let c = spearman(&xs, &ys).unwrap();
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn self_correlation_is_one() {
        let xs = [3.0, 1.0, 4.0, 1.5, 9.0];
        let p = pearson(&xs, &xs).unwrap();
        let s = spearman(&xs, &xs).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
        assert!((s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn coefficients_are_symmetric() {
        let xs = [1.0, 5.0, 2.0, 8.0, 3.0];
        let ys = [2.0, 3.0, 9.0, 1.0, 4.0];
        assert_eq!(pearson(&xs, &ys), pearson(&ys, &xs));
        assert_eq!(spearman(&xs, &ys), spearman(&ys, &xs));
    }

    #[test]
    fn constant_series_is_degenerate() {
        let xs = [2.0, 2.0, 2.0];
        let ys = [1.0, 5.0, 9.0];
        assert_eq!(pearson(&xs, &ys), None);
        assert_eq!(spearman(&xs, &ys), None);
    }

    #[test]
    fn fewer_than_two_points_is_degenerate() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(spearman(&[1.0], &[2.0]), None);
    }

    #[test]
    fn ranks_average_ties() {
        assert_eq!(ranks(&[10.0, 20.0, 20.0, 30.0]), vec![1.0, 2.5, 2.5, 4.0]);
        assert_eq!(ranks(&[7.0, 7.0, 7.0]), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn joint_sample_drops_zero_and_non_finite_indices() {
        let a = vec![1.0, 0.0, 3.0, f64::NAN, 5.0, 6.0];
        let b = vec![2.0, 2.0, 0.0, 4.0, f64::INFINITY, 6.0];
        let (xs, ys) = joint_sample(&a, &b);
        assert_eq!(xs, vec![1.0, 6.0]);
        assert_eq!(ys, vec![2.0, 6.0]);
    }

    #[test]
    fn reportability_gate_honors_threshold() {
        assert!(clears(Some(0.15), 0.15));
        assert!(clears(Some(-0.2), 0.15));
        assert!(!clears(Some(0.1), 0.15));
        assert!(!clears(None, 0.15));
    }

    #[test]
    fn analyze_emits_pairs_in_attribute_order() {
        let articles: Vector<Article> = (1..=5)
            .map(|id| article(id, id * 100, id * 7))
            .collect();
        let attributes = eligible_attributes();
        let results = analyze(&articles, &attributes, 0.15);

        let pairs = attributes.len() * (attributes.len() - 1) / 2;
        assert_eq!(results.len(), pairs);
        assert_eq!(results[0].attr_a, attributes[0].name);
        assert_eq!(results[0].attr_b, attributes[1].name);
        let last = &results[results.len() - 1];
        assert_eq!(last.attr_a, attributes[attributes.len() - 2].name);
        assert_eq!(last.attr_b, attributes[attributes.len() - 1].name);
    }

    #[test]
    fn analyze_marks_perfect_relation_reportable() {
        // comments and article_rank both equal the id, so their joint sample
        // is a perfect linear relation.
        let articles: Vector<Article> = (1..=4)
            .map(|id| article(id, 1000, 10))
            .collect();
        let attributes = eligible_attributes();
        let results = analyze(&articles, &attributes, 0.15);

        let pair = results
            .iter()
            .find(|r| r.attr_a == "comments" && r.attr_b == "article_rank")
            .unwrap();
        assert!((pair.pearson.unwrap() - 1.0).abs() < 1e-9);
        assert!((pair.spearman.unwrap() - 1.0).abs() < 1e-9);
        assert!(pair.reportable);
    }

    #[test]
    fn degenerate_pair_is_not_reportable() {
        // time_for_reading is constant across the set, so every pair that
        // includes it has zero variance and stays out of the report.
        let articles: Vector<Article> = (1..=4)
            .map(|id| article(id, id * 100, id * 7))
            .collect();
        let attributes = eligible_attributes();
        let results = analyze(&articles, &attributes, 0.15);

        for r in results
            .iter()
            .filter(|r| r.attr_a == "time_for_reading" || r.attr_b == "time_for_reading")
        {
            assert_eq!(r.pearson, None);
            assert_eq!(r.spearman, None);
            assert!(!r.reportable);
        }
    }

    #[test]
    fn write_correlations_renders_rows_and_transcript() {
        let articles: Vector<Article> = (1..=5)
            .map(|id| article(id, id * 100, id * 7))
            .collect();
        let attributes = eligible_attributes();

        let mut report = ReportBook::new(Vec::new());
        report.new_page("correlations");
        write_correlations(&articles, &attributes, 0.15, &mut report).unwrap();
        report.new_page("end");

        let page = &report.pages()[0];
        assert!(page.has_cells());
        let grid = &page.grids[0];
        assert_eq!(grid.rows()[0], vec!["", "Pearson", "Spearman"]);
        assert!(page.transcript.contains("Pearson = "));
        assert!(page.transcript.contains("Spearman = "));
    }
}
