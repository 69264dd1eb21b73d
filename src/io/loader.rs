//! Record-set loading seam.
//!
//! The analysis core consumes already-parsed records; this module is the
//! collaborator that produces them. Raw records arrive as a JSON array, the
//! ratio attributes and the draft duration are derived here, and the
//! analysis sample is restricted to one publication year.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::Path;

use crate::core::{Article, ArticleSet, Error, Result};

/// One record as it appears in the input file, before derivation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArticle {
    pub id: u32,
    pub author: String,
    pub created_date: DateTime<Utc>,
    pub is_company: bool,
    pub using_ai: f64,
    pub time_for_reading: u32,
    pub comments: u32,
    pub views: u32,
    pub saves: u32,
    pub up_rank: u32,
    pub down_rank: u32,
    pub author_rank: i64,
    #[serde(default)]
    pub article_types: String,
    #[serde(default)]
    pub article_hubs: String,
    #[serde(default)]
    pub article_tags: String,
}

impl RawArticle {
    fn into_article(self) -> Article {
        let views = self.views as f64;
        let article_rank = self.up_rank as i64 - self.down_rank as i64;
        // views == 0 turns the ratios non-finite; the correlation joint
        // filter drops those indices per pair.
        Article {
            id: self.id,
            author: self.author,
            created_date: self.created_date,
            is_company: self.is_company,
            using_ai: self.using_ai,
            time_for_reading: self.time_for_reading,
            comments: self.comments,
            views: self.views,
            saves: self.saves,
            up_rank: self.up_rank,
            down_rank: self.down_rank,
            article_rank,
            author_rank: self.author_rank,
            article_types: self.article_types,
            article_hubs: self.article_hubs,
            article_tags: self.article_tags,
            rank_to_view_ratio: article_rank as f64 / views,
            author_rank_to_view_ratio: self.author_rank as f64 / views,
            comments_to_view_ratio: self.comments as f64 / views,
            saves_to_view_ratio: self.saves as f64 / views,
            time_in_draft: Duration::zero(),
        }
    }
}

/// The full record set plus the year-restricted analysis sample.
#[derive(Debug, Clone)]
pub struct LoadedArticles {
    pub all: ArticleSet,
    pub sample: ArticleSet,
}

/// Load a JSON array of raw records, derive the computed attributes, and
/// split off the analysis sample for the given publication year.
pub fn load_articles(path: &Path, sample_year: i32) -> Result<LoadedArticles> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::record_load(e.to_string(), path))?;
    let raw: Vec<RawArticle> = serde_json::from_str(&content)
        .map_err(|e| Error::record_load(e.to_string(), path))?;

    let mut articles: Vec<Article> = raw.into_iter().map(RawArticle::into_article).collect();
    derive_time_in_draft(&mut articles);

    let sample: ArticleSet = articles
        .iter()
        .filter(|a| a.year() == sample_year)
        .cloned()
        .collect();
    let all: ArticleSet = articles.into_iter().collect();

    log::info!(
        "loaded {} records from {}, {} in the {} sample",
        all.len(),
        path.display(),
        sample.len(),
        sample_year
    );
    Ok(LoadedArticles { all, sample })
}

/// Time in draft: a record's publication date minus the earliest publication
/// date among records with a greater id. Records with no later-id successor
/// get a zero duration.
pub fn derive_time_in_draft(articles: &mut [Article]) {
    let mut order: Vec<usize> = (0..articles.len()).collect();
    order.sort_by_key(|&i| articles[i].id);

    let mut min_later: Option<DateTime<Utc>> = None;
    for &i in order.iter().rev() {
        let created = articles[i].created_date;
        articles[i].time_in_draft = created - min_later.unwrap_or(created);
        min_later = Some(match min_later {
            Some(m) if m < created => m,
            _ => created,
        });
    }
}
