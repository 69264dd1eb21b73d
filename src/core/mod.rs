pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
pub use schema::{
    eligible_attributes, Attribute, AttributeKind, AttributeValue, ATTRIBUTES,
    EXCLUDED_ATTRIBUTES, LIST_SEPARATOR,
};

use chrono::{DateTime, Datelike, Duration, Utc};

/// The loaded, already-deduplicated record set handed to the analysis layer.
pub type ArticleSet = im::Vector<Article>;

/// One analyzed article with its scraped and derived attributes.
///
/// Records are immutable once constructed; the loader owns their lifecycle
/// and the analysis layer only ever reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: u32,
    pub author: String,
    pub created_date: DateTime<Utc>,
    pub is_company: bool,
    /// Externally computed AI-likelihood score on a 0..255 scale.
    pub using_ai: f64,
    pub time_for_reading: u32,
    pub comments: u32,
    pub views: u32,
    pub saves: u32,
    pub up_rank: u32,
    pub down_rank: u32,
    pub article_rank: i64,
    pub author_rank: i64,
    pub article_types: String,
    pub article_hubs: String,
    pub article_tags: String,
    pub rank_to_view_ratio: f64,
    pub author_rank_to_view_ratio: f64,
    pub comments_to_view_ratio: f64,
    pub saves_to_view_ratio: f64,
    pub time_in_draft: Duration,
}

impl Article {
    /// Whether the AI-likelihood score clears the flag threshold.
    pub fn flagged_ai(&self, threshold: f64) -> bool {
        self.using_ai > threshold
    }

    /// Calendar month (1-12) of the publication timestamp.
    pub fn month(&self) -> u32 {
        self.created_date.month()
    }

    /// Publication year.
    pub fn year(&self) -> i32 {
        self.created_date.year()
    }
}

/// English month name for a 1-based calendar month.
pub fn month_name(month: u32) -> &'static str {
    chrono::Month::try_from(month as u8)
        .map(|m| m.name())
        .unwrap_or("Unknown")
}
