//! Static attribute registration table for the `Article` record type.
//!
//! Every record attribute is declared once here with its name, kind, and a
//! typed accessor. The correlation engine and the record-table export both
//! walk this table instead of inspecting the struct at runtime, so attribute
//! order is the declaration order below and never changes between runs.

use chrono::{DateTime, Duration, Utc};

use crate::core::Article;

/// Separator for the ';'-joined list attributes (types, hubs, tags).
pub const LIST_SEPARATOR: char = ';';

/// Days from the spreadsheet serial-date epoch (1899-12-30) to 1970-01-01.
const SERIAL_DATE_UNIX_OFFSET: f64 = 25_569.0;

/// Attribute kind, deciding how a value is coerced to a real number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Numeric,
    Boolean,
    Temporal,
    Duration,
    StringList,
}

/// A single attribute value pulled out of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    Flag(bool),
    Timestamp(DateTime<Utc>),
    Span(Duration),
    List(String),
}

impl AttributeValue {
    /// Coerce the value into a real number for correlation analysis.
    ///
    /// Booleans map to 100.0/1.0 rather than 1.0/0.0 so that boolean series
    /// survive the zero-exclusion filter of the joint-sample builder.
    pub fn coerce(&self) -> f64 {
        match self {
            AttributeValue::Int(v) => *v as f64,
            AttributeValue::Float(v) => *v,
            AttributeValue::Flag(true) => 100.0,
            AttributeValue::Flag(false) => 1.0,
            AttributeValue::Timestamp(ts) => serial_date(ts),
            AttributeValue::Span(d) => d.num_seconds() as f64 / 60.0,
            AttributeValue::List(s) => split_list(s).count() as f64,
        }
    }

    /// Format the value for the record-table export.
    pub fn display(&self) -> String {
        match self {
            AttributeValue::Int(v) => v.to_string(),
            AttributeValue::Float(v) => v.to_string(),
            AttributeValue::Flag(v) => v.to_string(),
            AttributeValue::Timestamp(ts) => ts.to_rfc3339(),
            // Durations render as fractional days
            AttributeValue::Span(d) => (d.num_seconds() as f64 / 86_400.0).to_string(),
            AttributeValue::List(s) => s.clone(),
        }
    }
}

/// Fractional days since 1899-12-30, the spreadsheet serial-date convention.
pub fn serial_date(ts: &DateTime<Utc>) -> f64 {
    ts.timestamp_millis() as f64 / 86_400_000.0 + SERIAL_DATE_UNIX_OFFSET
}

/// Split a ';'-joined list attribute into its non-empty elements.
pub fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// One registered record attribute: name, kind, and typed accessor.
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
    get: fn(&Article) -> AttributeValue,
}

impl Attribute {
    /// Read the raw value from a record.
    pub fn value(&self, article: &Article) -> AttributeValue {
        (self.get)(article)
    }

    /// Read and coerce the value to a real number.
    pub fn coerce(&self, article: &Article) -> f64 {
        self.value(article).coerce()
    }

    /// Read and format the value for tabular export.
    pub fn display(&self, article: &Article) -> String {
        self.value(article).display()
    }
}

/// The full attribute table, in record declaration order.
pub static ATTRIBUTES: &[Attribute] = &[
    Attribute {
        name: "id",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Int(a.id as i64),
    },
    Attribute {
        name: "author",
        kind: AttributeKind::StringList,
        get: |a| AttributeValue::List(a.author.clone()),
    },
    Attribute {
        name: "created_date",
        kind: AttributeKind::Temporal,
        get: |a| AttributeValue::Timestamp(a.created_date),
    },
    Attribute {
        name: "is_company",
        kind: AttributeKind::Boolean,
        get: |a| AttributeValue::Flag(a.is_company),
    },
    Attribute {
        name: "using_ai",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Float(a.using_ai),
    },
    Attribute {
        name: "time_for_reading",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Int(a.time_for_reading as i64),
    },
    Attribute {
        name: "comments",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Int(a.comments as i64),
    },
    Attribute {
        name: "views",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Int(a.views as i64),
    },
    Attribute {
        name: "saves",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Int(a.saves as i64),
    },
    Attribute {
        name: "up_rank",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Int(a.up_rank as i64),
    },
    Attribute {
        name: "down_rank",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Int(a.down_rank as i64),
    },
    Attribute {
        name: "article_rank",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Int(a.article_rank),
    },
    Attribute {
        name: "author_rank",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Int(a.author_rank),
    },
    Attribute {
        name: "article_types",
        kind: AttributeKind::StringList,
        get: |a| AttributeValue::List(a.article_types.clone()),
    },
    Attribute {
        name: "article_hubs",
        kind: AttributeKind::StringList,
        get: |a| AttributeValue::List(a.article_hubs.clone()),
    },
    Attribute {
        name: "article_tags",
        kind: AttributeKind::StringList,
        get: |a| AttributeValue::List(a.article_tags.clone()),
    },
    Attribute {
        name: "rank_to_view_ratio",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Float(a.rank_to_view_ratio),
    },
    Attribute {
        name: "author_rank_to_view_ratio",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Float(a.author_rank_to_view_ratio),
    },
    Attribute {
        name: "comments_to_view_ratio",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Float(a.comments_to_view_ratio),
    },
    Attribute {
        name: "saves_to_view_ratio",
        kind: AttributeKind::Numeric,
        get: |a| AttributeValue::Float(a.saves_to_view_ratio),
    },
    Attribute {
        name: "time_in_draft",
        kind: AttributeKind::Duration,
        get: |a| AttributeValue::Span(a.time_in_draft),
    },
];

/// Attributes excluded from correlation analysis by name, regardless of kind:
/// the identifier and the free-text-ish fields.
pub static EXCLUDED_ATTRIBUTES: &[&str] = &["id", "author", "article_types"];

/// The attributes eligible for correlation analysis, in declaration order.
pub fn eligible_attributes() -> Vec<&'static Attribute> {
    ATTRIBUTES
        .iter()
        .filter(|attr| !EXCLUDED_ATTRIBUTES.contains(&attr.name))
        .collect()
}
