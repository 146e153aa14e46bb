//! Typed errors for user selections arriving from the CLI or HTTP layer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown sort field `{0}` (expected country, cases, recovered or deaths)")]
    UnknownSortField(String),
    #[error("unknown sort direction `{0}` (expected asc or desc)")]
    UnknownSortDirection(String),
    #[error("unknown metric `{0}` (expected cases, recovered, active or deaths)")]
    UnknownMetric(String),
    #[error("unknown aggregation `{0}` (expected daily or cumulative)")]
    UnknownAggregation(String),
    #[error("unknown scale `{0}` (expected linear or logarithmic)")]
    UnknownScale(String),
    #[error("unsupported duration {0} days (expected 30, 60 or 120)")]
    UnsupportedDuration(u32),
    #[error("unknown country `{name}`{}", suggestion_suffix(.suggestion))]
    UnknownCountry {
        name: String,
        suggestion: Option<String>,
    },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(", did you mean `{s}`?"),
        None => String::new(),
    }
}
