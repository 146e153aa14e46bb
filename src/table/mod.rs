//! Country table: raw records normalized into display rows and ordered by a [`SortSpec`].

pub mod sort;

use serde::{Deserialize, Serialize};

use crate::data::records::RawCountryRecord;

pub use sort::{SortDirection, SortField, SortSpec};

/// Render-ready statistics for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub country: String,
    pub cases: i64,
    pub recovered: i64,
    pub deaths: i64,
    pub active: i64,
}

impl From<&RawCountryRecord> for DisplayRow {
    fn from(record: &RawCountryRecord) -> Self {
        DisplayRow {
            country: record.country.clone(),
            cases: record.cases,
            recovered: record.recovered,
            deaths: record.deaths,
            active: record.active,
        }
    }
}

/// Map every record to a row, keeping input order.
pub fn normalize(records: &[RawCountryRecord]) -> Vec<DisplayRow> {
    records.iter().map(DisplayRow::from).collect()
}

/// Stable sort of rows under `spec`.
pub fn sort_rows(mut rows: Vec<DisplayRow>, spec: SortSpec) -> Vec<DisplayRow> {
    rows.sort_by(|a, b| spec.compare(a, b));
    rows
}

/// Table rows for a snapshot of records.
pub fn build_rows(records: &[RawCountryRecord], spec: SortSpec) -> Vec<DisplayRow> {
    sort_rows(normalize(records), spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, cases: i64) -> RawCountryRecord {
        RawCountryRecord {
            country: country.to_string(),
            cases,
            ..Default::default()
        }
    }

    #[test]
    fn normalization_copies_counters() {
        let raw = RawCountryRecord {
            country: "Chile".into(),
            cases: 10,
            recovered: 7,
            deaths: 1,
            active: 2,
            today_cases: 99,
            ..Default::default()
        };
        let rows = normalize(std::slice::from_ref(&raw));
        assert_eq!(
            rows,
            vec![DisplayRow {
                country: "Chile".into(),
                cases: 10,
                recovered: 7,
                deaths: 1,
                active: 2,
            }]
        );
    }

    #[test]
    fn country_names_compare_case_sensitively() {
        let rows = build_rows(
            &[record("aruba", 1), record("Zambia", 1), record("Benin", 1)],
            SortSpec::new(SortField::Country, SortDirection::Ascending),
        );
        let names: Vec<&str> = rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Benin", "Zambia", "aruba"]);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        assert!(build_rows(&[], SortSpec::default()).is_empty());
    }
}
