//! Historical cumulative series as returned by the `/historical` endpoints.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::selection::Metric;

/// Date label format used by disease.sh, e.g. `3/14/21`.
pub const DATE_LABEL_FORMAT: &str = "%m/%d/%y";

/// Ordered mapping from date label to cumulative count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTimeSeries(IndexMap<String, i64>);

impl RawTimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<i64> {
        self.0.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(label, value)| (label.as_str(), *value))
    }

    /// Entry at a position in chronological order.
    pub fn get_index(&self, index: usize) -> Option<(&str, i64)> {
        self.0
            .get_index(index)
            .map(|(label, value)| (label.as_str(), *value))
    }

    /// Re-order entries by their parsed date. Labels that do not parse leave the order untouched.
    pub fn into_chronological(mut self) -> Self {
        let parsed: Option<Vec<NaiveDate>> = self
            .0
            .keys()
            .map(|label| NaiveDate::parse_from_str(label, DATE_LABEL_FORMAT).ok())
            .collect();
        match parsed {
            Some(dates) => {
                let mut keyed: Vec<(NaiveDate, String, i64)> = dates
                    .into_iter()
                    .zip(self.0.drain(..))
                    .map(|(date, (label, value))| (date, label, value))
                    .collect();
                keyed.sort_by_key(|(date, _, _)| *date);
                Self(keyed.into_iter().map(|(_, l, v)| (l, v)).collect())
            }
            None => {
                warn!(entries = self.0.len(), "unparseable date labels; keeping received order");
                self
            }
        }
    }
}

impl<L: Into<String>> FromIterator<(L, i64)> for RawTimeSeries {
    fn from_iter<T: IntoIterator<Item = (L, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(l, v)| (l.into(), v)).collect())
    }
}

/// The cumulative series of one region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    pub cases: RawTimeSeries,
    pub deaths: RawTimeSeries,
    pub recovered: RawTimeSeries,
}

/// Envelope returned by `/historical/{country}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CountryTimeline {
    pub country: String,
    pub timeline: Timeline,
}

impl Timeline {
    pub fn into_chronological(self) -> Self {
        Timeline {
            cases: self.cases.into_chronological(),
            deaths: self.deaths.into_chronological(),
            recovered: self.recovered.into_chronological(),
        }
    }

    /// The cumulative series for a metric. `Active` is derived per cases date as
    /// cases - deaths - recovered, with missing entries counted as zero.
    pub fn series(&self, metric: Metric) -> RawTimeSeries {
        match metric {
            Metric::Cases => self.cases.clone(),
            Metric::Deaths => self.deaths.clone(),
            Metric::Recovered => self.recovered.clone(),
            Metric::Active => self
                .cases
                .iter()
                .map(|(label, cases)| {
                    let deaths = self.deaths.get(label).unwrap_or(0);
                    let recovered = self.recovered.get(label).unwrap_or(0);
                    (label, cases - deaths - recovered)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization_keeps_payload_order() {
        let json = r#"{"1/3/21": 30, "1/1/21": 10, "1/2/21": 20}"#;
        let series: RawTimeSeries = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = series.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["1/3/21", "1/1/21", "1/2/21"]);
    }

    #[test]
    fn chronological_order_uses_parsed_dates() {
        let series: RawTimeSeries = [("1/10/21", 3), ("12/31/20", 1), ("1/2/21", 2)]
            .into_iter()
            .collect();
        let sorted = series.into_chronological();
        let labels: Vec<&str> = sorted.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["12/31/20", "1/2/21", "1/10/21"]);
    }

    #[test]
    fn unparseable_labels_keep_order() {
        let series: RawTimeSeries = [("b", 2), ("a", 1)].into_iter().collect();
        let kept = series.clone().into_chronological();
        assert_eq!(kept, series);
    }

    #[test]
    fn active_series_subtracts_deaths_and_recovered() {
        let timeline = Timeline {
            cases: [("1/1/21", 100), ("1/2/21", 120)].into_iter().collect(),
            deaths: [("1/1/21", 5), ("1/2/21", 6)].into_iter().collect(),
            recovered: [("1/1/21", 50)].into_iter().collect(),
        };
        let active = timeline.series(Metric::Active);
        assert_eq!(active.get("1/1/21"), Some(45));
        assert_eq!(active.get("1/2/21"), Some(114));
    }
}
