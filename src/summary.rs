//! Info boxes, map position and country dropdown for the selected region.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use strsim::jaro_winkler;

use crate::{
    data::records::{Counters, GlobalSummary, RawCountryRecord},
    error::SelectionError,
    selection::{CountrySelection, Metric},
};

const WORLDWIDE_CENTER: (f64, f64) = (34.80746, -40.4796);
const WORLDWIDE_ZOOM: u8 = 3;
const COUNTRY_ZOOM: u8 = 4;
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoBox {
    pub metric: Metric,
    pub title: &'static str,
    pub today: i64,
    pub total: i64,
    pub today_label: String,
    pub total_label: String,
    /// Whether this box is the metric currently charted.
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl MapView {
    pub fn worldwide() -> Self {
        Self {
            lat: WORLDWIDE_CENTER.0,
            lng: WORLDWIDE_CENTER.1,
            zoom: WORLDWIDE_ZOOM,
        }
    }

    pub fn for_country(record: &RawCountryRecord) -> Self {
        Self {
            lat: record.country_info.lat,
            lng: record.country_info.long,
            zoom: COUNTRY_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub country: String,
    pub updated: Option<DateTime<Utc>>,
    pub boxes: Vec<InfoBox>,
    pub map: MapView,
}

/// Dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryOption {
    pub name: String,
    pub iso3: Option<String>,
}

/// Summary for the worldwide payload.
pub fn worldwide(global: &GlobalSummary, charted: Metric) -> SummaryView {
    SummaryView {
        country: CountrySelection::Worldwide.label().to_string(),
        updated: updated_at(global.updated),
        boxes: info_boxes(&Counters::from(global), charted),
        map: MapView::worldwide(),
    }
}

/// Summary for one country record.
pub fn for_country(record: &RawCountryRecord, charted: Metric) -> SummaryView {
    SummaryView {
        country: record.country.clone(),
        updated: updated_at(record.updated),
        boxes: info_boxes(&Counters::from(record), charted),
        map: MapView::for_country(record),
    }
}

/// The four boxes in display order. The active box's daily figure is
/// today's cases minus today's deaths and recoveries, which may be negative.
pub fn info_boxes(counters: &Counters, charted: Metric) -> Vec<InfoBox> {
    Metric::ALL
        .into_iter()
        .map(|metric| {
            let (title, today, total) = match metric {
                Metric::Cases => ("Coronavirus Cases", counters.today_cases, counters.cases),
                Metric::Recovered => ("Recovered", counters.today_recovered, counters.recovered),
                Metric::Active => (
                    "Active",
                    counters.today_cases - counters.today_deaths - counters.today_recovered,
                    counters.active,
                ),
                Metric::Deaths => ("Deaths", counters.today_deaths, counters.deaths),
            };
            InfoBox {
                metric,
                title,
                today,
                total,
                today_label: pretty_print_stat(today),
                total_label: abbreviate(total),
                active: metric == charted,
            }
        })
        .collect()
}

fn updated_at(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        return None;
    }
    Utc.timestamp_millis_opt(millis).single()
}

/// Compact daily figure such as `+1.2k`; zero renders as `+0`.
pub fn pretty_print_stat(value: i64) -> String {
    match value {
        0 => "+0".to_string(),
        v if v < 0 => abbreviate(v),
        v => format!("+{}", abbreviate(v)),
    }
}

/// One-decimal abbreviation with k/m/b/t suffixes.
pub fn abbreviate(value: i64) -> String {
    const UNITS: [&str; 5] = ["", "k", "m", "b", "t"];
    let sign = if value < 0 { "-" } else { "" };
    let mut scaled = value.unsigned_abs() as f64;
    let mut unit = 0;
    while unit + 1 < UNITS.len() && (scaled * 10.0).round() / 10.0 >= 1000.0 {
        scaled /= 1000.0;
        unit += 1;
    }
    format!("{sign}{scaled:.1}{}", UNITS[unit])
}

/// Dropdown entries in payload order.
pub fn country_options(records: &[RawCountryRecord]) -> Vec<CountryOption> {
    records
        .iter()
        .map(|r| CountryOption {
            name: r.country.clone(),
            iso3: r.country_info.iso3.clone(),
        })
        .collect()
}

/// Resolve a requested region against known records by name, ISO2 or ISO3, ignoring case.
pub fn resolve_country(
    requested: &str,
    records: &[RawCountryRecord],
) -> Result<CountrySelection, SelectionError> {
    let wanted = requested.trim();
    if wanted.eq_ignore_ascii_case("worldwide") {
        return Ok(CountrySelection::Worldwide);
    }
    let code_matches = |code: &Option<String>| {
        code.as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(wanted))
    };
    if let Some(record) = records.iter().find(|r| {
        r.country.eq_ignore_ascii_case(wanted)
            || code_matches(&r.country_info.iso2)
            || code_matches(&r.country_info.iso3)
    }) {
        return Ok(CountrySelection::Country(record.country.clone()));
    }

    let lowered = wanted.to_lowercase();
    let suggestion = records
        .iter()
        .map(|r| (jaro_winkler(&lowered, &r.country.to_lowercase()), &r.country))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, name)| name.clone());
    Err(SelectionError::UnknownCountry {
        name: wanted.to_string(),
        suggestion,
    })
}
