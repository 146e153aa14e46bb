//! Per-process dashboard session: the latest data and the user's selection.

use std::sync::Arc;

use crate::{
    data::{records::RawCountryRecord, snapshot::Snapshot, timeline::Timeline},
    selection::{CountrySelection, Selection},
    series::{self, ChartView},
    summary::{self, CountryOption, SummaryView},
    table,
};

use super::types::TableDto;

/// Detail fetched for a selected country.
#[derive(Debug, Clone)]
pub struct RegionData {
    pub record: RawCountryRecord,
    pub timeline: Timeline,
}

/// Data is only ever replaced wholesale, never patched in place.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub snapshot: Arc<Snapshot>,
    pub region: Option<Arc<RegionData>>,
    pub selection: Selection,
}

impl Session {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            ..Default::default()
        }
    }

    pub fn countries(&self) -> Vec<CountryOption> {
        let mut options = vec![CountryOption {
            name: CountrySelection::Worldwide.label().to_string(),
            iso3: None,
        }];
        options.extend(summary::country_options(&self.snapshot.countries));
        options
    }

    pub fn summary(&self) -> SummaryView {
        let charted = self.selection.chart.metric;
        match (&self.selection.country, &self.region) {
            (CountrySelection::Country(_), Some(region)) => {
                summary::for_country(&region.record, charted)
            }
            (CountrySelection::Country(name), None) => match self.snapshot.country(name) {
                Some(record) => summary::for_country(record, charted),
                None => summary::worldwide(&self.snapshot.global, charted),
            },
            (CountrySelection::Worldwide, _) => summary::worldwide(&self.snapshot.global, charted),
        }
    }

    pub fn table(&self) -> TableDto {
        let sort = self.selection.sort;
        TableDto {
            sort,
            rows: table::build_rows(&self.snapshot.countries, sort),
        }
    }

    pub fn chart(&self) -> ChartView {
        let timeline = match (&self.selection.country, &self.region) {
            (CountrySelection::Country(_), Some(region)) => &region.timeline,
            _ => &self.snapshot.timeline,
        };
        series::chart(timeline, &self.selection.chart)
    }
}
