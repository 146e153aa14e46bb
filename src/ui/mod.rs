//! Server-rendered dashboard page.

use askama::Template;
use axum::{extract::State, http::StatusCode, response::Html};

use crate::{
    api::{types::ApiError, AppState},
    series::MetricSeries,
    summary::{CountryOption, InfoBox},
    table::{DisplayRow, SortDirection, SortField, SortSpec},
};

/// Header cell with the sort state of its column.
pub struct HeaderCell {
    pub field: String,
    pub label: &'static str,
    /// `none`, `ascending` or `descending`; the stylesheet draws the matching indicator.
    pub state: &'static str,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub country: String,
    pub updated: String,
    pub boxes: Vec<InfoBox>,
    pub countries: Vec<CountryOption>,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<DisplayRow>,
    pub chart_title: String,
    pub series: Vec<MetricSeries>,
}

fn headers(sort: SortSpec) -> Vec<HeaderCell> {
    [
        (SortField::Country, "Country"),
        (SortField::Cases, "Cases"),
        (SortField::Recovered, "Recovered"),
        (SortField::Deaths, "Deaths"),
    ]
    .into_iter()
    .map(|(field, label)| HeaderCell {
        field: field.to_string(),
        label,
        state: if field != sort.field {
            "none"
        } else if sort.direction == SortDirection::Ascending {
            "ascending"
        } else {
            "descending"
        },
    })
    .collect()
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = {
        let session = state.session.read().await;
        let summary = session.summary();
        let table = session.table();
        let chart = session.chart();
        DashboardTemplate {
            chart_title: format!("{} ({})", chart.selection.metric, summary.country),
            country: summary.country,
            updated: summary
                .updated
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "no data yet".to_string()),
            boxes: summary.boxes,
            countries: session.countries(),
            headers: headers(table.sort),
            rows: table.rows,
            series: chart.series,
        }
    };
    page.render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_sorted_column_shows_direction() {
        let cells = headers(SortSpec::new(SortField::Deaths, SortDirection::Descending));
        let states: Vec<&str> = cells.iter().map(|c| c.state).collect();
        assert_eq!(states, vec!["none", "none", "none", "descending"]);
        assert_eq!(cells[3].field, "deaths");
    }
}
