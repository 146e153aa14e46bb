//! HTTP route handlers for Axum.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use crate::{
    data::snapshot::Snapshot,
    selection::{ChartUpdate, CountrySelection},
    series::ChartView,
    summary::{self, CountryOption, SummaryView},
    table::SortField,
};

use super::{
    session::RegionData,
    types::{internal_error, selection_error, upstream_error, ApiError, RefreshDto, TableDto},
    AppState,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn list_countries(State(state): State<AppState>) -> ApiResult<Vec<CountryOption>> {
    Ok(Json(state.session.read().await.countries()))
}

pub async fn get_summary(State(state): State<AppState>) -> ApiResult<SummaryView> {
    Ok(Json(state.session.read().await.summary()))
}

pub async fn get_table(State(state): State<AppState>) -> ApiResult<TableDto> {
    Ok(Json(state.session.read().await.table()))
}

/// A click on a column header.
pub async fn sort_table(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> ApiResult<TableDto> {
    let field: SortField = field.parse().map_err(selection_error)?;
    let mut session = state.session.write().await;
    session.selection = session.selection.clone().select_sort_field(field);
    info!(sort = ?session.selection.sort, "table order changed");
    Ok(Json(session.table()))
}

pub async fn get_chart(State(state): State<AppState>) -> ApiResult<ChartView> {
    Ok(Json(state.session.read().await.chart()))
}

pub async fn update_chart(
    State(state): State<AppState>,
    Json(update): Json<ChartUpdate>,
) -> ApiResult<ChartView> {
    let mut session = state.session.write().await;
    session.selection = session.selection.clone().with_chart(&update);
    info!(chart = ?session.selection.chart, "chart selection changed");
    Ok(Json(session.chart()))
}

/// Switch region. Country detail is fetched without holding the session lock; a response that
/// arrives after a newer region request is dropped.
#[instrument(skip(state))]
pub async fn select_country(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<SummaryView> {
    let snapshot = state.session.read().await.snapshot.clone();
    let country = summary::resolve_country(&name, &snapshot.countries).map_err(selection_error)?;
    let ticket = state.next_region_ticket();

    let region = match &country {
        CountrySelection::Worldwide => None,
        CountrySelection::Country(name) => {
            let (record, timeline) = futures::try_join!(
                state.client.country(name),
                state
                    .client
                    .historical_country(name, state.settings.history_days),
            )
            .map_err(upstream_error)?;
            Some(Arc::new(RegionData { record, timeline }))
        }
    };

    let mut session = state.session.write().await;
    if state.is_latest_region_ticket(ticket) {
        session.selection = session.selection.clone().with_country(country);
        session.region = region;
    } else {
        info!(%name, "discarding superseded region response");
    }
    Ok(Json(session.summary()))
}

pub async fn refresh(State(state): State<AppState>) -> ApiResult<RefreshDto> {
    let snapshot = Snapshot::fetch(&state.client, state.settings.history_days)
        .await
        .map_err(upstream_error)?;
    snapshot
        .persist(&state.settings)
        .map_err(internal_error)?;
    let dto = RefreshDto {
        fetched_at: snapshot.fetched_at,
        countries: snapshot.countries.len(),
    };
    state.session.write().await.snapshot = Arc::new(snapshot);
    Ok(Json(dto))
}
