//! Shared DTOs for JSON responses.

use axum::http::StatusCode;
use serde::Serialize;

use crate::{
    error::SelectionError,
    table::{DisplayRow, SortSpec},
};

#[derive(Debug, Clone, Serialize)]
pub struct TableDto {
    pub sort: SortSpec,
    pub rows: Vec<DisplayRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshDto {
    pub fetched_at: Option<chrono::DateTime<chrono::Utc>>,
    pub countries: usize,
}

pub type ApiError = (StatusCode, String);

pub fn selection_error(err: SelectionError) -> ApiError {
    let status = match err {
        SelectionError::UnknownCountry { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string())
}

pub fn upstream_error(err: anyhow::Error) -> ApiError {
    (StatusCode::BAD_GATEWAY, format!("{err:#}"))
}

pub fn internal_error(err: anyhow::Error) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}"))
}
