//! Data pipeline and services behind the COVID-19 Info dashboard.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod selection;
pub mod series;
pub mod summary;
pub mod table;
#[cfg(feature = "askama")]
pub mod ui;
