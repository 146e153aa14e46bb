//! Runtime configuration utilities for covid-info.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://disease.sh/v3/covid-19";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root of the disease.sh v3 COVID-19 API.
    pub api_base_url: String,
    /// Days of history requested per timeline. One more than the longest chart window so the
    /// first charted day still has a daily delta.
    pub history_days: usize,
    /// Per-request timeout for upstream calls.
    pub request_timeout_secs: u64,
    /// Root folder for the cached snapshot.
    pub data_dir: PathBuf,
    /// Root folder for exported tables and charts.
    pub outputs_dir: PathBuf,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let api_base_url = env::var("COVID_API_BASE")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let history_days = env::var("HISTORY_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(121);
        let request_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;
        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            api_base_url,
            history_days,
            request_timeout_secs,
            data_dir,
            outputs_dir,
        })
    }

    /// Settings rooted at `dir` talking to `api_base_url`, without touching the environment.
    pub fn for_dir<P: AsRef<Path>>(dir: P, api_base_url: impl Into<String>) -> Self {
        let dir = dir.as_ref();
        Self {
            api_base_url: api_base_url.into(),
            history_days: 121,
            request_timeout_secs: 20,
            data_dir: dir.join("data"),
            outputs_dir: dir.join("outputs"),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
