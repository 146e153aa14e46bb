//! One complete fetch of the dashboard's source data, cached as JSON on disk.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::Settings;

use super::{
    client::DiseaseClient,
    records::{GlobalSummary, RawCountryRecord},
    timeline::Timeline,
};

const SNAPSHOT_FILE: &str = "snapshot.json";

/// Worldwide summary, country records and worldwide timeline captured together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub fetched_at: Option<DateTime<Utc>>,
    pub global: GlobalSummary,
    pub countries: Vec<RawCountryRecord>,
    pub timeline: Timeline,
}

impl Snapshot {
    /// Stand-in used when no data could be fetched.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fetched_at.is_none() && self.countries.is_empty()
    }

    /// Fetch all three payloads concurrently; any failure fails the whole snapshot.
    #[instrument(skip(client))]
    pub async fn fetch(client: &DiseaseClient, history_days: usize) -> Result<Self> {
        let (global, countries, timeline) = futures::try_join!(
            client.global(),
            client.countries(),
            client.historical_all(history_days),
        )?;
        info!(countries = countries.len(), "fetched snapshot");
        Ok(Self {
            fetched_at: Some(Utc::now()),
            global,
            countries,
            timeline,
        })
    }

    /// Find a country record by its exact name.
    pub fn country(&self, name: &str) -> Option<&RawCountryRecord> {
        self.countries.iter().find(|r| r.country == name)
    }

    pub fn path(settings: &Settings) -> PathBuf {
        settings.join_data(SNAPSHOT_FILE)
    }

    pub fn persist(&self, settings: &Settings) -> Result<PathBuf> {
        let path = Self::path(settings);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&path).with_context(|| format!("create {path:?}"))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("write snapshot {path:?}"))?;
        writer
            .flush()
            .with_context(|| format!("flush snapshot {path:?}"))?;
        info!(path = %path.display(), countries = self.countries.len(), "saved snapshot");
        Ok(path)
    }

    /// Cached snapshot, or `None` when nothing has been fetched yet.
    pub fn load(settings: &Settings) -> Result<Option<Self>> {
        let path = Self::path(settings);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path).with_context(|| format!("open {path:?}"))?;
        let snapshot: Snapshot = serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("parse snapshot {path:?}"))?;
        Ok(Some(snapshot))
    }

    /// Cached snapshot if present, otherwise a live fetch that is persisted for next time.
    pub async fn load_or_fetch(settings: &Settings, client: &DiseaseClient) -> Result<Self> {
        if let Some(snapshot) = Self::load(settings)? {
            info!("using cached snapshot");
            return Ok(snapshot);
        }
        warn!("no cached snapshot; fetching live data");
        let snapshot = Self::fetch(client, settings.history_days).await?;
        snapshot.persist(settings)?;
        Ok(snapshot)
    }
}
