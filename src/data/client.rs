//! HTTP access to the disease.sh COVID-19 endpoints.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};
use urlencoding::encode;

use crate::config::Settings;

use super::{
    records::{GlobalSummary, RawCountryRecord},
    timeline::{CountryTimeline, Timeline},
};

/// Thin typed wrapper around the disease.sh API.
#[derive(Debug, Clone)]
pub struct DiseaseClient {
    http: Client,
    base_url: String,
}

impl DiseaseClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("covid-info/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .timeout(settings.request_timeout())
            .build()
            .context("building http client")?;
        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /all`
    pub async fn global(&self) -> Result<GlobalSummary> {
        self.get_json(&format!("{}/all", self.base_url)).await
    }

    /// `GET /countries`
    pub async fn countries(&self) -> Result<Vec<RawCountryRecord>> {
        let records: Vec<RawCountryRecord> = self
            .get_json(&format!("{}/countries", self.base_url))
            .await?;
        info!(countries = records.len(), "fetched country records");
        Ok(records)
    }

    /// `GET /countries/{name}`
    pub async fn country(&self, name: &str) -> Result<RawCountryRecord> {
        self.get_json(&format!("{}/countries/{}", self.base_url, encode(name)))
            .await
    }

    /// `GET /historical/all?lastdays={days}`
    pub async fn historical_all(&self, days: usize) -> Result<Timeline> {
        let timeline: Timeline = self
            .get_json(&format!("{}/historical/all?lastdays={days}", self.base_url))
            .await?;
        Ok(timeline.into_chronological())
    }

    /// `GET /historical/{name}?lastdays={days}`
    pub async fn historical_country(&self, name: &str, days: usize) -> Result<Timeline> {
        let envelope: CountryTimeline = self
            .get_json(&format!(
                "{}/historical/{}?lastdays={days}",
                self.base_url,
                encode(name)
            ))
            .await?;
        debug!(country = %envelope.country, "fetched country timeline");
        Ok(envelope.timeline.into_chronological())
    }

    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("request {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("{url} returned {status}"));
        }
        resp.json::<T>()
            .await
            .with_context(|| format!("decode response from {url}"))
    }
}
