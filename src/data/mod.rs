//! Data ingestion layer: raw payloads, the disease.sh client and the snapshot cache.

pub mod client;
pub mod records;
pub mod snapshot;
pub mod timeline;
