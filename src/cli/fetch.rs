//! CLI entry-point for fetching and caching the dashboard data.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::{client::DiseaseClient, snapshot::Snapshot},
};

/// Args for the `fetch` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Override the number of history days requested for the timeline.
    #[arg(long)]
    pub days: Option<usize>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let days = args.days.unwrap_or(settings.history_days);
    let client = DiseaseClient::new(&settings)?;
    info!(base = client.base_url(), days, "fetching snapshot");
    let snapshot = Snapshot::fetch(&client, days).await?;
    let path = snapshot.persist(&settings)?;
    println!(
        "saved {} countries and {} timeline days to {}",
        snapshot.countries.len(),
        snapshot.timeline.cases.len(),
        path.display()
    );
    Ok(())
}
