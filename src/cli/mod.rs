//! Command-line interface wiring for covid-info.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    config::Settings,
    data::{client::DiseaseClient, snapshot::Snapshot},
};

pub mod chart;
pub mod fetch;
pub mod serve;
pub mod summary;
pub mod table;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "COVID-19 statistics dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Fetch(args) => fetch::run(args, settings).await,
            Commands::Summary(args) => summary::run(args, settings).await,
            Commands::Table(args) => table::run(args, settings).await,
            Commands::Chart(args) => chart::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download the worldwide summary, country records and timeline.
    Fetch(fetch::Args),
    /// Print today's and total counters for a region.
    Summary(summary::Args),
    /// Export the sorted country table as CSV.
    Table(table::Args),
    /// Export chart points as CSV.
    Chart(chart::Args),
    /// Serve the JSON API and dashboard.
    Serve(serve::Args),
}

/// Client plus the cached (or freshly fetched) snapshot shared by the read commands.
pub(crate) async fn load_snapshot(settings: &Settings) -> Result<(DiseaseClient, Snapshot)> {
    let client = DiseaseClient::new(settings)?;
    let snapshot = Snapshot::load_or_fetch(settings, &client).await?;
    Ok((client, snapshot))
}
