//! CLI entry-point for printing the info boxes of a region.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    config::Settings,
    selection::{CountrySelection, Metric},
    summary,
};

/// Args for the `summary` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Country name or ISO code; defaults to worldwide.
    #[arg(long, default_value = "worldwide")]
    pub country: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let (client, snapshot) = super::load_snapshot(&settings).await?;
    let view = match summary::resolve_country(&args.country, &snapshot.countries)? {
        CountrySelection::Worldwide => summary::worldwide(&snapshot.global, Metric::Cases),
        CountrySelection::Country(name) => {
            let record = client.country(&name).await?;
            summary::for_country(&record, Metric::Cases)
        }
    };

    println!("{}", view.country);
    if let Some(updated) = view.updated {
        println!("updated {}", updated.to_rfc3339());
    }
    for info in &view.boxes {
        println!(
            "{:<18} {:>10} today {:>10} total",
            info.title, info.today_label, info.total_label
        );
    }
    Ok(())
}
