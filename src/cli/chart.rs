//! CLI entry-point for exporting chart points.

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    selection::{Aggregation, ChartSelection, CountrySelection, Duration, Metric, Scale},
    series::{self, ChartView},
    summary,
};

/// Args for the `chart` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Country name or ISO code; defaults to worldwide.
    #[arg(long, default_value = "worldwide")]
    pub country: String,
    #[arg(long, value_enum, default_value_t = Metric::Cases)]
    pub metric: Metric,
    /// Window length in days.
    #[arg(long, value_enum, default_value_t = Duration::Days120)]
    pub duration: Duration,
    #[arg(long, value_enum, default_value_t = Aggregation::Daily)]
    pub aggregation: Aggregation,
    /// Logarithmic only applies to cumulative charts.
    #[arg(long, value_enum, default_value_t = Scale::Linear)]
    pub scale: Scale,
    /// Write the CSV to this path instead of stdout.
    #[arg(long, value_name = "PATH", conflicts_with = "save")]
    pub output: Option<PathBuf>,
    /// Write the CSV under the outputs directory with a generated name.
    #[arg(long)]
    pub save: bool,
}

impl Args {
    fn selection(&self) -> ChartSelection {
        ChartSelection::default()
            .with_duration(self.duration)
            .with_metric(self.metric)
            .with_aggregation(self.aggregation)
            .with_scale(self.scale)
    }
}

#[derive(Debug, Serialize)]
struct PointRow<'a> {
    metric: Metric,
    date: &'a str,
    value: f64,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let (client, snapshot) = super::load_snapshot(&settings).await?;
    let selection = args.selection();
    let view = match summary::resolve_country(&args.country, &snapshot.countries)? {
        CountrySelection::Worldwide => series::chart(&snapshot.timeline, &selection),
        CountrySelection::Country(name) => {
            let timeline = client
                .historical_country(&name, settings.history_days)
                .await?;
            series::chart(&timeline, &selection)
        }
    };
    info!(?selection, "built chart");

    let target = match &args.output {
        Some(path) => Some(path.clone()),
        None if args.save => Some(settings.join_output(format!(
            "chart_{}_{}_{}.csv",
            args.country.to_lowercase().replace(' ', "_"),
            selection.metric,
            selection.duration.days()
        ))),
        None => None,
    };
    match target {
        Some(path) => {
            let file = std::fs::File::create(&path).with_context(|| format!("create {path:?}"))?;
            write_points(file, &view)?;
            info!(path = %path.display(), "wrote chart");
        }
        None => write_points(io::stdout().lock(), &view)?,
    }
    Ok(())
}

fn write_points<W: io::Write>(sink: W, view: &ChartView) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    for line in &view.series {
        for point in &line.points {
            writer.serialize(PointRow {
                metric: line.metric,
                date: &point.x,
                value: point.y,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::timeline::Timeline;

    #[test]
    fn log_flag_is_dropped_for_daily_charts() {
        let args = Args {
            country: "worldwide".into(),
            metric: Metric::Cases,
            duration: Duration::Days30,
            aggregation: Aggregation::Daily,
            scale: Scale::Logarithmic,
            output: None,
            save: false,
        };
        assert_eq!(args.selection().scale, Scale::Linear);
    }

    #[test]
    fn points_are_written_per_metric() {
        let timeline = Timeline {
            cases: [("1/1/21", 1), ("1/2/21", 3)].into_iter().collect(),
            deaths: [("1/1/21", 0), ("1/2/21", 1)].into_iter().collect(),
            ..Default::default()
        };
        let view = series::chart(&timeline, &ChartSelection::default());
        let mut buf = Vec::new();
        write_points(&mut buf, &view).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "metric,date,value\ncases,1/2/21,2.0\ndeaths,1/2/21,1.0\n"
        );
    }
}
