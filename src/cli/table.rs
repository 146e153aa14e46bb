//! CLI entry-point for exporting the sorted country table.

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    table::{self, DisplayRow, SortField, SortSpec},
};

/// Args for the `table` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Column clicks applied in order, starting from cases ascending.
    /// Repeating a column flips its direction.
    #[arg(long = "sort", value_enum)]
    pub sort: Vec<SortField>,
    /// Write the CSV to this path instead of stdout.
    #[arg(long, value_name = "PATH", conflicts_with = "save")]
    pub output: Option<PathBuf>,
    /// Write the CSV under the outputs directory with a generated name.
    #[arg(long)]
    pub save: bool,
}

/// Sort state after applying `clicks` to the default spec.
pub fn apply_clicks(clicks: &[SortField]) -> SortSpec {
    clicks
        .iter()
        .fold(SortSpec::default(), |spec, field| spec.select(*field))
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let (_client, snapshot) = super::load_snapshot(&settings).await?;
    let spec = apply_clicks(&args.sort);
    let rows = table::build_rows(&snapshot.countries, spec);
    info!(?spec, rows = rows.len(), "built table");

    let target = match args.output {
        Some(path) => Some(path),
        None if args.save => Some(settings.join_output(format!(
            "table_{}_{}.csv",
            spec.field,
            match spec.direction {
                table::SortDirection::Ascending => "asc",
                table::SortDirection::Descending => "desc",
            }
        ))),
        None => None,
    };
    match target {
        Some(path) => {
            let file = std::fs::File::create(&path).with_context(|| format!("create {path:?}"))?;
            write_rows(file, &rows)?;
            info!(path = %path.display(), "wrote table");
        }
        None => write_rows(io::stdout().lock(), &rows)?,
    }
    Ok(())
}

fn write_rows<W: io::Write>(sink: W, rows: &[DisplayRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SortDirection;

    #[test]
    fn repeated_clicks_flip_direction() {
        let spec = apply_clicks(&[SortField::Deaths, SortField::Deaths]);
        assert_eq!(spec, SortSpec::new(SortField::Deaths, SortDirection::Descending));
        assert_eq!(apply_clicks(&[]), SortSpec::default());
    }

    #[test]
    fn csv_has_header_and_rows() {
        let rows = vec![DisplayRow {
            country: "Chad".into(),
            cases: 3,
            recovered: 2,
            deaths: 1,
            active: 0,
        }];
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "country,cases,recovered,deaths,active\nChad,3,2,1,0\n");
    }
}
