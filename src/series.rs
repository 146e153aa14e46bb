//! Time-series shaping for the chart: windowing, daily deltas and log scaling.

use serde::Serialize;

use crate::{
    data::timeline::{RawTimeSeries, Timeline},
    selection::{Aggregation, ChartSelection, Duration, Metric, Scale},
};

/// One plotted point: the source date label and its transformed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: String,
    pub y: f64,
}

/// Points for a single metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub metric: Metric,
    pub points: Vec<SeriesPoint>,
}

/// Everything the chart needs for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub selection: ChartSelection,
    /// Scale actually applied; always linear for daily charts.
    pub scale: Scale,
    pub series: Vec<MetricSeries>,
}

/// Transform one cumulative series into plot points.
///
/// Only the last `duration` dates are emitted. Daily deltas are taken against the previous date
/// of the full series, so the first recorded date never yields a point. Under cumulative
/// aggregation with a logarithmic scale, non-positive values are dropped. The scale is ignored
/// for daily aggregation. A daily chart is one point shorter than its cumulative counterpart
/// only when the whole series fits inside the window.
pub fn transform(
    series: &RawTimeSeries,
    duration: Duration,
    aggregation: Aggregation,
    scale: Scale,
) -> Vec<SeriesPoint> {
    let start = series.len().saturating_sub(duration.days());
    (start..series.len())
        .filter_map(|idx| {
            let (label, value) = series.get_index(idx)?;
            let y = match aggregation {
                Aggregation::Cumulative => match scale {
                    Scale::Linear => value as f64,
                    Scale::Logarithmic if value > 0 => (value as f64).log10(),
                    Scale::Logarithmic => return None,
                },
                Aggregation::Daily => {
                    let (_, previous) = series.get_index(idx.checked_sub(1)?)?;
                    (value - previous) as f64
                }
            };
            Some(SeriesPoint {
                x: label.to_string(),
                y,
            })
        })
        .collect()
}

/// Build the chart for `selection`: the selected metric followed by deaths, each transformed
/// independently. Deaths is not repeated when it is the selected metric.
pub fn chart(timeline: &Timeline, selection: &ChartSelection) -> ChartView {
    let mut metrics = vec![selection.metric];
    if selection.metric != Metric::Deaths {
        metrics.push(Metric::Deaths);
    }
    let scale = selection.effective_scale();
    let series = metrics
        .into_iter()
        .map(|metric| MetricSeries {
            metric,
            points: transform(
                &timeline.series(metric),
                selection.duration,
                selection.aggregation,
                scale,
            ),
        })
        .collect();
    ChartView {
        selection: *selection,
        scale,
        series,
    }
}
