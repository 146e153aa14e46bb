use covid_info::{
    data::timeline::RawTimeSeries,
    selection::{Aggregation, Duration, Scale},
    series::{transform, SeriesPoint},
};
use proptest::prelude::*;

fn sample() -> RawTimeSeries {
    [("d1", 10), ("d2", 15), ("d3", 15), ("d4", 20)]
        .into_iter()
        .collect()
}

fn ys(points: &[SeriesPoint]) -> Vec<f64> {
    points.iter().map(|p| p.y).collect()
}

#[test]
fn cumulative_keeps_raw_values() {
    let points = transform(&sample(), Duration::Days30, Aggregation::Cumulative, Scale::Linear);
    assert_eq!(ys(&points), vec![10.0, 15.0, 15.0, 20.0]);
    let labels: Vec<&str> = points.iter().map(|p| p.x.as_str()).collect();
    assert_eq!(labels, vec!["d1", "d2", "d3", "d4"]);
}

#[test]
fn daily_emits_deltas_without_first_date() {
    let points = transform(&sample(), Duration::Days30, Aggregation::Daily, Scale::Linear);
    assert_eq!(ys(&points), vec![5.0, 0.0, 5.0]);
    assert_eq!(points[0].x, "d2");
}

#[test]
fn logarithmic_applies_log10() {
    let points = transform(
        &sample(),
        Duration::Days30,
        Aggregation::Cumulative,
        Scale::Logarithmic,
    );
    let expected = [10f64.log10(), 15f64.log10(), 15f64.log10(), 20f64.log10()];
    assert_eq!(points.len(), 4);
    for (point, want) in points.iter().zip(expected) {
        assert!((point.y - want).abs() < 1e-12);
    }
}

#[test]
fn logarithmic_drops_non_positive_values() {
    let series: RawTimeSeries = [("d1", 0), ("d2", -3), ("d3", 100)].into_iter().collect();
    let points = transform(&series, Duration::Days30, Aggregation::Cumulative, Scale::Logarithmic);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].x, "d3");
    assert!((points[0].y - 2.0).abs() < 1e-12);
}

#[test]
fn daily_ignores_logarithmic_scale() {
    let series: RawTimeSeries = [("d1", 5), ("d2", 3)].into_iter().collect();
    let points = transform(&series, Duration::Days30, Aggregation::Daily, Scale::Logarithmic);
    assert_eq!(ys(&points), vec![-2.0]);
}

#[test]
fn empty_series_gives_no_points() {
    let empty = RawTimeSeries::new();
    for aggregation in [Aggregation::Daily, Aggregation::Cumulative] {
        for scale in [Scale::Linear, Scale::Logarithmic] {
            assert!(transform(&empty, Duration::Days120, aggregation, scale).is_empty());
        }
    }
}

fn duration_strategy() -> impl Strategy<Value = Duration> {
    prop_oneof![
        Just(Duration::Days30),
        Just(Duration::Days60),
        Just(Duration::Days120)
    ]
}

fn series_strategy() -> impl Strategy<Value = RawTimeSeries> {
    prop::collection::vec(-50i64..1_000_000, 0..200).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (format!("day{i}"), v))
            .collect()
    })
}

proptest! {
    #[test]
    fn cumulative_length_is_window_length(series in series_strategy(), duration in duration_strategy()) {
        let points = transform(&series, duration, Aggregation::Cumulative, Scale::Linear);
        prop_assert_eq!(points.len(), duration.days().min(series.len()));
    }

    #[test]
    fn daily_loses_a_point_only_when_window_starts_at_first_date(
        series in series_strategy(),
        duration in duration_strategy(),
    ) {
        let cumulative = transform(&series, duration, Aggregation::Cumulative, Scale::Linear);
        let daily = transform(&series, duration, Aggregation::Daily, Scale::Linear);
        if series.len() <= duration.days() {
            prop_assert_eq!(daily.len(), cumulative.len().saturating_sub(1));
            prop_assert!(daily.iter().zip(cumulative.iter().skip(1)).all(|(d, c)| d.x == c.x));
        } else {
            prop_assert_eq!(daily.len(), cumulative.len());
        }
    }

    #[test]
    fn logarithmic_never_longer_than_linear(series in series_strategy(), duration in duration_strategy()) {
        let linear = transform(&series, duration, Aggregation::Cumulative, Scale::Linear);
        let log = transform(&series, duration, Aggregation::Cumulative, Scale::Logarithmic);
        prop_assert!(log.len() <= linear.len());
        prop_assert_eq!(log.len(), linear.iter().filter(|p| p.y > 0.0).count());
        prop_assert!(log.iter().all(|p| p.y.is_finite()));
    }
}
