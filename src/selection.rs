//! Interaction state of one dashboard session.
//!
//! Every transition consumes the current value and returns the next one, so a choice that
//! constrains another (daily aggregation pins the scale to linear) is enforced in one place.

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    error::SelectionError,
    table::{SortField, SortSpec},
};

/// Case type shown in the chart and highlighted in the info boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Cases,
    Recovered,
    Active,
    Deaths,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Self::Cases, Self::Recovered, Self::Active, Self::Deaths];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Recovered => "recovered",
            Self::Active => "active",
            Self::Deaths => "deaths",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Daily,
    Cumulative,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Linear,
    #[value(alias = "log")]
    Logarithmic,
}

/// Chart window length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(try_from = "u32", into = "u32")]
pub enum Duration {
    #[value(name = "30")]
    Days30,
    #[value(name = "60")]
    Days60,
    #[default]
    #[value(name = "120")]
    Days120,
}

impl Duration {
    pub fn days(&self) -> usize {
        match self {
            Self::Days30 => 30,
            Self::Days60 => 60,
            Self::Days120 => 120,
        }
    }
}

impl TryFrom<u32> for Duration {
    type Error = SelectionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            30 => Ok(Self::Days30),
            60 => Ok(Self::Days60),
            120 => Ok(Self::Days120),
            other => Err(SelectionError::UnsupportedDuration(other)),
        }
    }
}

impl From<Duration> for u32 {
    fn from(value: Duration) -> Self {
        value.days() as u32
    }
}

/// Settings that drive the time-series chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSelection {
    pub duration: Duration,
    pub aggregation: Aggregation,
    pub scale: Scale,
    pub metric: Metric,
}

impl ChartSelection {
    pub fn with_duration(self, duration: Duration) -> Self {
        Self { duration, ..self }
    }

    pub fn with_metric(self, metric: Metric) -> Self {
        Self { metric, ..self }
    }

    /// Daily aggregation pins the scale to linear.
    pub fn with_aggregation(self, aggregation: Aggregation) -> Self {
        let scale = match aggregation {
            Aggregation::Daily => Scale::Linear,
            Aggregation::Cumulative => self.scale,
        };
        Self {
            aggregation,
            scale,
            ..self
        }
    }

    /// Logarithmic scale is only selectable for cumulative charts; otherwise this is a no-op.
    pub fn with_scale(self, scale: Scale) -> Self {
        if scale == Scale::Logarithmic && self.aggregation == Aggregation::Daily {
            tracing::debug!("logarithmic scale ignored for daily aggregation");
            return self;
        }
        Self { scale, ..self }
    }

    /// Scale that actually applies to the chart.
    pub fn effective_scale(&self) -> Scale {
        match self.aggregation {
            Aggregation::Daily => Scale::Linear,
            Aggregation::Cumulative => self.scale,
        }
    }
}

/// Partial chart update as posted by the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ChartUpdate {
    pub duration: Option<Duration>,
    pub aggregation: Option<Aggregation>,
    pub scale: Option<Scale>,
    pub metric: Option<Metric>,
}

impl ChartUpdate {
    /// Aggregation is applied before scale so a combined update cannot leave log on daily.
    pub fn apply(&self, chart: ChartSelection) -> ChartSelection {
        let mut next = chart;
        if let Some(duration) = self.duration {
            next = next.with_duration(duration);
        }
        if let Some(metric) = self.metric {
            next = next.with_metric(metric);
        }
        if let Some(aggregation) = self.aggregation {
            next = next.with_aggregation(aggregation);
        }
        if let Some(scale) = self.scale {
            next = next.with_scale(scale);
        }
        next
    }
}

/// Region the dashboard is focused on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "name")]
pub enum CountrySelection {
    #[default]
    Worldwide,
    Country(String),
}

impl CountrySelection {
    pub fn label(&self) -> &str {
        match self {
            Self::Worldwide => "worldwide",
            Self::Country(name) => name,
        }
    }
}

/// Whole interaction state: focused region, table order and chart settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub country: CountrySelection,
    pub sort: SortSpec,
    pub chart: ChartSelection,
}

impl Selection {
    pub fn select_sort_field(self, field: SortField) -> Self {
        Self {
            sort: self.sort.select(field),
            ..self
        }
    }

    pub fn with_country(self, country: CountrySelection) -> Self {
        Self { country, ..self }
    }

    pub fn with_chart(self, update: &ChartUpdate) -> Self {
        Self {
            chart: update.apply(self.chart),
            ..self
        }
    }
}

macro_rules! lowercase_enum_parsing {
    ($ty:ty, $err:ident, [$($name:literal => $variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = SelectionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(SelectionError::$err(s.to_string())),
                }
            }
        }
    };
}

lowercase_enum_parsing!(Metric, UnknownMetric, [
    "cases" => Metric::Cases,
    "recovered" => Metric::Recovered,
    "active" => Metric::Active,
    "deaths" => Metric::Deaths,
]);

lowercase_enum_parsing!(Aggregation, UnknownAggregation, [
    "daily" => Aggregation::Daily,
    "cumulative" => Aggregation::Cumulative,
]);

lowercase_enum_parsing!(Scale, UnknownScale, [
    "linear" => Scale::Linear,
    "log" => Scale::Logarithmic,
    "logarithmic" => Scale::Logarithmic,
]);

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
