//! Sort state for the country table.

use std::{cmp::Ordering, fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

use super::DisplayRow;

/// Column a table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Country,
    Cases,
    Recovered,
    Deaths,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[value(alias = "asc")]
    Ascending,
    #[value(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Field and direction currently applied to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Cases,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Apply a click on `field`: the current field flips direction, a new field starts ascending.
    pub fn select(self, field: SortField) -> Self {
        if field == self.field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }

    /// Ordering of two rows under this spec. Equal keys compare equal in both directions.
    pub fn compare(&self, a: &DisplayRow, b: &DisplayRow) -> Ordering {
        let ordering = match self.field {
            SortField::Country => a.country.cmp(&b.country),
            SortField::Cases => a.cases.cmp(&b.cases),
            SortField::Recovered => a.recovered.cmp(&b.recovered),
            SortField::Deaths => a.deaths.cmp(&b.deaths),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Country => "country",
            Self::Cases => "cases",
            Self::Recovered => "recovered",
            Self::Deaths => "deaths",
        };
        f.write_str(name)
    }
}

impl FromStr for SortField {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "country" => Ok(Self::Country),
            "cases" => Ok(Self::Cases),
            "recovered" => Ok(Self::Recovered),
            "deaths" => Ok(Self::Deaths),
            _ => Err(SelectionError::UnknownSortField(s.to_string())),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(SelectionError::UnknownSortDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!("Deaths".parse::<SortField>().unwrap(), SortField::Deaths);
        assert_eq!(" country ".parse::<SortField>().unwrap(), SortField::Country);
        assert_eq!(
            "active".parse::<SortField>(),
            Err(SelectionError::UnknownSortField("active".into()))
        );
    }

    #[test]
    fn direction_accepts_short_forms() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn spec_serializes_lowercase() {
        let json = serde_json::to_string(&SortSpec::default()).unwrap();
        assert_eq!(json, r#"{"field":"cases","direction":"ascending"}"#);
    }
}
