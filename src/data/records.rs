//! Raw payloads as delivered by the disease.sh API.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Position and identifiers attached to every country record.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryInfo {
    pub iso2: Option<String>,
    pub iso3: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub lat: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub long: f64,
    pub flag: Option<String>,
}

/// One entry of `GET /countries`. Missing or null counters read as zero.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCountryRecord {
    pub country: String,
    pub country_info: CountryInfo,
    pub continent: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub updated: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub cases: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub today_cases: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub deaths: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub today_deaths: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub recovered: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub today_recovered: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub active: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub population: i64,
}

/// The `GET /all` payload.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalSummary {
    #[serde_as(as = "DefaultOnNull")]
    pub updated: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub cases: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub today_cases: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub deaths: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub today_deaths: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub recovered: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub today_recovered: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub active: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub population: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub affected_countries: i64,
}

/// Counters shared by the worldwide and per-country payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub cases: i64,
    pub today_cases: i64,
    pub deaths: i64,
    pub today_deaths: i64,
    pub recovered: i64,
    pub today_recovered: i64,
    pub active: i64,
}

impl From<&RawCountryRecord> for Counters {
    fn from(value: &RawCountryRecord) -> Self {
        Counters {
            cases: value.cases,
            today_cases: value.today_cases,
            deaths: value.deaths,
            today_deaths: value.today_deaths,
            recovered: value.recovered,
            today_recovered: value.today_recovered,
            active: value.active,
        }
    }
}

impl From<&GlobalSummary> for Counters {
    fn from(value: &GlobalSummary) -> Self {
        Counters {
            cases: value.cases,
            today_cases: value.today_cases,
            deaths: value.deaths,
            today_deaths: value.today_deaths,
            recovered: value.recovered,
            today_recovered: value.today_recovered,
            active: value.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_counters_read_as_zero() {
        let json = r#"{
            "country": "Narnia",
            "countryInfo": { "iso3": null, "lat": null },
            "cases": 12,
            "recovered": null
        }"#;
        let record: RawCountryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.country, "Narnia");
        assert_eq!(record.cases, 12);
        assert_eq!(record.recovered, 0);
        assert_eq!(record.deaths, 0);
        assert_eq!(record.active, 0);
        assert_eq!(record.country_info.iso3, None);
        assert_eq!(record.country_info.lat, 0.0);
    }

    #[test]
    fn camel_case_fields_are_mapped() {
        let json = r#"{
            "updated": 1700000000000,
            "cases": 100,
            "todayCases": 3,
            "todayDeaths": 1,
            "todayRecovered": 2,
            "affectedCountries": 231
        }"#;
        let global: GlobalSummary = serde_json::from_str(json).unwrap();
        assert_eq!(global.today_cases, 3);
        assert_eq!(global.today_deaths, 1);
        assert_eq!(global.today_recovered, 2);
        assert_eq!(global.affected_countries, 231);
        assert_eq!(Counters::from(&global).cases, 100);
    }
}
