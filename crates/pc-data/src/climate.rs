//! Climate reference table, keyed by city.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DataError, DataResult};

/// One climate record. Field renames carry the source column names; a row
/// missing a required column fails deserialization, which the loader reports
/// as a table-load error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateRecord {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "State", default)]
    pub state: Option<String>,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Dry Bulb")]
    pub dry_bulb_c: f64,
    #[serde(rename = "Wet Bulb")]
    pub wet_bulb_c: f64,
    #[serde(rename = "Dew Point")]
    pub dew_point_c: f64,
    #[serde(rename = "Humidity Ratio")]
    pub humidity_ratio: f64,
}

/// Read-only climate table.
#[derive(Debug, Clone, Default)]
pub struct ClimateTable {
    records: Vec<ClimateRecord>,
}

impl ClimateTable {
    /// Build from pre-parsed records. City names are trimmed; the source
    /// data carries stray whitespace.
    pub fn from_records(mut records: Vec<ClimateRecord>) -> Self {
        for record in &mut records {
            record.city = record.city.trim().to_string();
        }
        Self { records }
    }

    pub fn load_json(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<ClimateRecord> = serde_json::from_str(&content)?;
        Self::from_loaded(records)
    }

    pub fn load_yaml(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<ClimateRecord> = serde_yaml::from_str(&content)?;
        Self::from_loaded(records)
    }

    fn from_loaded(records: Vec<ClimateRecord>) -> DataResult<Self> {
        if records.is_empty() {
            return Err(DataError::EmptyTable { table: "climate" });
        }
        info!(rows = records.len(), "loaded climate table");
        Ok(Self::from_records(records))
    }

    /// Look up a city by (trimmed) name.
    pub fn city(&self, name: &str) -> DataResult<&ClimateRecord> {
        let name = name.trim();
        self.records
            .iter()
            .find(|r| r.city == name)
            .ok_or_else(|| DataError::NotFound {
                table: "climate",
                key: name.to_string(),
            })
    }

    /// Sorted unique city names, for pickers and diagnostics.
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = self.records.iter().map(|r| r.city.as_str()).collect();
        cities.sort_unstable();
        cities.dedup();
        cities
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
