//! Chiller performance table.
//!
//! Rows are keyed by (model, outlet water temperature, ambient dry bulb).
//! The evaporator column is the chilled-water temperature rise used by the
//! CRAH flow calculations.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DataError, DataResult};

/// One chiller performance row. Renames carry the source column names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChillerRow {
    #[serde(rename = "Model")]
    pub model: String,
    /// Outlet water temperature, °C.
    #[serde(rename = "TWOUT")]
    pub outlet_temp_c: f64,
    /// Ambient dry-bulb temperature, °C.
    #[serde(rename = "TA")]
    pub ambient_temp_c: f64,
    #[serde(rename = "Cooling Capacity")]
    pub cooling_capacity_kw: f64,
    #[serde(rename = "Power Input")]
    pub power_input_kw: f64,
    #[serde(rename = "Fluid Flow Rate")]
    pub fluid_flow_l_s: f64,
    #[serde(rename = "Fluid Pressure Drop")]
    pub fluid_pressure_drop_kpa: f64,
    /// Evaporator temperature rise, °C.
    #[serde(rename = "Evaporator")]
    pub evaporator_rise_c: f64,
}

/// Chiller model assumed by the sizing chain.
pub const DEFAULT_CHILLER_MODEL: &str = "Vertiv 1MW";

/// Read-only chiller performance table.
#[derive(Debug, Clone, Default)]
pub struct ChillerTable {
    rows: Vec<ChillerRow>,
}

impl ChillerTable {
    pub fn from_rows(rows: Vec<ChillerRow>) -> Self {
        Self { rows }
    }

    pub fn load_json(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rows: Vec<ChillerRow> = serde_json::from_str(&content)?;
        Self::from_loaded(rows)
    }

    pub fn load_yaml(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rows: Vec<ChillerRow> = serde_yaml::from_str(&content)?;
        Self::from_loaded(rows)
    }

    fn from_loaded(rows: Vec<ChillerRow>) -> DataResult<Self> {
        if rows.is_empty() {
            return Err(DataError::EmptyTable { table: "chillers" });
        }
        info!(rows = rows.len(), "loaded chiller table");
        Ok(Self::from_rows(rows))
    }

    /// Evaporator (chilled-water) temperature rise for an exact
    /// (model, outlet temp, ambient temp) match.
    ///
    /// Tabulated temperatures are whole degrees; callers round the ambient
    /// dry bulb up before the lookup. When several rows match, the first in
    /// table order wins (provisional policy, see DESIGN.md).
    pub fn evaporator_rise(&self, model: &str, outlet_c: f64, ambient_c: f64) -> DataResult<f64> {
        self.rows
            .iter()
            .find(|r| {
                r.model == model && r.outlet_temp_c == outlet_c && r.ambient_temp_c == ambient_c
            })
            .map(|r| r.evaporator_rise_c)
            .ok_or_else(|| DataError::NotFound {
                table: "chillers",
                key: format!("{model} @ TWOUT {outlet_c} / TA {ambient_c}"),
            })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
