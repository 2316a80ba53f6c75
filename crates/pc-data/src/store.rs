//! Combined reference data store.

use std::path::Path;

use crate::catalog::{self, PodType, RackCategory, RackCounts, RackProfile, SystemCurve};
use crate::chiller::ChillerTable;
use crate::climate::{ClimateRecord, ClimateTable};
use crate::error::DataResult;

/// All reference tables behind one handle.
///
/// Loaded once at startup and immutable afterwards; share it across engine
/// instances with `Arc` — no locking is needed because nothing here mutates.
#[derive(Debug, Clone)]
pub struct DataStore {
    climate: ClimateTable,
    chillers: ChillerTable,
}

impl DataStore {
    pub fn new(climate: ClimateTable, chillers: ChillerTable) -> Self {
        Self { climate, chillers }
    }

    /// Load both external tables from JSON files.
    pub fn load_json(climate_path: &Path, chillers_path: &Path) -> DataResult<Self> {
        Ok(Self {
            climate: ClimateTable::load_json(climate_path)?,
            chillers: ChillerTable::load_json(chillers_path)?,
        })
    }

    /// Load both external tables from YAML files.
    pub fn load_yaml(climate_path: &Path, chillers_path: &Path) -> DataResult<Self> {
        Ok(Self {
            climate: ClimateTable::load_yaml(climate_path)?,
            chillers: ChillerTable::load_yaml(chillers_path)?,
        })
    }

    pub fn climate(&self) -> &ClimateTable {
        &self.climate
    }

    pub fn chillers(&self) -> &ChillerTable {
        &self.chillers
    }

    // Static catalogue pass-throughs, so callers need only one handle.

    pub fn rack_profile(&self, category: RackCategory) -> RackProfile {
        catalog::rack_profile(category)
    }

    pub fn pod_rack_counts(&self, pod_type: PodType) -> RackCounts {
        catalog::pod_rack_counts(pod_type)
    }

    pub fn system_curve(&self, pod_type: PodType, cdu_count: u32) -> DataResult<SystemCurve> {
        catalog::system_curve(pod_type, cdu_count)
    }

    pub fn nominal_capacity(&self, model: &str) -> DataResult<f64> {
        catalog::nominal_capacity(model)
    }

    pub fn climate_record(&self, city: &str) -> DataResult<&ClimateRecord> {
        self.climate.city(city)
    }

    /// Chilled-water temperature rise: chiller-table lookup keyed by outlet
    /// temperature and rounded-up ambient dry bulb.
    pub fn evaporator_rise(&self, model: &str, outlet_c: f64, dry_bulb_c: f64) -> DataResult<f64> {
        self.chillers
            .evaporator_rise(model, outlet_c, dry_bulb_c.ceil())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chiller::{ChillerRow, DEFAULT_CHILLER_MODEL};

    fn store() -> DataStore {
        let climate = ClimateTable::from_records(vec![ClimateRecord {
            region: "NA".into(),
            country: "USA".into(),
            state: Some("TX".into()),
            city: "Dallas".into(),
            dry_bulb_c: 37.3,
            wet_bulb_c: 26.0,
            dew_point_c: 24.0,
            humidity_ratio: 0.012,
        }]);
        let chillers = ChillerTable::from_rows(vec![ChillerRow {
            model: DEFAULT_CHILLER_MODEL.into(),
            outlet_temp_c: 12.0,
            ambient_temp_c: 38.0,
            cooling_capacity_kw: 1000.0,
            power_input_kw: 320.0,
            fluid_flow_l_s: 43.0,
            fluid_pressure_drop_kpa: 55.0,
            evaporator_rise_c: 5.6,
        }]);
        DataStore::new(climate, chillers)
    }

    #[test]
    fn evaporator_rise_rounds_ambient_up() {
        let store = store();
        // Dry bulb 37.3 rounds up to the tabulated 38.
        let rise = store
            .evaporator_rise(DEFAULT_CHILLER_MODEL, 12.0, 37.3)
            .unwrap();
        assert_eq!(rise, 5.6);
    }

    #[test]
    fn catalogue_lookups_through_store() {
        let store = store();
        assert_eq!(store.pod_rack_counts(PodType::Gb200SuperPod288).compute, 4);
        assert!(store.nominal_capacity("XDU1350").is_ok());
        assert!(store.climate_record("Dallas").is_ok());
        assert!(store.climate_record("Nowhere").is_err());
    }
}
