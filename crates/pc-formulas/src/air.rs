//! Air-side calculations: cooling capacity, airflow, temperature rise.

use pc_data::catalog::constants::AIRFLOW_SAFETY_MARGIN;
use pc_data::{RackCategory, RackCounts, rack_profile};

use crate::error::{FormulaResult, domain};

/// Required airflow per kW of air cooling, CFM/kW.
///
/// Cubic fit against supply temperature:
/// `0.0054667·T³ − 0.34·T² + 10.263333·T − 13`
pub fn airflow_per_kw(air_supply_c: f64) -> f64 {
    0.0054667 * air_supply_c.powi(3) - 0.34 * air_supply_c.powi(2) + 10.263333 * air_supply_c
        - 13.0
}

/// Airflow for one compute rack at the given supply temperature, CFM.
pub fn airflow_per_compute_rack(air_supply_c: f64) -> f64 {
    let profile = rack_profile(RackCategory::Compute);
    airflow_per_kw(air_supply_c) * profile.air_capacity_kw
}

/// Total required pod airflow, CFM, including the safety margin.
///
/// Compute racks scale with supply temperature; management and networking
/// racks contribute their fixed per-rack airflow.
pub fn airflow_per_pod(counts: &RackCounts, air_supply_c: f64) -> f64 {
    let mut total = airflow_per_compute_rack(air_supply_c) * counts.compute as f64;
    for category in [RackCategory::Management, RackCategory::Networking] {
        if let Some(cfm) = rack_profile(category).fixed_airflow_cfm {
            total += cfm * counts.count(category) as f64;
        }
    }
    total * AIRFLOW_SAFETY_MARGIN
}

/// Air cooling capacity of one pod, kW.
pub fn air_cooling_capacity_per_pod(counts: &RackCounts) -> f64 {
    RackCategory::ALL
        .into_iter()
        .map(|c| rack_profile(c).air_capacity_kw * counts.count(c) as f64)
        .sum()
}

/// Total IT power of one pod, kW.
pub fn total_power_per_pod(counts: &RackCounts) -> f64 {
    RackCategory::ALL
        .into_iter()
        .map(|c| rack_profile(c).power_kw * counts.count(c) as f64)
        .sum()
}

/// Air temperature rise across the racks, °C.
///
/// `rise = Q_air / 1.08 / (CFM × 0.00047194745)`; the inner constant
/// converts CFM to m³/s.
pub fn air_temp_rise(air_capacity_per_pod_kw: f64, airflow_per_pod_cfm: f64) -> FormulaResult<f64> {
    let flow_m3_s = airflow_per_pod_cfm * 0.00047194745;
    if flow_m3_s <= f64::EPSILON {
        return Err(domain("airflow per pod collapsed to zero"));
    }
    Ok(air_capacity_per_pod_kw / 1.08 / flow_m3_s)
}

/// Return-air temperature, °C.
pub fn air_return_temp(air_supply_c: f64, rise_c: f64) -> f64 {
    air_supply_c + rise_c
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_data::{PodType, pod_rack_counts};

    #[test]
    fn airflow_polynomial_at_20c() {
        // 0.0054667·8000 − 0.34·400 + 10.263333·20 − 13
        let expected = 0.0054667 * 8000.0 - 0.34 * 400.0 + 10.263333 * 20.0 - 13.0;
        assert!((airflow_per_kw(20.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn pod_airflow_288_at_20c() {
        // 4 compute racks at airflow_per_kw(20)·17.16, plus 2 management and
        // 3 networking racks at 3900 CFM each, times the 1.05 margin.
        let counts = pod_rack_counts(PodType::Gb200SuperPod288);
        let expected =
            (airflow_per_kw(20.0) * 17.16 * 4.0 + 3900.0 * 2.0 + 3900.0 * 3.0) * 1.05;
        assert!((airflow_per_pod(&counts, 20.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn capacities_for_288_pod() {
        let counts = pod_rack_counts(PodType::Gb200SuperPod288);
        // 17.16·4 + 30·2 + 30·3
        assert!((air_cooling_capacity_per_pod(&counts) - 218.64).abs() < 1e-9);
        // 132·4 + 30·2 + 30·3
        assert!((total_power_per_pod(&counts) - 678.0).abs() < 1e-9);
    }

    #[test]
    fn temp_rise_guards_zero_airflow() {
        assert!(air_temp_rise(600.0, 0.0).is_err());
        let rise = air_temp_rise(600.0, 50_000.0).unwrap();
        assert!(rise > 0.0);
        assert_eq!(air_return_temp(20.0, rise), 20.0 + rise);
    }
}
