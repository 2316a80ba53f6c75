//! Liquid-side (TCS loop) calculations.

use pc_data::catalog::constants::{RHO_C_SECONDARY, TCS_LIQUID_CEILING_C};
use pc_data::{RackCategory, RackCounts, rack_profile};

use crate::error::{FormulaResult, domain};

/// Required liquid flow for one compute rack, LPM.
///
/// Quartic fit against TCS liquid temperature:
/// `−0.0007656·T⁴ + 0.11484·T³ − 6.18222·T² + 145.2726·T − 1205.82`
pub fn liquid_flow_per_rack(tcs_liquid_c: f64) -> f64 {
    -0.0007656 * tcs_liquid_c.powi(4) + 0.11484 * tcs_liquid_c.powi(3)
        - 6.18222 * tcs_liquid_c.powi(2)
        + 145.2726 * tcs_liquid_c
        - 1205.82
}

/// Required pod liquid flow, LPM. Only compute racks are liquid-cooled.
pub fn liquid_flow_per_pod(counts: &RackCounts, tcs_liquid_c: f64) -> f64 {
    liquid_flow_per_rack(tcs_liquid_c) * counts.compute as f64
}

/// Liquid cooling capacity of one pod, kW: the share of each rack's power
/// not removed by air.
pub fn liquid_cooling_capacity_per_pod(counts: &RackCounts) -> f64 {
    RackCategory::ALL
        .into_iter()
        .map(|c| rack_profile(c).liquid_capacity_kw() * counts.count(c) as f64)
        .sum()
}

/// Deliverable rack power under liquid cooling, kW.
///
/// `(44025 / (56.6 − T))^0.576`. The correlation is undefined at and above
/// the 56.6 °C ceiling, where the base goes to infinity and then negative.
pub fn rack_power_liquid_cooled(tcs_liquid_c: f64) -> FormulaResult<f64> {
    if tcs_liquid_c >= TCS_LIQUID_CEILING_C {
        return Err(domain("TCS liquid temperature at or above 56.6 °C"));
    }
    Ok((44025.0 / (TCS_LIQUID_CEILING_C - tcs_liquid_c)).powf(0.576))
}

/// Secondary (TCS) return temperature, °C.
///
/// `T_return = P_rack / (flow/60000) / ρc + T_supply`, flow in LPM.
pub fn secondary_return_temp(
    rack_power_kw: f64,
    liquid_flow_per_rack_lpm: f64,
    tcs_liquid_c: f64,
) -> FormulaResult<f64> {
    let flow_m3_s = liquid_flow_per_rack_lpm / 60000.0;
    if flow_m3_s <= f64::EPSILON {
        return Err(domain("liquid flow per rack collapsed to zero"));
    }
    Ok(rack_power_kw / flow_m3_s / RHO_C_SECONDARY + tcs_liquid_c)
}
