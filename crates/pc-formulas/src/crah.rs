//! CRAH sizing, chilled-water flow, and fan affinity scaling.

use pc_data::CduType;
use pc_data::catalog::constants::{
    CRAH_REFERENCE_CFM, CRAH_REFERENCE_POWER_KW, REFERENCE_RPM_FRACTION, WATER_RHO_CP,
};

use crate::error::{FormulaResult, domain};

/// Number of CRAHs needed to absorb the pod's air-side load.
pub fn crah_count(air_capacity_per_pod_kw: f64, crah_capacity_kw: f64) -> FormulaResult<u32> {
    if crah_capacity_kw <= 0.0 {
        return Err(domain("CRAH net capacity must be positive"));
    }
    Ok((air_capacity_per_pod_kw / crah_capacity_kw).ceil() as u32)
}

/// Heat load per CRAH, kW.
///
/// With liquid-to-liquid CDUs the CRAHs see only the air-side load; with
/// liquid-to-air CDUs they absorb the full pod power.
pub fn q_per_crah(
    cdu_type: CduType,
    air_capacity_per_pod_kw: f64,
    total_power_per_pod_kw: f64,
    crah_count: u32,
) -> FormulaResult<f64> {
    if crah_count == 0 {
        return Err(domain("CRAH count is zero"));
    }
    let load = match cdu_type {
        CduType::LiquidToLiquid => air_capacity_per_pod_kw,
        CduType::LiquidToAir => total_power_per_pod_kw,
    };
    Ok(load / crah_count as f64)
}

/// Air-cooled heat per pod, kW, by CDU arrangement.
pub fn q_ac_per_pod(
    cdu_type: CduType,
    air_capacity_per_pod_kw: f64,
    total_power_per_pod_kw: f64,
) -> f64 {
    match cdu_type {
        CduType::LiquidToLiquid => air_capacity_per_pod_kw,
        CduType::LiquidToAir => total_power_per_pod_kw,
    }
}

/// Chilled-water flow through one CRAH, LPM:
/// `(Q / (rise × ρc)) × 60000`.
pub fn chilled_water_flow_per_crah(q_per_crah_kw: f64, water_rise_c: f64) -> FormulaResult<f64> {
    if water_rise_c.abs() <= f64::EPSILON {
        return Err(domain("chilled-water temperature rise collapsed to zero"));
    }
    Ok(q_per_crah_kw / (water_rise_c * WATER_RHO_CP) * 60000.0)
}

/// Chilled-water flow for the pod, LPM.
pub fn chilled_water_flow_per_pod(flow_per_crah_lpm: f64, crah_count: u32) -> f64 {
    flow_per_crah_lpm * crah_count as f64
}

/// Fan speed fraction at the required per-CRAH airflow (affinity law,
/// flow ∝ speed).
pub fn fan_rpm_fraction(cfm_per_crah: f64) -> f64 {
    cfm_per_crah / CRAH_REFERENCE_CFM * REFERENCE_RPM_FRACTION
}

/// Fan power at the scaled speed, kW (affinity law, power ∝ speed³).
pub fn fan_power_kw(rpm_fraction: f64) -> f64 {
    (rpm_fraction / REFERENCE_RPM_FRACTION).powi(3) * CRAH_REFERENCE_POWER_KW
}
