//! CDU sizing and primary/secondary flow splits.

use pc_data::catalog::constants::{PRIMARY_DELTA_TEMP_C, RHO_C_PRIMARY, RHO_C_SECONDARY};

use crate::error::{FormulaResult, domain};

/// Number of CDUs for a pod.
///
/// Sized by whichever constraint binds — heat load against nominal capacity
/// or flow against the per-unit secondary-flow limit — plus one redundant
/// unit. The +1 is mandatory: any positive load yields at least 2.
pub fn cdu_count(
    liquid_capacity_kw: f64,
    required_flow_lpm: f64,
    nominal_capacity_kw: f64,
    max_secondary_flow_lpm: f64,
) -> FormulaResult<u32> {
    if nominal_capacity_kw <= 0.0 {
        return Err(domain("nominal CDU capacity must be positive"));
    }
    if max_secondary_flow_lpm <= 0.0 {
        return Err(domain("max secondary flow per CDU must be positive"));
    }
    let by_capacity = (liquid_capacity_kw / nominal_capacity_kw).ceil() as u32;
    let by_flow = (required_flow_lpm / max_secondary_flow_lpm).ceil() as u32;
    Ok(by_capacity.max(by_flow) + 1)
}

/// Secondary flow handled by each CDU, LPM.
pub fn secondary_flow_per_cdu(required_flow_lpm: f64, cdu_count: u32) -> FormulaResult<f64> {
    if cdu_count == 0 {
        return Err(domain("CDU count is zero"));
    }
    Ok(required_flow_lpm / cdu_count as f64)
}

/// Heat load per CDU, kW.
pub fn q_per_cdu(liquid_capacity_kw: f64, cdu_count: u32) -> FormulaResult<f64> {
    if cdu_count == 0 {
        return Err(domain("CDU count is zero"));
    }
    Ok(liquid_capacity_kw / cdu_count as f64)
}

/// Primary-loop flow per CDU, LPM: `(Q / Δt / ρc) × 60000`.
pub fn primary_flow_per_cdu(q_per_cdu_kw: f64) -> f64 {
    q_per_cdu_kw / PRIMARY_DELTA_TEMP_C / RHO_C_PRIMARY * 60000.0
}

/// Primary-loop flow for the whole pod, LPM.
pub fn primary_flow_per_pod(primary_flow_per_cdu_lpm: f64, cdu_count: u32) -> f64 {
    primary_flow_per_cdu_lpm * cdu_count as f64
}

/// Maximum transferable heat per CDU, kW, limited by the smaller of the two
/// loop flows and the approach between secondary return and primary supply.
pub fn q_max_per_cdu(
    secondary_flow_lpm: f64,
    primary_flow_lpm: f64,
    secondary_return_c: f64,
    primary_supply_c: f64,
) -> f64 {
    let min_flow = secondary_flow_lpm.min(primary_flow_lpm);
    RHO_C_SECONDARY * min_flow / 60000.0 * (secondary_return_c - primary_supply_c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redundancy_gives_lower_bound_of_two() {
        // Exactly one XDU1350 worth of load and flow: max(1, 1) + 1 = 2.
        assert_eq!(cdu_count(1367.0, 1200.0, 1367.0, 1200.0).unwrap(), 2);
        // Barely over on the flow side: max(1, 2) + 1 = 3.
        assert_eq!(cdu_count(1000.0, 1201.0, 1367.0, 1200.0).unwrap(), 3);
    }

    #[test]
    fn count_guards_bad_ratings() {
        assert!(cdu_count(500.0, 500.0, 0.0, 1200.0).is_err());
        assert!(cdu_count(500.0, 500.0, 1367.0, -1.0).is_err());
    }

    #[test]
    fn flow_splits() {
        assert_eq!(secondary_flow_per_cdu(1200.0, 3).unwrap(), 400.0);
        assert_eq!(q_per_cdu(900.0, 3).unwrap(), 300.0);
        assert!(secondary_flow_per_cdu(1200.0, 0).is_err());
    }

    #[test]
    fn primary_flow_round_trip() {
        let per_cdu = primary_flow_per_cdu(300.0);
        // 300 / 10 / 4170 × 60000
        assert!((per_cdu - 431.654676).abs() < 1e-5);
        assert!((primary_flow_per_pod(per_cdu, 3) - per_cdu * 3.0).abs() < 1e-12);
    }

    #[test]
    fn q_max_uses_limiting_flow() {
        let q = q_max_per_cdu(400.0, 300.0, 45.0, 35.0);
        assert!((q - RHO_C_SECONDARY * 300.0 / 60000.0 * 10.0).abs() < 1e-9);
    }
}
