//! Affinity-law pump operating point.

use pc_data::catalog::constants::{CDU_REFERENCE_PUMP_POWER_KW, REFERENCE_RPM_FRACTION};
use tracing::debug;

use crate::error::{SolverError, SolverResult};
use crate::quadratic::Quadratic;

/// Resolved CDU pump operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpOperatingPoint {
    /// Flow where the CDU pump curve meets the facility system curve, LPM.
    pub reference_flow_lpm: f64,
    /// Differential pressure on the system curve at the reference flow.
    pub dp_reference: f64,
    /// Differential pressure at the actual per-CDU flow.
    pub dp_actual: f64,
    /// Speed fraction after affinity scaling: `rpm1 · sqrt(dp_actual/dp_ref)`.
    pub rpm_fraction: f64,
    /// Pump power at the scaled speed, kW: `(rpm2/rpm1)³ · P_ref`.
    pub pump_power_kw: f64,
}

/// Flow where the CDU pump curve meets the facility system curve, LPM.
///
/// The larger root of the difference curve is authoritative: it is the
/// physically meaningful higher-flow intersection. A root set that is
/// entirely negative means the curves only meet at impossible flows and is
/// reported as `NoRealIntersection`.
pub fn reference_flow(
    cdu_curve: &Quadratic,
    facility_curve: &Quadratic,
) -> SolverResult<f64> {
    let roots = cdu_curve.difference(facility_curve).roots()?;
    if roots.high < 0.0 {
        return Err(SolverError::NoRealIntersection {
            discriminant: roots.discriminant,
        });
    }
    Ok(roots.high)
}

/// Scale the pump from a known reference flow to the actual operating flow.
///
/// Pure affinity arithmetic on the facility curve; no root solving, so the
/// intersection can be found once and reused for any number of flows.
pub fn scale_to_flow(
    facility_curve: &Quadratic,
    reference_flow_lpm: f64,
    actual_flow_lpm: f64,
) -> SolverResult<PumpOperatingPoint> {
    if !actual_flow_lpm.is_finite() {
        return Err(SolverError::NonFinite {
            what: "actual per-CDU flow",
        });
    }

    let dp_reference = facility_curve.eval(reference_flow_lpm);
    let dp_actual = facility_curve.eval(actual_flow_lpm);
    if dp_reference <= 0.0 {
        return Err(SolverError::Degenerate {
            what: "system curve non-positive at reference flow",
        });
    }
    let dp_ratio = dp_actual / dp_reference;
    if dp_ratio < 0.0 {
        return Err(SolverError::Degenerate {
            what: "negative pressure ratio at operating flow",
        });
    }

    let rpm_fraction = REFERENCE_RPM_FRACTION * dp_ratio.sqrt();
    let pump_power_kw = pump_power_at_speed(rpm_fraction);

    debug!(
        reference_flow_lpm,
        dp_reference, dp_actual, rpm_fraction, "resolved pump operating point"
    );

    Ok(PumpOperatingPoint {
        reference_flow_lpm,
        dp_reference,
        dp_actual,
        rpm_fraction,
        pump_power_kw,
    })
}

/// Intersect the CDU pump curve with the facility system curve and scale the
/// pump to the actual operating flow.
pub fn pump_operating_point(
    cdu_curve: &Quadratic,
    facility_curve: &Quadratic,
    actual_flow_lpm: f64,
) -> SolverResult<PumpOperatingPoint> {
    let reference = reference_flow(cdu_curve, facility_curve)?;
    scale_to_flow(facility_curve, reference, actual_flow_lpm)
}

/// Pump power at the scaled speed, kW (affinity law, power ∝ speed³).
pub fn pump_power_at_speed(rpm_fraction: f64) -> f64 {
    (rpm_fraction / REFERENCE_RPM_FRACTION).powi(3) * CDU_REFERENCE_PUMP_POWER_KW
}

/// Pod-level pump power: per-CDU power times the CDU count.
pub fn pump_power_per_pod(pump_power_kw: f64, cdu_count: u32) -> f64 {
    pump_power_kw * cdu_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_data::{PodType, cdu_pump_curve, system_curve};

    fn commissioned_curves() -> (Quadratic, Quadratic) {
        let cdu = Quadratic::from(cdu_pump_curve());
        let facility = Quadratic::from(system_curve(PodType::Gb200SuperPod576, 2).unwrap());
        (cdu, facility)
    }

    #[test]
    fn reference_flow_is_larger_root() {
        let (cdu, facility) = commissioned_curves();
        let roots = cdu.difference(&facility).roots().unwrap();
        let point = pump_operating_point(&cdu, &facility, 400.0).unwrap();
        assert_eq!(point.reference_flow_lpm, roots.high);
        assert!(point.reference_flow_lpm > 0.0);
    }

    #[test]
    fn at_reference_flow_pump_runs_at_reference_power() {
        let (cdu, facility) = commissioned_curves();
        let reference = reference_flow(&cdu, &facility).unwrap();
        let at_ref = scale_to_flow(&facility, reference, reference).unwrap();
        assert!((at_ref.rpm_fraction - 1.0).abs() < 1e-9);
        assert!((at_ref.pump_power_kw - CDU_REFERENCE_PUMP_POWER_KW).abs() < 1e-6);
    }

    #[test]
    fn split_solve_matches_combined_solve() {
        let (cdu, facility) = commissioned_curves();
        let combined = pump_operating_point(&cdu, &facility, 275.0).unwrap();
        let reference = reference_flow(&cdu, &facility).unwrap();
        let split = scale_to_flow(&facility, reference, 275.0).unwrap();
        assert_eq!(combined, split);
        assert_eq!(
            split.pump_power_kw,
            pump_power_at_speed(split.rpm_fraction)
        );
    }

    #[test]
    fn lower_flow_costs_less_power() {
        let (cdu, facility) = commissioned_curves();
        let full = pump_operating_point(&cdu, &facility, 400.0).unwrap();
        let half = pump_operating_point(&cdu, &facility, 200.0).unwrap();
        assert!(half.pump_power_kw < full.pump_power_kw);
        assert_eq!(pump_power_per_pod(full.pump_power_kw, 3), full.pump_power_kw * 3.0);
    }

    #[test]
    fn no_intersection_reported() {
        // Pump curve entirely below the facility curve: the difference has
        // no real roots.
        let cdu = Quadratic::new(-1.0, 0.0, -10.0);
        let facility = Quadratic::new(1.0, 0.0, 10.0);
        let err = pump_operating_point(&cdu, &facility, 100.0).unwrap_err();
        assert!(matches!(err, SolverError::NoRealIntersection { .. }));
    }

    #[test]
    fn negative_only_roots_reported_as_no_intersection() {
        // Difference (x+1)(x+2) = x² + 3x + 2: roots −1 and −2.
        let cdu = Quadratic::new(1.0, 3.0, 2.0);
        let facility = Quadratic::new(0.0, 0.0, 0.0);
        let err = pump_operating_point(&cdu, &facility, 100.0).unwrap_err();
        assert!(matches!(err, SolverError::NoRealIntersection { .. }));
    }

    #[test]
    fn non_finite_flow_rejected() {
        let (cdu, facility) = commissioned_curves();
        assert!(matches!(
            pump_operating_point(&cdu, &facility, f64::NAN),
            Err(SolverError::NonFinite { .. })
        ));
    }
}
