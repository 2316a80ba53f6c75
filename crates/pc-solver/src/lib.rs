//! pc-solver: curve-intersection solver for CDU pump sizing.
//!
//! Finds where the CDU's native pump curve meets the facility system curve,
//! then scales speed and power to the actual operating flow with the pump
//! affinity laws.

pub mod error;
pub mod operating_point;
pub mod quadratic;

pub use error::{SolverError, SolverResult};
pub use operating_point::{
    PumpOperatingPoint, pump_operating_point, pump_power_at_speed, pump_power_per_pod,
    reference_flow, scale_to_flow,
};
pub use quadratic::{Quadratic, QuadraticRoots};
