//! pc-formulas: thermal/fluid formula library.
//!
//! Every function here is pure and deterministic. Functions whose
//! mathematical domain excludes part of the input space (divisions,
//! fractional powers) return `FormulaResult` and fail with
//! `FormulaError::Domain` instead of producing NaN or infinity; the rest
//! return plain values.
//!
//! Units follow the vendor correlations they were fitted in: temperatures
//! in °C, airflow in CFM, liquid flow in LPM, power and heat in kW.

pub mod air;
pub mod cdu;
pub mod crah;
pub mod envelope;
pub mod error;
pub mod liquid;

pub use error::{FormulaError, FormulaResult};
