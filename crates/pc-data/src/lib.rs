//! pc-data: reference data store for the sizing engine.
//!
//! Two kinds of tables live here:
//! - Static catalogue data (vendor equipment, rack profiles, pod
//!   configurations, system-curve coefficients, physical constants),
//!   compiled in and read through lookup functions.
//! - External tables (climate records, chiller performance), loaded once at
//!   startup from JSON or YAML through typed serde rows. The row structs are
//!   the required-column contract: a missing field fails the load.
//!
//! Every lookup that can miss returns `DataError::NotFound` as a value.
//! Callers treat a miss as "insufficient data", not as a bug.

pub mod catalog;
pub mod chiller;
pub mod climate;
pub mod error;
pub mod store;

pub use catalog::{
    CduType, DEFAULT_CDU_MODEL, DEFAULT_CRAH_MODEL, PodType, RackCategory, RackCounts, RackProfile,
    SystemCurve, VendorEquipment, cdu_pump_curve, constants, equipment, nominal_capacity,
    pod_rack_counts, rack_profile, system_curve,
};
pub use chiller::{ChillerRow, ChillerTable, DEFAULT_CHILLER_MODEL};
pub use climate::{ClimateRecord, ClimateTable};
pub use error::{DataError, DataResult};
pub use store::DataStore;
