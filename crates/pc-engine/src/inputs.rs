//! Input selections consumed by the orchestrator.

use pc_data::{CduType, PodType};
use serde::{Deserialize, Serialize};

use crate::error::FailureReason;

/// Identity of an engine input, as named in the input-provider contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputId {
    City,
    PodType,
    NumPods,
    CduType,
    AirSupplyTemp,
    TcsLiquidTemp,
    FwsAirTemp,
    FwsLiquidTemp,
}

impl InputId {
    pub const ALL: [InputId; 8] = [
        InputId::City,
        InputId::PodType,
        InputId::NumPods,
        InputId::CduType,
        InputId::AirSupplyTemp,
        InputId::TcsLiquidTemp,
        InputId::FwsAirTemp,
        InputId::FwsLiquidTemp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InputId::City => "city",
            InputId::PodType => "podType",
            InputId::NumPods => "numPods",
            InputId::CduType => "cduType",
            InputId::AirSupplyTemp => "airSupplyTempC",
            InputId::TcsLiquidTemp => "tcsLiquidTempC",
            InputId::FwsAirTemp => "fwsAirTempC",
            InputId::FwsLiquidTemp => "fwsLiquidTempC",
        }
    }
}

impl std::fmt::Display for InputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Current input selections. Every field starts unselected; reads through
/// the `require_*` accessors fail with `Unselected` until the provider has
/// chosen a value.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub(crate) city: Option<String>,
    pub(crate) pod_type: Option<PodType>,
    pub(crate) num_pods: Option<u32>,
    pub(crate) cdu_type: Option<CduType>,
    pub(crate) air_supply_temp_c: Option<f64>,
    pub(crate) tcs_liquid_temp_c: Option<f64>,
    pub(crate) fws_air_temp_c: Option<f64>,
    pub(crate) fws_liquid_temp_c: Option<f64>,
}

impl Inputs {
    pub fn require_city(&self) -> Result<&str, FailureReason> {
        self.city
            .as_deref()
            .ok_or(FailureReason::Unselected(InputId::City))
    }

    pub fn require_pod_type(&self) -> Result<PodType, FailureReason> {
        self.pod_type
            .ok_or(FailureReason::Unselected(InputId::PodType))
    }

    pub fn require_num_pods(&self) -> Result<u32, FailureReason> {
        self.num_pods
            .ok_or(FailureReason::Unselected(InputId::NumPods))
    }

    pub fn require_cdu_type(&self) -> Result<CduType, FailureReason> {
        self.cdu_type
            .ok_or(FailureReason::Unselected(InputId::CduType))
    }

    pub fn require_air_supply_temp_c(&self) -> Result<f64, FailureReason> {
        self.air_supply_temp_c
            .ok_or(FailureReason::Unselected(InputId::AirSupplyTemp))
    }

    pub fn require_tcs_liquid_temp_c(&self) -> Result<f64, FailureReason> {
        self.tcs_liquid_temp_c
            .ok_or(FailureReason::Unselected(InputId::TcsLiquidTemp))
    }

    pub fn require_fws_air_temp_c(&self) -> Result<f64, FailureReason> {
        self.fws_air_temp_c
            .ok_or(FailureReason::Unselected(InputId::FwsAirTemp))
    }

    pub fn require_fws_liquid_temp_c(&self) -> Result<f64, FailureReason> {
        self.fws_liquid_temp_c
            .ok_or(FailureReason::Unselected(InputId::FwsLiquidTemp))
    }
}
