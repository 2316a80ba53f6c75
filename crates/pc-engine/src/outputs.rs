//! Derived outputs and their declared dependencies.
//!
//! The dependency table here is the single source of truth for
//! invalidation: a compute rule may only read inputs and outputs its entry
//! declares, otherwise a change could leave it stale without the engine
//! noticing.

use serde::{Deserialize, Serialize};

use crate::error::FailureReason;
use crate::inputs::InputId;

/// Every derived quantity the engine publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputId {
    // Climate chain
    DryBulb,
    WetBulb,
    DewPoint,
    HumidityRatio,
    // Pod totals
    TotalPowerPerPod,
    TotalPower,
    AirCoolingCapacityPerPod,
    LiquidCoolingCapacityPerPod,
    // Flow requirements
    AirflowPerPod,
    LiquidFlowPerPod,
    // CDU chain
    CduCount,
    SecondaryFlowPerCdu,
    QPerCdu,
    PrimaryFlowPerCdu,
    PrimaryFlowPerPod,
    RackPowerLiquidCooled,
    SecondaryReturnTemp,
    QMaxPerCdu,
    // Air chain
    AirTempRise,
    AirReturnTemp,
    CrahCount,
    QPerCrah,
    QAcPerPod,
    ChilledWaterRise,
    ChilledWaterFlowPerCrah,
    ChilledWaterFlowPerPod,
    CrahFanRpm,
    CrahFanPowerPerCrah,
    // CDU pump chain
    PumpRefFlow,
    PumpRpm,
    PumpPowerPerCdu,
    PumpPowerPerPod,
}

/// One edge of the dependency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dep {
    In(InputId),
    Out(OutputId),
}

use Dep::{In, Out};
use InputId as I;
use OutputId as O;

impl OutputId {
    pub const ALL: [OutputId; 32] = [
        O::DryBulb,
        O::WetBulb,
        O::DewPoint,
        O::HumidityRatio,
        O::TotalPowerPerPod,
        O::TotalPower,
        O::AirCoolingCapacityPerPod,
        O::LiquidCoolingCapacityPerPod,
        O::AirflowPerPod,
        O::LiquidFlowPerPod,
        O::CduCount,
        O::SecondaryFlowPerCdu,
        O::QPerCdu,
        O::PrimaryFlowPerCdu,
        O::PrimaryFlowPerPod,
        O::RackPowerLiquidCooled,
        O::SecondaryReturnTemp,
        O::QMaxPerCdu,
        O::AirTempRise,
        O::AirReturnTemp,
        O::CrahCount,
        O::QPerCrah,
        O::QAcPerPod,
        O::ChilledWaterRise,
        O::ChilledWaterFlowPerCrah,
        O::ChilledWaterFlowPerPod,
        O::CrahFanRpm,
        O::CrahFanPowerPerCrah,
        O::PumpRefFlow,
        O::PumpRpm,
        O::PumpPowerPerCdu,
        O::PumpPowerPerPod,
    ];

    /// Declared dependencies: the inputs and upstream outputs this output's
    /// compute rule reads.
    pub fn deps(&self) -> &'static [Dep] {
        match self {
            O::DryBulb | O::WetBulb | O::DewPoint | O::HumidityRatio => &[In(I::City)],

            O::TotalPowerPerPod | O::AirCoolingCapacityPerPod | O::LiquidCoolingCapacityPerPod => {
                &[In(I::PodType)]
            }
            O::TotalPower => &[Out(O::TotalPowerPerPod), In(I::NumPods)],

            O::AirflowPerPod => &[In(I::PodType), In(I::AirSupplyTemp)],
            O::LiquidFlowPerPod => &[In(I::PodType), In(I::TcsLiquidTemp)],

            O::CduCount => &[Out(O::LiquidCoolingCapacityPerPod), Out(O::LiquidFlowPerPod)],
            O::SecondaryFlowPerCdu => &[Out(O::LiquidFlowPerPod), Out(O::CduCount)],
            O::QPerCdu => &[Out(O::LiquidCoolingCapacityPerPod), Out(O::CduCount)],
            O::PrimaryFlowPerCdu => &[Out(O::QPerCdu)],
            O::PrimaryFlowPerPod => &[Out(O::PrimaryFlowPerCdu), Out(O::CduCount)],
            O::RackPowerLiquidCooled => &[In(I::TcsLiquidTemp)],
            O::SecondaryReturnTemp => &[Out(O::RackPowerLiquidCooled), In(I::TcsLiquidTemp)],
            O::QMaxPerCdu => &[
                Out(O::SecondaryFlowPerCdu),
                Out(O::PrimaryFlowPerCdu),
                Out(O::SecondaryReturnTemp),
                In(I::FwsLiquidTemp),
            ],

            O::AirTempRise => &[Out(O::AirCoolingCapacityPerPod), Out(O::AirflowPerPod)],
            O::AirReturnTemp => &[In(I::AirSupplyTemp), Out(O::AirTempRise)],
            O::CrahCount => &[Out(O::AirCoolingCapacityPerPod)],
            O::QPerCrah => &[
                In(I::CduType),
                Out(O::AirCoolingCapacityPerPod),
                Out(O::TotalPowerPerPod),
                Out(O::CrahCount),
            ],
            O::QAcPerPod => &[
                In(I::CduType),
                Out(O::AirCoolingCapacityPerPod),
                Out(O::TotalPowerPerPod),
            ],
            O::ChilledWaterRise => &[In(I::FwsAirTemp), Out(O::DryBulb)],
            O::ChilledWaterFlowPerCrah => &[Out(O::QPerCrah), Out(O::ChilledWaterRise)],
            O::ChilledWaterFlowPerPod => &[Out(O::ChilledWaterFlowPerCrah), Out(O::CrahCount)],
            O::CrahFanRpm => &[Out(O::AirflowPerPod), Out(O::CrahCount)],
            O::CrahFanPowerPerCrah => &[Out(O::CrahFanRpm)],

            O::PumpRefFlow => &[In(I::PodType), Out(O::CduCount)],
            O::PumpRpm => &[
                In(I::PodType),
                Out(O::CduCount),
                Out(O::SecondaryFlowPerCdu),
                Out(O::PumpRefFlow),
            ],
            O::PumpPowerPerCdu => &[Out(O::PumpRpm)],
            O::PumpPowerPerPod => &[Out(O::PumpPowerPerCdu), Out(O::CduCount)],
        }
    }

    /// Published name, as seen by the output sink.
    pub fn name(&self) -> &'static str {
        match self {
            O::DryBulb => "dryBulbC",
            O::WetBulb => "wetBulbC",
            O::DewPoint => "dewPointC",
            O::HumidityRatio => "humidityRatio",
            O::TotalPowerPerPod => "totalPowerPerPodKw",
            O::TotalPower => "totalPowerKw",
            O::AirCoolingCapacityPerPod => "airCoolingCapacityPerPodKw",
            O::LiquidCoolingCapacityPerPod => "liquidCoolingCapacityPerPodKw",
            O::AirflowPerPod => "airflowPerPodCfm",
            O::LiquidFlowPerPod => "liquidFlowPerPodLpm",
            O::CduCount => "cduCount",
            O::SecondaryFlowPerCdu => "secondaryFlowPerCduLpm",
            O::QPerCdu => "qPerCduKw",
            O::PrimaryFlowPerCdu => "primaryFlowPerCduLpm",
            O::PrimaryFlowPerPod => "primaryFlowPerPodLpm",
            O::RackPowerLiquidCooled => "rackPowerLiquidCooledKw",
            O::SecondaryReturnTemp => "secondaryReturnTempC",
            O::QMaxPerCdu => "qMaxPerCduKw",
            O::AirTempRise => "airTempRiseC",
            O::AirReturnTemp => "airReturnTempC",
            O::CrahCount => "crahCount",
            O::QPerCrah => "qPerCrahKw",
            O::QAcPerPod => "qAcPerPodKw",
            O::ChilledWaterRise => "chilledWaterRiseC",
            O::ChilledWaterFlowPerCrah => "chilledWaterFlowPerCrahLpm",
            O::ChilledWaterFlowPerPod => "chilledWaterFlowPerPodLpm",
            O::CrahFanRpm => "crahFanRpmFraction",
            O::CrahFanPowerPerCrah => "crahFanPowerPerCrahKw",
            O::PumpRefFlow => "pumpRefFlowLpm",
            O::PumpRpm => "pumpRpmFraction",
            O::PumpPowerPerCdu => "pumpPowerPerCduKw",
            O::PumpPowerPerPod => "pumpPowerPerPodKw",
        }
    }
}

impl std::fmt::Display for OutputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle state of one derived output.
///
/// `Unset → Computed/Error` on first evaluation; any state → `Stale` when
/// an upstream input or output changes; `Stale → Computed/Error` on the
/// recompute pass. There is no terminal state.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputState {
    Unset,
    Stale,
    Computed(f64),
    Error(FailureReason),
}

impl OutputState {
    pub fn value(&self) -> Option<f64> {
        match self {
            OutputState::Computed(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, OutputState::Computed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_output_is_registered_once() {
        for (i, a) in OutputId::ALL.iter().enumerate() {
            for b in &OutputId::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn every_output_depends_on_something() {
        for id in OutputId::ALL {
            assert!(!id.deps().is_empty(), "{id} has no declared dependencies");
        }
    }

    #[test]
    fn declared_upstream_outputs_exist() {
        for id in OutputId::ALL {
            for dep in id.deps() {
                if let Dep::Out(up) = dep {
                    assert!(OutputId::ALL.contains(up));
                }
            }
        }
    }
}
