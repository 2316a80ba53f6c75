//! The sizing engine: input selections in, derived result set out.

use std::collections::HashMap;
use std::sync::Arc;

use pc_core::ensure_finite;
use pc_data::catalog::constants::MAX_SECONDARY_FLOW_PER_CDU_LPM;
use pc_data::{
    CduType, DEFAULT_CDU_MODEL, DEFAULT_CHILLER_MODEL, DEFAULT_CRAH_MODEL, DataStore, PodType,
    RackCounts, cdu_pump_curve,
};
use pc_formulas::envelope::{self, EconomizerOptions};
use pc_formulas::{air, cdu, crah, liquid};
use pc_solver::{Quadratic, pump_power_at_speed, pump_power_per_pod, reference_flow, scale_to_flow};
use tracing::debug;

use crate::error::{EngineResult, FailureReason};
use crate::graph::DependencyGraph;
use crate::inputs::{InputId, Inputs};
use crate::outputs::{OutputId, OutputState};

/// Calculation orchestrator.
///
/// Holds the current input selections and one [`OutputState`] per derived
/// output. Every setter marks the downstream closure of the changed input
/// stale, then recomputes exactly that closure in topological order, so a
/// single input change costs a single pass over its dependents.
pub struct Engine {
    store: Arc<DataStore>,
    graph: DependencyGraph,
    inputs: Inputs,
    states: HashMap<OutputId, OutputState>,
    crah_model: &'static str,
}

impl Engine {
    pub fn new(store: Arc<DataStore>) -> EngineResult<Self> {
        let graph = DependencyGraph::build()?;
        let states = OutputId::ALL
            .iter()
            .map(|id| (*id, OutputState::Unset))
            .collect();
        Ok(Self {
            store,
            graph,
            inputs: Inputs::default(),
            states,
            crah_model: DEFAULT_CRAH_MODEL,
        })
    }

    /// Size against a different catalogue CRAH model.
    pub fn with_crah_model(mut self, model: &'static str) -> Self {
        self.crah_model = model;
        self
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    // Input setters. Each triggers one invalidate-and-recompute pass.

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.inputs.city = Some(city.into());
        self.on_input_changed(InputId::City);
    }

    pub fn set_pod_type(&mut self, pod_type: PodType) {
        self.inputs.pod_type = Some(pod_type);
        self.on_input_changed(InputId::PodType);
    }

    pub fn set_num_pods(&mut self, num_pods: u32) {
        self.inputs.num_pods = Some(num_pods);
        self.on_input_changed(InputId::NumPods);
    }

    pub fn set_cdu_type(&mut self, cdu_type: CduType) {
        self.inputs.cdu_type = Some(cdu_type);
        self.on_input_changed(InputId::CduType);
    }

    pub fn set_air_supply_temp_c(&mut self, temp_c: f64) {
        self.inputs.air_supply_temp_c = Some(temp_c);
        self.on_input_changed(InputId::AirSupplyTemp);
    }

    pub fn set_tcs_liquid_temp_c(&mut self, temp_c: f64) {
        self.inputs.tcs_liquid_temp_c = Some(temp_c);
        self.on_input_changed(InputId::TcsLiquidTemp);
    }

    pub fn set_fws_air_temp_c(&mut self, temp_c: f64) {
        self.inputs.fws_air_temp_c = Some(temp_c);
        self.on_input_changed(InputId::FwsAirTemp);
    }

    pub fn set_fws_liquid_temp_c(&mut self, temp_c: f64) {
        self.inputs.fws_liquid_temp_c = Some(temp_c);
        self.on_input_changed(InputId::FwsLiquidTemp);
    }

    /// Current state of one output.
    pub fn state(&self, id: OutputId) -> &OutputState {
        static UNSET: OutputState = OutputState::Unset;
        self.states.get(&id).unwrap_or(&UNSET)
    }

    /// Computed value of one output, when there is one.
    pub fn value(&self, id: OutputId) -> Option<f64> {
        self.state(id).value()
    }

    /// Mark every output stale and recompute the full set.
    pub fn recompute_all(&mut self) {
        let order: Vec<OutputId> = self.graph.order().to_vec();
        for id in &order {
            self.states.insert(*id, OutputState::Stale);
        }
        self.recompute(&order);
    }

    /// Heat-rejection recommendation for the liquid FWS loop at the
    /// selected site. Not part of the numeric output set.
    pub fn economizer_options(&self) -> Result<EconomizerOptions, FailureReason> {
        let fws_liquid_c = self.inputs.require_fws_liquid_temp_c()?;
        let record = self.store.climate_record(self.inputs.require_city()?)?;
        Ok(envelope::economizer_options(
            fws_liquid_c,
            record.dry_bulb_c,
            record.wet_bulb_c,
        ))
    }

    fn on_input_changed(&mut self, input: InputId) {
        let stale = self.graph.downstream_of_input(input);
        for id in &stale {
            self.states.insert(*id, OutputState::Stale);
        }
        debug!(%input, outputs = stale.len(), "input changed, recomputing closure");
        self.recompute(&stale);
    }

    /// Recompute the given outputs, which must already be in evaluation
    /// order with every stale upstream included.
    fn recompute(&mut self, order: &[OutputId]) {
        for id in order {
            // Published values are always finite; a NaN or infinity that
            // slipped past the formula guards becomes a domain error here.
            let state = match self
                .evaluate(*id)
                .and_then(|v| {
                    ensure_finite(v, id.name()).map_err(|err| FailureReason::Domain {
                        what: err.to_string(),
                    })
                }) {
                Ok(value) => OutputState::Computed(value),
                Err(reason) => OutputState::Error(reason),
            };
            self.states.insert(*id, state);
        }
    }

    /// Value of an upstream output, as seen from a compute rule.
    ///
    /// An `Unset` upstream is evaluated on demand: selecting a downstream
    /// input before the inputs feeding the upstream puts dependents in the
    /// recompute closure while the upstream has never run, and the dependent
    /// must still surface the upstream's real reason (usually `Unselected`).
    /// `Stale` would mean the rule read something its entry in the
    /// dependency table does not declare.
    fn dep(&self, id: OutputId) -> Result<f64, FailureReason> {
        match self.state(id) {
            OutputState::Computed(value) => Ok(*value),
            OutputState::Error(reason) => Err(reason.clone()),
            OutputState::Unset => self.evaluate(id),
            OutputState::Stale => Err(FailureReason::Internal {
                what: "undeclared dependency read",
            }),
        }
    }

    /// Upstream unit count (CDU or CRAH count), as an integer.
    fn dep_count(&self, id: OutputId) -> Result<u32, FailureReason> {
        Ok(self.dep(id)?.round() as u32)
    }

    fn rack_counts(&self) -> Result<RackCounts, FailureReason> {
        Ok(self.store.pod_rack_counts(self.inputs.require_pod_type()?))
    }

    fn crah_capacity_kw(&self) -> Result<f64, FailureReason> {
        Ok(pc_data::equipment(self.crah_model)?.net_capacity_kw)
    }

    /// Facility system curve for the selected pod at the sized CDU count.
    fn facility_curve(&self) -> Result<Quadratic, FailureReason> {
        let pod_type = self.inputs.require_pod_type()?;
        let cdu_count = self.dep_count(OutputId::CduCount)?;
        Ok(Quadratic::from(self.store.system_curve(pod_type, cdu_count)?))
    }

    fn evaluate(&self, id: OutputId) -> Result<f64, FailureReason> {
        match id {
            OutputId::DryBulb => {
                Ok(self.store.climate_record(self.inputs.require_city()?)?.dry_bulb_c)
            }
            OutputId::WetBulb => {
                Ok(self.store.climate_record(self.inputs.require_city()?)?.wet_bulb_c)
            }
            OutputId::DewPoint => {
                Ok(self.store.climate_record(self.inputs.require_city()?)?.dew_point_c)
            }
            OutputId::HumidityRatio => {
                Ok(self.store.climate_record(self.inputs.require_city()?)?.humidity_ratio)
            }

            OutputId::TotalPowerPerPod => Ok(air::total_power_per_pod(&self.rack_counts()?)),
            OutputId::TotalPower => {
                let per_pod = self.dep(OutputId::TotalPowerPerPod)?;
                Ok(per_pod * f64::from(self.inputs.require_num_pods()?))
            }
            OutputId::AirCoolingCapacityPerPod => {
                Ok(air::air_cooling_capacity_per_pod(&self.rack_counts()?))
            }
            OutputId::LiquidCoolingCapacityPerPod => {
                Ok(liquid::liquid_cooling_capacity_per_pod(&self.rack_counts()?))
            }

            OutputId::AirflowPerPod => Ok(air::airflow_per_pod(
                &self.rack_counts()?,
                self.inputs.require_air_supply_temp_c()?,
            )),
            OutputId::LiquidFlowPerPod => Ok(liquid::liquid_flow_per_pod(
                &self.rack_counts()?,
                self.inputs.require_tcs_liquid_temp_c()?,
            )),

            OutputId::CduCount => {
                let count = cdu::cdu_count(
                    self.dep(OutputId::LiquidCoolingCapacityPerPod)?,
                    self.dep(OutputId::LiquidFlowPerPod)?,
                    self.store.nominal_capacity(DEFAULT_CDU_MODEL)?,
                    MAX_SECONDARY_FLOW_PER_CDU_LPM,
                )?;
                Ok(f64::from(count))
            }
            OutputId::SecondaryFlowPerCdu => Ok(cdu::secondary_flow_per_cdu(
                self.dep(OutputId::LiquidFlowPerPod)?,
                self.dep_count(OutputId::CduCount)?,
            )?),
            OutputId::QPerCdu => Ok(cdu::q_per_cdu(
                self.dep(OutputId::LiquidCoolingCapacityPerPod)?,
                self.dep_count(OutputId::CduCount)?,
            )?),
            OutputId::PrimaryFlowPerCdu => {
                Ok(cdu::primary_flow_per_cdu(self.dep(OutputId::QPerCdu)?))
            }
            OutputId::PrimaryFlowPerPod => Ok(cdu::primary_flow_per_pod(
                self.dep(OutputId::PrimaryFlowPerCdu)?,
                self.dep_count(OutputId::CduCount)?,
            )),
            OutputId::RackPowerLiquidCooled => Ok(liquid::rack_power_liquid_cooled(
                self.inputs.require_tcs_liquid_temp_c()?,
            )?),
            OutputId::SecondaryReturnTemp => {
                let tcs_liquid_c = self.inputs.require_tcs_liquid_temp_c()?;
                Ok(liquid::secondary_return_temp(
                    self.dep(OutputId::RackPowerLiquidCooled)?,
                    liquid::liquid_flow_per_rack(tcs_liquid_c),
                    tcs_liquid_c,
                )?)
            }
            OutputId::QMaxPerCdu => {
                // Primary supply is the liquid-loop FWS selection.
                Ok(cdu::q_max_per_cdu(
                    self.dep(OutputId::SecondaryFlowPerCdu)?,
                    self.dep(OutputId::PrimaryFlowPerCdu)?,
                    self.dep(OutputId::SecondaryReturnTemp)?,
                    self.inputs.require_fws_liquid_temp_c()?,
                ))
            }

            OutputId::AirTempRise => Ok(air::air_temp_rise(
                self.dep(OutputId::AirCoolingCapacityPerPod)?,
                self.dep(OutputId::AirflowPerPod)?,
            )?),
            OutputId::AirReturnTemp => Ok(air::air_return_temp(
                self.inputs.require_air_supply_temp_c()?,
                self.dep(OutputId::AirTempRise)?,
            )),
            OutputId::CrahCount => {
                let count = crah::crah_count(
                    self.dep(OutputId::AirCoolingCapacityPerPod)?,
                    self.crah_capacity_kw()?,
                )?;
                Ok(f64::from(count))
            }
            OutputId::QPerCrah => Ok(crah::q_per_crah(
                self.inputs.require_cdu_type()?,
                self.dep(OutputId::AirCoolingCapacityPerPod)?,
                self.dep(OutputId::TotalPowerPerPod)?,
                self.dep_count(OutputId::CrahCount)?,
            )?),
            OutputId::QAcPerPod => Ok(crah::q_ac_per_pod(
                self.inputs.require_cdu_type()?,
                self.dep(OutputId::AirCoolingCapacityPerPod)?,
                self.dep(OutputId::TotalPowerPerPod)?,
            )),
            OutputId::ChilledWaterRise => Ok(self.store.evaporator_rise(
                DEFAULT_CHILLER_MODEL,
                self.inputs.require_fws_air_temp_c()?,
                self.dep(OutputId::DryBulb)?,
            )?),
            OutputId::ChilledWaterFlowPerCrah => Ok(crah::chilled_water_flow_per_crah(
                self.dep(OutputId::QPerCrah)?,
                self.dep(OutputId::ChilledWaterRise)?,
            )?),
            OutputId::ChilledWaterFlowPerPod => Ok(crah::chilled_water_flow_per_pod(
                self.dep(OutputId::ChilledWaterFlowPerCrah)?,
                self.dep_count(OutputId::CrahCount)?,
            )),
            OutputId::CrahFanRpm => {
                let crah_count = self.dep_count(OutputId::CrahCount)?;
                if crah_count == 0 {
                    return Err(FailureReason::Domain {
                        what: "CRAH count is zero".to_string(),
                    });
                }
                let cfm_per_crah = self.dep(OutputId::AirflowPerPod)? / f64::from(crah_count);
                Ok(crah::fan_rpm_fraction(cfm_per_crah))
            }
            OutputId::CrahFanPowerPerCrah => {
                Ok(crah::fan_power_kw(self.dep(OutputId::CrahFanRpm)?))
            }

            // The curve intersection is solved once, for PumpRefFlow; the
            // speed and power derive from it by affinity arithmetic.
            OutputId::PumpRefFlow => {
                let pump = Quadratic::from(cdu_pump_curve());
                Ok(reference_flow(&pump, &self.facility_curve()?)?)
            }
            OutputId::PumpRpm => {
                let point = scale_to_flow(
                    &self.facility_curve()?,
                    self.dep(OutputId::PumpRefFlow)?,
                    self.dep(OutputId::SecondaryFlowPerCdu)?,
                )?;
                Ok(point.rpm_fraction)
            }
            OutputId::PumpPowerPerCdu => {
                Ok(pump_power_at_speed(self.dep(OutputId::PumpRpm)?))
            }
            OutputId::PumpPowerPerPod => Ok(pump_power_per_pod(
                self.dep(OutputId::PumpPowerPerCdu)?,
                self.dep_count(OutputId::CduCount)?,
            )),
        }
    }
}
