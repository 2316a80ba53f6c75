//! End-to-end engine scenarios against an in-memory data store.

use std::sync::Arc;

use pc_data::{
    CduType, ChillerRow, ChillerTable, ClimateRecord, ClimateTable, DEFAULT_CHILLER_MODEL,
    DataStore, PodType,
};
use pc_engine::{Engine, FailureReason, InputId, OutputId, OutputState};
use pc_formulas::air;
use pc_formulas::envelope::HeatRejection;

fn store() -> Arc<DataStore> {
    let climate = ClimateTable::from_records(vec![
        ClimateRecord {
            region: "NA".into(),
            country: "USA".into(),
            state: Some("TX".into()),
            city: "Dallas".into(),
            dry_bulb_c: 37.3,
            wet_bulb_c: 26.0,
            dew_point_c: 24.0,
            humidity_ratio: 0.012,
        },
        ClimateRecord {
            region: "EU".into(),
            country: "Finland".into(),
            state: None,
            city: "Helsinki".into(),
            dry_bulb_c: 26.1,
            wet_bulb_c: 19.2,
            dew_point_c: 17.5,
            humidity_ratio: 0.0125,
        },
    ]);
    let chillers = ChillerTable::from_rows(vec![
        ChillerRow {
            model: DEFAULT_CHILLER_MODEL.into(),
            outlet_temp_c: 10.0,
            ambient_temp_c: 38.0,
            cooling_capacity_kw: 1000.0,
            power_input_kw: 320.0,
            fluid_flow_l_s: 43.0,
            fluid_pressure_drop_kpa: 55.0,
            evaporator_rise_c: 5.6,
        },
        ChillerRow {
            model: DEFAULT_CHILLER_MODEL.into(),
            outlet_temp_c: 10.0,
            ambient_temp_c: 27.0,
            cooling_capacity_kw: 1080.0,
            power_input_kw: 290.0,
            fluid_flow_l_s: 43.0,
            fluid_pressure_drop_kpa: 55.0,
            evaporator_rise_c: 6.0,
        },
    ]);
    Arc::new(DataStore::new(climate, chillers))
}

/// 576-GPU pod in Dallas with every input selected.
fn sized_engine() -> Engine {
    let mut engine = Engine::new(store()).unwrap();
    engine.set_city("Dallas");
    engine.set_pod_type(PodType::Gb200SuperPod576);
    engine.set_num_pods(2);
    engine.set_cdu_type(CduType::LiquidToLiquid);
    engine.set_air_supply_temp_c(25.0);
    engine.set_tcs_liquid_temp_c(30.0);
    engine.set_fws_air_temp_c(10.0);
    engine.set_fws_liquid_temp_c(20.0);
    engine
}

#[test]
fn full_selection_computes_every_output() {
    let engine = sized_engine();
    for id in OutputId::ALL {
        assert!(
            engine.state(id).is_computed(),
            "{id} is {:?}",
            engine.state(id)
        );
    }
}

#[test]
fn sizing_chain_matches_hand_calculation() {
    let engine = sized_engine();

    // 8 × 132 + 4 × 30 + 6 × 30 kW racks.
    assert_eq!(engine.value(OutputId::TotalPowerPerPod), Some(1356.0));
    assert_eq!(engine.value(OutputId::TotalPower), Some(2712.0));
    assert_eq!(engine.value(OutputId::LiquidCoolingCapacityPerPod), Some(918.72));

    // Neither capacity nor flow needs more than one XDU1350, so the
    // redundant unit brings the count to two.
    assert_eq!(engine.value(OutputId::CduCount), Some(2.0));
    let flow = engine.value(OutputId::LiquidFlowPerPod).unwrap();
    assert!((flow - 551.232).abs() < 1e-9);
    let per_cdu = engine.value(OutputId::SecondaryFlowPerCdu).unwrap();
    assert!((per_cdu - flow / 2.0).abs() < 1e-12);

    // 437.28 kW of air-side load across 233 kW CRAHs.
    assert_eq!(engine.value(OutputId::CrahCount), Some(2.0));
    let q_per_crah = engine.value(OutputId::QPerCrah).unwrap();
    assert!((q_per_crah - 218.64).abs() < 1e-9);

    // Dry bulb 37.3 rounds up to the 38 °C chiller row.
    assert_eq!(engine.value(OutputId::ChilledWaterRise), Some(5.6));

    // The pump runs below its reference point at the split flow.
    let rpm = engine.value(OutputId::PumpRpm).unwrap();
    assert!(rpm > 0.0 && rpm < 1.0);
    let per_cdu_kw = engine.value(OutputId::PumpPowerPerCdu).unwrap();
    let per_pod_kw = engine.value(OutputId::PumpPowerPerPod).unwrap();
    assert!((per_pod_kw - per_cdu_kw * 2.0).abs() < 1e-12);
}

#[test]
fn airflow_matches_formula_library() {
    let mut engine = Engine::new(store()).unwrap();
    engine.set_pod_type(PodType::Gb200SuperPod288);
    engine.set_air_supply_temp_c(20.0);

    let counts = engine.store().pod_rack_counts(PodType::Gb200SuperPod288);
    let expected = air::airflow_per_pod(&counts, 20.0);
    assert_eq!(engine.value(OutputId::AirflowPerPod), Some(expected));
}

#[test]
fn recompute_all_is_idempotent() {
    let mut engine = sized_engine();
    let before = engine.snapshot();
    engine.recompute_all();
    let after = engine.snapshot();
    assert_eq!(before, after);
}

#[test]
fn input_change_only_touches_its_closure() {
    let mut engine = sized_engine();
    let airflow = engine.value(OutputId::AirflowPerPod).unwrap();
    let liquid_flow = engine.value(OutputId::LiquidFlowPerPod).unwrap();

    engine.set_tcs_liquid_temp_c(35.0);

    // Air chain untouched bit for bit, liquid chain re-derived.
    assert_eq!(engine.value(OutputId::AirflowPerPod), Some(airflow));
    assert_ne!(engine.value(OutputId::LiquidFlowPerPod), Some(liquid_flow));
    assert!(engine.state(OutputId::CduCount).is_computed());
}

#[test]
fn changed_input_reflows_downstream_values() {
    let mut engine = sized_engine();
    let rise = engine.value(OutputId::AirTempRise).unwrap();
    let return_temp = engine.value(OutputId::AirReturnTemp).unwrap();

    engine.set_air_supply_temp_c(30.0);

    assert_ne!(engine.value(OutputId::AirTempRise), Some(rise));
    assert_ne!(engine.value(OutputId::AirReturnTemp), Some(return_temp));
}

#[test]
fn downstream_input_before_pod_selection_reports_unselected() {
    let mut engine = Engine::new(store()).unwrap();
    // The TCS selection pulls the whole CDU chain into the recompute pass
    // while its pod-fed upstreams have never been evaluated.
    engine.set_tcs_liquid_temp_c(30.0);

    assert_eq!(
        engine.state(OutputId::CduCount),
        &OutputState::Error(FailureReason::Unselected(InputId::PodType))
    );
    assert_eq!(
        engine.state(OutputId::SecondaryFlowPerCdu),
        &OutputState::Error(FailureReason::Unselected(InputId::PodType))
    );
    // Outputs fed by the selected input alone still compute.
    assert!(engine.state(OutputId::RackPowerLiquidCooled).is_computed());
}

#[test]
fn selection_order_does_not_change_the_result() {
    let mut engine = Engine::new(store()).unwrap();
    engine.set_fws_liquid_temp_c(20.0);
    engine.set_fws_air_temp_c(10.0);
    engine.set_tcs_liquid_temp_c(30.0);
    engine.set_air_supply_temp_c(25.0);
    engine.set_cdu_type(CduType::LiquidToLiquid);
    engine.set_num_pods(2);
    engine.set_pod_type(PodType::Gb200SuperPod576);
    engine.set_city("Dallas");

    assert_eq!(engine.snapshot(), sized_engine().snapshot());
}

#[test]
fn pump_chain_matches_the_combined_solver() {
    use pc_data::{cdu_pump_curve, system_curve};
    use pc_solver::{Quadratic, pump_operating_point};

    let engine = sized_engine();
    let pump = Quadratic::from(cdu_pump_curve());
    let facility = Quadratic::from(system_curve(PodType::Gb200SuperPod576, 2).unwrap());
    let actual = engine.value(OutputId::SecondaryFlowPerCdu).unwrap();
    let point = pump_operating_point(&pump, &facility, actual).unwrap();

    assert_eq!(
        engine.value(OutputId::PumpRefFlow),
        Some(point.reference_flow_lpm)
    );
    assert_eq!(engine.value(OutputId::PumpRpm), Some(point.rpm_fraction));
    assert_eq!(
        engine.value(OutputId::PumpPowerPerCdu),
        Some(point.pump_power_kw)
    );
}

#[test]
fn bare_engine_reports_unselected_everywhere() {
    let mut engine = Engine::new(store()).unwrap();
    engine.recompute_all();
    for id in OutputId::ALL {
        match engine.state(id) {
            OutputState::Error(FailureReason::Unselected(_)) => {}
            other => panic!("{id} should be unselected, got {other:?}"),
        }
    }
}

#[test]
fn unselected_input_names_the_missing_selection() {
    let mut engine = Engine::new(store()).unwrap();
    engine.set_pod_type(PodType::Gb200SuperPod576);
    assert_eq!(
        engine.state(OutputId::LiquidFlowPerPod),
        &OutputState::Error(FailureReason::Unselected(InputId::TcsLiquidTemp))
    );
    // The error propagates unchanged through the CDU chain.
    assert_eq!(
        engine.state(OutputId::CduCount),
        &OutputState::Error(FailureReason::Unselected(InputId::TcsLiquidTemp))
    );
    // Pure pod-type outputs still compute.
    assert!(engine.state(OutputId::TotalPowerPerPod).is_computed());
}

#[test]
fn tcs_at_correlation_ceiling_is_a_domain_error() {
    let mut engine = sized_engine();
    engine.set_tcs_liquid_temp_c(60.0);

    assert!(matches!(
        engine.state(OutputId::RackPowerLiquidCooled),
        OutputState::Error(FailureReason::Domain { .. })
    ));
    assert!(matches!(
        engine.state(OutputId::SecondaryReturnTemp),
        OutputState::Error(FailureReason::Domain { .. })
    ));
    // The flow polynomial itself has no ceiling.
    assert!(engine.state(OutputId::LiquidFlowPerPod).is_computed());
}

#[test]
fn unknown_city_fails_the_climate_chain_only() {
    let mut engine = sized_engine();
    engine.set_city("Atlantis");

    assert!(matches!(
        engine.state(OutputId::DryBulb),
        OutputState::Error(FailureReason::NotFound { .. })
    ));
    assert!(matches!(
        engine.state(OutputId::ChilledWaterRise),
        OutputState::Error(FailureReason::NotFound { .. })
    ));
    assert!(engine.state(OutputId::CduCount).is_computed());
    assert!(engine.state(OutputId::AirReturnTemp).is_computed());
}

#[test]
fn uncommissioned_configuration_fails_pump_chain_only() {
    let mut engine = sized_engine();
    // No system curve is tabulated for the 288-GPU pod.
    engine.set_pod_type(PodType::Gb200SuperPod288);

    assert!(engine.state(OutputId::CduCount).is_computed());
    assert!(engine.state(OutputId::SecondaryFlowPerCdu).is_computed());
    assert!(matches!(
        engine.state(OutputId::PumpRefFlow),
        OutputState::Error(FailureReason::NotFound { .. })
    ));
    assert!(matches!(
        engine.state(OutputId::PumpPowerPerPod),
        OutputState::Error(FailureReason::NotFound { .. })
    ));
}

#[test]
fn snapshot_reports_values_and_errors() {
    let mut engine = sized_engine();
    engine.set_city("Atlantis");
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.len(), OutputId::ALL.len());

    let dry_bulb = snapshot
        .iter()
        .find(|r| r.name == "dryBulbC")
        .unwrap();
    assert!(dry_bulb.value.is_none());
    assert!(dry_bulb.error.as_deref().unwrap().contains("Atlantis"));

    let cdu_count = snapshot
        .iter()
        .find(|r| r.name == "cduCount")
        .unwrap();
    assert_eq!(cdu_count.value, Some(2.0));
    assert!(cdu_count.error.is_none());
}

#[test]
fn economizer_recommendation_follows_the_approach_margins() {
    let mut engine = sized_engine();
    // 20 − 5 < 37.3 dry bulb and 20 − 3 < 26 wet bulb: chillers on both.
    let opts = engine.economizer_options().unwrap();
    assert_eq!(opts.dry_side, HeatRejection::Chiller);
    assert_eq!(opts.wet_side, HeatRejection::Chiller);

    engine.set_fws_liquid_temp_c(45.0);
    let opts = engine.economizer_options().unwrap();
    assert_eq!(opts.dry_side, HeatRejection::DryCooler);
    assert_eq!(opts.wet_side, HeatRejection::ClosedLoopCoolingTower);
}
