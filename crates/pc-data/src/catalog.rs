//! Static catalogue data: vendor equipment, rack profiles, pod
//! configurations, and system-curve coefficients.
//!
//! All values come from the vendor datasheets and the commissioning
//! spreadsheet; they are read-only and compiled in.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Physical constants and reference ratings used across the formula set.
pub mod constants {
    /// Volumetric heat capacity of chilled water, kJ/(°C·m³).
    pub const WATER_RHO_CP: f64 = 4193.0;

    /// Volumetric heat capacity of the secondary (TCS) coolant, kJ/(°C·m³).
    pub const RHO_C_SECONDARY: f64 = 4120.0;

    /// Volumetric heat capacity of the primary (FWS) loop, kJ/(°C·m³).
    pub const RHO_C_PRIMARY: f64 = 4170.0;

    /// Design temperature difference across the CDU primary side, °C.
    pub const PRIMARY_DELTA_TEMP_C: f64 = 10.0;

    /// Maximum secondary-loop flow a single CDU can deliver, LPM.
    pub const MAX_SECONDARY_FLOW_PER_CDU_LPM: f64 = 1200.0;

    /// Safety margin applied to the required pod airflow.
    pub const AIRFLOW_SAFETY_MARGIN: f64 = 1.05;

    /// Fixed airflow for a management rack, CFM.
    pub const AIRFLOW_MANAGEMENT_RACK_CFM: f64 = 3900.0;

    /// Fixed airflow for a networking rack, CFM.
    pub const AIRFLOW_NETWORKING_RACK_CFM: f64 = 3900.0;

    /// Reference airflow of the CRAH fan curve (PW170 rating), CFM.
    pub const CRAH_REFERENCE_CFM: f64 = 29081.0;

    /// Reference CRAH fan power at the reference airflow, kW.
    pub const CRAH_REFERENCE_POWER_KW: f64 = 13.5;

    /// Reference CDU pump power at the reference operating point, kW.
    pub const CDU_REFERENCE_PUMP_POWER_KW: f64 = 13.7;

    /// Reference rotational-speed fraction for affinity scaling.
    pub const REFERENCE_RPM_FRACTION: f64 = 1.0;

    /// TCS liquid temperature ceiling for the liquid-cooled rack-power
    /// correlation, °C. The correlation divides by (56.6 − T).
    pub const TCS_LIQUID_CEILING_C: f64 = 56.6;
}

/// Pod configurations offered in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PodType {
    Gb200SuperPod288,
    Gb200SuperPod576,
    Gb200SuperPod1152,
}

impl PodType {
    pub const ALL: [PodType; 3] = [
        PodType::Gb200SuperPod288,
        PodType::Gb200SuperPod576,
        PodType::Gb200SuperPod1152,
    ];

    /// Catalogue display name.
    pub fn name(&self) -> &'static str {
        match self {
            PodType::Gb200SuperPod288 => "288 GPU DGX GB200 Super Pod",
            PodType::Gb200SuperPod576 => "576 GPU DGX GB200 Super Pod",
            PodType::Gb200SuperPod1152 => "1152 GPU DGX GB200 Super Pod",
        }
    }

    /// Reverse lookup by catalogue name.
    pub fn from_name(name: &str) -> DataResult<PodType> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name.trim())
            .ok_or_else(|| DataError::NotFound {
                table: "pod types",
                key: name.to_string(),
            })
    }
}

impl std::fmt::Display for PodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rack categories within a pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RackCategory {
    /// GB200 NVL72 compute rack (liquid-cooled).
    Compute,
    Management,
    Networking,
}

impl RackCategory {
    pub const ALL: [RackCategory; 3] = [
        RackCategory::Compute,
        RackCategory::Management,
        RackCategory::Networking,
    ];
}

/// Per-category rack attributes.
///
/// The liquid-cooling share is derived, not stored: `power_kw −
/// air_capacity_kw`. For air-only categories the two are equal, so the
/// share collapses to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RackProfile {
    pub power_kw: f64,
    pub air_capacity_kw: f64,
    /// Fixed airflow for categories whose airflow is not
    /// temperature-dependent. `None` for compute racks, whose airflow comes
    /// from the supply-temperature correlation.
    pub fixed_airflow_cfm: Option<f64>,
}

impl RackProfile {
    /// Liquid cooling capacity absorbed by the TCS loop, kW.
    pub fn liquid_capacity_kw(&self) -> f64 {
        self.power_kw - self.air_capacity_kw
    }
}

/// Rack attributes per category.
pub fn rack_profile(category: RackCategory) -> RackProfile {
    match category {
        RackCategory::Compute => RackProfile {
            power_kw: 132.0,
            air_capacity_kw: 17.16,
            fixed_airflow_cfm: None,
        },
        RackCategory::Management => RackProfile {
            power_kw: 30.0,
            air_capacity_kw: 30.0,
            fixed_airflow_cfm: Some(constants::AIRFLOW_MANAGEMENT_RACK_CFM),
        },
        RackCategory::Networking => RackProfile {
            power_kw: 30.0,
            air_capacity_kw: 30.0,
            fixed_airflow_cfm: Some(constants::AIRFLOW_NETWORKING_RACK_CFM),
        },
    }
}

/// Rack counts per pod configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RackCounts {
    pub compute: u32,
    pub management: u32,
    pub networking: u32,
}

impl RackCounts {
    pub fn count(&self, category: RackCategory) -> u32 {
        match category {
            RackCategory::Compute => self.compute,
            RackCategory::Management => self.management,
            RackCategory::Networking => self.networking,
        }
    }
}

pub fn pod_rack_counts(pod_type: PodType) -> RackCounts {
    match pod_type {
        PodType::Gb200SuperPod288 => RackCounts {
            compute: 4,
            management: 2,
            networking: 3,
        },
        PodType::Gb200SuperPod576 => RackCounts {
            compute: 8,
            management: 4,
            networking: 6,
        },
        PodType::Gb200SuperPod1152 => RackCounts {
            compute: 16,
            management: 8,
            networking: 12,
        },
    }
}

/// CDU heat-rejection arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CduType {
    LiquidToLiquid,
    LiquidToAir,
}

impl std::fmt::Display for CduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CduType::LiquidToLiquid => f.write_str("Liquid to Liquid"),
            CduType::LiquidToAir => f.write_str("Liquid to Air"),
        }
    }
}

/// One row of the vendor CRAH/AHU catalogue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VendorEquipment {
    pub vendor: &'static str,
    pub model: &'static str,
    pub net_capacity_kw: f64,
    pub inlet_water_temp_c: f64,
    pub outlet_water_temp_c: f64,
    pub primary_max_flow_lpm: f64,
    pub air_cfm: f64,
    pub total_power_kw: f64,
    pub price_usd: Option<f64>,
}

pub const VENDOR_CATALOG: [VendorEquipment; 3] = [
    VendorEquipment {
        vendor: "Vertiv",
        model: "AHU FA069HC",
        net_capacity_kw: 252.4,
        inlet_water_temp_c: 18.0,
        outlet_water_temp_c: 25.0,
        primary_max_flow_lpm: 548.4,
        air_cfm: 40600.0,
        total_power_kw: 15.0,
        price_usd: None,
    },
    VendorEquipment {
        vendor: "Vertiv",
        model: "AHU FA096HC",
        net_capacity_kw: 351.7,
        inlet_water_temp_c: 18.0,
        outlet_water_temp_c: 25.0,
        primary_max_flow_lpm: 761.4,
        air_cfm: 56800.0,
        total_power_kw: 19.5,
        price_usd: None,
    },
    VendorEquipment {
        vendor: "Vertiv",
        model: "PW170",
        net_capacity_kw: 233.0,
        inlet_water_temp_c: 18.0,
        outlet_water_temp_c: 38.0,
        primary_max_flow_lpm: 175.0,
        air_cfm: 29081.0,
        total_power_kw: 13.5,
        price_usd: Some(74000.0),
    },
];

/// CRAH model used for sizing unless the caller overrides it.
pub const DEFAULT_CRAH_MODEL: &str = "PW170";

/// CDU model whose nominal capacity drives CDU-count sizing.
pub const DEFAULT_CDU_MODEL: &str = "XDU1350";

pub fn equipment(model: &str) -> DataResult<&'static VendorEquipment> {
    VENDOR_CATALOG
        .iter()
        .find(|e| e.model == model)
        .ok_or_else(|| DataError::NotFound {
            table: "vendor catalogue",
            key: model.to_string(),
        })
}

/// Nominal cooling capacity by CDU model, kW.
pub fn nominal_capacity(model: &str) -> DataResult<f64> {
    let capacity = match model {
        "XDU1350" => 1367.0,
        "MCDU60" => 1200.0,
        "MCDU50" => 1725.0,
        "XDU600" => 600.0,
        "XDU070" => 55.0,
        "MHDU5900" => 1368.0,
        "MHDU5910" => 1200.0,
        _ => {
            return Err(DataError::NotFound {
                table: "nominal CDU capacities",
                key: model.to_string(),
            });
        }
    };
    Ok(capacity)
}

/// Quadratic pressure-drop-vs-flow curve: dp = a·q² + b·q + c.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemCurve {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Facility system-curve coefficients keyed by (pod type, CDU count).
///
/// Only the commissioned configurations are tabulated; anything else is a
/// `NotFound`, which downstream sizing reports as insufficient data.
pub fn system_curve(pod_type: PodType, cdu_count: u32) -> DataResult<SystemCurve> {
    let curve = match (pod_type, cdu_count) {
        (PodType::Gb200SuperPod576, 1) => SystemCurve {
            a: 0.000071,
            b: 0.024229,
            c: -0.395338,
        },
        (PodType::Gb200SuperPod576, 2) => SystemCurve {
            a: 0.00283,
            b: 0.048458,
            c: -0.395338,
        },
        (PodType::Gb200SuperPod1152, 3) => SystemCurve {
            a: 0.000186,
            b: 0.041409,
            c: -0.554934,
        },
        (PodType::Gb200SuperPod1152, 4) => SystemCurve {
            a: 0.00033,
            b: 0.055212,
            c: -0.554934,
        },
        _ => {
            return Err(DataError::NotFound {
                table: "system-curve coefficients",
                key: format!("{} / {} CDUs", pod_type.name(), cdu_count),
            });
        }
    };
    Ok(curve)
}

/// Native PQ curve of the XDU1350 CDU pump.
pub fn cdu_pump_curve() -> SystemCurve {
    SystemCurve {
        a: -0.000234,
        b: 0.092063,
        c: 476.456770,
    }
}
