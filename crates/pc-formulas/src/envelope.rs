//! Operating-envelope helpers: permitted temperature ranges per ASHRAE-style
//! facility class, FWS design ranges, and economizer selection.

use std::ops::RangeInclusive;

/// Air-cooling facility class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirClass {
    A1,
    A2,
    A3,
    A4,
    B,
    C,
    H1,
}

/// Liquid-cooling facility class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidClass {
    W17,
    W27,
    W32,
    W40,
    W45,
    WPlus,
}

/// Permitted air-supply temperatures for an air class, whole °C.
pub fn air_class_range(class: AirClass) -> RangeInclusive<i32> {
    match class {
        AirClass::A1 => 15..=32,
        AirClass::A2 => 10..=35,
        AirClass::A3 => 5..=40,
        AirClass::A4 => 5..=45,
        AirClass::B => 5..=36,
        AirClass::C => 5..=41,
        AirClass::H1 => 15..=26,
    }
}

/// Permitted supply temperatures for a liquid class, whole °C.
pub fn liquid_class_range(class: LiquidClass) -> RangeInclusive<i32> {
    match class {
        LiquidClass::W17 => 2..=17,
        LiquidClass::W27 => 2..=27,
        LiquidClass::W32 => 2..=32,
        LiquidClass::W40 => 2..=40,
        LiquidClass::W45 => 2..=45,
        LiquidClass::WPlus => 2..=49,
    }
}

/// Permitted air-supply range for the selected classes: the single class's
/// range when only one is chosen, their intersection when both are. `None`
/// when nothing is selected or the intersection is empty.
pub fn air_supply_range(
    air: Option<AirClass>,
    liquid: Option<LiquidClass>,
) -> Option<RangeInclusive<i32>> {
    match (air, liquid) {
        (None, None) => None,
        (Some(a), None) => Some(air_class_range(a)),
        (None, Some(l)) => Some(liquid_class_range(l)),
        (Some(a), Some(l)) => {
            let a = air_class_range(a);
            let l = liquid_class_range(l);
            let lo = (*a.start()).max(*l.start());
            let hi = (*a.end()).min(*l.end());
            (lo <= hi).then_some(lo..=hi)
        }
    }
}

/// FWS design temperature range (air side) for a given supply temperature.
pub fn fws_air_range(air_supply_c: i32) -> RangeInclusive<i32> {
    5..=(air_supply_c - 12).max(5)
}

/// FWS design temperature range (liquid side) for a given TCS temperature.
pub fn fws_liquid_range(tcs_liquid_c: i32) -> RangeInclusive<i32> {
    5..=(tcs_liquid_c - 4).max(5)
}

/// Facility heat-rejection options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatRejection {
    DryCooler,
    Chiller,
    ClosedLoopCoolingTower,
}

/// Economizer recommendation for the FWS liquid loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomizerOptions {
    /// Dry cooler when the dry-bulb approach allows, otherwise chiller.
    pub dry_side: HeatRejection,
    /// Cooling tower when the wet-bulb approach allows, otherwise chiller.
    pub wet_side: HeatRejection,
}

pub fn economizer_options(
    fws_liquid_c: f64,
    dry_bulb_c: f64,
    wet_bulb_c: f64,
) -> EconomizerOptions {
    let dry_side = if fws_liquid_c - 5.0 - dry_bulb_c >= 0.0 {
        HeatRejection::DryCooler
    } else {
        HeatRejection::Chiller
    };
    let wet_side = if fws_liquid_c - 3.0 - wet_bulb_c >= 0.0 {
        HeatRejection::ClosedLoopCoolingTower
    } else {
        HeatRejection::Chiller
    };
    EconomizerOptions { dry_side, wet_side }
}
