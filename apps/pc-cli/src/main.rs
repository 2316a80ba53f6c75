use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pc_data::{CduType, DataStore, PodType};
use pc_engine::Engine;
use pc_formulas::envelope::{self, AirClass, HeatRejection, LiquidClass};

#[derive(Parser)]
#[command(name = "pc-cli")]
#[command(about = "PodCool CLI - GPU pod cooling capacity sizing", long_about = None)]
struct Cli {
    /// Path to the climate table (JSON, or YAML with --yaml)
    #[arg(long, default_value = "demos/climate.json")]
    climate: PathBuf,
    /// Path to the chiller performance table
    #[arg(long, default_value = "demos/chillers.json")]
    chillers: PathBuf,
    /// Load the reference tables as YAML instead of JSON
    #[arg(long)]
    yaml: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the reference tables
    Validate,
    /// List available cities, or show one city's design conditions
    Climate {
        /// City to show (lists all cities when omitted)
        city: Option<String>,
    },
    /// Show the permitted operating envelope for facility classes
    Envelope {
        /// Air-cooling class: A1, A2, A3, A4, B, C or H1
        #[arg(long)]
        air_class: Option<String>,
        /// Liquid-cooling class: W17, W27, W32, W40, W45 or W+
        #[arg(long)]
        liquid_class: Option<String>,
        /// Selected air supply temperature, whole °C
        #[arg(long)]
        air_supply: Option<i32>,
        /// Selected TCS liquid temperature, whole °C
        #[arg(long)]
        tcs: Option<i32>,
    },
    /// Size the cooling plant for a pod configuration
    Size {
        /// City whose design climate to size against
        #[arg(long)]
        city: String,
        /// Pod configuration: 288, 576 or 1152 GPUs
        #[arg(long)]
        pod: u32,
        /// Number of pods
        #[arg(long, default_value_t = 1)]
        pods: u32,
        /// CDU arrangement: liquid-to-liquid or liquid-to-air
        #[arg(long, default_value = "liquid-to-liquid")]
        cdu: String,
        /// Air supply temperature, °C
        #[arg(long)]
        air_supply: f64,
        /// TCS liquid supply temperature, °C
        #[arg(long)]
        tcs: f64,
        /// FWS design temperature for the air loop, °C
        #[arg(long)]
        fws_air: f64,
        /// FWS design temperature for the liquid loop, °C
        #[arg(long)]
        fws_liquid: f64,
        /// Emit the result set as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate => {
            cmd_validate(&*load_store(&cli.climate, &cli.chillers, cli.yaml)?)
        }
        Commands::Climate { city } => cmd_climate(
            &*load_store(&cli.climate, &cli.chillers, cli.yaml)?,
            city.as_deref(),
        ),
        Commands::Envelope {
            air_class,
            liquid_class,
            air_supply,
            tcs,
        } => cmd_envelope(air_class.as_deref(), liquid_class.as_deref(), air_supply, tcs),
        Commands::Size {
            city,
            pod,
            pods,
            cdu,
            air_supply,
            tcs,
            fws_air,
            fws_liquid,
            json,
        } => cmd_size(
            load_store(&cli.climate, &cli.chillers, cli.yaml)?,
            &city,
            pod,
            pods,
            &cdu,
            air_supply,
            tcs,
            fws_air,
            fws_liquid,
            json,
        ),
    }
}

fn load_store(climate: &Path, chillers: &Path, yaml: bool) -> Result<Arc<DataStore>, Box<dyn Error>> {
    let store = if yaml {
        DataStore::load_yaml(climate, chillers)?
    } else {
        DataStore::load_json(climate, chillers)?
    };
    tracing::debug!(
        climate = %climate.display(),
        chillers = %chillers.display(),
        "reference tables loaded"
    );
    Ok(Arc::new(store))
}

fn cmd_validate(store: &DataStore) -> Result<(), Box<dyn Error>> {
    println!(
        "✓ Tables loaded: {} cities, {} chiller rows",
        store.climate().cities().len(),
        store.chillers().len()
    );
    Ok(())
}

fn cmd_climate(store: &DataStore, city: Option<&str>) -> Result<(), Box<dyn Error>> {
    match city {
        Some(city) => {
            let record = store.climate_record(city)?;
            println!("{}, {} ({})", record.city, record.country, record.region);
            println!("  Dry bulb:       {:.1} °C", record.dry_bulb_c);
            println!("  Wet bulb:       {:.1} °C", record.wet_bulb_c);
            println!("  Dew point:      {:.1} °C", record.dew_point_c);
            println!("  Humidity ratio: {:.4}", record.humidity_ratio);
        }
        None => {
            for city in store.climate().cities() {
                println!("{city}");
            }
        }
    }
    Ok(())
}

fn cmd_envelope(
    air_class: Option<&str>,
    liquid_class: Option<&str>,
    air_supply: Option<i32>,
    tcs: Option<i32>,
) -> Result<(), Box<dyn Error>> {
    let air = air_class.map(parse_air_class).transpose()?;
    let liquid = liquid_class.map(parse_liquid_class).transpose()?;

    match envelope::air_supply_range(air, liquid) {
        Some(range) => println!(
            "Permitted air supply: {}..={} °C",
            range.start(),
            range.end()
        ),
        None if air.is_none() && liquid.is_none() => {
            println!("Permitted air supply: select an air and/or liquid class")
        }
        None => println!("Permitted air supply: none (class ranges do not overlap)"),
    }

    if let Some(supply) = air_supply {
        let range = envelope::fws_air_range(supply);
        println!(
            "FWS air design range at {supply} °C supply: {}..={} °C",
            range.start(),
            range.end()
        );
    }
    if let Some(tcs) = tcs {
        let range = envelope::fws_liquid_range(tcs);
        println!(
            "FWS liquid design range at {tcs} °C TCS: {}..={} °C",
            range.start(),
            range.end()
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_size(
    store: Arc<DataStore>,
    city: &str,
    pod: u32,
    pods: u32,
    cdu: &str,
    air_supply: f64,
    tcs: f64,
    fws_air: f64,
    fws_liquid: f64,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let pod_type = parse_pod(pod)?;
    let cdu_type = parse_cdu(cdu)?;

    let mut engine = Engine::new(store)?;
    engine.set_city(city);
    engine.set_pod_type(pod_type);
    engine.set_num_pods(pods);
    engine.set_cdu_type(cdu_type);
    engine.set_air_supply_temp_c(air_supply);
    engine.set_tcs_liquid_temp_c(tcs);
    engine.set_fws_air_temp_c(fws_air);
    engine.set_fws_liquid_temp_c(fws_liquid);

    if json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        return Ok(());
    }

    println!("Sizing {} × {}", pods, pod_type.name());
    for record in engine.snapshot() {
        match (record.value, record.error) {
            (Some(value), _) => println!("  {:<30} {:>14.3}", record.name, value),
            (None, Some(error)) => println!("  {:<30} {:>14}  # {error}", record.name, "-"),
            (None, None) => println!("  {:<30} {:>14}", record.name, "-"),
        }
    }

    match engine.economizer_options() {
        Ok(opts) => {
            println!("Heat rejection:");
            println!("  dry side: {}", rejection_name(opts.dry_side));
            println!("  wet side: {}", rejection_name(opts.wet_side));
        }
        Err(reason) => println!("Heat rejection: unavailable ({reason})"),
    }

    Ok(())
}

fn parse_pod(gpus: u32) -> Result<PodType, Box<dyn Error>> {
    match gpus {
        288 => Ok(PodType::Gb200SuperPod288),
        576 => Ok(PodType::Gb200SuperPod576),
        1152 => Ok(PodType::Gb200SuperPod1152),
        other => Err(format!("unknown pod size: {other} (expected 288, 576 or 1152)").into()),
    }
}

fn parse_cdu(name: &str) -> Result<CduType, Box<dyn Error>> {
    match name {
        "liquid-to-liquid" | "l2l" => Ok(CduType::LiquidToLiquid),
        "liquid-to-air" | "l2a" => Ok(CduType::LiquidToAir),
        other => Err(format!("unknown CDU arrangement: {other}").into()),
    }
}

fn parse_air_class(name: &str) -> Result<AirClass, Box<dyn Error>> {
    match name.to_ascii_uppercase().as_str() {
        "A1" => Ok(AirClass::A1),
        "A2" => Ok(AirClass::A2),
        "A3" => Ok(AirClass::A3),
        "A4" => Ok(AirClass::A4),
        "B" => Ok(AirClass::B),
        "C" => Ok(AirClass::C),
        "H1" => Ok(AirClass::H1),
        other => Err(format!("unknown air class: {other}").into()),
    }
}

fn parse_liquid_class(name: &str) -> Result<LiquidClass, Box<dyn Error>> {
    match name.to_ascii_uppercase().as_str() {
        "W17" => Ok(LiquidClass::W17),
        "W27" => Ok(LiquidClass::W27),
        "W32" => Ok(LiquidClass::W32),
        "W40" => Ok(LiquidClass::W40),
        "W45" => Ok(LiquidClass::W45),
        "W+" | "WPLUS" => Ok(LiquidClass::WPlus),
        other => Err(format!("unknown liquid class: {other}").into()),
    }
}

fn rejection_name(rejection: HeatRejection) -> &'static str {
    match rejection {
        HeatRejection::DryCooler => "dry cooler",
        HeatRejection::Chiller => "chiller",
        HeatRejection::ClosedLoopCoolingTower => "closed-loop cooling tower",
    }
}
