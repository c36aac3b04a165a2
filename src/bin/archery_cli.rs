use archery_sim::{
    sample_at_distance, simulate_with_config, vacuum, BowSetup, DistanceSample, LaunchParameters,
    SimulationConfig, SimulationResult, WindModel,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "archery-cli")]
#[command(version)]
#[command(about = "Arrow flight trajectory calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single shot
    Simulate {
        /// Draw weight (lbf)
        #[arg(short = 'w', long, default_value = "40.0")]
        draw_weight: f64,

        /// Draw length (inches)
        #[arg(short = 'l', long, default_value = "28.0")]
        draw_length: f64,

        /// Arrow weight (grams)
        #[arg(short = 'm', long, default_value = "30.0")]
        arrow_weight: f64,

        /// Bow efficiency (percent of stored energy delivered)
        #[arg(short = 'e', long, default_value = "100.0")]
        efficiency: f64,

        /// Launch angle (degrees)
        #[arg(short = 'a', long, default_value = "45.0", allow_negative_numbers = true)]
        angle: f64,

        /// Start height above ground (meters)
        #[arg(long, default_value = "1.5")]
        height: f64,

        /// Wind speed (m/s, positive = headwind)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        wind: f64,

        /// How wind enters the model
        #[arg(long, value_enum, default_value = "velocity-offset")]
        wind_model: WindArg,

        /// Drag coefficient (0 disables drag)
        #[arg(long, default_value = "0.0")]
        drag_coefficient: f64,

        /// Arrow shaft diameter (mm), sets the frontal area
        #[arg(long, default_value = "0.0")]
        shaft_diameter: f64,

        /// Time step (seconds)
        #[arg(long, default_value = "0.01")]
        time_step: f64,

        /// Maximum flight time before the run is cut off (seconds)
        #[arg(long, default_value = "20.0")]
        max_time: f64,

        /// Maximum horizontal distance before the run is cut off (meters)
        #[arg(long, default_value = "250.0")]
        max_distance: f64,

        /// Read launch parameters and config from a JSON file instead
        #[arg(long)]
        params: Option<PathBuf>,

        /// Resample the trajectory every N meters downrange
        #[arg(long)]
        step: Option<f64>,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "table")]
        output: OutputFormat,

        /// Full output (show all trajectory samples)
        #[arg(long)]
        full: bool,
    },

    /// Display engine information
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WindArg {
    VelocityOffset,
    Acceleration,
}

impl From<WindArg> for WindModel {
    fn from(arg: WindArg) -> Self {
        match arg {
            WindArg::VelocityOffset => WindModel::VelocityOffset,
            WindArg::Acceleration => WindModel::Acceleration,
        }
    }
}

/// On-disk run description for `--params`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ParamsFile {
    launch: LaunchParameters,
    config: SimulationConfig,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: &'a SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    resampled: Option<&'a [DistanceSample]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vacuum: Option<vacuum::VacuumFlight>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            draw_weight, draw_length, arrow_weight, efficiency,
            angle, height, wind, wind_model, drag_coefficient, shaft_diameter,
            time_step, max_time, max_distance, params, step, output, full,
        } => {
            let (launch, config) = match params {
                Some(path) => {
                    let text = fs::read_to_string(&path)?;
                    let file: ParamsFile = serde_json::from_str(&text)?;
                    (file.launch, file.config)
                }
                None => {
                    let setup = BowSetup {
                        draw_weight_lbf: draw_weight,
                        draw_length_in: draw_length,
                        arrow_weight_g: arrow_weight,
                        efficiency_pct: efficiency,
                        launch_angle_deg: angle,
                        start_height_m: height,
                        wind_speed_mps: wind,
                        drag_coefficient,
                        shaft_diameter_mm: shaft_diameter,
                    };
                    let config = SimulationConfig {
                        time_step_s: time_step,
                        max_time_s: max_time,
                        max_distance_m: max_distance,
                        wind_model: wind_model.into(),
                    };
                    (setup.to_launch_parameters(), config)
                }
            };

            // Reference only makes sense for a drag-free, calm shot
            let reference = if !launch.drag_enabled() && launch.wind_speed_mps == 0.0 {
                Some(vacuum::flight_time_and_range(&launch)?)
            } else {
                None
            };

            let result = simulate_with_config(launch, &config)?;
            let resampled = step.map(|s| sample_at_distance(&result, s));

            if !result.is_impact() {
                eprintln!(
                    "warning: the arrow did not land ({}); range and flight time are taken at the cut-off",
                    result.outcome
                );
            }

            display_results(&result, resampled.as_deref(), reference, output, full)?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      ARCHERY SIM v{:<21}║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Arrow flight trajectory engine.        ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • Bow energy launch model (70 m/s cap) ║");
            println!("║ • Euler integration, quadratic drag    ║");
            println!("║ • Velocity-offset or accel. wind       ║");
            println!("║ • Interpolated ground impact           ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_results(
    result: &SimulationResult,
    resampled: Option<&[DistanceSample]>,
    reference: Option<vacuum::VacuumFlight>,
    format: OutputFormat,
    full: bool,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let report = JsonReport { result, resampled, vacuum: reference };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        OutputFormat::Csv => {
            match resampled {
                Some(rows) => {
                    println!("distance,height,time,speed,flags");
                    for s in rows {
                        let flags: Vec<String> = s.flags.iter().map(|f| f.to_string()).collect();
                        println!("{:.2},{:.3},{:.3},{:.2},{}",
                            s.distance_m, s.height_m, s.time_s, s.speed_mps, flags.join("|"));
                    }
                }
                None => {
                    println!("time,x,y,vx,vy");
                    for s in &result.samples {
                        println!("{:.3},{:.3},{:.3},{:.3},{:.3}", s.time, s.x, s.y, s.vx, s.vy);
                    }
                }
            }
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         TRAJECTORY RESULTS             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Outcome:           {:<20}║", result.outcome.to_string());
            println!("║ Range:             {:>8.2} m          ║", result.range_m);
            println!("║ Time of Flight:    {:>8.3} s          ║", result.flight_time_s);
            println!("║ Max Height:        {:>8.2} m          ║", result.max_height_m);
            println!("║ Launch Speed:      {:>8.2} m/s        ║", result.launch_speed_mps);
            if result.speed_capped {
                println!("║   (raw {:>8.2} m/s, capped)          ║", result.raw_launch_speed_mps);
            }
            println!("║ Final Speed:       {:>8.2} m/s        ║", result.impact_speed_mps);
            println!("║ Final Energy:      {:>8.2} J          ║", result.impact_energy_j);
            if let Some(v) = reference {
                println!("╠════════════════════════════════════════╣");
                println!("║ VACUUM REFERENCE (no cut-off)          ║");
                println!("║ Range:             {:>8.2} m          ║", v.range_m);
                println!("║ Time of Flight:    {:>8.3} s          ║", v.flight_time_s);
            }
            println!("╚════════════════════════════════════════╝");

            if let Some(rows) = resampled {
                println!("\nTrajectory by distance:");
                println!("┌──────────┬──────────┬──────────┬──────────┬──────────┐");
                println!("│  X (m)   │  Y (m)   │ Time (s) │ Vel(m/s) │  Flags   │");
                println!("├──────────┼──────────┼──────────┼──────────┼──────────┤");
                for s in rows {
                    let flags: Vec<String> = s.flags.iter().map(|f| f.to_string()).collect();
                    println!("│ {:>8.2} │ {:>8.2} │ {:>8.3} │ {:>8.2} │ {:<8} │",
                        s.distance_m, s.height_m, s.time_s, s.speed_mps, flags.join(","));
                }
                println!("└──────────┴──────────┴──────────┴──────────┴──────────┘");
                return Ok(());
            }

            let points = &result.samples;
            if full {
                println!("\nFull Trajectory Samples:");
            } else {
                println!("\nTrajectory Samples (every {:.2}s):", result.flight_time_s / 10.0);
            }
            println!("┌──────────┬──────────┬──────────┬──────────┐");
            println!("│ Time (s) │  X (m)   │  Y (m)   │ Vel(m/s) │");
            println!("├──────────┼──────────┼──────────┼──────────┤");
            let stride = if full { 1 } else { (points.len() / 10).max(1) };
            for (i, p) in points.iter().enumerate() {
                if i % stride == 0 || i == points.len() - 1 {
                    println!("│ {:>8.3} │ {:>8.2} │ {:>8.2} │ {:>8.2} │",
                        p.time, p.x, p.y, p.speed());
                }
            }
            println!("└──────────┴──────────┴──────────┴──────────┘");
        }
    }

    Ok(())
}
