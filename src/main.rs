use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use planar_electrical::{
    copper_weight_to_thickness, creepage, estimate_turn_resistances, Classification, COPPER,
};
use planar_geometry::{primitives::DEFAULT_MAX_ANGLE, Point};
use planar_spiral::{Allocation, Spiral, SpiralParams};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod report;

use config::PlanarConfig;
use error::CliError;
use report::{OutlineExport, SpiralReport};

const DEFAULT_CLASSIFICATION: Classification = Classification::B2;
const DEFAULT_COPPER_WEIGHT: f64 = 1.0;
const DEFAULT_TEMPERATURE: f64 = 25.0;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG is used otherwise)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a spiral winding and estimate its DC resistance
    Spiral(SpiralArgs),
    /// Look up the minimum conductor spacing for a working voltage
    Creepage(CreepageArgs),
}

#[derive(Args)]
struct SpiralArgs {
    /// Winding configuration file (YAML or JSON)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    center_x: Option<f64>,
    #[arg(long)]
    center_y: Option<f64>,
    /// Inner radius of the annulus (mm)
    #[arg(long)]
    inner_radius: Option<f64>,
    /// Outer radius of the annulus (mm)
    #[arg(long)]
    outer_radius: Option<f64>,
    #[arg(long)]
    turns: Option<usize>,
    /// Minimum spacing between turns (mm)
    #[arg(long)]
    spacing: Option<f64>,
    /// Working voltage; its creepage distance is the minimum spacing
    #[arg(long)]
    voltage: Option<f64>,
    /// Conductor classification for the creepage lookup (B1..B4, A5..A7)
    #[arg(long = "class")]
    classification: Option<Classification>,
    #[arg(long)]
    corner_radius: Option<f64>,
    /// Manufacturing minimum trace width (mm)
    #[arg(long)]
    min_trace_width: Option<f64>,
    /// minimum-resistance, uniform or geometric
    #[arg(long)]
    allocation: Option<Allocation>,
    /// Copper thickness (mm)
    #[arg(long, conflicts_with = "copper_weight")]
    thickness: Option<f64>,
    /// Copper weight (oz)
    #[arg(long)]
    copper_weight: Option<f64>,
    /// Operating temperature (°C)
    #[arg(long)]
    temperature: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    /// Write the outline primitives and a sampled polyline to FILE as JSON
    #[arg(long, value_name = "FILE")]
    outline: Option<PathBuf>,
    /// Largest angular step when sampling arcs (rad)
    #[arg(long, default_value_t = DEFAULT_MAX_ANGLE)]
    max_angle: f64,
}

impl SpiralArgs {
    fn overrides(&self) -> PlanarConfig {
        let center = match (self.center_x, self.center_y) {
            (None, None) => None,
            (x, y) => Some(Point::new(x.unwrap_or(0.0), y.unwrap_or(0.0))),
        };
        PlanarConfig {
            center,
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            turns: self.turns,
            spacing: self.spacing,
            voltage: self.voltage,
            classification: self.classification,
            corner_radius: self.corner_radius,
            min_trace_width: self.min_trace_width,
            allocation: self.allocation,
            thickness: self.thickness,
            copper_weight: self.copper_weight,
            temperature: self.temperature,
        }
    }
}

#[derive(Args)]
struct CreepageArgs {
    /// Working voltage (V)
    #[arg(long)]
    voltage: f64,
    #[arg(long = "class", default_value_t = DEFAULT_CLASSIFICATION)]
    classification: Classification,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                CliError::usage(err.to_string()).exit_code()
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Spiral(args) => run_spiral(&args),
        Command::Creepage(args) => run_creepage(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .try_init();
}

/// Spacing, thickness and temperature resolved from a merged config.
struct Resolved {
    params: SpiralParams,
    thickness: f64,
    temperature: f64,
}

fn resolve(config: &PlanarConfig) -> Result<Resolved, CliError> {
    let missing = |flag: &str| CliError::usage(format!("missing required parameter --{flag}"));

    let clearance = match config.voltage {
        Some(voltage) => {
            let class = config.classification.unwrap_or(DEFAULT_CLASSIFICATION);
            let d = creepage(voltage, class)?;
            debug!(voltage, %class, creepage = d, "creepage lookup");
            Some(d)
        }
        None => None,
    };
    let min_spacing = match (config.spacing, clearance) {
        (Some(spacing), Some(clearance)) => spacing.max(clearance),
        (Some(spacing), None) => spacing,
        (None, Some(clearance)) => clearance,
        (None, None) => return Err(missing("spacing (or --voltage)")),
    };

    let defaults = SpiralParams::builder()
        .inner_radius(config.inner_radius.ok_or_else(|| missing("inner-radius"))?)
        .outer_radius(config.outer_radius.ok_or_else(|| missing("outer-radius"))?)
        .num_turns(config.turns.ok_or_else(|| missing("turns"))?)
        .min_spacing(min_spacing)
        .build();
    let params = SpiralParams {
        center: config.center.unwrap_or(defaults.center),
        corner_radius: config.corner_radius.unwrap_or(defaults.corner_radius),
        min_trace_width: config.min_trace_width.unwrap_or(defaults.min_trace_width),
        allocation: config.allocation.unwrap_or(defaults.allocation),
        ..defaults
    };

    let thickness = config.thickness.unwrap_or_else(|| {
        copper_weight_to_thickness(config.copper_weight.unwrap_or(DEFAULT_COPPER_WEIGHT))
    });

    Ok(Resolved {
        params,
        thickness,
        temperature: config.temperature.unwrap_or(DEFAULT_TEMPERATURE),
    })
}

fn run_spiral(args: &SpiralArgs) -> Result<(), CliError> {
    let file = match &args.config {
        Some(path) => PlanarConfig::load(path).map_err(|e| CliError::input(format!("{e:#}")))?,
        None => PlanarConfig::default(),
    };
    let Resolved {
        params,
        thickness,
        temperature,
    } = resolve(&file.merge(args.overrides()))?;

    let spiral = Spiral::new(&params)?;
    let resistances = estimate_turn_resistances(&spiral, thickness, temperature, &COPPER)?;
    let report = SpiralReport::new(&spiral, &resistances, thickness, temperature);
    info!(
        turns = spiral.num_turns(),
        total = report.total_resistance,
        "spiral built"
    );

    if let Some(path) = &args.outline {
        if !(args.max_angle.is_finite() && args.max_angle > 0.0) {
            return Err(CliError::usage("--max-angle must be positive"));
        }
        write_outline(&spiral, path, args.max_angle)
            .map_err(|e| CliError::processing(format!("{e:#}")))?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::processing(format!("Failed to serialize report: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn write_outline(spiral: &Spiral, path: &std::path::Path, max_angle: f64) -> anyhow::Result<()> {
    let export = OutlineExport::new(spiral, max_angle);
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize outline")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write outline: {path:?}"))?;
    debug!(path = %path.display(), points = export.polyline.len(), "wrote outline");
    Ok(())
}

fn run_creepage(args: &CreepageArgs) -> Result<(), CliError> {
    let distance = creepage(args.voltage, args.classification)?;
    if args.json {
        let json = serde_json::json!({
            "voltage": args.voltage,
            "classification": args.classification,
            "creepage": distance,
        });
        println!("{json}");
    } else {
        println!(
            "{distance} mm ({}: {})",
            args.classification,
            args.classification.description()
        );
    }
    Ok(())
}
