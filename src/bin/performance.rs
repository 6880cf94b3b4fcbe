use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use standard_atmosphere_analyzer::analysis::{self, FlightSample, SweepRange};
use standard_atmosphere_analyzer::atmosphere::AtmosphereModel;
use standard_atmosphere_analyzer::config::load_catalog;
use standard_atmosphere_analyzer::export;
use standard_atmosphere_analyzer::limits::{
    MAX_ALTITUDE_M, MAX_VELOCITY_M_S, validate_altitude, validate_velocity,
};
use standard_atmosphere_analyzer::performance::{AircraftParametersUpdate, PerformanceCalculator};
use standard_atmosphere_analyzer::report::{self, UnitSystem};

/// Steady level-flight performance in the standard atmosphere.
#[derive(Parser, Debug)]
#[command(author, version, about = "Aircraft performance calculator (ISA, parabolic drag polar)")]
struct Cli {
    #[command(flatten)]
    aircraft: AircraftArgs,

    /// Print forces and speeds in imperial units
    #[arg(long, global = true, default_value_t = false)]
    imperial: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct AircraftArgs {
    /// Aircraft catalog (JSON, YAML, TOML, or a directory of single-aircraft files)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Aircraft id within the catalog
    #[arg(long, global = true, requires = "catalog")]
    aircraft: Option<String>,

    /// Parameter override, e.g. `--set wing_area=150` (repeatable)
    #[arg(long = "set", global = true, value_name = "FIELD=VALUE")]
    overrides: Vec<AircraftParametersUpdate>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full report at one altitude and velocity
    Point {
        #[arg(long)]
        altitude: f64,
        #[arg(long)]
        velocity: f64,
        /// Mass override in kg (defaults to the aircraft mass)
        #[arg(long)]
        mass: Option<f64>,
    },
    /// Performance against altitude at a fixed velocity
    AltitudeSweep {
        #[arg(long)]
        velocity: f64,
        #[arg(long, default_value_t = 0.0)]
        min_altitude: f64,
        #[arg(long, default_value_t = 15_000.0)]
        max_altitude: f64,
        #[arg(long, default_value_t = 1_000.0)]
        step: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Thrust and drag against velocity at a fixed altitude
    VelocitySweep {
        #[arg(long)]
        altitude: f64,
        #[arg(long, default_value_t = 80.0)]
        min_velocity: f64,
        #[arg(long, default_value_t = 300.0)]
        max_velocity: f64,
        #[arg(long, default_value_t = 10.0)]
        step: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Altitude × velocity grid
    Matrix {
        #[arg(long, default_value_t = 0.0)]
        min_altitude: f64,
        #[arg(long, default_value_t = 15_000.0)]
        max_altitude: f64,
        #[arg(long, default_value_t = 3_000.0)]
        step: f64,
        /// Comma-separated velocities in m/s
        #[arg(long, value_delimiter = ',', default_values_t = [200.0, 250.0, 300.0])]
        velocities: Vec<f64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Altitude with the best L/D at a cruise speed
    OptimalCruise {
        #[arg(long, default_value_t = 250.0)]
        velocity: f64,
        #[arg(long, default_value_t = 5_000.0)]
        min_altitude: f64,
        #[arg(long, default_value_t = 12_500.0)]
        max_altitude: f64,
        #[arg(long, default_value_t = 500.0)]
        step: f64,
    },
    /// Every catalog aircraft at one condition
    Compare {
        #[arg(long, default_value_t = 11_000.0)]
        altitude: f64,
        #[arg(long, default_value_t = 230.0)]
        velocity: f64,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write CSV instead of a table (use '-' for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write JSON instead of a table (use '-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let units = if cli.imperial {
        UnitSystem::Imperial
    } else {
        UnitSystem::Si
    };
    let calc = build_calculator(&cli.aircraft)?;
    info!("aircraft: {}", calc.aircraft_parameters());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Point {
            altitude,
            velocity,
            mass,
        } => {
            ensure_altitude(altitude)?;
            ensure_velocity(velocity)?;
            let state = calc.atmosphere().get_atmospheric_properties(altitude)?;
            let sample = analysis::evaluate(&calc, altitude, velocity, mass)?;
            report::write_point_report(&mut out, &state, &sample)?;
        }
        Command::AltitudeSweep {
            velocity,
            min_altitude,
            max_altitude,
            step,
            output,
        } => {
            ensure_velocity(velocity)?;
            let range = altitude_range(min_altitude, max_altitude, step)?;
            let samples = analysis::altitude_sweep(&calc, &range, velocity)?;
            emit_samples(&mut out, &samples, &output, units)?;
        }
        Command::VelocitySweep {
            altitude,
            min_velocity,
            max_velocity,
            step,
            output,
        } => {
            ensure_altitude(altitude)?;
            let range = velocity_range(min_velocity, max_velocity, step)?;
            let samples = analysis::velocity_sweep(&calc, altitude, &range)?;
            emit_samples(&mut out, &samples, &output, units)?;
        }
        Command::Matrix {
            min_altitude,
            max_altitude,
            step,
            velocities,
            output,
        } => {
            for &velocity in &velocities {
                ensure_velocity(velocity)?;
            }
            let altitudes: Vec<f64> = altitude_range(min_altitude, max_altitude, step)?
                .values()
                .collect();
            let samples = analysis::performance_matrix(&calc, &altitudes, &velocities)?;
            emit_samples(&mut out, &samples, &output, units)?;
        }
        Command::OptimalCruise {
            velocity,
            min_altitude,
            max_altitude,
            step,
        } => {
            ensure_velocity(velocity)?;
            let range = altitude_range(min_altitude, max_altitude, step)?;
            let best = analysis::optimal_cruise_altitude(&calc, &range, velocity)?;
            let p = &best.sample.performance;
            writeln!(out, "Optimal cruise altitude : {:.0} m", best.altitude_m)?;
            writeln!(out, "Best L/D ratio          : {:.2}", best.lift_to_drag_ratio)?;
            writeln!(
                out,
                "Required thrust         : {:.2} kN",
                p.required_thrust_n / 1_000.0
            )?;
            writeln!(out, "Stall speed             : {:.2} m/s", p.stall_speed_m_s)?;
        }
        Command::Compare { altitude, velocity } => {
            ensure_altitude(altitude)?;
            ensure_velocity(velocity)?;
            let path = cli
                .aircraft
                .catalog
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("compare requires --catalog"))?;
            let catalog = load_catalog(path)?;
            let rows = analysis::compare_aircraft(&calc, &catalog, altitude, velocity)?;
            writeln!(
                out,
                "Performance comparison at {altitude:.0} m, {velocity:.1} m/s"
            )?;
            report::write_comparison_table(&mut out, &rows)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Default airframe, then the catalog entry, then `--set` overrides in order.
fn build_calculator(args: &AircraftArgs) -> anyhow::Result<PerformanceCalculator> {
    let mut calc = PerformanceCalculator::new(AtmosphereModel::new());
    if let (Some(path), Some(id)) = (&args.catalog, &args.aircraft) {
        let catalog = load_catalog(path)?;
        let entry = catalog
            .get(id)
            .with_context(|| format!("while reading {}", path.display()))?;
        info!("using catalog aircraft '{}' ({})", id, entry.name);
        calc.set_aircraft_parameters(&entry.parameters());
    }
    let overrides = args
        .overrides
        .iter()
        .fold(AircraftParametersUpdate::new(), |acc, u| acc.merged_with(*u));
    calc.set_aircraft_parameters(&overrides);
    Ok(calc)
}

/// The last sample can overshoot `max`, so it is checked as well.
fn altitude_range(min: f64, max: f64, step: f64) -> anyhow::Result<SweepRange> {
    ensure_altitude(min)?;
    ensure_altitude(max)?;
    let range = SweepRange::new(min, max, step)?;
    ensure_altitude(range.last())?;
    Ok(range)
}

fn velocity_range(min: f64, max: f64, step: f64) -> anyhow::Result<SweepRange> {
    ensure_velocity(min)?;
    ensure_velocity(max)?;
    let range = SweepRange::new(min, max, step)?;
    ensure_velocity(range.last())?;
    Ok(range)
}

fn emit_samples(
    out: &mut dyn Write,
    samples: &[FlightSample],
    output: &OutputArgs,
    units: UnitSystem,
) -> anyhow::Result<()> {
    let mut wrote_file = false;
    if let Some(path) = &output.output {
        let mut writer = export::writer_for_path(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        report::write_samples_csv(&mut *writer, samples)?;
        writer.flush()?;
        wrote_file = true;
    }
    if let Some(path) = &output.json {
        export::json::write_pretty(path, samples)
            .with_context(|| format!("cannot write {}", path.display()))?;
        wrote_file = true;
    }
    if !wrote_file {
        report::write_samples_table(out, samples, units)?;
    }
    Ok(())
}

fn ensure_altitude(altitude: f64) -> anyhow::Result<()> {
    if !validate_altitude(altitude) {
        anyhow::bail!("altitude must be between 0 and {MAX_ALTITUDE_M} m (got {altitude})");
    }
    Ok(())
}

fn ensure_velocity(velocity: f64) -> anyhow::Result<()> {
    if !validate_velocity(velocity) {
        anyhow::bail!("velocity must be above 0 and at most {MAX_VELOCITY_M_S} m/s (got {velocity})");
    }
    Ok(())
}
