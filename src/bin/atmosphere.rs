use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use standard_atmosphere_analyzer::atmosphere::{AtmosphereModel, AtmosphericState};
use standard_atmosphere_analyzer::export;
use standard_atmosphere_analyzer::limits::{MAX_ALTITUDE_M, validate_altitude};
use standard_atmosphere_analyzer::report::{self, UnitSystem};

/// Tabulate the International Standard Atmosphere from sea level upward.
#[derive(Parser, Debug)]
#[command(author, version, about = "ISA profile table / CSV / JSON generator")]
struct Cli {
    /// Top of the profile in metres
    #[arg(long, default_value_t = 20_000.0)]
    max_altitude: f64,

    /// Profile step in metres
    #[arg(long, default_value_t = 500.0)]
    step: f64,

    /// Report a single altitude instead of a profile
    #[arg(long)]
    altitude: Option<f64>,

    /// Print the console table in feet, °F, inHg and knots
    #[arg(long, default_value_t = false)]
    imperial: bool,

    /// Write the profile as CSV (use '-' for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the profile as JSON (use '-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let model = AtmosphereModel::new();
    let units = if cli.imperial {
        UnitSystem::Imperial
    } else {
        UnitSystem::Si
    };

    let states: Vec<AtmosphericState> = match cli.altitude {
        Some(altitude) => {
            ensure_altitude(altitude)?;
            vec![model.get_atmospheric_properties(altitude)?]
        }
        None => {
            ensure_altitude(cli.max_altitude)?;
            let profile = model.generate_altitude_profile(cli.max_altitude, cli.step)?;
            ensure_altitude(profile.last_altitude_m())?;
            profile.collect()
        }
    };
    info!("evaluated {} altitudes", states.len());

    let mut wrote_file = false;
    if let Some(path) = &cli.output {
        let mut writer = export::writer_for_path(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        report::write_profile_csv(&mut *writer, &states)?;
        writer.flush()?;
        wrote_file = true;
    }
    if let Some(path) = &cli.json {
        export::json::write_pretty(path, &states)
            .with_context(|| format!("cannot write {}", path.display()))?;
        wrote_file = true;
    }

    if !wrote_file {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        report::write_profile_table(&mut out, &states, units)?;
    }
    Ok(())
}

fn ensure_altitude(altitude: f64) -> anyhow::Result<()> {
    if !validate_altitude(altitude) {
        anyhow::bail!("altitude must be between 0 and {MAX_ALTITUDE_M} m (got {altitude})");
    }
    Ok(())
}
