use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{info, warn};
use standard_atmosphere_analyzer::config::{
    AircraftCatalog, AircraftConfig, load_catalog, save_catalog,
};
use standard_atmosphere_analyzer::performance::{AircraftParameters, AircraftParametersUpdate};

/// Inspect and edit aircraft catalogs.
#[derive(Parser, Debug)]
#[command(author, version, about = "Aircraft catalog maintenance")]
struct Cli {
    /// Catalog file or directory
    #[arg(long, default_value = "configs/aircraft.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog ids and names
    List,
    /// Print the resolved parameters of one aircraft
    Show { id: String },
    /// Add or replace an aircraft; unset fields take the default airframe values
    Add {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Parameter value, e.g. `--set wing_area=16.2` (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        overrides: Vec<AircraftParametersUpdate>,
        /// Overwrite an existing entry
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => {
            let catalog = load_catalog(&cli.catalog)?;
            for (id, entry) in catalog.iter() {
                writeln!(out, "{id:<20} {}", entry.name)?;
            }
        }
        Command::Show { id } => {
            let catalog = load_catalog(&cli.catalog)?;
            let entry = catalog.get(&id)?;
            let params = entry.resolve(&AircraftParameters::default());
            writeln!(out, "{} ({id})", entry.name)?;
            if let Some(description) = &entry.description {
                writeln!(out, "{description}")?;
            }
            writeln!(out, "wing_area          {:>12.2} m²", params.wing_area)?;
            writeln!(out, "mass               {:>12.1} kg", params.mass)?;
            writeln!(out, "max_lift_coeff     {:>12.3}", params.max_lift_coeff)?;
            writeln!(out, "zero_lift_drag     {:>12.4}", params.zero_lift_drag)?;
            writeln!(out, "oswald_efficiency  {:>12.3}", params.oswald_efficiency)?;
            writeln!(out, "aspect_ratio       {:>12.2}", params.aspect_ratio)?;
            let missing: Vec<&str> = AircraftParametersUpdate::FIELD_NAMES
                .into_iter()
                .filter(|field| !entry.parameters().changed_fields().any(|f| f == *field))
                .collect();
            if !missing.is_empty() {
                writeln!(out, "(defaults used for: {})", missing.join(", "))?;
            }
        }
        Command::Add {
            id,
            name,
            description,
            overrides,
            force,
        } => {
            let mut catalog = if cli.catalog.exists() {
                load_catalog(&cli.catalog)?
            } else {
                info!("creating new catalog at {}", cli.catalog.display());
                AircraftCatalog::new()
            };
            if catalog.contains(&id) && !force {
                anyhow::bail!("aircraft '{id}' already exists (use --force to replace it)");
            }
            let mut params = AircraftParameters::default();
            overrides
                .into_iter()
                .fold(AircraftParametersUpdate::new(), AircraftParametersUpdate::merged_with)
                .apply_to(&mut params);
            if catalog
                .insert(id.clone(), AircraftConfig::from_parameters(name, description, &params))
                .is_some()
            {
                warn!("replaced existing aircraft '{id}'");
            }
            save_catalog(&cli.catalog, &catalog)?;
            writeln!(out, "saved '{id}' to {}", cli.catalog.display())?;
        }
    }
    out.flush()?;
    Ok(())
}
