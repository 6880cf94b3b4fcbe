//! Aircraft catalog models and loaders for the Standard Atmosphere Analyzer.
//!
//! A catalog is a JSON object keyed by aircraft id. The wrapped form
//! `{"aircraft_types": {...}}` is accepted as well. YAML and TOML files with the
//! same shape load too, and a directory loads one aircraft per file (keyed by
//! file stem).

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use atmo_performance::{AircraftParameters, AircraftParametersUpdate};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One catalog entry. Numeric fields are optional; missing ones keep whatever
/// the calculator already holds when the entry is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AircraftConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wing_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lift_coeff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero_lift_drag: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oswald_efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AircraftConfig {
    /// Fully specified entry from a parameter record.
    pub fn from_parameters(
        name: impl Into<String>,
        description: Option<String>,
        params: &AircraftParameters,
    ) -> Self {
        Self {
            name: name.into(),
            wing_area: Some(params.wing_area),
            mass: Some(params.mass),
            max_lift_coeff: Some(params.max_lift_coeff),
            zero_lift_drag: Some(params.zero_lift_drag),
            oswald_efficiency: Some(params.oswald_efficiency),
            aspect_ratio: Some(params.aspect_ratio),
            description,
        }
    }

    /// The numeric fields as a merge-update.
    pub fn parameters(&self) -> AircraftParametersUpdate {
        AircraftParametersUpdate {
            wing_area: self.wing_area,
            mass: self.mass,
            max_lift_coeff: self.max_lift_coeff,
            zero_lift_drag: self.zero_lift_drag,
            oswald_efficiency: self.oswald_efficiency,
            aspect_ratio: self.aspect_ratio,
        }
    }

    /// Parameters obtained by layering this entry over `base`.
    pub fn resolve(&self, base: &AircraftParameters) -> AircraftParameters {
        let mut params = *base;
        self.parameters().apply_to(&mut params);
        params
    }
}

/// Aircraft entries keyed by id, in sorted id order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AircraftCatalog {
    aircraft: BTreeMap<String, AircraftConfig>,
}

impl AircraftCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.aircraft.contains_key(id)
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Result<&AircraftConfig, ConfigError> {
        self.aircraft
            .get(id)
            .ok_or_else(|| ConfigError::UnknownAircraft(id.to_string()))
    }

    /// Insert or overwrite an entry, returning the previous one.
    pub fn insert(&mut self, id: impl Into<String>, config: AircraftConfig) -> Option<AircraftConfig> {
        self.aircraft.insert(id.into(), config)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AircraftConfig)> {
        self.aircraft.iter().map(|(id, cfg)| (id.as_str(), cfg))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.aircraft.keys().map(String::as_str)
    }
}

impl FromIterator<(String, AircraftConfig)> for AircraftCatalog {
    fn from_iter<I: IntoIterator<Item = (String, AircraftConfig)>>(iter: I) -> Self {
        Self {
            aircraft: iter.into_iter().collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedCatalog {
    aircraft_types: BTreeMap<String, AircraftConfig>,
}

/// Errors that can occur while loading or saving catalogs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("aircraft configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("aircraft configuration file is empty: {}", path.display())]
    EmptyFile { path: PathBuf },
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("aircraft '{0}' not found in catalog")]
    UnknownAircraft(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Load an aircraft catalog from a file or a directory of single-aircraft files.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<AircraftCatalog, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let catalog = if path.is_dir() {
        read_dir_records(path)?
    } else {
        let format = Format::from_path(path).unwrap_or(Format::Json);
        let contents = read_contents(path)?;
        decode_catalog(path, format, &contents)?
    };
    info!(
        "loaded {} aircraft from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Load the catalog at `path` and return the entry `id`.
pub fn load_aircraft<P: AsRef<Path>>(path: P, id: &str) -> Result<AircraftConfig, ConfigError> {
    let catalog = load_catalog(path)?;
    catalog.get(id).cloned()
}

/// Write a catalog as pretty-printed JSON, creating parent directories.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &AircraftCatalog) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, catalog).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(writer).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    debug!("saved {} aircraft to {}", catalog.len(), path.display());
    Ok(())
}

fn read_contents(path: &Path) -> Result<String, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Err(ConfigError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(contents)
}

fn decode_catalog(path: &Path, format: Format, contents: &str) -> Result<AircraftCatalog, ConfigError> {
    let aircraft = match format {
        Format::Json => flat_or_wrapped(
            serde_json::from_str::<serde_json::Value>(contents)
                .is_ok_and(|v| v.get(WRAPPER_KEY).is_some()),
            || serde_json::from_str(contents),
            || serde_json::from_str::<WrappedCatalog>(contents),
        )
        .map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        Format::Yaml => flat_or_wrapped(
            serde_yaml::from_str::<serde_yaml::Value>(contents)
                .is_ok_and(|v| v.get(WRAPPER_KEY).is_some()),
            || serde_yaml::from_str(contents),
            || serde_yaml::from_str::<WrappedCatalog>(contents),
        )
        .map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
        Format::Toml => flat_or_wrapped(
            contents
                .parse::<toml::Table>()
                .is_ok_and(|t| t.contains_key(WRAPPER_KEY)),
            || toml::from_str(contents),
            || toml::from_str::<WrappedCatalog>(contents),
        )
        .map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?,
    };
    Ok(AircraftCatalog { aircraft })
}

const WRAPPER_KEY: &str = "aircraft_types";

/// Try the layout the top level points at first, and report that layout's
/// error when both fail.
fn flat_or_wrapped<E>(
    has_wrapper_key: bool,
    flat: impl FnOnce() -> Result<BTreeMap<String, AircraftConfig>, E>,
    wrapped: impl FnOnce() -> Result<WrappedCatalog, E>,
) -> Result<BTreeMap<String, AircraftConfig>, E> {
    if has_wrapper_key {
        match wrapped() {
            Ok(w) => Ok(w.aircraft_types),
            Err(err) => flat().map_err(|_| err),
        }
    } else {
        match flat() {
            Ok(aircraft) => Ok(aircraft),
            Err(err) => wrapped().map(|w| w.aircraft_types).map_err(|_| err),
        }
    }
}

fn read_dir_records(dir: &Path) -> Result<AircraftCatalog, ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && Format::from_path(&path).is_some() {
            entries.push(path);
        }
    }
    entries.sort();

    let mut catalog = AircraftCatalog::new();
    for path in entries {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        let contents = read_contents(&path)?;
        let record: AircraftConfig = match Format::from_path(&path) {
            Some(Format::Yaml) => {
                serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
                    path: path.clone(),
                    source,
                })?
            }
            Some(Format::Toml) => toml::from_str(&contents).map_err(|source| ConfigError::Toml {
                path: path.clone(),
                source,
            })?,
            _ => serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
                path: path.clone(),
                source,
            })?,
        };
        debug!("aircraft '{}' read from {}", id, path.display());
        catalog.insert(id, record);
    }
    Ok(catalog)
}
