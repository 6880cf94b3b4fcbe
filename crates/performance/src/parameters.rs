//! Aircraft parameter record and typed partial updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PerformanceError;

/// Airframe description used by the performance calculator.
///
/// Values are taken as given; nothing here checks physical plausibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AircraftParameters {
    /// Wing reference area (m²).
    pub wing_area: f64,
    /// Mass (kg).
    pub mass: f64,
    pub max_lift_coeff: f64,
    pub zero_lift_drag: f64,
    /// Oswald span-efficiency factor.
    pub oswald_efficiency: f64,
    pub aspect_ratio: f64,
}

impl Default for AircraftParameters {
    /// Narrow-body twinjet (737-800 class).
    fn default() -> Self {
        Self {
            wing_area: 125.0,
            mass: 70_000.0,
            max_lift_coeff: 1.8,
            zero_lift_drag: 0.02,
            oswald_efficiency: 0.85,
            aspect_ratio: 9.5,
        }
    }
}

/// Partial update of [`AircraftParameters`]; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AircraftParametersUpdate {
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
}

impl AircraftParametersUpdate {
    /// Names accepted by [`AircraftParametersUpdate::set_field`].
    pub const FIELD_NAMES: [&'static str; 6] = [
        "wing_area",
        "mass",
        "max_lift_coeff",
        "zero_lift_drag",
        "oswald_efficiency",
        "aspect_ratio",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wing_area(mut self, value: f64) -> Self {
        self.wing_area = Some(value);
        self
    }

    pub fn with_mass(mut self, value: f64) -> Self {
        self.mass = Some(value);
        self
    }

    pub fn with_max_lift_coeff(mut self, value: f64) -> Self {
        self.max_lift_coeff = Some(value);
        self
    }

    pub fn with_zero_lift_drag(mut self, value: f64) -> Self {
        self.zero_lift_drag = Some(value);
        self
    }

    pub fn with_oswald_efficiency(mut self, value: f64) -> Self {
        self.oswald_efficiency = Some(value);
        self
    }

    pub fn with_aspect_ratio(mut self, value: f64) -> Self {
        self.aspect_ratio = Some(value);
        self
    }

    /// Set one field by name, rejecting names that are not aircraft parameters.
    pub fn set_field(&mut self, name: &str, value: f64) -> Result<(), PerformanceError> {
        let slot = match name {
            "wing_area" => &mut self.wing_area,
            "mass" => &mut self.mass,
            "max_lift_coeff" => &mut self.max_lift_coeff,
            "zero_lift_drag" => &mut self.zero_lift_drag,
            "oswald_efficiency" => &mut self.oswald_efficiency,
            "aspect_ratio" => &mut self.aspect_ratio,
            other => return Err(PerformanceError::UnknownParameter(other.to_string())),
        };
        *slot = Some(value);
        Ok(())
    }

    /// Build an update from an explicit list of `(field, value)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, PerformanceError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut update = Self::default();
        for (name, value) in pairs {
            update.set_field(name, value)?;
        }
        Ok(update)
    }

    /// Fields of `later` win over fields of `self`.
    pub fn merged_with(self, later: Self) -> Self {
        Self {
            wing_area: later.wing_area.or(self.wing_area),
            mass: later.mass.or(self.mass),
            max_lift_coeff: later.max_lift_coeff.or(self.max_lift_coeff),
            zero_lift_drag: later.zero_lift_drag.or(self.zero_lift_drag),
            oswald_efficiency: later.oswald_efficiency.or(self.oswald_efficiency),
            aspect_ratio: later.aspect_ratio.or(self.aspect_ratio),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().next().is_none()
    }

    /// Names of the fields this update sets.
    pub fn changed_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            self.wing_area,
            self.mass,
            self.max_lift_coeff,
            self.zero_lift_drag,
            self.oswald_efficiency,
            self.aspect_ratio,
        ]
        .into_iter()
        .zip(Self::FIELD_NAMES)
        .filter_map(|(value, name)| value.map(|_| name))
    }

    /// Overwrite the provided fields of `params`.
    pub fn apply_to(&self, params: &mut AircraftParameters) {
        if let Some(v) = self.wing_area {
            params.wing_area = v;
        }
        if let Some(v) = self.mass {
            params.mass = v;
        }
        if let Some(v) = self.max_lift_coeff {
            params.max_lift_coeff = v;
        }
        if let Some(v) = self.zero_lift_drag {
            params.zero_lift_drag = v;
        }
        if let Some(v) = self.oswald_efficiency {
            params.oswald_efficiency = v;
        }
        if let Some(v) = self.aspect_ratio {
            params.aspect_ratio = v;
        }
    }
}

impl From<AircraftParameters> for AircraftParametersUpdate {
    fn from(params: AircraftParameters) -> Self {
        Self {
            wing_area: Some(params.wing_area),
            mass: Some(params.mass),
            max_lift_coeff: Some(params.max_lift_coeff),
            zero_lift_drag: Some(params.zero_lift_drag),
            oswald_efficiency: Some(params.oswald_efficiency),
            aspect_ratio: Some(params.aspect_ratio),
        }
    }
}

/// Parses `field=value[,field=value...]`, e.g. `wing_area=150,mass=80000`.
impl FromStr for AircraftParametersUpdate {
    type Err = PerformanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut update = Self::default();
        for assignment in s.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            let (name, raw) = assignment
                .split_once('=')
                .ok_or_else(|| PerformanceError::InvalidParameterValue {
                    field: assignment.to_string(),
                    value: String::new(),
                })?;
            let name = name.trim();
            let raw = raw.trim();
            let value: f64 = raw
                .parse()
                .map_err(|_| PerformanceError::InvalidParameterValue {
                    field: name.to_string(),
                    value: raw.to_string(),
                })?;
            update.set_field(name, value)?;
        }
        Ok(update)
    }
}

impl fmt::Display for AircraftParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S={:.2} m², m={:.1} kg, CLmax={:.3}, CD0={:.4}, e={:.3}, AR={:.2}",
            self.wing_area,
            self.mass,
            self.max_lift_coeff,
            self.zero_lift_drag,
            self.oswald_efficiency,
            self.aspect_ratio
        )
    }
}
