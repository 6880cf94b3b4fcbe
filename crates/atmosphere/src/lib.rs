//! International Standard Atmosphere (ISA) model from sea level to 51 km.
//!
//! The model is a five-layer piecewise description: each layer has a linear
//! (or constant) temperature law and a hydrostatic pressure law anchored at the
//! layer base. Base pressures are chained once when the model is built, so every
//! query is a table lookup plus one closed-form evaluation.
//!
//! Altitudes are geopotential metres. Negative or non-finite altitudes are
//! rejected with [`AtmosphereError::InvalidAltitude`]. Altitudes above 51 km are
//! accepted but evaluated with the last (isothermal) layer extended upward; those
//! values are an extrapolation, not part of the standard.

mod layers;
mod profile;

use atmo_core::constants::{GAMMA, P0, R_AIR, RHO0};
use atmo_core::sampling::inclusive_count;
use atmo_core::units::kelvin_to_celsius;
use log::debug;
use serde::Serialize;
use thiserror::Error;

pub use layers::{AtmosphericLayer, LAYER_COUNT, LapseRate, MODEL_CEILING_M};
pub use profile::AltitudeProfile;

/// Errors raised by atmosphere queries.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum AtmosphereError {
    #[error("altitude must be a finite value >= 0 m (got {0})")]
    InvalidAltitude(f64),
    #[error("profile step must be a finite value > 0 m that keeps the profile within {max} samples (got {0})", max = atmo_core::sampling::MAX_SAMPLES)]
    InvalidStep(f64),
}

/// Atmospheric properties at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericState {
    pub altitude_m: f64,
    pub layer: &'static str,
    pub temperature_k: f64,
    pub temperature_c: f64,
    pub pressure_pa: f64,
    /// Pressure relative to sea level (P/P0).
    pub pressure_ratio: f64,
    pub density_kg_m3: f64,
    /// Density relative to sea level (ρ/ρ0).
    pub density_ratio: f64,
    pub speed_of_sound_m_s: f64,
    /// Set when the altitude lies above the modelled 51 km ceiling.
    pub extrapolated: bool,
}

/// Piecewise ISA model with precomputed layer base pressures.
#[derive(Debug, Clone)]
pub struct AtmosphereModel {
    layers: [AtmosphericLayer; LAYER_COUNT],
}

impl Default for AtmosphereModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AtmosphereModel {
    pub fn new() -> Self {
        let layers = layers::build_layers();
        for layer in &layers {
            debug!(
                "ISA layer {:<14} base {:>7.0} m  T {:>7.2} K  P {:>10.3} Pa",
                layer.name, layer.base_altitude_m, layer.base_temperature_k, layer.base_pressure_pa
            );
        }
        Self { layers }
    }

    /// The layer table in ascending altitude order.
    pub fn layers(&self) -> &[AtmosphericLayer] {
        &self.layers
    }

    /// Layer governing `altitude_m`; the last layer also covers everything above the ceiling.
    pub fn layer_at(&self, altitude_m: f64) -> Result<&AtmosphericLayer, AtmosphereError> {
        let h = check_altitude(altitude_m)?;
        Ok(self.layer_for(h))
    }

    /// Temperature (K).
    pub fn temperature(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        let h = check_altitude(altitude_m)?;
        Ok(self.layer_for(h).temperature(h))
    }

    /// Static pressure (Pa).
    pub fn pressure(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        let h = check_altitude(altitude_m)?;
        Ok(self.layer_for(h).pressure(h))
    }

    /// Density from the ideal gas law, ρ = P / (R·T) (kg/m³).
    pub fn density(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        let h = check_altitude(altitude_m)?;
        let layer = self.layer_for(h);
        Ok(layer.pressure(h) / (R_AIR * layer.temperature(h)))
    }

    /// Speed of sound, a = √(γ·R·T) (m/s).
    pub fn speed_of_sound(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        let t = self.temperature(altitude_m)?;
        Ok((GAMMA * R_AIR * t).sqrt())
    }

    /// All atmospheric properties at `altitude_m` in one record.
    pub fn get_atmospheric_properties(
        &self,
        altitude_m: f64,
    ) -> Result<AtmosphericState, AtmosphereError> {
        let h = check_altitude(altitude_m)?;
        Ok(self.state_at(h))
    }

    /// Lazy profile at `0, step, 2·step, …` up to and including the first
    /// multiple of `step` that is at least `max_altitude_m`.
    pub fn generate_altitude_profile(
        &self,
        max_altitude_m: f64,
        step_m: f64,
    ) -> Result<AltitudeProfile<'_>, AtmosphereError> {
        let max = check_altitude(max_altitude_m)?;
        if !step_m.is_finite() || step_m <= 0.0 {
            return Err(AtmosphereError::InvalidStep(step_m));
        }
        let len = inclusive_count(max, step_m).ok_or(AtmosphereError::InvalidStep(step_m))?;
        let profile = AltitudeProfile::new(self, len, step_m);
        debug!(
            "altitude profile: {} samples, step {} m, max {} m",
            profile.len(),
            step_m,
            max
        );
        Ok(profile)
    }

    fn layer_for(&self, h: f64) -> &AtmosphericLayer {
        self.layers
            .iter()
            .find(|layer| h <= layer.top_altitude_m)
            .unwrap_or(&self.layers[LAYER_COUNT - 1])
    }

    /// Evaluate an already validated altitude.
    pub(crate) fn state_at(&self, h: f64) -> AtmosphericState {
        let layer = self.layer_for(h);
        let temperature_k = layer.temperature(h);
        let pressure_pa = layer.pressure(h);
        let density_kg_m3 = pressure_pa / (R_AIR * temperature_k);
        AtmosphericState {
            altitude_m: h,
            layer: layer.name,
            temperature_k,
            temperature_c: kelvin_to_celsius(temperature_k),
            pressure_pa,
            pressure_ratio: pressure_pa / P0,
            density_kg_m3,
            density_ratio: density_kg_m3 / RHO0,
            speed_of_sound_m_s: (GAMMA * R_AIR * temperature_k).sqrt(),
            extrapolated: h > MODEL_CEILING_M,
        }
    }
}

fn check_altitude(altitude_m: f64) -> Result<f64, AtmosphereError> {
    if altitude_m.is_finite() && altitude_m >= 0.0 {
        Ok(altitude_m)
    } else {
        Err(AtmosphereError::InvalidAltitude(altitude_m))
    }
}
