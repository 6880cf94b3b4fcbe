//! Steady, level, unaccelerated flight performance from a parabolic drag polar.
//!
//! The calculator owns one [`AircraftParameters`] record and one
//! [`AtmosphereModel`]. Every query reads the current parameters and recomputes
//! from scratch; only [`PerformanceCalculator::set_aircraft_parameters`] and
//! [`PerformanceCalculator::replace_aircraft_parameters`] mutate state. Callers
//! sharing a calculator across threads must synchronise those writers with
//! readers themselves (e.g. one calculator per session or an `RwLock`).

mod parameters;

use std::f64::consts::PI;

use atmo_core::constants::WEIGHT_GRAVITY;
use atmo_isa::{AtmosphereError, AtmosphereModel};
use log::info;
use serde::Serialize;
use thiserror::Error;

pub use parameters::{AircraftParameters, AircraftParametersUpdate};

/// Errors raised by performance queries and parameter updates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PerformanceError {
    #[error("velocity must be a finite value > 0 m/s (got {0})")]
    InvalidVelocity(f64),
    #[error("mass must be finite (got {0})")]
    InvalidMass(f64),
    #[error("unknown aircraft parameter '{0}'")]
    UnknownParameter(String),
    #[error("invalid value '{value}' for aircraft parameter '{field}'")]
    InvalidParameterValue { field: String, value: String },
    #[error(transparent)]
    Atmosphere(#[from] AtmosphereError),
}

/// Every derived quantity at one flight condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceResult {
    pub altitude_m: f64,
    pub velocity_m_s: f64,
    pub mass_kg: f64,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    pub lift_force_n: f64,
    pub drag_force_n: f64,
    pub lift_to_drag_ratio: f64,
    pub required_thrust_n: f64,
    pub stall_speed_m_s: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PerformanceCalculator {
    atmosphere: AtmosphereModel,
    parameters: AircraftParameters,
}

impl PerformanceCalculator {
    /// Calculator with the default airframe.
    pub fn new(atmosphere: AtmosphereModel) -> Self {
        Self::with_parameters(atmosphere, AircraftParameters::default())
    }

    pub fn with_parameters(atmosphere: AtmosphereModel, parameters: AircraftParameters) -> Self {
        Self {
            atmosphere,
            parameters,
        }
    }

    pub fn atmosphere(&self) -> &AtmosphereModel {
        &self.atmosphere
    }

    pub fn aircraft_parameters(&self) -> &AircraftParameters {
        &self.parameters
    }

    /// Merge `update` into the current parameters; fields it leaves unset are kept.
    pub fn set_aircraft_parameters(&mut self, update: &AircraftParametersUpdate) {
        update.apply_to(&mut self.parameters);
        if !update.is_empty() {
            let fields: Vec<&str> = update.changed_fields().collect();
            info!(
                "aircraft parameters updated ({}): {}",
                fields.join(", "),
                self.parameters
            );
        }
    }

    /// Replace the parameter record wholesale.
    pub fn replace_aircraft_parameters(&mut self, parameters: AircraftParameters) {
        self.parameters = parameters;
        info!("aircraft parameters replaced: {}", self.parameters);
    }

    /// Lift coefficient needed to carry the weight, CL = 2·m·g / (ρ·V²·S).
    pub fn lift_coefficient(
        &self,
        altitude_m: f64,
        velocity_m_s: f64,
        mass_kg: Option<f64>,
    ) -> Result<f64, PerformanceError> {
        let velocity = check_velocity(velocity_m_s)?;
        let mass = self.resolve_mass(mass_kg)?;
        let rho = self.atmosphere.density(altitude_m)?;
        let weight = mass * WEIGHT_GRAVITY;
        Ok(2.0 * weight / (rho * velocity * velocity * self.parameters.wing_area))
    }

    /// Parabolic drag polar, CD = CD0 + CL² / (π·AR·e).
    pub fn drag_coefficient(&self, lift_coefficient: f64) -> f64 {
        let p = &self.parameters;
        p.zero_lift_drag
            + lift_coefficient * lift_coefficient / (PI * p.aspect_ratio * p.oswald_efficiency)
    }

    /// L = ½·ρ·V²·S·CL (N).
    pub fn lift_force(
        &self,
        altitude_m: f64,
        velocity_m_s: f64,
        lift_coefficient: f64,
    ) -> Result<f64, PerformanceError> {
        Ok(self.reference_force(altitude_m, velocity_m_s)? * lift_coefficient)
    }

    /// D = ½·ρ·V²·S·CD (N).
    pub fn drag_force(
        &self,
        altitude_m: f64,
        velocity_m_s: f64,
        drag_coefficient: f64,
    ) -> Result<f64, PerformanceError> {
        Ok(self.reference_force(altitude_m, velocity_m_s)? * drag_coefficient)
    }

    /// CL / CD, or 0 when CD is not positive.
    pub fn lift_to_drag_ratio(lift_coefficient: f64, drag_coefficient: f64) -> f64 {
        if drag_coefficient > 0.0 {
            lift_coefficient / drag_coefficient
        } else {
            0.0
        }
    }

    /// Thrust for steady level flight, which equals the drag at the trimmed CL.
    pub fn required_thrust(
        &self,
        altitude_m: f64,
        velocity_m_s: f64,
        mass_kg: Option<f64>,
    ) -> Result<f64, PerformanceError> {
        let cl = self.lift_coefficient(altitude_m, velocity_m_s, mass_kg)?;
        let cd = self.drag_coefficient(cl);
        self.drag_force(altitude_m, velocity_m_s, cd)
    }

    /// 1g stall speed, V = √(2·m·g / (ρ·S·CLmax)).
    pub fn stall_speed(&self, altitude_m: f64, mass_kg: Option<f64>) -> Result<f64, PerformanceError> {
        let mass = self.resolve_mass(mass_kg)?;
        let rho = self.atmosphere.density(altitude_m)?;
        let weight = mass * WEIGHT_GRAVITY;
        Ok((2.0 * weight / (rho * self.parameters.wing_area * self.parameters.max_lift_coeff)).sqrt())
    }

    /// Evaluate the whole CL → CD → forces chain once at one condition.
    pub fn performance_at_condition(
        &self,
        altitude_m: f64,
        velocity_m_s: f64,
        mass_kg: Option<f64>,
    ) -> Result<PerformanceResult, PerformanceError> {
        let mass = self.resolve_mass(mass_kg)?;
        let cl = self.lift_coefficient(altitude_m, velocity_m_s, Some(mass))?;
        let cd = self.drag_coefficient(cl);
        let lift = self.lift_force(altitude_m, velocity_m_s, cl)?;
        let drag = self.drag_force(altitude_m, velocity_m_s, cd)?;
        let stall = self.stall_speed(altitude_m, Some(mass))?;

        Ok(PerformanceResult {
            altitude_m,
            velocity_m_s,
            mass_kg: mass,
            lift_coefficient: cl,
            drag_coefficient: cd,
            lift_force_n: lift,
            drag_force_n: drag,
            lift_to_drag_ratio: Self::lift_to_drag_ratio(cl, cd),
            // thrust balances drag in steady level flight
            required_thrust_n: drag,
            stall_speed_m_s: stall,
        })
    }

    fn resolve_mass(&self, mass_kg: Option<f64>) -> Result<f64, PerformanceError> {
        let mass = mass_kg.unwrap_or(self.parameters.mass);
        if mass.is_finite() {
            Ok(mass)
        } else {
            Err(PerformanceError::InvalidMass(mass))
        }
    }

    /// ½·ρ·V²·S, the force per unit coefficient.
    fn reference_force(&self, altitude_m: f64, velocity_m_s: f64) -> Result<f64, PerformanceError> {
        let velocity = check_velocity(velocity_m_s)?;
        let rho = self.atmosphere.density(altitude_m)?;
        Ok(0.5 * rho * velocity * velocity * self.parameters.wing_area)
    }
}

fn check_velocity(velocity_m_s: f64) -> Result<f64, PerformanceError> {
    if velocity_m_s.is_finite() && velocity_m_s > 0.0 {
        Ok(velocity_m_s)
    } else {
        Err(PerformanceError::InvalidVelocity(velocity_m_s))
    }
}
