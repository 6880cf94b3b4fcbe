//! Sweeps over flight conditions built on the performance calculator.
//!
//! Each helper evaluates independent points and stops at the first failing one;
//! no partial result is returned.

use atmo_config::AircraftCatalog;
use atmo_core::aero::{dynamic_pressure, mach_number};
use atmo_core::sampling::inclusive_count;
use atmo_isa::AtmosphereError;
use atmo_performance::{AircraftParameters, PerformanceCalculator, PerformanceError, PerformanceResult};
use serde::Serialize;

/// Evenly spaced values `start, start + step, …` up to and including the first
/// value that reaches `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    start: f64,
    end: f64,
    step: f64,
    len: usize,
}

impl SweepRange {
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, AnalysisError> {
        let valid = start.is_finite()
            && end.is_finite()
            && step.is_finite()
            && step > 0.0
            && end >= start;
        let len = valid
            .then(|| inclusive_count(end - start, step))
            .flatten()
            .ok_or(AnalysisError::InvalidRange { start, end, step })?;
        Ok(Self {
            start,
            end,
            step,
            len,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true; a valid range always holds `start`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Last value the range yields; may overshoot `end` by less than one step.
    pub fn last(&self) -> f64 {
        self.start + (self.len - 1) as f64 * self.step
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + use<> {
        let Self { start, step, len, .. } = *self;
        (0..len).map(move |i| start + i as f64 * step)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid sweep range: start {start}, end {end}, step {step}")]
    InvalidRange { start: f64, end: f64, step: f64 },
    #[error("aircraft catalog is empty")]
    EmptyCatalog,
    #[error(transparent)]
    Atmosphere(#[from] AtmosphereError),
    #[error(transparent)]
    Performance(#[from] PerformanceError),
}

/// A performance result with the flight-condition numbers used for tabulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightSample {
    pub mach: f64,
    pub dynamic_pressure_pa: f64,
    #[serde(flatten)]
    pub performance: PerformanceResult,
}

/// Best lift-to-drag ratio found along an altitude sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CruiseOptimum {
    pub altitude_m: f64,
    pub lift_to_drag_ratio: f64,
    pub sample: FlightSample,
}

/// One catalog aircraft evaluated at a shared flight condition.
#[derive(Debug, Clone, Serialize)]
pub struct AircraftComparison {
    pub id: String,
    pub name: String,
    pub parameters: AircraftParameters,
    pub sample: FlightSample,
}

/// Evaluate one flight condition.
pub fn evaluate(
    calc: &PerformanceCalculator,
    altitude_m: f64,
    velocity_m_s: f64,
    mass_kg: Option<f64>,
) -> Result<FlightSample, AnalysisError> {
    let performance = calc.performance_at_condition(altitude_m, velocity_m_s, mass_kg)?;
    let state = calc.atmosphere().get_atmospheric_properties(altitude_m)?;
    Ok(FlightSample {
        mach: mach_number(velocity_m_s, state.speed_of_sound_m_s),
        dynamic_pressure_pa: dynamic_pressure(state.density_kg_m3, velocity_m_s),
        performance,
    })
}

/// Performance along an altitude sweep at a fixed true airspeed.
pub fn altitude_sweep(
    calc: &PerformanceCalculator,
    altitudes: &SweepRange,
    velocity_m_s: f64,
) -> Result<Vec<FlightSample>, AnalysisError> {
    altitudes
        .values()
        .map(|altitude| evaluate(calc, altitude, velocity_m_s, None))
        .collect()
}

/// Thrust/drag curve: performance along a velocity sweep at a fixed altitude.
pub fn velocity_sweep(
    calc: &PerformanceCalculator,
    altitude_m: f64,
    velocities: &SweepRange,
) -> Result<Vec<FlightSample>, AnalysisError> {
    velocities
        .values()
        .map(|velocity| evaluate(calc, altitude_m, velocity, None))
        .collect()
}

/// Every altitude crossed with every velocity, altitude-major.
pub fn performance_matrix(
    calc: &PerformanceCalculator,
    altitudes: &[f64],
    velocities: &[f64],
) -> Result<Vec<FlightSample>, AnalysisError> {
    let mut samples = Vec::with_capacity(altitudes.len() * velocities.len());
    for &altitude in altitudes {
        for &velocity in velocities {
            samples.push(evaluate(calc, altitude, velocity, None)?);
        }
    }
    Ok(samples)
}

/// Altitude with the highest L/D at `velocity_m_s`; ties keep the lowest altitude.
pub fn optimal_cruise_altitude(
    calc: &PerformanceCalculator,
    altitudes: &SweepRange,
    velocity_m_s: f64,
) -> Result<CruiseOptimum, AnalysisError> {
    let mut best: Option<CruiseOptimum> = None;
    for sample in altitude_sweep(calc, altitudes, velocity_m_s)? {
        let ratio = sample.performance.lift_to_drag_ratio;
        if best.is_none_or(|b| ratio > b.lift_to_drag_ratio) {
            best = Some(CruiseOptimum {
                altitude_m: sample.performance.altitude_m,
                lift_to_drag_ratio: ratio,
                sample,
            });
        }
    }
    // SweepRange is never empty
    best.ok_or(AnalysisError::InvalidRange {
        start: altitudes.start(),
        end: altitudes.end(),
        step: altitudes.step(),
    })
}

/// Evaluate each catalog aircraft at one condition.
///
/// Every entry is merged onto the calculator's current parameters, so fields an
/// entry omits come from that baseline rather than from the previous entry.
pub fn compare_aircraft(
    calc: &PerformanceCalculator,
    catalog: &AircraftCatalog,
    altitude_m: f64,
    velocity_m_s: f64,
) -> Result<Vec<AircraftComparison>, AnalysisError> {
    if catalog.is_empty() {
        return Err(AnalysisError::EmptyCatalog);
    }
    catalog
        .iter()
        .map(|(id, config)| {
            let mut candidate = calc.clone();
            candidate.set_aircraft_parameters(&config.parameters());
            let sample = evaluate(&candidate, altitude_m, velocity_m_s, None)?;
            Ok(AircraftComparison {
                id: id.to_string(),
                name: config.name.clone(),
                parameters: *candidate.aircraft_parameters(),
                sample,
            })
        })
        .collect()
}
