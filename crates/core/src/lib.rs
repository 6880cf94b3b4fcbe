//! Core units, constants, and shared primitives for the Standard Atmosphere Analyzer workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Specific gas constant for dry air (J/(kg·K)).
    pub const R_AIR: f64 = 287.05;
    /// Standard gravity used by the atmosphere hydrostatics (m/s²).
    pub const G0: f64 = 9.80665;
    /// Gravity used to turn aircraft mass into weight (m/s²).
    pub const WEIGHT_GRAVITY: f64 = 9.81;
    /// Sea-level standard temperature (K).
    pub const T0: f64 = 288.15;
    /// Sea-level standard pressure (Pa).
    pub const P0: f64 = 101_325.0;
    /// Sea-level standard density (kg/m³).
    pub const RHO0: f64 = 1.225;
    /// Ratio of specific heats for air.
    pub const GAMMA: f64 = 1.4;
    /// Offset between the Kelvin and Celsius scales.
    pub const KELVIN_OFFSET: f64 = 273.15;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::KELVIN_OFFSET;

    const FEET_PER_METER: f64 = 3.28084;
    const KNOTS_PER_MPS: f64 = 1.94384;
    const PA_PER_INHG: f64 = 3_386.389;
    const PA_PER_PSI: f64 = 6_894.76;
    const NEWTONS_PER_LBF: f64 = 4.44822;

    /// Convert metres to feet.
    #[inline]
    pub fn meters_to_feet(v: f64) -> f64 {
        v * FEET_PER_METER
    }

    /// Convert feet to metres.
    #[inline]
    pub fn feet_to_meters(v: f64) -> f64 {
        v / FEET_PER_METER
    }

    /// Convert metres per second to knots.
    #[inline]
    pub fn mps_to_knots(v: f64) -> f64 {
        v * KNOTS_PER_MPS
    }

    /// Convert knots to metres per second.
    #[inline]
    pub fn knots_to_mps(v: f64) -> f64 {
        v / KNOTS_PER_MPS
    }

    /// Convert pascals to inches of mercury.
    #[inline]
    pub fn pa_to_inhg(v: f64) -> f64 {
        v / PA_PER_INHG
    }

    /// Convert inches of mercury to pascals.
    #[inline]
    pub fn inhg_to_pa(v: f64) -> f64 {
        v * PA_PER_INHG
    }

    /// Convert pascals to pounds per square inch.
    #[inline]
    pub fn pa_to_psi(v: f64) -> f64 {
        v / PA_PER_PSI
    }

    /// Convert pounds per square inch to pascals.
    #[inline]
    pub fn psi_to_pa(v: f64) -> f64 {
        v * PA_PER_PSI
    }

    #[inline]
    pub fn celsius_to_fahrenheit(v: f64) -> f64 {
        v * 9.0 / 5.0 + 32.0
    }

    #[inline]
    pub fn fahrenheit_to_celsius(v: f64) -> f64 {
        (v - 32.0) * 5.0 / 9.0
    }

    #[inline]
    pub fn kelvin_to_celsius(v: f64) -> f64 {
        v - KELVIN_OFFSET
    }

    /// Convert newtons to pound-force.
    #[inline]
    pub fn newtons_to_lbf(v: f64) -> f64 {
        v / NEWTONS_PER_LBF
    }

    /// Convert pound-force to newtons.
    #[inline]
    pub fn lbf_to_newtons(v: f64) -> f64 {
        v * NEWTONS_PER_LBF
    }
}

/// Flight-condition helpers shared by the performance and analysis layers.
pub mod aero {
    /// Mach number for a true airspeed; zero when the speed of sound is not positive.
    #[inline]
    pub fn mach_number(velocity_m_s: f64, speed_of_sound_m_s: f64) -> f64 {
        if speed_of_sound_m_s > 0.0 {
            velocity_m_s / speed_of_sound_m_s
        } else {
            0.0
        }
    }

    /// Dynamic pressure q = ½ρV² (Pa).
    #[inline]
    pub fn dynamic_pressure(density_kg_m3: f64, velocity_m_s: f64) -> f64 {
        0.5 * density_kg_m3 * velocity_m_s * velocity_m_s
    }
}

/// Input ranges accepted at the user-facing boundary (CLI, catalogs).
///
/// The computation crates only reject physically meaningless input; these
/// bounds are stricter and reflect what the tools are meant to analyse.
pub mod limits {
    /// Highest altitude the tools accept from users (m).
    pub const MAX_ALTITUDE_M: f64 = 50_000.0;
    /// Highest true airspeed the tools accept from users (m/s).
    pub const MAX_VELOCITY_M_S: f64 = 1_000.0;

    /// True when `0 <= altitude <= 50 km`.
    pub fn validate_altitude(altitude_m: f64) -> bool {
        (0.0..=MAX_ALTITUDE_M).contains(&altitude_m)
    }

    /// True when `0 < velocity <= 1000 m/s`.
    pub fn validate_velocity(velocity_m_s: f64) -> bool {
        velocity_m_s > 0.0 && velocity_m_s <= MAX_VELOCITY_M_S
    }
}

/// Grid helpers for evenly spaced sweeps.
pub mod sampling {
    /// Largest grid any sweep or profile may hold.
    pub const MAX_SAMPLES: usize = 1_000_000;

    /// Number of samples in `0, step, 2·step, …` up to and including the first
    /// multiple of `step` that reaches `span`, or `None` when that exceeds
    /// [`MAX_SAMPLES`].
    ///
    /// Ratios within a relative 1e-9 of an integer are treated as exact so that
    /// `span = 10_000, step = 1_000` yields 11 samples rather than 12. `step`
    /// must be positive; a non-positive `span` yields a single sample.
    pub fn inclusive_count(span: f64, step: f64) -> Option<usize> {
        if span <= 0.0 {
            return Some(1);
        }
        let ratio = span / step;
        let snapped = ratio.round();
        let intervals = if (ratio - snapped).abs() <= 1e-9 * snapped.max(1.0) {
            snapped
        } else {
            ratio.ceil()
        };
        if !intervals.is_finite() || intervals >= MAX_SAMPLES as f64 {
            return None;
        }
        Some(intervals as usize + 1)
    }
}
