//! Layer table for the 0–51 km standard atmosphere.

use atmo_core::constants::{G0, P0, R_AIR, T0};
use serde::Serialize;

/// Number of modelled layers.
pub const LAYER_COUNT: usize = 5;

/// Top of the modelled region (m). Above it the last layer is extrapolated.
pub const MODEL_CEILING_M: f64 = 51_000.0;

/// Temperature behaviour inside a layer. Rates are magnitudes in K/m.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LapseRate {
    Decreasing(f64),
    Isothermal,
    Increasing(f64),
}

impl LapseRate {
    /// Signed temperature gradient dT/dh (K/m).
    pub fn gradient_k_per_m(self) -> f64 {
        match self {
            Self::Decreasing(rate) => -rate,
            Self::Isothermal => 0.0,
            Self::Increasing(rate) => rate,
        }
    }
}

/// One altitude band `(base, top]` of the piecewise model (the first band includes 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericLayer {
    pub name: &'static str,
    pub base_altitude_m: f64,
    pub top_altitude_m: f64,
    pub base_temperature_k: f64,
    pub lapse: LapseRate,
    /// Pressure at `base_altitude_m`, evaluated once when the table is built.
    pub base_pressure_pa: f64,
}

impl AtmosphericLayer {
    /// Temperature law of this layer (K).
    pub fn temperature(&self, altitude_m: f64) -> f64 {
        self.base_temperature_k
            + self.lapse.gradient_k_per_m() * (altitude_m - self.base_altitude_m)
    }

    /// Pressure law of this layer, anchored at its base (Pa).
    pub fn pressure(&self, altitude_m: f64) -> f64 {
        match self.lapse {
            LapseRate::Isothermal => {
                self.base_pressure_pa
                    * (-G0 * (altitude_m - self.base_altitude_m)
                        / (R_AIR * self.base_temperature_k))
                        .exp()
            }
            lapse => {
                let gradient = lapse.gradient_k_per_m();
                let ratio = self.temperature(altitude_m) / self.base_temperature_k;
                self.base_pressure_pa * ratio.powf(-G0 / (gradient * R_AIR))
            }
        }
    }

    /// True when `altitude_m` falls inside `(base, top]` (or `[0, top]` for the first layer).
    pub fn contains(&self, altitude_m: f64) -> bool {
        let above_base = if self.base_altitude_m == 0.0 {
            altitude_m >= 0.0
        } else {
            altitude_m > self.base_altitude_m
        };
        above_base && altitude_m <= self.top_altitude_m
    }
}

struct LayerDef {
    name: &'static str,
    base_altitude_m: f64,
    top_altitude_m: f64,
    base_temperature_k: f64,
    lapse: LapseRate,
}

const STANDARD_LAYERS: [LayerDef; LAYER_COUNT] = [
    LayerDef {
        name: "troposphere",
        base_altitude_m: 0.0,
        top_altitude_m: 11_000.0,
        base_temperature_k: T0,
        lapse: LapseRate::Decreasing(0.0065),
    },
    LayerDef {
        name: "tropopause",
        base_altitude_m: 11_000.0,
        top_altitude_m: 20_000.0,
        base_temperature_k: 216.65,
        lapse: LapseRate::Isothermal,
    },
    LayerDef {
        name: "stratosphere1",
        base_altitude_m: 20_000.0,
        top_altitude_m: 32_000.0,
        base_temperature_k: 216.65,
        lapse: LapseRate::Increasing(0.001),
    },
    LayerDef {
        name: "stratosphere2",
        base_altitude_m: 32_000.0,
        top_altitude_m: 47_000.0,
        base_temperature_k: 228.65,
        lapse: LapseRate::Increasing(0.0028),
    },
    LayerDef {
        name: "stratopause",
        base_altitude_m: 47_000.0,
        top_altitude_m: MODEL_CEILING_M,
        base_temperature_k: 270.65,
        lapse: LapseRate::Isothermal,
    },
];

/// Build the layer table, chaining each base pressure from the layer below.
pub(crate) fn build_layers() -> [AtmosphericLayer; LAYER_COUNT] {
    let mut base_pressure_pa = P0;
    STANDARD_LAYERS.map(|def| {
        let layer = AtmosphericLayer {
            name: def.name,
            base_altitude_m: def.base_altitude_m,
            top_altitude_m: def.top_altitude_m,
            base_temperature_k: def.base_temperature_k,
            lapse: def.lapse,
            base_pressure_pa,
        };
        base_pressure_pa = layer.pressure(def.top_altitude_m);
        layer
    })
}
