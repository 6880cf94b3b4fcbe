//! Standard atmosphere tables and fixed-wing performance analysis.
//!
//! The physics lives in the member crates (`atmo_isa`, `atmo_performance`);
//! this crate re-exports them next to the sweep helpers and report formatting
//! shared by the command-line tools.

pub mod analysis;
pub mod report;

pub use atmo_config as config;
pub use atmo_core::{aero, constants, limits, sampling, units};
pub use atmo_export as export;
pub use atmo_isa as atmosphere;
pub use atmo_performance as performance;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
