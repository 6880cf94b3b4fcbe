//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    debug!("writing {}", path.display());
    Ok(Box::new(BufWriter::new(file)))
}

pub mod profile {
    use std::io::{self, Write};

    /// Column names of the atmosphere profile CSV, in order.
    pub const COLUMNS: [&str; 9] = [
        "altitude_m",
        "layer",
        "temperature_k",
        "temperature_c",
        "pressure_pa",
        "pressure_ratio",
        "density_kg_m3",
        "density_ratio",
        "speed_of_sound_m_s",
    ];

    /// Write the standard profile CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", COLUMNS.join(","))
    }

    /// CSV row emitted by the profile exporter.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub altitude_m: f64,
        pub layer: &'a str,
        pub temperature_k: f64,
        pub temperature_c: f64,
        pub pressure_pa: f64,
        pub pressure_ratio: f64,
        pub density_kg_m3: f64,
        pub density_ratio: f64,
        pub speed_of_sound_m_s: f64,
    }

    impl Record<'_> {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{:.4},{:.4},{:.4},{:.6},{:.6},{:.6},{:.4}",
                self.altitude_m,
                self.layer,
                self.temperature_k,
                self.temperature_c,
                self.pressure_pa,
                self.pressure_ratio,
                self.density_kg_m3,
                self.density_ratio,
                self.speed_of_sound_m_s,
            )
        }
    }
}

pub mod performance {
    use std::io::{self, Write};

    /// Column names of the performance sweep CSV, in order.
    pub const COLUMNS: [&str; 12] = [
        "altitude_m",
        "velocity_m_s",
        "mass_kg",
        "mach",
        "dynamic_pressure_pa",
        "lift_coefficient",
        "drag_coefficient",
        "lift_force_n",
        "drag_force_n",
        "lift_to_drag_ratio",
        "required_thrust_n",
        "stall_speed_m_s",
    ];

    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", COLUMNS.join(","))
    }

    /// CSV row emitted for one flight condition of a sweep.
    #[derive(Debug, Clone)]
    pub struct Record {
        pub altitude_m: f64,
        pub velocity_m_s: f64,
        pub mass_kg: f64,
        pub mach: f64,
        pub dynamic_pressure_pa: f64,
        pub lift_coefficient: f64,
        pub drag_coefficient: f64,
        pub lift_force_n: f64,
        pub drag_force_n: f64,
        pub lift_to_drag_ratio: f64,
        pub required_thrust_n: f64,
        pub stall_speed_m_s: f64,
    }

    impl Record {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{},{:.4},{:.3},{:.6},{:.6},{:.3},{:.3},{:.4},{:.3},{:.3}",
                self.altitude_m,
                self.velocity_m_s,
                self.mass_kg,
                self.mach,
                self.dynamic_pressure_pa,
                self.lift_coefficient,
                self.drag_coefficient,
                self.lift_force_n,
                self.drag_force_n,
                self.lift_to_drag_ratio,
                self.required_thrust_n,
                self.stall_speed_m_s,
            )
        }
    }
}

pub mod json {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};
    use std::path::Path;

    /// Write `value` as pretty JSON to `path` (`-` for stdout).
    pub fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
        let mut writer = super::writer_for_path(path)?;
        to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
        writer.flush()
    }
}
