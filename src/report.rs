//! Console tables and CSV rows for atmosphere profiles and performance sweeps.

use std::io::{self, Write};

use atmo_core::units::{
    celsius_to_fahrenheit, meters_to_feet, mps_to_knots, newtons_to_lbf, pa_to_inhg,
};
use atmo_export::{performance, profile};
use atmo_isa::AtmosphericState;

use crate::analysis::{AircraftComparison, FlightSample};

/// Unit system for console tables. CSV and JSON output is always SI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Si,
    Imperial,
}

pub fn profile_record(state: &AtmosphericState) -> profile::Record<'_> {
    profile::Record {
        altitude_m: state.altitude_m,
        layer: state.layer,
        temperature_k: state.temperature_k,
        temperature_c: state.temperature_c,
        pressure_pa: state.pressure_pa,
        pressure_ratio: state.pressure_ratio,
        density_kg_m3: state.density_kg_m3,
        density_ratio: state.density_ratio,
        speed_of_sound_m_s: state.speed_of_sound_m_s,
    }
}

pub fn sample_record(sample: &FlightSample) -> performance::Record {
    let p = &sample.performance;
    performance::Record {
        altitude_m: p.altitude_m,
        velocity_m_s: p.velocity_m_s,
        mass_kg: p.mass_kg,
        mach: sample.mach,
        dynamic_pressure_pa: sample.dynamic_pressure_pa,
        lift_coefficient: p.lift_coefficient,
        drag_coefficient: p.drag_coefficient,
        lift_force_n: p.lift_force_n,
        drag_force_n: p.drag_force_n,
        lift_to_drag_ratio: p.lift_to_drag_ratio,
        required_thrust_n: p.required_thrust_n,
        stall_speed_m_s: p.stall_speed_m_s,
    }
}

/// Write a profile as CSV (header plus one row per state).
pub fn write_profile_csv<'a, I>(writer: &mut dyn Write, states: I) -> io::Result<()>
where
    I: IntoIterator<Item = &'a AtmosphericState>,
{
    profile::write_header(writer)?;
    for state in states {
        profile_record(state).write_to(writer)?;
    }
    Ok(())
}

pub fn write_samples_csv(writer: &mut dyn Write, samples: &[FlightSample]) -> io::Result<()> {
    performance::write_header(writer)?;
    for sample in samples {
        sample_record(sample).write_to(writer)?;
    }
    Ok(())
}

pub fn write_profile_table(
    writer: &mut dyn Write,
    states: &[AtmosphericState],
    units: UnitSystem,
) -> io::Result<()> {
    match units {
        UnitSystem::Si => writeln!(
            writer,
            "{:>10} {:>14} {:>10} {:>13} {:>10} {:>10}",
            "Alt (m)", "Layer", "Temp (°C)", "Press (Pa)", "ρ (kg/m³)", "a (m/s)"
        )?,
        UnitSystem::Imperial => writeln!(
            writer,
            "{:>10} {:>14} {:>10} {:>13} {:>10} {:>10}",
            "Alt (ft)", "Layer", "Temp (°F)", "Press (inHg)", "σ (ρ/ρ0)", "a (kt)"
        )?,
    }
    writeln!(writer, "{}", "-".repeat(72))?;
    for s in states {
        let marker = if s.extrapolated { " *" } else { "" };
        match units {
            UnitSystem::Si => writeln!(
                writer,
                "{:>10.0} {:>14} {:>10.2} {:>13.2} {:>10.4} {:>10.2}{}",
                s.altitude_m,
                s.layer,
                s.temperature_c,
                s.pressure_pa,
                s.density_kg_m3,
                s.speed_of_sound_m_s,
                marker
            )?,
            UnitSystem::Imperial => writeln!(
                writer,
                "{:>10.0} {:>14} {:>10.2} {:>13.3} {:>10.4} {:>10.2}{}",
                meters_to_feet(s.altitude_m),
                s.layer,
                celsius_to_fahrenheit(s.temperature_c),
                pa_to_inhg(s.pressure_pa),
                s.density_ratio,
                mps_to_knots(s.speed_of_sound_m_s),
                marker
            )?,
        }
    }
    if states.iter().any(|s| s.extrapolated) {
        writeln!(writer, "* above 51 km: extrapolated, not standard-conformant")?;
    }
    Ok(())
}

pub fn write_samples_table(
    writer: &mut dyn Write,
    samples: &[FlightSample],
    units: UnitSystem,
) -> io::Result<()> {
    let (alt_label, vel_label, force_label) = match units {
        UnitSystem::Si => ("Alt (m)", "Vel (m/s)", "Thrust (kN)"),
        UnitSystem::Imperial => ("Alt (ft)", "Vel (kt)", "Thrust (lbf)"),
    };
    writeln!(
        writer,
        "{:>9} {:>9} {:>6} {:>7} {:>8} {:>12} {:>7} {:>11}",
        alt_label, vel_label, "Mach", "CL", "CD", force_label, "L/D", "Stall (m/s)"
    )?;
    writeln!(writer, "{}", "-".repeat(77))?;
    for sample in samples {
        let p = &sample.performance;
        let (alt, vel, thrust) = match units {
            UnitSystem::Si => (p.altitude_m, p.velocity_m_s, p.required_thrust_n / 1_000.0),
            UnitSystem::Imperial => (
                meters_to_feet(p.altitude_m),
                mps_to_knots(p.velocity_m_s),
                newtons_to_lbf(p.required_thrust_n),
            ),
        };
        writeln!(
            writer,
            "{:>9.0} {:>9.1} {:>6.3} {:>7.4} {:>8.5} {:>12.2} {:>7.2} {:>11.2}",
            alt,
            vel,
            sample.mach,
            p.lift_coefficient,
            p.drag_coefficient,
            thrust,
            p.lift_to_drag_ratio,
            p.stall_speed_m_s
        )?;
    }
    Ok(())
}

/// Detailed single-condition report.
pub fn write_point_report(
    writer: &mut dyn Write,
    state: &AtmosphericState,
    sample: &FlightSample,
) -> io::Result<()> {
    let p = &sample.performance;
    writeln!(writer, "=== Atmospheric Conditions ===")?;
    writeln!(
        writer,
        "Altitude        : {:.0} m ({:.0} ft), layer {}",
        state.altitude_m,
        meters_to_feet(state.altitude_m),
        state.layer
    )?;
    writeln!(
        writer,
        "Temperature     : {:.2} K ({:.2} °C)",
        state.temperature_k, state.temperature_c
    )?;
    writeln!(
        writer,
        "Pressure        : {:.2} Pa ({:.4} P0, {:.2} inHg)",
        state.pressure_pa,
        state.pressure_ratio,
        pa_to_inhg(state.pressure_pa)
    )?;
    writeln!(
        writer,
        "Density         : {:.4} kg/m³ ({:.4} ρ0)",
        state.density_kg_m3, state.density_ratio
    )?;
    writeln!(writer, "Speed of sound  : {:.2} m/s", state.speed_of_sound_m_s)?;
    if state.extrapolated {
        writeln!(writer, "(above 51 km: values are extrapolated)")?;
    }
    writeln!(writer)?;
    writeln!(writer, "=== Performance ===")?;
    writeln!(
        writer,
        "Flight condition: V = {:.1} m/s ({:.1} kt), Mach {:.3}, q = {:.1} Pa, m = {:.0} kg",
        p.velocity_m_s,
        mps_to_knots(p.velocity_m_s),
        sample.mach,
        sample.dynamic_pressure_pa,
        p.mass_kg
    )?;
    writeln!(writer, "Lift coeff. CL  : {:.4}", p.lift_coefficient)?;
    writeln!(writer, "Drag coeff. CD  : {:.5}", p.drag_coefficient)?;
    writeln!(writer, "Lift force      : {:.2} kN", p.lift_force_n / 1_000.0)?;
    writeln!(writer, "Drag force      : {:.2} kN", p.drag_force_n / 1_000.0)?;
    writeln!(writer, "L/D ratio       : {:.2}", p.lift_to_drag_ratio)?;
    writeln!(
        writer,
        "Required thrust : {:.2} kN ({:.0} lbf)",
        p.required_thrust_n / 1_000.0,
        newtons_to_lbf(p.required_thrust_n)
    )?;
    writeln!(writer, "Stall speed     : {:.2} m/s", p.stall_speed_m_s)?;
    if p.velocity_m_s < p.stall_speed_m_s {
        writeln!(writer, "warning: velocity is below the 1g stall speed")?;
    }
    Ok(())
}

pub fn write_comparison_table(
    writer: &mut dyn Write,
    rows: &[AircraftComparison],
) -> io::Result<()> {
    writeln!(
        writer,
        "{:<28} {:>12} {:>10} {:>12}",
        "Aircraft", "Thrust (kN)", "L/D", "Stall (m/s)"
    )?;
    writeln!(writer, "{}", "-".repeat(65))?;
    for row in rows {
        let p = &row.sample.performance;
        writeln!(
            writer,
            "{:<28} {:>12.2} {:>10.2} {:>12.2}",
            row.name,
            p.required_thrust_n / 1_000.0,
            p.lift_to_drag_ratio,
            p.stall_speed_m_s
        )?;
    }
    Ok(())
}
