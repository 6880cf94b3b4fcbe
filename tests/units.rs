use approx::assert_relative_eq;
use standard_atmosphere_analyzer::aero::{dynamic_pressure, mach_number};
use standard_atmosphere_analyzer::limits::{validate_altitude, validate_velocity};
use standard_atmosphere_analyzer::sampling::{MAX_SAMPLES, inclusive_count};
use standard_atmosphere_analyzer::units::*;

#[test]
fn length_and_speed_conversions() {
    assert_relative_eq!(meters_to_feet(1_000.0), 3_280.84, max_relative = 1e-12);
    assert_relative_eq!(feet_to_meters(35_000.0), 10_668.0, max_relative = 1e-4);
    assert_relative_eq!(mps_to_knots(100.0), 194.384, max_relative = 1e-12);
    assert_relative_eq!(knots_to_mps(mps_to_knots(231.5)), 231.5, max_relative = 1e-12);
    for x in [0.0, 0.3048, 1_234.5, 11_000.0, 50_000.0] {
        assert!((feet_to_meters(meters_to_feet(x)) - x).abs() < 1e-4);
    }
}

#[test]
fn pressure_conversions() {
    assert_relative_eq!(pa_to_inhg(101_325.0), 29.921, max_relative = 1e-4);
    assert_relative_eq!(inhg_to_pa(29.92), 101_320.8, max_relative = 1e-5);
    assert_relative_eq!(pa_to_psi(101_325.0), 14.696, max_relative = 1e-4);
    assert_relative_eq!(psi_to_pa(1.0), 6_894.76, max_relative = 1e-12);
}

#[test]
fn temperature_conversions() {
    assert_relative_eq!(celsius_to_fahrenheit(15.0), 59.0, max_relative = 1e-12);
    assert_relative_eq!(celsius_to_fahrenheit(-56.5), -69.7, max_relative = 1e-12);
    assert_relative_eq!(fahrenheit_to_celsius(212.0), 100.0, max_relative = 1e-12);
    assert_relative_eq!(kelvin_to_celsius(288.15), 15.0, max_relative = 1e-12);
}

#[test]
fn force_conversions() {
    assert_relative_eq!(newtons_to_lbf(4.44822), 1.0, max_relative = 1e-12);
    assert_relative_eq!(lbf_to_newtons(27_000.0), 120_101.94, max_relative = 1e-9);
}

#[test]
fn mach_and_dynamic_pressure() {
    assert_relative_eq!(mach_number(170.0, 340.0), 0.5, max_relative = 1e-12);
    assert_eq!(mach_number(170.0, 0.0), 0.0);
    assert_eq!(mach_number(170.0, -1.0), 0.0);
    assert_relative_eq!(dynamic_pressure(1.225, 100.0), 6_125.0, max_relative = 1e-12);
}

#[test]
fn boundary_validators() {
    assert!(validate_altitude(0.0));
    assert!(validate_altitude(50_000.0));
    assert!(!validate_altitude(50_000.1));
    assert!(!validate_altitude(-1.0));
    assert!(!validate_altitude(f64::NAN));

    assert!(validate_velocity(0.1));
    assert!(validate_velocity(1_000.0));
    assert!(!validate_velocity(0.0));
    assert!(!validate_velocity(1_000.5));
    assert!(!validate_velocity(f64::NAN));
}

#[test]
fn sample_counts_are_capped() {
    assert_eq!(inclusive_count(10_000.0, 1_000.0), Some(11));
    assert_eq!(inclusive_count(1_000.0, 300.0), Some(5));
    assert_eq!(inclusive_count(0.0, 100.0), Some(1));
    assert_eq!(inclusive_count((MAX_SAMPLES - 1) as f64, 1.0), Some(MAX_SAMPLES));
    assert_eq!(inclusive_count(MAX_SAMPLES as f64, 1.0), None);
    assert_eq!(inclusive_count(1.0e300, 1.0e-300), None);
}
