use approx::{assert_abs_diff_eq, assert_relative_eq};
use standard_atmosphere_analyzer::atmosphere::{AtmosphereError, AtmosphereModel};
use standard_atmosphere_analyzer::performance::{
    AircraftParameters, AircraftParametersUpdate, PerformanceCalculator, PerformanceError,
};

fn calculator() -> PerformanceCalculator {
    PerformanceCalculator::new(AtmosphereModel::new())
}

#[test]
fn default_airframe_is_narrow_body_twinjet() {
    let calc = calculator();
    let p = calc.aircraft_parameters();
    assert_eq!(*p, AircraftParameters::default());
    assert_relative_eq!(p.wing_area, 125.0);
    assert_relative_eq!(p.mass, 70_000.0);
    assert_relative_eq!(p.max_lift_coeff, 1.8);
    assert_relative_eq!(p.zero_lift_drag, 0.02);
    assert_relative_eq!(p.oswald_efficiency, 0.85);
    assert_relative_eq!(p.aspect_ratio, 9.5);
}

#[test]
fn cruise_point_at_ten_kilometres() {
    let calc = calculator();
    let perf = calc
        .performance_at_condition(10_000.0, 250.0, None)
        .expect("cruise point");

    // CL = 2mg / (ρV²S) with ρ ≈ 0.4126 kg/m³
    assert!((0.40..=0.55).contains(&perf.lift_coefficient));
    assert_relative_eq!(perf.lift_coefficient, 0.4261, max_relative = 2e-3);
    assert_relative_eq!(perf.drag_coefficient, 0.02716, max_relative = 2e-3);
    assert!(perf.lift_to_drag_ratio > 12.0 && perf.lift_to_drag_ratio < 20.0);
    assert_relative_eq!(perf.lift_to_drag_ratio, 15.69, max_relative = 3e-3);
    assert!(perf.stall_speed_m_s > 100.0 && perf.stall_speed_m_s < 150.0);
    assert_relative_eq!(perf.stall_speed_m_s, 121.6, max_relative = 2e-3);
    assert_eq!(perf.required_thrust_n, perf.drag_force_n);
    assert_relative_eq!(perf.altitude_m, 10_000.0);
    assert_relative_eq!(perf.velocity_m_s, 250.0);
    assert_relative_eq!(perf.mass_kg, 70_000.0);
}

#[test]
fn lift_balances_weight() {
    let calc = calculator();
    for (h, v) in [(0.0, 90.0), (5_000.0, 180.0), (12_000.0, 240.0)] {
        let perf = calc.performance_at_condition(h, v, None).unwrap();
        assert_relative_eq!(perf.lift_force_n, 70_000.0 * 9.81, max_relative = 1e-9);
        assert_relative_eq!(
            perf.lift_to_drag_ratio,
            perf.lift_force_n / perf.drag_force_n,
            max_relative = 1e-9
        );
    }
}

#[test]
fn drag_polar_is_parabolic() {
    let calc = calculator();
    assert_relative_eq!(calc.drag_coefficient(0.0), 0.02);
    let k = 1.0 / (std::f64::consts::PI * 9.5 * 0.85);
    assert_relative_eq!(calc.drag_coefficient(0.5), 0.02 + 0.25 * k, max_relative = 1e-12);
    assert_relative_eq!(calc.drag_coefficient(-0.5), calc.drag_coefficient(0.5));
}

#[test]
fn lift_to_drag_is_zero_without_drag() {
    assert_eq!(PerformanceCalculator::lift_to_drag_ratio(1.0, 0.0), 0.0);
    assert_eq!(PerformanceCalculator::lift_to_drag_ratio(1.0, -0.1), 0.0);
    assert_relative_eq!(PerformanceCalculator::lift_to_drag_ratio(0.5, 0.025), 20.0, max_relative = 1e-12);
}

#[test]
fn sea_level_stall_speed() {
    let calc = calculator();
    let stall = calc.stall_speed(0.0, None).unwrap();
    assert_relative_eq!(stall, 70.59, max_relative = 2e-3);
    let heavier = calc.stall_speed(0.0, Some(140_000.0)).unwrap();
    assert_relative_eq!(heavier, stall * 2f64.sqrt(), max_relative = 1e-12);
}

#[test]
fn stall_speed_rises_with_altitude() {
    let calc = calculator();
    let speeds: Vec<f64> = (0..=15)
        .map(|i| calc.stall_speed(i as f64 * 1_000.0, None).unwrap())
        .collect();
    assert!(speeds.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn mass_override_does_not_touch_parameters() {
    let calc = calculator();
    let light = calc.performance_at_condition(8_000.0, 220.0, Some(50_000.0)).unwrap();
    let default = calc.performance_at_condition(8_000.0, 220.0, None).unwrap();
    assert_relative_eq!(light.mass_kg, 50_000.0);
    assert!(light.lift_coefficient < default.lift_coefficient);
    assert_relative_eq!(calc.aircraft_parameters().mass, 70_000.0);
}

#[test]
fn required_thrust_matches_condition_result() {
    let calc = calculator();
    let thrust = calc.required_thrust(6_000.0, 200.0, None).unwrap();
    let perf = calc.performance_at_condition(6_000.0, 200.0, None).unwrap();
    assert_relative_eq!(thrust, perf.required_thrust_n, max_relative = 1e-12);
}

#[test]
fn thrust_curve_has_minimum_drag_speed() {
    let calc = calculator();
    let thrust = |v: f64| calc.required_thrust(0.0, v, None).unwrap();
    // induced drag dominates slow, parasite drag dominates fast
    assert!(thrust(80.0) > thrust(130.0));
    assert!(thrust(250.0) > thrust(130.0));
}

#[test]
fn invalid_velocity_is_rejected() {
    let calc = calculator();
    assert_eq!(
        calc.lift_coefficient(1_000.0, 0.0, None),
        Err(PerformanceError::InvalidVelocity(0.0))
    );
    assert!(matches!(
        calc.performance_at_condition(1_000.0, -50.0, None),
        Err(PerformanceError::InvalidVelocity(_))
    ));
    assert!(calc.lift_force(1_000.0, f64::NAN, 0.5).is_err());
    assert!(calc.drag_force(1_000.0, f64::INFINITY, 0.03).is_err());
    assert!(calc.required_thrust(1_000.0, 0.0, None).is_err());
}

#[test]
fn invalid_altitude_propagates_from_atmosphere() {
    let calc = calculator();
    assert_eq!(
        calc.stall_speed(-10.0, None),
        Err(PerformanceError::Atmosphere(AtmosphereError::InvalidAltitude(-10.0)))
    );
    assert!(matches!(
        calc.performance_at_condition(f64::NAN, 200.0, None),
        Err(PerformanceError::Atmosphere(_))
    ));
}

#[test]
fn non_finite_mass_is_rejected() {
    let calc = calculator();
    assert!(matches!(
        calc.performance_at_condition(1_000.0, 200.0, Some(f64::NAN)),
        Err(PerformanceError::InvalidMass(_))
    ));
}

#[test]
fn merge_update_changes_only_named_fields() {
    let mut calc = calculator();
    let thrust_before = calc.required_thrust(10_000.0, 250.0, None).unwrap();
    calc.set_aircraft_parameters(&AircraftParametersUpdate::new().with_wing_area(150.0));
    let p = *calc.aircraft_parameters();
    assert_relative_eq!(p.wing_area, 150.0);
    assert_relative_eq!(p.mass, 70_000.0);
    assert_relative_eq!(p.aspect_ratio, 9.5);

    // larger wing at the same condition needs a smaller CL
    let cl = calc.lift_coefficient(10_000.0, 250.0, None).unwrap();
    assert_relative_eq!(cl, 0.4261 * 125.0 / 150.0, max_relative = 2e-3);

    let thrust_after = calc.required_thrust(10_000.0, 250.0, None).unwrap();
    assert!((thrust_after - thrust_before).abs() > 1.0);
}

#[test]
fn empty_update_is_a_no_op() {
    let mut calc = calculator();
    let update = AircraftParametersUpdate::new();
    assert!(update.is_empty());
    calc.set_aircraft_parameters(&update);
    assert_eq!(*calc.aircraft_parameters(), AircraftParameters::default());
}

#[test]
fn replace_parameters_wholesale() {
    let mut calc = calculator();
    let cessna = AircraftParameters {
        wing_area: 16.2,
        mass: 1_111.0,
        max_lift_coeff: 1.6,
        zero_lift_drag: 0.027,
        oswald_efficiency: 0.75,
        aspect_ratio: 7.32,
    };
    calc.replace_aircraft_parameters(cessna);
    assert_eq!(*calc.aircraft_parameters(), cessna);
    let stall = calc.stall_speed(0.0, None).unwrap();
    assert!(stall > 20.0 && stall < 30.0, "stall {stall}");
}

#[test]
fn with_parameters_constructor() {
    let params = AircraftParameters {
        mass: 60_000.0,
        ..AircraftParameters::default()
    };
    let calc = PerformanceCalculator::with_parameters(AtmosphereModel::new(), params);
    assert_relative_eq!(calc.aircraft_parameters().mass, 60_000.0);
    assert_abs_diff_eq!(
        calc.atmosphere().pressure(0.0).unwrap(),
        101_325.0,
        epsilon = 1e-9
    );
}

#[test]
fn update_from_pairs_rejects_unknown_names() {
    let update = AircraftParametersUpdate::from_pairs([("mass", 80_000.0), ("aspect_ratio", 10.0)])
        .expect("known fields");
    assert_eq!(update.mass, Some(80_000.0));
    assert_eq!(update.aspect_ratio, Some(10.0));
    assert_eq!(update.wing_area, None);
    assert_eq!(
        update.changed_fields().collect::<Vec<_>>(),
        vec!["mass", "aspect_ratio"]
    );

    let err = AircraftParametersUpdate::from_pairs([("wingspan", 35.0)]).unwrap_err();
    assert_eq!(err, PerformanceError::UnknownParameter("wingspan".to_string()));
}

#[test]
fn update_parses_assignments() {
    let update: AircraftParametersUpdate = "wing_area=150, mass=80000".parse().unwrap();
    assert_eq!(update.wing_area, Some(150.0));
    assert_eq!(update.mass, Some(80_000.0));

    assert!(matches!(
        "mass=heavy".parse::<AircraftParametersUpdate>(),
        Err(PerformanceError::InvalidParameterValue { .. })
    ));
    assert!(matches!(
        "mass".parse::<AircraftParametersUpdate>(),
        Err(PerformanceError::InvalidParameterValue { .. })
    ));
    assert!(matches!(
        "span=30".parse::<AircraftParametersUpdate>(),
        Err(PerformanceError::UnknownParameter(_))
    ));
}

#[test]
fn later_update_wins_when_merged() {
    let first = AircraftParametersUpdate::new().with_mass(60_000.0).with_wing_area(120.0);
    let second = AircraftParametersUpdate::new().with_mass(65_000.0);
    let merged = first.merged_with(second);
    assert_eq!(merged.mass, Some(65_000.0));
    assert_eq!(merged.wing_area, Some(120.0));
}

#[test]
fn full_update_round_trips_parameters() {
    let params = AircraftParameters::default();
    let mut target = AircraftParameters {
        wing_area: 1.0,
        mass: 1.0,
        max_lift_coeff: 1.0,
        zero_lift_drag: 1.0,
        oswald_efficiency: 1.0,
        aspect_ratio: 1.0,
    };
    AircraftParametersUpdate::from(params).apply_to(&mut target);
    assert_eq!(target, params);
}
