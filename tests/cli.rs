use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn shipped_catalog() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("configs/aircraft.json")
        .to_string_lossy()
        .into_owned()
}

#[test]
fn atmosphere_prints_table() {
    Command::cargo_bin("atmosphere")
        .expect("atmosphere bin")
        .args(["--max-altitude", "2000", "--step", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("troposphere"))
        .stdout(predicate::str::contains("15.00"));
}

#[test]
fn atmosphere_writes_csv_to_stdout() {
    let output = Command::cargo_bin("atmosphere")
        .expect("atmosphere bin")
        .args(["--max-altitude", "20000", "--step", "500", "--output", "-"])
        .output()
        .expect("run atmosphere");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 42);
    assert!(lines[0].starts_with("altitude_m,layer,temperature_k"));
    assert!(lines[41].starts_with("20000,tropopause,"));
}

#[test]
fn atmosphere_rejects_out_of_range_altitude() {
    Command::cargo_bin("atmosphere")
        .expect("atmosphere bin")
        .args(["--altitude", "60000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("altitude must be between"));
}

#[test]
fn atmosphere_rejects_step_that_explodes_the_profile() {
    Command::cargo_bin("atmosphere")
        .expect("atmosphere bin")
        .args(["--max-altitude", "1000", "--step", "1e-300"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile step"));
}

#[test]
fn atmosphere_rejects_profile_overshooting_ceiling() {
    Command::cargo_bin("atmosphere")
        .expect("atmosphere bin")
        .args(["--max-altitude", "50000", "--step", "3000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("altitude must be between"));
}

#[test]
fn atmosphere_writes_json_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("isa.json");
    Command::cargo_bin("atmosphere")
        .expect("atmosphere bin")
        .args(["--altitude", "11000", "--json", path.to_str().unwrap()])
        .assert()
        .success();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"altitude_m\": 11000.0"));
    assert!(text.contains("\"layer\": \"troposphere\""));
}

#[test]
fn performance_point_report() {
    Command::cargo_bin("performance")
        .expect("performance bin")
        .args(["point", "--altitude", "10000", "--velocity", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Atmospheric Conditions ==="))
        .stdout(predicate::str::contains("L/D ratio"))
        .stdout(predicate::str::contains("Stall speed"));
}

#[test]
fn performance_rejects_zero_velocity() {
    Command::cargo_bin("performance")
        .expect("performance bin")
        .args(["point", "--altitude", "1000", "--velocity", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("velocity must be above 0"));
}

#[test]
fn performance_rejects_unknown_override() {
    Command::cargo_bin("performance")
        .expect("performance bin")
        .args(["--set", "wingspan=30", "point", "--altitude", "0", "--velocity", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wingspan"));
}

#[test]
fn performance_altitude_sweep_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("sweep.csv");
    Command::cargo_bin("performance")
        .expect("performance bin")
        .args([
            "--set",
            "mass=65000",
            "altitude-sweep",
            "--velocity",
            "230",
            "--min-altitude",
            "0",
            "--max-altitude",
            "12000",
            "--step",
            "1000",
            "--output",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success();
    let text = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 14);
    assert!(lines[1].starts_with("0,230,65000,"));
}

#[test]
fn performance_sweep_rejects_last_sample_past_ceiling() {
    Command::cargo_bin("performance")
        .expect("performance bin")
        .args([
            "altitude-sweep",
            "--velocity",
            "250",
            "--min-altitude",
            "0",
            "--max-altitude",
            "50000",
            "--step",
            "3000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("got 51000"));
}

#[test]
fn performance_optimal_cruise() {
    Command::cargo_bin("performance")
        .expect("performance bin")
        .args([
            "optimal-cruise",
            "--velocity",
            "250",
            "--min-altitude",
            "10000",
            "--max-altitude",
            "16000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Optimal cruise altitude : 13500 m"));
}

#[test]
fn performance_compare_catalog() {
    Command::cargo_bin("performance")
        .expect("performance bin")
        .args(["--catalog", &shipped_catalog(), "compare"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Antonov An-124 Ruslan"))
        .stdout(predicate::str::contains("Cessna 172 Skyhawk"));
}

#[test]
fn performance_uses_catalog_aircraft() {
    Command::cargo_bin("performance")
        .expect("performance bin")
        .args([
            "--catalog",
            &shipped_catalog(),
            "--aircraft",
            "cessna_172",
            "point",
            "--altitude",
            "1000",
            "--velocity",
            "55",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("m = 1111 kg"));
}

#[test]
fn aircraft_list_and_show() {
    Command::cargo_bin("aircraft")
        .expect("aircraft bin")
        .args(["--catalog", &shipped_catalog(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("boeing_737_800"))
        .stdout(predicate::str::contains("ultralight_sport"));

    Command::cargo_bin("aircraft")
        .expect("aircraft bin")
        .args(["--catalog", &shipped_catalog(), "show", "business_jet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults used for: oswald_efficiency"));
}

#[test]
fn aircraft_add_creates_and_protects_entries() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = dir.path().join("fleet.json");
    let catalog_arg = catalog.to_str().unwrap();

    Command::cargo_bin("aircraft")
        .expect("aircraft bin")
        .args([
            "--catalog",
            catalog_arg,
            "add",
            "glider",
            "--name",
            "Training Glider",
            "--set",
            "aspect_ratio=18",
            "--set",
            "mass=450",
        ])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&catalog).unwrap()).unwrap();
    assert_eq!(saved["glider"]["name"], "Training Glider");
    assert_eq!(saved["glider"]["aspect_ratio"], 18.0);
    assert_eq!(saved["glider"]["wing_area"], 125.0);

    Command::cargo_bin("aircraft")
        .expect("aircraft bin")
        .args(["--catalog", catalog_arg, "add", "glider", "--name", "Again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn plot_renders_png_from_profile_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("isa.csv");
    let png_path = dir.path().join("isa.png");

    Command::cargo_bin("atmosphere")
        .expect("atmosphere bin")
        .args([
            "--max-altitude",
            "20000",
            "--step",
            "1000",
            "--output",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    Command::cargo_bin("plot")
        .expect("plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--chart",
            "atmosphere",
            "--width",
            "600",
            "--height",
            "300",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn plot_rejects_csv_without_expected_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("wrong.csv");
    fs::write(&csv_path, "a,b\n1,2\n").unwrap();
    Command::cargo_bin("plot")
        .expect("plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--chart",
            "velocity",
            "--output",
            dir.path().join("x.png").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV missing"));
}
