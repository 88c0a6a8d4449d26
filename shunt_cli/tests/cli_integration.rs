use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Reference scenario: 16-bit ADC at 2.5 µV/LSB, 1 A down to 1 µA
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[global]
num_ranges = 3
adc_bits = 16
adc_resolution_v_per_lsb = 2.5e-6
bus_voltage = 3.3
max_current_a = 1.0
min_current_na = 1000.0
hysteresis = 0.01

[catalog]
series = "reference"
default_tolerance_pct = 1.0
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("custom.toml");
    fs::write(&path, body).unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["plan"], 0, "Plan complete", "stdout")]
#[case(&["plan", "--strict"], 0, "220 Ω", "stdout")]
#[case(&["catalog"], 0, "Resistances (28)", "stdout")]
#[case(&["export"], 2, "required", "stderr")]
#[case(&["frobnicate"], 2, "unrecognized subcommand", "stderr")]
#[case(&["check", "/nonexistent/plan.json"], 1, "Something went wrong", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("shunt").unwrap();

    // Always include a valid config to avoid relying on defaults
    cmd.arg("--config").arg(&cfg);
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn runs_without_config() {
    Command::cargo_bin("shunt")
        .unwrap()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("100 mΩ"));
}

#[rstest]
#[case("[global]\nnum_ranges = 0\n", "global.num_ranges")]
#[case("[global]\nhysteresis = 1.5\n", "global.hysteresis")]
#[case("[[overrides]]\nrange = 7\nresistance_ohm = 1.0\n", "out of bounds")]
#[case("[global\n", "parse config")]
fn cli_rejects_bad_config(#[case] body: &str, #[case] needle: &str) {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, body);
    Command::cargo_bin("shunt")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("plan")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(needle));
}

#[rstest]
fn strict_plan_exits_3_when_overlap_breaks() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "[[overrides]]\nrange = 1\nresistance_ohm = 10.0\n");

    let mut cmd = Command::cargo_bin("shunt").unwrap();
    cmd.arg("--config").arg(&cfg).arg("plan").arg("--strict");
    cmd.assert()
        .code(3)
        .stdout(predicate::str::contains("Plan INVALID"))
        .stderr(predicate::str::contains("does not cover"));
}

#[rstest]
fn non_strict_plan_reports_but_succeeds() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "[[overrides]]\nrange = 1\nresistance_ohm = 10.0\n");
    Command::cargo_bin("shunt")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan INVALID: ranges [0, 1]"));
}

#[rstest]
fn duplicate_override_is_explained() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "[[overrides]]\nrange = 0\nresistance_ohm = 220.0\n");
    Command::cargo_bin("shunt")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("plan")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already used by range 2"));
}

#[rstest]
fn export_then_check_round_trips() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let out = dir.path().join("plan.json");

    Command::cargo_bin("shunt")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("export")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 ranges"));
    assert!(out.exists());

    Command::cargo_bin("shunt")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("check")
        .arg(&out)
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("consistent"));
}

#[rstest]
fn check_rejects_tampered_document_with_exit_4() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let out = dir.path().join("plan.json");
    Command::cargo_bin("shunt")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("export")
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    doc["ranges"][1]["resistance"] = serde_json::json!(10.0);
    fs::write(&out, doc.to_string()).unwrap();

    Command::cargo_bin("shunt")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("check")
        .arg(&out)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("could not be imported"));
}

#[rstest]
fn cli_uses_catalog_csv() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("parts.csv");
    let mut f = fs::File::create(&csv).unwrap();
    writeln!(f, "resistance_ohm").unwrap();
    for v in ["0.15", "3.3", "150", "6800", "1e6"] {
        writeln!(f, "{v}").unwrap();
    }
    let cfg = write_config(
        &dir,
        &format!("[catalog]\ncsv = {:?}\n", csv.display().to_string()),
    );

    Command::cargo_bin("shunt")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resistances (5)"))
        .stdout(predicate::str::contains("150 mΩ"));
}

#[rstest]
fn cli_reports_bad_catalog_header() {
    let dir = tempdir().unwrap();

    // Write a bad-header CSV
    let bad_csv = dir.path().join("parts.csv");
    let mut f = fs::File::create(&bad_csv).unwrap();
    writeln!(f, "ohms").unwrap();
    writeln!(f, "0.1").unwrap();
    let cfg = write_config(
        &dir,
        &format!("[catalog]\ncsv = {:?}\n", bad_csv.display().to_string()),
    );

    let mut cmd = Command::cargo_bin("shunt").unwrap();
    cmd.arg("--config").arg(&cfg).arg("plan");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid headers"));
}

#[rstest]
fn file_logging_writes_json_lines() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("shunt.log");
    let cfg = write_config(
        &dir,
        &format!(
            "[logging]\nfile = {:?}\nlevel = \"info\"\n",
            log.display().to_string()
        ),
    );
    Command::cargo_bin("shunt")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("plan")
        .assert()
        .success();

    let text = fs::read_to_string(&log).unwrap();
    let first = text.lines().next().unwrap();
    let v: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(v["level"], "INFO");
}
