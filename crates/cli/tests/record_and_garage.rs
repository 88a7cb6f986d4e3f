use std::fs;
use std::path::{Path, PathBuf};

use ident_core::garage::{GarageDb, VehicleRecord};
use predicates::prelude::*;
use tempfile::tempdir;

fn write_civic_capture(dir: &Path) -> PathBuf {
    let path = dir.join("civic.csv");
    fs::write(&path, "0x17C,8\n0x1A4,8\n0x1D0,8\n").expect("write capture");
    path
}

#[test]
fn record_then_garage_round_trips() {
    let dir = tempdir().expect("tempdir");
    let capture = write_civic_capture(dir.path());
    let db = dir.path().join("garage.db");

    assert_cmd::cargo::cargo_bin_cmd!("canident")
        .args(["record", "--name", "commuter", "--db"])
        .arg(&db)
        .arg("--capture")
        .arg(&capture)
        .assert()
        .success()
        .stdout(predicate::str::contains("HONDA_CIVIC"));

    assert_cmd::cargo::cargo_bin_cmd!("canident")
        .arg("garage")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("commuter"))
        .stdout(predicate::str::contains("HONDA_CIVIC"));
}

/// The recorded row carries the capture digest for provenance.
#[test]
fn record_stores_capture_digest() {
    let dir = tempdir().expect("tempdir");
    let capture = write_civic_capture(dir.path());
    let db = dir.path().join("garage.db");

    assert_cmd::cargo::cargo_bin_cmd!("canident")
        .args(["record", "--name", "commuter", "--db"])
        .arg(&db)
        .arg("--capture")
        .arg(&capture)
        .assert()
        .success();

    let garage = GarageDb::open(&db).expect("open garage");
    let record = garage.find_vehicle("commuter").expect("query").expect("present");
    assert_eq!(record.platform, "HONDA_CIVIC");
    assert_eq!(
        record.capture_hash.as_deref(),
        Some(canident::capture_digest(&capture).expect("digest").as_str())
    );
}

#[test]
fn record_rejects_ambiguous_capture() {
    let dir = tempdir().expect("tempdir");
    let capture = dir.path().join("short.csv");
    fs::write(&capture, "0x17C,8\n").expect("write capture");
    let db = dir.path().join("garage.db");

    assert_cmd::cargo::cargo_bin_cmd!("canident")
        .args(["record", "--name", "commuter", "--db"])
        .arg(&db)
        .arg("--capture")
        .arg(&capture)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous"));
}

/// An explicit platform skips identification; legacy display names are
/// stored under their current identifier.
#[test]
fn record_with_explicit_legacy_platform_stores_current_identifier() {
    let dir = tempdir().expect("tempdir");
    let capture = write_civic_capture(dir.path());
    let db = dir.path().join("garage.db");

    assert_cmd::cargo::cargo_bin_cmd!("canident")
        .args(["record", "--name", "loaner", "--platform", "HONDA CIVIC 2022", "--db"])
        .arg(&db)
        .arg("--capture")
        .arg(&capture)
        .assert()
        .success()
        .stdout(predicate::str::contains("HONDA_CIVIC_2022"));

    let garage = GarageDb::open(&db).expect("open garage");
    let record = garage.find_vehicle("loaner").expect("query").expect("present");
    assert_eq!(record.platform, "HONDA_CIVIC_2022");
}

#[test]
fn record_rejects_unknown_platform() {
    let dir = tempdir().expect("tempdir");
    let capture = write_civic_capture(dir.path());
    let db = dir.path().join("garage.db");

    assert_cmd::cargo::cargo_bin_cmd!("canident")
        .args(["record", "--name", "mystery", "--platform", "NOT A REAL CAR", "--db"])
        .arg(&db)
        .arg("--capture")
        .arg(&capture)
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOT A REAL CAR"));
}

/// Old databases store retired display names; the listing resolves them to
/// the current identifier instead of dropping the row.
#[test]
fn garage_resolves_legacy_platform_strings() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("garage.db");

    {
        let garage = GarageDb::open(&db_path).expect("open garage");
        garage.upsert_vehicle(&VehicleRecord::new("heirloom", "AUDI A3")).expect("seed");
        garage
            .upsert_vehicle(&VehicleRecord::new("scrapper", "DELOREAN DMC-12"))
            .expect("seed");
    }

    assert_cmd::cargo::cargo_bin_cmd!("canident")
        .arg("garage")
        .arg("--db")
        .arg(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("AUDI A3 -> AUDI_A3_MK3"))
        .stdout(predicate::str::contains("UNRESOLVED: DELOREAN DMC-12"));
}

#[test]
fn garage_json_lists_resolution_state() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("garage.db");

    {
        let garage = GarageDb::open(&db_path).expect("open garage");
        garage.upsert_vehicle(&VehicleRecord::new("heirloom", "AUDI A3")).expect("seed");
    }

    let output = assert_cmd::cargo::cargo_bin_cmd!("canident")
        .arg("garage")
        .arg("--json")
        .arg("--db")
        .arg(&db_path)
        .output()
        .expect("run");
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(rows[0]["name"], "heirloom");
    assert_eq!(rows[0]["platform"], "AUDI A3");
    assert_eq!(rows[0]["resolved"], "AUDI_A3_MK3");
}
