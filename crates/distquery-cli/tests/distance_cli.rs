//! Integration tests for the `distance` subcommand.
//!
//! The binary runs with a scrubbed credential environment and a temporary
//! working directory so a developer's own key or `.runtimeconfig.json` never
//! leaks into the assertions.

use std::fs;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const MATRIX_PATH: &str = "/maps/api/distancematrix/json";

fn element_body(status: &str, meters: u64, seconds: u64) -> String {
    serde_json::json!({
        "rows": [{"elements": [{
            "status": status,
            "distance": {"value": meters, "text": "5.0 km"},
            "duration": {"value": seconds, "text": "10 mins"}
        }]}],
        "status": "OK"
    })
    .to_string()
}

/// Command with no credential available from any source.
fn scrubbed(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("distquery").expect("binary exists");
    cmd.current_dir(workdir.path())
        .env_remove("GOOGLE_MAPS_KEY")
        .env_remove("CLOUD_RUNTIME_CONFIG");
    cmd
}

#[test]
fn invalid_coordinate_exits_with_invalid_argument() {
    let workdir = TempDir::new().unwrap();
    scrubbed(&workdir)
        .env("GOOGLE_MAPS_KEY", "unused")
        .args(["distance", "--origin", "north,west", "--destination", "1,2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid latitude 'north'"));
}

#[test]
fn missing_longitude_exits_with_invalid_argument() {
    let workdir = TempDir::new().unwrap();
    scrubbed(&workdir)
        .env("GOOGLE_MAPS_KEY", "unused")
        .args(["distance", "--origin", "37.7", "--destination", "1,2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected LAT,LNG"));
}

#[test]
fn non_finite_coordinate_exits_with_invalid_argument() {
    let workdir = TempDir::new().unwrap();
    scrubbed(&workdir)
        .env("GOOGLE_MAPS_KEY", "unused")
        .args(["distance", "--origin", "1,2", "--destination", "3,inf"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid longitude 'inf'"));
}

#[test]
fn missing_key_exits_with_failed_precondition() {
    let workdir = TempDir::new().unwrap();
    scrubbed(&workdir)
        .args(["distance", "--origin", "37.7,-122.4", "--destination", "37.3,-121.9"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Missing GOOGLE_MAPS_KEY"));
}

#[test]
fn runtime_config_file_supplies_key() {
    let upstream = MockServer::start();
    let mock = upstream.mock(|when, then| {
        when.method(GET)
            .path(MATRIX_PATH)
            .query_param("key", "file-key");
        then.status(200)
            .header("content-type", "application/json")
            .body(element_body("OK", 5000, 600));
    });

    let endpoint = upstream.url(MATRIX_PATH);
    let workdir = TempDir::new().unwrap();
    fs::write(
        workdir.path().join(".runtimeconfig.json"),
        r#"{"maps": {"key": "file-key"}}"#,
    )
    .unwrap();

    scrubbed(&workdir)
        .args([
            "distance",
            "--origin",
            "37.7,-122.4",
            "--destination",
            "37.3,-121.9",
            "--endpoint",
            endpoint.as_str(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 5.000 km (5.0 km)"));

    mock.assert_calls(1);
}

#[test]
fn inline_runtime_config_variable_supplies_key() {
    let upstream = MockServer::start();
    let mock = upstream.mock(|when, then| {
        when.method(GET)
            .path(MATRIX_PATH)
            .query_param("key", "inline-key");
        then.status(200)
            .header("content-type", "application/json")
            .body(element_body("OK", 5000, 600));
    });

    let endpoint = upstream.url(MATRIX_PATH);
    let workdir = TempDir::new().unwrap();
    scrubbed(&workdir)
        .env("CLOUD_RUNTIME_CONFIG", r#"{"maps": {"key": "inline-key"}}"#)
        .args([
            "distance",
            "--origin",
            "37.7,-122.4",
            "--destination",
            "37.3,-121.9",
            "--endpoint",
            endpoint.as_str(),
        ])
        .assert()
        .success();

    mock.assert_calls(1);
}

#[test]
fn runtime_config_path_variable_supplies_key() {
    let upstream = MockServer::start();
    let mock = upstream.mock(|when, then| {
        when.method(GET)
            .path(MATRIX_PATH)
            .query_param("key", "path-key");
        then.status(200)
            .header("content-type", "application/json")
            .body(element_body("OK", 5000, 600));
    });

    let endpoint = upstream.url(MATRIX_PATH);
    let workdir = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("maps-config.json");
    fs::write(&config_path, r#"{"maps": {"key": "path-key"}}"#).unwrap();

    scrubbed(&workdir)
        .env("CLOUD_RUNTIME_CONFIG", &config_path)
        .args([
            "distance",
            "--origin",
            "37.7,-122.4",
            "--destination",
            "37.3,-121.9",
            "--endpoint",
            endpoint.as_str(),
        ])
        .assert()
        .success();

    mock.assert_calls(1);
}

#[test]
fn prints_json_result() {
    let upstream = MockServer::start();
    let mock = upstream.mock(|when, then| {
        when.method(GET)
            .path(MATRIX_PATH)
            .query_param("origins", "-33.8688,151.2093")
            .query_param("destinations", "-37.8136,144.9631")
            .query_param("key", "cli-key");
        then.status(200)
            .header("content-type", "application/json")
            .body(element_body("OK", 5000, 600));
    });

    let endpoint = upstream.url(MATRIX_PATH);
    let workdir = TempDir::new().unwrap();
    let output = scrubbed(&workdir)
        .env("GOOGLE_MAPS_KEY", "cli-key")
        .args([
            "distance",
            "--origin",
            "-33.8688,151.2093",
            "--destination",
            "-37.8136,144.9631",
            "--json",
            "--endpoint",
            endpoint.as_str(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(body["distanceKm"], 5.0);
    assert_eq!(body["durationMinutes"], 10.0);
    mock.assert_calls(1);
}

#[test]
fn upstream_status_exits_with_internal() {
    let upstream = MockServer::start();
    upstream.mock(|when, then| {
        when.method(GET).path(MATRIX_PATH);
        then.status(200)
            .header("content-type", "application/json")
            .body(element_body("ZERO_RESULTS", 0, 0));
    });

    let endpoint = upstream.url(MATRIX_PATH);
    let workdir = TempDir::new().unwrap();
    scrubbed(&workdir)
        .env("GOOGLE_MAPS_KEY", "cli-key")
        .args([
            "distance",
            "--origin",
            "1,2",
            "--destination",
            "3,4",
            "--endpoint",
            endpoint.as_str(),
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Distance Matrix failed: ZERO_RESULTS"));
}
