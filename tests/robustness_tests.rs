use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_json_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{\"id\": \"1\", \"transaction\": [").unwrap();

    let mut cmd = Command::new(cargo_bin!("checkout-relay"));
    cmd.arg("classify").arg(file.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn test_missing_input_file_is_reported() {
    let mut cmd = Command::new(cargo_bin!("checkout-relay"));
    cmd.arg("classify").arg("tests/fixtures/does_not_exist.json");

    cmd.assert().failure();
}

#[test]
fn test_unexpected_field_types_degrade_to_failure() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"id": "9", "transaction": [{{"response": null, "transaction": null, "extra": [1, 2]}}]}}"#
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("checkout-relay"));
    cmd.arg("classify").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"FAILED\""));
}

#[test]
fn test_verify_with_unreachable_gateway_redirects_to_error() {
    let mut cmd = Command::new(cargo_bin!("checkout-relay"));
    cmd.arg("verify")
        .arg("5521")
        .arg("--mpgs-host")
        .arg("http://127.0.0.1:9/")
        .arg("--daftra-domain")
        .arg("http://127.0.0.1:9")
        .arg("--site-url")
        .arg("https://shop.example.com")
        .arg("--timeout-secs")
        .arg("2");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains(
            "https://shop.example.com/client/contents/error?order_id=5521",
        ))
        .stdout(predicate::str::contains("\"state\": \"SKIPPED\""));
}
