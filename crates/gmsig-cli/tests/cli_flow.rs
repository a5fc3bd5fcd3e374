//! cli_flow.rs
//!
//! Black-box tests for the `gmsig` binary: sign a document, verify it,
//! tamper with it, and check exit statuses and output.
//!
//! Key and document fixtures are shared with gmsig-core.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("gmsig-core")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn gmsig() -> Command {
    let mut cmd = Command::cargo_bin("gmsig").expect("gmsig binary not built");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn read_json(p: &Path) -> Value {
    let raw = fs::read(p).unwrap_or_else(|e| panic!("failed to read {}: {e}", p.display()));
    serde_json::from_slice(&raw).unwrap()
}

fn sign_to(dir: &TempDir, key: &str) -> PathBuf {
    let out = dir.path().join("signed.json");
    gmsig()
        .arg("sign")
        .arg(fixture("measurement.json"))
        .arg(fixture(key))
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    out
}

#[test]
fn sign_then_verify() {
    let dir = TempDir::new().unwrap();
    let signed = sign_to(&dir, "p256_private.pem");

    let doc = read_json(&signed);
    assert!(doc["signature"].is_string());
    assert_eq!(doc["platform"], "tdx");
    assert!(fs::read_to_string(&signed).unwrap().starts_with("{\n  \""));

    let out = gmsig()
        .arg("verify")
        .arg(&signed)
        .arg(fixture("p256_public.pem"))
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Verified"));
}

#[test]
fn rsa_output_matches_reference_signature() {
    let dir = TempDir::new().unwrap();
    let signed = sign_to(&dir, "rsa2048_private.pem");
    let reference = read_json(&fixture("measurement.rsa.signed.json"));
    assert_eq!(read_json(&signed)["signature"], reference["signature"]);
}

#[test]
fn tampered_document_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let signed = sign_to(&dir, "rsa2048_private.pem");

    let mut doc = read_json(&signed);
    doc["golden_measurement"]["version"] = Value::from(4);
    fs::write(&signed, serde_json::to_vec_pretty(&doc).unwrap()).unwrap();

    let out = gmsig()
        .arg("verify")
        .arg(&signed)
        .arg(fixture("rsa2048_public.pem"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Verification failed"));
}

#[test]
fn json_sign_report_carries_written_signature() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("signed.json");
    let res = gmsig()
        .arg("--json")
        .arg("sign")
        .arg(fixture("measurement.json"))
        .arg(fixture("rsa2048_private.pem"))
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();
    assert!(res.status.success());

    let report: Value = serde_json::from_slice(&res.stdout).unwrap();
    let signature = report["signature"].as_str().unwrap();
    assert!(!signature.is_empty());
    assert_eq!(read_json(&out)["signature"], signature);
}

#[test]
fn secp256k1_documents_sign_and_verify() {
    let dir = TempDir::new().unwrap();
    let signed = sign_to(&dir, "secp256k1_private.pem");
    gmsig()
        .arg("verify")
        .arg(&signed)
        .arg(fixture("secp256k1_public.pem"))
        .assert()
        .success();
}

#[test]
fn json_mode_reports_ok_flag() {
    let out = gmsig()
        .arg("--json")
        .arg("verify")
        .arg(fixture("measurement.p256.signed.json"))
        .arg(fixture("p256_public.pem"))
        .output()
        .unwrap();
    assert!(out.status.success());
    let body: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(body, serde_json::json!({"ok": true}));
}

#[test]
fn missing_field_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.json");
    let out = dir.path().join("out.json");
    fs::write(&input, br#"{"measurement": {"a": 1}}"#).unwrap();

    let res = gmsig()
        .arg("sign")
        .arg(&input)
        .arg(fixture("rsa2048_private.pem"))
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();
    assert_eq!(res.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&res.stderr).contains("golden_measurement"));
    assert!(!out.exists());
}

#[test]
fn encrypted_key_is_rejected_without_prompt() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.json");
    let res = gmsig()
        .arg("sign")
        .arg(fixture("measurement.json"))
        .arg(fixture("p256_private_encrypted.pem"))
        .arg("-o")
        .arg(&out)
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(res.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&res.stderr).contains("encrypted"));
    assert!(!out.exists());
}

#[test]
fn sign_requires_output_path() {
    gmsig()
        .arg("sign")
        .arg(fixture("measurement.json"))
        .arg(fixture("rsa2048_private.pem"))
        .assert()
        .failure();
}

#[test]
fn canonicalize_prints_reference_bytes() {
    let expected = fs::read_to_string(fixture("measurement.canonical.txt")).unwrap();
    let out = gmsig()
        .arg("--json")
        .arg("canonicalize")
        .arg(fixture("measurement.json"))
        .output()
        .unwrap();
    assert!(out.status.success());
    let body: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(body["canonical"], expected.as_str());
    assert_eq!(
        body["sha256"],
        "2227cb40202e79a055d58cd300a3343bbb802b8a091316e619b481767f25cad8"
    );
}

#[test]
fn integers_only_rejects_float_measurements() {
    let dir = TempDir::new().unwrap();
    let res = gmsig()
        .arg("--integers-only")
        .arg("sign")
        .arg(fixture("measurement.json"))
        .arg(fixture("rsa2048_private.pem"))
        .arg("-o")
        .arg(dir.path().join("out.json"))
        .output()
        .unwrap();
    assert_eq!(res.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&res.stderr).contains("non-integer"));
}

#[test]
fn custom_field_names_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.json");
    let signed = dir.path().join("signed.json");
    fs::write(&input, br#"{"reference": {"b": [1, 2], "a": "x"}}"#).unwrap();

    gmsig()
        .args(["--measurement-field", "reference", "--signature-field", "sig"])
        .arg("sign")
        .arg(&input)
        .arg(fixture("p256_private.pem"))
        .arg("-o")
        .arg(&signed)
        .assert()
        .success();
    assert!(read_json(&signed)["sig"].is_string());

    gmsig()
        .args(["--measurement-field", "reference", "--signature-field", "sig"])
        .arg("verify")
        .arg(&signed)
        .arg(fixture("p256_public.pem"))
        .assert()
        .success();
}
