//! End-to-end runs of the `postdedup` binary.

use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn postdedup(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_postdedup"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn ids(value: &Value) -> Vec<String> {
    value.as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap().to_string()).collect()
}

fn token(text: &str, vector: [f32; 3]) -> Value {
    json!({ "text": text, "vector": vector })
}

fn write_corpus(dir: &Path) -> String {
    let docs = json!([
        { "id": "1", "text": "flood warning issued", "created_at": "2018-09-14T10:00:00Z",
          "tokens": [token("flood", [1.0, 0.0, 0.0]), token("warning", [0.0, 1.0, 0.0])] },
        { "id": "2", "text": "RT @nws flood warning issued", "created_at": "2018-09-14T09:00:00Z",
          "tokens": [token("RT", [0.0, 0.0, 1.0]), token("@nws", [0.0, 0.0, 1.0]),
                     token("flood", [1.0, 0.0, 0.0]), token("warning", [0.0, 1.0, 0.0])] },
        { "id": "3", "text": "!!!", "created_at": "2018-09-14T11:00:00Z",
          "tokens": [token("!!!", [0.5, 0.5, 0.5])] },
        { "id": "4", "text": "power is out", "created_at": "2018-09-14T12:00:00Z",
          "tokens": [token("power", [0.0, 0.0, 1.0]), token("out", [0.0, 1.0, 0.0])] }
    ]);
    let path = dir.join("docs.json");
    std::fs::write(&path, docs.to_string()).unwrap();
    path.to_string_lossy().into_owned()
}

// ============================================================
// Output files
// ============================================================

#[test]
fn test_writes_partitions_and_report() {
    let tmp = TempDir::new().unwrap();
    let input = write_corpus(tmp.path());
    let out = tmp.path().join("out");

    let status = postdedup(&["--input", &input, "--out-dir", out.to_str().unwrap()]);
    assert!(status.status.success(), "{}", String::from_utf8_lossy(&status.stderr));

    assert_eq!(ids(&read_json(&out.join("kept.json"))), vec!["2", "4"]);
    assert_eq!(ids(&read_json(&out.join("removed.json"))), vec!["1", "3"]);

    let report = read_json(&out.join("duplicates.json"));
    assert_eq!(report.as_array().unwrap().len(), 1);
    assert_eq!(report[0]["group"], 0);
    assert_eq!(report[0]["kept_id"], "2");
    assert_eq!(report[0]["members"].as_array().unwrap().len(), 2);
}

#[test]
fn test_kept_rows_omit_vectors() {
    let tmp = TempDir::new().unwrap();
    let input = write_corpus(tmp.path());
    let out = tmp.path().join("out");
    assert!(postdedup(&["--input", &input, "--out-dir", out.to_str().unwrap()]).status.success());

    let kept = read_json(&out.join("kept.json"));
    assert_eq!(kept[0]["text"], "RT @nws flood warning issued");
    assert!(kept[0].get("tokens").is_none());
}

// ============================================================
// Configuration
// ============================================================

#[test]
fn test_keep_zero_signal_flag() {
    let tmp = TempDir::new().unwrap();
    let input = write_corpus(tmp.path());
    let out = tmp.path().join("out");
    let status = postdedup(&["--input", &input, "--keep-zero-signal", "--out-dir", out.to_str().unwrap()]);
    assert!(status.status.success());
    assert_eq!(ids(&read_json(&out.join("kept.json"))), vec!["2", "3", "4"]);
    assert_eq!(ids(&read_json(&out.join("removed.json"))), vec!["1"]);
}

#[test]
fn test_config_file_with_flag_override() {
    let tmp = TempDir::new().unwrap();
    let input = write_corpus(tmp.path());
    let cfg = tmp.path().join("cfg.json");
    std::fs::write(&cfg, r#"{ "similarity_threshold": 0.5, "remove_zero_signal": false }"#).unwrap();
    let out = tmp.path().join("out");

    let status = postdedup(&[
        "--input", &input,
        "--config", cfg.to_str().unwrap(),
        "--threshold", "0.99",
        "--out-dir", out.to_str().unwrap(),
    ]);
    assert!(status.status.success());
    assert_eq!(ids(&read_json(&out.join("kept.json"))), vec!["2", "3", "4"]);
}

#[test]
fn test_keep_zero_signal_false_overrides_config() {
    let tmp = TempDir::new().unwrap();
    let input = write_corpus(tmp.path());
    let cfg = tmp.path().join("cfg.json");
    std::fs::write(&cfg, r#"{ "remove_zero_signal": false }"#).unwrap();
    let out = tmp.path().join("out");

    let status = postdedup(&[
        "--input", &input,
        "--config", cfg.to_str().unwrap(),
        "--keep-zero-signal", "false",
        "--out-dir", out.to_str().unwrap(),
    ]);
    assert!(status.status.success(), "{}", String::from_utf8_lossy(&status.stderr));
    assert_eq!(ids(&read_json(&out.join("kept.json"))), vec!["2", "4"]);
    assert_eq!(ids(&read_json(&out.join("removed.json"))), vec!["1", "3"]);
}

#[test]
fn test_invalid_threshold_fails() {
    let tmp = TempDir::new().unwrap();
    let input = write_corpus(tmp.path());
    let out = tmp.path().join("out");
    let status = postdedup(&["--input", &input, "--threshold", "1.5", "--out-dir", out.to_str().unwrap()]);
    assert!(!status.status.success());
    assert!(String::from_utf8_lossy(&status.stderr).contains("similarity_threshold"));
    assert!(!out.exists());
}

#[test]
fn test_missing_input_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.json");
    let status = postdedup(&["--input", missing.to_str().unwrap(), "--out-dir", tmp.path().to_str().unwrap()]);
    assert!(!status.status.success());
    assert!(String::from_utf8_lossy(&status.stderr).contains("failed to read documents"));
}
