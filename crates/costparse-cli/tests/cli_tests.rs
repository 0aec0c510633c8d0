//! Integration tests for the costparse binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_costparse"))
}

/// Write a default config into `dir` so runs never read the user's config.
fn isolated_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, "{}").unwrap();
    path
}

const NEW_STYLE_PAGE: &str = "Acme Corp\nRetail\nDocument Information\nINV-1001\nUSD\n\
Contract Start Date: 01/01/2024\nContract End Date: 12/31/2024\n999.00";

const OLD_STYLE_MEMO: &str = "DEBIT/CREDIT MEMO\nCHARGE/CREDIT TO:\nGreen Valley Equipment\n\
Kearney NE 68847\nLEGAL NAME: First Holdings\nLOCAL PRICE: 1,000.00\n\
LEGAL NAME: Second Holdings\nORGANIZATION: Second Org";

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn test_parse_text_document_to_json() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = dir.path().join("invoice.txt");
    fs::write(&input, format!("{}\u{c}Device Serial Number\n", NEW_STYLE_PAGE)).unwrap();

    cli()
        .arg("parse")
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""style":"new""#))
        .stdout(predicate::str::contains(r#""customer_name":"Acme Corp""#))
        .stdout(predicate::str::contains(r#""contract_start":"2024-01-01""#))
        .stdout(predicate::str::contains(r#""due_date":null"#));
}

#[test]
fn test_parse_json_pages_with_registry() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = dir.path().join("memo.json");
    let registry = dir.path().join("customers.json");
    let output = dir.path().join("out.json");

    fs::write(&input, serde_json::json!({ "pages": [OLD_STYLE_MEMO] }).to_string()).unwrap();
    fs::write(
        &registry,
        r#"[{"id": "c-7", "name": "Second Org"}, {"id": "c-8", "name": null}]"#,
    )
    .unwrap();

    cli()
        .arg("parse")
        .arg(&input)
        .arg("--customers")
        .arg(&registry)
        .arg("-o")
        .arg(&output)
        .arg("-c")
        .arg(&config)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    let result: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(result["style"], "old");
    assert_eq!(result["items"].as_array().unwrap().len(), 2);
    assert_eq!(result["items"][0]["location"], "Kearney");
    assert_eq!(result["items"][0]["amount"], "1000.00");
    assert!(result["items"][0]["matched_customer_id"].is_null());
    assert_eq!(result["items"][1]["matched_customer_id"], "c-7");
}

#[test]
fn test_parse_style_override_and_csv() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = dir.path().join("memo.txt");
    fs::write(&input, OLD_STYLE_MEMO).unwrap();

    cli()
        .arg("parse")
        .arg(&input)
        .arg("--style")
        .arg("new")
        .arg("-f")
        .arg("csv")
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("style,customer_name"))
        .stdout(predicate::str::contains("\nnew,"));
}

#[test]
fn test_parse_rejects_unknown_style() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("memo.txt");
    fs::write(&input, OLD_STYLE_MEMO).unwrap();

    cli()
        .arg("parse")
        .arg(&input)
        .arg("--style")
        .arg("sideways")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sideways"));
}

#[test]
fn test_parse_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    cli()
        .arg("parse")
        .arg(dir.path().join("missing.txt"))
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();

    fs::write(inputs.join("a.txt"), NEW_STYLE_PAGE).unwrap();
    fs::write(inputs.join("b.txt"), OLD_STYLE_MEMO).unwrap();
    fs::write(inputs.join("c.json"), "not json").unwrap();

    cli()
        .arg("batch")
        .arg(format!("{}/*", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .arg("--continue-on-error")
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 1 failed"));

    assert!(out.join("a.txt.json").exists());
    assert!(out.join("b.txt.json").exists());
    assert!(!out.join("c.json.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "file,status,style,item_count,matched_count,error");
    assert_eq!(lines[1], "a.txt,success,new,1,0,");
    assert_eq!(lines[2], "b.txt,success,old,2,0,");
    assert!(lines[3].starts_with("c.json,error,,,,"));
}

#[test]
fn test_batch_keeps_inputs_sharing_a_stem_apart() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();

    fs::write(inputs.join("a.txt"), "First Co\nRetail").unwrap();
    let pages = serde_json::json!({ "pages": ["Second Co\nRetail"] });
    fs::write(inputs.join("a.json"), pages.to_string()).unwrap();

    cli()
        .arg("batch")
        .arg(format!("{}/*", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    let from_txt = fs::read_to_string(out.join("a.txt.json")).unwrap();
    let from_json = fs::read_to_string(out.join("a.json.json")).unwrap();
    assert!(from_txt.contains("First Co"));
    assert!(from_json.contains("Second Co"));
}

#[test]
fn test_batch_reports_output_collisions_per_file() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(inputs.join("east")).unwrap();
    fs::create_dir_all(inputs.join("west")).unwrap();

    fs::write(inputs.join("east").join("memo.txt"), "East Co\nRetail").unwrap();
    fs::write(inputs.join("west").join("memo.txt"), "West Co\nRetail").unwrap();
    let pattern = format!("{}/*/memo.txt", inputs.display());

    cli()
        .arg("batch")
        .arg(&pattern)
        .arg("--output-dir")
        .arg(&out)
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already written"));

    cli()
        .arg("batch")
        .arg(&pattern)
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .arg("--continue-on-error")
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    let written = fs::read_to_string(out.join("memo.txt.json")).unwrap();
    assert!(written.contains("East Co"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[1], "memo.txt,success,new,1,0,");
    assert!(lines[2].starts_with("memo.txt,error,,,,"));
}

#[test]
fn test_batch_stops_on_error_by_default() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let inputs = dir.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("broken.json"), "{").unwrap();

    cli()
        .arg("batch")
        .arg(format!("{}/*.json", inputs.display()))
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Batch failed"));
}

#[test]
fn test_config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.json");

    cli()
        .args(["config", "init", "-c"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    cli()
        .args(["config", "set", "extraction.default_currency", "EUR", "-c"])
        .arg(&config)
        .assert()
        .success();

    cli()
        .args(["config", "get", "extraction.default_currency", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"EUR\""));

    cli()
        .args(["config", "set", "extraction.default_currency", "euro", "-c"])
        .arg(&config)
        .assert()
        .failure();

    cli()
        .args(["config", "set", "extraction.style", "sideways", "-c"])
        .arg(&config)
        .assert()
        .failure();
}

#[test]
fn test_configured_currency_applies_to_parse() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"extraction": {"default_currency": "CAD"}}"#).unwrap();
    let input = dir.path().join("memo.txt");
    fs::write(&input, OLD_STYLE_MEMO).unwrap();

    cli()
        .arg("parse")
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""currency":"CAD""#));
}
