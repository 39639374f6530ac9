//! Integration tests for `logsift config` command.
//!
//! Tests config validation and display functionality with real TOML files.

use std::fs;

use logsift_cli::commands::config::{show, validate};
use logsift_cli::error::CliError;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("logsift.toml");
    fs::write(&path, content).expect("should write config");
    path
}

#[test]
fn test_config_validate_valid_toml() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(
        &temp_dir,
        r#"
[general]
log_level = "debug"
log_format = "json"

[analysis]
severity_terms = ["Error", "Critical", "FATAL"]
cluster_count = 3
seed = 7
"#,
    );

    let report = validate(Some(&path));
    assert!(report.valid, "valid config should pass: {:?}", report.errors);
    assert!(report.errors.is_empty());
}

#[test]
fn test_config_validate_malformed_toml() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(&temp_dir, "[general\nlog_level = \"info\"\n");

    let report = validate(Some(&path));
    assert!(!report.valid, "malformed TOML should fail");
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn test_config_validate_missing_explicit_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("absent.toml");

    let report = validate(Some(&path));
    assert!(!report.valid, "explicit missing file is an error");
    assert!(report.errors[0].contains("absent.toml"));
}

#[test]
fn test_config_validate_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(&temp_dir, "");

    assert!(validate(Some(&path)).valid);
}

#[test]
fn test_config_validate_rejects_out_of_range_values() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(&temp_dir, "[analysis]\ncluster_count = 0\n");

    let report = validate(Some(&path));
    assert!(!report.valid);
    assert!(report.errors[0].contains("cluster_count"));
}

#[test]
fn test_config_validate_rejects_empty_vocabulary() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(&temp_dir, "[analysis]\nseverity_terms = []\n");

    assert!(!validate(Some(&path)).valid);
}

#[test]
fn test_config_show_full() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(&temp_dir, "[analysis]\nseed = 99\n");

    let report = show(Some(&path), None).expect("show should succeed");
    assert!(report.section.is_none());
    assert!(report.config_toml.contains("[general]"));
    assert!(report.config_toml.contains("[analysis]"));
    assert!(report.config_toml.contains("seed = 99"));
}

#[test]
fn test_config_show_section() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(&temp_dir, "[general]\nlog_format = \"json\"\n");

    let report = show(Some(&path), Some("general")).expect("show should succeed");
    assert_eq!(report.section.as_deref(), Some("general"));
    assert!(report.config_toml.contains("log_format = \"json\""));
    assert!(!report.config_toml.contains("severity_terms"));
}

#[test]
fn test_config_show_invalid_file_is_config_error() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(&temp_dir, "[general]\nlog_level = \"loud\"\n");

    let err = show(Some(&path), None).err().expect("invalid level");
    assert!(matches!(err, CliError::Core(_)));
    assert_eq!(err.exit_code(), 2);
}
