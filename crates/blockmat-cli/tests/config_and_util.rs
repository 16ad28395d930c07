//! Integration tests for CLI config parsing, util helpers, and the demo runners.

use blockmat_cli::demos::blocks::{run_blocks, sample_operands};
use blockmat_cli::demos::power::{load_power_config, run_power, PowerConfig};
use blockmat_cli::util::validate_json_file;

// ---------------------------------------------------------------------------
// validate_json_file
// ---------------------------------------------------------------------------

#[test]
fn validate_json_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("power.json");
    std::fs::File::create(&path).unwrap();
    assert!(validate_json_file(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("power.txt");
    std::fs::File::create(&path).unwrap();
    assert!(validate_json_file(path.to_str().unwrap()).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_json_file("/nonexistent/path/power.json").is_err());
}

// ---------------------------------------------------------------------------
// PowerConfig defaults & serialization
// ---------------------------------------------------------------------------

#[test]
fn power_config_default_values() {
    let cfg = PowerConfig::default();
    assert_eq!(cfg.matrix, vec![vec![1.0, 1.0], vec![0.0, 1.0]]);
    assert_eq!(cfg.exponent, 10_000);
    assert_eq!(cfg.format.width, 8);
}

#[test]
fn power_config_serializes_to_json() {
    let cfg = PowerConfig::default();
    let json = serde_json::to_string_pretty(&cfg).unwrap();
    assert!(json.contains("exponent"));
    assert!(json.contains("matrix"));
}

#[test]
fn power_config_missing_fields_take_defaults() {
    let cfg: PowerConfig = serde_json::from_str(r#"{"exponent": 4}"#).unwrap();
    assert_eq!(cfg.exponent, 4);
    assert_eq!(cfg.matrix.len(), 2);
}

#[test]
fn power_config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("power.json");
    let json = serde_json::to_string_pretty(&PowerConfig {
        exponent: 7,
        ..PowerConfig::default()
    })
    .unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = load_power_config(&path).unwrap();
    assert_eq!(loaded.exponent, 7);
}

#[test]
fn power_config_invalid_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("power.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_power_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

// ---------------------------------------------------------------------------
// Demo runners
// ---------------------------------------------------------------------------

#[test]
fn run_power_exponent_zero_gives_identity() {
    let cfg = PowerConfig {
        exponent: 0,
        ..PowerConfig::default()
    };
    let report = run_power(&cfg).unwrap();
    assert_eq!(report.result.as_slice(), &[1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn sample_operands_have_compatible_partitions() {
    let (left, right) = sample_operands().unwrap();
    assert_eq!(left.col_sizes(), right.row_sizes());
    assert_eq!(left.whole_size(), (3, 5));
    assert_eq!(right.whole_size(), (5, 2));
}

#[test]
fn run_blocks_agrees_with_flat_product() {
    let report = run_blocks().unwrap();
    assert!(report.agrees(1e-9));
    assert_eq!(report.blocked.whole_size(), report.flat.shape());
    assert_eq!(report.flat.shape(), (3, 2));
    assert_eq!(report.flat.as_slice(), &[-5.0, 4.0, -6.0, 2.0, 2.0, 1.0]);
}
