//! Integration tests for FormatConfig and the text rendering of each type.

use blockmat::config::FormatConfig;
use blockmat::math::{BlockMatrix, Matrix, Vector};

// ---------------------------------------------------------------------------
// FormatConfig
// ---------------------------------------------------------------------------

#[test]
fn format_config_default_values() {
    let cfg = FormatConfig::default();
    assert_eq!(cfg.width, 8);
    assert_eq!(cfg.precision, 3);
}

#[test]
fn format_config_from_str_unknown_errors() {
    let result: Result<FormatConfig, _> = "wide".parse();
    assert!(result.is_err());
}

#[test]
fn format_config_round_trips_json() {
    let cfg = FormatConfig::new(12, 5);
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("precision"));
    let cfg2: FormatConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, cfg2);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn matrix_renders_one_line_per_row() {
    let m = Matrix::from_rows(&[[1.0, 0.0], [0.3, -3.0]]).unwrap();
    assert_eq!(
        m.to_string(),
        "Matrix(\n   1.000   0.000\n   0.300  -3.000\n)"
    );
    assert_eq!(
        m.render_with(&FormatConfig::new(6, 1)),
        "Matrix(\n   1.0   0.0\n   0.3  -3.0\n)"
    );
}

#[test]
fn vector_renders_bracketed_list() {
    assert_eq!(Vector::from([1.0, 2.5]).to_string(), "Vector(1.0, 2.5)");
    assert_eq!(Vector::zeros(0).to_string(), "Vector()");
}

#[test]
fn block_matrix_renders_vertical_separators() {
    let a = Matrix::from_rows(&[[1.0], [2.0]]).unwrap();
    let b = Matrix::from_rows(&[[3.0, 4.0], [5.0, 6.0]]).unwrap();
    let bm = BlockMatrix::new(vec![vec![a, b]]).unwrap();
    assert_eq!(
        bm.to_string(),
        "BlockMatrix(\n   1.000|   3.000   4.000\n   2.000|   5.000   6.000\n)"
    );
}
