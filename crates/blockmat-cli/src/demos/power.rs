//! Matrix power timing run.
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use blockmat::config::FormatConfig;
use blockmat::math::Matrix;
use blockmat::ops::square;

/// Parameters for the power run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Base matrix, row by row.
    pub matrix: Vec<Vec<f64>>,
    pub exponent: usize,
    pub format: FormatConfig,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            matrix: vec![vec![1.0, 1.0], vec![0.0, 1.0]],
            exponent: 10_000,
            format: FormatConfig::default(),
        }
    }
}

/// Outcome of a power run.
#[derive(Debug)]
pub struct PowerReport {
    pub result: Matrix,
    pub elapsed: Duration,
}

/// Load a power configuration from a JSON file.
pub fn load_power_config<P: AsRef<Path>>(path: P) -> Result<PowerConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: PowerConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Raise the configured matrix to the configured exponent and time it.
pub fn run_power(config: &PowerConfig) -> Result<PowerReport> {
    let base = Matrix::from_rows(&config.matrix).context("Invalid base matrix")?;
    log::info!(
        "Raising {}x{} matrix to power {}",
        base.nrows(),
        base.ncols(),
        config.exponent
    );

    let start = Instant::now();
    let result = square(&base, config.exponent)
        .with_context(|| format!("Failed to raise matrix to power {}", config.exponent))?;
    let elapsed = start.elapsed();

    log::info!("Finished in {:?}", elapsed);
    Ok(PowerReport { result, elapsed })
}
