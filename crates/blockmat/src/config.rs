use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fixed-width cell layout used when rendering vectors and matrices as text.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Minimum characters per cell, right-aligned.
    pub width: usize,
    /// Digits after the decimal point.
    pub precision: usize,
}

impl FormatConfig {
    pub fn new(width: usize, precision: usize) -> Self {
        Self { width, precision }
    }

    pub(crate) fn cell(&self, value: f64) -> String {
        format!("{:>w$.p$}", value, w = self.width, p = self.precision)
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            width: 8,
            precision: 3,
        }
    }
}

/// Parses `"WIDTH.PRECISION"`, e.g. `"8.3"`, like a printf width and precision.
impl FromStr for FormatConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, precision) = s
            .split_once('.')
            .ok_or_else(|| format!("Invalid format string: {}. Expected WIDTH.PRECISION", s))?;
        let width = width
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("Invalid width in '{}': {}", s, e))?;
        let precision = precision
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("Invalid precision in '{}': {}", s, e))?;
        Ok(Self { width, precision })
    }
}
