//! Command-line front end for blockmat: timing runs and worked examples.
pub mod demos;
pub mod util;
