//! Dense `f64` vectors, matrices and block matrices.
//!
//! `Vector` and `Matrix` are small owned containers over a flat buffer;
//! `Matrix` is row-major. `BlockMatrix` groups matrices into a grid and
//! `dot` multiplies any supported pair of them.
pub mod block;
pub mod dot;
pub mod matrix;
pub mod vector;

pub use block::BlockMatrix;
pub use dot::{dot, Operand, Product};
pub use matrix::{Matrix, Select, Selection};
pub use vector::Vector;
