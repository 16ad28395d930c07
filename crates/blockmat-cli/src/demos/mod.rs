pub mod blocks;
pub mod power;
