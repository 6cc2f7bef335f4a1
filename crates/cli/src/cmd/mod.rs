//! CLI command implementations

pub mod check;
pub mod config;
pub mod simulate;
