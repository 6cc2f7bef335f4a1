//! Core types for debounced field availability checks
//!
//! This crate provides:
//! - The five-state check result (`idle`, `loading`, `available`, `taken`, `error`)
//! - Reply classification (marker substrings or structured verdicts)
//! - The `CheckFn` seam for remote validation calls
//! - Controller configuration

pub mod check;
pub mod classify;
pub mod config;
pub mod error;
pub mod reply;
pub mod status;

// Re-exports
pub use check::{from_fn, CheckFn, FnCheck, SharedCheck};
pub use classify::Markers;
pub use config::ControllerConfig;
pub use error::{CheckError, ConfigError};
pub use reply::{Reply, Verdict};
pub use status::{CheckResult, CheckStatus};
