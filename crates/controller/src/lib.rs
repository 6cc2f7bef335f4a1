//! Debounced field validation for fieldcheck
//!
//! This crate provides:
//! - A controller that coalesces rapid input changes behind a quiet period
//! - Staleness tracking so superseded checks never touch the result
//! - An input-stream driver feeding the controller from a channel

pub mod debounce;
pub mod driver;

pub use debounce::{Input, ValidationController};
pub use driver::{drive, InputEvent};

use check_core::ConfigError;
use thiserror::Error;

/// Errors raised when building a controller
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Controllers schedule their timers on the ambient tokio runtime
    #[error("no tokio runtime available to schedule checks")]
    NoRuntime,

    #[error("invalid controller configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, ControllerError>;
