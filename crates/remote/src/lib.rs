//! HTTP availability checks for fieldcheck
//!
//! This crate provides:
//! - `HttpCheck`, a `CheckFn` that asks a backend whether a value is free
//! - Decoding of free-text, structured and error replies
//! - `RemoteConfig` for the backend location

pub mod http;

pub use http::{HttpCheck, HttpCheckBuilder, RemoteConfig};

use thiserror::Error;

/// Errors raised while building an HTTP check
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("invalid check URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
