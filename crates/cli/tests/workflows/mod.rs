//! Workflow integration tests
//!
//! Tests for complete workflows that drive the `fieldcheck` binary end to
//! end and validate its observable behavior.

pub mod check_backend;
pub mod config_management;
