//! Controller configuration

use crate::classify::Markers;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted debounce delay
pub const MAX_DELAY_MS: u64 = 60_000;

/// Debounce and classification settings for one controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Quiet period after the last change before a check is dispatched
    pub delay_ms: u64,

    /// Abort an already-dispatched call when its value is superseded.
    ///
    /// Off by default: a superseded call runs to completion and its result
    /// is discarded.
    pub abort_in_flight: bool,

    /// Reply classification
    pub markers: Markers,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            abort_in_flight: false,
            markers: Markers::default(),
        }
    }
}

impl ControllerConfig {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay_ms: delay.as_millis().min(u128::from(u64::MAX)) as u64,
            ..Self::default()
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::DelayOutOfRange {
                got: self.delay_ms,
                max: MAX_DELAY_MS,
            });
        }
        self.markers.validate()
    }
}
