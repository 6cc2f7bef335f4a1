//! Check status and the result object shown to the user

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a field check currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Nothing to check (gate closed or blank input)
    #[default]
    Idle,
    /// A check is scheduled or in flight
    Loading,
    /// The value is free to use
    Available,
    /// The value is already in use
    Taken,
    /// The check failed or returned something unrecognized
    Error,
}

impl CheckStatus {
    /// Returns true for statuses produced by a completed check
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Available | Self::Taken | Self::Error)
    }

    /// Returns true when a form must not be submitted with this status
    ///
    /// `loading` and `idle` do not block: the backend has the final word.
    pub fn blocks_submission(self) -> bool {
        matches!(self, Self::Taken | Self::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Available => "available",
            Self::Taken => "taken",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status plus the human-readable message to display next to the field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn loading() -> Self {
        Self {
            status: CheckStatus::Loading,
            message: String::new(),
        }
    }

    pub fn available(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Available,
            message: message.into(),
        }
    }

    pub fn taken(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Taken,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.status)
        } else {
            write!(f, "{}: {}", self.status, self.message)
        }
    }
}
