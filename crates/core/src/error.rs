//! Error types for check functions and configuration

use thiserror::Error;

/// Failure of a single remote check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The remote answered but refused the value (non-success response)
    #[error("{message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    /// The request never got an answer
    #[error("transport error: {0}")]
    Transport(String),

    /// The answer arrived but its body could not be read
    #[error("malformed reply: {0}")]
    Malformed(String),
}

impl CheckError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            status: None,
            message: message.into(),
        }
    }

    /// Human-readable description, if the failure carries one
    ///
    /// Rejections surface the remote's own wording; an empty rejection
    /// message has no description.
    pub fn description(&self) -> Option<String> {
        match self {
            Self::Rejected { message, .. } => {
                let message = message.trim();
                (!message.is_empty()).then(|| message.to_string())
            }
            Self::Transport(detail) | Self::Malformed(detail) if detail.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

/// Invalid controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("marker `{0}` must not be empty")]
    EmptyMarker(&'static str),

    #[error("markers overlap: `{available}` and `{taken}` must not contain each other")]
    OverlappingMarkers { available: String, taken: String },

    #[error("delay_ms must be at most {max} (got {got})")]
    DelayOutOfRange { got: u64, max: u64 },
}
