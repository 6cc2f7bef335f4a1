//! Replies returned by a check function

use serde::{Deserialize, Serialize};

/// Structured answer from a backend that reports a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Available,
    Taken,
}

/// A successful reply from the remote check
///
/// Legacy endpoints only return free text, which is classified by marker
/// substrings. Endpoints that know the answer set `verdict` and skip that.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub verdict: Option<Verdict>,
    pub message: String,
}

impl Reply {
    /// Free-text reply, classified by markers
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            verdict: None,
            message: message.into(),
        }
    }

    /// Reply carrying an explicit verdict
    pub fn verdict(verdict: Verdict, message: impl Into<String>) -> Self {
        Self {
            verdict: Some(verdict),
            message: message.into(),
        }
    }
}

impl From<String> for Reply {
    fn from(message: String) -> Self {
        Self::text(message)
    }
}

impl From<&str> for Reply {
    fn from(message: &str) -> Self {
        Self::text(message)
    }
}
