//! Reply classification
//!
//! Legacy backends answer availability checks with free text such as
//! "用户名可用" or "用户名已存在". The status is recovered by looking for two
//! mutually exclusive marker substrings. Anything that matches neither is an
//! error, never a silent success.

use crate::error::{CheckError, ConfigError};
use crate::reply::{Reply, Verdict};
use crate::status::CheckResult;
use serde::{Deserialize, Serialize};

/// Marker substrings and fallback messages used to classify replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Substring meaning "the value is free" (default: "可用")
    pub available: String,
    /// Substring meaning "the value already exists" (default: "存在")
    pub taken: String,
    /// Shown when a reply matches neither marker and is empty
    pub unknown_message: String,
    /// Shown when a failed check carries no description
    pub failure_message: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            available: "可用".to_string(),
            taken: "存在".to_string(),
            unknown_message: "检查返回未知结果".to_string(),
            failure_message: "检查失败，请稍后再试".to_string(),
        }
    }
}

impl Markers {
    /// Classify a successful reply
    ///
    /// A structured verdict wins over the text. Otherwise the available
    /// marker is tested first, then the taken marker.
    pub fn classify(&self, reply: &Reply) -> CheckResult {
        match reply.verdict {
            Some(Verdict::Available) => return CheckResult::available(reply.message.clone()),
            Some(Verdict::Taken) => return CheckResult::taken(reply.message.clone()),
            None => {}
        }

        let message = &reply.message;
        if message.contains(&self.available) {
            CheckResult::available(message.clone())
        } else if message.contains(&self.taken) {
            CheckResult::taken(message.clone())
        } else if message.is_empty() {
            CheckResult::error(self.unknown_message.clone())
        } else {
            CheckResult::error(message.clone())
        }
    }

    /// Classify a failed check
    pub fn classify_failure(&self, err: &CheckError) -> CheckResult {
        match err.description() {
            Some(description) => CheckResult::error(description),
            None => CheckResult::error(self.failure_message.clone()),
        }
    }

    /// Validate marker configuration
    ///
    /// `contains` on an empty marker matches everything, and overlapping
    /// markers would make `taken` unreachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.available.is_empty() {
            return Err(ConfigError::EmptyMarker("available"));
        }
        if self.taken.is_empty() {
            return Err(ConfigError::EmptyMarker("taken"));
        }
        if self.available.contains(&self.taken) || self.taken.contains(&self.available) {
            return Err(ConfigError::OverlappingMarkers {
                available: self.available.clone(),
                taken: self.taken.clone(),
            });
        }
        if self.unknown_message.is_empty() {
            return Err(ConfigError::EmptyMarker("unknown_message"));
        }
        if self.failure_message.is_empty() {
            return Err(ConfigError::EmptyMarker("failure_message"));
        }
        Ok(())
    }
}
