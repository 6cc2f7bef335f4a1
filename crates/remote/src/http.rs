//! HTTP check function
//!
//! Issues `GET {base_url}{path}?{param}={value}` and turns the response into
//! a [`Reply`] or a [`CheckError`]:
//! - 2xx with a JSON `{"status": "available" | "taken", "message": ..}` body
//!   becomes a structured reply
//! - any other 2xx body is free text, left to marker classification
//! - non-2xx bodies become rejections carrying the backend's message
//! - no response is a transport error, an unreadable body is malformed

use crate::RemoteError;
use async_trait::async_trait;
use check_core::{CheckError, CheckFn, Reply, Verdict};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Message used when a failed response has no body at all
pub const EMPTY_REJECTION: &str = "未知错误";

/// Where the check endpoints live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Backend origin, e.g. `http://localhost:8080`
    pub base_url: String,

    /// Per-request timeout. Unset means wait for as long as the backend takes.
    pub timeout_ms: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: None,
        }
    }
}

impl RemoteConfig {
    /// Start building a check against `path`, sending the value as `param`
    pub fn check(&self, path: &str, param: &str) -> HttpCheckBuilder {
        let builder = HttpCheck::builder(&self.base_url).path(path).param(param);
        match self.timeout_ms {
            Some(ms) => builder.timeout(Duration::from_millis(ms)),
            None => builder,
        }
    }
}

/// Structured success body
#[derive(Debug, Deserialize)]
struct StructuredReply {
    status: Verdict,
    #[serde(default)]
    message: String,
}

/// Availability check over HTTP
#[derive(Debug, Clone)]
pub struct HttpCheck {
    client: Client,
    url: Url,
    param: String,
}

/// Builder for [`HttpCheck`]
#[derive(Debug, Clone)]
pub struct HttpCheckBuilder {
    base_url: String,
    path: String,
    param: String,
    timeout: Option<Duration>,
}

impl HttpCheckBuilder {
    /// Endpoint path appended to the base URL
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Query parameter carrying the value
    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<HttpCheck, RemoteError> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        let url = Url::parse(&raw).map_err(|e| RemoteError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        let mut client = Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        Ok(HttpCheck {
            client: client.build()?,
            url,
            param: self.param,
        })
    }
}

impl HttpCheck {
    pub fn builder(base_url: impl Into<String>) -> HttpCheckBuilder {
        HttpCheckBuilder {
            base_url: base_url.into(),
            path: String::new(),
            param: "value".to_string(),
            timeout: None,
        }
    }

    /// Endpoint URL, without the query
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl CheckFn for HttpCheck {
    async fn check(&self, value: &str) -> Result<Reply, CheckError> {
        let response = self
            .client
            .get(self.url.clone())
            .query(&[(self.param.as_str(), value)])
            .send()
            .await
            .map_err(|e| CheckError::Transport(e.to_string()))?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let body = response
            .text()
            .await
            .map_err(|e| CheckError::Malformed(e.to_string()))?;

        debug!(url = %self.url, status = status.as_u16(), "check response");

        if status.is_success() {
            Ok(success_reply(&body, is_json))
        } else {
            Err(CheckError::Rejected {
                status: Some(status.as_u16()),
                message: rejection_message(&body),
            })
        }
    }
}

fn success_reply(body: &str, is_json: bool) -> Reply {
    if is_json {
        if let Ok(structured) = serde_json::from_str::<StructuredReply>(body) {
            return Reply::verdict(structured.status, structured.message);
        }
    }
    Reply::text(body)
}

/// Extract the human message from a failed response
///
/// JSON bodies contribute their `message` field, or the whole document when
/// it has none; anything else is used verbatim.
fn rejection_message(body: &str) -> String {
    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => match json.get("message").and_then(|m| m.as_str()) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => json.to_string(),
        },
        Err(_) => body.to_string(),
    };

    if message.is_empty() {
        EMPTY_REJECTION.to_string()
    } else {
        message
    }
}
