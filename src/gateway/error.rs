//! Error taxonomy for agent transport failures.
//!
//! Every failure the gateway can surface maps to exactly one
//! [`GatewayError`] variant. Messages tell the operator what failed and
//! the most likely remedy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by calls to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Request exceeded the per-call deadline.
    #[error("request timed out after {0}s - the agent may be busy loading a model, try again")]
    Timeout(u64),

    /// No response reached the client (DNS failure, connection refused).
    #[error("cannot reach the agent at {0} - check the agent is running and the URL is correct")]
    Unreachable(String),

    /// Endpoint missing on the agent.
    #[error("{0} not found on the agent - check the agent is running and up to date")]
    NotFound(String),

    /// Agent returned a 5xx status.
    #[error("agent returned {0} - check the agent logs for the failure")]
    ServerError(u16),

    /// Response arrived but was not the expected JSON shape.
    #[error("unexpected response from the agent: {0} - check the URL points at the agent, not a proxy or login page")]
    Protocol(String),

    /// Any other response status.
    #[error("agent returned unexpected status {status}: {message}")]
    Other { status: u16, message: String },
}

impl GatewayError {
    /// The closed classification tag for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Timeout(_) => ErrorKind::Timeout,
            GatewayError::Unreachable(_) => ErrorKind::Unreachable,
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            GatewayError::ServerError(_) => ErrorKind::ServerError,
            GatewayError::Protocol(_) => ErrorKind::Protocol,
            GatewayError::Other { status, .. } => ErrorKind::Other(*status),
        }
    }
}

/// Classification tag carried into the state store and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    Unreachable,
    NotFound,
    ServerError,
    Protocol,
    Other(u16),
}

/// A failure as held by the state store: tag plus operator-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&GatewayError> for ErrorInfo {
    fn from(error: &GatewayError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Classify a reqwest failure where no usable response arrived.
pub(crate) fn classify_transport(
    error: reqwest::Error,
    timeout_seconds: u64,
    base_url: &str,
) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(timeout_seconds)
    } else {
        GatewayError::Unreachable(base_url.to_string())
    }
}

/// Classify a non-success response status.
pub(crate) fn classify_status(status: u16, path: &str, body: &str) -> GatewayError {
    match status {
        404 => GatewayError::NotFound(path.to_string()),
        500..=599 => GatewayError::ServerError(status),
        _ => GatewayError::Other {
            status,
            message: snippet(body),
        },
    }
}

/// First line of the body, bounded, for error context.
fn snippet(body: &str) -> String {
    let line = body.lines().next().unwrap_or("").trim();
    let mut out: String = line.chars().take(120).collect();
    if out.is_empty() {
        out.push_str("(empty body)");
    }
    out
}
