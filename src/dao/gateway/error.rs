//! Error types raised while talking to the upstream gateway.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`GatewayError`] failures.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures that can occur while interacting with the OpenClaw gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build gateway client")]
    ClientBuilder {
        /// Underlying builder error.
        #[source]
        source: reqwest::Error,
    },
    /// The request did not complete before the configured deadline.
    #[error("gateway request to `{path}` timed out after {timeout_ms} ms")]
    Timeout {
        /// Gateway path that was requested.
        path: String,
        /// Deadline that expired.
        timeout_ms: u128,
    },
    /// The request could not be sent (connection refused, DNS failure, ...).
    #[error("failed to reach gateway at `{path}`: {source}")]
    RequestSend {
        /// Gateway path that was requested.
        path: String,
        /// Transport error reported by the client.
        #[source]
        source: reqwest::Error,
    },
    /// The gateway answered with a non-success status code.
    #[error("gateway responded with {status}")]
    RequestStatus {
        /// Gateway path that was requested.
        path: String,
        /// Status the gateway answered with.
        status: StatusCode,
    },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode gateway response for `{path}`: {source}")]
    DecodeResponse {
        /// Gateway path that was requested.
        path: String,
        /// Decoding error reported by the client.
        #[source]
        source: reqwest::Error,
    },
}

impl GatewayError {
    /// Classify a transport failure, separating deadline expiry from other send errors.
    pub(crate) fn from_send(path: &str, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            GatewayError::Timeout {
                path: path.to_string(),
                timeout_ms: timeout.as_millis(),
            }
        } else {
            GatewayError::RequestSend {
                path: path.to_string(),
                source,
            }
        }
    }
}
