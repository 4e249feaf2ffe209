//! Wire models exchanged with the OpenClaw gateway.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Channel name the dashboard identifies itself with.
pub const WEBCHAT_CHANNEL: &str = "webchat";
/// Session shared by every message sent from the dashboard.
pub const DASHBOARD_SESSION: &str = "openrexcheck-dashboard";

/// Body posted to `<gateway>/api/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// User message, forwarded verbatim.
    pub text: String,
    /// Always [`WEBCHAT_CHANNEL`].
    pub channel: &'static str,
    /// Always [`DASHBOARD_SESSION`].
    pub session: &'static str,
}

impl OutboundMessage {
    /// Wrap a user message for the dashboard's webchat session.
    pub fn webchat(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            channel: WEBCHAT_CHANNEL,
            session: DASHBOARD_SESSION,
        }
    }
}

/// Decoded reply returned by the gateway message endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayReply {
    /// Reply text, when the gateway provided a non-empty string.
    pub text: Option<String>,
}

impl From<Value> for GatewayReply {
    fn from(value: Value) -> Self {
        let text = value
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_owned);
        Self { text }
    }
}

/// Result of a health probe that reached the gateway, whatever its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Status code the gateway answered with.
    pub status: StatusCode,
    /// Time from sending the request to receiving the response head.
    pub latency: Duration,
}
