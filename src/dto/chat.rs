//! DTOs for the chat proxy endpoint and its static descriptor.

use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;
use validator::Validate;

use crate::{dto::timestamp_now, error::ChatBodyError};

/// Message the dashboard wants relayed to the gateway.
#[derive(Debug, ToSchema, Validate)]
pub struct ChatRequest {
    #[validate(
        required(message = "Message is required"),
        length(min = 1, message = "Message is required")
    )]
    pub message: Option<String>,
}

impl ChatRequest {
    /// Read a request from a raw body, whatever its declared content type.
    ///
    /// Falsy `message` values (`null`, `false`, `0`) count as missing. Other non-string values
    /// are forwarded as their JSON text. Only bodies that are not JSON at all, or JSON `null`,
    /// are errors.
    pub fn from_body(body: &[u8]) -> Result<Self, ChatBodyError> {
        let message = match serde_json::from_slice::<Value>(body)? {
            Value::Null => return Err(ChatBodyError::Null),
            Value::Object(mut fields) => fields.remove("message").and_then(message_text),
            _ => None,
        };
        Ok(Self { message })
    }
}

fn message_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Outcome of a chat exchange.
///
/// Gateway failures are still answered with HTTP 200: clients must look at `success`
/// (and `fallback`) to tell a real reply from a canned one.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: String,
    /// Gateway that produced the reply; only set on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    pub success: bool,
    /// Why the gateway call failed; only set on fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

impl ChatResponse {
    /// Reply relayed from the gateway.
    pub fn relayed(response: String, gateway: &str) -> Self {
        Self {
            response,
            timestamp: timestamp_now(),
            gateway: Some(gateway.to_string()),
            success: true,
            error: None,
            fallback: None,
        }
    }

    /// Canned reply used when the gateway could not answer.
    pub fn fallback(response: String, error: String) -> Self {
        Self {
            response,
            timestamp: timestamp_now(),
            gateway: None,
            success: false,
            error: Some(error),
            fallback: Some(true),
        }
    }
}

/// Static description of the chat endpoint served on `GET /chat`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatEndpointDoc {
    pub endpoint: String,
    pub description: String,
    pub methods: Vec<String>,
    #[schema(value_type = Object)]
    pub parameters: Value,
    #[schema(value_type = Object)]
    pub example: Value,
}

impl ChatEndpointDoc {
    /// Describe the chat endpoint mounted at `endpoint`.
    pub fn describe(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            description: "Send messages to OpenClaw Gateway".into(),
            methods: vec!["POST".into()],
            parameters: json!({ "message": "string (required)" }),
            example: json!({
                "request": { "message": "Hello Rex!" },
                "response": {
                    "response": "Hello! How can I help?",
                    "timestamp": "2024-02-05T19:30:00Z",
                    "success": true
                }
            }),
        }
    }
}
