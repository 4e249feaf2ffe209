//! Access layer for the external OpenClaw gateway.

pub mod client;
pub mod error;
pub mod models;

use futures::future::BoxFuture;

pub use self::client::HttpGateway;
pub use self::error::{GatewayError, GatewayResult};
pub use self::models::{GatewayReply, OutboundMessage, ProbeOutcome};

/// Abstraction over the upstream gateway consumed by the health and chat services.
pub trait Gateway: Send + Sync {
    /// Base URL the gateway is reached at, without trailing slash.
    fn base_url(&self) -> &str;
    /// Hit the gateway health endpoint. Any HTTP answer is `Ok`, only transport failures are `Err`.
    fn probe_health(&self) -> BoxFuture<'static, GatewayResult<ProbeOutcome>>;
    /// Forward a chat message and decode the gateway reply.
    fn send_message(
        &self,
        message: OutboundMessage,
    ) -> BoxFuture<'static, GatewayResult<GatewayReply>>;
}
