use tracing::{debug, warn};

use crate::{
    dao::gateway::OutboundMessage, dto::chat::ChatResponse, services::fallback::DEFAULT_REPLY,
    state::SharedState,
};

/// Relay `message` to the gateway and return its reply.
///
/// Any gateway failure (error status, transport error, undecodable body) is answered with a
/// random fallback phrase instead of an error.
pub async fn relay_message(state: &SharedState, message: String) -> ChatResponse {
    let gateway = state.gateway();

    match gateway.send_message(OutboundMessage::webchat(message)).await {
        Ok(reply) => {
            debug!(gateway = gateway.base_url(), "gateway replied to chat message");
            let response = reply.text.unwrap_or_else(|| DEFAULT_REPLY.to_string());
            ChatResponse::relayed(response, gateway.base_url())
        }
        Err(err) => {
            warn!(
                gateway = gateway.base_url(),
                error = %err,
                "chat relay failed; answering with fallback phrase"
            );
            fallback_reply(state, err.to_string()).await
        }
    }
}

/// Answer with a random fallback phrase, reporting `error` as the reason.
pub async fn fallback_reply(state: &SharedState, error: String) -> ChatResponse {
    let phrase = state.pick_fallback_phrase(state.gateway().base_url()).await;
    ChatResponse::fallback(phrase, error)
}
