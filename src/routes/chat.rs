use axum::{Json, Router, body::Bytes, extract::State, routing::get};
use tracing::warn;
use validator::Validate;

use crate::{
    dto::chat::{ChatEndpointDoc, ChatRequest, ChatResponse},
    error::AppError,
    services::chat_service,
    state::SharedState,
};

/// Path the dashboard reaches the chat proxy at.
const CHAT_ENDPOINT: &str = "/api/chat";

/// Chat proxy routes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/chat", get(describe).post(send_message))
}

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Gateway reply, or a fallback phrase with `success: false`", body = ChatResponse),
        (status = 400, description = "Message is missing, empty or falsy")
    )
)]
/// Forward a message to the gateway and relay its reply.
///
/// The body is read as JSON whatever its `Content-Type`. Bodies that are not JSON get a
/// fallback reply, like any other failure after validation.
pub async fn send_message(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let payload = match ChatRequest::from_body(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "unreadable chat body; answering with fallback phrase");
            return Ok(Json(chat_service::fallback_reply(&state, err.to_string()).await));
        }
    };
    payload.validate()?;

    let message = payload.message.unwrap_or_default();
    Ok(Json(chat_service::relay_message(&state, message).await))
}

#[utoipa::path(
    get,
    path = "/chat",
    tag = "chat",
    responses((status = 200, description = "Endpoint description", body = ChatEndpointDoc))
)]
/// Describe how to call the chat endpoint.
pub async fn describe() -> Json<ChatEndpointDoc> {
    Json(ChatEndpointDoc::describe(CHAT_ENDPOINT))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{
        Router as MockRouter,
        body::Body,
        http::{Method, Request, StatusCode},
        routing::post,
    };
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;

    use super::*;
    use crate::{
        dao::gateway::{HttpGateway, OutboundMessage},
        routes,
        services::fallback::fallback_phrases,
        state::AppState,
        test_support::{STUB_GATEWAY_URL, StubGateway, call, send, serve, state_with},
    };

    async fn http_state(upstream: MockRouter) -> (SharedState, String) {
        let base = serve(upstream).await;
        let gateway =
            HttpGateway::new(&base, Duration::from_secs(1), Duration::from_secs(1)).unwrap();
        let state = AppState::with_gateway(Arc::new(gateway), StdRng::seed_from_u64(3));
        (state, base)
    }

    #[tokio::test]
    async fn relays_gateway_reply() {
        let gateway = StubGateway::answering(StatusCode::OK, Some("Hi"));
        let app = routes::router(state_with(gateway.clone()));

        let (status, body) =
            call(app, Method::POST, "/chat", Some(json!({ "message": "Hello Rex!" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Hi");
        assert_eq!(body["success"], true);
        assert_eq!(body["gateway"], STUB_GATEWAY_URL);
        assert!(body["timestamp"].is_string());
        assert_eq!(gateway.sent_messages().len(), 1);
    }

    #[tokio::test]
    async fn empty_or_missing_message_is_rejected_without_gateway_call() {
        let gateway = StubGateway::answering(StatusCode::OK, Some("Hi"));

        for payload in [json!({ "message": "" }), json!({})] {
            let app = routes::router(state_with(gateway.clone()));
            let (status, body) = call(app, Method::POST, "/api/chat", Some(payload)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Message is required" }));
        }
        assert!(gateway.sent_messages().is_empty());
    }

    fn raw_post(content_type: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/chat")
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn falsy_message_is_rejected_without_gateway_call() {
        let gateway = StubGateway::answering(StatusCode::OK, Some("Hi"));

        for payload in [
            json!({ "message": null }),
            json!({ "message": false }),
            json!({ "message": 0 }),
            json!(["Hello"]),
        ] {
            let app = routes::router(state_with(gateway.clone()));
            let (status, body) = call(app, Method::POST, "/chat", Some(payload)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Message is required" }));
        }
        assert!(gateway.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn json_sent_as_plain_text_is_relayed() {
        let gateway = StubGateway::answering(StatusCode::OK, Some("Hi"));
        let app = routes::router(state_with(gateway.clone()));

        let (status, body) =
            send(app, raw_post("text/plain;charset=UTF-8", r#"{"message":"hello"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(
            gateway.sent_messages(),
            vec![OutboundMessage::webchat("hello")]
        );
    }

    #[tokio::test]
    async fn non_string_message_is_forwarded_as_text() {
        let gateway = StubGateway::answering(StatusCode::OK, Some("Hi"));
        let app = routes::router(state_with(gateway.clone()));

        let (status, body) =
            call(app, Method::POST, "/chat", Some(json!({ "message": 123 }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Hi");
        assert_eq!(gateway.sent_messages(), vec![OutboundMessage::webchat("123")]);
    }

    #[tokio::test]
    async fn malformed_body_gets_fallback_without_gateway_call() {
        let gateway = StubGateway::answering(StatusCode::OK, Some("Hi"));

        for body in ["{ not json", "", "null"] {
            let app = routes::router(state_with(gateway.clone()));
            let (status, reply) = send(app, raw_post("application/json", body)).await;

            assert_eq!(status, StatusCode::OK, "{body:?}");
            assert_eq!(reply["success"], false);
            assert_eq!(reply["fallback"], true);
            assert!(reply["error"].is_string());
            let phrase = reply["response"].as_str().unwrap().to_string();
            assert!(fallback_phrases(STUB_GATEWAY_URL).contains(&phrase));
        }
        assert!(gateway.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn unreachable_gateway_still_answers_ok_with_fallback() {
        let app = routes::router(state_with(StubGateway::unreachable()));

        let (status, body) =
            call(app, Method::POST, "/chat", Some(json!({ "message": "anyone?" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["fallback"], true);
        assert!(body["error"].as_str().unwrap().contains("timed out"));
        let phrase = body["response"].as_str().unwrap().to_string();
        assert!(fallback_phrases(STUB_GATEWAY_URL).contains(&phrase));
    }

    #[tokio::test]
    async fn descriptor_documents_post_shape() {
        let app = routes::router(state_with(StubGateway::unreachable()));

        let (status, body) = call(app, Method::GET, "/chat", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoint"], "/api/chat");
        assert_eq!(body["methods"], json!(["POST"]));
        assert_eq!(body["parameters"]["message"], "string (required)");
    }

    #[tokio::test]
    async fn relays_reply_from_real_gateway() {
        let (state, base) = http_state(MockRouter::new().route(
            "/api/message",
            post(|| async { Json(json!({ "text": "Hi" })) }),
        ))
        .await;

        let (status, body) = call(
            routes::router(state),
            Method::POST,
            "/chat",
            Some(json!({ "message": "Hello" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Hi");
        assert_eq!(body["success"], true);
        assert_eq!(body["gateway"], base);
    }

    #[tokio::test]
    async fn gateway_error_status_falls_back() {
        let (state, base) = http_state(MockRouter::new().route(
            "/api/message",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        ))
        .await;

        let (status, body) = call(
            routes::router(state),
            Method::POST,
            "/chat",
            Some(json!({ "message": "Hello" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["fallback"], true);
        assert_eq!(body["error"], "gateway responded with 503 Service Unavailable");
        let phrase = body["response"].as_str().unwrap().to_string();
        assert!(fallback_phrases(&base).contains(&phrase));
    }
}
