//! Helpers shared by unit tests: a scripted in-process gateway and a throwaway HTTP server.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use rand::{SeedableRng, rngs::StdRng};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::{
    dao::gateway::{
        Gateway, GatewayError, GatewayReply, GatewayResult, OutboundMessage, ProbeOutcome,
    },
    state::{AppState, SharedState},
};

pub(crate) const STUB_GATEWAY_URL: &str = "http://gateway.test:3000";

type ProbeFn = dyn Fn() -> GatewayResult<ProbeOutcome> + Send + Sync;
type ReplyFn = dyn Fn(&OutboundMessage) -> GatewayResult<GatewayReply> + Send + Sync;

/// Gateway double answering from closures and recording every call.
pub(crate) struct StubGateway {
    probe: Box<ProbeFn>,
    reply: Box<ReplyFn>,
    probes: AtomicUsize,
    messages: Mutex<Vec<OutboundMessage>>,
}

impl StubGateway {
    pub(crate) fn new(
        probe: impl Fn() -> GatewayResult<ProbeOutcome> + Send + Sync + 'static,
        reply: impl Fn(&OutboundMessage) -> GatewayResult<GatewayReply> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            probe: Box::new(probe),
            reply: Box::new(reply),
            probes: AtomicUsize::new(0),
            messages: Mutex::new(Vec::new()),
        })
    }

    /// Gateway that answers every probe with `status` and echoes `text` to messages.
    pub(crate) fn answering(status: StatusCode, text: Option<&str>) -> Arc<Self> {
        let text = text.map(str::to_owned);
        Self::new(
            move || {
                Ok(ProbeOutcome {
                    status,
                    latency: Duration::from_millis(12),
                })
            },
            move |_| Ok(GatewayReply { text: text.clone() }),
        )
    }

    /// Gateway whose every call fails at the transport level.
    pub(crate) fn unreachable() -> Arc<Self> {
        Self::new(
            || {
                Err(GatewayError::Timeout {
                    path: "api/health".into(),
                    timeout_ms: 5000,
                })
            },
            |_| {
                Err(GatewayError::Timeout {
                    path: "api/message".into(),
                    timeout_ms: 30000,
                })
            },
        )
    }

    pub(crate) fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub(crate) fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.messages.lock().unwrap().clone()
    }
}

impl Gateway for StubGateway {
    fn base_url(&self) -> &str {
        STUB_GATEWAY_URL
    }

    fn probe_health(&self) -> BoxFuture<'static, GatewayResult<ProbeOutcome>> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let outcome = (self.probe)();
        Box::pin(async move { outcome })
    }

    fn send_message(
        &self,
        message: OutboundMessage,
    ) -> BoxFuture<'static, GatewayResult<GatewayReply>> {
        let outcome = (self.reply)(&message);
        self.messages.lock().unwrap().push(message);
        Box::pin(async move { outcome })
    }
}

/// Build application state around `gateway` with a fixed RNG seed.
pub(crate) fn state_with(gateway: Arc<dyn Gateway>) -> SharedState {
    AppState::with_gateway(gateway, StdRng::seed_from_u64(7))
}

/// Serve `router` on an ephemeral loopback port and return its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a loopback port nothing listens on anymore.
pub(crate) async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Drive `app` with a single request and decode the JSON body (`Null` when empty).
pub(crate) async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Shorthand for [`send`] with an optional JSON body.
pub(crate) async fn call(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}
