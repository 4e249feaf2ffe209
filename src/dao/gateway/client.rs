use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::Value;

use super::{
    Gateway,
    error::{GatewayError, GatewayResult},
    models::{GatewayReply, OutboundMessage, ProbeOutcome},
};

const HEALTH_PATH: &str = "api/health";
const MESSAGE_PATH: &str = "api/message";

/// Gateway implementation speaking HTTP through a pooled [`reqwest::Client`].
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Arc<str>,
    health_timeout: Duration,
    chat_timeout: Duration,
}

impl HttpGateway {
    /// Build a client for `base_url` with per-request deadlines for each endpoint.
    pub fn new(
        base_url: &str,
        health_timeout: Duration,
        chat_timeout: Duration,
    ) -> GatewayResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| GatewayError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::<str>::from(base_url.trim_end_matches('/')),
            health_timeout,
            chat_timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn probe(&self) -> GatewayResult<ProbeOutcome> {
        let started = Instant::now();
        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|source| {
                GatewayError::from_send(HEALTH_PATH, self.health_timeout, source)
            })?;

        Ok(ProbeOutcome {
            status: response.status(),
            latency: started.elapsed(),
        })
    }

    async fn post_message(&self, message: OutboundMessage) -> GatewayResult<GatewayReply> {
        let response = self
            .client
            .post(self.url(MESSAGE_PATH))
            .timeout(self.chat_timeout)
            .json(&message)
            .send()
            .await
            .map_err(|source| {
                GatewayError::from_send(MESSAGE_PATH, self.chat_timeout, source)
            })?;

        if !response.status().is_success() {
            return Err(GatewayError::RequestStatus {
                path: MESSAGE_PATH.to_string(),
                status: response.status(),
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|source| GatewayError::DecodeResponse {
                path: MESSAGE_PATH.to_string(),
                source,
            })?;

        Ok(payload.into())
    }
}

impl Gateway for HttpGateway {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn probe_health(&self) -> BoxFuture<'static, GatewayResult<ProbeOutcome>> {
        let gateway = self.clone();
        Box::pin(async move { gateway.probe().await })
    }

    fn send_message(
        &self,
        message: OutboundMessage,
    ) -> BoxFuture<'static, GatewayResult<GatewayReply>> {
        let gateway = self.clone();
        Box::pin(async move { gateway.post_message(message).await })
    }
}
