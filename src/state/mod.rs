use std::{sync::Arc, time::Instant};

use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    dao::gateway::{Gateway, GatewayResult, HttpGateway},
    services::fallback::pick_fallback_phrase,
};

/// Cheaply cloneable handle on [`AppState`] used as the axum router state.
pub type SharedState = Arc<AppState>;

/// Central application state: the gateway handle and the RNG behind fallback replies.
///
/// Nothing here changes between requests apart from the RNG position.
pub struct AppState {
    gateway: Arc<dyn Gateway>,
    fallback_rng: Mutex<StdRng>,
    started_at: Instant,
}

impl AppState {
    /// Build the state for `config`, talking to the gateway over HTTP.
    pub fn new(config: &AppConfig) -> GatewayResult<SharedState> {
        let gateway = HttpGateway::new(
            config.gateway_url(),
            config.health_timeout(),
            config.chat_timeout(),
        )?;
        Ok(Self::with_gateway(Arc::new(gateway), StdRng::from_os_rng()))
    }

    /// Build the state around an explicit gateway and RNG.
    pub fn with_gateway(gateway: Arc<dyn Gateway>, rng: StdRng) -> SharedState {
        Arc::new(Self {
            gateway,
            fallback_rng: Mutex::new(rng),
            started_at: Instant::now(),
        })
    }

    /// Gateway shared by every handler.
    pub fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    /// Instant the state was created, used as process start for uptime.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Draw a fallback phrase naming `gateway_url`.
    pub async fn pick_fallback_phrase(&self, gateway_url: &str) -> String {
        let mut rng = self.fallback_rng.lock().await;
        pick_fallback_phrase(&mut *rng, gateway_url)
    }
}
