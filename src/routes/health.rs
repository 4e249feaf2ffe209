use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use tracing::error;

use crate::{
    dto::health::{HealthFailure, HealthReport},
    error::AppError,
    services::health_service,
    state::SharedState,
};

/// Configure the health routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/health", get(health).head(liveness))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Health report; gateway outages only degrade `status`", body = HealthReport),
        (status = 500, description = "Report could not be assembled", body = HealthFailure)
    )
)]
/// Probe the gateway and return the composed health report.
pub async fn health(State(state): State<SharedState>) -> Result<Json<HealthReport>, AppError> {
    let report = health_service::health_report(&state)
        .await
        .inspect_err(|err| error!(error = %err, "failed to build health report"))?;
    Ok(Json(report))
}

#[utoipa::path(
    head,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is alive; the gateway is not probed"))
)]
/// Liveness shortcut for load balancers.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
