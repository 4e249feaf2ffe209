use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// `/chat` proxy and descriptor.
pub mod chat;
/// `/health` report and liveness.
pub mod health;

/// Compose all route trees, wiring in shared state and documentation routes.
///
/// API routes are served both at the root and under `/api`, where the dashboard calls them.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router().merge(chat::router());

    Router::new()
        .merge(api_router.clone())
        .nest("/api", api_router)
        .merge(docs_router())
        .with_state(state)
}

/// Serve the Swagger UI backed by the generated OpenAPI document.
fn docs_router() -> Router<SharedState> {
    SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into()
}
