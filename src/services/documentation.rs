use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the OpenRexCheck gateway service.
#[openapi(
    info(title = "OpenRexCheck", description = "Gateway health aggregator and chat proxy"),
    paths(
        crate::routes::health::health,
        crate::routes::health::liveness,
        crate::routes::chat::send_message,
        crate::routes::chat::describe,
    ),
    components(
        schemas(
            crate::dto::health::HealthReport,
            crate::dto::health::HealthFailure,
            crate::dto::health::OverallStatus,
            crate::dto::health::GatewayStatus,
            crate::dto::chat::ChatRequest,
            crate::dto::chat::ChatResponse,
            crate::dto::chat::ChatEndpointDoc,
        )
    ),
    tags(
        (name = "health", description = "Gateway and process health"),
        (name = "chat", description = "Chat proxy to the OpenClaw gateway"),
    )
)]
pub struct ApiDoc;
