/// Chat relay to the gateway with fallback replies.
pub mod chat_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Canned chat replies and their random selection.
pub mod fallback;
/// Health report aggregation.
pub mod health_service;
/// Process, host and version readings.
pub mod process_metrics;
