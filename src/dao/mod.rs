/// Client and wire models for the upstream OpenClaw gateway.
pub mod gateway;
