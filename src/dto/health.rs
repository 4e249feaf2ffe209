use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::timestamp_now;

/// Aggregate health classification of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
    Unhealthy,
    Error,
}

impl From<GatewayStatus> for OverallStatus {
    fn from(status: GatewayStatus) -> Self {
        match status {
            GatewayStatus::Connected => OverallStatus::Healthy,
            GatewayStatus::Disconnected => OverallStatus::Degraded,
            GatewayStatus::Unknown | GatewayStatus::Error => OverallStatus::Unhealthy,
        }
    }
}

/// Connectivity of the upstream gateway as seen by the last probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    /// Gateway answered its health endpoint with a success status.
    Connected,
    /// Gateway could not be reached (timeout, refused connection, DNS failure).
    Disconnected,
    /// Gateway has not been probed.
    #[default]
    Unknown,
    /// Gateway answered with a non-success status.
    Error,
}

/// Gateway section of the health report.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayHealth {
    pub url: String,
    pub status: GatewayStatus,
    /// Probe latency in milliseconds; `null` when the gateway was unreachable.
    pub response_time: Option<u64>,
    pub connected: bool,
}

/// Memory usage snapshot, all values in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct MemorySnapshot {
    /// Resident set size of this process.
    pub rss: u64,
    /// Virtual memory reserved by this process.
    #[serde(rename = "virtual")]
    pub virtual_size: u64,
    /// Memory held by this process (its resident set).
    pub used: u64,
    /// Memory this process may use: the cgroup limit when set, otherwise host memory.
    pub total: u64,
}

impl MemorySnapshot {
    /// Fraction of `total` currently `used`, `None` when the total is unknown.
    pub fn usage_ratio(&self) -> Option<f64> {
        (self.total > 0).then(|| self.used as f64 / self.total as f64)
    }
}

/// Process-level fields read when the report is built.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationStatus {
    /// Seconds since the service started.
    pub uptime: f64,
    pub memory: MemorySnapshot,
    pub runtime: String,
    pub environment: String,
}

/// Host information attached to the report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SystemStatus {
    pub timestamp: String,
    pub timezone: String,
    pub platform: String,
    pub arch: String,
}

/// Synthetic status of the dashboard's auxiliary services.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServicesStatus {
    pub api: String,
    pub database: String,
    pub cache: String,
    pub websocket: String,
}

impl ServicesStatus {
    /// Nothing but the gateway-backed websocket varies.
    pub fn for_gateway(status: GatewayStatus) -> Self {
        let websocket = if status == GatewayStatus::Connected {
            "available"
        } else {
            "unavailable"
        };
        Self {
            api: "running".into(),
            database: "not-configured".into(),
            cache: "not-configured".into(),
            websocket: websocket.into(),
        }
    }
}

/// Boolean checks consumed by the dashboard health indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthChecks {
    pub gateway: bool,
    pub api: bool,
    pub memory: bool,
    pub uptime: bool,
}

/// Version block of the report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VersionInfo {
    pub app: String,
    pub framework: String,
    pub runtime: String,
}

/// Full health document returned by `GET /health`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub gateway: GatewayHealth,
    pub application: ApplicationStatus,
    pub system: SystemStatus,
    pub services: ServicesStatus,
    pub checks: HealthChecks,
    pub version: VersionInfo,
}

/// Body returned with a 500 when the report itself could not be built.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthFailure {
    pub status: OverallStatus,
    pub error: String,
    pub timestamp: String,
    pub fallback: bool,
}

impl HealthFailure {
    /// Wrap `error` into the fallback health document.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: OverallStatus::Error,
            error: error.into(),
            timestamp: timestamp_now(),
            fallback: true,
        }
    }
}
