use std::time::Duration;

use tracing::warn;

use crate::{
    dao::gateway::{GatewayResult, ProbeOutcome},
    dto::health::{
        ApplicationStatus, GatewayHealth, GatewayStatus, HealthChecks, HealthReport,
        OverallStatus, ServicesStatus,
    },
    error::ServiceError,
    services::process_metrics,
    state::SharedState,
};

/// Share of its memory budget the process may hold before the memory check fails.
const MEMORY_PRESSURE_LIMIT: f64 = 0.8;

/// Probe the gateway and assemble the full health report.
///
/// An unreachable or failing gateway only degrades the report; errors are reserved for
/// failures to read the process' own state.
pub async fn health_report(state: &SharedState) -> Result<HealthReport, ServiceError> {
    let gateway = state.gateway();
    let probe = gateway.probe_health().await;
    let gateway_health = classify_probe(gateway.base_url(), probe);

    let application = process_metrics::application_status(state.started_at())?;
    let system = process_metrics::system_status()?;

    Ok(HealthReport {
        status: OverallStatus::from(gateway_health.status),
        checks: evaluate_checks(gateway_health.status, &application),
        services: ServicesStatus::for_gateway(gateway_health.status),
        version: process_metrics::version_info(),
        gateway: gateway_health,
        application,
        system,
    })
}

/// Turn a probe result into the gateway section of the report.
fn classify_probe(url: &str, probe: GatewayResult<ProbeOutcome>) -> GatewayHealth {
    let (status, latency) = match probe {
        Ok(outcome) if outcome.status.is_success() => {
            (GatewayStatus::Connected, Some(outcome.latency))
        }
        Ok(outcome) => {
            warn!(
                gateway = url,
                status = %outcome.status,
                "gateway health endpoint returned an error status"
            );
            (GatewayStatus::Error, Some(outcome.latency))
        }
        Err(err) => {
            warn!(
                gateway = url,
                error = %err,
                "gateway unreachable; reporting degraded health"
            );
            (GatewayStatus::Disconnected, None)
        }
    };

    GatewayHealth {
        url: url.to_string(),
        status,
        response_time: latency.map(as_millis),
        connected: status == GatewayStatus::Connected,
    }
}

fn evaluate_checks(gateway: GatewayStatus, application: &ApplicationStatus) -> HealthChecks {
    HealthChecks {
        gateway: gateway == GatewayStatus::Connected,
        api: true,
        memory: application
            .memory
            .usage_ratio()
            .is_some_and(|ratio| ratio < MEMORY_PRESSURE_LIMIT),
        uptime: application.uptime > 0.0,
    }
}

fn as_millis(latency: Duration) -> u64 {
    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX)
}
