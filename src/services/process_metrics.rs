//! Process and host readings attached to the health report.

use std::{
    env::{self, VarError},
    time::Instant,
};

use sysinfo::{ProcessesToUpdate, System};

use crate::{
    dto::{
        health::{ApplicationStatus, MemorySnapshot, SystemStatus, VersionInfo},
        timestamp_now,
    },
    error::ServiceError,
};

const ENVIRONMENT_VAR: &str = "APP_ENV";
const DEFAULT_ENVIRONMENT: &str = "development";
const TIMEZONE_VAR: &str = "TZ";
const DEFAULT_TIMEZONE: &str = "UTC";

/// Identifier of the toolchain the service was built for.
pub const RUNTIME: &str = concat!("rust ", env!("CARGO_PKG_RUST_VERSION"));
/// HTTP framework serving the API.
pub const FRAMEWORK: &str = "axum 0.8";

/// Read uptime, memory and environment for the running process.
pub fn application_status(started_at: Instant) -> Result<ApplicationStatus, ServiceError> {
    let environment = environment_name(env::var(ENVIRONMENT_VAR))?;
    let memory = memory_snapshot()?;

    Ok(ApplicationStatus {
        uptime: started_at.elapsed().as_secs_f64(),
        memory,
        runtime: RUNTIME.to_string(),
        environment,
    })
}

/// Describe the host the service runs on.
pub fn system_status() -> Result<SystemStatus, ServiceError> {
    let timezone = match env::var(TIMEZONE_VAR) {
        Ok(tz) if !tz.trim().is_empty() => tz,
        Ok(_) | Err(VarError::NotPresent) => DEFAULT_TIMEZONE.to_string(),
        Err(VarError::NotUnicode(_)) => {
            return Err(ServiceError::Environment { var: TIMEZONE_VAR });
        }
    };

    Ok(SystemStatus {
        timestamp: timestamp_now(),
        timezone,
        platform: env::consts::OS.to_string(),
        arch: env::consts::ARCH.to_string(),
    })
}

/// Static version block.
pub fn version_info() -> VersionInfo {
    VersionInfo {
        app: env!("CARGO_PKG_VERSION").to_string(),
        framework: FRAMEWORK.to_string(),
        runtime: RUNTIME.to_string(),
    }
}

fn environment_name(value: Result<String, VarError>) -> Result<String, ServiceError> {
    match value {
        Ok(name) if !name.trim().is_empty() => Ok(name),
        Ok(_) | Err(VarError::NotPresent) => Ok(DEFAULT_ENVIRONMENT.to_string()),
        Err(VarError::NotUnicode(_)) => Err(ServiceError::Environment {
            var: ENVIRONMENT_VAR,
        }),
    }
}

/// Sample this process' memory together with host totals.
fn memory_snapshot() -> Result<MemorySnapshot, ServiceError> {
    let pid = sysinfo::get_current_pid()
        .map_err(|err| ServiceError::ProcessMetrics(err.to_string()))?;

    let mut sys = System::new();
    sys.refresh_memory();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    let process = sys
        .process(pid)
        .ok_or_else(|| ServiceError::ProcessMetrics(format!("process {pid} is not visible")))?;

    let cgroup_total = sys.cgroup_limits().map(|limits| limits.total_memory);

    Ok(MemorySnapshot {
        rss: process.memory(),
        virtual_size: process.virtual_memory(),
        used: process.memory(),
        total: memory_budget(sys.total_memory(), cgroup_total),
    })
}

/// Memory this process may grow into: the cgroup limit when one is tighter than the host.
fn memory_budget(host_total: u64, cgroup_total: Option<u64>) -> u64 {
    match cgroup_total {
        Some(limit) if limit > 0 && (host_total == 0 || limit < host_total) => limit,
        _ => host_total,
    }
}
