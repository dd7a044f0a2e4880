// Per-run host metrics

use std::fmt;

/// Bytes per GiB, the unit of the historical bandwidth figures.
pub const BYTES_PER_GIB: f64 = 1_073_741_824.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Active,
    Inactive,
}

impl ServiceStatus {
    /// Maps `systemctl is-active` stdout to a status.
    pub fn from_is_active(stdout: &str) -> Self {
        if stdout.trim() == "active" {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Path flag sent to the status endpoint.
    pub fn as_flag(self) -> &'static str {
        match self {
            Self::Active => "1",
            Self::Inactive => "0",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}

/// Historical traffic (rx + tx) in GiB.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DataUsage {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

#[derive(Debug, Clone)]
pub struct HostMetrics {
    pub vpn_users: u64,
    pub cpu_percent: f64,
    pub service_status: ServiceStatus,
    pub data_usage: DataUsage,
    pub download_mbps: f64,
}

impl Default for HostMetrics {
    fn default() -> Self {
        Self {
            vpn_users: 0,
            cpu_percent: 0.0,
            service_status: ServiceStatus::Inactive,
            data_usage: DataUsage::default(),
            download_mbps: 0.0,
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders a metric for a URL path segment: shortest round-trip form,
/// always with a fractional digit (`0.0`, `12.5`).
pub fn format_metric(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
