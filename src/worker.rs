// One monitoring pass: resolve the public IP, collect every metric, then post each one.
// Every failure ends in a fallback value and a log line; nothing propagates out.

use crate::config::AppConfig;
use crate::host_repo::HostRepo;
use crate::models::{DataUsage, HostMetrics, ServiceStatus, format_metric};
use crate::telemetry_client::{Endpoint, TelemetryClient};

/// Outcome counts of the reporting phase. A POST that got any HTTP status counts as delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ip: String,
    pub metrics: HostMetrics,
    pub report: ReportSummary,
}

pub async fn resolve_ip(repo: &HostRepo) -> String {
    match repo.get_public_ip().await {
        Ok(ip) => ip,
        Err(e) => {
            let fallback = repo.config().ip_lookup.fallback.clone();
            tracing::error!(
                error = %e,
                operation = "get_public_ip",
                fallback = %fallback,
                "Could not fetch IP"
            );
            fallback
        }
    }
}

/// Collects the five metrics in order, logging each value as it lands.
pub async fn collect(repo: &HostRepo) -> HostMetrics {
    let vpn_users = repo.get_vpn_users().await.unwrap_or_else(|e| {
        tracing::error!(error = %e, operation = "get_vpn_users", "Failed to read OpenVPN users");
        0
    });
    tracing::info!("Total OpenVPN Active Clients: {}", vpn_users);

    let cpu_percent = repo.get_cpu_usage().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, operation = "get_cpu_usage", "CPU usage failed");
        0.0
    });
    tracing::info!(
        "CPU Utilization (15m avg): {}%",
        format_metric(cpu_percent)
    );

    let service_status = repo.get_service_status().await.unwrap_or_else(|e| {
        tracing::warn!(
            error = %e,
            operation = "get_service_status",
            "Service status check failed"
        );
        ServiceStatus::Inactive
    });
    tracing::info!(
        "Service '{}' status = {}",
        repo.config().openvpn.service_name,
        service_status
    );

    let data_usage = repo.get_data_usage().await.unwrap_or_else(|e| {
        tracing::debug!(error = %e, operation = "get_data_usage", "vnstat usage unavailable");
        DataUsage::default()
    });
    tracing::info!(
        "Historical Data -> Daily: {} GB | Weekly: {} GB | Monthly: {} GB",
        format_metric(data_usage.daily),
        format_metric(data_usage.weekly),
        format_metric(data_usage.monthly)
    );

    let download_mbps = repo.get_download_speed().await.unwrap_or_else(|e| {
        tracing::warn!(
            error = %e,
            operation = "get_download_speed",
            "Download speed failed"
        );
        0.0
    });
    tracing::info!(
        "Current Speed: {} Mbps (Download)",
        format_metric(download_mbps)
    );

    HostMetrics {
        vpn_users,
        cpu_percent,
        service_status,
        data_usage,
        download_mbps,
    }
}

const ENDPOINT_COUNT: usize = 5;

/// Endpoints for one pass, in posting order.
pub fn endpoints<'a>(ip: &'a str, metrics: &HostMetrics) -> [Endpoint<'a>; ENDPOINT_COUNT] {
    [
        Endpoint::TotalUsers {
            ip,
            users: metrics.vpn_users,
        },
        Endpoint::CpuUsage {
            ip,
            percent: metrics.cpu_percent,
        },
        Endpoint::InstanceStatus {
            ip,
            status: metrics.service_status,
        },
        Endpoint::ServerSpeed {
            ip,
            mbps: metrics.download_mbps,
        },
        Endpoint::HistoricalBandwidth {
            ip,
            usage: metrics.data_usage,
        },
    ]
}

/// Posts each metric separately, in a fixed order. Failures are logged and skipped.
pub async fn report(client: &TelemetryClient, ip: &str, metrics: &HostMetrics) -> ReportSummary {
    let mut summary = ReportSummary::default();
    for endpoint in &endpoints(ip, metrics) {
        match client.post(endpoint).await {
            Ok(outcome) => {
                tracing::info!(
                    "{:<7} → {} | Status: {}",
                    endpoint.label(),
                    outcome.url,
                    outcome.status
                );
                summary.delivered += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "{} API failed", endpoint.label());
                summary.failed += 1;
            }
        }
    }
    summary
}

/// Runs a full pass. Never fails; when the HTTP client cannot be built, metrics are
/// still collected and logged but nothing is posted.
pub async fn run_once(config: AppConfig) -> RunSummary {
    let client = TelemetryClient::new(config.api.clone());
    let repo = HostRepo::new(config);

    let ip = resolve_ip(&repo).await;
    tracing::info!("Getting stats for IP: {}", ip);

    let metrics = collect(&repo).await;
    tracing::info!("{}", "-".repeat(60));

    let summary = match client {
        Ok(client) => report(&client, &ip, &metrics).await,
        Err(e) => {
            tracing::error!(error = %e, operation = "build_client", "Skipping telemetry posts");
            ReportSummary {
                delivered: 0,
                failed: ENDPOINT_COUNT,
            }
        }
    };

    RunSummary {
        ip,
        metrics,
        report: summary,
    }
}
