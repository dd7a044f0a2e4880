// Outbound telemetry: one unauthenticated, bodiless POST per metric.

use crate::config::ApiConfig;
use crate::error::ReportError;
use crate::models::{DataUsage, ServiceStatus, format_metric};
use std::time::Duration;
use tracing::instrument;

/// The five metric endpoints. Values travel as path segments.
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    TotalUsers { ip: &'a str, users: u64 },
    CpuUsage { ip: &'a str, percent: f64 },
    InstanceStatus { ip: &'a str, status: ServiceStatus },
    ServerSpeed { ip: &'a str, mbps: f64 },
    HistoricalBandwidth { ip: &'a str, usage: DataUsage },
}

impl Endpoint<'_> {
    /// Short name used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TotalUsers { .. } => "Users",
            Self::CpuUsage { .. } => "CPU",
            Self::InstanceStatus { .. } => "Status",
            Self::ServerSpeed { .. } => "Speed",
            Self::HistoricalBandwidth { .. } => "History",
        }
    }

    /// Path below the API base URL, without a leading slash.
    pub fn path(&self, api: &ApiConfig) -> String {
        match self {
            Self::TotalUsers { ip, users } => format!("total-users/{ip}/{users}"),
            Self::CpuUsage { ip, percent } => {
                format!("cpu-usage/{ip}/{}", format_metric(*percent))
            }
            Self::InstanceStatus { ip, status } => format!(
                "update-instance-status/{ip}/{}/{}/{}",
                api.vpn_kind,
                api.platform,
                status.as_flag()
            ),
            Self::ServerSpeed { ip, mbps } => {
                format!("server-speed/{ip}/{}", format_metric(*mbps))
            }
            Self::HistoricalBandwidth { ip, usage } => format!(
                "historical-bandwidth/{}/{ip}/{}/{}/{}",
                api.vpn_kind,
                format_metric(usage.daily),
                format_metric(usage.weekly),
                format_metric(usage.monthly)
            ),
        }
    }
}

/// Final URL and HTTP status of a completed POST. Non-2xx statuses are not errors.
#[derive(Debug, Clone)]
pub struct PostOutcome {
    pub url: String,
    pub status: u16,
}

pub struct TelemetryClient {
    http: reqwest::Client,
    api: ApiConfig,
}

impl TelemetryClient {
    pub fn new(api: ApiConfig) -> Result<Self, ReportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(ReportError::Client)?;
        Ok(Self { http, api })
    }

    pub fn url(&self, endpoint: &Endpoint<'_>) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            endpoint.path(&self.api)
        )
    }

    #[instrument(skip(self, endpoint), fields(label = endpoint.label()))]
    pub async fn post(&self, endpoint: &Endpoint<'_>) -> Result<PostOutcome, ReportError> {
        let url = self.url(endpoint);
        let resp = self.http.post(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ReportError::Timeout
            } else {
                ReportError::Http(e)
            }
        })?;
        Ok(PostOutcome {
            url: resp.url().to_string(),
            status: resp.status().as_u16(),
        })
    }
}
