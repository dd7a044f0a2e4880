// Host probes: shell commands, sysfs counters and the OpenVPN status log

mod command;
mod linux;
mod vnstat;

pub use command::CommandOutput;
pub use linux::{count_clients, cpu_percent_from_load, throughput_mbps};
pub use vnstat::summarize_usage;

use crate::config::AppConfig;
use crate::error::ProbeError;
use crate::models::{DataUsage, ServiceStatus};
use std::time::Duration;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tracing::instrument;

pub struct HostRepo {
    config: AppConfig,
    logical_cores: usize,
}

impl HostRepo {
    pub fn new(config: AppConfig) -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()),
        );
        Self {
            config,
            logical_cores: sys.cpus().len().max(1),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Public IPv4 as reported by the lookup command. Empty output is an error.
    #[instrument(skip(self), fields(repo = "host", operation = "get_public_ip"))]
    pub async fn get_public_ip(&self) -> Result<String, ProbeError> {
        let (program, args) = self
            .config
            .ip_lookup
            .command
            .split_first()
            .ok_or_else(|| ProbeError::Parse {
                what: "ip_lookup.command",
                detail: "empty command".into(),
            })?;
        let output = command::run(program, args).await?;
        if output.stdout.is_empty() {
            return Err(ProbeError::EmptyOutput {
                program: program.clone(),
            });
        }
        Ok(output.stdout)
    }

    /// Connected clients in the OpenVPN status log.
    #[instrument(skip(self), fields(repo = "host", operation = "get_vpn_users"))]
    pub async fn get_vpn_users(&self) -> Result<u64, ProbeError> {
        let openvpn = &self.config.openvpn;
        linux::count_clients_in_file(&openvpn.status_file, &openvpn.client_marker).await
    }

    /// 15-minute load average relative to the logical core count, in percent.
    #[instrument(skip(self), fields(repo = "host", operation = "get_cpu_usage"))]
    pub async fn get_cpu_usage(&self) -> Result<f64, ProbeError> {
        let load = System::load_average();
        Ok(linux::cpu_percent_from_load(load.fifteen, self.logical_cores))
    }

    #[instrument(skip(self), fields(repo = "host", operation = "get_service_status"))]
    pub async fn get_service_status(&self) -> Result<ServiceStatus, ProbeError> {
        let service = self.config.openvpn.service_name.as_str();
        let output = command::run("systemctl", &["is-active", service]).await?;
        Ok(ServiceStatus::from_is_active(&output.stdout))
    }

    /// Daily, weekly and monthly traffic of the WAN interface from vnstat.
    /// A report without interfaces yields zero usage.
    #[instrument(skip(self), fields(repo = "host", operation = "get_data_usage"))]
    pub async fn get_data_usage(&self) -> Result<DataUsage, ProbeError> {
        let binary = &self.config.vnstat.binary;
        let output =
            command::run(binary, &["-i", self.config.network.interface.as_str(), "--json"])
                .await?;
        if !output.success {
            return Err(ProbeError::CommandFailed {
                program: binary.clone(),
                status: output.status,
            });
        }
        if output.stdout.is_empty() {
            return Err(ProbeError::EmptyOutput {
                program: binary.clone(),
            });
        }
        let report = vnstat::parse_report(&output.stdout)?;
        Ok(vnstat::summarize_usage(&report))
    }

    /// Download rate in Mbps, sampled over the configured interval.
    #[instrument(skip(self), fields(repo = "host", operation = "get_download_speed"))]
    pub async fn get_download_speed(&self) -> Result<f64, ProbeError> {
        let network = &self.config.network;
        let interval = Duration::from_millis(network.sample_interval_ms);

        let rx_before = linux::read_rx_bytes(&network.sysfs_root, &network.interface).await?;
        tokio::time::sleep(interval).await;
        let rx_after = linux::read_rx_bytes(&network.sysfs_root, &network.interface).await?;

        Ok(linux::throughput_mbps(
            rx_before,
            rx_after,
            interval.as_secs_f64(),
        ))
    }
}
