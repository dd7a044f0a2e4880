// Linux counters: sysfs interface statistics, OpenVPN status log, load average math.

use crate::error::ProbeError;
use crate::models::round2;
use std::path::Path;

/// Cumulative received bytes from `<sysfs_root>/<interface>/statistics/rx_bytes`.
pub(super) async fn read_rx_bytes(sysfs_root: &str, interface: &str) -> Result<u64, ProbeError> {
    let path = Path::new(sysfs_root)
        .join(interface)
        .join("statistics")
        .join("rx_bytes");
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ProbeError::Read {
            path: path.display().to_string(),
            source,
        })?;
    content
        .trim()
        .parse::<u64>()
        .map_err(|e| ProbeError::Parse {
            what: "rx_bytes",
            detail: e.to_string(),
        })
}

/// Reads the status log and counts connected-client rows.
/// Invalid UTF-8 (e.g. latin-1 common names) is replaced, not rejected.
pub(super) async fn count_clients_in_file(path: &str, marker: &str) -> Result<u64, ProbeError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ProbeError::Read {
            path: path.to_string(),
            source,
        })?;
    Ok(count_clients(&String::from_utf8_lossy(&bytes), marker))
}

/// Number of lines containing `marker`.
pub fn count_clients(status_log: &str, marker: &str) -> u64 {
    if marker.is_empty() {
        return 0;
    }
    status_log.lines().filter(|l| l.contains(marker)).count() as u64
}

/// Download rate in Mbps over `interval_secs`. A counter that went backwards yields 0.
pub fn throughput_mbps(rx_before: u64, rx_after: u64, interval_secs: f64) -> f64 {
    if interval_secs <= 0.0 {
        return 0.0;
    }
    let delta = rx_after.saturating_sub(rx_before);
    round2((delta as f64 * 8.0) / 1_000_000.0 / interval_secs)
}

/// 15-minute load average as a percentage of logical cores.
pub fn cpu_percent_from_load(load15: f64, logical_cores: usize) -> f64 {
    if !load15.is_finite() || load15 < 0.0 {
        return 0.0;
    }
    round2(load15 / logical_cores.max(1) as f64 * 100.0)
}
