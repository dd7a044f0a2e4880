// Usage roll-up from a vnstat report.

use crate::error::ProbeError;
use crate::models::{BYTES_PER_GIB, DataUsage, TrafficEntry, VnstatReport, round2};

const WEEK_DAYS: usize = 7;

pub(super) fn parse_report(json: &str) -> Result<VnstatReport, ProbeError> {
    serde_json::from_str(json).map_err(|e| ProbeError::Parse {
        what: "vnstat json",
        detail: e.to_string(),
    })
}

/// Daily is the newest day bucket, weekly the newest seven, monthly the newest month.
/// Only the first interface in the report is considered.
pub fn summarize_usage(report: &VnstatReport) -> DataUsage {
    let Some(iface) = report.interfaces.first() else {
        return DataUsage::default();
    };
    let days = &iface.traffic.day;
    let months = &iface.traffic.month;

    let daily = days.last().map(TrafficEntry::total).unwrap_or(0);
    let weekly: u64 = days
        .iter()
        .skip(days.len().saturating_sub(WEEK_DAYS))
        .map(TrafficEntry::total)
        .fold(0, u64::saturating_add);
    let monthly = months.last().map(TrafficEntry::total).unwrap_or(0);

    DataUsage {
        daily: to_gib(daily),
        weekly: to_gib(weekly),
        monthly: to_gib(monthly),
    }
}

fn to_gib(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GIB)
}
