// Domain models

mod metrics;
mod vnstat;

pub use metrics::{
    BYTES_PER_GIB, DataUsage, HostMetrics, ServiceStatus, format_metric, round2,
};
pub use vnstat::{TrafficEntry, VnstatInterface, VnstatReport, VnstatTraffic};
