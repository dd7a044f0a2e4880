// Subset of `vnstat --json` (format version 2) needed for usage roll-ups.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VnstatReport {
    #[serde(default)]
    pub interfaces: Vec<VnstatInterface>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VnstatInterface {
    #[serde(default)]
    pub traffic: VnstatTraffic,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VnstatTraffic {
    #[serde(default)]
    pub day: Vec<TrafficEntry>,
    #[serde(default)]
    pub month: Vec<TrafficEntry>,
}

/// One vnstat bucket; counters are bytes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TrafficEntry {
    #[serde(default)]
    pub rx: u64,
    #[serde(default)]
    pub tx: u64,
}

impl TrafficEntry {
    pub fn total(&self) -> u64 {
        self.rx.saturating_add(self.tx)
    }
}
