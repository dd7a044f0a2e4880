use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub openvpn: OpenVpnConfig,
    pub network: NetworkConfig,
    pub ip_lookup: IpLookupConfig,
    pub vnstat: VnstatConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Deadline for each telemetry POST.
    pub timeout_secs: u64,
    pub platform: String,
    /// VPN flavour embedded in the status and history paths.
    pub vpn_kind: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://papi.fusionsai.net/api".into(),
            timeout_secs: 10,
            platform: "android".into(),
            vpn_kind: "openvpn".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenVpnConfig {
    pub status_file: String,
    /// Substring marking a connected-client row in the status log.
    pub client_marker: String,
    pub service_name: String,
}

impl Default for OpenVpnConfig {
    fn default() -> Self {
        Self {
            status_file: "/var/log/openvpn/openvpn-status.log".into(),
            client_marker: "CLIENT_LIST,client,".into(),
            service_name: "openvpn-server@server.service".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// WAN interface used for throughput and vnstat history.
    pub interface: String,
    pub sample_interval_ms: u64,
    pub sysfs_root: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            interface: "eth0".into(),
            sample_interval_ms: 1000,
            sysfs_root: "/sys/class/net".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IpLookupConfig {
    /// Program followed by its arguments.
    pub command: Vec<String>,
    pub fallback: String,
}

impl Default for IpLookupConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "curl".into(),
                "-s".into(),
                "-4".into(),
                "icanhazip.com".into(),
            ],
            fallback: "0.0.0.0".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VnstatConfig {
    pub binary: String,
}

impl Default for VnstatConfig {
    fn default() -> Self {
        Self {
            binary: "vnstat".into(),
        }
    }
}

impl AppConfig {
    /// Built-in defaults, overridden by the TOML file named in `CONFIG_FILE` when set.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?;
                Self::load_from_str(&s)
            }
            Err(_) => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"),
            "api.base_url must be an http(s) URL, got {:?}",
            self.api.base_url
        );
        anyhow::ensure!(
            self.api.timeout_secs > 0,
            "api.timeout_secs must be > 0, got {}",
            self.api.timeout_secs
        );
        anyhow::ensure!(
            self.network.sample_interval_ms > 0,
            "network.sample_interval_ms must be > 0, got {}",
            self.network.sample_interval_ms
        );
        anyhow::ensure!(
            !self.network.interface.is_empty(),
            "network.interface must be non-empty"
        );
        anyhow::ensure!(
            !self.openvpn.service_name.is_empty(),
            "openvpn.service_name must be non-empty"
        );
        anyhow::ensure!(
            !self.openvpn.status_file.is_empty(),
            "openvpn.status_file must be non-empty"
        );
        anyhow::ensure!(
            !self.network.sysfs_root.is_empty(),
            "network.sysfs_root must be non-empty"
        );
        anyhow::ensure!(
            !self.ip_lookup.command.is_empty(),
            "ip_lookup.command must be non-empty"
        );
        anyhow::ensure!(
            !self.ip_lookup.fallback.is_empty(),
            "ip_lookup.fallback must be non-empty"
        );
        anyhow::ensure!(
            !self.vnstat.binary.is_empty(),
            "vnstat.binary must be non-empty"
        );
        Ok(())
    }
}
