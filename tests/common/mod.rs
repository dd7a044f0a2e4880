// Shared test helpers

#![allow(dead_code)]

use axum::Router;
use axum::http::{Method, StatusCode, Uri};
use ovpn_monitor::config::AppConfig;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Config pointing every probe at `dir` and every post at `base_url`.
pub fn test_config(dir: &Path, base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_secs = 2;
    config.openvpn.status_file = dir.join("openvpn-status.log").display().to_string();
    config.openvpn.service_name = "ovpn-monitor-test-missing.service".into();
    config.network.interface = "testeth0".into();
    config.network.sample_interval_ms = 10;
    config.network.sysfs_root = dir.join("net").display().to_string();
    config.ip_lookup.command = vec!["echo".into(), "203.0.113.7".into()];
    config.vnstat.binary = "ovpn-monitor-test-missing-vnstat".into();
    config
}

/// Writes `<dir>/net/<iface>/statistics/rx_bytes`.
pub fn write_rx_bytes(dir: &Path, iface: &str, value: u64) {
    let stats = dir.join("net").join(iface).join("statistics");
    std::fs::create_dir_all(&stats).unwrap();
    std::fs::write(stats.join("rx_bytes"), format!("{value}\n")).unwrap();
}

pub const STATUS_LOG: &str = "\
TITLE,OpenVPN 2.6.9 x86_64-pc-linux-gnu
TIME,2026-10-18 09:12:01,1792314721
HEADER,CLIENT_LIST,Common Name,Real Address,Virtual Address,Virtual IPv6 Address,Bytes Received,Bytes Sent,Connected Since,Connected Since (time_t),Username,Client ID,Peer ID,Data Channel Cipher
CLIENT_LIST,client,198.51.100.4:51820,10.8.0.2,,10523,88213,2026-10-18 08:55:10,1792313710,UNDEF,0,0,AES-256-GCM
CLIENT_LIST,client,198.51.100.9:40112,10.8.0.3,,2211,9120,2026-10-18 09:01:44,1792314104,UNDEF,1,1,AES-256-GCM
CLIENT_LIST,alice,192.0.2.33:60001,10.8.0.4,,991,4410,2026-10-18 09:05:02,1792314302,UNDEF,2,2,AES-256-GCM
HEADER,ROUTING_TABLE,Virtual Address,Common Name,Real Address,Last Ref,Last Ref (time_t)
ROUTING_TABLE,10.8.0.2,client,198.51.100.4:51820,2026-10-18 09:11:58,1792314718
GLOBAL_STATS,Max bcast/mcast queue length,1
END
";

/// Paths received by a [`spawn_recorder`] server, as `"METHOD /path"`.
pub type Hits = Arc<Mutex<Vec<String>>>;

/// In-process HTTP server answering every request with `status`.
/// Returns the `/api` base URL and the recorded hits.
pub async fn spawn_recorder(status: StatusCode) -> (String, Hits) {
    let hits: Hits = Arc::new(Mutex::new(Vec::new()));
    let recorded = hits.clone();
    let app = Router::new().fallback(move |method: Method, uri: Uri| {
        let recorded = recorded.clone();
        async move {
            recorded
                .lock()
                .unwrap()
                .push(format!("{} {}", method, uri.path()));
            status
        }
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), hits)
}

/// Like [`spawn_recorder`], but requests whose path contains `slow_fragment`
/// are held for `delay` before answering 200.
pub async fn spawn_slow_recorder(slow_fragment: &'static str, delay: Duration) -> (String, Hits) {
    let hits: Hits = Arc::new(Mutex::new(Vec::new()));
    let recorded = hits.clone();
    let app = Router::new().fallback(move |method: Method, uri: Uri| {
        let recorded = recorded.clone();
        async move {
            recorded
                .lock()
                .unwrap()
                .push(format!("{} {}", method, uri.path()));
            if uri.path().contains(slow_fragment) {
                tokio::time::sleep(delay).await;
            }
            StatusCode::OK
        }
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), hits)
}

/// Base URL on a local port with nothing listening.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}
