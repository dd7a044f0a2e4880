use ovpn_monitor::config::AppConfig;
use ovpn_monitor::worker;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

// Single pass, always exits 0: every failure is logged and replaced by a fallback.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    tracing::debug!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "starting"
    );

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration; using built-in defaults");
        AppConfig::default()
    });

    let summary = worker::run_once(config).await;
    tracing::debug!(
        delivered = summary.report.delivered,
        failed = summary.report.failed,
        "run complete"
    );
}
