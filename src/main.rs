//! Assetum - Fleet and Asset Management Console Core
//!
//! Opens the configured store, loads (or seeds) the fleet state and prints
//! the dashboard summary.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use assetum::{
    config::{AppConfig, LoggingConfig},
    services::{lifecycle, Services},
};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let _guard = init_tracing(&config.logging);

    tracing::info!("Starting Assetum v{}", env!("CARGO_PKG_VERSION"));
    if let Some(url) = &config.api.base_url {
        tracing::debug!(%url, "Remote API configured, local store stays authoritative");
    }

    let mut services = Services::open(&config)?;
    tracing::info!(
        backend = ?config.storage.backend,
        directory = %config.storage.directory,
        "Fleet state loaded"
    );

    let today = lifecycle::today();
    let summary = services.stats.fleet_summary(&services.state, today);
    tracing::info!(
        assets = summary.total_assets,
        utilization = summary.utilization_percent,
        overdue = summary.rentals.overdue_count,
        open_incidents = summary.open_incidents,
        "Fleet summary"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let pending = services.state.pending_collections();
    if !pending.is_empty() {
        let written = services.state.flush();
        tracing::info!(written, pending = pending.len(), "Pending collections flushed");
    }

    Ok(())
}

/// Install the global subscriber. The returned guard must outlive the
/// program for the file writer to drain.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("assetum={}", logging.level).into());

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    match logging.format.as_str() {
        "json" => layers.push(fmt::layer().json().boxed()),
        _ => layers.push(fmt::layer().boxed()),
    }

    let guard = logging.directory.as_ref().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, "assetum.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt::layer().with_ansi(false).with_writer(writer).boxed());
        guard
    });

    tracing_subscriber::registry().with(layers).with(filter).init();
    guard
}
