//! `xplane-bridge [CONFIG.yaml]`
//!
//! Runs the bridge until Ctrl-C or a fatal socket/shared memory error.
//! Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xplane_bridge::{BridgeConfig, LiveBridge};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => BridgeConfig::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.to_string_lossy()))?,
        None => BridgeConfig::default(),
    };

    info!(
        bind_addr = %config.bind_addr,
        segment = %config.segment_name,
        "Starting X-Plane telemetry bridge"
    );

    let mut bridge = LiveBridge::start(&config).await.context("Failed to start bridge")?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            shutdown.cancel();
        }
    });

    bridge.run(cancel).await.context("Bridge stopped on a fatal error")?;
    Ok(())
}
