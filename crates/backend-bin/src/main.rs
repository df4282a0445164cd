// ============================
// crates/backend-bin/src/main.rs
// ============================
use anyhow::Context;
use backend_lib::{config::Settings, router, storage::FlatFileStorage, AppState};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Task manager auth server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML config file; defaults to ./config.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if settings.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.validate().context("invalid configuration")?;

    init_tracing(&settings);

    let storage = FlatFileStorage::new(&settings.storage.path).with_context(|| {
        format!("cannot open storage at {}", settings.storage.path.display())
    })?;
    let state = Arc::new(AppState::new(storage, &settings)?);
    let app = router::create_router(state);

    let addr = settings.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
