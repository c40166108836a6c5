// ============================
// crates/backend-bin/src/main.rs
// ============================
//! coffer server binary.
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use coffer_backend_lib::{config, routes, seed, storage::SqliteStore, AppState};

/// Account service over HTTP
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Create a demo account on startup and log its number
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = config::load_settings().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_level))
        .init();

    let store = SqliteStore::open(&settings.database_path)
        .with_context(|| format!("opening database at {}", settings.database_path.display()))?;

    if args.seed {
        seed::seed_demo_account(&store).await?;
    }

    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(store, settings)?);
    let app = routes::create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "JSON API server running");

    axum::serve(listener, app).await?;

    Ok(())
}
