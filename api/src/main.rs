use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mcontrol_api::{config::McontrolApiConfig, server};
use mcontrol_db::storage::{Storage, mongodb::MongoDBStorage};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = McontrolApiConfig::parse();

    if config.dump_openapi {
        print!("{}", server::openapi().to_pretty_json()?);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or("mcontrol_api=info,mcontrol_db=info,tower_http=info".into()),
        )
        .pretty()
        .init();

    info!(env = %config.node_env, "Starting mcontrol API");

    if config.uses_fallback_secret() {
        warn!("JWT_SECRET is not set, signing tokens with the public fallback secret");
    }

    let db = MongoDBStorage::new(&config.mongodb_uri)
        .await
        .context("Failed to create MongoDB client")?;

    if let Err(e) = db.ping().await {
        warn!(error = %e, "Database is not reachable yet, requests will fail until it is");
    }

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;

    info!("Listening on http://{:?}", bind_addr);

    let router = server::make(config, Arc::new(db));
    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
