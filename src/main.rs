//! LikedIn - Slack bot that likes LinkedIn posts on your behalf
//!
//! Process entry point: loads configuration, initializes the encrypted
//! cookie store (failing fast on self-test or missing key), and serves
//! Slack Socket Mode events until terminated.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use likedin_browser::{CdpSessionFactory, LikeRunner, RunnerConfig};
use likedin_core::Orchestrator;
use likedin_slack::SlackAdapter;
use likedin_store::{CookieStore, StoreConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "likedin=info,likedin_core=info,likedin_store=info,likedin_browser=info,likedin_slack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LikedIn bot v{}", env!("CARGO_PKG_VERSION"));

    // Any failure from here to serving is fatal: the process exits nonzero
    // before becoming reachable.
    let store_config = StoreConfig::from_env().context("store configuration")?;
    let store = Arc::new(CookieStore::new(store_config));
    store
        .initialize()
        .await
        .context("cookie store initialization")?;

    let runner = LikeRunner::with_config(Arc::new(CdpSessionFactory::new()), RunnerConfig::from_env());
    let orchestrator = Arc::new(Orchestrator::new(store.clone(), runner));

    let adapter = Arc::new(SlackAdapter::from_env().context("slack configuration")?);
    let result = adapter.run(orchestrator).await;

    store.close().await;
    result.context("slack adapter")
}
