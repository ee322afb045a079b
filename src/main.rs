//! Contact Hub - configuration-driven contact landing page
//!
//! Renders a list of contact channels from a JSON document into a static
//! page, falling back to a built-in default when the document can't be
//! loaded.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `site` - Configuration document model and default
//! - `loader` - Document fetching with fallback
//! - `presentation` - Contact kind to class/icon mapping
//! - `render` - UI sink, in-memory document and population steps
//! - `interaction` - Card activation, notifications and error banner
//! - `page` - Startup orchestration
//! - `utils` - Utility functions

mod config;
mod interaction;
mod loader;
mod page;
mod presentation;
mod render;
mod site;
mod utils;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use interaction::{ActivationHandler, ErrorBanner, LogNavigator, Timings};
use loader::{ConfigLoader, ConfigOrigin, FileFetcher};
use page::LandingPage;
use render::{Document, UiEvent, UiSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("contact_hub=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚀 Contact Hub initialized");

    let config = Config::from_env();
    info!("Configuration source: {}", config.source);

    let document = Arc::new(Document::landing_page());
    let sink: Arc<dyn UiSink> = document.clone();
    let timings = Timings::default();

    let handler = Arc::new(ActivationHandler::new(
        &sink,
        Arc::new(LogNavigator),
        timings,
    ));
    let banner = Arc::new(ErrorBanner::new(&sink, timings));
    let loader = ConfigLoader::new(Arc::new(FileFetcher), config.source.clone(), banner)
        .with_timeout(config.fetch_timeout);

    let page = LandingPage::new(Arc::clone(&sink), loader, Arc::clone(&handler));
    let started = page.start().await;
    if let ConfigOrigin::Fallback(reason) = &started.outcome.origin {
        warn!("Rendering default configuration: {}", reason);
    }

    tokio::fs::write(&config.output_path, document.to_html())
        .await
        .with_context(|| format!("failed to write {}", config.output_path.display()))?;
    info!("Page written to {}", config.output_path.display());

    if let Some(target) = &config.activate {
        match started.summary.find_card(&target.group_id, &target.item_id) {
            Some(card) => {
                document.dispatch(card.node, UiEvent::Click);
            }
            None => warn!(
                "No rendered card {}/{} to activate",
                target.group_id, target.item_id
            ),
        }
    }

    tokio::select! {
        _ = handler.drain() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, pending activations dropped");
        }
    }

    info!("✅ All done");
    Ok(())
}
