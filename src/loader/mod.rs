//! Configuration loader.
//!
//! Fetches the site document once, checks the status and parses it. Any
//! failure is reported and replaced by the built-in default, so callers
//! always receive a usable configuration.

mod error;
mod fetcher;

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

pub use error::{FetchError, LoadError};
pub use fetcher::{DocumentFetcher, FetchResponse, FileFetcher};

use crate::site::{SiteConfig, default_config};

/// User-facing message shown when the default configuration is used.
pub const FALLBACK_MESSAGE: &str = "Gagal memuat konfigurasi. Menggunakan data default.";

/// Receives user-visible failure reports.
pub trait FailureReporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Where a loaded configuration came from.
#[derive(Debug)]
pub enum ConfigOrigin {
    Source,
    Fallback(LoadError),
}

/// Result of one load attempt.
#[derive(Debug)]
pub struct LoadOutcome {
    pub config: Arc<SiteConfig>,
    pub origin: ConfigOrigin,
}

impl LoadOutcome {
    #[allow(dead_code)]
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, ConfigOrigin::Fallback(_))
    }
}

/// Loads the site configuration with fallback to the default.
pub struct ConfigLoader {
    fetcher: Arc<dyn DocumentFetcher>,
    source: String,
    timeout: Option<Duration>,
    reporter: Arc<dyn FailureReporter>,
}

impl ConfigLoader {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        source: impl Into<String>,
        reporter: Arc<dyn FailureReporter>,
    ) -> Self {
        Self {
            fetcher,
            source: source.into(),
            timeout: None,
            reporter,
        }
    }

    /// Bound the fetch. `None` waits indefinitely.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the configuration. Never fails.
    ///
    /// Exactly one fetch attempt is made. On any failure the error is logged,
    /// reported once and the default configuration is returned.
    pub async fn load(&self) -> LoadOutcome {
        info!("📡 Loading configuration from {}", self.source);

        match self.try_load().await {
            Ok(config) => {
                info!(
                    groups = config.groups.len(),
                    "✅ Configuration loaded successfully"
                );
                LoadOutcome {
                    config: Arc::new(config),
                    origin: ConfigOrigin::Source,
                }
            }
            Err(e) => {
                error!("❌ Error loading config: {}", e);
                self.reporter.report(FALLBACK_MESSAGE);
                LoadOutcome {
                    config: default_config(),
                    origin: ConfigOrigin::Fallback(e),
                }
            }
        }
    }

    async fn try_load(&self) -> Result<SiteConfig, LoadError> {
        let fetch = self.fetcher.fetch(&self.source);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| LoadError::Timeout(limit))??,
            None => fetch.await?,
        };

        if !response.is_success() {
            return Err(LoadError::Status(response.status));
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("source", &self.source)
            .field("timeout", &self.timeout)
            .finish()
    }
}
