//! Landing page orchestration.
//!
//! Loads the configuration, then populates site info and contact sections
//! exactly once per load.

use std::sync::Arc;

use tracing::info;

use crate::interaction::ActivationHandler;
use crate::loader::{ConfigLoader, LoadOutcome};
use crate::render::{RenderSummary, SectionRenderer, UiSink, populate_site_info};
use crate::site::SiteConfig;

/// State after startup.
#[derive(Debug)]
pub struct Started {
    pub outcome: LoadOutcome,
    pub summary: RenderSummary,
}

/// Wires the loader to the population steps.
pub struct LandingPage {
    sink: Arc<dyn UiSink>,
    loader: ConfigLoader,
    renderer: SectionRenderer,
}

impl LandingPage {
    pub fn new(
        sink: Arc<dyn UiSink>,
        loader: ConfigLoader,
        handler: Arc<ActivationHandler>,
    ) -> Self {
        let renderer = SectionRenderer::new(Arc::clone(&sink), handler);
        Self {
            sink,
            loader,
            renderer,
        }
    }

    /// Load the configuration (or the default) and render it.
    pub async fn start(&self) -> Started {
        let outcome = self.loader.load().await;
        let summary = self.populate(&outcome.config);
        Started { outcome, summary }
    }

    /// Populate the page from `config`, replacing any previous content.
    pub fn populate(&self, config: &SiteConfig) -> RenderSummary {
        populate_site_info(self.sink.as_ref(), &config.site);
        let summary = self.renderer.render(config);
        info!(
            sections = summary.sections.len(),
            cards = summary.card_count(),
            "Page populated"
        );
        summary
    }
}

impl std::fmt::Debug for LandingPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandingPage")
            .field("loader", &self.loader)
            .finish()
    }
}
