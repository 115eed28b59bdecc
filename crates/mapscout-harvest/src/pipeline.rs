//! Pipeline orchestration: harvest the feed, then extract entry by entry.
//!
//! One browser session is acquired for the pipeline's lifetime and driven
//! sequentially; entries are processed in harvest order. Per-entry failures
//! are logged and skipped — only the initial search navigation (and engine
//! launch) is pipeline-fatal. The session is released on every exit path,
//! including cancellation.

use crate::discovery::EmailDiscoverer;
use crate::error::{HarvestError, Result};
use crate::harvester::LinkHarvester;
use crate::{extractor, js};
use mapscout_browser::{BrowserEngine, BrowserSession};
use mapscout_core::{AppConfig, LocationRecord, ScrapeOutcome};
use tokio_util::sync::CancellationToken;

/// Base endpoint the search query is appended to.
pub const SEARCH_ENDPOINT: &str = "https://www.google.com/maps/search/";

/// Build the navigable search URL for a query.
///
/// Query terms are whitespace-split and joined with `+`.
#[must_use]
pub fn search_url(query: &str) -> String {
    let terms = query.split_whitespace().collect::<Vec<_>>().join("+");
    format!("{SEARCH_ENDPOINT}{terms}")
}

/// Runs the harvest-and-extract pipeline over one browser session.
pub struct ExtractionPipeline<S: BrowserSession> {
    session: S,
    config: AppConfig,
    cancel: CancellationToken,
    discoverer: EmailDiscoverer,
}

impl ExtractionPipeline<BrowserEngine> {
    /// Launch a browser engine and build a pipeline around it.
    pub async fn launch(config: AppConfig, cancel: CancellationToken) -> Result<Self> {
        let engine = BrowserEngine::launch(&config.browser).await?;
        Self::new(engine, config, cancel)
    }
}

impl<S: BrowserSession> ExtractionPipeline<S> {
    /// Build a pipeline around an existing session.
    pub fn new(session: S, config: AppConfig, cancel: CancellationToken) -> Result<Self> {
        let discoverer = EmailDiscoverer::new(&config.discovery)?;
        Ok(Self {
            session,
            config,
            cancel,
            discoverer,
        })
    }

    /// Run the pipeline for a search query.
    ///
    /// Consumes the pipeline: the browser session is released
    /// unconditionally before returning, on success, fatal error, and
    /// cancellation paths alike.
    pub async fn run(mut self, query: &str) -> Result<ScrapeOutcome> {
        let outcome = self.run_inner(query).await;
        if let Err(e) = self.session.quit().await {
            tracing::warn!(error = %e, "browser session shutdown failed");
        }
        outcome
    }

    async fn run_inner(&self, query: &str) -> Result<ScrapeOutcome> {
        let url = search_url(query);
        tracing::debug!(%url, "opening search results");
        self.session
            .navigate(&url)
            .await
            .map_err(|source| HarvestError::SearchNavigation {
                url: url.clone(),
                source,
            })?;

        let harvest = LinkHarvester::new(&self.session, &self.config.harvest, &self.cancel)
            .harvest()
            .await?;
        if !harvest.complete {
            tracing::warn!(
                links = harvest.links.len(),
                "harvest terminated early; results may be partial"
            );
        }
        if harvest.links.is_empty() {
            // "No results" is a normal outcome, not a failure.
            return Ok(ScrapeOutcome::new(Vec::new(), harvest.complete));
        }

        let mut locations = Vec::new();
        for link in &harvest.links {
            if self.cancel.is_cancelled() {
                tracing::debug!(processed = locations.len(), "extraction cancelled");
                break;
            }
            match self.extract_entry(link).await {
                Ok(Some(record)) => locations.push(record),
                Ok(None) => {}
                Err(e) => tracing::warn!(link, error = %e, "skipping entry"),
            }
        }

        Ok(ScrapeOutcome::new(locations, harvest.complete))
    }

    /// Extract one listing. `Ok(None)` means the entry page lacked its
    /// detail panel and was skipped.
    async fn extract_entry(&self, link: &str) -> Result<Option<LocationRecord>> {
        self.session.navigate(link).await?;

        let snapshot = self
            .session
            .execute_script(&js::MAIN_PANEL_OUTER_HTML)
            .await?;
        let Some(html) = snapshot.as_str() else {
            tracing::warn!(link, "entry page has no detail panel, skipping");
            return Ok(None);
        };

        let maps_url = self.session.current_url().await.ok();
        let mut record = extractor::extract(html, maps_url);
        if record.website.is_some() {
            record.email = self.discoverer.discover(record.website.as_deref()).await;
        }
        Ok(Some(record))
    }
}
