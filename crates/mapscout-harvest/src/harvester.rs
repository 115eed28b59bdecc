//! Incremental-scroll link harvesting.
//!
//! The harvester repeatedly scrolls the results feed, watches its scroll
//! height to detect progress, and snapshots the feed's HTML after each
//! growth step to collect listing links. Termination: the end-of-results
//! marker after an unchanged-height observation means the feed is fully
//! harvested; a bounded number of consecutive stalls (or the global
//! iteration ceiling) means giving up with whatever was collected.

use crate::error::Result;
use crate::{js, selectors};
use mapscout_browser::BrowserSession;
use mapscout_core::HarvestConfig;
use scraper::Html;
use std::collections::HashSet;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The outcome of harvesting one results feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harvest {
    /// Listing links in first-seen order, deduplicated across snapshots
    pub links: Vec<String>,
    /// False when harvesting terminated before the end-of-results marker
    /// (stall bound, iteration ceiling, cancellation, or a vanished feed)
    pub complete: bool,
}

/// Scrolls the results feed to completion and collects listing links.
pub struct LinkHarvester<'a, S: BrowserSession> {
    session: &'a S,
    config: &'a HarvestConfig,
    cancel: &'a CancellationToken,
}

impl<'a, S: BrowserSession> LinkHarvester<'a, S> {
    /// Create a harvester over an already-navigated search results page.
    #[must_use]
    pub fn new(session: &'a S, config: &'a HarvestConfig, cancel: &'a CancellationToken) -> Self {
        Self {
            session,
            config,
            cancel,
        }
    }

    /// Run the scroll loop until the feed is exhausted or a bound fires.
    pub async fn harvest(&self) -> Result<Harvest> {
        let mut links: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut last_height: i64 = 0;
        let mut stalled: u32 = 0;

        for iteration in 0..self.config.max_iterations {
            if self.cancel.is_cancelled() {
                tracing::debug!(links = links.len(), "harvest cancelled");
                return Ok(Harvest {
                    links,
                    complete: false,
                });
            }

            // The page may replace the feed element, so probe it fresh
            // every iteration.
            let feed_present = self
                .session
                .execute_script(&js::FEED_EXISTS)
                .await?
                .as_bool()
                .unwrap_or(false);
            if !feed_present {
                if iteration == 0 {
                    tracing::debug!("no results feed on search page");
                    return Ok(Harvest {
                        links: Vec::new(),
                        complete: true,
                    });
                }
                tracing::warn!(links = links.len(), "results feed disappeared mid-harvest");
                return Ok(Harvest {
                    links,
                    complete: false,
                });
            }

            self.session
                .execute_script(&js::SCROLL_FEED_TO_BOTTOM)
                .await?;
            tokio::time::sleep(Duration::from_millis(self.config.settle_ms)).await;

            let height = self
                .session
                .execute_script(&js::FEED_SCROLL_HEIGHT)
                .await?
                .as_i64()
                .unwrap_or(-1);

            if height == last_height {
                let end_reached = self
                    .session
                    .execute_script(&js::END_MARKER_PRESENT)
                    .await?
                    .as_bool()
                    .unwrap_or(false);
                if end_reached {
                    tracing::debug!(links = links.len(), "end of results marker reached");
                    return Ok(Harvest {
                        links,
                        complete: true,
                    });
                }

                stalled += 1;
                if stalled >= self.config.max_stalled_retries {
                    tracing::warn!(
                        links = links.len(),
                        stalled,
                        "feed stalled without end marker, giving up"
                    );
                    return Ok(Harvest {
                        links,
                        complete: false,
                    });
                }

                // Nudge lazy loading by clicking the last rendered entry.
                // The script throws when nothing is rendered; the stall is
                // simply retried next iteration.
                if let Err(e) = self.session.execute_script(&js::CLICK_LAST_ENTRY).await {
                    tracing::debug!(error = %e, "lazy-load click failed");
                }
            } else {
                last_height = height;
                stalled = 0;

                let snapshot = self.session.execute_script(&js::FEED_OUTER_HTML).await?;
                if let Some(html) = snapshot.as_str() {
                    for link in parse_entry_links(html) {
                        if seen.insert(link.clone()) {
                            links.push(link);
                        }
                    }
                    tracing::debug!(total = links.len(), "collected entry links");
                }
            }
        }

        tracing::warn!(
            links = links.len(),
            limit = self.config.max_iterations,
            "scroll iteration ceiling reached"
        );
        Ok(Harvest {
            links,
            complete: false,
        })
    }
}

/// Extract listing links from a feed HTML snapshot, in document order.
fn parse_entry_links(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&selectors::RESULT_LINK_SEL)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}
