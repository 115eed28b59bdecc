//! Error types for the harvest pipeline.
//!
//! Only two failure classes are fatal: opening the initial search results
//! page and building the HTTP client. Per-field misses, per-entry failures,
//! and discovery failures are contained where they happen and never surface
//! through this type.

use mapscout_browser::BrowserError;
use thiserror::Error;

/// Pipeline-fatal errors.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Opening the initial search results page failed.
    #[error("failed to open search results at {url}: {source}")]
    SearchNavigation {
        /// The search URL that could not be opened
        url: String,
        /// The underlying browser failure
        source: BrowserError,
    },

    /// A browser operation the harvest loop depends on failed.
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// The discovery HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias using [`HarvestError`].
pub type Result<T> = std::result::Result<T, HarvestError>;
