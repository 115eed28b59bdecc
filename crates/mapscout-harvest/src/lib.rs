//! Mapscout Harvest - the harvest-and-extract pipeline.
//!
//! This crate drives a [`mapscout_browser::BrowserSession`] through a map
//! search results feed, collects every listing link the infinite-scroll feed
//! exposes, and visits each listing to extract a structured
//! [`mapscout_core::LocationRecord`] — including a best-effort email address
//! discovered by crawling the business's own website.
//!
//! # Components
//!
//! - [`harvester`] - incremental-scroll link collection with termination
//!   detection and bounded stall recovery
//! - [`extractor`] - tolerant per-field parsing of a listing page snapshot
//! - [`discovery`] - best-effort email discovery on business websites
//! - [`pipeline`] - orchestration: harvest, then extract entry by entry
//! - [`selectors`] - the single selector policy table all DOM rules use
//!
//! # Example
//!
//! ```rust,ignore
//! use mapscout_core::AppConfig;
//! use mapscout_harvest::ExtractionPipeline;
//! use tokio_util::sync::CancellationToken;
//!
//! let pipeline = ExtractionPipeline::launch(AppConfig::load()?, CancellationToken::new()).await?;
//! let outcome = pipeline.run("coffee roasters amsterdam").await?;
//! println!("{} listings", outcome.total_results);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod discovery;
pub mod error;
pub mod extractor;
pub mod harvester;
#[allow(missing_docs)]
pub mod js;
pub mod pipeline;
#[allow(missing_docs)]
pub mod selectors;

// Re-export commonly used types
pub use discovery::EmailDiscoverer;
pub use error::{HarvestError, Result};
pub use extractor::extract;
pub use harvester::{Harvest, LinkHarvester};
pub use pipeline::{search_url, ExtractionPipeline};
