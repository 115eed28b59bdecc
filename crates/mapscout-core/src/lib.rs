//! Mapscout Core - Foundation crate for the Mapscout harvesting pipeline.
//!
//! This crate provides the shared data model, configuration management, and
//! configuration error types that the browser and harvest crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - The record model (`LocationRecord`, `ScrapeOutcome`)
//!
//! # Example
//!
//! ```rust
//! use mapscout_core::{AppConfig, LocationRecord};
//!
//! let config = AppConfig::default();
//! assert!(config.browser.headless);
//!
//! let record = LocationRecord::default();
//! assert!(record.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, DiscoveryConfig, HarvestConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::{LocationRecord, ScrapeOutcome};
