//! Browser automation for the Mapscout pipeline.
//!
//! Exposes the [`BrowserSession`] capability the harvest crate drives a
//! live browser tab through, plus a chromiumoxide-backed [`BrowserEngine`]
//! implementation.

pub mod engine;
pub mod error;
pub mod session;

pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use session::BrowserSession;
