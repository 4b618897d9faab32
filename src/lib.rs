//! # Ziplifica
//!
//! Sorts a dropped or picked set of files into folders by type, date or size,
//! optionally renames them, and packs the result into a ZIP.
//!
//! A second mode looks at a whole project, suggests one of a few fixed
//! directory layouts ("blueprints") and exports the files remapped into it.
//!
//! ## Architecture
//! - `core` - ingestion, classification, placement, blueprints, archive output
//! - `events` - progress reporting over channels
//! - `error` - error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, ZiplificaError};

/// Initialize tracing for the library, filtered by `RUST_LOG`.
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    init_tracing_with("warn");
}

/// Like [`init_tracing`], falling back to `default_directive` when
/// `RUST_LOG` is unset or invalid. Does nothing if a subscriber is already
/// installed.
pub fn init_tracing_with(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
