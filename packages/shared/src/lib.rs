//! Shared types, error model, and configuration for wikipack.
//!
//! This crate is the foundation depended on by all other wikipack crates.
//! It provides:
//! - [`WikipackError`] — the unified error type
//! - Domain types ([`SnapshotManifest`], [`ManifestEntry`], [`BuildId`])
//! - Configuration ([`AppConfig`], [`PipelineConfig`], [`SnapshotConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_CONTENT_PATTERN, DEFAULT_LINK_PATTERN, DEFAULT_REDIRECT_PATTERN,
    PipelineConfig, SnapshotConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{Result, WikipackError};
pub use types::{BuildId, CURRENT_SCHEMA_VERSION, ManifestEntry, SnapshotManifest};
