//! Snapshot directory assembler.
//!
//! Takes the ranked inclusion set, applies the capacity cut, and writes the
//! final snapshot directory: the selected article bodies, the build
//! manifest, and the full score table for the downstream index builder.

use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use wikipack_pipeline::RankedPage;
use wikipack_shared::{
    BuildId, CURRENT_SCHEMA_VERSION, ManifestEntry, Result, SnapshotManifest, WikipackError,
};

use crate::selection::{rank, select};

/// Configuration for snapshot assembly.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    /// Root directory for snapshot output.
    pub output_root: PathBuf,
    /// Capacity of the target medium in bytes.
    pub capacity_bytes: u64,
    /// Tool version string recorded in the manifest.
    pub tool_version: String,
}

/// Output from a successful snapshot assembly.
#[derive(Debug)]
pub struct SnapshotResult {
    /// Absolute path of the assembled snapshot directory.
    pub snapshot_path: PathBuf,
    /// The manifest that was written.
    pub manifest: SnapshotManifest,
}

/// Assemble a snapshot directory from the pipeline's inclusion set.
///
/// Creates the following layout:
/// ```text
/// <output_root>/<build_id>/
/// ├── manifest.json    selected articles, sizes, hashes
/// ├── scores.tsv       url<TAB>score for every kept article, ranked
/// └── pages/           selected article bodies
/// ```
#[instrument(skip_all, fields(pages = pages.len(), capacity = options.capacity_bytes))]
pub fn assemble(options: &SnapshotOptions, pages: &[RankedPage]) -> Result<SnapshotResult> {
    let build_id = BuildId::new();
    let snapshot_dir = options.output_root.join(build_id.to_string());
    let pages_dir = snapshot_dir.join("pages");

    info!(path = %snapshot_dir.display(), %build_id, "assembling snapshot");
    std::fs::create_dir_all(&pages_dir).map_err(|e| WikipackError::io(&pages_dir, e))?;

    let selection = select(pages, options.capacity_bytes);

    let mut entries = Vec::with_capacity(selection.selected.len());
    for page in &selection.selected {
        write_page(&pages_dir, page)?;
        entries.push(ManifestEntry {
            url: page.url.clone(),
            score: page.score,
            size_bytes: page.html.len() as u64,
            sha256: content_hash(&page.html),
        });
    }

    let manifest = SnapshotManifest {
        schema_version: CURRENT_SCHEMA_VERSION,
        id: build_id,
        tool_version: options.tool_version.clone(),
        created_at: Utc::now(),
        capacity_bytes: options.capacity_bytes,
        page_count: entries.len(),
        total_bytes: selection.total_bytes,
        pages_dropped: selection.dropped,
        entries,
    };
    write_json(&snapshot_dir.join("manifest.json"), &manifest)?;

    write_scores(&snapshot_dir.join("scores.tsv"), pages)?;

    info!(
        selected = manifest.page_count,
        dropped = manifest.pages_dropped,
        total_bytes = manifest.total_bytes,
        "snapshot assembly complete"
    );

    Ok(SnapshotResult {
        snapshot_path: snapshot_dir,
        manifest,
    })
}

/// Verify that a snapshot directory is well-formed.
pub fn validate_snapshot(snapshot_path: &Path) -> Result<()> {
    let manifest_path = snapshot_path.join("manifest.json");
    if !manifest_path.exists() {
        return Err(WikipackError::snapshot("missing manifest.json"));
    }
    if !snapshot_path.join("pages").exists() {
        return Err(WikipackError::snapshot("missing pages/ directory"));
    }

    let content = std::fs::read_to_string(&manifest_path)
        .map_err(|e| WikipackError::io(&manifest_path, e))?;
    let manifest: SnapshotManifest = serde_json::from_str(&content)
        .map_err(|e| WikipackError::snapshot(format!("invalid manifest.json: {e}")))?;

    if manifest.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(WikipackError::snapshot(format!(
            "unsupported schema_version: {} (expected {})",
            manifest.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }

    for entry in &manifest.entries {
        let page_path = snapshot_path.join("pages").join(&entry.url);
        if !page_path.exists() {
            return Err(WikipackError::snapshot(format!(
                "manifest entry {} has no page file",
                entry.url
            )));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write one selected article body under `pages/`.
fn write_page(pages_dir: &Path, page: &RankedPage) -> Result<()> {
    let file_path = pages_dir.join(&page.url);

    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| WikipackError::io(parent, e))?;
    }

    std::fs::write(&file_path, &page.html).map_err(|e| WikipackError::io(&file_path, e))?;
    debug!(path = %file_path.display(), score = page.score, "wrote page");
    Ok(())
}

/// Write the full ranked score table, one `url<TAB>score` line per page.
fn write_scores(path: &Path, pages: &[RankedPage]) -> Result<()> {
    let mut out = String::new();
    for page in rank(pages) {
        out.push_str(&page.url);
        out.push('\t');
        out.push_str(&page.score.to_string());
        out.push('\n');
    }
    std::fs::write(path, out).map_err(|e| WikipackError::io(path, e))
}

/// Write a JSON file (pretty-printed).
fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| WikipackError::snapshot(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json).map_err(|e| WikipackError::io(path, e))?;
    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

/// SHA-256 hash of an article body.
fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
