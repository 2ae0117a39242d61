//! Corpus enumeration: walks a dump directory and yields article sources.
//!
//! The walker derives each article's URL as its `/`-separated path relative
//! to the dump root and returns sources in sorted order, so a re-run over an
//! unchanged corpus produces byte-identical logs and manifests. Policy
//! decisions (namespaces, redirects, format) belong to the pipeline, not
//! here.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use wikipack_shared::{Result, WikipackError};

/// One enumerated article file, not yet loaded.
#[derive(Debug, Clone)]
pub struct ArticleSource {
    /// Slug relative to the dump root, `/`-separated.
    pub url: String,
    /// Absolute path of the source file.
    pub path: PathBuf,
}

impl ArticleSource {
    /// Read the article body as UTF-8 text.
    ///
    /// Invalid UTF-8 surfaces as an I/O error; per the error taxonomy it is
    /// not recovered here but propagates to the orchestrator.
    pub fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| WikipackError::io(&self.path, e))
    }
}

/// Enumerate every article file under `root`, sorted by slug.
pub fn walk_corpus(root: &Path) -> Result<Vec<ArticleSource>> {
    if !root.is_dir() {
        return Err(WikipackError::corpus(format!(
            "dump directory not found: {}",
            root.display()
        )));
    }

    let mut sources = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| WikipackError::corpus(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| WikipackError::corpus(e.to_string()))?;
        let url = slug_from_relative(rel);

        debug!(%url, "found article file");
        sources.push(ArticleSource {
            url,
            path: entry.path().to_path_buf(),
        });
    }

    sources.sort_by(|a, b| a.url.cmp(&b.url));

    info!(count = sources.len(), root = %root.display(), "corpus enumerated");
    Ok(sources)
}

/// Join path components with `/` regardless of platform separator.
fn slug_from_relative(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
