//! Core domain types for wikipack snapshot builds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version for the snapshot manifest format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// BuildId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for snapshot build identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(pub Uuid);

impl BuildId {
    /// Generate a new time-sortable build identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BuildId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BuildId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// SnapshotManifest
// ---------------------------------------------------------------------------

/// The `manifest.json` structure stored at the root of each snapshot directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotManifest {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Unique identifier for this build.
    pub id: BuildId,
    /// Tool version that produced this snapshot.
    pub tool_version: String,
    /// When the snapshot was built.
    pub created_at: DateTime<Utc>,
    /// Capacity of the target medium in bytes.
    pub capacity_bytes: u64,
    /// Number of articles selected.
    pub page_count: usize,
    /// Total size of the selected article bodies in bytes.
    pub total_bytes: u64,
    /// Number of scored articles that did not fit the capacity.
    pub pages_dropped: usize,
    /// Selected articles, in selection (highest score first) order.
    pub entries: Vec<ManifestEntry>,
}

/// One selected article in the snapshot manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Article URL (slug relative to the dump root).
    pub url: String,
    /// Final aggregate score.
    pub score: i64,
    /// Size of the trimmed article body in bytes.
    pub size_bytes: u64,
    /// SHA-256 hash of the trimmed article body.
    pub sha256: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_id_roundtrip() {
        let id = BuildId::new();
        let s = id.to_string();
        let parsed: BuildId = s.parse().expect("parse BuildId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn manifest_serialization() {
        let manifest = SnapshotManifest {
            schema_version: CURRENT_SCHEMA_VERSION,
            id: BuildId::new(),
            tool_version: "0.1.0".into(),
            created_at: Utc::now(),
            capacity_bytes: 1024,
            page_count: 1,
            total_bytes: 512,
            pages_dropped: 0,
            entries: vec![ManifestEntry {
                url: "Sun.html".into(),
                score: 42,
                size_bytes: 512,
                sha256: "ab".repeat(32),
            }],
        };

        let json = serde_json::to_string_pretty(&manifest).expect("serialize");
        let parsed: SnapshotManifest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].url, "Sun.html");
    }
}
