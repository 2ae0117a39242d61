//! Corpus-wide aggregate score table.

use std::collections::HashMap;

/// Accumulated scores for every URL seen during a pass.
///
/// Owned by the pipeline runner and mutated only by it — single writer, no
/// locking. The table grows monotonically over the pass: local scores and
/// propagated deltas are summed per URL and never removed. Targets of
/// propagations need not correspond to processed articles; resolution
/// against the inclusion set happens when the runner emits its summary.
#[derive(Debug, Default)]
pub struct ScoreBoard {
    scores: HashMap<String, i64>,
}

impl ScoreBoard {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the accumulated score for `url`.
    pub fn add(&mut self, url: &str, delta: i64) {
        *self.scores.entry(url.to_string()).or_insert(0) += delta;
    }

    /// Accumulated total for `url`; zero if it never received a score.
    pub fn get(&self, url: &str) -> i64 {
        self.scores.get(url).copied().unwrap_or(0)
    }

    /// Number of URLs with at least one recorded contribution.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
