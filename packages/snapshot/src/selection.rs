//! Capacity-constrained selection over the pipeline's inclusion set.

use tracing::{debug, info};

use wikipack_pipeline::RankedPage;

/// Result of cutting the ranked inclusion set at the medium's capacity.
#[derive(Debug)]
pub struct Selection<'a> {
    /// Pages that fit, highest score first.
    pub selected: Vec<&'a RankedPage>,
    /// Pages that did not fit the capacity.
    pub dropped: usize,
    /// Combined body size of the selected pages.
    pub total_bytes: u64,
}

/// Order pages by score (descending), breaking ties by URL so the
/// selection is fully deterministic.
pub fn rank(pages: &[RankedPage]) -> Vec<&RankedPage> {
    let mut ranked: Vec<&RankedPage> = pages.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.url.cmp(&b.url)));
    ranked
}

/// Walk the ranked list accumulating body sizes until the capacity is
/// exhausted. A page that does not fit is skipped, not truncated; later,
/// smaller pages may still fit.
pub fn select(pages: &[RankedPage], capacity_bytes: u64) -> Selection<'_> {
    let mut selected = Vec::new();
    let mut dropped = 0usize;
    let mut total_bytes = 0u64;

    for page in rank(pages) {
        let size = page.html.len() as u64;
        if total_bytes + size <= capacity_bytes {
            total_bytes += size;
            selected.push(page);
        } else {
            debug!(url = %page.url, size, "page does not fit, dropping");
            dropped += 1;
        }
    }

    info!(
        selected = selected.len(),
        dropped, total_bytes, capacity_bytes, "selection complete"
    );

    Selection {
        selected,
        dropped,
        total_bytes,
    }
}
