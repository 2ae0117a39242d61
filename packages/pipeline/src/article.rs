//! The in-memory record of one page moving through the chain.

/// One article of the source dump.
///
/// Created fresh for each corpus item and discarded once the chain is done
/// with it. The URL is the page's stable identity and never changes; the
/// body is deliberately mutable — the content extractor rewrites it in
/// place, and processors later in the chain observe the rewritten value.
#[derive(Debug, Clone)]
pub struct Article {
    /// Slug relative to the dump root, `/`-separated.
    pub url: String,
    /// HTML body, possibly already trimmed by an earlier processor.
    pub html: String,
}

impl Article {
    /// Create an article record for one corpus item.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}
