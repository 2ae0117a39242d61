//! Content extractor: trims rendered articles to their substantive body.

use regex::Regex;

use wikipack_shared::{Result, WikipackError};

use crate::article::Article;

use super::{Outcome, Processor, compile_pattern};

/// Rewrites each rendered article down to its heading plus the
/// marker-delimited main content region, scoring the page by the byte
/// length of what remains — longer substantive content ranks higher.
///
/// A page that carries the article suffix but does not match the structural
/// pattern means the dump was rendered from a different template than the
/// one the patterns encode; that invalidates every bulk-processing
/// assumption, so the whole pass aborts instead of skipping the page.
pub struct ContentExtractor {
    pattern: Regex,
    suffix: String,
}

impl ContentExtractor {
    pub fn new(pattern: &str, suffix: &str) -> Result<Self> {
        Ok(Self {
            pattern: compile_pattern("content_pattern", pattern)?,
            suffix: suffix.to_string(),
        })
    }
}

impl Processor for ContentExtractor {
    fn name(&self) -> &str {
        "content"
    }

    fn process(&mut self, article: &mut Article) -> Result<Outcome> {
        // Only rendered documents; assets and other files pass untouched.
        if !article.url.ends_with(&self.suffix) {
            return Ok(Outcome::keep(0));
        }

        let caps = self
            .pattern
            .captures(&article.html)
            .ok_or_else(|| WikipackError::UnknownFormat {
                url: article.url.clone(),
            })?;

        let trimmed = format!("{}\n{}", &caps[1], &caps[2]);
        article.html = trimmed;
        Ok(Outcome::keep(article.html.len() as u64))
    }
}
