//! Processor contract and the fixed chain the runner drives.
//!
//! Each processor inspects (and may rewrite) one [`Article`] and reports a
//! verdict plus any score it wants to assign to *other* pages. The four
//! concrete processors run in a fixed order — namespace filter, redirect
//! filter, content extractor, link-rank scorer — and omission anywhere in
//! the chain is terminal for that article.

mod content;
mod link_rank;
mod namespace;
mod redirect;

use regex::Regex;
use tracing::debug;

use wikipack_shared::{PipelineConfig, Result, WikipackError};

use crate::article::Article;
use crate::logs::DecisionLogs;
use crate::score::ScoreBoard;

pub use content::ContentExtractor;
pub use link_rank::LinkRankScorer;
pub use namespace::NamespaceFilter;
pub use redirect::RedirectFilter;

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// What a processor decided about the article it was given.
///
/// An explicit two-variant result instead of a sentinel score, so "scored
/// zero" and "excluded from the snapshot" can never be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Keep the article; add this local score and continue the chain.
    Keep(u64),
    /// Drop the article from the corpus; the chain stops here for it.
    Omit,
}

/// Per-article result of one processor.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Local verdict for the article being processed.
    pub verdict: Verdict,
    /// Score deltas addressed to other articles. Applied even when the
    /// current article is omitted by this same processor — omission only
    /// suppresses the local score.
    pub propagations: Vec<(String, i64)>,
}

impl Outcome {
    /// Keep with a local score and no propagations.
    pub fn keep(score: u64) -> Self {
        Self {
            verdict: Verdict::Keep(score),
            propagations: Vec::new(),
        }
    }

    /// Terminal omission.
    pub fn omit() -> Self {
        Self {
            verdict: Verdict::Omit,
            propagations: Vec::new(),
        }
    }
}

/// One link in the processing chain.
///
/// `&mut self` because the filters write their decision logs; `Result`
/// because the content extractor's structural failure aborts the pass.
pub trait Processor {
    /// Human-readable name for tracing.
    fn name(&self) -> &str;

    /// Inspect (and possibly rewrite) the article, report the verdict.
    fn process(&mut self, article: &mut Article) -> Result<Outcome>;

    /// Release per-pass resources (flush logs). Called once at end-of-pass.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Where an article ended up after the chain ran for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleState {
    /// Every processor kept it; its scores are on the board.
    Scored,
    /// Some processor dropped it; no later processor saw it.
    Omitted,
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// The ordered processor chain.
///
/// The order is load-bearing: both filters run before the scorers, so an
/// omitted article never reaches the link-rank scorer and never hands out
/// credit.
pub struct ProcessorChain {
    processors: Vec<Box<dyn Processor>>,
}

impl ProcessorChain {
    /// Build the standard chain from config, moving the decision logs into
    /// the filters that write them.
    pub fn new(config: &PipelineConfig, logs: DecisionLogs) -> Result<Self> {
        Ok(Self {
            processors: vec![
                Box::new(NamespaceFilter::new(
                    &config.blocked_namespaces,
                    logs.omitted,
                )),
                Box::new(RedirectFilter::new(
                    &config.redirect_pattern,
                    &config.column_separator,
                    logs.redirects,
                )?),
                Box::new(ContentExtractor::new(
                    &config.content_pattern,
                    &config.article_suffix,
                )?),
                Box::new(LinkRankScorer::new(&config.link_pattern)?),
            ],
        })
    }

    /// Run one article through the chain, merging scores into `board`.
    pub fn apply(&mut self, article: &mut Article, board: &mut ScoreBoard) -> Result<ArticleState> {
        for processor in &mut self.processors {
            let outcome = processor.process(article)?;

            for (target, delta) in &outcome.propagations {
                board.add(target, *delta);
            }

            match outcome.verdict {
                Verdict::Keep(score) => {
                    if score > 0 {
                        board.add(&article.url, score as i64);
                    }
                }
                Verdict::Omit => {
                    debug!(url = %article.url, processor = processor.name(), "article omitted");
                    return Ok(ArticleState::Omitted);
                }
            }
        }

        Ok(ArticleState::Scored)
    }

    /// Flush every processor's per-pass resources.
    pub fn finish(&mut self) -> Result<()> {
        for processor in &mut self.processors {
            processor.finish()?;
        }
        Ok(())
    }
}

/// Compile a configured pattern, naming it in the error on failure.
pub(crate) fn compile_pattern(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| WikipackError::Pattern {
        name: name.into(),
        message: e.to_string(),
    })
}

/// Percent-decode a captured URL fragment, falling back to the raw text if
/// the escapes are not valid UTF-8.
pub(crate) fn percent_decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_pattern_reports_name() {
        let err = compile_pattern("link_pattern", "([unclosed").unwrap_err();
        assert!(err.to_string().contains("link_pattern"));
    }

    #[test]
    fn percent_decode_handles_escapes() {
        assert_eq!(percent_decode("A%C3%B1o.html"), "Año.html");
        assert_eq!(percent_decode("Plain.html"), "Plain.html");
        // invalid escape falls back to the raw text
        assert_eq!(percent_decode("Bad%ZZ.html"), "Bad%ZZ.html");
    }
}
