//! Link-rank scorer: credits every article this one links to.

use std::collections::HashSet;

use regex::Regex;

use wikipack_shared::Result;

use crate::article::Article;

use super::{Outcome, Processor, Verdict, compile_pattern, percent_decode};

/// Counts how often a page is referred to by the other pages.
///
/// Never scores the article it is looking at; instead it emits one +1
/// propagation per distinct linked article, ignoring self-references and
/// duplicate links. Across the whole corpus an article's aggregate credit
/// from this processor equals the number of distinct other articles
/// linking to it — a one-hop popularity proxy.
pub struct LinkRankScorer {
    pattern: Regex,
}

impl LinkRankScorer {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: compile_pattern("link_pattern", pattern)?,
        })
    }
}

impl Processor for LinkRankScorer {
    fn name(&self) -> &str {
        "link-rank"
    }

    fn process(&mut self, article: &mut Article) -> Result<Outcome> {
        let mut targets: HashSet<String> = self
            .pattern
            .captures_iter(&article.html)
            .map(|caps| percent_decode(&caps[1]))
            .collect();

        // no credit for linking to yourself
        targets.remove(&article.url);

        Ok(Outcome {
            verdict: Verdict::Keep(0),
            propagations: targets.into_iter().map(|t| (t, 1)).collect(),
        })
    }
}
