//! The corpus pass: every article through the full chain, one at a time.

use tracing::{info, instrument};

use wikipack_shared::{PipelineConfig, Result};

use crate::article::Article;
use crate::logs::DecisionLogs;
use crate::processors::{ArticleState, ProcessorChain};
use crate::score::ScoreBoard;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One non-omitted article with its final aggregate score.
#[derive(Debug, Clone)]
pub struct RankedPage {
    /// Article URL (slug relative to the dump root).
    pub url: String,
    /// Local scores plus every propagated delta addressed to this URL.
    pub score: i64,
    /// The body as the chain left it (trimmed for rendered articles).
    pub html: String,
}

/// Result of a completed corpus pass.
#[derive(Debug)]
pub struct PassSummary {
    /// Every article that survived the chain, in corpus order.
    pub pages: Vec<RankedPage>,
    /// Articles fed into the chain.
    pub articles_seen: usize,
    /// Articles dropped by a filter.
    pub omitted: usize,
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Progress callback so the CLI can render a bar without the pipeline
/// depending on a terminal crate.
pub trait PassObserver {
    /// An article made it through the whole chain.
    fn article_scored(&self, _url: &str) {}
    /// An article was dropped by a filter.
    fn article_omitted(&self, _url: &str) {}
}

/// No-op observer for headless/test usage.
pub struct SilentObserver;

impl PassObserver for SilentObserver {}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Drives the processor chain over a corpus and owns the aggregate state.
///
/// Consumed by [`run`](Pipeline::run): a pass starts with a fresh score
/// table and freshly truncated decision logs, so re-running over an
/// unchanged corpus reproduces identical output.
pub struct Pipeline {
    chain: ProcessorChain,
}

impl Pipeline {
    /// Acquire the decision logs and build the processor chain.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let logs = DecisionLogs::open(config)?;
        let chain = ProcessorChain::new(config, logs)?;
        Ok(Self { chain })
    }

    /// Run the full corpus pass.
    ///
    /// Strictly sequential: each article is taken through the whole chain
    /// before the next one is loaded. A structural-format error aborts the
    /// pass and propagates; the decision logs still flush on that path
    /// (buffered writers flush when the chain is dropped).
    #[instrument(skip_all)]
    pub fn run<I>(mut self, articles: I, observer: &dyn PassObserver) -> Result<PassSummary>
    where
        I: IntoIterator<Item = Result<Article>>,
    {
        let mut board = ScoreBoard::new();
        let mut included: Vec<(String, String)> = Vec::new();
        let mut articles_seen = 0usize;
        let mut omitted = 0usize;

        for article in articles {
            let mut article = article?;
            articles_seen += 1;

            match self.chain.apply(&mut article, &mut board)? {
                ArticleState::Scored => {
                    observer.article_scored(&article.url);
                    included.push((article.url, article.html));
                }
                ArticleState::Omitted => {
                    observer.article_omitted(&article.url);
                    omitted += 1;
                }
            }
        }

        self.chain.finish()?;

        let pages = included
            .into_iter()
            .map(|(url, html)| RankedPage {
                score: board.get(&url),
                url,
                html,
            })
            .collect::<Vec<_>>();

        info!(
            articles = articles_seen,
            kept = pages.len(),
            omitted,
            scored_urls = board.len(),
            "corpus pass complete"
        );

        Ok(PassSummary {
            pages,
            articles_seen,
            omitted,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use super::*;
    use wikipack_shared::WikipackError;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wikipack-pass-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config_in(dir: &Path) -> PipelineConfig {
        PipelineConfig {
            blocked_namespaces: vec!["Talk".into(), "User".into()],
            omitted_log: dir.join("omitted.log").to_string_lossy().into_owned(),
            redirect_log: dir.join("redirects.log").to_string_lossy().into_owned(),
            ..PipelineConfig::default()
        }
    }

    fn article_html(title: &str, links: &[&str]) -> String {
        let links_html: String = links
            .iter()
            .map(|l| format!(r#"<a href="../articles/{l}">{l}</a>"#))
            .collect();
        format!(
            "<html><body><div id=\"wrapper\">\n\
             <h1 class=\"firstHeading\">{title}</h1>\n\
             <div id=\"bodyContent\">\n\
             <!-- start content --><p>About {title}.</p>{links_html}<!-- end content -->\n\
             </div></div></body></html>"
        )
    }

    fn sources(items: Vec<(&str, String)>) -> Vec<Result<Article>> {
        items
            .into_iter()
            .map(|(url, html)| Ok(Article::new(url, html)))
            .collect()
    }

    struct CountingObserver {
        scored: Cell<usize>,
        omitted: Cell<usize>,
    }

    impl PassObserver for CountingObserver {
        fn article_scored(&self, _url: &str) {
            self.scored.set(self.scored.get() + 1);
        }
        fn article_omitted(&self, _url: &str) {
            self.omitted.set(self.omitted.get() + 1);
        }
    }

    #[test]
    fn link_credit_flows_to_targets() {
        let dir = temp_dir();
        let config = config_in(&dir);

        // A links to B and C; D links to B.
        let corpus = sources(vec![
            ("A.html", article_html("A", &["B.html", "C.html"])),
            ("B.html", article_html("B", &[])),
            ("C.html", article_html("C", &[])),
            ("D.html", article_html("D", &["B.html"])),
        ]);

        let summary = Pipeline::new(&config)
            .unwrap()
            .run(corpus, &SilentObserver)
            .unwrap();

        let by_url: HashMap<&str, &RankedPage> = summary
            .pages
            .iter()
            .map(|p| (p.url.as_str(), p))
            .collect();

        let b = by_url["B.html"];
        let c = by_url["C.html"];
        let a = by_url["A.html"];
        let d = by_url["D.html"];

        // Each page's own content length, plus one point per distinct
        // incoming linker.
        assert_eq!(b.score, b.html.len() as i64 + 2);
        assert_eq!(c.score, c.html.len() as i64 + 1);
        assert_eq!(a.score, a.html.len() as i64);
        assert_eq!(d.score, d.html.len() as i64);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn omission_is_terminal_for_the_article() {
        let dir = temp_dir();
        let config = config_in(&dir);

        // Blocked namespace, and the body is both a redirect and malformed:
        // if any later processor ran, we would see a redirect log line or an
        // abort. We must see neither.
        let corpus = sources(vec![(
            "Talk:Sun.html",
            r#"<meta http-equiv="Refresh" content="0;url=Sun.html"> no markers"#.to_string(),
        )]);

        let observer = CountingObserver {
            scored: Cell::new(0),
            omitted: Cell::new(0),
        };
        let summary = Pipeline::new(&config)
            .unwrap()
            .run(corpus, &observer)
            .unwrap();

        assert_eq!(summary.omitted, 1);
        assert!(summary.pages.is_empty());
        assert_eq!(observer.omitted.get(), 1);
        assert_eq!(observer.scored.get(), 0);

        let omitted_log = std::fs::read_to_string(dir.join("omitted.log")).unwrap();
        assert_eq!(omitted_log, "Talk:Sun.html\n");
        let redirect_log = std::fs::read_to_string(dir.join("redirects.log")).unwrap();
        assert_eq!(redirect_log, "");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn redirects_are_filtered_before_content_validation() {
        let dir = temp_dir();
        let config = config_in(&dir);

        // A redirect page has none of the article markers; it must be
        // omitted, not treated as template drift.
        let corpus = sources(vec![(
            "Ann.html",
            r#"<html><meta http-equiv="Refresh" content="0;url=A%C3%B1o.html"></html>"#
                .to_string(),
        )]);

        let summary = Pipeline::new(&config)
            .unwrap()
            .run(corpus, &SilentObserver)
            .unwrap();
        assert_eq!(summary.omitted, 1);

        let redirect_log = std::fs::read_to_string(dir.join("redirects.log")).unwrap();
        assert_eq!(redirect_log, "Ann.html|Año.html\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn structural_failure_aborts_the_pass() {
        let dir = temp_dir();
        let config = config_in(&dir);

        let corpus = sources(vec![
            ("A.html", article_html("A", &[])),
            ("Broken.html", "<html>not the template</html>".to_string()),
            ("Z.html", article_html("Z", &[])),
        ]);

        let err = Pipeline::new(&config)
            .unwrap()
            .run(corpus, &SilentObserver)
            .unwrap_err();
        assert!(matches!(err, WikipackError::UnknownFormat { ref url } if url == "Broken.html"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rerun_reproduces_scores_and_logs() {
        let dir = temp_dir();
        let config = config_in(&dir);

        let corpus = || {
            sources(vec![
                ("A.html", article_html("A", &["B.html"])),
                ("B.html", article_html("B", &[])),
                ("Talk:Junk.html", "<html>whatever</html>".to_string()),
            ])
        };

        let first = Pipeline::new(&config)
            .unwrap()
            .run(corpus(), &SilentObserver)
            .unwrap();
        let first_omitted = std::fs::read_to_string(dir.join("omitted.log")).unwrap();

        let second = Pipeline::new(&config)
            .unwrap()
            .run(corpus(), &SilentObserver)
            .unwrap();
        let second_omitted = std::fs::read_to_string(dir.join("omitted.log")).unwrap();

        let scores = |s: &PassSummary| -> HashMap<String, i64> {
            s.pages.iter().map(|p| (p.url.clone(), p.score)).collect()
        };
        assert_eq!(scores(&first), scores(&second));
        assert_eq!(first_omitted, second_omitted);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
