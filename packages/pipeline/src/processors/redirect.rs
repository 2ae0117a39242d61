//! Redirect filter: drops client-side redirect pages.

use regex::Regex;

use wikipack_shared::Result;

use crate::article::Article;
use crate::logs::LogWriter;

use super::{Outcome, Processor, compile_pattern, percent_decode};

/// Omits pages that are meta-refresh redirects, recording
/// `source<SEP>decoded-target` in the redirect log. Runs before the content
/// extractor, so it sees the raw (untrimmed) body.
pub struct RedirectFilter {
    pattern: Regex,
    separator: String,
    log: LogWriter,
}

impl RedirectFilter {
    pub fn new(pattern: &str, separator: &str, log: LogWriter) -> Result<Self> {
        Ok(Self {
            pattern: compile_pattern("redirect_pattern", pattern)?,
            separator: separator.to_string(),
            log,
        })
    }
}

impl Processor for RedirectFilter {
    fn name(&self) -> &str {
        "redirects"
    }

    fn process(&mut self, article: &mut Article) -> Result<Outcome> {
        let Some(caps) = self.pattern.captures(&article.html) else {
            return Ok(Outcome::keep(0));
        };

        let target = percent_decode(&caps[1]);
        self.log
            .write_line(&format!("{}{}{}", article.url, self.separator, target))?;
        Ok(Outcome::omit())
    }

    fn finish(&mut self) -> Result<()> {
        self.log.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::Verdict;
    use wikipack_shared::DEFAULT_REDIRECT_PATTERN;

    fn temp_log() -> (std::path::PathBuf, LogWriter) {
        let path =
            std::env::temp_dir().join(format!("wikipack-redir-test-{}", uuid::Uuid::now_v7()));
        let log = LogWriter::create(&path).unwrap();
        (path, log)
    }

    fn filter(log: LogWriter) -> RedirectFilter {
        RedirectFilter::new(DEFAULT_REDIRECT_PATTERN, "|", log).unwrap()
    }

    #[test]
    fn redirect_is_omitted_and_logged_decoded() {
        let (path, log) = temp_log();
        let mut filter = filter(log);

        let html = r#"<html><head>
            <meta http-equiv="Refresh" content="0;url=../articles/A%C3%B1o.html">
        </head></html>"#;
        let mut article = Article::new("Anno.html", html);

        let outcome = filter.process(&mut article).unwrap();
        assert_eq!(outcome.verdict, Verdict::Omit);

        filter.finish().unwrap();
        let logged = std::fs::read_to_string(&path).unwrap();
        assert_eq!(logged, "Anno.html|Año.html\n");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn non_redirect_passes_with_zero_score() {
        let (path, log) = temp_log();
        let mut filter = filter(log);

        let mut article = Article::new("Sun.html", "<html><body>The Sun.</body></html>");
        let outcome = filter.process(&mut article).unwrap();
        assert_eq!(outcome.verdict, Verdict::Keep(0));
        assert!(outcome.propagations.is_empty());

        filter.finish().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn separator_is_configurable() {
        let path =
            std::env::temp_dir().join(format!("wikipack-redir-sep-{}", uuid::Uuid::now_v7()));
        let log = LogWriter::create(&path).unwrap();
        let mut filter = RedirectFilter::new(DEFAULT_REDIRECT_PATTERN, "\t", log).unwrap();

        let html = r#"<meta http-equiv="Refresh" content="0;url=Target.html">"#;
        let mut article = Article::new("Source.html", html);
        filter.process(&mut article).unwrap();
        filter.finish().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Source.html\tTarget.html\n"
        );

        let _ = std::fs::remove_file(&path);
    }
}
