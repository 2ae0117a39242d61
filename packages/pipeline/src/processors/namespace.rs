//! Namespace filter: drops service pages before anything scores them.

use std::collections::HashSet;

use wikipack_shared::Result;

use crate::article::Article;
use crate::logs::LogWriter;

use super::{Outcome, Processor, percent_decode};

/// Omits articles whose URL carries a blocked namespace prefix, logging
/// each omission to the omitted-namespace log. Pure gatekeeping — kept
/// articles score zero here.
pub struct NamespaceFilter {
    blocked: HashSet<String>,
    log: LogWriter,
}

impl NamespaceFilter {
    pub fn new(blocked: &[String], log: LogWriter) -> Self {
        Self {
            blocked: blocked.iter().cloned().collect(),
            log,
        }
    }
}

impl Processor for NamespaceFilter {
    fn name(&self) -> &str {
        "namespaces"
    }

    fn process(&mut self, article: &mut Article) -> Result<Outcome> {
        match namespace_of(&article.url) {
            Some(ns) if self.blocked.contains(&ns) => {
                self.log.write_line(&article.url)?;
                Ok(Outcome::omit())
            }
            _ => Ok(Outcome::keep(0)),
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.log.flush()
    }
}

/// Extract the namespace prefix of an article URL: the percent-decoded text
/// before the first `:` of the file-name portion. Main-namespace pages have
/// no `:` and yield `None`.
fn namespace_of(url: &str) -> Option<String> {
    let name = url.rsplit('/').next().unwrap_or(url);
    let decoded = percent_decode(name);
    decoded.split_once(':').map(|(ns, _)| ns.to_string())
}
