//! Page processing and link-rank scoring pipeline.
//!
//! Every article from the dump passes through an ordered chain of
//! processors: the namespace filter and redirect filter decide whether the
//! page belongs in the snapshot at all, the content extractor trims the body
//! to the substantive region and scores it by length, and the link-rank
//! scorer credits every page this one links to. Omission is terminal — once
//! a processor drops a page, the rest of the chain never sees it.
//!
//! The pass is single-threaded and sequential by design: one article moves
//! through the whole chain before the next one starts, and the only state
//! shared across articles is the [`ScoreBoard`].

pub mod article;
pub mod logs;
pub mod processors;
pub mod runner;
pub mod score;

pub use article::Article;
pub use logs::{DecisionLogs, LogWriter};
pub use processors::{ArticleState, Outcome, Processor, ProcessorChain, Verdict};
pub use runner::{PassObserver, PassSummary, Pipeline, RankedPage, SilentObserver};
pub use score::ScoreBoard;
