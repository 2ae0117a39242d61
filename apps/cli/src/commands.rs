//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use wikipack_corpus::{ArticleSource, walk_corpus};
use wikipack_pipeline::{Article, PassObserver, PassSummary, Pipeline};
use wikipack_shared::{AppConfig, PipelineConfig, init_config, load_config, load_config_from};
use wikipack_snapshot::{SnapshotOptions, assemble};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// wikipack — pack an encyclopedia dump into an offline snapshot.
#[derive(Parser)]
#[command(
    name = "wikipack",
    version,
    about = "Score encyclopedia article dumps and build size-constrained offline snapshots.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to an alternate config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Score a dump and assemble a snapshot directory.
    Build {
        /// Directory containing the article dump.
        dump: PathBuf,

        /// Snapshot output root (defaults to the configured one).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Capacity of the target medium in bytes (defaults to the
        /// configured one).
        #[arg(long)]
        capacity: Option<u64>,
    },

    /// Score a dump and print the highest-ranked articles.
    Rank {
        /// Directory containing the article dump.
        dump: PathBuf,

        /// Number of articles to show.
        #[arg(short = 'n', long, default_value = "20")]
        top: usize,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "wikipack=info",
        1 => "wikipack=debug",
        _ => "wikipack=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Build {
            dump,
            out,
            capacity,
        } => cmd_build(&config, &dump, out, capacity),
        Command::Rank { dump, top } => cmd_rank(&config, &dump, top),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_build(
    config: &AppConfig,
    dump: &Path,
    out: Option<PathBuf>,
    capacity: Option<u64>,
) -> Result<()> {
    let output_root = match out {
        Some(p) => p,
        None => expand_home(&config.snapshot.output_root)?,
    };
    std::fs::create_dir_all(&output_root)
        .map_err(|e| eyre!("cannot create output root {}: {e}", output_root.display()))?;

    let capacity_bytes = capacity.unwrap_or(config.snapshot.capacity_bytes);

    info!(
        dump = %dump.display(),
        out = %output_root.display(),
        capacity_bytes,
        "building snapshot"
    );

    // Decision logs land next to the snapshot output unless configured
    // with explicit paths.
    let pipeline_config = anchor_logs(&config.pipeline, &output_root);

    let sources = walk_corpus(dump)?;
    let summary = run_pass(&pipeline_config, sources)?;

    let options = SnapshotOptions {
        output_root,
        capacity_bytes,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let result = assemble(&options, &summary.pages)?;

    println!();
    println!("  Snapshot assembled!");
    println!("  ID:       {}", result.manifest.id);
    println!("  Articles: {} scored, {} omitted", summary.pages.len(), summary.omitted);
    println!(
        "  Selected: {} pages, {} bytes ({} dropped for capacity)",
        result.manifest.page_count, result.manifest.total_bytes, result.manifest.pages_dropped
    );
    println!("  Path:     {}", result.snapshot_path.display());
    println!();

    Ok(())
}

fn cmd_rank(config: &AppConfig, dump: &Path, top: usize) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| eyre!("cannot determine working directory: {e}"))?;
    let pipeline_config = anchor_logs(&config.pipeline, &cwd);

    let sources = walk_corpus(dump)?;
    let summary = run_pass(&pipeline_config, sources)?;

    println!(
        "{} articles scored, {} omitted\n",
        summary.pages.len(),
        summary.omitted
    );
    println!("{:>10}  {}", "score", "article");

    for page in wikipack_snapshot::rank(&summary.pages).into_iter().take(top) {
        println!("{:>10}  {}", page.score, page.url);
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config)?;
    println!("{rendered}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Pass driving
// ---------------------------------------------------------------------------

/// Run the processing pipeline over the enumerated sources with a
/// progress bar.
fn run_pass(config: &PipelineConfig, sources: Vec<ArticleSource>) -> Result<PassSummary> {
    let progress = CliProgress::new(sources.len() as u64);

    let articles = sources
        .into_iter()
        .map(|source| source.read().map(|html| Article::new(source.url, html)));

    let pipeline = Pipeline::new(config)?;
    let summary = pipeline.run(articles, &progress);
    progress.bar.finish_and_clear();

    Ok(summary?)
}

/// Resolve relative decision-log paths against `root`.
fn anchor_logs(config: &PipelineConfig, root: &Path) -> PipelineConfig {
    let anchor = |name: &str| -> String {
        let path = Path::new(name);
        if path.is_absolute() {
            name.to_string()
        } else {
            root.join(path).to_string_lossy().into_owned()
        }
    };

    PipelineConfig {
        omitted_log: anchor(&config.omitted_log),
        redirect_log: anchor(&config.redirect_log),
        ..config.clone()
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(path: &str) -> Result<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| eyre!("could not determine home directory"))?;
        Ok(home.join(rest))
    } else {
        Ok(PathBuf::from(path))
    }
}

// ---------------------------------------------------------------------------
// CLI progress
// ---------------------------------------------------------------------------

/// Corpus-pass progress bar backed by indicatif.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Self { bar }
    }
}

impl PassObserver for CliProgress {
    fn article_scored(&self, url: &str) {
        self.bar.set_message(url.to_string());
        self.bar.inc(1);
    }

    fn article_omitted(&self, url: &str) {
        self.bar.set_message(format!("{url} (omitted)"));
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_logs_resolves_relative_names() {
        let config = PipelineConfig::default();
        let anchored = anchor_logs(&config, Path::new("/tmp/run"));
        assert_eq!(anchored.omitted_log, "/tmp/run/omitted.log");
        assert_eq!(anchored.redirect_log, "/tmp/run/redirects.log");
        // everything else carries over
        assert_eq!(anchored.article_suffix, config.article_suffix);
    }

    #[test]
    fn anchor_logs_keeps_absolute_paths() {
        let config = PipelineConfig {
            omitted_log: "/var/log/omitted.log".into(),
            ..PipelineConfig::default()
        };
        let anchored = anchor_logs(&config, Path::new("/tmp/run"));
        assert_eq!(anchored.omitted_log, "/var/log/omitted.log");
    }
}
