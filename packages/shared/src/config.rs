//! Application configuration for wikipack.
//!
//! User config lives at `~/.wikipack/wikipack.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WikipackError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "wikipack.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".wikipack";

/// Matches the meta-refresh directive a redirect page carries; group 1 is
/// the (still percent-encoded) redirect target.
pub const DEFAULT_REDIRECT_PATTERN: &str =
    r#"<meta http-equiv="Refresh" content="\d*;?url=.*?([^/">]+)""#;

/// Matches the heading element and the marker-delimited main content region
/// of a rendered article; group 1 is the heading, group 2 the content.
pub const DEFAULT_CONTENT_PATTERN: &str =
    r#"(?s)(<h1 class="firstHeading">.+</h1>).*<!-- start content -->\s*(.+)\s*<!-- end content -->"#;

/// Matches parent-relative internal links to rendered articles; group 1 is
/// the (still percent-encoded) target file name.
pub const DEFAULT_LINK_PATTERN: &str = r#"<a\s+[^>]*?href="\.\./.*?([^/>"]+\.html)""#;

// ---------------------------------------------------------------------------
// Config structs (matching wikipack.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Processing-pass settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Snapshot selection settings.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Namespace prefixes whose articles are excluded from the snapshot.
    #[serde(default = "default_blocked_namespaces")]
    pub blocked_namespaces: Vec<String>,

    /// Column separator for the redirect decision log.
    #[serde(default = "default_column_separator")]
    pub column_separator: String,

    /// File name (or path) of the omitted-namespace log.
    #[serde(default = "default_omitted_log")]
    pub omitted_log: String,

    /// File name (or path) of the redirect log.
    #[serde(default = "default_redirect_log")]
    pub redirect_log: String,

    /// Suffix identifying rendered article documents.
    #[serde(default = "default_article_suffix")]
    pub article_suffix: String,

    /// Regex detecting client-side redirect pages.
    ///
    /// The extraction patterns encode the upstream page template; they are
    /// configurable because that template drifts between dump generations.
    #[serde(default = "default_redirect_pattern")]
    pub redirect_pattern: String,

    /// Regex isolating an article's heading and main content region.
    #[serde(default = "default_content_pattern")]
    pub content_pattern: String,

    /// Regex capturing internal article-to-article links.
    #[serde(default = "default_link_pattern")]
    pub link_pattern: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            blocked_namespaces: default_blocked_namespaces(),
            column_separator: default_column_separator(),
            omitted_log: default_omitted_log(),
            redirect_log: default_redirect_log(),
            article_suffix: default_article_suffix(),
            redirect_pattern: default_redirect_pattern(),
            content_pattern: default_content_pattern(),
            link_pattern: default_link_pattern(),
        }
    }
}

fn default_blocked_namespaces() -> Vec<String> {
    [
        "Talk",
        "User",
        "User talk",
        "Wikipedia",
        "Wikipedia talk",
        "Image talk",
        "MediaWiki",
        "MediaWiki talk",
        "Template",
        "Template talk",
        "Help",
        "Help talk",
        "Category talk",
        "Portal talk",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_column_separator() -> String {
    "|".into()
}
fn default_omitted_log() -> String {
    "omitted.log".into()
}
fn default_redirect_log() -> String {
    "redirects.log".into()
}
fn default_article_suffix() -> String {
    ".html".into()
}
fn default_redirect_pattern() -> String {
    DEFAULT_REDIRECT_PATTERN.into()
}
fn default_content_pattern() -> String {
    DEFAULT_CONTENT_PATTERN.into()
}
fn default_link_pattern() -> String {
    DEFAULT_LINK_PATTERN.into()
}

/// `[snapshot]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Default snapshot output directory.
    #[serde(default = "default_output_root")]
    pub output_root: String,

    /// Capacity of the target medium in bytes.
    #[serde(default = "default_capacity_bytes")]
    pub capacity_bytes: u64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            capacity_bytes: default_capacity_bytes(),
        }
    }
}

fn default_output_root() -> String {
    "~/wikipack-snapshots".into()
}
fn default_capacity_bytes() -> u64 {
    // 700 MB CD-ROM
    700 * 1024 * 1024
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.wikipack/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WikipackError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.wikipack/wikipack.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| WikipackError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| WikipackError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| WikipackError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| WikipackError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| WikipackError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
