use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dedup::DedupKey;
use crate::filter::DEFAULT_PATTERNS;

fn default_include_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_true() -> bool {
    true
}

/// Batch pipeline stages (`[pipeline]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Drop records whose URL matches none of `include_patterns`.
    #[serde(default)]
    pub filter_enabled: bool,
    /// Regular expressions searched in each URL, in order.
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,
    /// Attach `normalized_url` and `url_fingerprint` metadata.
    #[serde(default = "default_true")]
    pub annotate: bool,
    /// Flag records whose source is minified/bundled JavaScript.
    #[serde(default)]
    pub mark_sourcemaps: bool,
    /// "fingerprint" (default) or "normalized_url".
    #[serde(default)]
    pub dedup_key: DedupKey,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filter_enabled: false,
            include_patterns: default_include_patterns(),
            annotate: true,
            mark_sourcemaps: false,
            dedup_key: DedupKey::Fingerprint,
        }
    }
}

/// Global configuration loaded from `~/.config/epdedup/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpdedupConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("epdedup")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<EpdedupConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = EpdedupConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<EpdedupConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: EpdedupConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
