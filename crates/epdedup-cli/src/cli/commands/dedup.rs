//! `epdedup dedup <path>` – run the pipeline over a JSON record file.

use anyhow::{Context, Result};
use epdedup_core::config::{EpdedupConfig, PipelineConfig};
use epdedup_core::dedup::DedupKey;
use epdedup_core::pipeline::Pipeline;
use epdedup_core::record::Endpoint;
use std::io::Read;
use std::path::Path;

/// Command-line flags layered over the `[pipeline]` config section.
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupOverrides {
    pub filter: bool,
    pub no_annotate: bool,
    pub mark_sourcemaps: bool,
    pub by_url: bool,
}

impl DedupOverrides {
    pub(crate) fn apply(self, base: &PipelineConfig) -> PipelineConfig {
        let mut cfg = base.clone();
        cfg.filter_enabled |= self.filter;
        cfg.annotate &= !self.no_annotate;
        cfg.mark_sourcemaps |= self.mark_sourcemaps;
        if self.by_url {
            cfg.dedup_key = DedupKey::NormalizedUrl;
        }
        cfg
    }
}

pub fn run_dedup(cfg: &EpdedupConfig, path: &str, overrides: DedupOverrides) -> Result<()> {
    let endpoints = read_endpoints(path)?;
    let pipeline = Pipeline::from_config(&overrides.apply(&cfg.pipeline))?;
    let output = pipeline.run(endpoints);

    let json = serde_json::to_string_pretty(&output.endpoints)?;
    println!("{json}");
    eprintln!(
        "{} in, {} filtered out, {} duplicates, {} out",
        output.stats.input, output.stats.filtered_out, output.stats.duplicates, output.stats.output
    );
    Ok(())
}

/// Reads a JSON array of endpoint records from `path` (`-` = stdin).
pub(crate) fn read_endpoints(path: &str) -> Result<Vec<Endpoint>> {
    let data = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read records from stdin")?;
        buf
    } else {
        std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("read records file: {path}"))?
    };
    serde_json::from_str(&data).with_context(|| format!("parse records JSON: {path}"))
}
