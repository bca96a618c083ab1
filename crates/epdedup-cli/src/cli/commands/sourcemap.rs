//! `epdedup sourcemap <path>` – inspect a sourcemap or script file.

use anyhow::{Context, Result};
use epdedup_core::sourcemap::{endpoints_from_sourcemap, extract_sourcemap_url};
use std::path::Path;

pub fn run_sourcemap(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read file: {}", path.display()))?;
    let source = path.to_string_lossy();

    if source.ends_with(".map") {
        let endpoints = endpoints_from_sourcemap(&content, &source);
        tracing::debug!("{} sources listed in {}", endpoints.len(), source);
        println!("{}", serde_json::to_string_pretty(&endpoints)?);
    } else {
        match extract_sourcemap_url(&content) {
            Some(url) => println!("{url}"),
            None => eprintln!("no sourceMappingURL in {}", path.display()),
        }
    }
    Ok(())
}
