//! CLI for the epdedup endpoint deduplicator.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use epdedup_core::config::{self, EpdedupConfig};
use std::path::{Path, PathBuf};

use commands::{run_completions, run_dedup, run_normalize, run_sourcemap, DedupOverrides};

/// Top-level CLI for epdedup.
#[derive(Debug, Parser)]
#[command(name = "epdedup")]
#[command(about = "epdedup: canonicalize and deduplicate discovered endpoint URLs", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/epdedup/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the normalized form and fingerprint of each URL.
    Normalize {
        /// URLs (absolute or relative) to normalize.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Deduplicate a JSON array of endpoint records and print the result.
    Dedup {
        /// Path to the JSON file, or `-` for stdin.
        path: String,

        /// Keep only records matching the configured include patterns.
        #[arg(long)]
        filter: bool,

        /// Do not attach normalized_url/url_fingerprint metadata.
        #[arg(long)]
        no_annotate: bool,

        /// Flag records found in minified or bundled JavaScript.
        #[arg(long)]
        mark_sourcemaps: bool,

        /// Key duplicates on the normalized URL instead of its fingerprint.
        #[arg(long)]
        by_url: bool,
    },

    /// List endpoints from a .map file, or the sourceMappingURL of a script.
    Sourcemap {
        /// Path to a sourcemap (.map) or JavaScript file.
        path: String,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Normalize { urls } => run_normalize(&urls)?,
            CliCommand::Dedup {
                path,
                filter,
                no_annotate,
                mark_sourcemaps,
                by_url,
            } => {
                let cfg = load_config(cli.config.as_deref())?;
                tracing::debug!("loaded config: {:?}", cfg);
                let overrides = DedupOverrides {
                    filter,
                    no_annotate,
                    mark_sourcemaps,
                    by_url,
                };
                run_dedup(&cfg, &path, overrides)?;
            }
            CliCommand::Sourcemap { path } => run_sourcemap(Path::new(&path))?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<EpdedupConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
