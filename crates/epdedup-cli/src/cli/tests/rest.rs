//! Tests for normalize, sourcemap, completions.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;

#[test]
fn cli_parse_normalize() {
    match parse(&["epdedup", "normalize", "/api/users?id=1", "https://example.com/x/"]) {
        CliCommand::Normalize { urls } => {
            assert_eq!(urls, ["/api/users?id=1", "https://example.com/x/"]);
        }
        _ => panic!("expected Normalize"),
    }
}

#[test]
fn cli_parse_normalize_requires_url() {
    assert!(Cli::try_parse_from(["epdedup", "normalize"]).is_err());
}

#[test]
fn cli_parse_sourcemap() {
    match parse(&["epdedup", "sourcemap", "dist/app.js.map"]) {
        CliCommand::Sourcemap { path } => assert_eq!(path, "dist/app.js.map"),
        _ => panic!("expected Sourcemap"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["epdedup", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["epdedup", "crawl"]).is_err());
}
