//! Batch pipeline: filter, mark, annotate, deduplicate.
//!
//! Stages run in that order over one in-memory batch. Everything except
//! deduplication is a per-record map; deduplication is a single ordered pass.

use anyhow::Result;
use serde::Serialize;

use crate::annotate::annotate_in_place;
use crate::config::PipelineConfig;
use crate::dedup::{DedupKey, Deduplicator};
use crate::filter::InclusionFilter;
use crate::record::Endpoint;
use crate::sourcemap::mark_sourcemap_candidate;

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub input: usize,
    pub filtered_out: usize,
    pub duplicates: usize,
    pub output: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub endpoints: Vec<Endpoint>,
    pub stats: PipelineStats,
}

/// A configured pipeline. Build once per run; patterns are compiled here.
#[derive(Debug, Clone)]
pub struct Pipeline {
    filter: Option<InclusionFilter>,
    mark_sourcemaps: bool,
    annotate: bool,
    deduplicator: Deduplicator,
}

impl Pipeline {
    pub fn from_config(cfg: &PipelineConfig) -> Result<Self> {
        let filter = if cfg.filter_enabled {
            Some(InclusionFilter::new(&cfg.include_patterns)?)
        } else {
            None
        };
        Ok(Self {
            filter,
            mark_sourcemaps: cfg.mark_sourcemaps,
            annotate: cfg.annotate,
            deduplicator: Deduplicator::new(cfg.dedup_key),
        })
    }

    pub fn dedup_key(&self) -> DedupKey {
        self.deduplicator.key()
    }

    pub fn run(&self, endpoints: Vec<Endpoint>) -> PipelineOutput {
        let input = endpoints.len();

        let endpoints = match &self.filter {
            Some(filter) => filter.apply(endpoints),
            None => endpoints,
        };
        let filtered_out = input - endpoints.len();
        tracing::debug!("filter: {} of {} records kept", endpoints.len(), input);

        let endpoints: Vec<Endpoint> = endpoints
            .into_iter()
            .map(|mut endpoint| {
                if self.mark_sourcemaps {
                    endpoint = mark_sourcemap_candidate(&endpoint);
                }
                if self.annotate {
                    annotate_in_place(&mut endpoint);
                }
                endpoint
            })
            .collect();

        let (endpoints, dedup) = self.deduplicator.deduplicate_with_stats(endpoints);

        let stats = PipelineStats {
            input,
            filtered_out,
            duplicates: dedup.dropped,
            output: endpoints.len(),
        };
        tracing::info!(
            "pipeline: {} in, {} filtered out, {} duplicates, {} out",
            stats.input,
            stats.filtered_out,
            stats.duplicates,
            stats.output
        );
        PipelineOutput { endpoints, stats }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            filter: None,
            mark_sourcemaps: false,
            annotate: true,
            deduplicator: Deduplicator::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MATCHED_PATTERN_KEY;
    use crate::record::{NORMALIZED_URL_KEY, URL_FINGERPRINT_KEY};

    #[test]
    fn default_pipeline_annotates_and_dedups() {
        let out = Pipeline::default().run(vec![
            Endpoint::new("/api/users?id=1"),
            Endpoint::new("/api/users?id=2"),
            Endpoint::new("/api/posts"),
        ]);
        assert_eq!(out.endpoints.len(), 2);
        assert_eq!(out.endpoints[0].url, "/api/users?id=1");
        assert_eq!(out.endpoints[1].url, "/api/posts");
        assert_eq!(
            out.endpoints[0].metadata_str(NORMALIZED_URL_KEY),
            Some("/api/users?id=")
        );
        assert_eq!(
            out.stats,
            PipelineStats {
                input: 3,
                filtered_out: 0,
                duplicates: 1,
                output: 2
            }
        );
    }

    #[test]
    fn filter_runs_before_dedup() {
        let cfg = PipelineConfig {
            filter_enabled: true,
            annotate: false,
            ..PipelineConfig::default()
        };
        let out = Pipeline::from_config(&cfg).unwrap().run(vec![
            Endpoint::new("/home"),
            Endpoint::new("/api/v1/users/"),
            Endpoint::new("/api/v1/users"),
            Endpoint::new("/graphql"),
        ]);
        let urls: Vec<_> = out.endpoints.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, ["/api/v1/users/", "/graphql"]);
        assert_eq!(out.stats.filtered_out, 1);
        assert_eq!(out.stats.duplicates, 1);
        assert_eq!(
            out.endpoints[1].metadata_str(MATCHED_PATTERN_KEY),
            Some("/graphql")
        );
        assert!(out.endpoints[0].metadata_value(URL_FINGERPRINT_KEY).is_none());
    }

    #[test]
    fn marks_sourcemap_candidates() {
        let cfg = PipelineConfig {
            mark_sourcemaps: true,
            ..PipelineConfig::default()
        };
        let out = Pipeline::from_config(&cfg)
            .unwrap()
            .run(vec![Endpoint::new("/api").with_source("vendor.bundle.js")]);
        assert_eq!(
            out.endpoints[0].metadata_value("likely_has_sourcemap"),
            Some(&serde_json::Value::Bool(true))
        );
        assert!(out.endpoints[0].metadata_str(URL_FINGERPRINT_KEY).is_some());
    }

    #[test]
    fn invalid_pattern_fails_construction() {
        let cfg = PipelineConfig {
            filter_enabled: true,
            include_patterns: vec!["[".to_string()],
            ..PipelineConfig::default()
        };
        assert!(Pipeline::from_config(&cfg).is_err());
    }

    #[test]
    fn empty_batch() {
        let out = Pipeline::default().run(Vec::new());
        assert!(out.endpoints.is_empty());
        assert_eq!(out.stats, PipelineStats::default());
    }
}
