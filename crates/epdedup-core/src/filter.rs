//! Regex inclusion filter over endpoint URLs.
//!
//! Patterns are compiled once when the filter is built and reused for every
//! record of the run.

use regex::Regex;
use thiserror::Error;

use crate::record::Endpoint;

/// Metadata key naming the pattern that matched a record.
pub const MATCHED_PATTERN_KEY: &str = "matched_pattern";

/// Versioned REST, GraphQL and `/rest/` endpoints.
pub const DEFAULT_PATTERNS: &[&str] = &[r"/api/v\d+/", r"/graphql", r"/rest/"];

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid include pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Ordered list of compiled inclusion patterns.
#[derive(Debug, Clone)]
pub struct InclusionFilter {
    patterns: Vec<Regex>,
}

impl InclusionFilter {
    pub fn new<I, S>(patterns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| FilterError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Filter built from [`DEFAULT_PATTERNS`].
    pub fn with_defaults() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS
                .iter()
                .filter_map(|p| Regex::new(p).ok())
                .collect(),
        }
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    /// True if any pattern occurs somewhere in the record's URL.
    pub fn matches(&self, endpoint: &Endpoint) -> bool {
        self.matched_pattern(endpoint).is_some()
    }

    /// Source text of the first pattern found in the record's URL.
    pub fn matched_pattern(&self, endpoint: &Endpoint) -> Option<&str> {
        self.patterns
            .iter()
            .find(|re| re.is_match(&endpoint.url))
            .map(Regex::as_str)
    }

    /// Copy of `endpoint` with `matched_pattern` recorded, when one matches.
    pub fn tag(&self, endpoint: &Endpoint) -> Endpoint {
        match self.matched_pattern(endpoint) {
            Some(pattern) => endpoint
                .clone()
                .with_metadata_entry(MATCHED_PATTERN_KEY, pattern),
            None => endpoint.clone(),
        }
    }

    /// Keeps matching records, tagged, in input order.
    pub fn apply<I>(&self, endpoints: I) -> Vec<Endpoint>
    where
        I: IntoIterator<Item = Endpoint>,
    {
        endpoints
            .into_iter()
            .filter_map(|endpoint| {
                let pattern = self.matched_pattern(&endpoint)?.to_string();
                Some(endpoint.with_metadata_entry(MATCHED_PATTERN_KEY, pattern))
            })
            .collect()
    }
}

impl Default for InclusionFilter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
