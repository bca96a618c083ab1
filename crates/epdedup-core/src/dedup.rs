//! Order-preserving endpoint deduplication.
//!
//! One forward pass keeps the first record for each URL identity and drops
//! later ones. The identity is recomputed from `url` on every pass; any
//! `url_fingerprint` already present in metadata is ignored. The seen-set
//! lives only for the duration of one call.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::canonical::normalize;
use crate::fingerprint::fingerprint_normalized;
use crate::record::Endpoint;

/// What the seen-set is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupKey {
    /// 128-bit fingerprint of the normalized URL. Colliding fingerprints
    /// are treated as duplicates.
    #[default]
    Fingerprint,
    /// The normalized URL itself; no collisions, more memory per entry.
    NormalizedUrl,
}

impl DedupKey {
    fn identity(self, url: &str) -> String {
        let normalized = normalize(url);
        match self {
            DedupKey::Fingerprint => fingerprint_normalized(&normalized),
            DedupKey::NormalizedUrl => normalized,
        }
    }
}

/// Counters for one deduplication pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DedupStats {
    pub input: usize,
    pub kept: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator {
    key: DedupKey,
}

impl Deduplicator {
    pub fn new(key: DedupKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> DedupKey {
        self.key
    }

    pub fn deduplicate<I>(&self, endpoints: I) -> Vec<Endpoint>
    where
        I: IntoIterator<Item = Endpoint>,
    {
        self.deduplicate_with_stats(endpoints).0
    }

    /// Like [`Deduplicator::deduplicate`], also reporting what was dropped.
    pub fn deduplicate_with_stats<I>(&self, endpoints: I) -> (Vec<Endpoint>, DedupStats)
    where
        I: IntoIterator<Item = Endpoint>,
    {
        let mut seen = HashSet::new();
        let mut stats = DedupStats::default();
        let mut unique = Vec::new();

        for endpoint in endpoints {
            stats.input += 1;
            if seen.insert(self.key.identity(&endpoint.url)) {
                unique.push(endpoint);
            } else {
                tracing::trace!("dropping duplicate endpoint {}", endpoint.url);
            }
        }

        stats.kept = unique.len();
        stats.dropped = stats.input - stats.kept;
        tracing::debug!(
            "dedup ({:?}): {} in, {} kept, {} dropped",
            self.key,
            stats.input,
            stats.kept,
            stats.dropped
        );
        (unique, stats)
    }

    /// Borrowing variant: returns references to the first occurrences.
    pub fn deduplicate_refs<'a>(&self, endpoints: &'a [Endpoint]) -> Vec<&'a Endpoint> {
        let mut seen = HashSet::new();
        endpoints
            .iter()
            .filter(|e| seen.insert(self.key.identity(&e.url)))
            .collect()
    }
}

/// Deduplicates by fingerprint, keeping first occurrences in input order.
pub fn deduplicate<I>(endpoints: I) -> Vec<Endpoint>
where
    I: IntoIterator<Item = Endpoint>,
{
    Deduplicator::default().deduplicate(endpoints)
}
