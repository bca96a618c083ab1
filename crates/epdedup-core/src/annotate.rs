//! Attach the normalized URL and its fingerprint to endpoint metadata.
//!
//! `annotate` returns a new record and leaves the caller's value alone, so
//! shared records can be annotated from several workers. `annotate_in_place`
//! takes `&mut`, which already rules out concurrent use of the same record.

use serde_json::Value;

use crate::canonical::normalize;
use crate::fingerprint::fingerprint_normalized;
use crate::record::{Endpoint, NORMALIZED_URL_KEY, URL_FINGERPRINT_KEY};

/// Copy of `endpoint` with `normalized_url` and `url_fingerprint` set.
pub fn annotate(endpoint: &Endpoint) -> Endpoint {
    let mut annotated = endpoint.clone();
    annotate_in_place(&mut annotated);
    annotated
}

/// Sets `normalized_url` and `url_fingerprint` on `endpoint` directly.
pub fn annotate_in_place(endpoint: &mut Endpoint) {
    let normalized = normalize(&endpoint.url);
    let fingerprint = fingerprint_normalized(&normalized);
    let metadata = endpoint.metadata_mut();
    metadata.insert(NORMALIZED_URL_KEY.to_string(), Value::String(normalized));
    metadata.insert(URL_FINGERPRINT_KEY.to_string(), Value::String(fingerprint));
}

/// Annotates every record of a batch, preserving order.
pub fn annotate_all(endpoints: &[Endpoint]) -> Vec<Endpoint> {
    endpoints.iter().map(annotate).collect()
}
