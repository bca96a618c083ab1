//! Endpoint record model shared by every pipeline stage.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Free-form metadata attached to an endpoint.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Metadata key holding the canonical form of `url`.
pub const NORMALIZED_URL_KEY: &str = "normalized_url";
/// Metadata key holding the fingerprint of `url`.
pub const URL_FINGERPRINT_KEY: &str = "url_fingerprint";

const DEFAULT_ENDPOINT_TYPE: &str = "unknown";

fn default_endpoint_type() -> String {
    DEFAULT_ENDPOINT_TYPE.to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A discovered endpoint flowing through the pipeline.
///
/// A record without `url` (or with `"url": null`) deserializes with an
/// empty URL, so every stage sees a plain `&str`. Fields this crate does not
/// interpret are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Absolute (`scheme://host/path?query`) or relative (`/path?query`) URL.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    /// Opaque type tag (`rest`, `graphql`, `unknown`, ...).
    #[serde(default = "default_endpoint_type", alias = "endpointType")]
    pub endpoint_type: String,
    /// File or identifier the endpoint was found in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// HTTP method, when the discoverer knew it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Line number in `source`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Query parameter names seen alongside the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<String>>,
    /// Created lazily by stages that annotate records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Any other keys of the input record, re-emitted as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            endpoint_type: default_endpoint_type(),
            source: None,
            method: None,
            line: None,
            params: None,
            metadata: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_endpoint_type(mut self, endpoint_type: impl Into<String>) -> Self {
        self.endpoint_type = endpoint_type.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Insert one metadata entry, creating the map if needed.
    pub fn with_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata_mut().insert(key.into(), value.into());
        self
    }

    /// Metadata map, created empty if absent.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        self.metadata.get_or_insert_with(Metadata::new)
    }

    pub fn metadata_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }

    /// Metadata value as a string slice, if present and a JSON string.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata_value(key).and_then(|v| v.as_str())
    }
}
