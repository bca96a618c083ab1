//! Sourcemap discovery: `sourceMappingURL` comments in JavaScript and
//! endpoint records synthesized from sourcemap JSON.

use serde::Deserialize;

use crate::record::Endpoint;

/// Directive markers; the `@` forms are the legacy spelling.
const MARKERS: [&str; 4] = [
    "//# sourceMappingURL=",
    "//@ sourceMappingURL=",
    "/*# sourceMappingURL=",
    "/*@ sourceMappingURL=",
];

/// Subset of a source map (revision 3) needed to list original files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceMap {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default, rename = "sourceRoot")]
    pub source_root: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// URL of the sourcemap referenced by `content`, if any.
///
/// Line comments (`//# sourceMappingURL=...`) run to end of line; block
/// comments (`/*# sourceMappingURL=... */`) run to the closing `*/` on the
/// same line. When a concatenated bundle carries several directives, the
/// last one belongs to the bundle itself and wins.
pub fn extract_sourcemap_url(content: &str) -> Option<String> {
    let mut found: Vec<(usize, &str)> = MARKERS
        .iter()
        .flat_map(|marker| content.match_indices(*marker))
        .collect();
    found.sort_unstable_by(|a, b| b.0.cmp(&a.0));

    found.into_iter().find_map(|(idx, marker)| {
        let line = content[idx + marker.len()..].lines().next().unwrap_or("");
        if marker.starts_with("/*") {
            non_empty(&line[..line.find("*/")?])
        } else {
            non_empty(line)
        }
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parses sourcemap JSON; malformed input yields `None`.
pub fn parse_sourcemap(content: &str) -> Option<SourceMap> {
    match serde_json::from_str(content) {
        Ok(map) => Some(map),
        Err(err) => {
            tracing::debug!("ignoring malformed sourcemap: {}", err);
            None
        }
    }
}

/// One `unknown` endpoint per original source listed in a `.map` file.
///
/// Returns nothing when `source_path` is not a `.map` file or the JSON is
/// malformed.
pub fn endpoints_from_sourcemap(content: &str, source_path: &str) -> Vec<Endpoint> {
    if !source_path.ends_with(".map") {
        return Vec::new();
    }
    let Some(map) = parse_sourcemap(content) else {
        return Vec::new();
    };

    map.sources
        .into_iter()
        .map(|original| {
            Endpoint::new(original.clone())
                .with_endpoint_type("unknown")
                .with_source(source_path)
                .with_metadata_entry("from_sourcemap", true)
                .with_metadata_entry("original_file", original)
        })
        .collect()
}

/// Flags records found in minified or bundled JavaScript, which usually
/// ship with a sourcemap.
pub fn mark_sourcemap_candidate(endpoint: &Endpoint) -> Endpoint {
    match endpoint.source.as_deref() {
        Some(source) if source.ends_with(".min.js") || source.ends_with(".bundle.js") => endpoint
            .clone()
            .with_metadata_entry("likely_has_sourcemap", true)
            .with_metadata_entry("original_source", source),
        _ => endpoint.clone(),
    }
}
