//! Query-string reduction to a sorted, value-free key list.

use std::collections::BTreeSet;
use url::form_urlencoded;

/// Rebuilds `query` as `k1=&k2=&...` over its distinct, non-empty keys in
/// byte order. Values are dropped. Keys are decoded on input and encoded
/// again on output, so the result parses back to the same key set. Keys
/// therefore come out in `application/x-www-form-urlencoded` form:
/// `ü=1&a b=2` becomes `a+b=&%C3%BC=`. Empty key names (`=1`) are dropped.
pub fn normalize_query(query: &str) -> String {
    let keys: BTreeSet<String> = form_urlencoded::parse(query.as_bytes())
        .map(|(key, _)| key.into_owned())
        .filter(|key| !key.is_empty())
        .collect();

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for key in &keys {
        serializer.append_pair(key, "");
    }
    serializer.finish()
}
