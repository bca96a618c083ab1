//! `epdedup normalize <url>...` – show canonical form and fingerprint.

use anyhow::Result;
use epdedup_core::canonical::normalize;
use epdedup_core::fingerprint::fingerprint_normalized;

pub fn run_normalize(urls: &[String]) -> Result<()> {
    for url in urls {
        let normalized = normalize(url);
        println!("{}\t{}", normalized, fingerprint_normalized(&normalized));
    }
    Ok(())
}
