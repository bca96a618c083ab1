pub mod config;
pub mod logging;

pub mod annotate;
pub mod canonical;
pub mod dedup;
pub mod filter;
pub mod fingerprint;
pub mod pipeline;
pub mod record;
pub mod sourcemap;

pub use annotate::{annotate, annotate_all, annotate_in_place};
pub use canonical::normalize;
pub use dedup::{deduplicate, DedupKey, Deduplicator};
pub use fingerprint::fingerprint;
pub use record::Endpoint;
