//! CLI command handlers. Each command is in its own file.

mod completions;
mod dedup;
mod normalize;
mod sourcemap;

pub use completions::run_completions;
pub use dedup::{run_dedup, DedupOverrides};
pub use normalize::run_normalize;
pub use sourcemap::run_sourcemap;
