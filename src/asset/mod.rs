//! Asset extraction, deduplication, transformation and publishing.

mod aggregate;
mod kind;
pub mod minify;
mod publish;
mod route;
mod scan;

// Types
pub use aggregate::{AssetAggregator, AssetError, TransformedAsset};
pub use kind::{AssetKind, KindCounts};
pub use minify::{Minifier, Transform};

// Scanning (pure functions)
pub use scan::scan_references;

// Publishing (side effects)
pub use publish::publish;
