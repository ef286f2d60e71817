//! Bundling error taxonomy.
//!
//! Every error is fatal to the run. Assets published before the failure
//! stay published.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::asset::{AssetError, AssetKind};
use crate::image::svg::SvgError;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("invalid HTML glob `{pattern}`")]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("found 0 HTML files matching `{0}`")]
    NoDocuments(String),

    #[error("found 0 asset references in {0} HTML file(s), aborting")]
    NoReferences(usize),

    #[error("IO error on `{}`", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("at `{}` for {kind} asset `{reference}`", document.display())]
    Asset {
        kind: AssetKind,
        reference: String,
        document: PathBuf,
        source: AssetError,
    },

    #[error("failed to publish {kind} asset `{reference}` (`{}`)", path.display())]
    Publish {
        kind: AssetKind,
        reference: String,
        path: PathBuf,
        source: io::Error,
    },

    #[error("cannot build rewrite pattern for `{reference}`")]
    Rewrite {
        reference: String,
        source: regex::Error,
    },

    #[error("failed to optimize inline SVG in `{}`", document.display())]
    Svg { document: PathBuf, source: SvgError },
}

impl BundleError {
    /// Errors caused by the invocation rather than by an asset.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::InvalidGlob { .. } | Self::NoDocuments(_) | Self::NoReferences(_)
        )
    }
}
