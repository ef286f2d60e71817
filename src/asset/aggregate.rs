//! Cross-document asset deduplication.
//!
//! Every distinct `(kind, reference)` pair is resolved, read and transformed
//! exactly once, by the first page that references it. Later pages only add
//! themselves to the referencing list.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::minify::{AssetContent, Transform, TransformError};
use super::route::{fingerprint_path, fingerprint_reference, resolve_source};
use super::{AssetKind, KindCounts};
use crate::error::BundleError;
use crate::page::PageId;
use crate::utils::hash::{self, ContentDigest};

/// Failure while resolving, reading or transforming one asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("`{}` escapes the asset directory", .0.display())]
    Escapes(PathBuf),

    #[error("cannot read `{}`", .0.display())]
    Read(PathBuf, #[source] io::Error),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Deduplication key: the reference exactly as written in HTML.
///
/// Two spellings of the same file are two keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub kind: AssetKind,
    pub reference: String,
}

/// An asset read and transformed once, waiting to be published.
#[derive(Debug)]
pub struct TransformedAsset {
    pub key: AssetKey,
    /// Resolved source file.
    pub source: PathBuf,
    pub content: AssetContent,
    /// Pages referencing this asset, one entry per occurrence.
    pub pages: Vec<PageId>,
}

/// Content-addressed naming of a transformed asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Digest of the transformed (uncompressed) content.
    pub digest: ContentDigest,
    /// New file path on disk.
    pub output: PathBuf,
    /// New reference string for HTML.
    pub reference: String,
}

impl TransformedAsset {
    pub fn fingerprint(&self) -> Fingerprint {
        let digest = hash::digest(self.content.as_bytes());
        let hex = digest.to_hex();
        Fingerprint {
            digest,
            output: fingerprint_path(&self.source, &hex),
            reference: fingerprint_reference(&self.key.reference, &hex),
        }
    }
}

/// Run-owned aggregation state, in first-registration order.
pub struct AssetAggregator<'t> {
    asset_dir: PathBuf,
    transform: &'t dyn Transform,
    index: FxHashMap<AssetKey, usize>,
    assets: Vec<TransformedAsset>,
}

impl<'t> AssetAggregator<'t> {
    pub fn new(asset_dir: impl Into<PathBuf>, transform: &'t dyn Transform) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            transform,
            index: FxHashMap::default(),
            assets: Vec::new(),
        }
    }

    /// Record that `page` (at `document`) references `reference`.
    ///
    /// The first registration of a key reads and transforms the asset; any
    /// later one only appends the page.
    pub fn register(
        &mut self,
        kind: AssetKind,
        reference: &str,
        page: PageId,
        document: &Path,
    ) -> Result<(), BundleError> {
        let key = AssetKey {
            kind,
            reference: reference.to_owned(),
        };

        if let Some(&slot) = self.index.get(&key) {
            self.assets[slot].pages.push(page);
            return Ok(());
        }

        let (source, content) =
            self.load(kind, reference)
                .map_err(|source| BundleError::Asset {
                    kind,
                    reference: reference.to_owned(),
                    document: document.to_path_buf(),
                    source,
                })?;
        crate::debug!("asset"; "{} {} -> {}", kind, reference, source.display());

        self.index.insert(key.clone(), self.assets.len());
        self.assets.push(TransformedAsset {
            key,
            source,
            content,
            pages: vec![page],
        });
        Ok(())
    }

    fn load(&self, kind: AssetKind, reference: &str) -> Result<(PathBuf, AssetContent), AssetError> {
        let source = resolve_source(&self.asset_dir, reference)?;
        let bytes = fs::read(&source).map_err(|e| AssetError::Read(source.clone(), e))?;
        let content = self.transform.transform(kind, bytes, &source)?;
        Ok((source, content))
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for asset in &self.assets {
            counts.add(asset.key.kind);
        }
        counts
    }

    pub fn into_assets(self) -> Vec<TransformedAsset> {
        self.assets
    }
}
