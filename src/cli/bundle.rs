//! Bundling run orchestration.
//!
//! Pipeline phases (single pass, fail-fast):
//! - **Load + Aggregate** - read pages in glob order, extract references,
//!   read and transform each distinct asset once
//! - **Publish + Rewrite** - fingerprint every asset, write/rename it and
//!   rewrite all pages referencing it
//! - **SVG** - optimize inline SVG markup (optional)
//! - **Flush** - write dirty pages back

use crate::{
    asset::{AssetAggregator, AssetKind, KindCounts, Transform, TransformedAsset, publish, scan_references},
    config::BundleConfig,
    debug,
    error::BundleError,
    image,
    logger::ProgressLine,
    page::{Page, PageStore, ReferenceRewriter, glob_pages},
    utils::plural_count,
};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReport {
    /// HTML files processed.
    pub documents: usize,
    /// HTML files written back.
    pub written: usize,
    /// Distinct assets published, per kind.
    pub assets: KindCounts,
}

/// Run the whole pipeline described by `config`.
pub fn bundle(config: &BundleConfig, transform: &dyn Transform) -> Result<BundleReport, BundleError> {
    let paths = glob_pages(&config.html_glob)?;
    if paths.is_empty() {
        return Err(BundleError::NoDocuments(config.html_glob.clone()));
    }
    debug!("bundle"; "found {}", plural_count(paths.len(), "HTML file"));

    let mut pages = PageStore::default();
    let mut aggregator = AssetAggregator::new(&config.asset_dir, transform);
    for path in paths {
        let id = pages.push(Page::load(path)?);
        let page = pages.get(id);
        for kind in AssetKind::ALL {
            for reference in scan_references(kind, page.html()) {
                aggregator.register(kind, reference, id, page.path())?;
            }
        }
    }

    if aggregator.is_empty() {
        return Err(BundleError::NoReferences(pages.len()));
    }

    let counts = aggregator.counts();
    publish_assets(aggregator.into_assets(), &mut pages, config.gzip, &counts)?;

    if config.svgo {
        image::svg::optimize_pages(pages.pages_mut())?;
    }

    let written = pages.flush()?;
    Ok(BundleReport {
        documents: pages.len(),
        written,
        assets: counts,
    })
}

/// Publish each asset and rewrite the pages that reference it.
fn publish_assets(
    assets: Vec<TransformedAsset>,
    pages: &mut PageStore,
    gzip: Option<u32>,
    counts: &KindCounts,
) -> Result<(), BundleError> {
    let progress = ProgressLine::new(&counts.items());

    for asset in assets {
        let fingerprint = publish(&asset, gzip)?;
        debug!(
            "asset";
            "{} -> {} ({})",
            asset.source.display(),
            fingerprint.output.display(),
            fingerprint.digest
        );

        let rewriter = ReferenceRewriter::new(&asset.key.reference, &fingerprint.reference)
            .map_err(|source| BundleError::Rewrite {
                reference: asset.key.reference.clone(),
                source,
            })?;
        for &id in &asset.pages {
            rewriter.apply(pages.get_mut(id));
        }

        progress.inc(asset.key.kind.name());
    }

    progress.finish();
    Ok(())
}
