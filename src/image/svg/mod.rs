//! Inline SVG pass over final HTML.
//!
//! Every `<svg>...</svg>` block embedded in a page is replaced with its
//! optimized markup. Blocks are matched non-greedily, so nested `<svg>`
//! elements are not supported.

mod optimize;

pub use optimize::{SvgError, optimize_svg};

use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

use crate::error::BundleError;
use crate::page::Page;

static SVG_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg\b.*?</svg>").unwrap());

/// Replace every inline SVG block in `html` with optimized markup.
pub fn inline_svgs(html: &str) -> Result<String, SvgError> {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for block in SVG_BLOCK.find_iter(html) {
        out.push_str(&html[last..block.start()]);
        out.push_str(&optimize_svg(block.as_str())?);
        last = block.end();
    }
    out.push_str(&html[last..]);
    Ok(out)
}

/// Run the SVG pass over all pages in parallel.
///
/// Every page is marked dirty, whether or not it contained SVG.
pub fn optimize_pages(pages: &mut [Page]) -> Result<(), BundleError> {
    pages.par_iter_mut().try_for_each(|page| {
        let html = inline_svgs(page.html()).map_err(|source| BundleError::Svg {
            document: page.path().to_path_buf(),
            source,
        })?;
        page.set_html(html);
        Ok(())
    })
}
