//! Page enumeration, storage and flushing.

use std::path::PathBuf;

use super::{Page, PageId};
use crate::error::BundleError;

/// Enumerate regular files matching `pattern`, in glob order.
pub fn glob_pages(pattern: &str) -> Result<Vec<PathBuf>, BundleError> {
    let paths = glob::glob(pattern).map_err(|source| BundleError::InvalidGlob {
        pattern: pattern.to_owned(),
        source,
    })?;

    let mut pages = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| BundleError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            pages.push(path);
        }
    }
    Ok(pages)
}

/// All pages of one run, addressed by `PageId`.
#[derive(Debug, Default)]
pub struct PageStore {
    pages: Vec<Page>,
}

impl PageStore {
    pub fn push(&mut self, page: Page) -> PageId {
        self.pages.push(page);
        PageId::new(self.pages.len() - 1)
    }

    /// Ids are only handed out by `push`, so they are always in range.
    pub fn get(&self, id: PageId) -> &Page {
        &self.pages[id.index()]
    }

    pub fn get_mut(&mut self, id: PageId) -> &mut Page {
        &mut self.pages[id.index()]
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    /// Write every dirty page. Returns how many were written.
    pub fn flush(&mut self) -> Result<usize, BundleError> {
        let mut written = 0;
        for page in &mut self.pages {
            if page.flush()? {
                crate::debug!("bundle"; "wrote {}", page.path().display());
                written += 1;
            }
        }
        Ok(written)
    }
}
