//! HTML documents held in memory for the duration of a run.
//!
//! Pages are loaded once, mutated in place by reference rewriting and the
//! SVG pass, and only written back when marked dirty.

mod rewrite;
mod store;

pub use rewrite::ReferenceRewriter;
pub use store::{PageStore, glob_pages};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BundleError;

/// Index of a page inside its `PageStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(usize);

impl PageId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// An HTML document identified by its file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    path: PathBuf,
    html: String,
    dirty: bool,
}

impl Page {
    pub fn new(path: impl Into<PathBuf>, html: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            html: html.into(),
            dirty: false,
        }
    }

    /// Read a page from disk.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, BundleError> {
        let path = path.into();
        let html = fs::read_to_string(&path).map_err(|source| BundleError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self::new(path, html))
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the content and mark the page dirty.
    pub fn set_html(&mut self, html: String) {
        self.html = html;
        self.dirty = true;
    }

    /// Write the page back if dirty. Returns whether it was written.
    pub fn flush(&mut self) -> Result<bool, BundleError> {
        if !self.dirty {
            return Ok(false);
        }
        fs::write(&self.path, &self.html).map_err(|source| BundleError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.dirty = false;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_page_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<p>hi</p>").unwrap();

        let mut page = Page::load(&path).unwrap();
        assert!(!page.is_dirty());
        // Removing the file proves flush does not touch disk
        fs::remove_file(&path).unwrap();
        assert!(!page.flush().unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_dirty_page_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<p>hi</p>").unwrap();

        let mut page = Page::load(&path).unwrap();
        page.set_html("<p>bye</p>".into());
        assert!(page.is_dirty());
        assert!(page.flush().unwrap());
        assert!(!page.is_dirty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>bye</p>");
    }

    #[test]
    fn test_load_missing() {
        let err = Page::load("/nonexistent/index.html").unwrap_err();
        assert!(matches!(err, BundleError::Io { .. }));
    }
}
