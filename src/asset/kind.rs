//! Asset kind definitions.

use std::fmt;

/// Kind of asset referenced from HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// `<script src="...">`, minified as JavaScript.
    Script,
    /// `<link rel="stylesheet" href="...">`, minified as CSS.
    Stylesheet,
    /// Icons and other `<link href>` assets, published untouched.
    Other,
}

impl AssetKind {
    /// Every kind, in extraction order.
    pub const ALL: [Self; 3] = [Self::Script, Self::Stylesheet, Self::Other];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Stylesheet => "stylesheet",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of distinct assets per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub script: usize,
    pub stylesheet: usize,
    pub other: usize,
}

impl KindCounts {
    pub fn add(&mut self, kind: AssetKind) {
        match kind {
            AssetKind::Script => self.script += 1,
            AssetKind::Stylesheet => self.stylesheet += 1,
            AssetKind::Other => self.other += 1,
        }
    }

    pub const fn total(&self) -> usize {
        self.script + self.stylesheet + self.other
    }

    /// Counter table for `ProgressLine`.
    pub fn items(&self) -> [(&'static str, usize); 3] {
        [
            (AssetKind::Script.name(), self.script),
            (AssetKind::Stylesheet.name(), self.stylesheet),
            (AssetKind::Other.name(), self.other),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut counts = KindCounts::default();
        counts.add(AssetKind::Script);
        counts.add(AssetKind::Script);
        counts.add(AssetKind::Other);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.items(), [("script", 2), ("stylesheet", 0), ("other", 1)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(AssetKind::Stylesheet.to_string(), "stylesheet");
    }
}
