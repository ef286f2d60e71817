//! Reference extraction from HTML text (pure functions).
//!
//! Only local paths are matched: the reference character class has no `:`,
//! so `https://...` and other scheme URLs never match. Protocol-relative
//! `//host/...` references are skipped explicitly.

use std::sync::LazyLock;

use regex::Regex;

use super::AssetKind;

static SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script\b[^>]*?\ssrc=["']([A-Za-z0-9_/.-]+)["']"#).unwrap()
});

// Two alternatives for rel-before-href and href-before-rel.
static STYLESHEET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)<link\b[^>]*?(?:"#,
        r#"\srel=["']?stylesheet["']?[^>]*?\shref=["']([A-Za-z0-9_/.-]+)["']"#,
        r#"|\shref=["']([A-Za-z0-9_/.-]+)["'][^>]*?\srel=["']?stylesheet["']?"#,
        r#")"#,
    ))
    .unwrap()
});

static ICON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link\b[^>]*?\shref=["']([A-Za-z0-9_/.-]+\.ico)["']"#).unwrap()
});

impl AssetKind {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Script => &SCRIPT,
            Self::Stylesheet => &STYLESHEET,
            Self::Other => &ICON,
        }
    }
}

/// Iterate the references of `kind` in `html`, in document order.
///
/// Duplicates are yielded every time they occur. Call again to restart.
pub fn scan_references(kind: AssetKind, html: &str) -> impl Iterator<Item = &str> {
    kind.pattern()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
        .filter(|reference| !reference.starts_with("//"))
}
