//! Substitution of old asset references with fingerprinted ones.

use regex::{Captures, Regex};

use super::Page;

/// Replaces every quoted occurrence of one reference string with another.
///
/// Only occurrences delimited by `"` or `'` on both sides are replaced, and
/// the delimiters are kept as found.
pub struct ReferenceRewriter {
    pattern: Regex,
    replacement: String,
}

impl ReferenceRewriter {
    pub fn new(old: &str, new: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r#"(["']){}(["'])"#, regex::escape(old)))?;
        Ok(Self {
            pattern,
            replacement: new.to_owned(),
        })
    }

    /// Rewrite `html`, returning the new text and the number of replacements.
    pub fn rewrite(&self, html: &str) -> (String, usize) {
        let mut count = 0;
        let rewritten = self.pattern.replace_all(html, |caps: &Captures| {
            count += 1;
            format!("{}{}{}", &caps[1], self.replacement, &caps[2])
        });
        (rewritten.into_owned(), count)
    }

    /// Rewrite a page in memory and mark it dirty.
    pub fn apply(&self, page: &mut Page) -> usize {
        let (html, count) = self.rewrite(page.html());
        page.set_html(html);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_quoted_occurrences() {
        let rewriter = ReferenceRewriter::new("/assets/app.js", "/assets/app.abc.js").unwrap();
        let html = r#"<script src="/assets/app.js"></script><script src='/assets/app.js'></script>"#;
        let (out, count) = rewriter.rewrite(html);
        assert_eq!(count, 2);
        assert_eq!(
            out,
            r#"<script src="/assets/app.abc.js"></script><script src='/assets/app.abc.js'></script>"#
        );
    }

    #[test]
    fn test_unquoted_and_partial_untouched() {
        let rewriter = ReferenceRewriter::new("/assets/app.js", "/assets/app.abc.js").unwrap();
        let html = r#"<p>/assets/app.js</p><script src="/assets/app.json"></script>"#;
        let (out, count) = rewriter.rewrite(html);
        assert_eq!(count, 0);
        assert_eq!(out, html);
    }

    #[test]
    fn test_regex_special_chars_escaped() {
        // `.` must not match arbitrary characters
        let rewriter = ReferenceRewriter::new("/a.js", "/a.x.js").unwrap();
        let (out, count) = rewriter.rewrite(r#"<script src="/aXjs"></script>"#);
        assert_eq!(count, 0);
        assert_eq!(out, r#"<script src="/aXjs"></script>"#);
    }

    #[test]
    fn test_idempotent() {
        let rewriter = ReferenceRewriter::new("/a.js", "/a.abc.js").unwrap();
        let (once, _) = rewriter.rewrite(r#"<script src="/a.js">"#);
        let (twice, count) = rewriter.rewrite(&once);
        assert_eq!(count, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_marks_dirty() {
        let rewriter = ReferenceRewriter::new("/a.css", "/a.abc.css").unwrap();
        let mut page = Page::new("index.html", r#"<link rel="stylesheet" href="/a.css">"#);
        assert_eq!(rewriter.apply(&mut page), 1);
        assert!(page.is_dirty());
        assert_eq!(page.html(), r#"<link rel="stylesheet" href="/a.abc.css">"#);
    }
}
