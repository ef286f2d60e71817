//! Per-kind asset transforms.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Other assets pass
//! through untouched.

use std::path::{Path, PathBuf};

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, CompressOptionsUnused, Minifier as JsMinifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use thiserror::Error;

use super::AssetKind;

/// Transformed asset content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetContent {
    /// Minified script or stylesheet source.
    Text(String),
    /// Raw bytes of a passthrough asset.
    Binary(Vec<u8>),
}

impl AssetContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }
}

/// A minifier rejected an asset.
#[derive(Debug, Error)]
#[error("{kind} minification failed for `{}`: {message}", path.display())]
pub struct TransformError {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub message: String,
}

impl TransformError {
    fn new(kind: AssetKind, path: &Path, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Content transform applied once to every distinct asset.
///
/// `path` is the resolved source file and only labels diagnostics.
pub trait Transform {
    fn transform(
        &self,
        kind: AssetKind,
        source: Vec<u8>,
        path: &Path,
    ) -> Result<AssetContent, TransformError>;
}

/// Production transform: minify scripts and stylesheets, pass others through.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minifier;

impl Transform for Minifier {
    fn transform(
        &self,
        kind: AssetKind,
        source: Vec<u8>,
        path: &Path,
    ) -> Result<AssetContent, TransformError> {
        let minify: fn(&str, &Path) -> Result<String, String> = match kind {
            AssetKind::Script => minify_js,
            AssetKind::Stylesheet => minify_css,
            AssetKind::Other => return Ok(AssetContent::Binary(source)),
        };

        let source = String::from_utf8(source)
            .map_err(|e| TransformError::new(kind, path, format!("invalid UTF-8: {e}")))?;
        minify(&source, path)
            .map(AssetContent::Text)
            .map_err(|message| TransformError::new(kind, path, message))
    }
}

/// Minify JavaScript source code.
///
/// Parsed as a classic script: top-level declarations are globals other
/// scripts and inline handlers may use, so they are neither dropped nor
/// renamed.
pub fn minify_js(source: &str, _path: &Path) -> Result<String, String> {
    let allocator = Allocator::default();
    let source_type = SourceType::script();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        let messages: Vec<_> = ret.errors.iter().map(ToString::to_string).collect();
        return Err(messages.join("; "));
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions {
            top_level: Some(false),
            ..MangleOptions::default()
        }),
        compress: Some(CompressOptions {
            unused: CompressOptionsUnused::Keep,
            ..CompressOptions::smallest()
        }),
    };
    let ret = JsMinifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify CSS source code with structural optimizations enabled.
pub fn minify_css(source: &str, path: &Path) -> Result<String, String> {
    let options = ParserOptions {
        filename: path.display().to_string(),
        ..ParserOptions::default()
    };
    let mut stylesheet = StyleSheet::parse(source, options).map_err(|e| e.to_string())?;
    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| e.to_string())?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| e.to_string())?;
    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(kind: AssetKind, source: &[u8]) -> Result<AssetContent, TransformError> {
        Minifier.transform(kind, source.to_vec(), Path::new("assets/test"))
    }

    #[test]
    fn test_minify_js() {
        let source = "function f() {\n    // answer\n    return 1;\n}\n";
        let AssetContent::Text(code) = run(AssetKind::Script, source.as_bytes()).unwrap() else {
            panic!("script should produce text");
        };
        assert!(code.contains("function f()"));
        assert!(code.contains("return 1"));
        assert!(code.len() < source.len());
        assert!(!code.contains("answer"));
    }

    #[test]
    fn test_minify_js_keeps_globals() {
        let source = "var config = {a: 1};\nlet unused = 5;\nfunction helper(value) {\n    return value + config.a;\n}\n";
        let code = minify_js(source, Path::new("assets/globals.js")).unwrap();
        assert!(code.contains("config"));
        assert!(code.contains("unused"));
        assert!(code.contains("function helper("));
    }

    #[test]
    fn test_minify_js_mangles_locals() {
        let source = "function f() { var longLocalName = 1; return longLocalName; }";
        let code = minify_js(source, Path::new("assets/local.js")).unwrap();
        assert!(code.contains("function f("));
        assert!(!code.contains("longLocalName"));
    }

    #[test]
    fn test_minify_js_syntax_error() {
        let err = run(AssetKind::Script, b"function ( {").unwrap_err();
        assert_eq!(err.kind, AssetKind::Script);
        assert!(err.to_string().contains("assets/test"));
    }

    #[test]
    fn test_minify_css() {
        let source = "body {\n  color: #ff0000;\n  margin: 0px 0px 0px 0px;\n}\n";
        let AssetContent::Text(css) = run(AssetKind::Stylesheet, source.as_bytes()).unwrap() else {
            panic!("stylesheet should produce text");
        };
        assert!(css.len() < source.len());
        assert!(css.starts_with("body{"));
        assert!(!css.contains('\n'));
    }

    #[test]
    fn test_minify_css_error() {
        let err = run(AssetKind::Stylesheet, b"..broken { color: red }").unwrap_err();
        assert_eq!(err.kind, AssetKind::Stylesheet);
    }

    #[test]
    fn test_invalid_utf8() {
        let err = run(AssetKind::Script, &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(err.message.contains("UTF-8"));
    }

    #[test]
    fn test_other_passthrough() {
        let bytes = [0u8, 159, 146, 150, 10, 13];
        assert_eq!(
            run(AssetKind::Other, &bytes).unwrap(),
            AssetContent::Binary(bytes.to_vec())
        );
    }
}
