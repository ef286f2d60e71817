//! Publishing transformed assets under their fingerprinted names.
//!
//! After a successful publish the asset only exists at its new path. Nothing
//! is rolled back across assets: those published before a later failure stay
//! published.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use super::AssetKind;
use super::aggregate::{Fingerprint, TransformedAsset};
use crate::error::BundleError;

/// Write (or rename) `asset` to its fingerprinted path and remove the original.
///
/// `gzip` is the compression level, `None` when compression is disabled. The
/// digest is always taken over the uncompressed content.
pub fn publish(asset: &TransformedAsset, gzip: Option<u32>) -> Result<Fingerprint, BundleError> {
    let fingerprint = asset.fingerprint();
    let output = fingerprint.output.as_path();
    let failed = |path: &Path| {
        let kind = asset.key.kind;
        let reference = asset.key.reference.clone();
        let path = path.to_path_buf();
        move |source: io::Error| BundleError::Publish {
            kind,
            reference,
            path,
            source,
        }
    };

    match (asset.key.kind, gzip) {
        (_, Some(level)) => {
            let compressed = compress(asset.content.as_bytes(), level).map_err(failed(output))?;
            fs::write(output, compressed).map_err(failed(output))?;
            fs::remove_file(&asset.source).map_err(failed(&asset.source))?;
        }
        (AssetKind::Script | AssetKind::Stylesheet, None) => {
            fs::write(output, asset.content.as_bytes()).map_err(failed(output))?;
            fs::remove_file(&asset.source).map_err(failed(&asset.source))?;
        }
        // Content is the untouched source, so the file is moved as is
        (AssetKind::Other, None) => {
            fs::rename(&asset.source, output).map_err(failed(&asset.source))?;
        }
    }

    Ok(fingerprint)
}

/// Gzip `data` at `level` (1-9).
pub fn compress(data: &[u8], level: u32) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::aggregate::AssetKey;
    use crate::asset::minify::AssetContent;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    fn asset(dir: &Path, name: &str, kind: AssetKind, content: AssetContent) -> TransformedAsset {
        TransformedAsset {
            key: AssetKey {
                kind,
                reference: format!("/assets/{name}"),
            },
            source: dir.join(name),
            content,
            pages: Vec::new(),
        }
    }

    #[test]
    fn test_publish_text_writes_and_deletes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "function f() { return 1; }").unwrap();
        let asset = asset(
            dir.path(),
            "app.js",
            AssetKind::Script,
            AssetContent::Text("function f(){return 1}".into()),
        );

        let fingerprint = publish(&asset, None).unwrap();

        assert!(!dir.path().join("app.js").exists());
        assert_eq!(
            fs::read_to_string(&fingerprint.output).unwrap(),
            "function f(){return 1}"
        );
        assert_eq!(
            fingerprint.reference,
            format!("/assets/app.{}.js", fingerprint.digest)
        );
    }

    #[test]
    fn test_publish_other_renames_untouched() {
        let dir = TempDir::new().unwrap();
        let bytes = vec![0u8, 1, 2, 255, 254, b'\n', b'\r'];
        fs::write(dir.path().join("favicon.ico"), &bytes).unwrap();
        let asset = asset(
            dir.path(),
            "favicon.ico",
            AssetKind::Other,
            AssetContent::Binary(bytes.clone()),
        );

        let fingerprint = publish(&asset, None).unwrap();

        assert!(!dir.path().join("favicon.ico").exists());
        assert_eq!(fs::read(&fingerprint.output).unwrap(), bytes);
        assert!(
            fingerprint
                .output
                .to_str()
                .unwrap()
                .ends_with(&format!("favicon.{}.ico", fingerprint.digest))
        );
    }

    #[test]
    fn test_publish_gzip_hashes_uncompressed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site.css"), "a { color: red }").unwrap();
        fs::write(dir.path().join("logo.ico"), "icon").unwrap();
        let css = asset(
            dir.path(),
            "site.css",
            AssetKind::Stylesheet,
            AssetContent::Text("a{color:red}".into()),
        );
        let icon = asset(
            dir.path(),
            "logo.ico",
            AssetKind::Other,
            AssetContent::Binary(b"icon".to_vec()),
        );

        for (asset, plain) in [(&css, "a{color:red}"), (&icon, "icon")] {
            let fingerprint = publish(asset, Some(9)).unwrap();
            assert!(!asset.source.exists());
            assert_eq!(fingerprint.digest, crate::utils::hash::digest(plain));

            let mut decoded = String::new();
            GzDecoder::new(fs::File::open(&fingerprint.output).unwrap())
                .read_to_string(&mut decoded)
                .unwrap();
            assert_eq!(decoded, plain);
        }
    }

    #[test]
    fn test_publish_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let asset = asset(
            dir.path(),
            "gone.ico",
            AssetKind::Other,
            AssetContent::Binary(Vec::new()),
        );
        let err = publish(&asset, None).unwrap_err();
        let expected = dir.path().join("gone.ico");
        assert!(matches!(err, BundleError::Publish { ref path, .. } if *path == expected));
    }

    #[test]
    fn test_compress_roundtrip() {
        let data = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        let compressed = compress(data, 6).unwrap();
        assert!(compressed.len() < data.len());
        let mut decoded = Vec::new();
        GzDecoder::new(&compressed[..]).read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, data);
    }
}
