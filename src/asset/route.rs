//! Path mapping between HTML references, source files and fingerprinted names.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use super::AssetError;

/// Resolve a reference string to its source file under `asset_dir`.
///
/// A leading `/` and then one leading segment equal to the asset directory's
/// own name are stripped: with `asset_dir = public/assets`, the reference
/// `/assets/app.js` resolves to `public/assets/app.js`.
pub fn resolve_source(asset_dir: &Path, reference: &str) -> Result<PathBuf, AssetError> {
    let trimmed = reference.strip_prefix('/').unwrap_or(reference);
    let base = asset_dir.file_name().and_then(|name| name.to_str());

    let relative = match (base, trimmed.split_once('/')) {
        (Some(base), Some((first, rest))) if first == base => rest,
        _ => trimmed,
    };

    let relative = Path::new(relative);
    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return Err(AssetError::Escapes(relative.to_path_buf()));
    }

    Ok(asset_dir.join(relative))
}

/// Insert `.{digest}` before the file extension (or append it if there is none).
///
/// `assets/app.js` → `assets/app.{digest}.js`, `assets/LICENSE` → `assets/LICENSE.{digest}`.
pub fn fingerprint_path(path: &Path, digest: &str) -> PathBuf {
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => {
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(digest);
            name.push(".");
            name.push(ext);
            path.with_file_name(name)
        }
        _ => {
            let mut name = OsString::from(path.as_os_str());
            name.push(".");
            name.push(digest);
            PathBuf::from(name)
        }
    }
}

/// Same naming rule as [`fingerprint_path`], applied to the reference string
/// as it appears in HTML.
pub fn fingerprint_reference(reference: &str, digest: &str) -> String {
    let name_start = reference.rfind('/').map_or(0, |i| i + 1);
    let name = &reference[name_start..];
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!(
            "{}.{}{}",
            &reference[..name_start + dot],
            digest,
            &name[dot..]
        ),
        _ => format!("{reference}.{digest}"),
    }
}
