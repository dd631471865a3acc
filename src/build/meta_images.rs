//! Post-build rewrite of the Open Graph image URL in the HTML entry point.
//!
//! Bundlers emit the social preview image under a content-hashed name, while the HTML template
//! refers to it by its source name. This pass points the meta tag at the emitted file.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::foundation::error::{PosterError, PosterResult};

/// Attribute written in the HTML template.
pub const PLACEHOLDER_ATTR: &str = r#"content="/opengraph.jpg""#;
/// Substring identifying the emitted image.
pub const ASSET_MARKER: &str = "opengraph";
const ENTRY_HTML: &str = "index.html";
const UNHASHED_NAME: &str = "opengraph.jpg";

/// Outcome of [`patch_opengraph_meta`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetaPatch {
    /// `index.html` is not in the output directory.
    NoEntryHtml,
    /// No emitted file carries the marker.
    NoAsset,
    /// The entry HTML was rewritten.
    Patched {
        /// Asset URL now referenced, with a leading slash.
        url: String,
        /// Number of attributes replaced.
        replacements: usize,
    },
}

/// Point `content="/opengraph.jpg"` in `<dist>/index.html` at the emitted Open Graph image.
#[tracing::instrument(level = "info", fields(dist = %dist.display()))]
pub fn patch_opengraph_meta(dist: &Path) -> PosterResult<MetaPatch> {
    let index = dist.join(ENTRY_HTML);
    if !index.is_file() {
        tracing::debug!("no entry html; nothing to patch");
        return Ok(MetaPatch::NoEntryHtml);
    }
    let Some(asset) = find_opengraph_asset(dist)? else {
        tracing::debug!("no opengraph asset emitted");
        return Ok(MetaPatch::NoAsset);
    };

    let html = std::fs::read_to_string(&index)
        .map_err(|e| PosterError::build(format!("read '{}': {e}", index.display())))?;
    let url = format!("/{asset}");
    let replacements = html.matches(PLACEHOLDER_ATTR).count();
    let patched = html.replace(PLACEHOLDER_ATTR, &format!(r#"content="{url}""#));
    std::fs::write(&index, patched)
        .map_err(|e| PosterError::build(format!("write '{}': {e}", index.display())))?;

    tracing::info!(%url, replacements, "patched opengraph meta");
    Ok(MetaPatch::Patched { url, replacements })
}

/// Relative, forward-slash path of the emitted image. Hashed names win over the unhashed copy.
fn find_opengraph_asset(dist: &Path) -> PosterResult<Option<String>> {
    let mut found: Vec<(bool, String)> = Vec::new();
    for entry in WalkDir::new(dist).sort_by_file_name() {
        let entry = entry
            .map_err(|e| PosterError::build(format!("walk '{}': {e}", dist.display())))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.contains(ASSET_MARKER) {
            continue;
        }
        let rel: PathBuf = entry
            .path()
            .strip_prefix(dist)
            .map_err(|e| PosterError::build(format!("strip prefix: {e}")))?
            .to_path_buf();
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        found.push((name == UNHASHED_NAME, rel));
    }
    found.sort();
    Ok(found.into_iter().next().map(|(_, rel)| rel))
}

#[cfg(test)]
#[path = "../../tests/unit/build/meta_images.rs"]
mod tests;
