use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{PosterError, PosterResult};
use crate::scene::brand::Brand;

/// Environment variable naming a default body font file.
pub const FONT_ENV_VAR: &str = "POSTERKIT_FONT";

/// Font files per text role. Missing roles fall back to `body`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Brush-style face for the headline.
    pub display: Option<PathBuf>,
    /// Sans face for names, titles and the footer.
    pub body: Option<PathBuf>,
    /// Script face for the greeting.
    pub script: Option<PathBuf>,
}

/// A poster described as JSON.
///
/// Relative paths are resolved against the directory holding the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosterConfig {
    /// Template id.
    pub template: Option<String>,
    /// Person's name.
    pub name: Option<String>,
    /// Person's title.
    pub designation: Option<String>,
    /// Photo file to upload.
    pub photo: Option<PathBuf>,
    /// Poster surface width in logical pixels (height follows a 3:4 aspect).
    pub width: Option<u32>,
    /// Font files.
    pub fonts: FontConfig,
    /// Logo image drawn in the top-left corner.
    pub logo: Option<PathBuf>,
    /// Fixed poster copy.
    pub brand: Brand,
}

impl PosterConfig {
    /// Load and parse a config file.
    pub fn from_path(path: &Path) -> PosterResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read poster config '{}'", path.display()))?;
        let mut cfg = Self::from_json(&text)?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(root);
        Ok(cfg)
    }

    /// Parse config JSON without touching the filesystem.
    pub fn from_json(text: &str) -> PosterResult<Self> {
        serde_json::from_str(text).map_err(|e| PosterError::serde(e.to_string()))
    }

    /// Fill the body font from [`FONT_ENV_VAR`] when the config does not name one.
    pub fn apply_env(&mut self) {
        if self.fonts.body.is_none()
            && let Some(v) = std::env::var_os(FONT_ENV_VAR)
            && !v.is_empty()
        {
            self.fonts.body = Some(PathBuf::from(v));
        }
    }

    /// Surface size implied by `width`.
    pub fn surface_size(&self) -> PosterResult<SurfaceSize> {
        match self.width {
            Some(w) => SurfaceSize::portrait_3x4(w),
            None => Ok(SurfaceSize::POSTER),
        }
    }

    fn resolve_paths(&mut self, root: &Path) {
        let join = |p: &mut Option<PathBuf>| {
            if let Some(path) = p.as_mut()
                && path.is_relative()
            {
                *path = root.join(&*path);
            }
        };
        join(&mut self.photo);
        join(&mut self.logo);
        join(&mut self.fonts.display);
        join(&mut self.fonts.body);
        join(&mut self.fonts.script);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
