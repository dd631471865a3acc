use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use base64::Engine as _;

use crate::foundation::error::{PosterError, PosterResult};

/// An uploaded profile photo, kept as the original encoded bytes.
///
/// No size or dimension checks are applied: any payload whose content sniffs as an image format
/// is accepted as-is. Decoding happens later, when the poster surface is captured.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    mime: &'static str,
    bytes: Arc<[u8]>,
}

impl Photo {
    /// Accept an in-memory payload, sniffing its image format from the content.
    pub fn from_bytes(bytes: Vec<u8>) -> PosterResult<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| PosterError::file_read(format!("not an image: {e}")))?;
        Ok(Self {
            mime: format.to_mime_type(),
            bytes: Arc::from(bytes),
        })
    }

    /// Read a user-selected file in full.
    #[tracing::instrument]
    pub fn read(path: &Path) -> PosterResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read photo '{}'", path.display()))
            .map_err(|e| PosterError::file_read(format!("{e:#}")))?;
        let photo = Self::from_bytes(bytes)?;
        tracing::debug!(mime = photo.mime, len = photo.bytes.len(), "photo loaded");
        Ok(photo)
    }

    /// MIME type sniffed from the payload (always `image/*`).
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Raw encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:` URL suitable for inline embedding.
    pub fn data_url(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{b64}", self.mime)
    }
}

impl std::fmt::Debug for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Photo")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/photo.rs"]
mod tests;
