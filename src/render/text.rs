use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{PosterError, PosterResult};
use crate::render::tree::FontClass;
use crate::scene::config::FontConfig;

/// Appended to single-line text that had to be shortened.
pub const ELLIPSIS: char = '\u{2026}';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Raw font file plus the face index inside it.
#[derive(Clone, Debug)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    index: u32,
}

impl FontFace {
    /// Load a font file from disk (face 0).
    pub fn from_path(path: &Path) -> PosterResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(Self::from_bytes(bytes, 0))
    }

    /// Wrap in-memory font bytes.
    pub fn from_bytes(bytes: Vec<u8>, index: u32) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index,
        }
    }

    /// First sans-serif face known to the system font database.
    pub fn system_sans() -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        let query = usvg::fontdb::Query {
            families: &[usvg::fontdb::Family::SansSerif],
            ..Default::default()
        };
        let id = db.query(&query)?;
        db.with_face_data(id, |data, index| Self::from_bytes(data.to_vec(), index))
    }
}

/// Font faces per [`FontClass`]. Display and script fall back to body.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    display: Option<FontFace>,
    body: Option<FontFace>,
    script: Option<FontFace>,
}

impl FontBook {
    /// A book with no faces; text is skipped when rasterizing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Use one face for every class.
    pub fn single(face: FontFace) -> Self {
        Self {
            display: None,
            body: Some(face),
            script: None,
        }
    }

    /// Load the configured files. A missing body face is looked up in the system font database.
    pub fn load(cfg: &FontConfig) -> PosterResult<Self> {
        let load = |p: &Option<std::path::PathBuf>| -> PosterResult<Option<FontFace>> {
            p.as_deref().map(FontFace::from_path).transpose()
        };
        let mut book = Self {
            display: load(&cfg.display)?,
            body: load(&cfg.body)?,
            script: load(&cfg.script)?,
        };
        if book.body.is_none() {
            book.body = FontFace::system_sans();
            if book.body.is_none() {
                tracing::warn!("no body font configured and no system sans-serif face found");
            }
        }
        Ok(book)
    }

    /// Face used for `class`, after fallback.
    pub fn face(&self, class: FontClass) -> Option<&FontFace> {
        let own = match class {
            FontClass::Display => self.display.as_ref(),
            FontClass::Body => self.body.as_ref(),
            FontClass::Script => self.script.as_ref(),
        };
        own.or(self.body.as_ref())
    }

    /// `true` when no class resolves to a face.
    pub fn is_empty(&self) -> bool {
        self.face(FontClass::Body).is_none()
            && self.display.is_none()
            && self.script.is_none()
    }
}

/// A registered face: Parley family name plus the glyph source for `vello_cpu`.
#[derive(Clone)]
pub(crate) struct RegisteredFace {
    family: String,
    pub(crate) font: vello_cpu::peniko::FontData,
}

/// Stateful helper for building single-line Parley layouts.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    display: Option<RegisteredFace>,
    body: Option<RegisteredFace>,
    script: Option<RegisteredFace>,
}

impl TextLayoutEngine {
    /// Register every face of `book` with a fresh font context.
    pub(crate) fn new(book: &FontBook) -> PosterResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let mut register = |class: FontClass| -> PosterResult<Option<RegisteredFace>> {
            let Some(face) = book.face(class) else {
                return Ok(None);
            };
            let families = font_ctx.collection.register_fonts(
                parley::fontique::Blob::from(face.bytes.as_ref().clone()),
                None,
            );
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                PosterError::validation("no font families registered from font bytes")
            })?;
            let family = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| PosterError::validation("registered font family has no name"))?
                .to_string();
            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
                face.index,
            );
            Ok(Some(RegisteredFace { family, font }))
        };
        let display = register(FontClass::Display)?;
        let body = register(FontClass::Body)?;
        let script = register(FontClass::Script)?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            display,
            body,
            script,
        })
    }

    pub(crate) fn face(&self, class: FontClass) -> Option<&RegisteredFace> {
        match class {
            FontClass::Display => self.display.as_ref(),
            FontClass::Body => self.body.as_ref(),
            FontClass::Script => self.script.as_ref(),
        }
    }

    /// Shape `text` as one unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        class: FontClass,
        size_px: f32,
        letter_spacing: f32,
        brush: TextBrushRgba8,
    ) -> PosterResult<Option<parley::Layout<TextBrushRgba8>>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let Some(family) = self.face(class).map(|f| f.family.clone()) else {
            return Ok(None);
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(letter_spacing));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(Some(layout))
    }

    /// Advance width of `text` on one line, or `None` without a face.
    pub(crate) fn measure(
        &mut self,
        text: &str,
        class: FontClass,
        size_px: f32,
        letter_spacing: f32,
    ) -> PosterResult<Option<f32>> {
        Ok(self
            .layout_line(
                text,
                class,
                size_px,
                letter_spacing,
                TextBrushRgba8::default(),
            )?
            .map(|l| l.width()))
    }
}

/// Shorten `text` so that `measure` of the result fits `max_width`, ending it with an ellipsis.
///
/// Text that already fits is returned unchanged. The search runs over char boundaries, so
/// multi-byte text is never split mid-character.
pub fn ellipsize<E>(
    text: &str,
    max_width: f32,
    mut measure: impl FnMut(&str) -> Result<f32, E>,
) -> Result<Cow<'_, str>, E> {
    if measure(text)? <= max_width {
        return Ok(Cow::Borrowed(text));
    }
    let bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let with_ellipsis = |n: usize| {
        let mut s = text[..bounds.get(n).copied().unwrap_or(text.len())]
            .trim_end()
            .to_string();
        s.push(ELLIPSIS);
        s
    };

    // Largest prefix length `n` whose ellipsized form fits.
    let (mut lo, mut hi) = (0usize, bounds.len());
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        if measure(&with_ellipsis(mid))? <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(Cow::Owned(with_ellipsis(lo)))
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
