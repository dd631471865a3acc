//! Outline icons shipped with the crate, drawn as 24×24 stroked SVG.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PosterError, PosterResult};
use crate::render::cpu::MAX_RASTER_DIM;
use crate::render::tree::Icon;

fn icon_body(icon: Icon) -> &'static str {
    match icon {
        Icon::User => {
            r#"<path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2"/><circle cx="12" cy="7" r="4"/>"#
        }
        Icon::Globe => {
            r#"<circle cx="12" cy="12" r="10"/><path d="M12 2a14.5 14.5 0 0 0 0 20 14.5 14.5 0 0 0 0-20"/><path d="M2 12h20"/>"#
        }
        Icon::Instagram => {
            r#"<rect width="20" height="20" x="2" y="2" rx="5" ry="5"/><path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z"/><line x1="17.5" x2="17.51" y1="6.5" y2="6.5"/>"#
        }
        Icon::Phone => {
            r#"<path d="M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72 12.84 12.84 0 0 0 .7 2.81 2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45 12.84 12.84 0 0 0 2.81.7A2 2 0 0 1 22 16.92z"/>"#
        }
    }
}

/// Complete SVG document for `icon` stroked in `color`.
pub(crate) fn icon_svg(icon: Icon, color: Rgba8) -> String {
    let opaque = Rgba8 { a: 255, ..color };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="{}" stroke-opacity="{:.4}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">{}</svg>"#,
        opaque.to_css_hex(),
        f32::from(color.a) / 255.0,
        icon_body(icon),
    )
}

/// Rasterize `icon` into a `width`×`height` premultiplied RGBA8 buffer.
pub(crate) fn rasterize_icon(
    icon: Icon,
    color: Rgba8,
    width: u32,
    height: u32,
) -> PosterResult<Vec<u8>> {
    if width == 0 || height == 0 || width > MAX_RASTER_DIM || height > MAX_RASTER_DIM {
        return Err(PosterError::capture(format!(
            "icon raster size out of range: {width}x{height}"
        )));
    }
    let svg = icon_svg(icon, color);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())
        .map_err(|e| PosterError::capture(format!("parse icon svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PosterError::capture("failed to allocate icon pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/icons.rs"]
mod tests;
