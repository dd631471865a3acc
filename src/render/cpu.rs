//! CPU rasterization of a [`VisualTree`].
//!
//! The background stack is painted procedurally into a premultiplied RGBA8 buffer, layer by
//! layer. Blurred text shadows are composited onto it next, and the content block is drawn on
//! top with `vello_cpu`.

use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::assets::decode::{PreparedImage, decode_image, flatten_to_white};
use crate::assets::icons::rasterize_icon;
use crate::catalog::{
    Anchor, BackgroundLayer, BlendMode, ColorStop, Fill, GradientDirection, TextShadow,
    TextureKind,
};
use crate::foundation::core::{Affine, Rect, Rgba8, SurfaceSize};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::{hash_unit, mul_div255_u8};
use crate::render::surface::FrameRGBA;
use crate::render::text::{FontBook, TextBrushRgba8, TextLayoutEngine, ellipsize};
use crate::render::tree::{
    AvatarFill, AvatarNode, Background, IconNode, LogoNode, Node, Overflow, Sparkle, TextAlign,
    TextNode, VisualTree,
};

/// Largest output side, in pixels, the rasterizer accepts.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Software rasterizer for poster trees.
pub struct CpuRasterizer {
    text: TextLayoutEngine,
    ctx: Option<vello_cpu::RenderContext>,
}

/// A text node shaped at output resolution, with its pixel-space origin.
struct ShapedLine {
    layout: parley::Layout<TextBrushRgba8>,
    font: vello_cpu::peniko::FontData,
    origin_x: f64,
    origin_y: f64,
    color: Rgba8,
}

impl CpuRasterizer {
    /// Rasterizer drawing text with the faces of `fonts`.
    pub fn new(fonts: &FontBook) -> PosterResult<Self> {
        if fonts.is_empty() {
            tracing::warn!("rasterizer has no fonts; text will be skipped");
        }
        Ok(Self {
            text: TextLayoutEngine::new(fonts)?,
            ctx: None,
        })
    }

    /// Paint `tree` at `scale` device pixels per logical pixel.
    ///
    /// The frame is exactly `tree.size * scale` and premultiplied.
    #[tracing::instrument(level = "debug", skip(self, tree), fields(template = tree.template_id))]
    pub fn rasterize(&mut self, tree: &VisualTree, scale: u32) -> PosterResult<FrameRGBA> {
        if scale == 0 {
            return Err(PosterError::capture("raster scale must be > 0"));
        }
        let px = tree.size.scaled(scale)?;
        if px.width > MAX_RASTER_DIM || px.height > MAX_RASTER_DIM {
            return Err(PosterError::capture(format!(
                "raster size {}x{} exceeds the {MAX_RASTER_DIM}px limit",
                px.width, px.height
            )));
        }
        let k = f64::from(scale);

        let mut buf = paint_background(&tree.background, px, k)?;

        let mut shaped = Vec::with_capacity(tree.content.len());
        for node in &tree.content {
            shaped.push(match node {
                Node::Text(t) => self.shape_text(t, k)?,
                _ => None,
            });
        }

        for (node, line) in tree.content.iter().zip(&shaped) {
            if let (Node::Text(TextNode {
                shadow: Some(shadow),
                ..
            }), Some(line)) = (node, line)
            {
                draw_shadow(&mut buf, px, line, shadow, k)?;
            }
        }

        let w: u16 = px
            .width
            .try_into()
            .map_err(|_| PosterError::capture("raster width exceeds u16"))?;
        let h: u16 = px
            .height
            .try_into()
            .map_err(|_| PosterError::capture("raster height exceeds u16"))?;
        let content = self.with_ctx_mut(w, h, |_, ctx| {
            for s in &tree.decorations {
                draw_sparkle(ctx, s, k);
            }
            for (node, line) in tree.content.iter().zip(&shaped) {
                draw_node(ctx, node, line.as_ref(), k)?;
            }
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap)
        })?;
        layer_over(&mut buf, content.data_as_u8_slice(), 1.0)?;

        Ok(FrameRGBA {
            width: px.width,
            height: px.height,
            data: buf,
            premultiplied: true,
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PosterResult<R>,
    ) -> PosterResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn shape_text(&mut self, node: &TextNode, k: f64) -> PosterResult<Option<ShapedLine>> {
        let Some(font) = self.text.face(node.font).map(|f| f.font.clone()) else {
            tracing::warn!(role = ?node.role, "no font for text node; skipping");
            return Ok(None);
        };
        let size = (node.size * k) as f32;
        let spacing = (node.letter_spacing * k) as f32;
        let box_w = node.rect.width() * k;

        let text = match node.overflow {
            Overflow::Visible => std::borrow::Cow::Borrowed(node.text.as_str()),
            Overflow::Ellipsis => {
                let class = node.font;
                ellipsize(&node.text, box_w as f32, |s| {
                    self.text
                        .measure(s, class, size, spacing)
                        .map(|m| m.unwrap_or(0.0))
                })?
            }
        };

        let brush = TextBrushRgba8 {
            r: node.color.r,
            g: node.color.g,
            b: node.color.b,
            a: node.color.a,
        };
        let Some(layout) = self
            .text
            .layout_line(&text, node.font, size, spacing, brush)?
        else {
            return Ok(None);
        };

        let line_w = f64::from(layout.width());
        let line_h = f64::from(layout.height());
        let origin_x = match node.align {
            TextAlign::Start => node.rect.x0 * k,
            TextAlign::Center => node.rect.x0 * k + (box_w - line_w) / 2.0,
        };
        let origin_y = node.rect.y0 * k + (node.rect.height() * k - line_h) / 2.0;

        Ok(Some(ShapedLine {
            layout,
            font,
            origin_x,
            origin_y,
            color: node.color,
        }))
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn circle_path(cx: f64, cy: f64, r: f64) -> vello_cpu::kurbo::BezPath {
    vello_cpu::kurbo::Circle::new((cx, cy), r).to_path(0.1)
}

fn draw_sparkle(ctx: &mut vello_cpu::RenderContext, s: &Sparkle, k: f64) {
    ctx.set_transform(affine_to_cpu(Affine::scale(k)));
    ctx.set_paint(cpu_color(s.color));
    ctx.fill_path(&circle_path(s.center.x, s.center.y, s.radius));
}

fn draw_node(
    ctx: &mut vello_cpu::RenderContext,
    node: &Node,
    line: Option<&ShapedLine>,
    k: f64,
) -> PosterResult<()> {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    match node {
        Node::Rect { rect, color } => {
            ctx.set_transform(affine_to_cpu(Affine::scale(k)));
            ctx.set_paint(cpu_color(*color));
            ctx.fill_rect(&rect_to_cpu(*rect));
            Ok(())
        }
        Node::Logo(logo) => draw_logo(ctx, logo, k),
        Node::Avatar(avatar) => draw_avatar(ctx, avatar, k),
        Node::Icon(icon) => draw_icon(ctx, icon, k),
        Node::Text(_) => {
            if let Some(line) = line {
                draw_line(ctx, line);
            }
            Ok(())
        }
    }
}

fn draw_line(ctx: &mut vello_cpu::RenderContext, line: &ShapedLine) {
    ctx.set_transform(affine_to_cpu(Affine::translate((
        line.origin_x,
        line.origin_y,
    ))));
    ctx.set_paint(cpu_color(line.color));
    for row in line.layout.lines() {
        for item in row.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&line.font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn image_paint(img: &PreparedImage) -> PosterResult<vello_cpu::Image> {
    rgba_premul_to_image(&img.rgba8_premul, img.width, img.height)
}

fn draw_logo(ctx: &mut vello_cpu::RenderContext, logo: &LogoNode, k: f64) -> PosterResult<()> {
    let decoded = decode_image(&logo.image)
        .map_err(|e| PosterError::capture(format!("decode logo: {e}")))?;
    let img = if logo.tint_white {
        flatten_to_white(&decoded)
    } else {
        decoded
    };
    if img.width == 0 || img.height == 0 {
        return Ok(());
    }
    let (iw, ih) = (f64::from(img.width), f64::from(img.height));
    let fit = (logo.rect.width() / iw).min(logo.rect.height() / ih);
    let x = logo.rect.x0 + (logo.rect.width() - iw * fit) / 2.0;
    let y = logo.rect.y0 + (logo.rect.height() - ih * fit) / 2.0;

    ctx.set_transform(affine_to_cpu(
        Affine::scale(k) * Affine::translate((x, y)) * Affine::scale(fit),
    ));
    ctx.set_paint(image_paint(&img)?);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
    Ok(())
}

fn draw_avatar(
    ctx: &mut vello_cpu::RenderContext,
    avatar: &AvatarNode,
    k: f64,
) -> PosterResult<()> {
    let c = avatar.rect.center();
    let outer = avatar.rect.width().min(avatar.rect.height()) / 2.0;
    let inner = (outer - avatar.border_width).max(0.0);

    match &avatar.fill {
        AvatarFill::Photo(photo) => {
            let img = decode_image(photo.bytes())
                .map_err(|e| PosterError::capture(format!("decode photo: {e}")))?;
            if img.width > 0 && img.height > 0 && inner > 0.0 {
                // Cover: scale the shorter side to the diameter, center the overflow.
                let (iw, ih) = (f64::from(img.width), f64::from(img.height));
                let d = inner * 2.0;
                let cover = (d / iw).max(d / ih);
                let ox = c.x - iw * cover / 2.0;
                let oy = c.y - ih * cover / 2.0;
                ctx.set_transform(affine_to_cpu(
                    Affine::scale(k) * Affine::translate((ox, oy)) * Affine::scale(cover),
                ));
                ctx.set_paint(image_paint(&img)?);
                ctx.fill_path(&circle_path(
                    (c.x - ox) / cover,
                    (c.y - oy) / cover,
                    inner / cover,
                ));
            }
        }
        AvatarFill::Placeholder {
            fill,
            glyph,
            glyph_rect,
        } => {
            ctx.set_transform(affine_to_cpu(Affine::scale(k)));
            ctx.set_paint(cpu_color(*fill));
            ctx.fill_path(&circle_path(c.x, c.y, inner));
            draw_icon(
                ctx,
                &IconNode {
                    icon: crate::render::tree::Icon::User,
                    rect: *glyph_rect,
                    color: *glyph,
                },
                k,
            )?;
        }
    }

    if avatar.border_width > 0.0 {
        ctx.set_transform(affine_to_cpu(Affine::scale(k)));
        ctx.set_paint(cpu_color(avatar.border));
        let ring = vello_cpu::kurbo::CircleSegment::new(
            (c.x, c.y),
            outer,
            inner,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill_path(&ring.to_path(0.1));
    }
    Ok(())
}

fn draw_icon(ctx: &mut vello_cpu::RenderContext, icon: &IconNode, k: f64) -> PosterResult<()> {
    let w = (icon.rect.width() * k).round().max(1.0) as u32;
    let h = (icon.rect.height() * k).round().max(1.0) as u32;
    let bytes = rasterize_icon(icon.icon, icon.color, w, h)?;
    ctx.set_transform(affine_to_cpu(Affine::translate((
        (icon.rect.x0 * k).round(),
        (icon.rect.y0 * k).round(),
    ))));
    ctx.set_paint(rgba_premul_to_image(&bytes, w, h)?);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(w),
        f64::from(h),
    ));
    Ok(())
}

/// Render `line` in the shadow color into a padded local pixmap, blur it and composite it.
fn draw_shadow(
    buf: &mut [u8],
    px: SurfaceSize,
    line: &ShapedLine,
    shadow: &TextShadow,
    k: f64,
) -> PosterResult<()> {
    let blur = (shadow.blur * k).max(0.0);
    // CSS blur radius is twice the gaussian sigma.
    let sigma = (blur / 2.0) as f32;
    let radius = (sigma * 3.0).ceil() as u32;
    let pad = radius as f64 + 1.0;

    let x0 = (line.origin_x - pad).floor();
    let y0 = (line.origin_y + shadow.offset_y * k - pad).floor();
    let lw = (f64::from(line.layout.width()) + pad * 2.0).ceil().max(1.0) as u32;
    let lh = (f64::from(line.layout.height()) + pad * 2.0).ceil().max(1.0) as u32;
    let (w, h): (u16, u16) = match (lw.try_into(), lh.try_into()) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(PosterError::capture("text shadow region exceeds u16")),
    };

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    let local = ShapedLine {
        layout: line.layout.clone(),
        font: line.font.clone(),
        origin_x: line.origin_x - x0,
        origin_y: line.origin_y + shadow.offset_y * k - y0,
        color: shadow.color,
    };
    draw_line(&mut ctx, &local);
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let kernel = shadow_kernel_q16(radius, sigma)?;
    let blurred = blur_shadow_tile(pixmap.data_as_u8_slice(), lw, lh, &kernel);

    composite_region_over(buf, px, &blurred, lw, lh, x0 as i64, y0 as i64);
    Ok(())
}

/// Source-over `src` (a `sw`x`sh` premultiplied tile) onto `dst` at `(x, y)`, clipped.
fn composite_region_over(
    dst: &mut [u8],
    px: SurfaceSize,
    src: &[u8],
    sw: u32,
    sh: u32,
    x: i64,
    y: i64,
) {
    let dw = i64::from(px.width);
    let dh = i64::from(px.height);
    for sy in 0..i64::from(sh) {
        let ty = y + sy;
        if ty < 0 || ty >= dh {
            continue;
        }
        for sx in 0..i64::from(sw) {
            let tx = x + sx;
            if tx < 0 || tx >= dw {
                continue;
            }
            let si = ((sy * i64::from(sw) + sx) * 4) as usize;
            let di = ((ty * dw + tx) * 4) as usize;
            let s = &src[si..si + 4];
            let sa = u16::from(s[3]);
            if sa == 0 {
                continue;
            }
            let inv = 255 - sa;
            let d = &mut dst[di..di + 4];
            for c in 0..4 {
                d[c] = s[c].saturating_add(mul_div255_u8(u16::from(d[c]), inv));
            }
        }
    }
}

/// Paint the base and every layer into a fresh premultiplied buffer.
fn paint_background(bg: &Background, px: SurfaceSize, k: f64) -> PosterResult<Vec<u8>> {
    let n = (px.width as usize)
        .saturating_mul(px.height as usize)
        .saturating_mul(4);
    let base = bg.base.premul().to_array();
    let mut buf = Vec::with_capacity(n);
    for _ in 0..(n / 4) {
        buf.extend_from_slice(&base);
    }

    let mut layer_buf = vec![0u8; n];
    for layer in &bg.layers {
        paint_layer(&mut layer_buf, layer, px, k);
        match layer.blend {
            BlendMode::Normal => layer_over(&mut buf, &layer_buf, layer.opacity)?,
            BlendMode::Overlay => {
                composite_over_rgba8_premul_blend(&mut buf, &layer_buf, layer.opacity, overlay)?
            }
        }
    }
    Ok(buf)
}

fn overlay(s: f32, d: f32) -> f32 {
    if d <= 0.5 {
        2.0 * s * d
    } else {
        1.0 - 2.0 * (1.0 - s) * (1.0 - d)
    }
}

fn paint_layer(out: &mut [u8], layer: &BackgroundLayer, px: SurfaceSize, k: f64) {
    let w = f64::from(px.width);
    let h = f64::from(px.height);
    let width = px.width as usize;
    for (i, dst) in out.chunks_exact_mut(4).enumerate() {
        let x = (i % width) as f64 + 0.5;
        let y = (i / width) as f64 + 0.5;
        let c = match layer.fill {
            Fill::Linear { direction, stops } => {
                let t = match direction {
                    GradientDirection::ToTopRight => x / (2.0 * w) + (h - y) / (2.0 * h),
                    GradientDirection::ToBottomRight => x / (2.0 * w) + y / (2.0 * h),
                };
                sample_stops(stops, t as f32)
            }
            Fill::Radial {
                anchor,
                color,
                extent,
            } => {
                let (cx, cy) = match anchor {
                    Anchor::TopRight => (w, 0.0),
                    Anchor::BottomLeft => (0.0, h),
                };
                let reach = (w * w + h * h).sqrt() * f64::from(extent);
                let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                let fade = if reach > 0.0 {
                    (1.0 - d / reach).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                scale_premul(color.premul().to_array(), fade as f32)
            }
            Fill::DotGrid {
                color,
                dot_radius,
                spacing,
            } => {
                let tile = (spacing * k).max(1.0);
                let r = dot_radius * k;
                let lx = x.rem_euclid(tile);
                let ly = y.rem_euclid(tile);
                // Nearest tile origin, including the ones to the right and below.
                let dx = lx.min(tile - lx);
                let dy = ly.min(tile - ly);
                let d = (dx * dx + dy * dy).sqrt();
                scale_premul(color.premul().to_array(), coverage(r, d))
            }
            Fill::Texture(kind) => {
                let v = texture_value(kind, x, y, k);
                [v, v, v, 255]
            }
            Fill::CornerDisc { color, radius } => {
                let d = ((x - w).powi(2) + y * y).sqrt();
                scale_premul(color.premul().to_array(), coverage(radius * k, d))
            }
        };
        dst.copy_from_slice(&c);
    }
}

/// Anti-aliased coverage of a disc of radius `r` at distance `d` from its center.
fn coverage(r: f64, d: f64) -> f32 {
    (r - d + 0.5).clamp(0.0, 1.0) as f32
}

fn scale_premul(c: [u8; 4], f: f32) -> [u8; 4] {
    let f = f.clamp(0.0, 1.0);
    c.map(|v| (f32::from(v) * f).round() as u8)
}

fn sample_stops(stops: &[ColorStop], t: f32) -> [u8; 4] {
    let Some(first) = stops.first() else {
        return [0; 4];
    };
    let t = t.clamp(0.0, 1.0);
    if t <= first.offset {
        return first.color.premul().to_array();
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            let u = (t - a.offset) / span;
            let ca = a.color.premul().to_array();
            let cb = b.color.premul().to_array();
            let mut out = [0u8; 4];
            for c in 0..4 {
                let (fa, fb) = (f32::from(ca[c]), f32::from(cb[c]));
                out[c] = (fa + (fb - fa) * u).round().clamp(0.0, 255.0) as u8;
            }
            return out;
        }
    }
    stops
        .last()
        .map(|s| s.color.premul().to_array())
        .unwrap_or([0; 4])
}

/// Smoothly interpolated lattice noise in `[0, 1)`.
fn value_noise(seed: u64, x: f64, y: f64) -> f64 {
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);
    let (ix, iy) = (x0 as u32, y0 as u32);
    let smooth = |t: f64| t * t * (3.0 - 2.0 * t);
    let (sx, sy) = (smooth(fx), smooth(fy));
    let a = hash_unit(seed, ix, iy);
    let b = hash_unit(seed, ix.wrapping_add(1), iy);
    let c = hash_unit(seed, ix, iy.wrapping_add(1));
    let d = hash_unit(seed, ix.wrapping_add(1), iy.wrapping_add(1));
    let top = a + (b - a) * sx;
    let bottom = c + (d - c) * sx;
    top + (bottom - top) * sy
}

fn texture_value(kind: TextureKind, x: f64, y: f64, k: f64) -> u8 {
    let seed = kind.seed();
    let v = match kind {
        TextureKind::CarbonFibre => {
            let cell = 4.0 * k;
            let (cx, cy) = ((x / cell).floor(), (y / cell).floor());
            let woven = (cx + cy).rem_euclid(2.0) < 1.0;
            let along = if woven { x } else { y };
            let ramp = along.rem_euclid(cell) / cell;
            let grain = hash_unit(seed, cx as u32, cy as u32);
            let base = if woven { 70.0 } else { 35.0 };
            base + ramp * 60.0 + grain * 20.0
        }
        TextureKind::ConcreteWall => {
            let cell = 2.0 * k;
            let speck = hash_unit(seed, (x / cell) as u32, (y / cell) as u32);
            let mottle = value_noise(seed ^ 0x5a5a, x / (32.0 * k), y / (32.0 * k));
            70.0 + speck * 90.0 + mottle * 60.0
        }
        TextureKind::CloudyDay => {
            let broad = value_noise(seed, x / (64.0 * k), y / (64.0 * k));
            let fine = value_noise(seed ^ 0x77, x / (16.0 * k), y / (16.0 * k));
            128.0 + (broad - 0.5) * 180.0 + (fine - 0.5) * 60.0
        }
        TextureKind::Leaf => {
            let n = value_noise(seed, x / (18.0 * k), y / (18.0 * k));
            if n > 0.62 { 60.0 } else { 150.0 + n * 80.0 }
        }
    };
    v.round().clamp(0.0, 255.0) as u8
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PosterResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PosterError::capture("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PosterError::capture("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PosterError::capture("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> PosterResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Fixed-point gaussian weights (sum 65536) for a text shadow of the given sigma.
fn shadow_kernel_q16(radius: u32, sigma: f32) -> PosterResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PosterError::validation("shadow blur must be finite and > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma).powi(2);
    let raw: Vec<f64> = (-r..=r).map(|i| (-f64::from(i * i) / denom).exp()).collect();
    let sum: f64 = raw.iter().sum();
    let mut weights: Vec<u32> = raw
        .iter()
        .map(|w| ((w / sum) * 65536.0).round() as u32)
        .collect();
    // Rounding drift goes to the centre tap.
    let total: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + 65536 - total).clamp(0, 65536) as u32;
    Ok(weights)
}

/// Blur a premultiplied `width`x`height` shadow tile with a separable kernel.
fn blur_shadow_tile(tile: &[u8], width: u32, height: u32, kernel: &[u32]) -> Vec<u8> {
    if kernel.len() == 1 {
        return tile.to_vec();
    }
    let mut across = vec![0u8; tile.len()];
    let mut out = vec![0u8; tile.len()];
    blur_pass(tile, &mut across, width, height, kernel, (1, 0));
    blur_pass(&across, &mut out, width, height, kernel, (0, 1));
    out
}

/// One 1-D pass along `step`; samples past the tile edge clamp to it.
fn blur_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, kernel: &[u32], step: (i32, i32)) {
    let (w, h) = (width as i32, height as i32);
    let radius = (kernel.len() / 2) as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (i, &kw) in kernel.iter().enumerate() {
                let t = i as i32 - radius;
                let sx = (x + t * step.0).clamp(0, w - 1);
                let sy = (y + t * step.1).clamp(0, h - 1);
                let si = ((sy * w + sx) * 4) as usize;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[si + c]);
                }
            }
            let di = ((y * w + x) * 4) as usize;
            for c in 0..4 {
                dst[di + c] = ((acc[c] + 32768) >> 16).min(255) as u8;
            }
        }
    }
}

/// Normal-blend a full-surface background or content layer onto `dst` at `opacity`.
fn layer_over(dst: &mut [u8], src: &[u8], opacity: f32) -> PosterResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PosterError::capture("layer and surface buffers differ in size"));
    }
    let op = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    if op == 0 {
        return Ok(());
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = mul_div255_u8(u16::from(s[3]), op);
        if sa == 0 {
            continue;
        }
        let inv = 255 - u16::from(sa);
        d[3] = sa.saturating_add(mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let sc = mul_div255_u8(u16::from(s[c]), op);
            d[c] = sc.saturating_add(mul_div255_u8(u16::from(d[c]), inv));
        }
    }
    Ok(())
}

fn composite_over_rgba8_premul_blend<F>(
    dst: &mut [u8],
    src: &[u8],
    opacity: f32,
    blend_fn: F,
) -> PosterResult<()>
where
    F: Fn(f32, f32) -> f32,
{
    if dst.len() != src.len() {
        return Err(PosterError::capture(
            "blend composite expects equal-length rgba8 buffers",
        ));
    }
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return Ok(());
    }

    let unpremul = |p: f32, a: f32| if a > 0.0 { (p / a).clamp(0.0, 1.0) } else { 0.0 };
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        // Source-over with the blend applied to unpremultiplied channels:
        // out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da
        let sa = (f32::from(s[3]) / 255.0) * opacity;
        let da = f32::from(d[3]) / 255.0;
        for c in 0..3 {
            let sp = (f32::from(s[c]) / 255.0) * opacity;
            let dp = f32::from(d[c]) / 255.0;
            let b = blend_fn(unpremul(sp, sa), unpremul(dp, da)).clamp(0.0, 1.0);
            let out = (sp * (1.0 - da) + dp * (1.0 - sa) + b * sa * da).clamp(0.0, 1.0);
            d[c] = (out * 255.0).round() as u8;
        }
        d[3] = ((sa + da * (1.0 - sa)).clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
