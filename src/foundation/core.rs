use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Size of a poster surface in logical (on-screen) pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Default poster surface: 500 wide at a 3:4 aspect ratio.
    pub const POSTER: Self = Self {
        width: 500,
        height: 667,
    };

    /// Create a validated size with both sides non-zero.
    pub fn new(width: u32, height: u32) -> PosterResult<Self> {
        if width == 0 || height == 0 {
            return Err(PosterError::validation(
                "surface width and height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Size with a 3:4 portrait aspect ratio for the given width.
    pub fn portrait_3x4(width: u32) -> PosterResult<Self> {
        let height = ((f64::from(width) * 4.0) / 3.0).round() as u32;
        Self::new(width, height)
    }

    /// Multiply both sides by `factor`, failing on overflow.
    pub fn scaled(self, factor: u32) -> PosterResult<Self> {
        let width = self
            .width
            .checked_mul(factor)
            .ok_or_else(|| PosterError::capture("scaled surface width overflows"))?;
        let height = self
            .height
            .checked_mul(factor)
            .ok_or_else(|| PosterError::capture("scaled surface height overflows"))?;
        Ok(Self { width, height })
    }

    /// The surface as a rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::POSTER
    }
}

/// Straight-alpha RGBA8 color, as written in style sheets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::hex(0xffffff);
    /// Opaque black.
    pub const BLACK: Self = Self::hex(0x000000);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    /// Same color with alpha replaced by `alpha` in `[0, 1]`.
    pub const fn with_alpha(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        Self { a, ..self }
    }

    /// Convert into premultiplied RGBA8.
    pub fn premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }

    /// CSS hex notation (`#rrggbb` or `#rrggbbaa`).
    pub fn to_css_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
