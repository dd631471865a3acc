//! The fixed catalog of poster templates.
//!
//! Templates are static data: a base fill, an ordered stack of background layers (bottom to top)
//! and a text color mode from which every foreground color is derived. The catalog is built at
//! compile time and never mutated.

use serde::Serialize;

use crate::foundation::core::Rgba8;

/// Template selected when a poster state is first created.
pub const DEFAULT_TEMPLATE_ID: &str = "festive-gold";

/// How foreground text and icons contrast with the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextColorMode {
    /// Dark text over a light background.
    DarkOnLight,
    /// Light text over a dark background.
    LightOnDark,
}

/// Blend behavior used when a layer is composited onto the layers beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Plain source-over.
    Normal,
    /// Overlay: multiply dark backdrops, screen light ones.
    Overlay,
}

/// Direction of a linear gradient, named after the corner it runs towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    /// From the bottom-left corner to the top-right corner.
    ToTopRight,
    /// From the top-left corner to the bottom-right corner.
    ToBottomRight,
}

/// Corner a radial glow is centered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Top-right corner of the surface.
    TopRight,
    /// Bottom-left corner of the surface.
    BottomLeft,
}

/// Procedural overlay textures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    /// Fine woven diagonal grain.
    CarbonFibre,
    /// Coarse speckled grain.
    ConcreteWall,
    /// Soft large-scale mottling.
    CloudyDay,
    /// Scattered leaf-like blotches.
    Leaf,
}

impl TextureKind {
    /// Stable per-texture seed so each kind always produces the same grain.
    pub fn seed(self) -> u64 {
        match self {
            Self::CarbonFibre => 0xC4B0_F1B3,
            Self::ConcreteWall => 0xC0AC_7E7E,
            Self::CloudyDay => 0xC10D_DA71,
            Self::Leaf => 0x1EAF_0001,
        }
    }
}

/// One stop of a gradient, `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ColorStop {
    /// Position along the gradient line.
    pub offset: f32,
    /// Straight-alpha color at this position.
    pub color: Rgba8,
}

const fn stop(offset: f32, color: Rgba8) -> ColorStop {
    ColorStop { offset, color }
}

/// What a background layer paints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    /// Multi-stop linear gradient spanning the whole surface.
    Linear {
        /// Corner the gradient runs towards.
        direction: GradientDirection,
        /// Ordered stops.
        stops: &'static [ColorStop],
    },
    /// Circular glow fading from `color` at the anchor to transparent at `extent` of the
    /// farthest-corner radius.
    Radial {
        /// Glow center.
        anchor: Anchor,
        /// Color at the center.
        color: Rgba8,
        /// Fraction of the farthest-corner distance at which the glow is fully transparent.
        extent: f32,
    },
    /// Repeating grid of round dots, one per tile at the tile origin.
    DotGrid {
        /// Dot color.
        color: Rgba8,
        /// Dot radius in logical pixels.
        dot_radius: f64,
        /// Tile size in logical pixels.
        spacing: f64,
    },
    /// Procedural grain texture.
    Texture(TextureKind),
    /// Quarter disc hugging the top-right corner.
    CornerDisc {
        /// Disc color.
        color: Rgba8,
        /// Radius in logical pixels.
        radius: f64,
    },
}

/// A fill plus the opacity and blend used to composite it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BackgroundLayer {
    /// What the layer paints.
    pub fill: Fill,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
    /// Blend behavior against the layers beneath.
    pub blend: BlendMode,
}

const fn layer(fill: Fill) -> BackgroundLayer {
    BackgroundLayer {
        fill,
        opacity: 1.0,
        blend: BlendMode::Normal,
    }
}

const fn faded(fill: Fill, opacity: f32) -> BackgroundLayer {
    BackgroundLayer {
        fill,
        opacity,
        blend: BlendMode::Normal,
    }
}

/// A named, fixed visual style selectable by the user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TemplateDefinition {
    /// Unique symbolic key.
    pub id: &'static str,
    /// Human-readable label.
    pub display_name: &'static str,
    /// Name of the glyph shown next to the template in pickers.
    pub icon: &'static str,
    /// Solid fill beneath every layer.
    pub base: Rgba8,
    /// Background layers, bottom to top.
    pub layers: &'static [BackgroundLayer],
    /// Reduced layer stack used by picker thumbnails.
    pub swatch: &'static [BackgroundLayer],
    /// Text color mode deriving all foreground colors.
    pub text_mode: TextColorMode,
    /// Avatar ring color overriding the palette default.
    pub avatar_border: Option<Rgba8>,
    /// Number of sparkle decorations scattered over the background.
    pub sparkles: u32,
}

impl TemplateDefinition {
    /// Foreground palette for this template.
    pub fn palette(&self) -> Palette {
        let mut p = Palette::for_mode(self.text_mode);
        if let Some(border) = self.avatar_border {
            p.avatar_border = border;
        }
        p
    }
}

/// Text shadow drawn beneath a text node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, serde::Deserialize)]
pub struct TextShadow {
    /// Vertical offset in logical pixels.
    pub offset_y: f64,
    /// Blur radius in logical pixels.
    pub blur: f64,
    /// Shadow color.
    pub color: Rgba8,
}

/// Foreground colors derived from a [`TextColorMode`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Palette {
    /// Headline ("#26" / "Apna Hai") color.
    pub headline: Rgba8,
    /// Optional headline shadow.
    pub headline_shadow: Option<TextShadow>,
    /// Name and greeting color.
    pub text: Rgba8,
    /// Designation and contact text color.
    pub subtext: Rgba8,
    /// Ring around the avatar slot.
    pub avatar_border: Rgba8,
    /// Placeholder avatar disc fill.
    pub placeholder_fill: Rgba8,
    /// Placeholder avatar glyph color.
    pub placeholder_glyph: Rgba8,
    /// Footer divider line.
    pub divider: Rgba8,
    /// Contact row icons.
    pub contact_icon: Rgba8,
    /// "Powered by" line.
    pub powered_by: Rgba8,
    /// Whether the logo is flattened to white.
    pub logo_tint_white: bool,
}

impl Palette {
    /// Fixed palette for a text color mode.
    pub fn for_mode(mode: TextColorMode) -> Self {
        match mode {
            TextColorMode::LightOnDark => Self {
                headline: Rgba8::WHITE,
                headline_shadow: Some(TextShadow {
                    offset_y: 4.0,
                    blur: 15.0,
                    color: Rgba8::BLACK.with_alpha(0.3),
                }),
                text: Rgba8::WHITE,
                subtext: Rgba8::WHITE.with_alpha(0.8),
                avatar_border: Rgba8::WHITE.with_alpha(0.2),
                placeholder_fill: Rgba8::WHITE.with_alpha(0.1),
                placeholder_glyph: Rgba8::WHITE.with_alpha(0.5),
                divider: Rgba8::WHITE.with_alpha(0.2),
                contact_icon: AMBER_400,
                powered_by: Rgba8::WHITE.with_alpha(0.4),
                logo_tint_white: true,
            },
            TextColorMode::DarkOnLight => Self {
                headline: SLATE_900,
                headline_shadow: None,
                text: SLATE_900,
                subtext: Rgba8::hex(0x475569),
                avatar_border: SLATE_200,
                placeholder_fill: Rgba8::hex(0xf1f5f9),
                placeholder_glyph: Rgba8::hex(0xcbd5e1),
                divider: SLATE_200,
                contact_icon: BRAND_PRIMARY,
                powered_by: Rgba8::hex(0x94a3b8),
                logo_tint_white: false,
            },
        }
    }
}

const SLATE_50: Rgba8 = Rgba8::hex(0xf8fafc);
const SLATE_200: Rgba8 = Rgba8::hex(0xe2e8f0);
const SLATE_900: Rgba8 = Rgba8::hex(0x0f172a);
const SLATE_950: Rgba8 = Rgba8::hex(0x020617);
const AMBER_200: Rgba8 = Rgba8::hex(0xfde68a);
const AMBER_400: Rgba8 = Rgba8::hex(0xfbbf24);
const BRAND_PRIMARY: Rgba8 = Rgba8::hex(0xb45309);
const RED_600: Rgba8 = Rgba8::hex(0xdc2626);
const RED_800: Rgba8 = Rgba8::hex(0x991b1b);
const SKY_400: Rgba8 = Rgba8::hex(0x38bdf8);
const SKY_500: Rgba8 = Rgba8::hex(0x0ea5e9);
const SKY_600: Rgba8 = Rgba8::hex(0x0284c7);
const SKY_700: Rgba8 = Rgba8::hex(0x0369a1);
const EMERALD_500: Rgba8 = Rgba8::hex(0x10b981);
const EMERALD_700: Rgba8 = Rgba8::hex(0x047857);
const EMERALD_800: Rgba8 = Rgba8::hex(0x065f46);
const PURPLE_500: Rgba8 = Rgba8::hex(0xa855f7);

const GOLD_STOPS: &[ColorStop] = &[
    stop(0.0, Rgba8::hex(0x451a03)),
    stop(0.5, Rgba8::hex(0xb45309)),
    stop(1.0, AMBER_400),
];
const RED_STOPS: &[ColorStop] = &[
    stop(0.0, RED_600),
    stop(0.5, RED_800),
    stop(1.0, Rgba8::BLACK),
];
const SKY_STOPS: &[ColorStop] = &[stop(0.0, SKY_400), stop(0.5, SKY_500), stop(1.0, SKY_700)];
const SKY_SWATCH_STOPS: &[ColorStop] = &[stop(0.0, SKY_400), stop(1.0, SKY_600)];
const GREEN_STOPS: &[ColorStop] = &[
    stop(0.0, EMERALD_500),
    stop(0.5, EMERALD_700),
    stop(1.0, SLATE_900),
];
const GREEN_SWATCH_STOPS: &[ColorStop] = &[stop(0.0, EMERALD_500), stop(1.0, EMERALD_800)];

const GOLD_GRADIENT: Fill = Fill::Linear {
    direction: GradientDirection::ToTopRight,
    stops: GOLD_STOPS,
};
const RED_GRADIENT: Fill = Fill::Linear {
    direction: GradientDirection::ToBottomRight,
    stops: RED_STOPS,
};
const SKY_GLOW: Fill = Fill::Radial {
    anchor: Anchor::TopRight,
    color: SKY_400.with_alpha(0.3),
    extent: 0.5,
};

static CATALOG: [TemplateDefinition; 6] = [
    TemplateDefinition {
        id: "festive-gold",
        display_name: "Festive Gold",
        icon: "sparkles",
        base: Rgba8::hex(0x78350f),
        layers: &[
            layer(GOLD_GRADIENT),
            BackgroundLayer {
                fill: Fill::Texture(TextureKind::CarbonFibre),
                opacity: 0.3,
                blend: BlendMode::Overlay,
            },
        ],
        swatch: &[layer(GOLD_GRADIENT)],
        text_mode: TextColorMode::LightOnDark,
        avatar_border: Some(AMBER_200.with_alpha(0.5)),
        sparkles: 12,
    },
    TemplateDefinition {
        id: "midnight-party",
        display_name: "Midnight Party",
        icon: "moon",
        base: SLATE_950,
        layers: &[
            layer(SKY_GLOW),
            layer(Fill::Radial {
                anchor: Anchor::BottomLeft,
                color: PURPLE_500.with_alpha(0.3),
                extent: 0.5,
            }),
            faded(
                Fill::DotGrid {
                    color: Rgba8::WHITE,
                    dot_radius: 1.0,
                    spacing: 40.0,
                },
                0.2,
            ),
        ],
        swatch: &[layer(SKY_GLOW)],
        text_mode: TextColorMode::LightOnDark,
        avatar_border: None,
        sparkles: 0,
    },
    TemplateDefinition {
        id: "celebration-red",
        display_name: "Vibrant Red",
        icon: "party-popper",
        base: RED_800,
        layers: &[
            layer(RED_GRADIENT),
            faded(Fill::Texture(TextureKind::ConcreteWall), 0.1),
        ],
        swatch: &[layer(RED_GRADIENT)],
        text_mode: TextColorMode::LightOnDark,
        avatar_border: None,
        sparkles: 0,
    },
    TemplateDefinition {
        id: "pure-white",
        display_name: "Pure White",
        icon: "sun",
        base: Rgba8::WHITE,
        layers: &[
            faded(
                Fill::DotGrid {
                    color: Rgba8::BLACK,
                    dot_radius: 1.0,
                    spacing: 24.0,
                },
                0.03,
            ),
            layer(Fill::CornerDisc {
                color: SLATE_50,
                radius: 256.0,
            }),
        ],
        swatch: &[],
        text_mode: TextColorMode::DarkOnLight,
        avatar_border: None,
        sparkles: 0,
    },
    TemplateDefinition {
        id: "sky-blue",
        display_name: "Sky Blue",
        icon: "cloud",
        base: SKY_500,
        layers: &[
            layer(Fill::Linear {
                direction: GradientDirection::ToBottomRight,
                stops: SKY_STOPS,
            }),
            faded(Fill::Texture(TextureKind::CloudyDay), 0.1),
        ],
        swatch: &[layer(Fill::Linear {
            direction: GradientDirection::ToBottomRight,
            stops: SKY_SWATCH_STOPS,
        })],
        text_mode: TextColorMode::LightOnDark,
        avatar_border: None,
        sparkles: 0,
    },
    TemplateDefinition {
        id: "nature-green",
        display_name: "Nature Green",
        icon: "leaf",
        base: EMERALD_700,
        layers: &[
            layer(Fill::Linear {
                direction: GradientDirection::ToBottomRight,
                stops: GREEN_STOPS,
            }),
            faded(Fill::Texture(TextureKind::Leaf), 0.1),
        ],
        swatch: &[layer(Fill::Linear {
            direction: GradientDirection::ToBottomRight,
            stops: GREEN_SWATCH_STOPS,
        })],
        text_mode: TextColorMode::LightOnDark,
        avatar_border: None,
        sparkles: 0,
    },
];

/// Visual treatment used for ids that are not in the catalog.
pub static FALLBACK_TEMPLATE: TemplateDefinition = TemplateDefinition {
    id: "default",
    display_name: "Default",
    icon: "sparkles",
    base: SLATE_900,
    layers: &[],
    swatch: &[],
    text_mode: TextColorMode::LightOnDark,
    avatar_border: None,
    sparkles: 0,
};

/// Every template, in picker order.
pub fn catalog() -> &'static [TemplateDefinition] {
    &CATALOG
}

/// Look up a template by id.
pub fn find(id: &str) -> Option<&'static TemplateDefinition> {
    CATALOG.iter().find(|t| t.id == id)
}

/// Look up a template by id, degrading to [`FALLBACK_TEMPLATE`] for unknown ids.
pub fn resolve(id: &str) -> &'static TemplateDefinition {
    find(id).unwrap_or(&FALLBACK_TEMPLATE)
}

#[cfg(test)]
#[path = "../tests/unit/catalog.rs"]
mod tests;
