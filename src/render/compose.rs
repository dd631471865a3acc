//! Template renderer: `(template, name, designation, photo)` to a [`VisualTree`].
//!
//! Geometry is authored against a 500-unit-wide reference poster and scaled to the requested
//! surface width. The column is laid out as three blocks (headline, profile, footer) with the
//! leftover height split evenly between them.

use std::sync::Arc;

use crate::catalog::{self, Palette, TemplateDefinition, TextColorMode};
use crate::foundation::core::{Point, Rect, Rgba8, SurfaceSize};
use crate::foundation::math::hash_unit;
use crate::render::tree::{
    AvatarFill, AvatarNode, Background, FontClass, Icon, IconNode, LogoNode, Node, Overflow,
    Sparkle, TextAlign, TextNode, TextRole, VisualTree,
};
use crate::scene::brand::Brand;
use crate::scene::photo::Photo;
use crate::scene::state::PosterState;

/// Shown in the name slot while the name is empty.
pub const NAME_PLACEHOLDER: &str = "Your Name";
/// Shown in the designation slot while the designation is empty.
pub const DESIGNATION_PLACEHOLDER: &str = "Designation";

const REF_WIDTH: f64 = 500.0;
const PAD_X: f64 = 32.0;
const PAD_Y: f64 = 40.0;

const LOGO_INSET: f64 = 32.0;
const LOGO_SIZE: f64 = 64.0;

const HEADLINE_TOP_MARGIN: f64 = 16.0;
const HEADLINE_SIZE: f64 = 96.0;
const HEADLINE_LINE: f64 = HEADLINE_SIZE * 0.8;
const TAGLINE_SIZE: f64 = 60.0;
const TAGLINE_LINE: f64 = TAGLINE_SIZE * 1.25;
const TAGLINE_PULL_UP: f64 = 8.0;

const AVATAR_SIZE: f64 = 192.0;
const AVATAR_BORDER: f64 = 8.0;
const AVATAR_GAP: f64 = 16.0;
const AVATAR_GLYPH: f64 = 64.0;
const NAME_SIZE: f64 = 30.0;
const NAME_LINE: f64 = 36.0;
const NAME_GAP: f64 = 2.0;
const DESIGNATION_SIZE: f64 = 16.0;
const DESIGNATION_LINE: f64 = 24.0;
const DESIGNATION_GAP: f64 = 16.0;
const GREETING_SIZE: f64 = 48.0;
const GREETING_GAP: f64 = 16.0;
const TEXT_INSET: f64 = 8.0;

const FOOTER_SCALE: f64 = 0.9;
const DIVIDER: f64 = 1.0;
const FOOTER_PAD_TOP: f64 = 24.0;
const CONTACT_ICON: f64 = 12.0;
const CONTACT_SIZE: f64 = 10.0;
const CONTACT_LINE: f64 = 15.0;
const CONTACT_GAP: f64 = 6.0;
const FOOTER_GAP: f64 = 12.0;
const POWERED_SIZE: f64 = 10.0;
const POWERED_LINE: f64 = 15.0;

const SPARKLE_RADIUS: f64 = 2.0;

fn top_block_height() -> f64 {
    HEADLINE_TOP_MARGIN + HEADLINE_LINE - TAGLINE_PULL_UP + TAGLINE_LINE
}

fn profile_block_height() -> f64 {
    AVATAR_SIZE
        + AVATAR_GAP
        + NAME_LINE
        + NAME_GAP
        + DESIGNATION_LINE
        + DESIGNATION_GAP
        + GREETING_SIZE
        + GREETING_GAP
}

fn footer_block_height() -> f64 {
    DIVIDER + FOOTER_PAD_TOP + CONTACT_LINE * FOOTER_SCALE + FOOTER_GAP + POWERED_LINE
}

/// Builds visual trees for one surface size and brand.
#[derive(Clone, Debug)]
pub struct PosterRenderer {
    size: SurfaceSize,
    brand: Brand,
    logo: Option<Arc<[u8]>>,
    sparkle_seed: u64,
}

impl PosterRenderer {
    /// Renderer for `size` with the default brand and no logo.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            brand: Brand::default(),
            logo: None,
            sparkle_seed: 0,
        }
    }

    /// Replace the fixed poster copy.
    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brand = brand;
        self
    }

    /// Use encoded image bytes as the corner logo.
    pub fn with_logo(mut self, logo: Option<Arc<[u8]>>) -> Self {
        self.logo = logo;
        self
    }

    /// Seed for sparkle placement. Sparkles are decorative; the seed never moves content.
    pub fn with_sparkle_seed(mut self, seed: u64) -> Self {
        self.sparkle_seed = seed;
        self
    }

    /// Surface size trees are laid out for.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Build the tree for the current poster state.
    pub fn render_state(&self, state: &PosterState) -> VisualTree {
        self.render(
            state.selected_template_id(),
            state.name(),
            state.designation(),
            state.photo(),
        )
    }

    /// Build the tree for a template and the user's entries. Never fails: unknown templates get
    /// the fallback treatment and empty fields get placeholders.
    #[tracing::instrument(level = "debug", skip(self, photo), fields(has_photo = photo.is_some()))]
    pub fn render(
        &self,
        template_id: &str,
        name: &str,
        designation: &str,
        photo: Option<&Photo>,
    ) -> VisualTree {
        let template = catalog::resolve(template_id);
        let palette = template.palette();
        let k = f64::from(self.size.width) / REF_WIDTH;
        let w = f64::from(self.size.width);
        let h = f64::from(self.size.height);

        let mut content = Vec::new();

        if let Some(logo) = &self.logo {
            content.push(Node::Logo(LogoNode {
                rect: Rect::new(
                    LOGO_INSET * k,
                    LOGO_INSET * k,
                    (LOGO_INSET + LOGO_SIZE) * k,
                    (LOGO_INSET + LOGO_SIZE) * k,
                ),
                image: logo.clone(),
                tint_white: palette.logo_tint_white,
            }));
        }

        let col_x0 = PAD_X * k;
        let col_x1 = w - PAD_X * k;
        let avail = h - 2.0 * PAD_Y * k;
        let used = (top_block_height() + profile_block_height() + footer_block_height()) * k;
        let gap = ((avail - used) / 2.0).max(0.0);

        // Headline block.
        let mut y = PAD_Y * k + HEADLINE_TOP_MARGIN * k;
        content.push(Node::Text(TextNode {
            role: TextRole::Headline,
            text: self.brand.headline.clone(),
            rect: Rect::new(col_x0, y, col_x1, y + HEADLINE_LINE * k),
            font: FontClass::Display,
            size: HEADLINE_SIZE * k,
            letter_spacing: -0.025 * HEADLINE_SIZE * k,
            color: palette.headline,
            shadow: palette.headline_shadow.map(|s| scale_shadow(s, k)),
            overflow: Overflow::Visible,
            align: TextAlign::Center,
        }));
        y += (HEADLINE_LINE - TAGLINE_PULL_UP) * k;
        content.push(Node::Text(TextNode {
            role: TextRole::Tagline,
            text: self.brand.tagline.clone(),
            rect: Rect::new(col_x0, y, col_x1, y + TAGLINE_LINE * k),
            font: FontClass::Display,
            size: TAGLINE_SIZE * k,
            letter_spacing: -0.025 * TAGLINE_SIZE * k,
            color: palette.headline,
            shadow: palette.headline_shadow.map(|s| scale_shadow(s, k)),
            overflow: Overflow::Visible,
            align: TextAlign::Center,
        }));
        y += TAGLINE_LINE * k + gap;

        // Profile block.
        let cx = w / 2.0;
        let avatar_rect = Rect::new(
            cx - AVATAR_SIZE * k / 2.0,
            y,
            cx + AVATAR_SIZE * k / 2.0,
            y + AVATAR_SIZE * k,
        );
        content.push(Node::Avatar(AvatarNode {
            rect: avatar_rect,
            border_width: AVATAR_BORDER * k,
            border: palette.avatar_border,
            fill: avatar_fill(photo, &palette, avatar_rect, k),
        }));
        y += (AVATAR_SIZE + AVATAR_GAP) * k;

        let text_x0 = col_x0 + TEXT_INSET * k;
        let text_x1 = col_x1 - TEXT_INSET * k;
        content.push(Node::Text(TextNode {
            role: TextRole::Name,
            text: or_placeholder(name, NAME_PLACEHOLDER).to_string(),
            rect: Rect::new(text_x0, y, text_x1, y + NAME_LINE * k),
            font: FontClass::Body,
            size: NAME_SIZE * k,
            letter_spacing: 0.0,
            color: palette.text,
            shadow: None,
            overflow: Overflow::Ellipsis,
            align: TextAlign::Center,
        }));
        y += (NAME_LINE + NAME_GAP) * k;

        content.push(Node::Text(TextNode {
            role: TextRole::Designation,
            text: or_placeholder(designation, DESIGNATION_PLACEHOLDER).to_uppercase(),
            rect: Rect::new(text_x0, y, text_x1, y + DESIGNATION_LINE * k),
            font: FontClass::Body,
            size: DESIGNATION_SIZE * k,
            letter_spacing: 0.2 * DESIGNATION_SIZE * k,
            color: palette.subtext,
            shadow: None,
            overflow: Overflow::Ellipsis,
            align: TextAlign::Center,
        }));
        y += (DESIGNATION_LINE + DESIGNATION_GAP) * k;

        content.push(Node::Text(TextNode {
            role: TextRole::Greeting,
            text: self.brand.greeting.clone(),
            rect: Rect::new(col_x0, y, col_x1, y + GREETING_SIZE * k),
            font: FontClass::Script,
            size: GREETING_SIZE * k,
            letter_spacing: 0.0,
            color: palette.text,
            shadow: None,
            overflow: Overflow::Visible,
            align: TextAlign::Center,
        }));

        // Footer block, anchored to the bottom padding.
        let mut y = h - PAD_Y * k - footer_block_height() * k;
        content.push(Node::Rect {
            rect: Rect::new(col_x0, y, col_x1, y + DIVIDER * k),
            color: palette.divider,
        });
        y += (DIVIDER + FOOTER_PAD_TOP) * k;
        self.push_contacts(&mut content, &palette, col_x0, col_x1, y, k);
        y += (CONTACT_LINE * FOOTER_SCALE + FOOTER_GAP) * k;

        content.push(Node::Text(TextNode {
            role: TextRole::PoweredBy,
            text: self.brand.powered_by.to_uppercase(),
            rect: Rect::new(col_x0, y, col_x1, y + POWERED_LINE * k),
            font: FontClass::Body,
            size: POWERED_SIZE * k,
            letter_spacing: 0.3 * POWERED_SIZE * k,
            color: palette.powered_by,
            shadow: None,
            overflow: Overflow::Ellipsis,
            align: TextAlign::Center,
        }));

        VisualTree {
            size: self.size,
            template_id: template.id,
            text_mode: template.text_mode,
            background: background_for(template),
            decorations: sparkles(template, self.size, self.sparkle_seed, k),
            content,
        }
    }

    fn push_contacts(
        &self,
        content: &mut Vec<Node>,
        palette: &Palette,
        x0: f64,
        x1: f64,
        y: f64,
        k: f64,
    ) {
        let entries = [
            (Icon::Globe, &self.brand.website),
            (Icon::Instagram, &self.brand.instagram),
            (Icon::Phone, &self.brand.phone),
        ];
        let s = FOOTER_SCALE * k;
        let line = CONTACT_LINE * s;
        let icon = CONTACT_ICON * s;
        let col_w = (x1 - x0) / entries.len() as f64;
        for (i, (glyph, label)) in entries.into_iter().enumerate() {
            let cx0 = x0 + col_w * i as f64;
            let icon_y = y + (line - icon) / 2.0;
            content.push(Node::Icon(IconNode {
                icon: glyph,
                rect: Rect::new(cx0, icon_y, cx0 + icon, icon_y + icon),
                color: palette.contact_icon,
            }));
            let tx0 = cx0 + icon + CONTACT_GAP * s;
            content.push(Node::Text(TextNode {
                role: TextRole::Contact,
                text: label.clone(),
                rect: Rect::new(tx0, y, cx0 + col_w, y + line),
                font: FontClass::Body,
                size: CONTACT_SIZE * s,
                letter_spacing: 0.05 * CONTACT_SIZE * s,
                color: palette.subtext,
                shadow: None,
                overflow: Overflow::Ellipsis,
                align: TextAlign::Start,
            }));
        }
    }
}

/// Build the small picker thumbnail for a template: base, swatch layers and the headline.
pub fn render_thumbnail(template_id: &str, size: SurfaceSize) -> VisualTree {
    let template = catalog::resolve(template_id);
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    let color = match template.text_mode {
        TextColorMode::DarkOnLight => Rgba8::hex(0x0f172a),
        TextColorMode::LightOnDark => Rgba8::WHITE,
    };
    let big = w * 0.1;
    let small = w * 0.075;
    let top = (h - big - small) / 2.0;
    let line = |role, text: &str, y: f64, size: f64, color: Rgba8| {
        Node::Text(TextNode {
            role,
            text: text.to_string(),
            rect: Rect::new(0.0, y, w, y + size),
            font: FontClass::Display,
            size,
            letter_spacing: 0.0,
            color,
            shadow: None,
            overflow: Overflow::Ellipsis,
            align: TextAlign::Center,
        })
    };
    let brand = Brand::default();
    VisualTree {
        size,
        template_id: template.id,
        text_mode: template.text_mode,
        background: Background {
            base: template.base,
            layers: template.swatch.to_vec(),
        },
        decorations: Vec::new(),
        content: vec![
            line(
                TextRole::Headline,
                &brand.headline,
                top,
                big,
                color.with_alpha(0.8),
            ),
            line(TextRole::Tagline, &brand.tagline, top + big, small, color),
        ],
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'static str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

fn scale_shadow(s: catalog::TextShadow, k: f64) -> catalog::TextShadow {
    catalog::TextShadow {
        offset_y: s.offset_y * k,
        blur: s.blur * k,
        color: s.color,
    }
}

fn avatar_fill(photo: Option<&Photo>, palette: &Palette, slot: Rect, k: f64) -> AvatarFill {
    match photo {
        Some(p) => AvatarFill::Photo(p.clone()),
        None => {
            let c = slot.center();
            let half = AVATAR_GLYPH * k / 2.0;
            AvatarFill::Placeholder {
                fill: palette.placeholder_fill,
                glyph: palette.placeholder_glyph,
                glyph_rect: Rect::new(c.x - half, c.y - half, c.x + half, c.y + half),
            }
        }
    }
}

fn background_for(template: &TemplateDefinition) -> Background {
    Background {
        base: template.base,
        layers: template.layers.to_vec(),
    }
}

fn sparkles(template: &TemplateDefinition, size: SurfaceSize, seed: u64, k: f64) -> Vec<Sparkle> {
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    (0..template.sparkles)
        .map(|i| Sparkle {
            center: Point::new(hash_unit(seed, i, 0) * w, hash_unit(seed, i, 1) * h),
            radius: SPARKLE_RADIUS * k,
            color: Rgba8::WHITE,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
