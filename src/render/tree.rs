//! Backend-agnostic description of a composed poster.
//!
//! A [`VisualTree`] is fully resolved: every color, box and string is concrete, so rasterizers
//! never consult the catalog or the poster state.

use crate::catalog::{BackgroundLayer, TextColorMode, TextShadow};
use crate::foundation::core::{Point, Rect, Rgba8, SurfaceSize};
use crate::scene::photo::Photo;

/// A composed poster: background stack, decorations and content, bottom to top.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualTree {
    /// Logical surface size the geometry is expressed in.
    pub size: SurfaceSize,
    /// Id of the template the tree was built from (the fallback id for unknown templates).
    pub template_id: &'static str,
    /// Text color mode of that template.
    pub text_mode: TextColorMode,
    /// Layered background.
    pub background: Background,
    /// Purely decorative marks drawn above the background.
    pub decorations: Vec<Sparkle>,
    /// Content block, in paint order.
    pub content: Vec<Node>,
}

impl VisualTree {
    /// All text nodes in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextNode> {
        self.content.iter().filter_map(|n| match n {
            Node::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Text node with the given role, if present.
    pub fn text(&self, role: TextRole) -> Option<&TextNode> {
        self.texts().find(|t| t.role == role)
    }

    /// The avatar slot.
    pub fn avatar(&self) -> Option<&AvatarNode> {
        self.content.iter().find_map(|n| match n {
            Node::Avatar(a) => Some(a),
            _ => None,
        })
    }

    /// Tree with decorative jitter removed, for layout comparisons.
    pub fn layout_only(&self) -> Self {
        let mut out = self.clone();
        for s in &mut out.decorations {
            s.center = Point::ORIGIN;
        }
        out
    }
}

/// Solid base plus ordered layers.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    /// Fill beneath every layer.
    pub base: Rgba8,
    /// Layers, bottom to top.
    pub layers: Vec<BackgroundLayer>,
}

/// A small glowing dot scattered over the background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    /// Dot center.
    pub center: Point,
    /// Dot radius.
    pub radius: f64,
    /// Dot color.
    pub color: Rgba8,
}

/// Content element.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Logo image fitted into a box.
    Logo(LogoNode),
    /// Circular photo slot.
    Avatar(AvatarNode),
    /// Single-line text.
    Text(TextNode),
    /// Vector icon.
    Icon(IconNode),
    /// Solid rectangle (dividers).
    Rect {
        /// Rectangle bounds.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
}

/// Logo image contained (aspect preserved) within `rect`.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoNode {
    /// Box the logo is fitted into.
    pub rect: Rect,
    /// Encoded image bytes.
    pub image: std::sync::Arc<[u8]>,
    /// Flatten every visible pixel to white.
    pub tint_white: bool,
}

/// What fills the avatar circle.
#[derive(Clone, Debug, PartialEq)]
pub enum AvatarFill {
    /// Uploaded photo, cropped to cover the circle.
    Photo(Photo),
    /// Placeholder glyph on a tinted disc.
    Placeholder {
        /// Disc color.
        fill: Rgba8,
        /// Glyph color.
        glyph: Rgba8,
        /// Glyph box, centered in the slot.
        glyph_rect: Rect,
    },
}

/// Circular avatar slot with a ring border. Geometry does not depend on the fill.
#[derive(Clone, Debug, PartialEq)]
pub struct AvatarNode {
    /// Outer bounds of the slot (ring included).
    pub rect: Rect,
    /// Ring width, drawn inside `rect`.
    pub border_width: f64,
    /// Ring color.
    pub border: Rgba8,
    /// Slot content.
    pub fill: AvatarFill,
}

/// Role of a text node; selects the font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// First headline line.
    Headline,
    /// Second headline line.
    Tagline,
    /// Person's name.
    Name,
    /// Person's title.
    Designation,
    /// Script greeting.
    Greeting,
    /// Footer contact entry.
    Contact,
    /// Footer attribution.
    PoweredBy,
}

/// Font family class a text node asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontClass {
    /// Brush display face.
    Display,
    /// Sans body face.
    Body,
    /// Script face.
    Script,
}

/// How a text node behaves when it does not fit its box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overflow {
    /// Paint as-is; the box is sized for the copy.
    Visible,
    /// Keep one line and end with an ellipsis.
    Ellipsis,
}

/// Single line of text centered in a fixed box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    /// What the text is.
    pub role: TextRole,
    /// Display string (already upper-cased when the style asks for it). Never empty.
    pub text: String,
    /// Box the line is centered in.
    pub rect: Rect,
    /// Font family class.
    pub font: FontClass,
    /// Font size in logical pixels.
    pub size: f64,
    /// Extra spacing between letters in logical pixels.
    pub letter_spacing: f64,
    /// Text color.
    pub color: Rgba8,
    /// Optional blurred drop shadow.
    pub shadow: Option<TextShadow>,
    /// Overflow behavior.
    pub overflow: Overflow,
    /// Horizontal placement within `rect`.
    pub align: TextAlign,
}

/// Horizontal alignment of a line within its box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// Flush with the left edge.
    Start,
    /// Centered.
    Center,
}

/// Available vector icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Person silhouette (placeholder avatar).
    User,
    /// Globe (website).
    Globe,
    /// Camera outline (social handle).
    Instagram,
    /// Handset (phone).
    Phone,
}

/// Icon drawn into a square box with a single stroke color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconNode {
    /// Which icon.
    pub icon: Icon,
    /// Box the icon fills.
    pub rect: Rect,
    /// Stroke color.
    pub color: Rgba8,
}
