//! posterkit composes personalised greeting posters and exports them as PNG files.
//!
//! The crate is organised around two units:
//!
//! - A pure [`PosterRenderer`] mapping (template, name, designation, photo) to a [`VisualTree`]
//! - An [`Exporter`] that snapshots a [`Surface`] at 3x, encodes PNG and hands it to a [`FileSink`]
//!
//! [`PosterSession`] ties both to a [`PosterState`] for interactive use. A small build helper,
//! [`patch_opengraph_meta`], fixes up the social preview tag of a bundled web build.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod build;
mod catalog;
mod export;
mod foundation;
mod render;
mod scene;
mod session;

pub use crate::foundation::core::{Affine, Point, Rect, Rgba8, Rgba8Premul, SurfaceSize, Vec2};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::build::meta_images::{MetaPatch, patch_opengraph_meta};
pub use crate::catalog::{
    Anchor, BackgroundLayer, BlendMode, ColorStop, DEFAULT_TEMPLATE_ID, FALLBACK_TEMPLATE, Fill,
    GradientDirection, Palette, TemplateDefinition, TextColorMode, TextShadow, TextureKind,
    catalog, find, resolve,
};
pub use crate::export::notify::{
    Notification, NotificationKind, Notifier, RecordingNotifier, TracingNotifier,
};
pub use crate::export::pipeline::{
    ExportOpts, ExportState, Exporter, FILE_PREFIX, FileSaved, SETTLE_DELAY, SUPERSAMPLE,
    encode_png, file_name_for,
};
pub use crate::export::sink::{DirSink, FileSink, MemorySink};
pub use crate::render::compose::{
    DESIGNATION_PLACEHOLDER, NAME_PLACEHOLDER, PosterRenderer, render_thumbnail,
};
pub use crate::render::cpu::{CpuRasterizer, MAX_RASTER_DIM};
pub use crate::render::surface::{FrameRGBA, PosterSurface, Surface};
pub use crate::render::text::{ELLIPSIS, FontBook, FontFace, ellipsize};
pub use crate::render::tree::{
    AvatarFill, AvatarNode, Background, FontClass, Icon, IconNode, LogoNode, Node, Overflow,
    Sparkle, TextAlign, TextNode, TextRole, VisualTree,
};
pub use crate::scene::brand::Brand;
pub use crate::scene::config::{FONT_ENV_VAR, FontConfig, PosterConfig};
pub use crate::scene::photo::Photo;
pub use crate::scene::state::{Field, FieldError, MIN_FIELD_CHARS, PosterState};
pub use crate::session::PosterSession;
