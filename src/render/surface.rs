use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{PosterError, PosterResult};
use crate::render::cpu::CpuRasterizer;
use crate::render::tree::VisualTree;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Something on screen that can be snapshotted into pixels.
pub trait Surface {
    /// Displayed size in logical pixels.
    fn size(&self) -> SurfaceSize;

    /// Rasterize the current contents at `scale` times the displayed size.
    fn capture(&mut self, scale: u32) -> PosterResult<FrameRGBA>;
}

/// The poster surface: the current visual tree painted by the CPU rasterizer.
pub struct PosterSurface {
    tree: VisualTree,
    raster: CpuRasterizer,
}

impl PosterSurface {
    /// Surface showing `tree`.
    pub fn new(tree: VisualTree, raster: CpuRasterizer) -> Self {
        Self { tree, raster }
    }

    /// Replace the displayed tree (after the poster state changed).
    pub fn set_tree(&mut self, tree: VisualTree) {
        self.tree = tree;
    }

    /// Tree currently displayed.
    pub fn tree(&self) -> &VisualTree {
        &self.tree
    }
}

impl Surface for PosterSurface {
    fn size(&self) -> SurfaceSize {
        self.tree.size
    }

    fn capture(&mut self, scale: u32) -> PosterResult<FrameRGBA> {
        let frame = self.raster.rasterize(&self.tree, scale)?;
        let expected = self.tree.size.scaled(scale)?;
        if frame.width != expected.width || frame.height != expected.height {
            return Err(PosterError::capture(format!(
                "rasterizer produced {}x{}, expected {}x{}",
                frame.width, frame.height, expected.width, expected.height
            )));
        }
        Ok(frame)
    }
}
