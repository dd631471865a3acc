//! Interactive poster session: state, live preview and export in one place.

use std::path::Path;

use crate::export::notify::Notification;
use crate::export::pipeline::{Exporter, FileSaved};
use crate::foundation::error::PosterResult;
use crate::render::compose::PosterRenderer;
use crate::render::cpu::CpuRasterizer;
use crate::render::surface::{PosterSurface, Surface as _};
use crate::render::tree::VisualTree;
use crate::scene::photo::Photo;
use crate::scene::state::{FieldError, PosterState};

/// Owns the poster state and keeps the preview tree in sync with it.
///
/// Every mutation rebuilds the preview immediately.
pub struct PosterSession {
    state: PosterState,
    renderer: PosterRenderer,
    surface: PosterSurface,
    exporter: Exporter,
}

impl PosterSession {
    /// Start a session with default state.
    pub fn new(renderer: PosterRenderer, raster: CpuRasterizer, exporter: Exporter) -> Self {
        let state = PosterState::new();
        let tree = renderer.render_state(&state);
        Self {
            state,
            renderer,
            surface: PosterSurface::new(tree, raster),
            exporter,
        }
    }

    /// Current poster state.
    pub fn state(&self) -> &PosterState {
        &self.state
    }

    /// Tree currently on the poster surface.
    pub fn preview(&self) -> &VisualTree {
        self.surface.tree()
    }

    /// Exporter used by [`PosterSession::export`].
    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Replace the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.set_name(name);
        self.recompute();
    }

    /// Replace the designation.
    pub fn set_designation(&mut self, designation: impl Into<String>) {
        self.state.set_designation(designation);
        self.recompute();
    }

    /// Switch template; unknown ids are rejected and leave the session unchanged.
    pub fn select_template(&mut self, id: &str) -> PosterResult<()> {
        self.state.select_template(id)?;
        self.recompute();
        Ok(())
    }

    /// Use `photo`, replacing any previous one.
    pub fn set_photo(&mut self, photo: Photo) {
        self.state.set_photo(photo);
        self.recompute();
    }

    /// Go back to the placeholder avatar.
    pub fn clear_photo(&mut self) {
        self.state.clear_photo();
        self.recompute();
    }

    /// Apply a file picker result. A file that is not a readable image raises a warning
    /// notification, keeps the previous photo and is returned as an error.
    pub fn upload_photo(&mut self, selection: Option<&Path>) -> PosterResult<bool> {
        match self.state.apply_upload(selection) {
            Ok(changed) => {
                if changed {
                    self.recompute();
                }
                Ok(changed)
            }
            Err(e) => {
                tracing::warn!(error = %e, "photo upload rejected");
                self.exporter
                    .notifier()
                    .notify(Notification::photo_rejected(&e));
                Err(e)
            }
        }
    }

    /// Field errors for the current entries. Never blocks preview or export.
    pub fn validate(&self) -> Vec<FieldError> {
        self.state.validate()
    }

    /// Export the poster as it is currently shown.
    pub fn export(&mut self) -> PosterResult<FileSaved> {
        tracing::debug!(size = ?self.surface.size(), "exporting preview");
        self.exporter.export(&mut self.surface)
    }

    fn recompute(&mut self) {
        self.surface.set_tree(self.renderer.render_state(&self.state));
    }
}
