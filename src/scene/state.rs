use std::path::Path;

use crate::catalog::{self, DEFAULT_TEMPLATE_ID};
use crate::foundation::error::{PosterError, PosterResult};
use crate::scene::photo::Photo;

/// Minimum number of characters for the name and designation fields to be valid.
pub const MIN_FIELD_CHARS: usize = 2;

/// A user-editable field of the poster form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// The person's name.
    Name,
    /// The person's title.
    Designation,
}

/// A form-level validation problem, reported next to its field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Field the message belongs to.
    pub field: Field,
    /// Human-readable message.
    pub message: &'static str,
}

/// Everything the user has entered for one poster.
///
/// Field validity never blocks rendering; the preview substitutes placeholders for empty values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PosterState {
    selected_template_id: String,
    name: String,
    designation: String,
    photo: Option<Photo>,
}

impl Default for PosterState {
    fn default() -> Self {
        Self::new()
    }
}

impl PosterState {
    /// Fresh state: default template, empty fields, no photo.
    pub fn new() -> Self {
        Self {
            selected_template_id: DEFAULT_TEMPLATE_ID.to_string(),
            name: String::new(),
            designation: String::new(),
            photo: None,
        }
    }

    /// Id of the selected template; always present in the catalog.
    pub fn selected_template_id(&self) -> &str {
        &self.selected_template_id
    }

    /// Name as typed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Designation as typed.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Uploaded photo, if any.
    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    /// Replace the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the designation.
    pub fn set_designation(&mut self, designation: impl Into<String>) {
        self.designation = designation.into();
    }

    /// Select a catalog template. Unknown ids are rejected and leave the selection unchanged.
    pub fn select_template(&mut self, id: &str) -> PosterResult<()> {
        if catalog::find(id).is_none() {
            return Err(PosterError::validation(format!("unknown template '{id}'")));
        }
        self.selected_template_id = id.to_string();
        Ok(())
    }

    /// Store a photo, overwriting any previous one.
    pub fn set_photo(&mut self, photo: Photo) {
        self.photo = Some(photo);
    }

    /// Drop the current photo.
    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    /// Apply the result of a file picker.
    ///
    /// `None` (nothing selected) is a no-op returning `Ok(false)`. A file that cannot be read as
    /// an image yields [`PosterError::FileRead`] and the previous photo is kept.
    pub fn apply_upload(&mut self, selection: Option<&Path>) -> PosterResult<bool> {
        let Some(path) = selection else {
            return Ok(false);
        };
        let photo = Photo::read(path)?;
        self.photo = Some(photo);
        Ok(true)
    }

    /// Field errors for the current values; empty when the form is valid.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        if self.name.chars().count() < MIN_FIELD_CHARS {
            out.push(FieldError {
                field: Field::Name,
                message: "Name must be at least 2 characters",
            });
        }
        if self.designation.chars().count() < MIN_FIELD_CHARS {
            out.push(FieldError {
                field: Field::Designation,
                message: "Designation is required",
            });
        }
        out
    }

    /// `true` when [`PosterState::validate`] reports nothing.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
