/// Convenience result type used across posterkit.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy used by poster APIs.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// Invalid user-provided state or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The poster surface could not be rasterized.
    #[error("capture error: {0}")]
    Capture(String),

    /// Captured pixels could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Encoded bytes could not be written out.
    #[error("save error: {0}")]
    Save(String),

    /// A selected photo could not be read as an image.
    #[error("file read error: {0}")]
    FileRead(String),

    /// An export is already in flight.
    #[error("export already in progress")]
    Busy,

    /// Build-step failures (asset manifest / HTML rewriting).
    #[error("build error: {0}")]
    Build(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`PosterError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PosterError::Save`] value.
    pub fn save(msg: impl Into<String>) -> Self {
        Self::Save(msg.into())
    }

    /// Build a [`PosterError::FileRead`] value.
    pub fn file_read(msg: impl Into<String>) -> Self {
        Self::FileRead(msg.into())
    }

    /// Build a [`PosterError::Build`] value.
    pub fn build(msg: impl Into<String>) -> Self {
        Self::Build(msg.into())
    }

    /// Build a [`PosterError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
