use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::foundation::error::{PosterError, PosterResult};

/// Destination for encoded poster files.
pub trait FileSink: Send + Sync {
    /// Store `bytes` under `file_name`, returning where they ended up.
    fn save(&self, file_name: &str, bytes: &[u8]) -> PosterResult<PathBuf>;
}

/// Writes files into a directory, creating it on first use.
///
/// Bytes go to a hidden `.part` sibling first and are renamed into place once complete.
#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirSink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> PosterResult<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            PosterError::save(format!("create '{}': {e}", self.dir.display()))
        })?;
        let path = self.dir.join(file_name);
        let partial = self.dir.join(format!(".{file_name}.part"));
        let written = std::fs::write(&partial, bytes)
            .map_err(|e| PosterError::save(format!("write '{}': {e}", partial.display())))
            .and_then(|()| {
                std::fs::rename(&partial, &path).map_err(|e| {
                    PosterError::save(format!("rename into '{}': {e}", path.display()))
                })
            });
        if written.is_err() {
            // Only complete files may carry the final name.
            let _ = std::fs::remove_file(&partial);
        }
        written.map(|()| path)
    }
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved files in save order.
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl FileSink for MemorySink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> PosterResult<PathBuf> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
