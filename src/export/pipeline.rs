use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::assets::decode::unpremultiply_rgba8_in_place;
use crate::export::notify::{Notification, Notifier};
use crate::export::sink::FileSink;
use crate::foundation::error::{PosterError, PosterResult};
use crate::render::surface::{FrameRGBA, Surface};

/// Pause before capture so pending visual changes land.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);
/// Export resolution relative to the displayed surface.
pub const SUPERSAMPLE: u32 = 3;
/// Fixed prefix of every exported file name.
pub const FILE_PREFIX: &str = "happy-new-year-2026";

/// Where an export currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ExportState {
    /// No export running.
    Idle = 0,
    /// Waiting for the surface to settle, then snapshotting it.
    Capturing = 1,
    /// Encoding pixels to PNG.
    Encoding = 2,
    /// Handing bytes to the sink.
    Saving = 3,
}

impl ExportState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Capturing,
            2 => Self::Encoding,
            3 => Self::Saving,
            _ => Self::Idle,
        }
    }
}

/// Result of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSaved {
    /// File name handed to the sink.
    pub file_name: String,
    /// Where the sink stored it.
    pub path: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Encoded size in bytes.
    pub bytes: usize,
}

/// Tunables for [`Exporter`].
#[derive(Clone, Copy, Debug)]
pub struct ExportOpts {
    /// Wait before capture.
    pub settle_delay: Duration,
    /// Capture scale factor.
    pub scale: u32,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            settle_delay: SETTLE_DELAY,
            scale: SUPERSAMPLE,
        }
    }
}

/// Snapshots a surface into a PNG file. At most one export runs at a time per exporter.
pub struct Exporter {
    busy: AtomicBool,
    state: AtomicU8,
    last_millis: AtomicU64,
    opts: ExportOpts,
    sink: Arc<dyn FileSink>,
    notifier: Arc<dyn Notifier>,
}

/// Releases the busy flag and resets the state on every exit path.
struct BusyGuard<'a> {
    exporter: &'a Exporter,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.exporter.set_state(ExportState::Idle);
        self.exporter.busy.store(false, Ordering::Release);
    }
}

impl Exporter {
    /// Exporter with default options.
    pub fn new(sink: Arc<dyn FileSink>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_opts(sink, notifier, ExportOpts::default())
    }

    /// Exporter with explicit options.
    pub fn with_opts(
        sink: Arc<dyn FileSink>,
        notifier: Arc<dyn Notifier>,
        opts: ExportOpts,
    ) -> Self {
        Self {
            busy: AtomicBool::new(false),
            state: AtomicU8::new(ExportState::Idle as u8),
            last_millis: AtomicU64::new(0),
            opts,
            sink,
            notifier,
        }
    }

    /// Current state. Never `Idle` while [`Exporter::is_busy`] holds.
    pub fn state(&self) -> ExportState {
        match ExportState::from_u8(self.state.load(Ordering::Acquire)) {
            ExportState::Idle if self.is_busy() => ExportState::Capturing,
            s => s,
        }
    }

    /// `true` while an export is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Notifier shared with the exporter.
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Capture `surface`, encode it and save it.
    ///
    /// A call made while another export is running returns [`PosterError::Busy`] and does
    /// nothing else. Any other failure is reported through the notifier and returned; the busy
    /// flag is always released.
    #[tracing::instrument(level = "info", skip_all)]
    pub fn export<S: Surface + ?Sized>(&self, surface: &mut S) -> PosterResult<FileSaved> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("export requested while another is in flight");
            return Err(PosterError::Busy);
        }
        let _guard = BusyGuard { exporter: self };
        self.set_state(ExportState::Capturing);

        std::thread::sleep(self.opts.settle_delay);

        match self.run(surface) {
            Ok(saved) => {
                tracing::info!(
                    file = %saved.file_name,
                    width = saved.width,
                    height = saved.height,
                    bytes = saved.bytes,
                    "poster exported"
                );
                self.notifier.notify(Notification::export_succeeded());
                Ok(saved)
            }
            Err(e) => {
                tracing::error!(error = %e, "poster export failed");
                self.notifier.notify(Notification::export_failed());
                Err(e)
            }
        }
    }

    fn run<S: Surface + ?Sized>(&self, surface: &mut S) -> PosterResult<FileSaved> {
        let frame = surface.capture(self.opts.scale)?;

        self.set_state(ExportState::Encoding);
        let png = encode_png(&frame)?;

        self.set_state(ExportState::Saving);
        let file_name = file_name_for(self.next_millis());
        let path = self.sink.save(&file_name, &png)?;

        Ok(FileSaved {
            file_name,
            path,
            width: frame.width,
            height: frame.height,
            bytes: png.len(),
        })
    }

    fn set_state(&self, s: ExportState) {
        self.state.store(s as u8, Ordering::Release);
    }

    /// Wall-clock millis, bumped past the previous export so names never repeat.
    fn next_millis(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let prev = self
            .last_millis
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or(0);
        now.max(prev.saturating_add(1))
    }
}

/// Name of the file exported at `millis` since the Unix epoch.
pub fn file_name_for(millis: u64) -> String {
    format!("{FILE_PREFIX}-{millis}.png")
}

/// Encode a frame as PNG, un-premultiplying first when needed.
pub fn encode_png(frame: &FrameRGBA) -> PosterResult<Vec<u8>> {
    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba).ok_or_else(|| {
        PosterError::encode(format!(
            "frame buffer does not match {}x{}",
            frame.width, frame.height
        ))
    })?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| PosterError::encode(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
