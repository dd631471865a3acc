use std::sync::mpsc;
use std::time::Instant;

use super::*;
use crate::export::notify::{NotificationKind, RecordingNotifier};
use crate::export::sink::{DirSink, MemorySink};
use crate::foundation::core::SurfaceSize;

struct SolidSurface {
    size: SurfaceSize,
}

impl Surface for SolidSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn capture(&mut self, scale: u32) -> PosterResult<FrameRGBA> {
        let px = self.size.scaled(scale)?;
        let mut data = Vec::new();
        for _ in 0..(px.width * px.height) {
            data.extend_from_slice(&[60, 30, 10, 255]);
        }
        Ok(FrameRGBA {
            width: px.width,
            height: px.height,
            data,
            premultiplied: true,
        })
    }
}

struct FailingSurface;

impl Surface for FailingSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::POSTER
    }

    fn capture(&mut self, _scale: u32) -> PosterResult<FrameRGBA> {
        Err(PosterError::capture("surface handle missing"))
    }
}

/// Signals once capture starts, then waits for a release message.
struct BlockingSurface {
    entered: mpsc::Sender<()>,
    release: mpsc::Receiver<()>,
    inner: SolidSurface,
}

impl Surface for BlockingSurface {
    fn size(&self) -> SurfaceSize {
        self.inner.size
    }

    fn capture(&mut self, scale: u32) -> PosterResult<FrameRGBA> {
        let _ = self.entered.send(());
        let _ = self.release.recv();
        self.inner.capture(scale)
    }
}

fn quick() -> ExportOpts {
    ExportOpts {
        settle_delay: Duration::ZERO,
        ..ExportOpts::default()
    }
}

fn small() -> SolidSurface {
    SolidSurface {
        size: SurfaceSize::new(7, 5).unwrap(),
    }
}

#[test]
fn export_triples_the_surface_and_names_the_file() {
    let sink = Arc::new(MemorySink::new());
    let notes = Arc::new(RecordingNotifier::new());
    let exporter = Exporter::with_opts(sink.clone(), notes.clone(), quick());

    let saved = exporter.export(&mut small()).unwrap();
    assert_eq!((saved.width, saved.height), (21, 15));
    assert!(saved.file_name.starts_with("happy-new-year-2026-"));
    assert!(saved.file_name.ends_with(".png"));

    let files = sink.files();
    assert_eq!(files.len(), 1);
    let img = image::load_from_memory(&files[0].1).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (21, 15));

    assert_eq!(notes.notifications(), vec![Notification::export_succeeded()]);
    assert_eq!(exporter.state(), ExportState::Idle);
    assert!(!exporter.is_busy());
}

#[test]
fn resolution_is_three_times_for_any_size() {
    let exporter = Exporter::with_opts(
        Arc::new(MemorySink::new()),
        Arc::new(RecordingNotifier::new()),
        quick(),
    );
    for (w, h) in [(1, 1), (13, 2), (40, 53)] {
        let mut s = SolidSurface {
            size: SurfaceSize::new(w, h).unwrap(),
        };
        let saved = exporter.export(&mut s).unwrap();
        assert_eq!((saved.width, saved.height), (w * 3, h * 3));
    }
}

#[test]
fn capture_failure_notifies_and_saves_nothing() {
    let sink = Arc::new(MemorySink::new());
    let notes = Arc::new(RecordingNotifier::new());
    let exporter = Exporter::with_opts(sink.clone(), notes.clone(), quick());

    let err = exporter.export(&mut FailingSurface).unwrap_err();
    assert!(matches!(err, PosterError::Capture(_)));
    assert!(sink.files().is_empty());
    let seen = notes.notifications();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind, NotificationKind::Destructive);
    assert_eq!(seen[0].description, "Failed to generate poster.");
    assert_eq!(exporter.state(), ExportState::Idle);

    // The exporter is usable again right away.
    exporter.export(&mut small()).unwrap();
    assert_eq!(sink.files().len(), 1);
}

#[test]
fn second_export_while_busy_is_rejected() {
    let sink = Arc::new(MemorySink::new());
    let notes = Arc::new(RecordingNotifier::new());
    let exporter = Arc::new(Exporter::with_opts(sink.clone(), notes.clone(), quick()));

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let mut blocking = BlockingSurface {
        entered: entered_tx,
        release: release_rx,
        inner: small(),
    };

    let worker = {
        let exporter = Arc::clone(&exporter);
        std::thread::spawn(move || exporter.export(&mut blocking))
    };
    entered_rx.recv().unwrap();
    assert!(exporter.is_busy());
    assert_eq!(exporter.state(), ExportState::Capturing);

    let err = exporter.export(&mut small()).unwrap_err();
    assert!(matches!(err, PosterError::Busy));
    assert!(sink.files().is_empty());
    assert!(notes.notifications().is_empty());

    release_tx.send(()).unwrap();
    worker.join().unwrap().unwrap();
    assert_eq!(sink.files().len(), 1);
    assert_eq!(notes.notifications().len(), 1);
    assert!(!exporter.is_busy());
}

#[test]
fn file_names_never_repeat() {
    let sink = Arc::new(MemorySink::new());
    let exporter = Exporter::with_opts(sink.clone(), Arc::new(RecordingNotifier::new()), quick());
    for _ in 0..5 {
        exporter.export(&mut small()).unwrap();
    }
    let mut names: Vec<_> = sink.files().into_iter().map(|(n, _)| n).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 5);
}

#[test]
fn default_export_waits_for_the_settle_delay() {
    let exporter = Exporter::new(
        Arc::new(MemorySink::new()),
        Arc::new(RecordingNotifier::new()),
    );
    let t0 = Instant::now();
    exporter.export(&mut small()).unwrap();
    assert!(t0.elapsed() >= SETTLE_DELAY);
}

#[test]
fn save_failure_follows_the_failure_path() {
    let dir = std::path::PathBuf::from("target").join("pipeline_save_failure");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
    // A regular file where the output directory should be.
    std::fs::write(&dir, b"not a directory").unwrap();

    let notes = Arc::new(RecordingNotifier::new());
    let exporter = Exporter::with_opts(Arc::new(DirSink::new(&dir)), notes.clone(), quick());
    let err = exporter.export(&mut small()).unwrap_err();
    assert!(matches!(err, PosterError::Save(_)));
    assert_eq!(notes.notifications(), vec![Notification::export_failed()]);
    assert!(!exporter.is_busy());

    let _ = std::fs::remove_file(&dir);
}

#[test]
fn encode_png_unpremultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    let png = encode_png(&frame).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    let px = img.get_pixel(0, 0).0;
    assert_eq!(px[3], 128);
    assert!(px[0].abs_diff(128) <= 1);
}

#[test]
fn encode_png_rejects_short_buffers() {
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 4],
        premultiplied: false,
    };
    assert!(matches!(encode_png(&frame), Err(PosterError::Encode(_))));
}

#[test]
fn file_name_pattern() {
    assert_eq!(
        file_name_for(1_767_225_600_000),
        "happy-new-year-2026-1767225600000.png"
    );
}

#[test]
fn state_is_capturing_during_the_settle_delay() {
    let sink = Arc::new(MemorySink::new());
    let exporter = Arc::new(Exporter::with_opts(
        sink.clone(),
        Arc::new(RecordingNotifier::new()),
        ExportOpts {
            settle_delay: Duration::from_millis(300),
            ..ExportOpts::default()
        },
    ));

    let worker = {
        let exporter = Arc::clone(&exporter);
        std::thread::spawn(move || exporter.export(&mut small()))
    };
    let t0 = Instant::now();
    while !exporter.is_busy() && t0.elapsed() < Duration::from_secs(2) {
        std::thread::yield_now();
    }
    assert!(exporter.is_busy());
    assert_eq!(exporter.state(), ExportState::Capturing);
    assert!(matches!(
        exporter.export(&mut small()),
        Err(PosterError::Busy)
    ));

    worker.join().unwrap().unwrap();
    assert_eq!(exporter.state(), ExportState::Idle);
    assert_eq!(sink.files().len(), 1);
}
