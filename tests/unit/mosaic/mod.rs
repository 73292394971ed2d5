
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tiledice::geometry::{ImageSize, TilePlacement};
use tiledice::io::error::extraction_error;
use tiledice::io::image::{Canvas, ImageSink, ImageSource, PersistedCanvas, RasterSource};

/// Pixel (x, y) encodes its own coordinates in the red and green channels
pub fn coordinate_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
}

/// Sink keeping persisted canvases in memory
#[derive(Default)]
pub struct MemorySink {
    canvases: Mutex<HashMap<PathBuf, RgbaImage>>,
    persists: AtomicUsize,
}

impl MemorySink {
    pub fn persist_count(&self) -> usize {
        self.persists.load(Ordering::SeqCst)
    }

    pub fn canvas(&self, path: &Path) -> Option<RgbaImage> {
        self.canvases.lock().unwrap().get(path).cloned()
    }
}

impl ImageSink for MemorySink {
    type Reopened = RasterSource;

    fn persist(&self, canvas: &Canvas, destination: &Path) -> tiledice::Result<PersistedCanvas> {
        self.persists.fetch_add(1, Ordering::SeqCst);
        self.canvases
            .lock()
            .unwrap()
            .insert(destination.to_path_buf(), canvas.pixels().clone());
        Ok(PersistedCanvas {
            path: destination.to_path_buf(),
            size: canvas.size(),
        })
    }

    fn reopen(&self, persisted: &PersistedCanvas) -> tiledice::Result<RasterSource> {
        let pixels = self.canvas(&persisted.path).unwrap_or_default();
        RasterSource::from_image(pixels)
    }
}

/// Source wrapper counting extractions and optionally failing one placement
pub struct CountingSource {
    inner: RasterSource,
    fail_at: Option<usize>,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            inner: RasterSource::from_image(pixels).unwrap(),
            fail_at: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_at(pixels: RgbaImage, index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::new(pixels)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageSource for CountingSource {
    fn size(&self) -> ImageSize {
        self.inner.size()
    }

    fn extract(&self, placement: &TilePlacement) -> tiledice::Result<RgbaImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(placement.index) {
            return Err(extraction_error(
                placement.index,
                placement.source_rect,
                "injected failure",
            ));
        }
        self.inner.extract(placement)
    }
}
