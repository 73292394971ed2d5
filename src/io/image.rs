//! Image sources, canvases and sinks backed by the `image` crate
//!
//! The reconstruction algorithms only see the [`ImageSource`] and
//! [`ImageSink`] traits. [`RasterSource`] keeps a decoded RGBA image in memory
//! and [`FileSink`] writes canvases to disk, creating parent directories first.

use crate::geometry::placement::{ImageSize, Offset, Rect, TilePlacement, Transform};
use crate::io::error::{Result, TileError, extraction_error, invalid_geometry};
use image::{RgbaImage, imageops};
use std::path::{Path, PathBuf};

/// Anything tiles can be sampled from
///
/// Implementations must be shareable across extraction threads; each call
/// returns an independent buffer.
pub trait ImageSource: Sync {
    /// Dimensions of the source
    fn size(&self) -> ImageSize;

    /// Sample `placement.source_rect`, applying `placement.transform`
    ///
    /// # Errors
    ///
    /// Returns `Extraction` naming the placement index and rectangle when the
    /// rectangle cannot be sampled
    fn extract(&self, placement: &TilePlacement) -> Result<RgbaImage>;
}

/// Destination for finished canvases
pub trait ImageSink {
    /// Source type produced when a persisted canvas is read back
    type Reopened: ImageSource;

    /// Allocate a fully transparent canvas
    fn allocate(&self, size: ImageSize) -> Canvas {
        Canvas::blank(size)
    }

    /// Write `canvas` to `destination`
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written
    fn persist(&self, canvas: &Canvas, destination: &Path) -> Result<PersistedCanvas>;

    /// Read a previously persisted canvas back as a new source
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas cannot be read or its size changed
    fn reopen(&self, persisted: &PersistedCanvas) -> Result<Self::Reopened>;
}

/// Decoded RGBA image held in memory
#[derive(Debug, Clone)]
pub struct RasterSource {
    pixels: RgbaImage,
}

impl RasterSource {
    /// Decode the image at `path`
    ///
    /// # Errors
    ///
    /// Returns `SourceUnreadable` if the file is missing, cannot be decoded or
    /// has a zero dimension
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|e| TileError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let source = Self::checked(decoded.to_rgba8(), path)?;
        tracing::debug!(path = %path.display(), size = %source.size(), "opened source image");
        Ok(source)
    }

    /// Wrap an already decoded image
    ///
    /// # Errors
    ///
    /// Returns `SourceUnreadable` if either dimension is zero
    pub fn from_image(pixels: RgbaImage) -> Result<Self> {
        Self::checked(pixels, Path::new("<memory>"))
    }

    fn checked(pixels: RgbaImage, origin: &Path) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(TileError::SourceUnreadable {
                path: origin.to_path_buf(),
                reason: format!(
                    "image size unknown ({}x{})",
                    pixels.width(),
                    pixels.height()
                ),
            });
        }
        Ok(Self { pixels })
    }

    /// Borrow the decoded pixels
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl ImageSource for RasterSource {
    fn size(&self) -> ImageSize {
        ImageSize::new(self.pixels.width(), self.pixels.height())
    }

    fn extract(&self, placement: &TilePlacement) -> Result<RgbaImage> {
        let rect = placement.source_rect;
        let size = self.size();
        if rect.is_empty() {
            return Err(extraction_error(placement.index, rect, "empty rectangle"));
        }
        if !rect.fits_within(size) {
            return Err(extraction_error(
                placement.index,
                rect,
                format!("rectangle exceeds {size} source"),
            ));
        }

        let buffer = match placement.transform {
            Transform::None => crop(&self.pixels, rect),
            Transform::MirrorHorizontal => {
                let mut buffer = crop(&self.pixels, rect);
                imageops::flip_horizontal_in_place(&mut buffer);
                buffer
            }
            Transform::MirrorVertical => {
                let mut buffer = crop(&self.pixels, rect);
                imageops::flip_vertical_in_place(&mut buffer);
                buffer
            }
            Transform::Rotate180 => {
                let unrotated = rect.rotated_within(size).ok_or_else(|| {
                    extraction_error(placement.index, rect, "rotated rectangle out of bounds")
                })?;
                let mut buffer = crop(&self.pixels, unrotated);
                imageops::rotate180_in_place(&mut buffer);
                buffer
            }
        };
        Ok(buffer)
    }
}

fn crop(pixels: &RgbaImage, rect: Rect) -> RgbaImage {
    imageops::crop_imm(pixels, rect.left, rect.top, rect.width, rect.height).to_image()
}

/// Mutable RGBA buffer owned by one reconstruction pass
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Fully transparent canvas of `size`
    pub fn blank(size: ImageSize) -> Self {
        Self {
            pixels: RgbaImage::new(size.width, size.height),
        }
    }

    /// Dimensions of the canvas
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.pixels.width(), self.pixels.height())
    }

    /// Paste every buffer at its offset in a single batch
    ///
    /// Buffers are copied rather than blended, so with disjoint destinations
    /// the result does not depend on batch order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if any buffer would extend past the canvas;
    /// the canvas is left untouched in that case
    pub fn composite(&mut self, batch: &[(RgbaImage, Offset)]) -> Result<()> {
        let size = self.size();
        for (buffer, offset) in batch {
            let dest = Rect::new(offset.left, offset.top, buffer.width(), buffer.height());
            if !dest.fits_within(size) {
                return Err(invalid_geometry(format!(
                    "tile {dest} does not fit on {size} canvas"
                )));
            }
        }
        for (buffer, offset) in batch {
            imageops::replace(
                &mut self.pixels,
                buffer,
                i64::from(offset.left),
                i64::from(offset.top),
            );
        }
        Ok(())
    }

    /// Borrow the pixels
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Take ownership of the pixels
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

/// Handle to a canvas that has been fully written to its destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCanvas {
    /// Where the canvas was written
    pub path: PathBuf,
    /// Dimensions of the written canvas
    pub size: ImageSize,
}

/// Writes canvases to the file system; the format follows the extension
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl ImageSink for FileSink {
    type Reopened = RasterSource;

    fn persist(&self, canvas: &Canvas, destination: &Path) -> Result<PersistedCanvas> {
        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| TileError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        canvas
            .pixels()
            .save(destination)
            .map_err(|e| TileError::SinkWrite {
                path: destination.to_path_buf(),
                source: e,
            })?;

        tracing::info!(path = %destination.display(), size = %canvas.size(), "persisted canvas");
        Ok(PersistedCanvas {
            path: destination.to_path_buf(),
            size: canvas.size(),
        })
    }

    fn reopen(&self, persisted: &PersistedCanvas) -> Result<RasterSource> {
        let source = RasterSource::open(&persisted.path)?;
        if source.size() != persisted.size {
            return Err(TileError::SourceUnreadable {
                path: persisted.path.clone(),
                reason: format!(
                    "expected {} canvas, found {}",
                    persisted.size,
                    source.size()
                ),
            });
        }
        Ok(source)
    }
}
