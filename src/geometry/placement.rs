//! Source rectangles, destination offsets and per-tile placement records
//!
//! A placement pairs the rectangle sampled from a source image with the
//! offset it is pasted at on the output canvas. Placements are built up
//! front as an immutable list and handed to the compositor in one batch.

use std::fmt;

/// Width and height of an image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Horizontal extent in pixels
    pub width: u32,
    /// Vertical extent in pixels
    pub height: u32,
}

impl ImageSize {
    /// Create a size from width and height
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge
    pub left: u32,
    /// Top edge
    pub top: u32,
    /// Horizontal extent
    pub width: u32,
    /// Vertical extent
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and extent
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Exclusive right edge, widened so it cannot overflow
    pub const fn right(&self) -> u64 {
        self.left as u64 + self.width as u64
    }

    /// Exclusive bottom edge, widened so it cannot overflow
    pub const fn bottom(&self) -> u64 {
        self.top as u64 + self.height as u64
    }

    /// True when the rectangle has no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when the whole rectangle lies inside an image of `size`
    pub const fn fits_within(&self, size: ImageSize) -> bool {
        self.right() <= size.width as u64 && self.bottom() <= size.height as u64
    }

    /// The same pixels expressed in the coordinates of an image of `size`
    /// rotated by 180 degrees
    ///
    /// Returns `None` when the rectangle does not fit inside `size`.
    pub const fn rotated_within(&self, size: ImageSize) -> Option<Self> {
        if !self.fits_within(size) {
            return None;
        }
        Some(Self {
            left: size.width - self.left - self.width,
            top: size.height - self.top - self.height,
            width: self.width,
            height: self.height,
        })
    }

    /// True when the two rectangles share at least one pixel
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (self.left as u64) < other.right()
            && (other.left as u64) < self.right()
            && (self.top as u64) < other.bottom()
            && (other.top as u64) < self.bottom()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.left, self.top
        )
    }
}

/// Top-left position of a buffer on the output canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    /// Horizontal position
    pub left: u32,
    /// Vertical position
    pub top: u32,
}

impl Offset {
    /// Create an offset
    pub const fn new(left: u32, top: u32) -> Self {
        Self { left, top }
    }
}

/// Pixel transform applied while a tile is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transform {
    /// Copy pixels unchanged
    #[default]
    None,
    /// Mirror the sampled buffer left to right
    MirrorHorizontal,
    /// Mirror the sampled buffer top to bottom
    MirrorVertical,
    /// Sample the rectangle from the whole source rotated by 180 degrees
    Rotate180,
}

/// One tile: where it is read from, where it goes and how it is transformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    /// Position in the generated list, used to identify failures
    pub index: usize,
    /// Rectangle sampled from the source
    pub source_rect: Rect,
    /// Where the sampled buffer lands on the canvas
    pub dest: Offset,
    /// Transform applied while sampling
    pub transform: Transform,
}

impl TilePlacement {
    /// Rectangle covered on the destination canvas
    pub const fn dest_rect(&self) -> Rect {
        Rect::new(
            self.dest.left,
            self.dest.top,
            self.source_rect.width,
            self.source_rect.height,
        )
    }
}
