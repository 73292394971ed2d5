//! Derivation of gap, tile size and chunk counts from user inputs
//!
//! Tiles of `tile_size` pixels separated by `gap` pixels, with a leading and a
//! trailing gap, are packed along an axis of length `A`. `N` tiles need
//! `N * tile_size + (N + 1) * gap` pixels, so the largest count that fits is
//! `(A - gap) / (gap + tile_size)`, which is the closed form
//! `(A / gap - 1) / (1 + tile_size / gap)` used by the historic variants.

use crate::geometry::placement::ImageSize;
use crate::io::configuration::{DEFAULT_CHUNKS, DEFAULT_RATIO};
use crate::io::error::{Result, invalid_geometry};
use std::fmt;

/// Rounding applied to the fractional chunk count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Round toward zero; the packed extent never exceeds the axis
    #[default]
    Floor,
    /// Round to nearest
    ///
    /// Deprecated: can overshoot the axis by one tile. Kept only to reproduce
    /// old outputs.
    Round,
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floor => write!(f, "floor"),
            Self::Round => write!(f, "round"),
        }
    }
}

/// User inputs that shape the tile grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParameters {
    /// Tile size divided by gap size
    pub ratio: f64,
    /// Desired tile count along the horizontal axis
    pub requested_chunks: Option<i64>,
    /// Explicit tile size in pixels; wins over `requested_chunks`
    pub requested_tile_size: Option<i64>,
    /// Rounding applied to derived chunk counts
    pub rounding: RoundingMode,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            requested_chunks: None,
            requested_tile_size: None,
            rounding: RoundingMode::Floor,
        }
    }
}

impl LayoutParameters {
    /// Count-driven parameters
    pub const fn with_chunks(ratio: f64, chunks: i64) -> Self {
        Self {
            ratio,
            requested_chunks: Some(chunks),
            requested_tile_size: None,
            rounding: RoundingMode::Floor,
        }
    }

    /// Size-driven parameters
    pub const fn with_tile_size(ratio: f64, tile_size: i64) -> Self {
        Self {
            ratio,
            requested_chunks: None,
            requested_tile_size: Some(tile_size),
            rounding: RoundingMode::Floor,
        }
    }

    /// Same parameters with a different rounding policy
    #[must_use]
    pub const fn rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }
}

/// Fully derived grid geometry; immutable once computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedGeometry {
    /// Pixels between neighbouring tiles in the source
    pub gap: u32,
    /// Edge length of a square tile
    pub tile_size: u32,
    /// Tiles along the horizontal axis
    pub column_count: u32,
    /// Tiles along the vertical axis
    pub row_count: u32,
    /// `column_count * tile_size`
    pub output_width: u32,
    /// `row_count * tile_size`
    pub output_height: u32,
}

impl ResolvedGeometry {
    /// Derive the grid for an image of `image` size
    ///
    /// The horizontal axis fixes `gap` and `tile_size`; the vertical axis
    /// reuses them and only recomputes its own chunk count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if the ratio is not a positive finite number,
    /// a requested count or size is not positive, or the derived gap, tile
    /// size or either chunk count is not positive.
    pub fn resolve(image: ImageSize, params: &LayoutParameters) -> Result<Self> {
        let ratio = params.ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(invalid_geometry(format!(
                "ratio must be a positive number, got {ratio}"
            )));
        }
        if params.rounding == RoundingMode::Round {
            tracing::warn!("round-based chunk counts are deprecated and may overshoot the image");
        }

        let (gap, tile_size) = if let Some(size) = params.requested_tile_size {
            if size <= 0 {
                return Err(invalid_geometry(format!(
                    "tile size must be positive, got {size}"
                )));
            }
            let gap = (size as f64 / ratio).round();
            (gap, size as f64)
        } else {
            let chunks = params.requested_chunks.unwrap_or(DEFAULT_CHUNKS);
            if chunks <= 0 {
                return Err(invalid_geometry(format!(
                    "chunk count must be positive, got {chunks}"
                )));
            }
            let gap = (f64::from(image.width) / ((ratio + 1.0) * chunks as f64) + 1.0).round();
            (gap, (ratio * gap).round())
        };

        let gap = positive_u32("gap", gap)?;
        let tile_size = positive_u32("tile size", tile_size)?;

        let column_count = chunk_count(image.width, gap, tile_size, params.rounding);
        let row_count = chunk_count(image.height, gap, tile_size, params.rounding);
        if column_count <= 0 || row_count <= 0 {
            return Err(invalid_geometry(format!(
                "{image} image fits {column_count}x{row_count} tiles of {tile_size}px with {gap}px gaps"
            )));
        }
        let column_count = positive_u32("column count", column_count as f64)?;
        let row_count = positive_u32("row count", row_count as f64)?;

        let output_width = column_count
            .checked_mul(tile_size)
            .ok_or_else(|| invalid_geometry("output width overflows"))?;
        let output_height = row_count
            .checked_mul(tile_size)
            .ok_or_else(|| invalid_geometry("output height overflows"))?;

        let geometry = Self {
            gap,
            tile_size,
            column_count,
            row_count,
            output_width,
            output_height,
        };
        tracing::info!(
            gap,
            tile_size,
            column_count,
            row_count,
            output_width,
            output_height,
            "resolved tile geometry"
        );
        Ok(geometry)
    }

    /// Distance between the origins of neighbouring tiles in the source
    pub const fn stride(&self) -> u64 {
        self.gap as u64 + self.tile_size as u64
    }

    /// Source-space origin of the tile at `index` along either axis
    pub const fn source_origin(&self, index: u32) -> u64 {
        self.gap as u64 + index as u64 * self.stride()
    }

    /// Destination origin of the tile at `index` along either axis
    pub const fn dest_origin(&self, index: u32) -> u64 {
        index as u64 * self.tile_size as u64
    }

    /// Size of the final output canvas
    pub const fn output_size(&self) -> ImageSize {
        ImageSize::new(self.output_width, self.output_height)
    }
}

/// Number of `tile`-sized chunks with `gap` separators that fit along `axis`
///
/// Floor is evaluated exactly in integers; round uses the floating point
/// closed form. May be zero or negative when nothing fits.
pub fn chunk_count(axis: u32, gap: u32, tile: u32, rounding: RoundingMode) -> i64 {
    if gap == 0 {
        return 0;
    }
    match rounding {
        RoundingMode::Floor => {
            let axis = i64::from(axis);
            let gap = i64::from(gap);
            (axis - gap).div_euclid(gap + i64::from(tile))
        }
        RoundingMode::Round => {
            let gap = f64::from(gap);
            ((f64::from(axis) / gap - 1.0) / (1.0 + f64::from(tile) / gap)).round() as i64
        }
    }
}

fn positive_u32(name: &str, value: f64) -> Result<u32> {
    if !value.is_finite() || value < 1.0 || value > f64::from(u32::MAX) {
        return Err(invalid_geometry(format!(
            "derived {name} must be a positive pixel count, got {value}"
        )));
    }
    Ok(value as u32)
}
