//! Geometry of the tile grid
//!
//! This module contains:
//! - Derivation of gap, tile size and chunk counts from user inputs
//! - Rectangles, offsets, transforms and the per-tile placement record

/// Source rectangles, destination offsets and tile placements
pub mod placement;
/// Parameter resolution from image size and layout inputs
pub mod resolver;

pub use placement::{ImageSize, Offset, Rect, TilePlacement, Transform};
pub use resolver::{LayoutParameters, ResolvedGeometry, RoundingMode};
