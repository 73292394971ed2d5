//! Gapped tile-grid dicing and two-pass strip weaving for raster images
//!
//! A source image is sampled on a regular grid of square tiles separated by gaps.
//! The tiles are then reassembled without the gaps ("dice"), or the image is cut
//! into alternating vertical and then horizontal strips that are mirrored or
//! sampled from a rotated copy before being recombined ("weave").

#![forbid(unsafe_code)]

/// Tile geometry derivation and placement records
pub mod geometry;
/// Input/output operations, configuration and error handling
pub mod io;
/// Reconstruction algorithms: grid dicing, batch compositing and weaving
pub mod mosaic;

pub use io::error::{Result, TileError};
