//! Dice-mode tile enumeration
//!
//! Walks the gapped source grid in row-major order. Gaps exist only in the
//! source sampling grid; destination tiles are packed edge to edge.

use crate::geometry::placement::{ImageSize, Offset, Rect, TilePlacement, Transform};
use crate::geometry::resolver::ResolvedGeometry;
use crate::io::error::{Result, invalid_geometry};

/// Enumerate every dice-mode placement for an image of `image` size
///
/// A column is added while the next tile and the gap after it stay inside the
/// image width, and a row likewise for the image height. This is the packing
/// the floor chunk count assumes, so the walk is checked against the resolved
/// column and row counts.
///
/// # Errors
///
/// Returns `InvalidGeometry` if the walk does not produce exactly
/// `column_count * row_count` placements
pub fn dice_placements(geometry: &ResolvedGeometry, image: ImageSize) -> Result<Vec<TilePlacement>> {
    let tile = u64::from(geometry.tile_size);
    let gap = u64::from(geometry.gap);
    let fits = |origin: u64, extent: u32| origin + tile + gap <= u64::from(extent);

    let mut placements = Vec::new();
    let mut iy = 0_u32;
    while fits(geometry.source_origin(iy), image.height) {
        let mut ix = 0_u32;
        while fits(geometry.source_origin(ix), image.width) {
            placements.push(TilePlacement {
                index: placements.len(),
                source_rect: Rect::new(
                    to_pixel(geometry.source_origin(ix))?,
                    to_pixel(geometry.source_origin(iy))?,
                    geometry.tile_size,
                    geometry.tile_size,
                ),
                dest: Offset::new(
                    to_pixel(geometry.dest_origin(ix))?,
                    to_pixel(geometry.dest_origin(iy))?,
                ),
                transform: Transform::None,
            });
            ix += 1;
        }
        iy += 1;
    }

    let expected = u64::from(geometry.column_count) * u64::from(geometry.row_count);
    if placements.len() as u64 != expected {
        return Err(invalid_geometry(format!(
            "grid walk over {image} produced {} tiles, resolved geometry expects {}x{}",
            placements.len(),
            geometry.column_count,
            geometry.row_count
        )));
    }

    Ok(placements)
}

fn to_pixel(value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|e| invalid_geometry(format!("coordinate {value}: {e}")))
}
