//! Two-pass strip weaving
//!
//! The column pass cuts the source into vertical strips one tile wide and
//! writes them to an intermediate canvas. That canvas is persisted and read
//! back, then the row pass cuts it into horizontal strips one tile high and
//! writes the final canvas. Odd strips in both passes get the same alternation
//! treatment.

use crate::geometry::placement::{ImageSize, Offset, Rect, TilePlacement, Transform};
use crate::geometry::resolver::ResolvedGeometry;
use crate::io::error::Result;
use crate::io::image::{ImageSink, ImageSource, PersistedCanvas};
use crate::mosaic::compositor::Compositor;
use std::fmt;
use std::path::Path;

/// How odd-indexed strips differ from even ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlternationPolicy {
    /// Odd strips are mirrored in place across the strip axis
    #[default]
    AlternateFlip,
    /// Odd strips are read from the 180-degree rotated source at the mirrored
    /// position, without a per-strip mirror
    AlternateSource,
}

impl fmt::Display for AlternationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlternateFlip => write!(f, "alternate-flip"),
            Self::AlternateSource => write!(f, "alternate-source"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Columns,
    Rows,
}

/// Vertical strips for the column pass over an image of `image` size
pub fn column_placements(
    geometry: &ResolvedGeometry,
    image: ImageSize,
    policy: AlternationPolicy,
) -> Vec<TilePlacement> {
    strip_placements(geometry, image, policy, Axis::Columns)
}

/// Horizontal strips for the row pass over the intermediate canvas
pub fn row_placements(
    geometry: &ResolvedGeometry,
    intermediate: ImageSize,
    policy: AlternationPolicy,
) -> Vec<TilePlacement> {
    strip_placements(geometry, intermediate, policy, Axis::Rows)
}

fn strip_placements(
    geometry: &ResolvedGeometry,
    source: ImageSize,
    policy: AlternationPolicy,
    axis: Axis,
) -> Vec<TilePlacement> {
    let tile = geometry.tile_size;
    let (count, extent) = match axis {
        Axis::Columns => (geometry.column_count, geometry.output_width),
        Axis::Rows => (geometry.row_count, geometry.output_height),
    };

    (0..count)
        .map(|ii| {
            let along = ii * tile;
            let odd = ii % 2 == 1;
            let (sample_at, transform) = match (policy, odd) {
                (_, false) => (along, Transform::None),
                (AlternationPolicy::AlternateFlip, true) => (
                    along,
                    match axis {
                        Axis::Columns => Transform::MirrorHorizontal,
                        Axis::Rows => Transform::MirrorVertical,
                    },
                ),
                (AlternationPolicy::AlternateSource, true) => {
                    (extent - (along + tile), Transform::Rotate180)
                }
            };
            let (source_rect, dest) = match axis {
                Axis::Columns => (
                    Rect::new(sample_at, 0, tile, source.height),
                    Offset::new(along, 0),
                ),
                Axis::Rows => (
                    Rect::new(0, sample_at, geometry.output_width, tile),
                    Offset::new(0, along),
                ),
            };
            TilePlacement {
                index: ii as usize,
                source_rect,
                dest,
                transform,
            }
        })
        .collect()
}

/// Drives both weave passes through a shared compositor
pub struct WeaveReconstructor<'a> {
    compositor: &'a mut Compositor,
    policy: AlternationPolicy,
}

impl<'a> WeaveReconstructor<'a> {
    /// Create a reconstructor using `policy` for both passes
    pub const fn new(compositor: &'a mut Compositor, policy: AlternationPolicy) -> Self {
        Self { compositor, policy }
    }

    /// Run the column pass into `intermediate`, reopen it, then run the row
    /// pass into `output`
    ///
    /// # Errors
    ///
    /// Returns an error if either pass fails or the intermediate cannot be
    /// read back; the row pass never starts after a failed column pass
    pub fn run<S, K>(
        &mut self,
        source: &S,
        geometry: &ResolvedGeometry,
        sink: &K,
        intermediate: &Path,
        output: &Path,
    ) -> Result<PersistedCanvas>
    where
        S: ImageSource + ?Sized,
        K: ImageSink,
    {
        let image = source.size();
        tracing::info!(policy = %self.policy, "weaving {image} source");

        let columns = column_placements(geometry, image, self.policy);
        let column_canvas = ImageSize::new(geometry.output_width, image.height);
        let persisted = self.compositor.run_pass(
            "columns",
            source,
            &columns,
            column_canvas,
            sink,
            intermediate,
        )?;

        let reopened = sink.reopen(&persisted)?;
        let rows = row_placements(geometry, reopened.size(), self.policy);
        self.compositor.run_pass(
            "rows",
            &reopened,
            &rows,
            geometry.output_size(),
            sink,
            output,
        )
    }
}
