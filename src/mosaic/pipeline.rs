//! Run configuration and mode dispatch
//!
//! A run opens the source, resolves the geometry before any extraction, then
//! hands off to dice or weave reconstruction.

use crate::geometry::placement::ImageSize;
use crate::geometry::resolver::{LayoutParameters, ResolvedGeometry};
use crate::io::configuration::INTERMEDIATE_SUFFIX;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{ImageSink, ImageSource, PersistedCanvas, RasterSource};
use crate::mosaic::compositor::Compositor;
use crate::mosaic::grid::dice_placements;
use crate::mosaic::weave::{AlternationPolicy, WeaveReconstructor};
use std::path::{Path, PathBuf};

/// Reconstruction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Sample the gapped grid and pack tiles edge to edge
    #[default]
    Dice,
    /// Two strip passes with the given alternation policy
    Weave(AlternationPolicy),
}

/// Everything a run needs, independent of how it was requested
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Source image path
    pub image: PathBuf,
    /// Destination of the final canvas
    pub output: PathBuf,
    /// Grid shaping inputs
    pub layout: LayoutParameters,
    /// Reconstruction mode
    pub mode: Mode,
}

impl RunConfig {
    /// Check mode-specific requirements
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if weave mode has neither a chunk count nor
    /// a tile size
    pub fn validate(&self) -> Result<()> {
        if matches!(self.mode, Mode::Weave(_))
            && self.layout.requested_chunks.is_none()
            && self.layout.requested_tile_size.is_none()
        {
            return Err(invalid_parameter(
                "chunks",
                &"unset",
                &"weave mode requires --chunks or --size",
            ));
        }
        Ok(())
    }

    /// Where weave mode writes its column pass
    pub fn intermediate_path(&self) -> PathBuf {
        intermediate_path_for(&self.output)
    }
}

/// Sibling of `output` with the intermediate suffix added to the stem
pub fn intermediate_path_for(output: &Path) -> PathBuf {
    let stem = output.file_stem().unwrap_or_default();
    let name = output.extension().map_or_else(
        || format!("{}{INTERMEDIATE_SUFFIX}", stem.to_string_lossy()),
        |extension| {
            format!(
                "{}{INTERMEDIATE_SUFFIX}.{}",
                stem.to_string_lossy(),
                extension.to_string_lossy()
            )
        },
    );

    output.parent().map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}

/// Open the configured source and reconstruct it
///
/// # Errors
///
/// Returns `SourceUnreadable`, `InvalidGeometry` or `InvalidParameter` before
/// any extraction starts, and extraction or sink errors after
pub fn run<K: ImageSink>(
    config: &RunConfig,
    compositor: &mut Compositor,
    sink: &K,
) -> Result<PersistedCanvas> {
    config.validate()?;
    let source = RasterSource::open(&config.image)?;
    reconstruct(&source, config, compositor, sink)
}

/// Reconstruct an already opened source according to `config`
///
/// # Errors
///
/// Returns `InvalidGeometry` or `InvalidParameter` before any extraction, and
/// extraction or sink errors after
pub fn reconstruct<S, K>(
    source: &S,
    config: &RunConfig,
    compositor: &mut Compositor,
    sink: &K,
) -> Result<PersistedCanvas>
where
    S: ImageSource + ?Sized,
    K: ImageSink,
{
    config.validate()?;
    let image: ImageSize = source.size();
    let geometry = ResolvedGeometry::resolve(image, &config.layout)?;

    let persisted = match config.mode {
        Mode::Dice => {
            let placements = dice_placements(&geometry, image)?;
            compositor.run_pass(
                "dice",
                source,
                &placements,
                geometry.output_size(),
                sink,
                &config.output,
            )?
        }
        Mode::Weave(policy) => WeaveReconstructor::new(compositor, policy).run(
            source,
            &geometry,
            sink,
            &config.intermediate_path(),
            &config.output,
        )?,
    };

    compositor.finish();
    Ok(persisted)
}
