//! Command-line interface for dicing and weaving a single image

use crate::geometry::resolver::{LayoutParameters, RoundingMode};
use crate::io::configuration::{DEFAULT_OUTPUT, DEFAULT_RATIO};
use crate::io::error::Result;
use crate::io::image::{FileSink, PersistedCanvas};
use crate::io::progress::ProgressManager;
use crate::mosaic::compositor::Compositor;
use crate::mosaic::pipeline::{self, Mode, RunConfig};
use crate::mosaic::weave::AlternationPolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

/// Reconstruction mode as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Gapped grid packed edge to edge
    Dice,
    /// Column pass then row pass of alternating strips
    Weave,
}

/// Weave alternation policy as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlternationArg {
    /// Mirror odd strips in place
    Flip,
    /// Read odd strips from the rotated source
    Source,
}

/// Chunk count rounding as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoundingArg {
    /// Never overshoots the image
    Floor,
    /// Deprecated; may overshoot by one tile
    Round,
}

#[derive(Parser, Debug)]
#[command(name = "tiledice")]
#[command(
    author,
    version,
    about = "Dice an image into a gapped tile grid and reassemble it"
)]
/// Command-line arguments for the dicing tool
pub struct Cli {
    /// Source image
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Tile size divided by gap size
    #[arg(short, long, default_value_t = DEFAULT_RATIO)]
    pub ratio: f64,

    /// Tile count along the horizontal axis (20 in dice mode when unset)
    #[arg(short, long, allow_negative_numbers = true)]
    pub chunks: Option<i64>,

    /// Explicit tile size in pixels; overrides --chunks
    #[arg(short, long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// Destination image
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Reconstruction mode
    #[arg(short, long, value_enum, default_value_t = ModeArg::Dice)]
    pub mode: ModeArg,

    /// Odd strip treatment in weave mode
    #[arg(short, long, value_enum, default_value_t = AlternationArg::Flip)]
    pub alternation: AlternationArg,

    /// Rounding of derived chunk counts
    #[arg(long, value_enum, default_value_t = RoundingArg::Floor)]
    pub rounding: RoundingArg,

    /// Worker threads for tile extraction
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Convert parsed arguments into a run configuration
    pub fn to_config(&self) -> RunConfig {
        let rounding = match self.rounding {
            RoundingArg::Floor => RoundingMode::Floor,
            RoundingArg::Round => RoundingMode::Round,
        };
        let mode = match (self.mode, self.alternation) {
            (ModeArg::Dice, _) => Mode::Dice,
            (ModeArg::Weave, AlternationArg::Flip) => Mode::Weave(AlternationPolicy::AlternateFlip),
            (ModeArg::Weave, AlternationArg::Source) => {
                Mode::Weave(AlternationPolicy::AlternateSource)
            }
        };

        RunConfig {
            image: self.image.clone(),
            output: self.output.clone(),
            layout: LayoutParameters {
                ratio: self.ratio,
                requested_chunks: self.chunks,
                requested_tile_size: self.size,
                rounding,
            },
            mode,
        }
    }
}

/// Runs one invocation of the tool against the file system
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Reconstruct the image and persist the result
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read, the geometry is invalid,
    /// any tile fails to extract, or an output cannot be written
    pub fn run(&mut self) -> Result<PersistedCanvas> {
        let start_time = Instant::now();
        let config = self.cli.to_config();

        let progress = if self.cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };
        let mut compositor = Compositor::new(self.cli.threads, progress)?;

        let persisted = pipeline::run(&config, &mut compositor, &FileSink)?;
        tracing::info!(
            path = %persisted.path.display(),
            size = %persisted.size,
            elapsed_ms = start_time.elapsed().as_millis(),
            "wrote output"
        );
        Ok(persisted)
    }
}
