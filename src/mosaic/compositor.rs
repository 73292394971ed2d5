//! Concurrent extraction and batch compositing
//!
//! Every placement is sampled on a rayon pool with no ordering between tasks.
//! Only after the whole batch has resolved is a canvas allocated, filled in a
//! single composite call and handed to the sink. A failed extraction fails the
//! batch and nothing is written.

use crate::geometry::placement::{ImageSize, Offset, TilePlacement};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{ImageSink, ImageSource, PersistedCanvas};
use crate::io::progress::ProgressManager;
use image::RgbaImage;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::Path;

/// Runs scatter/gather passes on a dedicated thread pool
pub struct Compositor {
    pool: rayon::ThreadPool,
    progress: ProgressManager,
}

impl Compositor {
    /// Create a compositor with `threads` workers, or rayon's default
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `threads` is zero or the pool cannot be built
    pub fn new(threads: Option<usize>, progress: ProgressManager) -> Result<Self> {
        if threads == Some(0) {
            return Err(invalid_parameter("threads", &0, &"must be at least 1"));
        }

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build().map_err(|e| {
            invalid_parameter(
                "threads",
                &threads.map_or_else(|| "default".to_string(), |n| n.to_string()),
                &format!("failed to build thread pool: {e}"),
            )
        })?;

        Ok(Self { pool, progress })
    }

    /// Compositor with default threads and no visible progress
    ///
    /// # Errors
    ///
    /// Returns an error if the thread pool cannot be built
    pub fn quiet() -> Result<Self> {
        Self::new(None, ProgressManager::hidden())
    }

    /// Number of worker threads
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Sample every placement concurrently and wait for all of them
    ///
    /// # Errors
    ///
    /// Returns the first `Extraction` error observed; remaining results are
    /// discarded
    pub fn extract_all<S: ImageSource + ?Sized>(
        &self,
        source: &S,
        placements: &[TilePlacement],
        bar: &ProgressBar,
    ) -> Result<Vec<(RgbaImage, Offset)>> {
        self.pool.install(|| {
            placements
                .par_iter()
                .map(|placement| -> Result<(RgbaImage, Offset)> {
                    let buffer = source.extract(placement)?;
                    bar.inc(1);
                    Ok((buffer, placement.dest))
                })
                .collect()
        })
    }

    /// Run one full pass: extract, barrier, composite onto a blank canvas,
    /// persist to `destination`
    ///
    /// # Errors
    ///
    /// Returns an error if any extraction fails, a tile falls outside the
    /// canvas, or the sink cannot persist
    pub fn run_pass<S, K>(
        &mut self,
        pass: &str,
        source: &S,
        placements: &[TilePlacement],
        canvas_size: ImageSize,
        sink: &K,
        destination: &Path,
    ) -> Result<PersistedCanvas>
    where
        S: ImageSource + ?Sized,
        K: ImageSink + ?Sized,
    {
        tracing::info!(
            pass,
            tiles = placements.len(),
            canvas = %canvas_size,
            threads = self.threads(),
            "starting pass"
        );
        let bar = self.progress.start_pass(pass, placements.len());

        let batch = self.extract_all(source, placements, &bar)?;
        tracing::debug!(pass, extracted = batch.len(), "extraction barrier reached");

        let mut canvas = sink.allocate(canvas_size);
        canvas.composite(&batch)?;
        let persisted = sink.persist(&canvas, destination)?;

        bar.finish();
        tracing::info!(pass, path = %persisted.path.display(), "finished pass");
        Ok(persisted)
    }

    /// Clear progress displays once the run is over
    pub fn finish(&self) {
        self.progress.finish();
    }
}
