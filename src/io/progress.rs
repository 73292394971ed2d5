//! Progress display for extraction passes
//!
//! Each reconstruction pass gets one bar counting extracted tiles. Bars are
//! cheap handles that worker threads can advance concurrently.

use crate::io::configuration::PROGRESS_TEMPLATE;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static PASS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates the bars of every pass in a run
pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
    bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled: true,
            bars: Vec::new(),
        }
    }

    /// Create a manager whose bars are never drawn
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            enabled: false,
            bars: Vec::new(),
        }
    }

    /// Whether bars are drawn
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Add a bar for a pass extracting `tiles` tiles
    pub fn start_pass(&mut self, name: &str, tiles: usize) -> ProgressBar {
        let bar = if self.enabled {
            self.multi_progress.add(ProgressBar::new(tiles as u64))
        } else {
            ProgressBar::with_draw_target(Some(tiles as u64), ProgressDrawTarget::hidden())
        };
        bar.set_style(PASS_STYLE.clone());
        bar.set_prefix(name.to_string());
        self.bars.push(bar.clone());
        bar
    }

    /// Number of passes started so far
    pub fn pass_count(&self) -> usize {
        self.bars.len()
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for bar in &self.bars {
            bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
