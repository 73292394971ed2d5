//! Reconstruction algorithms
//!
//! This module contains:
//! - Dice-mode grid enumeration
//! - The scatter/gather compositor shared by every pass
//! - The two-pass weave reconstructor
//! - Run configuration and the end-to-end pipeline

/// Concurrent extraction and batch compositing
pub mod compositor;
/// Dice-mode tile enumeration
pub mod grid;
/// Run configuration and mode dispatch
pub mod pipeline;
/// Two-pass strip weaving
pub mod weave;

pub use compositor::Compositor;
pub use pipeline::{Mode, RunConfig};
pub use weave::AlternationPolicy;
