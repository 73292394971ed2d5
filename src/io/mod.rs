//! Input/output plumbing around the reconstruction algorithms

/// Command-line interface and run orchestration
pub mod cli;
/// Default values and display constants
pub mod configuration;
/// Error types for every stage of a run
pub mod error;
/// Image source and sink implementations backed by the `image` crate
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Progress bars for extraction passes
pub mod progress;
