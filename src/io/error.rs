//! Error types for loading, tiling, compositing and persisting images

use crate::geometry::placement::Rect;
use std::path::PathBuf;

/// Main error type for all tiling operations
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    /// Source is missing, corrupt or has unknown dimensions
    #[error("Failed to read source image '{}': {reason}", path.display())]
    SourceUnreadable {
        /// Path of the source
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Inputs cannot tile the image
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// Which derived quantity is out of range
        reason: String,
    },

    /// A command-line or run parameter is unusable
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the parameter
        parameter: &'static str,
        /// Provided value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A tile rectangle could not be sampled; the whole batch is aborted
    #[error("Failed to extract tile {index} at {rect}: {reason}")]
    Extraction {
        /// Index of the offending placement
        index: usize,
        /// Source rectangle that was requested
        rect: Rect,
        /// What went wrong
        reason: String,
    },

    /// Canvas could not be written to its destination
    #[error("Failed to write image to '{}': {source}", path.display())]
    SinkWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying encoder or I/O error
        source: image::ImageError,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TileError>;

impl From<std::io::Error> for TileError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid geometry error
pub fn invalid_geometry(reason: impl Into<String>) -> TileError {
    TileError::InvalidGeometry {
        reason: reason.into(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TileError {
    TileError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an extraction error for the placement at `index`
pub fn extraction_error(index: usize, rect: Rect, reason: impl Into<String>) -> TileError {
    TileError::Extraction {
        index,
        rect,
        reason: reason.into(),
    }
}
