//! Runtime defaults and display constants

/// Default tile-size-to-gap ratio
pub const DEFAULT_RATIO: f64 = 1.0;

/// Default tile count along the horizontal axis in dice mode
pub const DEFAULT_CHUNKS: i64 = 20;

/// Default destination of the final image
pub const DEFAULT_OUTPUT: &str = "diced.png";

// Weave writes its column pass next to the final output
/// Suffix added to the output stem for the weave intermediate canvas
pub const INTERMEDIATE_SUFFIX: &str = "_columns";

/// Environment variable holding the tracing filter
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Filter used when the environment does not provide one
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Progress bar display settings
/// Template for per-pass extraction bars
pub const PROGRESS_TEMPLATE: &str = "{prefix:>8} [{bar:30.cyan/blue}] {pos}/{len} tiles";
