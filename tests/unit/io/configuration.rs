//! Tests for default values and display constants

#[cfg(test)]
mod tests {
    use tiledice::io::configuration::{
        DEFAULT_CHUNKS, DEFAULT_LOG_FILTER, DEFAULT_OUTPUT, DEFAULT_RATIO, INTERMEDIATE_SUFFIX,
        LOG_FILTER_ENV, PROGRESS_TEMPLATE,
    };

    // Tests the grid defaults
    // Verified by changing constant values
    #[test]
    fn test_grid_defaults() {
        assert!((DEFAULT_RATIO - 1.0).abs() < f64::EPSILON);
        assert_eq!(DEFAULT_CHUNKS, 20);
    }

    // Tests the output defaults
    #[test]
    fn test_output_defaults() {
        assert_eq!(DEFAULT_OUTPUT, "diced.png");
        assert!(!INTERMEDIATE_SUFFIX.is_empty());
        assert!(INTERMEDIATE_SUFFIX.starts_with('_'));
    }

    // Tests logging is filtered through the conventional variable
    #[test]
    fn test_logging_defaults() {
        assert_eq!(LOG_FILTER_ENV, "RUST_LOG");
        assert_eq!(DEFAULT_LOG_FILTER, "warn");
    }

    // Tests the progress template shows position and length
    #[test]
    fn test_progress_template() {
        assert!(PROGRESS_TEMPLATE.contains("{pos}"));
        assert!(PROGRESS_TEMPLATE.contains("{len}"));
        assert!(PROGRESS_TEMPLATE.contains("{prefix"));
    }
}
