//! Tests for command-line parsing and run orchestration

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::ffi::OsString;
    use std::path::PathBuf;
    use tiledice::TileError;
    use tiledice::geometry::{ImageSize, RoundingMode};
    use tiledice::io::cli::{AlternationArg, Cli, ModeArg, Runner};
    use tiledice::io::configuration::{DEFAULT_OUTPUT, DEFAULT_RATIO};
    use tiledice::mosaic::{AlternationPolicy, Mode};

    // Tests CLI parsing with only the required image argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "photo.png"]);

        assert_eq!(cli.image, PathBuf::from("photo.png"));
        assert!((cli.ratio - DEFAULT_RATIO).abs() < f64::EPSILON);
        assert_eq!(cli.chunks, None);
        assert_eq!(cli.size, None);
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(cli.mode, ModeArg::Dice);
        assert_eq!(cli.alternation, AlternationArg::Flip);
        assert_eq!(cli.threads, None);
        assert!(!cli.quiet);
    }

    // Tests CLI parsing with all available arguments
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "photo.png",
            "--ratio",
            "2.5",
            "--chunks",
            "12",
            "--size",
            "30",
            "--output",
            "out/woven.png",
            "--mode",
            "weave",
            "--alternation",
            "source",
            "--rounding",
            "round",
            "--threads",
            "3",
            "--quiet",
        ]);

        assert!((cli.ratio - 2.5).abs() < f64::EPSILON);
        assert_eq!(cli.chunks, Some(12));
        assert_eq!(cli.size, Some(30));
        assert_eq!(cli.output, PathBuf::from("out/woven.png"));
        assert_eq!(cli.mode, ModeArg::Weave);
        assert_eq!(cli.alternation, AlternationArg::Source);
        assert_eq!(cli.threads, Some(3));
        assert!(cli.quiet);
    }

    // Tests short flag parsing
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "program", "photo.png", "-r", "3", "-c", "8", "-o", "x.png", "-m", "weave", "-a",
            "flip", "-q",
        ]);

        assert!((cli.ratio - 3.0).abs() < f64::EPSILON);
        assert_eq!(cli.chunks, Some(8));
        assert_eq!(cli.output, PathBuf::from("x.png"));
        assert_eq!(cli.mode, ModeArg::Weave);
        assert!(!cli.should_show_progress());
    }

    // Tests negative counts reach geometry validation instead of the parser
    #[test]
    fn test_cli_negative_values_parse() {
        let cli = Cli::parse_from(["program", "photo.png", "-c", "-3", "-s", "-1"]);

        assert_eq!(cli.chunks, Some(-3));
        assert_eq!(cli.size, Some(-1));
    }

    // Tests conversion into a run configuration
    // Verified by mapping both alternation arguments to the same policy
    #[test]
    fn test_to_config() {
        let dice = Cli::parse_from(["program", "a.png", "-a", "source"]).to_config();
        assert_eq!(dice.mode, Mode::Dice);
        assert_eq!(dice.layout.rounding, RoundingMode::Floor);

        let flip = Cli::parse_from(["program", "a.png", "-m", "weave", "-c", "4"]).to_config();
        assert_eq!(flip.mode, Mode::Weave(AlternationPolicy::AlternateFlip));
        assert_eq!(flip.layout.requested_chunks, Some(4));

        let source = Cli::parse_from([
            "program", "a.png", "-m", "weave", "-a", "source", "-s", "9", "--rounding", "round",
        ])
        .to_config();
        assert_eq!(source.mode, Mode::Weave(AlternationPolicy::AlternateSource));
        assert_eq!(source.layout.requested_tile_size, Some(9));
        assert_eq!(source.layout.rounding, RoundingMode::Round);
    }

    // Tests a full run writes the diced output
    #[test]
    fn test_runner_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.png");
        let output = dir.path().join("diced.png");
        RgbaImage::from_pixel(100, 100, Rgba([10, 20, 30, 255]))
            .save(&input)
            .unwrap();

        let args: Vec<OsString> = vec![
            "program".into(),
            input.clone().into_os_string(),
            "-c".into(),
            "10".into(),
            "-o".into(),
            output.clone().into_os_string(),
            "-q".into(),
        ];
        let cli = Cli::parse_from(args);
        let persisted = Runner::new(cli).run().unwrap();

        assert_eq!(persisted.path, output);
        assert_eq!(persisted.size, ImageSize::new(42, 42));
        assert!(output.exists());
    }

    // Tests zero threads is rejected before reading anything
    #[test]
    fn test_runner_rejects_zero_threads() {
        let cli = Cli::parse_from(["program", "missing.png", "-t", "0", "-q"]);
        let result = Runner::new(cli).run();

        assert!(matches!(
            result,
            Err(TileError::InvalidParameter {
                parameter: "threads",
                ..
            })
        ));
    }
}
