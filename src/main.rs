//! CLI entry point for the tile dicing and weaving tool

use clap::Parser;
use std::process::ExitCode;
use tiledice::io::cli::{Cli, Runner};

fn main() -> ExitCode {
    let cli = Cli::parse();
    // An already installed subscriber is kept as is
    let _ = tiledice::io::logging::init_logging();
    let mut runner = Runner::new(cli);
    match runner.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
