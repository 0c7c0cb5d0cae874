//! An interactive room planner built with Rust and the Bevy game engine.
//!
//! A place for everything, and everything in its place.

use anyhow::Result;
use clap::Parser;
use wardo::core;

/// Create and run the application with the given CLI arguments.
fn run_app(cli_args: core::cli::CliArgs) -> Result<()> {
    let mut app = core::app::create_app(cli_args)?;
    app.run();
    Ok(())
}

fn main() {
    let cli_args = core::cli::CliArgs::parse();
    if let Err(error) = run_app(cli_args) {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
