//! Command-line argument definitions for the Annoview CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input model, the output directory,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Annoview renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input model file
    #[arg(help = "Path to the input model file")]
    pub input: String,

    /// Directory the `<model>_icon.svg` and `<model>_diagram.svg` files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the evaluated annotation document of each view to stdout
    #[arg(long)]
    pub dump_document: bool,
}
