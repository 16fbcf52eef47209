//! Command-line argument definitions for the Cipherflow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the recorded simulation result, the
//! credentials submitted with it, the output directory, configuration file
//! and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Cipherflow pipeline renderer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a recorded simulation result (JSON)
    #[arg(help = "Path to the simulation result file")]
    pub input: String,

    /// Directory receiving classical.svg and pqc.svg
    #[arg(short, long, default_value = "out")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Username submitted with the simulation request
    #[arg(short, long)]
    pub username: String,

    /// Password submitted with the simulation request
    #[arg(short, long)]
    pub password: String,

    /// Also write one SVG per animation transition
    #[arg(long)]
    pub frames: bool,

    /// Skip the reveal delays
    #[arg(long)]
    pub instant: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
