//! Command-line argument definitions for the Stratum CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, layout overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Stratum layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph file (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Flow direction override (left_to_right, top_to_bottom, lr, tb)
    #[arg(short, long)]
    pub direction: Option<String>,

    /// Layout engine override (layered, sugiyama)
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
