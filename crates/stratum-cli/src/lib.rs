//! Stratum CLI library
//!
//! This module contains the core CLI logic for the Stratum layout tool.

pub mod error_adapter;

mod args;
mod config;
mod input;

pub use args::Args;

use std::{fs, io};

use log::{info, warn};

use stratum::{
    Layouter, StratumError,
    config::{Direction, LayoutConfig, LayoutEngine},
};

/// Run the Stratum CLI application
///
/// This function reads the input graph, computes its layout and writes the
/// positioned nodes, ordered edges and warnings to the output file as JSON.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StratumError` for:
/// - File I/O errors
/// - Configuration loading and validation errors
/// - Graph file parsing errors
pub fn run(args: &Args) -> Result<(), StratumError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let layout_config = apply_overrides(app_config.layout().clone(), args)?;
    layout_config.validate()?;

    let (nodes, edges) = input::load_graph(&args.input)?;

    let layout = Layouter::new(layout_config).compute(&nodes, &edges);
    if !layout.warnings().is_empty() {
        warn!(count = layout.warnings().len(); "Layout completed with warnings");
    }

    let json = serde_json::to_string_pretty(&layout).map_err(io::Error::from)?;
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}

/// Applies the command-line overrides on top of the file configuration.
fn apply_overrides(mut config: LayoutConfig, args: &Args) -> Result<LayoutConfig, StratumError> {
    if let Some(direction) = &args.direction {
        config = config.with_direction(direction.parse::<Direction>()?);
    }
    if let Some(engine) = &args.engine {
        config = config.with_engine(engine.parse::<LayoutEngine>()?);
    }
    Ok(config)
}
