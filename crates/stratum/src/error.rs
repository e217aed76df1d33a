//! Error types for Stratum operations.
//!
//! Layout itself is total: [`crate::compute_layout`] never fails on
//! well-typed input. The types here cover the surrounding concerns:
//! configuration validation, engine failures that the facade recovers from,
//! and the I/O of callers such as the CLI.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Stratum operations.
#[derive(Debug, Error)]
pub enum StratumError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to parse {path}: {message}")]
    Parse {
        path: String,
        message: String,
        /// Full text of the file that failed to parse
        src: String,
        /// Byte range of the offending input, if known
        span: Option<Range<usize>>,
    },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl StratumError {
    /// Creates a parse error for a file read by a caller.
    pub fn new_parse_error(
        path: impl Into<String>,
        src: impl Into<String>,
        message: impl Into<String>,
        span: Option<Range<usize>>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            src: src.into(),
            span,
        }
    }
}

/// Rejected [`crate::config::LayoutConfig`] values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number greater than zero, got {value}")]
    InvalidBoxSize { field: &'static str, value: f32 },

    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidSpacing { field: &'static str, value: f32 },

    #[error("Unknown {kind} `{value}`")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Failure of a placement engine.
///
/// The facade recovers from these by falling back to the built-in layered
/// engine, so they only reach callers that drive an engine directly.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Layout engine `{engine}` failed: {message}")]
    Engine {
        engine: &'static str,
        message: String,
    },

    #[error("Graph has {0} nodes, more than the engine can index")]
    TooLarge(usize),
}
