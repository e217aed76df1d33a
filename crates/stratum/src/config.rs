//! Configuration types for Stratum layouts.
//!
//! [`LayoutConfig`] is immutable for the duration of a layout call and is
//! supplied by the caller. It implements [`serde::Deserialize`] so it can be
//! loaded from a configuration file; every field falls back to the standard
//! profile when omitted.
//!
//! # Overview
//!
//! - [`LayoutConfig`] - Flow direction, default box size, spacing and engine selection.
//! - [`Direction`] - Which axis the layers progress along.
//! - [`LayoutEngine`] - Which engine assigns layers and in-layer order.
//!
//! # Example
//!
//! ```
//! # use stratum::config::{Direction, LayoutConfig};
//! let config = LayoutConfig::spacious().with_direction(Direction::TopToBottom);
//! assert_eq!(config.vertical_spacing(), 120.0);
//! assert!(config.validate().is_ok());
//! ```

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use stratum_core::geometry::Size;

use crate::error::ConfigError;

/// Axis along which consecutive layers are placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Layers progress along x; nodes of one layer are stacked along y.
    #[default]
    #[serde(alias = "lr")]
    LeftToRight,
    /// Layers progress along y; nodes of one layer are stacked along x.
    #[serde(alias = "tb")]
    TopToBottom,
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left_to_right" | "lr" => Ok(Self::LeftToRight),
            "top_to_bottom" | "tb" => Ok(Self::TopToBottom),
            _ => Err(ConfigError::UnknownVariant {
                kind: "direction",
                value: s.to_string(),
            }),
        }
    }
}

impl From<Direction> for &'static str {
    fn from(val: Direction) -> Self {
        match val {
            Direction::LeftToRight => "left_to_right",
            Direction::TopToBottom => "top_to_bottom",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Available engines for layer assignment and in-layer ordering.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Layered` - Built-in longest-path layering with barycenter ordering (default)
/// - `Sugiyama` - Delegates to the `rust-sugiyama` crate
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    #[default]
    Layered,
    Sugiyama,
}

impl FromStr for LayoutEngine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "layered" => Ok(Self::Layered),
            "sugiyama" => Ok(Self::Sugiyama),
            _ => Err(ConfigError::UnknownVariant {
                kind: "layout engine",
                value: s.to_string(),
            }),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Layered => "layered",
            LayoutEngine::Sugiyama => "sugiyama",
        }
    }
}

impl Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Layout configuration.
///
/// `horizontal_spacing` is always the gap along x and `vertical_spacing`
/// the gap along y. With [`Direction::LeftToRight`] the horizontal spacing
/// separates layers and the vertical spacing separates nodes of one layer;
/// [`Direction::TopToBottom`] swaps the roles.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    direction: Direction,
    default_box_width: f32,
    default_box_height: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    engine: LayoutEngine,

    /// Run the graph orderer before placement.
    sort_graph: bool,
}

impl Default for LayoutConfig {
    /// The standard profile.
    fn default() -> Self {
        Self {
            direction: Direction::LeftToRight,
            default_box_width: 150.0,
            default_box_height: 50.0,
            horizontal_spacing: 80.0,
            vertical_spacing: 50.0,
            engine: LayoutEngine::Layered,
            sort_graph: true,
        }
    }
}

impl LayoutConfig {
    /// The spacious profile: larger boxes and wider gaps.
    pub fn spacious() -> Self {
        Self {
            default_box_width: 200.0,
            default_box_height: 80.0,
            horizontal_spacing: 150.0,
            vertical_spacing: 120.0,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_default_box_size(mut self, size: Size) -> Self {
        self.default_box_width = size.width();
        self.default_box_height = size.height();
        self
    }

    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_sort_graph(mut self, sort_graph: bool) -> Self {
        self.sort_graph = sort_graph;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Box size used for nodes without a usable size of their own.
    pub fn default_box_size(&self) -> Size {
        Size::new(self.default_box_width, self.default_box_height)
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn sort_graph(&self) -> bool {
        self.sort_graph
    }

    /// Gap between consecutive layers.
    pub(crate) fn layer_spacing(&self) -> f32 {
        match self.direction {
            Direction::LeftToRight => self.horizontal_spacing,
            Direction::TopToBottom => self.vertical_spacing,
        }
    }

    /// Gap between neighbours within one layer.
    pub(crate) fn node_spacing(&self) -> f32 {
        match self.direction {
            Direction::LeftToRight => self.vertical_spacing,
            Direction::TopToBottom => self.horizontal_spacing,
        }
    }

    /// Checks that sizes and spacings can produce finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("default_box_width", self.default_box_width),
            ("default_box_height", self.default_box_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidBoxSize { field, value });
            }
        }

        for (field, value) in [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSpacing { field, value });
            }
        }

        Ok(())
    }
}
