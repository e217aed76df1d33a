//! Stratum - deterministic layered layout for node/edge diagrams.
//!
//! Given nodes, directed edges and a [`config::LayoutConfig`], Stratum
//! computes a position for every node. Nodes are ranked into layers along
//! the flow direction, ordered within each layer to reduce crossings, and
//! spaced using their box sizes. Nodes may carry a positioning hint that
//! places them relative to another node instead.
//!
//! Layout is a pure function: identical input always yields identical
//! output, and the input is never modified.
//!
//! # Example
//!
//! ```
//! use stratum::{compute_layout, config::LayoutConfig, model::{Edge, Node}};
//!
//! let nodes = vec![Node::new("a"), Node::new("b")];
//! let edges = vec![Edge::new("e", "a", "b")];
//!
//! let layout = compute_layout(&nodes, &edges, &LayoutConfig::default());
//! let a = layout.position_of(&"a".into()).unwrap();
//! let b = layout.position_of(&"b".into()).unwrap();
//! assert!(b.x() > a.x());
//! ```

pub mod config;

mod error;
mod layout;
mod structure;

pub use stratum_core::{geometry, identifier, model};

pub use error::{ConfigError, LayoutError, StratumError};
pub use layout::{Layout, LayoutWarning};
pub use structure::Endpoint;

use log::debug;

use config::LayoutConfig;
use model::{Edge, Node};

/// Computes positions for `nodes` using `edges` and `config`.
///
/// Never fails: edges that reference unknown nodes are reported through
/// [`Layout::warnings`], and positioning hints that cannot be resolved keep
/// the layered position. Node ids are expected to be unique; if they are
/// not, the first node with a given id is kept.
pub fn compute_layout(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> Layout {
    layout::compute(nodes, edges, config)
}

/// Returns `nodes` and `edges` in the deterministic order used for layout.
///
/// Nodes follow a depth-first pre-order from the roots (nodes without
/// incoming edges), then any nodes not reached from a root. Edges are sorted
/// by target, then source position in that order, then id. Both outputs are
/// permutations of the input.
pub fn order(nodes: &[Node], edges: &[Edge]) -> (Vec<Node>, Vec<Edge>) {
    layout::order_graph(nodes, edges)
}

/// Reusable layout entry point bound to one configuration.
///
/// # Examples
///
/// ```
/// use stratum::{Layouter, config::{Direction, LayoutConfig}, model::Node};
///
/// let layouter = Layouter::new(LayoutConfig::spacious().with_direction(Direction::TopToBottom));
/// let layout = layouter.compute(&[Node::new("only")], &[]);
/// assert_eq!(layout.nodes().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Layouter {
    config: LayoutConfig,
}

impl Layouter {
    /// Create a new layouter with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used for every layout.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Computes a layout, see [`compute_layout`].
    pub fn compute(&self, nodes: &[Node], edges: &[Edge]) -> Layout {
        debug!(
            direction:% = self.config.direction(),
            engine:% = self.config.engine();
            "Layouter invoked"
        );
        layout::compute(nodes, edges, &self.config)
    }
}
