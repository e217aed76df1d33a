//! Layout pipeline.
//!
//! A layout call runs four stages over borrowed input:
//!
//! 1. [`order`] fixes a deterministic node and edge order (optional, see
//!    [`LayoutConfig::sort_graph`]).
//! 2. An [`engines::Engine`] assigns layers and in-layer order.
//! 3. [`placement`] turns layers into anchored coordinates.
//! 4. [`rules`] applies per-node positioning hints.
//!
//! The result is a freshly owned [`Layout`]; the input is never modified.

mod engines;
mod order;
mod placement;
mod rules;

use std::{
    collections::HashSet,
    fmt::{self, Display},
};

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Serialize;

use stratum_core::{
    geometry::{Bounds, Point, Size},
    identifier::{EdgeId, NodeId},
    model::{Edge, Node},
};

use crate::{
    config::{LayoutConfig, LayoutEngine},
    structure::{DiagramGraph, Endpoint},
};

use engines::{Engine as _, LayerGraph, Layering};
use order::Ordering;

/// Recoverable problem found in the input of a layout call.
///
/// Warnings never abort layout. Each one is also logged at `warn` level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// An edge references a node that is not part of the node set. The edge
    /// is returned unchanged but does not influence placement.
    MalformedEdge {
        edge: EdgeId,
        missing: NodeId,
        endpoint: Endpoint,
    },
}

impl Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEdge {
                edge,
                missing,
                endpoint,
            } => {
                let end = match endpoint {
                    Endpoint::Source => "source",
                    Endpoint::Target => "target",
                };
                write!(f, "edge `{edge}` has unknown {end} node `{missing}`")
            }
        }
    }
}

/// Positioned nodes and ordered edges.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    warnings: Vec<LayoutWarning>,

    /// Resolved box size of each node, parallel to `nodes`
    #[serde(skip)]
    sizes: Vec<Size>,
}

impl Layout {
    /// Nodes with their computed positions, in output order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All input edges, in output order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Recoverable problems found in the input, such as malformed edges.
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    /// Returns the position of the node with the given id.
    pub fn position_of(&self, id: &NodeId) -> Option<Point> {
        self.nodes
            .iter()
            .find(|node| node.id() == id)
            .map(Node::position)
    }

    /// Bounding box of every node's box, or `None` for an empty layout.
    ///
    /// Positions hold the left edge on x and the centre on y.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes
            .iter()
            .zip(&self.sizes)
            .map(|(node, &size)| {
                let position = node.position();
                let top_left = position.with_y(position.y() - size.height() / 2.0);
                Bounds::new_from_top_left(top_left, size)
            })
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Splits the layout into nodes, edges and warnings.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>, Vec<LayoutWarning>) {
        (self.nodes, self.edges, self.warnings)
    }
}

/// Orders nodes and edges without placing them.
pub(crate) fn order_graph(nodes: &[Node], edges: &[Edge]) -> (Vec<Node>, Vec<Edge>) {
    let graph = DiagramGraph::new(nodes.iter().collect(), edges);
    let ordering = order::order(&graph);

    (
        ordering
            .nodes
            .iter()
            .map(|&idx| graph.node(idx).clone())
            .collect(),
        ordering
            .edges
            .iter()
            .map(|&idx| graph.edge(idx).clone())
            .collect(),
    )
}

/// Runs the full pipeline.
pub(crate) fn compute(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> Layout {
    info!(nodes = nodes.len(), edges = edges.len(); "Computing layout");

    let graph = DiagramGraph::new(unique_nodes(nodes), edges);
    let warnings = malformed_edge_warnings(&graph);

    let ordering = if config.sort_graph() {
        order::order(&graph)
    } else {
        Ordering::identity(&graph)
    };

    let layer_graph = build_layer_graph(&graph, &ordering, config);
    let layering = assign_layers(&layer_graph, config.engine());
    let centres = placement::centres(&layer_graph, &layering, config);

    let ordered_nodes: Vec<Node> = ordering
        .nodes
        .iter()
        .map(|&idx| graph.node(idx).clone())
        .collect();

    let base: IndexMap<NodeId, Point> = ordered_nodes
        .iter()
        .enumerate()
        .map(|(position, node)| {
            let anchor = placement::to_anchor(centres[position], layer_graph.size(position));
            (node.id().clone(), anchor)
        })
        .collect();

    let positions = rules::apply(&ordered_nodes, &base, config);

    let sizes: Vec<Size> = (0..layer_graph.node_count())
        .map(|idx| layer_graph.size(idx))
        .collect();
    let nodes: Vec<Node> = ordered_nodes
        .into_iter()
        .map(|node| {
            let position = positions
                .get(node.id())
                .copied()
                .unwrap_or_default();
            node.with_position(position)
        })
        .collect();
    let edges: Vec<Edge> = ordering
        .edges
        .iter()
        .map(|&idx| graph.edge(idx).clone())
        .collect();

    info!(
        nodes = nodes.len(),
        edges = edges.len(),
        warnings = warnings.len();
        "Layout computed"
    );

    Layout {
        nodes,
        edges,
        warnings,
        sizes,
    }
}

/// Drops nodes whose id was already seen; the first occurrence wins.
fn unique_nodes(nodes: &[Node]) -> Vec<&Node> {
    let mut seen: HashSet<&NodeId> = HashSet::with_capacity(nodes.len());
    nodes
        .iter()
        .filter(|&node| {
            let fresh = seen.insert(node.id());
            if !fresh {
                warn!(node = node.id().as_str(); "Duplicate node id, keeping the first occurrence");
            }
            fresh
        })
        .collect()
}

fn malformed_edge_warnings(graph: &DiagramGraph) -> Vec<LayoutWarning> {
    graph
        .malformed_edges()
        .map(|(edge, endpoint)| {
            let missing = match endpoint {
                Endpoint::Source => edge.source(),
                Endpoint::Target => edge.target(),
            };
            warn!(
                edge = edge.id().as_str(),
                missing = missing.as_str();
                "Edge references an unknown node"
            );
            LayoutWarning::MalformedEdge {
                edge: edge.id().clone(),
                missing: missing.clone(),
                endpoint,
            }
        })
        .collect()
}

/// Builds the engine input in the given order. Malformed edges are skipped.
fn build_layer_graph(graph: &DiagramGraph, ordering: &Ordering, config: &LayoutConfig) -> LayerGraph {
    let default_size = config.default_box_size();

    let mut position = vec![0usize; graph.node_count()];
    for (ordinal, &idx) in ordering.nodes.iter().enumerate() {
        position[idx] = ordinal;
    }

    let sizes = ordering
        .nodes
        .iter()
        .map(|&idx| graph.node(idx).size_or(default_size))
        .collect();

    let mut layer_graph = LayerGraph::new(sizes);
    for &edge_idx in &ordering.edges {
        if let Some((source, target)) = graph.endpoints(edge_idx) {
            layer_graph.add_edge(position[source], position[target]);
        }
    }
    layer_graph
}

/// Runs the configured engine, falling back to the built-in layered engine
/// and finally to a single layer in node order.
fn assign_layers(graph: &LayerGraph, kind: LayoutEngine) -> Layering {
    let engine = engines::engine_for(kind);
    debug!(
        engine = engine.name(),
        nodes = graph.node_count(),
        edges = graph.edges().len();
        "Assigning layers"
    );

    let result = engine.layering(graph).or_else(|err| {
        warn!(engine = engine.name(), err:%; "Layout engine failed, falling back to layered");
        engines::engine_for(LayoutEngine::Layered).layering(graph)
    });

    result.unwrap_or_else(|err| {
        warn!(err:%; "Layered engine failed, placing all nodes in one layer");
        Layering::new(vec![(0..graph.node_count()).collect()])
    })
}
