//! Graph orderer.
//!
//! Produces a deterministic linear order of nodes driven by reachability from
//! roots, and a matching order of edges. Running the layered placement on the
//! ordered graph makes rank and in-layer assignment independent of how the
//! caller happened to order its lists.
//!
//! Traversal is a depth-first pre-order:
//!
//! 1. Roots (nodes without incoming edges) are visited in node order. An
//!    edge from an unknown node still counts as incoming for its target.
//! 2. From each visited node, unvisited targets of its outgoing edges are
//!    visited in edge-list order.
//! 3. Nodes still unvisited afterwards (isolated cycles) are visited in node
//!    order with the same procedure.
//!
//! A node is marked visited before its neighbours are pushed, so cycles
//! terminate. The traversal uses an explicit stack; depth is bounded by the
//! node count, not by the call stack.

use std::cmp::Ordering as CmpOrdering;

use log::debug;

use stratum_core::identifier::NodeId;

use crate::structure::DiagramGraph;

/// Node and edge permutations, as indices into the graph's node and edge lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ordering {
    pub(crate) nodes: Vec<usize>,
    pub(crate) edges: Vec<usize>,
}

impl Ordering {
    /// The permutation that keeps input order.
    pub(crate) fn identity(graph: &DiagramGraph) -> Self {
        Self {
            nodes: (0..graph.node_count()).collect(),
            edges: (0..graph.edge_count()).collect(),
        }
    }
}

/// Computes the node and edge order of `graph`.
pub(crate) fn order(graph: &DiagramGraph) -> Ordering {
    let node_count = graph.node_count();
    debug!(nodes = node_count, edges = graph.edge_count(); "Ordering graph");

    let mut visited = vec![false; node_count];
    let mut nodes = Vec::with_capacity(node_count);

    let roots: Vec<usize> = graph.roots().collect();
    for root in roots.into_iter().chain(0..node_count) {
        visit(graph, root, &mut visited, &mut nodes);
    }

    let edges = order_edges(graph, &nodes);

    Ordering { nodes, edges }
}

/// Pre-order depth-first visit starting at `start`.
fn visit(graph: &DiagramGraph, start: usize, visited: &mut [bool], out: &mut Vec<usize>) {
    let mut stack = vec![start];

    while let Some(idx) = stack.pop() {
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        out.push(idx);

        // Reversed so the first outgoing edge is explored first
        let pending: Vec<usize> = graph
            .outgoing_nodes(idx)
            .filter(|&next| !visited[next])
            .collect();
        stack.extend(pending.into_iter().rev());
    }
}

/// Sorts edges by target ordinal, then source ordinal, then edge id.
///
/// An endpoint outside the node set sorts after every known node.
fn order_edges(graph: &DiagramGraph, node_order: &[usize]) -> Vec<usize> {
    let mut ordinal = vec![usize::MAX; graph.node_count()];
    for (position, &idx) in node_order.iter().enumerate() {
        ordinal[idx] = position;
    }

    let ordinal_of = |id: &NodeId| graph.index_of(id).map_or(usize::MAX, |idx| ordinal[idx]);
    let keys: Vec<(usize, usize)> = (0..graph.edge_count())
        .map(|edge_idx| {
            let edge = graph.edge(edge_idx);
            (ordinal_of(edge.target()), ordinal_of(edge.source()))
        })
        .collect();

    let mut edges: Vec<usize> = (0..graph.edge_count()).collect();
    edges.sort_by(|&a, &b| match keys[a].cmp(&keys[b]) {
        CmpOrdering::Equal => graph.edge(a).id().cmp(graph.edge(b).id()),
        other => other,
    });
    edges
}
