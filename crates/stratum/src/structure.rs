//! Read-only adjacency view over a diagram's nodes and edges.
//!
//! Layout works on dense node indices rather than string ids. This module
//! builds that view once per layout call:
//!
//! - Node indices follow the order in which nodes were supplied
//! - Outgoing edges are kept per node in edge-list order
//! - Edges with an endpoint that is not a known node are recorded as
//!   malformed and never traversed
//!
//! A malformed edge whose target exists still counts as incoming for that
//! target, so the target is not a root. Self-loops count the same way: a
//! node whose only incoming edge is its own loop is not a root.

use std::collections::HashMap;

use stratum_core::{
    identifier::NodeId,
    model::{Edge, Node},
};

/// Which end of an edge failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Source,
    Target,
}

/// Adjacency view indexed by node position.
#[derive(Debug)]
pub(crate) struct DiagramGraph<'a> {
    nodes: Vec<&'a Node>,
    edges: &'a [Edge],
    node_index: HashMap<&'a NodeId, usize>,
    in_degree: Vec<usize>,
    outgoing: Vec<Vec<usize>>,
    malformed: Vec<(usize, Endpoint)>,
}

impl<'a> DiagramGraph<'a> {
    /// Builds the view. Node ids are expected to be unique; if they are not,
    /// the first occurrence owns the id.
    pub(crate) fn new(nodes: Vec<&'a Node>, edges: &'a [Edge]) -> Self {
        let mut node_index = HashMap::with_capacity(nodes.len());
        for (idx, &node) in nodes.iter().enumerate() {
            node_index.entry(node.id()).or_insert(idx);
        }

        let mut in_degree = vec![0; nodes.len()];
        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut malformed = Vec::new();

        for (edge_idx, edge) in edges.iter().enumerate() {
            let source = node_index.get(edge.source()).copied();
            let target = node_index.get(edge.target()).copied();

            match (source, target) {
                (Some(source), Some(target)) => {
                    outgoing[source].push(edge_idx);
                    in_degree[target] += 1;
                }
                (None, target) => {
                    if let Some(target) = target {
                        in_degree[target] += 1;
                    }
                    malformed.push((edge_idx, Endpoint::Source));
                }
                (Some(_), None) => malformed.push((edge_idx, Endpoint::Target)),
            }
        }

        Self {
            nodes,
            edges,
            node_index,
            in_degree,
            outgoing,
            malformed,
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, idx: usize) -> &'a Node {
        self.nodes[idx]
    }

    pub(crate) fn edge(&self, idx: usize) -> &'a Edge {
        &self.edges[idx]
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the index of the node with the given id.
    pub(crate) fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    /// Nodes without any incoming edge, in node order.
    pub(crate) fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(|&idx| self.in_degree[idx] == 0)
    }

    /// Target node indices of the node's outgoing edges, in edge-list order.
    pub(crate) fn outgoing_nodes(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.outgoing[idx].iter().map(|&edge_idx| {
            let target = self.edges[edge_idx].target();
            self.node_index[target]
        })
    }

    /// Resolved `(source, target)` node indices of an edge, or `None` if malformed.
    pub(crate) fn endpoints(&self, edge_idx: usize) -> Option<(usize, usize)> {
        let edge = &self.edges[edge_idx];
        Some((self.index_of(edge.source())?, self.index_of(edge.target())?))
    }

    /// Edges that reference an unknown node, with the first unresolved end.
    pub(crate) fn malformed_edges(&self) -> impl Iterator<Item = (&'a Edge, Endpoint)> + '_ {
        self.malformed
            .iter()
            .map(|&(edge_idx, endpoint)| (&self.edges[edge_idx], endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|&id| Node::new(id)).collect()
    }

    fn graph<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> DiagramGraph<'a> {
        DiagramGraph::new(nodes.iter().collect(), edges)
    }

    #[test]
    fn test_graph_new() {
        let graph = graph(&[], &[]);

        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.roots().count(), 0);
    }

    #[test]
    fn test_roots() {
        let nodes = nodes(&["root1", "root2", "child"]);
        let edges = vec![Edge::new("e", "root1", "child")];
        let graph = graph(&nodes, &edges);

        let roots: Vec<usize> = graph.roots().collect();
        assert_eq!(roots, vec![0, 1]);
    }

    #[test]
    fn test_target_of_dangling_edge_is_not_root() {
        let nodes = nodes(&["a", "r"]);
        let edges = vec![Edge::new("e", "ghost", "a")];
        let graph = graph(&nodes, &edges);

        let roots: Vec<usize> = graph.roots().collect();
        assert_eq!(roots, vec![1]);
    }

    #[test]
    fn test_outgoing_follows_edge_order() {
        let nodes = nodes(&["source", "target1", "target2", "isolated"]);
        let edges = vec![
            Edge::new("e1", "source", "target2"),
            Edge::new("e2", "source", "target1"),
            Edge::new("e3", "target1", "target2"),
        ];
        let graph = graph(&nodes, &edges);

        assert_eq!(graph.outgoing_nodes(0).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(graph.outgoing_nodes(1).collect::<Vec<_>>(), vec![2]);
        assert_eq!(graph.outgoing_nodes(3).count(), 0);
    }

    #[test]
    fn test_self_loop() {
        let nodes = nodes(&["self_loop"]);
        let edges = vec![Edge::new("e", "self_loop", "self_loop")];
        let graph = graph(&nodes, &edges);

        // Node with self-loop is not a root (has incoming edge from itself)
        assert_eq!(graph.roots().count(), 0);
        assert_eq!(graph.outgoing_nodes(0).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_multiple_edges_between_same_nodes() {
        let nodes = nodes(&["source", "target"]);
        let edges = vec![
            Edge::new("e1", "source", "target"),
            Edge::new("e2", "source", "target"),
            Edge::new("e3", "target", "source"),
        ];
        let graph = graph(&nodes, &edges);

        assert_eq!(graph.outgoing_nodes(0).count(), 2);
        assert_eq!(graph.outgoing_nodes(1).count(), 1);
        assert_eq!(graph.endpoints(2), Some((1, 0)));
    }

    #[test]
    fn test_malformed_edges() {
        let nodes = nodes(&["a", "b"]);
        let edges = vec![
            Edge::new("ok", "a", "b"),
            Edge::new("bad_target", "a", "ghost"),
            Edge::new("bad_source", "ghost", "b"),
        ];
        let graph = graph(&nodes, &edges);

        let malformed: Vec<(&str, Endpoint)> = graph
            .malformed_edges()
            .map(|(edge, endpoint)| (edge.id().as_str(), endpoint))
            .collect();
        assert_eq!(
            malformed,
            vec![
                ("bad_target", Endpoint::Target),
                ("bad_source", Endpoint::Source)
            ]
        );

        // Malformed edges are never traversed
        assert_eq!(graph.outgoing_nodes(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![0]);
        assert_eq!(graph.endpoints(1), None);
    }

    #[test]
    fn test_duplicate_id_resolves_to_first() {
        let nodes = nodes(&["a", "a"]);
        let graph = graph(&nodes, &[]);

        assert_eq!(graph.index_of(&NodeId::from("a")), Some(0));
        assert_eq!(graph.index_of(&NodeId::from("missing")), None);
    }
}
