//! Layer assignment engines.
//!
//! An engine decides which layer every node belongs to and the order of the
//! nodes within each layer. Turning that decision into coordinates is shared
//! by all engines (see [`super::placement`]), so engines differ only in how
//! they rank and order.
//!
//! The engine is selected through [`LayoutEngine`] in the layout
//! configuration.

mod layered;
mod sugiyama;

use log::trace;

use stratum_core::geometry::Size;

use crate::{config::LayoutEngine, error::LayoutError};

/// Dense graph handed to engines.
///
/// Node `i` is the `i`-th node of the (ordered) diagram. Edges are resolved
/// `(source, target)` pairs in edge order; self-loops are never stored.
#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    sizes: Vec<Size>,
    edges: Vec<(usize, usize)>,
}

impl LayerGraph {
    /// Creates a graph with one node per size and no edges.
    pub fn new(sizes: Vec<Size>) -> Self {
        Self {
            sizes,
            edges: Vec::new(),
        }
    }

    /// Adds a directed edge. Self-loops are dropped since they cannot
    /// influence layering.
    ///
    /// # Panics
    /// Panics in debug mode if either endpoint is out of range.
    pub fn add_edge(&mut self, source: usize, target: usize) {
        debug_assert!(source < self.sizes.len() && target < self.sizes.len());
        if source == target {
            trace!(node = source; "Skipping self-loop");
            return;
        }
        self.edges.push((source, target));
    }

    pub fn node_count(&self) -> usize {
        self.sizes.len()
    }

    pub fn size(&self, idx: usize) -> Size {
        self.sizes[idx]
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Returns the edges with every cycle broken.
    ///
    /// A depth-first search in node order reverses each back edge, the
    /// standard way of making a graph acyclic before layering. Edge order is
    /// preserved. The search keeps its own stack.
    pub fn acyclic_edges(&self) -> Vec<(usize, usize)> {
        const UNSEEN: u8 = 0;
        const ACTIVE: u8 = 1;
        const DONE: u8 = 2;

        let node_count = self.node_count();
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for (edge_idx, &(source, _)) in self.edges.iter().enumerate() {
            adjacency[source].push(edge_idx);
        }

        let mut state = vec![UNSEEN; node_count];
        let mut reversed = vec![false; self.edges.len()];

        for start in 0..node_count {
            if state[start] != UNSEEN {
                continue;
            }
            state[start] = ACTIVE;
            // (node, index of the next outgoing edge to examine)
            let mut stack = vec![(start, 0usize)];

            while let Some(frame) = stack.last_mut() {
                let (node, cursor) = *frame;
                frame.1 += 1;

                let Some(&edge_idx) = adjacency[node].get(cursor) else {
                    state[node] = DONE;
                    stack.pop();
                    continue;
                };

                let target = self.edges[edge_idx].1;
                match state[target] {
                    UNSEEN => {
                        state[target] = ACTIVE;
                        stack.push((target, 0));
                    }
                    ACTIVE => reversed[edge_idx] = true,
                    _ => {}
                }
            }
        }

        self.edges
            .iter()
            .zip(reversed)
            .map(|(&(source, target), reverse)| {
                if reverse {
                    (target, source)
                } else {
                    (source, target)
                }
            })
            .collect()
    }
}

/// Layer membership and in-layer order.
///
/// `layers()[r]` lists the nodes of layer `r` in cross-axis order. Every node
/// of the graph appears in exactly one layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layering {
    layers: Vec<Vec<usize>>,
}

impl Layering {
    pub fn new(layers: Vec<Vec<usize>>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Vec<usize>] {
        &self.layers
    }
}

/// Trait implemented by layer assignment engines.
pub trait Engine {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Assigns every node of `graph` to a layer and orders each layer.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the engine cannot produce a layering.
    fn layering(&self, graph: &LayerGraph) -> Result<Layering, LayoutError>;
}

/// Creates the engine for the given configuration value.
pub fn engine_for(kind: LayoutEngine) -> Box<dyn Engine> {
    match kind {
        LayoutEngine::Layered => Box::new(layered::Engine::new()),
        LayoutEngine::Sugiyama => Box::new(sugiyama::Engine::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(node_count: usize, edges: &[(usize, usize)]) -> LayerGraph {
        let mut graph = LayerGraph::new(vec![Size::new(10.0, 10.0); node_count]);
        for &(source, target) in edges {
            graph.add_edge(source, target);
        }
        graph
    }

    #[test]
    fn test_self_loops_are_dropped() {
        let graph = graph(2, &[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(graph.edges(), &[(0, 1)]);
    }

    #[test]
    fn test_acyclic_edges_keeps_dag() {
        let graph = graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_eq!(graph.acyclic_edges(), graph.edges());
    }

    #[test]
    fn test_acyclic_edges_reverses_back_edge() {
        let graph = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(graph.acyclic_edges(), vec![(0, 1), (1, 2), (0, 2)]);
    }

    #[test]
    fn test_acyclic_edges_two_cycle() {
        let graph = graph(2, &[(1, 0), (0, 1)]);
        // DFS starts at node 0: 0 -> 1 is a tree edge, 1 -> 0 a back edge
        assert_eq!(graph.acyclic_edges(), vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn test_cross_edge_is_not_reversed() {
        // 0 -> 1, 0 -> 2, 2 -> 1: the last edge reaches a finished node
        let graph = graph(3, &[(0, 1), (0, 2), (2, 1)]);
        assert_eq!(graph.acyclic_edges(), graph.edges());
    }

    #[test]
    fn test_engine_for_names() {
        assert_eq!(engine_for(LayoutEngine::Layered).name(), "layered");
        assert_eq!(engine_for(LayoutEngine::Sugiyama).name(), "sugiyama");
    }
}
