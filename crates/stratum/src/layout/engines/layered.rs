use log::{debug, trace};
use petgraph::{algo::toposort, graph::DiGraph};

use crate::{
    error::LayoutError,
    layout::engines::{self, LayerGraph, Layering},
};

const NAME: &str = "layered";

/// Built-in layered engine.
///
/// 1. Cycles are broken by reversing DFS back edges.
/// 2. Ranks are assigned by longest path from the roots.
/// 3. Each layer starts in node order and is refined by alternating
///    downward and upward barycenter sweeps. The ordering with the fewest
///    crossings between adjacent layers wins; ties keep the earlier one.
///
/// Every step is deterministic for a given node and edge order.
pub struct Engine {
    /// Number of barycenter sweeps (down and up count separately)
    sweeps: usize,
}

impl Engine {
    /// Create a new layered engine
    pub fn new() -> Self {
        Self { sweeps: 8 }
    }

    fn ranks(&self, node_count: usize, edges: &[(usize, usize)]) -> Result<Vec<usize>, LayoutError> {
        let mut dag = DiGraph::<(), ()>::with_capacity(node_count, edges.len());
        let indices: Vec<_> = (0..node_count).map(|_| dag.add_node(())).collect();
        for &(source, target) in edges {
            dag.add_edge(indices[source], indices[target], ());
        }

        let topo = toposort(&dag, None).map_err(|cycle| LayoutError::Engine {
            engine: NAME,
            message: format!(
                "cycle through node {} survived cycle breaking",
                cycle.node_id().index()
            ),
        })?;

        let mut ranks = vec![0usize; node_count];
        for node in topo {
            let rank = dag
                .neighbors_directed(node, petgraph::Direction::Incoming)
                .map(|pred| ranks[pred.index()] + 1)
                .max()
                .unwrap_or(0);
            ranks[node.index()] = rank;
        }

        Ok(ranks)
    }
}

impl engines::Engine for Engine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn layering(&self, graph: &LayerGraph) -> Result<Layering, LayoutError> {
        let node_count = graph.node_count();
        if node_count == 0 {
            return Ok(Layering::default());
        }

        let edges = graph.acyclic_edges();
        let ranks = self.ranks(node_count, &edges)?;

        let layer_count = ranks.iter().max().map_or(0, |max| max + 1);
        let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
        for (node, &rank) in ranks.iter().enumerate() {
            layers[rank].push(node);
        }

        debug!(
            nodes = node_count,
            edges = edges.len(),
            layers = layer_count;
            "Ranked graph"
        );

        reduce_crossings(&mut layers, &edges, &ranks, self.sweeps);

        Ok(Layering::new(layers))
    }
}

/// Barycenter crossing reduction, keeping the best ordering seen.
fn reduce_crossings(
    layers: &mut [Vec<usize>],
    edges: &[(usize, usize)],
    ranks: &[usize],
    sweeps: usize,
) {
    if layers.len() < 2 {
        return;
    }

    let node_count = ranks.len();
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(source, target) in edges {
        successors[source].push(target);
        predecessors[target].push(source);
    }

    let mut positions = vec![0usize; node_count];
    update_positions(layers, &mut positions);

    let mut best = layers.to_vec();
    let mut best_crossings = count_crossings(edges, ranks, &positions);

    for sweep in 0..sweeps {
        if best_crossings == 0 {
            break;
        }

        if sweep % 2 == 0 {
            for rank in 1..layers.len() {
                sort_by_barycenter(&mut layers[rank], &predecessors, &positions);
                update_positions(&layers[rank..=rank], &mut positions);
            }
        } else {
            for rank in (0..layers.len() - 1).rev() {
                sort_by_barycenter(&mut layers[rank], &successors, &positions);
                update_positions(&layers[rank..=rank], &mut positions);
            }
        }

        let crossings = count_crossings(edges, ranks, &positions);
        trace!(sweep, crossings; "Barycenter sweep");

        if crossings < best_crossings {
            best_crossings = crossings;
            best = layers.to_vec();
        }
    }

    layers.clone_from_slice(&best);
}

fn update_positions(layers: &[Vec<usize>], positions: &mut [usize]) {
    for layer in layers {
        for (position, &node) in layer.iter().enumerate() {
            positions[node] = position;
        }
    }
}

/// Stable sort of one layer by the mean position of each node's neighbours.
/// Nodes without neighbours keep their current position as their weight.
fn sort_by_barycenter(layer: &mut [usize], neighbors: &[Vec<usize>], positions: &[usize]) {
    let mut weighted: Vec<(usize, f64)> = layer
        .iter()
        .map(|&node| {
            let adjacent = &neighbors[node];
            let weight = if adjacent.is_empty() {
                positions[node] as f64
            } else {
                adjacent.iter().map(|&n| positions[n] as f64).sum::<f64>() / adjacent.len() as f64
            };
            (node, weight)
        })
        .collect();

    weighted.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (slot, (node, _)) in layer.iter_mut().zip(weighted) {
        *slot = node;
    }
}

/// Counts crossings among edges that join adjacent layers.
fn count_crossings(edges: &[(usize, usize)], ranks: &[usize], positions: &[usize]) -> usize {
    let short: Vec<(usize, usize, usize)> = edges
        .iter()
        .filter(|&&(source, target)| ranks[target] == ranks[source] + 1)
        .map(|&(source, target)| (ranks[source], positions[source], positions[target]))
        .collect();

    let mut crossings = 0;
    for (i, &(rank_a, source_a, target_a)) in short.iter().enumerate() {
        for &(rank_b, source_b, target_b) in &short[i + 1..] {
            if rank_a != rank_b {
                continue;
            }
            let crossed = (source_a < source_b && target_a > target_b)
                || (source_a > source_b && target_a < target_b);
            if crossed {
                crossings += 1;
            }
        }
    }
    crossings
}
