use std::collections::HashMap;

use log::{debug, warn};
use rust_sugiyama::configure::Config;

use crate::{
    error::LayoutError,
    layout::engines::{self, LayerGraph, Layering},
};

const NAME: &str = "sugiyama";

/// Coordinates closer than this along the rank axis share a layer.
const RANK_TOLERANCE: f64 = 1e-6;

/// Engine backed by the `rust-sugiyama` crate.
///
/// Only layer membership and in-layer order are taken from the crate; its
/// coordinates are discarded in favour of the shared placement stage. The
/// crate lays out each weakly connected component separately, so layers are
/// merged component by component, ordered by each component's smallest node.
/// Nodes the crate does not return (isolated nodes) join the first layer.
pub struct Engine {
    vertex_spacing: f64,
}

impl Engine {
    /// Create a new sugiyama engine
    pub fn new() -> Self {
        Self {
            vertex_spacing: 3.0,
        }
    }

    fn run(&self, edges: Vec<(u32, u32)>) -> Result<Vec<Component>, LayoutError> {
        let vertex_spacing = self.vertex_spacing;
        let layouts = std::panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&edges, &config)
        });

        match layouts {
            Ok(results) if !results.is_empty() => Ok(results
                .into_iter()
                .map(|(coords, _, _)| Component {
                    coords: coords
                        .into_iter()
                        .map(|(id, (x, y))| (id, x, y))
                        .collect(),
                })
                .collect()),
            Ok(_) => Err(LayoutError::Engine {
                engine: NAME,
                message: "rust-sugiyama returned empty layout results".to_string(),
            }),
            Err(err) => {
                let message = if let Some(panic_msg) = err.downcast_ref::<String>() {
                    format!("rust-sugiyama panicked: {panic_msg}")
                } else if let Some(panic_msg) = err.downcast_ref::<&str>() {
                    format!("rust-sugiyama panicked: {panic_msg}")
                } else {
                    "rust-sugiyama panicked with unknown error".to_string()
                };
                Err(LayoutError::Engine {
                    engine: NAME,
                    message,
                })
            }
        }
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
        if u32::try_from(node_count).is_err() {
            return Err(LayoutError::TooLarge(node_count));
        }

        let mut edges: Vec<(u32, u32)> = graph
            .acyclic_edges()
            .into_iter()
            .map(|(source, target)| (source as u32, target as u32))
            .collect();
        edges.sort_unstable();
        edges.dedup();

        if edges.is_empty() {
            return Ok(Layering::new(vec![(0..node_count).collect()]));
        }

        debug!(nodes = node_count, edges = edges.len(); "Applying rust-sugiyama");

        let components = self.run(edges.clone())?;

        let mut layers: Vec<Vec<usize>> = Vec::new();
        let mut placed = vec![false; node_count];
        let mut ordered: Vec<(usize, Vec<Vec<usize>>)> = Vec::with_capacity(components.len());

        for component in components {
            let component_layers = component.layers(node_count, &edges);
            let Some(first) = component_layers.iter().flatten().copied().min() else {
                continue;
            };
            ordered.push((first, component_layers));
        }
        ordered.sort_by_key(|(first, _)| *first);

        for (_, component_layers) in ordered {
            if layers.len() < component_layers.len() {
                layers.resize(component_layers.len(), Vec::new());
            }
            for (rank, layer) in component_layers.into_iter().enumerate() {
                for node in layer {
                    if !placed[node] {
                        placed[node] = true;
                        layers[rank].push(node);
                    }
                }
            }
        }

        if layers.is_empty() {
            layers.push(Vec::new());
        }
        let missing: Vec<usize> = (0..node_count).filter(|&node| !placed[node]).collect();
        if missing.iter().any(|&node| has_edges(node, &edges)) {
            warn!(count = missing.len(); "rust-sugiyama dropped connected nodes");
        }
        layers[0].extend(missing);

        Ok(Layering::new(layers))
    }
}

fn has_edges(node: usize, edges: &[(u32, u32)]) -> bool {
    edges
        .iter()
        .any(|&(source, target)| source as usize == node || target as usize == node)
}

/// One connected component as returned by `rust-sugiyama`.
struct Component {
    coords: Vec<(usize, f64, f64)>,
}

impl Component {
    /// Groups the component's nodes into layers by their y coordinate and
    /// orders each layer by x, ties broken by node index.
    ///
    /// The crate's rank axis may grow in either direction. If most edges
    /// would point against layer order, the layers are reversed.
    fn layers(&self, node_count: usize, edges: &[(u32, u32)]) -> Vec<Vec<usize>> {
        let coords: Vec<(usize, f64, f64)> = self
            .coords
            .iter()
            .copied()
            .filter(|&(id, x, y)| id < node_count && x.is_finite() && y.is_finite())
            .collect();
        if coords.is_empty() {
            return Vec::new();
        }

        let mut levels: Vec<f64> = coords.iter().map(|&(_, _, y)| y).collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup_by(|a, b| (*a - *b).abs() < RANK_TOLERANCE);

        let level_of = |y: f64| {
            levels
                .iter()
                .position(|&level| (level - y).abs() < RANK_TOLERANCE)
                .unwrap_or(0)
        };

        let mut ranks: HashMap<usize, usize> = coords
            .iter()
            .map(|&(id, _, y)| (id, level_of(y)))
            .collect();

        let (mut forward, mut backward) = (0usize, 0usize);
        for &(source, target) in edges {
            let (Some(&rs), Some(&rt)) = (ranks.get(&(source as usize)), ranks.get(&(target as usize)))
            else {
                continue;
            };
            if rs < rt {
                forward += 1;
            } else if rs > rt {
                backward += 1;
            }
        }
        if backward > forward {
            let last = levels.len() - 1;
            for rank in ranks.values_mut() {
                *rank = last - *rank;
            }
        }

        let mut by_layer: Vec<Vec<(f64, usize)>> = vec![Vec::new(); levels.len()];
        for &(id, x, _) in &coords {
            by_layer[ranks[&id]].push((x, id));
        }

        by_layer
            .into_iter()
            .map(|mut layer| {
                layer.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                layer.into_iter().map(|(_, id)| id).collect()
            })
            .collect()
    }
}
