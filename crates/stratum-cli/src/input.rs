//! Graph file loading.
//!
//! A graph file is TOML with `[[nodes]]` and `[[edges]]` arrays:
//!
//! ```toml
//! [[nodes]]
//! id = "api"
//! size = { width = 180.0, height = 60.0 }
//!
//! [[nodes]]
//! id = "cache"
//! hint = { kind = "after_node", node = "api" }
//!
//! [[edges]]
//! source = "api"
//! target = "cache"
//! ```
//!
//! Edges may omit `id`; missing ids are generated.

use std::{collections::HashSet, fs};

use log::debug;
use serde::Deserialize;

use stratum::{
    StratumError,
    identifier::{EdgeId, IdGenerator, NodeId},
    model::{Edge, Node},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GraphFile {
    nodes: Vec<Node>,
    edges: Vec<EdgeEntry>,
}

#[derive(Debug, Deserialize)]
struct EdgeEntry {
    id: Option<EdgeId>,
    source: NodeId,
    target: NodeId,
}

/// Reads and parses the graph file at `path`.
///
/// # Errors
///
/// Returns `StratumError` if the file cannot be read or is not a valid graph.
pub fn load_graph(path: &str) -> Result<(Vec<Node>, Vec<Edge>), StratumError> {
    let source = fs::read_to_string(path)?;
    parse_graph(path, &source)
}

fn parse_graph(path: &str, source: &str) -> Result<(Vec<Node>, Vec<Edge>), StratumError> {
    let file: GraphFile = toml::from_str(source).map_err(|err| {
        StratumError::new_parse_error(path, source, err.message(), err.span())
    })?;

    let used: HashSet<&EdgeId> = file.edges.iter().filter_map(|e| e.id.as_ref()).collect();
    let mut ids = IdGenerator::new();

    let edges: Vec<Edge> = file
        .edges
        .iter()
        .map(|entry| {
            let id = match &entry.id {
                Some(id) => id.clone(),
                None => loop {
                    let candidate = ids.next_edge_id();
                    if !used.contains(&candidate) {
                        break candidate;
                    }
                },
            };
            Edge::new(id, entry.source.clone(), entry.target.clone())
        })
        .collect();

    debug!(nodes = file.nodes.len(), edges = edges.len(); "Graph file parsed");

    Ok((file.nodes, edges))
}
