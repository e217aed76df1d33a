//! Integration tests for the layout API
//!
//! These tests exercise `compute_layout`, `Layouter` and `order` through the
//! public surface only.

use float_cmp::approx_eq;

use stratum::{
    Endpoint, LayoutWarning, Layouter, compute_layout,
    config::{Direction, LayoutConfig, LayoutEngine},
    geometry::{Point, Size},
    identifier::{EdgeId, NodeId},
    model::{Edge, Extreme, Node, PositioningHint},
    order,
};

fn ids(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|node| node.id().as_str()).collect()
}

fn position(layout: &stratum::Layout, id: &str) -> Point {
    layout
        .position_of(&NodeId::from(id))
        .unwrap_or_else(|| panic!("node {id} missing from layout"))
}

#[test]
fn test_empty_graph() {
    let layout = compute_layout(&[], &[], &LayoutConfig::default());

    assert!(layout.nodes().is_empty());
    assert!(layout.edges().is_empty());
    assert!(layout.warnings().is_empty());
}

#[test]
fn test_deterministic_output() {
    let nodes = vec![
        Node::new("a"),
        Node::new("b").with_size(Size::new(90.0, 30.0)),
        Node::new("c"),
        Node::new("d").with_hint(PositioningHint::after("a")),
    ];
    let edges = vec![
        Edge::new("ab", "a", "b"),
        Edge::new("bc", "b", "c"),
        Edge::new("ca", "c", "a"),
        Edge::new("ad", "a", "d"),
    ];
    let config = LayoutConfig::default();

    let first = compute_layout(&nodes, &edges, &config);
    let second = compute_layout(&nodes, &edges, &config);

    assert_eq!(first, second);
    for (a, b) in first.nodes().iter().zip(second.nodes()) {
        assert_eq!(a.position().x().to_bits(), b.position().x().to_bits());
        assert_eq!(a.position().y().to_bits(), b.position().y().to_bits());
    }
}

#[test]
fn test_input_is_not_modified() {
    let nodes = vec![
        Node::new("a").with_position(Point::new(-5.0, -5.0)),
        Node::new("b"),
    ];
    let edges = vec![Edge::new("e", "a", "b")];
    let before = nodes.clone();

    let _layout = compute_layout(&nodes, &edges, &LayoutConfig::default());

    assert_eq!(nodes, before);
}

#[test]
fn test_prior_positions_are_ignored() {
    let edges = vec![Edge::new("e", "a", "b")];
    let fresh = vec![Node::new("a"), Node::new("b")];
    let stale = vec![
        Node::new("a").with_position(Point::new(1000.0, 1000.0)),
        Node::new("b").with_position(Point::new(-3.0, 7.0)),
    ];
    let config = LayoutConfig::default();

    assert_eq!(
        compute_layout(&fresh, &edges, &config),
        compute_layout(&stale, &edges, &config)
    );
}

#[test]
fn test_no_edges_every_node_is_a_root() {
    let nodes = vec![Node::new("z"), Node::new("m"), Node::new("a")];

    let (ordered, _) = order(&nodes, &[]);
    assert_eq!(ids(&ordered), ["z", "m", "a"]);

    let layout = compute_layout(&nodes, &[], &LayoutConfig::default());
    assert_eq!(ids(layout.nodes()), ["z", "m", "a"]);
}

#[test]
fn test_cycle_is_ordered_once() {
    let nodes = vec![Node::new("A"), Node::new("B"), Node::new("C")];
    let edges = vec![
        Edge::new("ab", "A", "B"),
        Edge::new("bc", "B", "C"),
        Edge::new("ca", "C", "A"),
    ];

    let (ordered, ordered_edges) = order(&nodes, &edges);

    let mut seen = ids(&ordered);
    seen.sort_unstable();
    assert_eq!(seen, ["A", "B", "C"]);
    assert_eq!(ordered_edges.len(), 3);
}

#[test]
fn test_top_to_bottom_spacing_contract() {
    let nodes = vec![Node::new("A"), Node::new("B")];
    let edges = vec![Edge::new("e", "A", "B")];
    let config = LayoutConfig::default()
        .with_direction(Direction::TopToBottom)
        .with_default_box_size(Size::new(150.0, 80.0))
        .with_vertical_spacing(120.0);

    let layout = compute_layout(&nodes, &edges, &config);

    // y holds the centre, x the left edge of equally wide boxes
    let distance = (position(&layout, "B").y() - position(&layout, "A").y()).abs();
    assert!(distance >= 80.0 + 120.0 - 1e-3, "distance was {distance}");
}

#[test]
fn test_left_to_right_layers_progress_along_x() {
    let nodes = vec![Node::new("a"), Node::new("b"), Node::new("c")];
    let edges = vec![Edge::new("ab", "a", "b"), Edge::new("bc", "b", "c")];
    let config = LayoutConfig::default().with_horizontal_spacing(80.0);

    let layout = compute_layout(&nodes, &edges, &config);

    let (a, b, c) = (
        position(&layout, "a"),
        position(&layout, "b"),
        position(&layout, "c"),
    );
    assert!(approx_eq!(f32, b.x() - a.x(), 150.0 + 80.0));
    assert!(approx_eq!(f32, c.x() - b.x(), 150.0 + 80.0));
    assert!(approx_eq!(f32, a.y(), b.y()));
}

#[test]
fn test_after_node_follows_reference() {
    let nodes = vec![
        Node::new("x").with_size(Size::new(200.0, 50.0)),
        Node::new("y").with_hint(PositioningHint::after("x")),
    ];
    let config = LayoutConfig::default().with_horizontal_spacing(150.0);

    let layout = compute_layout(&nodes, &[], &config);

    let x = position(&layout, "x");
    let y = position(&layout, "y");
    assert!(approx_eq!(f32, y.x(), x.x() + 200.0 + 150.0));
    assert!(approx_eq!(f32, y.y(), x.y()));
}

#[test]
fn test_vertical_extreme_bottom_below_lowest_node() {
    let size = Size::new(100.0, 80.0);
    let nodes = vec![
        Node::new("a"),
        Node::new("b"),
        Node::new("c"),
        Node::new("n").with_hint(PositioningHint::VerticalExtreme {
            edge: Extreme::Bottom,
        }),
    ];
    let edges = vec![Edge::new("ab", "a", "b"), Edge::new("bc", "b", "c")];
    let config = LayoutConfig::default()
        .with_direction(Direction::TopToBottom)
        .with_default_box_size(size)
        .with_vertical_spacing(120.0);

    let layout = compute_layout(&nodes, &edges, &config);

    let lowest = position(&layout, "c");
    let n = position(&layout, "n");
    assert!(approx_eq!(f32, n.y(), lowest.y() + 80.0 + 120.0));
    assert!(approx_eq!(f32, n.x(), lowest.x()));
}

#[test]
fn test_unresolvable_hint_matches_unhinted_layout() {
    let edges = vec![Edge::new("ab", "a", "b"), Edge::new("ac", "a", "c")];
    let plain = vec![Node::new("a"), Node::new("b"), Node::new("c")];
    let hinted = vec![
        Node::new("a"),
        Node::new("b").with_hint(PositioningHint::after("nonexistent")),
        Node::new("c").with_hint(PositioningHint::after("c")),
    ];
    let config = LayoutConfig::default();

    let plain = compute_layout(&plain, &edges, &config);
    let hinted = compute_layout(&hinted, &edges, &config);

    for id in ["a", "b", "c"] {
        assert_eq!(position(&plain, id), position(&hinted, id));
    }
}

#[test]
fn test_edges_survive_with_identity() {
    let nodes = vec![Node::new("a"), Node::new("b"), Node::new("c")];
    let edges = vec![
        Edge::new("bc", "b", "c"),
        Edge::new("ab", "a", "b"),
        Edge::new("loop", "c", "c"),
        Edge::new("dangling", "a", "ghost"),
    ];

    let layout = compute_layout(&nodes, &edges, &LayoutConfig::default());

    assert_eq!(layout.edges().len(), edges.len());
    for edge in &edges {
        assert!(layout.edges().contains(edge), "missing edge {}", edge.id());
    }
}

#[test]
fn test_malformed_edge_is_reported() {
    let nodes = vec![Node::new("a")];
    let edges = vec![Edge::new("dangling", "a", "ghost")];

    let layout = compute_layout(&nodes, &edges, &LayoutConfig::default());

    assert_eq!(
        layout.warnings(),
        &[LayoutWarning::MalformedEdge {
            edge: EdgeId::from("dangling"),
            missing: NodeId::from("ghost"),
            endpoint: Endpoint::Target,
        }]
    );
    assert_eq!(layout.nodes().len(), 1);
}

#[test]
fn test_invalid_node_size_uses_default() {
    let nodes = vec![
        Node::new("a").with_size(Size::new(f32::NAN, 10.0)),
        Node::new("b").with_size(Size::new(-1.0, 10.0)),
    ];
    let edges = vec![Edge::new("e", "a", "b")];

    let layout = compute_layout(&nodes, &edges, &LayoutConfig::default());

    for node in layout.nodes() {
        assert!(node.position().is_finite());
    }
    // Default width 150 plus horizontal spacing 80
    assert!(approx_eq!(
        f32,
        position(&layout, "b").x() - position(&layout, "a").x(),
        230.0
    ));
}

#[test]
fn test_layouter_matches_free_function() {
    let nodes = vec![Node::new("a"), Node::new("b")];
    let edges = vec![Edge::new("e", "a", "b")];
    let config = LayoutConfig::spacious();

    let layouter = Layouter::new(config.clone());

    assert_eq!(
        layouter.compute(&nodes, &edges),
        compute_layout(&nodes, &edges, &config)
    );
}

#[test]
fn test_sugiyama_engine_places_every_node() {
    let nodes: Vec<Node> = ["a", "b", "c", "d", "lonely"]
        .into_iter()
        .map(Node::new)
        .collect();
    let edges = vec![
        Edge::new("ab", "a", "b"),
        Edge::new("ac", "a", "c"),
        Edge::new("bd", "b", "d"),
        Edge::new("cd", "c", "d"),
    ];
    let config = LayoutConfig::default().with_engine(LayoutEngine::Sugiyama);

    let layout = compute_layout(&nodes, &edges, &config);

    let mut seen = ids(layout.nodes());
    seen.sort_unstable();
    assert_eq!(seen, ["a", "b", "c", "d", "lonely"]);
    for node in layout.nodes() {
        assert!(node.position().is_finite());
    }
    assert!(position(&layout, "d").x() > position(&layout, "a").x());
}
