//! Coordinate stage shared by every engine.
//!
//! Turns a [`Layering`] into centre coordinates, then into the diagram's
//! anchor convention.
//!
//! Along the flow axis each layer is as thick as its largest node and
//! consecutive layers are separated by the layer spacing. Along the cross
//! axis the nodes of a layer are stacked in order, separated by the node
//! spacing, and the layer is centred on zero. Finally the drawing is moved so
//! that its bounding box starts at the origin.

use log::trace;

use stratum_core::geometry::{Point, Size};

use crate::{
    config::{Direction, LayoutConfig},
    layout::engines::{LayerGraph, Layering},
};

/// Extent of `size` along the flow axis and the cross axis.
fn extents(size: Size, direction: Direction) -> (f32, f32) {
    match direction {
        Direction::LeftToRight => (size.width(), size.height()),
        Direction::TopToBottom => (size.height(), size.width()),
    }
}

/// Builds a point from flow and cross coordinates.
fn point(flow: f32, cross: f32, direction: Direction) -> Point {
    match direction {
        Direction::LeftToRight => Point::new(flow, cross),
        Direction::TopToBottom => Point::new(cross, flow),
    }
}

/// Computes the centre of every node, indexed by node.
///
/// Nodes missing from `layering` keep the origin.
pub(crate) fn centres(graph: &LayerGraph, layering: &Layering, config: &LayoutConfig) -> Vec<Point> {
    let direction = config.direction();
    let layer_spacing = config.layer_spacing();
    let node_spacing = config.node_spacing();

    let mut centres = vec![Point::default(); graph.node_count()];
    let mut offset = 0.0_f32;

    for layer in layering.layers().iter().filter(|layer| !layer.is_empty()) {
        let mut thickness = 0.0_f32;
        let mut span = 0.0_f32;
        for &node in layer {
            let (flow, cross) = extents(graph.size(node), direction);
            thickness = thickness.max(flow);
            span += cross;
        }
        span += node_spacing * (layer.len() - 1) as f32;

        let flow = offset + thickness / 2.0;
        let mut cursor = -span / 2.0;
        for &node in layer {
            let (_, cross) = extents(graph.size(node), direction);
            centres[node] = point(flow, cursor + cross / 2.0, direction);
            cursor += cross + node_spacing;
        }

        offset += thickness + layer_spacing;
    }

    normalize(graph, &mut centres);
    centres
}

/// Translates centres so the bounding box of all boxes starts at (0, 0).
fn normalize(graph: &LayerGraph, centres: &mut [Point]) {
    if centres.is_empty() {
        return;
    }

    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    for (node, centre) in centres.iter().enumerate() {
        let size = graph.size(node);
        min_x = min_x.min(centre.x() - size.width() / 2.0);
        min_y = min_y.min(centre.y() - size.height() / 2.0);
    }

    let shift = Point::new(min_x, min_y);
    for centre in centres.iter_mut() {
        *centre = centre.sub_point(shift);
    }
}

/// Converts a centre coordinate to the diagram anchor: left edge on x,
/// centre on y.
pub(crate) fn to_anchor(centre: Point, size: Size) -> Point {
    let anchor = centre.with_x(centre.x() - size.width() / 2.0);
    trace!(x = anchor.x(), y = anchor.y(); "Anchored node");
    anchor
}
