//! Relative placement rules.
//!
//! Nodes carrying a [`PositioningHint`] are moved relative to another node
//! after the layered placement. Every reference resolves against the base
//! positions of the same pass, so the result does not depend on the order in
//! which hinted nodes are processed. A hint that cannot be resolved leaves
//! the node at its base position.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use stratum_core::{
    geometry::{Point, Size},
    identifier::NodeId,
    model::{Extreme, Node, PositioningHint},
};

use crate::config::{Direction, LayoutConfig};

/// Applies every node's hint to the base positions.
///
/// The returned map holds one entry per entry of `base`, in the same order.
/// Nodes without a hint, or whose hint does not resolve, keep their base
/// position.
pub(crate) fn apply(
    nodes: &[Node],
    base: &IndexMap<NodeId, Point>,
    config: &LayoutConfig,
) -> IndexMap<NodeId, Point> {
    let default_size = config.default_box_size();
    let mut sizes: HashMap<&NodeId, Size> = HashMap::with_capacity(nodes.len());
    let mut hints: HashMap<&NodeId, &PositioningHint> = HashMap::new();
    for node in nodes {
        sizes.entry(node.id()).or_insert_with(|| node.size_or(default_size));
        if let Some(hint) = node.hint() {
            hints.entry(node.id()).or_insert(hint);
        }
    }

    let rules = Rules {
        base,
        sizes,
        default_size,
        config,
    };

    base.iter()
        .map(|(id, &position)| {
            let resolved = hints
                .get(id)
                .and_then(|hint| rules.resolve(id, hint))
                .filter(|candidate| candidate.is_finite());

            let position = match resolved {
                Some(candidate) => {
                    trace!(node = id.as_str(), x = candidate.x(), y = candidate.y(); "Applied positioning hint");
                    candidate
                }
                None => position,
            };
            (id.clone(), position)
        })
        .collect()
}

struct Rules<'a> {
    base: &'a IndexMap<NodeId, Point>,
    sizes: HashMap<&'a NodeId, Size>,
    default_size: Size,
    config: &'a LayoutConfig,
}

impl Rules<'_> {
    fn size(&self, id: &NodeId) -> Size {
        self.sizes.get(id).copied().unwrap_or(self.default_size)
    }

    /// Returns the hinted position, or `None` to keep the base position.
    fn resolve(&self, id: &NodeId, hint: &PositioningHint) -> Option<Point> {
        match hint {
            PositioningHint::AfterNode { node } => self.after_node(id, node),
            PositioningHint::VerticalExtreme { edge } => self.vertical_extreme(id, *edge),
        }
    }

    fn after_node(&self, id: &NodeId, reference: &NodeId) -> Option<Point> {
        if reference == id {
            debug!(node = id.as_str(); "Positioning hint references the node itself");
            return None;
        }
        let Some(&anchor) = self.base.get(reference) else {
            debug!(node = id.as_str(), reference = reference.as_str(); "Positioning hint references an unknown node");
            return None;
        };

        let size = self.size(reference);
        let offset = match self.config.direction() {
            Direction::LeftToRight => {
                Point::new(size.width() + self.config.horizontal_spacing(), 0.0)
            }
            Direction::TopToBottom => {
                Point::new(0.0, size.height() + self.config.vertical_spacing())
            }
        };
        Some(anchor.add_point(offset))
    }

    fn vertical_extreme(&self, id: &NodeId, edge: Extreme) -> Option<Point> {
        if self.config.direction() != Direction::TopToBottom {
            debug!(node = id.as_str(); "Vertical extreme hint ignored outside top-to-bottom layouts");
            return None;
        }

        // First node wins ties
        let mut extreme: Option<(&NodeId, Point)> = None;
        for (other, &position) in self.base {
            if other == id {
                continue;
            }
            let beyond = match (edge, extreme) {
                (_, None) => true,
                (Extreme::Top, Some((_, current))) => position.y() < current.y(),
                (Extreme::Bottom, Some((_, current))) => position.y() > current.y(),
            };
            if beyond {
                extreme = Some((other, position));
            }
        }

        let Some((reference, anchor)) = extreme else {
            debug!(node = id.as_str(); "Vertical extreme hint has no other node to reference");
            return None;
        };

        let own = self.size(id);
        let reference_size = self.size(reference);
        let spacing = self.config.vertical_spacing();

        let y = match edge {
            Extreme::Top => anchor.y() - (own.height() + spacing),
            Extreme::Bottom => anchor.y() + own.height() + spacing,
        };
        let x = anchor.x() + reference_size.width() / 2.0 - own.width() / 2.0;
        Some(Point::new(x, y))
    }
}
