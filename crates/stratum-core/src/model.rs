//! Diagram entities consumed and produced by layout.
//!
//! A diagram is a list of [`Node`]s and a list of directed [`Edge`]s between
//! them. Nodes may carry a [`PositioningHint`] that asks layout to place them
//! relative to another node instead of where the layered placement would put
//! them.
//!
//! All types serialize with serde, so they can be read from configuration
//! files or exchanged with a renderer.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Size},
    identifier::{EdgeId, NodeId},
};

/// Which end of the vertical flow a [`PositioningHint::VerticalExtreme`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extreme {
    /// Above the topmost node
    Top,
    /// Below the bottommost node
    Bottom,
}

/// Per-node instruction that overrides the layered position.
///
/// # Examples
///
/// ```
/// use stratum_core::model::{Extreme, PositioningHint};
///
/// let after = PositioningHint::after("gateway");
/// let below = PositioningHint::VerticalExtreme { edge: Extreme::Bottom };
/// assert_ne!(after, below);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositioningHint {
    /// Place the node immediately after `node` along the flow direction.
    AfterNode { node: NodeId },

    /// Place the node beyond the topmost or bottommost node of a
    /// top-to-bottom layout.
    VerticalExtreme { edge: Extreme },
}

impl PositioningHint {
    /// Shorthand for [`PositioningHint::AfterNode`].
    pub fn after(node: impl Into<NodeId>) -> Self {
        Self::AfterNode { node: node.into() }
    }
}

/// A diagram node.
///
/// The `position` is the top-left-x / top-y anchor used by renderers. It is
/// an output of layout; whatever value it holds on input is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,

    #[serde(default)]
    position: Point,

    /// Box size; `None` falls back to the layout defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<Size>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<PositioningHint>,
}

impl Node {
    /// Creates a node at the origin with default size and no hint.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            position: Point::default(),
            size: None,
            hint: None,
        }
    }

    /// Sets an explicit box size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Attaches a positioning hint.
    pub fn with_hint(mut self, hint: PositioningHint) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Sets the position.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn hint(&self) -> Option<&PositioningHint> {
        self.hint.as_ref()
    }

    /// Returns the node size if it is usable, otherwise `default`.
    pub fn size_or(&self, default: Size) -> Size {
        self.size.filter(|size| size.is_valid()).unwrap_or(default)
    }
}

/// A directed edge from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }
}
