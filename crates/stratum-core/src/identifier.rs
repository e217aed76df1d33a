//! Node and edge identifiers.
//!
//! This module provides the [`NodeId`] and [`EdgeId`] newtypes and the
//! [`IdGenerator`] used by diagram bookkeeping to mint fresh identifiers.
//!
//! Identifiers are plain owned strings. They compare lexicographically, which
//! the layout core relies on as the final tie-break when ordering edges.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its string form.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Returns the string form of the identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifier of a node. Unique within one diagram.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratum_core::identifier::NodeId;
    ///
    /// let id: NodeId = "database".into();
    /// assert_eq!(id, "database");
    /// ```
    NodeId
);

string_id!(
    /// Identifier of an edge. Unique within one diagram.
    EdgeId
);

/// Allocator for fresh node and edge identifiers.
///
/// Each generator owns its counters, so independent diagrams never share
/// state. The layout core never allocates ids; this type is meant for the
/// code that creates and deletes diagram entities.
///
/// # Examples
///
/// ```
/// use stratum_core::identifier::IdGenerator;
///
/// let mut ids = IdGenerator::new();
/// assert_eq!(ids.next_node_id(), "node_0");
/// assert_eq!(ids.next_node_id(), "node_1");
/// assert_eq!(ids.next_edge_id(), "edge_0");
///
/// ids.reset();
/// assert_eq!(ids.next_node_id(), "node_0");
/// ```
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    next_node: usize,
    next_edge: usize,
}

impl IdGenerator {
    /// Creates a generator with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a node id that this generator has not returned since the last reset.
    pub fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(format!("node_{}", self.next_node));
        self.next_node += 1;
        id
    }

    /// Returns an edge id that this generator has not returned since the last reset.
    pub fn next_edge_id(&mut self) -> EdgeId {
        let id = EdgeId(format!("edge_{}", self.next_edge));
        self.next_edge += 1;
        id
    }

    /// Resets both counters to zero.
    pub fn reset(&mut self) {
        self.next_node = 0;
        self.next_edge = 0;
    }
}
