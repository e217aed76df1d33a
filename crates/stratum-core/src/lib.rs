//! Stratum Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Stratum layout
//! library and its consumers. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Identifiers**: Node and edge identifiers plus an id allocator ([`identifier`] module)
//! - **Model**: Nodes, edges and positioning hints ([`model`] module)

pub mod geometry;
pub mod identifier;
pub mod model;
