//! hashgraph
//!
//! A generic in-memory graph engine: uniquely identified vertices of any
//! type, directed or undirected edges between them, traversal, adjacency
//! views and cycle checks.
//!
//! # Architecture
//!
//! - [`graph::Graph`]: the handle callers use. Chosen from [`Traits`] at
//!   construction and dispatching to one of the engines.
//! - [`graph::Directed`] / [`graph::Undirected`]: own the adjacency indices
//!   and enforce edge uniqueness and optional acyclicity.
//! - [`algo`]: cycle pre-check, DFS and BFS, shared by both engines.
//! - [`graph::Store`]: backend for vertex values and edge records.
//!   [`MemoryStore`] by default, `persistence::RocksStore` with the
//!   `persistence` feature.
//!
//! # Identity
//!
//! Every vertex is identified by the value a hash function computes from
//! it. Lookups, edges and errors all speak in identifiers, never in vertex
//! values.
//!
//! ## Example Usage
//!
//! ```rust
//! use hashgraph::{string_hash, Graph, GraphError, Traits};
//!
//! // A directed graph that refuses cycles
//! let mut g: Graph<String, String> =
//!     Graph::new(string_hash, Traits::new().directed().with_cycle_prevention());
//!
//! for name in ["A", "B", "C"] {
//!     g.add_vertex(name).unwrap();
//! }
//!
//! g.add_edge("A", "B").unwrap();
//! g.add_edge("B", "C").unwrap();
//! assert!(matches!(g.add_edge("C", "A"), Err(GraphError::WouldCreateCycle(_, _))));
//!
//! let adjacency = g.adjacency_map();
//! assert!(adjacency["A"].contains_key("B"));
//! assert!(adjacency["C"].is_empty());
//! assert_eq!(g.degree("B").unwrap(), 2);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod graph;
#[cfg(feature = "persistence")]
pub mod persistence;

// Re-export main types for convenience
pub use graph::{
    int_hash, string_hash, Edge, EdgeProperties, Graph, GraphError, GraphResult, HashFn,
    MemoryStore, Payload, Store, StoreError, StoreResult, Traits, VertexKey,
    VertexProperties,
};

#[cfg(feature = "persistence")]
pub use persistence::{RocksStore, RocksStoreConfig};
