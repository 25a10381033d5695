//! Persistence layer
//!
//! RocksDB-backed [`Store`](crate::graph::Store) for graphs that have to
//! outlive the process. Reopening a store and handing it to
//! [`Graph::with_store`](crate::graph::Graph::with_store) restores the graph.

pub mod storage;

pub use storage::{RocksStore, RocksStoreConfig};
