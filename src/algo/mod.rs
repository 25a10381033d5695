//! Graph algorithms shared by the directed and undirected engines
//!
//! The algorithms only see a [`Neighbors`] view, so each engine plugs its own
//! adjacency index in without duplicating the walks.

pub mod common;
pub mod cycle;
pub mod traversal;

pub use common::Neighbors;
pub use cycle::{creates_cycle, creates_cycle_undirected};
pub use traversal::{bfs, bfs_sorted, dfs, dfs_sorted};
