//! Core type definitions for the graph engine

use super::edge::Edge;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Identity function mapping a vertex value to its identifier.
///
/// The function must be pure: hashing the same value twice has to yield the
/// same identifier, since the engine never caches the mapping. Closures may
/// capture state as long as that state does not change the mapping.
pub type HashFn<K, T> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// Bounds every vertex identifier has to satisfy.
pub trait VertexKey: Clone + Eq + std::hash::Hash + fmt::Debug {}

impl<K: Clone + Eq + std::hash::Hash + fmt::Debug> VertexKey for K {}

/// Nested adjacency index: vertex -> neighbor -> edge
pub(crate) type AdjacencyIndex<K> = FxHashMap<K, FxHashMap<K, Edge<K>>>;

/// Identity function for string vertices: the string is its own identifier.
#[allow(clippy::ptr_arg)]
pub fn string_hash(value: &String) -> String {
    value.clone()
}

/// Identity function for integer vertices: the integer is its own identifier.
pub fn int_hash(value: &i64) -> i64 {
    *value
}
