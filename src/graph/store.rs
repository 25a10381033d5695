//! Storage backends for vertex values and edges
//!
//! The engines keep their adjacency indices in memory and delegate the
//! vertex values and the edge records to a [`Store`]. Duplicate and
//! existence checks are done by the engine before a store is called, so a
//! backend only needs put/get/delete/iterate semantics.

use super::edge::Edge;
use super::property::VertexProperties;
use super::types::VertexKey;
use indexmap::IndexMap;
use thiserror::Error;

/// Storage backend errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Generic backend failure
    #[error("Backend error: {0}")]
    Backend(String),

    /// RocksDB error
    #[cfg(feature = "persistence")]
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rocksdb::Error),

    /// Serialization error
    #[cfg(feature = "persistence")]
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Column family error
    #[cfg(feature = "persistence")]
    #[error("Column family error: {0}")]
    ColumnFamily(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence capability the graph engines rely on
///
/// Writes are upserts and deletes of absent keys succeed. Listing order is
/// not relied upon, only that every stored identifier is eventually listed.
pub trait Store<K, T> {
    /// Store a vertex value and its properties under `hash`
    fn add_vertex(&mut self, hash: K, value: T, properties: VertexProperties) -> StoreResult<()>;

    /// Fetch a vertex value and its properties
    fn vertex(&self, hash: &K) -> StoreResult<Option<(T, VertexProperties)>>;

    /// Delete a vertex
    fn remove_vertex(&mut self, hash: &K) -> StoreResult<()>;

    /// Identifiers of all stored vertices
    fn list_vertices(&self) -> StoreResult<Vec<K>>;

    /// Store an edge under its `(source, target)` pair
    fn add_edge(&mut self, edge: Edge<K>) -> StoreResult<()>;

    /// Delete the edge stored under `(source, target)`
    fn remove_edge(&mut self, source: &K, target: &K) -> StoreResult<()>;

    /// All stored edges
    fn list_edges(&self) -> StoreResult<Vec<Edge<K>>>;
}

/// Default in-memory store
///
/// Backed by insertion-ordered maps so listing is stable across calls.
#[derive(Debug, Clone)]
pub struct MemoryStore<K, T> {
    vertices: IndexMap<K, (T, VertexProperties)>,
    edges: IndexMap<(K, K), Edge<K>>,
}

impl<K, T> MemoryStore<K, T> {
    pub fn new() -> Self {
        MemoryStore {
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }
}

impl<K, T> Default for MemoryStore<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: VertexKey, T: Clone> Store<K, T> for MemoryStore<K, T> {
    fn add_vertex(&mut self, hash: K, value: T, properties: VertexProperties) -> StoreResult<()> {
        self.vertices.insert(hash, (value, properties));
        Ok(())
    }

    fn vertex(&self, hash: &K) -> StoreResult<Option<(T, VertexProperties)>> {
        Ok(self.vertices.get(hash).cloned())
    }

    fn remove_vertex(&mut self, hash: &K) -> StoreResult<()> {
        self.vertices.shift_remove(hash);
        Ok(())
    }

    fn list_vertices(&self) -> StoreResult<Vec<K>> {
        Ok(self.vertices.keys().cloned().collect())
    }

    fn add_edge(&mut self, edge: Edge<K>) -> StoreResult<()> {
        self.edges
            .insert((edge.source.clone(), edge.target.clone()), edge);
        Ok(())
    }

    fn remove_edge(&mut self, source: &K, target: &K) -> StoreResult<()> {
        self.edges.shift_remove(&(source.clone(), target.clone()));
        Ok(())
    }

    fn list_edges(&self) -> StoreResult<Vec<Edge<K>>> {
        Ok(self.edges.values().cloned().collect())
    }
}
