//! Core graph engine
//!
//! This module implements the generic graph model with:
//! - Vertices of any type, keyed by a caller-supplied identity function
//! - Directed and undirected engines behind one [`Graph`] handle
//! - Optional cycle prevention checked on every edge insertion
//! - Pluggable storage for vertex values and edge records

pub mod directed;
pub mod edge;
pub mod error;
pub mod property;
pub mod store;
pub mod traits;
pub mod types;
pub mod undirected;

// Re-export main types
pub use directed::Directed;
pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use property::{EdgeProperties, Payload, VertexProperties};
pub use store::{MemoryStore, Store, StoreError, StoreResult};
pub use traits::Traits;
pub use types::{int_hash, string_hash, HashFn, VertexKey};
pub use undirected::Undirected;

use std::borrow::Borrow;
use std::collections::HashMap;

macro_rules! dispatch {
    ($graph:expr, $engine:ident => $call:expr) => {
        match $graph {
            Graph::Directed($engine) => $call,
            Graph::Undirected($engine) => $call,
        }
    };
}

/// A graph of vertices of type `T` identified by values of type `K`
///
/// The variant is picked once from [`Traits::is_directed`] and never changes.
/// All calls are forwarded to the engine; the handle itself holds no graph
/// logic.
///
/// The graph does no internal locking. Sharing one graph between threads
/// that mutate it needs external synchronization.
#[derive(Clone)]
pub enum Graph<K, T, S = MemoryStore<K, T>> {
    Directed(Directed<K, T, S>),
    Undirected(Undirected<K, T, S>),
}

impl<K, T> Graph<K, T>
where
    K: VertexKey,
    T: Clone,
{
    /// Create an empty graph backed by a [`MemoryStore`]
    pub fn new(hash: impl Fn(&T) -> K + Send + Sync + 'static, traits: Traits) -> Self {
        if traits.is_directed {
            Graph::Directed(Directed::new(hash, traits, MemoryStore::new()))
        } else {
            Graph::Undirected(Undirected::new(hash, traits, MemoryStore::new()))
        }
    }
}

impl<K, T, S> Graph<K, T, S>
where
    K: VertexKey,
    S: Store<K, T>,
{
    /// Create a graph over `store`. Vertices and edges the store already
    /// holds are loaded into the adjacency indices.
    pub fn with_store(
        hash: impl Fn(&T) -> K + Send + Sync + 'static,
        traits: Traits,
        store: S,
    ) -> GraphResult<Self> {
        if traits.is_directed {
            Ok(Graph::Directed(Directed::with_store(hash, traits, store)?))
        } else {
            Ok(Graph::Undirected(Undirected::with_store(hash, traits, store)?))
        }
    }

    pub fn traits(&self) -> &Traits {
        dispatch!(self, g => g.traits())
    }

    /// Add a vertex with default properties. Fails with
    /// [`GraphError::VertexAlreadyExists`] if its identifier is taken.
    pub fn add_vertex(&mut self, value: impl Into<T>) -> GraphResult<()> {
        self.add_vertex_with_properties(value, VertexProperties::default())
    }

    pub fn add_vertex_with_properties(
        &mut self,
        value: impl Into<T>,
        properties: VertexProperties,
    ) -> GraphResult<()> {
        let value = value.into();
        dispatch!(self, g => g.add_vertex(value, properties))
    }

    pub fn vertex<Q>(&self, id: &Q) -> GraphResult<T>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        self.vertex_with_properties(id).map(|(value, _)| value)
    }

    pub fn vertex_with_properties<Q>(&self, id: &Q) -> GraphResult<(T, VertexProperties)>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        dispatch!(self, g => g.vertex_with_properties(id))
    }

    /// Remove a vertex and every edge incident to it
    pub fn remove_vertex<Q>(&mut self, id: &Q) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        dispatch!(self, g => g.remove_vertex(id))
    }

    /// Add an edge with default properties
    ///
    /// Fails with [`GraphError::VertexNotFound`] for an unknown endpoint,
    /// [`GraphError::EdgeAlreadyExists`] for a duplicate and, with cycle
    /// prevention on, [`GraphError::WouldCreateCycle`].
    pub fn add_edge(&mut self, source: impl Into<K>, target: impl Into<K>) -> GraphResult<()> {
        self.add_edge_with_properties(source, target, EdgeProperties::default())
    }

    pub fn add_edge_with_properties(
        &mut self,
        source: impl Into<K>,
        target: impl Into<K>,
        properties: EdgeProperties,
    ) -> GraphResult<()> {
        let (source, target) = (source.into(), target.into());
        dispatch!(self, g => g.add_edge(source, target, properties))
    }

    /// The edge joining two vertices, if any. Undirected graphs match
    /// either orientation.
    pub fn edge<Q>(&self, source: &Q, target: &Q) -> Option<Edge<K>>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        dispatch!(self, g => g.edge(source, target))
    }

    /// Remove an edge; [`GraphError::EdgeNotFound`] if it does not exist
    pub fn remove_edge<Q>(&mut self, source: &Q, target: &Q) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        dispatch!(self, g => g.remove_edge(source, target))
    }

    /// Every vertex mapped to its adjacent vertices and the connecting edges
    ///
    /// For a directed graph with edges AB and AC:
    ///
    /// ```text
    /// A: {B: A->B, C: A->C}
    /// B: {}
    /// C: {}
    /// ```
    pub fn adjacency_map(&self) -> HashMap<K, HashMap<K, Edge<K>>> {
        dispatch!(self, g => g.adjacency_map())
    }

    /// Like [`Graph::adjacency_map`] but for incoming edges. Identical to the
    /// adjacency map for undirected graphs.
    pub fn predecessor_map(&self) -> HashMap<K, HashMap<K, Edge<K>>> {
        dispatch!(self, g => g.predecessor_map())
    }

    pub fn degree<Q>(&self, id: &Q) -> GraphResult<usize>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        dispatch!(self, g => g.degree(id))
    }

    /// Whether adding an edge between the two vertices would close a cycle
    pub fn creates_cycle<Q>(&self, source: &Q, target: &Q) -> GraphResult<bool>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        dispatch!(self, g => g.creates_cycle(source, target))
    }

    /// Depth-first walk from `start`; sibling order is unspecified
    pub fn dfs<Q, F>(&self, start: &Q, visit: F) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
        F: FnMut(&K) -> bool,
    {
        dispatch!(self, g => g.dfs(start, visit))
    }

    /// Breadth-first walk from `start`; sibling order is unspecified
    pub fn bfs<Q, F>(&self, start: &Q, visit: F) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
        F: FnMut(&K) -> bool,
    {
        dispatch!(self, g => g.bfs(start, visit))
    }

    /// Number of vertices
    pub fn order(&self) -> usize {
        dispatch!(self, g => g.order())
    }

    /// Number of edges
    pub fn size(&self) -> usize {
        dispatch!(self, g => g.size())
    }
}

impl<K, T, S> Graph<K, T, S>
where
    K: VertexKey + Ord,
    S: Store<K, T>,
{
    /// Depth-first walk expanding neighbors in ascending order
    pub fn dfs_sorted<Q, F>(&self, start: &Q, visit: F) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
        F: FnMut(&K) -> bool,
    {
        dispatch!(self, g => g.dfs_sorted(start, visit))
    }

    /// Breadth-first walk expanding neighbors in ascending order
    pub fn bfs_sorted<Q, F>(&self, start: &Q, visit: F) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
        F: FnMut(&K) -> bool,
    {
        dispatch!(self, g => g.bfs_sorted(start, visit))
    }
}
