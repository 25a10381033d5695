//! Undirected graph engine
//!
//! A single symmetric index: inserting `a - b` registers the edge under both
//! `a -> b` and `b -> a`. Both entries hold the edge in the orientation it
//! was stored with; views hand it out oriented from the vertex asked about.

use super::edge::Edge;
use super::error::{GraphError, GraphResult};
use super::property::{EdgeProperties, VertexProperties};
use super::store::{MemoryStore, Store};
use super::traits::Traits;
use super::types::{AdjacencyIndex, HashFn, VertexKey};
use crate::algo::{self, Neighbors};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

enum EdgeChange<K> {
    Insert(Edge<K>),
    Remove(Edge<K>),
}

/// Undirected graph over vertices of type `T` identified by `K`
#[derive(Clone)]
pub struct Undirected<K, T, S = MemoryStore<K, T>> {
    hash: HashFn<K, T>,
    traits: Traits,
    store: S,
    edges: AdjacencyIndex<K>,
}

impl<K, T, S> Undirected<K, T, S>
where
    K: VertexKey,
    S: Store<K, T>,
{
    pub fn new(
        hash: impl Fn(&T) -> K + Send + Sync + 'static,
        traits: Traits,
        store: S,
    ) -> Self {
        Undirected {
            hash: Arc::new(hash),
            traits,
            store,
            edges: AdjacencyIndex::default(),
        }
    }

    /// Create an engine over a store that may already hold data
    pub fn with_store(
        hash: impl Fn(&T) -> K + Send + Sync + 'static,
        traits: Traits,
        store: S,
    ) -> GraphResult<Self> {
        let mut engine = Self::new(hash, traits, store);

        for id in engine.store.list_vertices()? {
            engine.edges.insert(id, Default::default());
        }

        let edges = engine.store.list_edges()?;
        let edge_count = edges.len();
        for edge in edges {
            engine.ensure_vertex(&edge.source)?;
            engine.ensure_vertex(&edge.target)?;
            engine.index(edge);
        }

        info!(
            "Rebuilt undirected index: {} vertices, {} edges",
            engine.edges.len(),
            edge_count
        );

        Ok(engine)
    }

    pub fn traits(&self) -> &Traits {
        &self.traits
    }

    pub fn add_vertex(&mut self, value: T, properties: VertexProperties) -> GraphResult<()> {
        let hash = (self.hash)(&value);
        if self.edges.contains_key(&hash) {
            return Err(GraphError::vertex_already_exists(&hash));
        }

        self.store.add_vertex(hash.clone(), value, properties)?;
        self.edges.insert(hash.clone(), Default::default());

        debug!("Added vertex {:?}", hash);
        Ok(())
    }

    pub fn vertex_with_properties<Q>(&self, id: &Q) -> GraphResult<(T, VertexProperties)>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        let key = self.resolve(id)?;
        self.store
            .vertex(&key)?
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Remove a vertex together with every edge touching it
    pub fn remove_vertex<Q>(&mut self, id: &Q) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        let key = self.resolve(id)?;
        self.remove_resolved(key)
    }

    /// Add the edge `source - target`; `(a, b)` and `(b, a)` are the same edge
    pub fn add_edge(&mut self, source: K, target: K, properties: EdgeProperties) -> GraphResult<()> {
        self.ensure_vertex(&source)?;
        self.ensure_vertex(&target)?;

        if self.edge(&source, &target).is_some() {
            return Err(GraphError::edge_already_exists(&source, &target));
        }

        if self.traits.prevent_cycles && algo::creates_cycle_undirected(&*self, &source, &target) {
            debug!("Rejected edge {:?} - {:?}: would create a cycle", source, target);
            return Err(GraphError::would_create_cycle(&source, &target));
        }

        self.apply(EdgeChange::Insert(Edge::new(source, target, properties)))
    }

    /// Look up the edge between two vertices in either orientation. The
    /// returned edge has `source` as its source.
    pub fn edge<Q>(&self, source: &Q, target: &Q) -> Option<Edge<K>>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        let (key, neighbors) = self.edges.get_key_value(source)?;
        neighbors.get(target).map(|edge| edge.oriented_from(key))
    }

    pub fn remove_edge<Q>(&mut self, source: &Q, target: &Q) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        let stored = self
            .edges
            .get(source)
            .and_then(|neighbors| neighbors.get(target))
            .cloned()
            .ok_or_else(|| GraphError::edge_not_found(source, target))?;

        self.apply(EdgeChange::Remove(stored))
    }

    /// Every vertex mapped to its incident edges, each oriented away from
    /// the key vertex
    pub fn adjacency_map(&self) -> HashMap<K, HashMap<K, Edge<K>>> {
        self.edges
            .iter()
            .map(|(vertex, neighbors)| {
                let neighbors = neighbors
                    .iter()
                    .map(|(neighbor, edge)| (neighbor.clone(), edge.oriented_from(vertex)))
                    .collect();
                (vertex.clone(), neighbors)
            })
            .collect()
    }

    /// Same as [`Undirected::adjacency_map`]: neighbor relations are symmetric
    pub fn predecessor_map(&self) -> HashMap<K, HashMap<K, Edge<K>>> {
        self.adjacency_map()
    }

    /// Number of incident edges; a self-loop counts once
    pub fn degree<Q>(&self, id: &Q) -> GraphResult<usize>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        self.edges
            .get(id)
            .map(|neighbors| neighbors.len())
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Whether adding `source - target` would close a cycle
    pub fn creates_cycle<Q>(&self, source: &Q, target: &Q) -> GraphResult<bool>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;

        Ok(algo::creates_cycle_undirected(self, &source, &target))
    }

    pub fn dfs<Q, F>(&self, start: &Q, visit: F) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
        F: FnMut(&K) -> bool,
    {
        algo::dfs(self, &self.resolve(start)?, visit)
    }

    pub fn bfs<Q, F>(&self, start: &Q, visit: F) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
        F: FnMut(&K) -> bool,
    {
        algo::bfs(self, &self.resolve(start)?, visit)
    }

    pub fn order(&self) -> usize {
        self.edges.len()
    }

    pub fn size(&self) -> usize {
        let (loops, links) = self.edges.iter().fold((0, 0), |(loops, links), (vertex, neighbors)| {
            let is_loop = neighbors.contains_key(vertex) as usize;
            (loops + is_loop, links + neighbors.len() - is_loop)
        });
        loops + links / 2
    }

    fn resolve<Q>(&self, id: &Q) -> GraphResult<K>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        self.edges
            .get_key_value(id)
            .map(|(key, _)| key.clone())
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Store deletes first; on failure the deleted edges are written back
    /// and the index is left untouched
    fn remove_resolved(&mut self, key: K) -> GraphResult<()> {
        let incident: Vec<Edge<K>> = self
            .edges
            .get(&key)
            .map(|neighbors| neighbors.values().cloned().collect())
            .unwrap_or_default();

        for (done, edge) in incident.iter().enumerate() {
            if let Err(err) = self.store.remove_edge(&edge.source, &edge.target) {
                self.restore(&incident[..done]);
                return Err(err.into());
            }
        }
        if let Err(err) = self.store.remove_vertex(&key) {
            self.restore(&incident);
            return Err(err.into());
        }

        for edge in &incident {
            self.unindex(edge);
        }
        self.edges.remove(&key);

        debug!("Removed vertex {:?} and {} edges", key, incident.len());
        Ok(())
    }

    fn restore(&mut self, edges: &[Edge<K>]) {
        for edge in edges {
            if let Err(err) = self.store.add_edge(edge.clone()) {
                warn!(
                    "Could not restore edge {:?} - {:?}: {}",
                    edge.source, edge.target, err
                );
            }
        }
    }

    fn ensure_vertex(&self, id: &K) -> GraphResult<()> {
        if self.edges.contains_key(id) {
            Ok(())
        } else {
            Err(GraphError::vertex_not_found(id))
        }
    }

    /// Single mutation path for edges, store first, then both index entries
    fn apply(&mut self, change: EdgeChange<K>) -> GraphResult<()> {
        match change {
            EdgeChange::Insert(edge) => {
                self.store.add_edge(edge.clone())?;
                debug!("Added edge {:?} - {:?}", edge.source, edge.target);
                self.index(edge);
            }
            EdgeChange::Remove(edge) => {
                self.store.remove_edge(&edge.source, &edge.target)?;
                self.unindex(&edge);
                debug!("Removed edge {:?} - {:?}", edge.source, edge.target);
            }
        }
        Ok(())
    }

    fn unindex(&mut self, edge: &Edge<K>) {
        if let Some(neighbors) = self.edges.get_mut(&edge.source) {
            neighbors.remove(&edge.target);
        }
        if let Some(neighbors) = self.edges.get_mut(&edge.target) {
            neighbors.remove(&edge.source);
        }
    }

    fn index(&mut self, edge: Edge<K>) {
        self.edges
            .entry(edge.target.clone())
            .or_default()
            .insert(edge.source.clone(), edge.clone());
        self.edges
            .entry(edge.source.clone())
            .or_default()
            .insert(edge.target.clone(), edge);
    }
}

impl<K, T, S> Undirected<K, T, S>
where
    K: VertexKey + Ord,
    S: Store<K, T>,
{
    pub fn dfs_sorted<Q, F>(&self, start: &Q, visit: F) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
        F: FnMut(&K) -> bool,
    {
        algo::dfs_sorted(self, &self.resolve(start)?, visit)
    }

    pub fn bfs_sorted<Q, F>(&self, start: &Q, visit: F) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
        F: FnMut(&K) -> bool,
    {
        algo::bfs_sorted(self, &self.resolve(start)?, visit)
    }
}

impl<K, T, S> Neighbors<K> for Undirected<K, T, S>
where
    K: VertexKey,
{
    fn contains(&self, id: &K) -> bool {
        self.edges.contains_key(id)
    }

    fn successors(&self, id: &K) -> Vec<K> {
        self.edges
            .get(id)
            .map(|neighbors| neighbors.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn predecessors(&self, id: &K) -> Vec<K> {
        self.successors(id)
    }
}
