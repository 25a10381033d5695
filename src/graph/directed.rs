//! Directed graph engine
//!
//! Keeps two adjacency indices in lockstep:
//! - out_edges: source -> target -> edge
//! - in_edges: target -> source -> edge
//!
//! Every vertex owns an entry in both indices, even without edges, which
//! doubles as the vertex existence check. Vertex values and edge records go
//! to the [`Store`].

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

/// Edge mutation routed through [`Directed::apply`]
enum EdgeChange<K> {
    Insert(Edge<K>),
    Remove(K, K),
}

/// Directed graph over vertices of type `T` identified by `K`
#[derive(Clone)]
pub struct Directed<K, T, S = MemoryStore<K, T>> {
    hash: HashFn<K, T>,
    traits: Traits,
    store: S,
    out_edges: AdjacencyIndex<K>,
    in_edges: AdjacencyIndex<K>,
}

impl<K, T, S> Directed<K, T, S>
where
    K: VertexKey,
    S: Store<K, T>,
{
    /// Create an engine over an empty store
    pub fn new(
        hash: impl Fn(&T) -> K + Send + Sync + 'static,
        traits: Traits,
        store: S,
    ) -> Self {
        Directed {
            hash: Arc::new(hash),
            traits,
            store,
            out_edges: AdjacencyIndex::default(),
            in_edges: AdjacencyIndex::default(),
        }
    }

    /// Create an engine over a store that may already hold data, rebuilding
    /// the adjacency indices from it
    pub fn with_store(
        hash: impl Fn(&T) -> K + Send + Sync + 'static,
        traits: Traits,
        store: S,
    ) -> GraphResult<Self> {
        let mut engine = Self::new(hash, traits, store);

        for id in engine.store.list_vertices()? {
            engine.out_edges.insert(id.clone(), Default::default());
            engine.in_edges.insert(id, Default::default());
        }

        let edges = engine.store.list_edges()?;
        let edge_count = edges.len();
        for edge in edges {
            engine.ensure_vertex(&edge.source)?;
            engine.ensure_vertex(&edge.target)?;
            engine.index(edge);
        }

        info!(
            "Rebuilt directed indices: {} vertices, {} edges",
            engine.out_edges.len(),
            edge_count
        );

        Ok(engine)
    }

    pub fn traits(&self) -> &Traits {
        &self.traits
    }

    pub fn add_vertex(&mut self, value: T, properties: VertexProperties) -> GraphResult<()> {
        let hash = (self.hash)(&value);
        if self.out_edges.contains_key(&hash) {
            return Err(GraphError::vertex_already_exists(&hash));
        }

        self.store.add_vertex(hash.clone(), value, properties)?;
        self.out_edges.insert(hash.clone(), Default::default());
        self.in_edges.insert(hash.clone(), Default::default());

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

    pub fn add_edge(&mut self, source: K, target: K, properties: EdgeProperties) -> GraphResult<()> {
        self.ensure_vertex(&source)?;
        self.ensure_vertex(&target)?;

        if self.edge(&source, &target).is_some() {
            return Err(GraphError::edge_already_exists(&source, &target));
        }

        if self.traits.prevent_cycles && algo::creates_cycle(&*self, &source, &target) {
            debug!("Rejected edge {:?} -> {:?}: would create a cycle", source, target);
            return Err(GraphError::would_create_cycle(&source, &target));
        }

        self.apply(EdgeChange::Insert(Edge::new(source, target, properties)))
    }

    /// Look up the edge `source -> target`; absence is not an error
    pub fn edge<Q>(&self, source: &Q, target: &Q) -> Option<Edge<K>>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.out_edges.get(source)?.get(target).cloned()
    }

    pub fn remove_edge<Q>(&mut self, source: &Q, target: &Q) -> GraphResult<()>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        let edge = self
            .edge(source, target)
            .ok_or_else(|| GraphError::edge_not_found(source, target))?;

        self.apply(EdgeChange::Remove(edge.source, edge.target))
    }

    /// Snapshot of the forward index. Every vertex is a key.
    pub fn adjacency_map(&self) -> HashMap<K, HashMap<K, Edge<K>>> {
        snapshot(&self.out_edges)
    }

    /// Snapshot of the reverse index. Every vertex is a key.
    pub fn predecessor_map(&self) -> HashMap<K, HashMap<K, Edge<K>>> {
        snapshot(&self.in_edges)
    }

    /// Number of outgoing plus incoming edges
    pub fn degree<Q>(&self, id: &Q) -> GraphResult<usize>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        let out_degree = self
            .out_edges
            .get(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))?
            .len();
        let in_degree = self.in_edges.get(id).map_or(0, |m| m.len());

        Ok(out_degree + in_degree)
    }

    /// Whether adding `source -> target` would close a cycle
    pub fn creates_cycle<Q>(&self, source: &Q, target: &Q) -> GraphResult<bool>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;

        Ok(algo::creates_cycle(self, &source, &target))
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

    /// Number of vertices
    pub fn order(&self) -> usize {
        self.out_edges.len()
    }

    /// Number of edges
    pub fn size(&self) -> usize {
        self.out_edges.values().map(|targets| targets.len()).sum()
    }

    /// Stored identifier for a borrowed lookup key
    fn resolve<Q>(&self, id: &Q) -> GraphResult<K>
    where
        K: Borrow<Q>,
        Q: std::hash::Hash + Eq + std::fmt::Debug + ?Sized,
    {
        self.out_edges
            .get_key_value(id)
            .map(|(key, _)| key.clone())
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Cascade behind [`Directed::remove_vertex`]
    ///
    /// Every store delete runs before the indices are touched. If one fails,
    /// the edges deleted so far are written back and the indices stay as
    /// they were.
    fn remove_resolved(&mut self, key: K) -> GraphResult<()> {
        let mut incident: Vec<Edge<K>> = self
            .out_edges
            .get(&key)
            .map(|targets| targets.values().cloned().collect())
            .unwrap_or_default();
        if let Some(sources) = self.in_edges.get(&key) {
            // A self-loop is already listed with the outgoing edges.
            incident.extend(sources.values().filter(|edge| edge.source != key).cloned());
        }

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
            self.unindex(&edge.source, &edge.target);
        }
        self.out_edges.remove(&key);
        self.in_edges.remove(&key);

        debug!("Removed vertex {:?} and {} edges", key, incident.len());
        Ok(())
    }

    /// Write back edges a failed cascade already deleted from the store
    fn restore(&mut self, edges: &[Edge<K>]) {
        for edge in edges {
            if let Err(err) = self.store.add_edge(edge.clone()) {
                warn!(
                    "Could not restore edge {:?} -> {:?}: {}",
                    edge.source, edge.target, err
                );
            }
        }
    }

    fn ensure_vertex(&self, id: &K) -> GraphResult<()> {
        if self.out_edges.contains_key(id) {
            Ok(())
        } else {
            Err(GraphError::vertex_not_found(id))
        }
    }

    /// Single mutation path for edges: the store is written first and the
    /// indices are touched only once it succeeded.
    fn apply(&mut self, change: EdgeChange<K>) -> GraphResult<()> {
        match change {
            EdgeChange::Insert(edge) => {
                self.store.add_edge(edge.clone())?;
                debug!("Added edge {:?} -> {:?}", edge.source, edge.target);
                self.index(edge);
            }
            EdgeChange::Remove(source, target) => {
                self.store.remove_edge(&source, &target)?;
                self.unindex(&source, &target);
                debug!("Removed edge {:?} -> {:?}", source, target);
            }
        }
        Ok(())
    }

    fn unindex(&mut self, source: &K, target: &K) {
        if let Some(targets) = self.out_edges.get_mut(source) {
            targets.remove(target);
        }
        if let Some(sources) = self.in_edges.get_mut(target) {
            sources.remove(source);
        }
    }

    fn index(&mut self, edge: Edge<K>) {
        self.out_edges
            .entry(edge.source.clone())
            .or_default()
            .insert(edge.target.clone(), edge.clone());
        self.in_edges
            .entry(edge.target.clone())
            .or_default()
            .insert(edge.source.clone(), edge);
    }
}

impl<K, T, S> Directed<K, T, S>
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

impl<K, T, S> Neighbors<K> for Directed<K, T, S>
where
    K: VertexKey,
{
    fn contains(&self, id: &K) -> bool {
        self.out_edges.contains_key(id)
    }

    fn successors(&self, id: &K) -> Vec<K> {
        self.out_edges
            .get(id)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn predecessors(&self, id: &K) -> Vec<K> {
        self.in_edges
            .get(id)
            .map(|sources| sources.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn snapshot<K: VertexKey>(index: &AdjacencyIndex<K>) -> HashMap<K, HashMap<K, Edge<K>>> {
    index
        .iter()
        .map(|(vertex, neighbors)| {
            let neighbors = neighbors
                .iter()
                .map(|(neighbor, edge)| (neighbor.clone(), edge.clone()))
                .collect();
            (vertex.clone(), neighbors)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::string_hash;

    fn graph(traits: Traits) -> Directed<String, String> {
        Directed::new(string_hash, traits.directed(), MemoryStore::new())
    }

    fn with_vertices(traits: Traits, names: &[&str]) -> Directed<String, String> {
        let mut g = graph(traits);
        for name in names {
            g.add_vertex(name.to_string(), VertexProperties::default()).unwrap();
        }
        g
    }

    fn edge(g: &mut Directed<String, String>, s: &str, t: &str) -> GraphResult<()> {
        g.add_edge(s.to_string(), t.to_string(), EdgeProperties::default())
    }

    #[test]
    fn test_duplicate_vertex_keeps_original() {
        let mut g = graph(Traits::new());
        g.add_vertex("A".to_string(), VertexProperties::new().with_weight(1))
            .unwrap();

        let err = g
            .add_vertex("A".to_string(), VertexProperties::new().with_weight(2))
            .unwrap_err();
        assert_eq!(err, GraphError::VertexAlreadyExists("\"A\"".to_string()));

        let (_, props) = g.vertex_with_properties("A").unwrap();
        assert_eq!(props.weight, 1);
    }

    #[test]
    fn test_indices_in_lockstep() {
        let mut g = with_vertices(Traits::new(), &["A", "B", "C"]);
        edge(&mut g, "A", "B").unwrap();
        edge(&mut g, "A", "C").unwrap();

        let adjacency = g.adjacency_map();
        let predecessors = g.predecessor_map();

        assert_eq!(adjacency["A"].len(), 2);
        assert!(adjacency["B"].is_empty());
        assert!(predecessors["A"].is_empty());
        assert_eq!(predecessors["B"]["A"].target, "B");
        assert_eq!(predecessors["C"]["A"].source, "A");
        assert_eq!(g.size(), 2);
    }

    #[test]
    fn test_missing_endpoint_leaves_indices_untouched() {
        let mut g = with_vertices(Traits::new(), &["A"]);
        let err = edge(&mut g, "A", "Z").unwrap_err();

        assert_eq!(err, GraphError::VertexNotFound("\"Z\"".to_string()));
        assert_eq!(g.size(), 0);
        assert!(g.adjacency_map()["A"].is_empty());
        assert!(g.predecessor_map()["A"].is_empty());
    }

    #[test]
    fn test_reverse_pair_is_distinct_edge() {
        let mut g = with_vertices(Traits::new(), &["A", "B"]);
        edge(&mut g, "A", "B").unwrap();
        edge(&mut g, "B", "A").unwrap();

        assert!(matches!(
            edge(&mut g, "A", "B"),
            Err(GraphError::EdgeAlreadyExists(_, _))
        ));
        assert_eq!(g.size(), 2);
        assert_eq!(g.degree("A").unwrap(), 2);
    }

    #[test]
    fn test_cycle_prevention() {
        let mut g = with_vertices(Traits::new().with_cycle_prevention(), &["A", "B", "C"]);
        edge(&mut g, "A", "B").unwrap();
        edge(&mut g, "B", "C").unwrap();

        assert!(matches!(edge(&mut g, "C", "A"), Err(GraphError::WouldCreateCycle(_, _))));
        assert!(matches!(edge(&mut g, "B", "B"), Err(GraphError::WouldCreateCycle(_, _))));
        edge(&mut g, "A", "C").unwrap();

        assert_eq!(g.size(), 3);
        assert!(g.predecessor_map()["A"].is_empty());
    }

    #[test]
    fn test_cycles_allowed_without_prevention() {
        let mut g = with_vertices(Traits::new(), &["A", "B"]);
        edge(&mut g, "A", "B").unwrap();
        edge(&mut g, "B", "A").unwrap();
        edge(&mut g, "A", "A").unwrap();

        assert!(g.creates_cycle("A", "B").unwrap());
        // Self-loop counts as both outgoing and incoming
        assert_eq!(g.degree("A").unwrap(), 4);
    }

    #[test]
    fn test_remove_edge() {
        let mut g = with_vertices(Traits::new(), &["A", "B"]);
        edge(&mut g, "A", "B").unwrap();

        assert!(matches!(g.remove_edge("B", "A"), Err(GraphError::EdgeNotFound(_, _))));
        g.remove_edge("A", "B").unwrap();

        assert!(g.edge("A", "B").is_none());
        assert!(g.predecessor_map()["B"].is_empty());
        edge(&mut g, "A", "B").unwrap();
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        let mut g = with_vertices(Traits::new(), &["A", "B", "C"]);
        edge(&mut g, "A", "B").unwrap();
        edge(&mut g, "B", "C").unwrap();
        edge(&mut g, "B", "B").unwrap();
        edge(&mut g, "A", "C").unwrap();

        g.remove_vertex("B").unwrap();

        assert_eq!(g.order(), 2);
        assert_eq!(g.size(), 1);
        assert!(!g.adjacency_map().contains_key("B"));
        assert!(g.predecessor_map()["C"].contains_key("A"));
        assert!(!g.predecessor_map()["C"].contains_key("B"));
        assert!(g.vertex_with_properties("B").is_err());
        assert!(g.remove_vertex("B").is_err());
    }

    #[test]
    fn test_rebuild_from_store() {
        let mut g = with_vertices(Traits::new(), &["A", "B", "C"]);
        edge(&mut g, "A", "B").unwrap();
        edge(&mut g, "C", "B").unwrap();

        let rebuilt = Directed::with_store(string_hash, *g.traits(), g.store.clone()).unwrap();

        assert_eq!(rebuilt.adjacency_map(), g.adjacency_map());
        assert_eq!(rebuilt.predecessor_map(), g.predecessor_map());
        assert_eq!(rebuilt.degree("B").unwrap(), 2);
    }

    #[test]
    fn test_rebuild_rejects_dangling_edge() {
        let mut store: MemoryStore<String, String> = MemoryStore::new();
        store
            .add_vertex("A".to_string(), "A".to_string(), VertexProperties::default())
            .unwrap();
        store
            .add_edge(Edge::new("A".to_string(), "B".to_string(), EdgeProperties::default()))
            .unwrap();

        let result = Directed::with_store(string_hash, Traits::new().directed(), store);
        assert!(matches!(result, Err(GraphError::VertexNotFound(_))));
    }
}
