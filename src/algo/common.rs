//! Shared utilities for graph algorithms
//!
//! Provides a read-only view of the graph topology for algorithm execution.

/// Neighbor lookups an algorithm needs from an engine.
///
/// For undirected graphs successors and predecessors are the same set.
pub trait Neighbors<K> {
    /// Whether `id` is a vertex of the graph
    fn contains(&self, id: &K) -> bool;

    /// Vertices reachable over one forward edge
    fn successors(&self, id: &K) -> Vec<K>;

    /// Vertices with an edge pointing at `id`
    fn predecessors(&self, id: &K) -> Vec<K>;
}

#[cfg(test)]
pub(crate) mod fixture {
    //! Plain adjacency-list view used by the algorithm unit tests.

    use super::Neighbors;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct ListView {
        pub outgoing: HashMap<u32, Vec<u32>>,
        pub incoming: HashMap<u32, Vec<u32>>,
    }

    impl ListView {
        pub fn directed(vertices: &[u32], edges: &[(u32, u32)]) -> Self {
            let mut view = ListView::default();
            for v in vertices {
                view.outgoing.insert(*v, Vec::new());
                view.incoming.insert(*v, Vec::new());
            }
            for (s, t) in edges {
                view.outgoing.get_mut(s).unwrap().push(*t);
                view.incoming.get_mut(t).unwrap().push(*s);
            }
            view
        }

        pub fn undirected(vertices: &[u32], edges: &[(u32, u32)]) -> Self {
            let mut both = edges.to_vec();
            both.extend(edges.iter().filter(|(s, t)| s != t).map(|(s, t)| (*t, *s)));
            Self::directed(vertices, &both)
        }
    }

    impl Neighbors<u32> for ListView {
        fn contains(&self, id: &u32) -> bool {
            self.outgoing.contains_key(id)
        }

        fn successors(&self, id: &u32) -> Vec<u32> {
            self.outgoing.get(id).cloned().unwrap_or_default()
        }

        fn predecessors(&self, id: &u32) -> Vec<u32> {
            self.incoming.get(id).cloned().unwrap_or_default()
        }
    }
}
