//! Edge implementation
//!
//! An edge is always stored with a source and a target. Whether the pair is
//! ordered is decided by the graph's traits, not by the edge itself.

use super::property::EdgeProperties;
use super::types::VertexKey;
use serde::{Deserialize, Serialize};

/// An edge joining two vertices, identified by their identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<K> {
    /// Source vertex (edge goes FROM this vertex in directed graphs)
    pub source: K,

    /// Target vertex
    pub target: K,

    /// Weight, attributes and payload
    pub properties: EdgeProperties,
}

impl<K: VertexKey> Edge<K> {
    pub fn new(source: K, target: K, properties: EdgeProperties) -> Self {
        Edge {
            source,
            target,
            properties,
        }
    }

    /// Check if this edge goes FROM a specific vertex
    pub fn starts_from(&self, vertex: &K) -> bool {
        self.source == *vertex
    }

    /// The same edge with source and target swapped
    pub fn reversed(&self) -> Self {
        Edge {
            source: self.target.clone(),
            target: self.source.clone(),
            properties: self.properties.clone(),
        }
    }

    /// This edge as seen from `vertex`, i.e. with `vertex` as its source.
    /// Only meaningful for undirected graphs.
    pub(crate) fn oriented_from(&self, vertex: &K) -> Self {
        if self.starts_from(vertex) {
            self.clone()
        } else {
            self.reversed()
        }
    }
}
