//! Graph traits: construction-time flags that never change afterward

use serde::{Deserialize, Serialize};

/// Flags chosen once when a graph is built
///
/// The default is an undirected graph that accepts cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Traits {
    /// Edges are ordered pairs
    pub is_directed: bool,

    /// Reject any edge that would close a cycle
    pub prevent_cycles: bool,
}

impl Traits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the graph directed
    pub fn directed(mut self) -> Self {
        self.is_directed = true;
        self
    }

    /// Turn on acyclic enforcement
    pub fn with_cycle_prevention(mut self) -> Self {
        self.prevent_cycles = true;
        self
    }
}
