//! Errors returned by graph operations

use super::store::StoreError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during graph operations
///
/// Identifiers are rendered with their `Debug` form so the error type stays
/// independent of the identifier type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex {0} not found")]
    VertexNotFound(String),

    #[error("Vertex {0} already exists")]
    VertexAlreadyExists(String),

    #[error("Edge {0} -> {1} not found")]
    EdgeNotFound(String, String),

    #[error("Edge {0} -> {1} already exists")]
    EdgeAlreadyExists(String, String),

    #[error("Edge {0} -> {1} would create a cycle")]
    WouldCreateCycle(String, String),

    #[error("Storage backend error: {0}")]
    Store(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    pub(crate) fn vertex_not_found<K: fmt::Debug + ?Sized>(id: &K) -> Self {
        GraphError::VertexNotFound(format!("{:?}", id))
    }

    pub(crate) fn vertex_already_exists<K: fmt::Debug + ?Sized>(id: &K) -> Self {
        GraphError::VertexAlreadyExists(format!("{:?}", id))
    }

    pub(crate) fn edge_not_found<K: fmt::Debug + ?Sized>(source: &K, target: &K) -> Self {
        GraphError::EdgeNotFound(format!("{:?}", source), format!("{:?}", target))
    }

    pub(crate) fn edge_already_exists<K: fmt::Debug + ?Sized>(source: &K, target: &K) -> Self {
        GraphError::EdgeAlreadyExists(format!("{:?}", source), format!("{:?}", target))
    }

    pub(crate) fn would_create_cycle<K: fmt::Debug + ?Sized>(source: &K, target: &K) -> Self {
        GraphError::WouldCreateCycle(format!("{:?}", source), format!("{:?}", target))
    }
}

impl From<StoreError> for GraphError {
    fn from(err: StoreError) -> Self {
        GraphError::Store(err.to_string())
    }
}
