//! Vertex and edge metadata
//!
//! Properties ride along with vertices and edges without taking part in
//! identity: two vertices with the same identifier are the same vertex no
//! matter what their properties say.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller-defined value carried by an edge
///
/// The engine stores and clones it but never looks inside. It is
/// serializable so it persists with the edge record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Bytes(Vec<u8>),
    List(Vec<Payload>),
    Map(HashMap<String, Payload>),
}

impl Payload {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Payload::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Payload::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Payload::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Payload]> {
        match self {
            Payload::List(items) => Some(items),
            _ => None,
        }
    }

    /// Entry of a map payload; `None` for other variants too
    pub fn get(&self, key: &str) -> Option<&Payload> {
        match self {
            Payload::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<i64> for Payload {
    fn from(i: i64) -> Self {
        Payload::Integer(i)
    }
}

impl From<f64> for Payload {
    fn from(f: f64) -> Self {
        Payload::Float(f)
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::Boolean(b)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

/// Metadata of a vertex
///
/// ```rust
/// use hashgraph::VertexProperties;
///
/// let props = VertexProperties::new()
///     .with_weight(4)
///     .with_attribute("color", "red");
/// assert_eq!(props.attributes["color"], "red");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexProperties {
    pub weight: i64,
    pub attributes: HashMap<String, String>,
}

impl VertexProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Metadata of an edge: weight, string attributes and an opaque payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeProperties {
    pub weight: i64,
    pub attributes: HashMap<String, String>,
    /// Caller-defined payload, never inspected by the engine
    pub data: Option<Payload>,
}

impl EdgeProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<Payload>) -> Self {
        self.data = Some(data.into());
        self
    }
}
