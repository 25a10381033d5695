//! RocksDB storage backend
//!
//! Vertices and edges live in separate column families. Keys are the
//! bincode encoding of the vertex identifier (edges: of the
//! `(source, target)` pair), values the bincode encoding of the record.

use crate::graph::{Edge, Store, StoreError, StoreResult, VertexKey, VertexProperties};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DBCompressionType, IteratorMode, Options, DB};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::{debug, info};

const VERTICES_CF: &str = "vertices";
const EDGES_CF: &str = "edges";

/// Configuration of a [`RocksStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RocksStoreConfig {
    /// Database directory
    pub path: PathBuf,
    /// Create the database if the directory holds none
    pub create_if_missing: bool,
    /// LZ4-compress both column families
    pub compression: bool,
}

impl Default for RocksStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./hashgraph_data"),
            create_if_missing: true,
            compression: true,
        }
    }
}

impl RocksStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Serialized vertex record
#[derive(Debug, Serialize, Deserialize)]
struct StoredVertex<T> {
    value: T,
    properties: VertexProperties,
}

/// RocksDB-based vertex/edge store
pub struct RocksStore<K, T> {
    db: DB,
    _marker: PhantomData<fn() -> (K, T)>,
}

impl<K, T> RocksStore<K, T> {
    /// Open or create a store
    pub fn open(config: &RocksStoreConfig) -> StoreResult<Self> {
        info!("Opening RocksDB store at: {:?}", config.path);

        let mut opts = Options::default();
        opts.create_if_missing(config.create_if_missing);
        opts.create_missing_column_families(true);

        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new(VERTICES_CF, Self::cf_options(config)),
            ColumnFamilyDescriptor::new(EDGES_CF, Self::cf_options(config)),
        ];

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)?;

        info!("RocksDB store opened successfully");

        Ok(Self {
            db,
            _marker: PhantomData,
        })
    }

    /// Flush all data to disk
    pub fn flush(&self) -> StoreResult<()> {
        self.db.flush()?;
        debug!("Flushed store to disk");
        Ok(())
    }

    fn cf_options(config: &RocksStoreConfig) -> Options {
        let mut opts = Options::default();
        if config.compression {
            opts.set_compression_type(DBCompressionType::Lz4);
        } else {
            opts.set_compression_type(DBCompressionType::None);
        }
        opts
    }

    fn cf(&self, name: &str) -> StoreResult<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::ColumnFamily(name.to_string()))
    }
}

impl<K, T> Store<K, T> for RocksStore<K, T>
where
    K: VertexKey + Serialize + DeserializeOwned,
    T: Serialize + DeserializeOwned,
{
    fn add_vertex(&mut self, hash: K, value: T, properties: VertexProperties) -> StoreResult<()> {
        let cf = self.cf(VERTICES_CF)?;
        let key = bincode::serialize(&hash)?;
        let record = bincode::serialize(&StoredVertex { value, properties })?;

        self.db.put_cf(&cf, key, record)?;
        debug!("Stored vertex {:?}", hash);
        Ok(())
    }

    fn vertex(&self, hash: &K) -> StoreResult<Option<(T, VertexProperties)>> {
        let cf = self.cf(VERTICES_CF)?;
        let key = bincode::serialize(hash)?;

        match self.db.get_cf(&cf, key)? {
            Some(bytes) => {
                let stored: StoredVertex<T> = bincode::deserialize(&bytes)?;
                Ok(Some((stored.value, stored.properties)))
            }
            None => Ok(None),
        }
    }

    fn remove_vertex(&mut self, hash: &K) -> StoreResult<()> {
        let cf = self.cf(VERTICES_CF)?;
        self.db.delete_cf(&cf, bincode::serialize(hash)?)?;
        debug!("Deleted vertex {:?}", hash);
        Ok(())
    }

    fn list_vertices(&self) -> StoreResult<Vec<K>> {
        let cf = self.cf(VERTICES_CF)?;
        let mut ids = Vec::new();

        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, _) = item?;
            ids.push(bincode::deserialize(&key)?);
        }

        Ok(ids)
    }

    fn add_edge(&mut self, edge: Edge<K>) -> StoreResult<()> {
        let cf = self.cf(EDGES_CF)?;
        let key = bincode::serialize(&(&edge.source, &edge.target))?;
        let record = bincode::serialize(&edge)?;

        self.db.put_cf(&cf, key, record)?;
        debug!("Stored edge {:?} -> {:?}", edge.source, edge.target);
        Ok(())
    }

    fn remove_edge(&mut self, source: &K, target: &K) -> StoreResult<()> {
        let cf = self.cf(EDGES_CF)?;
        self.db.delete_cf(&cf, bincode::serialize(&(source, target))?)?;
        debug!("Deleted edge {:?} -> {:?}", source, target);
        Ok(())
    }

    fn list_edges(&self) -> StoreResult<Vec<Edge<K>>> {
        let cf = self.cf(EDGES_CF)?;
        let mut edges = Vec::new();

        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item?;
            edges.push(bincode::deserialize(&value)?);
        }

        Ok(edges)
    }
}
