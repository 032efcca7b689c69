//! Shared graph snapshots plus the single mutating path.
//!
//! Readers clone an `Arc<GraphSnapshot>` and work on it without locks.
//! Writers go through [`GraphManager::write`], which holds the writer mutex
//! across read-persisted → mutate → save → reload, so concurrent writers
//! cannot interleave stale reloads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use fundgraph_core::config::GraphConfig;
use fundgraph_core::errors::{FundGraphError, FundGraphResult};
use fundgraph_core::traits::IGraphStorage;
use fundgraph_observability::{events, reload_span};

use crate::algorithms::GraphAlgorithms;
use crate::persistence::{JsonFileStorage, MemoryStorage};
use crate::store::GraphStore;

/// One immutable generation of the graph and its algorithms.
pub struct GraphSnapshot {
    generation: u64,
    store: Arc<GraphStore>,
    algorithms: GraphAlgorithms,
}

impl GraphSnapshot {
    fn new(generation: u64, store: GraphStore, pagerank_ttl: Duration) -> Self {
        let store = Arc::new(store);
        Self {
            generation,
            algorithms: GraphAlgorithms::new(Arc::clone(&store), pagerank_ttl),
            store,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn shared_store(&self) -> Arc<GraphStore> {
        Arc::clone(&self.store)
    }

    pub fn algorithms(&self) -> &GraphAlgorithms {
        &self.algorithms
    }
}

/// Owner of the current snapshot and of the persisted graph.
pub struct GraphManager {
    storage: Arc<dyn IGraphStorage>,
    current: RwLock<Arc<GraphSnapshot>>,
    generation: AtomicU64,
    writer: Mutex<()>,
    pagerank_ttl: Duration,
}

impl GraphManager {
    /// Load the graph from `storage`. A missing store yields an empty graph;
    /// an unreadable or malformed one is an error.
    pub fn open(storage: Arc<dyn IGraphStorage>, config: &GraphConfig) -> FundGraphResult<Self> {
        let pagerank_ttl = Duration::from_secs(config.pagerank_ttl_secs);
        let store = Self::read_store(storage.as_ref())?;
        let snapshot = GraphSnapshot::new(1, store, pagerank_ttl);
        events::graph_loaded(
            &storage.describe(),
            snapshot.store().node_count(),
            snapshot.store().edge_count(),
            1,
        );
        Ok(Self {
            storage,
            current: RwLock::new(Arc::new(snapshot)),
            generation: AtomicU64::new(1),
            writer: Mutex::new(()),
            pagerank_ttl,
        })
    }

    /// Open the JSON file named by `config.path`.
    pub fn open_file(config: &GraphConfig) -> FundGraphResult<Self> {
        Self::open(Arc::new(JsonFileStorage::new(&config.path)), config)
    }

    /// Manager over an in-memory store seeded with `store`.
    pub fn in_memory(store: GraphStore, config: &GraphConfig) -> FundGraphResult<Self> {
        let storage = MemoryStorage::with_document(store.to_document());
        Self::open(Arc::new(storage), config)
    }

    fn read_store(storage: &dyn IGraphStorage) -> FundGraphResult<GraphStore> {
        match storage.load()? {
            Some(doc) => Ok(GraphStore::from_document(doc)),
            None => {
                events::graph_missing(&storage.describe());
                Ok(GraphStore::new())
            }
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<GraphSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn storage(&self) -> &Arc<dyn IGraphStorage> {
        &self.storage
    }

    /// Re-read persistence and swap in a new snapshot. On error the
    /// previous snapshot stays current.
    pub fn reload(&self) -> FundGraphResult<Arc<GraphSnapshot>> {
        let store = Self::read_store(self.storage.as_ref())?;
        Ok(self.install(store))
    }

    fn install(&self, store: GraphStore) -> Arc<GraphSnapshot> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let _span = reload_span!(generation).entered();
        let snapshot = Arc::new(GraphSnapshot::new(generation, store, self.pagerank_ttl));
        events::graph_loaded(
            &self.storage.describe(),
            snapshot.store().node_count(),
            snapshot.store().edge_count(),
            generation,
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        snapshot
    }

    /// Run a mutation against the persisted graph under the writer lock:
    /// read the store, apply `mutate`, save, reload. If `mutate` fails
    /// nothing is saved.
    pub fn write<T, F>(&self, mutate: F) -> FundGraphResult<T>
    where
        F: FnOnce(&mut GraphStore) -> FundGraphResult<T>,
    {
        let _guard = self
            .writer
            .lock()
            .map_err(|e| FundGraphError::ConcurrencyError(e.to_string()))?;

        let mut store = Self::read_store(self.storage.as_ref())?;
        let out = mutate(&mut store)?;
        self.storage.save(&store.to_document())?;
        self.install(store);
        Ok(out)
    }
}
