use std::{
    collections::HashMap,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

/// A loosely typed record as the store keeps it: a JSON object whose shape
/// is owned by whoever wrote it.
pub type Document = Map<String, Value>;

/// Field the store writes its assigned identifier into.
pub const ID_FIELD: &str = "_id";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Connect(String),
    Backend(String),
    Serde(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connect(message) => write!(f, "store connection failed: {message}"),
            StoreError::Backend(message) => write!(f, "store backend error: {message}"),
            StoreError::Serde(message) => write!(f, "store serialization error: {message}"),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// Filters — query-by-example against document fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FieldPredicate {
    /// Exact value equality; a missing field never matches.
    Eq(Value),
    /// Case-insensitive substring match against string fields only.
    ContainsInsensitive(String),
}

/// Ordered conjunction of per-field predicates. An empty filter matches
/// every document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    clauses: Vec<(String, FieldPredicate)>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.clauses.push((field.to_string(), FieldPredicate::Eq(value.into())));
        self
    }

    pub fn contains_insensitive(mut self, field: &str, needle: &str) -> Self {
        self.clauses.push((
            field.to_string(),
            FieldPredicate::ContainsInsensitive(needle.to_string()),
        ));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.clauses.iter().all(|(field, predicate)| {
            let Some(value) = document.get(field) else {
                return false;
            };
            match predicate {
                FieldPredicate::Eq(expected) => value == expected,
                FieldPredicate::ContainsInsensitive(needle) => value
                    .as_str()
                    .is_some_and(|text| {
                        text.to_lowercase().contains(&needle.to_lowercase())
                    }),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of `collection` matching `filter`, in insertion order.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    /// Lookup by the store-assigned identifier.
    async fn find_one_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert `document`, assigning a fresh identifier, and return it.
    async fn insert_one(&self, collection: &str, document: Document)
    -> Result<String, StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

static DOCUMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn generate_document_id() -> String {
    let nonce = DOCUMENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0);
    format!("{millis:012x}{:06x}{nonce:06x}", std::process::id() & 0xff_ffff)
}

/// Process-local document store. Collections spring into existence on first
/// insert; reads of unknown collections yield empty results, matching how
/// document databases behave.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held by `collection`. Test hook.
    pub async fn collection_len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(documents
            .iter()
            .filter(|document| filter.matches(document))
            .cloned()
            .collect())
    }

    async fn find_one_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(None);
        };
        Ok(documents
            .iter()
            .find(|document| {
                document
                    .get(ID_FIELD)
                    .and_then(Value::as_str)
                    .is_some_and(|value| value == id)
            })
            .cloned())
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, StoreError> {
        let id = generate_document_id();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        self.collections
            .lock()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(pairs: &[(&str, Value)]) -> Document {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids_and_preserves_order() {
        let store = InMemoryStore::new();
        let first = store
            .insert_one("crops", document(&[("name", json!("Rice"))]))
            .await
            .unwrap();
        let second = store
            .insert_one("crops", document(&[("name", json!("Wheat"))]))
            .await
            .unwrap();
        assert_ne!(first, second);

        let all = store.find("crops", &Filter::all()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].get("name"), Some(&json!("Rice")));
        assert_eq!(all[1].get("name"), Some(&json!("Wheat")));
        assert_eq!(all[0].get(ID_FIELD), Some(&json!(first)));
    }

    #[tokio::test]
    async fn find_with_eq_filter_is_exact() {
        let store = InMemoryStore::new();
        store
            .insert_one("crops", document(&[("season", json!("kharif"))]))
            .await
            .unwrap();
        store
            .insert_one("crops", document(&[("season", json!("rabi"))]))
            .await
            .unwrap();

        let kharif = store
            .find("crops", &Filter::all().eq("season", "kharif"))
            .await
            .unwrap();
        assert_eq!(kharif.len(), 1);

        let upper = store
            .find("crops", &Filter::all().eq("season", "KHARIF"))
            .await
            .unwrap();
        assert!(upper.is_empty());
    }

    #[tokio::test]
    async fn eq_filter_on_missing_field_matches_nothing() {
        let store = InMemoryStore::new();
        store
            .insert_one("schemes", document(&[("title", json!("Crop insurance"))]))
            .await
            .unwrap();
        let matches = store
            .find("schemes", &Filter::all().eq("state", ""))
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn contains_insensitive_matches_substrings_anywhere() {
        let store = InMemoryStore::new();
        store
            .insert_one(
                "prices",
                document(&[("state", json!("Tamil Nadu")), ("crop", json!("Rice"))]),
            )
            .await
            .unwrap();
        store
            .insert_one(
                "prices",
                document(&[("state", json!("Karnataka")), ("crop", json!("Coffee"))]),
            )
            .await
            .unwrap();

        let matches = store
            .find("prices", &Filter::all().contains_insensitive("state", "tamil"))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].get("crop"), Some(&json!("Rice")));

        let nadu = store
            .find("prices", &Filter::all().contains_insensitive("state", "NADU"))
            .await
            .unwrap();
        assert_eq!(nadu.len(), 1);
    }

    #[tokio::test]
    async fn contains_insensitive_ignores_non_string_fields() {
        let store = InMemoryStore::new();
        store
            .insert_one("prices", document(&[("state", json!(42))]))
            .await
            .unwrap();
        let matches = store
            .find("prices", &Filter::all().contains_insensitive("state", "4"))
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn find_one_by_id_returns_the_inserted_document() {
        let store = InMemoryStore::new();
        let id = store
            .insert_one("users", document(&[("name", json!("Asha"))]))
            .await
            .unwrap();

        let found = store.find_one_by_id("users", &id).await.unwrap();
        assert_eq!(
            found.and_then(|doc| doc.get("name").cloned()),
            Some(json!("Asha"))
        );

        let missing = store.find_one_by_id("users", "nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn unknown_collection_reads_are_empty_not_errors() {
        let store = InMemoryStore::new();
        assert!(store.find("ghosts", &Filter::all()).await.unwrap().is_empty());
        assert!(store.find_one_by_id("ghosts", "x").await.unwrap().is_none());
    }
}
