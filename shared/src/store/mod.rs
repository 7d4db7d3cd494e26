mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

use crate::models::{Collection, Document};
use crate::query::TravelQuery;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// The bucket and scope every collection of a store lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    pub bucket: String,
    pub scope: String,
}

impl Keyspace {
    pub fn new(bucket: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            scope: scope.into(),
        }
    }
}

impl Default for Keyspace {
    fn default() -> Self {
        Keyspace::new("travel-sample", "inventory")
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {key:?} not found in collection {collection}")]
    NotFound { collection: Collection, key: String },
    #[error("document {key:?} already exists in collection {collection}")]
    AlreadyExists { collection: Collection, key: String },
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value and query primitives over the collections of one [`Keyspace`].
///
/// Every call is a single round trip with no retries. A missing or duplicate key is reported as
/// [`StoreError::NotFound`] / [`StoreError::AlreadyExists`], never as a backend failure.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn keyspace(&self) -> &Keyspace;

    async fn get(&self, collection: Collection, key: &str) -> Result<Value, StoreError>;

    async fn insert(
        &self,
        collection: Collection,
        key: &str,
        document: Value,
    ) -> Result<(), StoreError>;

    async fn replace(
        &self,
        collection: Collection,
        key: &str,
        document: Value,
    ) -> Result<(), StoreError>;

    async fn remove(&self, collection: Collection, key: &str) -> Result<(), StoreError>;

    async fn query(&self, query: &TravelQuery) -> Result<Vec<Value>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Whether the keyspace holds no documents at all.
    async fn is_empty(&self) -> Result<bool, StoreError>;
}

/// Typed access to a [`DocumentStore`]; the collection is taken from the [`Document`] type.
#[derive(Clone)]
pub struct Gateway {
    store: Arc<dyn DocumentStore>,
}

impl Gateway {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub async fn get<D: Document>(&self, key: &str) -> Result<D, StoreError> {
        debug!(collection = %D::COLLECTION, key, "get document");
        let document = self.store.get(D::COLLECTION, key).await?;
        Ok(serde_json::from_value(document)?)
    }

    pub async fn insert<D: Document>(&self, key: &str, document: &D) -> Result<(), StoreError> {
        debug!(collection = %D::COLLECTION, key, "insert document");
        let document = serde_json::to_value(document)?;
        self.store.insert(D::COLLECTION, key, document).await
    }

    pub async fn replace<D: Document>(&self, key: &str, document: &D) -> Result<(), StoreError> {
        debug!(collection = %D::COLLECTION, key, "replace document");
        let document = serde_json::to_value(document)?;
        self.store.replace(D::COLLECTION, key, document).await
    }

    pub async fn remove<D: Document>(&self, key: &str) -> Result<(), StoreError> {
        debug!(collection = %D::COLLECTION, key, "remove document");
        self.store.remove(D::COLLECTION, key).await
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &TravelQuery,
    ) -> Result<Vec<T>, StoreError> {
        debug!(query = ?query, "run query");
        self.store
            .query(query)
            .await?
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Airline, Airport};

    fn gateway() -> Gateway {
        Gateway::new(Arc::new(MemoryDocumentStore::new(Keyspace::new(
            "travel-sample",
            "inventory",
        ))))
    }

    fn airline(name: &str) -> Airline {
        Airline {
            name: name.to_string(),
            callsign: "CALL".to_string(),
            country: "France".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn typed_round_trip_uses_document_collection() {
        let gateway = gateway();
        gateway.insert("airline_1", &airline("Air One")).await.unwrap();

        let stored: Airline = gateway.get("airline_1").await.unwrap();
        assert_eq!(stored, airline("Air One"));

        let wrong_collection = gateway.get::<Airport>("airline_1").await;
        assert!(matches!(
            wrong_collection,
            Err(StoreError::NotFound {
                collection: Collection::Airport,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn duplicate_insert_is_already_exists() {
        let gateway = gateway();
        gateway.insert("airline_1", &airline("Air One")).await.unwrap();

        let result = gateway.insert("airline_1", &airline("Air Two")).await;
        assert!(matches!(result, Err(StoreError::AlreadyExists { .. })));

        let stored: Airline = gateway.get("airline_1").await.unwrap();
        assert_eq!(stored.name, "Air One");
    }

    #[tokio::test]
    async fn replace_and_remove_require_existing_key() {
        let gateway = gateway();

        let replaced = gateway.replace("airline_9", &airline("Nine")).await;
        assert!(matches!(replaced, Err(StoreError::NotFound { .. })));
        let removed = gateway.remove::<Airline>("airline_9").await;
        assert!(matches!(removed, Err(StoreError::NotFound { .. })));
        assert!(gateway.store().is_empty().await.unwrap());
    }
}
