use super::{DocumentStore, Keyspace, StoreError};
use crate::models::Collection;
use crate::query::{BuiltQuery, QueryParam, TravelQuery};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};

/// Stores every collection of the keyspace in the `documents` table as JSONB bodies keyed by
/// `(bucket, scope, collection, key)`.
pub struct PgDocumentStore {
    pool: Pool<Postgres>,
    keyspace: Keyspace,
}

impl PgDocumentStore {
    pub fn new(pool: Pool<Postgres>, keyspace: Keyspace) -> Self {
        Self { pool, keyspace }
    }

    fn not_found(collection: Collection, key: &str) -> StoreError {
        StoreError::NotFound {
            collection,
            key: key.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    async fn get(&self, collection: Collection, key: &str) -> Result<Value, StoreError> {
        sqlx::query_scalar::<_, Json<Value>>(
            r"
            SELECT body
            FROM documents
            WHERE bucket = $1 AND scope = $2 AND collection = $3 AND key = $4
            ",
        )
        .bind(&self.keyspace.bucket)
        .bind(&self.keyspace.scope)
        .bind(collection.as_str())
        .bind(key)
        .fetch_optional(&self.pool)
        .await?
        .map(|Json(body)| body)
        .ok_or_else(|| Self::not_found(collection, key))
    }

    async fn insert(
        &self,
        collection: Collection,
        key: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r"
            INSERT INTO documents (bucket, scope, collection, key, body)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (bucket, scope, collection, key) DO NOTHING
            ",
        )
        .bind(&self.keyspace.bucket)
        .bind(&self.keyspace.scope)
        .bind(collection.as_str())
        .bind(key)
        .bind(Json(document))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists {
                collection,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    async fn replace(
        &self,
        collection: Collection,
        key: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r"
            UPDATE documents
            SET body = $5, updated_at = now()
            WHERE bucket = $1 AND scope = $2 AND collection = $3 AND key = $4
            ",
        )
        .bind(&self.keyspace.bucket)
        .bind(&self.keyspace.scope)
        .bind(collection.as_str())
        .bind(key)
        .bind(Json(document))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(collection, key));
        }
        Ok(())
    }

    async fn remove(&self, collection: Collection, key: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            r"
            DELETE FROM documents
            WHERE bucket = $1 AND scope = $2 AND collection = $3 AND key = $4
            ",
        )
        .bind(&self.keyspace.bucket)
        .bind(&self.keyspace.scope)
        .bind(collection.as_str())
        .bind(key)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(collection, key));
        }
        Ok(())
    }

    async fn query(&self, query: &TravelQuery) -> Result<Vec<Value>, StoreError> {
        let BuiltQuery { text, params } = query.build(&self.keyspace);

        let mut statement = sqlx::query_scalar::<_, Json<Value>>(&text);
        for param in params {
            statement = match param {
                QueryParam::Text(value) => statement.bind(value),
                QueryParam::Int(value) => statement.bind(value),
            };
        }

        let rows = statement.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM documents WHERE bucket = $1 AND scope = $2
            )
            ",
        )
        .bind(&self.keyspace.bucket)
        .bind(&self.keyspace.scope)
        .fetch_one(&self.pool)
        .await?;

        Ok(!exists)
    }
}
