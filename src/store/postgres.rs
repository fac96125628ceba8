//! Postgres document store backend
//!
//! Documents live in a single `documents` table with the mutable body in a
//! `payload` jsonb column. Predicates compile to jsonb operators and merges
//! are shallow (`payload || patch`), matching the gateway contract.

use chrono::Utc;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;
use uuid::Uuid;

use async_trait::async_trait;

use crate::config::DatabaseConfig;
use crate::store::{DocumentStore, ExpectedCount, Predicate};
use crate::utils::errors::{EventForgeError, Result};

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Some(Duration::from_secs(600)))
        .max_lifetime(Some(Duration::from_secs(1800)))
        .connect(&config.url)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1").execute(&pool).await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Document store backed by a Postgres jsonb table
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
        for predicate in predicates {
            match predicate {
                Predicate::Eq { field, value } => {
                    builder.push(" AND payload -> ");
                    builder.push_bind(field.clone());
                    builder.push("::text = ");
                    builder.push_bind(value.clone());
                }
                Predicate::ContainsAny { field, values } => {
                    builder.push(" AND payload -> ");
                    builder.push_bind(field.clone());
                    builder.push("::text ?| ");
                    builder.push_bind(values.clone());
                }
            }
        }
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn create(&self, collection: &str, uid: &str, payload: Value) -> Result<String> {
        let mut doc = match payload {
            Value::Object(map) => map,
            other => {
                return Err(EventForgeError::Validation(format!(
                    "document payload must be a JSON object, got {}",
                    other
                )))
            }
        };

        let id = Uuid::new_v4().to_string();
        doc.insert("id".to_string(), Value::String(id.clone()));
        doc.insert("uid".to_string(), Value::String(uid.to_string()));

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, uid, payload, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(&id)
        .bind(collection)
        .bind(uid)
        .bind(Value::Object(doc))
        .bind(now)
        .execute(&self.pool)
        .await?;

        crate::utils::logging::log_store_operation("create", collection, 1);
        Ok(id)
    }

    async fn get_by_predicates(
        &self,
        collection: &str,
        predicates: &[Predicate],
        expected: ExpectedCount,
    ) -> Result<Vec<Value>> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT payload FROM documents WHERE collection = ");
        builder.push_bind(collection);
        Self::push_predicates(&mut builder, predicates);

        // Fetch one row past the upper bound so a violation is observable
        let upper = match expected {
            ExpectedCount::Exactly(n) => n,
            ExpectedCount::Between(_, max) => max,
        };
        builder.push(" LIMIT ");
        builder.push_bind(upper as i64 + 1);

        let rows = builder.build().fetch_all(&self.pool).await?;
        let docs: Vec<Value> = rows
            .into_iter()
            .map(|row| row.try_get::<Value, _>("payload"))
            .collect::<std::result::Result<_, sqlx::Error>>()?;

        let actual = docs.len() as u64;
        if !expected.matches(actual) {
            return Err(EventForgeError::CountAssertion {
                collection: collection.to_string(),
                expected: expected.to_string(),
                actual,
            });
        }

        Ok(docs)
    }

    async fn merge_by_predicates(
        &self,
        collection: &str,
        predicates: &[Predicate],
        partial: Value,
        expected: ExpectedCount,
    ) -> Result<u64> {
        if !partial.is_object() {
            return Err(EventForgeError::Validation(
                "merge payload must be a JSON object".to_string(),
            ));
        }

        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE documents SET payload = payload || ");
        builder.push_bind(partial);
        builder.push(", updated_at = ");
        builder.push_bind(Utc::now());
        builder.push(" WHERE collection = ");
        builder.push_bind(collection);
        Self::push_predicates(&mut builder, predicates);

        let affected = builder.build().execute(&self.pool).await?.rows_affected();
        if !expected.matches(affected) {
            tracing::warn!(
                collection = collection,
                expected = %expected,
                affected = affected,
                "Merge affected an unexpected number of documents"
            );
        }
        crate::utils::logging::log_store_operation("merge", collection, affected);
        Ok(affected)
    }

    async fn delete_by_predicates(
        &self,
        collection: &str,
        predicates: &[Predicate],
        expected: ExpectedCount,
    ) -> Result<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("DELETE FROM documents WHERE collection = ");
        builder.push_bind(collection);
        Self::push_predicates(&mut builder, predicates);

        let affected = builder.build().execute(&self.pool).await?.rows_affected();
        if !expected.matches(affected) {
            tracing::warn!(
                collection = collection,
                expected = %expected,
                affected = affected,
                "Delete affected an unexpected number of documents"
            );
        }
        crate::utils::logging::log_store_operation("delete", collection, affected);
        Ok(affected)
    }
}
