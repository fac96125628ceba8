//! In-memory document store backend
//!
//! Same predicate and merge semantics as the Postgres backend, kept in a
//! process-local map. Used by the test suite and as a lightweight local
//! development profile.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::store::{DocumentStore, ExpectedCount, Predicate};
use crate::utils::errors::{EventForgeError, Result};

/// Process-local document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    fn matches(doc: &Value, predicates: &[Predicate]) -> bool {
        predicates.iter().all(|predicate| match predicate {
            Predicate::Eq { field, value } => doc.get(field) == Some(value),
            Predicate::ContainsAny { field, values } => doc
                .get(field)
                .and_then(Value::as_array)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(Value::as_str)
                        .any(|entry| values.iter().any(|v| v == entry))
                })
                .unwrap_or(false),
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
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

        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Value::Object(doc));

        Ok(id)
    }

    async fn get_by_predicates(
        &self,
        collection: &str,
        predicates: &[Predicate],
        expected: ExpectedCount,
    ) -> Result<Vec<Value>> {
        let docs: Vec<Value> = self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| Self::matches(doc, predicates))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

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
        let patch = match partial {
            Value::Object(map) => map,
            _ => {
                return Err(EventForgeError::Validation(
                    "merge payload must be a JSON object".to_string(),
                ))
            }
        };

        let mut affected = 0u64;
        if let Some(docs) = self.collections.lock().unwrap().get_mut(collection) {
            for doc in docs.iter_mut().filter(|doc| Self::matches(doc, predicates)) {
                if let Value::Object(fields) = doc {
                    for (key, value) in &patch {
                        fields.insert(key.clone(), value.clone());
                    }
                    affected += 1;
                }
            }
        }

        if !expected.matches(affected) {
            tracing::warn!(
                collection = collection,
                expected = %expected,
                affected = affected,
                "Merge affected an unexpected number of documents"
            );
        }
        Ok(affected)
    }

    async fn delete_by_predicates(
        &self,
        collection: &str,
        predicates: &[Predicate],
        expected: ExpectedCount,
    ) -> Result<u64> {
        let mut affected = 0u64;
        if let Some(docs) = self.collections.lock().unwrap().get_mut(collection) {
            let before = docs.len();
            docs.retain(|doc| !Self::matches(doc, predicates));
            affected = (before - docs.len()) as u64;
        }

        if !expected.matches(affected) {
            tracing::warn!(
                collection = collection,
                expected = %expected,
                affected = affected,
                "Delete affected an unexpected number of documents"
            );
        }
        Ok(affected)
    }
}
