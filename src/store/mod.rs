//! Document store gateway
//!
//! The services consume an external document store through the
//! [`DocumentStore`] trait: create/read/merge/delete documents selected by a
//! predicate list, with an expected-result-count contract. Queries enforce
//! their expectation and fail on violation; mutations report the affected
//! count and leave the judgment to the caller, so a deviation can be treated
//! as partial success rather than an exception.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;

use crate::utils::errors::Result;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Collection holding normalized event records
pub const EVENTS: &str = "events";
/// Collection holding event-scoped design documents
pub const EVENT_DESIGNS: &str = "event_designs";
/// Collection holding reusable event templates
pub const EVENT_TEMPLATES: &str = "event_templates";
/// Collection holding organizations
pub const ORGANIZATIONS: &str = "organizations";

/// Document selection predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `payload[field] == value`
    Eq { field: String, value: Value },
    /// `payload[field]` is a string array sharing at least one element with
    /// `values`
    ContainsAny { field: String, values: Vec<String> },
}

impl Predicate {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Predicate::Eq {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn contains_any(field: &str, values: Vec<String>) -> Self {
        Predicate::ContainsAny {
            field: field.to_string(),
            values,
        }
    }
}

/// Expected result cardinality of a store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedCount {
    Exactly(u64),
    /// Inclusive range
    Between(u64, u64),
}

impl ExpectedCount {
    pub fn matches(&self, actual: u64) -> bool {
        match *self {
            ExpectedCount::Exactly(n) => actual == n,
            ExpectedCount::Between(min, max) => actual >= min && actual <= max,
        }
    }
}

impl std::fmt::Display for ExpectedCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ExpectedCount::Exactly(n) => write!(f, "exactly {}", n),
            ExpectedCount::Between(min, max) => write!(f, "between {} and {}", min, max),
        }
    }
}

/// External document store contract
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document owned by `uid`, returning its generated ID.
    /// The payload must be a JSON object; `id` and `uid` are written into it.
    async fn create(&self, collection: &str, uid: &str, payload: Value) -> Result<String>;

    /// Query documents matching every predicate. Fails with a count
    /// assertion error when the result cardinality violates `expected`.
    async fn get_by_predicates(
        &self,
        collection: &str,
        predicates: &[Predicate],
        expected: ExpectedCount,
    ) -> Result<Vec<Value>>;

    /// Shallow-merge a partial payload onto matching documents. Returns the
    /// affected count; a deviation from `expected` is reported, not raised.
    async fn merge_by_predicates(
        &self,
        collection: &str,
        predicates: &[Predicate],
        partial: Value,
        expected: ExpectedCount,
    ) -> Result<u64>;

    /// Delete matching documents. Returns the affected count; a deviation
    /// from `expected` is reported, not raised.
    async fn delete_by_predicates(
        &self,
        collection: &str,
        predicates: &[Predicate],
        expected: ExpectedCount,
    ) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_count_matching() {
        assert!(ExpectedCount::Exactly(1).matches(1));
        assert!(!ExpectedCount::Exactly(1).matches(0));
        assert!(ExpectedCount::Between(0, 2).matches(0));
        assert!(ExpectedCount::Between(0, 2).matches(2));
        assert!(!ExpectedCount::Between(0, 2).matches(3));
    }

    #[test]
    fn test_expected_count_display() {
        assert_eq!(ExpectedCount::Exactly(1).to_string(), "exactly 1");
        assert_eq!(ExpectedCount::Between(0, 5).to_string(), "between 0 and 5");
    }
}
