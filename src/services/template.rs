//! Event template service
//!
//! Templates are per-user drafts: each uid owns at most one template
//! document, edited in place until it is instantiated into an event.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::models::template::Template;
use crate::store::{DocumentStore, ExpectedCount, Predicate, EVENT_TEMPLATES};
use crate::utils::errors::Result;

/// Template service for draft template CRUD
#[derive(Clone)]
pub struct TemplateService {
    store: Arc<dyn DocumentStore>,
}

impl TemplateService {
    /// Create a new TemplateService instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create or merge the user's template, branching on presence of an ID
    pub async fn put_template(&self, uid: &str, template: &Template) -> Result<Template> {
        if let Some(id) = &template.id {
            debug!(uid = uid, template_id = %id, "Merging template");
            self.store
                .merge_by_predicates(
                    EVENT_TEMPLATES,
                    &[Predicate::eq("id", id.clone()), Predicate::eq("uid", uid)],
                    serde_json::to_value(template)?,
                    ExpectedCount::Exactly(1),
                )
                .await?;
            Ok(template.clone())
        } else {
            debug!(uid = uid, "Creating template");
            let id = self
                .store
                .create(EVENT_TEMPLATES, uid, serde_json::to_value(template)?)
                .await?;
            let mut created = template.clone();
            created.id = Some(id);
            created.uid = Some(uid.to_string());
            Ok(created)
        }
    }

    /// Read the user's template
    pub async fn get_template(&self, uid: &str) -> Result<Option<Template>> {
        let docs = self
            .store
            .get_by_predicates(
                EVENT_TEMPLATES,
                &[Predicate::eq("uid", uid)],
                ExpectedCount::Between(0, 1),
            )
            .await?;
        docs.into_iter()
            .next()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .transpose()
    }

    /// Attach the instantiated design ID list to the user's template
    pub async fn merge_design_ids(&self, uid: &str, design_ids: &[String]) -> Result<u64> {
        self.store
            .merge_by_predicates(
                EVENT_TEMPLATES,
                &[Predicate::eq("uid", uid)],
                json!({ "designIds": design_ids }),
                ExpectedCount::Exactly(1),
            )
            .await
    }

    /// Delete the user's template
    pub async fn delete_template(&self, uid: &str) -> Result<u64> {
        self.store
            .delete_by_predicates(
                EVENT_TEMPLATES,
                &[Predicate::eq("uid", uid)],
                ExpectedCount::Exactly(1),
            )
            .await
    }
}
