//! Organization service
//!
//! Supplies organizer display data (name, logo) by organization ID.

use std::sync::Arc;

use tracing::debug;

use crate::models::organization::Organization;
use crate::store::{DocumentStore, ExpectedCount, Predicate, ORGANIZATIONS};
use crate::utils::errors::Result;

/// Organization lookup service
#[derive(Clone)]
pub struct OrganizationService {
    store: Arc<dyn DocumentStore>,
}

impl OrganizationService {
    /// Create a new OrganizationService instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a new organization owned by `uid`
    pub async fn create_organization(
        &self,
        uid: &str,
        organization: &Organization,
    ) -> Result<Organization> {
        let id = self
            .store
            .create(ORGANIZATIONS, uid, serde_json::to_value(organization)?)
            .await?;
        let mut created = organization.clone();
        created.id = Some(id);
        created.uid = Some(uid.to_string());
        Ok(created)
    }

    /// Look up an organization by ID
    pub async fn get_organization(&self, organization_id: &str) -> Result<Option<Organization>> {
        debug!(organization_id = organization_id, "Looking up organization");
        let docs = self
            .store
            .get_by_predicates(
                ORGANIZATIONS,
                &[Predicate::eq("id", organization_id)],
                ExpectedCount::Between(0, 1),
            )
            .await?;
        docs.into_iter()
            .next()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .transpose()
    }

    /// Resolve an organization's logo URL
    pub async fn get_logo_url(&self, organization_id: &str) -> Result<Option<String>> {
        Ok(self
            .get_organization(organization_id)
            .await?
            .and_then(|organization| organization.logo))
    }
}
