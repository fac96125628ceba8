//! Event synchronization service
//!
//! Orchestrates the template→event decomposition pipeline: deriving the
//! normalized event record from a filled template, fanning the designs out
//! into independently stored documents, keeping the record's derived fields
//! consistent as designs are edited, and garbage-collecting the fan-out on
//! deletion. There is no cross-document transaction; partial writes are
//! reconciled by the self-healing read path and reported through result
//! codes.

use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::models::design::{DateMutable, Design, DesignBody};
use crate::models::event::{
    CalendarPatchRequest, DeleteOutcome, EventPatch, EventQuery, EventRecord, StartHour,
};
use crate::models::template::Template;
use crate::services::extraction;
use crate::services::organization::OrganizationService;
use crate::services::text::TextAnalyzer;
use crate::store::{DocumentStore, ExpectedCount, Predicate, EVENTS, EVENT_DESIGNS};
use crate::utils::errors::{EventForgeError, Result};
use crate::utils::logging;

/// Event service for the decomposition and synchronization pipeline
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn DocumentStore>,
    analyzer: Arc<dyn TextAnalyzer>,
    organizations: OrganizationService,
    settings: Settings,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(
        store: Arc<dyn DocumentStore>,
        analyzer: Arc<dyn TextAnalyzer>,
        organizations: OrganizationService,
        settings: Settings,
    ) -> Self {
        Self {
            store,
            analyzer,
            organizations,
            settings,
        }
    }

    /// Instantiate a filled template into an event record plus per-design
    /// documents
    ///
    /// The returned record is complete, including its ID and design linkage;
    /// callers never need a follow-up read. Keywords are recomputed by a
    /// detached background task and may still be empty on an immediate read.
    pub async fn create_event(&self, uid: &str, mut template: Template) -> Result<EventRecord> {
        if template.designs.is_empty() {
            return Err(EventForgeError::Validation("missing designs".to_string()));
        }
        debug!(uid = uid, designs = template.designs.len(), "Creating event from template");

        let mut record = EventRecord::draft(uid);
        for design in &template.designs {
            let (patch, _) = self.resolve_extraction(design).await?;
            patch.apply(&mut record);
        }

        let event_id = self
            .store
            .create(EVENTS, uid, serde_json::to_value(&record)?)
            .await?;
        record.id = Some(event_id.clone());

        self.spawn_keyword_refresh(uid, &event_id);

        // The template must not leak its embedded designs back to callers
        // once they become event-scoped documents
        let designs = std::mem::take(&mut template.designs);
        let persists = designs.into_iter().map(|mut design| {
            // A template-level identity must not leak into multiple event
            // instances
            design.id = None;
            design.uid = Some(uid.to_string());
            design.event_id = Some(event_id.clone());
            let store = Arc::clone(&self.store);
            let uid = uid.to_string();
            async move {
                let payload = serde_json::to_value(&design)?;
                let design_id = store.create(EVENT_DESIGNS, &uid, payload).await?;
                Ok::<_, EventForgeError>((design_id, design))
            }
        });
        let persisted = try_join_all(persists).await?;

        let design_ids: Vec<String> = persisted.iter().map(|(id, _)| id.clone()).collect();
        let date_design_id = persisted
            .iter()
            .find(|(_, design)| design.is_date_bearing())
            .map(|(id, _)| id.clone());

        let mut link = json!({ "designIds": design_ids });
        if let Some(id) = &date_design_id {
            link["dateDesignId"] = json!(id);
        }
        let affected = self
            .store
            .merge_by_predicates(
                EVENTS,
                &[Predicate::eq("id", event_id.clone()), Predicate::eq("uid", uid)],
                link,
                ExpectedCount::Exactly(1),
            )
            .await?;
        if affected != 1 {
            warn!(
                event_id = %event_id,
                affected = affected,
                "Design linkage merge affected an unexpected number of records"
            );
        }

        record.design_ids = design_ids;
        record.date_design_id = date_design_id;
        logging::log_event_action(&event_id, "create", uid, None);
        Ok(record)
    }

    /// Read an event and assemble its designs
    ///
    /// A record whose every referenced design is missing is corrupt; when a
    /// uid is supplied the read deletes the orphan and reports not-found.
    /// Partially missing designs are tolerated as `None` entries.
    pub async fn get_event(&self, id: &str, uid: Option<&str>) -> Result<Option<EventRecord>> {
        let docs = self
            .store
            .get_by_predicates(
                EVENTS,
                &[Predicate::eq("id", id)],
                ExpectedCount::Between(0, 1),
            )
            .await?;
        let Some(doc) = docs.into_iter().next() else {
            return Ok(None);
        };
        let mut record: EventRecord = serde_json::from_value(doc)?;

        let design_ids = std::mem::take(&mut record.design_ids);
        if design_ids.is_empty() {
            record.designs = Some(Vec::new());
            return Ok(Some(record));
        }

        let fetches = design_ids.iter().map(|design_id| {
            let store = Arc::clone(&self.store);
            async move {
                let docs = store
                    .get_by_predicates(
                        EVENT_DESIGNS,
                        &[Predicate::eq("id", design_id.clone())],
                        ExpectedCount::Between(0, 1),
                    )
                    .await?;
                let design = docs
                    .into_iter()
                    .next()
                    .map(serde_json::from_value::<Design>)
                    .transpose()?;
                Ok::<_, EventForgeError>(design)
            }
        });
        let designs = join_all(fetches)
            .await
            .into_iter()
            .collect::<Result<Vec<Option<Design>>>>()?;

        if designs.iter().all(Option::is_none) {
            logging::log_integrity_violation(
                EVENTS,
                id,
                "every referenced design is missing; removing orphaned record",
            );
            if let Some(uid) = uid {
                let affected = self
                    .store
                    .delete_by_predicates(
                        EVENTS,
                        &[Predicate::eq("id", id), Predicate::eq("uid", uid)],
                        ExpectedCount::Exactly(1),
                    )
                    .await?;
                logging::log_event_action(id, "self_heal_delete", uid, None);
                debug!(event_id = id, affected = affected, "Orphaned event record removed");
            }
            return Ok(None);
        }

        record.designs = Some(designs);
        Ok(Some(record))
    }

    /// List events matching the query
    ///
    /// A raw search phrase is tokenized through the same analyzer that
    /// produced the stored keywords, so recall is symmetric.
    pub async fn get_event_list(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        let mut predicates = Vec::new();
        if let Some(uid) = &query.uid {
            predicates.push(Predicate::eq("uid", uid.clone()));
        }
        if let Some(is_public) = query.is_public {
            predicates.push(Predicate::eq("isPublic", is_public));
        }
        if let Some(phrase) = &query.search {
            let terms = self.analyzer.tokenize(phrase).await?;
            if !terms.is_empty() {
                predicates.push(Predicate::contains_any("keywords", terms));
            }
        }

        let docs = self
            .store
            .get_by_predicates(
                EVENTS,
                &predicates,
                ExpectedCount::Between(0, self.settings.query.list_limit),
            )
            .await?;

        docs.into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }

    /// Delete an event and every design it references
    ///
    /// The deletes run concurrently; the operation is successful only when
    /// each one affected exactly one document. Any deviation yields
    /// [`DeleteOutcome::Partial`] rather than an error, so callers can tell
    /// "nothing to delete" from "partial deletion occurred".
    pub async fn delete_event(&self, uid: &str, id: &str) -> Result<DeleteOutcome> {
        let docs = self
            .store
            .get_by_predicates(
                EVENTS,
                &[Predicate::eq("id", id), Predicate::eq("uid", uid)],
                ExpectedCount::Between(0, 1),
            )
            .await?;
        let Some(doc) = docs.into_iter().next() else {
            return Ok(DeleteOutcome::NotFound);
        };
        let record: EventRecord = serde_json::from_value(doc)?;

        if record.design_ids.is_empty() {
            logging::log_integrity_violation(EVENTS, id, "event record references no designs");
        }

        let targets = std::iter::once((EVENTS, id.to_string())).chain(
            record
                .design_ids
                .iter()
                .map(|design_id| (EVENT_DESIGNS, design_id.clone())),
        );
        let counts = try_join_all(
            targets.map(|(collection, doc_id)| self.delete_owned_doc(collection, doc_id, uid)),
        )
        .await?;

        if counts.iter().all(|count| *count == 1) {
            logging::log_event_action(id, "delete", uid, None);
            Ok(DeleteOutcome::Deleted)
        } else {
            warn!(
                event_id = id,
                uid = uid,
                counts = ?counts,
                "Cascading delete affected unexpected document counts"
            );
            Ok(DeleteOutcome::Partial)
        }
    }

    /// Persist a design edit and resynchronize the event record
    ///
    /// The design update and the record merge are independent writes with no
    /// rollback coupling; a failure in between is reconciled by the
    /// self-healing read path.
    pub async fn patch_event_form(&self, uid: &str, design: &Design) -> Result<u64> {
        let design_id = design
            .id
            .as_deref()
            .ok_or_else(|| EventForgeError::Validation("missing design id".to_string()))?;
        let event_id = design
            .event_id
            .as_deref()
            .ok_or_else(|| EventForgeError::Validation("missing design eventId".to_string()))?;
        if !design.has_mutable() {
            return Err(EventForgeError::Validation(
                "missing design mutable content".to_string(),
            ));
        }

        let affected = self
            .store
            .merge_by_predicates(
                EVENT_DESIGNS,
                &[Predicate::eq("id", design_id), Predicate::eq("uid", uid)],
                serde_json::to_value(design)?,
                ExpectedCount::Exactly(1),
            )
            .await?;

        let (patch, refresh_keywords) = self.resolve_extraction(design).await?;
        if !patch.is_empty() {
            self.store
                .merge_by_predicates(
                    EVENTS,
                    &[Predicate::eq("id", event_id), Predicate::eq("uid", uid)],
                    patch.to_merge_value()?,
                    ExpectedCount::Exactly(1),
                )
                .await?;
        }
        if refresh_keywords {
            self.spawn_keyword_refresh(uid, event_id);
        }

        logging::log_event_action(event_id, "patch_form", uid, Some(design_id));
        Ok(affected)
    }

    /// Apply a calendar drag/patch
    ///
    /// The date design is the reconciliation source of truth: when the
    /// record links one and both dates are supplied, the design is patched
    /// before the record. The record patch is sparse; an explicit
    /// `isPublic: false` is a value, not an absence.
    pub async fn patch_event_calendar(
        &self,
        uid: &str,
        request: &CalendarPatchRequest,
    ) -> Result<u64> {
        if request.id.is_empty() {
            return Err(EventForgeError::Validation("missing event id".to_string()));
        }

        let docs = self
            .store
            .get_by_predicates(
                EVENTS,
                &[Predicate::eq("id", request.id.clone()), Predicate::eq("uid", uid)],
                ExpectedCount::Between(0, 1),
            )
            .await?;
        let record: Option<EventRecord> = docs
            .into_iter()
            .next()
            .map(serde_json::from_value)
            .transpose()?;

        if let (Some(record), Some(start), Some(end)) =
            (record.as_ref(), request.start_date, request.end_date)
        {
            if let Some(date_design_id) = &record.date_design_id {
                self.write_through_date_design(uid, date_design_id, start, end)
                    .await?;
            }
        }

        let mut patch = serde_json::Map::new();
        if let Some(is_public) = request.is_public {
            patch.insert("isPublic".to_string(), json!(is_public));
        }
        if let Some(start) = request.start_date {
            patch.insert("startDate".to_string(), json!(start));
            if let Some(bucket) = StartHour::from_date(&start) {
                patch.insert("startHour".to_string(), json!(bucket));
            }
        }
        if let Some(end) = request.end_date {
            patch.insert("endDate".to_string(), json!(end));
        }
        if patch.is_empty() {
            return Ok(0);
        }

        let affected = self
            .store
            .merge_by_predicates(
                EVENTS,
                &[Predicate::eq("id", request.id.clone()), Predicate::eq("uid", uid)],
                Value::Object(patch),
                ExpectedCount::Exactly(1),
            )
            .await?;

        logging::log_event_action(&request.id, "patch_calendar", uid, None);
        Ok(affected)
    }

    /// Recompute an event's keyword set from its name and description
    ///
    /// No-op when the record is gone. Invoked as a detached background task;
    /// its failure never fails the triggering request.
    pub async fn update_event_keywords_by_id(&self, uid: &str, event_id: &str) -> Result<()> {
        let docs = self
            .store
            .get_by_predicates(
                EVENTS,
                &[Predicate::eq("id", event_id), Predicate::eq("uid", uid)],
                ExpectedCount::Between(0, 1),
            )
            .await?;
        let Some(doc) = docs.into_iter().next() else {
            return Ok(());
        };
        let record: EventRecord = serde_json::from_value(doc)?;

        let text = format!(
            "{}。{}",
            record.name.as_deref().unwrap_or_default(),
            record.description.as_deref().unwrap_or_default()
        );
        let keywords = self.analyzer.extract_keywords(&text).await?;

        self.store
            .merge_by_predicates(
                EVENTS,
                &[Predicate::eq("id", event_id), Predicate::eq("uid", uid)],
                json!({ "keywords": keywords }),
                ExpectedCount::Exactly(1),
            )
            .await?;

        info!(event_id = event_id, "Event keywords recomputed");
        Ok(())
    }

    /// Delete a single document by ID under the owner's uid
    async fn delete_owned_doc(&self, collection: &str, doc_id: String, uid: &str) -> Result<u64> {
        self.store
            .delete_by_predicates(
                collection,
                &[Predicate::eq("id", doc_id), Predicate::eq("uid", uid)],
                ExpectedCount::Exactly(1),
            )
            .await
    }

    /// Run extraction for one design and resolve the organizer logo
    async fn resolve_extraction(&self, design: &Design) -> Result<(EventPatch, bool)> {
        let extraction = extraction::extract(design);
        let mut patch = extraction.patch;

        if let Some(organization_id) = &extraction.organization_id {
            patch.organizer_logo = self.organizations.get_logo_url(organization_id).await?;
        }

        Ok((patch, extraction.refresh_keywords))
    }

    /// Overwrite the date design's mutable value with the new pair
    async fn write_through_date_design(
        &self,
        uid: &str,
        date_design_id: &str,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<()> {
        let docs = self
            .store
            .get_by_predicates(
                EVENT_DESIGNS,
                &[Predicate::eq("id", date_design_id), Predicate::eq("uid", uid)],
                ExpectedCount::Between(0, 1),
            )
            .await?;
        let Some(doc) = docs.into_iter().next() else {
            logging::log_integrity_violation(
                EVENT_DESIGNS,
                date_design_id,
                "linked date design is missing",
            );
            return Ok(());
        };
        let mut design: Design = serde_json::from_value(doc)?;

        let mut mutable = match design.body {
            DesignBody::Date(Some(mutable)) => mutable,
            DesignBody::Date(None) => DateMutable::default(),
            _ => {
                logging::log_integrity_violation(
                    EVENT_DESIGNS,
                    date_design_id,
                    "dateDesignId references a non-date design",
                );
                return Ok(());
            }
        };
        mutable.value = Some(crate::models::design::DateRange(start, end));
        design.body = DesignBody::Date(Some(mutable));

        self.store
            .merge_by_predicates(
                EVENT_DESIGNS,
                &[Predicate::eq("id", date_design_id), Predicate::eq("uid", uid)],
                serde_json::to_value(&design)?,
                ExpectedCount::Exactly(1),
            )
            .await?;
        Ok(())
    }

    /// Schedule a keyword recompute as a fire-and-forget background task
    fn spawn_keyword_refresh(&self, uid: &str, event_id: &str) {
        let service = self.clone();
        let uid = uid.to_string();
        let event_id = event_id.to_string();
        tokio::spawn(async move {
            if let Err(err) = service.update_event_keywords_by_id(&uid, &event_id).await {
                logging::log_background_failure("keyword_refresh", &err.to_string());
            }
        });
    }
}
