//! Event record model
//!
//! The Event Record is the normalized, queryable projection of an event,
//! derived from its designs. Stored records carry `designIds` (weak
//! references to the design documents); assembled reads replace that list
//! with the fetched `designs`. A record never holds both at once.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::design::Design;
use crate::utils::errors::Result;

/// Normalized event projection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<StartHour>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_address_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    /// The design whose mutable value is the authoritative source of
    /// `start_date`/`end_date`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_design_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub design_ids: Vec<String>,
    /// Assembled on read only, never persisted. Missing designs appear as
    /// `None` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designs: Option<Vec<Option<Design>>>,
}

impl EventRecord {
    /// Initialize a draft record for a new event; drafts start private
    pub fn draft(uid: &str) -> Self {
        Self {
            uid: Some(uid.to_string()),
            is_public: false,
            ..Self::default()
        }
    }
}

/// Derived bucket of the start date's hour-of-day
///
/// Half-open intervals: [6,12) morning, [12,18) afternoon, [18,24) evening.
/// Hours in [0,6) have no bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StartHour {
    Morning,
    Afternoon,
    Evening,
}

impl StartHour {
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            6..=11 => Some(StartHour::Morning),
            12..=17 => Some(StartHour::Afternoon),
            18..=23 => Some(StartHour::Evening),
            _ => None,
        }
    }

    pub fn from_date(date: &DateTime<Utc>) -> Option<Self> {
        Self::from_hour(date.hour())
    }
}

/// Sparse patch on the event record, produced by field extraction
///
/// Only populated fields are serialized, so merging the patch never clobbers
/// fields other designs own.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<StartHour>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_address_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_logo: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Serialize into a partial payload suitable for a store merge
    pub fn to_merge_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Apply the populated fields onto a record (last write wins)
    pub fn apply(&self, record: &mut EventRecord) {
        if let Some(v) = &self.name {
            record.name = Some(v.clone());
        }
        if let Some(v) = &self.description {
            record.description = Some(v.clone());
        }
        if let Some(v) = &self.banner {
            record.banner = Some(v.clone());
        }
        if let Some(v) = self.start_date {
            record.start_date = Some(v);
        }
        if let Some(v) = self.end_date {
            record.end_date = Some(v);
        }
        if let Some(v) = self.start_hour {
            record.start_hour = Some(v);
        }
        if let Some(v) = &self.location_id {
            record.location_id = Some(v.clone());
        }
        if let Some(v) = &self.location_address_region {
            record.location_address_region = Some(v.clone());
        }
        if let Some(v) = &self.organization_id {
            record.organization_id = Some(v.clone());
        }
        if let Some(v) = &self.organizer_name {
            record.organizer_name = Some(v.clone());
        }
        if let Some(v) = &self.organizer_logo {
            record.organizer_logo = Some(v.clone());
        }
    }
}

/// Event list query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    /// Raw search phrase; tokenized before it reaches the store
    #[serde(default)]
    pub search: Option<String>,
}

/// Calendar drag/patch request
///
/// `is_public` stays `Option<bool>` so an explicit `false` is distinguishable
/// from an absent field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPatchRequest {
    pub id: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

/// Outcome of a cascading event deletion
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DeleteOutcome {
    /// Every individual delete affected exactly one document
    Deleted,
    /// At least one delete deviated from the expected count
    Partial,
    /// No such event; nothing to delete
    NotFound,
}
