//! Shared helpers for integration tests
//!
//! Provides a deterministic stub text analyzer and fixture builders for
//! templates and designs.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use eventforge::models::design::{
    DateMutable, DateRange, Design, DesignBody, LocationMutable, OrganizerMutable, TextMutable,
};
use eventforge::models::template::Template;
use eventforge::services::{EventService, OrganizationService, TemplateService, TextAnalyzer};
use eventforge::store::MemoryStore;
use eventforge::{Result, Settings};

/// Deterministic analyzer: keywords and tokens are lowercase whitespace
/// splits, so storage and query sides stay symmetric.
pub struct StubAnalyzer;

#[async_trait]
impl TextAnalyzer for StubAnalyzer {
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .split(['。', ' ', '\t', '\n'])
            .filter(|term| !term.is_empty())
            .map(|term| term.to_lowercase())
            .collect())
    }

    async fn tokenize(&self, phrase: &str) -> Result<Vec<String>> {
        Ok(phrase
            .split_whitespace()
            .map(|term| term.to_lowercase())
            .collect())
    }
}

/// Build an event service over a shared in-memory store
pub fn event_service(store: Arc<MemoryStore>) -> EventService {
    let organizations = OrganizationService::new(store.clone() as Arc<dyn eventforge::DocumentStore>);
    EventService::new(
        store,
        Arc::new(StubAnalyzer),
        organizations,
        Settings::default(),
    )
}

/// Build a template service over a shared in-memory store
pub fn template_service(store: Arc<MemoryStore>) -> TemplateService {
    TemplateService::new(store)
}

pub fn name_design(value: &str) -> Design {
    text_design(DesignBody::Name(Some(TextMutable {
        label: Some("Event name".to_string()),
        value: Some(value.to_string()),
    })))
}

pub fn description_design(value: &str) -> Design {
    text_design(DesignBody::Description(Some(TextMutable {
        label: None,
        value: Some(value.to_string()),
    })))
}

pub fn banner_design(value: &str) -> Design {
    text_design(DesignBody::Banner(Some(TextMutable {
        label: None,
        value: Some(value.to_string()),
    })))
}

pub fn date_design(start: DateTime<Utc>, end: DateTime<Utc>) -> Design {
    text_design(DesignBody::Date(Some(DateMutable {
        label: None,
        value: Some(DateRange(start, end)),
    })))
}

pub fn location_design(place_id: &str, region: &str) -> Design {
    text_design(DesignBody::Location(Some(LocationMutable {
        label: None,
        place_id: Some(place_id.to_string()),
        place_address_region: Some(region.to_string()),
    })))
}

pub fn organizer_design(organization_id: &str, name: &str) -> Design {
    text_design(DesignBody::Organizer(Some(OrganizerMutable {
        label: None,
        organization_id: Some(organization_id.to_string()),
        value: Some(name.to_string()),
    })))
}

fn text_design(body: DesignBody) -> Design {
    Design {
        id: None,
        uid: None,
        event_id: None,
        template_id: None,
        body,
    }
}

/// Afternoon start on a fixed day
pub fn afternoon_range() -> (DateTime<Utc>, DateTime<Utc>) {
    (
        Utc.with_ymd_and_hms(2026, 9, 1, 14, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap(),
    )
}

/// Template with name, date and description designs
pub fn filled_template() -> Template {
    let (start, end) = afternoon_range();
    Template {
        id: None,
        uid: None,
        designs: vec![
            name_design("Harvest Fair"),
            date_design(start, end),
            description_design("All welcome"),
        ],
        design_ids: None,
    }
}
