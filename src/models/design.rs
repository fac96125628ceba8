//! Design document model
//!
//! A design is one field instance of an event: template-scoped before
//! instantiation, event-scoped (and independently stored) afterwards. The
//! field type and its mutable payload form one tagged union, so no code ever
//! inspects an untyped `mutable.value` at runtime. Legacy field-type
//! spellings (`header1`, `dateTimeRange`, `textarea`) are accepted on input
//! as aliases and rewritten to the canonical names on the next write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single design document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Owning event, set when a template is instantiated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Source template, kept for provenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(flatten)]
    pub body: DesignBody,
}

/// Field type plus its typed mutable payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "mutable", rename_all = "camelCase")]
pub enum DesignBody {
    #[serde(alias = "header1")]
    Name(Option<TextMutable>),
    #[serde(alias = "textarea")]
    Description(Option<TextMutable>),
    Banner(Option<TextMutable>),
    Location(Option<LocationMutable>),
    #[serde(alias = "dateTimeRange")]
    Date(Option<DateMutable>),
    Organizer(Option<OrganizerMutable>),
}

/// Mutable payload for free-text field types (name, description, banner)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextMutable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Mutable payload for the location field type
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationMutable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// First-level administrative region of the place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_address_region: Option<String>,
}

/// Mutable payload for the date field type
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateMutable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DateRange>,
}

/// Mutable payload for the organizer field type
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerMutable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Organizer display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A `[start, end]` pair, serialized as a two-element array
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DateRange(pub DateTime<Utc>, pub DateTime<Utc>);

impl DateRange {
    pub fn start(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.1
    }
}

impl Design {
    /// Whether this design is the date-bearing field type
    pub fn is_date_bearing(&self) -> bool {
        matches!(self.body, DesignBody::Date(_))
    }

    /// Whether this design carries mutable content
    pub fn has_mutable(&self) -> bool {
        match &self.body {
            DesignBody::Name(m) | DesignBody::Description(m) | DesignBody::Banner(m) => m.is_some(),
            DesignBody::Location(m) => m.is_some(),
            DesignBody::Date(m) => m.is_some(),
            DesignBody::Organizer(m) => m.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_design_roundtrip() {
        let design = Design {
            id: Some("d1".to_string()),
            uid: Some("u1".to_string()),
            event_id: Some("e1".to_string()),
            template_id: None,
            body: DesignBody::Name(Some(TextMutable {
                label: Some("Event name".to_string()),
                value: Some("Harvest Fair".to_string()),
            })),
        };

        let json = serde_json::to_value(&design).unwrap();
        assert_eq!(json["type"], "name");
        assert_eq!(json["mutable"]["value"], "Harvest Fair");
        assert_eq!(json["eventId"], "e1");

        let parsed: Design = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, design);
    }

    #[test]
    fn test_legacy_aliases_accepted() {
        let parsed: Design = serde_json::from_str(
            r#"{"id":"d1","type":"header1","mutable":{"value":"Harvest Fair"}}"#,
        )
        .unwrap();
        assert!(matches!(parsed.body, DesignBody::Name(Some(_))));

        let parsed: Design =
            serde_json::from_str(r#"{"type":"textarea","mutable":{"value":"All welcome"}}"#)
                .unwrap();
        assert!(matches!(parsed.body, DesignBody::Description(Some(_))));

        let parsed: Design = serde_json::from_str(
            r#"{"type":"dateTimeRange","mutable":{"value":["2026-09-01T10:00:00Z","2026-09-01T18:00:00Z"]}}"#,
        )
        .unwrap();
        assert!(parsed.is_date_bearing());
    }

    #[test]
    fn test_canonical_names_written_back() {
        let parsed: Design =
            serde_json::from_str(r#"{"type":"header1","mutable":{"value":"x"}}"#).unwrap();
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["type"], "name");
    }

    #[test]
    fn test_missing_mutable_tolerated() {
        let parsed: Design = serde_json::from_str(r#"{"id":"d1","type":"banner"}"#).unwrap();
        assert!(!parsed.has_mutable());
    }

    #[test]
    fn test_date_range_serializes_as_pair() {
        let start = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap();
        let json = serde_json::to_value(DateRange(start, end)).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 2);
    }
}
