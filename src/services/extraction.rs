//! Field extraction
//!
//! Pure mapping from one design's mutable content to a sparse patch on the
//! event record. Both the creation pipeline and the form patch pipeline run
//! every field-bearing design through this function; the service layer
//! resolves the organizer logo lookup and schedules keyword recomputes based
//! on the returned signals.

use crate::models::design::{Design, DesignBody};
use crate::models::event::{EventPatch, StartHour};

/// Result of extracting one design
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Sparse patch for the event record
    pub patch: EventPatch,
    /// Whether the design feeds the keyword source text (name, description)
    pub refresh_keywords: bool,
    /// Organization to resolve display data for, when the design is an
    /// organizer field
    pub organization_id: Option<String>,
}

/// Extract the normalized event fields a design contributes
///
/// A design without mutable content contributes nothing. Unset values inside
/// the mutable payload are simply omitted from the patch, so merging never
/// clears fields.
pub fn extract(design: &Design) -> Extraction {
    let mut extraction = Extraction::default();

    match &design.body {
        DesignBody::Name(Some(mutable)) => {
            extraction.patch.name = mutable.value.clone();
            extraction.refresh_keywords = true;
        }
        DesignBody::Description(Some(mutable)) => {
            extraction.patch.description = mutable.value.clone();
            extraction.refresh_keywords = true;
        }
        DesignBody::Banner(Some(mutable)) => {
            extraction.patch.banner = mutable.value.clone();
        }
        DesignBody::Location(Some(mutable)) => {
            extraction.patch.location_id = mutable.place_id.clone();
            extraction.patch.location_address_region = mutable.place_address_region.clone();
        }
        DesignBody::Date(Some(mutable)) => {
            if let Some(range) = &mutable.value {
                extraction.patch.start_date = Some(range.start());
                extraction.patch.end_date = Some(range.end());
                // Hours in [0,6) have no bucket and leave startHour unset
                extraction.patch.start_hour = StartHour::from_date(&range.start());
            }
        }
        DesignBody::Organizer(Some(mutable)) => {
            if let Some(organization_id) = &mutable.organization_id {
                extraction.patch.organization_id = Some(organization_id.clone());
                extraction.patch.organizer_name = mutable.value.clone();
                extraction.organization_id = Some(organization_id.clone());
            }
        }
        // No mutable content: nothing to contribute
        DesignBody::Name(None)
        | DesignBody::Description(None)
        | DesignBody::Banner(None)
        | DesignBody::Location(None)
        | DesignBody::Date(None)
        | DesignBody::Organizer(None) => {}
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::design::{
        DateMutable, DateRange, LocationMutable, OrganizerMutable, TextMutable,
    };
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn design(body: DesignBody) -> Design {
        Design {
            id: Some("d1".to_string()),
            uid: None,
            event_id: Some("e1".to_string()),
            template_id: None,
            body,
        }
    }

    fn date_design(start_hour: u32) -> Design {
        let start = Utc.with_ymd_and_hms(2026, 9, 1, start_hour, 30, 0).unwrap();
        let end = start + chrono::Duration::hours(2);
        design(DesignBody::Date(Some(DateMutable {
            label: None,
            value: Some(DateRange(start, end)),
        })))
    }

    #[test]
    fn test_name_extraction_flags_keyword_refresh() {
        let extraction = extract(&design(DesignBody::Name(Some(TextMutable {
            label: None,
            value: Some("Harvest Fair".to_string()),
        }))));
        assert_eq!(extraction.patch.name.as_deref(), Some("Harvest Fair"));
        assert!(extraction.refresh_keywords);
        assert!(extraction.organization_id.is_none());
    }

    #[test]
    fn test_date_extraction_sets_range_and_bucket() {
        let extraction = extract(&date_design(14));
        assert!(extraction.patch.start_date.is_some());
        assert!(extraction.patch.end_date.is_some());
        assert_eq!(extraction.patch.start_hour, Some(StartHour::Afternoon));
        assert!(!extraction.refresh_keywords);
    }

    #[test]
    fn test_hour_bucket_boundaries() {
        assert_eq!(StartHour::from_hour(5), None);
        assert_eq!(StartHour::from_hour(6), Some(StartHour::Morning));
        assert_eq!(StartHour::from_hour(11), Some(StartHour::Morning));
        assert_eq!(StartHour::from_hour(12), Some(StartHour::Afternoon));
        assert_eq!(StartHour::from_hour(17), Some(StartHour::Afternoon));
        assert_eq!(StartHour::from_hour(18), Some(StartHour::Evening));
        assert_eq!(StartHour::from_hour(23), Some(StartHour::Evening));
        assert_eq!(StartHour::from_hour(0), None);
    }

    #[test]
    fn test_early_morning_start_leaves_bucket_unset() {
        let extraction = extract(&date_design(3));
        assert!(extraction.patch.start_date.is_some());
        assert_eq!(extraction.patch.start_hour, None);
    }

    #[test]
    fn test_location_extraction() {
        let extraction = extract(&design(DesignBody::Location(Some(LocationMutable {
            label: None,
            place_id: Some("place-9".to_string()),
            place_address_region: Some("Hsinchu".to_string()),
        }))));
        assert_eq!(extraction.patch.location_id.as_deref(), Some("place-9"));
        assert_eq!(
            extraction.patch.location_address_region.as_deref(),
            Some("Hsinchu")
        );
    }

    #[test]
    fn test_organizer_without_organization_contributes_nothing() {
        let extraction = extract(&design(DesignBody::Organizer(Some(OrganizerMutable {
            label: None,
            organization_id: None,
            value: Some("Orphan Collective".to_string()),
        }))));
        assert!(extraction.patch.is_empty());
        assert!(extraction.organization_id.is_none());
    }

    #[test]
    fn test_organizer_reports_lookup_request() {
        let extraction = extract(&design(DesignBody::Organizer(Some(OrganizerMutable {
            label: None,
            organization_id: Some("org-1".to_string()),
            value: Some("Night Market Guild".to_string()),
        }))));
        assert_eq!(extraction.organization_id.as_deref(), Some("org-1"));
        assert_eq!(
            extraction.patch.organizer_name.as_deref(),
            Some("Night Market Guild")
        );
    }

    #[test]
    fn test_design_without_mutable_contributes_nothing() {
        let extraction = extract(&design(DesignBody::Banner(None)));
        assert_eq!(extraction, Extraction::default());
    }

    proptest! {
        #[test]
        fn prop_hour_bucket_matches_intervals(hour in 0u32..24) {
            let bucket = StartHour::from_hour(hour);
            let expected = if hour < 6 {
                None
            } else if hour < 12 {
                Some(StartHour::Morning)
            } else if hour < 18 {
                Some(StartHour::Afternoon)
            } else {
                Some(StartHour::Evening)
            };
            prop_assert_eq!(bucket, expected);
        }
    }
}
