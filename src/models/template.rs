//! Event template model

use serde::{Deserialize, Serialize};

use crate::models::design::Design;

/// Reusable template of design field definitions
///
/// A template exists either in draft form (embedded `designs`) or in
/// instantiated form (only `design_ids`, content stored separately). It never
/// holds both after instantiation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub designs: Vec<Design>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_ids: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::design::{DesignBody, TextMutable};

    #[test]
    fn test_draft_template_roundtrip() {
        let template = Template {
            id: None,
            uid: Some("u1".to_string()),
            designs: vec![Design {
                id: None,
                uid: None,
                event_id: None,
                template_id: None,
                body: DesignBody::Name(Some(TextMutable {
                    label: None,
                    value: Some("Spring Market".to_string()),
                })),
            }],
            design_ids: None,
        };

        let json = serde_json::to_value(&template).unwrap();
        assert!(json.get("designIds").is_none());
        assert_eq!(json["designs"][0]["type"], "name");

        let parsed: Template = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, template);
    }
}
