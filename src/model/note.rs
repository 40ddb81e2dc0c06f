//! Free-form notes on a family file.

use serde::{Deserialize, Serialize};

use crate::filter::Scalar;
use crate::utils::parse_date;

/// A note on a family file. Notes are append-only and carry no
/// `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Note {
    pub id: String,
    pub family_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: String,
}

impl Note {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "family_id" => Some(Scalar::Text(self.family_id.clone())),
            "content" => Some(Scalar::Text(self.content.clone())),
            "created_by" => self.created_by.clone().map(Scalar::Text),
            "created_at" => parse_date(&self.created_at).map(Scalar::Date),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_content() {
        let note = Note {
            id: "note-1".to_string(),
            family_id: "fam-1".to_string(),
            content: "Visited the family".to_string(),
            created_by: None,
            created_at: "2024-06-01T10:00:00Z".to_string(),
        };
        assert_eq!(
            note.field_value("content"),
            Some(Scalar::Text("Visited the family".to_string()))
        );
        assert_eq!(note.field_value("created_by"), None);
    }
}
