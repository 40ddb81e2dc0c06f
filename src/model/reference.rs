//! Reference data: cities, streets, communities and support types.
//!
//! These records are append-mostly lookup tables. None of them carries
//! an `updated_at` stamp.

use serde::{Deserialize, Serialize};

use crate::filter::Scalar;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct City {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub created_at: String,
}

impl City {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "name" => Some(Scalar::Text(self.name.clone())),
            "name_en" => self.name_en.clone().map(Scalar::Text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Street {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,
    pub created_at: String,
}

impl Street {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "name" => Some(Scalar::Text(self.name.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Community {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,
    pub created_at: String,
}

impl Community {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "name" => Some(Scalar::Text(self.name.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportType {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
}

impl SupportType {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "name" => Some(Scalar::Text(self.name.clone())),
            "description" => self.description.clone().map(Scalar::Text),
            _ => None,
        }
    }
}
