//! Children attached to a family file.

use serde::{Deserialize, Serialize};

use crate::filter::Scalar;
use crate::utils::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

/// A child record, always owned by exactly one family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Child {
    pub id: String,
    pub family_id: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<chrono::NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    /// Monthly tuition in shekels; zero when the child is not enrolled.
    #[serde(default)]
    pub tuition_fee: f64,
    #[serde(default)]
    pub is_married: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub married_last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Child {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "family_id" => Some(Scalar::Text(self.family_id.clone())),
            "first_name" => Some(Scalar::Text(self.first_name.clone())),
            "last_name" => self.last_name.clone().map(Scalar::Text),
            "id_number" => self.id_number.clone().map(Scalar::Text),
            "birth_date" => self.birth_date.map(Scalar::Date),
            "gender" => self.gender.map(|g| Scalar::Text(g.as_str().to_string())),
            "school" => self.school.clone().map(Scalar::Text),
            "tuition_fee" => Some(Scalar::Number(self.tuition_fee)),
            "is_married" => Some(Scalar::Bool(self.is_married)),
            "created_at" => parse_date(&self.created_at).map(Scalar::Date),
            _ => None,
        }
    }
}
