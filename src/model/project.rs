//! Funded projects (holiday campaigns, tuition drives and the like).

use serde::{Deserialize, Serialize};

use crate::filter::Scalar;
use crate::utils::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "planned" => Some(Self::Planned),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A budgeted project supports can be charged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub budget: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<chrono::NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<chrono::NaiveDate>,
    /// Hydrated sum of completed supports charged to this project.
    #[serde(default)]
    pub spent: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl Project {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "name" => Some(Scalar::Text(self.name.clone())),
            "status" => Some(Scalar::Text(self.status.as_str().to_string())),
            "budget" => Some(Scalar::Number(self.budget)),
            "spent" => Some(Scalar::Number(self.spent)),
            "start_date" => self.start_date.map(Scalar::Date),
            "end_date" => self.end_date.map(Scalar::Date),
            "created_at" => parse_date(&self.created_at).map(Scalar::Date),
            _ => None,
        }
    }
}
