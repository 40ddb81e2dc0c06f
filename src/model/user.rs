//! Operator accounts.

use serde::{Deserialize, Serialize};

use crate::filter::Scalar;
use crate::permissions::Role;
use crate::utils::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Pending,
    Suspended,
}

impl UserStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }
}

/// An operator account and its assigned role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl SystemUser {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "email" => Some(Scalar::Text(self.email.clone())),
            "full_name" => Some(Scalar::Text(self.full_name.clone())),
            "role" => Some(Scalar::Text(self.role.as_str().to_string())),
            "status" => Some(Scalar::Text(self.status.as_str().to_string())),
            "created_at" => parse_date(&self.created_at).map(Scalar::Date),
            _ => None,
        }
    }
}
