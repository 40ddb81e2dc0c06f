//! Supports: concrete grants of money or goods to a family.

use serde::{Deserialize, Serialize};

use super::family::FamilyRef;
use crate::filter::Scalar;
use crate::utils::parse_date;

/// Minimal name reference hydrated onto records that point at a
/// support type or a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportStatus {
    Pending,
    Completed,
    Cancelled,
}

impl SupportStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Transfer,
    Check,
    Cash,
    Voucher,
    Other,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Check => "check",
            Self::Cash => "cash",
            Self::Voucher => "voucher",
            Self::Other => "other",
        }
    }
}

/// A single support given to a family, optionally tied to a request,
/// a project, a donor and a support type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Support {
    pub id: String,
    pub family_id: String,
    pub amount: f64,
    pub support_date: chrono::NaiveDate,
    pub status: SupportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Hydrated from `family_id` at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyRef>,
    /// Hydrated from `support_type_id` at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_type: Option<NameRef>,
    /// Hydrated from `project_id` at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<NameRef>,
    pub created_at: String,
    pub updated_at: String,
}

impl Support {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "status" => Some(Scalar::Text(self.status.as_str().to_string())),
            "amount" => Some(Scalar::Number(self.amount)),
            "support_date" => Some(Scalar::Date(self.support_date)),
            "payment_method" => self
                .payment_method
                .map(|m| Scalar::Text(m.as_str().to_string())),
            "description" => self.description.clone().map(Scalar::Text),
            "support_type" => self
                .support_type
                .as_ref()
                .map(|t| Scalar::Text(t.name.clone())),
            "project" => self.project.as_ref().map(|p| Scalar::Text(p.name.clone())),
            "family.husband_last_name" => self
                .family
                .as_ref()
                .map(|f| Scalar::Text(f.husband_last_name.clone())),
            "family.husband_first_name" => self
                .family
                .as_ref()
                .and_then(|f| f.husband_first_name.clone().map(Scalar::Text)),
            "family.husband_email" => self
                .family
                .as_ref()
                .and_then(|f| f.husband_email.clone().map(Scalar::Text)),
            "family.wife_email" => self
                .family
                .as_ref()
                .and_then(|f| f.wife_email.clone().map(Scalar::Text)),
            "created_at" => parse_date(&self.created_at).map(Scalar::Date),
            _ => None,
        }
    }
}
