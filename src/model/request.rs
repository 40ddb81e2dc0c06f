//! Support requests submitted by or on behalf of families.

use serde::{Deserialize, Serialize};

use super::family::FamilyRef;
use crate::filter::Scalar;
use crate::utils::parse_date;

/// Workflow status of a support request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    InReview,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl RequestStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InReview => "in_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "in_review" => Some(Self::InReview),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A request for assistance, tracked from intake to decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportRequest {
    pub id: String,
    pub family_id: String,
    pub request_date: chrono::NaiveDate,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_amount: Option<f64>,
    #[serde(default)]
    pub needs_rights_assistance: bool,
    #[serde(default)]
    pub needs_financial_coaching: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_email: Option<String>,
    #[serde(default)]
    pub is_self_request: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<chrono::NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Hydrated from `family_id` at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyRef>,
    pub created_at: String,
    pub updated_at: String,
}

impl SupportRequest {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "status" => Some(Scalar::Text(self.status.as_str().to_string())),
            "request_date" => Some(Scalar::Date(self.request_date)),
            "purpose" => self.purpose.clone().map(Scalar::Text),
            "requested_amount" => self.requested_amount.map(Scalar::Number),
            "approved_amount" => self.approved_amount.map(Scalar::Number),
            "approval_date" => self.approval_date.map(Scalar::Date),
            "submitted_by" => self.submitted_by.clone().map(Scalar::Text),
            "is_self_request" => Some(Scalar::Bool(self.is_self_request)),
            "needs_rights_assistance" => Some(Scalar::Bool(self.needs_rights_assistance)),
            "needs_financial_coaching" => Some(Scalar::Bool(self.needs_financial_coaching)),
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
