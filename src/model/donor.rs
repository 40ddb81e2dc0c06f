//! Donors who fund supports and projects.

use serde::{Deserialize, Serialize};

use crate::filter::Scalar;
use crate::utils::parse_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Donor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Donor {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "name" => Some(Scalar::Text(self.name.clone())),
            "phone" => self.phone.clone().map(Scalar::Text),
            "email" => self.email.clone().map(Scalar::Text),
            "address" => self.address.clone().map(Scalar::Text),
            "created_at" => parse_date(&self.created_at).map(Scalar::Date),
            _ => None,
        }
    }
}
