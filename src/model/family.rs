//! Beneficiary family records.

use serde::{Deserialize, Serialize};

use crate::filter::Scalar;
use crate::utils::parse_date;

/// Lifecycle status of a family file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyStatus {
    Active,
    Inactive,
    Pending,
}

impl FamilyStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Marital status values as recorded on the family file.
///
/// The widowed value differs by spouse ("widower" on the husband side,
/// "widow" on the wife side); both deserialize here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Married,
    Divorced,
    Widower,
    Widow,
    Single,
}

impl MaritalStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Married => "married",
            Self::Divorced => "divorced",
            Self::Widower => "widower",
            Self::Widow => "widow",
            Self::Single => "single",
        }
    }
}

/// Minimal city reference hydrated onto records that point at a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CityRef {
    pub id: String,
    pub name: String,
}

/// Minimal family reference hydrated onto supports and support requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_first_name: Option<String>,
    pub husband_last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_email: Option<String>,
}

impl FamilyRef {
    /// Display name in "first last" order, falling back to the last name alone.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.husband_first_name.as_deref().map_or_else(
            || self.husband_last_name.clone(),
            |first| format!("{first} {}", self.husband_last_name),
        )
    }
}

impl From<&Family> for FamilyRef {
    fn from(family: &Family) -> Self {
        Self {
            id: family.id.clone(),
            husband_first_name: family.husband_first_name.clone(),
            husband_last_name: family.husband_last_name.clone(),
            husband_phone: family.husband_phone.clone(),
            husband_email: family.husband_email.clone(),
            wife_email: family.wife_email.clone(),
        }
    }
}

/// A beneficiary family file.
///
/// `city` and `children_count` are hydrated at read time and overwritten
/// on every fetch; stored values are never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Family {
    pub id: String,
    pub status: FamilyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nedarim_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_first_name: Option<String>,
    pub husband_last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_birth_date: Option<chrono::NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_birth_date: Option<chrono::NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synagogue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_phone: Option<String>,
    /// Hydrated from `city_id` at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<CityRef>,
    /// Hydrated count of child records pointing at this family.
    #[serde(default)]
    pub children_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl Family {
    /// Resolve a declared filterable field to its current value.
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "status" => Some(Scalar::Text(self.status.as_str().to_string())),
            "husband_last_name" => Some(Scalar::Text(self.husband_last_name.clone())),
            "husband_first_name" => self.husband_first_name.clone().map(Scalar::Text),
            "husband_id_number" => self.husband_id_number.clone().map(Scalar::Text),
            "husband_phone" => self.husband_phone.clone().map(Scalar::Text),
            "husband_email" => self.husband_email.clone().map(Scalar::Text),
            "wife_first_name" => self.wife_first_name.clone().map(Scalar::Text),
            "wife_phone" => self.wife_phone.clone().map(Scalar::Text),
            "wife_email" => self.wife_email.clone().map(Scalar::Text),
            "synagogue" => self.synagogue.clone().map(Scalar::Text),
            "city" => self.city.as_ref().map(|c| Scalar::Text(c.name.clone())),
            "children_count" => Some(Scalar::Number(f64::from(self.children_count))),
            "created_at" => parse_date(&self.created_at).map(Scalar::Date),
            _ => None,
        }
    }
}
