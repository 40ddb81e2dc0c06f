//! Typed records for every entity the dashboard manages.
//!
//! Each entity gets its own struct with serde round-tripping; [`Record`]
//! is the uniform handle the data source, cache and dispatcher pass
//! around. Related entities appear as explicit optional nested
//! references (for example [`Family::city`]) filled by the data source's
//! hydration step, never as bare foreign keys the caller must resolve.

pub mod child;
pub mod donor;
pub mod family;
pub mod financial;
pub mod note;
pub mod project;
pub mod reference;
pub mod request;
pub mod support;
pub mod user;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use child::{Child, Gender};
pub use donor::Donor;
pub use family::{CityRef, Family, FamilyRef, FamilyStatus, MaritalStatus};
pub use financial::{FinancialStatus, HusbandOccupation, KollelType, WifeOccupation};
pub use note::Note;
pub use project::{Project, ProjectStatus};
pub use reference::{City, Community, Street, SupportType};
pub use request::{RequestStatus, SupportRequest};
pub use support::{NameRef, PaymentMethod, Support, SupportStatus};
pub use user::{SystemUser, UserStatus};

use crate::filter::Scalar;

/// The closed set of entities the dashboard manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Families,
    Children,
    FinancialStatus,
    SupportRequests,
    Supports,
    Notes,
    Cities,
    Streets,
    Communities,
    SupportTypes,
    Projects,
    Donors,
    Users,
}

impl Entity {
    /// Every entity, in registry order.
    pub const ALL: [Self; 13] = [
        Self::Families,
        Self::Children,
        Self::FinancialStatus,
        Self::SupportRequests,
        Self::Supports,
        Self::Notes,
        Self::Cities,
        Self::Streets,
        Self::Communities,
        Self::SupportTypes,
        Self::Projects,
        Self::Donors,
        Self::Users,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Families => "families",
            Self::Children => "children",
            Self::FinancialStatus => "financial_status",
            Self::SupportRequests => "support_requests",
            Self::Supports => "supports",
            Self::Notes => "notes",
            Self::Cities => "cities",
            Self::Streets => "streets",
            Self::Communities => "communities",
            Self::SupportTypes => "support_types",
            Self::Projects => "projects",
            Self::Donors => "donors",
            Self::Users => "users",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == value)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of any entity.
///
/// Variants box their payload so the handle stays pointer-sized
/// regardless of how wide the underlying struct is.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Family(Box<Family>),
    Child(Box<Child>),
    FinancialStatus(Box<FinancialStatus>),
    SupportRequest(Box<SupportRequest>),
    Support(Box<Support>),
    Note(Box<Note>),
    City(Box<City>),
    Street(Box<Street>),
    Community(Box<Community>),
    SupportType(Box<SupportType>),
    Project(Box<Project>),
    Donor(Box<Donor>),
    User(Box<SystemUser>),
}

// Delegation arms bind payloads of different types and cannot be merged.
#[allow(clippy::match_same_arms)]
impl Record {
    #[must_use]
    pub const fn entity(&self) -> Entity {
        match self {
            Self::Family(_) => Entity::Families,
            Self::Child(_) => Entity::Children,
            Self::FinancialStatus(_) => Entity::FinancialStatus,
            Self::SupportRequest(_) => Entity::SupportRequests,
            Self::Support(_) => Entity::Supports,
            Self::Note(_) => Entity::Notes,
            Self::City(_) => Entity::Cities,
            Self::Street(_) => Entity::Streets,
            Self::Community(_) => Entity::Communities,
            Self::SupportType(_) => Entity::SupportTypes,
            Self::Project(_) => Entity::Projects,
            Self::Donor(_) => Entity::Donors,
            Self::User(_) => Entity::Users,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Family(r) => &r.id,
            Self::Child(r) => &r.id,
            Self::FinancialStatus(r) => &r.id,
            Self::SupportRequest(r) => &r.id,
            Self::Support(r) => &r.id,
            Self::Note(r) => &r.id,
            Self::City(r) => &r.id,
            Self::Street(r) => &r.id,
            Self::Community(r) => &r.id,
            Self::SupportType(r) => &r.id,
            Self::Project(r) => &r.id,
            Self::Donor(r) => &r.id,
            Self::User(r) => &r.id,
        }
    }

    /// Resolve a declared filterable field, including dotted paths into
    /// hydrated references such as `family.husband_email`.
    ///
    /// Returns `None` when the field is undeclared for this entity or
    /// the value is absent; filters treat both the same way.
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match self {
            Self::Family(r) => r.field_value(field),
            Self::Child(r) => r.field_value(field),
            Self::FinancialStatus(r) => r.field_value(field),
            Self::SupportRequest(r) => r.field_value(field),
            Self::Support(r) => r.field_value(field),
            Self::Note(r) => r.field_value(field),
            Self::City(r) => r.field_value(field),
            Self::Street(r) => r.field_value(field),
            Self::Community(r) => r.field_value(field),
            Self::SupportType(r) => r.field_value(field),
            Self::Project(r) => r.field_value(field),
            Self::Donor(r) => r.field_value(field),
            Self::User(r) => r.field_value(field),
        }
    }

    /// Serialize the inner record to a JSON object.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Family(r) => serde_json::to_value(r),
            Self::Child(r) => serde_json::to_value(r),
            Self::FinancialStatus(r) => serde_json::to_value(r),
            Self::SupportRequest(r) => serde_json::to_value(r),
            Self::Support(r) => serde_json::to_value(r),
            Self::Note(r) => serde_json::to_value(r),
            Self::City(r) => serde_json::to_value(r),
            Self::Street(r) => serde_json::to_value(r),
            Self::Community(r) => serde_json::to_value(r),
            Self::SupportType(r) => serde_json::to_value(r),
            Self::Project(r) => serde_json::to_value(r),
            Self::Donor(r) => serde_json::to_value(r),
            Self::User(r) => serde_json::to_value(r),
        }
    }

    /// Deserialize a JSON object back into a typed record of the given
    /// entity. Unknown fields are rejected.
    pub fn from_value(
        entity: Entity,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        match entity {
            Entity::Families => serde_json::from_value(value).map(Self::Family),
            Entity::Children => serde_json::from_value(value).map(Self::Child),
            Entity::FinancialStatus => serde_json::from_value(value).map(Self::FinancialStatus),
            Entity::SupportRequests => serde_json::from_value(value).map(Self::SupportRequest),
            Entity::Supports => serde_json::from_value(value).map(Self::Support),
            Entity::Notes => serde_json::from_value(value).map(Self::Note),
            Entity::Cities => serde_json::from_value(value).map(Self::City),
            Entity::Streets => serde_json::from_value(value).map(Self::Street),
            Entity::Communities => serde_json::from_value(value).map(Self::Community),
            Entity::SupportTypes => serde_json::from_value(value).map(Self::SupportType),
            Entity::Projects => serde_json::from_value(value).map(Self::Project),
            Entity::Donors => serde_json::from_value(value).map(Self::Donor),
            Entity::Users => serde_json::from_value(value).map(Self::User),
        }
    }

    /// Assign a fresh identifier and creation stamps to a new record.
    pub fn stamp_new(&mut self, id: String, now: &str) {
        match self {
            Self::Family(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::Child(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::FinancialStatus(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::SupportRequest(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::Support(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::Note(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::City(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::Street(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::Community(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::SupportType(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::Project(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::Donor(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
            Self::User(r) => {
                r.id = id;
                r.created_at = now.to_string();
            }
        }
        self.touch(now);
    }

    /// Refresh `updated_at` on entities that carry it; append-only
    /// entities are left untouched.
    pub fn touch(&mut self, now: &str) {
        match self {
            Self::Family(r) => r.updated_at = now.to_string(),
            Self::Child(r) => r.updated_at = now.to_string(),
            Self::FinancialStatus(r) => r.updated_at = now.to_string(),
            Self::SupportRequest(r) => r.updated_at = now.to_string(),
            Self::Support(r) => r.updated_at = now.to_string(),
            Self::Project(r) => r.updated_at = now.to_string(),
            Self::Donor(r) => r.updated_at = now.to_string(),
            Self::User(r) => r.updated_at = now.to_string(),
            Self::Note(_)
            | Self::City(_)
            | Self::Street(_)
            | Self::Community(_)
            | Self::SupportType(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_parse_round_trip() {
        for entity in Entity::ALL {
            assert_eq!(Entity::parse(entity.as_str()), Some(entity));
        }
        assert_eq!(Entity::parse("family"), None);
    }

    #[test]
    fn test_entity_serde_matches_as_str() {
        for entity in Entity::ALL {
            let json = serde_json::to_string(&entity).unwrap();
            assert_eq!(json, format!("\"{}\"", entity.as_str()));
        }
    }

    fn sample_note() -> Record {
        Record::Note(Box::new(Note {
            id: "note-1".to_string(),
            family_id: "fam-1".to_string(),
            content: "first visit".to_string(),
            created_by: None,
            created_at: "2024-06-01T10:00:00Z".to_string(),
        }))
    }

    #[test]
    fn test_record_entity_and_id() {
        let record = sample_note();
        assert_eq!(record.entity(), Entity::Notes);
        assert_eq!(record.id(), "note-1");
    }

    #[test]
    fn test_record_value_round_trip() {
        let record = sample_note();
        let value = record.to_value().unwrap();
        let back = Record::from_value(Entity::Notes, value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_from_value_rejects_unknown_fields() {
        let value = serde_json::json!({
            "id": "note-2",
            "family_id": "fam-1",
            "content": "x",
            "color": "red",
            "created_at": "2024-06-01T10:00:00Z"
        });
        assert!(Record::from_value(Entity::Notes, value).is_err());
    }

    #[test]
    fn test_stamp_new_sets_id_and_created_at() {
        let mut record = sample_note();
        record.stamp_new("note-9".to_string(), "2024-07-01T00:00:00Z");
        assert_eq!(record.id(), "note-9");
        match &record {
            Record::Note(note) => assert_eq!(note.created_at, "2024-07-01T00:00:00Z"),
            _ => panic!("entity changed"),
        }
    }

    #[test]
    fn test_touch_updates_mutable_entities_only() {
        let mut record = Record::Donor(Box::new(Donor {
            id: "donor-1".to_string(),
            name: "Anonymous".to_string(),
            phone: None,
            email: None,
            address: None,
            notes: None,
            created_at: "2024-01-05T00:00:00Z".to_string(),
            updated_at: "2024-01-05T00:00:00Z".to_string(),
        }));
        record.touch("2024-08-01T00:00:00Z");
        match &record {
            Record::Donor(donor) => {
                assert_eq!(donor.updated_at, "2024-08-01T00:00:00Z");
                assert_eq!(donor.created_at, "2024-01-05T00:00:00Z");
            }
            _ => panic!("entity changed"),
        }
    }

    #[test]
    fn test_field_value_delegates() {
        let record = sample_note();
        assert_eq!(
            record.field_value("content"),
            Some(Scalar::Text("first visit".to_string()))
        );
        assert_eq!(record.field_value("missing"), None);
    }
}
