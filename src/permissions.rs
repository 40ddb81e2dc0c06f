//! Role-based access checks.
//!
//! A static (role, resource, action) matrix; nothing here talks to the
//! data source. Unknown combinations are denied.

use serde::{Deserialize, Serialize};

/// Operator roles, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    User,
    Viewer,
}

/// Resource groups the matrix is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Families,
    Supports,
    Projects,
    Users,
    Settings,
}

/// What the operator is trying to do with the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermAction {
    Read,
    Write,
    Delete,
    Approve,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::User => "user",
            Self::Viewer => "viewer",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "user" => Some(Self::User),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Admin counts as manager.
    #[must_use]
    pub const fn is_manager(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Check the static allow matrix.
    ///
    /// Admin may do everything. Manager may do everything on families,
    /// supports and projects but only read users and settings. User may
    /// read everything and write families, supports and projects, never
    /// delete or approve. Viewer is read-only.
    #[must_use]
    pub const fn can(self, resource: Resource, action: PermAction) -> bool {
        match self {
            Self::Admin => true,
            Self::Manager => match resource {
                Resource::Families | Resource::Supports | Resource::Projects => true,
                Resource::Users | Resource::Settings => matches!(action, PermAction::Read),
            },
            Self::User => match action {
                PermAction::Read => true,
                PermAction::Write => matches!(
                    resource,
                    Resource::Families | Resource::Supports | Resource::Projects
                ),
                PermAction::Delete | PermAction::Approve => false,
            },
            Self::Viewer => matches!(action, PermAction::Read),
        }
    }
}
