//! User entity - the identity record behind every patient, doctor, and admin

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::query::{FilterValue, Matchable};

/// Role granted to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Doctor,
    Patient,
}

impl UserRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
            Self::Doctor => "DOCTOR",
            Self::Patient => "PATIENT",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "ADMIN" => Ok(Self::Admin),
            "DOCTOR" => Ok(Self::Doctor),
            "PATIENT" => Ok(Self::Patient),
            other => Err(DomainError::InvalidEnumValue {
                field: "role",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
    Deleted,
}

impl UserStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Blocked => "BLOCKED",
            Self::Deleted => "DELETED",
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "BLOCKED" => Ok(Self::Blocked),
            "DELETED" => Ok(Self::Deleted),
            other => Err(DomainError::InvalidEnumValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity. The password hash is never carried on the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub needs_password_change: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with the given role
    pub fn new(email: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            role,
            status: UserStatus::Active,
            needs_password_change: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

impl Matchable for User {
    fn column_value(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => Some(FilterValue::Uuid(self.id)),
            "email" => Some(FilterValue::Text(self.email.clone())),
            "role" => Some(FilterValue::Text(self.role.as_str().to_string())),
            "status" => Some(FilterValue::Text(self.status.as_str().to_string())),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}
