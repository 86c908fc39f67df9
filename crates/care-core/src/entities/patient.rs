//! Patient and admin profiles

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::query::{FilterValue, Matchable};

use super::{Doctor, UserRole};

/// Patient profile, linked to its user account by email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin profile, linked to its user account by email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub contact_number: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The role-specific row created together with a user account
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Patient(Patient),
    Doctor(Doctor),
    Admin(Admin),
}

impl Profile {
    /// Role the owning user account receives
    pub fn role(&self) -> UserRole {
        match self {
            Self::Patient(_) => UserRole::Patient,
            Self::Doctor(_) => UserRole::Doctor,
            Self::Admin(_) => UserRole::Admin,
        }
    }

    /// Email shared between the profile and its user account
    pub fn email(&self) -> &str {
        match self {
            Self::Patient(p) => &p.email,
            Self::Doctor(d) => &d.email,
            Self::Admin(a) => &a.email,
        }
    }

    pub fn profile_photo(&self) -> Option<&str> {
        match self {
            Self::Patient(p) => p.profile_photo.as_deref(),
            Self::Doctor(d) => d.profile_photo.as_deref(),
            Self::Admin(a) => a.profile_photo.as_deref(),
        }
    }
}

impl Matchable for Patient {
    fn column_value(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => Some(FilterValue::Uuid(self.id)),
            "name" => Some(FilterValue::Text(self.name.clone())),
            "email" => Some(FilterValue::Text(self.email.clone())),
            "contact_number" => self.contact_number.clone().map(FilterValue::Text),
            "is_deleted" => Some(FilterValue::Bool(self.is_deleted)),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}
