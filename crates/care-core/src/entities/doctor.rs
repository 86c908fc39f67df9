//! Doctor entity and its partial-update types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::query::{FilterValue, Matchable, Predicate, Relation};

use super::Specialty;

/// Gender recorded on a doctor profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            other => Err(DomainError::InvalidEnumValue {
                field: "gender",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Doctor profile, linked to its user account by email
#[derive(Debug, Clone, PartialEq)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub contact_number: String,
    pub address: Option<String>,
    pub registration_number: String,
    pub experience: i32,
    pub gender: Gender,
    pub appointment_fee: i32,
    pub qualification: String,
    pub current_working_place: String,
    pub designation: String,
    pub average_rating: f64,
    pub is_deleted: bool,
    /// Specialties linked through `doctor_specialties`
    pub specialties: Vec<Specialty>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Scalar fields of a doctor that may be changed by a partial update.
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorPatch {
    pub name: Option<String>,
    pub profile_photo: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub registration_number: Option<String>,
    pub experience: Option<i32>,
    pub gender: Option<Gender>,
    pub appointment_fee: Option<i32>,
    pub qualification: Option<String>,
    pub current_working_place: Option<String>,
    pub designation: Option<String>,
}

impl DoctorPatch {
    /// Apply the patch to an in-memory doctor
    pub fn apply_to(&self, doctor: &mut Doctor) {
        if let Some(name) = &self.name {
            doctor.name.clone_from(name);
        }
        if let Some(photo) = &self.profile_photo {
            doctor.profile_photo = Some(photo.clone());
        }
        if let Some(contact_number) = &self.contact_number {
            doctor.contact_number.clone_from(contact_number);
        }
        if let Some(address) = &self.address {
            doctor.address = Some(address.clone());
        }
        if let Some(registration_number) = &self.registration_number {
            doctor.registration_number.clone_from(registration_number);
        }
        if let Some(experience) = self.experience {
            doctor.experience = experience;
        }
        if let Some(gender) = self.gender {
            doctor.gender = gender;
        }
        if let Some(fee) = self.appointment_fee {
            doctor.appointment_fee = fee;
        }
        if let Some(qualification) = &self.qualification {
            doctor.qualification.clone_from(qualification);
        }
        if let Some(place) = &self.current_working_place {
            doctor.current_working_place.clone_from(place);
        }
        if let Some(designation) = &self.designation {
            doctor.designation.clone_from(designation);
        }
        doctor.updated_at = Utc::now();
    }
}

/// Instruction to link or unlink one specialty during a doctor update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyDirective {
    pub specialty_id: Uuid,
    #[serde(default)]
    pub is_deleted: bool,
}

impl SpecialtyDirective {
    /// Split directives into (ids to unlink, ids to link).
    ///
    /// Removals are applied before insertions so that a directive set which
    /// removes and re-adds the same specialty never trips the unique link key.
    pub fn partition(directives: &[Self]) -> (Vec<Uuid>, Vec<Uuid>) {
        let (removed, added): (Vec<&Self>, Vec<&Self>) =
            directives.iter().partition(|d| d.is_deleted);
        (
            removed.into_iter().map(|d| d.specialty_id).collect(),
            added.into_iter().map(|d| d.specialty_id).collect(),
        )
    }
}

impl Matchable for Doctor {
    fn column_value(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => Some(FilterValue::Uuid(self.id)),
            "name" => Some(FilterValue::Text(self.name.clone())),
            "email" => Some(FilterValue::Text(self.email.clone())),
            "contact_number" => Some(FilterValue::Text(self.contact_number.clone())),
            "gender" => Some(FilterValue::Text(self.gender.as_str().to_string())),
            "appointment_fee" => Some(FilterValue::Int(i64::from(self.appointment_fee))),
            "experience" => Some(FilterValue::Int(i64::from(self.experience))),
            "is_deleted" => Some(FilterValue::Bool(self.is_deleted)),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            _ => None,
        }
    }

    fn matches_related(&self, relation: Relation, predicate: &Predicate) -> bool {
        match relation {
            Relation::DoctorSpecialties => self.specialties.iter().any(|s| predicate.matches(s)),
            Relation::DoctorSchedules => false,
        }
    }
}
