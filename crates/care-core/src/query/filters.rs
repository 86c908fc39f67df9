//! Per-resource filter fields and the predicate builder

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    Appointment, AppointmentStatus, Doctor, Gender, Patient, PaymentStatus, Schedule, Specialty,
    User, UserRole, UserStatus,
};
use crate::error::DomainError;

use super::{Comparison, FilterValue, Predicate, Relation};

/// One exact-match (or range) filter a resource supports
pub trait FilterField: Sized {
    /// Parse a query parameter. Unknown keys yield `Ok(None)` and are ignored.
    fn parse(key: &str, raw: &str) -> Result<Option<Self>, DomainError>;

    fn column(&self) -> &'static str;

    fn value(&self) -> FilterValue;

    /// Range operator; `None` means equality
    fn comparison(&self) -> Option<Comparison> {
        None
    }

    fn into_predicate(self) -> Predicate {
        match self.comparison() {
            None => Predicate::equals(self.column(), self.value()),
            Some(op) => Predicate::Compare {
                column: self.column(),
                op,
                value: self.value(),
            },
        }
    }
}

/// A listable resource: its filter enum, search columns and sort whitelist
pub trait Filterable {
    type Field: FilterField;

    /// Columns a `searchTerm` is matched against
    const SEARCHABLE_FIELDS: &'static [&'static str];

    /// `(api name, column)` pairs accepted by `sortBy`
    const SORTABLE_FIELDS: &'static [(&'static str, &'static str)];

    fn sort_column(name: &str) -> Option<&'static str> {
        Self::SORTABLE_FIELDS
            .iter()
            .find(|(api, _)| *api == name)
            .map(|(_, column)| *column)
    }
}

/// Requested filters for one list call
#[derive(Debug, Clone)]
pub struct FilterSet<F> {
    pub search_term: Option<String>,
    pub relations: Vec<Predicate>,
    pub fields: Vec<F>,
}

impl<F> Default for FilterSet<F> {
    fn default() -> Self {
        Self {
            search_term: None,
            relations: Vec::new(),
            fields: Vec::new(),
        }
    }
}

impl<F: FilterField> FilterSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from flat query pairs: `searchTerm` plus every key `F` recognizes
    pub fn from_query<'a, I>(pairs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut set = Self::new();
        for (key, raw) in pairs {
            if key == "searchTerm" {
                set = set.with_search(raw);
            } else if let Some(field) = F::parse(key, raw)? {
                set.fields.push(field);
            }
        }
        Ok(set)
    }

    /// Blank terms are ignored
    #[must_use]
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        if !term.is_empty() {
            self.search_term = Some(term.to_string());
        }
        self
    }

    #[must_use]
    pub fn with_relation(mut self, predicate: Predicate) -> Self {
        self.relations.push(predicate);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: F) -> Self {
        self.fields.push(field);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_none() && self.relations.is_empty() && self.fields.is_empty()
    }
}

/// AND of: the search disjunction, relation predicates, one predicate per field
pub fn build_predicate<R: Filterable>(filters: FilterSet<R::Field>) -> Predicate {
    let mut conditions = Vec::new();
    if let Some(term) = filters.search_term {
        conditions.push(Predicate::search(R::SEARCHABLE_FIELDS, &term));
    }
    conditions.extend(filters.relations);
    conditions.extend(filters.fields.into_iter().map(FilterField::into_predicate));
    Predicate::all_of(conditions)
}

/// Doctors linked to at least one specialty whose title contains `term`
pub fn specialty_title(term: &str) -> Predicate {
    Predicate::related(Relation::DoctorSpecialties, Predicate::contains("title", term))
}

/// Schedules not yet assigned to `doctor_id`
pub fn schedules_free_for(doctor_id: Uuid) -> Predicate {
    Predicate::related(
        Relation::DoctorSchedules,
        Predicate::equals("doctor_id", FilterValue::Uuid(doctor_id)),
    )
    .negate()
}

fn parse_uuid(field: &'static str, raw: &str) -> Result<Uuid, DomainError> {
    raw.parse().map_err(|_| DomainError::InvalidEnumValue {
        field,
        value: raw.to_string(),
    })
}

fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DomainError::InvalidEnumValue {
            field,
            value: raw.to_string(),
        })
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum UserFilter {
    Email(String),
    Role(UserRole),
    Status(UserStatus),
}

impl FilterField for UserFilter {
    fn parse(key: &str, raw: &str) -> Result<Option<Self>, DomainError> {
        Ok(match key {
            "email" => Some(Self::Email(raw.to_string())),
            "role" => Some(Self::Role(raw.parse()?)),
            "status" => Some(Self::Status(raw.parse()?)),
            _ => None,
        })
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Role(_) => "role",
            Self::Status(_) => "status",
        }
    }

    fn value(&self) -> FilterValue {
        match self {
            Self::Email(email) => FilterValue::Text(email.clone()),
            Self::Role(role) => FilterValue::Text(role.as_str().to_string()),
            Self::Status(status) => FilterValue::Text(status.as_str().to_string()),
        }
    }
}

impl Filterable for User {
    type Field = UserFilter;
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["email"];
    const SORTABLE_FIELDS: &'static [(&'static str, &'static str)] = &[
        ("createdAt", "created_at"),
        ("email", "email"),
        ("role", "role"),
        ("status", "status"),
    ];
}

// ============================================================================
// Doctors
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DoctorFilter {
    Email(String),
    ContactNumber(String),
    Gender(Gender),
    AppointmentFee(i32),
}

impl FilterField for DoctorFilter {
    fn parse(key: &str, raw: &str) -> Result<Option<Self>, DomainError> {
        Ok(match key {
            "email" => Some(Self::Email(raw.to_string())),
            "contactNumber" => Some(Self::ContactNumber(raw.to_string())),
            "gender" => Some(Self::Gender(raw.parse()?)),
            "appointmentFee" => Some(Self::AppointmentFee(raw.parse().map_err(|_| {
                DomainError::InvalidEnumValue {
                    field: "appointmentFee",
                    value: raw.to_string(),
                }
            })?)),
            _ => None,
        })
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::ContactNumber(_) => "contact_number",
            Self::Gender(_) => "gender",
            Self::AppointmentFee(_) => "appointment_fee",
        }
    }

    fn value(&self) -> FilterValue {
        match self {
            Self::Email(v) | Self::ContactNumber(v) => FilterValue::Text(v.clone()),
            Self::Gender(g) => FilterValue::Text(g.as_str().to_string()),
            Self::AppointmentFee(fee) => FilterValue::Int(i64::from(*fee)),
        }
    }
}

impl Filterable for Doctor {
    type Field = DoctorFilter;
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["name", "email", "contact_number"];
    const SORTABLE_FIELDS: &'static [(&'static str, &'static str)] = &[
        ("createdAt", "created_at"),
        ("name", "name"),
        ("experience", "experience"),
        ("appointmentFee", "appointment_fee"),
        ("averageRating", "average_rating"),
    ];
}

// ============================================================================
// Patients
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PatientFilter {
    Email(String),
    ContactNumber(String),
}

impl FilterField for PatientFilter {
    fn parse(key: &str, raw: &str) -> Result<Option<Self>, DomainError> {
        Ok(match key {
            "email" => Some(Self::Email(raw.to_string())),
            "contactNumber" => Some(Self::ContactNumber(raw.to_string())),
            _ => None,
        })
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::ContactNumber(_) => "contact_number",
        }
    }

    fn value(&self) -> FilterValue {
        match self {
            Self::Email(v) | Self::ContactNumber(v) => FilterValue::Text(v.clone()),
        }
    }
}

impl Filterable for Patient {
    type Field = PatientFilter;
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["name", "email", "contact_number"];
    const SORTABLE_FIELDS: &'static [(&'static str, &'static str)] = &[
        ("createdAt", "created_at"),
        ("name", "name"),
        ("email", "email"),
    ];
}

// ============================================================================
// Specialties
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SpecialtyFilter {
    Title(String),
}

impl FilterField for SpecialtyFilter {
    fn parse(key: &str, raw: &str) -> Result<Option<Self>, DomainError> {
        Ok(match key {
            "title" => Some(Self::Title(raw.to_string())),
            _ => None,
        })
    }

    fn column(&self) -> &'static str {
        "title"
    }

    fn value(&self) -> FilterValue {
        match self {
            Self::Title(title) => FilterValue::Text(title.clone()),
        }
    }
}

impl Filterable for Specialty {
    type Field = SpecialtyFilter;
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["title"];
    const SORTABLE_FIELDS: &'static [(&'static str, &'static str)] =
        &[("createdAt", "created_at"), ("title", "title")];
}

// ============================================================================
// Schedules
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleFilter {
    /// Slots starting at or after the instant
    StartsFrom(DateTime<Utc>),
    /// Slots ending at or before the instant
    EndsBy(DateTime<Utc>),
}

impl FilterField for ScheduleFilter {
    fn parse(key: &str, raw: &str) -> Result<Option<Self>, DomainError> {
        Ok(match key {
            "startDateTime" => Some(Self::StartsFrom(parse_timestamp("startDateTime", raw)?)),
            "endDateTime" => Some(Self::EndsBy(parse_timestamp("endDateTime", raw)?)),
            _ => None,
        })
    }

    fn column(&self) -> &'static str {
        match self {
            Self::StartsFrom(_) => "start_date_time",
            Self::EndsBy(_) => "end_date_time",
        }
    }

    fn value(&self) -> FilterValue {
        match self {
            Self::StartsFrom(at) | Self::EndsBy(at) => FilterValue::Timestamp(*at),
        }
    }

    fn comparison(&self) -> Option<Comparison> {
        Some(match self {
            Self::StartsFrom(_) => Comparison::Gte,
            Self::EndsBy(_) => Comparison::Lte,
        })
    }
}

impl Filterable for Schedule {
    type Field = ScheduleFilter;
    const SEARCHABLE_FIELDS: &'static [&'static str] = &[];
    const SORTABLE_FIELDS: &'static [(&'static str, &'static str)] = &[
        ("createdAt", "created_at"),
        ("startDateTime", "start_date_time"),
        ("endDateTime", "end_date_time"),
    ];
}

// ============================================================================
// Appointments
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentFilter {
    Status(AppointmentStatus),
    PaymentStatus(PaymentStatus),
    DoctorId(Uuid),
    PatientId(Uuid),
}

impl FilterField for AppointmentFilter {
    fn parse(key: &str, raw: &str) -> Result<Option<Self>, DomainError> {
        Ok(match key {
            "status" => Some(Self::Status(raw.parse()?)),
            "paymentStatus" => Some(Self::PaymentStatus(raw.parse()?)),
            "doctorId" => Some(Self::DoctorId(parse_uuid("doctorId", raw)?)),
            "patientId" => Some(Self::PatientId(parse_uuid("patientId", raw)?)),
            _ => None,
        })
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::PaymentStatus(_) => "payment_status",
            Self::DoctorId(_) => "doctor_id",
            Self::PatientId(_) => "patient_id",
        }
    }

    fn value(&self) -> FilterValue {
        match self {
            Self::Status(s) => FilterValue::Text(s.as_str().to_string()),
            Self::PaymentStatus(s) => FilterValue::Text(s.as_str().to_string()),
            Self::DoctorId(id) | Self::PatientId(id) => FilterValue::Uuid(*id),
        }
    }
}

impl Filterable for Appointment {
    type Field = AppointmentFilter;
    const SEARCHABLE_FIELDS: &'static [&'static str] = &[];
    const SORTABLE_FIELDS: &'static [(&'static str, &'static str)] = &[
        ("createdAt", "created_at"),
        ("status", "status"),
        ("paymentStatus", "payment_status"),
    ];
}
