//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(Uuid),

    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("Specialty not found: {0}")]
    SpecialtyNotFound(Uuid),

    #[error("Schedule not found: {0}")]
    ScheduleNotFound(Uuid),

    #[error("Doctor schedule not found")]
    DoctorScheduleNotFound,

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(Uuid),

    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid sort order: {0} (expected 'asc' or 'desc')")]
    InvalidSortOrder(String),

    #[error("Invalid {field}: {value}")]
    InvalidEnumValue { field: &'static str, value: String },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Specialty already exists")]
    SpecialtyAlreadyExists,

    #[error("Doctor already has this specialty")]
    DoctorSpecialtyExists,

    #[error("Schedule already assigned to doctor")]
    ScheduleAlreadyAssigned,

    #[error("Schedule slot is already booked")]
    ScheduleAlreadyBooked,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::DoctorNotFound(_) => "UNKNOWN_DOCTOR",
            Self::PatientNotFound(_) => "UNKNOWN_PATIENT",
            Self::SpecialtyNotFound(_) => "UNKNOWN_SPECIALTY",
            Self::ScheduleNotFound(_) => "UNKNOWN_SCHEDULE",
            Self::DoctorScheduleNotFound => "UNKNOWN_DOCTOR_SCHEDULE",
            Self::AppointmentNotFound(_) => "UNKNOWN_APPOINTMENT",
            Self::PaymentNotFound(_) => "UNKNOWN_PAYMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidSortField(_) => "INVALID_SORT_FIELD",
            Self::InvalidSortOrder(_) => "INVALID_SORT_ORDER",
            Self::InvalidEnumValue { .. } => "INVALID_VALUE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::SpecialtyAlreadyExists => "SPECIALTY_ALREADY_EXISTS",
            Self::DoctorSpecialtyExists => "DOCTOR_SPECIALTY_EXISTS",
            Self::ScheduleAlreadyAssigned => "SCHEDULE_ALREADY_ASSIGNED",
            Self::ScheduleAlreadyBooked => "SCHEDULE_ALREADY_BOOKED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::DoctorNotFound(_)
                | Self::PatientNotFound(_)
                | Self::SpecialtyNotFound(_)
                | Self::ScheduleNotFound(_)
                | Self::DoctorScheduleNotFound
                | Self::AppointmentNotFound(_)
                | Self::PaymentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingField(_)
                | Self::InvalidSortField(_)
                | Self::InvalidSortOrder(_)
                | Self::InvalidEnumValue { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::SpecialtyAlreadyExists
                | Self::DoctorSpecialtyExists
                | Self::ScheduleAlreadyAssigned
                | Self::ScheduleAlreadyBooked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::DoctorNotFound(Uuid::nil());
        assert_eq!(err.code(), "UNKNOWN_DOCTOR");

        let err = DomainError::MissingField("symptoms");
        assert_eq!(err.code(), "MISSING_FIELD");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound(Uuid::nil()).is_not_found());
        assert!(DomainError::PaymentNotFound(Uuid::nil()).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_validation() {
        assert!(DomainError::InvalidSortField("password".to_string()).is_validation());
        assert!(DomainError::MissingField("password").is_validation());
        assert!(!DomainError::DatabaseError("boom".to_string()).is_validation());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::DoctorSpecialtyExists.is_conflict());
        assert!(!DomainError::ScheduleNotFound(Uuid::nil()).is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::MissingField("symptoms");
        assert_eq!(err.to_string(), "symptoms is required");

        let err = DomainError::InvalidSortOrder("up".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid sort order: up (expected 'asc' or 'desc')"
        );
    }
}
