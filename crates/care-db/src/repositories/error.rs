//! Error handling utilities for repositories

use care_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for foreign-key violation and return appropriate error or fallback
pub fn map_foreign_key_violation<F>(e: SqlxError, on_foreign_key: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_foreign_key();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map unique and foreign-key violations to domain errors, anything else to
/// a database error
pub fn map_constraint_violation<U, F>(e: SqlxError, on_unique: U, on_foreign_key: F) -> DomainError
where
    U: FnOnce() -> DomainError,
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_foreign_key_violation() {
            return on_foreign_key();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Foreign-key violation when linking specialties that do not exist
pub fn unknown_specialty() -> DomainError {
    DomainError::ValidationError("One or more specialties do not exist".to_string())
}
