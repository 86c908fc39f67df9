//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method that touches more than one row
//! is atomic: implementations run it inside a single transaction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    Appointment, CheckoutSettlement, Doctor, DoctorPatch, DoctorSchedule, Patient, Payment,
    Profile, Schedule, Specialty, SpecialtyDirective, User, UserStatus,
};
use crate::error::DomainError;
use crate::query::{PageRequest, Predicate};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Insert the user row and its profile row together.
    /// Doctor profiles also get their initial specialty links.
    async fn create_with_profile(
        &self,
        user: &User,
        password_hash: &str,
        profile: &Profile,
    ) -> RepoResult<()>;

    async fn find_many(&self, predicate: &Predicate, page: &PageRequest) -> RepoResult<Vec<User>>;

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64>;

    /// Change account status, returning the updated user
    async fn update_status(&self, id: Uuid, status: UserStatus) -> RepoResult<User>;
}

// ============================================================================
// Doctor Repository
// ============================================================================

#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Find doctor by ID, with its specialties loaded
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Doctor>>;

    async fn find_many(&self, predicate: &Predicate, page: &PageRequest)
        -> RepoResult<Vec<Doctor>>;

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64>;

    /// Unlink specialties flagged deleted, link the rest, then apply the
    /// scalar patch. Returns the doctor as stored afterwards.
    async fn update_with_specialties(
        &self,
        id: Uuid,
        patch: &DoctorPatch,
        directives: &[SpecialtyDirective],
    ) -> RepoResult<Doctor>;

    /// Flag the doctor deleted and mark its user account DELETED
    async fn soft_delete(&self, id: Uuid) -> RepoResult<Doctor>;
}

// ============================================================================
// Patient Repository
// ============================================================================

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Patient>>;

    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Patient>>;

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64>;

    /// Flag the patient deleted and mark its user account DELETED
    async fn soft_delete(&self, id: Uuid) -> RepoResult<Patient>;
}

// ============================================================================
// Specialty Repository
// ============================================================================

#[async_trait]
pub trait SpecialtyRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Specialty>>;

    async fn create(&self, specialty: &Specialty) -> RepoResult<()>;

    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Specialty>>;

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64>;

    /// Remove the specialty and every doctor link to it
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Schedule Repository
// ============================================================================

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Schedule>>;

    /// Insert slots, skipping any whose (start, end) already exists.
    /// Returns only the rows actually inserted.
    async fn create_many(&self, schedules: &[Schedule]) -> RepoResult<Vec<Schedule>>;

    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Schedule>>;

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64>;

    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Doctor Schedule Repository
// ============================================================================

#[async_trait]
pub trait DoctorScheduleRepository: Send + Sync {
    async fn find(&self, doctor_id: Uuid, schedule_id: Uuid)
        -> RepoResult<Option<DoctorSchedule>>;

    /// Link every schedule to the doctor, all or nothing
    async fn assign(
        &self,
        doctor_id: Uuid,
        schedule_ids: &[Uuid],
    ) -> RepoResult<Vec<DoctorSchedule>>;
}

// ============================================================================
// Appointment Repository
// ============================================================================

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Appointment>>;

    /// Book the doctor's schedule slot, insert the appointment and its
    /// unpaid payment. Fails with `ScheduleAlreadyBooked` if the slot is taken.
    async fn create_with_payment(
        &self,
        appointment: &Appointment,
        payment: &Payment,
    ) -> RepoResult<()>;

    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Appointment>>;

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64>;
}

// ============================================================================
// Payment Repository
// ============================================================================

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Payment>>;

    async fn find_by_appointment(&self, appointment_id: Uuid) -> RepoResult<Option<Payment>>;

    /// Write the settled status to the appointment and the payment together.
    /// A PAID record stays PAID. A named record that does not exist is an
    /// error and nothing is written.
    async fn settle_checkout(&self, settlement: &CheckoutSettlement) -> RepoResult<()>;
}
