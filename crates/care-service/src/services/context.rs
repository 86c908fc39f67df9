//! Service context - dependency container for services
//!
//! Holds all repositories, the file store, and other dependencies needed by services.

use std::sync::Arc;

use care_common::PasswordService;
use care_core::traits::{
    AppointmentRepository, DoctorRepository, DoctorScheduleRepository, FileStorage,
    PatientRepository, PaymentRepository, ScheduleRepository, SpecialtyRepository, UserRepository,
};
use care_db::{
    PgAppointmentRepository, PgDoctorRepository, PgDoctorScheduleRepository, PgPatientRepository,
    PgPaymentRepository, PgPool, PgScheduleRepository, PgSpecialtyRepository, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (one per resource)
/// - The file store used for profile photos and icons
/// - Password hashing
/// - The secret webhook deliveries are signed with
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    doctor_repo: Arc<dyn DoctorRepository>,
    patient_repo: Arc<dyn PatientRepository>,
    specialty_repo: Arc<dyn SpecialtyRepository>,
    schedule_repo: Arc<dyn ScheduleRepository>,
    doctor_schedule_repo: Arc<dyn DoctorScheduleRepository>,
    appointment_repo: Arc<dyn AppointmentRepository>,
    payment_repo: Arc<dyn PaymentRepository>,

    // Collaborators
    file_storage: Arc<dyn FileStorage>,
    password_service: PasswordService,
    webhook_secret: Arc<str>,
}

impl ServiceContext {
    /// Wire every repository to the given PostgreSQL pool
    pub fn postgres(
        pool: PgPool,
        file_storage: Arc<dyn FileStorage>,
        webhook_secret: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            doctor_repo: Arc::new(PgDoctorRepository::new(pool.clone())),
            patient_repo: Arc::new(PgPatientRepository::new(pool.clone())),
            specialty_repo: Arc::new(PgSpecialtyRepository::new(pool.clone())),
            schedule_repo: Arc::new(PgScheduleRepository::new(pool.clone())),
            doctor_schedule_repo: Arc::new(PgDoctorScheduleRepository::new(pool.clone())),
            appointment_repo: Arc::new(PgAppointmentRepository::new(pool.clone())),
            payment_repo: Arc::new(PgPaymentRepository::new(pool)),
            file_storage,
            password_service: PasswordService::new(),
            webhook_secret: webhook_secret.into(),
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the doctor repository
    pub fn doctor_repo(&self) -> &dyn DoctorRepository {
        self.doctor_repo.as_ref()
    }

    /// Get the patient repository
    pub fn patient_repo(&self) -> &dyn PatientRepository {
        self.patient_repo.as_ref()
    }

    /// Get the specialty repository
    pub fn specialty_repo(&self) -> &dyn SpecialtyRepository {
        self.specialty_repo.as_ref()
    }

    /// Get the schedule repository
    pub fn schedule_repo(&self) -> &dyn ScheduleRepository {
        self.schedule_repo.as_ref()
    }

    /// Get the doctor schedule repository
    pub fn doctor_schedule_repo(&self) -> &dyn DoctorScheduleRepository {
        self.doctor_schedule_repo.as_ref()
    }

    /// Get the appointment repository
    pub fn appointment_repo(&self) -> &dyn AppointmentRepository {
        self.appointment_repo.as_ref()
    }

    /// Get the payment repository
    pub fn payment_repo(&self) -> &dyn PaymentRepository {
        self.payment_repo.as_ref()
    }

    // === Collaborators ===

    pub fn file_storage(&self) -> &dyn FileStorage {
        self.file_storage.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn webhook_secret(&self) -> &str {
        &self.webhook_secret
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("file_storage", &"...")
            .field("webhook_secret", &"[redacted]")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    doctor_repo: Option<Arc<dyn DoctorRepository>>,
    patient_repo: Option<Arc<dyn PatientRepository>>,
    specialty_repo: Option<Arc<dyn SpecialtyRepository>>,
    schedule_repo: Option<Arc<dyn ScheduleRepository>>,
    doctor_schedule_repo: Option<Arc<dyn DoctorScheduleRepository>>,
    appointment_repo: Option<Arc<dyn AppointmentRepository>>,
    payment_repo: Option<Arc<dyn PaymentRepository>>,
    file_storage: Option<Arc<dyn FileStorage>>,
    webhook_secret: Option<Arc<str>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn doctor_repo(mut self, repo: Arc<dyn DoctorRepository>) -> Self {
        self.doctor_repo = Some(repo);
        self
    }

    pub fn patient_repo(mut self, repo: Arc<dyn PatientRepository>) -> Self {
        self.patient_repo = Some(repo);
        self
    }

    pub fn specialty_repo(mut self, repo: Arc<dyn SpecialtyRepository>) -> Self {
        self.specialty_repo = Some(repo);
        self
    }

    pub fn schedule_repo(mut self, repo: Arc<dyn ScheduleRepository>) -> Self {
        self.schedule_repo = Some(repo);
        self
    }

    pub fn doctor_schedule_repo(mut self, repo: Arc<dyn DoctorScheduleRepository>) -> Self {
        self.doctor_schedule_repo = Some(repo);
        self
    }

    pub fn appointment_repo(mut self, repo: Arc<dyn AppointmentRepository>) -> Self {
        self.appointment_repo = Some(repo);
        self
    }

    pub fn payment_repo(mut self, repo: Arc<dyn PaymentRepository>) -> Self {
        self.payment_repo = Some(repo);
        self
    }

    pub fn file_storage(mut self, storage: Arc<dyn FileStorage>) -> Self {
        self.file_storage = Some(storage);
        self
    }

    pub fn webhook_secret(mut self, secret: impl Into<Arc<str>>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            doctor_repo: required(self.doctor_repo, "doctor_repo")?,
            patient_repo: required(self.patient_repo, "patient_repo")?,
            specialty_repo: required(self.specialty_repo, "specialty_repo")?,
            schedule_repo: required(self.schedule_repo, "schedule_repo")?,
            doctor_schedule_repo: required(self.doctor_schedule_repo, "doctor_schedule_repo")?,
            appointment_repo: required(self.appointment_repo, "appointment_repo")?,
            payment_repo: required(self.payment_repo, "payment_repo")?,
            file_storage: required(self.file_storage, "file_storage")?,
            password_service: PasswordService::new(),
            webhook_secret: required(self.webhook_secret, "webhook_secret")?,
        })
    }
}
