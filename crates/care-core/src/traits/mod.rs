//! Ports implemented by the infrastructure crates

mod repositories;
mod storage;

pub use repositories::{
    AppointmentRepository, DoctorRepository, DoctorScheduleRepository, PatientRepository,
    PaymentRepository, RepoResult, ScheduleRepository, SpecialtyRepository, UserRepository,
};
pub use storage::{FileStorage, UploadedFile};
