//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in care-core.
//! Multi-row writes run inside one transaction each.

mod appointment;
mod doctor;
mod doctor_schedule;
mod error;
mod links;
mod patient;
mod payment;
mod schedule;
mod specialty;
mod user;

pub use appointment::PgAppointmentRepository;
pub use doctor::PgDoctorRepository;
pub use doctor_schedule::PgDoctorScheduleRepository;
pub use patient::PgPatientRepository;
pub use payment::PgPaymentRepository;
pub use schedule::PgScheduleRepository;
pub use specialty::PgSpecialtyRepository;
pub use user::PgUserRepository;
